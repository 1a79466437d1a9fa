//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::data::*;
use super::registry::ContentRegistry;
use crate::movement::MotionTuning;

pub const SURFACE_PRESETS_FILE: &str = "surface_presets.ron";
pub const SANDBOX_ROOM_FILE: &str = "sandbox_room.ron";
pub const MOTION_TUNING_FILE: &str = "motion_tuning.ron";

/// Error type for content loading failures.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("Failed to load {file}: IO error: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load {file}: Parse error: {source}")]
    Parse {
        file: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        file: path.display().to_string(),
        source,
    })
}

/// Parse RON text containing a DataFile<T> wrapper.
pub fn parse_data_file<T>(file: &str, contents: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> =
        ron_options()
            .from_str(contents)
            .map_err(|source| ContentLoadError::Parse {
                file: file.to_string(),
                source,
            })?;

    Ok(data.items)
}

/// Parse a single RON struct (not wrapped in DataFile).
pub fn parse_single_file<T>(file: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|source| ContentLoadError::Parse {
            file: file.to_string(),
            source,
        })
}

/// Load every content file from `base_path` (normally assets/data).
/// Returns errors for any files that fail to load.
pub fn load_all_content(
    base_path: &Path,
) -> Result<(ContentRegistry, MotionTuning), Vec<ContentLoadError>> {
    let mut sources = Vec::new();
    let mut errors = Vec::new();

    for file in [SURFACE_PRESETS_FILE, SANDBOX_ROOM_FILE, MOTION_TUNING_FILE] {
        match read_file(&base_path.join(file)) {
            Ok(contents) => sources.push(contents),
            Err(e) => errors.push(e),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    parse_content(&sources[0], &sources[1], &sources[2])
}

/// Parse the three content sources into a registry and tuning.
pub fn parse_content(
    presets: &str,
    room: &str,
    tuning: &str,
) -> Result<(ContentRegistry, MotionTuning), Vec<ContentLoadError>> {
    let mut registry = ContentRegistry::default();
    let mut errors = Vec::new();

    // Helper macro to reduce boilerplate
    macro_rules! load_into {
        ($registry_field:expr, $file:expr, $contents:expr, $type:ty, $id_field:ident) => {
            match parse_data_file::<$type>($file, $contents) {
                Ok(items) => {
                    for item in items {
                        $registry_field.insert(item.$id_field.clone(), item);
                    }
                }
                Err(e) => errors.push(e),
            }
        };
    }

    load_into!(
        registry.surface_presets,
        SURFACE_PRESETS_FILE,
        presets,
        SurfacePresetDef,
        id
    );
    load_into!(
        registry.room_blocks,
        SANDBOX_ROOM_FILE,
        room,
        RoomBlockDef,
        id
    );

    let tuning = match parse_single_file::<MotionTuning>(MOTION_TUNING_FILE, tuning) {
        Ok(tuning) => tuning,
        Err(e) => {
            errors.push(e);
            return Err(errors);
        }
    };

    if errors.is_empty() {
        Ok((registry, tuning))
    } else {
        Err(errors)
    }
}

/// Content compiled into the binary, used when assets/data is unreadable.
pub fn bundled_content() -> Result<(ContentRegistry, MotionTuning), Vec<ContentLoadError>> {
    parse_content(
        include_str!("../../assets/data/surface_presets.ron"),
        include_str!("../../assets/data/sandbox_room.ron"),
        include_str!("../../assets/data/motion_tuning.ron"),
    )
}

/// Re-read only the tuning file, for live tweaking.
pub fn load_tuning(base_path: &Path) -> Result<MotionTuning, ContentLoadError> {
    let path = base_path.join(MOTION_TUNING_FILE);
    let contents = read_file(&path)?;
    parse_single_file(&path.display().to_string(), &contents)
}
