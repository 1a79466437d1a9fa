//! Content domain: RON-driven surface presets, sandbox layout and motion tuning.

pub mod data;
pub mod loader;
pub mod registry;
pub mod validation;


pub use data::{DataFile, RoomBlockDef, SurfacePresetDef};
pub use loader::{ContentLoadError, bundled_content, load_all_content, load_tuning};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, validate_content, validate_tuning};

use bevy::prelude::*;
use std::path::PathBuf;

use crate::movement::MotionTuning;

/// Where content files were read from.
#[derive(Resource, Debug, Clone)]
pub struct ContentSettings {
    pub data_dir: PathBuf,
}

/// Loads content synchronously while the app is built, so every Startup
/// system already sees the registry and tuning.
pub struct ContentPlugin {
    pub data_dir: PathBuf,
}

impl Default for ContentPlugin {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("assets/data"),
        }
    }
}

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SurfacePresetDef>()
            .register_type::<RoomBlockDef>();

        let (registry, tuning) = self.load();

        for error in validate_content(&registry) {
            warn!("Content validation: {}", error);
        }
        for error in validate_tuning(&tuning) {
            warn!("Tuning validation: {}", error);
        }
        info!("{}", registry.summary());

        app.insert_resource(registry)
            .insert_resource(tuning)
            .insert_resource(ContentSettings {
                data_dir: self.data_dir.clone(),
            });
    }
}

impl ContentPlugin {
    fn load(&self) -> (ContentRegistry, MotionTuning) {
        match load_all_content(&self.data_dir) {
            Ok(content) => return content,
            Err(errors) => {
                for error in &errors {
                    warn!("{}", error);
                }
                warn!(
                    "Falling back to bundled content ({} error(s) in {})",
                    errors.len(),
                    self.data_dir.display()
                );
            }
        }

        match bundled_content() {
            Ok(content) => content,
            Err(errors) => {
                for error in &errors {
                    error!("Bundled content: {}", error);
                }
                (ContentRegistry::default(), MotionTuning::default())
            }
        }
    }
}
