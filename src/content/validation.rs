//! Validation for cross-references, surface profiles and tuning values.

use thiserror::Error;

use super::registry::ContentRegistry;
use crate::movement::MotionTuning;
use crate::surfaces::ProfileError;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{source_type} '{source_id}' references missing {target_type} '{missing_id}' in field '{field}'")]
    MissingReference {
        source_type: &'static str,
        source_id: String,
        field: &'static str,
        target_type: &'static str,
        missing_id: String,
    },
    #[error("SurfacePreset '{preset_id}': {source}")]
    InvalidProfile {
        preset_id: String,
        #[source]
        source: ProfileError,
    },
    #[error("RoomBlock '{block_id}' has non-positive size {size:?}")]
    DegenerateBlock { block_id: String, size: [f32; 2] },
    #[error("tuning field '{field}' must be positive, got {value}")]
    NonPositiveTuning { field: &'static str, value: f32 },
}

/// Helper macro for checking a reference exists
macro_rules! check_ref {
    ($errors:expr, $registry_map:expr, $source_type:expr, $source_id:expr, $field:expr, $target_type:expr, $ref_id:expr) => {
        if !$registry_map.contains_key($ref_id) {
            $errors.push(ValidationError::MissingReference {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                target_type: $target_type,
                missing_id: $ref_id.to_string(),
            });
        }
    };
}

/// Validate presets and room blocks in the registry.
/// Returns a list of validation errors, empty if the content is valid.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (id, preset) in &registry.surface_presets {
        if let Err(source) = preset.profile() {
            errors.push(ValidationError::InvalidProfile {
                preset_id: id.clone(),
                source,
            });
        }
    }

    for (id, block) in &registry.room_blocks {
        check_ref!(
            errors,
            registry.surface_presets,
            "RoomBlock",
            id,
            "preset_id",
            "SurfacePreset",
            &block.preset_id
        );
        if block.size.x <= 0.0 || block.size.y <= 0.0 {
            errors.push(ValidationError::DegenerateBlock {
                block_id: id.clone(),
                size: block.size.to_array(),
            });
        }
    }

    errors
}

/// Check that durations, sizes and speeds the motion core divides by or
/// steps toward are usable.
pub fn validate_tuning(tuning: &MotionTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    macro_rules! positive {
        ($($field:literal => $value:expr),+ $(,)?) => {
            $(
                if !($value > 0.0) {
                    errors.push(ValidationError::NonPositiveTuning {
                        field: $field,
                        value: $value,
                    });
                }
            )+
        };
    }

    positive!(
        "body.standing_size.x" => tuning.body.standing_size.x,
        "body.standing_size.y" => tuning.body.standing_size.y,
        "body.crawling_size.x" => tuning.body.crawling_size.x,
        "body.crawling_size.y" => tuning.body.crawling_size.y,
        "body.gravity" => tuning.body.gravity,
        "ground.check_size.y" => tuning.ground.check_size.y,
        "run.walk_speed" => tuning.run.walk_speed,
        "run.run_speed" => tuning.run.run_speed,
        "run.crawl_speed" => tuning.run.crawl_speed,
        "slide.duration" => tuning.slide.duration,
        "jump.jump_speed" => tuning.jump.jump_speed,
        "roll.duration" => tuning.roll.duration,
        "climb.climb_speed" => tuning.climb.climb_speed,
        "climb.check_distance" => tuning.climb.check_distance,
        "wall_jump.check_distance" => tuning.wall_jump.check_distance,
        "mantle.duration" => tuning.mantle.duration,
        "mantle.check_distance" => tuning.mantle.check_distance,
    );

    errors
}
