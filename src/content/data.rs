//! Data definitions for RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The ContentRegistry provides lookup by id.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::surfaces::{ProfileError, SurfaceInteraction, SurfaceInteractionProfile};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Surface presets (surface_presets.ron)
// ============================================================================

/// A named capability table that world blocks can reference.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct SurfacePresetDef {
    pub id: String,
    pub name: String,
    pub interactions: Vec<SurfaceInteraction>,
    /// Sprite tint used by the sandbox.
    #[serde(default = "default_tint")]
    pub tint: [f32; 3],
}

fn default_tint() -> [f32; 3] {
    [0.4, 0.4, 0.45]
}

impl SurfacePresetDef {
    /// Validated profile for this preset.
    pub fn profile(&self) -> Result<SurfaceInteractionProfile, ProfileError> {
        SurfaceInteractionProfile::new(self.interactions.clone())
    }

    pub fn color(&self) -> Color {
        Color::srgb(self.tint[0], self.tint[1], self.tint[2])
    }
}

// ============================================================================
// Sandbox room layout (sandbox_room.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct RoomBlockDef {
    pub id: String,
    pub preset_id: String,
    pub center: Vec2,
    pub size: Vec2,
}
