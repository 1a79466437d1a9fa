//! ContentRegistry resource providing HashMap lookups for loaded content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for surface presets and the sandbox layout.
#[derive(Resource, Default, Debug, Clone)]
pub struct ContentRegistry {
    pub surface_presets: HashMap<String, SurfacePresetDef>,
    pub room_blocks: HashMap<String, RoomBlockDef>,
}

impl ContentRegistry {
    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded:\n\
             - Surface Presets: {}\n\
             - Room Blocks: {}",
            self.surface_presets.len(),
            self.room_blocks.len(),
        )
    }

    pub fn preset(&self, id: &str) -> Option<&SurfacePresetDef> {
        self.surface_presets.get(id)
    }

    /// Room blocks in id order, so spawning is deterministic.
    pub fn blocks_sorted(&self) -> Vec<&RoomBlockDef> {
        let mut blocks: Vec<_> = self.room_blocks.values().collect();
        blocks.sort_by(|a, b| a.id.cmp(&b.id));
        blocks
    }
}
