//! Debug tooling for tuning motion in the sandbox.
//!
//! Features:
//! - F1: motion info overlay (mode, velocity, active timers)
//! - F2: probe gizmos (ground, head, climb, ledge and wall-jump checks)
//! - F3: freeze / unfreeze the player
//! - F4: toggle the interaction lock
//! - F5: reload motion_tuning.ron from disk

mod systems;

use bevy::prelude::*;

use systems::{
    draw_probe_gizmos, handle_debug_hotkeys, update_debug_info_overlay, update_status_message,
};

// ============================================================================
// Debug State Resource
// ============================================================================

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the motion info overlay is visible
    pub show_info: bool,
    /// Whether probe gizmos are drawn
    pub show_probes: bool,
    /// Message to display temporarily in the overlay
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}

// ============================================================================
// Debug UI Components
// ============================================================================

/// Marker for the motion info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

// ============================================================================
// Plugin
// ============================================================================

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (
                    handle_debug_hotkeys,
                    update_status_message,
                    update_debug_info_overlay,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                draw_probe_gizmos.run_if(|state: Res<DebugState>| state.show_probes),
            );
    }
}
