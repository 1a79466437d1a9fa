//! Movement domain: character motion plugin wiring and public exports.

mod avian;
mod bootstrap;
pub mod climb;
mod components;
mod context;
mod dev;
mod events;
pub mod grounding;
pub mod jump;
pub mod locomotion;
pub mod mantle;
pub mod query;
mod resources;
pub mod roll;
mod step;
mod systems;
pub mod wall_jump;

#[cfg(test)]
mod testing;

pub use avian::AvianSurfaceQueries;
pub use bootstrap::{posture_collider, spawn_player};
pub use climb::{ClimbExit, ClimbStep};
pub use components::{BodyPosture, Facing, GameLayer, Player, SpawnPoint};
pub use context::{
    ClimbHold, Cooldown, ExpiredTimers, MantleMotion, ModeKind, MotionContext, MotionMode,
    MotionTimers,
};
pub use dev::SandboxPlugin;
pub use events::{
    AnimationIntent, FreezeMotionEvent, IntentSink, InteractionLockEvent, MotionIntentEvent,
    RespawnMotionEvent,
};
pub use mantle::LedgeCandidate;
pub use query::{PhysicsQuery, SurfaceHit};
pub use resources::{
    BodyTuning, ClimbTuning, GroundTuning, JumpTuning, LedgeDetection, MantleEasing,
    MantleTuning, MotionInput, MotionTuning, RollTuning, RunTuning, SlideTuning, WallJumpTuning,
};
pub use step::step_motion;

use bevy::prelude::*;

use crate::movement::systems::{
    apply_motion_commands, read_input, step_player_motion, sync_posture_collider,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MotionTuning>()
            .init_resource::<MotionInput>()
            .add_message::<MotionIntentEvent>()
            .add_message::<FreezeMotionEvent>()
            .add_message::<RespawnMotionEvent>()
            .add_message::<InteractionLockEvent>()
            .add_systems(Update, read_input)
            .add_systems(
                FixedUpdate,
                (
                    apply_motion_commands,
                    step_player_motion,
                    sync_posture_collider,
                )
                    .chain(),
            );
    }
}
