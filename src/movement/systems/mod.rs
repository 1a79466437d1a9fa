//! Movement domain: system modules bridging the motion core and the ECS.

pub(crate) mod input;
pub(crate) mod motion;

pub(crate) use input::read_input;
pub(crate) use motion::{apply_motion_commands, step_player_motion, sync_posture_collider};
