//! Movement domain: grounded jumps and the single midair double jump.

use bevy::prelude::*;

use crate::movement::events::{AnimationIntent, IntentSink};
use crate::movement::query::PhysicsQuery;
use crate::movement::wall_jump::try_wall_jump;
use crate::movement::{MotionContext, MotionInput, MotionMode, MotionTuning};
use crate::surfaces::SurfaceLookup;

/// Resolve a jump request: ground jump, else wall jump, else double jump.
pub fn handle_jump<W, S>(
    ctx: &mut MotionContext,
    input: &MotionInput,
    tuning: &MotionTuning,
    world: &W,
    sink: &mut S,
)
where
    W: PhysicsQuery + SurfaceLookup,
    S: IntentSink,
{
    if !input.jump_pressed || ctx.interaction_locked {
        return;
    }
    if ctx.is_climbing() || ctx.is_mantling() {
        return;
    }

    if ctx.grounded {
        if ctx.crawling || ctx.is_rolling() || ctx.is_sliding() {
            return;
        }
        ctx.velocity.y = tuning.jump.jump_speed;
        ctx.double_jump_used = false;
        ctx.grounded = false;
        ctx.enter_mode(MotionMode::Airborne);
        debug!("Jump");
        sink.emit(AnimationIntent::TriggerJump);
        return;
    }

    if try_wall_jump(ctx, input, tuning, world, sink) {
        return;
    }

    if ctx.double_jump_used || ctx.is_wall_jumping() {
        return;
    }
    ctx.velocity.y = tuning.jump.double_jump_speed;
    ctx.double_jump_used = true;
    debug!("Double jump");
    sink.emit(AnimationIntent::TriggerDoubleJump);
}
