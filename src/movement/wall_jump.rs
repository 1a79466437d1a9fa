//! Movement domain: jumping off wall-jumpable surfaces while airborne.

use bevy::prelude::*;

use crate::movement::events::{AnimationIntent, IntentSink};
use crate::movement::query::{PhysicsQuery, SurfaceHit, surface_mask};
use crate::movement::{MotionContext, MotionInput, MotionMode, MotionTuning};
use crate::surfaces::{SurfaceCapability, SurfaceLookup, SurfaceSide};

/// Wall-jumpable surface directly in front of the character, if the
/// current state allows a wall jump off it.
pub fn find_wall_jump_surface<W>(
    ctx: &MotionContext,
    input: &MotionInput,
    tuning: &MotionTuning,
    world: &W,
) -> Option<SurfaceHit>
where
    W: PhysicsQuery + SurfaceLookup,
{
    if ctx.grounded || ctx.is_wall_jumping() || !input.run_held {
        return None;
    }

    let direction = ctx.facing.direction();
    let hit = world.ray_cast(
        ctx.position,
        direction,
        tuning.wall_jump.check_distance,
        surface_mask(),
    )?;
    let side = SurfaceSide::from_normal(hit.normal)?;
    if !world.has_capability(hit.surface, side, SurfaceCapability::WallJumpable) {
        return None;
    }

    // Input has to press into the wall.
    let toward_wall = input.move_axis.x * ctx.facing.sign() > 0.1;
    toward_wall.then_some(hit)
}

pub fn try_wall_jump<W, S>(
    ctx: &mut MotionContext,
    input: &MotionInput,
    tuning: &MotionTuning,
    world: &W,
    sink: &mut S,
) -> bool
where
    W: PhysicsQuery + SurfaceLookup,
    S: IntentSink,
{
    let Some(hit) = find_wall_jump_surface(ctx, input, tuning, world) else {
        return false;
    };
    if !ctx.enter_mode(MotionMode::WallJumping) {
        return false;
    }

    let away = -ctx.facing.sign();
    ctx.velocity = Vec2::new(
        away * tuning.wall_jump.impulse.x,
        tuning.wall_jump.impulse.y,
    );
    ctx.timers.wall_jump_lockout.start(tuning.wall_jump.lockout);
    ctx.timers
        .wall_jump_facing_lock
        .start(tuning.wall_jump.facing_lock);
    ctx.timers
        .mantle_lockout
        .start(tuning.mantle.lockout_after_wall_jump);
    ctx.last_surface = Some(hit.surface);

    debug!("Wall jump off {:?}", hit.surface);
    sink.emit(AnimationIntent::TriggerWallJump);
    true
}
