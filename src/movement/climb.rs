//! Movement domain: wall climbing, wall kicks and forced climb exits.

use bevy::prelude::*;

use crate::movement::events::{AnimationIntent, IntentSink};
use crate::movement::query::{PhysicsQuery, SurfaceHit, surface_mask};
use crate::movement::{ClimbHold, MotionContext, MotionInput, MotionMode, MotionTuning};
use crate::surfaces::{SurfaceCapability, SurfaceLookup, SurfaceSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimbStep {
    /// Still on the wall; the climb owns velocity this step.
    Holding,
    /// Jumped off the wall; velocity already written.
    Kicked,
    /// Forced off the wall; normal control resumes.
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimbExit {
    /// Jump or mantle: no nudge, no suppression.
    Released,
    /// Ground contact or drop-to-ground: nudge away and suppress re-entry.
    Forced,
}

/// Climbable surface in front of the character that may be grabbed now.
pub fn find_climb_surface<W>(
    ctx: &MotionContext,
    input: &MotionInput,
    tuning: &MotionTuning,
    world: &W,
) -> Option<SurfaceHit>
where
    W: PhysicsQuery + SurfaceLookup,
{
    if ctx.is_climbing() || ctx.is_mantling() || ctx.is_sliding() {
        return None;
    }
    if ctx.timers.climb_suppression.is_active() || ctx.timers.regrab.is_active() {
        return None;
    }
    if ctx.interaction_locked || ctx.crawling || ctx.is_rolling() {
        return None;
    }
    if ctx.grounded && tuning.climb.require_up_when_grounded && !input.pressing_up() {
        return None;
    }

    let climb = &tuning.climb;
    let offset = Vec2::new(climb.check_offset.x * ctx.facing.sign(), climb.check_offset.y);
    let hit = world.shape_cast(
        ctx.position + offset,
        climb.check_size,
        ctx.facing.direction(),
        climb.check_distance,
        surface_mask(),
    )?;

    let side = SurfaceSide::from_normal(hit.normal)?;
    if !world.has_capability(hit.surface, side, SurfaceCapability::Climbable) {
        return None;
    }

    let toward = (hit.bounds.center().x - ctx.position.x) * ctx.facing.sign() > 0.0;
    let top = ctx.position.y + tuning.body.half_height();
    let within_height = top <= hit.bounds.max.y + climb.top_tolerance
        && ctx.position.y >= hit.bounds.min.y;

    (toward && within_height).then_some(hit)
}

pub fn try_enter_climb<W, S>(
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
    let Some(hit) = find_climb_surface(ctx, input, tuning, world) else {
        return false;
    };

    let hold = ClimbHold {
        surface: hit.surface,
        top: hit.bounds.max.y,
        bottom: hit.bounds.min.y,
        entered_at: ctx.clock,
        animation_progressed: false,
        animation_paused: false,
    };
    if !ctx.enter_mode(MotionMode::Climbing(hold)) {
        return false;
    }

    ctx.position.y = (ctx.position.y + tuning.climb.entry_lift).min(hold.top);
    ctx.velocity = Vec2::ZERO;
    ctx.gravity_enabled = false;
    ctx.suppress_fall_animation = false;
    ctx.last_surface = Some(hit.surface);

    debug!(
        "Climb started on {:?} (bounds {:.2}..{:.2})",
        hit.surface, hold.bottom, hold.top
    );
    sink.emit(AnimationIntent::SetFalling(false));
    sink.emit(AnimationIntent::SetClimbing(true));
    sink.emit(AnimationIntent::SetPlaybackPaused(false));
    true
}

/// Drive one climbing step: exits, wall kick, then bounded vertical travel.
pub fn update_climb<W, S>(
    ctx: &mut MotionContext,
    input: &MotionInput,
    tuning: &MotionTuning,
    world: &W,
    dt: f32,
    sink: &mut S,
) -> ClimbStep
where
    W: PhysicsQuery + SurfaceLookup,
    S: IntentSink,
{
    let MotionMode::Climbing(mut hold) = *ctx.mode() else {
        return ClimbStep::Exited;
    };
    let climb = &tuning.climb;

    if world.profile(hold.surface).is_none() {
        debug!("Climbed surface {:?} is gone", hold.surface);
        exit_climb(ctx, tuning, ClimbExit::Released, sink);
        return ClimbStep::Exited;
    }

    if ctx.grounded && ctx.clock - hold.entered_at > climb.entry_grace {
        debug!("Climb forced off by ground contact");
        exit_climb(ctx, tuning, ClimbExit::Forced, sink);
        return ClimbStep::Exited;
    }

    if input.jump_pressed && !ctx.timers.wall_kick.is_active() {
        wall_kick(ctx, tuning, sink);
        return ClimbStep::Kicked;
    }

    let up = input.pressing_up();
    let down = input.pressing_down();
    let step = dt.max(f32::EPSILON);

    ctx.velocity.x = 0.0;
    ctx.velocity.y = if up {
        climb.climb_speed.min((hold.top - ctx.position.y) / step).max(0.0)
    } else if down {
        -climb.climb_speed.min((ctx.position.y - hold.bottom) / step).max(0.0)
    } else {
        0.0
    };

    if down && reached_ground_below(ctx, tuning, world) {
        debug!("Climbed down onto a walkable surface");
        ctx.suppress_fall_animation = true;
        exit_climb(ctx, tuning, ClimbExit::Forced, sink);
        return ClimbStep::Exited;
    }

    if up || down {
        sink.emit(AnimationIntent::SetClimbingDown(down));
        if hold.animation_paused {
            sink.emit(AnimationIntent::SetPlaybackPaused(false));
            hold.animation_paused = false;
        }
    } else if hold.animation_progressed && !hold.animation_paused {
        sink.emit(AnimationIntent::SetPlaybackPaused(true));
        hold.animation_paused = true;
    }
    hold.animation_progressed = true;

    *ctx.mode_mut() = MotionMode::Climbing(hold);
    ClimbStep::Holding
}

/// Walkable top just below the feet.
fn reached_ground_below<W>(ctx: &MotionContext, tuning: &MotionTuning, world: &W) -> bool
where
    W: PhysicsQuery + SurfaceLookup,
{
    let body = &tuning.body;
    let probe = Vec2::new(
        ctx.position.x,
        ctx.position.y - body.half_height() - 0.05,
    );
    let size = Vec2::new(body.standing_size.x * 0.9, 0.1);

    world
        .overlap(probe, size, surface_mask())
        .into_iter()
        .any(|hit| {
            hit.normal.y > 0.0
                && world.has_capability(hit.surface, SurfaceSide::Top, SurfaceCapability::Walkable)
        })
}

fn wall_kick<S: IntentSink>(ctx: &mut MotionContext, tuning: &MotionTuning, sink: &mut S) {
    exit_climb(ctx, tuning, ClimbExit::Released, sink);

    let climb = &tuning.climb;
    ctx.velocity = Vec2::new(
        -ctx.facing.sign() * climb.kick_impulse.x,
        climb.kick_impulse.y,
    );
    ctx.timers.wall_kick.start(climb.kick_cooldown);
    ctx.timers.regrab.start(climb.regrab_cooldown);
    ctx.timers
        .mantle_lockout
        .start(tuning.mantle.lockout_after_wall_jump);

    debug!("Wall kick");
    sink.emit(AnimationIntent::TriggerJump);
    ctx.suppress_next_animation = true;
}

/// Leave the climb, restore gravity, and reset the double jump.
pub fn exit_climb<S: IntentSink>(
    ctx: &mut MotionContext,
    tuning: &MotionTuning,
    exit: ClimbExit,
    sink: &mut S,
) {
    if !ctx.is_climbing() {
        return;
    }

    ctx.enter_base_mode();
    ctx.gravity_enabled = true;
    ctx.velocity.y = 0.0;
    ctx.double_jump_used = false;

    if exit == ClimbExit::Forced {
        ctx.position.x -= ctx.facing.sign() * tuning.climb.exit_nudge;
        ctx.timers
            .climb_suppression
            .start(tuning.climb.suppression);
    }

    debug!("Climb ended ({:?})", exit);
    sink.emit(AnimationIntent::SetClimbing(false));
    sink.emit(AnimationIntent::SetClimbingDown(false));
    sink.emit(AnimationIntent::SetPlaybackPaused(false));
}
