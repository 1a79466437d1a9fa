//! Movement domain: the fixed-order motion step.
//!
//! One call advances one character by one physics step. Arbitration follows
//! a strict priority (mantle, climb, wall-jump lockout, slide, grounded
//! crawl/run, air control) so only one policy writes velocity per step.

use bevy::prelude::*;

use crate::movement::events::{AnimationIntent, IntentSink};
use crate::movement::query::PhysicsQuery;
use crate::movement::{
    ClimbStep, LedgeDetection, MotionContext, MotionInput, MotionMode, MotionTuning, climb,
    grounding, jump, locomotion, mantle, roll,
};
use crate::surfaces::SurfaceLookup;

pub fn step_motion<W, S>(
    ctx: &mut MotionContext,
    input: &MotionInput,
    tuning: &MotionTuning,
    world: &W,
    sink: &mut S,
    dt: f32,
) where
    W: PhysicsQuery + SurfaceLookup,
    S: IntentSink,
{
    if ctx.frozen {
        ctx.velocity = Vec2::ZERO;
        return;
    }

    let expired = ctx.advance_clock(dt);
    if expired.wall_jump_lockout && ctx.is_wall_jumping() {
        ctx.enter_base_mode();
    }
    if expired.mantle_cooldown {
        ctx.last_mantled = None;
    }
    if expired.roll {
        debug!("Roll finished");
    }

    locomotion::latch_run(ctx, input);

    if ctx.is_mantling() {
        mantle::advance_mantle(ctx, tuning, dt);
        emit_animation(ctx, sink);
        return;
    }

    let supported = grounding::update_grounding(ctx, tuning, world);
    // A slide that lost its ground ends before anything else arbitrates.
    if ctx.is_sliding() && !ctx.grounded {
        locomotion::end_slide(ctx, sink);
    }
    locomotion::update_posture(ctx, input, tuning, world, sink);

    let detection = if input.interact_pressed {
        LedgeDetection::Edge
    } else {
        tuning.mantle.detection
    };
    if mantle::try_mantle(ctx, tuning, world, detection, sink) {
        emit_animation(ctx, sink);
        return;
    }

    let mut velocity_owned = false;
    if ctx.is_climbing() {
        match climb::update_climb(ctx, input, tuning, world, dt, sink) {
            ClimbStep::Holding => {
                emit_animation(ctx, sink);
                return;
            }
            ClimbStep::Kicked => velocity_owned = true,
            ClimbStep::Exited => {}
        }
    } else if climb::try_enter_climb(ctx, input, tuning, world, sink) {
        emit_animation(ctx, sink);
        return;
    }

    if !velocity_owned {
        velocity_owned = roll::update_roll(ctx, tuning) || roll::try_roll(ctx, input, tuning, sink);
    }

    if !velocity_owned {
        jump::handle_jump(ctx, input, tuning, world, sink);
        locomotion::try_start_slide(ctx, input, tuning, sink);

        match ctx.mode() {
            MotionMode::Sliding => locomotion::update_slide(ctx, input, tuning, dt, sink),
            MotionMode::Grounded | MotionMode::Airborne => {
                locomotion::apply_locomotion(ctx, input, tuning, dt)
            }
            // Wall-jump lockout: no horizontal response.
            MotionMode::WallJumping | MotionMode::Climbing(_) | MotionMode::Mantling(_) => {}
        }
    }

    locomotion::update_facing(ctx, input);

    // Coyote time keeps the grounded flag, not the support.
    if ctx.gravity_enabled && !(ctx.grounded && supported) {
        ctx.velocity.y -= tuning.body.gravity * dt;
    }

    emit_animation(ctx, sink);
}

fn fall_suppressed(ctx: &MotionContext) -> bool {
    ctx.suppress_fall_animation
        || ctx.post_mantle
        || ctx.timers.mantle_fall_suppression.is_active()
        || ctx.is_climbing()
        || ctx.is_mantling()
}

/// Per-step presentation parameters.
fn emit_animation<S: IntentSink>(ctx: &mut MotionContext, sink: &mut S) {
    if std::mem::take(&mut ctx.suppress_next_animation) {
        return;
    }

    let speed = ctx.velocity.x.abs();
    sink.emit(AnimationIntent::SetGrounded(ctx.grounded));
    sink.emit(AnimationIntent::SetSpeed(speed));
    if ctx.crawling {
        sink.emit(AnimationIntent::SetCrawlSpeed(speed));
    }

    let falling = !ctx.grounded && ctx.velocity.y < 0.0 && !fall_suppressed(ctx);
    sink.emit(AnimationIntent::SetFalling(falling));
}
