//! Movement domain: run, walk, crawl and slide velocity policies.

use bevy::prelude::*;

use crate::movement::events::{AnimationIntent, IntentSink};
use crate::movement::query::{PhysicsQuery, surface_mask};
use crate::movement::{Facing, MotionContext, MotionInput, MotionMode, MotionTuning};

const AXIS_DEADZONE: f32 = 0.1;

fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    if current < target {
        (current + max_delta).min(target)
    } else {
        (current - max_delta).max(target)
    }
}

/// Track run hold and release time for the slide input buffer.
pub fn latch_run(ctx: &mut MotionContext, input: &MotionInput) {
    let held = input.run_held && !ctx.interaction_locked;
    if ctx.run_held && !held {
        ctx.run_released_at = Some(ctx.clock);
    }
    ctx.run_held = held;
}

fn run_recently_held(ctx: &MotionContext, buffer: f32) -> bool {
    ctx.run_held
        || ctx
            .run_released_at
            .is_some_and(|at| ctx.clock - at <= buffer)
}

/// True when nothing blocks the standing collider's head.
pub fn head_clear<W: PhysicsQuery>(ctx: &MotionContext, tuning: &MotionTuning, world: &W) -> bool {
    let origin = ctx.position + tuning.body.head_clearance_offset;
    world
        .overlap(origin, tuning.body.head_clearance_size, surface_mask())
        .is_empty()
}

/// Latch crawl/crouch input and pick the collider posture. Standing back up
/// waits for head clearance.
pub fn update_posture<W, S>(
    ctx: &mut MotionContext,
    input: &MotionInput,
    tuning: &MotionTuning,
    world: &W,
    sink: &mut S,
) where
    W: PhysicsQuery,
    S: IntentSink,
{
    let sliding = ctx.is_sliding();

    if !ctx.interaction_locked && !sliding {
        if input.crawl_held || input.crouch_held {
            ctx.crawl_latched = true;
        } else if ctx.crawl_latched && head_clear(ctx, tuning, world) {
            ctx.crawl_latched = false;
        }
    }

    let low = sliding || (ctx.crawl_latched && ctx.grounded);
    if low == ctx.crawling {
        return;
    }
    if !low && !head_clear(ctx, tuning, world) {
        ctx.crawl_latched = true;
        return;
    }

    ctx.crawling = low;
    if low {
        ctx.last_crawl_grounded_at = Some(ctx.clock);
    }
    debug!("Crawl posture {}", if low { "entered" } else { "left" });
    sink.emit(AnimationIntent::SetCrawling(low));
}

/// Start a slide if the trigger holds. Grounding runs first in the step, so
/// a request held through the air fires on the landing step itself.
pub fn try_start_slide<S: IntentSink>(
    ctx: &mut MotionContext,
    input: &MotionInput,
    tuning: &MotionTuning,
    sink: &mut S,
) -> bool {
    if !input.crawl_held || ctx.interaction_locked || ctx.is_rolling() {
        return false;
    }
    if !ctx.grounded || !matches!(ctx.mode(), MotionMode::Grounded) {
        return false;
    }

    let fast_enough = ctx.velocity.x.abs() > tuning.slide.speed_threshold;
    if !fast_enough || !run_recently_held(ctx, tuning.slide.input_buffer) {
        return false;
    }
    if !ctx.enter_mode(MotionMode::Sliding) {
        return false;
    }

    ctx.timers.slide.start(tuning.slide.duration);
    ctx.crawl_latched = false;
    ctx.crawling = true;
    debug!("Slide started at {:.2} m/s", ctx.velocity.x.abs());
    sink.emit(AnimationIntent::SetSliding(true));
    true
}

/// Decelerate an active slide and end it by speed, timer, release or
/// leaving the ground. A slide held down with crouch alone stops dead at
/// the end instead of carrying into a crawl.
pub fn update_slide<S: IntentSink>(
    ctx: &mut MotionContext,
    input: &MotionInput,
    tuning: &MotionTuning,
    dt: f32,
    sink: &mut S,
) {
    if !ctx.grounded || !(input.crawl_held || input.crouch_held) {
        end_slide(ctx, sink);
        return;
    }

    let direction = if ctx.velocity.x < 0.0 { -1.0 } else { 1.0 };
    let crawl_speed = tuning.run.crawl_speed;
    let speed = (ctx.velocity.x.abs() - tuning.slide.deceleration * dt).max(crawl_speed);
    ctx.velocity.x = direction * speed;

    if speed > crawl_speed && ctx.timers.slide.is_active() {
        return;
    }

    end_slide(ctx, sink);
    ctx.crawl_latched = true;
    ctx.velocity.x = if input.crawl_held {
        direction * crawl_speed
    } else {
        0.0
    };
}

pub(crate) fn end_slide<S: IntentSink>(ctx: &mut MotionContext, sink: &mut S) {
    ctx.timers.slide.clear();
    ctx.enter_base_mode();
    debug!("Slide ended at {:.2} m/s", ctx.velocity.x.abs());
    sink.emit(AnimationIntent::SetSliding(false));
}

/// Horizontal control outside of slides, climbs and mantles.
pub fn apply_locomotion(
    ctx: &mut MotionContext,
    input: &MotionInput,
    tuning: &MotionTuning,
    dt: f32,
) {
    let axis = if input.move_axis.x.abs() > AXIS_DEADZONE {
        input.move_axis.x.clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let run = &tuning.run;

    if ctx.grounded {
        let (cap, accel) = if ctx.crawling {
            (run.crawl_speed, run.crawl_acceleration)
        } else if ctx.run_held {
            (run.run_speed, run.acceleration)
        } else {
            (run.walk_speed, run.acceleration)
        };
        ctx.velocity.x = approach(ctx.velocity.x, axis * cap, accel * dt);
    } else {
        // Air control adds to existing momentum but never pushes past the cap.
        let next = ctx.velocity.x + axis * run.air_acceleration * dt;
        let limit = run.max_air_speed.max(ctx.velocity.x.abs());
        ctx.velocity.x = next.clamp(-limit, limit);
    }
}

/// Turn toward horizontal input unless a facing lock or an owning mode
/// holds the current facing.
pub fn update_facing(ctx: &mut MotionContext, input: &MotionInput) {
    if input.move_axis.x.abs() <= AXIS_DEADZONE {
        return;
    }
    let locked = ctx.timers.wall_jump_facing_lock.is_active()
        || ctx.timers.mantle_facing_lock.is_active()
        || ctx.is_rolling();
    let owned = matches!(
        ctx.mode(),
        MotionMode::Sliding | MotionMode::Mantling(_) | MotionMode::Climbing(_)
    );
    if locked || owned {
        return;
    }

    ctx.facing = if input.move_axis.x < 0.0 {
        Facing::Left
    } else {
        Facing::Right
    };
}
