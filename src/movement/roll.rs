//! Movement domain: grounded roll.

use bevy::prelude::*;

use crate::movement::events::{AnimationIntent, IntentSink};
use crate::movement::{MotionContext, MotionInput, MotionMode, MotionTuning};

pub fn try_roll<S: IntentSink>(
    ctx: &mut MotionContext,
    input: &MotionInput,
    tuning: &MotionTuning,
    sink: &mut S,
) -> bool {
    if !input.roll_pressed || ctx.is_rolling() || ctx.timers.roll_cooldown.is_active() {
        return false;
    }
    if !ctx.grounded || ctx.crawling || ctx.interaction_locked {
        return false;
    }
    if !matches!(ctx.mode(), MotionMode::Grounded) {
        return false;
    }

    ctx.timers.roll.start(tuning.roll.duration);
    ctx.timers.roll_cooldown.start(tuning.roll.cooldown);
    ctx.velocity.x = ctx.facing.sign() * tuning.roll.speed;

    debug!("Roll {:?}", ctx.facing);
    sink.emit(AnimationIntent::TriggerRoll);
    true
}

/// Hold roll velocity while the roll lasts. Leaving the ground ends it.
pub fn update_roll(ctx: &mut MotionContext, tuning: &MotionTuning) -> bool {
    if !ctx.is_rolling() {
        return false;
    }
    if !ctx.grounded {
        ctx.timers.roll.clear();
        return false;
    }
    ctx.velocity.x = ctx.facing.sign() * tuning.roll.speed;
    true
}
