//! Movement domain: ledge detection and the eased mantle onto a ledge top.
//!
//! The automatic and explicit entry paths share [`find_ledge`]; the only
//! difference between them is the [`LedgeDetection`] they pass in. The test
//! never mutates the context, so it can be run any number of times a step.

use bevy::prelude::*;

use crate::movement::climb::{ClimbExit, exit_climb};
use crate::movement::events::{AnimationIntent, IntentSink};
use crate::movement::query::{PhysicsQuery, surface_mask};
use crate::movement::{
    Facing, LedgeDetection, MantleMotion, MotionContext, MotionMode, MotionTuning,
};
use crate::surfaces::{SurfaceCapability, SurfaceId, SurfaceLookup, SurfaceSide};

/// A mantle target found this step. Only usable on the step it was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgeCandidate {
    pub surface: SurfaceId,
    /// Top corner on the approach side.
    pub corner: Vec2,
    /// Body position at the end of the mantle.
    pub target: Vec2,
    pub found_at_step: u64,
}

impl LedgeCandidate {
    pub fn is_current(&self, ctx: &MotionContext) -> bool {
        self.found_at_step == ctx.step_index
    }
}

/// Mantle eligibility. `None` whenever anything rules the mantle out,
/// including a missing ledge-check anchor.
pub fn find_ledge<W>(
    ctx: &MotionContext,
    tuning: &MotionTuning,
    world: &W,
    detection: LedgeDetection,
) -> Option<LedgeCandidate>
where
    W: PhysicsQuery + SurfaceLookup,
{
    let mantle = &tuning.mantle;
    let anchor = mantle.ledge_check_anchor?;

    if ctx.frozen || ctx.is_mantling() {
        return None;
    }
    if ctx.timers.mantle_cooldown.is_active() || ctx.timers.mantle_lockout.is_active() {
        return None;
    }
    if ctx.was_grounded_within(mantle.airborne_guard) {
        return None;
    }

    let origin = ctx.position + Vec2::new(anchor.x * ctx.facing.sign(), anchor.y);
    let hit = world.shape_cast(
        origin,
        mantle.check_size,
        Dir2::NEG_Y,
        mantle.check_distance,
        surface_mask(),
    )?;

    if !world.has_capability(hit.surface, SurfaceSide::Top, SurfaceCapability::Mantleable) {
        return None;
    }
    if ctx.last_mantled == Some(hit.surface) {
        return None;
    }

    let bounds = hit.bounds;
    let top = bounds.max.y;
    if ctx.position.y <= top - mantle.top_margin {
        return None;
    }
    if (ctx.position.x - bounds.center().x).abs() <= mantle.min_horizontal_offset {
        return None;
    }

    let left = Vec2::new(bounds.min.x, top);
    let right = Vec2::new(bounds.max.x, top);
    if detection == LedgeDetection::Corner {
        let nearest = ctx
            .position
            .distance(left)
            .min(ctx.position.distance(right));
        if nearest > mantle.corner_radius {
            return None;
        }
    }

    let (corner, inward) = if ctx.position.x < bounds.center().x {
        (left, 1.0)
    } else {
        (right, -1.0)
    };
    let target = corner
        + Vec2::new(
            inward * mantle.forward_offset,
            tuning.body.half_height() + mantle.clearance,
        );

    Some(LedgeCandidate {
        surface: hit.surface,
        corner,
        target,
        found_at_step: ctx.step_index,
    })
}

/// Begin mantling toward a candidate found this step.
pub fn start_mantle<S: IntentSink>(
    ctx: &mut MotionContext,
    candidate: LedgeCandidate,
    tuning: &MotionTuning,
    sink: &mut S,
) -> bool {
    if !candidate.is_current(ctx) {
        debug!("Discarding stale ledge candidate {:?}", candidate.surface);
        return false;
    }

    exit_climb(ctx, tuning, ClimbExit::Released, sink);

    let motion = MantleMotion {
        ledge: candidate.surface,
        start: ctx.position,
        target: candidate.target,
        elapsed: 0.0,
    };
    if !ctx.enter_mode(MotionMode::Mantling(motion)) {
        return false;
    }

    let mantle = &tuning.mantle;
    ctx.facing = Facing::toward(ctx.position.x, candidate.target.x);
    ctx.timers.mantle_facing_lock.start(mantle.facing_lock);
    ctx.timers
        .mantle_fall_suppression
        .start(mantle.fall_suppression);
    ctx.last_mantled = Some(candidate.surface);
    ctx.last_surface = Some(candidate.surface);
    ctx.velocity = Vec2::ZERO;
    ctx.gravity_enabled = false;

    debug!(
        "Mantle started on {:?} toward {:?}",
        candidate.surface, candidate.target
    );
    sink.emit(AnimationIntent::SetFalling(false));
    sink.emit(AnimationIntent::TriggerMantle);
    true
}

/// Run the shared eligibility test and start a mantle if it passes.
pub fn try_mantle<W, S>(
    ctx: &mut MotionContext,
    tuning: &MotionTuning,
    world: &W,
    detection: LedgeDetection,
    sink: &mut S,
) -> bool
where
    W: PhysicsQuery + SurfaceLookup,
    S: IntentSink,
{
    match find_ledge(ctx, tuning, world, detection) {
        Some(candidate) => start_mantle(ctx, candidate, tuning, sink),
        None => false,
    }
}

/// Advance the mantle interpolation; finishes on the ledge top.
pub fn advance_mantle(ctx: &mut MotionContext, tuning: &MotionTuning, dt: f32) {
    let MotionMode::Mantling(mut motion) = *ctx.mode() else {
        return;
    };
    let mantle = &tuning.mantle;

    motion.elapsed += dt;
    let t = motion.progress(mantle.duration);
    let delta = motion.target - motion.start;
    ctx.position = motion.start
        + Vec2::new(
            delta.x * mantle.horizontal_easing.sample(t),
            delta.y * mantle.vertical_easing.sample(t),
        );
    ctx.velocity = Vec2::ZERO;

    if t < 1.0 {
        *ctx.mode_mut() = MotionMode::Mantling(motion);
        return;
    }

    ctx.position = motion.target;
    ctx.timers.mantle_cooldown.start(mantle.cooldown);
    ctx.post_mantle = true;
    ctx.gravity_enabled = true;
    ctx.enter_base_mode();
    debug!("Mantle finished on {:?}", motion.ledge);
}
