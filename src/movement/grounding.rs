//! Movement domain: ground detection and snapping.

use bevy::prelude::*;

use crate::movement::query::{PhysicsQuery, SurfaceHit, contact_normal, surface_mask};
use crate::movement::{MotionContext, MotionMode, MotionTuning};
use crate::surfaces::{SurfaceCapability, SurfaceLookup, SurfaceSide};

/// Centre and size of the ground check box for the current posture.
pub fn ground_check_box(ctx: &MotionContext, tuning: &MotionTuning) -> (Vec2, Vec2) {
    let feet = ctx.position.y - tuning.body.half_height();
    if ctx.crawling {
        (
            Vec2::new(ctx.position.x, feet),
            tuning.ground.crawl_check_size,
        )
    } else {
        let offset = tuning.ground.check_offset_x * ctx.facing.sign();
        (
            Vec2::new(ctx.position.x + offset, feet),
            tuning.ground.check_size,
        )
    }
}

/// Highest walkable top the check box touches, if any. Contact normals are
/// taken from the body centre, so a check box hanging past an edge still
/// sees the top it stands on.
pub fn find_ground<W>(ctx: &MotionContext, tuning: &MotionTuning, world: &W) -> Option<SurfaceHit>
where
    W: PhysicsQuery + SurfaceLookup,
{
    let (origin, size) = ground_check_box(ctx, tuning);
    let feet = origin.y;
    let reach = size.y * 0.5;

    world
        .overlap(origin, size, surface_mask())
        .into_iter()
        .filter(|hit| contact_normal(hit.bounds, ctx.position).y >= tuning.ground.min_normal_y)
        .filter(|hit| {
            world.has_capability(hit.surface, SurfaceSide::Top, SurfaceCapability::Walkable)
        })
        .filter(|hit| (feet - hit.bounds.max.y).abs() <= reach)
        .max_by(|a, b| a.bounds.max.y.total_cmp(&b.bounds.max.y))
}

/// Refresh the grounded flag, snap onto the supporting surface, and apply
/// the landing resets. Returns whether a surface actually supports the
/// body; the crawl coyote window keeps `grounded` without support.
pub fn update_grounding<W>(ctx: &mut MotionContext, tuning: &MotionTuning, world: &W) -> bool
where
    W: PhysicsQuery + SurfaceLookup,
{
    let was_grounded = ctx.grounded;
    let rising = ctx.velocity.y > tuning.ground.max_rising_speed;

    let support = if rising {
        None
    } else {
        find_ground(ctx, tuning, world)
    };

    let supported = support.is_some();
    match support {
        Some(hit) => {
            ctx.grounded = true;
            ctx.last_grounded_at = Some(ctx.clock);
            if ctx.crawling {
                ctx.last_crawl_grounded_at = Some(ctx.clock);
            }
            ctx.last_surface = Some(hit.surface);

            let top = hit.bounds.max.y;
            let gap = ctx.position.y - tuning.body.half_height() - top;
            // Climbs and mantles own the vertical axis.
            let snap = tuning.ground.snap_enabled && ctx.gravity_enabled;
            if snap && gap.abs() <= tuning.ground.snap_tolerance {
                ctx.position.y = top + tuning.body.half_height();
                ctx.velocity.y = 0.0;
            }
        }
        None => {
            // Crawling keeps a short coyote window before dropping.
            let coyote = !rising
                && ctx.crawling
                && ctx
                    .last_crawl_grounded_at
                    .is_some_and(|at| ctx.clock - at <= tuning.ground.crawl_coyote_time);
            ctx.grounded = coyote;
        }
    }

    match (was_grounded, ctx.grounded) {
        (false, true) => on_landed(ctx),
        (true, false) => debug!("Left ground"),
        _ => {}
    }

    ctx.sync_base_mode();
    supported
}

fn on_landed(ctx: &mut MotionContext) {
    debug!("Landed at {:?}", ctx.position);
    ctx.double_jump_used = false;
    ctx.suppress_fall_animation = false;
    ctx.post_mantle = false;

    if matches!(ctx.mode(), MotionMode::WallJumping) {
        ctx.timers.wall_jump_lockout.clear();
        ctx.enter_mode(MotionMode::Grounded);
    }
}
