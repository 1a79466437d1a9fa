//! Movement domain: world queries the motion core depends on.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::GameLayer;
use crate::surfaces::SurfaceId;

/// One contact reported by a world query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub surface: SurfaceId,
    pub point: Vec2,
    /// Outward normal of the touched surface.
    pub normal: Vec2,
    /// Travel along the cast direction; zero for overlaps.
    pub distance: f32,
    pub bounds: Rect,
}

/// Box casts and overlaps against world geometry. Queries report "no hit"
/// rather than failing. Casts skip geometry they start inside; overlaps are
/// the way to find that.
pub trait PhysicsQuery {
    fn shape_cast(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceHit>;

    fn overlap(&self, origin: Vec2, size: Vec2, mask: LayerMask) -> Vec<SurfaceHit>;

    fn ray_cast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceHit> {
        self.shape_cast(origin, Vec2::ZERO, direction, max_distance, mask)
    }
}

/// Layers the motion core probes.
pub fn surface_mask() -> LayerMask {
    LayerMask::from(GameLayer::Surface)
}

pub fn closest_point(bounds: Rect, point: Vec2) -> Vec2 {
    point.clamp(bounds.min, bounds.max)
}

/// Outward normal of `bounds` facing `point`. Points inside resolve to the
/// nearest face.
pub fn contact_normal(bounds: Rect, point: Vec2) -> Vec2 {
    let closest = closest_point(bounds, point);
    let outside = point - closest;
    if outside != Vec2::ZERO {
        return outside.normalize();
    }

    let faces = [
        (point.x - bounds.min.x, Vec2::NEG_X),
        (bounds.max.x - point.x, Vec2::X),
        (point.y - bounds.min.y, Vec2::NEG_Y),
        (bounds.max.y - point.y, Vec2::Y),
    ];
    faces
        .into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, normal)| normal)
        .unwrap_or(Vec2::Y)
}
