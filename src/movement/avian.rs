//! Movement domain: world queries backed by avian2d spatial queries.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::movement::query::{PhysicsQuery, SurfaceHit, closest_point, contact_normal};
use crate::surfaces::{SurfaceId, SurfaceInteractionProfile, SurfaceLookup};

#[derive(SystemParam)]
pub struct AvianSurfaceQueries<'w, 's> {
    spatial: SpatialQuery<'w, 's>,
    surfaces: Query<
        'w,
        's,
        (
            &'static ColliderAabb,
            Option<&'static SurfaceInteractionProfile>,
        ),
    >,
}

impl AvianSurfaceQueries<'_, '_> {
    fn bounds(&self, entity: Entity) -> Option<Rect> {
        let (aabb, _) = self.surfaces.get(entity).ok()?;
        Some(Rect::from_corners(aabb.min, aabb.max))
    }
}

impl PhysicsQuery for AvianSurfaceQueries<'_, '_> {
    fn shape_cast(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceHit> {
        if size.min_element() <= 0.0 {
            return self.ray_cast(origin, direction, max_distance, mask);
        }

        let shape = Collider::rectangle(size.x, size.y);
        let config = ShapeCastConfig {
            max_distance,
            ignore_origin_penetration: true,
            ..default()
        };
        let filter = SpatialQueryFilter::from_mask(mask);
        let hit = self
            .spatial
            .cast_shape(&shape, origin, 0.0, direction, &config, &filter)?;

        Some(SurfaceHit {
            surface: SurfaceId::from(hit.entity),
            point: hit.point1,
            normal: hit.normal1,
            distance: hit.distance,
            bounds: self.bounds(hit.entity)?,
        })
    }

    fn overlap(&self, origin: Vec2, size: Vec2, mask: LayerMask) -> Vec<SurfaceHit> {
        let shape = Collider::rectangle(size.x, size.y);
        let filter = SpatialQueryFilter::from_mask(mask);

        self.spatial
            .shape_intersections(&shape, origin, 0.0, &filter)
            .into_iter()
            .filter_map(|entity| {
                let bounds = self.bounds(entity)?;
                Some(SurfaceHit {
                    surface: SurfaceId::from(entity),
                    point: closest_point(bounds, origin),
                    normal: contact_normal(bounds, origin),
                    distance: 0.0,
                    bounds,
                })
            })
            .collect()
    }

    fn ray_cast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<SurfaceHit> {
        let filter = SpatialQueryFilter::from_mask(mask);
        let hit = self
            .spatial
            .cast_ray(origin, direction, max_distance, true, &filter)?;

        Some(SurfaceHit {
            surface: SurfaceId::from(hit.entity),
            point: origin + *direction * hit.distance,
            normal: hit.normal,
            distance: hit.distance,
            bounds: self.bounds(hit.entity)?,
        })
    }
}

impl SurfaceLookup for AvianSurfaceQueries<'_, '_> {
    fn profile(&self, surface: SurfaceId) -> Option<&SurfaceInteractionProfile> {
        self.surfaces
            .get(surface.entity())
            .ok()
            .and_then(|(_, profile)| profile)
    }
}
