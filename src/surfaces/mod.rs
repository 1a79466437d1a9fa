//! Surfaces domain: per-side capability profiles for world geometry.

mod profile;

#[cfg(test)]
mod tests;

pub use profile::{
    ProfileError, SurfaceCapability, SurfaceInteraction, SurfaceInteractionProfile, SurfaceSide,
};

use bevy::prelude::*;

/// Identity of a world surface. Holds no ownership; the surface may be gone
/// by the time the id is looked at again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl From<Entity> for SurfaceId {
    fn from(entity: Entity) -> Self {
        Self(entity.to_bits())
    }
}

impl SurfaceId {
    pub fn entity(self) -> Entity {
        Entity::from_bits(self.0)
    }
}

/// Read access to surface profiles by identity.
pub trait SurfaceLookup {
    fn profile(&self, surface: SurfaceId) -> Option<&SurfaceInteractionProfile>;

    /// Surfaces without a profile have no capabilities.
    fn has_capability(
        &self,
        surface: SurfaceId,
        side: SurfaceSide,
        capability: SurfaceCapability,
    ) -> bool {
        self.profile(surface)
            .is_some_and(|profile| profile.has_capability(side, capability))
    }
}

pub struct SurfacesPlugin;

impl Plugin for SurfacesPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<SurfaceInteractionProfile>()
            .register_type::<SurfaceInteraction>()
            .register_type::<SurfaceSide>();
    }
}
