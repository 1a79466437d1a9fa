//! Surfaces domain: surface sides, capability flags, and profile validation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum alignment between a contact normal and an axis for the contact
/// to count as hitting that side.
const SIDE_ALIGNMENT: f32 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Reflect)]
pub enum SurfaceSide {
    Top,
    Left,
    Right,
    Bottom,
}

impl SurfaceSide {
    /// Resolve which side of a surface was touched from its outward contact
    /// normal. Diagonal normals (corners, slopes) resolve to no side.
    pub fn from_normal(normal: Vec2) -> Option<Self> {
        let normal = normal.normalize_or_zero();
        if normal.dot(Vec2::NEG_X) > SIDE_ALIGNMENT {
            Some(SurfaceSide::Left)
        } else if normal.dot(Vec2::X) > SIDE_ALIGNMENT {
            Some(SurfaceSide::Right)
        } else if normal.dot(Vec2::Y) > SIDE_ALIGNMENT {
            Some(SurfaceSide::Top)
        } else if normal.dot(Vec2::NEG_Y) > SIDE_ALIGNMENT {
            Some(SurfaceSide::Bottom)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceCapability {
    Walkable,
    Climbable,
    Mantleable,
    WallJumpable,
}

/// Capability flags for one side of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Reflect)]
pub struct SurfaceInteraction {
    pub side: SurfaceSide,
    #[serde(default)]
    pub walkable: bool,
    #[serde(default)]
    pub climbable: bool,
    #[serde(default)]
    pub mantleable: bool,
    #[serde(default)]
    pub wall_jumpable: bool,
}

impl SurfaceInteraction {
    pub fn new(side: SurfaceSide) -> Self {
        Self {
            side,
            walkable: false,
            climbable: false,
            mantleable: false,
            wall_jumpable: false,
        }
    }

    pub fn walkable(mut self) -> Self {
        self.walkable = true;
        self
    }

    pub fn climbable(mut self) -> Self {
        self.climbable = true;
        self
    }

    pub fn mantleable(mut self) -> Self {
        self.mantleable = true;
        self
    }

    pub fn wall_jumpable(mut self) -> Self {
        self.wall_jumpable = true;
        self
    }

    fn grants(&self, capability: SurfaceCapability) -> bool {
        match capability {
            SurfaceCapability::Walkable => self.walkable,
            SurfaceCapability::Climbable => self.climbable,
            SurfaceCapability::Mantleable => self.mantleable,
            SurfaceCapability::WallJumpable => self.wall_jumpable,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("side {side:?} is marked both climbable and wall-jumpable")]
    ClimbableAndWallJumpable { side: SurfaceSide },
}

/// Ordered per-side capability table owned by a world surface.
///
/// Several entries may name the same side; their flags are combined.
#[derive(Component, Debug, Clone, Default, PartialEq, Deserialize, Serialize, Reflect)]
#[reflect(Component)]
pub struct SurfaceInteractionProfile {
    pub interactions: Vec<SurfaceInteraction>,
}

impl SurfaceInteractionProfile {
    /// Build a profile, rejecting sides that are both climbable and
    /// wall-jumpable.
    pub fn new(interactions: Vec<SurfaceInteraction>) -> Result<Self, ProfileError> {
        let profile = Self { interactions };
        profile.validate()?;
        Ok(profile)
    }

    /// A solid block whose top can be walked on.
    pub fn floor() -> Self {
        Self {
            interactions: vec![SurfaceInteraction::new(SurfaceSide::Top).walkable()],
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        for side in [
            SurfaceSide::Top,
            SurfaceSide::Left,
            SurfaceSide::Right,
            SurfaceSide::Bottom,
        ] {
            if self.raw_capability(side, SurfaceCapability::Climbable)
                && self.raw_capability(side, SurfaceCapability::WallJumpable)
            {
                return Err(ProfileError::ClimbableAndWallJumpable { side });
            }
        }
        Ok(())
    }

    /// Capability lookup with the climbable-wins tie-break applied, so a
    /// profile that slipped past validation still resolves deterministically.
    pub fn has_capability(&self, side: SurfaceSide, capability: SurfaceCapability) -> bool {
        if capability == SurfaceCapability::WallJumpable
            && self.raw_capability(side, SurfaceCapability::Climbable)
        {
            return false;
        }
        self.raw_capability(side, capability)
    }

    fn raw_capability(&self, side: SurfaceSide, capability: SurfaceCapability) -> bool {
        self.interactions
            .iter()
            .any(|interaction| interaction.side == side && interaction.grants(capability))
    }
}
