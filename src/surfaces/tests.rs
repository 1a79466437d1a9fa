//! Surfaces domain: unit tests for side resolution and capability lookup.

use bevy::prelude::*;

use super::{
    ProfileError, SurfaceCapability, SurfaceId, SurfaceInteraction, SurfaceInteractionProfile,
    SurfaceSide,
};

#[test]
fn test_side_from_axis_normals() {
    assert_eq!(SurfaceSide::from_normal(Vec2::Y), Some(SurfaceSide::Top));
    assert_eq!(SurfaceSide::from_normal(Vec2::NEG_Y), Some(SurfaceSide::Bottom));
    assert_eq!(SurfaceSide::from_normal(Vec2::NEG_X), Some(SurfaceSide::Left));
    assert_eq!(SurfaceSide::from_normal(Vec2::X), Some(SurfaceSide::Right));
}

#[test]
fn test_side_from_diagonal_normal_is_none() {
    assert_eq!(SurfaceSide::from_normal(Vec2::new(1.0, 1.0)), None);
    assert_eq!(SurfaceSide::from_normal(Vec2::ZERO), None);
}

#[test]
fn test_side_from_unnormalized_normal() {
    assert_eq!(
        SurfaceSide::from_normal(Vec2::new(0.0, 5.0)),
        Some(SurfaceSide::Top)
    );
}

#[test]
fn test_profile_entries_for_same_side_combine() {
    let profile = SurfaceInteractionProfile::new(vec![
        SurfaceInteraction::new(SurfaceSide::Top).walkable(),
        SurfaceInteraction::new(SurfaceSide::Top).mantleable(),
    ])
    .expect("valid profile");

    assert!(profile.has_capability(SurfaceSide::Top, SurfaceCapability::Walkable));
    assert!(profile.has_capability(SurfaceSide::Top, SurfaceCapability::Mantleable));
    assert!(!profile.has_capability(SurfaceSide::Left, SurfaceCapability::Walkable));
}

#[test]
fn test_profile_rejects_climbable_and_wall_jumpable_side() {
    let result = SurfaceInteractionProfile::new(vec![
        SurfaceInteraction::new(SurfaceSide::Left)
            .climbable()
            .wall_jumpable(),
    ]);

    assert_eq!(
        result,
        Err(ProfileError::ClimbableAndWallJumpable {
            side: SurfaceSide::Left
        })
    );
}

#[test]
fn test_conflict_split_across_entries_is_rejected() {
    let result = SurfaceInteractionProfile::new(vec![
        SurfaceInteraction::new(SurfaceSide::Right).climbable(),
        SurfaceInteraction::new(SurfaceSide::Right).wall_jumpable(),
    ]);

    assert!(result.is_err());
}

#[test]
fn test_climbable_wins_on_unvalidated_profile() {
    // Built directly, bypassing validation.
    let profile = SurfaceInteractionProfile {
        interactions: vec![
            SurfaceInteraction::new(SurfaceSide::Left)
                .climbable()
                .wall_jumpable(),
        ],
    };

    assert!(profile.has_capability(SurfaceSide::Left, SurfaceCapability::Climbable));
    assert!(!profile.has_capability(SurfaceSide::Left, SurfaceCapability::WallJumpable));
}

#[test]
fn test_different_sides_may_mix_climb_and_wall_jump() {
    let profile = SurfaceInteractionProfile::new(vec![
        SurfaceInteraction::new(SurfaceSide::Left).climbable(),
        SurfaceInteraction::new(SurfaceSide::Right).wall_jumpable(),
    ])
    .expect("different sides do not conflict");

    assert!(profile.has_capability(SurfaceSide::Right, SurfaceCapability::WallJumpable));
}

#[test]
fn test_surface_id_round_trips_entity() {
    let entity = Entity::PLACEHOLDER;
    let id = SurfaceId::from(entity);
    assert_eq!(id.entity(), entity);
}
