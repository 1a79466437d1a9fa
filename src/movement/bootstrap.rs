//! Movement domain: player bootstrap and posture colliders.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    BodyPosture, BodyTuning, GameLayer, MotionContext, MotionTuning, Player, SpawnPoint,
};

/// Collider for a posture. Both shapes share the same feet line, so the
/// crawl box is offset downward inside a compound.
pub fn posture_collider(body: &BodyTuning, posture: BodyPosture) -> Collider {
    match posture {
        BodyPosture::Standing => Collider::rectangle(body.standing_size.x, body.standing_size.y),
        BodyPosture::Crawling => Collider::compound(vec![(
            Position::new(body.crawl_offset()),
            Rotation::default(),
            Collider::rectangle(body.crawling_size.x, body.crawling_size.y),
        )]),
    }
}

/// Spawn a motion-driven character at `position` (standing collider centre).
pub fn spawn_player(commands: &mut Commands, tuning: &MotionTuning, position: Vec2) -> Entity {
    let body = &tuning.body;

    commands
        .spawn((
            // Identity & Motion
            (
                Player,
                MotionContext::new(position),
                BodyPosture::Standing,
                SpawnPoint(position),
            ),
            // Presentation attaches as children
            Transform::from_xyz(position.x, position.y, 1.0),
            Visibility::default(),
            // Physics
            (
                RigidBody::Dynamic,
                posture_collider(body, BodyPosture::Standing),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0), // Gravity is applied by the motion step
                Friction::new(0.0),
                CollisionLayers::new(GameLayer::Player, [GameLayer::Surface]),
            ),
        ))
        .id()
}
