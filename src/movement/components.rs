//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// World geometry carrying a surface interaction profile
    Surface,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1 for right, -1 for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn direction(self) -> Dir2 {
        match self {
            Facing::Right => Dir2::X,
            Facing::Left => Dir2::NEG_X,
        }
    }

    /// Facing that points from `from_x` toward `to_x`.
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x < from_x {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Which collider the character currently uses.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyPosture {
    #[default]
    Standing,
    Crawling,
}

/// Where the character returns to on respawn.
#[derive(Component, Debug, Clone, Copy)]
pub struct SpawnPoint(pub Vec2);
