//! Movement domain: animation intents and motion command messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Discrete presentation signal. The motion core never names animation
/// clips; a presentation layer maps these onto whatever it plays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationIntent {
    SetGrounded(bool),
    SetSpeed(f32),
    SetCrawling(bool),
    SetCrawlSpeed(f32),
    SetSliding(bool),
    SetFalling(bool),
    SetClimbing(bool),
    SetClimbingDown(bool),
    SetPlaybackPaused(bool),
    TriggerJump,
    TriggerDoubleJump,
    TriggerWallJump,
    TriggerMantle,
    TriggerRoll,
}

/// Receives intents while a step runs.
pub trait IntentSink {
    fn emit(&mut self, intent: AnimationIntent);
}

impl IntentSink for Vec<AnimationIntent> {
    fn emit(&mut self, intent: AnimationIntent) {
        self.push(intent);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MotionIntentEvent {
    pub entity: Entity,
    pub intent: AnimationIntent,
}

impl Message for MotionIntentEvent {}

/// Freeze or unfreeze a character (death, cutscenes).
#[derive(Debug, Clone, Copy)]
pub struct FreezeMotionEvent {
    pub entity: Entity,
    pub frozen: bool,
}

impl Message for FreezeMotionEvent {}

/// Reset a character's motion state at a position.
#[derive(Debug, Clone, Copy)]
pub struct RespawnMotionEvent {
    pub entity: Entity,
    pub position: Vec2,
}

impl Message for RespawnMotionEvent {}

/// Set or release the push/pull interaction lock.
#[derive(Debug, Clone, Copy)]
pub struct InteractionLockEvent {
    pub entity: Entity,
    pub locked: bool,
}

impl Message for InteractionLockEvent {}
