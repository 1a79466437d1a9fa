//! Movement domain: fixed-step systems that run the motion core.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::movement::{
    AvianSurfaceQueries, BodyPosture, FreezeMotionEvent, InteractionLockEvent, MotionContext,
    MotionInput, MotionIntentEvent, MotionTuning, Player, RespawnMotionEvent, posture_collider,
    step_motion,
};

pub(crate) fn apply_motion_commands(
    mut freezes: MessageReader<FreezeMotionEvent>,
    mut respawns: MessageReader<RespawnMotionEvent>,
    mut locks: MessageReader<InteractionLockEvent>,
    mut query: Query<(&mut MotionContext, &mut Transform, &mut LinearVelocity), With<Player>>,
) {
    for event in freezes.read() {
        if let Ok((mut ctx, _, mut velocity)) = query.get_mut(event.entity) {
            ctx.freeze(event.frozen);
            if event.frozen {
                velocity.0 = Vec2::ZERO;
            }
            info!("Motion {} for {:?}", if event.frozen { "frozen" } else { "resumed" }, event.entity);
        }
    }

    for event in respawns.read() {
        if let Ok((mut ctx, mut transform, mut velocity)) = query.get_mut(event.entity) {
            ctx.respawn(event.position);
            transform.translation.x = event.position.x;
            transform.translation.y = event.position.y;
            velocity.0 = Vec2::ZERO;
            info!("Respawned {:?} at {:?}", event.entity, event.position);
        }
    }

    for event in locks.read() {
        if let Ok((mut ctx, _, _)) = query.get_mut(event.entity) {
            ctx.set_interaction_lock(event.locked);
        }
    }
}

pub(crate) fn step_player_motion(
    time: Res<Time>,
    tuning: Res<MotionTuning>,
    mut input: ResMut<MotionInput>,
    world: AvianSurfaceQueries,
    mut intents: MessageWriter<MotionIntentEvent>,
    mut query: Query<
        (
            Entity,
            &mut MotionContext,
            &mut Transform,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    let snapshot = input.sanitized();
    let mut pending = Vec::new();

    for (entity, mut ctx, mut transform, mut velocity) in &mut query {
        ctx.position = transform.translation.truncate();
        ctx.velocity = velocity.0;

        step_motion(&mut ctx, &snapshot, &tuning, &world, &mut pending, dt);

        // Snaps, nudges and mantles move the body directly.
        if transform.translation.truncate() != ctx.position {
            transform.translation.x = ctx.position.x;
            transform.translation.y = ctx.position.y;
        }
        velocity.0 = ctx.velocity;

        for intent in pending.drain(..) {
            intents.write(MotionIntentEvent { entity, intent });
        }
    }

    input.clear_presses();
}

/// Swap between the standing and crawling collider when the posture flips.
pub(crate) fn sync_posture_collider(
    tuning: Res<MotionTuning>,
    mut query: Query<(&MotionContext, &mut BodyPosture, &mut Collider), With<Player>>,
) {
    for (ctx, mut posture, mut collider) in &mut query {
        let wanted = if ctx.is_crawling() {
            BodyPosture::Crawling
        } else {
            BodyPosture::Standing
        };
        if *posture == wanted {
            continue;
        }

        *posture = wanted;
        *collider = posture_collider(&tuning.body, wanted);
        debug!("Collider posture -> {:?}", wanted);
    }
}
