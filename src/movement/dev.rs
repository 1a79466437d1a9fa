//! Movement domain: sandbox room, player spawn and placeholder presentation.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::content::ContentRegistry;
use crate::movement::{
    AnimationIntent, GameLayer, ModeKind, MotionContext, MotionIntentEvent, MotionTuning, Player,
    RespawnMotionEvent, SpawnPoint, spawn_player,
};

/// Pixels per metre for the sandbox camera.
const PIXELS_PER_METRE: f32 = 48.0;
/// Falling below this height respawns the player.
const KILL_PLANE_Y: f32 = -10.0;
const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 1.0);
const FLASH_SECONDS: f32 = 0.15;

/// World block spawned from the sandbox layout.
#[derive(Component, Debug)]
pub struct SandboxBlock;

/// Child sprite standing in for the character's animation rig.
#[derive(Component, Debug, Default)]
pub struct PlayerVisual {
    flash: Option<(Color, f32)>,
}

pub struct SandboxPlugin;

impl Plugin for SandboxPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (spawn_camera, spawn_sandbox_room, spawn_sandbox_player),
        )
        .add_systems(
            Update,
            (
                respawn_player,
                (flash_on_intents, present_player).chain(),
            ),
        );
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_METRE,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 3.0, 0.0),
    ));
}

fn spawn_sandbox_room(mut commands: Commands, registry: Res<ContentRegistry>) {
    let mut spawned = 0;

    for block in registry.blocks_sorted() {
        let Some(preset) = registry.preset(&block.preset_id) else {
            warn!(
                "Skipping block '{}': unknown preset '{}'",
                block.id, block.preset_id
            );
            continue;
        };
        let profile = match preset.profile() {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Skipping block '{}': {}", block.id, e);
                continue;
            }
        };

        commands.spawn((
            SandboxBlock,
            Name::new(block.id.clone()),
            profile,
            Sprite {
                color: preset.color(),
                custom_size: Some(block.size),
                ..default()
            },
            Transform::from_xyz(block.center.x, block.center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(block.size.x, block.size.y),
            CollisionLayers::new(GameLayer::Surface, [GameLayer::Player]),
        ));
        spawned += 1;
    }

    info!("Sandbox room spawned with {} blocks", spawned);
}

fn spawn_sandbox_player(mut commands: Commands, tuning: Res<MotionTuning>) {
    let player = spawn_player(&mut commands, &tuning, PLAYER_SPAWN);
    commands.entity(player).with_children(|parent| {
        parent.spawn((
            PlayerVisual::default(),
            Sprite {
                color: mode_color(ModeKind::Airborne),
                custom_size: Some(tuning.body.standing_size),
                ..default()
            },
            Transform::default(),
        ));
    });
}

fn respawn_player(
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Query<(Entity, &Transform, &SpawnPoint), With<Player>>,
    mut respawns: MessageWriter<RespawnMotionEvent>,
) {
    let requested = keyboard.just_pressed(KeyCode::KeyR);

    for (entity, transform, spawn) in &query {
        let fell = transform.translation.y < KILL_PLANE_Y;
        if requested || fell {
            if fell {
                info!("Player fell out of the room");
            }
            respawns.write(RespawnMotionEvent {
                entity,
                position: spawn.0,
            });
        }
    }
}

fn mode_color(mode: ModeKind) -> Color {
    match mode {
        ModeKind::Grounded => Color::srgb(0.9, 0.9, 0.9),
        ModeKind::Airborne => Color::srgb(0.75, 0.8, 0.95),
        ModeKind::Climbing => Color::srgb(0.4, 0.9, 0.5),
        ModeKind::Mantling => Color::srgb(0.4, 0.6, 1.0),
        ModeKind::WallJumping => Color::srgb(1.0, 0.6, 0.2),
        ModeKind::Sliding => Color::srgb(0.8, 0.5, 0.9),
    }
}

fn trigger_color(intent: AnimationIntent) -> Option<Color> {
    match intent {
        AnimationIntent::TriggerJump => Some(Color::WHITE),
        AnimationIntent::TriggerDoubleJump => Some(Color::srgb(0.3, 1.0, 1.0)),
        AnimationIntent::TriggerWallJump => Some(Color::srgb(1.0, 0.4, 0.1)),
        AnimationIntent::TriggerMantle => Some(Color::srgb(0.2, 0.4, 1.0)),
        AnimationIntent::TriggerRoll => Some(Color::srgb(1.0, 0.9, 0.2)),
        _ => None,
    }
}

fn flash_on_intents(
    mut intents: MessageReader<MotionIntentEvent>,
    mut visuals: Query<(&ChildOf, &mut PlayerVisual)>,
) {
    for event in intents.read() {
        let Some(color) = trigger_color(event.intent) else {
            continue;
        };
        debug!("{:?} on {:?}", event.intent, event.entity);

        for (child_of, mut visual) in &mut visuals {
            if child_of.parent() == event.entity {
                visual.flash = Some((color, FLASH_SECONDS));
            }
        }
    }
}

/// Tint by mode, shrink to the crawl box, and fade trigger flashes.
fn present_player(
    time: Res<Time>,
    tuning: Res<MotionTuning>,
    players: Query<&MotionContext, With<Player>>,
    mut visuals: Query<(&ChildOf, &mut PlayerVisual, &mut Sprite, &mut Transform)>,
) {
    let body = &tuning.body;

    for (child_of, mut visual, mut sprite, mut transform) in &mut visuals {
        let Ok(ctx) = players.get(child_of.parent()) else {
            continue;
        };

        let (size, offset) = if ctx.is_crawling() {
            (body.crawling_size, body.crawl_offset())
        } else {
            (body.standing_size, Vec2::ZERO)
        };
        sprite.custom_size = Some(size);
        transform.translation.x = offset.x;
        transform.translation.y = offset.y;

        let base = if ctx.is_rolling() {
            Color::srgb(0.95, 0.85, 0.4)
        } else {
            mode_color(ctx.mode_kind())
        };
        sprite.color = match visual.flash.as_mut() {
            Some((color, remaining)) => {
                *remaining -= time.delta_secs();
                *color
            }
            None => base,
        };
        if visual.flash.is_some_and(|(_, remaining)| remaining <= 0.0) {
            visual.flash = None;
        }
    }
}
