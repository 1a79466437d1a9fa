//! Debug domain: hotkeys, the info overlay and probe gizmos.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::content::{ContentSettings, load_tuning, validate_tuning};
use crate::debug::{DebugInfoOverlay, DebugState};
use crate::movement::grounding::ground_check_box;
use crate::movement::{
    FreezeMotionEvent, InteractionLockEvent, MotionContext, MotionMode, MotionTuning, Player,
};

/// Handle keyboard shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut tuning: ResMut<MotionTuning>,
    settings: Option<Res<ContentSettings>>,
    player_query: Query<(Entity, &MotionContext), With<Player>>,
    mut freezes: MessageWriter<FreezeMotionEvent>,
    mut locks: MessageWriter<InteractionLockEvent>,
) {
    // F1: Toggle info overlay
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.show_info = !debug_state.show_info;
    }

    // F2: Toggle probe gizmos
    if keyboard.just_pressed(KeyCode::F2) {
        debug_state.show_probes = !debug_state.show_probes;
    }

    // F3: Freeze / unfreeze
    if keyboard.just_pressed(KeyCode::F3) {
        for (entity, ctx) in &player_query {
            let frozen = !ctx.frozen;
            freezes.write(FreezeMotionEvent { entity, frozen });
            debug_state.set_message(if frozen { "Frozen" } else { "Unfrozen" }, 2.0);
        }
    }

    // F4: Interaction lock
    if keyboard.just_pressed(KeyCode::F4) {
        for (entity, ctx) in &player_query {
            let locked = !ctx.interaction_locked;
            locks.write(InteractionLockEvent { entity, locked });
            debug_state.set_message(
                if locked {
                    "Interaction lock ON"
                } else {
                    "Interaction lock OFF"
                },
                2.0,
            );
        }
    }

    // F5: Reload tuning
    if keyboard.just_pressed(KeyCode::F5) {
        let Some(settings) = settings else {
            warn!("[DEBUG] No content directory configured");
            return;
        };
        match load_tuning(&settings.data_dir) {
            Ok(reloaded) => {
                for error in validate_tuning(&reloaded) {
                    warn!("[DEBUG] {}", error);
                }
                *tuning = reloaded;
                info!("[DEBUG] Motion tuning reloaded");
                debug_state.set_message("Tuning reloaded", 2.0);
            }
            Err(e) => {
                warn!("[DEBUG] {}", e);
                debug_state.set_message("Tuning reload failed", 3.0);
            }
        }
    }
}

/// Update status message timer
pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

fn format_context(ctx: &MotionContext) -> String {
    let timers = &ctx.timers;
    let active: Vec<String> = [
        ("regrab", &timers.regrab),
        ("kick", &timers.wall_kick),
        ("wj_lockout", &timers.wall_jump_lockout),
        ("wj_facing", &timers.wall_jump_facing_lock),
        ("mantle_cd", &timers.mantle_cooldown),
        ("mantle_lock", &timers.mantle_lockout),
        ("climb_supp", &timers.climb_suppression),
        ("slide", &timers.slide),
        ("roll", &timers.roll),
        ("roll_cd", &timers.roll_cooldown),
    ]
    .into_iter()
    .filter(|(_, cooldown)| cooldown.is_active())
    .map(|(name, cooldown)| format!("{}={:.2}", name, cooldown.remaining()))
    .collect();

    format!(
        "Mode: {:?}\nPos: ({:.2}, {:.2})\nVel: ({:.2}, {:.2})\nFacing: {:?}\n\
         Grounded: {}  Crawling: {}  DoubleJumpUsed: {}\n\
         Frozen: {}  Locked: {}\nTimers: {}",
        ctx.mode_kind(),
        ctx.position.x,
        ctx.position.y,
        ctx.velocity.x,
        ctx.velocity.y,
        ctx.facing,
        ctx.grounded,
        ctx.crawling,
        ctx.double_jump_used,
        ctx.frozen,
        ctx.interaction_locked,
        if active.is_empty() {
            "-".to_string()
        } else {
            active.join(" ")
        },
    )
}

/// Update the info overlay text, spawning or removing it as needed
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    player_query: Query<&MotionContext, With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    let Ok(mut text) = overlay_query.single_mut() else {
        return;
    };
    let mut body = player_query
        .iter()
        .next()
        .map(format_context)
        .unwrap_or_else(|| "No player".to_string());
    if let Some((message, _)) = &debug_state.status_message {
        body.push_str("\n> ");
        body.push_str(message);
    }
    **text = body;
}

fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

/// Draw the boxes and rays the motion step probes with.
pub(crate) fn draw_probe_gizmos(
    mut gizmos: Gizmos,
    tuning: Res<MotionTuning>,
    player_query: Query<&MotionContext, With<Player>>,
) {
    let idle = Color::srgba(0.7, 0.7, 0.7, 0.6);

    for ctx in &player_query {
        let sign = ctx.facing.sign();

        let (ground_center, ground_size) = ground_check_box(ctx, &tuning);
        let ground_color = if ctx.grounded {
            Color::srgb(1.0, 0.9, 0.2)
        } else {
            idle
        };
        gizmos.rect_2d(
            Isometry2d::from_translation(ground_center),
            ground_size,
            ground_color,
        );

        gizmos.rect_2d(
            Isometry2d::from_translation(ctx.position + tuning.body.head_clearance_offset),
            tuning.body.head_clearance_size,
            Color::srgb(1.0, 0.4, 0.4),
        );

        let climb = &tuning.climb;
        let climb_start =
            ctx.position + Vec2::new(climb.check_offset.x * sign, climb.check_offset.y);
        let climb_end = climb_start + Vec2::new(climb.check_distance * sign, 0.0);
        let climb_color = match ctx.mode() {
            MotionMode::Climbing(_) => Color::srgb(0.3, 1.0, 0.4),
            _ => idle,
        };
        gizmos.rect_2d(
            Isometry2d::from_translation(climb_end),
            climb.check_size,
            climb_color,
        );
        gizmos.line_2d(climb_start, climb_end, climb_color);

        if let Some(anchor) = tuning.mantle.ledge_check_anchor {
            let mantle = &tuning.mantle;
            let start = ctx.position + Vec2::new(anchor.x * sign, anchor.y);
            let end = start - Vec2::new(0.0, mantle.check_distance);
            gizmos.rect_2d(
                Isometry2d::from_translation(start),
                mantle.check_size,
                Color::srgb(0.3, 0.5, 1.0),
            );
            gizmos.line_2d(start, end, Color::srgb(0.3, 0.5, 1.0));
        }

        gizmos.line_2d(
            ctx.position,
            ctx.position + Vec2::new(tuning.wall_jump.check_distance * sign, 0.0),
            Color::srgb(1.0, 0.6, 0.2),
        );
    }
}
