//! Movement domain: the shared per-character motion state.

use bevy::prelude::*;

use crate::movement::Facing;
use crate::surfaces::SurfaceId;

/// Countdown gate. Active while time remains.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    pub fn start(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Advance by `dt`. Returns true on the step the countdown runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        self.remaining <= 0.0
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionTimers {
    /// Blocks climb entry on any surface after a wall kick.
    pub regrab: Cooldown,
    /// Blocks a second jump off a climbed wall.
    pub wall_kick: Cooldown,
    /// Wall-jump velocity lockout; the WallJumping mode lasts this long.
    pub wall_jump_lockout: Cooldown,
    pub wall_jump_facing_lock: Cooldown,
    /// Per-ledge mantle cooldown; `last_mantled` is forgotten when it ends.
    pub mantle_cooldown: Cooldown,
    /// Mantle eligibility lockout after a wall jump or wall kick.
    pub mantle_lockout: Cooldown,
    pub mantle_facing_lock: Cooldown,
    pub mantle_fall_suppression: Cooldown,
    pub climb_suppression: Cooldown,
    pub slide: Cooldown,
    pub roll: Cooldown,
    pub roll_cooldown: Cooldown,
}

/// Timers that ran out during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiredTimers {
    pub wall_jump_lockout: bool,
    pub mantle_cooldown: bool,
    pub roll: bool,
}

impl MotionTimers {
    pub fn tick(&mut self, dt: f32) -> ExpiredTimers {
        self.regrab.tick(dt);
        self.wall_kick.tick(dt);
        self.wall_jump_facing_lock.tick(dt);
        self.mantle_lockout.tick(dt);
        self.mantle_facing_lock.tick(dt);
        self.mantle_fall_suppression.tick(dt);
        self.climb_suppression.tick(dt);
        self.slide.tick(dt);
        self.roll_cooldown.tick(dt);

        ExpiredTimers {
            wall_jump_lockout: self.wall_jump_lockout.tick(dt),
            mantle_cooldown: self.mantle_cooldown.tick(dt),
            roll: self.roll.tick(dt),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
    Grounded,
    Airborne,
    Climbing,
    Mantling,
    WallJumping,
    Sliding,
}

impl ModeKind {
    /// Explicit transition table. Staying in the same mode is always allowed.
    pub fn can_transition_to(self, next: ModeKind) -> bool {
        use ModeKind::*;

        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Grounded, Airborne | Climbing | Mantling | Sliding)
                | (Airborne, Grounded | Climbing | Mantling | WallJumping)
                | (Climbing, Grounded | Airborne | Mantling)
                | (Mantling, Grounded | Airborne)
                | (WallJumping, Grounded | Airborne | Climbing | Mantling)
                | (Sliding, Grounded | Airborne)
        )
    }
}

/// Climb state recorded at entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbHold {
    pub surface: SurfaceId,
    /// Highest allowed body position.
    pub top: f32,
    /// Lowest allowed body position.
    pub bottom: f32,
    pub entered_at: f32,
    /// The climb animation has advanced at least once, so idling may pause it.
    pub animation_progressed: bool,
    pub animation_paused: bool,
}

/// Progress of a ledge mantle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MantleMotion {
    pub ledge: SurfaceId,
    pub start: Vec2,
    pub target: Vec2,
    pub elapsed: f32,
}

impl MantleMotion {
    pub fn progress(&self, duration: f32) -> f32 {
        if duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / duration).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionMode {
    Grounded,
    Airborne,
    Climbing(ClimbHold),
    Mantling(MantleMotion),
    WallJumping,
    Sliding,
}

impl MotionMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            MotionMode::Grounded => ModeKind::Grounded,
            MotionMode::Airborne => ModeKind::Airborne,
            MotionMode::Climbing(_) => ModeKind::Climbing,
            MotionMode::Mantling(_) => ModeKind::Mantling,
            MotionMode::WallJumping => ModeKind::WallJumping,
            MotionMode::Sliding => ModeKind::Sliding,
        }
    }
}

/// All motion state for one character. Subsystems are plain functions over
/// this struct, run in a fixed order once per physics step.
#[derive(Component, Debug, Clone)]
pub struct MotionContext {
    /// Centre of the standing collider.
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub grounded: bool,
    mode: MotionMode,
    pub timers: MotionTimers,
    pub double_jump_used: bool,
    /// Last surface the character interacted with. Identity only.
    pub last_surface: Option<SurfaceId>,
    pub last_mantled: Option<SurfaceId>,

    pub clock: f32,
    pub step_index: u64,
    pub last_grounded_at: Option<f32>,
    pub last_crawl_grounded_at: Option<f32>,

    pub crawl_latched: bool,
    /// Low collider active.
    pub crawling: bool,
    pub run_held: bool,
    pub run_released_at: Option<f32>,
    pub gravity_enabled: bool,

    pub frozen: bool,
    pub interaction_locked: bool,
    pub suppress_fall_animation: bool,
    /// Set when a mantle completes; cleared on the next landing.
    pub post_mantle: bool,
    pub suppress_next_animation: bool,
}

impl MotionContext {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            grounded: false,
            mode: MotionMode::Airborne,
            timers: MotionTimers::default(),
            double_jump_used: false,
            last_surface: None,
            last_mantled: None,
            clock: 0.0,
            step_index: 0,
            last_grounded_at: None,
            last_crawl_grounded_at: None,
            crawl_latched: false,
            crawling: false,
            run_held: false,
            run_released_at: None,
            gravity_enabled: true,
            frozen: false,
            interaction_locked: false,
            suppress_fall_animation: false,
            post_mantle: false,
            suppress_next_animation: false,
        }
    }

    pub fn mode(&self) -> &MotionMode {
        &self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    /// Switch modes through the transition table. Refused transitions leave
    /// the mode untouched.
    pub fn enter_mode(&mut self, next: MotionMode) -> bool {
        let from = self.mode.kind();
        let to = next.kind();
        if !from.can_transition_to(to) {
            warn!("Refused motion transition {:?} -> {:?}", from, to);
            return false;
        }
        if from != to {
            debug!("Motion mode {:?} -> {:?}", from, to);
        }
        self.mode = next;
        true
    }

    pub(crate) fn mode_mut(&mut self) -> &mut MotionMode {
        &mut self.mode
    }

    /// Leave any special mode for Grounded or Airborne.
    pub fn enter_base_mode(&mut self) {
        let base = if self.grounded {
            MotionMode::Grounded
        } else {
            MotionMode::Airborne
        };
        self.enter_mode(base);
    }

    /// Keep Grounded/Airborne in step with the grounded flag. Special modes
    /// are left alone.
    pub fn sync_base_mode(&mut self) {
        if matches!(self.mode, MotionMode::Grounded | MotionMode::Airborne) {
            self.enter_base_mode();
        }
    }

    /// Advance the step clock and every countdown.
    pub fn advance_clock(&mut self, dt: f32) -> ExpiredTimers {
        self.clock += dt;
        self.step_index += 1;
        self.timers.tick(dt)
    }

    pub fn was_grounded_within(&self, window: f32) -> bool {
        self.grounded
            || self
                .last_grounded_at
                .is_some_and(|at| self.clock - at < window)
    }

    pub fn is_climbing(&self) -> bool {
        matches!(self.mode, MotionMode::Climbing(_))
    }

    pub fn is_mantling(&self) -> bool {
        matches!(self.mode, MotionMode::Mantling(_))
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_wall_jumping(&self) -> bool {
        matches!(self.mode, MotionMode::WallJumping)
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self.mode, MotionMode::Sliding)
    }

    pub fn is_crawling(&self) -> bool {
        self.crawling
    }

    pub fn is_rolling(&self) -> bool {
        self.timers.roll.is_active()
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Zero velocity and halt every subsystem until unfrozen.
    pub fn freeze(&mut self, frozen: bool) {
        self.frozen = frozen;
        if frozen {
            self.velocity = Vec2::ZERO;
        }
    }

    /// Held by an external push/pull handler; blocks run, jump and crawl.
    pub fn set_interaction_lock(&mut self, locked: bool) {
        self.interaction_locked = locked;
    }

    /// Clear position, timers and mode back to spawn defaults.
    pub fn respawn(&mut self, position: Vec2) {
        *self = Self::new(position);
    }
}
