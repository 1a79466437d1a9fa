//! Movement domain: tuning and input resources.

use bevy::math::curve::{Curve, EaseFunction, EasingCurve};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Every knob the motion core reads. Loaded from `motion_tuning.ron`; any
/// group or field missing from the file keeps its default.
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionTuning {
    pub body: BodyTuning,
    pub ground: GroundTuning,
    pub run: RunTuning,
    pub slide: SlideTuning,
    pub jump: JumpTuning,
    pub roll: RollTuning,
    pub climb: ClimbTuning,
    pub wall_jump: WallJumpTuning,
    pub mantle: MantleTuning,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BodyTuning {
    pub standing_size: Vec2,
    pub crawling_size: Vec2,
    /// Manual gravity; bodies run with `GravityScale(0.0)`.
    pub gravity: f32,
    pub head_clearance_size: Vec2,
    /// Offset from the body centre to the head clearance box.
    pub head_clearance_offset: Vec2,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            standing_size: Vec2::new(0.8, 1.8),
            crawling_size: Vec2::new(1.4, 0.7),
            gravity: 39.24,
            head_clearance_size: Vec2::new(0.75, 0.1),
            head_clearance_offset: Vec2::new(0.0, 0.85),
        }
    }
}

impl BodyTuning {
    pub fn half_height(&self) -> f32 {
        self.standing_size.y * 0.5
    }

    /// Centre of the crawl collider relative to the body centre. Both
    /// colliders share the same feet line.
    pub fn crawl_offset(&self) -> Vec2 {
        Vec2::new(0.0, -(self.standing_size.y - self.crawling_size.y) * 0.5)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GroundTuning {
    /// Upright check box; wider than the body so ledges still count.
    pub check_size: Vec2,
    /// Horizontal offset of the upright check box, mirrored by facing.
    pub check_offset_x: f32,
    pub crawl_check_size: Vec2,
    /// Minimum vertical component of the contact normal.
    pub min_normal_y: f32,
    /// Upward speed above which contacts are ignored.
    pub max_rising_speed: f32,
    pub snap_enabled: bool,
    pub snap_tolerance: f32,
    pub crawl_coyote_time: f32,
}

impl Default for GroundTuning {
    fn default() -> Self {
        Self {
            check_size: Vec2::new(1.25, 0.1),
            check_offset_x: 0.4,
            crawl_check_size: Vec2::new(0.75, 0.1),
            min_normal_y: 0.25,
            max_rising_speed: 0.1,
            snap_enabled: true,
            snap_tolerance: 0.05,
            crawl_coyote_time: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunTuning {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub acceleration: f32,
    pub crawl_speed: f32,
    pub crawl_acceleration: f32,
    pub air_acceleration: f32,
    pub max_air_speed: f32,
}

impl Default for RunTuning {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            run_speed: 6.0,
            acceleration: 15.0,
            crawl_speed: 1.5,
            crawl_acceleration: 5.0,
            air_acceleration: 5.0,
            max_air_speed: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SlideTuning {
    pub speed_threshold: f32,
    /// How long after releasing run a slide may still start.
    pub input_buffer: f32,
    pub duration: f32,
    pub deceleration: f32,
}

impl Default for SlideTuning {
    fn default() -> Self {
        Self {
            speed_threshold: 2.5,
            input_buffer: 0.2,
            duration: 0.75,
            deceleration: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JumpTuning {
    pub jump_speed: f32,
    pub double_jump_speed: f32,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            jump_speed: 12.0,
            double_jump_speed: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RollTuning {
    pub speed: f32,
    pub duration: f32,
    pub cooldown: f32,
}

impl Default for RollTuning {
    fn default() -> Self {
        Self {
            speed: 10.0,
            duration: 0.4,
            cooldown: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClimbTuning {
    pub climb_speed: f32,
    pub check_size: Vec2,
    pub check_offset: Vec2,
    pub check_distance: f32,
    /// Outward/upward velocity of a jump off a climbed wall.
    pub kick_impulse: Vec2,
    pub kick_cooldown: f32,
    pub regrab_cooldown: f32,
    /// Grounding inside this window after entry does not force an exit.
    pub entry_grace: f32,
    pub suppression: f32,
    pub entry_lift: f32,
    pub exit_nudge: f32,
    /// How far the character's top may sit above the wall top and still grab.
    pub top_tolerance: f32,
    /// Grounded characters must press up to grab.
    pub require_up_when_grounded: bool,
}

impl Default for ClimbTuning {
    fn default() -> Self {
        Self {
            climb_speed: 2.0,
            check_size: Vec2::new(0.5, 2.0),
            check_offset: Vec2::ZERO,
            check_distance: 0.5,
            kick_impulse: Vec2::new(8.0, 10.0),
            kick_cooldown: 0.1,
            regrab_cooldown: 0.5,
            entry_grace: 0.1,
            suppression: 1.0,
            entry_lift: 0.05,
            exit_nudge: 0.05,
            top_tolerance: 0.05,
            require_up_when_grounded: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WallJumpTuning {
    pub check_distance: f32,
    pub impulse: Vec2,
    /// Velocity-response lockout after a wall jump.
    pub lockout: f32,
    pub facing_lock: f32,
}

impl Default for WallJumpTuning {
    fn default() -> Self {
        Self {
            check_distance: 0.5,
            impulse: Vec2::new(8.0, 10.0),
            lockout: 0.2,
            facing_lock: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum LedgeDetection {
    /// Any point along a mantleable top edge.
    #[default]
    Edge,
    /// Only within `corner_radius` of a top corner.
    Corner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum MantleEasing {
    Linear,
    QuadraticIn,
    QuadraticOut,
    #[default]
    QuadraticInOut,
    CubicInOut,
}

impl MantleEasing {
    /// Eased progress for `t` in `[0, 1]`.
    pub fn sample(self, t: f32) -> f32 {
        let ease = match self {
            MantleEasing::Linear => EaseFunction::Linear,
            MantleEasing::QuadraticIn => EaseFunction::QuadraticIn,
            MantleEasing::QuadraticOut => EaseFunction::QuadraticOut,
            MantleEasing::QuadraticInOut => EaseFunction::QuadraticInOut,
            MantleEasing::CubicInOut => EaseFunction::CubicInOut,
        };
        EasingCurve::new(0.0, 1.0, ease).sample_clamped(t.clamp(0.0, 1.0))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MantleTuning {
    /// Ledge-check anchor relative to the body centre (x mirrored by
    /// facing). Without one, mantling is disabled.
    pub ledge_check_anchor: Option<Vec2>,
    pub check_size: Vec2,
    pub check_distance: f32,
    pub detection: LedgeDetection,
    pub corner_radius: f32,
    pub top_margin: f32,
    pub min_horizontal_offset: f32,
    /// Mantling is refused this soon after being grounded.
    pub airborne_guard: f32,
    pub cooldown: f32,
    pub lockout_after_wall_jump: f32,
    pub duration: f32,
    /// Horizontal distance past the corner onto the ledge top.
    pub forward_offset: f32,
    /// Gap left between the feet and the ledge top at the end.
    pub clearance: f32,
    pub horizontal_easing: MantleEasing,
    pub vertical_easing: MantleEasing,
    pub facing_lock: f32,
    pub fall_suppression: f32,
}

impl Default for MantleTuning {
    fn default() -> Self {
        Self {
            ledge_check_anchor: Some(Vec2::new(0.5, 0.5)),
            check_size: Vec2::new(0.6, 0.4),
            check_distance: 0.6,
            detection: LedgeDetection::Edge,
            corner_radius: 0.5,
            top_margin: 0.1,
            min_horizontal_offset: 0.3,
            airborne_guard: 0.2,
            cooldown: 0.3,
            lockout_after_wall_jump: 0.3,
            duration: 0.25,
            forward_offset: 0.5,
            clearance: 0.0,
            horizontal_easing: MantleEasing::QuadraticInOut,
            vertical_easing: MantleEasing::QuadraticInOut,
            facing_lock: 0.3,
            fall_suppression: 0.2,
        }
    }
}

/// Per-step input snapshot handed to the motion core.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionInput {
    pub move_axis: Vec2,
    pub jump_pressed: bool,
    pub run_held: bool,
    pub crawl_held: bool,
    pub crouch_held: bool,
    pub interact_pressed: bool,
    pub roll_pressed: bool,
}

impl MotionInput {
    /// Vertical input only counts while nothing else steers the character.
    pub fn sanitized(mut self) -> Self {
        if self.run_held || self.crawl_held || self.move_axis.x != 0.0 {
            self.move_axis.y = 0.0;
        }
        self
    }

    pub fn pressing_up(&self) -> bool {
        self.move_axis.y > 0.1
    }

    pub fn pressing_down(&self) -> bool {
        self.move_axis.y < -0.1
    }

    /// Drop the edge-triggered presses once a fixed step consumed them.
    pub fn clear_presses(&mut self) {
        self.jump_pressed = false;
        self.interact_pressed = false;
        self.roll_pressed = false;
    }
}
