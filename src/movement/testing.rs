//! Movement domain: headless box world and fixed-step harness for tests.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::movement::query::{PhysicsQuery, SurfaceHit, closest_point, contact_normal};
use crate::movement::{AnimationIntent, MotionContext, MotionInput, MotionTuning, step_motion};
use crate::surfaces::{
    SurfaceId, SurfaceInteraction, SurfaceInteractionProfile, SurfaceLookup, SurfaceSide,
};

pub(crate) const DT: f32 = 1.0 / 60.0;
const PENETRATION_EPS: f32 = 1e-5;

// ============================================================================
// Profiles
// ============================================================================

pub(crate) fn floor_profile() -> SurfaceInteractionProfile {
    SurfaceInteractionProfile::floor()
}

pub(crate) fn climbable_profile(mantleable_top: bool) -> SurfaceInteractionProfile {
    let mut top = SurfaceInteraction::new(SurfaceSide::Top).walkable();
    if mantleable_top {
        top = top.mantleable();
    }
    SurfaceInteractionProfile {
        interactions: vec![
            SurfaceInteraction::new(SurfaceSide::Left).climbable(),
            SurfaceInteraction::new(SurfaceSide::Right).climbable(),
            top,
        ],
    }
}

pub(crate) fn wall_jump_profile() -> SurfaceInteractionProfile {
    SurfaceInteractionProfile {
        interactions: vec![
            SurfaceInteraction::new(SurfaceSide::Left).wall_jumpable(),
            SurfaceInteraction::new(SurfaceSide::Right).wall_jumpable(),
            SurfaceInteraction::new(SurfaceSide::Top).walkable(),
        ],
    }
}

pub(crate) fn ledge_profile() -> SurfaceInteractionProfile {
    SurfaceInteractionProfile {
        interactions: vec![
            SurfaceInteraction::new(SurfaceSide::Top)
                .walkable()
                .mantleable(),
        ],
    }
}

// ============================================================================
// Box world
// ============================================================================

struct TestBox {
    id: SurfaceId,
    bounds: Rect,
    profile: SurfaceInteractionProfile,
}

/// Axis-aligned boxes standing in for the physics scene.
#[derive(Default)]
pub(crate) struct BoxWorld {
    boxes: Vec<TestBox>,
    next_id: u64,
}

impl BoxWorld {
    /// A 40 m wide floor whose top sits at y = 0.
    pub(crate) fn with_floor() -> Self {
        let mut world = Self::default();
        world.add(
            Vec2::new(0.0, -0.5),
            Vec2::new(40.0, 1.0),
            floor_profile(),
        );
        world
    }

    pub(crate) fn add(
        &mut self,
        center: Vec2,
        size: Vec2,
        profile: SurfaceInteractionProfile,
    ) -> SurfaceId {
        self.next_id += 1;
        let id = SurfaceId(self.next_id);
        self.boxes.push(TestBox {
            id,
            bounds: Rect::from_center_size(center, size),
            profile,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: SurfaceId) {
        self.boxes.retain(|b| b.id != id);
    }

    fn hit(b: &TestBox, point: Vec2, normal: Vec2, distance: f32) -> SurfaceHit {
        SurfaceHit {
            surface: b.id,
            point,
            normal,
            distance,
            bounds: b.bounds,
        }
    }
}

/// Entry time and normal of a box of `size` swept from `origin` along `dir`
/// into `bounds`. A box that starts inside reports nothing.
fn sweep(bounds: Rect, origin: Vec2, size: Vec2, dir: Vec2, max: f32) -> Option<(f32, Vec2)> {
    let half = size * 0.5;
    let lo = bounds.min - half;
    let hi = bounds.max + half;

    let inside = origin.x > lo.x && origin.x < hi.x && origin.y > lo.y && origin.y < hi.y;
    if inside {
        return None;
    }

    let mut t_enter = 0.0_f32;
    let mut t_exit = max;
    let mut normal = -dir;

    for axis in 0..2 {
        let (o, d) = (origin[axis], dir[axis]);
        if d.abs() < 1e-6 {
            if o < lo[axis] || o > hi[axis] {
                return None;
            }
            continue;
        }

        let (mut t0, mut t1) = ((lo[axis] - o) / d, (hi[axis] - o) / d);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            let mut n = Vec2::ZERO;
            n[axis] = -d.signum();
            normal = n;
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    Some((t_enter, normal))
}

impl PhysicsQuery for BoxWorld {
    fn shape_cast(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: Dir2,
        max_distance: f32,
        _mask: LayerMask,
    ) -> Option<SurfaceHit> {
        let dir = direction.as_vec2();
        self.boxes
            .iter()
            .filter_map(|b| {
                let (t, normal) = sweep(b.bounds, origin, size, dir, max_distance)?;
                let point = closest_point(b.bounds, origin + dir * t);
                Some(Self::hit(b, point, normal, t))
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn overlap(&self, origin: Vec2, size: Vec2, _mask: LayerMask) -> Vec<SurfaceHit> {
        let query = Rect::from_center_size(origin, size);
        self.boxes
            .iter()
            .filter(|b| {
                query.min.x <= b.bounds.max.x
                    && query.max.x >= b.bounds.min.x
                    && query.min.y <= b.bounds.max.y
                    && query.max.y >= b.bounds.min.y
            })
            .map(|b| {
                let point = closest_point(b.bounds, origin);
                Self::hit(b, point, contact_normal(b.bounds, origin), 0.0)
            })
            .collect()
    }
}

impl SurfaceLookup for BoxWorld {
    fn profile(&self, surface: SurfaceId) -> Option<&SurfaceInteractionProfile> {
        self.boxes
            .iter()
            .find(|b| b.id == surface)
            .map(|b| &b.profile)
    }
}

// ============================================================================
// Fixed-step harness
// ============================================================================

/// Steps the motion core, integrates velocity and pushes the body out of
/// boxes, roughly what the physics engine does between steps.
pub(crate) struct Sim {
    pub ctx: MotionContext,
    pub world: BoxWorld,
    pub tuning: MotionTuning,
    pub intents: Vec<AnimationIntent>,
}

impl Sim {
    pub(crate) fn new(world: BoxWorld, position: Vec2) -> Self {
        Self {
            ctx: MotionContext::new(position),
            world,
            tuning: MotionTuning::default(),
            intents: Vec::new(),
        }
    }

    /// Standing on the default floor at `x`, already settled.
    pub(crate) fn grounded_at(world: BoxWorld, x: f32) -> Self {
        let mut sim = Self::new(world, Vec2::new(x, 0.9));
        sim.step(MotionInput::default());
        sim.intents.clear();
        sim
    }

    pub(crate) fn step(&mut self, input: MotionInput) {
        let input = input.sanitized();
        step_motion(
            &mut self.ctx,
            &input,
            &self.tuning,
            &self.world,
            &mut self.intents,
            DT,
        );

        if self.ctx.frozen || self.ctx.is_mantling() {
            return;
        }
        self.ctx.position += self.ctx.velocity * DT;
        self.resolve();
    }

    pub(crate) fn run(&mut self, input: MotionInput, steps: usize) {
        for _ in 0..steps {
            self.step(input);
        }
    }

    /// Step until `done` holds; returns the number of steps taken.
    pub(crate) fn run_until(
        &mut self,
        input: MotionInput,
        max_steps: usize,
        done: impl Fn(&MotionContext) -> bool,
    ) -> Option<usize> {
        for step in 1..=max_steps {
            self.step(input);
            if done(&self.ctx) {
                return Some(step);
            }
        }
        None
    }

    pub(crate) fn take_intents(&mut self) -> Vec<AnimationIntent> {
        std::mem::take(&mut self.intents)
    }

    pub(crate) fn count(&self, intent: AnimationIntent) -> usize {
        self.intents.iter().filter(|i| **i == intent).count()
    }

    fn body_rect(&self) -> Rect {
        let body = &self.tuning.body;
        if self.ctx.crawling {
            Rect::from_center_size(
                self.ctx.position + body.crawl_offset(),
                body.crawling_size,
            )
        } else {
            Rect::from_center_size(self.ctx.position, body.standing_size)
        }
    }

    fn resolve(&mut self) {
        let bounds: Vec<Rect> = self.world.boxes.iter().map(|b| b.bounds).collect();

        for b in bounds {
            let body = self.body_rect();
            let overlap_x = body.max.x.min(b.max.x) - body.min.x.max(b.min.x);
            let overlap_y = body.max.y.min(b.max.y) - body.min.y.max(b.min.y);
            if overlap_x <= PENETRATION_EPS || overlap_y <= PENETRATION_EPS {
                continue;
            }

            if overlap_x < overlap_y {
                let push = if body.center().x < b.center().x {
                    -overlap_x
                } else {
                    overlap_x
                };
                self.ctx.position.x += push;
                if self.ctx.velocity.x * push < 0.0 {
                    self.ctx.velocity.x = 0.0;
                }
            } else {
                let push = if body.center().y < b.center().y {
                    -overlap_y
                } else {
                    overlap_y
                };
                self.ctx.position.y += push;
                if self.ctx.velocity.y * push < 0.0 {
                    self.ctx.velocity.y = 0.0;
                }
            }
        }
    }
}

// ============================================================================
// Input shorthands
// ============================================================================

pub(crate) fn idle() -> MotionInput {
    MotionInput::default()
}

pub(crate) fn axis(x: f32, y: f32) -> MotionInput {
    MotionInput {
        move_axis: Vec2::new(x, y),
        ..default()
    }
}

pub(crate) fn jump() -> MotionInput {
    MotionInput {
        jump_pressed: true,
        ..default()
    }
}
