//! Pointer-driven player locomotion
//!
//! The pointer is projected through the camera onto the ground plane; the
//! player turns a fraction of the way toward that point every tick and
//! slides toward it at the externally supplied speed, clamped to the arena.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::bounds::BoundsVolume;
use super::state::PlayerState;
use crate::consts::{DEAD_ZONE, TURN_RATE};
use crate::{shortest_angle_between, wrap_angle};

/// Height of the ground plane (normal +Y) pointer rays are cast onto
pub const GROUND_PLANE_HEIGHT: f32 = 0.0;

/// Half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Intersect with the horizontal plane `y = height`.
    ///
    /// `None` when the ray runs parallel to the plane or the plane lies
    /// behind the origin.
    pub fn intersect_ground(&self, height: f32) -> Option<Vec3> {
        let denom = self.direction.y;
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (height - self.origin.y) / denom;
        if !t.is_finite() || t < 0.0 {
            return None;
        }
        Some(self.origin + self.direction * t)
    }
}

/// Perspective camera pose (orthonormal basis + projection)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    /// Viewport width / height
    pub aspect: f32,
}

impl CameraPose {
    /// Camera at `eye` looking at `target`. Straight-down views use -Z as
    /// screen-up so the top of the screen is the far edge of the arena.
    pub fn look_at(eye: Vec3, target: Vec3, fov_y: f32, aspect: f32) -> Self {
        let forward = (target - eye).try_normalize().unwrap_or(Vec3::NEG_Z);
        let up_hint = if forward.dot(Vec3::Y).abs() > 0.999 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };
        let right = forward.cross(up_hint).normalize();
        let up = right.cross(forward);
        Self {
            position: eye,
            forward,
            right,
            up,
            fov_y,
            aspect,
        }
    }

    /// Camera trailing the player at a fixed offset, looking at the player's
    /// ground point.
    pub fn follow(player: Vec3, offset: Vec3, fov_y: f32, aspect: f32) -> Self {
        let ground = Vec3::new(player.x, GROUND_PLANE_HEIGHT, player.z);
        Self::look_at(ground + offset, ground, fov_y, aspect)
    }

    /// Ray from the eye through a normalized device coordinate
    /// (x right, y up, both in [-1, 1]).
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let ndc = ndc.clamp(Vec2::NEG_ONE, Vec2::ONE);
        let tan_half = (self.fov_y * 0.5).tan();
        let dir = self.forward
            + self.right * (ndc.x * tan_half * self.aspect)
            + self.up * (ndc.y * tan_half);
        Ray::new(self.position, dir)
    }
}

/// What a movement update did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No camera or pointer available
    NoInput,
    /// Pointer ray missed the ground plane
    NoTarget,
    /// Target within the dead zone; heading and position untouched
    DeadZone,
    /// Heading updated and translation applied (`displaced` is false when
    /// the clamp pinned the player in place)
    Steered { displaced: bool },
}

impl MoveOutcome {
    /// True when the player's position actually changed
    pub fn displaced(&self) -> bool {
        matches!(self, MoveOutcome::Steered { displaced: true })
    }
}

/// Turns pointer input into heading and position changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementController {
    /// Fraction of the heading error removed per tick
    pub turn_rate: f32,
    /// Planar distance at or under which the target is ignored
    pub dead_zone: f32,
}

impl Default for MovementController {
    fn default() -> Self {
        Self::new(TURN_RATE, DEAD_ZONE)
    }
}

impl MovementController {
    pub fn new(turn_rate: f32, dead_zone: f32) -> Self {
        Self {
            turn_rate,
            dead_zone,
        }
    }

    /// World point under the pointer, if the pointer ray hits the ground
    pub fn pointer_target(&self, camera: &CameraPose, pointer: Vec2) -> Option<Vec3> {
        camera.ray_through(pointer).intersect_ground(GROUND_PLANE_HEIGHT)
    }

    /// Full per-tick update from raw camera + pointer input
    pub fn update(
        &self,
        player: &mut PlayerState,
        camera: Option<&CameraPose>,
        pointer: Option<Vec2>,
        speed: f32,
        bounds: &BoundsVolume,
    ) -> MoveOutcome {
        let (Some(camera), Some(pointer)) = (camera, pointer) else {
            return MoveOutcome::NoInput;
        };
        match self.pointer_target(camera, pointer) {
            Some(target) => self.steer(player, target, speed, bounds),
            None => {
                log::trace!("pointer ray missed the ground plane");
                MoveOutcome::NoTarget
            }
        }
    }

    /// Turn toward `target` and move `speed` units along the planar
    /// direction to it, clamped into `bounds`.
    pub fn steer(
        &self,
        player: &mut PlayerState,
        target: Vec3,
        speed: f32,
        bounds: &BoundsVolume,
    ) -> MoveOutcome {
        let mut direction = target - player.position;
        direction.y = 0.0;

        let distance = direction.length();
        // Negated compare so NaN also lands in the dead zone
        if !(distance > self.dead_zone) {
            return MoveOutcome::DeadZone;
        }
        let direction = direction / distance;

        let target_angle = direction.x.atan2(direction.z);
        let diff = shortest_angle_between(player.heading, target_angle);
        player.heading = wrap_angle(player.heading + diff * self.turn_rate);

        let speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
        let previous = player.position;
        player.position = bounds.clamp(previous + direction * speed);

        MoveOutcome::Steered {
            displaced: player.position != previous,
        }
    }
}
