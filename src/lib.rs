//! Gem Trail - arena gem collecting with a growing tail
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, gems, tail, boundary, game state)
//! - `tuning`: Data-driven game balance
//! - `audio`: Fire-and-forget sound cue seam

pub mod audio;
pub mod sim;
pub mod tuning;

pub use audio::{AudioCues, LoggingAudio, SoundEffect, play_cues};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Arena half extents (the arena is 80 x 80 units centered on the origin)
    pub const ARENA_HALF_WIDTH: f32 = 40.0;
    pub const ARENA_HALF_LENGTH: f32 = 40.0;
    pub const ARENA_HEIGHT: f32 = 10.0;

    /// Fixed height of the player and tail samples above the ground plane
    pub const PLAYER_HEIGHT: f32 = 0.5;

    /// Player speed in units per tick with an empty tail
    pub const BASE_SPEED: f32 = 0.08;
    /// Speed floor no matter how long the tail gets
    pub const MIN_SPEED: f32 = 0.03;
    /// Fractional slowdown per tail segment
    pub const SPEED_FALLOFF: f32 = 0.02;

    /// Fraction of the remaining heading error closed each tick
    pub const TURN_RATE: f32 = 0.1;
    /// Pointer targets closer than this to the player are ignored
    pub const DEAD_ZONE: f32 = 0.1;

    /// Gem population and lifecycle
    pub const TARGET_GEM_COUNT: usize = 40;
    /// Largest gem population a tuning file may ask for
    pub const MAX_GEM_COUNT: usize = 10_000;
    pub const ATTRACTION_DISTANCE: f32 = 1.8;
    pub const ANIMATION_SPEED: f32 = 0.04;
    pub const REPLENISH_INTERVAL: u32 = 30;
    pub const GEM_HEIGHT: f32 = 0.5;
    pub const GEM_SPAWN_CLEARANCE: f32 = 3.0;
    /// Peak height of the collection arc
    pub const COLLECT_ARC_HEIGHT: f32 = 0.5;

    /// Distance to any arena edge that ends the run
    pub const BOUNDARY_COLLISION_THRESHOLD: f32 = 1.2;

    /// Tail history
    pub const MAX_HISTORY: usize = 300;
    /// Largest history a tuning file may ask for
    pub const MAX_HISTORY_LIMIT: usize = 100_000;
    pub const SEGMENT_SPACING: usize = 5;

    /// Follow camera defaults (straight down from above the player)
    pub const CAMERA_HEIGHT: f32 = 10.0;
    pub const CAMERA_FOV_DEGREES: f32 = 50.0;
}

/// Wrap an angle into (-π, π]
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Signed shortest rotation taking `from` onto `to`, in (-π, π]
#[inline]
pub fn shortest_angle_between(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_wrap_angle_range() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
        assert_eq!(wrap_angle(f32::NAN), 0.0);
    }

    #[test]
    fn test_wrap_angle_huge_input() {
        for angle in [1.0e9_f32, -1.0e9, 3.0e38, -3.0e38] {
            let w = wrap_angle(angle);
            assert!(w > -PI && w <= PI, "{angle} wrapped to {w}");
        }
    }

    #[test]
    fn test_shortest_angle_crosses_seam() {
        // 170° to -170° is a +20° turn, not -340°
        let d = shortest_angle_between(170f32.to_radians(), -170f32.to_radians());
        assert!((d - 20f32.to_radians()).abs() < 1e-4);

        let d = shortest_angle_between(-170f32.to_radians(), 170f32.to_radians());
        assert!((d + 20f32.to_radians()).abs() < 1e-4);
    }
}
