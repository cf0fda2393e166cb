//! Data-driven game balance
//!
//! Every design constant the simulation reads, loadable from JSON. Missing
//! fields fall back to [`crate::consts`].

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::bounds::{BoundsError, BoundsVolume};
use crate::sim::boundary::BoundaryMonitor;
use crate::sim::gems::GemRules;
use crate::sim::movement::MovementController;

/// Why a tuning file could not be turned into a session
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid arena: {0}")]
    Bounds(#[from] BoundsError),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_half_width: f32,
    pub arena_half_length: f32,
    pub arena_height: f32,
    /// Distance to an edge that ends the run
    pub boundary_threshold: f32,

    // === Player ===
    pub player_height: f32,
    pub base_speed: f32,
    pub min_speed: f32,
    /// Fractional slowdown per tail segment
    pub speed_falloff: f32,
    pub turn_rate: f32,
    pub dead_zone: f32,

    // === Gems ===
    pub gems: GemRules,

    // === Tail ===
    pub max_history: usize,
    pub segment_spacing: usize,

    // === Camera ===
    /// Follow camera offset from the player's ground point
    pub camera_offset: Vec3,
    pub camera_fov_degrees: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_half_width: ARENA_HALF_WIDTH,
            arena_half_length: ARENA_HALF_LENGTH,
            arena_height: ARENA_HEIGHT,
            boundary_threshold: BOUNDARY_COLLISION_THRESHOLD,

            player_height: PLAYER_HEIGHT,
            base_speed: BASE_SPEED,
            min_speed: MIN_SPEED,
            speed_falloff: SPEED_FALLOFF,
            turn_rate: TURN_RATE,
            dead_zone: DEAD_ZONE,

            gems: GemRules::default(),

            max_history: MAX_HISTORY,
            segment_spacing: SEGMENT_SPACING,

            camera_offset: Vec3::new(0.0, CAMERA_HEIGHT, 0.0),
            camera_fov_degrees: CAMERA_FOV_DEGREES,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json_pretty(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Arena volume described by this tuning
    pub fn bounds(&self) -> Result<BoundsVolume, BoundsError> {
        BoundsVolume::centered(self.arena_half_width, self.arena_height, self.arena_half_length)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let bounds = self.bounds()?;

        check("base_speed", self.base_speed, self.base_speed >= 0.0)?;
        check("min_speed", self.min_speed, self.min_speed >= 0.0)?;
        check("speed_falloff", self.speed_falloff, self.speed_falloff >= 0.0)?;
        check("turn_rate", self.turn_rate, self.turn_rate > 0.0 && self.turn_rate <= 1.0)?;
        check("dead_zone", self.dead_zone, self.dead_zone >= 0.0)?;
        check(
            "player_height",
            self.player_height,
            self.player_height >= 0.0 && self.player_height <= self.arena_height,
        )?;
        check(
            "gems.attraction_distance",
            self.gems.attraction_distance,
            self.gems.attraction_distance > 0.0,
        )?;
        check(
            "gems.animation_speed",
            self.gems.animation_speed,
            self.gems.animation_speed > 0.0 && self.gems.animation_speed <= 1.0,
        )?;
        check("gems.spawn_clearance", self.gems.spawn_clearance, self.gems.spawn_clearance >= 0.0)?;
        check(
            "camera_fov_degrees",
            self.camera_fov_degrees,
            self.camera_fov_degrees > 0.0 && self.camera_fov_degrees < 180.0,
        )?;

        // The spawn point must not already be a breach
        let half_floor = (bounds.width().min(bounds.length())) * 0.5;
        check(
            "boundary_threshold",
            self.boundary_threshold,
            self.boundary_threshold >= 0.0 && self.boundary_threshold < half_floor,
        )?;

        if self.gems.replenish_interval == 0 {
            return Err(invalid("gems.replenish_interval", "must be at least 1"));
        }
        if self.gems.target_count > MAX_GEM_COUNT {
            return Err(invalid(
                "gems.target_count",
                format!("{} exceeds {MAX_GEM_COUNT}", self.gems.target_count),
            ));
        }
        if self.max_history == 0 || self.max_history > MAX_HISTORY_LIMIT {
            return Err(invalid(
                "max_history",
                format!("{} is not in 1..={MAX_HISTORY_LIMIT}", self.max_history),
            ));
        }
        if self.segment_spacing == 0 {
            return Err(invalid("segment_spacing", "must be at least 1"));
        }
        Ok(())
    }

    /// Player speed for a tail of `segments`; longer tails move slower
    pub fn speed_for_tail(&self, segments: usize) -> f32 {
        let slowed = self.base_speed / (1.0 + self.speed_falloff * segments as f32);
        slowed.max(self.min_speed)
    }

    pub fn movement(&self) -> MovementController {
        MovementController::new(self.turn_rate, self.dead_zone)
    }

    pub fn boundary_monitor(&self) -> BoundaryMonitor {
        BoundaryMonitor::new(self.boundary_threshold)
    }

    pub fn camera_fov(&self) -> f32 {
        self.camera_fov_degrees.to_radians()
    }
}

fn check(field: &'static str, value: f32, ok: bool) -> Result<(), TuningError> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is out of range")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.gems.target_count, TARGET_GEM_COUNT);
        assert_eq!(tuning.bounds().unwrap().width(), 80.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 0.1, "gems": { "target_count": 12 } }"#)
            .unwrap();
        assert_eq!(tuning.base_speed, 0.1);
        assert_eq!(tuning.gems.target_count, 12);
        assert_eq!(tuning.gems.attraction_distance, ATTRACTION_DISTANCE);
        assert_eq!(tuning.max_history, MAX_HISTORY);
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning {
            arena_half_width: 25.0,
            camera_offset: Vec3::new(0.0, 8.0, 4.0),
            ..Tuning::default()
        };
        let json = tuning.to_json_pretty().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_degenerate_arena_fails_fast() {
        let err = Tuning::from_json(r#"{ "arena_half_width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Bounds(BoundsError::Degenerate { axis: 'x', .. })));
    }

    #[test]
    fn test_invalid_values() {
        let err = Tuning::from_json(r#"{ "turn_rate": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "turn_rate", .. }));

        let err = Tuning::from_json(r#"{ "boundary_threshold": 45.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "boundary_threshold", .. }));

        let err = Tuning::from_json(r#"{ "segment_spacing": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "segment_spacing", .. }));
    }

    #[test]
    fn test_oversized_allocations_rejected() {
        let err = Tuning::from_json(r#"{ "gems": { "target_count": 18446744073709551615 } }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gems.target_count", .. }));

        let err = Tuning::from_json(r#"{ "max_history": 4000000000 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "max_history", .. }));

        let at_limit = format!(r#"{{ "max_history": {MAX_HISTORY_LIMIT} }}"#);
        assert!(Tuning::from_json(&at_limit).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }

    #[test]
    fn test_speed_for_tail() {
        let tuning = Tuning::default();
        assert_eq!(tuning.speed_for_tail(0), BASE_SPEED);
        assert!(tuning.speed_for_tail(10) < tuning.speed_for_tail(5));
        assert_eq!(tuning.speed_for_tail(10_000), MIN_SPEED);
    }
}
