//! Arena edge proximity
//!
//! Touching (or nearly touching) any of the four arena walls ends the run.

use glam::Vec3;

use super::bounds::BoundsVolume;
use crate::consts::BOUNDARY_COLLISION_THRESHOLD;

/// Stateless edge check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryMonitor {
    pub threshold: f32,
}

impl Default for BoundaryMonitor {
    fn default() -> Self {
        Self::new(BOUNDARY_COLLISION_THRESHOLD)
    }
}

impl BoundaryMonitor {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Smallest distance from `position` to the four floor edges, each axis
    /// measured on its own
    pub fn min_edge_distance(&self, position: Vec3, bounds: &BoundsVolume) -> f32 {
        let (min, max) = (bounds.min(), bounds.max());
        (position.x - min.x)
            .abs()
            .min((position.x - max.x).abs())
            .min((position.z - min.z).abs())
            .min((position.z - max.z).abs())
    }

    /// True when the nearest edge is strictly closer than the threshold
    pub fn is_colliding(&self, position: Vec3, bounds: &BoundsVolume) -> bool {
        self.min_edge_distance(position, bounds) < self.threshold
    }
}
