//! Arena bounds
//!
//! An immutable axis-aligned box. The playable floor is its XZ extent; Y
//! only has to contain the heights entities live at.

use glam::Vec3;

/// Rejected arena geometry
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoundsError {
    #[error("degenerate arena: min.{axis} ({min}) must be below max.{axis} ({max})")]
    Degenerate { axis: char, min: f32, max: f32 },
    #[error("arena bounds must be finite")]
    NotFinite,
}

/// The playable arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsVolume {
    min: Vec3,
    max: Vec3,
}

impl BoundsVolume {
    /// Build bounds, failing fast on an empty floor (`min.x >= max.x` or
    /// `min.z >= max.z`) or an inverted height range.
    pub fn new(min: Vec3, max: Vec3) -> Result<Self, BoundsError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(BoundsError::NotFinite);
        }
        if min.x >= max.x {
            return Err(BoundsError::Degenerate { axis: 'x', min: min.x, max: max.x });
        }
        if min.z >= max.z {
            return Err(BoundsError::Degenerate { axis: 'z', min: min.z, max: max.z });
        }
        if min.y > max.y {
            return Err(BoundsError::Degenerate { axis: 'y', min: min.y, max: max.y });
        }
        Ok(Self { min, max })
    }

    /// Arena centered on the origin, from the ground up to `height`
    pub fn centered(half_width: f32, height: f32, half_length: f32) -> Result<Self, BoundsError> {
        Self::new(
            Vec3::new(-half_width, 0.0, -half_length),
            Vec3::new(half_width, height, half_length),
        )
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Floor extent along X
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Floor extent along Z
    pub fn length(&self) -> f32 {
        self.max.z - self.min.z
    }

    /// Center of the floor (y = 0)
    pub fn center(&self) -> Vec3 {
        let mid = (self.min + self.max) * 0.5;
        Vec3::new(mid.x, 0.0, mid.z)
    }

    /// Clamp every axis independently into the box
    #[inline]
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}
