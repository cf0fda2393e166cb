//! Tail trail
//!
//! A fixed-capacity ring buffer of past player positions (newest first).
//! Tail segments are read back from it at evenly spaced history indices so
//! the tail lags further behind the player the longer it gets.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_HISTORY, PLAYER_HEIGHT, SEGMENT_SPACING};

/// A cosmetic marker trailing the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TailSegment {
    /// 0 = closest to the player
    pub index: usize,
    pub position: Vec3,
    /// Cube edge length
    pub size: f32,
    /// Blue channel brightness (0-1), brighter toward the tip
    pub shade: f32,
}

impl TailSegment {
    fn new(index: usize, position: Vec3) -> Self {
        let i = index as f32;
        Self {
            index,
            position,
            size: 0.25 * (1.0 - i * 0.015).max(0.8),
            shade: (0.6 + i * 0.03).min(1.0),
        }
    }
}

/// Position history of the player
#[derive(Debug, Clone)]
pub struct TailTrail {
    /// Backing storage, allocated once at `capacity`
    samples: Vec<Vec3>,
    /// Slot holding the newest sample
    head: usize,
    len: usize,
    spacing: usize,
    height: f32,
}

impl Default for TailTrail {
    fn default() -> Self {
        Self::new(MAX_HISTORY, SEGMENT_SPACING, Vec3::new(0.0, PLAYER_HEIGHT, 0.0))
    }
}

impl TailTrail {
    /// New trail holding one sample at `anchor`. Samples are projected to
    /// the anchor's height. `capacity` and `spacing` are raised to 1.
    pub fn new(capacity: usize, spacing: usize, anchor: Vec3) -> Self {
        let capacity = capacity.max(1);
        let mut trail = Self {
            samples: vec![anchor; capacity],
            head: 0,
            len: 0,
            spacing: spacing.max(1),
            height: anchor.y,
        };
        trail.reset(anchor);
        trail
    }

    /// Forget all history; the trail restarts from `anchor`
    pub fn reset(&mut self, anchor: Vec3) {
        self.height = anchor.y;
        self.head = 0;
        self.len = 0;
        self.record(anchor);
    }

    /// Push the newest position, evicting the oldest once full. O(1).
    pub fn record(&mut self, position: Vec3) {
        let cap = self.samples.len();
        self.head = (self.head + cap - 1) % cap;
        self.samples[self.head] = Vec3::new(position.x, self.height, position.z);
        self.len = (self.len + 1).min(cap);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    pub fn spacing(&self) -> usize {
        self.spacing
    }

    /// History sample `age` ticks back (0 = newest)
    pub fn get(&self, age: usize) -> Option<Vec3> {
        (age < self.len).then(|| self.samples[(self.head + age) % self.samples.len()])
    }

    /// Newest recorded position
    pub fn newest(&self) -> Option<Vec3> {
        self.get(0)
    }

    /// Positions for `count` tail segments. Segment `i` reads history index
    /// `min((i + 1) * spacing, len - 1)`, so short histories repeat their
    /// oldest sample instead of reading past the end.
    pub fn segments_for(&self, count: usize) -> Vec<TailSegment> {
        if self.len == 0 {
            return Vec::new();
        }
        let last = self.len - 1;
        (0..count)
            .map(|i| {
                let age = ((i + 1).saturating_mul(self.spacing)).min(last);
                let slot = (self.head + age) % self.samples.len();
                TailSegment::new(i, self.samples[slot])
            })
            .collect()
    }
}
