//! Gem population
//!
//! Gems sit idle until the player comes within the attraction distance, then
//! fly toward the player along a short arc and are removed once the
//! animation completes. The field tops itself back up to the target count
//! every few ticks.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use super::bounds::BoundsVolume;
use crate::consts::*;

/// Gem colours (0xRRGGBB)
pub const GEM_PALETTE: [u32; 9] = [
    0xff5555, 0x55ff55, 0x5555ff, 0xffff55, 0xff55ff, 0x55ffff, 0xff9955, 0xaa55ff, 0x55ffaa,
];

/// Candidate positions tried before a spawn gives up on the clearance rule
const SPAWN_ATTEMPTS: u32 = 8;

/// Cosmetic attributes rolled once at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GemLook {
    /// 0xRRGGBB from [`GEM_PALETTE`]
    pub color: u32,
    /// Idle pulse frequency multiplier (1.0 - 1.5)
    pub pulse_speed: f32,
    /// Idle pulse phase offset (radians)
    pub pulse_phase: f32,
}

/// Lifecycle of a gem
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GemState {
    /// Waiting to be picked up
    Idle,
    /// Flying to the player; `progress` runs 0 -> 1
    BeingCollected { progress: f32 },
}

/// A collectible gem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gem {
    pub id: u32,
    /// Current (visual) position; follows the collection arc when collecting
    pub position: Vec3,
    pub state: GemState,
    pub look: GemLook,
    /// Resting position, the start of the collection arc
    origin: Vec3,
    /// Animation steps taken since collection began
    steps: u32,
}

impl Gem {
    pub fn is_idle(&self) -> bool {
        matches!(self.state, GemState::Idle)
    }

    /// Collection progress (0 while idle)
    pub fn progress(&self) -> f32 {
        match self.state {
            GemState::Idle => 0.0,
            GemState::BeingCollected { progress } => progress,
        }
    }

    /// Where the gem rested before collection started
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Render scale: a gentle pulse while idle, shrinking while collected
    pub fn display_scale(&self, clock: f32) -> f32 {
        match self.state {
            GemState::Idle => {
                1.0 + (clock * self.look.pulse_speed + self.look.pulse_phase).sin() * 0.05
            }
            GemState::BeingCollected { progress } => (1.0 - progress * 0.9).max(0.1),
        }
    }

    /// Vertical bob added on top of `position` while idle
    pub fn hover_offset(&self, clock: f32) -> f32 {
        match self.state {
            GemState::Idle => (clock * 2.0).sin() * 0.1,
            GemState::BeingCollected { .. } => 0.0,
        }
    }
}

/// Gem lifecycle parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GemRules {
    /// Population the field replenishes toward
    pub target_count: usize,
    /// Planar distance under which an idle gem starts collecting
    pub attraction_distance: f32,
    /// Progress added per tick while collecting
    pub animation_speed: f32,
    /// Ticks between replenishment passes
    pub replenish_interval: u32,
    /// Resting height of idle gems
    pub gem_height: f32,
    /// Minimum planar distance from the player for new gems
    pub spawn_clearance: f32,
}

impl Default for GemRules {
    fn default() -> Self {
        Self {
            target_count: TARGET_GEM_COUNT,
            attraction_distance: ATTRACTION_DISTANCE,
            animation_speed: ANIMATION_SPEED,
            replenish_interval: REPLENISH_INTERVAL,
            gem_height: GEM_HEIGHT,
            spawn_clearance: GEM_SPAWN_CLEARANCE,
        }
    }
}

impl GemRules {
    /// Ticks a gem spends collecting: ⌈1 / animation_speed⌉
    pub fn steps_to_collect(&self) -> u32 {
        if !(self.animation_speed > 0.0) {
            return 1;
        }
        // f32 division rounds 1/0.04 to exactly 25; widening to f64 first
        // would expose the representation error and give 26
        (1.0 / self.animation_speed).ceil().max(1.0) as u32
    }
}

/// What one gem tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GemTickReport {
    /// Gems that switched from idle to collecting
    pub started: usize,
    /// Ids of gems whose collection finished this tick (removed)
    pub collected: Vec<u32>,
    /// Gems spawned by replenishment
    pub spawned: usize,
}

/// Owner of every live gem
#[derive(Debug, Clone)]
pub struct GemField {
    gems: Vec<Gem>,
    rules: GemRules,
    steps_to_collect: u32,
    bounds: BoundsVolume,
    ticks: u64,
    next_id: u32,
    rng: Pcg32,
}

impl GemField {
    /// Empty field; call [`GemField::replenish`] to populate it
    pub fn new(rules: GemRules, bounds: BoundsVolume, rng: Pcg32) -> Self {
        Self {
            gems: Vec::with_capacity(rules.target_count),
            steps_to_collect: rules.steps_to_collect(),
            rules,
            bounds,
            ticks: 0,
            next_id: 1,
            rng,
        }
    }

    pub fn rules(&self) -> &GemRules {
        &self.rules
    }

    /// Live gems in spawn order
    pub fn gems(&self) -> &[Gem] {
        &self.gems
    }

    /// Idle plus collecting gems
    pub fn active_count(&self) -> usize {
        self.gems.len()
    }

    /// Spawn one gem at a random spot on the arena floor
    pub fn spawn(&mut self, player: Vec3) -> u32 {
        let position = self.random_position(player);
        self.spawn_at(position)
    }

    /// Spawn one gem at an explicit position (clamped into the arena)
    pub fn spawn_at(&mut self, position: Vec3) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        let look = GemLook {
            color: GEM_PALETTE[self.rng.random_range(0..GEM_PALETTE.len())],
            pulse_speed: self.rng.random_range(1.0..1.5),
            pulse_phase: self.rng.random_range(0.0..TAU),
        };
        let position = self.bounds.clamp(position);
        self.gems.push(Gem {
            id,
            position,
            state: GemState::Idle,
            look,
            origin: position,
            steps: 0,
        });
        id
    }

    /// Spawn the shortfall to the target count; returns how many spawned
    pub fn replenish(&mut self, player: Vec3) -> usize {
        let shortfall = self.rules.target_count.saturating_sub(self.gems.len());
        for _ in 0..shortfall {
            self.spawn(player);
        }
        if shortfall > 0 {
            log::debug!("replenished {} gems ({} active)", shortfall, self.gems.len());
        }
        shortfall
    }

    /// Drop every gem (including ones mid-collection) and refill
    pub fn clear_and_refill(&mut self, player: Vec3) {
        self.gems.clear();
        self.ticks = 0;
        self.replenish(player);
    }

    /// Advance the field by one tick around the player's current position
    pub fn tick(&mut self, player: Vec3) -> GemTickReport {
        let mut report = GemTickReport::default();
        let reach_sq = self.rules.attraction_distance * self.rules.attraction_distance;

        for gem in self.gems.iter_mut().filter(|g| g.is_idle()) {
            let dx = gem.position.x - player.x;
            let dz = gem.position.z - player.z;
            if dx * dx + dz * dz < reach_sq {
                gem.state = GemState::BeingCollected { progress: 0.0 };
                gem.origin = gem.position;
                gem.steps = 0;
                report.started += 1;
            }
        }

        // Mark finished gems, then compact
        for gem in &mut self.gems {
            if gem.is_idle() {
                continue;
            }
            gem.steps += 1;
            let progress = if gem.steps >= self.steps_to_collect {
                report.collected.push(gem.id);
                1.0
            } else {
                (gem.steps as f32 * self.rules.animation_speed).min(1.0)
            };
            gem.state = GemState::BeingCollected { progress };
            gem.position = gem.origin.lerp(player, progress)
                + Vec3::Y * (COLLECT_ARC_HEIGHT * (progress * PI).sin());
        }
        if !report.collected.is_empty() {
            let steps_to_collect = self.steps_to_collect;
            self.gems.retain(|g| g.is_idle() || g.steps < steps_to_collect);
            log::debug!("collected gems {:?}", report.collected);
        }

        self.ticks += 1;
        let interval = u64::from(self.rules.replenish_interval.max(1));
        if self.ticks.is_multiple_of(interval) {
            report.spawned = self.replenish(player);
        }

        report
    }

    fn random_position(&mut self, player: Vec3) -> Vec3 {
        let (min, max) = (self.bounds.min(), self.bounds.max());
        let y = self.rules.gem_height.clamp(min.y, max.y);
        let clearance_sq = self.rules.spawn_clearance * self.rules.spawn_clearance;

        let mut candidate = Vec3::new(player.x, y, player.z);
        for _ in 0..SPAWN_ATTEMPTS {
            candidate = Vec3::new(
                self.rng.random_range(min.x..max.x),
                y,
                self.rng.random_range(min.z..max.z),
            );
            let dx = candidate.x - player.x;
            let dz = candidate.z - player.z;
            if dx * dx + dz * dz >= clearance_sq {
                break;
            }
        }
        candidate
    }
}
