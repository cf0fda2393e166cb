//! Game state and core simulation types
//!
//! Everything one session mutates lives in [`SimulationState`]; the tick
//! function is its only writer.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boundary::BoundaryMonitor;
use super::bounds::BoundsVolume;
use super::gems::{Gem, GemField};
use super::movement::MovementController;
use super::tail::{TailSegment, TailTrail};
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Player breached the arena edge; frozen until restart
    GameOver,
}

/// Playing / GameOver gate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateMachine {
    phase: GamePhase,
    /// Seconds spent in GameOver (0 while playing)
    game_over_time: f32,
}

impl GameStateMachine {
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Playing -> GameOver. Returns false (and does nothing) when the game
    /// is already over.
    pub fn trigger_game_over(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_time = 0.0;
        true
    }

    /// Back to Playing from any phase
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.game_over_time = 0.0;
    }

    /// Accumulate time spent on the game-over screen
    pub fn advance_clock(&mut self, dt: f32) {
        if self.phase == GamePhase::GameOver && dt.is_finite() && dt > 0.0 {
            self.game_over_time += dt;
        }
    }

    pub fn game_over_time(&self) -> f32 {
        self.game_over_time
    }
}

/// The player avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// World position; y stays at the ground offset
    pub position: Vec3,
    /// Facing angle about +Y (radians, 0 = +Z)
    pub heading: f32,
}

impl PlayerState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            heading: 0.0,
        }
    }
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub(crate) bounds: BoundsVolume,
    pub(crate) movement: MovementController,
    pub(crate) boundary: BoundaryMonitor,
    /// Where the player (re)spawns
    spawn_point: Vec3,
    pub(crate) player: PlayerState,
    pub(crate) gems: GemField,
    pub(crate) tail: TailTrail,
    pub(crate) machine: GameStateMachine,
    pub(crate) collected_gems: u32,
    /// Simulation tick counter (playing ticks only)
    pub(crate) time_ticks: u64,
    /// Seconds of wall-clock time fed to the simulation, for cosmetics
    pub(crate) clock: f32,
}

impl SimulationState {
    /// New session with an entropy-seeded gem spawner
    pub fn new(tuning: &Tuning) -> Result<Self, TuningError> {
        Self::with_rng(tuning, Pcg32::from_rng(&mut rand::rng()))
    }

    /// New session with a fixed spawn seed
    pub fn with_seed(tuning: &Tuning, seed: u64) -> Result<Self, TuningError> {
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }

    pub fn with_rng(tuning: &Tuning, rng: Pcg32) -> Result<Self, TuningError> {
        tuning.validate()?;
        let bounds = tuning.bounds()?;

        let center = bounds.center();
        let spawn_point = Vec3::new(center.x, tuning.player_height, center.z);

        let mut state = Self {
            bounds,
            movement: tuning.movement(),
            boundary: tuning.boundary_monitor(),
            spawn_point,
            player: PlayerState::at(spawn_point),
            gems: GemField::new(tuning.gems, bounds, rng),
            tail: TailTrail::new(tuning.max_history, tuning.segment_spacing, spawn_point),
            machine: GameStateMachine::default(),
            collected_gems: 0,
            time_ticks: 0,
            clock: 0.0,
        };
        state.gems.replenish(spawn_point);

        log::info!(
            "Session ready: arena {}x{}, {} gems",
            bounds.width(),
            bounds.length(),
            state.gems.active_count()
        );
        Ok(state)
    }

    /// Reset player, tail, score and gems, and resume play. Valid from any
    /// phase.
    pub fn restart(&mut self) {
        self.player = PlayerState::at(self.spawn_point);
        self.tail.reset(self.spawn_point);
        self.collected_gems = 0;
        self.time_ticks = 0;
        self.machine.restart();
        self.gems.clear_and_refill(self.spawn_point);
        log::info!("Restarted");
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_position(&self) -> Vec3 {
        self.player.position
    }

    /// Live gems for rendering and the minimap
    pub fn gems(&self) -> &[Gem] {
        self.gems.gems()
    }

    pub fn gem_field(&self) -> &GemField {
        &self.gems
    }

    pub fn active_gem_count(&self) -> usize {
        self.gems.active_count()
    }

    pub fn collected_gems(&self) -> u32 {
        self.collected_gems
    }

    pub fn phase(&self) -> GamePhase {
        self.machine.phase()
    }

    pub fn is_playing(&self) -> bool {
        self.machine.is_playing()
    }

    /// Pointer input is only listened to while playing
    pub fn accepts_pointer_input(&self) -> bool {
        self.is_playing()
    }

    pub fn game_over_time(&self) -> f32 {
        self.machine.game_over_time()
    }

    pub fn bounds(&self) -> &BoundsVolume {
        &self.bounds
    }

    pub fn tail(&self) -> &TailTrail {
        &self.tail
    }

    /// One tail segment per collected gem
    pub fn tail_segment_count(&self) -> usize {
        self.collected_gems as usize
    }

    pub fn tail_segments(&self) -> Vec<TailSegment> {
        self.tail.segments_for(self.tail_segment_count())
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }
}
