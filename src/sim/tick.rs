//! Per-frame simulation tick
//!
//! Strict order within a tick: movement, tail recording, boundary check,
//! then (still playing) the gem update.

use glam::Vec2;

use super::movement::{CameraPose, MoveOutcome};
use super::state::SimulationState;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer in normalized device coordinates (x right, y up, [-1, 1])
    pub pointer: Option<Vec2>,
    /// Camera the pointer is projected through
    pub camera: Option<CameraPose>,
    /// Player speed this tick (units per tick)
    pub speed: f32,
    /// Restart the session before simulating
    pub restart: bool,
}

/// Something collaborators may want to react to (sound, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A gem finished its collection animation
    GemCollected { id: u32, total: u32 },
    /// The player breached the arena edge
    GameOver { collected_gems: u32 },
    /// The session was reset
    Restarted,
}

/// Advance the session by one frame. `dt` (seconds) only drives cosmetic
/// clocks; the simulation itself moves one fixed step per call.
pub fn tick(state: &mut SimulationState, input: &TickInput, dt: f32) -> Vec<SimEvent> {
    let mut events = Vec::new();

    if input.restart {
        state.restart();
        events.push(SimEvent::Restarted);
    }

    if dt.is_finite() && dt > 0.0 {
        state.clock += dt;
    }

    if !state.machine.is_playing() {
        state.machine.advance_clock(dt);
        return events;
    }

    state.time_ticks += 1;

    let outcome = state.movement.update(
        &mut state.player,
        input.camera.as_ref(),
        input.pointer,
        input.speed,
        &state.bounds,
    );
    if outcome.displaced() {
        state.tail.record(state.player.position);
    } else if outcome == MoveOutcome::NoInput {
        log::trace!("tick {}: no pointer/camera", state.time_ticks);
    }

    if state.boundary.is_colliding(state.player.position, &state.bounds) {
        if state.machine.trigger_game_over() {
            log::info!(
                "Game over at {:?} after {} ticks, {} gems collected",
                state.player.position,
                state.time_ticks,
                state.collected_gems
            );
            events.push(SimEvent::GameOver {
                collected_gems: state.collected_gems,
            });
        }
        return events;
    }

    let report = state.gems.tick(state.player.position);
    for id in report.collected {
        state.collected_gems += 1;
        events.push(SimEvent::GemCollected {
            id,
            total: state.collected_gems,
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::gems::GemRules;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;
    use glam::Vec3;

    fn session() -> SimulationState {
        SimulationState::with_seed(&Tuning::default(), 12345).unwrap()
    }

    /// Input steering through a follow camera toward `ndc`
    fn chase(state: &SimulationState, ndc: Vec2, speed: f32) -> TickInput {
        let tuning = Tuning::default();
        TickInput {
            pointer: Some(ndc),
            camera: Some(CameraPose::follow(
                state.player_position(),
                tuning.camera_offset,
                tuning.camera_fov(),
                1.0,
            )),
            speed,
            restart: false,
        }
    }

    fn drive_into_wall(state: &mut SimulationState) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for _ in 0..200 {
            let input = chase(state, Vec2::new(1.0, 0.0), 1.0);
            events.extend(tick(state, &input, SIM_DT));
            if !state.is_playing() {
                break;
            }
        }
        events
    }

    const SIM_DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_idle_tick_changes_nothing() {
        let mut state = session();
        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(events.is_empty());
        assert_eq!(state.player_position(), Vec3::new(0.0, PLAYER_HEIGHT, 0.0));
        assert_eq!(state.tail().len(), 1);
        assert_eq!(state.time_ticks(), 1);
    }

    #[test]
    fn test_tail_records_only_on_displacement() {
        let mut state = session();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.tail().len(), 1);

        for _ in 0..10 {
            let input = chase(&state, Vec2::new(0.0, 1.0), BASE_SPEED);
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.tail().len(), 11);
        assert!(state.player_position().z < -0.7);
    }

    #[test]
    fn test_gem_collection_scores_once() {
        let mut state = session();
        state.gems.spawn_at(Vec3::new(0.5, GEM_HEIGHT, 0.0));

        let mut collected = Vec::new();
        for _ in 0..25 {
            for event in tick(&mut state, &TickInput::default(), SIM_DT) {
                if let SimEvent::GemCollected { id, total } = event {
                    collected.push((id, total));
                }
            }
        }
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].1, 1);
        assert_eq!(state.collected_gems(), 1);
        assert_eq!(state.tail_segments().len(), 1);

        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.collected_gems(), 1);
        assert_eq!(state.active_gem_count(), TARGET_GEM_COUNT);
    }

    #[test]
    fn test_boundary_breach_fires_once() {
        let mut state = session();
        let events = drive_into_wall(&mut state);

        assert_eq!(state.phase(), GamePhase::GameOver);
        let overs = events
            .iter()
            .filter(|e| matches!(e, SimEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
        let x = state.player_position().x;
        assert!(x > ARENA_HALF_WIDTH - BOUNDARY_COLLISION_THRESHOLD);
        assert!(x <= ARENA_HALF_WIDTH);

        // Frozen: further ticks neither move anything nor re-fire
        let gems_before: Vec<(u32, Vec3)> = state.gems().iter().map(|g| (g.id, g.position)).collect();
        for _ in 0..40 {
            let input = chase(&state, Vec2::new(-1.0, 0.0), 1.0);
            assert!(tick(&mut state, &input, SIM_DT).is_empty());
        }
        assert_eq!(state.player_position().x, x);
        let gems_after: Vec<(u32, Vec3)> = state.gems().iter().map(|g| (g.id, g.position)).collect();
        assert_eq!(gems_before, gems_after);
        assert!(!state.accepts_pointer_input());
        assert!((state.game_over_time() - 40.0 * SIM_DT).abs() < 1e-3);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = session();
        state.gems.spawn_at(Vec3::new(0.5, GEM_HEIGHT, 0.0));
        for _ in 0..25 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.collected_gems() >= 1);

        drive_into_wall(&mut state);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert!(!state.tail_segments().is_empty());

        let input = TickInput {
            restart: true,
            ..TickInput::default()
        };
        let events = tick(&mut state, &input, SIM_DT);
        assert_eq!(events, vec![SimEvent::Restarted]);

        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.collected_gems(), 0);
        assert!(state.tail_segments().is_empty());
        assert_eq!(state.tail().len(), 1);
        assert_eq!(state.player_position(), Vec3::new(0.0, PLAYER_HEIGHT, 0.0));
        assert_eq!(state.player().heading, 0.0);
        assert_eq!(state.game_over_time(), 0.0);
        assert_eq!(state.active_gem_count(), TARGET_GEM_COUNT);
        assert!(state.gems().iter().all(|g| g.is_idle()));
    }

    #[test]
    fn test_restart_while_playing() {
        let mut state = session();
        for _ in 0..30 {
            let input = chase(&state, Vec2::new(0.5, 0.5), BASE_SPEED);
            tick(&mut state, &input, SIM_DT);
        }
        state.restart();
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.player_position(), Vec3::new(0.0, PLAYER_HEIGHT, 0.0));
        assert_eq!(state.tail().len(), 1);
    }

    #[test]
    fn test_collecting_gem_frozen_on_game_over() {
        let tuning = Tuning {
            gems: GemRules {
                target_count: 0,
                ..GemRules::default()
            },
            ..Tuning::default()
        };
        let mut state = SimulationState::with_seed(&tuning, 3).unwrap();
        // Park the player one step from the east wall
        state.player.position = Vec3::new(38.5, PLAYER_HEIGHT, 0.0);
        state.gems.spawn_at(Vec3::new(37.5, GEM_HEIGHT, 0.0));
        tick(&mut state, &TickInput::default(), SIM_DT);
        let collecting = state.gems().iter().filter(|g| !g.is_idle()).count();
        assert_eq!(collecting, 1);

        let input = chase(&state, Vec2::new(1.0, 0.0), 0.5);
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase(), GamePhase::GameOver);

        for _ in 0..50 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.collected_gems(), 0);
        assert_eq!(state.gems().iter().filter(|g| !g.is_idle()).count(), 1);
    }

    #[test]
    fn test_clock_advances_every_frame() {
        let mut state = session();
        tick(&mut state, &TickInput::default(), 0.5);
        tick(&mut state, &TickInput::default(), f32::NAN);
        tick(&mut state, &TickInput::default(), 0.25);
        assert!((state.clock() - 0.75).abs() < 1e-6);
    }
}
