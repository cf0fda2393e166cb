//! Gem Trail headless driver
//!
//! Runs the simulation without a renderer: a scripted pointer sweeps around
//! the screen, a follow camera tracks the player, and sound cues go to the
//! log. Usage: `gem-trail [tuning.json] [frames]`.

use std::process::ExitCode;

use glam::Vec2;

use gem_trail::sim::{CameraPose, GamePhase, SimulationState, TickInput, tick};
use gem_trail::{LoggingAudio, Tuning, play_cues};

/// Frame time fed to the cosmetic clocks (60 Hz display)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames run when no count is given
const DEFAULT_FRAMES: u64 = 3600;
/// Seconds on the game-over screen before the driver restarts
const RESTART_DELAY: f32 = 2.0;
const ASPECT: f32 = 16.0 / 9.0;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Gem Trail (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(t) => t,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut state = match SimulationState::new(&tuning) {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut audio = LoggingAudio::new();
    let mut runs = 1u32;
    let mut best = 0u32;

    for frame in 0..frames {
        let restart =
            state.phase() == GamePhase::GameOver && state.game_over_time() >= RESTART_DELAY;
        if restart {
            runs += 1;
        }

        let input = TickInput {
            pointer: state
                .accepts_pointer_input()
                .then(|| scripted_pointer(frame as f32 * FRAME_DT)),
            camera: Some(CameraPose::follow(
                state.player_position(),
                tuning.camera_offset,
                tuning.camera_fov(),
                ASPECT,
            )),
            speed: tuning.speed_for_tail(state.tail_segment_count()),
            restart,
        };

        let events = tick(&mut state, &input, FRAME_DT);
        play_cues(&events, &mut audio);
        best = best.max(state.collected_gems());

        if frame % 600 == 0 {
            let p = state.player_position();
            log::debug!(
                "frame {frame}: player ({:.2}, {:.2}) gems {} tail {}",
                p.x,
                p.z,
                state.active_gem_count(),
                state.tail_segments().len()
            );
        }
    }

    println!(
        "{frames} frames, {runs} run(s), best {best} gems, {} cues played",
        audio.played()
    );
    ExitCode::SUCCESS
}

/// Slowly wandering pointer in NDC
fn scripted_pointer(t: f32) -> Vec2 {
    let wobble = 0.35 + 0.25 * (t * 0.23).sin();
    Vec2::new((t * 0.7).cos() * wobble, (t * 0.7).sin() * wobble)
}
