//! Simulation module
//!
//! All gameplay logic lives here. One call to [`tick`] per rendered frame:
//! - No timers, threads or rendering dependencies
//! - Single writer (the tick driver), no interior mutability
//! - Stable iteration order (gems by spawn id)

pub mod boundary;
pub mod bounds;
pub mod gems;
pub mod movement;
pub mod state;
pub mod tail;
pub mod tick;

pub use boundary::BoundaryMonitor;
pub use bounds::{BoundsError, BoundsVolume};
pub use gems::{GEM_PALETTE, Gem, GemField, GemLook, GemRules, GemState, GemTickReport};
pub use movement::{CameraPose, GROUND_PLANE_HEIGHT, MoveOutcome, MovementController, Ray};
pub use state::{GamePhase, GameStateMachine, PlayerState, SimulationState};
pub use tail::{TailSegment, TailTrail};
pub use tick::{SimEvent, TickInput, tick};
