//! Core simulation module for Snake
//!
//! Everything here is pure state-machine logic with no I/O or rendering
//! dependencies: the host loop feeds `GameEngine::on_frame` elapsed time
//! and input snapshots, and renders whatever `GameState` it owns.

pub mod clock;
pub mod config;
pub mod direction;
pub mod engine;
pub mod sprite;
pub mod state;

// Re-export commonly used types
pub use clock::TickClock;
pub use config::GameConfig;
pub use direction::{Direction, InputSnapshot};
pub use engine::{FrameEvents, GameEngine};
pub use sprite::SheetRegion;
pub use state::{BodySegment, GameState, Position, RoundPhase, Snake};
