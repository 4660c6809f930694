//! Grid Snake - a classic Snake game with a fixed-timestep simulation core
//!
//! This library provides:
//! - Core game logic (game module), free of any I/O or rendering dependencies
//! - Keyboard input mapping (input module)
//! - TUI rendering (render module)
//! - Session metrics such as high score and round time (metrics module)
//! - The interactive play mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
