//! Grid Snake - a timer-driven Snake game for the terminal
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session stats (metrics module)
//! - The interactive host loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
