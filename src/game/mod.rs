//! Core simulation for Snake
//!
//! Pure game logic: no terminal, timer or rendering dependencies. The host
//! owns the clock and calls [`GameEngine::tick`] at whatever interval it likes.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, TickInfo, TickResult};
pub use state::{CollisionType, GameState, Phase, Position, Snake};
