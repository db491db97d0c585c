//! Keyboard mapping from crossterm events to game actions

pub mod handler;

pub use handler::{InputHandler, KeyAction};
