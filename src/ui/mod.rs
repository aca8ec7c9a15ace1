//! GUI module for the Isolation game
//!
//! This module provides a native Rust GUI using egui/eframe.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::IsolationApp;
pub use game_state::{GameMode, GameState};
