//! Presentation layer handling the terminal UI and user input.
//!
//! This module renders the onboarding screen with ratatui and maps
//! keyboard input onto the screen controller's operations.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
