//! # Rendering Module
//!
//! 2D presentation of the game state with macroquad.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
