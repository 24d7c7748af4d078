//! # Input Module
//!
//! Keyboard handling for the macroquad host.
//!
//! Movement reads held keys as raw axes, so holding a direction keeps walking
//! once each turn comes back to the player.

use crate::Direction;
use macroquad::prelude::*;

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move one cell in a direction
    Move(Direction),
    /// Quit the game
    Quit,
    /// Start a new game (when game has ended)
    NewGame,
}

/// Input handler for processing player commands.
#[derive(Debug, Clone, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use scavenger::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// // Ready to process input
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Gets the current input if any relevant key is held or pressed.
    pub fn get_input(&self) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::Escape) {
            return Some(PlayerInput::Quit);
        }
        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::R) {
            return Some(PlayerInput::NewGame);
        }

        let horizontal = axis(
            is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        );
        let vertical = axis(
            is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
            is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
        );
        axes_to_input(horizontal, vertical)
    }
}

/// Raw axis value from a pair of opposing keys.
pub fn axis(negative: bool, positive: bool) -> i32 {
    positive as i32 - negative as i32
}

/// Converts raw axes into a move. Horizontal input wins over vertical.
pub fn axes_to_input(horizontal: i32, vertical: i32) -> Option<PlayerInput> {
    Direction::from_axes(horizontal, vertical).map(PlayerInput::Move)
}
