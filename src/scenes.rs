//! # Scene Management System
//!
//! A centralized system for managing the playing and game-over scenes.
//! The scene manager owns the frame loop: it reads input, advances the core by
//! the frame time and hands the resulting events to the display.

use crate::{
    GameCompletionState, GameSettings, GameState, InputHandler, MacroquadDisplay, PlayerInput,
    ScavengerResult,
};
use macroquad::prelude::*;

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Normal gameplay
    Playing,
    /// The player starved; the game-over overlay stays up
    GameOver(GameCompletionState),
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    settings: GameSettings,
    game_state: GameState,
    display: MacroquadDisplay,
    input_handler: InputHandler,
}

impl SceneManager {
    /// Creates a new scene manager for a fresh session.
    pub fn new(settings: GameSettings, input_handler: InputHandler) -> ScavengerResult<Self> {
        Self::starting_at(settings, 1, input_handler)
    }

    /// Creates a scene manager whose first session starts on `level`.
    pub fn starting_at(
        settings: GameSettings,
        level: u32,
        input_handler: InputHandler,
    ) -> ScavengerResult<Self> {
        let game_state = GameState::starting_at(settings.clone(), level)?;
        let mut display = MacroquadDisplay::new();
        display.add_message("Welcome, scavenger.".to_string());
        display.add_message("Use WASD/arrows to move. Walk into enemies to fight.".to_string());

        Ok(Self {
            current_scene: SceneType::Playing,
            settings,
            game_state,
            display,
            input_handler,
        })
    }

    pub fn current_scene(&self) -> SceneType {
        self.current_scene
    }

    /// Runs the main scene loop until the game exits
    pub async fn run(&mut self) -> ScavengerResult<()> {
        loop {
            let exit = match self.current_scene {
                SceneType::Playing => self.update_playing_scene(get_frame_time())?,
                SceneType::GameOver(_) => self.update_game_over_scene()?,
            };
            if exit {
                break;
            }
            next_frame().await;
        }
        log::info!("Scene loop ended");
        Ok(())
    }

    /// Updates the playing scene, returns true if exit is requested
    fn update_playing_scene(&mut self, dt: f32) -> ScavengerResult<bool> {
        match self.input_handler.get_input() {
            Some(PlayerInput::Quit) => return Ok(true),
            Some(PlayerInput::Move(direction)) if self.game_state.player_can_act() => {
                let events = self.game_state.handle_input(direction)?;
                self.display.consume_events(&events);
            }
            _ => {}
        }

        let events = self.game_state.tick(dt)?;
        self.display.consume_events(&events);

        if self.game_state.is_game_ended() {
            self.current_scene = SceneType::GameOver(self.game_state.completion_state);
        }

        self.display.render_game(&self.game_state)?;
        Ok(false)
    }

    /// Updates the game over scene, returns true if exit is requested
    fn update_game_over_scene(&mut self) -> ScavengerResult<bool> {
        self.display.render_game(&self.game_state)?;
        draw_text(
            "Press ENTER to try again, ESC to quit",
            20.0,
            screen_height() - 30.0,
            20.0,
            GRAY,
        );

        match self.input_handler.get_input() {
            Some(PlayerInput::NewGame) => self.start_new_game()?,
            Some(PlayerInput::Quit) => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    /// Starts a new game on a fresh seed
    fn start_new_game(&mut self) -> ScavengerResult<()> {
        let mut settings = self.settings.clone();
        settings.generation.seed = settings.generation.seed.wrapping_add(self.game_state.level as u64 + 1);
        log::info!("Starting new game with seed: {}", settings.generation.seed);

        self.game_state = GameState::new(settings.clone())?;
        self.settings = settings;
        self.current_scene = SceneType::Playing;
        self.display.add_message("New game started!".to_string());
        Ok(())
    }
}
