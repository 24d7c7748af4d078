//! # Display Management
//!
//! Screen management and 2D graphics rendering functionality using macroquad.
//!
//! The board uses y-up coordinates; screen space is y-down, so rows are flipped
//! when drawing.

use crate::game::{GameEvent, GameState, Point};
use crate::rendering::{draw_overlay, StatBar};
use crate::{AudioClip, PickupKind, ScavengerResult, TileCategory};
use macroquad::prelude::*;

/// Macroquad display manager for the game.
///
/// Handles all 2D graphics rendering operations including board display, the
/// HUD, the message log and the level overlay.
pub struct MacroquadDisplay {
    /// Tile size in pixels
    pub tile_size: f32,
    /// Top-left corner of the board's outer ring on screen
    pub board_origin: Vec2,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// Last sound requested by the game, with its pitch
    pub last_sound: Option<(AudioClip, f32)>,
    /// Whether background music would still be playing
    pub music_playing: bool,
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadDisplay {
    /// Creates a new display manager.
    pub fn new() -> Self {
        Self {
            tile_size: 48.0,
            board_origin: vec2(20.0, 60.0),
            messages: Vec::new(),
            max_messages: 100,
            last_sound: None,
            music_playing: true,
        }
    }

    /// Records the presentation side effects of game events.
    pub fn consume_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Sound { clip, pitch } => self.last_sound = Some((*clip, *pitch)),
                GameEvent::MusicStopped => self.music_playing = false,
                GameEvent::LevelStarted { .. } => self.music_playing = true,
                _ => {}
            }
            if let Some(message) = event.describe() {
                self.add_message(message);
            }
        }
    }

    /// Renders the complete game screen.
    pub fn render_game(&self, game_state: &GameState) -> ScavengerResult<()> {
        clear_background(BLACK);

        if let Some(text) = game_state.overlay_text() {
            draw_overlay(text);
            return Ok(());
        }

        self.render_board(game_state);
        self.render_units(game_state);
        self.render_hud(game_state);
        self.render_messages();
        Ok(())
    }

    /// Screen coordinates of the top-left corner of a board point.
    pub fn to_screen(&self, point: Point, board_height: u32) -> Vec2 {
        board_to_screen(point, board_height, self.tile_size, self.board_origin)
    }

    fn render_board(&self, game_state: &GameState) {
        let board = &game_state.board;
        let size = self.tile_size;

        for (position, category, variant) in board.ground_tiles() {
            let at = self.to_screen(position.to_point(), board.height);
            draw_rectangle(at.x, at.y, size, size, ground_color(category, variant));
        }

        for (position, variant) in board.walls() {
            let at = self.to_screen(position.to_point(), board.height);
            let shade = 0.45 - variant as f32 * 0.05;
            draw_rectangle(at.x + 2.0, at.y + 2.0, size - 4.0, size - 4.0, Color::new(shade, shade * 0.8, shade * 0.6, 1.0));
        }

        let exit = self.to_screen(board.exit.to_point(), board.height);
        draw_rectangle_lines(exit.x + 4.0, exit.y + 4.0, size - 8.0, size - 8.0, 3.0, GOLD);
        draw_text("EXIT", exit.x + 6.0, exit.y + size / 2.0 + 5.0, 16.0, GOLD);

        for pickup in board.active_pickups() {
            let at = self.to_screen(pickup.position.to_point(), board.height);
            draw_circle(at.x + size / 2.0, at.y + size / 2.0, size / 5.0, pickup_color(pickup.kind));
        }
    }

    fn render_units(&self, game_state: &GameState) {
        let height = game_state.board.height;
        let size = self.tile_size;

        for enemy in game_state.enemies.iter().filter(|enemy| enemy.active) {
            let at = self.to_screen(enemy.point(), height);
            let color = if enemy.variant == 0 { RED } else { MAROON };
            draw_rectangle(at.x + 8.0, at.y + 8.0, size - 16.0, size - 16.0, color);
        }

        let at = self.to_screen(game_state.player.point(), height);
        draw_circle(at.x + size / 2.0, at.y + size / 2.0, size / 2.5, YELLOW);
    }

    fn render_hud(&self, game_state: &GameState) {
        let stats = game_state.player.stats;
        let max = game_state.player.max_stats();
        let bars = [
            StatBar::new("Health", stats.health, max.health, RED),
            StatBar::new("Water", stats.water, max.water, BLUE),
            StatBar::new("Food", stats.food, max.food, GREEN),
        ];

        let width = 180.0;
        for (i, bar) in bars.iter().enumerate() {
            bar.draw(20.0 + i as f32 * (width + 10.0), 16.0, width, 22.0);
        }

        let panel_x = self.board_origin.x + (game_state.board.width + 2) as f32 * self.tile_size + 20.0;
        draw_text(&format!("Day {}", game_state.level), panel_x, 80.0, 28.0, WHITE);
        let statistics = &game_state.statistics;
        let lines = [
            format!("Steps: {}", statistics.steps_taken),
            format!("Enemies defeated: {}", statistics.enemies_defeated),
            format!("Items collected: {}", statistics.items_collected),
        ];
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, panel_x, 120.0 + i as f32 * 22.0, 18.0, LIGHTGRAY);
        }
        draw_text("Arrows/WASD: Move   ESC: Quit", panel_x, 200.0, 16.0, GRAY);
    }

    /// Renders the message area.
    fn render_messages(&self) {
        let message_area_y = screen_height() - 70.0;
        let message_count = 3;
        let line_height = 18.0;

        draw_rectangle(
            0.0,
            message_area_y - 16.0,
            screen_width(),
            86.0,
            Color::new(0.0, 0.0, 0.0, 0.8),
        );

        let start_index = self.messages.len().saturating_sub(message_count);
        for (i, message) in self.messages.iter().skip(start_index).enumerate() {
            let y = message_area_y + i as f32 * line_height;
            draw_text(message, 10.0, y, 16.0, WHITE);
        }
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }
}

/// Converts a y-up board point to the y-down screen position of its tile's
/// top-left corner. The outer ring at `-1` starts at `origin`.
pub fn board_to_screen(point: Point, board_height: u32, tile_size: f32, origin: Vec2) -> Vec2 {
    let column = point.x + 1.0;
    let row = board_height as f32 - point.y;
    vec2(origin.x + column * tile_size, origin.y + row * tile_size)
}

fn ground_color(category: TileCategory, variant: usize) -> Color {
    let tint = variant as f32 * 0.03;
    match category {
        TileCategory::OuterWall => Color::new(0.22 + tint, 0.16 + tint, 0.12, 1.0),
        _ => Color::new(0.30 + tint, 0.27 + tint, 0.22, 1.0),
    }
}

fn pickup_color(kind: PickupKind) -> Color {
    match kind {
        PickupKind::Food => ORANGE,
        PickupKind::Sirloin => PINK,
        PickupKind::Soda => SKYBLUE,
        PickupKind::Water => BLUE,
    }
}
