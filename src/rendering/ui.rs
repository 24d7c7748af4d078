//! # User Interface Elements
//!
//! HUD stat bars and the full-screen level overlay.

use macroquad::prelude::*;

/// One labelled stat bar in the HUD.
#[derive(Debug, Clone, PartialEq)]
pub struct StatBar {
    pub label: &'static str,
    pub value: i32,
    pub max: i32,
    pub color: Color,
}

impl StatBar {
    pub fn new(label: &'static str, value: i32, max: i32, color: Color) -> Self {
        Self {
            label,
            value,
            max,
            color,
        }
    }

    /// Filled fraction of the bar, clamped to `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        (self.value as f32 / self.max as f32).clamp(0.0, 1.0)
    }

    /// Draws the bar with its label and numeric value.
    pub fn draw(&self, x: f32, y: f32, width: f32, height: f32) {
        draw_rectangle(x, y, width, height, Color::new(0.15, 0.15, 0.15, 1.0));
        draw_rectangle(x, y, width * self.fraction(), height, self.color);
        draw_rectangle_lines(x, y, width, height, 1.0, DARKGRAY);
        draw_text(
            &format!("{}: {}", self.label, self.value),
            x + 4.0,
            y + height - 4.0,
            height,
            WHITE,
        );
    }
}

/// Covers the screen and centres `text` on it.
pub fn draw_overlay(text: &str) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), BLACK);
    let font_size = 40.0;
    let size = measure_text(text, None, font_size as u16, 1.0);
    draw_text(
        text,
        (screen_width() - size.width) / 2.0,
        (screen_height() + size.height) / 2.0,
        font_size,
        WHITE,
    );
}
