//! # Settings
//!
//! Runtime configuration loaded from JSON. Every section falls back to the
//! compile-time defaults in [`crate::config`], so a settings file only needs to
//! name what it changes.

use crate::{config, GenerationConfig, ScavengerError, ScavengerResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Player stats and combat constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub start_health: i32,
    pub start_water: i32,
    pub start_food: i32,
    pub max_health: i32,
    pub max_water: i32,
    pub max_food: i32,
    /// Damage dealt to an enemy per chop
    pub damage: i32,
    /// Seconds needed to cross one cell
    pub move_time: f32,
    /// Water and food spent per step
    pub step_cost: i32,
    pub food_points: i32,
    pub soda_points: i32,
    pub sirloin_points: i32,
    pub water_points: i32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            start_health: config::DEFAULT_PLAYER_HEALTH,
            start_water: config::DEFAULT_PLAYER_WATER,
            start_food: config::DEFAULT_PLAYER_FOOD,
            max_health: config::DEFAULT_PLAYER_HEALTH,
            max_water: config::DEFAULT_PLAYER_WATER,
            max_food: config::DEFAULT_PLAYER_FOOD,
            damage: config::PLAYER_DAMAGE,
            move_time: config::MOVE_TIME,
            step_cost: 2,
            food_points: 10,
            soda_points: 15,
            sirloin_points: 40,
            water_points: 40,
        }
    }
}

/// Delays driving the turn scheduler and its one-shot actions, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnSettings {
    pub level_start_delay: f32,
    pub turn_delay: f32,
    pub restart_level_delay: f32,
    pub loot_delay: f32,
}

impl Default for TurnSettings {
    fn default() -> Self {
        Self {
            level_start_delay: config::LEVEL_START_DELAY,
            turn_delay: config::TURN_DELAY,
            restart_level_delay: config::RESTART_LEVEL_DELAY,
            loot_delay: config::LOOT_DELAY,
        }
    }
}

/// Pitch randomization applied to sound effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub low_pitch_range: f32,
    pub high_pitch_range: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            low_pitch_range: config::LOW_PITCH_RANGE,
            high_pitch_range: config::HIGH_PITCH_RANGE,
        }
    }
}

/// Complete game settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub generation: GenerationConfig,
    pub player: PlayerSettings,
    pub turns: TurnSettings,
    pub audio: AudioSettings,
}

impl GameSettings {
    /// Loads and validates settings from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ScavengerResult<Self> {
        let path = path.as_ref();
        log::info!("Loading settings from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Parses and validates settings from a JSON string.
    ///
    /// # Examples
    ///
    /// ```
    /// use scavenger::GameSettings;
    ///
    /// let settings = GameSettings::from_json_str(r#"{"generation": {"width": 10}}"#).unwrap();
    /// assert_eq!(settings.generation.width, 10);
    /// assert_eq!(settings.generation.height, 8);
    /// ```
    pub fn from_json_str(json: &str) -> ScavengerResult<Self> {
        let settings: GameSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes the settings to pretty-printed JSON.
    pub fn to_json(&self) -> ScavengerResult<String> {
        serde_json::to_string_pretty(self).map_err(ScavengerError::from)
    }

    pub fn validate(&self) -> ScavengerResult<()> {
        self.generation.validate()?;

        let durations = [
            ("player.move_time", self.player.move_time),
            ("turns.level_start_delay", self.turns.level_start_delay),
            ("turns.turn_delay", self.turns.turn_delay),
            ("turns.restart_level_delay", self.turns.restart_level_delay),
            ("turns.loot_delay", self.turns.loot_delay),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScavengerError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let player = &self.player;
        if player.max_health <= 0 || player.max_water <= 0 || player.max_food <= 0 {
            return Err(ScavengerError::InvalidConfig(
                "player maximum stats must be positive".to_string(),
            ));
        }
        if player.start_health > player.max_health
            || player.start_water > player.max_water
            || player.start_food > player.max_food
        {
            return Err(ScavengerError::InvalidConfig(
                "player starting stats exceed their maximums".to_string(),
            ));
        }

        if self.audio.low_pitch_range > self.audio.high_pitch_range {
            return Err(ScavengerError::InvalidConfig(format!(
                "low_pitch_range {} exceeds high_pitch_range {}",
                self.audio.low_pitch_range, self.audio.high_pitch_range
            )));
        }

        Ok(())
    }
}
