//! # Scavenger
//!
//! A small turn-based survival roguelike played on a procedurally generated grid.
//!
//! ## Architecture Overview
//!
//! The crate is split between a deterministic core and a thin presentation host:
//!
//! - **Generation**: builds a bordered board and scatters walls, food, water,
//!   enemies and the exit under randomized count constraints
//! - **Game**: units, the shared move-attempt protocol, the turn scheduler and the
//!   central [`GameState`] that wires them together
//! - **Settings**: JSON-backed configuration validated at load time
//! - **Rendering / Input / Scenes**: the macroquad host that draws the board, reads
//!   the keyboard and drives [`GameState::tick`] once per frame
//!
//! The core never blocks. Smooth movement, the enemy phase and delayed one-shot
//! actions are explicit state machines advanced by the host's frame clock, and every
//! core call returns the [`GameEvent`]s (animations, sounds, HUD updates) the host
//! should present.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod settings;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use settings::*;

pub use scenes::{SceneManager, SceneType};

/// Core error type for the Scavenger game engine.
#[derive(thiserror::Error, Debug)]
pub enum ScavengerError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A position was requested from an empty free-position pool
    #[error("Free position pool is exhausted")]
    PoolExhausted,

    /// A tile category asked for more cells than remain free
    #[error("Not enough free cells for {category:?}: requested {requested}, available {available}")]
    InsufficientSpace {
        category: TileCategory,
        requested: u32,
        available: usize,
    },

    /// A count range with minimum greater than maximum
    #[error("Invalid count range: minimum {minimum} exceeds maximum {maximum}")]
    InvalidCountRange { minimum: u32, maximum: u32 },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Scavenger codebase.
pub type ScavengerResult<T> = Result<T, ScavengerError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
///
/// These are the defaults behind [`GameSettings`]; a settings file overrides them.
pub mod config {
    /// Default board width in tiles
    pub const DEFAULT_COLUMNS: u32 = 8;

    /// Default board height in tiles
    pub const DEFAULT_ROWS: u32 = 8;

    /// Seconds the "Day N" overlay stays up before the player may act
    pub const LEVEL_START_DELAY: f32 = 2.0;

    /// Seconds the enemy phase waits before moving anyone
    pub const TURN_DELAY: f32 = 0.1;

    /// Seconds a unit needs to cross one cell
    pub const MOVE_TIME: f32 = 0.1;

    /// Default player starting health
    pub const DEFAULT_PLAYER_HEALTH: i32 = 100;

    /// Default player starting water
    pub const DEFAULT_PLAYER_WATER: i32 = 200;

    /// Default player starting food
    pub const DEFAULT_PLAYER_FOOD: i32 = 200;

    /// Damage the player deals per attack
    pub const PLAYER_DAMAGE: i32 = 20;

    /// Seconds between reaching the exit and loading the next day
    pub const RESTART_LEVEL_DELAY: f32 = 1.0;

    /// Seconds between an enemy dying and its loot appearing
    pub const LOOT_DELAY: f32 = 0.01;

    /// Random pitch bounds for sound effects
    pub const LOW_PITCH_RANGE: f32 = 0.95;
    pub const HIGH_PITCH_RANGE: f32 = 1.05;

    /// Frames per second target for the game loop
    pub const TARGET_FPS: u64 = 60;
}
