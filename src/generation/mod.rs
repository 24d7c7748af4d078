//! # Generation Module
//!
//! Procedural level generation: the bordered board, free-position bookkeeping and
//! randomized-count placement of walls, consumables, enemies and the exit.
//!
//! Generation is fully deterministic for a given seed, level number and
//! configuration. Every random draw goes through the [`StdRng`] handed to the
//! generator, in a fixed order.

pub mod board;
pub mod catalog;
pub mod pool;

pub use board::*;
pub use catalog::*;
pub use pool::*;

use crate::{ScavengerError, ScavengerResult};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An inclusive `[minimum, maximum]` bound on how many tiles of one category
/// to place.
///
/// Construction and deserialization both reject `minimum > maximum`, so a
/// malformed range never reaches generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCountRange")]
pub struct CountRange {
    pub minimum: u32,
    pub maximum: u32,
}

#[derive(Deserialize)]
struct RawCountRange {
    minimum: u32,
    maximum: u32,
}

impl TryFrom<RawCountRange> for CountRange {
    type Error = ScavengerError;

    fn try_from(raw: RawCountRange) -> ScavengerResult<Self> {
        CountRange::new(raw.minimum, raw.maximum)
    }
}

impl CountRange {
    /// Creates a count range, rejecting `minimum > maximum`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scavenger::CountRange;
    ///
    /// assert!(CountRange::new(1, 5).is_ok());
    /// assert!(CountRange::new(5, 1).is_err());
    /// ```
    pub fn new(minimum: u32, maximum: u32) -> ScavengerResult<Self> {
        if minimum > maximum {
            return Err(ScavengerError::InvalidCountRange { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    /// A range that always yields exactly `count`.
    pub fn fixed(count: u32) -> Self {
        Self {
            minimum: count,
            maximum: count,
        }
    }

    /// Draws a count uniformly from the range, both bounds included.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.minimum..=self.maximum)
    }
}

/// Configuration for level generation.
///
/// Controls the board dimensions, how many tiles of each category appear and
/// which visual variants they are drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Number of columns on the board
    pub width: u32,
    /// Number of rows on the board
    pub height: u32,
    /// Inner walls placed per level
    pub wall_count: CountRange,
    /// Food pickups placed per level
    pub food_count: CountRange,
    /// Water pickups placed per level
    pub water_count: CountRange,
    /// Variant catalogs for each category
    pub catalogs: TileCatalogs,
}

impl GenerationConfig {
    /// Creates the default 8×8 configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use scavenger::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert_eq!(config.width, 8);
    /// assert!(config.wall_count.minimum <= config.wall_count.maximum);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: crate::config::DEFAULT_COLUMNS,
            height: crate::config::DEFAULT_ROWS,
            wall_count: CountRange { minimum: 5, maximum: 9 },
            food_count: CountRange { minimum: 1, maximum: 5 },
            water_count: CountRange { minimum: 1, maximum: 5 },
            catalogs: TileCatalogs::default(),
        }
    }

    /// Creates a configuration for testing with a small, sparse board.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 5,
            height: 5,
            wall_count: CountRange::fixed(0),
            food_count: CountRange::fixed(1),
            water_count: CountRange::fixed(0),
            catalogs: TileCatalogs::default(),
        }
    }

    /// Number of cells available for static placements.
    pub fn interior_capacity(&self) -> usize {
        (self.width.saturating_sub(2) * self.height.saturating_sub(2)) as usize
    }

    /// The fixed exit cell in the top-right corner of the board.
    pub fn exit_position(&self) -> crate::Position {
        crate::Position::new(self.width as i32 - 1, self.height as i32 - 1)
    }

    /// Validates dimensions and catalogs.
    pub fn validate(&self) -> ScavengerResult<()> {
        if self.width < 3 || self.height < 3 {
            return Err(ScavengerError::InvalidConfig(format!(
                "board must be at least 3x3, got {}x{}",
                self.width, self.height
            )));
        }
        self.catalogs.validate()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Number of enemies spawned on a level: `floor(log2(level))`, zero for level 0.
///
/// # Examples
///
/// ```
/// use scavenger::enemy_count_for_level;
///
/// assert_eq!(enemy_count_for_level(1), 0);
/// assert_eq!(enemy_count_for_level(8), 3);
/// ```
pub fn enemy_count_for_level(level: u32) -> u32 {
    level.checked_ilog2().unwrap_or(0)
}

/// Trait for procedural generators.
///
/// All generation systems implement this trait, allowing for consistent
/// interfaces between the game state and the tooling that drives them.
pub trait Generator<T> {
    /// Generates content for `level` using the configuration and random source.
    fn generate(&self, level: u32, config: &GenerationConfig, rng: &mut StdRng)
        -> ScavengerResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> ScavengerResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Creates the random source for one level, derived from the world seed.
    pub fn create_level_rng(config: &GenerationConfig, level: u32) -> StdRng {
        StdRng::seed_from_u64(config.seed.wrapping_add(level as u64 * 1000))
    }
}
