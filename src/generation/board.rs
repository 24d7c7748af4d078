//! # Board Generation
//!
//! Lays out one level: a ground layer bordered by outer walls, followed by inner
//! walls, consumables, enemies and the exit scattered over the interior.
//!
//! The order of random draws is part of the contract. Two runs with the same
//! seed, level and configuration produce identical plans.

use crate::{
    enemy_count_for_level, CountRange, GenerationConfig, Generator, GridPositionPool, Position,
    ScavengerError, ScavengerResult, TileCategory,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single tile instance produced by generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub category: TileCategory,
    /// Index into the category's catalog. Always 0 for the exit.
    pub variant: usize,
    pub position: Position,
}

/// Everything one generation pass decided for a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementPlan {
    pub level: u32,
    pub width: u32,
    pub height: u32,
    /// Floor and outer wall tiles covering `[-1, width] × [-1, height]`
    pub ground: Vec<PlacedTile>,
    /// Walls, consumables, enemies and the exit, in placement order
    pub objects: Vec<PlacedTile>,
}

impl PlacementPlan {
    /// Objects of one category, in placement order.
    pub fn of_category(&self, category: TileCategory) -> impl Iterator<Item = &PlacedTile> {
        self.objects
            .iter()
            .filter(move |tile| tile.category == category)
    }

    /// Number of objects of one category.
    pub fn count(&self, category: TileCategory) -> usize {
        self.of_category(category).count()
    }

    pub fn exit_position(&self) -> Option<Position> {
        self.of_category(TileCategory::Exit)
            .next()
            .map(|tile| tile.position)
    }

    /// Whether a ground cell lies on the outer ring.
    pub fn is_outer_ring(&self, position: Position) -> bool {
        position.x == -1
            || position.x == self.width as i32
            || position.y == -1
            || position.y == self.height as i32
    }
}

/// Generator for the bordered survival board.
#[derive(Debug, Clone, Default)]
pub struct LevelGenerator;

impl LevelGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Draws a ground variant for every cell of the board and its border.
    fn lay_ground(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> ScavengerResult<Vec<PlacedTile>> {
        let width = config.width as i32;
        let height = config.height as i32;
        let mut ground = Vec::with_capacity(((width + 2) * (height + 2)) as usize);

        for x in -1..=width {
            for y in -1..=height {
                let position = Position::new(x, y);
                let floor = config.catalogs.floor.choose(rng)?;
                let on_ring = x == -1 || x == width || y == -1 || y == height;

                let tile = if on_ring {
                    PlacedTile {
                        category: TileCategory::OuterWall,
                        variant: config.catalogs.outer_wall.choose(rng)?,
                        position,
                    }
                } else {
                    PlacedTile {
                        category: TileCategory::Floor,
                        variant: floor,
                        position,
                    }
                };
                ground.push(tile);
            }
        }

        Ok(ground)
    }

    /// Places a randomized number of tiles of one category on free cells.
    fn place_at_random(
        &self,
        category: TileCategory,
        range: CountRange,
        config: &GenerationConfig,
        pool: &mut GridPositionPool,
        rng: &mut StdRng,
        objects: &mut Vec<PlacedTile>,
    ) -> ScavengerResult<()> {
        let catalog = config
            .catalogs
            .for_category(category)
            .ok_or_else(|| {
                ScavengerError::GenerationFailed(format!("no catalog for {:?}", category))
            })?;

        let requested = range.draw(rng);
        if requested as usize > pool.len() {
            return Err(ScavengerError::InsufficientSpace {
                category,
                requested,
                available: pool.len(),
            });
        }

        for _ in 0..requested {
            let position = pool.take_random(rng)?;
            let variant = catalog.choose(rng)?;
            log::trace!("Placed {:?} variant {} at {:?}", category, variant, position);
            objects.push(PlacedTile {
                category,
                variant,
                position,
            });
        }

        log::debug!("Placed {} {:?} tile(s)", requested, category);
        Ok(())
    }
}

impl Generator<PlacementPlan> for LevelGenerator {
    fn generate(
        &self,
        level: u32,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> ScavengerResult<PlacementPlan> {
        config.validate()?;

        let ground = self.lay_ground(config, rng)?;

        let mut pool = GridPositionPool::new();
        pool.initialize(config.width, config.height);

        let mut objects = Vec::new();
        for (category, range) in [
            (TileCategory::Wall, config.wall_count),
            (TileCategory::Food, config.food_count),
            (TileCategory::Water, config.water_count),
            (
                TileCategory::Enemy,
                CountRange::fixed(enemy_count_for_level(level)),
            ),
        ] {
            self.place_at_random(category, range, config, &mut pool, rng, &mut objects)?;
        }

        objects.push(PlacedTile {
            category: TileCategory::Exit,
            variant: 0,
            position: config.exit_position(),
        });

        let plan = PlacementPlan {
            level,
            width: config.width,
            height: config.height,
            ground,
            objects,
        };

        log::info!(
            "Generated day {} ({}x{}): {} walls, {} food, {} water, {} enemies, {} free cells left",
            level,
            config.width,
            config.height,
            plan.count(TileCategory::Wall),
            plan.count(TileCategory::Food),
            plan.count(TileCategory::Water),
            plan.count(TileCategory::Enemy),
            pool.len()
        );

        Ok(plan)
    }

    fn validate(&self, plan: &PlacementPlan, config: &GenerationConfig) -> ScavengerResult<()> {
        let expected_ground = ((config.width + 2) * (config.height + 2)) as usize;
        if plan.ground.len() != expected_ground {
            return Err(ScavengerError::GenerationFailed(format!(
                "expected {} ground tiles, found {}",
                expected_ground,
                plan.ground.len()
            )));
        }
        if let Some(tile) = plan
            .ground
            .iter()
            .find(|tile| plan.is_outer_ring(tile.position) != (tile.category == TileCategory::OuterWall))
        {
            return Err(ScavengerError::GenerationFailed(format!(
                "ground tile {:?} at {:?} does not match the border",
                tile.category, tile.position
            )));
        }

        let mut occupied = HashSet::new();
        let max_x = config.width as i32 - 2;
        let max_y = config.height as i32 - 2;
        for tile in plan
            .objects
            .iter()
            .filter(|tile| tile.category != TileCategory::Exit)
        {
            let pos = tile.position;
            if pos.x < 1 || pos.x > max_x || pos.y < 1 || pos.y > max_y {
                return Err(ScavengerError::GenerationFailed(format!(
                    "{:?} placed outside the interior at {:?}",
                    tile.category, pos
                )));
            }
            if !occupied.insert(pos) {
                return Err(ScavengerError::GenerationFailed(format!(
                    "two placements share cell {:?}",
                    pos
                )));
            }
        }

        let exits: Vec<_> = plan.of_category(TileCategory::Exit).collect();
        if exits.len() != 1 || exits[0].position != config.exit_position() {
            return Err(ScavengerError::GenerationFailed(
                "level must have exactly one exit in the top-right corner".to_string(),
            ));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "LevelGenerator"
    }
}
