//! # Tile Catalogs
//!
//! Sets of interchangeable tile variants for each placement category.
//!
//! A catalog only describes *what* can be placed. Pickup variants carry the effect
//! they have when the player walks onto them, and enemy variants carry the combat
//! profile the spawned unit starts with.

use crate::{ScavengerError, ScavengerResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Every kind of tile a placement plan can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileCategory {
    Floor,
    OuterWall,
    Wall,
    Food,
    Water,
    Enemy,
    Exit,
    Loot,
}

/// What a consumable restores when the player steps onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Food,
    Soda,
    Sirloin,
    Water,
}

impl PickupKind {
    /// Food pickups are eaten; everything else is drunk.
    pub fn is_food(self) -> bool {
        matches!(self, PickupKind::Food | PickupKind::Sirloin)
    }
}

/// Combat profile of an enemy variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    /// Starting hit points
    pub hp: i32,
    /// Damage dealt to the player per attack
    pub player_damage: i32,
    /// Seconds needed to cross one cell
    #[serde(default = "default_enemy_move_time")]
    pub move_time: f32,
}

fn default_enemy_move_time() -> f32 {
    crate::config::MOVE_TIME
}

/// One interchangeable visual variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileVariant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup: Option<PickupKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enemy: Option<EnemyProfile>,
}

impl TileVariant {
    /// A purely visual variant.
    pub fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            pickup: None,
            enemy: None,
        }
    }

    pub fn pickup(name: &str, kind: PickupKind) -> Self {
        Self {
            pickup: Some(kind),
            ..Self::plain(name)
        }
    }

    pub fn enemy(name: &str, profile: EnemyProfile) -> Self {
        Self {
            enemy: Some(profile),
            ..Self::plain(name)
        }
    }
}

/// A set of variants one of which is chosen uniformly per placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileCatalog {
    pub variants: Vec<TileVariant>,
}

impl TileCatalog {
    pub fn new(variants: Vec<TileVariant>) -> Self {
        Self { variants }
    }

    /// Builds a catalog of purely visual variants.
    pub fn plain(names: &[&str]) -> Self {
        Self::new(names.iter().map(|name| TileVariant::plain(name)).collect())
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TileVariant> {
        self.variants.get(index)
    }

    /// Draws a variant index uniformly from the catalog.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> ScavengerResult<usize> {
        if self.variants.is_empty() {
            return Err(ScavengerError::GenerationFailed(
                "cannot choose from an empty tile catalog".to_string(),
            ));
        }
        Ok(rng.gen_range(0..self.variants.len()))
    }
}

/// Catalogs for every category the level generator places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileCatalogs {
    pub floor: TileCatalog,
    pub outer_wall: TileCatalog,
    pub wall: TileCatalog,
    pub food: TileCatalog,
    pub water: TileCatalog,
    pub enemy: TileCatalog,
    /// Pickups dropped by slain enemies
    pub loot: TileCatalog,
}

impl TileCatalogs {
    /// Returns the catalog used for a category, if the category has one.
    pub fn for_category(&self, category: TileCategory) -> Option<&TileCatalog> {
        match category {
            TileCategory::Floor => Some(&self.floor),
            TileCategory::OuterWall => Some(&self.outer_wall),
            TileCategory::Wall => Some(&self.wall),
            TileCategory::Food => Some(&self.food),
            TileCategory::Water => Some(&self.water),
            TileCategory::Enemy => Some(&self.enemy),
            TileCategory::Loot => Some(&self.loot),
            TileCategory::Exit => None,
        }
    }

    /// Checks that every catalog can be drawn from and that pickup and enemy
    /// catalogs carry the data the game needs to spawn them.
    pub fn validate(&self) -> ScavengerResult<()> {
        let named = [
            ("floor", &self.floor),
            ("outer_wall", &self.outer_wall),
            ("wall", &self.wall),
            ("food", &self.food),
            ("water", &self.water),
            ("enemy", &self.enemy),
            ("loot", &self.loot),
        ];
        for (name, catalog) in named {
            if catalog.is_empty() {
                return Err(ScavengerError::InvalidConfig(format!(
                    "tile catalog '{}' has no variants",
                    name
                )));
            }
        }

        for (name, catalog) in [("food", &self.food), ("water", &self.water), ("loot", &self.loot)] {
            if let Some(variant) = catalog.variants.iter().find(|v| v.pickup.is_none()) {
                return Err(ScavengerError::InvalidConfig(format!(
                    "variant '{}' in catalog '{}' has no pickup kind",
                    variant.name, name
                )));
            }
        }

        for variant in &self.enemy.variants {
            match &variant.enemy {
                None => {
                    return Err(ScavengerError::InvalidConfig(format!(
                        "enemy variant '{}' has no enemy profile",
                        variant.name
                    )));
                }
                Some(profile) if profile.move_time <= 0.0 => {
                    return Err(ScavengerError::InvalidConfig(format!(
                        "enemy variant '{}' must have a positive move_time",
                        variant.name
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

impl Default for TileCatalogs {
    fn default() -> Self {
        Self {
            floor: TileCatalog::plain(&["floor1", "floor2", "floor3", "floor4"]),
            outer_wall: TileCatalog::plain(&["outer_wall1", "outer_wall2", "outer_wall3"]),
            wall: TileCatalog::plain(&["wall1", "wall2", "wall3", "wall4"]),
            food: TileCatalog::new(vec![
                TileVariant::pickup("food", PickupKind::Food),
                TileVariant::pickup("soda", PickupKind::Soda),
            ]),
            water: TileCatalog::new(vec![TileVariant::pickup("water", PickupKind::Water)]),
            enemy: TileCatalog::new(vec![
                TileVariant::enemy(
                    "enemy1",
                    EnemyProfile {
                        hp: 40,
                        player_damage: 10,
                        move_time: crate::config::MOVE_TIME,
                    },
                ),
                TileVariant::enemy(
                    "enemy2",
                    EnemyProfile {
                        hp: 60,
                        player_damage: 20,
                        move_time: crate::config::MOVE_TIME,
                    },
                ),
            ]),
            loot: TileCatalog::new(vec![
                TileVariant::pickup("sirloin", PickupKind::Sirloin),
                TileVariant::pickup("water", PickupKind::Water),
            ]),
        }
    }
}
