//! # World
//!
//! The playable board built from a generated [`PlacementPlan`] and the grid
//! collision backend movement is tested against.

use crate::{
    CollisionBackend, Enemy, EntityId, LayerMask, ObstacleKind, Pickup, PickupKind, PlacementPlan,
    Player, Position, ScavengerError, ScavengerResult, SegmentHit, TileCategory, TileCatalogs,
};
use std::collections::HashMap;

/// Static layout of one level plus the pickups lying on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub level: u32,
    pub width: u32,
    pub height: u32,
    /// Ground variant per cell, covering the outer ring
    ground: HashMap<Position, (TileCategory, usize)>,
    /// Inner wall variant per cell
    walls: HashMap<Position, usize>,
    pub pickups: Vec<Pickup>,
    pub exit: Position,
}

impl Board {
    /// Builds the board described by `plan`. Enemies are spawned separately by
    /// [`spawn_enemies`].
    pub fn from_plan(plan: &PlacementPlan, catalogs: &TileCatalogs) -> ScavengerResult<Self> {
        let ground = plan
            .ground
            .iter()
            .map(|tile| (tile.position, (tile.category, tile.variant)))
            .collect();

        let mut walls = HashMap::new();
        let mut pickups = Vec::new();
        for tile in &plan.objects {
            match tile.category {
                TileCategory::Wall => {
                    walls.insert(tile.position, tile.variant);
                }
                TileCategory::Food | TileCategory::Water | TileCategory::Loot => {
                    let catalog = catalogs.for_category(tile.category).ok_or_else(|| {
                        ScavengerError::InvalidState(format!("no catalog for {:?}", tile.category))
                    })?;
                    let variant = catalog.get(tile.variant).ok_or_else(|| {
                        ScavengerError::InvalidState(format!(
                            "{:?} variant {} out of range",
                            tile.category, tile.variant
                        ))
                    })?;
                    let kind = variant.pickup.ok_or_else(|| {
                        ScavengerError::InvalidState(format!(
                            "variant '{}' is not a pickup",
                            variant.name
                        ))
                    })?;
                    pickups.push(Pickup::new(kind, &variant.name, tile.position));
                }
                TileCategory::Enemy | TileCategory::Exit => {}
                TileCategory::Floor | TileCategory::OuterWall => {
                    return Err(ScavengerError::InvalidState(format!(
                        "ground tile {:?} listed among objects",
                        tile.category
                    )));
                }
            }
        }

        let exit = plan.exit_position().ok_or_else(|| {
            ScavengerError::InvalidState(format!("level {} has no exit", plan.level))
        })?;

        Ok(Self {
            level: plan.level,
            width: plan.width,
            height: plan.height,
            ground,
            walls,
            pickups,
            exit,
        })
    }

    /// Whether a cell is solid: the outer ring, anything beyond it, or an inner wall.
    pub fn is_wall(&self, position: Position) -> bool {
        let inside = position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32;
        !inside || self.walls.contains_key(&position)
    }

    pub fn ground_tiles(&self) -> impl Iterator<Item = (Position, TileCategory, usize)> + '_ {
        self.ground
            .iter()
            .map(|(position, (category, variant))| (*position, *category, *variant))
    }

    pub fn walls(&self) -> impl Iterator<Item = (Position, usize)> + '_ {
        self.walls.iter().map(|(position, variant)| (*position, *variant))
    }

    /// Deactivates every active pickup at `position` and returns their kinds
    /// in drop order.
    pub fn take_pickups_at(&mut self, position: Position) -> Vec<PickupKind> {
        self.pickups
            .iter_mut()
            .filter(|pickup| pickup.active && pickup.position == position)
            .map(|pickup| {
                pickup.active = false;
                pickup.kind
            })
            .collect()
    }

    pub fn active_pickups(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.iter().filter(|pickup| pickup.active)
    }
}

/// Spawns one enemy per enemy placement in `plan`.
pub fn spawn_enemies(plan: &PlacementPlan, catalogs: &TileCatalogs) -> ScavengerResult<Vec<Enemy>> {
    plan.of_category(TileCategory::Enemy)
        .map(|tile| {
            let profile = catalogs
                .enemy
                .get(tile.variant)
                .and_then(|variant| variant.enemy.as_ref())
                .ok_or_else(|| {
                    ScavengerError::InvalidState(format!(
                        "enemy variant {} has no profile",
                        tile.variant
                    ))
                })?;
            Ok(Enemy::new(tile.variant, profile, tile.position))
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct Occupant {
    id: EntityId,
    kind: ObstacleKind,
    cell: Position,
}

/// Grid collision over the board's walls, the player and a snapshot of active
/// enemy cells.
///
/// A unit occupies the cell it is gliding toward, so two units never claim the
/// same destination.
#[derive(Debug, Clone)]
pub struct GridCollision<'a> {
    board: &'a Board,
    occupants: Vec<Occupant>,
}

impl<'a> GridCollision<'a> {
    pub fn capture(board: &'a Board, player: &Player, enemies: &[Enemy]) -> Self {
        let mut occupants = Vec::with_capacity(enemies.len() + 1);
        occupants.push(Occupant {
            id: player.id,
            kind: ObstacleKind::Player,
            cell: player.mover.occupied_cell(),
        });
        occupants.extend(enemies.iter().filter(|enemy| enemy.active).map(|enemy| Occupant {
            id: enemy.id,
            kind: ObstacleKind::Enemy,
            cell: enemy.mover.occupied_cell(),
        }));
        Self { board, occupants }
    }
}

impl CollisionBackend for GridCollision<'_> {
    fn segment_test(
        &self,
        _from: Position,
        to: Position,
        mask: LayerMask,
        ignore: Option<EntityId>,
    ) -> SegmentHit {
        if mask.contains(LayerMask::UNITS) {
            if let Some(occupant) = self
                .occupants
                .iter()
                .find(|occupant| occupant.cell == to && Some(occupant.id) != ignore)
            {
                return SegmentHit::unit(occupant.id);
            }
        }
        if mask.contains(LayerMask::WALLS) && self.board.is_wall(to) {
            return SegmentHit::wall();
        }
        SegmentHit::clear()
    }

    fn obstacle_kind(&self, entity: EntityId) -> Option<ObstacleKind> {
        self.occupants
            .iter()
            .find(|occupant| occupant.id == entity)
            .map(|occupant| occupant.kind)
    }
}
