//! # Movement
//!
//! The move-attempt protocol shared by the player and enemies.
//!
//! A move attempt probes the neighbouring cell through a [`CollisionBackend`]. An
//! empty cell starts a smooth glide on the unit's [`UnitMover`]; a struck obstacle
//! of the kind the unit reacts to produces a reaction for the caller to apply;
//! anything else simply blocks the move.

use crate::{Direction, EntityId, ObstacleKind, Point, Position, ScavengerError, ScavengerResult};
use serde::{Deserialize, Serialize};

/// Collision layers a probe can strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    /// Outer and inner walls
    pub const WALLS: LayerMask = LayerMask(1);
    /// Player and enemy units
    pub const UNITS: LayerMask = LayerMask(1 << 1);
    /// The layer every moving unit is blocked by
    pub const BLOCKING: LayerMask = LayerMask(1 | 1 << 1);

    pub fn contains(self, other: LayerMask) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

/// Outcome of a segment test against the collision world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentHit {
    /// Whether anything on the mask was struck
    pub struck: bool,
    /// The unit struck, if it was a unit rather than a wall
    pub entity: Option<EntityId>,
}

impl SegmentHit {
    pub fn clear() -> Self {
        Self::default()
    }

    pub fn wall() -> Self {
        Self {
            struck: true,
            entity: None,
        }
    }

    pub fn unit(entity: EntityId) -> Self {
        Self {
            struck: true,
            entity: Some(entity),
        }
    }
}

/// The collision world movement is tested against.
pub trait CollisionBackend {
    /// Tests the segment `from → to` against everything on `mask`, ignoring the
    /// unit `ignore` (the unit doing the probing).
    fn segment_test(
        &self,
        from: Position,
        to: Position,
        mask: LayerMask,
        ignore: Option<EntityId>,
    ) -> SegmentHit;

    /// Classifies a struck unit. Inactive or unknown units have no kind.
    fn obstacle_kind(&self, entity: EntityId) -> Option<ObstacleKind>;
}

/// Result of probing one step ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    pub hit_something: bool,
    pub hit_entity: Option<EntityId>,
}

/// One-cell lookahead against a blocking mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementProbe {
    pub mask: LayerMask,
}

impl MovementProbe {
    pub fn new(mask: LayerMask) -> Self {
        Self { mask }
    }

    /// Casts the unit segment from `origin` toward `direction`.
    pub fn probe<B: CollisionBackend + ?Sized>(
        &self,
        backend: &B,
        prober: EntityId,
        origin: Position,
        direction: Direction,
    ) -> ProbeResult {
        let hit = backend.segment_test(origin, origin.step(direction), self.mask, Some(prober));
        ProbeResult {
            hit_something: hit.struck,
            hit_entity: hit.entity,
        }
    }
}

impl Default for MovementProbe {
    fn default() -> Self {
        Self::new(LayerMask::BLOCKING)
    }
}

/// Smooth cell-to-cell movement for a single unit.
///
/// The unit glides at `1 / move_time` cells per second and snaps onto the target
/// cell once close enough. The settled cell only changes on arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMover {
    cell: Position,
    point: Point,
    target: Option<Position>,
    move_time: f32,
}

impl UnitMover {
    pub fn new(cell: Position, move_time: f32) -> Self {
        Self {
            cell,
            point: cell.to_point(),
            target: None,
            move_time,
        }
    }

    /// Starts gliding toward `destination`.
    ///
    /// Fails if a move is already under way.
    pub fn begin_move(&mut self, destination: Position) -> ScavengerResult<()> {
        if let Some(target) = self.target {
            return Err(ScavengerError::InvalidAction(format!(
                "unit at {:?} is still moving to {:?}",
                self.cell, target
            )));
        }
        self.target = Some(destination);
        Ok(())
    }

    /// Advances the glide by `dt` seconds. Returns `true` on the tick the unit
    /// arrives.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let goal = target.to_point();
        self.point = self.point.move_towards(goal, dt.max(0.0) / self.move_time);
        if self.point.sqr_distance(goal) <= f32::EPSILON {
            self.point = goal;
            self.cell = target;
            self.target = None;
            return true;
        }
        false
    }

    /// Puts the unit on `cell` immediately, abandoning any glide.
    pub fn place(&mut self, cell: Position) {
        self.cell = cell;
        self.point = cell.to_point();
        self.target = None;
    }

    /// The cell the unit last settled on.
    pub fn cell(&self) -> Position {
        self.cell
    }

    /// The cell the unit is occupying or has reserved by moving toward it.
    pub fn occupied_cell(&self) -> Position {
        self.target.unwrap_or(self.cell)
    }

    /// Current continuous position, for drawing.
    pub fn point(&self) -> Point {
        self.point
    }

    pub fn destination(&self) -> Option<Position> {
        self.target
    }

    pub fn is_moving(&self) -> bool {
        self.target.is_some()
    }

    pub fn move_time(&self) -> f32 {
        self.move_time
    }
}

/// What a move attempt decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDecision {
    /// The path was clear; the unit is now gliding from `from` to `to`
    Advance { from: Position, to: Position },
    /// Struck an obstacle the unit reacts to
    React {
        target: EntityId,
        kind: ObstacleKind,
    },
    /// Struck something else, or the unit is inactive
    Blocked { entity: Option<EntityId> },
}

impl MoveDecision {
    pub fn succeeded(&self) -> bool {
        matches!(self, MoveDecision::Advance { .. })
    }
}

/// The shared "attempt move" protocol.
pub struct MoveArbiter;

impl MoveArbiter {
    /// Attempts to move a unit one cell in `direction`.
    ///
    /// On success the unit's mover has already started its glide. A reaction is
    /// reported at most once per attempt and applying it is left to the caller.
    #[allow(clippy::too_many_arguments)]
    pub fn attempt_move<B: CollisionBackend + ?Sized>(
        backend: &B,
        probe: &MovementProbe,
        entity_id: EntityId,
        mover: &mut UnitMover,
        active: bool,
        direction: Direction,
        reacts_to: ObstacleKind,
    ) -> ScavengerResult<MoveDecision> {
        if mover.is_moving() {
            log::warn!("Move attempted by {} while it is still moving", entity_id);
            return Err(ScavengerError::InvalidAction(
                "a move is already in progress".to_string(),
            ));
        }

        let from = mover.cell();
        let hit = probe.probe(backend, entity_id, from, direction);

        if !hit.hit_something {
            if !active {
                return Ok(MoveDecision::Blocked { entity: None });
            }
            let to = from.step(direction);
            mover.begin_move(to)?;
            log::trace!("{} advancing {:?} -> {:?}", entity_id, from, to);
            return Ok(MoveDecision::Advance { from, to });
        }

        if let Some(target) = hit.hit_entity {
            if active && backend.obstacle_kind(target) == Some(reacts_to) {
                return Ok(MoveDecision::React {
                    target,
                    kind: reacts_to,
                });
            }
        }

        Ok(MoveDecision::Blocked {
            entity: hit.hit_entity,
        })
    }
}

/// Greedy chase heuristic: step vertically when already in the target's column,
/// otherwise step horizontally toward it.
///
/// # Examples
///
/// ```
/// use scavenger::{decide_direction, Direction, Point};
///
/// let enemy = Point::new(3.0, 3.0);
/// assert_eq!(decide_direction(enemy, Point::new(3.0, 0.0)), Direction::Down);
/// assert_eq!(decide_direction(enemy, Point::new(5.0, 9.0)), Direction::Right);
/// ```
pub fn decide_direction(enemy: Point, target: Point) -> Direction {
    if (target.x - enemy.x).abs() < f32::EPSILON {
        if target.y > enemy.y {
            Direction::Up
        } else {
            Direction::Down
        }
    } else if target.x > enemy.x {
        Direction::Right
    } else {
        Direction::Left
    }
}
