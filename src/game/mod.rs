//! # Game Module
//!
//! Core game state management, board representation, and unit systems.
//!
//! This module contains the fundamental building blocks of Scavenger:
//! - Grid coordinates, continuous points and cardinal directions
//! - The board built from a generated placement plan
//! - Player and enemy units with their movement state
//! - The shared move-attempt protocol and the turn scheduler

pub mod entities;
pub mod events;
pub mod movement;
pub mod signals;
pub mod state;
pub mod turns;
pub mod world;

pub use entities::*;
pub use events::*;
pub use movement::*;
pub use signals::*;
pub use state::*;
pub use turns::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a cell coordinate on the board.
///
/// `y` grows upward, so the exit at `(width - 1, height - 1)` is the top-right
/// corner.
///
/// # Examples
///
/// ```
/// use scavenger::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.cardinal_adjacent_positions();
/// assert_eq!(adjacent.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use scavenger::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns only the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::all()
            .into_iter()
            .map(|direction| self.step(direction))
            .collect()
    }

    /// The neighbouring cell in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }

    /// The continuous point at the centre of this cell.
    pub fn to_point(self) -> Point {
        Point::new(self.x as f32, self.y as f32)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// A continuous position used while a unit glides between cells.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    pub fn sqr_distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Moves toward `target` by at most `max_delta`, never overshooting.
    ///
    /// # Examples
    ///
    /// ```
    /// use scavenger::Point;
    ///
    /// let start = Point::new(0.0, 0.0);
    /// assert_eq!(start.move_towards(Point::new(1.0, 0.0), 0.25), Point::new(0.25, 0.0));
    /// assert_eq!(start.move_towards(Point::new(1.0, 0.0), 5.0), Point::new(1.0, 0.0));
    /// ```
    pub fn move_towards(self, target: Point, max_delta: f32) -> Point {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance <= max_delta || distance == 0.0 {
            return target;
        }
        Point::new(
            self.x + dx / distance * max_delta,
            self.y + dy / distance * max_delta,
        )
    }

    /// The cell this point is closest to.
    pub fn to_position(self) -> Position {
        Position::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl std::ops::Add<Direction> for Point {
    type Output = Point;

    fn add(self, direction: Direction) -> Point {
        let delta = direction.to_delta();
        Point::new(self.x + delta.x as f32, self.y + delta.y as f32)
    }
}

/// Cardinal directions for movement. Units never move diagonally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use scavenger::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, 1));
    /// assert_eq!(Direction::Left.to_delta(), Position::new(-1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, 1),
            Direction::Down => Position::new(0, -1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta doesn't correspond to a cardinal step.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Builds a direction from raw input axes.
    ///
    /// Horizontal input wins whenever both axes are held.
    ///
    /// # Examples
    ///
    /// ```
    /// use scavenger::Direction;
    ///
    /// assert_eq!(Direction::from_axes(1, 1), Some(Direction::Right));
    /// assert_eq!(Direction::from_axes(0, -1), Some(Direction::Down));
    /// assert_eq!(Direction::from_axes(0, 0), None);
    /// ```
    pub fn from_axes(horizontal: i32, vertical: i32) -> Option<Direction> {
        let horizontal = horizontal.signum();
        let vertical = if horizontal != 0 { 0 } else { vertical.signum() };
        Direction::from_delta(Position::new(horizontal, vertical))
    }

    /// Returns all 4 directions.
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}
