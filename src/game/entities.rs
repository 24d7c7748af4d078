//! # Entities
//!
//! The player, enemies and pickups living on the board, plus running session
//! statistics.

use crate::{
    new_entity_id, EnemyProfile, EntityId, GameEvent, PickupKind, PlayerSettings, Point,
    Position, UnitMover,
};
use serde::{Deserialize, Serialize};

/// Health lost per step once water has run out.
pub const THIRST_DAMAGE: i32 = 2;
/// Health lost per step once food has run out.
pub const HUNGER_DAMAGE: i32 = 1;
/// Health regained per step while fed and watered.
pub const STEP_REGENERATION: i32 = 1;

/// Classification of units a move probe can strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Player,
    Enemy,
}

/// Snapshot of the player's survival stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: i32,
    pub water: i32,
    pub food: i32,
}

impl PlayerStats {
    pub fn hud_event(&self) -> GameEvent {
        GameEvent::HudUpdated {
            health: self.health,
            water: self.water,
            food: self.food,
        }
    }
}

/// The player-controlled scavenger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub mover: UnitMover,
    pub stats: PlayerStats,
    max: PlayerStats,
    /// Cleared once the exit is reached or the player starves
    pub active: bool,
}

impl Player {
    pub fn new(settings: &PlayerSettings, cell: Position) -> Self {
        Self {
            id: new_entity_id(),
            mover: UnitMover::new(cell, settings.move_time),
            stats: PlayerStats {
                health: settings.start_health,
                water: settings.start_water,
                food: settings.start_food,
            },
            max: PlayerStats {
                health: settings.max_health,
                water: settings.max_water,
                food: settings.max_food,
            },
            active: true,
        }
    }

    pub fn cell(&self) -> Position {
        self.mover.cell()
    }

    pub fn point(&self) -> Point {
        self.mover.point()
    }

    /// Upper bounds the stats are clamped to.
    pub fn max_stats(&self) -> PlayerStats {
        self.max
    }

    /// Applies the water and food cost of one step.
    ///
    /// Thirst is checked before hunger and only one of them hurts per step.
    /// A fed and watered player regenerates instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use scavenger::{Player, PlayerSettings, Position};
    ///
    /// let mut player = Player::new(&PlayerSettings::default(), Position::origin());
    /// player.stats.health = 50;
    /// player.pay_step_cost(2);
    /// assert_eq!(player.stats.health, 51);
    /// assert_eq!(player.stats.water, 198);
    /// assert_eq!(player.stats.food, 198);
    /// ```
    pub fn pay_step_cost(&mut self, cost: i32) {
        let stats = &mut self.stats;
        stats.water -= cost;
        stats.food -= cost;

        if stats.water <= 0 {
            stats.water = 0;
            stats.health -= THIRST_DAMAGE;
        } else if stats.food <= 0 {
            stats.food = 0;
            stats.health -= HUNGER_DAMAGE;
        } else {
            stats.health += STEP_REGENERATION;
        }
        self.clamp();
    }

    /// Restores the stat a pickup feeds. Returns the stat's new value.
    pub fn consume(&mut self, kind: PickupKind, amount: i32) -> i32 {
        if kind.is_food() {
            self.stats.food += amount;
        } else {
            self.stats.water += amount;
        }
        self.clamp();
        if kind.is_food() {
            self.stats.food
        } else {
            self.stats.water
        }
    }

    pub fn lose_health(&mut self, loss: i32) {
        self.stats.health -= loss;
    }

    pub fn is_dead(&self) -> bool {
        self.stats.health <= 0
    }

    fn clamp(&mut self) {
        self.stats.health = self.stats.health.min(self.max.health);
        self.stats.water = self.stats.water.min(self.max.water);
        self.stats.food = self.stats.food.min(self.max.food);
    }
}

/// A hostile unit chasing the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    /// Index into the enemy catalog
    pub variant: usize,
    pub mover: UnitMover,
    pub hp: i32,
    pub player_damage: i32,
    /// Set after every move so the next turn is skipped
    pub skip_move: bool,
    /// Cleared when slain; slain enemies stay in the roster
    pub active: bool,
}

impl Enemy {
    pub fn new(variant: usize, profile: &EnemyProfile, cell: Position) -> Self {
        Self {
            id: new_entity_id(),
            variant,
            mover: UnitMover::new(cell, profile.move_time),
            hp: profile.hp,
            player_damage: profile.player_damage,
            skip_move: false,
            active: true,
        }
    }

    pub fn cell(&self) -> Position {
        self.mover.cell()
    }

    pub fn point(&self) -> Point {
        self.mover.point()
    }

    /// Advances the half-speed cadence. Returns whether this turn is a moving
    /// turn.
    ///
    /// # Examples
    ///
    /// ```
    /// use scavenger::{Enemy, EnemyProfile, Position};
    ///
    /// let profile = EnemyProfile { hp: 10, player_damage: 5, move_time: 0.1 };
    /// let mut enemy = Enemy::new(0, &profile, Position::new(3, 3));
    /// assert!(enemy.take_cadence_turn());
    /// assert!(!enemy.take_cadence_turn());
    /// assert!(enemy.take_cadence_turn());
    /// ```
    pub fn take_cadence_turn(&mut self) -> bool {
        if self.skip_move {
            self.skip_move = false;
            return false;
        }
        self.skip_move = true;
        true
    }

    /// Subtracts `loss` from the enemy's health and deactivates it once the
    /// health reaches zero. Returns the remaining health.
    pub fn apply_damage(&mut self, loss: i32) -> i32 {
        self.hp -= loss;
        if self.hp <= 0 {
            self.active = false;
        }
        self.hp
    }
}

/// A consumable lying on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: EntityId,
    pub kind: PickupKind,
    /// Catalog variant name used for drawing
    pub name: String,
    pub position: Position,
    pub active: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, name: &str, position: Position) -> Self {
        Self {
            id: new_entity_id(),
            kind,
            name: name.to_string(),
            position,
            active: true,
        }
    }
}

/// Game statistics tracking player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Successful player steps
    pub steps_taken: u64,
    /// Number of enemies defeated
    pub enemies_defeated: u32,
    /// Number of pickups consumed
    pub items_collected: u32,
    /// Total damage dealt to enemies
    pub damage_dealt: u64,
    /// Total damage taken from enemies
    pub damage_taken: u64,
    /// Highest day reached
    pub days_survived: u32,
}

impl GameStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent, player: EntityId) {
        match event {
            GameEvent::EntityMoved { entity_id, .. } if *entity_id == player => {
                self.steps_taken += 1;
            }
            GameEvent::EnemyDamaged { damage, .. } => {
                self.damage_dealt += *damage as u64;
            }
            GameEvent::EnemyDefeated { .. } => {
                self.enemies_defeated += 1;
            }
            GameEvent::PlayerDamaged { damage, .. } => {
                self.damage_taken += *damage as u64;
            }
            GameEvent::ItemPickedUp { .. } => {
                self.items_collected += 1;
            }
            GameEvent::LevelStarted { level } => {
                self.days_survived = self.days_survived.max(*level);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&PlayerSettings::default(), Position::origin())
    }

    #[test]
    fn test_step_cost_regenerates_when_supplied() {
        let mut player = player();
        player.pay_step_cost(2);
        // Health is already at its maximum
        assert_eq!(player.stats, PlayerStats { health: 100, water: 198, food: 198 });
    }

    #[test]
    fn test_thirst_hurts_before_hunger() {
        let mut player = player();
        player.stats.water = 1;
        player.stats.food = 1;
        player.pay_step_cost(2);
        assert_eq!(player.stats.water, 0);
        // Food is not clamped when thirst already applied
        assert_eq!(player.stats.food, -1);
        assert_eq!(player.stats.health, 98);
    }

    #[test]
    fn test_hunger_hurts_when_watered() {
        let mut player = player();
        player.stats.food = 2;
        player.pay_step_cost(2);
        assert_eq!(player.stats.food, 0);
        assert_eq!(player.stats.water, 198);
        assert_eq!(player.stats.health, 99);
    }

    #[test]
    fn test_consume_clamps_to_maximum() {
        let mut player = player();
        player.stats.food = 190;
        assert_eq!(player.consume(PickupKind::Sirloin, 40), 200);

        player.stats.water = 100;
        assert_eq!(player.consume(PickupKind::Soda, 15), 115);
        assert_eq!(player.stats.food, 200);
    }

    #[test]
    fn test_player_death() {
        let mut player = player();
        player.lose_health(99);
        assert!(!player.is_dead());
        player.lose_health(1);
        assert!(player.is_dead());
    }

    #[test]
    fn test_enemy_cadence_alternates() {
        let profile = EnemyProfile {
            hp: 20,
            player_damage: 10,
            move_time: 0.1,
        };
        let mut enemy = Enemy::new(0, &profile, Position::new(2, 2));
        let moves: Vec<bool> = (0..6).map(|_| enemy.take_cadence_turn()).collect();
        assert_eq!(moves, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn test_enemy_deactivates_at_zero_hp() {
        let profile = EnemyProfile {
            hp: 40,
            player_damage: 10,
            move_time: 0.1,
        };
        let mut enemy = Enemy::new(0, &profile, Position::new(2, 2));
        assert_eq!(enemy.apply_damage(20), 20);
        assert!(enemy.active);
        assert_eq!(enemy.apply_damage(20), 0);
        assert!(!enemy.active);
    }

    #[test]
    fn test_statistics_track_events() {
        let player = new_entity_id();
        let mut stats = GameStatistics::new();
        stats.update_from_event(
            &GameEvent::EntityMoved {
                entity_id: player,
                from: Position::origin(),
                to: Position::new(1, 0),
            },
            player,
        );
        stats.update_from_event(
            &GameEvent::EntityMoved {
                entity_id: new_entity_id(),
                from: Position::origin(),
                to: Position::new(1, 0),
            },
            player,
        );
        stats.update_from_event(&GameEvent::LevelStarted { level: 3 }, player);
        stats.update_from_event(
            &GameEvent::PlayerDamaged {
                attacker: new_entity_id(),
                damage: 10,
            },
            player,
        );

        assert_eq!(stats.steps_taken, 1);
        assert_eq!(stats.days_survived, 3);
        assert_eq!(stats.damage_taken, 10);
    }
}
