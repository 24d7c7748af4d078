//! # Game Events
//!
//! Everything the core wants the host to present: animations, sounds, HUD
//! refreshes, overlay changes and the game-over signal.
//!
//! Core calls never talk to a renderer or mixer directly. They return the events
//! produced during the call, in the order they happened.

use crate::{AnimationTrigger, AudioClip, EntityId, PickupKind, Point, Position};
use serde::{Deserialize, Serialize};

/// Events emitted by [`crate::GameState`] for the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new day has been generated and populated
    LevelStarted { level: u32 },

    /// The full-screen overlay should show `text`
    OverlayShown { text: String },

    /// The overlay should be hidden
    OverlayHidden,

    /// A unit started gliding toward a new cell
    EntityMoved {
        entity_id: EntityId,
        from: Position,
        to: Position,
    },

    /// A unit finished its move
    EntityArrived { entity_id: EntityId, at: Point },

    /// Fire an animation trigger on a unit
    Animation {
        entity_id: EntityId,
        trigger: AnimationTrigger,
    },

    /// Play a sound effect at the given pitch
    Sound { clip: AudioClip, pitch: f32 },

    /// Stop the background music
    MusicStopped,

    /// Player stats changed
    HudUpdated { health: i32, water: i32, food: i32 },

    /// The player chopped an enemy
    EnemyDamaged {
        entity_id: EntityId,
        damage: i32,
        remaining: i32,
    },

    /// An enemy's health dropped to zero
    EnemyDefeated { entity_id: EntityId, at: Position },

    /// An enemy hit the player
    PlayerDamaged { attacker: EntityId, damage: i32 },

    /// The player consumed a pickup
    ItemPickedUp {
        kind: PickupKind,
        amount: i32,
        at: Position,
    },

    /// A slain enemy left something behind
    LootDropped { kind: PickupKind, at: Position },

    /// The player stepped onto the exit
    ExitReached { level: u32 },

    /// The player starved; the session is over
    GameOver { days: u32 },
}

impl GameEvent {
    /// Whether this event ends the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. })
    }

    /// Short human-readable description for the message log.
    pub fn describe(&self) -> Option<String> {
        match self {
            GameEvent::LevelStarted { level } => Some(format!("Day {} begins.", level)),
            GameEvent::EnemyDamaged { damage, remaining, .. } => Some(format!(
                "You hit the enemy for {} ({} left).",
                damage, remaining
            )),
            GameEvent::EnemyDefeated { .. } => Some("The enemy falls.".to_string()),
            GameEvent::PlayerDamaged { damage, .. } => {
                Some(format!("-{} Health", damage))
            }
            GameEvent::ItemPickedUp { kind, amount, .. } => {
                let stat = if kind.is_food() { "Food" } else { "Water" };
                Some(format!("+{} {}", amount, stat))
            }
            GameEvent::LootDropped { kind, .. } => Some(format!("Something dropped: {:?}.", kind)),
            GameEvent::ExitReached { .. } => Some("You found the exit.".to_string()),
            GameEvent::GameOver { days } => Some(game_over_text(*days)),
            _ => None,
        }
    }
}

/// Overlay text shown while a level is being set up.
pub fn day_overlay_text(level: u32) -> String {
    format!("Day {}", level)
}

/// Overlay text shown once the player has starved.
///
/// # Examples
///
/// ```
/// use scavenger::game_over_text;
///
/// assert_eq!(game_over_text(3), "After 3 days, you starved.");
/// ```
pub fn game_over_text(days: u32) -> String {
    format!("After {} days, you starved.", days)
}
