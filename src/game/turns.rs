//! # Turn Scheduling
//!
//! Decides whose turn it is and sequences the enemy phase.
//!
//! Waiting is modelled as explicit state advanced by [`TurnScheduler::tick`]:
//! the enemy phase is a small state machine over a roster snapshot, and one-shot
//! timers live in [`DelayedActions`]. Leftover frame time carries over from one
//! stage to the next, so a single large tick resolves the same way as many
//! small ones.

use crate::{EntityId, Position, TurnSettings};
use serde::{Deserialize, Serialize};

/// Phases of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// A level is being shown; nobody may act
    SetupPhase,
    /// Waiting for directional input
    PlayerTurn,
    /// Enemies are being moved one after another
    EnemyPhase,
}

/// One-shot actions fired after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayedAction {
    HideLevelOverlay,
    RestartLevel,
    DropLoot { at: Position },
}

#[derive(Debug, Clone, PartialEq)]
struct PendingAction {
    action: DelayedAction,
    remaining: f32,
}

/// Timers for delayed one-shot actions.
///
/// Arming an action that is already pending has no effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DelayedActions {
    pending: Vec<PendingAction>,
}

impl DelayedActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `action` to fire after `delay` seconds. Returns `false` if an equal
    /// action was already pending.
    pub fn arm(&mut self, action: DelayedAction, delay: f32) -> bool {
        if self.is_pending(&action) {
            log::debug!("{:?} already pending, ignoring", action);
            return false;
        }
        self.pending.push(PendingAction {
            action,
            remaining: delay,
        });
        true
    }

    pub fn is_pending(&self, action: &DelayedAction) -> bool {
        self.pending.iter().any(|pending| pending.action == *action)
    }

    /// Advances every timer and returns the actions that came due, in the order
    /// they were armed.
    pub fn tick(&mut self, dt: f32) -> Vec<DelayedAction> {
        let mut fired = Vec::new();
        self.pending.retain_mut(|pending| {
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                fired.push(pending.action);
                false
            } else {
                true
            }
        });
        fired
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// What a scheduler tick asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// A delayed action came due
    Delayed(DelayedAction),
    /// The given enemy should take its turn now
    EnemyTurn(EntityId),
    /// Control has returned to the player
    PlayerTurnStarted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PhaseStage {
    InitialDelay(f32),
    EmptyRosterDelay(f32),
    Dispatch(usize),
    UnitDelay { index: usize, remaining: f32 },
    Finished,
}

/// A running enemy phase over a snapshot of the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyPhase {
    roster: Vec<EntityId>,
    stage: PhaseStage,
    turn_delay: f32,
}

impl EnemyPhase {
    pub fn new(roster: Vec<EntityId>, turn_delay: f32) -> Self {
        Self {
            roster,
            stage: PhaseStage::InitialDelay(turn_delay),
            turn_delay,
        }
    }

    /// Advances the phase by `dt` seconds.
    ///
    /// `unit_delay` returns how long to wait after an enemy's turn, or `None` to
    /// skip the enemy entirely (slain or unknown). Returns the enemies whose turn
    /// came up, in roster order.
    pub fn advance<F>(&mut self, dt: f32, mut unit_delay: F) -> Vec<EntityId>
    where
        F: FnMut(EntityId) -> Option<f32>,
    {
        let mut budget = dt;
        let mut turns = Vec::new();

        loop {
            self.stage = match self.stage {
                PhaseStage::InitialDelay(remaining) => {
                    if budget < remaining {
                        self.stage = PhaseStage::InitialDelay(remaining - budget);
                        break;
                    }
                    budget -= remaining;
                    if self.roster.is_empty() {
                        PhaseStage::EmptyRosterDelay(self.turn_delay)
                    } else {
                        PhaseStage::Dispatch(0)
                    }
                }
                PhaseStage::EmptyRosterDelay(remaining) => {
                    if budget < remaining {
                        self.stage = PhaseStage::EmptyRosterDelay(remaining - budget);
                        break;
                    }
                    budget -= remaining;
                    PhaseStage::Finished
                }
                PhaseStage::Dispatch(index) => match self.roster.get(index) {
                    None => PhaseStage::Finished,
                    Some(&id) => match unit_delay(id) {
                        Some(delay) => {
                            turns.push(id);
                            PhaseStage::UnitDelay {
                                index,
                                remaining: delay,
                            }
                        }
                        None => {
                            log::trace!("Skipping inactive enemy {}", id);
                            PhaseStage::Dispatch(index + 1)
                        }
                    },
                },
                PhaseStage::UnitDelay { index, remaining } => {
                    if budget < remaining {
                        self.stage = PhaseStage::UnitDelay {
                            index,
                            remaining: remaining - budget,
                        };
                        break;
                    }
                    budget -= remaining;
                    PhaseStage::Dispatch(index + 1)
                }
                PhaseStage::Finished => break,
            };
        }

        turns
    }

    pub fn is_finished(&self) -> bool {
        self.stage == PhaseStage::Finished
    }

    pub fn roster(&self) -> &[EntityId] {
        &self.roster
    }
}

/// Owns whose turn it is, the enemy roster and delayed actions.
#[derive(Debug, Clone)]
pub struct TurnScheduler {
    state: TurnState,
    roster: Vec<EntityId>,
    phase: Option<EnemyPhase>,
    delayed: DelayedActions,
    settings: TurnSettings,
    enabled: bool,
}

impl TurnScheduler {
    pub fn new(settings: TurnSettings) -> Self {
        Self {
            state: TurnState::SetupPhase,
            roster: Vec::new(),
            phase: None,
            delayed: DelayedActions::new(),
            settings,
            enabled: true,
        }
    }

    /// Enters the setup phase for a new level.
    ///
    /// Clears the roster, abandons any enemy phase and pending actions, and
    /// arms the overlay hide that hands control to the player.
    pub fn begin_setup(&mut self, level: u32) {
        log::debug!("Setting up day {}", level);
        self.state = TurnState::SetupPhase;
        self.roster.clear();
        self.phase = None;
        self.delayed.cancel_all();
        self.delayed
            .arm(DelayedAction::HideLevelOverlay, self.settings.level_start_delay);
    }

    /// Appends an enemy to the roster.
    pub fn register_enemy(&mut self, id: EntityId) {
        self.roster.push(id);
    }

    pub fn roster(&self) -> &[EntityId] {
        &self.roster
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the scheduler currently accepts a player move.
    pub fn is_player_turn(&self) -> bool {
        self.enabled && self.state == TurnState::PlayerTurn
    }

    /// Ends the player's turn and starts the enemy phase on a roster snapshot.
    ///
    /// Has no effect outside the player's turn.
    pub fn consume_player_turn(&mut self) -> bool {
        if !self.is_player_turn() {
            return false;
        }
        self.state = TurnState::EnemyPhase;
        self.phase = Some(EnemyPhase::new(
            self.roster.clone(),
            self.settings.turn_delay,
        ));
        true
    }

    /// Arms a delayed action. See [`DelayedActions::arm`].
    pub fn arm(&mut self, action: DelayedAction, delay: f32) -> bool {
        self.delayed.arm(action, delay)
    }

    pub fn delayed(&self) -> &DelayedActions {
        &self.delayed
    }

    /// Stops all further scheduling.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.phase = None;
        self.delayed.cancel_all();
    }

    /// Re-enables a disabled scheduler, ready for a fresh setup.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Advances timers and the enemy phase by `dt` seconds.
    pub fn tick<F>(&mut self, dt: f32, unit_delay: F) -> Vec<SchedulerEvent>
    where
        F: FnMut(EntityId) -> Option<f32>,
    {
        if !self.enabled {
            return Vec::new();
        }

        let mut events = Vec::new();
        for action in self.delayed.tick(dt) {
            if action == DelayedAction::HideLevelOverlay && self.state == TurnState::SetupPhase {
                self.state = TurnState::PlayerTurn;
            }
            events.push(SchedulerEvent::Delayed(action));
        }

        if let Some(phase) = self.phase.as_mut() {
            let turns = phase.advance(dt, unit_delay);
            events.extend(turns.into_iter().map(SchedulerEvent::EnemyTurn));
            if phase.is_finished() {
                self.phase = None;
                self.state = TurnState::PlayerTurn;
                events.push(SchedulerEvent::PlayerTurnStarted);
            }
        }

        events
    }
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new(TurnSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_entity_id;

    fn settings() -> TurnSettings {
        TurnSettings {
            level_start_delay: 1.0,
            turn_delay: 0.5,
            restart_level_delay: 1.0,
            loot_delay: 0.25,
        }
    }

    fn ready_scheduler() -> TurnScheduler {
        let mut scheduler = TurnScheduler::new(settings());
        scheduler.begin_setup(1);
        scheduler.tick(1.0, |_| None);
        scheduler
    }

    #[test]
    fn test_setup_hands_control_to_player_after_delay() {
        let mut scheduler = TurnScheduler::new(settings());
        scheduler.begin_setup(1);
        assert_eq!(scheduler.state(), TurnState::SetupPhase);
        assert!(!scheduler.is_player_turn());

        assert!(scheduler.tick(0.5, |_| None).is_empty());
        assert!(!scheduler.consume_player_turn());

        let events = scheduler.tick(0.5, |_| None);
        assert_eq!(
            events,
            vec![SchedulerEvent::Delayed(DelayedAction::HideLevelOverlay)]
        );
        assert_eq!(scheduler.state(), TurnState::PlayerTurn);
    }

    #[test]
    fn test_empty_roster_waits_two_turn_delays() {
        let mut scheduler = ready_scheduler();
        assert!(scheduler.consume_player_turn());
        assert_eq!(scheduler.state(), TurnState::EnemyPhase);

        assert!(scheduler.tick(0.5, |_| None).is_empty());
        assert_eq!(scheduler.state(), TurnState::EnemyPhase);

        let events = scheduler.tick(0.5, |_| None);
        assert_eq!(events, vec![SchedulerEvent::PlayerTurnStarted]);
        assert_eq!(scheduler.state(), TurnState::PlayerTurn);
    }

    #[test]
    fn test_enemies_take_turns_in_roster_order_with_unit_delays() {
        let mut scheduler = ready_scheduler();
        let first = new_entity_id();
        let second = new_entity_id();
        scheduler.register_enemy(first);
        scheduler.register_enemy(second);
        scheduler.consume_player_turn();

        let delay = |_: EntityId| Some(0.25_f32);
        assert!(scheduler.tick(0.25, delay).is_empty());
        assert_eq!(
            scheduler.tick(0.25, delay),
            vec![SchedulerEvent::EnemyTurn(first)]
        );
        assert_eq!(
            scheduler.tick(0.25, delay),
            vec![SchedulerEvent::EnemyTurn(second)]
        );
        assert_eq!(
            scheduler.tick(0.25, delay),
            vec![SchedulerEvent::PlayerTurnStarted]
        );
    }

    #[test]
    fn test_large_tick_carries_leftover_time() {
        let mut scheduler = ready_scheduler();
        let first = new_entity_id();
        let second = new_entity_id();
        scheduler.register_enemy(first);
        scheduler.register_enemy(second);
        scheduler.consume_player_turn();

        let events = scheduler.tick(2.0, |_| Some(0.25));
        assert_eq!(
            events,
            vec![
                SchedulerEvent::EnemyTurn(first),
                SchedulerEvent::EnemyTurn(second),
                SchedulerEvent::PlayerTurnStarted,
            ]
        );
    }

    #[test]
    fn test_inactive_enemies_are_skipped_without_waiting() {
        let mut scheduler = ready_scheduler();
        let dead = new_entity_id();
        let alive = new_entity_id();
        scheduler.register_enemy(dead);
        scheduler.register_enemy(alive);
        scheduler.consume_player_turn();

        let delay = move |id: EntityId| if id == dead { None } else { Some(0.25_f32) };
        assert_eq!(
            scheduler.tick(0.5, delay),
            vec![SchedulerEvent::EnemyTurn(alive)]
        );
        assert_eq!(
            scheduler.tick(0.25, delay),
            vec![SchedulerEvent::PlayerTurnStarted]
        );
    }

    #[test]
    fn test_roster_snapshot_is_taken_at_phase_start() {
        let mut scheduler = ready_scheduler();
        let early = new_entity_id();
        scheduler.register_enemy(early);
        scheduler.consume_player_turn();
        scheduler.register_enemy(new_entity_id());

        let events = scheduler.tick(5.0, |_| Some(0.25));
        assert_eq!(
            events,
            vec![
                SchedulerEvent::EnemyTurn(early),
                SchedulerEvent::PlayerTurnStarted
            ]
        );
        assert_eq!(scheduler.roster().len(), 2);
    }

    #[test]
    fn test_begin_setup_clears_roster_and_pending_work() {
        let mut scheduler = ready_scheduler();
        scheduler.register_enemy(new_entity_id());
        scheduler.arm(DelayedAction::DropLoot { at: Position::new(2, 2) }, 0.25);
        scheduler.consume_player_turn();

        scheduler.begin_setup(2);
        assert!(scheduler.roster().is_empty());
        assert_eq!(scheduler.state(), TurnState::SetupPhase);
        assert_eq!(scheduler.delayed().len(), 1);
        assert!(scheduler
            .delayed()
            .is_pending(&DelayedAction::HideLevelOverlay));
    }

    #[test]
    fn test_delayed_actions_are_armed_once() {
        let mut delayed = DelayedActions::new();
        assert!(delayed.arm(DelayedAction::RestartLevel, 1.0));
        assert!(!delayed.arm(DelayedAction::RestartLevel, 1.0));
        assert!(delayed.arm(DelayedAction::DropLoot { at: Position::new(1, 1) }, 0.5));
        assert!(delayed.arm(DelayedAction::DropLoot { at: Position::new(2, 1) }, 0.5));

        assert_eq!(
            delayed.tick(0.5),
            vec![
                DelayedAction::DropLoot { at: Position::new(1, 1) },
                DelayedAction::DropLoot { at: Position::new(2, 1) },
            ]
        );
        assert_eq!(delayed.tick(0.5), vec![DelayedAction::RestartLevel]);
        assert!(delayed.is_empty());
        assert!(delayed.arm(DelayedAction::RestartLevel, 1.0));
    }

    #[test]
    fn test_disabled_scheduler_ignores_ticks() {
        let mut scheduler = ready_scheduler();
        scheduler.register_enemy(new_entity_id());
        scheduler.consume_player_turn();
        scheduler.disable();

        assert!(scheduler.tick(10.0, |_| Some(0.1)).is_empty());
        assert!(!scheduler.is_player_turn());
        assert!(!scheduler.consume_player_turn());
    }
}
