//! # Game State Module
//!
//! Central game state management and coordination between all game systems.
//!
//! [`GameState`] owns one play session: the current board, the player and
//! enemies, the turn scheduler and the sound manager. The host feeds it
//! directional input and frame time; every call returns the [`GameEvent`]s
//! produced along the way.

use crate::{
    day_overlay_text, decide_direction, game_over_text, spawn_enemies, utils, AnimationTrigger,
    AudioClip, Board, DelayedAction, Direction, Enemy, EntityId, GameEvent, GameSettings,
    GameStatistics, Generator, GridCollision, LevelGenerator, MoveArbiter, MoveDecision,
    MovementProbe, ObstacleKind, Pickup, PickupKind, PlacementPlan, Player, Position,
    ScavengerError, ScavengerResult, SchedulerEvent, SoundManager, TurnScheduler, TurnState,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Salt separating the gameplay random stream from level generation.
const GAMEPLAY_SEED_SALT: u64 = 0x5CA7_E46E_D0_5EED;

/// Game completion state for handling endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCompletionState {
    /// Game is still in progress
    Playing,
    /// Player's health ran out
    Starved,
}

/// Central game state for one play session.
///
/// This is the main coordination point for all game operations. It generates
/// levels, routes player input through the move protocol, runs the enemy phase
/// and applies the survival rules.
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: GameSettings,
    /// Current day, starting at 1
    pub level: u32,
    pub board: Board,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub scheduler: TurnScheduler,
    pub sounds: SoundManager,
    /// Game statistics for player progress
    pub statistics: GameStatistics,
    pub completion_state: GameCompletionState,
    generator: LevelGenerator,
    probe: MovementProbe,
    plan: PlacementPlan,
    overlay: Option<String>,
    rng: StdRng,
    outbox: Vec<GameEvent>,
}

impl GameState {
    /// Creates a session and sets up day 1.
    ///
    /// The setup events are returned by the first call to [`GameState::tick`]
    /// (or any other event-returning call).
    ///
    /// # Examples
    ///
    /// ```
    /// use scavenger::{GameSettings, GameState, TurnState};
    ///
    /// let game = GameState::new(GameSettings::default()).unwrap();
    /// assert_eq!(game.level, 1);
    /// assert_eq!(game.turn_state(), TurnState::SetupPhase);
    /// assert_eq!(game.overlay_text(), Some("Day 1"));
    /// ```
    pub fn new(settings: GameSettings) -> ScavengerResult<Self> {
        Self::starting_at(settings, 1)
    }

    /// Creates a session starting on an arbitrary day.
    pub fn starting_at(settings: GameSettings, level: u32) -> ScavengerResult<Self> {
        settings.validate()?;
        if level == 0 {
            return Err(ScavengerError::InvalidConfig(
                "days are numbered from 1".to_string(),
            ));
        }

        let generator = LevelGenerator::new();
        let (plan, board, enemies) = Self::build_level(&settings, &generator, level)?;
        let seed = settings.generation.seed;

        let mut state = Self {
            player: Player::new(&settings.player, Position::origin()),
            scheduler: TurnScheduler::new(settings.turns.clone()),
            sounds: SoundManager::new(&settings.audio),
            statistics: GameStatistics::new(),
            completion_state: GameCompletionState::Playing,
            generator,
            probe: MovementProbe::default(),
            plan: plan.clone(),
            overlay: None,
            rng: StdRng::seed_from_u64(seed ^ GAMEPLAY_SEED_SALT),
            outbox: Vec::new(),
            level,
            board: board.clone(),
            enemies: Vec::new(),
            settings,
        };
        state.enter_level(level, plan, board, enemies);
        Ok(state)
    }

    /// Generates and populates the given day, entering the setup phase.
    pub fn setup_scene(&mut self, level: u32) -> ScavengerResult<Vec<GameEvent>> {
        let (plan, board, enemies) = Self::build_level(&self.settings, &self.generator, level)?;
        self.enter_level(level, plan, board, enemies);
        Ok(self.take_events())
    }

    /// Handles one directional input from the player.
    ///
    /// Input is ignored unless it is the player's turn, the player is standing
    /// still and still in play. A successful move and a blocked one both end
    /// the turn.
    pub fn handle_input(&mut self, direction: Direction) -> ScavengerResult<Vec<GameEvent>> {
        if !self.player_can_act() {
            log::trace!("Ignoring {:?} outside the player's turn", direction);
            return Ok(self.take_events());
        }

        let collision = GridCollision::capture(&self.board, &self.player, &self.enemies);
        let decision = MoveArbiter::attempt_move(
            &collision,
            &self.probe,
            self.player.id,
            &mut self.player.mover,
            self.player.active,
            direction,
            ObstacleKind::Enemy,
        )?;
        log::debug!("Player {:?}: {:?}", direction, decision);

        match decision {
            MoveDecision::Advance { from, to } => {
                self.emit(GameEvent::EntityMoved {
                    entity_id: self.player.id,
                    from,
                    to,
                });
                self.random_sfx(&AudioClip::MOVE);
                self.player.pay_step_cost(self.settings.player.step_cost);
                self.emit(self.player.stats.hud_event());
                self.check_if_game_over();
            }
            MoveDecision::React { target, .. } => self.player_attacks(target)?,
            MoveDecision::Blocked { .. } => {}
        }

        self.scheduler.consume_player_turn();
        Ok(self.take_events())
    }

    /// Advances movement, timers and the enemy phase by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> ScavengerResult<Vec<GameEvent>> {
        if self.is_game_ended() {
            return Ok(self.take_events());
        }

        if self.player.mover.tick(dt) {
            self.emit(GameEvent::EntityArrived {
                entity_id: self.player.id,
                at: self.player.point(),
            });
            self.on_player_arrived(self.player.cell());
        }
        let mut arrivals = Vec::new();
        for enemy in &mut self.enemies {
            if enemy.mover.tick(dt) {
                arrivals.push(GameEvent::EntityArrived {
                    entity_id: enemy.id,
                    at: enemy.point(),
                });
            }
        }
        arrivals.into_iter().for_each(|event| self.emit(event));

        let enemies = &self.enemies;
        let scheduled = self.scheduler.tick(dt, |id| {
            enemies
                .iter()
                .find(|enemy| enemy.id == id && enemy.active)
                .map(|enemy| enemy.mover.move_time())
        });

        for event in scheduled {
            if self.is_game_ended() {
                break;
            }
            match event {
                SchedulerEvent::Delayed(DelayedAction::HideLevelOverlay) => {
                    self.overlay = None;
                    self.emit(GameEvent::OverlayHidden);
                }
                SchedulerEvent::Delayed(DelayedAction::RestartLevel) => {
                    let next = self.level + 1;
                    let (plan, board, enemies) =
                        Self::build_level(&self.settings, &self.generator, next)?;
                    self.enter_level(next, plan, board, enemies);
                    // The rest of the batch belongs to the previous day
                    break;
                }
                SchedulerEvent::Delayed(DelayedAction::DropLoot { at }) => self.drop_loot(at)?,
                SchedulerEvent::EnemyTurn(id) => self.enemy_turn(id),
                SchedulerEvent::PlayerTurnStarted => log::trace!("Player's turn"),
            }
        }

        Ok(self.take_events())
    }

    /// Whether directional input would currently be accepted.
    pub fn player_can_act(&self) -> bool {
        self.completion_state == GameCompletionState::Playing
            && self.scheduler.is_player_turn()
            && self.player.active
            && !self.player.mover.is_moving()
    }

    /// Places a new enemy on the current board and adds it to the roster.
    pub fn spawn_enemy_at(&mut self, variant: usize, cell: Position) -> ScavengerResult<EntityId> {
        let profile = self
            .settings
            .generation
            .catalogs
            .enemy
            .get(variant)
            .and_then(|variant| variant.enemy.as_ref())
            .ok_or_else(|| {
                ScavengerError::InvalidAction(format!("no enemy profile for variant {}", variant))
            })?;
        let enemy = Enemy::new(variant, profile, cell);
        let id = enemy.id;
        self.scheduler.register_enemy(id);
        self.enemies.push(enemy);
        Ok(id)
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    pub fn turn_state(&self) -> TurnState {
        self.scheduler.state()
    }

    /// Text of the full-screen overlay, if it is showing.
    pub fn overlay_text(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    /// The placement plan the current board was built from.
    pub fn plan(&self) -> &PlacementPlan {
        &self.plan
    }

    /// Checks if the game has ended.
    pub fn is_game_ended(&self) -> bool {
        self.completion_state != GameCompletionState::Playing
    }

    /// Returns events queued outside of an event-returning call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn build_level(
        settings: &GameSettings,
        generator: &LevelGenerator,
        level: u32,
    ) -> ScavengerResult<(PlacementPlan, Board, Vec<Enemy>)> {
        let config = &settings.generation;
        let mut rng = utils::create_level_rng(config, level);
        let plan = generator.generate(level, config, &mut rng)?;
        generator.validate(&plan, config)?;

        let board = Board::from_plan(&plan, &config.catalogs)?;
        let enemies = spawn_enemies(&plan, &config.catalogs)?;
        Ok((plan, board, enemies))
    }

    fn enter_level(&mut self, level: u32, plan: PlacementPlan, board: Board, enemies: Vec<Enemy>) {
        self.level = level;
        self.scheduler.begin_setup(level);

        let text = day_overlay_text(level);
        self.overlay = Some(text.clone());
        self.emit(GameEvent::OverlayShown { text });

        self.plan = plan;
        self.board = board;
        self.enemies = enemies;
        for enemy in &self.enemies {
            self.scheduler.register_enemy(enemy.id);
        }

        self.player.mover.place(Position::origin());
        self.player.active = true;

        log::info!(
            "Day {} ready with {} enemies and {} pickups",
            level,
            self.enemies.len(),
            self.board.pickups.len()
        );
        self.emit(GameEvent::LevelStarted { level });
        self.emit(self.player.stats.hud_event());
    }

    fn on_player_arrived(&mut self, cell: Position) {
        if cell == self.board.exit {
            log::info!("Exit reached on day {}", self.level);
            self.player.active = false;
            self.scheduler.arm(
                DelayedAction::RestartLevel,
                self.settings.turns.restart_level_delay,
            );
            self.emit(GameEvent::ExitReached { level: self.level });
            return;
        }

        self.collect_pickups(cell);
    }

    /// Consumes every active pickup on `cell`, in drop order.
    fn collect_pickups(&mut self, cell: Position) {
        for kind in self.board.take_pickups_at(cell) {
            let points = &self.settings.player;
            let amount = match kind {
                PickupKind::Food => points.food_points,
                PickupKind::Soda => points.soda_points,
                PickupKind::Sirloin => points.sirloin_points,
                PickupKind::Water => points.water_points,
            };
            self.player.consume(kind, amount);
            self.emit(GameEvent::ItemPickedUp {
                kind,
                amount,
                at: cell,
            });
            self.emit(self.player.stats.hud_event());
            if kind.is_food() {
                self.random_sfx(&AudioClip::EAT);
            } else {
                self.random_sfx(&AudioClip::DRINK);
            }
        }
    }

    fn player_attacks(&mut self, target: EntityId) -> ScavengerResult<()> {
        let damage = self.settings.player.damage;
        let enemy = self
            .enemies
            .iter_mut()
            .find(|enemy| enemy.id == target)
            .ok_or_else(|| ScavengerError::InvalidState(format!("unknown enemy {}", target)))?;

        let remaining = enemy.apply_damage(damage);
        let fallen_at = enemy.cell();
        // Loot lands under the attacker
        let at = self.player.cell();
        self.random_sfx(&AudioClip::CHOP);
        self.emit(GameEvent::EnemyDamaged {
            entity_id: target,
            damage,
            remaining,
        });
        self.emit(GameEvent::Animation {
            entity_id: self.player.id,
            trigger: AnimationTrigger::PlayerChop,
        });

        if remaining <= 0 {
            log::info!("Enemy {} defeated at {:?}", target, fallen_at);
            self.emit(GameEvent::EnemyDefeated {
                entity_id: target,
                at: fallen_at,
            });
            self.scheduler
                .arm(DelayedAction::DropLoot { at }, self.settings.turns.loot_delay);
        }
        Ok(())
    }

    fn enemy_turn(&mut self, id: EntityId) {
        let target = self.player.point();
        let collision = GridCollision::capture(&self.board, &self.player, &self.enemies);
        let Some(enemy) = self.enemies.iter_mut().find(|enemy| enemy.id == id) else {
            log::warn!("Enemy {} in roster but not on the board", id);
            return;
        };
        if !enemy.active || !enemy.take_cadence_turn() {
            return;
        }

        let direction = decide_direction(enemy.point(), target);
        let decision = match MoveArbiter::attempt_move(
            &collision,
            &self.probe,
            enemy.id,
            &mut enemy.mover,
            enemy.active,
            direction,
            ObstacleKind::Player,
        ) {
            Ok(decision) => decision,
            Err(err) => {
                log::warn!("Enemy {} could not act: {}", id, err);
                return;
            }
        };
        let damage = enemy.player_damage;

        match decision {
            MoveDecision::Advance { from, to } => {
                self.emit(GameEvent::EntityMoved {
                    entity_id: id,
                    from,
                    to,
                });
            }
            MoveDecision::React { .. } => {
                self.player.lose_health(damage);
                self.emit(GameEvent::Animation {
                    entity_id: self.player.id,
                    trigger: AnimationTrigger::PlayerHit,
                });
                self.emit(GameEvent::PlayerDamaged {
                    attacker: id,
                    damage,
                });
                self.emit(self.player.stats.hud_event());
                self.check_if_game_over();

                self.emit(GameEvent::Animation {
                    entity_id: id,
                    trigger: AnimationTrigger::EnemyAttack,
                });
                self.random_sfx(&AudioClip::ENEMY_ATTACK);
            }
            MoveDecision::Blocked { .. } => {}
        }
    }

    fn drop_loot(&mut self, at: Position) -> ScavengerResult<()> {
        let catalog = &self.settings.generation.catalogs.loot;
        let index = catalog.choose(&mut self.rng)?;
        let variant = catalog
            .get(index)
            .ok_or_else(|| ScavengerError::InvalidState(format!("loot variant {}", index)))?;
        let kind = variant.pickup.ok_or_else(|| {
            ScavengerError::InvalidState(format!("loot variant '{}' is not a pickup", variant.name))
        })?;

        self.board.pickups.push(Pickup::new(kind, &variant.name, at));
        self.emit(GameEvent::LootDropped { kind, at });

        if self.player.active && !self.player.mover.is_moving() && self.player.cell() == at {
            self.collect_pickups(at);
        }
        Ok(())
    }

    fn check_if_game_over(&mut self) {
        if !self.player.is_dead() || self.is_game_ended() {
            return;
        }

        log::info!("Player starved after {} days", self.level);
        let sound = self.sounds.play_single(AudioClip::GameOver);
        self.emit(sound);
        self.emit(GameEvent::MusicStopped);

        let text = game_over_text(self.level);
        self.overlay = Some(text.clone());
        self.emit(GameEvent::OverlayShown { text });
        self.emit(GameEvent::GameOver { days: self.level });

        self.scheduler.disable();
        self.player.active = false;
        self.completion_state = GameCompletionState::Starved;
    }

    fn random_sfx(&mut self, clips: &[AudioClip]) {
        if let Some(sound) = self.sounds.random_sfx(clips, &mut self.rng) {
            self.emit(sound);
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.statistics.update_from_event(&event, self.player.id);
        self.outbox.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CountRange, GenerationConfig};

    fn settings() -> GameSettings {
        let mut settings = GameSettings::default();
        settings.generation = GenerationConfig {
            food_count: CountRange::fixed(0),
            ..GenerationConfig::for_testing(17)
        };
        settings.player.move_time = 0.25;
        settings.turns.level_start_delay = 1.0;
        settings.turns.turn_delay = 0.5;
        settings.turns.restart_level_delay = 1.0;
        settings.turns.loot_delay = 0.25;
        settings
    }

    fn ready_game() -> GameState {
        let mut game = GameState::new(settings()).unwrap();
        game.tick(1.0).unwrap();
        assert!(game.player_can_act());
        game
    }

    #[test]
    fn test_new_game_emits_setup_events() {
        let mut game = GameState::new(settings()).unwrap();
        let events = game.take_events();

        assert_eq!(
            events[0],
            GameEvent::OverlayShown {
                text: "Day 1".to_string()
            }
        );
        assert!(events.contains(&GameEvent::LevelStarted { level: 1 }));
        assert!(events.contains(&GameEvent::HudUpdated {
            health: 100,
            water: 200,
            food: 200
        }));
        assert_eq!(game.player.cell(), Position::origin());
        assert!(!game.player_can_act());
    }

    #[test]
    fn test_input_is_ignored_during_setup() {
        let mut game = GameState::new(settings()).unwrap();
        game.take_events();
        assert!(game.handle_input(Direction::Right).unwrap().is_empty());
        assert!(!game.player.mover.is_moving());
    }

    #[test]
    fn test_overlay_hides_after_start_delay() {
        let mut game = GameState::new(settings()).unwrap();
        game.take_events();
        assert!(game.tick(0.5).unwrap().is_empty());
        assert_eq!(game.tick(0.5).unwrap(), vec![GameEvent::OverlayHidden]);
        assert_eq!(game.overlay_text(), None);
        assert_eq!(game.turn_state(), TurnState::PlayerTurn);
    }

    #[test]
    fn test_step_costs_supplies_and_ends_turn() {
        let mut game = ready_game();
        let events = game.handle_input(Direction::Right).unwrap();

        assert!(events.contains(&GameEvent::EntityMoved {
            entity_id: game.player.id,
            from: Position::new(0, 0),
            to: Position::new(1, 0),
        }));
        assert!(events
            .iter()
            .any(|event| matches!(event, GameEvent::Sound { clip, .. } if AudioClip::MOVE.contains(clip))));
        assert!(events.contains(&GameEvent::HudUpdated {
            health: 100,
            water: 198,
            food: 198
        }));
        assert_eq!(game.turn_state(), TurnState::EnemyPhase);
        assert!(!game.player_can_act());

        // Cell changes only once the glide completes
        assert_eq!(game.player.cell(), Position::new(0, 0));
        game.tick(1.0).unwrap();
        assert_eq!(game.player.cell(), Position::new(1, 0));
        assert_eq!(game.turn_state(), TurnState::PlayerTurn);
        assert_eq!(game.statistics.steps_taken, 1);
    }

    #[test]
    fn test_blocked_move_still_ends_turn() {
        let mut game = ready_game();
        let events = game.handle_input(Direction::Left).unwrap();
        assert!(events.is_empty());
        assert_eq!(game.turn_state(), TurnState::EnemyPhase);
        assert_eq!(game.player.stats.water, 200);
    }

    #[test]
    fn test_pickup_restores_stat_on_arrival() {
        let mut game = ready_game();
        game.board
            .pickups
            .push(Pickup::new(PickupKind::Soda, "soda", Position::new(0, 1)));
        game.player.stats.water = 100;

        game.handle_input(Direction::Up).unwrap();
        let events = game.tick(0.25).unwrap();

        assert!(events.contains(&GameEvent::ItemPickedUp {
            kind: PickupKind::Soda,
            amount: 15,
            at: Position::new(0, 1),
        }));
        assert_eq!(game.player.stats.water, 113);
        assert_eq!(game.board.active_pickups().count(), 0);
        assert_eq!(game.statistics.items_collected, 1);
    }

    #[test]
    fn test_exit_restarts_on_next_day_keeping_stats() {
        let mut game = ready_game();
        game.player.mover.place(Position::new(4, 3));

        game.handle_input(Direction::Up).unwrap();
        let events = game.tick(0.25).unwrap();
        assert!(events.contains(&GameEvent::ExitReached { level: 1 }));
        assert!(!game.player.active);
        let stats = game.player.stats;

        let events = game.tick(1.0).unwrap();
        assert!(events.contains(&GameEvent::LevelStarted { level: 2 }));
        assert_eq!(game.level, 2);
        assert_eq!(game.overlay_text(), Some("Day 2"));
        assert_eq!(game.turn_state(), TurnState::SetupPhase);
        assert_eq!(game.player.cell(), Position::origin());
        assert_eq!(game.player.stats, stats);
        assert_eq!(game.enemies.len(), 1);
        assert_eq!(game.scheduler.roster().len(), 1);
        assert_eq!(game.statistics.days_survived, 2);
    }

    #[test]
    fn test_starvation_ends_the_game() {
        let mut game = ready_game();
        game.player.stats.health = 2;
        game.player.stats.water = 1;

        let events = game.handle_input(Direction::Right).unwrap();
        assert!(events.contains(&GameEvent::GameOver { days: 1 }));
        assert!(events.contains(&GameEvent::MusicStopped));
        assert!(events.contains(&GameEvent::Sound {
            clip: AudioClip::GameOver,
            pitch: game.sounds.effects_pitch(),
        }));
        assert_eq!(game.overlay_text(), Some("After 1 days, you starved."));
        assert_eq!(game.completion_state, GameCompletionState::Starved);
        assert!(!game.scheduler.is_enabled());

        assert!(game.tick(5.0).unwrap().is_empty());
        assert!(game.handle_input(Direction::Up).unwrap().is_empty());
    }

    #[test]
    fn test_enemy_attacks_adjacent_player() {
        let mut game = ready_game();
        let enemy = game.spawn_enemy_at(0, Position::new(1, 0)).unwrap();

        // Bumping the outer wall ends the turn without moving
        game.handle_input(Direction::Down).unwrap();
        let events = game.tick(1.0).unwrap();

        assert!(events.contains(&GameEvent::PlayerDamaged {
            attacker: enemy,
            damage: 10
        }));
        assert!(events.contains(&GameEvent::Animation {
            entity_id: enemy,
            trigger: AnimationTrigger::EnemyAttack
        }));
        assert_eq!(game.player.stats.health, 90);
        assert!(game.enemy(enemy).unwrap().skip_move);
        assert_eq!(game.turn_state(), TurnState::PlayerTurn);

        // Next enemy phase is a skipped turn
        game.handle_input(Direction::Down).unwrap();
        game.tick(1.0).unwrap();
        assert_eq!(game.player.stats.health, 90);
    }

    #[test]
    fn test_enemy_chases_player() {
        let mut game = ready_game();
        let enemy = game.spawn_enemy_at(0, Position::new(3, 0)).unwrap();

        game.handle_input(Direction::Down).unwrap();
        let events = game.tick(1.0).unwrap();
        assert!(events.contains(&GameEvent::EntityMoved {
            entity_id: enemy,
            from: Position::new(3, 0),
            to: Position::new(2, 0),
        }));

        game.tick(0.25).unwrap();
        assert_eq!(game.enemy(enemy).unwrap().cell(), Position::new(2, 0));
    }

    #[test]
    fn test_player_kills_enemy_and_collects_loot() {
        let mut game = ready_game();
        let enemy = game.spawn_enemy_at(0, Position::new(1, 0)).unwrap();

        let events = game.handle_input(Direction::Right).unwrap();
        assert!(events.contains(&GameEvent::EnemyDamaged {
            entity_id: enemy,
            damage: 20,
            remaining: 20
        }));
        assert!(events.contains(&GameEvent::Animation {
            entity_id: game.player.id,
            trigger: AnimationTrigger::PlayerChop
        }));
        game.tick(1.0).unwrap();
        assert_eq!(game.player.stats.health, 90);

        let events = game.handle_input(Direction::Right).unwrap();
        assert!(events.contains(&GameEvent::EnemyDefeated {
            entity_id: enemy,
            at: Position::new(1, 0)
        }));
        assert!(!game.enemy(enemy).unwrap().active);

        let events = game.tick(0.25).unwrap();
        let dropped = events.iter().find_map(|event| match event {
            GameEvent::LootDropped { kind, at } => Some((*kind, *at)),
            _ => None,
        });
        let (kind, at) = dropped.expect("loot should drop");
        // Loot lands under the player, who picks it up straight away
        assert_eq!(at, Position::origin());
        assert!(matches!(kind, PickupKind::Sirloin | PickupKind::Water));
        assert!(events.contains(&GameEvent::ItemPickedUp {
            kind,
            amount: 40,
            at: Position::origin(),
        }));
        assert_eq!(game.board.active_pickups().count(), 0);
        assert_eq!(game.statistics.items_collected, 1);
        assert_eq!(game.statistics.enemies_defeated, 1);
    }

    #[test]
    fn test_all_pickups_on_a_cell_are_collected() {
        let mut game = ready_game();
        let cell = Position::new(1, 0);
        game.board.pickups.push(Pickup::new(PickupKind::Food, "food", cell));
        game.board.pickups.push(Pickup::new(PickupKind::Water, "water", cell));
        game.player.stats.food = 100;
        game.player.stats.water = 100;

        game.handle_input(Direction::Right).unwrap();
        let events = game.tick(0.25).unwrap();

        let picked = events
            .iter()
            .filter(|event| matches!(event, GameEvent::ItemPickedUp { .. }))
            .count();
        assert_eq!(picked, 2);
        assert_eq!(game.board.active_pickups().count(), 0);
        assert_eq!(game.player.stats.food, 98 + 10);
        assert_eq!(game.player.stats.water, 98 + 40);
    }

    #[test]
    fn test_restart_drops_enemy_turns_of_previous_day() {
        let mut game = ready_game();
        game.player.mover.place(Position::new(4, 3));
        let enemy = game.spawn_enemy_at(0, Position::new(1, 1)).unwrap();

        game.handle_input(Direction::Up).unwrap();
        let events = game.tick(0.25).unwrap();
        assert!(events.contains(&GameEvent::ExitReached { level: 1 }));

        // Restart and the pending enemy phase come due in the same tick
        let events = game.tick(5.0).unwrap();
        assert!(events.contains(&GameEvent::LevelStarted { level: 2 }));
        assert!(!events.iter().any(|event| matches!(
            event,
            GameEvent::EntityMoved { entity_id, .. } if *entity_id == enemy
        )));
        assert_eq!(game.level, 2);
        assert_eq!(game.turn_state(), TurnState::SetupPhase);
        assert_eq!(game.overlay_text(), Some("Day 2"));
        assert!(game.enemy(enemy).is_none());
    }

    #[test]
    fn test_setup_scene_rebuilds_level() {
        let mut game = ready_game();
        game.spawn_enemy_at(1, Position::new(2, 2)).unwrap();

        let events = game.setup_scene(4).unwrap();
        assert!(events.contains(&GameEvent::LevelStarted { level: 4 }));
        assert_eq!(game.enemies.len(), 2);
        assert_eq!(game.scheduler.roster().len(), 2);
        assert_eq!(game.plan().level, 4);
        assert!(!game.player_can_act());
    }

    #[test]
    fn test_level_zero_is_rejected() {
        assert!(GameState::starting_at(settings(), 0).is_err());
    }
}
