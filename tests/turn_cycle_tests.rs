//! End-to-end turn cycles on a small empty board: walking to the exit, starving
//! and the deterministic replay of a seed.

use scavenger::{
    utils, CountRange, Direction, GameEvent, GameSettings, GameState, GenerationConfig, Generator,
    LevelGenerator, Position, ScavengerResult, TileCategory, TurnState,
};

/// 5x5 board with no walls, food or water, and timings that are exact in
/// binary floating point.
fn empty_board_settings(seed: u64) -> GameSettings {
    let mut settings = GameSettings::default();
    settings.generation = GenerationConfig {
        food_count: CountRange::fixed(0),
        ..GenerationConfig::for_testing(seed)
    };
    settings.player.move_time = 0.25;
    settings.turns.level_start_delay = 1.0;
    settings.turns.turn_delay = 0.5;
    settings.turns.restart_level_delay = 1.0;
    settings.turns.loot_delay = 0.25;
    settings
}

/// Ticks in quarter seconds until the player may act again.
fn wait_for_player(game: &mut GameState) -> ScavengerResult<Vec<GameEvent>> {
    let mut events = Vec::new();
    for _ in 0..100 {
        if game.player_can_act() {
            return Ok(events);
        }
        events.extend(game.tick(0.25)?);
    }
    panic!("player never got the turn back");
}

#[test]
fn test_walk_to_exit_starts_next_day() -> ScavengerResult<()> {
    let mut game = GameState::new(empty_board_settings(3))?;
    game.take_events();
    wait_for_player(&mut game)?;
    assert_eq!(game.board.exit, Position::new(4, 4));

    let path = [
        Direction::Right,
        Direction::Right,
        Direction::Right,
        Direction::Right,
        Direction::Up,
        Direction::Up,
        Direction::Up,
    ];
    for direction in path {
        game.handle_input(direction)?;
        wait_for_player(&mut game)?;
    }
    assert_eq!(game.player.cell(), Position::new(4, 3));

    // The last step lands on the exit
    game.handle_input(Direction::Up)?;
    let events = wait_for_player(&mut game)?;

    let exit_index = events
        .iter()
        .position(|event| *event == GameEvent::ExitReached { level: 1 })
        .expect("exit reached");
    let day_index = events
        .iter()
        .position(|event| *event == GameEvent::LevelStarted { level: 2 })
        .expect("next day started");
    assert!(exit_index < day_index);
    assert!(events.contains(&GameEvent::OverlayShown {
        text: "Day 2".to_string()
    }));

    // Position resets, supplies carry over
    assert_eq!(game.level, 2);
    assert_eq!(game.player.cell(), Position::origin());
    assert_eq!(game.player.stats.water, 200 - 8 * 2);
    assert_eq!(game.player.stats.food, 200 - 8 * 2);
    assert_eq!(game.player.stats.health, 100);
    assert_eq!(game.enemies.len(), 1);
    assert_eq!(game.statistics.steps_taken, 8);
    assert_eq!(game.statistics.days_survived, 2);
    Ok(())
}

#[test]
fn test_walking_while_parched_starves() -> ScavengerResult<()> {
    let mut game = GameState::new(empty_board_settings(3))?;
    wait_for_player(&mut game)?;

    game.player.stats.water = 0;
    game.player.stats.health = 4;

    game.handle_input(Direction::Right)?;
    wait_for_player(&mut game)?;
    assert_eq!(game.player.stats.health, 2);
    assert!(!game.is_game_ended());

    let events = game.handle_input(Direction::Right)?;
    assert!(events.contains(&GameEvent::MusicStopped));
    assert!(events.contains(&GameEvent::GameOver { days: 1 }));
    assert!(game.is_game_ended());
    assert_eq!(game.overlay_text(), Some("After 1 days, you starved."));

    // Nothing moves once the game is over
    assert!(game.tick(5.0)?.iter().all(|event| !event.is_terminal()));
    assert!(game.handle_input(Direction::Up)?.is_empty());
    assert!(!game.player_can_act());
    Ok(())
}

#[test]
fn test_enemy_phase_returns_turn_without_enemies() -> ScavengerResult<()> {
    let mut game = GameState::new(empty_board_settings(3))?;
    wait_for_player(&mut game)?;

    game.handle_input(Direction::Up)?;
    assert_eq!(game.turn_state(), TurnState::EnemyPhase);

    // One move plus the doubled wait of an empty roster
    let mut elapsed = 0.0;
    while !game.player_can_act() {
        game.tick(0.25)?;
        elapsed += 0.25;
        assert!(elapsed <= 2.0, "enemy phase did not finish");
    }
    assert_eq!(game.turn_state(), TurnState::PlayerTurn);
    assert_eq!(game.player.cell(), Position::new(0, 1));
    Ok(())
}

#[test]
fn test_same_seed_replays_the_same_days() -> ScavengerResult<()> {
    let settings = GameSettings::default();
    let mut first = GameState::new(settings.clone())?;
    let mut second = GameState::new(settings.clone())?;
    assert_eq!(first.plan(), second.plan());

    for day in 2..=4 {
        first.setup_scene(day)?;
        second.setup_scene(day)?;
        assert_eq!(first.plan(), second.plan());
    }

    // The session plan matches a direct generator run for the same day
    let config = &settings.generation;
    let mut rng = utils::create_level_rng(config, 4);
    let direct = LevelGenerator::new().generate(4, config, &mut rng)?;
    assert_eq!(first.plan(), &direct);
    assert_eq!(direct.count(TileCategory::Enemy), 2);
    Ok(())
}
