use platformer::{
    Action, CollisionEvent, CueLog, Direction, EnemySpawn, FrameView, Game, GameError, GameMode,
    InputSnapshot, LevelCatalog, LevelDefinition, ModeChange, Presenter, SimConfig, Tag, Vec2,
};

const DT: f32 = 1.0 / 60.0;
/// Centre height of a coin sitting on the ground, level with a standing player.
const GROUND_COIN_Y: f32 = 524.0;

fn level(coins: &[f32], enemies: &[(f32, f32, Direction)]) -> LevelDefinition {
    LevelDefinition {
        platforms: Vec::new(),
        coins: coins.iter().map(|&x| Vec2::new(x, GROUND_COIN_Y)).collect(),
        enemies: enemies
            .iter()
            .map(|&(x, y, direction)| EnemySpawn {
                position: Vec2::new(x, y),
                direction,
            })
            .collect(),
    }
}

fn new_game(levels: Vec<LevelDefinition>) -> Game {
    let config = SimConfig::default().with_level_complete_delay(0.0);
    Game::new(config, LevelCatalog::new(levels)).expect("valid levels")
}

fn hold(action: Action) -> InputSnapshot {
    InputSnapshot::new().with_held(action)
}

fn press(action: Action) -> InputSnapshot {
    InputSnapshot::new().with_pressed(action)
}

/// Let the freshly spawned player drop onto the ground before steering.
fn settle(game: &mut Game, log: &mut CueLog) {
    for _ in 0..40 {
        game.tick(DT, &InputSnapshot::new(), log);
    }
    assert!(game.world().player().and_then(|p| p.player()).is_some_and(|b| b.grounded));
}

/// Tick until `done` holds or `limit` ticks pass. Returns the ticks used.
fn run_until(
    game: &mut Game,
    input: &InputSnapshot,
    log: &mut CueLog,
    limit: usize,
    done: impl Fn(&Game) -> bool,
) -> Option<usize> {
    for tick in 0..limit {
        game.tick(DT, input, log);
        if done(game) {
            return Some(tick + 1);
        }
    }
    None
}

#[test]
fn collecting_every_coin_completes_the_level() {
    let mut game = new_game(vec![level(&[160.0, 220.0, 280.0], &[]), level(&[700.0], &[])]);
    let mut log = CueLog::new();
    settle(&mut game, &mut log);

    let ticks = run_until(&mut game, &hold(Action::MoveRight), &mut log, 600, |g| {
        !g.mode().is_playing()
    });

    assert!(ticks.is_some());
    assert_eq!(game.mode(), GameMode::LevelComplete { level: 1 });
    assert_eq!(game.progress().coins_collected(), 3);
    assert_eq!(game.progress().total_coins(), 3);
    assert_eq!(game.progress().score(), 30);
    assert_eq!(game.progress().current_level(), 2);
    assert_eq!(log.count(platformer::Cue::CoinCollected), 3);
}

/// Steer towards the first remaining coin, hopping whenever the player's
/// centre is below the coin's. Air jumps keep the player hovering at coin
/// height, well clear of the patrolling enemy below.
fn chase_coins(game: &Game) -> InputSnapshot {
    let mut input = InputSnapshot::new();
    let (Some(player), Some(coin)) = (
        game.world().player(),
        game.world().query_by_tag(Tag::Coin).next(),
    ) else {
        return input;
    };
    let me = player.bounds().center();
    let target = coin.bounds().center();

    if target.x - me.x > 2.0 {
        input = input.with_held(Action::MoveRight);
    } else if target.x - me.x < -2.0 {
        input = input.with_held(Action::MoveLeft);
    }
    if me.y > target.y {
        input = input.with_pressed(Action::Jump);
    }
    input
}

#[test]
fn builtin_first_level_can_be_cleared() {
    let mut game = Game::builtin().expect("builtin");
    let mut log = CueLog::new();

    for _ in 0..1_000 {
        let input = chase_coins(&game);
        game.tick(DT, &input, &mut log);
        if !game.mode().is_playing() {
            break;
        }
    }

    assert_eq!(game.mode(), GameMode::LevelComplete { level: 1 });
    assert_eq!(game.progress().score(), 30);
    assert_eq!(game.progress().coins_collected(), 3);
    assert_eq!(game.progress().current_level(), 2);
    assert_eq!(log.count(platformer::Cue::CoinCollected), 3);
}

#[test]
fn invalid_config_is_rejected_before_the_first_tick() {
    let config = SimConfig::default().with_max_tick_delta(-1.0);
    let result = Game::new(config, LevelCatalog::builtin());
    assert!(matches!(result, Err(GameError::Config(_))));
}

#[test]
fn side_hit_ends_the_run_whatever_the_score() {
    let mut game = new_game(vec![level(
        &[160.0, 700.0],
        &[(400.0, 516.0, Direction::Left)],
    )]);
    let mut log = CueLog::new();
    settle(&mut game, &mut log);

    run_until(&mut game, &hold(Action::MoveRight), &mut log, 600, |g| {
        !g.mode().is_playing()
    })
    .expect("run ended");

    assert_eq!(game.mode(), GameMode::GameOver);
    assert_eq!(game.progress().score(), 10);
    assert_eq!(game.world().count(Tag::Enemy), 1);
}

#[test]
fn falling_onto_an_enemy_stomps_it() {
    let mut game = new_game(vec![level(&[700.0], &[(104.0, 440.0, Direction::Left)])]);
    let mut log = CueLog::new();

    let mut stomped = false;
    for _ in 0..60 {
        let report = game.tick(DT, &InputSnapshot::new(), &mut log);
        stomped |= report
            .events
            .iter()
            .any(|e| matches!(e, CollisionEvent::EnemyDefeated { .. }));
    }

    assert!(stomped);
    assert_eq!(game.mode(), GameMode::Playing { level: 1 });
    assert_eq!(game.progress().score(), 20);
    assert_eq!(game.world().count(Tag::Enemy), 0);
    assert_eq!(log.count(platformer::Cue::EnemyDefeated), 1);
}

#[test]
fn advancing_past_the_last_level_completes_the_game() {
    let mut game = new_game(vec![
        level(&[140.0], &[]),
        level(&[140.0], &[]),
        level(&[140.0], &[]),
    ]);
    let mut log = CueLog::new();

    for n in 1..=3 {
        assert_eq!(game.mode(), GameMode::Playing { level: n });
        run_until(&mut game, &InputSnapshot::new(), &mut log, 120, |g| {
            !g.mode().is_playing()
        })
        .expect("level cleared");
        assert_eq!(game.mode(), GameMode::LevelComplete { level: n });
        game.tick(DT, &press(Action::Advance), &mut log);
    }

    assert_eq!(game.mode(), GameMode::GameComplete);
    assert_eq!(game.progress().score(), 30);
    assert!(game.world().is_empty());

    let overlay = game.frame().overlay.expect("overlay");
    assert!(overlay.lines().any(|l| l == "Congratulations!"));
}

#[test]
fn moving_left_from_near_the_edge_clamps_to_zero() {
    let config = SimConfig {
        player_spawn: Vec2::new(5.0, 200.0),
        ..SimConfig::default()
    }
    .with_max_tick_delta(1.0);
    let mut game = Game::new(config, LevelCatalog::new(vec![level(&[700.0], &[])])).expect("game");

    game.tick(1.0, &hold(Action::MoveLeft), &mut CueLog::new());

    let player = game.world().player().expect("player");
    assert_eq!(player.position.x, 0.0);
}

#[test]
fn restart_resets_from_every_terminal_mode() {
    // Game over.
    let mut game = new_game(vec![level(&[160.0, 700.0], &[(400.0, 516.0, Direction::Left)])]);
    let mut log = CueLog::new();
    settle(&mut game, &mut log);
    run_until(&mut game, &hold(Action::MoveRight), &mut log, 600, |g| {
        g.mode() == GameMode::GameOver
    })
    .expect("game over");
    game.tick(DT, &press(Action::Restart), &mut log);
    assert_eq!(game.mode(), GameMode::Playing { level: 1 });
    assert_eq!(game.progress().score(), 0);
    assert_eq!(game.progress().coins_collected(), 0);
    assert_eq!(game.world().count(Tag::Player), 1);

    // Level complete, after scoring on the way.
    let mut game = new_game(vec![level(&[140.0], &[]), level(&[700.0], &[])]);
    run_until(&mut game, &InputSnapshot::new(), &mut log, 120, |g| !g.mode().is_playing())
        .expect("cleared");
    let report = game.tick(DT, &press(Action::Restart), &mut log);
    assert_eq!(
        report.mode_change,
        Some(ModeChange {
            from: GameMode::LevelComplete { level: 1 },
            to: GameMode::Playing { level: 1 },
        })
    );
    assert_eq!(game.progress().score(), 0);
    assert_eq!(game.progress().current_level(), 1);

    // Game complete.
    let mut game = new_game(vec![level(&[140.0], &[])]);
    run_until(&mut game, &InputSnapshot::new(), &mut log, 120, |g| !g.mode().is_playing())
        .expect("cleared");
    game.tick(DT, &press(Action::Advance), &mut log);
    assert_eq!(game.mode(), GameMode::GameComplete);
    game.tick(DT, &press(Action::Restart), &mut log);
    assert_eq!(game.mode(), GameMode::Playing { level: 1 });
    assert_eq!(game.progress().score(), 0);
}

#[test]
fn restart_is_ignored_while_playing() {
    let mut game = Game::builtin().expect("builtin");
    let report = game.tick(DT, &press(Action::Restart), &mut CueLog::new());
    assert!(report.mode_change.is_none());
    assert_eq!(game.mode(), GameMode::Playing { level: 1 });
}

fn random_input(rng: &mut fastrand::Rng) -> InputSnapshot {
    let mut input = InputSnapshot::new();
    match rng.u8(0..3) {
        0 => input = input.with_held(Action::MoveLeft),
        1 => input = input.with_held(Action::MoveRight),
        _ => {}
    }
    if rng.u8(0..10) == 0 {
        input = input.with_pressed(Action::Jump);
    }
    if rng.u8(0..50) == 0 {
        input = input.with_pressed(Action::Advance);
    }
    if rng.u8(0..80) == 0 {
        input = input.with_pressed(Action::Restart);
    }
    input
}

#[test]
fn invariants_hold_under_random_input() {
    for seed in [1, 7, 42, 1234, 99_999] {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut game = Game::builtin().expect("builtin");
        let max_x = game.config().world_width - game.config().player_size.x;

        for _ in 0..5_000 {
            let before = *game.progress();
            let input = random_input(&mut rng);
            let report = game.tick(DT, &input, &mut ());
            let after = *game.progress();

            let coins = report
                .events
                .iter()
                .filter(|e| matches!(e, CollisionEvent::CoinCollected { .. }))
                .count() as u32;
            let stomps = report
                .events
                .iter()
                .filter(|e| matches!(e, CollisionEvent::EnemyDefeated { .. }))
                .count() as u32;

            let restarted = matches!(
                report.mode_change,
                Some(ModeChange { from, to: GameMode::Playing { level: 1 } }) if !from.is_playing()
            );
            let entered_level = matches!(
                report.mode_change,
                Some(ModeChange { to: GameMode::Playing { .. }, .. })
            );

            if restarted {
                assert_eq!(after.score(), 0, "seed {seed}");
                assert_eq!(after.current_level(), 1, "seed {seed}");
            } else {
                assert_eq!(after.score(), before.score() + 10 * coins + 20 * stomps, "seed {seed}");
            }

            if entered_level {
                assert_eq!(after.coins_collected(), 0, "seed {seed}");
            } else {
                assert_eq!(after.coins_collected(), before.coins_collected() + coins, "seed {seed}");
            }
            assert!(after.coins_collected() <= after.total_coins(), "seed {seed}");

            if game.mode().is_playing() {
                assert_eq!(game.world().count(Tag::Player), 1, "seed {seed}");
                let x = game.world().player().expect("player").position.x;
                assert!((0.0..=max_x).contains(&x), "seed {seed}: x = {x}");
            }
        }
    }
}

#[derive(Default)]
struct RecordingPresenter {
    frames: Vec<FrameView>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, frame: &FrameView) {
        self.frames.push(frame.clone());
    }
}

#[test]
fn presenter_sees_live_entities_and_counters() {
    let mut game = Game::builtin().expect("builtin");
    let mut presenter = RecordingPresenter::default();

    for _ in 0..3 {
        game.tick(DT, &InputSnapshot::new(), &mut ());
        game.present(&mut presenter);
    }

    assert_eq!(presenter.frames.len(), 3);
    let frame = &presenter.frames[2];
    assert_eq!(frame.mode, GameMode::Playing { level: 1 });
    // ground + 3 platforms + player + 1 enemy + 3 coins
    assert_eq!(frame.entities.len(), 9);
    assert_eq!(
        frame.hud.lines().collect::<Vec<_>>(),
        vec!["Score: 0", "Level: 1", "Coins: 0/3"]
    );
}
