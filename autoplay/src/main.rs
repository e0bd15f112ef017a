//! Headless runner: plays the built-in levels with a simple bot.
//!
//! Usage: `autoplay [CONFIG.json] [--ticks N]`
//!
//! Set `RUST_LOG=debug` to see mode changes and level loads.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use platformer::{
    Entity, FixedStep, FrameView, Game, GameMode, InputMap, InputSnapshot, InputState, KeyCode,
    LevelCatalog, Presenter, ProgressState, SimConfig, Tag, Vec2,
};
use serde::Serialize;

const DEFAULT_TICKS: u64 = 60 * 120;
/// Host frame times fed to the fixed-step clock, cycled.
const FRAME_TIMES_MS: [u64; 3] = [16, 17, 17];

/// Play the built-in levels headlessly and print a JSON summary.
#[derive(Parser)]
#[command(name = "autoplay")]
struct Cli {
    /// JSON file overriding simulation tuning values
    config: Option<PathBuf>,

    /// Stop after this many simulation ticks
    #[arg(long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = SimConfig::from_json_str(&text)
        .with_context(|| format!("invalid config in {}", path.display()))?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

/// Logs cues as they happen and keeps a tally.
#[derive(Default, Serialize)]
struct LogFeedback {
    jumps: u32,
    coins: u32,
    stomps: u32,
}

impl platformer::Feedback for LogFeedback {
    fn on_jump(&mut self) {
        self.jumps += 1;
        log::trace!("cue: jump");
    }

    fn on_coin_collected(&mut self) {
        self.coins += 1;
        log::info!("cue: coin ({} so far)", self.coins);
    }

    fn on_enemy_defeated(&mut self) {
        self.stomps += 1;
        log::info!("cue: enemy defeated");
    }
}

/// Prints overlay text whenever the mode changes.
#[derive(Default)]
struct LogPresenter {
    shown: Option<GameMode>,
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &FrameView) {
        if self.shown == Some(frame.mode) {
            return;
        }
        self.shown = Some(frame.mode);
        log::debug!("[{}] {}", frame.mode, frame.hud.lines().collect::<Vec<_>>().join(" | "));
        if let Some(overlay) = &frame.overlay {
            for line in overlay.lines() {
                log::info!("  {line}");
            }
        }
    }
}

/// Drives the game through the same key path a windowed host would use.
struct Bot {
    keys: InputState,
    map: InputMap,
}

impl Bot {
    fn new() -> Self {
        Self {
            keys: InputState::new(),
            map: InputMap::default(),
        }
    }

    fn hold(&mut self, key: KeyCode, down: bool) {
        if down {
            self.keys.press(key);
        } else {
            self.keys.release(key);
        }
    }

    fn tap(&mut self, key: KeyCode) {
        self.keys.release(key);
        self.keys.press(key);
    }

    /// Decide this tick's keys and return the resulting snapshot.
    fn think(&mut self, game: &Game) -> InputSnapshot {
        self.keys.release(KeyCode::Space);
        let mut left = false;
        let mut right = false;

        match game.mode() {
            GameMode::Playing { .. } => {
                if let Some(player) = game.world().player() {
                    let plan = plan_move(game, player);
                    left = plan.dx < -4.0;
                    right = plan.dx > 4.0;
                    if plan.jump {
                        self.tap(KeyCode::Space);
                    }
                }
            }
            GameMode::LevelComplete { .. } => self.tap(KeyCode::Space),
            GameMode::GameOver | GameMode::GameComplete => {}
        }

        self.hold(KeyCode::ArrowLeft, left);
        self.hold(KeyCode::ArrowRight, right);
        let snapshot = self.keys.snapshot(&self.map);
        self.keys.begin_frame();
        snapshot
    }
}

struct Plan {
    dx: f32,
    jump: bool,
}

/// Head for the nearest coin; hop when it is overhead or an enemy is close.
fn plan_move(game: &Game, player: &Entity) -> Plan {
    let me = player.bounds();
    let centre = me.center();
    let grounded = player.player().is_some_and(|body| body.grounded);

    let target = game
        .world()
        .query_by_tag(Tag::Coin)
        .map(|coin| coin.bounds().center())
        .min_by(|a, b| (*a - centre).length().total_cmp(&(*b - centre).length()));

    let dx = target.map_or(0.0, |t: Vec2| t.x - centre.x);
    let coin_above = target.is_some_and(|t| t.y < me.y - 8.0 && dx.abs() < 120.0);
    let enemy_close = game.world().query_by_tag(Tag::Enemy).any(|enemy| {
        let bounds = enemy.bounds();
        let ahead = bounds.center().x - centre.x;
        ahead.abs() < 64.0 && ahead.signum() == dx.signum() && bounds.bottom() > me.y
    });

    Plan {
        dx,
        jump: grounded && (coin_above || enemy_close),
    }
}

#[derive(Serialize)]
struct Summary {
    ticks: u64,
    simulated_secs: f32,
    mode: GameMode,
    progress: ProgressState,
    cues: LogFeedback,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let mut game =
        Game::new(config, LevelCatalog::builtin()).context("failed to start the game")?;

    let mut clock = FixedStep::default();
    let mut bot = Bot::new();
    let mut feedback = LogFeedback::default();
    let mut presenter = LogPresenter::default();
    let mut ticks = 0;

    game.present(&mut presenter);
    'run: for frame in 0.. {
        clock.accumulate(Duration::from_millis(FRAME_TIMES_MS[frame % FRAME_TIMES_MS.len()]));
        while clock.should_step() {
            let input = bot.think(&game);
            let report = game.tick(clock.step_secs(), &input, &mut feedback);
            ticks += 1;

            if let Some(change) = report.mode_change {
                log::info!("tick {ticks}: {} -> {}", change.from, change.to);
            }
            game.present(&mut presenter);

            let finished = matches!(game.mode(), GameMode::GameOver | GameMode::GameComplete);
            if finished || ticks >= cli.ticks {
                break 'run;
            }
        }
    }

    let summary = Summary {
        ticks,
        simulated_secs: clock.elapsed().as_secs_f32(),
        mode: game.mode(),
        progress: *game.progress(),
        cues: feedback,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
