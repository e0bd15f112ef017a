use serde::{Deserialize, Serialize};

use crate::camera::{update_camera_follow, Camera2D, CameraFollow};
use crate::collision::{self, CollisionEvent};
use crate::engine::SimConfig;
use crate::enemy;
use crate::error::GameError;
use crate::feedback::Feedback;
use crate::hud::{EntityView, FrameView, HudLayer, Presenter};
use crate::input::{Action, InputSnapshot};
use crate::levels::LevelCatalog;
use crate::math::Vec2;
use crate::physics;
use crate::progress::{self, Outcome, ProgressState};
use crate::state::{GameMode, ModeChange, Transition, Trigger};
use crate::world::World;

/// Result of one tick, for logging and replay.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Collision events resolved this tick, in detection order.
    pub events: Vec<CollisionEvent>,
    pub jumped: bool,
    pub mode_change: Option<ModeChange>,
}

/// A level-complete transition waiting out its presentation delay.
#[derive(Clone, Copy, Debug)]
struct PendingTransition {
    transition: Transition,
    remaining: f32,
}

/// Owner of all mutable game state and the single entry point, [`Game::tick`].
///
/// Modes and transitions follow [`GameMode::transition`]. Entering
/// `Playing(n)` loads level `n` into the entity store; if the catalog has no
/// level `n` the game is complete instead.
pub struct Game {
    config: SimConfig,
    catalog: LevelCatalog,
    world: World,
    progress: ProgressState,
    mode: GameMode,
    pending: Option<PendingTransition>,
    camera: Camera2D,
    camera_follow: CameraFollow,
}

impl Game {
    /// Validate the config and catalog, then start playing level 1.
    pub fn new(config: SimConfig, catalog: LevelCatalog) -> Result<Self, GameError> {
        config.validate()?;
        catalog.validate()?;

        let mut game = Self {
            config,
            catalog,
            world: World::new(),
            progress: ProgressState::new(),
            mode: GameMode::default(),
            pending: None,
            camera: Camera2D::default(),
            camera_follow: CameraFollow::new(),
        };
        game.enter_level(1);
        Ok(game)
    }

    /// The built-in levels with default tuning.
    pub fn builtin() -> Result<Self, GameError> {
        Self::new(SimConfig::default(), LevelCatalog::builtin())
    }

    /// Replace the camera follow behaviour.
    #[must_use]
    pub fn with_camera_follow(mut self, follow: CameraFollow) -> Self {
        self.camera_follow = follow;
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> Camera2D {
        self.camera
    }

    /// True while a cleared level waits out its presentation delay.
    pub fn level_clear_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Advance the simulation by `dt` seconds using this tick's input.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        feedback: &mut dyn Feedback,
    ) -> TickReport {
        let dt = self.clamp_delta(dt);
        let mut report = TickReport::default();
        let before = self.mode;

        match self.mode {
            GameMode::Playing { .. } => self.tick_playing(dt, input, feedback, &mut report),
            _ => {
                let trigger = if input.was_pressed(Action::Restart) {
                    Some(Trigger::Restart)
                } else if input.was_pressed(Action::Advance) {
                    Some(Trigger::Advance)
                } else {
                    None
                };
                if let Some(trigger) = trigger {
                    self.fire(trigger);
                }
            }
        }

        if self.mode != before {
            log::debug!("mode {} -> {}", before, self.mode);
            report.mode_change = Some(ModeChange {
                from: before,
                to: self.mode,
            });
        }
        report
    }

    /// Build the presentation data for the current state.
    pub fn frame(&self) -> FrameView {
        let entities = if self.mode.is_playing() {
            self.world.iter().map(EntityView::from).collect()
        } else {
            Vec::new()
        };
        let viewport = Vec2::new(self.config.world_width, self.config.world_height);

        FrameView {
            mode: self.mode,
            entities,
            progress: self.progress,
            hud: HudLayer::counters(&self.progress),
            overlay: HudLayer::overlay(self.mode, &self.progress, viewport),
            camera: self.camera,
        }
    }

    /// Hand the current frame to `presenter`.
    pub fn present(&self, presenter: &mut dyn Presenter) {
        presenter.present(&self.frame());
    }

    fn clamp_delta(&self, dt: f32) -> f32 {
        if !(dt >= 0.0) {
            log::warn!("ignoring invalid tick delta {dt}");
            return 0.0;
        }
        if dt > self.config.max_tick_delta {
            log::warn!(
                "tick delta {dt:.3}s capped to {:.3}s",
                self.config.max_tick_delta
            );
            return self.config.max_tick_delta;
        }
        dt
    }

    fn tick_playing(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        feedback: &mut dyn Feedback,
        report: &mut TickReport,
    ) {
        let integration = physics::integrate_player(&mut self.world, input, &self.config, dt);
        if integration.jumped {
            report.jumped = true;
            feedback.on_jump();
        }
        enemy::patrol(&mut self.world, &self.config, dt);

        let events = collision::resolve(&mut self.world, &self.config);
        for event in &events {
            match event {
                CollisionEvent::CoinCollected { .. } => feedback.on_coin_collected(),
                CollisionEvent::EnemyDefeated { .. } => feedback.on_enemy_defeated(),
                CollisionEvent::PlayerDamaged { .. } => {}
            }
        }
        let outcome = progress::apply_events(&mut self.progress, &events);
        report.events = events;

        if let Some(mut pending) = self.pending.take() {
            // The level is already won: stomps still score, hits are ignored.
            if outcome == Some(Outcome::PlayerDefeated) {
                log::trace!("hit ignored while level {} completes", self.progress.current_level());
            }
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                self.apply(pending.transition);
            } else {
                self.pending = Some(pending);
            }
        } else {
            match outcome {
                Some(Outcome::LevelCleared) => self.fire(Trigger::LevelCleared),
                Some(Outcome::PlayerDefeated) => self.fire(Trigger::PlayerDefeated),
                None => {}
            }
        }

        if self.mode.is_playing() {
            if let Some(player) = self.world.player() {
                let target = player.bounds().center();
                update_camera_follow(&mut self.camera, &self.camera_follow, target, dt);
            }
        }
    }

    fn fire(&mut self, trigger: Trigger) {
        let Some(transition) = self.mode.transition(trigger, &self.progress) else {
            log::trace!("{trigger:?} ignored in {}", self.mode);
            return;
        };

        match transition {
            Transition::CompleteLevel { .. } if self.config.level_complete_delay > 0.0 => {
                log::debug!(
                    "level {} cleared, completing in {:.2}s",
                    self.progress.current_level(),
                    self.config.level_complete_delay
                );
                self.pending = Some(PendingTransition {
                    transition,
                    remaining: self.config.level_complete_delay,
                });
            }
            _ => self.apply(transition),
        }
    }

    fn apply(&mut self, transition: Transition) {
        self.pending = None;
        match transition {
            Transition::Play { level, reset } => {
                if reset {
                    self.progress.reset();
                }
                self.enter_level(level);
            }
            Transition::CompleteLevel { level } => {
                self.progress.advance_level();
                self.mode = GameMode::LevelComplete { level };
                log::info!(
                    "level {level} complete, score {}",
                    self.progress.score()
                );
            }
            Transition::GameOver => {
                self.mode = GameMode::GameOver;
                log::info!("game over, final score {}", self.progress.score());
            }
        }
    }

    fn enter_level(&mut self, level: u32) {
        match self.catalog.lookup(level) {
            Ok(definition) => {
                self.world.load_level(definition, &self.config);
                self.progress.begin_level(definition.coins.len() as u32);
                self.mode = GameMode::Playing { level };
                if let Some(player) = self.world.player() {
                    self.camera.position = player.bounds().center();
                }
                log::debug!("entered level {level}");
            }
            Err(not_found) => {
                log::debug!("{not_found}, all levels finished");
                self.world.clear();
                self.mode = GameMode::GameComplete;
                log::info!("game complete, final score {}", self.progress.score());
            }
        }
    }
}
