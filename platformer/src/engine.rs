use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::Vec2;

/// Tuning values for the simulation. Defaults match the built-in levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// Height of the ground strip along the bottom of the viewport.
    pub ground_height: f32,
    pub gravity: f32,
    pub player_speed: f32,
    pub jump_force: f32,
    /// Ticks that must pass between two jumps.
    pub jump_cooldown_ticks: u32,
    /// A jump is refused while the player rises faster than this.
    pub max_rise_speed_for_jump: f32,
    pub player_size: Vec2,
    /// Player spawn point, measured up from the bottom of the world.
    pub player_spawn: Vec2,
    pub enemy_size: f32,
    pub enemy_speed: f32,
    pub coin_radius: f32,
    /// How far above an enemy's top edge the player's top edge must be to
    /// count as a stomp.
    pub stomp_margin: f32,
    /// Seconds between collecting the last coin and entering level-complete.
    pub level_complete_delay: f32,
    /// Larger tick deltas are capped to this many seconds.
    pub max_tick_delta: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            ground_height: 60.0,
            gravity: 800.0,
            player_speed: 200.0,
            jump_force: 400.0,
            jump_cooldown_ticks: 10,
            max_rise_speed_for_jump: 50.0,
            player_size: Vec2::new(32.0, 32.0),
            player_spawn: Vec2::new(100.0, 200.0),
            enemy_size: 24.0,
            enemy_speed: 50.0,
            coin_radius: 12.0,
            stomp_margin: 10.0,
            level_complete_delay: 0.5,
            max_tick_delta: 0.1,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Override the world size.
    #[must_use]
    pub fn with_world_size(mut self, width: f32, height: f32) -> Self {
        self.world_width = width;
        self.world_height = height;
        self
    }

    #[must_use]
    pub fn with_stomp_margin(mut self, margin: f32) -> Self {
        self.stomp_margin = margin;
        self
    }

    #[must_use]
    pub fn with_level_complete_delay(mut self, seconds: f32) -> Self {
        self.level_complete_delay = seconds;
        self
    }

    #[must_use]
    pub fn with_max_tick_delta(mut self, seconds: f32) -> Self {
        self.max_tick_delta = seconds;
        self
    }

    /// Top edge of the ground strip.
    pub fn ground_top(&self) -> f32 {
        self.world_height - self.ground_height
    }

    /// Top-left corner of a freshly spawned player.
    pub fn player_spawn_position(&self) -> Vec2 {
        Vec2::new(self.player_spawn.x, self.world_height - self.player_spawn.y)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("player_size.x", self.player_size.x),
            ("player_size.y", self.player_size.y),
            ("enemy_size", self.enemy_size),
            ("coin_radius", self.coin_radius),
            ("max_tick_delta", self.max_tick_delta),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }

        let non_negative = [
            ("ground_height", self.ground_height),
            ("gravity", self.gravity),
            ("player_speed", self.player_speed),
            ("jump_force", self.jump_force),
            ("enemy_speed", self.enemy_speed),
            ("stomp_margin", self.stomp_margin),
            ("level_complete_delay", self.level_complete_delay),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must not be negative, got {value}"),
                });
            }
        }

        if self.player_size.x > self.world_width || self.enemy_size > self.world_width {
            return Err(ConfigError::InvalidValue {
                field: "world_width",
                reason: "narrower than the player or an enemy".into(),
            });
        }
        if self.ground_height >= self.world_height {
            return Err(ConfigError::InvalidValue {
                field: "ground_height",
                reason: "leaves no room above the ground".into(),
            });
        }
        Ok(())
    }
}

/// Fixed-timestep accumulator for runners that receive variable frame times.
///
/// ```rust
/// # use platformer::engine::FixedStep;
/// # use std::time::Duration;
/// let mut clock = FixedStep::default();
/// clock.accumulate(Duration::from_millis(40));
/// let mut steps = 0;
/// while clock.should_step() {
///     steps += 1;
/// }
/// assert_eq!(steps, 2);
/// ```
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
    elapsed: Duration,
}

impl FixedStep {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    /// Add a frame's worth of real time.
    pub fn accumulate(&mut self, delta: Duration) {
        self.accumulator += delta;
        self.elapsed += delta;
    }

    /// Consume one step if enough time has accumulated. Call in a loop.
    pub fn should_step(&mut self) -> bool {
        if !self.step.is_zero() && self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn step_secs(&self) -> f32 {
        self.step.as_secs_f32()
    }

    /// Total time fed into the clock.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        // 60 ticks per second
        Self::new(Duration::from_nanos(16_666_667))
    }
}
