//! Platformer - tick-driven simulation core for a 2D side-scroller.
//!
//! A [`Game`] owns the entity store, the score/level progress and the current
//! [`GameMode`]. Each frame the host calls [`Game::tick`] with the elapsed time
//! and an [`InputSnapshot`]; the tick integrates the player, walks enemies,
//! resolves collisions into events, updates progress and switches modes.
//! Drawing, sound and keyboard polling stay outside, behind [`Presenter`],
//! [`Feedback`] and [`InputState`].

pub mod camera;
pub mod collision;
pub mod enemy;
pub mod engine;
pub mod entities;
pub mod error;
pub mod feedback;
pub mod game;
pub mod hud;
pub mod input;
pub mod levels;
pub mod math;
pub mod physics;
pub mod progress;
pub mod state;
pub mod world;

pub use crate::camera::{Camera2D, CameraFollow};
pub use crate::collision::CollisionEvent;
pub use crate::engine::{FixedStep, SimConfig};
pub use crate::entities::{Entity, EntityKind, Tag};
pub use crate::error::{ConfigError, GameError, LevelError, LevelNotFound};
pub use crate::feedback::{Cue, CueLog, Feedback};
pub use crate::game::{Game, TickReport};
pub use crate::hud::{FrameView, Presenter};
pub use crate::input::{Action, InputMap, InputSnapshot, InputState};
pub use crate::levels::{Direction, EnemySpawn, LevelCatalog, LevelDefinition};
pub use crate::math::{Rect, Vec2};
pub use crate::progress::ProgressState;
pub use crate::state::{GameMode, ModeChange};
pub use crate::world::{EntityId, World};
pub use winit::keyboard::KeyCode;
