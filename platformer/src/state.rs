//! Game modes and the transition table between them.
//!
//! The table only decides *where* to go. Carrying a transition out (loading a
//! level, touching progress) is the job of [`Game`](crate::game::Game), which
//! applies requested transitions once the tick's simulation work is done.

use serde::{Deserialize, Serialize};

use crate::progress::ProgressState;

/// The active top-level mode. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Playing { level: u32 },
    /// `level` is the number of the level just finished.
    LevelComplete { level: u32 },
    GameComplete,
    GameOver,
}

impl GameMode {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameMode::Playing { .. })
    }

    /// Short lowercase name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Playing { .. } => "playing",
            GameMode::LevelComplete { .. } => "level-complete",
            GameMode::GameComplete => "game-complete",
            GameMode::GameOver => "game-over",
        }
    }

    /// Look up the transition `trigger` causes from this mode, if any.
    pub fn transition(&self, trigger: Trigger, progress: &ProgressState) -> Option<Transition> {
        match (*self, trigger) {
            (GameMode::Playing { level }, Trigger::LevelCleared) => {
                Some(Transition::CompleteLevel { level })
            }
            (GameMode::Playing { .. }, Trigger::PlayerDefeated) => Some(Transition::GameOver),
            (GameMode::LevelComplete { .. }, Trigger::Advance) => Some(Transition::Play {
                level: progress.current_level(),
                reset: false,
            }),
            (
                GameMode::LevelComplete { .. } | GameMode::GameOver | GameMode::GameComplete,
                Trigger::Restart,
            ) => Some(Transition::Play {
                level: 1,
                reset: true,
            }),
            _ => None,
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Playing { level: 1 }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Playing { level } | GameMode::LevelComplete { level } => {
                write!(f, "{}({})", self.name(), level)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Something that may move the game to another mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    LevelCleared,
    PlayerDefeated,
    Advance,
    Restart,
}

/// A mode change to carry out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Load `level` and play it. With `reset`, score and level go back to the
    /// start first.
    Play { level: u32, reset: bool },
    /// Finish `level`, advancing the level counter.
    CompleteLevel { level: u32 },
    GameOver,
}

/// Mode before and after a transition, as reported by a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeChange {
    pub from: GameMode,
    pub to: GameMode,
}
