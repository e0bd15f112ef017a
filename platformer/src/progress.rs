//! Score and level progress, and the tracker that updates them from
//! collision events.

use serde::{Deserialize, Serialize};

use crate::collision::CollisionEvent;

/// Points for collecting one coin.
pub const COIN_SCORE: u32 = 10;
/// Points for stomping one enemy.
pub const STOMP_SCORE: u32 = 20;

/// Counters shown on the HUD. Only the tracker and the game flow change them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    score: u32,
    current_level: u32,
    coins_collected: u32,
    total_coins: u32,
}

impl ProgressState {
    /// Fresh run: level 1, no score.
    pub fn new() -> Self {
        Self {
            score: 0,
            current_level: 1,
            coins_collected: 0,
            total_coins: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn coins_collected(&self) -> u32 {
        self.coins_collected
    }

    pub fn total_coins(&self) -> u32 {
        self.total_coins
    }

    pub fn all_coins_collected(&self) -> bool {
        self.total_coins > 0 && self.coins_collected >= self.total_coins
    }

    /// Reset the coin counters for a newly loaded level. Score is kept.
    pub(crate) fn begin_level(&mut self, total_coins: u32) {
        self.coins_collected = 0;
        self.total_coins = total_coins;
    }

    /// Move on to the next level number.
    pub(crate) fn advance_level(&mut self) {
        self.current_level += 1;
    }

    /// Back to level 1 with no score.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new()
    }
}

/// A terminal condition raised while consuming events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The last coin of the level was collected.
    LevelCleared,
    /// A side hit ended the run.
    PlayerDefeated,
}

/// Apply one event. Returns the terminal condition it raises, if any.
pub fn apply_event(progress: &mut ProgressState, event: &CollisionEvent) -> Option<Outcome> {
    match event {
        CollisionEvent::CoinCollected { .. } => {
            if progress.coins_collected >= progress.total_coins {
                log::warn!("coin collected beyond level total {}", progress.total_coins);
                return None;
            }
            progress.coins_collected += 1;
            progress.score += COIN_SCORE;
            progress
                .all_coins_collected()
                .then_some(Outcome::LevelCleared)
        }
        CollisionEvent::EnemyDefeated { .. } => {
            progress.score += STOMP_SCORE;
            None
        }
        CollisionEvent::PlayerDamaged { .. } => Some(Outcome::PlayerDefeated),
    }
}

/// Apply a tick's events in order. Every event is applied; the first terminal
/// condition raised is the one returned.
pub fn apply_events(progress: &mut ProgressState, events: &[CollisionEvent]) -> Option<Outcome> {
    let mut outcome = None;
    for event in events {
        let raised = apply_event(progress, event);
        if outcome.is_none() {
            outcome = raised;
        }
    }
    outcome
}
