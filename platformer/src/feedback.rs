//! Discrete feedback cues for an audio/visual collaborator.
//!
//! The simulation never makes sound itself. It calls a [`Feedback`]
//! implementation at the moment a cue happens; [`Cue::tone`] describes the
//! suggested sound sweep for each cue, for implementors that want one.

use serde::{Deserialize, Serialize};

/// Something worth signalling to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Jump,
    CoinCollected,
    EnemyDefeated,
}

/// An exponential frequency and gain ramp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToneSweep {
    pub start_hz: f32,
    pub end_hz: f32,
    pub duration_secs: f32,
    /// Starting gain; the ramp ends at 0.01.
    pub gain: f32,
}

impl Cue {
    pub fn tone(self) -> ToneSweep {
        match self {
            Cue::Jump => ToneSweep {
                start_hz: 440.0,
                end_hz: 880.0,
                duration_secs: 0.1,
                gain: 0.3,
            },
            Cue::CoinCollected => ToneSweep {
                start_hz: 523.0,
                end_hz: 1047.0,
                duration_secs: 0.2,
                gain: 0.2,
            },
            Cue::EnemyDefeated => ToneSweep {
                start_hz: 200.0,
                end_hz: 50.0,
                duration_secs: 0.3,
                gain: 0.3,
            },
        }
    }
}

/// Receiver of feedback cues. Every method defaults to doing nothing.
pub trait Feedback {
    fn on_jump(&mut self) {}

    fn on_coin_collected(&mut self) {}

    fn on_enemy_defeated(&mut self) {}

    /// Dispatch a cue to the matching method.
    fn cue(&mut self, cue: Cue) {
        match cue {
            Cue::Jump => self.on_jump(),
            Cue::CoinCollected => self.on_coin_collected(),
            Cue::EnemyDefeated => self.on_enemy_defeated(),
        }
    }
}

/// Discards every cue.
impl Feedback for () {}

/// Records cues in the order they were raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CueLog {
    cues: Vec<Cue>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }
}

impl Feedback for CueLog {
    fn on_jump(&mut self) {
        self.cues.push(Cue::Jump);
    }

    fn on_coin_collected(&mut self) {
        self.cues.push(Cue::CoinCollected);
    }

    fn on_enemy_defeated(&mut self) {
        self.cues.push(Cue::EnemyDefeated);
    }
}
