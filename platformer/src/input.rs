use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// A logical game action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Advance,
    Restart,
}

/// Immutable view of the input for one tick.
///
/// `held` answers "is the key down right now"; `pressed` holds actions whose
/// key went down since the previous tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: HashSet<Action>,
    pressed: HashSet<Action>,
}

impl InputSnapshot {
    /// A snapshot with nothing held or pressed.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_held(mut self, action: Action) -> Self {
        self.held.insert(action);
        self
    }

    /// Mark `action` as pressed this tick. A press implies the key is held.
    #[must_use]
    pub fn with_pressed(mut self, action: Action) -> Self {
        self.pressed.insert(action);
        self.held.insert(action);
        self
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn was_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// -1.0, 0.0 or 1.0 from the left/right actions. Both held cancel out.
    pub fn horizontal(&self) -> f32 {
        let mut value = 0.0;
        if self.is_held(Action::MoveLeft) {
            value -= 1.0;
        }
        if self.is_held(Action::MoveRight) {
            value += 1.0;
        }
        value
    }
}

/// Tracks keyboard state across frames.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame pressed flags. Call after each snapshot is taken.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Handle a keyboard input event from winit.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match event.state {
                ElementState::Pressed => self.press(keycode),
                ElementState::Released => self.release(keycode),
            }
        }
    }

    /// Record a key going down. Auto-repeat of a held key is not a new press.
    pub fn press(&mut self, key: KeyCode) {
        if self.keys_down.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Returns true if the key is currently held down.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Resolve the current key state into an action snapshot.
    pub fn snapshot(&self, map: &InputMap) -> InputSnapshot {
        let mut snapshot = InputSnapshot::new();
        for (action, keys) in &map.actions {
            if keys.iter().any(|&k| self.is_key_down(k)) {
                snapshot.held.insert(*action);
            }
            if keys.iter().any(|&k| self.is_key_pressed(k)) {
                snapshot.pressed.insert(*action);
            }
        }
        snapshot
    }
}

/// Mapping from physical keys to actions. One key may drive several actions;
/// the current game mode decides which one matters.
#[derive(Clone, Debug)]
pub struct InputMap {
    actions: HashMap<Action, Vec<KeyCode>>,
}

impl InputMap {
    /// Create an empty input map.
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Bind a key to an action.
    pub fn bind_key(&mut self, action: Action, key: KeyCode) {
        self.actions.entry(action).or_default().push(key);
    }

    /// Keys bound to `action`.
    pub fn keys(&self, action: Action) -> &[KeyCode] {
        self.actions.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for InputMap {
    /// Arrow keys or A/D to move, Space to jump and advance, R to restart.
    fn default() -> Self {
        let mut map = Self::new();
        map.bind_key(Action::MoveLeft, KeyCode::ArrowLeft);
        map.bind_key(Action::MoveLeft, KeyCode::KeyA);
        map.bind_key(Action::MoveRight, KeyCode::ArrowRight);
        map.bind_key(Action::MoveRight, KeyCode::KeyD);
        map.bind_key(Action::Jump, KeyCode::Space);
        map.bind_key(Action::Advance, KeyCode::Space);
        map.bind_key(Action::Restart, KeyCode::KeyR);
        map
    }
}
