//! Runtime entity data: what every spawned object carries, plus the extra
//! state of the player and enemies.

use serde::{Deserialize, Serialize};

use crate::levels::Direction;
use crate::math::{Rect, Vec2};
use crate::world::EntityId;

/// Category used to query the entity store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Player,
    Platform,
    Enemy,
    Coin,
    Ground,
}

impl Tag {
    /// Platforms and ground never move and the player can stand on them.
    pub fn is_surface(self) -> bool {
        matches!(self, Tag::Platform | Tag::Ground)
    }
}

/// Mutable state owned by the player entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    pub velocity: Vec2,
    /// Ticks left before another jump is allowed.
    pub jump_cooldown: u32,
    /// Set when the last tick ended resting on a surface.
    pub grounded: bool,
    /// Top-left corner before this tick's integration.
    pub previous_position: Vec2,
}

/// Mutable state owned by an enemy entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyBody {
    pub direction: Direction,
    pub velocity: Vec2,
}

impl EnemyBody {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            velocity: Vec2::ZERO,
        }
    }
}

/// Variant data per entity kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Player(PlayerBody),
    Platform,
    Enemy(EnemyBody),
    Coin,
    Ground,
}

impl EntityKind {
    pub fn tag(&self) -> Tag {
        match self {
            EntityKind::Player(_) => Tag::Player,
            EntityKind::Platform => Tag::Platform,
            EntityKind::Enemy(_) => Tag::Enemy,
            EntityKind::Coin => Tag::Coin,
            EntityKind::Ground => Tag::Ground,
        }
    }
}

/// A spawned object. `position` is the top-left corner of its bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: Vec2,
    pub live: bool,
}

impl Entity {
    pub fn tag(&self) -> Tag {
        self.kind.tag()
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }

    pub fn player(&self) -> Option<&PlayerBody> {
        match &self.kind {
            EntityKind::Player(body) => Some(body),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerBody> {
        match &mut self.kind {
            EntityKind::Player(body) => Some(body),
            _ => None,
        }
    }

    pub fn enemy(&self) -> Option<&EnemyBody> {
        match &self.kind {
            EntityKind::Enemy(body) => Some(body),
            _ => None,
        }
    }

    pub fn enemy_mut(&mut self) -> Option<&mut EnemyBody> {
        match &mut self.kind {
            EntityKind::Enemy(body) => Some(body),
            _ => None,
        }
    }
}
