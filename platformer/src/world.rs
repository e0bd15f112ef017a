use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::SimConfig;
use crate::entities::{EnemyBody, Entity, EntityKind, PlayerBody, Tag};
use crate::levels::LevelDefinition;
use crate::math::Vec2;

/// Unique identifier for an entity. Ids are never reused, not even across
/// level loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Get the underlying integer ID (useful for debugging or serialization).
    pub fn to_u32(self) -> u32 {
        self.0
    }
}

/// Entity store for the active level.
///
/// Entities are kept in spawn order, so queries visit them in the order the
/// level fixture lists them. Despawned entities are removed outright and never
/// show up in a query again.
#[derive(Debug, Clone)]
pub struct World {
    next_id: u32,
    entities: BTreeMap<EntityId, Entity>,
    player: Option<EntityId>,
}

impl World {
    /// Create a new, empty world.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entities: BTreeMap::new(),
            player: None,
        }
    }

    /// Spawn an entity and return its `EntityId`.
    pub fn spawn(&mut self, kind: EntityKind, position: Vec2, size: Vec2) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1).max(1);
        if matches!(kind, EntityKind::Player(_)) {
            if let Some(old) = self.player.replace(id) {
                self.entities.remove(&old);
            }
        }
        self.entities.insert(
            id,
            Entity {
                id,
                kind,
                position,
                size,
                live: true,
            },
        );
        id
    }

    /// Remove an entity. Returns it with `live` cleared, or `None` if it was
    /// already gone.
    pub fn despawn(&mut self, entity: EntityId) -> Option<Entity> {
        let mut removed = self.entities.remove(&entity)?;
        removed.live = false;
        if self.player == Some(entity) {
            self.player = None;
        }
        Some(removed)
    }

    /// Remove every entity.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.player = None;
    }

    /// Check if an entity is currently alive.
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Number of alive entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if there are no entities in the world.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, entity: EntityId) -> Option<&Entity> {
        self.entities.get(&entity)
    }

    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&entity)
    }

    /// All live entities in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Live entities with the given tag, in spawn order.
    pub fn query_by_tag(&self, tag: Tag) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values().filter(move |e| e.tag() == tag)
    }

    pub fn query_by_tag_mut(&mut self, tag: Tag) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.values_mut().filter(move |e| e.tag() == tag)
    }

    /// Number of live entities with the given tag.
    pub fn count(&self, tag: Tag) -> usize {
        self.query_by_tag(tag).count()
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    pub fn player(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.entities.get(&id))
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        let id = self.player?;
        self.entities.get_mut(&id)
    }

    /// Replace the current contents with a fresh instance of `level`.
    pub fn load_level(&mut self, level: &LevelDefinition, config: &SimConfig) {
        self.clear();

        self.spawn(
            EntityKind::Ground,
            Vec2::new(0.0, config.ground_top()),
            Vec2::new(config.world_width, config.ground_height),
        );

        for rect in &level.platforms {
            self.spawn(EntityKind::Platform, rect.position(), rect.size());
        }

        let spawn = config.player_spawn_position();
        self.spawn(
            EntityKind::Player(PlayerBody {
                previous_position: spawn,
                ..PlayerBody::default()
            }),
            spawn,
            config.player_size,
        );

        for enemy in &level.enemies {
            self.spawn(
                EntityKind::Enemy(EnemyBody::new(enemy.direction)),
                enemy.position,
                Vec2::new(config.enemy_size, config.enemy_size),
            );
        }

        let r = config.coin_radius;
        for centre in &level.coins {
            self.spawn(
                EntityKind::Coin,
                Vec2::new(centre.x - r, centre.y - r),
                Vec2::new(r * 2.0, r * 2.0),
            );
        }

        log::debug!(
            "loaded level: {} platforms, {} enemies, {} coins",
            level.platforms.len(),
            level.enemies.len(),
            level.coins.len()
        );
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
