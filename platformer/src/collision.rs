//! Per-tick collision pass.
//!
//! Runs after integration and patrol. The static step (world bounds and
//! standing on surfaces) only moves the player; the contact step destroys
//! coins and enemies and reports what happened as [`CollisionEvent`]s.
//!
//! All checks are plain AABB overlap on the post-integration positions, so a
//! large enough tick can carry the player past a coin or an enemy without
//! touching it. Landing compares against the previous tick's bottom edge.

use serde::{Deserialize, Serialize};

use crate::engine::SimConfig;
use crate::entities::Tag;
use crate::math::Rect;
use crate::world::{EntityId, World};

/// Slack when comparing the previous bottom edge against a surface top.
const CONTACT_EPSILON: f32 = 1e-3;

/// Outcome of a player contact, in the order it was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionEvent {
    CoinCollected { coin: EntityId },
    EnemyDefeated { enemy: EntityId },
    PlayerDamaged { enemy: EntityId },
}

/// Run the full pass: bounds, support, coins, enemies.
pub fn resolve(world: &mut World, config: &SimConfig) -> Vec<CollisionEvent> {
    resolve_static(world, config);
    resolve_contacts(world, config)
}

/// Clamp the player into the world and land it on surfaces. Emits nothing.
fn resolve_static(world: &mut World, config: &SimConfig) {
    clamp_to_bounds(world, config);
    resolve_support(world);
}

/// Collect overlapping coins, then classify overlapping enemies.
fn resolve_contacts(world: &mut World, config: &SimConfig) -> Vec<CollisionEvent> {
    let mut events = collect_coins(world);
    events.extend(resolve_enemy_contacts(world, config));
    events
}

fn clamp_to_bounds(world: &mut World, config: &SimConfig) {
    if let Some(player) = world.player_mut() {
        let max_x = (config.world_width - player.size.x).max(0.0);
        player.position.x = player.position.x.clamp(0.0, max_x);
    }
}

/// Snap a descending player onto the nearest surface it crossed this tick.
fn resolve_support(world: &mut World) {
    let Some(player) = world.player() else {
        return;
    };
    let Some(body) = player.player() else {
        return;
    };
    let bounds = player.bounds();
    let previous_bottom = body.previous_position.y + bounds.height;
    let descending = body.velocity.y >= 0.0;

    let landing = world
        .iter()
        .filter(|e| e.tag().is_surface())
        .map(|surface| surface.bounds())
        .filter(|surface| {
            descending
                && bounds.overlaps_horizontally(surface)
                && previous_bottom <= surface.y + CONTACT_EPSILON
                && bounds.bottom() >= surface.y
        })
        .map(|surface| surface.y)
        .min_by(|a, b| (bounds.bottom() - a).total_cmp(&(bounds.bottom() - b)));

    let Some(player) = world.player_mut() else {
        return;
    };
    let height = player.size.y;
    let mut snapped_to = None;
    if let Some(body) = player.player_mut() {
        body.grounded = landing.is_some();
        if let Some(top) = landing {
            body.velocity.y = 0.0;
            snapped_to = Some(top - height);
        }
    }
    if let Some(y) = snapped_to {
        player.position.y = y;
    }
}

fn collect_coins(world: &mut World) -> Vec<CollisionEvent> {
    let Some(player) = world.player().map(|p| p.bounds()) else {
        return Vec::new();
    };
    let touched: Vec<EntityId> = overlapping(world, Tag::Coin, &player).collect();

    touched
        .into_iter()
        .filter_map(|coin| world.despawn(coin))
        .map(|coin| {
            log::trace!("coin {:?} collected", coin.id);
            CollisionEvent::CoinCollected { coin: coin.id }
        })
        .collect()
}

/// A stomp needs the player's top edge more than `stomp_margin` above the
/// enemy's top edge. Anything else touching an enemy is a side hit.
fn resolve_enemy_contacts(world: &mut World, config: &SimConfig) -> Vec<CollisionEvent> {
    let Some(player) = world.player().map(|p| p.bounds()) else {
        return Vec::new();
    };
    let touched: Vec<(EntityId, Rect)> = world
        .query_by_tag(Tag::Enemy)
        .filter(|e| e.bounds().overlaps(&player))
        .map(|e| (e.id, e.bounds()))
        .collect();

    let mut events = Vec::with_capacity(touched.len());
    for (enemy, bounds) in touched {
        if player.y < bounds.y - config.stomp_margin {
            world.despawn(enemy);
            log::trace!("enemy {:?} stomped", enemy);
            events.push(CollisionEvent::EnemyDefeated { enemy });
        } else {
            log::trace!("side hit from enemy {:?}", enemy);
            events.push(CollisionEvent::PlayerDamaged { enemy });
        }
    }
    events
}

fn overlapping<'a>(world: &'a World, tag: Tag, area: &'a Rect) -> impl Iterator<Item = EntityId> + 'a {
    world
        .query_by_tag(tag)
        .filter(move |e| e.bounds().overlaps(area))
        .map(|e| e.id)
}
