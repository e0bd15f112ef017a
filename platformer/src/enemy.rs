//! Enemy patrol: walk at a fixed speed, turn around at the world edges.

use crate::engine::SimConfig;
use crate::entities::Tag;
use crate::levels::Direction;
use crate::math::Vec2;
use crate::world::World;

/// Move every live enemy one tick along its patrol.
///
/// Enemies are not physics bodies: they ignore gravity and platforms and keep
/// the height they spawned at.
pub fn patrol(world: &mut World, config: &SimConfig, dt: f32) {
    let max_x = config.world_width - config.enemy_size;

    for enemy in world.query_by_tag_mut(Tag::Enemy) {
        let mut x = enemy.position.x;
        let Some(body) = enemy.enemy_mut() else {
            continue;
        };

        body.velocity = Vec2::new(body.direction.sign() * config.enemy_speed, 0.0);
        x += body.velocity.x * dt;

        // Turn to face back into the world, so an enemy sitting on an edge
        // can never flip back and forth on the spot.
        if x <= 0.0 {
            x = 0.0;
            body.direction = Direction::Right;
        } else if x >= max_x {
            x = max_x;
            body.direction = Direction::Left;
        }

        enemy.position.x = x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EnemyBody, EntityKind};
    use crate::world::EntityId;

    fn spawn_enemy(world: &mut World, x: f32, direction: Direction) -> EntityId {
        world.spawn(
            EntityKind::Enemy(EnemyBody::new(direction)),
            Vec2::new(x, 500.0),
            Vec2::new(24.0, 24.0),
        )
    }

    fn state(world: &World, id: EntityId) -> (f32, Direction) {
        let enemy = world.get(id).expect("enemy");
        (enemy.position.x, enemy.enemy().expect("enemy body").direction)
    }

    #[test]
    fn test_walks_in_current_direction() {
        let config = SimConfig::default();
        let mut world = World::new();
        let right = spawn_enemy(&mut world, 400.0, Direction::Right);
        let left = spawn_enemy(&mut world, 400.0, Direction::Left);

        patrol(&mut world, &config, 0.5);

        assert_eq!(state(&world, right), (425.0, Direction::Right));
        assert_eq!(state(&world, left), (375.0, Direction::Left));
        assert_eq!(world.get(right).expect("enemy").position.y, 500.0);
    }

    #[test]
    fn test_reverses_at_right_edge() {
        let config = SimConfig::default();
        let mut world = World::new();
        let id = spawn_enemy(&mut world, 770.0, Direction::Right);

        patrol(&mut world, &config, 0.1);
        assert_eq!(state(&world, id), (775.0, Direction::Right));

        patrol(&mut world, &config, 0.1);
        assert_eq!(state(&world, id), (776.0, Direction::Left));

        patrol(&mut world, &config, 0.1);
        assert_eq!(state(&world, id), (771.0, Direction::Left));
    }

    #[test]
    fn test_reverses_at_left_edge() {
        let config = SimConfig::default();
        let mut world = World::new();
        let id = spawn_enemy(&mut world, 2.0, Direction::Left);

        patrol(&mut world, &config, 0.1);
        assert_eq!(state(&world, id), (0.0, Direction::Right));

        patrol(&mut world, &config, 0.1);
        assert_eq!(state(&world, id), (5.0, Direction::Right));
    }

    #[test]
    fn test_stays_inside_world_over_many_ticks() {
        let config = SimConfig::default();
        let mut world = World::new();
        let id = spawn_enemy(&mut world, 100.0, Direction::Left);

        for _ in 0..10_000 {
            patrol(&mut world, &config, 1.0 / 60.0);
            let (x, _) = state(&world, id);
            assert!((0.0..=776.0).contains(&x));
        }
    }
}
