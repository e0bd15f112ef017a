//! Player integration: jump impulse, gravity, direct horizontal movement.
//!
//! Resting contact is not handled here. The collision pass runs right after
//! and snaps the player onto whatever surface it fell onto, using
//! `previous_position` to tell which side it came from.

use crate::engine::SimConfig;
use crate::input::{Action, InputSnapshot};
use crate::world::World;

/// What happened to the player during integration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntegrationOutcome {
    pub jumped: bool,
}

/// Advance the player by `dt` seconds.
pub fn integrate_player(
    world: &mut World,
    input: &InputSnapshot,
    config: &SimConfig,
    dt: f32,
) -> IntegrationOutcome {
    let mut outcome = IntegrationOutcome::default();
    let Some(player) = world.player_mut() else {
        return outcome;
    };
    let position = player.position;
    let Some(body) = player.player_mut() else {
        return outcome;
    };

    body.previous_position = position;

    if input.was_pressed(Action::Jump)
        && body.jump_cooldown == 0
        && body.velocity.y >= -config.max_rise_speed_for_jump
    {
        body.velocity.y = -config.jump_force;
        body.jump_cooldown = config.jump_cooldown_ticks;
        body.grounded = false;
        outcome.jumped = true;
    }
    body.jump_cooldown = body.jump_cooldown.saturating_sub(1);

    // No inertia: horizontal speed comes straight from the held keys.
    body.velocity.x = input.horizontal() * config.player_speed;
    body.velocity.y += config.gravity * dt;
    let velocity = body.velocity;

    player.position += velocity * dt;
    outcome
}
