use glam::Vec3;
use hecs::{Entity, World};

use crate::components::Actor;

/// Integrate gravity for every active physics actor, then move every active
/// actor except `player` by its velocity. The player moves in the collision
/// pass instead.
pub fn integrate_actors(world: &mut World, player: Entity, gravitational_acceleration: f32, dt: f32) {
    for (entity, actor) in world.query_mut::<&mut Actor>() {
        if !actor.is_active() {
            continue;
        }
        actor.integrate_gravity(gravitational_acceleration, dt);

        if entity == player {
            continue;
        }
        let step = actor.actor_velocity() * dt;
        if step != Vec3::ZERO {
            actor.add_location(step);
        }
    }
}

/// Measure every active actor's velocity from its displacement since the last
/// call. Actors found at rest drop their collision partners. Returns how many
/// actors are at rest.
pub fn measure_velocities(world: &mut World, dt: f32, rest_threshold: f32) -> usize {
    let mut at_rest = 0;
    for (_entity, actor) in world.query_mut::<&mut Actor>() {
        if actor.is_active() && actor.measure_velocity(dt, rest_threshold) {
            at_rest += 1;
        }
    }
    at_rest
}
