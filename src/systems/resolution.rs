//! Interpenetration resolution: the player's capsule against world boxes, and
//! actor boxes against each other.

use glam::Vec3;
use hecs::{Entity, World};
use tracing::debug;

use super::collision::{is_box_in_bounding_box, is_capsule_in_bounding_box, Capsule};
use crate::components::{
    Actor, ActorHandle, BasicCollisionResponse, CollisionProfile, CollisionSurface, DetailedCollisionResponse,
    MoveState,
};
use crate::config::SimulationConfig;
use crate::geometry::BoundingBox;

const EPSILON: f32 = 1e-6;

/// Constants shared by both resolution passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSettings {
    pub penetration_force: f32,
    /// Broad-phase margin added to an actor's bounding radius.
    pub cull_distance: f32,
}

impl CollisionSettings {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            penetration_force: config.penetration_force,
            cull_distance: config.player_cull_distance,
        }
    }
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

/// Cheap distance pre-filter: is `actor`'s box centre within its bounding
/// radius plus `cull_distance` of `point`?
pub fn within_reach(actor: &Actor, point: Vec3, cull_distance: f32) -> bool {
    actor.bounding_box().center().distance(point) < actor.approximate_bounding_radius() + cull_distance
}

// ---------------------------------------------------------------------------
// Player pass
// ---------------------------------------------------------------------------

/// One obstacle touched by the player during a movement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerContact {
    pub partner: ActorHandle,
    pub partner_physics: bool,
    pub response: DetailedCollisionResponse,
}

/// Result of [`move_player_with_collision`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerMove {
    pub state: MoveState,
    pub location: Vec3,
    pub contacts: Vec<PlayerContact>,
}

struct Obstacle {
    handle: ActorHandle,
    bounds: BoundingBox,
    surface: CollisionSurface,
    physics: bool,
}

fn gather_obstacles(world: &World, player: Entity, origin: Vec3, cull_distance: f32) -> Vec<Obstacle> {
    world
        .query::<&Actor>()
        .iter()
        .filter(|(entity, actor)| {
            *entity != player
                && actor.is_active()
                && actor.has_geometry()
                && actor.collides_with(CollisionProfile::PLAYER)
                && within_reach(actor, origin, cull_distance)
        })
        .map(|(entity, actor)| Obstacle {
            handle: entity,
            bounds: actor.bounding_box(),
            surface: actor.collision_surface(),
            physics: actor.physics_enabled(),
        })
        .collect()
}

fn contacts_at(capsule: &Capsule, obstacles: &[Obstacle], force: f32) -> Vec<(usize, BasicCollisionResponse)> {
    obstacles
        .iter()
        .enumerate()
        .filter_map(|(i, o)| is_capsule_in_bounding_box(capsule, &o.bounds, force).map(|r| (i, r)))
        .collect()
}

fn deepest(contacts: &[(usize, BasicCollisionResponse)]) -> Option<(usize, BasicCollisionResponse)> {
    contacts
        .iter()
        .copied()
        .max_by(|a, b| a.1.penetration_depth.total_cmp(&b.1.penetration_depth))
}

/// Velocity left after removing the component along `normal`.
pub fn slide_velocity(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - velocity.dot(normal) * normal
}

/// `slide - friction * slide`, snapped to zero if damping would grow or flip it.
pub fn apply_friction(slide: Vec3, friction: f32) -> Vec3 {
    let damped = slide - slide * friction;
    if damped.length_squared() > slide.length_squared() || damped.dot(slide) < 0.0 {
        Vec3::ZERO
    } else {
        damped
    }
}

/// Advance the player by its velocity, sliding along and correcting out of
/// any obstacle whose profile includes `PLAYER`.
///
/// Free: the predicted location is clear. Colliding: the contact leaves
/// nothing to slide with and the current location is clear, so the player
/// stays. Sliding: the slid location is clear. Stuck: the slid (or current)
/// location still overlaps; the player is pushed out along the summed contact
/// normals by the deepest penetration.
pub fn move_player_with_collision(
    world: &mut World,
    player: Entity,
    capsule: Capsule,
    settings: &CollisionSettings,
    dt: f32,
) -> PlayerMove {
    let (location, velocity) = match world.get::<&Actor>(player) {
        Ok(actor) => (actor.location(), actor.actor_velocity()),
        Err(_) => return PlayerMove::default(),
    };

    let force = settings.penetration_force;
    let obstacles = gather_obstacles(world, player, location, settings.cull_distance);
    let next_location = location + velocity * dt;
    let predicted = contacts_at(&capsule.at(next_location), &obstacles, force);

    let Some((index, first)) = deepest(&predicted) else {
        commit_location(world, player, next_location);
        return PlayerMove {
            state: MoveState::Free,
            location: next_location,
            contacts: Vec::new(),
        };
    };

    let normal = first.collision_normal;
    let slide = apply_friction(slide_velocity(velocity, normal), obstacles[index].surface.friction);
    let mut contacts = vec![describe(&obstacles[index], first, capsule.at(next_location), velocity)];
    land_if_supported(world, player, normal);

    // no slide left: retest where the player already stands
    let sliding = slide.length_squared() >= EPSILON * EPSILON;
    let slid_location = if sliding { location + slide * dt } else { location };
    let slid = capsule.at(slid_location);
    let remaining = contacts_at(&slid, &obstacles, force);

    if remaining.is_empty() {
        commit_location(world, player, slid_location);
        record_player_contacts(world, player, &contacts);
        return PlayerMove {
            state: if sliding { MoveState::Sliding } else { MoveState::Colliding },
            location: slid_location,
            contacts,
        };
    }

    let summed: Vec3 = remaining.iter().map(|(_, r)| r.collision_normal).sum();
    let correction_normal = if summed.length_squared() > EPSILON * EPSILON {
        summed.normalize()
    } else {
        Vec3::Y
    };
    let max_depth = remaining
        .iter()
        .map(|(_, r)| r.penetration_depth)
        .fold(0.0_f32, f32::max);

    let corrected = slid_location + correction_normal * max_depth;
    land_if_supported(world, player, correction_normal);
    commit_location(world, player, corrected);

    for (i, response) in &remaining {
        if obstacles[*i].handle != obstacles[index].handle {
            contacts.push(describe(&obstacles[*i], *response, slid, slide));
        }
    }
    record_player_contacts(world, player, &contacts);
    debug!(
        contacts = contacts.len(),
        depth = max_depth,
        normal = ?correction_normal,
        "player stuck, correcting position"
    );

    PlayerMove {
        state: MoveState::Stuck,
        location: corrected,
        contacts,
    }
}

fn describe(obstacle: &Obstacle, response: BasicCollisionResponse, capsule: Capsule, velocity: Vec3) -> PlayerContact {
    PlayerContact {
        partner: obstacle.handle,
        partner_physics: obstacle.physics,
        response: DetailedCollisionResponse {
            collision_point: obstacle.bounds.closest_point(capsule.origin),
            impact_velocity: velocity,
            collision_surface: obstacle.surface,
            penetration_info: response,
        },
    }
}

fn commit_location(world: &mut World, player: Entity, location: Vec3) {
    if let Ok(mut actor) = world.get::<&mut Actor>(player) {
        actor.set_location(location);
    }
}

/// Ground-contact rule: an upward normal stops a downward fall.
fn land_if_supported(world: &mut World, entity: Entity, normal: Vec3) {
    if normal.y <= 0.0 {
        return;
    }
    if let Ok(mut actor) = world.get::<&mut Actor>(entity) {
        if actor.gravitational_velocity() < 0.0 {
            actor.set_gravitational_velocity(0.0);
        }
    }
}

fn record_player_contacts(world: &mut World, player: Entity, contacts: &[PlayerContact]) {
    if let Ok(mut actor) = world.get::<&mut Actor>(player) {
        for contact in contacts {
            actor.record_partner(contact.partner, contact.response);
        }
    }
}

// ---------------------------------------------------------------------------
// Actor pass
// ---------------------------------------------------------------------------

/// A contact resolved for `actor` against `partner` during the actor pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorContact {
    pub actor: ActorHandle,
    pub partner: ActorHandle,
    pub response: DetailedCollisionResponse,
    /// `partner` was not yet in `actor`'s partner map.
    pub first_contact: bool,
}

fn pair_is_eligible(a: &Actor, b: &Actor, reference: Vec3, cull_distance: f32) -> bool {
    (a.physics_enabled() || b.physics_enabled())
        && a.collides_with(CollisionProfile::ACTOR)
        && b.collides_with(CollisionProfile::ACTOR)
        && a.is_active()
        && b.is_active()
        && a.has_geometry()
        && b.has_geometry()
        && (within_reach(a, reference, cull_distance) || within_reach(b, reference, cull_distance))
}

/// One box test for an actor pair: the response each side sees and whether
/// each side simulates physics.
struct PairHit {
    for_a: DetailedCollisionResponse,
    for_b: DetailedCollisionResponse,
    a_dynamic: bool,
    b_dynamic: bool,
}

fn pair_hit(world: &World, a: Entity, b: Entity, reference: Vec3, settings: &CollisionSettings) -> Option<PairHit> {
    let (Ok(actor_a), Ok(actor_b)) = (world.get::<&Actor>(a), world.get::<&Actor>(b)) else {
        return None;
    };
    if !pair_is_eligible(&actor_a, &actor_b, reference, settings.cull_distance) {
        return None;
    }
    let (box_a, box_b) = (actor_a.bounding_box(), actor_b.bounding_box());
    let hit = is_box_in_bounding_box(&box_a, &box_b, settings.penetration_force)?;

    let collision_point = box_a
        .intersection(&box_b)
        .map_or_else(|| box_a.closest_point(box_b.center()), |overlap| overlap.center());
    Some(PairHit {
        for_a: DetailedCollisionResponse {
            collision_point,
            impact_velocity: actor_a.actor_velocity(),
            collision_surface: actor_b.collision_surface(),
            penetration_info: hit.a,
        },
        for_b: DetailedCollisionResponse {
            collision_point,
            impact_velocity: actor_b.actor_velocity(),
            collision_surface: actor_a.collision_surface(),
            penetration_info: hit.b,
        },
        a_dynamic: actor_a.physics_enabled(),
        b_dynamic: actor_b.physics_enabled(),
    })
}

/// Move `entity` out by `share` of its penetration, apply the ground rule with
/// its own normal and record the partner. Returns whether the contact is new.
fn separate(
    world: &mut World,
    entity: Entity,
    partner: Entity,
    response: DetailedCollisionResponse,
    share: f32,
) -> Option<bool> {
    let mut actor = world.get::<&mut Actor>(entity).ok()?;
    actor.add_location(response.penetration_info.push_out() * share);
    if response.penetration_info.collision_normal.y > 0.0 && actor.gravitational_velocity() < 0.0 {
        actor.set_gravitational_velocity(0.0);
    }
    Some(actor.record_partner(partner, response))
}

fn record_only(world: &mut World, entity: Entity, partner: Entity, response: DetailedCollisionResponse) {
    if let Ok(mut actor) = world.get::<&mut Actor>(entity) {
        actor.record_partner(partner, response);
    }
}

/// Resolve overlaps between actors whose profiles include `ACTOR`.
///
/// Each unordered pair gets a single box test and both participants are
/// resolved from it: two physics actors each move by half the penetration, a
/// physics actor against a static one moves by the full penetration. Both
/// record the contact. Pairs with no physics actor, or with both actors out
/// of reach of `reference`, are skipped. One [`ActorContact`] is returned per
/// actor that moved.
pub fn collide_world_actors(world: &mut World, reference: Vec3, settings: &CollisionSettings) -> Vec<ActorContact> {
    let handles: Vec<Entity> = world.query::<&Actor>().iter().map(|(entity, _)| entity).collect();
    let mut contacts = Vec::new();

    for (i, &a) in handles.iter().enumerate() {
        for &b in &handles[i + 1..] {
            let Some(hit) = pair_hit(world, a, b, reference, settings) else {
                continue;
            };
            let share = if hit.a_dynamic && hit.b_dynamic { 0.5 } else { 1.0 };

            for (actor, partner, response, dynamic) in [
                (a, b, hit.for_a, hit.a_dynamic),
                (b, a, hit.for_b, hit.b_dynamic),
            ] {
                if !dynamic {
                    record_only(world, actor, partner, response);
                    continue;
                }
                let Some(first_contact) = separate(world, actor, partner, response, share) else {
                    continue;
                };
                if first_contact {
                    debug!(
                        ?actor,
                        ?partner,
                        depth = response.penetration_info.penetration_depth,
                        normal = ?response.penetration_info.collision_normal,
                        "actor contact"
                    );
                }
                contacts.push(ActorContact {
                    actor,
                    partner,
                    response,
                    first_contact,
                });
            }
        }
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{MeshHandle, Object, Transform};
    use approx::assert_abs_diff_eq;

    fn settings() -> CollisionSettings {
        CollisionSettings {
            penetration_force: 1.0,
            cull_distance: 50.0,
        }
    }

    fn capsule() -> Capsule {
        Capsule::vertical(Vec3::ZERO, 0.9, 0.3)
    }

    fn cube(location: Vec3, scale: Vec3) -> Actor {
        Actor::new(
            Object::unit_cube(MeshHandle(0), 0),
            Transform::new(location).with_scale(scale),
        )
    }

    fn spawn_player(world: &mut World, location: Vec3, velocity: Vec3) -> Entity {
        let mut actor = Actor::new(Object::from_vertices(MeshHandle(0), 0, &[]), Transform::new(location))
            .with_collision_profile(CollisionProfile::PLAYER)
            .with_physics(true);
        actor.set_movement_velocity(velocity);
        world.spawn((actor,))
    }

    #[test]
    fn test_zero_velocity_without_obstacles_keeps_location() {
        let mut world = World::new();
        let start = Vec3::new(1.0, 2.0, 3.0);
        let player = spawn_player(&mut world, start, Vec3::ZERO);

        let result = move_player_with_collision(&mut world, player, capsule(), &settings(), 1.0 / 60.0);
        assert_eq!(result.state, MoveState::Free);
        assert_eq!(world.get::<&Actor>(player).unwrap().location(), start);
    }

    #[test]
    fn test_free_move_commits_prediction() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::new(0.0, 5.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        let result = move_player_with_collision(&mut world, player, capsule(), &settings(), 0.5);
        assert_eq!(result.state, MoveState::Free);
        assert_abs_diff_eq!(result.location.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_head_on_wall_without_slide_is_colliding() {
        let mut world = World::new();
        world.spawn((cube(Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, 4.0, 4.0)),));
        let start = Vec3::new(0.15, 1.0, 0.0);
        let player = spawn_player(&mut world, start, Vec3::new(1.0, 0.0, 0.0));

        let result = move_player_with_collision(&mut world, player, capsule(), &settings(), 0.1);
        assert_eq!(result.state, MoveState::Colliding);
        assert_eq!(result.contacts.len(), 1);
        assert_eq!(world.get::<&Actor>(player).unwrap().location(), start);
    }

    #[test]
    fn test_idle_player_inside_wall_is_pushed_out() {
        let mut world = World::new();
        // wall face at x = 0.5
        world.spawn((cube(Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, 4.0, 4.0)),));
        let player = spawn_player(&mut world, Vec3::new(0.35, 1.0, 0.0), Vec3::ZERO);
        let settings = CollisionSettings {
            penetration_force: 1.01,
            cull_distance: 50.0,
        };

        let result = move_player_with_collision(&mut world, player, capsule(), &settings, 1.0 / 60.0);
        assert_eq!(result.state, MoveState::Stuck);
        let x = world.get::<&Actor>(player).unwrap().location().x;
        assert!(x <= 0.2, "player left inside the wall at x = {x}");

        let again = move_player_with_collision(&mut world, player, capsule(), &settings, 1.0 / 60.0);
        assert_eq!(again.state, MoveState::Free);
        assert_eq!(world.get::<&Actor>(player).unwrap().location().x, x);
    }

    #[test]
    fn test_oblique_wall_slides_tangentially() {
        let mut world = World::new();
        let wall = world.spawn((cube(Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, 4.0, 20.0))
            .with_collision_surface(CollisionSurface::frictionless()),));
        let player = spawn_player(&mut world, Vec3::new(0.15, 1.0, 0.0), Vec3::new(1.0, 0.0, -1.0));

        let result = move_player_with_collision(&mut world, player, capsule(), &settings(), 0.1);
        assert_eq!(result.state, MoveState::Sliding);
        assert_abs_diff_eq!(result.location.x, 0.15, epsilon = 1e-6);
        assert_abs_diff_eq!(result.location.z, -0.1, epsilon = 1e-6);
        assert!(world.get::<&Actor>(player).unwrap().is_colliding_with(wall));
    }

    #[test]
    fn test_slide_has_no_normal_component() {
        let n = Vec3::new(1.0, 1.0, 0.0).normalize();
        let v = Vec3::new(-3.0, 0.5, 2.0);
        assert_abs_diff_eq!(slide_velocity(v, n).dot(n), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_friction_never_reverses_slide() {
        let s = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(apply_friction(s, 0.25), Vec3::new(0.75, 0.0, 0.0));
        assert_eq!(apply_friction(s, 1.0), Vec3::ZERO);
        assert_eq!(apply_friction(s, 2.5), Vec3::ZERO);
    }

    #[test]
    fn test_falling_onto_floor_stops_fall() {
        let mut world = World::new();
        world.spawn((cube(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 1.0, 10.0)),));
        let player = spawn_player(&mut world, Vec3::new(0.0, 1.21, 0.0), Vec3::ZERO);
        world.get::<&mut Actor>(player).unwrap().set_gravitational_velocity(-1.0);

        let result = move_player_with_collision(&mut world, player, capsule(), &settings(), 0.1);
        assert_eq!(result.state, MoveState::Colliding);
        let actor = world.get::<&Actor>(player).unwrap();
        assert_eq!(actor.gravitational_velocity(), 0.0);
        assert!(actor.location().y > 1.2);
    }

    #[test]
    fn test_sliding_into_second_obstacle_is_corrected() {
        let mut world = World::new();
        // floor under the player and a frictionless wall ahead
        world.spawn((cube(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 1.0, 10.0))
            .with_collision_surface(CollisionSurface::frictionless()),));
        world.spawn((cube(Vec3::new(0.8, 1.0, 0.0), Vec3::new(1.0, 4.0, 10.0))
            .with_collision_surface(CollisionSurface::frictionless()),));
        let player = spawn_player(&mut world, Vec3::new(0.0, 1.15, 0.0), Vec3::new(1.0, 0.0, 0.0));
        world.get::<&mut Actor>(player).unwrap().set_gravitational_velocity(-2.0);

        let result = move_player_with_collision(&mut world, player, capsule(), &settings(), 0.1);
        assert_eq!(result.state, MoveState::Stuck);
        assert_eq!(result.contacts.len(), 2);
        let actor = world.get::<&Actor>(player).unwrap();
        assert!(actor.location().y >= 1.1);
        assert_eq!(actor.gravitational_velocity(), 0.0);
    }

    #[test]
    fn test_obstacles_without_player_profile_are_ignored() {
        let mut world = World::new();
        world.spawn((cube(Vec3::new(0.5, 1.0, 0.0), Vec3::splat(1.0))
            .with_collision_profile(CollisionProfile::ACTOR),));
        let player = spawn_player(&mut world, Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let result = move_player_with_collision(&mut world, player, capsule(), &settings(), 0.1);
        assert_eq!(result.state, MoveState::Free);
    }

    #[test]
    fn test_dynamic_actor_lands_on_static_floor() {
        let mut world = World::new();
        let floor = world.spawn((cube(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 1.0, 10.0)),));
        let mut crate_actor = cube(Vec3::new(0.0, 0.4, 0.0), Vec3::ONE).with_physics(true);
        crate_actor.set_gravitational_velocity(-2.0);
        let crate_ = world.spawn((crate_actor,));

        let contacts = collide_world_actors(&mut world, Vec3::ZERO, &settings());
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].actor, crate_);
        assert!(contacts[0].first_contact);

        let c = world.get::<&Actor>(crate_).unwrap();
        assert_abs_diff_eq!(c.bounding_box().min.y, 0.0, epsilon = 1e-5);
        assert_eq!(c.gravitational_velocity(), 0.0);
        assert!(c.is_colliding_with(floor));
        assert!(world.get::<&Actor>(floor).unwrap().is_colliding_with(crate_));
    }

    #[test]
    fn test_two_dynamic_actors_split_the_push() {
        let mut world = World::new();
        let a = world.spawn((cube(Vec3::new(0.0, 5.0, 0.0), Vec3::ONE).with_physics(true),));
        let b = world.spawn((cube(Vec3::new(0.8, 5.0, 0.0), Vec3::ONE).with_physics(true),));

        let contacts = collide_world_actors(&mut world, Vec3::ZERO, &settings());
        assert_eq!(contacts.len(), 2);

        let xa = world.get::<&Actor>(a).unwrap().location().x;
        let xb = world.get::<&Actor>(b).unwrap().location().x;
        assert_abs_diff_eq!(xa, -0.1, epsilon = 1e-5);
        assert_abs_diff_eq!(xb, 0.9, epsilon = 1e-5);

        let box_a = world.get::<&Actor>(a).unwrap().bounding_box();
        let box_b = world.get::<&Actor>(b).unwrap().bounding_box();
        let left = is_box_in_bounding_box(&box_a, &box_b, 1.0).map_or(0.0, |hit| hit.a.penetration_depth);
        assert!(left < 1e-5, "overlap left after the pass: {left}");
    }

    #[test]
    fn test_dynamic_pair_moves_apart_regardless_of_spawn_order() {
        let mut world = World::new();
        let b = world.spawn((cube(Vec3::new(0.8, 5.0, 0.0), Vec3::ONE).with_physics(true),));
        let a = world.spawn((cube(Vec3::new(0.0, 5.0, 0.0), Vec3::ONE).with_physics(true),));

        collide_world_actors(&mut world, Vec3::ZERO, &settings());
        let xa = world.get::<&Actor>(a).unwrap().location().x;
        let xb = world.get::<&Actor>(b).unwrap().location().x;
        assert_abs_diff_eq!(xb - xa, 1.0, epsilon = 1e-5);
        assert!(world.get::<&Actor>(a).unwrap().is_colliding_with(b));
        assert!(world.get::<&Actor>(b).unwrap().is_colliding_with(a));
    }

    #[test]
    fn test_static_pairs_and_far_pairs_are_skipped() {
        let mut world = World::new();
        world.spawn((cube(Vec3::ZERO, Vec3::ONE),));
        world.spawn((cube(Vec3::new(0.5, 0.0, 0.0), Vec3::ONE),));
        world.spawn((cube(Vec3::new(100.0, 0.0, 0.0), Vec3::ONE).with_physics(true),));
        world.spawn((cube(Vec3::new(100.5, 0.0, 0.0), Vec3::ONE).with_physics(true),));

        let near = CollisionSettings {
            penetration_force: 1.0,
            cull_distance: 5.0,
        };
        assert!(collide_world_actors(&mut world, Vec3::ZERO, &near).is_empty());
    }

    #[test]
    fn test_repeat_contact_is_not_first() {
        let mut world = World::new();
        world.spawn((cube(Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 1.0, 10.0)),));
        let crate_ = world.spawn((cube(Vec3::new(0.0, 0.4, 0.0), Vec3::ONE).with_physics(true),));

        assert!(collide_world_actors(&mut world, Vec3::ZERO, &settings())[0].first_contact);
        world.get::<&mut Actor>(crate_).unwrap().add_location(Vec3::new(0.0, -0.05, 0.0));
        let again = collide_world_actors(&mut world, Vec3::ZERO, &settings());
        assert_eq!(again.len(), 1);
        assert!(!again[0].first_contact);
    }
}
