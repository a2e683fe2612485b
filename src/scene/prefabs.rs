use glam::Vec3;

use crate::components::{Actor, ActorHandle, CollisionSurface, MeshHandle, Object, Transform};
use crate::renderer::mesh::unit_cube_data;
use crate::world::World;

/// Every prefab draws the unit cube; the app uploads it as the first mesh.
pub const CUBE_MESH: MeshHandle = MeshHandle(0);

pub const STONE_TEXTURE: u8 = 0;
pub const GRASS_TEXTURE: u8 = 1;
pub const CRATE_TEXTURE: u8 = 2;

/// Floors are slippery so the player can slide along them.
const FLOOR_FRICTION: f32 = 0.1;

/// Unit cube object whose bounds come from the same vertices the renderer draws.
pub fn cube_object(texture_id: u8) -> Object {
    Object::from_vertices(CUBE_MESH, texture_id, &unit_cube_data().positions())
}

fn box_transform(center: Vec3, half_extents: Vec3) -> Transform {
    Transform::new(center).with_scale(half_extents * 2.0)
}

/// Static slab whose top face sits at `top_y`.
pub fn spawn_floor(world: &mut World, top_y: f32, half_extent: f32, thickness: f32) -> ActorHandle {
    let center = Vec3::new(0.0, top_y - thickness * 0.5, 0.0);
    let half_extents = Vec3::new(half_extent, thickness * 0.5, half_extent);
    world.spawn_actor(
        Actor::new(cube_object(GRASS_TEXTURE), box_transform(center, half_extents))
            .with_collision_surface(CollisionSurface::new(FLOOR_FRICTION)),
    )
}

/// Static axis-aligned box. `center` is the world-space centre.
pub fn spawn_static_box(world: &mut World, center: Vec3, half_extents: Vec3, texture_id: u8) -> ActorHandle {
    world.spawn_actor(Actor::new(cube_object(texture_id), box_transform(center, half_extents)))
}

/// Static box turned about the vertical axis. Collision still uses the
/// world-space AABB of the turned box.
pub fn spawn_turned_box(world: &mut World, center: Vec3, half_extents: Vec3, yaw_degrees: f32) -> ActorHandle {
    let transform = box_transform(center, half_extents).with_rotation(Vec3::new(0.0, yaw_degrees, 0.0));
    world.spawn_actor(Actor::new(cube_object(STONE_TEXTURE), transform))
}

/// Dynamic cube that falls under gravity and is pushed by other actors.
pub fn spawn_crate(world: &mut World, center: Vec3, size: f32) -> ActorHandle {
    world.spawn_actor(
        Actor::new(cube_object(CRATE_TEXTURE), Transform::new(center).with_scale(Vec3::splat(size)))
            .with_physics(true),
    )
}
