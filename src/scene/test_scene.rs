use glam::Vec3;
use tracing::info;

use crate::config::SimulationConfig;
use crate::scene::prefabs::{
    spawn_crate, spawn_floor, spawn_static_box, spawn_turned_box, CRATE_TEXTURE, STONE_TEXTURE,
};
use crate::world::World;

/// Capsule foot just above the floor with the default capsule size.
pub const PLAYER_START: Vec3 = Vec3::new(0.0, 1.3, 6.0);

const ARENA_HALF_EXTENT: f32 = 20.0;
const WALL_HEIGHT: f32 = 3.0;
const WALL_THICKNESS: f32 = 0.5;

/// Build the demo arena: a walled floor, a few obstacles to slide along and
/// a stack of crates that fall and settle.
pub fn load_test_scene(config: SimulationConfig) -> World {
    let mut world = World::new(config, PLAYER_START);

    spawn_floor(&mut world, 0.0, ARENA_HALF_EXTENT, 1.0);

    // Perimeter walls
    let half_wall = Vec3::new(ARENA_HALF_EXTENT, WALL_HEIGHT * 0.5, WALL_THICKNESS * 0.5);
    let offset = ARENA_HALF_EXTENT + WALL_THICKNESS * 0.5;
    for z in [-offset, offset] {
        spawn_static_box(&mut world, Vec3::new(0.0, WALL_HEIGHT * 0.5, z), half_wall, STONE_TEXTURE);
    }
    let half_side = Vec3::new(half_wall.z, half_wall.y, half_wall.x);
    for x in [-offset, offset] {
        spawn_static_box(&mut world, Vec3::new(x, WALL_HEIGHT * 0.5, 0.0), half_side, STONE_TEXTURE);
    }

    // Grey boxes scattered around spawn
    for &(x, z, h) in &[(6.0_f32, -4.0_f32, 2.0_f32), (-5.0, 3.0, 3.5), (3.0, 7.0, 1.5)] {
        spawn_static_box(
            &mut world,
            Vec3::new(x, h / 2.0, z),
            Vec3::new(1.25, h / 2.0, 1.75),
            STONE_TEXTURE,
        );
    }

    // Low steps the player can jump onto
    for step in 0..3 {
        let height = 0.3 * (step + 1) as f32;
        spawn_static_box(
            &mut world,
            Vec3::new(-8.0 + step as f32 * 1.5, height * 0.5, -6.0),
            Vec3::new(0.75, height * 0.5, 1.5),
            CRATE_TEXTURE,
        );
    }

    spawn_turned_box(&mut world, Vec3::new(9.0, 1.0, 8.0), Vec3::new(2.0, 1.0, 0.5), 45.0);

    // Crates dropped from above so they land on each other
    for level in 0..3 {
        spawn_crate(&mut world, Vec3::new(0.0, 2.0 + level as f32 * 1.5, -3.0), 0.8);
    }
    spawn_crate(&mut world, Vec3::new(2.0, 4.0, -1.0), 0.6);

    info!(actors = world.actor_count(), "test scene loaded");
    world
}
