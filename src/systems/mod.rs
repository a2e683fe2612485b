pub mod collision;
pub mod culling;
pub mod physics;
pub mod player;
pub mod resolution;

pub use collision::{is_box_in_bounding_box, is_capsule_in_bounding_box, is_sphere_in_bounding_box, BoxCollision, Capsule};
pub use culling::{frustum_cull_actors, is_box_outside_frustum, CullStats};
pub use physics::{integrate_actors, measure_velocities};
pub use player::{apply_movement_input, follow_camera, play_player_cues, record_move_state, try_jump, CueSettings};
pub use resolution::{
    collide_world_actors, move_player_with_collision, ActorContact, CollisionSettings, PlayerContact, PlayerMove,
};
