pub mod prefabs;
pub mod test_scene;

pub use test_scene::{load_test_scene, PLAYER_START};
