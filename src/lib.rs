//! Movement and collision core for a small first-person 3D sandbox: actors
//! with box bounds, a capsule player that slides along what it hits,
//! actor-vs-actor penetration resolution, frustum culling and a threaded
//! sound cue sink. The SDL2/OpenGL front end lives in [`app`], [`engine`] and
//! [`renderer`].

pub mod app;
pub mod audio;
pub mod camera;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod fsm;
pub mod geometry;
pub mod renderer;
pub mod scene;
pub mod systems;
pub mod world;

pub use camera::{Camera, FrustumPlanes};
pub use components::{Actor, ActorHandle, MovementDirection, MoveState, Object, Transform};
pub use config::SimulationConfig;
pub use geometry::BoundingBox;
pub use world::{FrameReport, RenderFrame, RenderItem, World};
