pub mod actor;
pub mod physics;
pub mod player;

pub use actor::{Actor, ActorHandle};
pub use physics::{BasicCollisionResponse, CollisionProfile, CollisionSurface, DetailedCollisionResponse};
pub use player::{CueState, MoveState, MovementDirection, PlayerController};

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// World-space placement of an actor.
///
/// `rotation` holds Euler angles in degrees. The model matrix composes them in
/// X-Z-Y order: `T * Rx * Rz * Ry * S`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub location: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(location: Vec3) -> Self {
        Self {
            location,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_translation(self.location)
            * Mat4::from_rotation_x(r.x.to_radians())
            * Mat4::from_rotation_z(r.z.to_radians())
            * Mat4::from_rotation_y(r.y.to_radians())
            * Mat4::from_scale(self.scale)
    }

    /// Facing direction from yaw (`rotation.y`) and pitch (`rotation.x`).
    pub fn forward(&self) -> Vec3 {
        let yaw = self.rotation.y.to_radians();
        let pitch = self.rotation.x.to_radians();
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize_or_zero()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

/// Index into the renderer's mesh store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MeshHandle(pub usize);

/// Immutable render/collision source shared by actors: a mesh, a texture slot
/// and the object-space bounds of the mesh vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub mesh: MeshHandle,
    pub texture_id: u8,
    local_bounds: Option<BoundingBox>,
}

impl Object {
    pub fn new(mesh: MeshHandle, texture_id: u8, local_bounds: BoundingBox) -> Self {
        Self {
            mesh,
            texture_id,
            local_bounds: Some(local_bounds),
        }
    }

    /// Bounds come from the vertex positions. No vertices means no geometry.
    pub fn from_vertices(mesh: MeshHandle, texture_id: u8, vertices: &[Vec3]) -> Self {
        Self {
            mesh,
            texture_id,
            local_bounds: BoundingBox::from_points(vertices.iter().copied()),
        }
    }

    /// Axis-aligned cube of side 1 centred on the origin.
    pub fn unit_cube(mesh: MeshHandle, texture_id: u8) -> Self {
        Self::new(
            mesh,
            texture_id,
            BoundingBox::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5)),
        )
    }

    pub fn local_bounds(&self) -> Option<BoundingBox> {
        self.local_bounds
    }

    pub fn has_geometry(&self) -> bool {
        self.local_bounds.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_identity_transform_matrix() {
        assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_matrix_applies_scale_before_translation() {
        let t = Transform::new(Vec3::new(1.0, 2.0, 3.0)).with_scale(Vec3::splat(2.0));
        let p = t.matrix().transform_point3(Vec3::ONE);
        assert_abs_diff_eq!(p.x, 3.0);
        assert_abs_diff_eq!(p.y, 4.0);
        assert_abs_diff_eq!(p.z, 5.0);
    }

    #[test]
    fn test_rotation_order_x_z_y() {
        let t = Transform::default().with_rotation(Vec3::new(90.0, 90.0, 0.0));
        // Ry first: +X -> -Z, then Rx: -Z -> +Y
        let p = t.matrix().transform_vector3(Vec3::X);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_object_without_vertices_has_no_geometry() {
        let o = Object::from_vertices(MeshHandle(0), 0, &[]);
        assert!(!o.has_geometry());
        assert!(o.local_bounds().is_none());
    }
}
