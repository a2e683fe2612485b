use glam::{Mat4, Vec3, Vec4};

use crate::config::CameraConfig;

/// Clip planes in `(a, b, c, d)` form, `a*x + b*y + c*z + d >= 0` inside.
/// Order: left, right, bottom, top, near, far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumPlanes(pub [Vec4; 6]);

impl FrustumPlanes {
    /// Gribb/Hartmann extraction from the rows of a GL-style view-projection
    /// matrix (clip z in `[-w, w]`). Planes are normalised by their xyz length.
    pub fn from_view_projection(m: &Mat4) -> Self {
        let (r0, r1, r2, r3) = (m.row(0), m.row(1), m.row(2), m.row(3));
        let planes = [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r3 + r2, r3 - r2].map(|p| {
            let len = p.truncate().length();
            if len > f32::EPSILON {
                p / len
            } else {
                p
            }
        });
        Self(planes)
    }

    pub fn signed_distance(plane: Vec4, point: Vec3) -> f32 {
        plane.truncate().dot(point) + plane.w
    }
}

/// First-person camera driven by yaw/pitch deltas.
///
/// Basis vectors, view/projection matrices and frustum planes are derived
/// state: call [`Camera::update`] after changing location, angles or aspect.
pub struct Camera {
    pub location: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub sensitivity: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,

    forward: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    aspect: f32,
    view: Mat4,
    projection: Mat4,
    planes: FrustumPlanes,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let mut camera = Self {
            location: Vec3::ZERO,
            yaw: -90.0,
            pitch: 0.0,
            sensitivity: config.sensitivity,
            fov: config.fov,
            near: config.near,
            far: config.far,
            min_pitch: config.min_pitch,
            max_pitch: config.max_pitch,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up: Vec3::Y,
            aspect: 4.0 / 3.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            planes: FrustumPlanes([Vec4::ZERO; 6]),
        };
        camera.update();
        camera
    }

    /// Apply a look delta in degrees (before sensitivity). Pitch is clamped.
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta * self.sensitivity;
        self.pitch = (self.pitch - pitch_delta * self.sensitivity).clamp(self.min_pitch, self.max_pitch);
        self.update();
    }

    pub fn set_location(&mut self, location: Vec3) {
        if location != self.location {
            self.location = location;
            self.update();
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect > 0.0 && aspect.is_finite() {
            self.aspect = aspect;
            self.update();
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Recompute basis vectors, matrices and frustum planes.
    pub fn update(&mut self) {
        let yaw_rad = self.yaw.to_radians();
        let pitch_rad = self.pitch.to_radians();
        self.forward = Vec3::new(
            yaw_rad.cos() * pitch_rad.cos(),
            pitch_rad.sin(),
            yaw_rad.sin() * pitch_rad.cos(),
        )
        .normalize();
        self.right = self.forward.cross(self.world_up).normalize();
        self.up = self.right.cross(self.forward).normalize();

        self.view = Mat4::look_at_rh(self.location, self.location + self.forward, self.world_up);
        self.projection = Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far);
        self.planes = FrustumPlanes::from_view_projection(&(self.projection * self.view));
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Forward direction projected onto the ground plane.
    pub fn ground_forward(&self) -> Vec3 {
        let flat = Vec3::new(self.forward.x, 0.0, self.forward.z);
        if flat.length_squared() > 1e-8 {
            flat.normalize()
        } else {
            Vec3::NEG_Z
        }
    }

    pub fn ground_right(&self) -> Vec3 {
        self.ground_forward().cross(self.world_up).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn planes(&self) -> &FrustumPlanes {
        &self.planes
    }
}
