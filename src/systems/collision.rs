//! Pure overlap tests between axis-aligned boxes, spheres and capsules.
//!
//! Every test returns `None` for "no contact". A returned
//! [`BasicCollisionResponse`] always describes how to move the *first*
//! argument out of the box; depths are multiplied by `force` so the separated
//! shapes do not touch again on the next step.

use glam::Vec3;

use crate::components::BasicCollisionResponse;
use crate::geometry::{minimum_translation, BoundingBox};

const EPSILON: f32 = 1e-6;

/// Line segment of length `2 * half_height` along `orientation` through
/// `origin`, swept by a sphere of `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub origin: Vec3,
    pub orientation: Vec3,
    pub half_height: f32,
    pub radius: f32,
}

impl Capsule {
    pub fn new(origin: Vec3, orientation: Vec3, half_height: f32, radius: f32) -> Self {
        Self {
            origin,
            orientation,
            half_height,
            radius,
        }
    }

    /// Upright capsule, the player's shape.
    pub fn vertical(origin: Vec3, half_height: f32, radius: f32) -> Self {
        Self::new(origin, Vec3::Y, half_height, radius)
    }

    pub fn at(&self, origin: Vec3) -> Self {
        Self { origin, ..*self }
    }

    /// End points of the core segment. A zero orientation collapses the
    /// segment to `origin`.
    pub fn segment(&self) -> (Vec3, Vec3) {
        let axis = self.orientation.normalize_or_zero() * self.half_height;
        (self.origin - axis, self.origin + axis)
    }

    pub fn bounds(&self) -> BoundingBox {
        let (start, end) = self.segment();
        BoundingBox::new(start.min(end), start.max(end)).expanded(self.radius)
    }
}

/// Responses for both boxes of an overlapping pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollision {
    /// Moves `a` out of `b`.
    pub a: BasicCollisionResponse,
    /// Moves `b` out of `a`.
    pub b: BasicCollisionResponse,
}

/// Box vs box along the axis of least overlap.
///
/// Each box gets its own response, computed from its own perspective, so the
/// depths are equal while the normals may point in opposite directions.
pub fn is_box_in_bounding_box(a: &BoundingBox, b: &BoundingBox, force: f32) -> Option<BoxCollision> {
    let for_a = minimum_translation(a, b)?;
    let for_b = minimum_translation(b, a)?;
    Some(BoxCollision {
        a: BasicCollisionResponse::new(for_a.axis, for_a.depth * force),
        b: BasicCollisionResponse::new(for_b.axis, for_b.depth * force),
    })
}

/// Sphere vs box.
///
/// The normal points from the closest point on the box to the centre. A
/// centre inside the box has no such direction; it falls back to the least
/// overlapping axis between the sphere's bounds and the box.
pub fn is_sphere_in_bounding_box(
    center: Vec3,
    radius: f32,
    bounds: &BoundingBox,
    force: f32,
) -> Option<BasicCollisionResponse> {
    if !bounds.expanded(radius).contains_point(center) {
        return None;
    }

    let closest = bounds.closest_point(center);
    let offset = center - closest;
    let distance = offset.length();

    if distance > EPSILON {
        if distance > radius {
            // corner region of the expanded box
            return None;
        }
        return Some(BasicCollisionResponse::new(
            offset / distance,
            (radius - distance) * force,
        ));
    }

    let sphere_bounds = BoundingBox::from_center_half_extents(center, Vec3::splat(radius));
    let overlap = minimum_translation(&sphere_bounds, bounds)?;
    Some(BasicCollisionResponse::new(overlap.axis, overlap.depth * force))
}

/// Capsule vs box: pick the point of the core segment nearest the box and
/// test a sphere there.
pub fn is_capsule_in_bounding_box(
    capsule: &Capsule,
    bounds: &BoundingBox,
    force: f32,
) -> Option<BasicCollisionResponse> {
    let center = closest_segment_point(capsule, bounds);
    is_sphere_in_bounding_box(center, capsule.radius, bounds, force)
}

fn closest_segment_point(capsule: &Capsule, bounds: &BoundingBox) -> Vec3 {
    let (start, end) = capsule.segment();
    let dir = end - start;
    let len_sq = dir.length_squared();
    if len_sq < EPSILON * EPSILON {
        return start;
    }
    let target = bounds.closest_point(capsule.origin);
    let t = ((target - start).dot(dir) / len_sq).clamp(0.0, 1.0);
    start + dir * t
}
