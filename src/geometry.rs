//! Axis-aligned bounding boxes and the per-axis overlap test shared by every
//! collision primitive.
//!
//! All comparisons are inclusive: two boxes that only touch on a face, edge or
//! corner count as overlapping, and zero-volume boxes are legal inputs.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// World- or object-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Zero-volume box at `point`.
    pub fn point(point: Vec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Componentwise extrema of `points`. Returns `None` for an empty set.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::point(first);
        for p in iter {
            bounds.min = bounds.min.min(p);
            bounds.max = bounds.max.max(p);
        }
        Some(bounds)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the diagonal.
    pub fn size(&self) -> f32 {
        self.min.distance(self.max)
    }

    pub fn volume(&self) -> f32 {
        let e = self.extents();
        e.x * e.y * e.z
    }

    /// The 8 corners, ordered by (x, y, z) bit pattern of min/max selection.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Transform all 8 corners through `matrix` and take the axis-aligned extrema.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        let corners = self.corners().map(|c| matrix.transform_point3(c));
        // 8 corners, never empty
        let mut bounds = Self::point(corners[0]);
        for c in &corners[1..] {
            bounds.min = bounds.min.min(*c);
            bounds.max = bounds.max.max(*c);
        }
        bounds
    }

    pub fn expanded(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Overlapping region of two boxes, `None` when they are disjoint.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }
        Some(BoundingBox {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        })
    }

    /// Point of the box nearest to `p` (clamps `p` into the box).
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }
}

/// Overlap of two intervals along one principal axis.
///
/// `axis` is the direction that pushes the first interval out of the second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisOverlap {
    pub axis: Vec3,
    pub depth: f32,
}

/// Two-sided gap test of `[a_min, a_max]` against `[b_min, b_max]` along `axis`.
///
/// `d0 = b_max - a_min`, `d1 = a_max - b_min`; a negative value on either side
/// means the intervals are separated. Otherwise the overlap is `min(d0, d1)` and
/// the push direction is `+axis` when the first interval sits on the positive side.
pub fn penetration_on_axis(
    axis: Vec3,
    a_min: f32,
    a_max: f32,
    b_min: f32,
    b_max: f32,
) -> Option<AxisOverlap> {
    let d0 = b_max - a_min;
    let d1 = a_max - b_min;
    if d0 < 0.0 || d1 < 0.0 {
        return None;
    }
    if d0 < d1 {
        Some(AxisOverlap { axis, depth: d0 })
    } else {
        Some(AxisOverlap {
            axis: -axis,
            depth: d1,
        })
    }
}

/// Minimum translation axis separating `a` from `b`, or `None` if any axis is
/// separated. Ties keep the earlier axis (X before Y before Z).
pub fn minimum_translation(a: &BoundingBox, b: &BoundingBox) -> Option<AxisOverlap> {
    let axes = [
        (Vec3::X, a.min.x, a.max.x, b.min.x, b.max.x),
        (Vec3::Y, a.min.y, a.max.y, b.min.y, b.max.y),
        (Vec3::Z, a.min.z, a.max.z, b.min.z, b.max.z),
    ];

    let mut best: Option<AxisOverlap> = None;
    for (axis, a_min, a_max, b_min, b_max) in axes {
        let overlap = penetration_on_axis(axis, a_min, a_max, b_min, b_max)?;
        let is_smaller = best.map_or(true, |b| overlap.depth < b.depth);
        if is_smaller {
            best = Some(overlap);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn test_from_points_empty() {
        assert!(BoundingBox::from_points(Vec::<Vec3>::new()).is_none());
    }

    #[test]
    fn test_from_points_extrema() {
        let b = BoundingBox::from_points([
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
        ])
        .unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 3.0, 4.0));
    }

    #[test]
    fn test_transformed_rotation_grows_box() {
        let b = BoundingBox::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        let m = Mat4::from_rotation_y(45.0_f32.to_radians());
        let t = b.transformed(&m);
        let half_diag = 0.5 * 2.0_f32.sqrt();
        assert_abs_diff_eq!(t.max.x, half_diag, epsilon = 1e-5);
        assert_abs_diff_eq!(t.min.z, -half_diag, epsilon = 1e-5);
        assert_abs_diff_eq!(t.max.y, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_touching_boxes_intersect() {
        let a = unit_box();
        let b = unit_box().translated(Vec3::X);
        assert!(a.intersects(&b));
        let touch = a.intersection(&b).unwrap();
        assert_abs_diff_eq!(touch.volume(), 0.0);
    }

    #[test]
    fn test_penetration_on_axis_direction() {
        // A left of B: push A toward -axis
        let o = penetration_on_axis(Vec3::X, 0.0, 1.0, 0.5, 1.5).unwrap();
        assert_eq!(o.axis, -Vec3::X);
        assert_abs_diff_eq!(o.depth, 0.5);

        // A right of B: push A toward +axis
        let o = penetration_on_axis(Vec3::X, 0.5, 1.5, 0.0, 1.0).unwrap();
        assert_eq!(o.axis, Vec3::X);
        assert_abs_diff_eq!(o.depth, 0.5);
    }

    #[test]
    fn test_penetration_on_axis_separated() {
        assert!(penetration_on_axis(Vec3::Y, 0.0, 1.0, 1.01, 2.0).is_none());
        // exact touch still counts
        assert!(penetration_on_axis(Vec3::Y, 0.0, 1.0, 1.0, 2.0).is_some());
    }

    #[test]
    fn test_minimum_translation_picks_smallest_axis() {
        let a = unit_box();
        let b = BoundingBox::new(Vec3::new(0.0, 0.8, 0.0), Vec3::new(1.0, 2.0, 1.0));
        let o = minimum_translation(&a, &b).unwrap();
        assert_eq!(o.axis, -Vec3::Y);
        assert_abs_diff_eq!(o.depth, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_volume_box_is_legal() {
        let p = BoundingBox::point(Vec3::splat(0.5));
        assert!(p.intersects(&unit_box()));
        assert!(minimum_translation(&p, &unit_box()).is_some());
    }
}
