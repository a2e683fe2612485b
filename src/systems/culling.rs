use glam::Vec3;
use hecs::World;

use crate::camera::FrustumPlanes;
use crate::components::Actor;

/// Conservative AABB test: true only if one plane has all 8 corners behind it.
/// Boxes straddling a frustum corner may be kept although fully outside.
pub fn is_box_outside_frustum(planes: &FrustumPlanes, corners: &[Vec3; 8]) -> bool {
    planes.0.iter().any(|&plane| {
        corners
            .iter()
            .all(|&c| FrustumPlanes::signed_distance(plane, c) < 0.0)
    })
}

/// Visibility counts from one culling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    pub visible: usize,
    pub culled: usize,
}

/// Set every actor's culled flag from its world-space box. Inactive actors
/// and actors without geometry are always culled.
pub fn frustum_cull_actors(world: &mut World, planes: &FrustumPlanes) -> CullStats {
    let mut stats = CullStats::default();
    for (_entity, actor) in world.query_mut::<&mut Actor>() {
        let culled = !actor.is_active()
            || !actor.has_geometry()
            || is_box_outside_frustum(planes, &actor.bounding_box_corners());
        actor.set_culled(culled);
        if culled {
            stats.culled += 1;
        } else {
            stats.visible += 1;
        }
    }
    stats
}
