use std::collections::HashMap;

use glam::{Mat4, Vec3};
use hecs::Entity;

use super::physics::{CollisionProfile, CollisionSurface, DetailedCollisionResponse};
use super::{Object, Transform};
use crate::geometry::BoundingBox;

/// Stable handle of an actor inside the world arena.
pub type ActorHandle = Entity;

/// A positioned, renderable, optionally physics-enabled world object.
///
/// The world-space bounding box is cached and recomputed by every transform
/// mutator, so [`Actor::bounding_box`] is O(1) and never stale.
///
/// Velocity is split into a driven `movement_velocity` and a vertical
/// `gravitational_velocity`; `actor_velocity` is always their sum.
/// `actual_velocity` is measured from positional change between updates.
#[derive(Debug, Clone)]
pub struct Actor {
    object: Object,
    transform: Transform,
    cached_bounds: BoundingBox,

    collision_profile: CollisionProfile,
    collision_surface: CollisionSurface,
    physics_enabled: bool,
    active: bool,
    culled: bool,

    movement_velocity: Vec3,
    gravitational_velocity: f32,
    actor_velocity: Vec3,
    actual_velocity: Vec3,
    last_measured_location: Vec3,

    collision_partners: HashMap<ActorHandle, DetailedCollisionResponse>,
}

impl Actor {
    pub fn new(object: Object, transform: Transform) -> Self {
        let mut actor = Self {
            object,
            transform,
            cached_bounds: BoundingBox::point(transform.location),
            collision_profile: CollisionProfile::DEFAULT,
            collision_surface: CollisionSurface::default(),
            physics_enabled: false,
            active: true,
            culled: true,
            movement_velocity: Vec3::ZERO,
            gravitational_velocity: 0.0,
            actor_velocity: Vec3::ZERO,
            actual_velocity: Vec3::ZERO,
            last_measured_location: transform.location,
            collision_partners: HashMap::new(),
        };
        actor.cache_bounding_box();
        actor
    }

    pub fn with_collision_profile(mut self, profile: CollisionProfile) -> Self {
        self.collision_profile = profile;
        self
    }

    pub fn with_collision_surface(mut self, surface: CollisionSurface) -> Self {
        self.collision_surface = surface;
        self
    }

    pub fn with_physics(mut self, enabled: bool) -> Self {
        self.physics_enabled = enabled;
        self
    }

    // -----------------------------------------------------------------------
    // Transform and bounds
    // -----------------------------------------------------------------------

    pub fn object(&self) -> &Object {
        &self.object
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn location(&self) -> Vec3 {
        self.transform.location
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    pub fn forward_vector(&self) -> Vec3 {
        self.transform.forward()
    }

    pub fn right_vector(&self) -> Vec3 {
        self.transform.right()
    }

    pub fn up_vector(&self) -> Vec3 {
        self.transform.up()
    }

    pub fn set_location(&mut self, location: Vec3) {
        self.transform.location = location;
        self.cache_bounding_box();
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.transform.rotation = rotation;
        self.cache_bounding_box();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
        self.cache_bounding_box();
    }

    pub fn add_location(&mut self, delta: Vec3) {
        self.set_location(self.transform.location + delta);
    }

    pub fn add_rotation(&mut self, delta: Vec3) {
        self.set_rotation(self.transform.rotation + delta);
    }

    pub fn add_scale(&mut self, delta: Vec3) {
        self.set_scale(self.transform.scale + delta);
    }

    /// Object-space bounds pushed through the current model matrix. Actors
    /// without geometry collapse to a point at their location.
    pub fn calculate_bounding_box(&self) -> BoundingBox {
        match self.object.local_bounds() {
            Some(local) => local.transformed(&self.model_matrix()),
            None => BoundingBox::point(self.transform.location),
        }
    }

    fn cache_bounding_box(&mut self) {
        self.cached_bounds = self.calculate_bounding_box();
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.cached_bounds
    }

    pub fn bounding_box_corners(&self) -> [Vec3; 8] {
        self.cached_bounds.corners()
    }

    pub fn has_geometry(&self) -> bool {
        self.object.has_geometry()
    }

    /// Half the diagonal of the world-space box.
    pub fn approximate_bounding_radius(&self) -> f32 {
        self.cached_bounds.size() * 0.5
    }

    // -----------------------------------------------------------------------
    // Flags
    // -----------------------------------------------------------------------

    pub fn collision_profile(&self) -> CollisionProfile {
        self.collision_profile
    }

    pub fn set_collision_profile(&mut self, profile: CollisionProfile) {
        self.collision_profile = profile;
    }

    pub fn collides_with(&self, profile: CollisionProfile) -> bool {
        self.collision_profile.contains(profile)
    }

    pub fn collision_surface(&self) -> CollisionSurface {
        self.collision_surface
    }

    pub fn set_collision_surface(&mut self, surface: CollisionSurface) {
        self.collision_surface = surface;
    }

    pub fn physics_enabled(&self) -> bool {
        self.physics_enabled
    }

    pub fn set_physics_enabled(&mut self, enabled: bool) {
        self.physics_enabled = enabled;
        if !enabled {
            self.set_gravitational_velocity(0.0);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_culled(&self) -> bool {
        self.culled
    }

    pub fn set_culled(&mut self, culled: bool) {
        self.culled = culled;
    }

    // -----------------------------------------------------------------------
    // Velocity
    // -----------------------------------------------------------------------

    pub fn movement_velocity(&self) -> Vec3 {
        self.movement_velocity
    }

    /// Changing the velocity target forgets current collision partners.
    pub fn set_movement_velocity(&mut self, velocity: Vec3) {
        if velocity != self.movement_velocity {
            self.clear_partners();
        }
        self.movement_velocity = velocity;
        self.refresh_actor_velocity();
    }

    pub fn gravitational_velocity(&self) -> f32 {
        self.gravitational_velocity
    }

    pub fn set_gravitational_velocity(&mut self, velocity: f32) {
        self.gravitational_velocity = velocity;
        self.refresh_actor_velocity();
    }

    /// `movement_velocity + (0, gravitational_velocity, 0)`.
    pub fn actor_velocity(&self) -> Vec3 {
        self.actor_velocity
    }

    pub fn actual_velocity(&self) -> Vec3 {
        self.actual_velocity
    }

    /// Airborne while the vertical velocity is outside `±epsilon`.
    pub fn is_in_air(&self, epsilon: f32) -> bool {
        self.gravitational_velocity.abs() > epsilon
    }

    /// `gravitational_velocity += acceleration * dt` for physics actors.
    pub fn integrate_gravity(&mut self, acceleration: f32, dt: f32) {
        if self.physics_enabled {
            self.set_gravitational_velocity(self.gravitational_velocity + acceleration * dt);
        }
    }

    /// Recompute `actual_velocity` from the displacement since the previous
    /// measurement. Returns `true` when the actor is at rest (below
    /// `rest_threshold`), in which case its collision partners are cleared.
    pub fn measure_velocity(&mut self, dt: f32, rest_threshold: f32) -> bool {
        if dt > 0.0 {
            self.actual_velocity = (self.transform.location - self.last_measured_location) / dt;
        }
        self.last_measured_location = self.transform.location;

        let at_rest = self.actual_velocity.length() < rest_threshold;
        if at_rest {
            self.clear_partners();
        }
        at_rest
    }

    fn refresh_actor_velocity(&mut self) {
        self.actor_velocity = self.movement_velocity + Vec3::new(0.0, self.gravitational_velocity, 0.0);
    }

    // -----------------------------------------------------------------------
    // Collision partners
    // -----------------------------------------------------------------------

    /// Store the latest contact with `partner`. Returns `true` if `partner` was
    /// not already in contact.
    pub fn record_partner(&mut self, partner: ActorHandle, response: DetailedCollisionResponse) -> bool {
        self.collision_partners.insert(partner, response).is_none()
    }

    pub fn forget_partner(&mut self, partner: ActorHandle) -> Option<DetailedCollisionResponse> {
        self.collision_partners.remove(&partner)
    }

    pub fn clear_partners(&mut self) {
        self.collision_partners.clear();
    }

    pub fn collision_partners(&self) -> &HashMap<ActorHandle, DetailedCollisionResponse> {
        &self.collision_partners
    }

    pub fn is_colliding_with(&self, partner: ActorHandle) -> bool {
        self.collision_partners.contains_key(&partner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::MeshHandle;
    use approx::assert_abs_diff_eq;

    fn cube_at(location: Vec3) -> Actor {
        Actor::new(Object::unit_cube(MeshHandle(0), 0), Transform::new(location))
    }

    fn other_handle() -> ActorHandle {
        hecs::World::new().spawn((0u32,))
    }

    #[test]
    fn test_bounding_box_follows_location() {
        let mut a = cube_at(Vec3::ZERO);
        assert_eq!(a.bounding_box().min, Vec3::splat(-0.5));

        a.set_location(Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(a.bounding_box().min, Vec3::new(1.5, -0.5, -0.5));
        assert_eq!(a.bounding_box(), a.calculate_bounding_box());
    }

    #[test]
    fn test_bounding_box_follows_scale_and_rotation() {
        let mut a = cube_at(Vec3::ZERO);
        a.set_scale(Vec3::new(4.0, 1.0, 1.0));
        assert_abs_diff_eq!(a.bounding_box().max.x, 2.0);

        a.set_rotation(Vec3::new(0.0, 90.0, 0.0));
        assert_abs_diff_eq!(a.bounding_box().max.x, 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(a.bounding_box().max.z, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_relative_mutators_refresh_bounds() {
        let mut a = cube_at(Vec3::ZERO);
        a.add_scale(Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(a.scale(), Vec3::new(4.0, 1.0, 1.0));
        assert_abs_diff_eq!(a.bounding_box().max.x, 2.0);

        a.add_rotation(Vec3::new(0.0, 45.0, 0.0));
        a.add_rotation(Vec3::new(0.0, 45.0, 0.0));
        assert_abs_diff_eq!(a.rotation().y, 90.0);
        assert_abs_diff_eq!(a.bounding_box().max.z, 2.0, epsilon = 1e-5);
        assert_eq!(a.bounding_box(), a.calculate_bounding_box());

        let corners = a.bounding_box_corners();
        assert!(corners.iter().all(|&c| c.z.abs() <= 2.0 + 1e-5));
        assert!(corners.iter().any(|&c| c.z > 1.99));
    }

    #[test]
    fn test_direction_vectors_follow_yaw() {
        let mut a = cube_at(Vec3::ZERO);
        assert_abs_diff_eq!(a.forward_vector().x, 1.0, epsilon = 1e-6);

        a.set_rotation(Vec3::new(0.0, 90.0, 0.0));
        let (forward, right, up) = (a.forward_vector(), a.right_vector(), a.up_vector());
        assert_abs_diff_eq!(forward.z, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(right.x, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(up.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_add_location_accumulates() {
        let mut a = cube_at(Vec3::ZERO);
        a.add_location(Vec3::X);
        a.add_location(Vec3::X);
        assert_eq!(a.location(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(a.bounding_box().center(), a.location());
    }

    #[test]
    fn test_actor_without_geometry_is_a_point() {
        let a = Actor::new(
            Object::from_vertices(MeshHandle(0), 0, &[]),
            Transform::new(Vec3::ONE),
        );
        assert!(!a.has_geometry());
        assert_eq!(a.bounding_box(), BoundingBox::point(Vec3::ONE));
        assert_eq!(a.approximate_bounding_radius(), 0.0);
    }

    #[test]
    fn test_actor_velocity_is_sum() {
        let mut a = cube_at(Vec3::ZERO).with_physics(true);
        a.set_movement_velocity(Vec3::new(1.0, 0.0, 2.0));
        a.set_gravitational_velocity(-3.0);
        assert_eq!(a.actor_velocity(), Vec3::new(1.0, -3.0, 2.0));
    }

    #[test]
    fn test_gravity_only_for_physics_actors() {
        let mut a = cube_at(Vec3::ZERO);
        a.integrate_gravity(-10.0, 0.5);
        assert_eq!(a.gravitational_velocity(), 0.0);

        let mut b = cube_at(Vec3::ZERO).with_physics(true);
        b.integrate_gravity(-10.0, 0.5);
        assert_eq!(b.gravitational_velocity(), -5.0);
        assert!(b.is_in_air(1e-3));
    }

    #[test]
    fn test_record_partner_reports_first_contact() {
        let mut a = cube_at(Vec3::ZERO);
        let other = other_handle();
        assert!(a.record_partner(other, DetailedCollisionResponse::default()));
        assert!(!a.record_partner(other, DetailedCollisionResponse::default()));
        assert!(a.is_colliding_with(other));
    }

    #[test]
    fn test_partners_cleared_at_rest() {
        let mut a = cube_at(Vec3::ZERO);
        a.record_partner(other_handle(), DetailedCollisionResponse::default());

        a.add_location(Vec3::new(1.0, 0.0, 0.0));
        assert!(!a.measure_velocity(0.1, 0.01));
        assert_eq!(a.collision_partners().len(), 1);
        assert_abs_diff_eq!(a.actual_velocity().x, 10.0, epsilon = 1e-4);

        // no movement since last measurement
        assert!(a.measure_velocity(0.1, 0.01));
        assert!(a.collision_partners().is_empty());
    }

    #[test]
    fn test_partners_cleared_on_new_velocity_target() {
        let mut a = cube_at(Vec3::ZERO);
        a.record_partner(other_handle(), DetailedCollisionResponse::default());
        a.set_movement_velocity(Vec3::ZERO);
        assert_eq!(a.collision_partners().len(), 1);
        a.set_movement_velocity(Vec3::X);
        assert!(a.collision_partners().is_empty());
    }
}
