use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which categories of collision an actor takes part in.
///
/// `PLAYER` actors block the player capsule, `ACTOR` actors take part in the
/// actor-vs-actor pass. Values combine with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionProfile(pub u8);

impl CollisionProfile {
    pub const NONE: Self = Self(0);
    pub const PLAYER: Self = Self(1 << 0);
    pub const ACTOR: Self = Self(1 << 1);
    pub const DEFAULT: Self = Self(Self::PLAYER.0 | Self::ACTOR.0);

    /// True when every bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for CollisionProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitOr for CollisionProfile {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollisionProfile {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CollisionProfile {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for CollisionProfile {
    type Output = Self;
    fn not(self) -> Self {
        Self(!self.0 & Self::DEFAULT.0)
    }
}

/// Surface properties seen by whatever collides with an actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionSurface {
    /// Fraction of sliding velocity removed per contact. 0.0 = ice, 1.0 = no sliding.
    pub friction: f32,
}

impl CollisionSurface {
    pub const DEFAULT_FRICTION: f32 = 0.5;

    /// Friction is clamped to `[0, 1]`.
    pub fn new(friction: f32) -> Self {
        Self {
            friction: friction.clamp(0.0, 1.0),
        }
    }

    pub fn frictionless() -> Self {
        Self { friction: 0.0 }
    }
}

impl Default for CollisionSurface {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FRICTION)
    }
}

/// Push-out direction and distance for one participant of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BasicCollisionResponse {
    /// Unit vector; moving along it separates this participant.
    pub collision_normal: Vec3,
    pub penetration_depth: f32,
}

impl BasicCollisionResponse {
    pub fn new(collision_normal: Vec3, penetration_depth: f32) -> Self {
        Self {
            collision_normal,
            penetration_depth: penetration_depth.max(0.0),
        }
    }

    /// Displacement that resolves this contact.
    pub fn push_out(&self) -> Vec3 {
        self.collision_normal * self.penetration_depth
    }
}

/// Everything known about a contact from one participant's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DetailedCollisionResponse {
    pub collision_point: Vec3,
    /// Velocity of this participant when the contact was detected.
    pub impact_velocity: Vec3,
    /// Surface of the *other* participant.
    pub collision_surface: CollisionSurface,
    pub penetration_info: BasicCollisionResponse,
}
