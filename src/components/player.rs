use std::ops::{BitOr, BitOrAssign};

use glam::Vec3;

use super::actor::ActorHandle;
use crate::camera::Camera;
use crate::fsm::StateMachine;

/// Bitmask of the movement keys currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MovementDirection(pub u8);

impl MovementDirection {
    pub const NONE: Self = Self(0);
    pub const FORWARD: Self = Self(1 << 0);
    pub const BACKWARD: Self = Self(1 << 1);
    pub const LEFT: Self = Self(1 << 2);
    pub const RIGHT: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && (self.0 & other.0) == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Sum of the basis vectors selected by the held keys, normalised.
    /// Opposite keys cancel; the result is zero when nothing (net) is held.
    pub fn resolve(self, forward: Vec3, right: Vec3) -> Vec3 {
        let mut direction = Vec3::ZERO;
        if self.contains(Self::FORWARD) {
            direction += forward;
        }
        if self.contains(Self::BACKWARD) {
            direction -= forward;
        }
        if self.contains(Self::RIGHT) {
            direction += right;
        }
        if self.contains(Self::LEFT) {
            direction -= right;
        }
        direction.normalize_or_zero()
    }
}

impl BitOr for MovementDirection {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for MovementDirection {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Outcome of the last player movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveState {
    /// Predicted location was clear.
    #[default]
    Free,
    /// Contact found and nothing was left to slide with; player held in place.
    Colliding,
    /// First contact removed, the slid location was clear.
    Sliding,
    /// Slid location still overlapped; resolved by positional correction.
    Stuck,
}

/// Which looping cues are currently playing, so commands go out only on change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CueState {
    pub footsteps: bool,
    pub bump: bool,
    /// A jump happened since the last cue update.
    pub jump_pending: bool,
}

/// Input-facing side of the player. The physical body is an [`Actor`] in the
/// world arena, referenced by `actor`.
///
/// [`Actor`]: super::Actor
pub struct PlayerController {
    pub actor: ActorHandle,
    pub movement: MovementDirection,
    pub speed: f32,
    pub camera: Camera,
    pub move_fsm: StateMachine<MoveState>,
    pub cues: CueState,
    pub focused: bool,
}

impl PlayerController {
    pub fn new(actor: ActorHandle, speed: f32, camera: Camera) -> Self {
        Self {
            actor,
            movement: MovementDirection::NONE,
            speed,
            camera,
            move_fsm: StateMachine::new(MoveState::Free),
            cues: CueState::default(),
            focused: true,
        }
    }

    /// Camera-relative velocity requested by the held keys.
    pub fn desired_velocity(&self) -> Vec3 {
        self.movement
            .resolve(self.camera.ground_forward(), self.camera.ground_right())
            * self.speed
    }

    pub fn move_state(&self) -> MoveState {
        *self.move_fsm.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_insert_and_remove_bits() {
        let mut m = MovementDirection::NONE;
        m.insert(MovementDirection::FORWARD);
        m.insert(MovementDirection::LEFT);
        assert!(m.contains(MovementDirection::FORWARD | MovementDirection::LEFT));
        m.remove(MovementDirection::FORWARD);
        assert!(!m.contains(MovementDirection::FORWARD));
        assert!(m.contains(MovementDirection::LEFT));
        m.remove(MovementDirection::LEFT);
        assert!(m.is_empty());
    }

    #[test]
    fn test_resolve_diagonal_is_unit_length() {
        let m = MovementDirection::FORWARD | MovementDirection::RIGHT;
        let d = m.resolve(Vec3::NEG_Z, Vec3::X);
        assert_abs_diff_eq!(d.length(), 1.0, epsilon = 1e-6);
        assert!(d.x > 0.0 && d.z < 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let m = MovementDirection::FORWARD | MovementDirection::BACKWARD;
        assert_eq!(m.resolve(Vec3::NEG_Z, Vec3::X), Vec3::ZERO);
    }
}
