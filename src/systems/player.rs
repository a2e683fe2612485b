use glam::Vec3;
use hecs::World;
use tracing::debug;

use super::resolution::{ActorContact, PlayerMove};
use crate::audio::{AudioSink, SoundSlot};
use crate::components::{Actor, MoveState, PlayerController};

/// Contacts with a normal this close to horizontal count as bumping into
/// something rather than standing on it.
const BUMP_MAX_NORMAL_Y: f32 = 0.5;

/// Write the input-driven velocity into the player's actor. Without focus the
/// player stands still.
pub fn apply_movement_input(world: &mut World, player: &PlayerController) {
    let velocity = if player.focused {
        player.desired_velocity()
    } else {
        Vec3::ZERO
    };
    if let Ok(mut actor) = world.get::<&mut Actor>(player.actor) {
        actor.set_movement_velocity(velocity);
    }
}

/// Start a jump if the player is on the ground. Returns whether it happened.
pub fn try_jump(world: &mut World, player: &mut PlayerController, impulse: f32, air_epsilon: f32) -> bool {
    let Ok(mut actor) = world.get::<&mut Actor>(player.actor) else {
        return false;
    };
    if actor.is_in_air(air_epsilon) {
        return false;
    }
    actor.set_gravitational_velocity(impulse);
    player.cues.jump_pending = true;
    debug!(impulse, "jump");
    true
}

/// Put the camera at the player's eye.
pub fn follow_camera(world: &World, player: &mut PlayerController, eye_offset: Vec3) {
    if let Ok(actor) = world.get::<&Actor>(player.actor) {
        player.camera.set_location(actor.location() + eye_offset);
    }
}

/// Feed the latest movement outcome into the player's state machine.
pub fn record_move_state(player: &mut PlayerController, state: MoveState, dt: f32) {
    let from = player.move_state();
    if player.move_fsm.go(state) {
        debug!(?from, to = ?state, "player movement state");
    }
    player.move_fsm.tick(dt);
}

/// Thresholds for [`play_player_cues`].
#[derive(Debug, Clone, Copy)]
pub struct CueSettings {
    pub air_epsilon: f32,
    pub impact_cue_speed: f32,
}

/// Start and stop the player's sounds. Looping cues are only touched when
/// their desired state changes.
pub fn play_player_cues(
    audio: &dyn AudioSink,
    world: &World,
    player: &mut PlayerController,
    movement: &PlayerMove,
    actor_contacts: &[ActorContact],
    settings: &CueSettings,
) {
    let Ok(actor) = world.get::<&Actor>(player.actor) else {
        return;
    };
    let moving = actor.movement_velocity() != Vec3::ZERO;
    let grounded = !actor.is_in_air(settings.air_epsilon);

    let walking = moving && grounded && movement.state != MoveState::Colliding;
    set_looping(audio, SoundSlot::Footsteps, &mut player.cues.footsteps, walking);

    let bumping = moving
        && movement.contacts.iter().any(|c| {
            c.partner_physics && c.response.penetration_info.collision_normal.y.abs() < BUMP_MAX_NORMAL_Y
        });
    set_looping(audio, SoundSlot::Bump, &mut player.cues.bump, bumping);

    if std::mem::take(&mut player.cues.jump_pending) {
        let _ = audio.play_source(SoundSlot::Jump.index());
    }

    let impact = actor_contacts
        .iter()
        .any(|c| c.first_contact && c.response.impact_velocity.length() > settings.impact_cue_speed);
    if impact {
        let _ = audio.play_source(SoundSlot::Impact.index());
    }
}

fn set_looping(audio: &dyn AudioSink, slot: SoundSlot, playing: &mut bool, want: bool) {
    if *playing == want {
        return;
    }
    if want {
        let _ = audio.play_source(slot.index());
    } else {
        audio.stop_source(slot.index());
    }
    *playing = want;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{PlayReceipt, SourceProperties};
    use crate::camera::Camera;
    use crate::components::{
        BasicCollisionResponse, CollisionProfile, DetailedCollisionResponse, MeshHandle, MovementDirection, Object,
        Transform,
    };
    use crate::config::CameraConfig;
    use crate::systems::resolution::PlayerContact;
    use std::cell::RefCell;
    use std::path::Path;

    #[derive(Default)]
    struct Recorder {
        log: RefCell<Vec<String>>,
    }

    impl AudioSink for Recorder {
        fn load_source(&self, slot: u8, _path: &Path) {
            self.log.borrow_mut().push(format!("load {slot}"));
        }
        fn play_source(&self, slot: u8) -> PlayReceipt {
            self.log.borrow_mut().push(format!("play {slot}"));
            PlayReceipt::ready(true)
        }
        fn stop_source(&self, slot: u8) {
            self.log.borrow_mut().push(format!("stop {slot}"));
        }
        fn set_source_properties(&self, slot: u8, _properties: SourceProperties) {
            self.log.borrow_mut().push(format!("props {slot}"));
        }
    }

    fn setup() -> (World, PlayerController) {
        let mut world = World::new();
        let actor = Actor::new(Object::from_vertices(MeshHandle(0), 0, &[]), Transform::new(Vec3::ZERO))
            .with_collision_profile(CollisionProfile::PLAYER)
            .with_physics(true);
        let handle = world.spawn((actor,));
        let player = PlayerController::new(handle, 3.0, Camera::new(&CameraConfig::default()));
        (world, player)
    }

    fn settings() -> CueSettings {
        CueSettings {
            air_epsilon: 1e-3,
            impact_cue_speed: 1.0,
        }
    }

    #[test]
    fn test_forward_input_moves_along_camera() {
        let (mut world, mut player) = setup();
        player.movement.insert(MovementDirection::FORWARD);
        apply_movement_input(&mut world, &player);
        let v = world.get::<&Actor>(player.actor).unwrap().movement_velocity();
        assert!((v - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-5);
    }

    #[test]
    fn test_unfocused_player_stands_still() {
        let (mut world, mut player) = setup();
        player.movement.insert(MovementDirection::FORWARD);
        player.focused = false;
        apply_movement_input(&mut world, &player);
        assert_eq!(world.get::<&Actor>(player.actor).unwrap().movement_velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let (mut world, mut player) = setup();
        assert!(try_jump(&mut world, &mut player, 4.5, 1e-3));
        assert_eq!(world.get::<&Actor>(player.actor).unwrap().gravitational_velocity(), 4.5);
        assert!(!try_jump(&mut world, &mut player, 4.5, 1e-3));
    }

    #[test]
    fn test_footsteps_start_once_and_stop() {
        let (mut world, mut player) = setup();
        let audio = Recorder::default();
        world
            .get::<&mut Actor>(player.actor)
            .unwrap()
            .set_movement_velocity(Vec3::X);

        let free = PlayerMove::default();
        play_player_cues(&audio, &world, &mut player, &free, &[], &settings());
        play_player_cues(&audio, &world, &mut player, &free, &[], &settings());
        world
            .get::<&mut Actor>(player.actor)
            .unwrap()
            .set_movement_velocity(Vec3::ZERO);
        play_player_cues(&audio, &world, &mut player, &free, &[], &settings());

        assert_eq!(*audio.log.borrow(), vec!["play 0".to_string(), "stop 0".to_string()]);
    }

    #[test]
    fn test_bump_needs_dynamic_horizontal_contact() {
        let (mut world, mut player) = setup();
        let audio = Recorder::default();
        world
            .get::<&mut Actor>(player.actor)
            .unwrap()
            .set_movement_velocity(Vec3::X);
        let other = world.spawn((0u32,));
        let movement = PlayerMove {
            state: MoveState::Colliding,
            location: Vec3::ZERO,
            contacts: vec![PlayerContact {
                partner: other,
                partner_physics: true,
                response: DetailedCollisionResponse {
                    penetration_info: BasicCollisionResponse::new(Vec3::NEG_X, 0.1),
                    ..DetailedCollisionResponse::default()
                },
            }],
        };
        play_player_cues(&audio, &world, &mut player, &movement, &[], &settings());
        assert_eq!(*audio.log.borrow(), vec!["play 2".to_string()]);
    }

    #[test]
    fn test_jump_cue_played_once() {
        let (mut world, mut player) = setup();
        let audio = Recorder::default();
        try_jump(&mut world, &mut player, 4.5, 1e-3);
        let free = PlayerMove::default();
        play_player_cues(&audio, &world, &mut player, &free, &[], &settings());
        play_player_cues(&audio, &world, &mut player, &free, &[], &settings());
        assert_eq!(*audio.log.borrow(), vec!["play 1".to_string()]);
    }

    #[test]
    fn test_state_transition_resets_timer() {
        let (_world, mut player) = setup();
        record_move_state(&mut player, MoveState::Free, 0.5);
        assert_eq!(player.move_fsm.elapsed(), 0.5);
        record_move_state(&mut player, MoveState::Sliding, 0.1);
        assert_eq!(player.move_state(), MoveState::Sliding);
        assert_eq!(*player.move_fsm.previous(), MoveState::Free);
    }
}
