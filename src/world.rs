//! The simulated world: an arena of actors plus the player driving one of them.

use glam::{Mat4, Vec3};
use hecs::{Ref, RefMut};
use tracing::{debug, info, warn};

use crate::audio::AudioSink;
use crate::camera::Camera;
use crate::components::{
    Actor, ActorHandle, CollisionProfile, MeshHandle, MoveState, MovementDirection, Object, PlayerController,
    Transform,
};
use crate::config::SimulationConfig;
use crate::error::WorldError;
use crate::systems::{self, ActorContact, Capsule, CollisionSettings, CueSettings, CullStats};

/// Summary of one fixed update.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub move_state: MoveState,
    pub player_contacts: usize,
    pub actor_contacts: Vec<ActorContact>,
    pub at_rest: usize,
    pub visible: usize,
    pub culled: usize,
}

/// One visible actor, as the renderer needs it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    pub model: Mat4,
    pub mesh: MeshHandle,
    pub texture_id: u8,
}

/// Everything the renderer reads after an update.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub view: Mat4,
    pub projection: Mat4,
    pub resolution: (u32, u32),
    pub camera_location: Vec3,
    pub items: Vec<RenderItem>,
}

pub struct World {
    actors: hecs::World,
    player: PlayerController,
    config: SimulationConfig,
    settings: CollisionSettings,
    capsule: Capsule,
    resolution: (u32, u32),
}

impl World {
    /// Empty world with the player standing at `player_start`.
    pub fn new(config: SimulationConfig, player_start: Vec3) -> Self {
        let mut actors = hecs::World::new();
        let body = Actor::new(Object::from_vertices(MeshHandle(0), 0, &[]), Transform::new(player_start))
            .with_collision_profile(CollisionProfile::PLAYER)
            .with_physics(true);
        let handle = actors.spawn((body,));

        let mut camera = Camera::new(&config.camera);
        camera.set_location(player_start + config.camera.eye_offset);
        let player = PlayerController::new(handle, config.player_speed, camera);

        let capsule = Capsule::vertical(
            player_start,
            config.player_capsule.half_height,
            config.player_capsule.radius,
        );
        info!(start = ?player_start, "world created");

        Self {
            actors,
            player,
            settings: CollisionSettings::from_config(&config),
            capsule,
            config,
            resolution: (800, 600),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Arena
    // -----------------------------------------------------------------------

    pub fn spawn_actor(&mut self, actor: Actor) -> ActorHandle {
        if !actor.has_geometry() {
            warn!(location = ?actor.location(), "actor has no geometry, it will never collide or render");
        }
        let handle = self.actors.spawn((actor,));
        debug!(?handle, "actor spawned");
        handle
    }

    /// Remove an actor and every reference other actors hold to it.
    pub fn despawn_actor(&mut self, handle: ActorHandle) -> Result<Actor, WorldError> {
        if handle == self.player.actor {
            return Err(WorldError::PlayerRemoval);
        }
        let actor = self
            .actors
            .remove_one::<Actor>(handle)
            .map_err(|_| WorldError::UnknownActor)?;
        let _ = self.actors.despawn(handle);

        for (_entity, other) in self.actors.query_mut::<&mut Actor>() {
            other.forget_partner(handle);
        }
        debug!(?handle, "actor despawned");
        Ok(actor)
    }

    pub fn actor(&self, handle: ActorHandle) -> Result<Ref<'_, Actor>, WorldError> {
        self.actors.get::<&Actor>(handle).map_err(|_| WorldError::UnknownActor)
    }

    pub fn actor_mut(&mut self, handle: ActorHandle) -> Result<RefMut<'_, Actor>, WorldError> {
        self.actors.get::<&mut Actor>(handle).map_err(|_| WorldError::UnknownActor)
    }

    /// Number of actors, the player's included.
    pub fn actor_count(&self) -> usize {
        self.actors.len() as usize
    }

    pub fn handles(&self) -> Vec<ActorHandle> {
        self.actors.query::<&Actor>().iter().map(|(entity, _)| entity).collect()
    }

    // -----------------------------------------------------------------------
    // Player
    // -----------------------------------------------------------------------

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_handle(&self) -> ActorHandle {
        self.player.actor
    }

    pub fn player_location(&self) -> Vec3 {
        self.actor(self.player.actor)
            .map(|actor| actor.location())
            .unwrap_or_default()
    }

    pub fn set_movement_direction(&mut self, direction: MovementDirection) {
        self.player.movement = direction;
    }

    pub fn add_movement_direction(&mut self, direction: MovementDirection) {
        self.player.movement.insert(direction);
    }

    pub fn remove_movement_direction(&mut self, direction: MovementDirection) {
        self.player.movement.remove(direction);
    }

    /// Turn the view. Ignored while the window has no focus.
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        if self.player.focused {
            self.player.camera.look(yaw_delta, pitch_delta);
        }
    }

    pub fn jump(&mut self) -> bool {
        if !self.player.focused {
            return false;
        }
        systems::try_jump(
            &mut self.actors,
            &mut self.player,
            self.config.jump_impulse,
            self.config.air_epsilon,
        )
    }

    /// Losing focus releases every held movement key.
    pub fn set_focus(&mut self, focused: bool) {
        if !focused {
            self.player.movement = MovementDirection::NONE;
        }
        if self.player.focused != focused {
            info!(focused, "input focus changed");
        }
        self.player.focused = focused;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.resolution = (width, height);
        self.player.camera.set_aspect(width as f32 / height as f32);
    }

    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Advance the simulation by one fixed step of `dt` seconds.
    ///
    /// Order: input to velocity, gravity and kinematic motion, the player
    /// pass, the actor pass, velocity measurement, sound cues, then camera
    /// follow and culling.
    pub fn update(&mut self, dt: f32, audio: &dyn AudioSink) -> FrameReport {
        let player = self.player.actor;

        systems::apply_movement_input(&mut self.actors, &self.player);
        systems::integrate_actors(&mut self.actors, player, self.config.gravitational_acceleration, dt);

        let movement = systems::move_player_with_collision(&mut self.actors, player, self.capsule, &self.settings, dt);
        systems::record_move_state(&mut self.player, movement.state, dt);

        let reference = self.player_location();
        let actor_contacts = systems::collide_world_actors(&mut self.actors, reference, &self.settings);
        let at_rest = systems::measure_velocities(&mut self.actors, dt, self.config.rest_velocity_threshold);

        let cue_settings = CueSettings {
            air_epsilon: self.config.air_epsilon,
            impact_cue_speed: self.config.impact_cue_speed,
        };
        systems::play_player_cues(
            audio,
            &self.actors,
            &mut self.player,
            &movement,
            &actor_contacts,
            &cue_settings,
        );

        systems::follow_camera(&self.actors, &mut self.player, self.config.camera.eye_offset);
        let CullStats { visible, culled } = systems::frustum_cull_actors(&mut self.actors, self.player.camera.planes());

        FrameReport {
            move_state: movement.state,
            player_contacts: movement.contacts.len(),
            actor_contacts,
            at_rest,
            visible,
            culled,
        }
    }

    /// Re-run culling against the current camera without simulating.
    pub fn cull(&mut self) -> CullStats {
        systems::frustum_cull_actors(&mut self.actors, self.player.camera.planes())
    }

    pub fn render_frame(&self) -> RenderFrame {
        let camera = &self.player.camera;
        let items = self
            .actors
            .query::<&Actor>()
            .iter()
            .filter(|(_, actor)| !actor.is_culled() && actor.has_geometry())
            .map(|(_, actor)| RenderItem {
                model: actor.model_matrix(),
                mesh: actor.object().mesh,
                texture_id: actor.object().texture_id,
            })
            .collect();

        RenderFrame {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            resolution: self.resolution,
            camera_location: camera.location,
            items,
        }
    }
}
