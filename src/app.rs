use sdl2::Sdl;
use tracing::{debug, info};

use crate::audio::AudioSink;
use crate::engine::input::{InputEvent, InputState, LookFilter};
use crate::engine::time::{FixedTimestep, FrameTimer, SystemClock};
use crate::engine::window::GameWindow;
use crate::error::EngineError;
use crate::renderer::mesh::create_box;
use crate::renderer::{MeshStore, Renderer};
use crate::world::{FrameReport, World};

/// Seconds between periodic frame statistics in the log.
const STATS_INTERVAL: f32 = 1.0;

pub struct GameApp {
    world: World,
    meshes: MeshStore,
    renderer: Renderer,
    audio: Box<dyn AudioSink>,
    timestep: FixedTimestep,
    look_filter: LookFilter,
    last_report: Option<FrameReport>,
    stats_elapsed: f32,
    frames: u32,
}

impl GameApp {
    /// Needs the window's GL context to be current.
    pub fn new(world: World, audio: Box<dyn AudioSink>) -> Result<Self, EngineError> {
        let config = world.config();
        let timestep = FixedTimestep::new(config.fixed_timestep, config.max_steps_per_frame);
        let look_filter = LookFilter::new(&config.look);

        // Prefabs all reference the first mesh, the unit cube.
        let mut meshes = MeshStore::new();
        meshes.add(create_box(1.0, 1.0, 1.0));

        Ok(Self {
            world,
            meshes,
            renderer: Renderer::init()?,
            audio,
            timestep,
            look_filter,
            last_report: None,
            stats_elapsed: 0.0,
            frames: 0,
        })
    }

    pub fn run(&mut self, sdl: &Sdl, window: &GameWindow) -> Result<(), EngineError> {
        self.set_focus(sdl, true);
        let mut event_pump = sdl.event_pump().map_err(EngineError::Sdl)?;
        let mut input = InputState::new();
        let mut timer = FrameTimer::new(SystemClock::new());

        loop {
            timer.tick();
            input.update(&mut event_pump);
            if input.quit {
                info!("quit requested");
                break;
            }

            self.handle_input(sdl, &input);

            let (width, height) = window.size();
            self.world.set_viewport(width, height);

            let step = self.timestep.step();
            for _ in 0..self.timestep.advance(timer.dt) {
                let report = self.world.update(step, &*self.audio);
                self.last_report = Some(report);
            }
            self.log_stats(timer.dt);

            let frame = self.world.render_frame();
            self.renderer.draw_frame(&frame, &self.meshes);
            window.swap();
        }
        Ok(())
    }

    fn handle_input(&mut self, sdl: &Sdl, input: &InputState) {
        let focused = self.world.player().focused;
        for event in &input.events {
            match *event {
                InputEvent::Move { direction, pressed } => {
                    if !pressed {
                        self.world.remove_movement_direction(direction);
                    } else if focused {
                        self.world.add_movement_direction(direction);
                    }
                }
                InputEvent::Jump => {
                    self.world.jump();
                }
                InputEvent::ReleaseFocus => self.set_focus(sdl, false),
                InputEvent::GrabFocus => self.set_focus(sdl, true),
                // summed into `input.look` / handled by the loop
                InputEvent::Look { .. } | InputEvent::Quit => {}
            }
        }

        if self.world.player().focused {
            let look = self.look_filter.filter(input.look.x, input.look.y);
            self.world.look(look.x, look.y);
        }
    }

    fn set_focus(&mut self, sdl: &Sdl, focused: bool) {
        sdl.mouse().set_relative_mouse_mode(focused);
        self.look_filter.reset();
        self.world.set_focus(focused);
    }

    fn log_stats(&mut self, dt: f32) {
        self.frames += 1;
        self.stats_elapsed += dt;
        if self.stats_elapsed < STATS_INTERVAL {
            return;
        }
        if let Some(report) = &self.last_report {
            debug!(
                fps = self.frames as f32 / self.stats_elapsed,
                state = ?report.move_state,
                visible = report.visible,
                culled = report.culled,
                at_rest = report.at_rest,
                "frame stats"
            );
        }
        self.frames = 0;
        self.stats_elapsed = 0.0;
    }
}
