use glam::Vec2;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;
use sdl2::mouse::MouseButton;
use sdl2::EventPump;

use crate::components::MovementDirection;
use crate::config::LookConfig;

/// Platform-independent input, one per relevant SDL event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Move { direction: MovementDirection, pressed: bool },
    Jump,
    Look { dx: f32, dy: f32 },
    ReleaseFocus,
    GrabFocus,
    Quit,
}

fn direction_for(scancode: Scancode) -> Option<MovementDirection> {
    match scancode {
        Scancode::W => Some(MovementDirection::FORWARD),
        Scancode::S => Some(MovementDirection::BACKWARD),
        Scancode::A => Some(MovementDirection::LEFT),
        Scancode::D => Some(MovementDirection::RIGHT),
        _ => None,
    }
}

/// Map one SDL event onto the simulation's input vocabulary.
pub fn translate(event: &Event) -> Option<InputEvent> {
    match *event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::Window {
            win_event: WindowEvent::Close,
            ..
        } => Some(InputEvent::Quit),
        Event::KeyDown {
            scancode: Some(Scancode::Escape),
            ..
        } => Some(InputEvent::ReleaseFocus),
        Event::KeyDown {
            scancode: Some(Scancode::Space),
            repeat: false,
            ..
        } => Some(InputEvent::Jump),
        Event::KeyDown {
            scancode: Some(sc),
            repeat: false,
            ..
        } => direction_for(sc).map(|direction| InputEvent::Move {
            direction,
            pressed: true,
        }),
        Event::KeyUp {
            scancode: Some(sc), ..
        } => direction_for(sc).map(|direction| InputEvent::Move {
            direction,
            pressed: false,
        }),
        Event::MouseMotion { xrel, yrel, .. } => Some(InputEvent::Look {
            dx: xrel as f32,
            dy: yrel as f32,
        }),
        Event::MouseButtonDown {
            mouse_btn: MouseButton::Left,
            ..
        } => Some(InputEvent::GrabFocus),
        _ => None,
    }
}

/// Dead zone plus exponential smoothing for raw mouse deltas.
#[derive(Debug, Clone)]
pub struct LookFilter {
    dead_zone: f32,
    smoothing: f32,
    smoothed: Vec2,
}

impl LookFilter {
    pub fn new(config: &LookConfig) -> Self {
        Self {
            dead_zone: config.dead_zone,
            smoothing: config.smoothing.clamp(f32::EPSILON, 1.0),
            smoothed: Vec2::ZERO,
        }
    }

    /// Feed this frame's summed raw delta, get the delta to apply.
    pub fn filter(&mut self, dx: f32, dy: f32) -> Vec2 {
        let gate = |v: f32| if v.abs() < self.dead_zone { 0.0 } else { v };
        let raw = Vec2::new(gate(dx), gate(dy));
        self.smoothed += (raw - self.smoothed) * self.smoothing;
        if self.smoothed.length_squared() < 1e-6 {
            self.smoothed = Vec2::ZERO;
        }
        self.smoothed
    }

    pub fn reset(&mut self) {
        self.smoothed = Vec2::ZERO;
    }
}

/// Drains SDL events once per frame, summing look motion.
pub struct InputState {
    pub events: Vec<InputEvent>,
    pub look: Vec2,
    pub quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            look: Vec2::ZERO,
            quit: false,
        }
    }

    pub fn update(&mut self, event_pump: &mut EventPump) {
        self.events.clear();
        self.look = Vec2::ZERO;

        for event in event_pump.poll_iter() {
            match translate(&event) {
                Some(InputEvent::Look { dx, dy }) => self.look += Vec2::new(dx, dy),
                Some(InputEvent::Quit) => self.quit = true,
                Some(other) => self.events.push(other),
                None => {}
            }
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
