//! Input layer helpers
//!
//! Raw key/pointer capture belongs to the host. These types hold the
//! resulting held/pressed levels and turn them into one [`Intents`] per
//! frame, including the shot debouncing the simulation expects.

use glam::Vec2;

use crate::sim::input::{Directions, Intents, Movement};

/// Movement scheme, picked once at startup from device capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Direction keys or on-screen direction buttons
    #[default]
    Keyboard,
    /// Dragging a finger moves the ship
    Touch,
}

impl ControlMode {
    pub fn detect(touch_capable: bool) -> Self {
        if touch_capable {
            ControlMode::Touch
        } else {
            ControlMode::Keyboard
        }
    }
}

/// One of the four held directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Turns a "trigger held" level into discrete shots.
///
/// Without a repeat interval only the press edge fires. With one, holding
/// the trigger fires again every `interval` seconds (at most once a frame).
#[derive(Debug, Clone, Default)]
pub struct FireTrigger {
    held: bool,
    repeat_interval: Option<f32>,
    cooldown: f32,
}

impl FireTrigger {
    /// One shot per press
    pub fn single_shot() -> Self {
        Self::default()
    }

    /// Keep firing while held
    pub fn auto_repeat(interval: f32) -> Self {
        Self {
            repeat_interval: Some(interval.max(0.0)),
            ..Self::default()
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Feed this frame's trigger level; returns the number of shots to fire
    pub fn update(&mut self, held: bool, dt: f32) -> u32 {
        let pressed = held && !self.held;
        self.held = held;

        match self.repeat_interval {
            None => pressed as u32,
            Some(interval) => {
                self.cooldown = (self.cooldown - dt).max(0.0);
                if held && self.cooldown <= 0.0 {
                    self.cooldown = interval;
                    1
                } else {
                    0
                }
            }
        }
    }

    pub fn release(&mut self) {
        self.held = false;
        self.cooldown = 0.0;
    }
}

/// Accumulated input state between frames
#[derive(Debug, Clone)]
pub struct Controls {
    mode: ControlMode,
    directions: Directions,
    drag_target: Option<Vec2>,
    trigger_held: bool,
    trigger: FireTrigger,
    restart_requested: bool,
}

impl Controls {
    pub fn new(mode: ControlMode) -> Self {
        log::info!("Control mode: {:?}", mode);
        Self {
            mode,
            directions: Directions::default(),
            drag_target: None,
            trigger_held: false,
            trigger: FireTrigger::single_shot(),
            restart_requested: false,
        }
    }

    pub fn with_fire_trigger(mut self, trigger: FireTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn set_direction(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.directions.up = held,
            Direction::Down => self.directions.down = held,
            Direction::Left => self.directions.left = held,
            Direction::Right => self.directions.right = held,
        }
    }

    /// Pointer moved while pressed (arena coordinates)
    pub fn drag_to(&mut self, pos: Vec2) {
        self.drag_target = Some(pos);
    }

    pub fn end_drag(&mut self) {
        self.drag_target = None;
    }

    pub fn set_trigger(&mut self, held: bool) {
        self.trigger_held = held;
    }

    pub fn request_restart(&mut self) {
        self.restart_requested = true;
    }

    /// Drop every held key, drag and trigger (avoids stuck input after a restart)
    pub fn release_all(&mut self) {
        self.directions = Directions::default();
        self.drag_target = None;
        self.trigger_held = false;
        self.trigger.release();
    }

    /// Sample this frame's intents and clear one-shot signals
    pub fn frame_intents(&mut self, dt: f32) -> Intents {
        let movement = match self.mode {
            ControlMode::Keyboard => Movement::Held(self.directions),
            ControlMode::Touch => self.drag_target.map_or(Movement::Idle, Movement::DragTo),
        };

        Intents {
            movement,
            fire_events: self.trigger.update(self.trigger_held, dt),
            firing: self.trigger_held,
            restart: std::mem::take(&mut self.restart_requested),
        }
    }
}
