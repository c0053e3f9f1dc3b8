//! Per-frame intents consumed by the simulation step

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Held direction keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    /// Raw axis in {-1, 0, 1} per component; opposing keys cancel
    pub fn axis(&self) -> Vec2 {
        let x = self.right as i8 - self.left as i8;
        let y = self.down as i8 - self.up as i8;
        Vec2::new(x as f32, y as f32)
    }

    /// Unit-length heading, or zero when nothing (or only opposing keys) is held
    pub fn heading(&self) -> Vec2 {
        self.axis().normalize_or_zero()
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// How the player wants to move this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Movement {
    #[default]
    Idle,
    /// Keyboard / on-screen buttons
    Held(Directions),
    /// Touch drag: move the player's top-left corner to this arena position
    DragTo(Vec2),
}

/// Everything the input layer hands the simulation for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intents {
    pub movement: Movement,
    /// Discrete, already-debounced shots requested since the last frame
    pub fire_events: u32,
    /// Trigger currently held (sprite selection only)
    pub firing: bool,
    /// Start a new run (only honored after game over)
    pub restart: bool,
}

impl Intents {
    pub fn held(directions: Directions) -> Self {
        Self {
            movement: Movement::Held(directions),
            ..Default::default()
        }
    }

    pub fn fire() -> Self {
        Self {
            fire_events: 1,
            firing: true,
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposing_keys_cancel() {
        let dirs = Directions {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(dirs.axis(), Vec2::ZERO);
        assert_eq!(dirs.heading(), Vec2::ZERO);
        assert!(dirs.any());
    }

    #[test]
    fn test_diagonal_heading_is_unit_length() {
        let dirs = Directions {
            up: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(dirs.axis(), Vec2::new(1.0, -1.0));
        assert!((dirs.heading().length() - 1.0).abs() < 1e-6);
    }
}
