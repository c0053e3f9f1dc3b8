//! Side Shooter - simulation core for a single-screen side-scrolling shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `controls`: Turns raw held/pressed signals into per-frame intents

pub mod controls;
pub mod sim;
pub mod tuning;

pub use controls::{ControlMode, Controls, FireTrigger};
pub use tuning::{DamagePolicy, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical arena size. Everything is simulated in these units.
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 450.0;

    /// Upper bound for a single frame's dt (prevents jumps after a stall)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Step used by the headless runner
    pub const RUNNER_DT: f32 = 1.0 / 60.0;
}

/// Clamp a raw frame delta (seconds) into `[0, MAX_FRAME_DT]`.
///
/// Negative and NaN deltas (clock skew, first frame) become zero.
#[inline]
pub fn clamp_frame_dt(raw_secs: f32) -> f32 {
    if raw_secs.is_nan() || raw_secs <= 0.0 {
        0.0
    } else {
        raw_secs.min(consts::MAX_FRAME_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_frame_dt() {
        assert_eq!(clamp_frame_dt(-1.0), 0.0);
        assert_eq!(clamp_frame_dt(f32::NAN), 0.0);
        assert_eq!(clamp_frame_dt(0.01), 0.01);
        assert_eq!(clamp_frame_dt(5.0), consts::MAX_FRAME_DT);
    }
}
