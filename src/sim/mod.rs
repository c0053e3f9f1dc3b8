//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID, oldest first)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, clamp_inside};
pub use collision::{Kill, first_enemy_contact, pickup_pass, projectile_enemy_pass};
pub use input::{Directions, Intents, Movement};
pub use spawn::{spawn_enemy, spawn_pickup, update_spawner};
pub use state::{
    DamageState, Enemy, GameEvent, GamePhase, GameState, Pickup, Player, Projectile, Wobble,
};
pub use tick::advance;

impl GameState {
    /// Method form of [`advance`]
    pub fn advance(&mut self, intents: &Intents, dt: f32) -> Vec<GameEvent> {
        tick::advance(self, intents, dt)
    }
}
