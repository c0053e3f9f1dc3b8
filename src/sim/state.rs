//! Game state and core simulation types
//!
//! Everything the renderer reads and the step mutates lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::tuning::{PlayerTuning, ProjectileTuning, Tuning, TuningError};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Player is dead; only a restart does anything
    GameOver,
}

/// Whether the player can currently take damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageState {
    Normal,
    Invulnerable,
}

/// Something that happened during a step, in the order it happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired { id: u32 },
    EnemySpawned { id: u32 },
    PickupSpawned { id: u32 },
    EnemyDestroyed { enemy_id: u32, projectile_id: u32, points: u64 },
    PickupCollected { id: u32, healed: bool },
    PlayerDamaged { enemy_id: u32, hp_remaining: u8 },
    GameOver { score: u64 },
    Restarted,
}

/// Cosmetic squash/stretch oscillation (never used for collision)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wobble {
    /// Current phase per axis (radians, wrapped to [0, 2π))
    pub phase: Vec2,
    /// Angular rate per axis (rad/s)
    pub rate: Vec2,
    /// Scale amplitude per axis
    pub amount: Vec2,
}

impl Wobble {
    pub fn advance(&mut self, dt: f32) {
        use std::f32::consts::TAU;
        self.phase = Vec2::new(
            (self.phase.x + self.rate.x * dt).rem_euclid(TAU),
            (self.phase.y + self.rate.y * dt).rem_euclid(TAU),
        );
    }

    /// Draw scale around the sprite center
    pub fn scale(&self) -> Vec2 {
        Vec2::new(
            1.0 + self.phase.x.sin() * self.amount.x,
            1.0 + self.phase.y.sin() * self.amount.y,
        )
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub hp: u8,
    pub max_hp: u8,
    /// Seconds of damage immunity left
    pub invulnerable: f32,
    /// Seconds of heal flash left (rendering only)
    pub heal_flash: f32,
    pub alive: bool,
    /// Trigger held this frame (selects the shooting sprite)
    pub firing: bool,
}

impl Player {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            pos: tuning.start,
            size: tuning.size,
            speed: tuning.speed,
            hp: tuning.max_hp,
            max_hp: tuning.max_hp,
            invulnerable: 0.0,
            heal_flash: 0.0,
            alive: true,
            firing: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn damage_state(&self) -> DamageState {
        if self.invulnerable > 0.0 {
            DamageState::Invulnerable
        } else {
            DamageState::Normal
        }
    }

    pub fn tick_timers(&mut self, dt: f32) {
        self.invulnerable = (self.invulnerable - dt).max(0.0);
        self.heal_flash = (self.heal_flash - dt).max(0.0);
    }

    /// Lose one hit point unless invulnerable. Returns true if damage landed.
    pub fn take_hit(&mut self, invulnerability: f32) -> bool {
        if self.damage_state() == DamageState::Invulnerable {
            return false;
        }
        self.hp = self.hp.saturating_sub(1);
        self.invulnerable = invulnerability;
        if self.hp == 0 {
            self.alive = false;
        }
        true
    }

    /// Regain one hit point if below max. Returns true if healed.
    pub fn heal(&mut self, flash: f32) -> bool {
        if self.hp >= self.max_hp {
            return false;
        }
        self.hp += 1;
        self.heal_flash = flash;
        true
    }

    pub fn kill(&mut self) {
        self.hp = 0;
        self.alive = false;
    }

    /// Where a new shot's top-left corner goes
    pub fn muzzle(&self, projectile: &ProjectileTuning) -> Vec2 {
        Vec2::new(
            self.pos.x + self.size.x - projectile.muzzle_inset,
            self.pos.y + (self.size.y - projectile.size.y) / 2.0 + projectile.muzzle_drop,
        )
    }
}

/// A player shot travelling right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Projectile {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// An enemy drifting left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub wobble: Wobble,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn drift(&mut self, dt: f32) {
        self.pos.x -= self.speed * dt;
        self.wobble.advance(dt);
    }
}

/// A heal item drifting left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub wobble: Wobble,
}

impl Pickup {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn drift(&mut self, dt: f32) {
        self.pos.x -= self.speed * dt;
        self.wobble.advance(dt);
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Live shots, oldest first
    pub projectiles: Vec<Projectile>,
    /// Live enemies, oldest first
    pub enemies: Vec<Enemy>,
    /// Live pickups, oldest first
    pub pickups: Vec<Pickup>,
    pub score: u64,
    /// Seconds until the next enemy spawn
    pub spawn_timer: f32,
    /// Steps simulated since the last reset
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game state with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            player: Player::new(&tuning.player),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            pickups: Vec::new(),
            score: 0,
            spawn_timer: 0.0,
            time_ticks: 0,
            next_id: 1,
            tuning,
        };
        state.reset();
        state
    }

    /// Start a fresh run. The RNG stream and id counter carry on.
    pub fn reset(&mut self) {
        self.projectiles.clear();
        self.enemies.clear();
        self.pickups.clear();

        self.player = Player::new(&self.tuning.player);
        let play = self.play_bounds();
        self.player.pos = super::aabb::clamp_inside(self.player.pos, self.player.size, &play);

        self.score = 0;
        self.spawn_timer = self.tuning.enemy.initial_delay;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The whole arena
    pub fn arena_bounds(&self) -> Aabb {
        Aabb::new(Vec2::ZERO, self.tuning.arena)
    }

    /// The arena minus the HUD band; the player never leaves it
    pub fn play_bounds(&self) -> Aabb {
        let top = self.tuning.play_top();
        Aabb::new(
            Vec2::new(0.0, top),
            Vec2::new(self.tuning.arena.x, self.tuning.arena.y - top),
        )
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Append one shot at the player's muzzle
    pub fn fire_projectile(&mut self) -> u32 {
        let id = self.next_entity_id();
        let shot = &self.tuning.projectile;
        let projectile = Projectile {
            id,
            pos: self.player.muzzle(shot),
            size: shot.size,
            speed: shot.speed,
        };
        self.projectiles.push(projectile);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_fresh() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.hp, 3);
        assert!(state.player.alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.spawn_timer, 0.3);
        assert_eq!(state.player.pos, Vec2::new(60.0, 200.0));
        assert_eq!(state.arena_bounds().right(), 800.0);
        assert_eq!(state.play_bounds().top(), 30.0);
        assert_eq!(state.play_bounds().bottom(), state.arena_bounds().bottom());
    }

    #[test]
    fn test_with_tuning_rejects_invalid() {
        let mut tuning = Tuning::default();
        tuning.projectile.speed = 0.0;
        assert!(GameState::with_tuning(1, tuning).is_err());
    }

    #[test]
    fn test_muzzle_position() {
        let state = GameState::new(1);
        let muzzle = state.player.muzzle(&state.tuning.projectile);
        // 60 + 62 - 6, 200 + (62 - 10) / 2 + 3
        assert_eq!(muzzle, Vec2::new(116.0, 229.0));
    }

    #[test]
    fn test_take_hit_and_invulnerability() {
        let mut player = Player::new(&PlayerTuning::default());
        assert!(player.take_hit(1.0));
        assert_eq!(player.hp, 2);
        assert_eq!(player.damage_state(), DamageState::Invulnerable);

        assert!(!player.take_hit(1.0));
        assert_eq!(player.hp, 2);

        player.tick_timers(1.0);
        assert_eq!(player.damage_state(), DamageState::Normal);
        assert!(player.take_hit(1.0));
        assert_eq!(player.hp, 1);
    }

    #[test]
    fn test_heal_capped_at_max() {
        let mut player = Player::new(&PlayerTuning::default());
        assert!(!player.heal(0.35));
        assert_eq!(player.heal_flash, 0.0);

        player.hp = 1;
        assert!(player.heal(0.35));
        assert_eq!(player.hp, 2);
        assert_eq!(player.heal_flash, 0.35);
    }

    #[test]
    fn test_wobble_phase_wraps() {
        let mut wobble = Wobble {
            phase: Vec2::new(6.0, 0.0),
            rate: Vec2::new(4.0, 4.0),
            amount: Vec2::new(0.1, 0.1),
        };
        wobble.advance(1.0);
        assert!(wobble.phase.x >= 0.0 && wobble.phase.x < std::f32::consts::TAU);
        let scale = wobble.scale();
        assert!(scale.x >= 0.9 && scale.x <= 1.1);
    }

    #[test]
    fn test_reset_keeps_id_counter() {
        let mut state = GameState::new(5);
        let first = state.fire_projectile();
        state.reset();
        assert!(state.projectiles.is_empty());
        let second = state.fire_projectile();
        assert!(second > first);
    }
}
