//! Gameplay tuning
//!
//! Every balance constant the simulation reads lives here so a run can be
//! re-tuned from a JSON file without touching the step code. Missing fields
//! fall back to the defaults below.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// What happens when the player touches an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DamagePolicy {
    /// Any contact ends the run immediately
    InstantDeath,
    /// Contact costs one hit point, then a short invulnerability window
    #[default]
    HitPointsWithInvulnerability,
}

impl DamagePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DamagePolicy::InstantDeath => "InstantDeath",
            DamagePolicy::HitPointsWithInvulnerability => "HitPointsWithInvulnerability",
        }
    }
}

/// Inclusive `[min, max]` range sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Top-left position after a reset
    pub start: Vec2,
    pub size: Vec2,
    /// Units per second
    pub speed: f32,
    pub max_hp: u8,
    /// Seconds of damage immunity after a hit
    pub invulnerability: f32,
    /// Seconds the heal flash stays on after collecting a pickup
    pub heal_flash: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            start: Vec2::new(60.0, 200.0),
            size: Vec2::new(62.0, 62.0),
            speed: 260.0,
            max_hp: 3,
            invulnerability: 1.0,
            heal_flash: 0.35,
        }
    }
}

/// Player shots
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub size: Vec2,
    pub speed: f32,
    /// How far back from the player's right edge the shot appears
    pub muzzle_inset: f32,
    /// Vertical nudge below the player's center line
    pub muzzle_drop: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(44.0, 10.0),
            speed: 420.0,
            muzzle_inset: 6.0,
            muzzle_drop: 3.0,
        }
    }
}

/// Enemy spawning and motion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Size of the full sprite; spawned enemies are a scaled-down copy
    pub base_size: Vec2,
    pub scale: Span,
    pub speed: Span,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Delay before the first spawn after a reset
    pub initial_delay: f32,
    /// Distance past the right edge where enemies appear
    pub spawn_offset: f32,
    /// Wobble angular rate (rad/s), per axis
    pub wobble_rate: Span,
    /// Wobble scale amplitude, per axis
    pub wobble_amount: Span,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            base_size: Vec2::new(48.0, 48.0),
            scale: Span::new(0.55, 0.95),
            speed: Span::new(120.0, 280.0),
            spawn_interval: 0.65,
            initial_delay: 0.3,
            spawn_offset: 20.0,
            wobble_rate: Span::new(4.0, 7.0),
            wobble_amount: Span::new(0.06, 0.10),
        }
    }
}

/// Heal pickups
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    /// Chance of a pickup riding along with each enemy spawn
    pub chance: f64,
    pub base_size: Vec2,
    pub scale: Span,
    pub speed: Span,
    pub wobble_rate: Span,
    pub wobble_amount: Span,
    /// Distance past the right edge where pickups appear
    pub spawn_offset: f32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            chance: 0.12,
            base_size: Vec2::new(28.0, 28.0),
            scale: Span::new(0.8, 1.0),
            speed: Span::new(90.0, 150.0),
            wobble_rate: Span::new(2.5, 3.5),
            wobble_amount: Span::new(0.08, 0.12),
            spawn_offset: 20.0,
        }
    }
}

/// Complete gameplay tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Logical arena size
    pub arena: Vec2,
    /// Height of the reserved HUD strip at the top of the arena
    pub hud_band: f32,
    pub score_per_kill: u64,
    pub damage_policy: DamagePolicy,
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub enemy: EnemyTuning,
    pub pickup: PickupTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            hud_band: 30.0,
            score_per_kill: 10,
            damage_policy: DamagePolicy::default(),
            player: PlayerTuning::default(),
            projectile: ProjectileTuning::default(),
            enemy: EnemyTuning::default(),
            pickup: PickupTuning::default(),
        }
    }
}

/// Why a tuning could not be used
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    /// The JSON did not parse into a `Tuning`
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value parsed but breaks a gameplay invariant
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive number"))
    }
}

fn positive_size(field: &'static str, size: Vec2) -> Result<(), TuningError> {
    if size.is_finite() && size.x > 0.0 && size.y > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "both dimensions must be positive"))
    }
}

fn ordered(field: &'static str, span: Span) -> Result<(), TuningError> {
    if span.is_ordered() {
        Ok(())
    } else {
        Err(invalid(field, "min must not exceed max"))
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Top edge of the playable area
    pub fn play_top(&self) -> f32 {
        self.hud_band
    }

    /// Check the invariants the simulation step relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        positive_size("arena", self.arena)?;
        if !self.hud_band.is_finite() || self.hud_band < 0.0 {
            return Err(invalid("hud_band", "must be zero or positive"));
        }

        let player = &self.player;
        positive_size("player.size", player.size)?;
        positive("player.speed", player.speed)?;
        if player.max_hp == 0 {
            return Err(invalid("player.max_hp", "must be at least 1"));
        }
        if !player.invulnerability.is_finite() || player.invulnerability < 0.0 {
            return Err(invalid("player.invulnerability", "must be zero or positive"));
        }
        if !player.heal_flash.is_finite() || player.heal_flash < 0.0 {
            return Err(invalid("player.heal_flash", "must be zero or positive"));
        }
        if player.size.x > self.arena.x || self.hud_band + player.size.y > self.arena.y {
            return Err(invalid("player.size", "player must fit inside the arena"));
        }
        if !player.start.is_finite() {
            return Err(invalid("player.start", "must be finite"));
        }

        let projectile = &self.projectile;
        positive_size("projectile.size", projectile.size)?;
        positive("projectile.speed", projectile.speed)?;

        let enemy = &self.enemy;
        positive_size("enemy.base_size", enemy.base_size)?;
        ordered("enemy.scale", enemy.scale)?;
        // Spawned enemies are always smaller than the base sprite
        if enemy.scale.min <= 0.0 || enemy.scale.max >= 1.0 {
            return Err(invalid("enemy.scale", "must lie in (0, 1)"));
        }
        ordered("enemy.speed", enemy.speed)?;
        positive("enemy.speed.min", enemy.speed.min)?;
        positive("enemy.spawn_interval", enemy.spawn_interval)?;
        if !enemy.initial_delay.is_finite() || enemy.initial_delay < 0.0 {
            return Err(invalid("enemy.initial_delay", "must be zero or positive"));
        }
        if !enemy.spawn_offset.is_finite() || enemy.spawn_offset < 0.0 {
            return Err(invalid("enemy.spawn_offset", "must be zero or positive"));
        }
        ordered("enemy.wobble_rate", enemy.wobble_rate)?;
        ordered("enemy.wobble_amount", enemy.wobble_amount)?;
        if self.hud_band + enemy.base_size.y * enemy.scale.max > self.arena.y {
            return Err(invalid("enemy.base_size", "enemies must fit below the HUD band"));
        }

        let pickup = &self.pickup;
        if !(0.0..=1.0).contains(&pickup.chance) {
            return Err(invalid("pickup.chance", "must lie in [0, 1]"));
        }
        positive_size("pickup.base_size", pickup.base_size)?;
        ordered("pickup.scale", pickup.scale)?;
        if pickup.scale.min <= 0.0 {
            return Err(invalid("pickup.scale", "must be positive"));
        }
        ordered("pickup.speed", pickup.speed)?;
        positive("pickup.speed.min", pickup.speed.min)?;
        if !pickup.spawn_offset.is_finite() || pickup.spawn_offset < 0.0 {
            return Err(invalid("pickup.spawn_offset", "must be zero or positive"));
        }
        ordered("pickup.wobble_rate", pickup.wobble_rate)?;
        ordered("pickup.wobble_amount", pickup.wobble_amount)?;
        if self.hud_band + pickup.base_size.y * pickup.scale.max > self.arena.y {
            return Err(invalid("pickup.base_size", "pickups must fit below the HUD band"));
        }

        Ok(())
    }
}
