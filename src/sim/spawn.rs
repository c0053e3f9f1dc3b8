//! Enemy and pickup spawning
//!
//! One spawn event per expired timer, never more: a long frame does not
//! queue up extra enemies.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState, Pickup, Wobble};
use crate::tuning::Span;

fn roll_wobble(rng: &mut impl Rng, rate: Span, amount: Span) -> Wobble {
    use std::f32::consts::TAU;
    Wobble {
        phase: Vec2::new(rng.random_range(0.0..TAU), rng.random_range(0.0..TAU)),
        rate: Vec2::new(rate.sample(rng), rate.sample(rng)),
        amount: Vec2::new(amount.sample(rng), amount.sample(rng)),
    }
}

/// Vertical spawn position for an entity of `height`, below the HUD band
fn roll_y(rng: &mut impl Rng, top: f32, arena_height: f32, height: f32) -> f32 {
    Span::new(top, arena_height - height).sample(rng)
}

/// Count the spawn timer down and spawn if it expired
pub fn update_spawner(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    state.spawn_timer -= dt;
    if state.spawn_timer > 0.0 {
        return;
    }
    state.spawn_timer = state.tuning.enemy.spawn_interval;

    let id = spawn_enemy(state);
    events.push(GameEvent::EnemySpawned { id });

    let chance = state.tuning.pickup.chance;
    if state.rng.random_bool(chance) {
        let id = spawn_pickup(state);
        events.push(GameEvent::PickupSpawned { id });
    }
}

/// Append one enemy just past the right edge
pub fn spawn_enemy(state: &mut GameState) -> u32 {
    let id = state.next_entity_id();
    let tuning = &state.tuning;
    let rng = &mut state.rng;

    let size = tuning.enemy.base_size * tuning.enemy.scale.sample(rng);
    let y = roll_y(rng, tuning.play_top(), tuning.arena.y, size.y);
    let enemy = Enemy {
        id,
        pos: Vec2::new(tuning.arena.x + tuning.enemy.spawn_offset, y),
        size,
        speed: tuning.enemy.speed.sample(rng),
        wobble: roll_wobble(rng, tuning.enemy.wobble_rate, tuning.enemy.wobble_amount),
    };

    log::debug!(
        "enemy {} spawned at y={:.1} size={:.1} speed={:.1}",
        id,
        enemy.pos.y,
        enemy.size.x,
        enemy.speed
    );
    state.enemies.push(enemy);
    id
}

/// Append one heal pickup just past the right edge
pub fn spawn_pickup(state: &mut GameState) -> u32 {
    let id = state.next_entity_id();
    let tuning = &state.tuning;
    let rng = &mut state.rng;

    let size = tuning.pickup.base_size * tuning.pickup.scale.sample(rng);
    let y = roll_y(rng, tuning.play_top(), tuning.arena.y, size.y);
    let pickup = Pickup {
        id,
        pos: Vec2::new(tuning.arena.x + tuning.pickup.spawn_offset, y),
        size,
        speed: tuning.pickup.speed.sample(rng),
        wobble: roll_wobble(rng, tuning.pickup.wobble_rate, tuning.pickup.wobble_amount),
    };

    log::debug!("pickup {} spawned at y={:.1}", id, pickup.pos.y);
    state.pickups.push(pickup);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_spawn_waits_for_timer() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();

        update_spawner(&mut state, 0.1, &mut events);
        assert!(state.enemies.is_empty());
        assert!(events.is_empty());

        update_spawner(&mut state, 0.25, &mut events);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_timer, state.tuning.enemy.spawn_interval);
        assert!(matches!(events[0], GameEvent::EnemySpawned { .. }));
    }

    #[test]
    fn test_no_catch_up_spawning() {
        let mut state = GameState::new(2);
        let mut events = Vec::new();
        update_spawner(&mut state, 100.0, &mut events);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_timer, state.tuning.enemy.spawn_interval);
    }

    #[test]
    fn test_enemy_spawn_ranges() {
        let mut state = GameState::new(3);
        for _ in 0..500 {
            spawn_enemy(&mut state);
        }
        let tuning = state.tuning.clone();
        for enemy in &state.enemies {
            assert_eq!(enemy.pos.x, tuning.arena.x + tuning.enemy.spawn_offset);
            assert!(enemy.pos.y >= tuning.hud_band);
            assert!(enemy.pos.y + enemy.size.y <= tuning.arena.y + 1e-3);
            assert!(enemy.size.x < tuning.enemy.base_size.x);
            assert!(enemy.size.y < tuning.enemy.base_size.y);
            assert!(tuning.enemy.speed.contains(enemy.speed));
            assert!(tuning.enemy.wobble_rate.contains(enemy.wobble.rate.x));
            assert!(tuning.enemy.wobble_amount.contains(enemy.wobble.amount.y));
        }
    }

    #[test]
    fn test_pickup_chance_extremes() {
        let mut tuning = Tuning::default();
        tuning.pickup.chance = 1.0;
        let mut state = GameState::with_tuning(4, tuning).unwrap();
        let mut events = Vec::new();
        update_spawner(&mut state, 1.0, &mut events);
        assert_eq!(state.pickups.len(), 1);
        assert!(matches!(events[1], GameEvent::PickupSpawned { .. }));

        let mut tuning = Tuning::default();
        tuning.pickup.chance = 0.0;
        let mut state = GameState::with_tuning(4, tuning).unwrap();
        for _ in 0..50 {
            update_spawner(&mut state, 1.0, &mut events);
        }
        assert_eq!(state.enemies.len(), 50);
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_pickup_uses_its_own_spawn_offset() {
        let mut tuning = Tuning::default();
        tuning.pickup.spawn_offset = 45.0;
        let mut state = GameState::with_tuning(9, tuning).unwrap();

        let enemy = spawn_enemy(&mut state);
        let pickup = spawn_pickup(&mut state);
        let arena_x = state.tuning.arena.x;
        assert_eq!(state.enemies[0].id, enemy);
        assert_eq!(state.enemies[0].pos.x, arena_x + 20.0);
        assert_eq!(state.pickups[0].id, pickup);
        assert_eq!(state.pickups[0].pos.x, arena_x + 45.0);
    }
}
