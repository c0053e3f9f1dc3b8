//! Frame step
//!
//! Advances the simulation by one clamped frame delta.

use super::aabb::clamp_inside;
use super::collision::{first_enemy_contact, pickup_pass, projectile_enemy_pass};
use super::input::{Intents, Movement};
use super::spawn::update_spawner;
use super::state::{DamageState, GameEvent, GamePhase, GameState};
use crate::clamp_frame_dt;
use crate::tuning::DamagePolicy;

/// Advance the game state by one frame and report what happened.
///
/// While the game is over this only honors `intents.restart`.
pub fn advance(state: &mut GameState, intents: &Intents, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == GamePhase::GameOver {
        if intents.restart {
            state.reset();
            log::info!("Restarted (seed {})", state.seed);
            events.push(GameEvent::Restarted);
        }
        return events;
    }

    let dt = clamp_frame_dt(dt);
    state.time_ticks += 1;

    state.player.tick_timers(dt);
    move_player(state, intents, dt);

    for _ in 0..intents.fire_events {
        let id = state.fire_projectile();
        events.push(GameEvent::ProjectileFired { id });
    }

    let far_edge = state.arena_bounds().right();
    for projectile in &mut state.projectiles {
        projectile.pos.x += projectile.speed * dt;
    }
    state.projectiles.retain(|p| p.pos.x <= far_edge);

    update_spawner(state, dt, &mut events);

    for enemy in &mut state.enemies {
        enemy.drift(dt);
    }
    state.enemies.retain(|e| e.bounds().right() >= 0.0);

    for pickup in &mut state.pickups {
        pickup.drift(dt);
    }
    state.pickups.retain(|p| p.bounds().right() >= 0.0);

    resolve_collisions(state, &mut events);

    events
}

fn move_player(state: &mut GameState, intents: &Intents, dt: f32) {
    let play = state.play_bounds();
    let player = &mut state.player;
    player.firing = intents.firing;

    let target = match intents.movement {
        Movement::Idle => player.pos,
        Movement::Held(directions) => player.pos + directions.heading() * player.speed * dt,
        Movement::DragTo(target) => target,
    };

    // A non-finite drag target would poison the position forever
    if target.is_finite() {
        player.pos = clamp_inside(target, player.size, &play);
    }
}

fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let points = state.tuning.score_per_kill;
    for kill in projectile_enemy_pass(&mut state.enemies, &mut state.projectiles) {
        state.score += points;
        log::debug!("enemy {} destroyed, score {}", kill.enemy_id, state.score);
        events.push(GameEvent::EnemyDestroyed {
            enemy_id: kill.enemy_id,
            projectile_id: kill.projectile_id,
            points,
        });
    }

    let player_box = state.player.bounds();
    let heal_flash = state.tuning.player.heal_flash;
    for id in pickup_pass(&player_box, &mut state.pickups) {
        let healed = state.player.heal(heal_flash);
        events.push(GameEvent::PickupCollected { id, healed });
    }

    let Some(idx) = first_enemy_contact(&player_box, &state.enemies) else {
        return;
    };

    match state.tuning.damage_policy {
        DamagePolicy::InstantDeath => {
            state.player.kill();
        }
        DamagePolicy::HitPointsWithInvulnerability => {
            if state.player.damage_state() == DamageState::Invulnerable {
                return;
            }
            let enemy = state.enemies.remove(idx);
            state.player.take_hit(state.tuning.player.invulnerability);
            log::debug!("player hit by enemy {}, hp {}", enemy.id, state.player.hp);
            events.push(GameEvent::PlayerDamaged {
                enemy_id: enemy.id,
                hp_remaining: state.player.hp,
            });
        }
    }

    if !state.player.alive {
        state.phase = GamePhase::GameOver;
        log::info!("Game over, final score {}", state.score);
        events.push(GameEvent::GameOver { score: state.score });
    }
}
