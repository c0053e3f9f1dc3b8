//! Collision passes
//!
//! All tests are AABB overlap checks. Every pass walks its collections
//! oldest-first (ascending id, which is also `Vec` order), so when several
//! overlaps are possible at once the oldest entity wins.

use super::aabb::Aabb;
use super::state::{Enemy, Pickup, Projectile};

/// A projectile that destroyed an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub enemy_id: u32,
    pub projectile_id: u32,
}

/// Projectile vs enemy.
///
/// Each enemy is destroyed by at most one projectile per pass, and each
/// projectile destroys at most one enemy. Both are removed.
pub fn projectile_enemy_pass(
    enemies: &mut Vec<Enemy>,
    projectiles: &mut Vec<Projectile>,
) -> Vec<Kill> {
    let mut kills = Vec::new();
    enemies.retain(|enemy| {
        let bounds = enemy.bounds();
        let hit = projectiles
            .iter()
            .position(|p| p.bounds().overlaps(&bounds));
        match hit {
            Some(idx) => {
                let projectile = projectiles.remove(idx);
                kills.push(Kill {
                    enemy_id: enemy.id,
                    projectile_id: projectile.id,
                });
                false
            }
            None => true,
        }
    });
    kills
}

/// Player vs pickups. Every overlapping pickup is removed; returns their ids.
pub fn pickup_pass(player: &Aabb, pickups: &mut Vec<Pickup>) -> Vec<u32> {
    let mut collected = Vec::new();
    pickups.retain(|pickup| {
        if player.overlaps(&pickup.bounds()) {
            collected.push(pickup.id);
            false
        } else {
            true
        }
    });
    collected
}

/// Index of the oldest enemy touching the player, if any
pub fn first_enemy_contact(player: &Aabb, enemies: &[Enemy]) -> Option<usize> {
    enemies.iter().position(|e| player.overlaps(&e.bounds()))
}
