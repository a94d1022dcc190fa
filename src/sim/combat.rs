//! Enemy AI, collisions and damage
//!
//! Resolution is two-phase: hits are recorded on the entities first
//! (`Bullet::spent`, `Enemy::health`), then `compact` drops spent bullets and
//! dead enemies in one pass. A bullet is marked spent by the first enemy it
//! strikes and is skipped by every later check.

use super::collision::circles_overlap;
use super::state::{GameEvent, GameState};
use crate::{angle_to, heading};

/// Move every enemy toward the player and apply contact damage
pub fn update_enemies(state: &mut GameState, dt_ms: f32) {
    let dt = dt_ms / 1000.0;
    let target = state.player.pos;
    let contact_dps = state.tuning.contact_dps;

    let mut contact_damage = 0.0;
    for enemy in &mut state.enemies {
        // Heading is recomputed every step from the live player position
        let dir = heading(angle_to(enemy.pos, target));
        enemy.pos += dir * enemy.speed * dt;

        if circles_overlap(enemy.pos, enemy.radius, target, state.player.radius) {
            contact_damage += contact_dps * dt;
        }
    }

    if contact_damage > 0.0 {
        state.player.take_damage(contact_damage);
    }
}

/// Test every enemy against every live bullet
pub fn resolve_bullet_hits(state: &mut GameState) {
    let damage = state.tuning.bullet_damage;

    for enemy in &mut state.enemies {
        for bullet in state.bullets.iter_mut().filter(|b| !b.spent) {
            if circles_overlap(enemy.pos, enemy.radius, bullet.pos, bullet.radius) {
                enemy.health -= damage;
                bullet.spent = true;
            }
        }
    }
}

/// Drop spent bullets and dead enemies
pub fn compact(state: &mut GameState) {
    state.bullets.retain(|b| !b.spent);

    let events = &mut state.events;
    state.enemies.retain(|e| {
        if e.is_dead() {
            events.push(GameEvent::EnemyKilled { enemy_id: e.id });
            false
        } else {
            true
        }
    });
}

/// Continuous damage while the player stands outside the safe zone
pub fn apply_zone_damage(state: &mut GameState, dt_ms: f32) {
    if state.zone.is_outside(state.player.pos) {
        state.player.take_damage(state.tuning.zone_dps * dt_ms / 1000.0);
    }
}
