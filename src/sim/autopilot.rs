//! Idle/demo mode - a simple bot that plays the game
//!
//! Produces the same `InputSnapshot` a human would, so it exercises the full
//! step. Used by the headless runner and attract mode.

use glam::Vec2;

use super::state::GameState;
use super::tick::InputSnapshot;

/// Enemies closer than this make the bot back off
const DANGER_RADIUS: f32 = 90.0;
/// Stay this far inside the zone edge
const ZONE_COMFORT: f32 = 0.8;
/// Ignore tiny movement intents
const DEADZONE: f32 = 0.3;

/// Pick an input for the current state
pub fn autopilot_input(state: &GameState) -> InputSnapshot {
    let player = state.player.pos;

    // Target the closest enemy
    let nearest = state
        .enemies
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .partial_cmp(&b.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos);

    let to_center = state.zone.center - player;
    let desired = if to_center.length() > state.zone.radius * ZONE_COMFORT {
        // Get back into the zone first
        to_center.normalize_or_zero()
    } else if let Some(enemy) = nearest.filter(|e| e.distance(player) < DANGER_RADIUS) {
        // Back away, biased toward the center so we don't get pinned
        ((player - enemy).normalize_or_zero() + to_center.normalize_or_zero() * 0.5)
            .normalize_or_zero()
    } else {
        Vec2::ZERO
    };

    InputSnapshot {
        up: desired.y < -DEADZONE,
        down: desired.y > DEADZONE,
        left: desired.x < -DEADZONE,
        right: desired.x > DEADZONE,
        cursor: nearest,
        fire: nearest.is_some(),
    }
}
