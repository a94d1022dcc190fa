//! Simulation step
//!
//! Advances the game state by one host frame. The step is total: any input
//! snapshot (including an empty one) and any delta produce a valid state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{clamp_to_arena, within_margin};
use super::combat::{apply_zone_damage, compact, resolve_bullet_hits, update_enemies};
use super::spawn::update_spawns;
use super::state::{Bullet, GameEvent, GameState};
use crate::{angle_to, heading};

/// Input state for a single step
///
/// `Default` is "no keys held, cursor unchanged, not firing", which is also
/// how missing or partial input should be represented.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Cursor in arena coordinates (`None` keeps the previous aim point)
    pub cursor: Option<Vec2>,
    /// Fire button held
    pub fire: bool,
}

impl InputSnapshot {
    /// Movement intent as a unit vector (or zero)
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// Advance the game state by `dt_ms` milliseconds
///
/// Does nothing once the game is over. Events left over from the previous
/// step are discarded, so `state.events` only ever holds this step's events.
pub fn step(state: &mut GameState, input: &InputSnapshot, dt_ms: f32) {
    if state.game_over {
        return;
    }

    state.events.clear();
    state.elapsed_ms += dt_ms;

    move_player(state, input, dt_ms);
    try_fire(state, input);
    update_bullets(state, dt_ms);

    update_spawns(state, dt_ms);

    update_enemies(state, dt_ms);
    resolve_bullet_hits(state);
    compact(state);

    if let Some(event) = state.zone.update(state.elapsed_ms) {
        state.events.push(event);
    }
    apply_zone_damage(state, dt_ms);

    check_game_over(state);
}

/// Apply movement intent, then keep the player inside the arena
pub fn move_player(state: &mut GameState, input: &InputSnapshot, dt_ms: f32) {
    if let Some(cursor) = input.cursor {
        if cursor.is_finite() {
            state.player.aim = cursor;
        }
    }

    let arena = state.arena_size();
    let player = &mut state.player;
    player.pos += input.direction() * player.speed * dt_ms / 1000.0;
    player.pos = clamp_to_arena(player.pos, arena);
}

/// Fire one bullet toward the aim point if the cooldown has passed
///
/// Returns true when a bullet was spawned.
pub fn try_fire(state: &mut GameState, input: &InputSnapshot) -> bool {
    let player = &state.player;
    if !input.fire || state.elapsed_ms - player.last_fire_ms <= player.fire_rate_ms {
        return false;
    }

    let dir = heading(angle_to(player.pos, player.aim));
    let pos = player.pos + dir * player.radius;
    let vel = dir * state.tuning.bullet_speed;
    let radius = state.tuning.bullet_radius;

    state.player.last_fire_ms = state.elapsed_ms;
    let id = state.next_entity_id();
    state.bullets.push(Bullet {
        id,
        pos,
        vel,
        radius,
        spent: false,
    });
    state.events.push(GameEvent::ShotFired { bullet_id: id });
    true
}

/// Integrate bullet motion and drop bullets that left the arena margin
pub fn update_bullets(state: &mut GameState, dt_ms: f32) {
    let dt = dt_ms / 1000.0;
    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel * dt;
    }

    let arena = state.arena_size();
    let margin = state.tuning.bullet_cull_margin;
    state.bullets.retain(|b| within_margin(b.pos, arena, margin));
}

/// Freeze the run once the player's health is gone
///
/// Returns true on the step that ended the game.
pub fn check_game_over(state: &mut GameState) -> bool {
    if state.game_over || !state.player.is_dead() {
        return false;
    }

    state.player.health = 0.0;
    state.game_over = true;
    state.events.push(GameEvent::GameOver {
        elapsed_ms: state.elapsed_ms,
    });
    log::info!("Game over after {:.1}s", state.elapsed_ms / 1000.0);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, ZonePhase};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(Tuning::default(), 12345)
    }

    fn firing_at(cursor: Vec2) -> InputSnapshot {
        InputSnapshot {
            cursor: Some(cursor),
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_diagonal_movement_is_normalized() {
        let mut state = state();
        let input = InputSnapshot {
            up: true,
            right: true,
            ..Default::default()
        };
        step(&mut state, &input, 1000.0);
        let moved = state.player.pos - Vec2::new(400.0, 300.0);
        assert!((moved.length() - 180.0).abs() < 1e-3);
        assert!(moved.x > 0.0 && moved.y < 0.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut state = state();
        let input = InputSnapshot {
            left: true,
            right: true,
            ..Default::default()
        };
        step(&mut state, &input, 100.0);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_movement_clamped_to_arena() {
        let mut state = state();
        let input = InputSnapshot {
            left: true,
            down: true,
            ..Default::default()
        };
        for _ in 0..100 {
            step(&mut state, &input, 100.0);
        }
        assert_eq!(state.player.pos, Vec2::new(0.0, 600.0));
    }

    #[test]
    fn test_missing_cursor_keeps_aim() {
        let mut state = state();
        step(&mut state, &firing_at(Vec2::new(700.0, 300.0)), 10.0);
        step(&mut state, &InputSnapshot::default(), 10.0);
        assert_eq!(state.player.aim, Vec2::new(700.0, 300.0));

        let nan = InputSnapshot {
            cursor: Some(Vec2::new(f32::NAN, 3.0)),
            ..Default::default()
        };
        step(&mut state, &nan, 10.0);
        assert_eq!(state.player.aim, Vec2::new(700.0, 300.0));
    }

    #[test]
    fn test_no_fire_within_first_interval() {
        let mut state = state();
        step(&mut state, &firing_at(Vec2::new(700.0, 300.0)), 300.0);
        assert!(state.bullets.is_empty());
        step(&mut state, &firing_at(Vec2::new(700.0, 300.0)), 1.0);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_bullet_leaves_player_edge_toward_cursor() {
        let mut state = state();
        state.elapsed_ms = 1000.0;
        state.player.aim = Vec2::new(400.0, 100.0);
        assert!(try_fire(&mut state, &firing_at(Vec2::new(400.0, 100.0))));

        let b = &state.bullets[0];
        assert!((b.pos - Vec2::new(400.0, 288.0)).length() < 1e-3);
        assert!((b.vel - Vec2::new(0.0, -420.0)).length() < 1e-3);
        assert_eq!(b.radius, 4.0);
        assert_eq!(state.player.last_fire_ms, 1000.0);
    }

    #[test]
    fn test_fire_cadence_with_large_delta() {
        let mut state = state();
        // A single huge frame still yields only one bullet
        step(&mut state, &firing_at(Vec2::new(400.0, 0.0)), 5000.0);
        let fired = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ShotFired { .. }))
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_bullet_culled_outside_margin() {
        let mut state = state();
        state.bullets.push(Bullet {
            id: 900,
            pos: Vec2::new(845.0, 300.0),
            vel: Vec2::new(420.0, 0.0),
            radius: 4.0,
            spent: false,
        });
        update_bullets(&mut state, 10.0);
        assert_eq!(state.bullets.len(), 1); // 849.2 is still inside
        update_bullets(&mut state, 10.0);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_zone_starts_shrinking_at_delay() {
        let mut state = state();
        let idle = InputSnapshot::default();
        // Keep spawns out of the way
        state.spawner.interval_ms = f32::MAX;

        while state.elapsed_ms < 15_000.0 {
            step(&mut state, &idle, 100.0);
        }
        assert_eq!(state.zone.phase, ZonePhase::Dormant);
        assert_eq!(state.zone.radius, 800.0);

        step(&mut state, &idle, 100.0);
        assert!(matches!(state.zone.phase, ZonePhase::Shrinking { .. }));
        let started = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ZoneShrinkStarted { .. }))
            .count();
        assert_eq!(started, 1);

        let r1 = state.zone.radius;
        step(&mut state, &idle, 100.0);
        assert!(state.zone.radius < r1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_stationary_enemy_contact_for_one_second() {
        let mut state = state();
        let pos = state.player.pos;
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos,
            radius: 10.0,
            speed: 0.0,
            health: 20.0,
        });
        step(&mut state, &InputSnapshot::default(), 1000.0);
        assert_eq!(state.player.health, 88.0);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_negative_zone_dps_cannot_overheal() {
        // Bypasses `Tuning::validate`, which rejects this table
        let mut state = GameState::new(
            Tuning {
                zone_dps: -50.0,
                ..Default::default()
            },
            1,
        );
        state.zone.radius = 1.0;
        state.player.pos = Vec2::new(0.0, 0.0);
        step(&mut state, &InputSnapshot::default(), 1000.0);
        assert_eq!(state.player.health, state.player.max_health);
    }

    #[test]
    fn test_events_hold_latest_step_only() {
        let mut state = state();
        state.spawner.interval_ms = f32::MAX;
        let fire = firing_at(Vec2::new(700.0, 300.0));
        // Each 400ms step fires one shot; nothing drains in between
        for _ in 0..50 {
            step(&mut state, &fire, 400.0);
        }
        assert_eq!(state.events.len(), 1);
        assert!(matches!(state.events[0], GameEvent::ShotFired { .. }));
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = state();
        state.player.health = 0.5;
        state.zone.radius = 1.0;
        state.player.pos = Vec2::new(0.0, 0.0);

        // 18 HP/s outside the zone: 0.5 HP lasts well under 100ms
        step(&mut state, &InputSnapshot::default(), 100.0);
        assert!(state.game_over);
        assert_eq!(state.player.health, 0.0);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver { elapsed_ms: 100.0 }));

        let frozen_pos = state.player.pos;
        let frozen_elapsed = state.elapsed_ms;
        let input = InputSnapshot {
            right: true,
            fire: true,
            cursor: Some(Vec2::new(300.0, 300.0)),
            ..Default::default()
        };
        for _ in 0..10 {
            step(&mut state, &input, 500.0);
        }
        assert_eq!(state.player.pos, frozen_pos);
        assert_eq!(state.player.health, 0.0);
        assert_eq!(state.elapsed_ms, frozen_elapsed);
        assert!(state.bullets.is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_exact_zero_health_ends_game() {
        let mut state = state();
        state.player.health = 12.0;
        let pos = state.player.pos;
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos,
            radius: 10.0,
            speed: 0.0,
            health: 20.0,
        });
        step(&mut state, &InputSnapshot::default(), 1000.0);
        assert!(state.game_over);
        assert_eq!(state.player.health, 0.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = state();
        let mut b = state();
        let input = firing_at(Vec2::new(100.0, 100.0));
        for _ in 0..600 {
            step(&mut a, &input, 16.0);
            step(&mut b, &input, 16.0);
        }
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
        }
        assert_eq!(a.player.health, b.player.health);
    }

    fn arb_input() -> impl Strategy<Value = InputSnapshot> {
        (
            any::<[bool; 5]>(),
            prop::option::of((-100.0f32..900.0, -100.0f32..700.0)),
        )
            .prop_map(|(keys, cursor)| InputSnapshot {
                up: keys[0],
                down: keys[1],
                left: keys[2],
                right: keys[3],
                fire: keys[4],
                cursor: cursor.map(|(x, y)| Vec2::new(x, y)),
            })
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_arena(
            frames in prop::collection::vec((arb_input(), 0.0f32..400.0), 1..120)
        ) {
            let mut state = state();
            for (input, dt) in frames {
                step(&mut state, &input, dt);
                let p = state.player.pos;
                prop_assert!(p.x >= 0.0 && p.x <= 800.0);
                prop_assert!(p.y >= 0.0 && p.y <= 600.0);
            }
        }

        #[test]
        fn prop_health_in_range(
            frames in prop::collection::vec((arb_input(), 0.0f32..2_000.0), 1..200)
        ) {
            let mut state = state();
            for (input, dt) in frames {
                step(&mut state, &input, dt);
                prop_assert!(state.player.health >= 0.0);
                prop_assert!(state.player.health <= 100.0);
            }
        }

        #[test]
        fn prop_fire_cadence(dts in prop::collection::vec(1.0f32..250.0, 1..200)) {
            let mut state = state();
            state.spawner.interval_ms = f32::MAX;
            let input = firing_at(Vec2::new(400.0, 0.0));
            let mut last_shot: Option<f32> = None;
            for dt in dts {
                step(&mut state, &input, dt);
                for event in state.drain_events() {
                    if let GameEvent::ShotFired { .. } = event {
                        if let Some(prev) = last_shot {
                            prop_assert!(state.elapsed_ms - prev > 300.0);
                        }
                        last_shot = Some(state.elapsed_ms);
                    }
                }
            }
        }

        #[test]
        fn prop_bullets_within_margin(
            frames in prop::collection::vec((arb_input(), 0.0f32..300.0), 1..150)
        ) {
            let mut state = state();
            for (input, dt) in frames {
                step(&mut state, &input, dt);
                for b in &state.bullets {
                    prop_assert!(within_margin(b.pos, state.arena_size(), 50.0));
                }
            }
        }
    }
}
