//! Enemy spawning with a geometric pressure ramp

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, GameEvent, GameState};
use crate::tuning::Tuning;

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Spawn point `offset` units outside this edge, `t` (0..1) along it
    pub fn spawn_point(self, arena: Vec2, offset: f32, t: f32) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(-offset, t * arena.y),
            Edge::Right => Vec2::new(arena.x + offset, t * arena.y),
            Edge::Top => Vec2::new(t * arena.x, -offset),
            Edge::Bottom => Vec2::new(t * arena.x, arena.y + offset),
        }
    }
}

/// Spawn timer and current interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Time accumulated since the last spawn (ms)
    pub timer_ms: f32,
    /// Current gap between spawns (ms)
    pub interval_ms: f32,
    pub floor_ms: f32,
    pub ramp: f32,
}

impl SpawnScheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            timer_ms: 0.0,
            interval_ms: tuning.spawn_interval_ms,
            floor_ms: tuning.spawn_interval_floor_ms,
            ramp: tuning.spawn_ramp,
        }
    }

    /// Advance the timer; returns true when an enemy is due
    ///
    /// The interval only tightens on spawn events, and only while it is
    /// still above the floor.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        self.timer_ms += dt_ms;
        if self.timer_ms <= self.interval_ms {
            return false;
        }
        self.timer_ms = 0.0;
        if self.interval_ms > self.floor_ms {
            self.interval_ms *= self.ramp;
        }
        true
    }
}

/// Run the spawn scheduler for one step
pub fn update_spawns(state: &mut GameState, dt_ms: f32) {
    if state.spawner.advance(dt_ms) {
        spawn_enemy(state);
    }
}

/// Place one enemy just outside a random arena edge
pub fn spawn_enemy(state: &mut GameState) {
    let arena = state.arena_size();
    let edge = Edge::ALL[state.rng.random_range(0..Edge::ALL.len())];
    let t: f32 = state.rng.random();
    let pos = edge.spawn_point(arena, state.tuning.spawn_edge_offset, t);
    let speed = state
        .rng
        .random_range(state.tuning.enemy_min_speed..state.tuning.enemy_max_speed);

    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        radius: state.tuning.enemy_radius,
        speed,
        health: state.tuning.enemy_health,
    });
    state.events.push(GameEvent::EnemySpawned { enemy_id: id });
    log::debug!(
        "Enemy {} spawned at ({:.0}, {:.0}) from {:?}, next interval {:.0}ms",
        id,
        pos.x,
        pos.y,
        edge,
        state.spawner.interval_ms
    );
}
