//! Game state and core simulation types
//!
//! `GameState` is the single simulation context: the step mutates it through
//! `&mut`, renderers and the HUD read it through `&` once the step is done.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::SpawnScheduler;
use crate::angle_to;
use crate::tuning::Tuning;

/// Things that happened during a step, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player fired a bullet
    ShotFired { bullet_id: u32 },
    /// A new enemy entered at an arena edge
    EnemySpawned { enemy_id: u32 },
    /// An enemy's health dropped to zero
    EnemyKilled { enemy_id: u32 },
    /// Safe zone left its dormant phase
    ZoneShrinkStarted { elapsed_ms: f32 },
    /// Safe zone reached its final radius
    ZoneSettled { elapsed_ms: f32 },
    /// Player health reached zero; the run is over
    GameOver { elapsed_ms: f32 },
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Units per second
    pub speed: f32,
    /// 0..=max_health
    pub health: f32,
    pub max_health: f32,
    /// Minimum gap between shots (ms)
    pub fire_rate_ms: f32,
    /// Elapsed time of the last shot (0 before the first)
    pub last_fire_ms: f32,
    /// Last known cursor position, in arena coordinates
    pub aim: Vec2,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let center = Vec2::new(tuning.arena_width / 2.0, tuning.arena_height / 2.0);
        Self {
            pos: center,
            radius: tuning.player_radius,
            speed: tuning.player_speed,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            fire_rate_ms: tuning.fire_rate_ms,
            last_fire_ms: 0.0,
            aim: center,
        }
    }

    /// Facing angle (radians) toward the last cursor position
    pub fn aim_angle(&self) -> f32 {
        angle_to(self.pos, self.aim)
    }

    /// Subtract health, staying within `[0, max_health]`
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, self.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// A bullet fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Struck an enemy this step; removed at compaction
    #[serde(skip)]
    pub spent: bool,
}

/// A homing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Units per second
    pub speed: f32,
    pub health: f32,
}

impl Enemy {
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// Safe zone schedule phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZonePhase {
    /// Full size, waiting for the shrink delay to pass
    Dormant,
    /// Interpolating toward the target radius
    Shrinking { started_at_ms: f32 },
    /// Pinned at the target radius
    Settled,
}

/// The shrinking safe circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeZone {
    pub center: Vec2,
    pub radius: f32,
    pub start_radius: f32,
    pub target_radius: f32,
    pub shrink_delay_ms: f32,
    pub shrink_duration_ms: f32,
    pub phase: ZonePhase,
}

impl SafeZone {
    pub fn new(tuning: &Tuning) -> Self {
        let start_radius = tuning.zone_start_radius();
        Self {
            center: Vec2::new(tuning.arena_width / 2.0, tuning.arena_height / 2.0),
            radius: start_radius,
            start_radius,
            target_radius: tuning.zone_target_radius(),
            shrink_delay_ms: tuning.zone_shrink_delay_ms,
            shrink_duration_ms: tuning.zone_shrink_duration_ms,
            phase: ZonePhase::Dormant,
        }
    }

    /// Whether a point lies strictly outside the circle
    pub fn is_outside(&self, pos: Vec2) -> bool {
        pos.distance(self.center) > self.radius
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance table this run was started with
    pub tuning: Tuning,
    /// Run seed
    pub seed: u64,
    /// Spawn RNG, seeded from `seed`
    pub rng: Pcg32,
    /// Simulated time since start (ms)
    pub elapsed_ms: f32,
    /// Set once by the game-over gate; freezes the simulation
    pub game_over: bool,
    pub player: Player,
    /// Live bullets (ordered by id)
    pub bullets: Vec<Bullet>,
    /// Live enemies (ordered by id)
    pub enemies: Vec<Enemy>,
    pub zone: SafeZone,
    pub spawner: SpawnScheduler,
    /// Events produced by the latest step (cleared when the next step starts)
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Start a fresh run
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            player: Player::new(&tuning),
            zone: SafeZone::new(&tuning),
            spawner: SpawnScheduler::new(&tuning),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            elapsed_ms: 0.0,
            game_over: false,
            bullets: Vec::new(),
            enemies: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Arena size as (width, height)
    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.tuning.arena_width, self.tuning.arena_height)
    }

    /// Take the latest step's events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only snapshot for renderers
    pub fn view(&self) -> RenderView {
        RenderView {
            player: self.player.clone(),
            aim_angle: self.player.aim_angle(),
            bullets: self.bullets.clone(),
            enemies: self.enemies.clone(),
            zone_center: self.zone.center,
            zone_radius: self.zone.radius,
            game_over: self.game_over,
        }
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderView {
    pub player: Player,
    pub aim_angle: f32,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub zone_center: Vec2,
    pub zone_radius: f32,
    pub game_over: bool,
}
