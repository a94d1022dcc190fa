//! Mini Royale - A 2D arena survival shooter
//!
//! Core modules:
//! - `sim`: Simulation step (movement, spawning, combat, safe zone)
//! - `hud`: HUD text derived from the simulation state
//! - `tuning`: Data-driven game balance

pub mod hud;
pub mod sim;
pub mod tuning;

pub use hud::HudText;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Built-in balance values (see `Tuning::default`)
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 12.0;
    /// Units per second
    pub const PLAYER_SPEED: f32 = 180.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    /// Minimum gap between shots (ms)
    pub const FIRE_RATE_MS: f32 = 300.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 420.0;
    pub const BULLET_RADIUS: f32 = 4.0;
    /// Bullets are culled once this far outside the arena
    pub const BULLET_CULL_MARGIN: f32 = 50.0;

    /// Spawn pressure ramp
    pub const SPAWN_INTERVAL_MS: f32 = 2000.0;
    pub const SPAWN_INTERVAL_FLOOR_MS: f32 = 600.0;
    pub const SPAWN_RAMP: f32 = 0.98;
    /// Enemies appear this far outside the chosen edge
    pub const SPAWN_EDGE_OFFSET: f32 = 20.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 10.0;
    pub const ENEMY_MIN_SPEED: f32 = 50.0;
    pub const ENEMY_MAX_SPEED: f32 = 110.0;
    pub const ENEMY_HEALTH: f32 = 20.0;

    /// Damage values
    pub const BULLET_DAMAGE: f32 = 30.0;
    /// HP per second while touching an enemy
    pub const CONTACT_DPS: f32 = 12.0;
    /// HP per second while outside the safe zone
    pub const ZONE_DPS: f32 = 18.0;

    /// Safe zone schedule
    pub const ZONE_SHRINK_DELAY_MS: f32 = 15_000.0;
    pub const ZONE_SHRINK_DURATION_MS: f32 = 90_000.0;
    /// Final radius as a fraction of min(width, height)
    pub const ZONE_TARGET_FRACTION: f32 = 0.2;

    /// Frame clamp the web host opts into (stalled tabs, debugger pauses)
    pub const MAX_FRAME_MS: f32 = 250.0;
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle (radians) of the direction from `from` to `to`
///
/// Coincident points yield 0 (same as `atan2(0, 0)`).
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
