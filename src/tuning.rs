//! Data-driven game balance
//!
//! Every number the simulation uses lives here. `Tuning::default()` is the
//! shipped balance; a JSON file can override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning table
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Game balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_speed: f32,
    pub player_max_health: f32,
    pub fire_rate_ms: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub bullet_cull_margin: f32,
    pub bullet_damage: f32,

    // === Spawning ===
    pub spawn_interval_ms: f32,
    pub spawn_interval_floor_ms: f32,
    pub spawn_ramp: f32,
    pub spawn_edge_offset: f32,

    // === Enemies ===
    pub enemy_radius: f32,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    pub enemy_health: f32,
    pub contact_dps: f32,

    // === Safe zone ===
    pub zone_shrink_delay_ms: f32,
    pub zone_shrink_duration_ms: f32,
    pub zone_target_fraction: f32,
    pub zone_dps: f32,

    // === Clock ===
    /// Clamp applied to host frame deltas (`None` = uncapped)
    ///
    /// Uncapped by default; interactive hosts opt in with `MAX_FRAME_MS`.
    pub max_frame_ms: Option<f32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            fire_rate_ms: FIRE_RATE_MS,

            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            bullet_cull_margin: BULLET_CULL_MARGIN,
            bullet_damage: BULLET_DAMAGE,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_interval_floor_ms: SPAWN_INTERVAL_FLOOR_MS,
            spawn_ramp: SPAWN_RAMP,
            spawn_edge_offset: SPAWN_EDGE_OFFSET,

            enemy_radius: ENEMY_RADIUS,
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            enemy_health: ENEMY_HEALTH,
            contact_dps: CONTACT_DPS,

            zone_shrink_delay_ms: ZONE_SHRINK_DELAY_MS,
            zone_shrink_duration_ms: ZONE_SHRINK_DURATION_MS,
            zone_target_fraction: ZONE_TARGET_FRACTION,
            zone_dps: ZONE_DPS,

            max_frame_ms: None,
        }
    }
}

impl Tuning {
    /// Environment variable naming a JSON tuning file (native only)
    pub const ENV_VAR: &'static str = "MINI_ROYALE_TUNING";

    /// Parse a (possibly partial) JSON table and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and validate a JSON tuning file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning from `MINI_ROYALE_TUNING`, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Web builds always use the shipped balance
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    /// Check that the table describes a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("player_radius", self.player_radius),
            ("player_speed", self.player_speed),
            ("player_max_health", self.player_max_health),
            ("fire_rate_ms", self.fire_rate_ms),
            ("bullet_speed", self.bullet_speed),
            ("bullet_radius", self.bullet_radius),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("spawn_interval_floor_ms", self.spawn_interval_floor_ms),
            ("enemy_radius", self.enemy_radius),
            ("enemy_health", self.enemy_health),
            ("zone_shrink_duration_ms", self.zone_shrink_duration_ms),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be > 0, got {value}")));
            }
        }

        let non_negative = [
            ("bullet_damage", self.bullet_damage),
            ("bullet_cull_margin", self.bullet_cull_margin),
            ("spawn_edge_offset", self.spawn_edge_offset),
            ("contact_dps", self.contact_dps),
            ("zone_dps", self.zone_dps),
            ("zone_shrink_delay_ms", self.zone_shrink_delay_ms),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be >= 0, got {value}")));
            }
        }

        if self.spawn_interval_floor_ms > self.spawn_interval_ms {
            return Err(TuningError::Invalid(
                "spawn_interval_floor_ms cannot exceed spawn_interval_ms".to_string(),
            ));
        }
        if !(self.spawn_ramp > 0.0 && self.spawn_ramp < 1.0) {
            return Err(TuningError::Invalid(format!(
                "spawn_ramp must be in (0, 1), got {}",
                self.spawn_ramp
            )));
        }
        if !(self.zone_target_fraction > 0.0 && self.zone_target_fraction < 1.0) {
            return Err(TuningError::Invalid(format!(
                "zone_target_fraction must be in (0, 1), got {}",
                self.zone_target_fraction
            )));
        }
        if self.enemy_min_speed < 0.0 || self.enemy_max_speed <= self.enemy_min_speed {
            return Err(TuningError::Invalid(
                "enemy speed range must satisfy 0 <= min < max".to_string(),
            ));
        }
        if let Some(max) = self.max_frame_ms {
            if max.is_nan() || max <= 0.0 {
                return Err(TuningError::Invalid(format!("max_frame_ms must be > 0, got {max}")));
            }
        }
        Ok(())
    }

    /// This table if it validates, the shipped balance otherwise
    pub fn validated_or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Rejected tuning ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Initial (and largest) safe zone radius
    pub fn zone_start_radius(&self) -> f32 {
        self.arena_width.max(self.arena_height)
    }

    /// Final safe zone radius
    pub fn zone_target_radius(&self) -> f32 {
        self.arena_width.min(self.arena_height) * self.zone_target_fraction
    }
}
