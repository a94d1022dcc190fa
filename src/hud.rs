//! HUD text derived from the simulation state
//!
//! The host refreshes these strings after every step.

use serde::Serialize;

use crate::sim::GameState;

/// Ammo is never consumed
pub const AMMO_UNLIMITED: &str = "∞";

/// Values shown in the HUD bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudText {
    /// Whole hit points (floored)
    pub hp: i32,
    /// Whole seconds survived (floored)
    pub seconds: u32,
    pub ammo: &'static str,
}

impl HudText {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            hp: state.player.health.floor() as i32,
            seconds: (state.elapsed_ms / 1000.0).floor() as u32,
            ammo: AMMO_UNLIMITED,
        }
    }

    pub fn hp_label(&self) -> String {
        format!("HP: {}", self.hp)
    }

    pub fn time_label(&self) -> String {
        format!("Time: {}s", self.seconds)
    }

    pub fn ammo_label(&self) -> String {
        format!("Ammo: {}", self.ammo)
    }
}

/// Message shown once the run is over
pub fn final_message(state: &GameState) -> Option<String> {
    state
        .game_over
        .then(|| format!("You died. Time: {}s", HudText::from_state(state).seconds))
}
