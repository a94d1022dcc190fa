//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - One `step` per host frame, run to completion
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod combat;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod zone;

pub use autopilot::autopilot_input;
pub use clock::SimulationClock;
pub use collision::{circles_overlap, clamp_to_arena, within_margin};
pub use spawn::{Edge, SpawnScheduler};
pub use state::{Bullet, Enemy, GameEvent, GameState, Player, RenderView, SafeZone, ZonePhase};
pub use tick::{InputSnapshot, check_game_over, step};
