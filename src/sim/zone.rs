//! Safe zone shrink schedule
//!
//! Dormant -> Shrinking { started_at_ms } -> Settled. The radius only ever
//! moves toward the target.

use super::state::{GameEvent, SafeZone, ZonePhase};

impl SafeZone {
    /// Interpolation factor for the current phase (0 = full size, 1 = target)
    pub fn progress(&self, elapsed_ms: f32) -> f32 {
        match self.phase {
            ZonePhase::Dormant => 0.0,
            ZonePhase::Shrinking { started_at_ms } => {
                ((elapsed_ms - started_at_ms) / self.shrink_duration_ms).clamp(0.0, 1.0)
            }
            ZonePhase::Settled => 1.0,
        }
    }

    /// Advance the schedule to `elapsed_ms`
    ///
    /// Returns the transition event, if the phase changed this step.
    pub fn update(&mut self, elapsed_ms: f32) -> Option<GameEvent> {
        let mut event = None;

        if self.phase == ZonePhase::Dormant && elapsed_ms > self.shrink_delay_ms {
            self.phase = ZonePhase::Shrinking {
                started_at_ms: elapsed_ms,
            };
            log::info!("Safe zone shrinking at {:.0}ms", elapsed_ms);
            event = Some(GameEvent::ZoneShrinkStarted { elapsed_ms });
        }

        if let ZonePhase::Shrinking { .. } = self.phase {
            let t = self.progress(elapsed_ms);
            self.radius = self.start_radius + (self.target_radius - self.start_radius) * t;
            if t >= 1.0 {
                self.radius = self.target_radius;
                self.phase = ZonePhase::Settled;
                log::info!("Safe zone settled at radius {:.0}", self.radius);
                event = Some(GameEvent::ZoneSettled { elapsed_ms });
            }
        }

        event
    }
}
