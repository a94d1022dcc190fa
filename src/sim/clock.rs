//! Host timestamp to simulation delta

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Turns host frame timestamps into per-step deltas
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationClock {
    /// Timestamp of the previous tick (ms)
    last_ms: Option<f64>,
    /// Longest delta ever reported (`None` = uncapped)
    pub max_frame_ms: Option<f32>,
}

impl SimulationClock {
    pub fn new(max_frame_ms: Option<f32>) -> Self {
        Self {
            last_ms: None,
            max_frame_ms,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.max_frame_ms)
    }

    /// Record a host timestamp and return the delta since the previous one
    ///
    /// The first call only establishes the baseline and returns 0. Timestamps
    /// that go backwards yield 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0.0;
        };

        let dt = (now_ms - last).max(0.0) as f32;
        match self.max_frame_ms {
            Some(max) if dt > max => {
                log::debug!("Frame of {:.0}ms clamped to {:.0}ms", dt, max);
                max
            }
            _ => dt,
        }
    }

    /// Forget the baseline (e.g. after the host was suspended)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
