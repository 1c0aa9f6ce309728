//! Frame clock
//!
//! Turns host frame timestamps into simulation `dt` in nominal-frame units.

use crate::consts::{MAX_DT, NOMINAL_FRAME_MS};

/// Clamp a delta to the range the integrator accepts.
///
/// Long frames (tab switches, hitches) are capped at `MAX_DT` so nothing can
/// tunnel through a thin obstacle; bogus values become 0.
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(MAX_DT)
    } else {
        0.0
    }
}

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Default)]
pub struct Clock {
    last_ms: Option<f64>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp (ms), get the clamped `dt` since the last one.
    /// The first frame yields 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / NOMINAL_FRAME_MS) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        clamp_dt(dt)
    }

    /// Forget the previous timestamp (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
