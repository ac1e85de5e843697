//! Platform abstraction layer
//!
//! Turns browser/native frame timestamps into bounded simulation steps.

/// Converts frame timestamps (ms) into clamped deltas (s)
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous call, clamped to `[0, max_dt]`.
    /// The first call returns 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if dt.is_finite() {
            dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        }
    }

    /// Forget the previous timestamp (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new(0.05);
        assert_eq!(clock.advance(1234.0), 0.0);
    }

    #[test]
    fn test_delta_in_seconds() {
        let mut clock = FrameClock::new(0.05);
        clock.advance(1000.0);
        assert!((clock.advance(1016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_long_pause_is_clamped() {
        let mut clock = FrameClock::new(0.05);
        clock.advance(0.0);
        assert_eq!(clock.advance(5000.0), 0.05);
        // Time going backwards never produces a negative step
        assert_eq!(clock.advance(4000.0), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new(0.05);
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(30.0), 0.0);
    }
}
