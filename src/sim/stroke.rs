//! Aiming and the power meter
//!
//! Holding the charge control makes power sweep 0 → 1 → 0 → ... until it is
//! released; the power at release is what the shot gets.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default aim: straight down the fairway toward -z
pub const DEFAULT_AIM_ANGLE: f32 = std::f32::consts::PI;

/// Unit horizontal direction for an aim angle (0 = +z, π/2 = +x)
#[inline]
pub fn aim_direction(angle: f32) -> Vec3 {
    Vec3::new(angle.sin(), 0.0, angle.cos()).normalize_or_zero()
}

/// Oscillating power meter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotCharge {
    pub power: f32,
    pub charging: bool,
    rising: bool,
}

impl Default for ShotCharge {
    fn default() -> Self {
        Self {
            power: 0.0,
            charging: false,
            rising: true,
        }
    }
}

impl ShotCharge {
    /// Start charging from zero. Returns false if already charging.
    pub fn begin(&mut self) -> bool {
        if self.charging {
            return false;
        }
        self.charging = true;
        self.rising = true;
        self.power = 0.0;
        true
    }

    /// Sweep power by `rate * dt`, bouncing off 0 and 1
    pub fn update(&mut self, dt: f32, rate: f32) {
        if !self.charging {
            return;
        }
        if self.rising {
            self.power += dt * rate;
            if self.power >= 1.0 {
                self.power = 1.0;
                self.rising = false;
            }
        } else {
            self.power -= dt * rate;
            if self.power <= 0.0 {
                self.power = 0.0;
                self.rising = true;
            }
        }
    }

    /// Stop charging and hand back the power, if a charge was running
    pub fn release(&mut self) -> Option<f32> {
        if !self.charging {
            return None;
        }
        let power = self.power;
        self.cancel();
        Some(power)
    }

    pub fn cancel(&mut self) {
        self.charging = false;
        self.rising = true;
        self.power = 0.0;
    }
}
