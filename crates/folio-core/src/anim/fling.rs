//! Spline fling physics
//!
//! Distance and duration a fling travels for a given release velocity, using
//! the inflexion-point spline model touch platforms use for scroll flings.

use crate::config::FlingConfig;

/// Pure function interface from release velocity to fling extent
pub trait FlingCurve {
    /// Unsigned distance in pixels travelled for `velocity` px/s
    fn distance(&self, velocity: f64) -> f64;

    /// Duration in milliseconds for `velocity` px/s
    fn duration_ms(&self, velocity: f64) -> u64;
}

const GRAVITY_EARTH: f64 = 9.80665;
const INCHES_PER_METER: f64 = 39.37;
const INFLEXION: f64 = 0.35;

/// Spline fling curve parameterised by friction and screen density
#[derive(Debug, Clone)]
pub struct SplineFling {
    friction: f64,
    physical_coeff: f64,
    deceleration_rate: f64,
}

impl SplineFling {
    pub fn new(config: &FlingConfig) -> Self {
        Self {
            friction: config.scroll_friction,
            physical_coeff: GRAVITY_EARTH * INCHES_PER_METER * config.pixels_per_inch * 0.84,
            deceleration_rate: 0.78_f64.ln() / 0.9_f64.ln(),
        }
    }

    fn deceleration(&self, velocity: f64) -> f64 {
        (INFLEXION * velocity.abs() / (self.friction * self.physical_coeff)).ln()
    }
}

impl Default for SplineFling {
    fn default() -> Self {
        Self::new(&FlingConfig::default())
    }
}

impl FlingCurve for SplineFling {
    fn distance(&self, velocity: f64) -> f64 {
        if velocity == 0.0 {
            return 0.0;
        }
        let l = self.deceleration(velocity);
        let rate = self.deceleration_rate;
        self.friction * self.physical_coeff * (rate / (rate - 1.0) * l).exp()
    }

    fn duration_ms(&self, velocity: f64) -> u64 {
        if velocity == 0.0 {
            return 0;
        }
        let l = self.deceleration(velocity);
        (1000.0 * (l / (self.deceleration_rate - 1.0)).exp()) as u64
    }
}

/// Shorten `duration_ms` for a fling from `start` to `end` that is cut off at
/// `clamped`, proportionally to the distance still travelled.
pub fn adjust_duration(start: i32, end: i32, clamped: i32, duration_ms: u64) -> u64 {
    let full = (end - start) as f64;
    if full == 0.0 {
        return 0;
    }
    let ratio = ((clamped - start) as f64 / full).clamp(0.0, 1.0);
    (duration_ms as f64 * ratio) as u64
}
