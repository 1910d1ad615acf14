//! Time-based animation atoms used by the pager motions.
//!
//! - `easing` - interpolation curves mapping [0, 1] to [0, 1]
//! - `timing` - progress and interpolation from host frame timestamps
//! - `driver` - one generic driver advancing a motion with a per-frame callback
//! - `fling` - spline fling distance and duration for a release velocity

pub mod driver;
pub mod easing;
pub mod fling;
pub mod timing;

pub use driver::{Driver, Sample, Timeline};
pub use easing::{EasingType, EasingTypeExt};
pub use fling::{adjust_duration, FlingCurve, SplineFling};
