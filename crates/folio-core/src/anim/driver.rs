//! Generic animation driver
//!
//! A [`Driver`] owns the start values of one motion plus a [`Timeline`]. The
//! host frame clock calls [`Driver::tick`] with the current time and a per-frame
//! callback; the callback receives the eased progress and applies the motion
//! from its fixed start values, so frames never accumulate error.

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, progress};

/// One sample of a timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Eased progress in [0, 1]
    pub progress: f32,
    /// True on the last sample, which always carries progress 1.0
    pub finished: bool,
}

/// Duration plus easing, anchored to the first frame it is sampled on
#[derive(Debug, Clone)]
pub struct Timeline {
    duration_ms: u64,
    easing: EasingType,
    start_ms: Option<u64>,
}

impl Timeline {
    pub fn new(duration_ms: u64, easing: EasingType) -> Self {
        Self {
            duration_ms,
            easing,
            start_ms: None,
        }
    }

    #[inline]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Sample the timeline at `now_ms`.
    ///
    /// The first call fixes the start time, so an animation started between
    /// frames begins at progress 0 on the next frame.
    pub fn sample(&mut self, now_ms: u64) -> Sample {
        let start = *self.start_ms.get_or_insert(now_ms);
        if is_complete(start, now_ms, self.duration_ms) {
            Sample {
                progress: 1.0,
                finished: true,
            }
        } else {
            let t = progress(start, now_ms, self.duration_ms);
            Sample {
                progress: self.easing.apply(t),
                finished: false,
            }
        }
    }
}

/// A motion `M` advanced over a timeline
#[derive(Debug, Clone)]
pub struct Driver<M> {
    timeline: Timeline,
    motion: M,
}

impl<M> Driver<M> {
    pub fn new(motion: M, duration_ms: u64, easing: EasingType) -> Self {
        Self {
            timeline: Timeline::new(duration_ms, easing),
            motion,
        }
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    pub fn duration_ms(&self) -> u64 {
        self.timeline.duration_ms()
    }

    /// Advance one frame, handing the motion and its eased progress to
    /// `on_frame`. Returns whether the driver is still running afterwards.
    pub fn tick<F>(&mut self, now_ms: u64, mut on_frame: F) -> bool
    where
        F: FnMut(&mut M, f32),
    {
        let sample = self.timeline.sample(now_ms);
        on_frame(&mut self.motion, sample.progress);
        !sample.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_anchors_start() {
        let mut timeline = Timeline::new(100, EasingType::Linear);
        let first = timeline.sample(5_000);
        assert_eq!(first.progress, 0.0);
        assert!(!first.finished);

        let mid = timeline.sample(5_050);
        assert!((mid.progress - 0.5).abs() < 0.001);

        let last = timeline.sample(5_100);
        assert_eq!(last.progress, 1.0);
        assert!(last.finished);
    }

    #[test]
    fn test_driver_runs_callback_until_finished() {
        let mut driver = Driver::new(Vec::new(), 20, EasingType::Linear);
        assert!(driver.tick(0, |seen: &mut Vec<f32>, p| seen.push(p)));
        assert!(driver.tick(10, |seen, p| seen.push(p)));
        assert!(!driver.tick(25, |seen, p| seen.push(p)));
        assert_eq!(driver.motion(), &vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_tick() {
        let mut driver = Driver::new(0u32, 0, EasingType::Cubic);
        let running = driver.tick(42, |count, p| {
            *count += 1;
            assert_eq!(p, 1.0);
        });
        assert!(!running);
        assert_eq!(*driver.motion(), 1);
    }
}
