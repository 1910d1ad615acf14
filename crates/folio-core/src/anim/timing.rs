//! Time calculation utilities for pager animations
//!
//! Timestamps are host frame times in milliseconds; nothing here reads a clock.

/// Animation progress (0.0 to 1.0) at `now_ms` for an animation that began at `start_ms`
#[inline]
pub fn progress(start_ms: u64, now_ms: u64, duration_ms: u64) -> f32 {
    if duration_ms == 0 {
        return 1.0;
    }
    let elapsed = now_ms.saturating_sub(start_ms);
    (elapsed as f64 / duration_ms as f64).clamp(0.0, 1.0) as f32
}

/// Check if animation is complete
#[inline]
pub fn is_complete(start_ms: u64, now_ms: u64, duration_ms: u64) -> bool {
    now_ms.saturating_sub(start_ms) >= duration_ms
}
