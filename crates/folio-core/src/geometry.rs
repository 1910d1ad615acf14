//! Pixel geometry and numeric helpers shared by the pager and its hosts.

/// Axis-aligned rectangle in host pixels, right and bottom exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Hit test, matching half-open pixel bounds.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_empty() && x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Rectangle of `width` x `height` centred inside `self`.
    pub fn centered(&self, width: i32, height: i32) -> Rect {
        let left = self.left + (self.width() - width) / 2;
        let top = self.top + (self.height() - height) / 2;
        Rect::new(left, top, left + width, top + height)
    }
}

/// Clamp `value` into `[min, max]`. A collapsed interval (`min == max`)
/// pins the value.
#[inline]
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    value.max(min).min(max)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
