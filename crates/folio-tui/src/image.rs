//! Virtual page image with pan and zoom
//!
//! The terminal cannot show real pixels, so each page carries a virtual image
//! that fits its viewport at scale 1.0 and tracks pan and zoom exactly like a
//! decoded bitmap would. The renderer draws it as a tiled pattern.

use folio_core::geometry::Rect;
use folio_core::host::ImageSurface;

const DEFAULT_SCALES: [f32; 3] = [1.0, 2.0, 4.0];
const MIN_SCALE: f32 = 1.0;
const MAX_SCALE: f32 = 8.0;

#[derive(Debug, Clone)]
pub struct VirtualImage {
    viewport: Rect,
    loaded: bool,
    scale: f32,
    /// Content origin relative to the viewport's top-left corner
    pan_x: f32,
    pan_y: f32,
}

impl Default for VirtualImage {
    fn default() -> Self {
        Self {
            viewport: Rect::default(),
            loaded: false,
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl VirtualImage {
    /// Mark the image decoded and reset its transform
    pub fn load(&mut self) {
        self.loaded = true;
        self.scale = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    pub fn unload(&mut self) {
        self.loaded = false;
    }

    /// Follow the page's layout; the transform keeps its content offset
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.clamp_pan();
    }

    pub fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    fn content_size(&self) -> (f32, f32) {
        (
            self.viewport.width() as f32 * self.scale,
            self.viewport.height() as f32 * self.scale,
        )
    }

    /// Allowed pan range per axis, `(min, max)`
    fn pan_range(&self) -> ((f32, f32), (f32, f32)) {
        let (content_w, content_h) = self.content_size();
        let min_x = (self.viewport.width() as f32 - content_w).min(0.0);
        let min_y = (self.viewport.height() as f32 - content_h).min(0.0);
        ((min_x, 0.0), (min_y, 0.0))
    }

    fn clamp_pan(&mut self) {
        let ((min_x, max_x), (min_y, max_y)) = self.pan_range();
        self.pan_x = self.pan_x.clamp(min_x, max_x);
        self.pan_y = self.pan_y.clamp(min_y, max_y);
    }
}

impl ImageSurface for VirtualImage {
    fn scroll(&mut self, dx: i32, dy: i32) -> (i32, i32) {
        if !self.loaded {
            return (dx, dy);
        }
        let (old_x, old_y) = (self.pan_x, self.pan_y);
        self.pan_x -= dx as f32;
        self.pan_y -= dy as f32;
        self.clamp_pan();
        let moved_x = (old_x - self.pan_x).round() as i32;
        let moved_y = (old_y - self.pan_y).round() as i32;
        (dx - moved_x, dy - moved_y)
    }

    fn scale(&mut self, focus_x: f32, focus_y: f32, factor: f32) {
        if !self.loaded {
            return;
        }
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = new_scale / self.scale;
        let fx = focus_x - self.viewport.left as f32;
        let fy = focus_y - self.viewport.top as f32;
        self.pan_x = fx - (fx - self.pan_x) * ratio;
        self.pan_y = fy - (fy - self.pan_y) * ratio;
        self.scale = new_scale;
        self.clamp_pan();
    }

    fn scale_value(&self) -> f32 {
        self.scale
    }

    fn default_scales(&self) -> Vec<f32> {
        DEFAULT_SCALES.to_vec()
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn can_fling_horizontally(&self) -> bool {
        let ((min_x, _), _) = self.pan_range();
        min_x < 0.0
    }

    fn can_fling_vertically(&self) -> bool {
        let (_, (min_y, _)) = self.pan_range();
        min_y < 0.0
    }

    // A fling displacement d is applied as scroll(-d), moving the pan by +d.
    fn min_dx(&self) -> i32 {
        let ((min_x, _), _) = self.pan_range();
        (min_x - self.pan_x).round() as i32
    }

    fn max_dx(&self) -> i32 {
        let ((_, max_x), _) = self.pan_range();
        (max_x - self.pan_x).round() as i32
    }

    fn min_dy(&self) -> i32 {
        let (_, (min_y, _)) = self.pan_range();
        (min_y - self.pan_y).round() as i32
    }

    fn max_dy(&self) -> i32 {
        let (_, (_, max_y)) = self.pan_range();
        (max_y - self.pan_y).round() as i32
    }
}
