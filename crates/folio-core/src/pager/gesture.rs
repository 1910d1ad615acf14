//! Gesture arbitration
//!
//! Each drag increment is routed, piece by piece, to the current image's pan,
//! to the offset engine, or to the edge glow, until nothing of it is left.

use super::mode::{Direction, Side};
use super::Pager;
use crate::host::{Edge, EdgeEffectSink, GalleryAdapter, GalleryHost, GalleryPage, ImageSurface};

/// Where the next piece of a drag increment goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    /// Pan (or zoom-pan) of the current image
    ImagePan,
    /// Page transition through the offset engine
    PageTransition,
    /// Overscroll glow on the edge being pulled
    EdgeBounce,
    /// Vertical gesture with the page at rest: nothing moves
    Drop,
}

/// First discrete zoom level strictly above `current`, wrapping to the
/// lowest level once the top is reached.
pub fn next_scale_level(levels: &[f32], current: f32) -> Option<f32> {
    levels
        .iter()
        .copied()
        .find(|&level| current < level)
        .or_else(|| levels.first().copied())
}

impl<H, A> Pager<H, A>
where
    H: GalleryHost,
    A: GalleryAdapter<H::Page>,
{
    /// Finger down: a new gesture starts and interrupts any animation
    pub fn on_down(&mut self) {
        self.delta_x = 0;
        self.delta_y = 0;
        self.first_scroll = true;
        self.stop_animation_finger = self.cancel_all_animations();
    }

    /// Finger up: release edge glows and settle a page caught mid-transition
    /// onto the nearer rest position.
    pub fn on_up(&mut self) {
        self.host.edges().on_release_all();

        if self.slots.current.is_none() || self.offset == 0 {
            return;
        }

        let width = self.host.width();
        let interval = self.config.interval_px;
        let offset = self.offset;
        let dx = if offset >= interval && self.has_side(Side::Left) {
            offset - width - interval
        } else if offset <= -interval && self.has_side(Side::Right) {
            offset + width + interval
        } else {
            offset
        };

        let page_delta =
            self.config.settle_page_factor * offset.abs() as f32 / (width + interval) as f32;
        let duration_ms = ((page_delta + 1.0) * self.config.settle_base_ms as f32) as u64;
        self.start_smooth_scroll(dx, 0, duration_ms);
    }

    /// Drag by `(dx, dy)` pixels with the finger at `(x, y)`
    pub fn on_scroll(&mut self, dx: f32, dy: f32, x: f32, y: f32) {
        if self.slots.current.is_none() {
            return;
        }

        if self.first_scroll {
            self.first_scroll = false;
            self.can_scroll_between_pages = dx.abs() > dy.abs() * self.config.horizontal_bias;
        }

        let mut need_fill = false;
        let mut can_image_scroll = true;
        let mut remain_x = dx as i32;
        let mut remain_y = dy as i32;

        while remain_x != 0 || remain_y != 0 {
            match self.route(remain_x, can_image_scroll) {
                Route::ImagePan => {
                    let Some(page) = self.current_page_mut() else {
                        break;
                    };
                    (remain_x, remain_y) = page.image_mut().scroll(remain_x, remain_y);
                    can_image_scroll = false;
                    self.delta_x = 0;
                    self.delta_y = 0;
                }
                Route::EdgeBounce => {
                    self.over_scroll_edge(remain_x, remain_y, x, y);
                    remain_x = 0;
                    remain_y = 0;
                }
                Route::PageTransition => {
                    remain_x = self.consume_delta(remain_x);
                    can_image_scroll = true;
                    need_fill = true;
                    self.delta_x = 0;
                    self.delta_y = 0;
                }
                Route::Drop => {
                    remain_x = 0;
                    remain_y = 0;
                    self.delta_x = 0;
                    self.delta_y = 0;
                }
            }
        }

        if need_fill {
            self.host.request_fill();
        }
    }

    fn route(&self, remain_x: i32, can_image_scroll: bool) -> Route {
        let at_rest = self.offset == 0;
        if at_rest && can_image_scroll {
            Route::ImagePan
        } else if remain_x == 0
            || (at_rest && remain_x < 0 && !self.has_side(Side::Left))
            || (at_rest && remain_x > 0 && !self.has_side(Side::Right))
        {
            Route::EdgeBounce
        } else if self.can_scroll_between_pages {
            Route::PageTransition
        } else {
            Route::Drop
        }
    }

    /// Accumulate overscroll and pull the glow on the side being dragged
    /// towards, releasing the opposite one.
    fn over_scroll_edge(&mut self, dx: i32, dy: i32, x: f32, y: f32) {
        self.delta_x = self.delta_x.saturating_add(dx);
        self.delta_y = self.delta_y.saturating_add(dy);
        let (delta_x, delta_y) = (self.delta_x, self.delta_y);

        let can_fling_vertically = self
            .current_page()
            .map(|page| page.image().can_fling_vertically())
            .unwrap_or(false);
        let edges = self.host.edges();

        if delta_x < 0 {
            edges.on_pull(delta_x.saturating_neg() as f32, y, Edge::Left);
            if !edges.is_finished(Edge::Right) {
                edges.on_release(Edge::Right);
            }
        } else if delta_x > 0 {
            edges.on_pull(delta_x as f32, y, Edge::Right);
            if !edges.is_finished(Edge::Left) {
                edges.on_release(Edge::Left);
            }
        }

        if can_fling_vertically {
            if delta_y < 0 {
                edges.on_pull(delta_y.saturating_neg() as f32, x, Edge::Top);
                if !edges.is_finished(Edge::Bottom) {
                    edges.on_release(Edge::Bottom);
                }
            } else if delta_y > 0 {
                edges.on_pull(delta_y as f32, x, Edge::Bottom);
                if !edges.is_finished(Edge::Top) {
                    edges.on_release(Edge::Top);
                }
            }
        }
    }

    /// Release velocity in px/s. Only a loaded, pannable image at rest flings.
    pub fn on_fling(&mut self, velocity_x: f32, velocity_y: f32) {
        if self.offset != 0 {
            return;
        }
        let Some(page) = self.current_page() else {
            return;
        };
        let image = page.image();
        if !image.is_loaded() || !image.can_fling() {
            return;
        }
        let (min_x, max_x) = (image.min_dx(), image.max_dx());
        let (min_y, max_y) = (image.min_dy(), image.max_dy());
        self.start_fling(
            velocity_x as i32,
            min_x,
            max_x,
            velocity_y as i32,
            min_y,
            max_y,
        );
    }

    /// Double tap: zoom the current image to its next default scale level
    pub fn on_double_tap_confirmed(&mut self, x: f32, y: f32) {
        let Some(page) = self.current_page() else {
            return;
        };
        let image = page.image();
        if !image.is_loaded() {
            return;
        }
        let scale = image.scale_value();
        let Some(end) = next_scale_level(&image.default_scales(), scale) else {
            return;
        };
        self.start_smooth_scale(x, y, scale, end, self.config.double_tap_scale_ms);
    }

    pub fn on_long_press(&mut self, _x: f32, _y: f32) {}

    /// Pinch zoom is allowed only on a loaded image with the page at rest
    pub fn can_scale(&self) -> bool {
        self.offset == 0
            && self
                .current_page()
                .map(|page| page.image().is_loaded())
                .unwrap_or(false)
    }

    /// Pinch zoom by `factor` around `(focus_x, focus_y)`
    pub fn on_scale(&mut self, focus_x: f32, focus_y: f32, factor: f32) {
        if !self.can_scale() {
            return;
        }
        if let Some(page) = self.current_page_mut() {
            page.image_mut().scale(focus_x, focus_y, factor);
        }
    }

    /// Turn to the page on the left, or bounce the left edge at the end
    pub fn page_left(&mut self) {
        self.page_towards(Side::Left);
    }

    /// Turn to the page on the right, or bounce the right edge at the end
    pub fn page_right(&mut self) {
        self.page_towards(Side::Right);
    }

    fn page_towards(&mut self, side: Side) {
        let Some(size) = self.content_state().page_count() else {
            return;
        };
        if self.slots.current.is_none() {
            return;
        }

        let target = match self.mode.direction(side) {
            Direction::Backward => self.index.checked_sub(1),
            Direction::Forward => (self.index + 1 < size).then_some(self.index + 1),
        };

        match target {
            Some(index) => self.set_current_index(index),
            None => {
                let edge = match side {
                    Side::Left => Edge::Left,
                    Side::Right => Edge::Right,
                };
                let width = self.host.width() as f32;
                let half_height = (self.host.height() / 2) as f32;
                let edges = self.host.edges();
                edges.on_pull(width, half_height, edge);
                edges.on_release(edge);
            }
        }
    }

    /// False while the gesture that stopped an animation is still down
    pub fn is_tap_or_press_enabled(&self) -> bool {
        !self.stop_animation_finger
    }
}
