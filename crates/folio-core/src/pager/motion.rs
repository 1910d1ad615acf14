//! Pager animations
//!
//! A single [`Motion`] value holds whichever animation is running, so the
//! settle scroll, the image fling and the double-tap zoom can never overlap:
//! starting one replaces the other, and a replaced driver is dropped before
//! it can tick again.

use super::mode::Side;
use super::Pager;
use crate::anim::{adjust_duration, Driver};
use crate::geometry::lerp;
use crate::host::{EdgeEffectSink, Edge, GalleryAdapter, GalleryHost, GalleryPage, ImageSurface};

/// Which animation is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Scroll,
    Fling,
    Scale,
}

#[derive(Debug, Default)]
pub(crate) enum Motion {
    #[default]
    Idle,
    Scrolling(Driver<ScrollMotion>),
    Flinging(Driver<FlingMotion>),
    Scaling(Driver<ScaleMotion>),
}

impl Motion {
    fn kind(&self) -> Option<AnimationKind> {
        match self {
            Motion::Idle => None,
            Motion::Scrolling(_) => Some(AnimationKind::Scroll),
            Motion::Flinging(_) => Some(AnimationKind::Fling),
            Motion::Scaling(_) => Some(AnimationKind::Scale),
        }
    }
}

/// Settle scroll of the page offset
#[derive(Debug, Clone)]
pub(crate) struct ScrollMotion {
    dx: i32,
    dy: i32,
    last_x: i32,
    last_y: i32,
}

/// Inertial pan of the current image
#[derive(Debug, Clone)]
pub(crate) struct FlingMotion {
    velocity_x: i32,
    velocity_y: i32,
    dx: i32,
    dy: i32,
    last_x: i32,
    last_y: i32,
}

/// Zoom of the current image around a focus point
#[derive(Debug, Clone)]
pub(crate) struct ScaleMotion {
    focus_x: f32,
    focus_y: f32,
    start: f32,
    end: f32,
    last: f32,
}

impl<H, A> Pager<H, A>
where
    H: GalleryHost,
    A: GalleryAdapter<H::Page>,
{
    /// Animation currently running, if any
    pub fn active_animation(&self) -> Option<AnimationKind> {
        self.motion.kind()
    }

    /// Stop whatever animation is running. Returns whether one was.
    pub fn cancel_all_animations(&mut self) -> bool {
        let cancelled = std::mem::take(&mut self.motion).kind();
        if let Some(kind) = cancelled {
            tracing::debug!(?kind, "Animation cancelled");
        }
        cancelled.is_some()
    }

    /// Advance the running animation to `now_ms`. Returns whether another
    /// frame is needed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let mut motion = std::mem::take(&mut self.motion);
        let running = match &mut motion {
            Motion::Idle => false,
            Motion::Scrolling(driver) => {
                driver.tick(now_ms, |scroll, progress| self.scroll_frame(scroll, progress))
            }
            Motion::Flinging(driver) => {
                let running =
                    driver.tick(now_ms, |fling, progress| self.fling_frame(fling, progress));
                if !running {
                    self.fling_finished(driver.motion());
                }
                running
            }
            Motion::Scaling(driver) => {
                driver.tick(now_ms, |scale, progress| self.scale_frame(scale, progress))
            }
        };
        if running {
            self.motion = motion;
        }
        running
    }

    /// Animate the page offset by `(dx, dy)` pixels over `duration_ms`
    pub fn start_smooth_scroll(&mut self, dx: i32, dy: i32, duration_ms: u64) {
        self.cancel_all_animations();
        tracing::debug!(dx, duration_ms, "Start settle scroll");
        let scroll = ScrollMotion {
            dx,
            dy,
            last_x: 0,
            last_y: 0,
        };
        self.motion = Motion::Scrolling(Driver::new(
            scroll,
            duration_ms,
            self.config.scroll_easing,
        ));
        self.host.invalidate();
    }

    /// Fling the current image with a release velocity in px/s. Each axis
    /// travels its spline distance, clamped to the image's pan bounds.
    pub(crate) fn start_fling(
        &mut self,
        velocity_x: i32,
        min_x: i32,
        max_x: i32,
        velocity_y: i32,
        min_y: i32,
        max_y: i32,
    ) {
        let curve = &self.fling_curve;
        let signum = |v: i32| v.signum() as f64;
        let mut dx = (curve.distance(velocity_x as f64) * signum(velocity_x)) as i32;
        let mut dy = (curve.distance(velocity_y as f64) * signum(velocity_y)) as i32;
        let mut duration_x = curve.duration_ms(velocity_x as f64);
        let mut duration_y = curve.duration_ms(velocity_y as f64);

        if dx < min_x {
            duration_x = adjust_duration(0, dx, min_x, duration_x);
            dx = min_x;
        }
        if dx > max_x {
            duration_x = adjust_duration(0, dx, max_x, duration_x);
            dx = max_x;
        }
        if dy < min_y {
            duration_y = adjust_duration(0, dy, min_y, duration_y);
            dy = min_y;
        }
        if dy > max_y {
            duration_y = adjust_duration(0, dy, max_y, duration_y);
            dy = max_y;
        }

        if dx == 0 && dy == 0 {
            return;
        }

        self.cancel_all_animations();
        let duration_ms = duration_x.max(duration_y);
        tracing::debug!(dx, dy, duration_ms, "Start fling");
        let fling = FlingMotion {
            velocity_x,
            velocity_y,
            dx,
            dy,
            last_x: 0,
            last_y: 0,
        };
        self.motion = Motion::Flinging(Driver::new(fling, duration_ms, self.config.fling_easing));
        self.host.invalidate();
    }

    /// Animate the current image's scale from `start` to `end`
    pub fn start_smooth_scale(
        &mut self,
        focus_x: f32,
        focus_y: f32,
        start: f32,
        end: f32,
        duration_ms: u64,
    ) {
        self.cancel_all_animations();
        tracing::debug!(start, end, "Start smooth scale");
        let scale = ScaleMotion {
            focus_x,
            focus_y,
            start,
            end,
            last: start,
        };
        self.motion = Motion::Scaling(Driver::new(scale, duration_ms, self.config.scale_easing));
        self.host.invalidate();
    }

    fn scroll_frame(&mut self, scroll: &mut ScrollMotion, progress: f32) {
        let x = (scroll.dx as f32 * progress) as i32;
        let y = (scroll.dy as f32 * progress) as i32;
        self.drain_delta(x - scroll.last_x);
        scroll.last_x = x;
        scroll.last_y = y;
    }

    fn fling_frame(&mut self, fling: &mut FlingMotion, progress: f32) {
        let x = (fling.dx as f32 * progress) as i32;
        let y = (fling.dy as f32 * progress) as i32;
        let offset_x = x - fling.last_x;
        let offset_y = y - fling.last_y;
        if offset_x != 0 || offset_y != 0 {
            if let Some(page) = self.current_page_mut() {
                page.image_mut().scroll(-offset_x, -offset_y);
            }
        }
        fling.last_x = x;
        fling.last_y = y;
    }

    /// A fling that stopped against a hard edge hands its velocity to the
    /// edge glow, unless that glow is already showing.
    fn fling_finished(&mut self, fling: &FlingMotion) {
        let has_left = self.has_side(Side::Left);
        let has_right = self.has_side(Side::Right);
        let Some(page) = self.slots.current.as_ref() else {
            return;
        };
        let image = page.page().image();
        let edges = self.host.edges();

        if image.can_fling_horizontally() {
            if fling.velocity_x > 0
                && !has_left
                && image.max_dx() == 0
                && edges.is_finished(Edge::Left)
            {
                edges.on_absorb(fling.velocity_x, Edge::Left);
            } else if fling.velocity_x < 0
                && !has_right
                && image.min_dx() == 0
                && edges.is_finished(Edge::Right)
            {
                edges.on_absorb(-fling.velocity_x, Edge::Right);
            }
        }
        if image.can_fling_vertically() {
            if fling.velocity_y > 0 && image.max_dy() == 0 && edges.is_finished(Edge::Top) {
                edges.on_absorb(fling.velocity_y, Edge::Top);
            } else if fling.velocity_y < 0
                && image.min_dy() == 0
                && edges.is_finished(Edge::Bottom)
            {
                edges.on_absorb(-fling.velocity_y, Edge::Bottom);
            }
        }
    }

    fn scale_frame(&mut self, scale: &mut ScaleMotion, progress: f32) {
        let Some(page) = self.current_page_mut() else {
            return;
        };
        let value = lerp(scale.start, scale.end, progress);
        page.image_mut()
            .scale(scale.focus_x, scale.focus_y, value / scale.last);
        scale.last = value;
    }
}
