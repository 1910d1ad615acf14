//! Three-slot page pager
//!
//! [`Pager`] positions the previous/current/next pages of a gallery inside a
//! host surface, turns drag, fling, tap and scale gestures into page
//! transitions or image pan/zoom, and runs at most one of three animations
//! (settle scroll, image fling, double-tap zoom) at a time.
//!
//! # Layout
//! - `mode` - reading-direction policy (left/right to previous/next)
//! - `slots` - slot lifecycle, fill pass and one-step advances
//! - `offset` - pixel offset between slots and page-boundary crossing
//! - `gesture` - gesture entry points and edge bounce
//! - `motion` - the animation state and its per-frame callbacks

mod gesture;
mod mode;
mod motion;
mod offset;
mod slots;

#[cfg(test)]
mod tests;

pub use mode::{Direction, ReadingMode, Side, SlotRole};
pub use gesture::next_scale_level;
pub use motion::AnimationKind;
pub use slots::PageSlot;

use crate::anim::{FlingCurve, SplineFling};
use crate::config::{AppConfig, PagerConfig};
use crate::host::{ContentState, GalleryAdapter, GalleryHost};
use crate::{Error, Result};

use motion::Motion;
use slots::Slots;

/// Page layout and gesture controller for a paged gallery
pub struct Pager<H, A>
where
    H: GalleryHost,
    A: GalleryAdapter<H::Page>,
{
    host: H,
    adapter: Option<A>,
    config: PagerConfig,
    fling_curve: Box<dyn FlingCurve>,
    mode: ReadingMode,

    progress: Option<H::Progress>,
    error_view: Option<H::ErrorView>,
    error_text: Option<String>,
    slots: Slots<H::Page>,

    /// Logical current index, authoritative even before pages exist
    index: usize,
    /// Horizontal displacement of the current page from rest
    offset: i32,
    delta_x: i32,
    delta_y: i32,
    can_scroll_between_pages: bool,
    first_scroll: bool,
    stop_animation_finger: bool,

    motion: Motion,
}

impl<H, A> Pager<H, A>
where
    H: GalleryHost,
    A: GalleryAdapter<H::Page>,
{
    pub fn new(host: H, config: PagerConfig) -> Self {
        Self {
            host,
            adapter: None,
            mode: config.reading_mode,
            config,
            fling_curve: Box::new(SplineFling::default()),
            progress: None,
            error_view: None,
            error_text: None,
            slots: Slots::default(),
            index: 0,
            offset: 0,
            delta_x: 0,
            delta_y: 0,
            can_scroll_between_pages: false,
            first_scroll: false,
            stop_animation_finger: false,
            motion: Motion::Idle,
        }
    }

    /// Build a pager from the application configuration
    pub fn from_config(host: H, config: &AppConfig) -> Self {
        Self::new(host, config.pager.clone())
            .with_fling_curve(Box::new(SplineFling::new(&config.fling)))
    }

    pub fn with_fling_curve(mut self, curve: Box<dyn FlingCurve>) -> Self {
        self.fling_curve = curve;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    pub fn adapter_mut(&mut self) -> Option<&mut A> {
        self.adapter.as_mut()
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.adapter.is_some()
    }

    pub fn reading_mode(&self) -> ReadingMode {
        self.mode
    }

    /// Current horizontal page offset in pixels
    #[inline]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn interval(&self) -> i32 {
        self.config.interval_px
    }

    /// Accumulated overscroll of the current gesture
    pub fn overscroll(&self) -> (i32, i32) {
        (self.delta_x, self.delta_y)
    }

    /// Attach a content adapter. The pager starts from a clean offset and
    /// no running animation; call [`Pager::fill`] to materialize pages.
    pub fn attach(&mut self, adapter: A) -> Result<()> {
        if self.adapter.is_some() {
            return Err(Error::AlreadyAttached);
        }
        self.adapter = Some(adapter);
        self.motion = Motion::Idle;
        self.reset_parameters();
        tracing::debug!(index = self.index, "Pager attached");
        Ok(())
    }

    /// Release every view and hand the adapter back
    pub fn detach(&mut self) -> Result<A> {
        if self.adapter.is_none() {
            return Err(Error::NotAttached);
        }

        self.cancel_all_animations();
        self.remove_progress();
        self.remove_error_view();
        self.remove_all_pages();

        tracing::debug!(index = self.index, "Pager detached");
        self.adapter.take().ok_or(Error::NotAttached)
    }

    /// Switch reading direction. While attached this drops every view and
    /// requests a fresh fill.
    pub fn set_reading_mode(&mut self, mode: ReadingMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        if self.is_attached() {
            tracing::debug!(?mode, "Reading mode changed, relayout");
            self.reset_layout();
        }
    }

    /// Content changed under the pager: start over from the logical index
    pub fn notify_data_changed(&mut self) -> Result<()> {
        if self.adapter.is_none() {
            return Err(Error::NotAttached);
        }
        self.reset_layout();
        Ok(())
    }

    /// Index of the materialized current page
    pub fn current_index(&self) -> Option<usize> {
        self.slots.current.as_ref().map(|slot| slot.index())
    }

    /// Current page index, falling back to the logical index before fill
    pub fn internal_current_index(&self) -> usize {
        self.current_index().unwrap_or(self.index)
    }

    /// Jump to `index`. Neighbouring indices advance one slot; anything
    /// further drops all views and refills.
    pub fn set_current_index(&mut self, index: usize) {
        let size = self
            .adapter
            .as_ref()
            .and_then(|adapter| adapter.state().page_count())
            .unwrap_or(usize::MAX);
        if index == self.index || index >= size {
            return;
        }

        if self.slots.current.is_none() {
            self.index = index;
        } else if index + 1 == self.index {
            self.cancel_all_animations();
            self.reset_parameters();
            self.advance(Direction::Backward);
            self.host.request_fill();
        } else if index == self.index + 1 {
            self.cancel_all_animations();
            self.reset_parameters();
            self.advance(Direction::Forward);
            self.host.request_fill();
        } else {
            tracing::debug!(from = self.index, to = index, "Jump to page");
            self.index = index;
            self.reset_layout();
        }
    }

    /// Content state reported by the adapter, `Wait` while detached
    pub fn content_state(&self) -> ContentState {
        self.adapter
            .as_ref()
            .map(|adapter| adapter.state())
            .unwrap_or(ContentState::Wait)
    }

    pub fn progress_view(&self) -> Option<&H::Progress> {
        self.progress.as_ref()
    }

    pub fn error_view(&self) -> Option<&H::ErrorView> {
        self.error_view.as_ref()
    }

    /// Text bound to the error view
    pub fn error_text(&self) -> Option<&str> {
        self.error_text.as_deref()
    }

    fn reset_parameters(&mut self) {
        self.offset = 0;
        self.delta_x = 0;
        self.delta_y = 0;
        self.can_scroll_between_pages = false;
        self.first_scroll = false;
        self.stop_animation_finger = false;
    }

    /// Structural reset: no animation, no views, clean offset, refill
    fn reset_layout(&mut self) {
        self.cancel_all_animations();
        self.remove_progress();
        self.remove_error_view();
        self.remove_all_pages();
        self.reset_parameters();
        self.host.request_fill();
    }
}
