//! Capabilities the pager consumes from its host.
//!
//! The pager never draws. A host (a GPU widget tree, a terminal, a test mock)
//! implements these traits and the pager drives them: it obtains and releases
//! page views, binds them to content through the adapter, lays them out,
//! pulls edge glows, and asks for fills and redraws.

use crate::geometry::Rect;

/// Anything the pager places inside the gallery surface
pub trait Component {
    /// Size the component wants when centred, `(width, height)`
    fn preferred_size(&self) -> (i32, i32) {
        (0, 0)
    }

    /// Assign the component its bounds for the next draw
    fn layout(&mut self, bounds: Rect);

    /// Bounds assigned by the last layout
    fn bounds(&self) -> Rect;
}

/// Pan and zoom surface of the image shown by one page
pub trait ImageSurface {
    /// Pan by `(dx, dy)`; returns the part of the motion the image could not absorb
    fn scroll(&mut self, dx: i32, dy: i32) -> (i32, i32);

    /// Multiply the current scale by `factor` around a focus point
    fn scale(&mut self, focus_x: f32, focus_y: f32, factor: f32);

    /// Current scale
    fn scale_value(&self) -> f32;

    /// Ascending discrete zoom levels a double tap cycles through
    fn default_scales(&self) -> Vec<f32>;

    fn is_loaded(&self) -> bool;

    fn can_fling_horizontally(&self) -> bool;

    fn can_fling_vertically(&self) -> bool;

    fn can_fling(&self) -> bool {
        self.can_fling_horizontally() || self.can_fling_vertically()
    }

    /// Pan bounds reachable by a fling, in fling-displacement space
    fn min_dx(&self) -> i32;
    fn max_dx(&self) -> i32;
    fn min_dy(&self) -> i32;
    fn max_dy(&self) -> i32;
}

/// A page view: one slot's worth of rendering resources
pub trait GalleryPage: Component {
    type Image: ImageSurface;

    fn image(&self) -> &Self::Image;

    fn image_mut(&mut self) -> &mut Self::Image;
}

/// Side of the gallery surface an edge glow is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];
}

/// Overscroll feedback on the four edges
pub trait EdgeEffectSink {
    /// Stretch `edge` by `distance` pixels at `displacement` along the edge
    fn on_pull(&mut self, distance: f32, displacement: f32, edge: Edge);

    fn on_release(&mut self, edge: Edge);

    fn on_release_all(&mut self) {
        for edge in Edge::ALL {
            self.on_release(edge);
        }
    }

    /// Absorb a fling that hit `edge` with `velocity` px/s
    fn on_absorb(&mut self, velocity: i32, edge: Edge);

    /// True when `edge` shows no glow
    fn is_finished(&self, edge: Edge) -> bool;
}

/// Size report of the content provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentState {
    /// Page count not known yet
    Wait,
    /// The provider failed; `GalleryAdapter::error` may explain why
    Error,
    /// Page count is known; zero means an empty gallery
    Ready(usize),
}

impl ContentState {
    /// Raw size sentinel for "still loading"
    pub const RAW_WAIT: i32 = -1;
    /// Raw size sentinel for errors; anything at or below it is an error
    pub const RAW_ERROR: i32 = -2;

    /// Decode a raw provider size carrying negative sentinels
    pub fn from_raw(size: i32) -> Self {
        match size {
            Self::RAW_WAIT => ContentState::Wait,
            s if s <= Self::RAW_ERROR => ContentState::Error,
            s => ContentState::Ready(s.max(0) as usize),
        }
    }

    /// Number of pages, if known and non-zero
    pub fn page_count(&self) -> Option<usize> {
        match *self {
            ContentState::Ready(n) if n > 0 => Some(n),
            _ => None,
        }
    }
}

/// Binds pages to gallery content
pub trait GalleryAdapter<P> {
    fn state(&self) -> ContentState;

    /// Provider error text, if any
    fn error(&self) -> Option<String>;

    fn bind(&mut self, page: &mut P, index: usize);

    fn unbind(&mut self, page: &mut P);
}

/// The rendering surface hosting the pager
///
/// Obtained views are members of the host's view tree until released.
pub trait GalleryHost {
    type Page: GalleryPage;
    type Progress: Component;
    type ErrorView: Component;
    type Edges: EdgeEffectSink;

    fn width(&self) -> i32;

    fn height(&self) -> i32;

    fn obtain_page(&mut self) -> Self::Page;

    fn release_page(&mut self, page: Self::Page);

    fn obtain_progress(&mut self) -> Self::Progress;

    fn release_progress(&mut self, progress: Self::Progress);

    fn obtain_error_view(&mut self) -> Self::ErrorView;

    fn release_error_view(&mut self, view: Self::ErrorView);

    fn bind_error_view(&mut self, view: &mut Self::ErrorView, text: &str);

    /// Text shown for an empty gallery
    fn empty_text(&self) -> String;

    /// Text shown when the provider fails without an error message
    fn default_error_text(&self) -> String;

    /// Schedule a redraw (and with it animation frames)
    fn invalidate(&mut self);

    /// Schedule a fill pass before the next draw
    fn request_fill(&mut self);

    fn edges(&mut self) -> &mut Self::Edges;
}
