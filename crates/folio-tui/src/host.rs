//! Terminal implementation of the gallery host
//!
//! Geometry is kept in virtual pixels: every terminal cell stands for a
//! `cell_width_px` x `cell_height_px` block, so the pager's arithmetic is the
//! same as on a pixel surface and the widgets convert back to cells.

use folio_core::config::UiConfig;
use folio_core::geometry::Rect;
use folio_core::host::{Component, Edge, EdgeEffectSink, GalleryHost, GalleryPage};

use crate::image::VirtualImage;

/// A page view: bounds, the bound gallery index and its image
#[derive(Debug, Clone, Default)]
pub struct CellPage {
    id: u64,
    bounds: Rect,
    pub(crate) index: Option<usize>,
    pub(crate) image: VirtualImage,
}

impl CellPage {
    /// Serial number of the view, stable across rebinds
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Gallery index the page is bound to
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

impl Component for CellPage {
    fn layout(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.image.set_viewport(bounds);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl GalleryPage for CellPage {
    type Image = VirtualImage;

    fn image(&self) -> &VirtualImage {
        &self.image
    }

    fn image_mut(&mut self) -> &mut VirtualImage {
        &mut self.image
    }
}

/// Centred text block used for the progress and error placeholders
#[derive(Debug, Clone, Default)]
pub struct TextView {
    text: String,
    size: (i32, i32),
    bounds: Rect,
}

impl TextView {
    fn new(text: impl Into<String>, cell: (i32, i32)) -> Self {
        let mut view = Self::default();
        view.set_text(text, cell);
        view
    }

    fn set_text(&mut self, text: impl Into<String>, (cell_w, cell_h): (i32, i32)) {
        self.text = text.into();
        let columns = self.text.chars().count() as i32 + 4;
        self.size = (columns * cell_w, 3 * cell_h);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Component for TextView {
    fn preferred_size(&self) -> (i32, i32) {
        self.size
    }

    fn layout(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Glow {
    /// 0.0 (invisible) to 1.0
    intensity: f32,
    /// Pull position along the edge, 0.0 to 1.0
    position: f32,
    releasing: bool,
}

/// Overscroll glow on the four edges of the terminal gallery
///
/// Pulls grow a glow in proportion to the surface size. A released or
/// absorbed glow fades out over `fade_ms`.
#[derive(Debug, Clone)]
pub struct EdgeGlow {
    glows: [Glow; 4],
    width: f32,
    height: f32,
    fade_ms: f32,
}

impl EdgeGlow {
    const DEFAULT_FADE_MS: f32 = 400.0;
    /// Fling velocity that lights a glow fully
    const FULL_ABSORB_VELOCITY: f32 = 8000.0;

    pub fn new(width: i32, height: i32) -> Self {
        Self {
            glows: [Glow::default(); 4],
            width: width.max(1) as f32,
            height: height.max(1) as f32,
            fade_ms: Self::DEFAULT_FADE_MS,
        }
    }

    fn slot(edge: Edge) -> usize {
        match edge {
            Edge::Left => 0,
            Edge::Top => 1,
            Edge::Right => 2,
            Edge::Bottom => 3,
        }
    }

    pub(crate) fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(1) as f32;
        self.height = height.max(1) as f32;
    }

    /// Current intensity of `edge`, 0.0 when finished
    pub fn intensity(&self, edge: Edge) -> f32 {
        self.glows[Self::slot(edge)].intensity
    }

    /// Position of the pull along `edge`, 0.0 to 1.0
    pub fn position(&self, edge: Edge) -> f32 {
        self.glows[Self::slot(edge)].position
    }

    /// Fade released glows; returns true while any glow is still visible
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        let step = elapsed_ms as f32 / self.fade_ms;
        for glow in self.glows.iter_mut().filter(|glow| glow.releasing) {
            glow.intensity = (glow.intensity - step).max(0.0);
            if glow.intensity == 0.0 {
                glow.releasing = false;
            }
        }
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.glows.iter().any(|glow| glow.intensity > 0.0)
    }
}

impl EdgeEffectSink for EdgeGlow {
    fn on_pull(&mut self, distance: f32, displacement: f32, edge: Edge) {
        let (extent, along) = match edge {
            Edge::Left | Edge::Right => (self.width, self.height),
            Edge::Top | Edge::Bottom => (self.height, self.width),
        };
        let glow = &mut self.glows[Self::slot(edge)];
        glow.releasing = false;
        glow.intensity = (distance / extent).clamp(0.0, 1.0).max(glow.intensity * 0.5);
        glow.position = (displacement / along).clamp(0.0, 1.0);
    }

    fn on_release(&mut self, edge: Edge) {
        self.glows[Self::slot(edge)].releasing = true;
    }

    fn on_absorb(&mut self, velocity: i32, edge: Edge) {
        let glow = &mut self.glows[Self::slot(edge)];
        glow.intensity = (velocity.unsigned_abs() as f32 / Self::FULL_ABSORB_VELOCITY)
            .clamp(0.1, 1.0);
        glow.position = 0.5;
        glow.releasing = true;
    }

    fn is_finished(&self, edge: Edge) -> bool {
        self.intensity(edge) == 0.0
    }
}

/// Gallery host backed by a terminal area
pub struct TerminalHost {
    cell_width: i32,
    cell_height: i32,
    columns: u16,
    rows: u16,
    next_page_id: u64,
    /// Views handed back by the pager, reused on the next obtain
    page_pool: Vec<CellPage>,
    edges: EdgeGlow,
    fill_requested: bool,
    dirty: bool,
}

impl TerminalHost {
    pub fn new(config: &UiConfig, columns: u16, rows: u16) -> Self {
        let cell_width = config.cell_width_px.max(1);
        let cell_height = config.cell_height_px.max(1);
        Self {
            cell_width,
            cell_height,
            columns,
            rows,
            next_page_id: 0,
            page_pool: Vec::new(),
            edges: EdgeGlow::new(columns as i32 * cell_width, rows as i32 * cell_height),
            fill_requested: false,
            dirty: true,
        }
    }

    /// Follow a terminal resize; the next fill lays pages out again
    pub fn resize(&mut self, columns: u16, rows: u16) {
        if (columns, rows) == (self.columns, self.rows) {
            return;
        }
        self.columns = columns;
        self.rows = rows;
        self.edges.resize(self.width(), self.height());
        self.fill_requested = true;
        self.dirty = true;
    }

    pub fn cell_size(&self) -> (i32, i32) {
        (self.cell_width, self.cell_height)
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Pixel coordinate of the centre of cell `(column, row)`
    pub fn cell_center(&self, column: u16, row: u16) -> (f32, f32) {
        (
            (column as i32 * self.cell_width + self.cell_width / 2) as f32,
            (row as i32 * self.cell_height + self.cell_height / 2) as f32,
        )
    }

    pub fn glow(&self) -> &EdgeGlow {
        &self.edges
    }

    pub fn glow_mut(&mut self) -> &mut EdgeGlow {
        &mut self.edges
    }

    /// Consume a pending fill request
    pub fn take_fill_request(&mut self) -> bool {
        std::mem::take(&mut self.fill_requested)
    }

    /// Consume a pending redraw request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn pooled_pages(&self) -> usize {
        self.page_pool.len()
    }
}

impl GalleryHost for TerminalHost {
    type Page = CellPage;
    type Progress = TextView;
    type ErrorView = TextView;
    type Edges = EdgeGlow;

    fn width(&self) -> i32 {
        self.columns as i32 * self.cell_width
    }

    fn height(&self) -> i32 {
        self.rows as i32 * self.cell_height
    }

    fn obtain_page(&mut self) -> CellPage {
        if let Some(page) = self.page_pool.pop() {
            return page;
        }
        self.next_page_id += 1;
        tracing::trace!(id = self.next_page_id, "New page view");
        CellPage {
            id: self.next_page_id,
            ..CellPage::default()
        }
    }

    fn release_page(&mut self, mut page: CellPage) {
        page.index = None;
        page.image.unload();
        self.page_pool.push(page);
        self.dirty = true;
    }

    fn obtain_progress(&mut self) -> TextView {
        TextView::new("Loading...", self.cell_size())
    }

    fn release_progress(&mut self, _progress: TextView) {
        self.dirty = true;
    }

    fn obtain_error_view(&mut self) -> TextView {
        TextView::default()
    }

    fn release_error_view(&mut self, _view: TextView) {
        self.dirty = true;
    }

    fn bind_error_view(&mut self, view: &mut TextView, text: &str) {
        view.set_text(text, self.cell_size());
    }

    fn empty_text(&self) -> String {
        "This gallery has no pages".to_string()
    }

    fn default_error_text(&self) -> String {
        "Failed to load the gallery".to_string()
    }

    fn invalidate(&mut self) {
        self.dirty = true;
    }

    fn request_fill(&mut self) {
        self.fill_requested = true;
        self.dirty = true;
    }

    fn edges(&mut self) -> &mut EdgeGlow {
        &mut self.edges
    }
}
