use std::collections::HashSet;

use super::*;
use crate::geometry::Rect;
use crate::host::{
    Component, ContentState, Edge, EdgeEffectSink, GalleryAdapter, GalleryHost, GalleryPage,
    ImageSurface,
};

const WIDTH: i32 = 1000;
const HEIGHT: i32 = 1600;
const INTERVAL: i32 = 48;
const PAGE: i32 = WIDTH + INTERVAL;

#[derive(Debug, Clone)]
struct MockImage {
    loaded: bool,
    scale: f32,
    levels: Vec<f32>,
    absorb_scroll: bool,
    fling_horizontally: bool,
    fling_vertically: bool,
    min_dx: i32,
    max_dx: i32,
    min_dy: i32,
    max_dy: i32,
    scrolled: Vec<(i32, i32)>,
}

impl Default for MockImage {
    fn default() -> Self {
        Self {
            loaded: true,
            scale: 1.0,
            levels: vec![1.0, 2.0, 4.0],
            absorb_scroll: false,
            fling_horizontally: false,
            fling_vertically: false,
            min_dx: 0,
            max_dx: 0,
            min_dy: 0,
            max_dy: 0,
            scrolled: Vec::new(),
        }
    }
}

impl ImageSurface for MockImage {
    fn scroll(&mut self, dx: i32, dy: i32) -> (i32, i32) {
        self.scrolled.push((dx, dy));
        if self.absorb_scroll {
            self.min_dx += dx;
            self.max_dx += dx;
            self.min_dy += dy;
            self.max_dy += dy;
            (0, 0)
        } else {
            (dx, dy)
        }
    }

    fn scale(&mut self, _focus_x: f32, _focus_y: f32, factor: f32) {
        self.scale *= factor;
    }

    fn scale_value(&self) -> f32 {
        self.scale
    }

    fn default_scales(&self) -> Vec<f32> {
        self.levels.clone()
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn can_fling_horizontally(&self) -> bool {
        self.fling_horizontally
    }

    fn can_fling_vertically(&self) -> bool {
        self.fling_vertically
    }

    fn min_dx(&self) -> i32 {
        self.min_dx
    }

    fn max_dx(&self) -> i32 {
        self.max_dx
    }

    fn min_dy(&self) -> i32 {
        self.min_dy
    }

    fn max_dy(&self) -> i32 {
        self.max_dy
    }
}

#[derive(Debug)]
struct MockPage {
    id: usize,
    bound: Option<usize>,
    bounds: Rect,
    image: MockImage,
}

impl Component for MockPage {
    fn layout(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl GalleryPage for MockPage {
    type Image = MockImage;

    fn image(&self) -> &MockImage {
        &self.image
    }

    fn image_mut(&mut self) -> &mut MockImage {
        &mut self.image
    }
}

#[derive(Debug, Default)]
struct MockView {
    bounds: Rect,
}

impl Component for MockView {
    fn preferred_size(&self) -> (i32, i32) {
        (100, 40)
    }

    fn layout(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[derive(Debug, Default)]
struct MockEdges {
    pulls: Vec<(f32, f32, Edge)>,
    releases: Vec<Edge>,
    absorbs: Vec<(i32, Edge)>,
    active: HashSet<Edge>,
}

impl EdgeEffectSink for MockEdges {
    fn on_pull(&mut self, distance: f32, displacement: f32, edge: Edge) {
        self.pulls.push((distance, displacement, edge));
        self.active.insert(edge);
    }

    fn on_release(&mut self, edge: Edge) {
        self.releases.push(edge);
        self.active.remove(&edge);
    }

    fn on_absorb(&mut self, velocity: i32, edge: Edge) {
        self.absorbs.push((velocity, edge));
        self.active.insert(edge);
    }

    fn is_finished(&self, edge: Edge) -> bool {
        !self.active.contains(&edge)
    }
}

#[derive(Debug, Default)]
struct MockHost {
    next_id: usize,
    obtained: usize,
    released: Vec<usize>,
    progress_live: usize,
    error_live: usize,
    error_binds: Vec<String>,
    fills: usize,
    invalidates: usize,
    edges: MockEdges,
    image: MockImage,
}

impl GalleryHost for MockHost {
    type Page = MockPage;
    type Progress = MockView;
    type ErrorView = MockView;
    type Edges = MockEdges;

    fn width(&self) -> i32 {
        WIDTH
    }

    fn height(&self) -> i32 {
        HEIGHT
    }

    fn obtain_page(&mut self) -> MockPage {
        self.next_id += 1;
        self.obtained += 1;
        MockPage {
            id: self.next_id,
            bound: None,
            bounds: Rect::default(),
            image: self.image.clone(),
        }
    }

    fn release_page(&mut self, page: MockPage) {
        assert!(page.bound.is_none(), "page released while still bound");
        self.released.push(page.id);
    }

    fn obtain_progress(&mut self) -> MockView {
        self.progress_live += 1;
        MockView::default()
    }

    fn release_progress(&mut self, _progress: MockView) {
        self.progress_live -= 1;
    }

    fn obtain_error_view(&mut self) -> MockView {
        self.error_live += 1;
        MockView::default()
    }

    fn release_error_view(&mut self, _view: MockView) {
        self.error_live -= 1;
    }

    fn bind_error_view(&mut self, _view: &mut MockView, text: &str) {
        self.error_binds.push(text.to_string());
    }

    fn empty_text(&self) -> String {
        "empty".to_string()
    }

    fn default_error_text(&self) -> String {
        "error".to_string()
    }

    fn invalidate(&mut self) {
        self.invalidates += 1;
    }

    fn request_fill(&mut self) {
        self.fills += 1;
    }

    fn edges(&mut self) -> &mut MockEdges {
        &mut self.edges
    }
}

#[derive(Debug)]
struct MockAdapter {
    state: ContentState,
    error: Option<String>,
}

impl MockAdapter {
    fn ready(size: usize) -> Self {
        Self {
            state: ContentState::Ready(size),
            error: None,
        }
    }
}

impl GalleryAdapter<MockPage> for MockAdapter {
    fn state(&self) -> ContentState {
        self.state
    }

    fn error(&self) -> Option<String> {
        self.error.clone()
    }

    fn bind(&mut self, page: &mut MockPage, index: usize) {
        page.bound = Some(index);
    }

    fn unbind(&mut self, page: &mut MockPage) {
        page.bound = None;
    }
}

type TestPager = Pager<MockHost, MockAdapter>;

fn pager_with(host: MockHost, size: usize, mode: ReadingMode, index: usize) -> TestPager {
    let config = PagerConfig {
        reading_mode: mode,
        interval_px: INTERVAL,
        ..Default::default()
    };
    let mut pager = Pager::new(host, config);
    pager.attach(MockAdapter::ready(size)).unwrap();
    pager.set_current_index(index);
    pager.fill().unwrap();
    pager
}

fn pager(size: usize, mode: ReadingMode, index: usize) -> TestPager {
    pager_with(MockHost::default(), size, mode, index)
}

fn slot_indices(pager: &TestPager) -> [Option<usize>; 3] {
    [SlotRole::Previous, SlotRole::Current, SlotRole::Next]
        .map(|role| pager.slot(role).map(|slot| slot.index()))
}

fn slot_id(pager: &TestPager, role: SlotRole) -> Option<usize> {
    pager.slot(role).map(|slot| slot.page().id)
}

fn settle(pager: &mut TestPager) {
    let mut now = 0;
    while pager.tick(now) {
        now += 16;
        assert!(now < 60_000, "animation never finished");
    }
}

#[test]
fn test_fill_materializes_neighbours() {
    let pager = pager(5, ReadingMode::LeftToRight, 2);
    assert_eq!(slot_indices(&pager), [Some(1), Some(2), Some(3)]);
    assert_eq!(pager.host().obtained, 3);
    assert_eq!(pager.current_index(), Some(2));
    for slot in pager.pages() {
        assert_eq!(slot.page().bound, Some(slot.index()));
    }
}

#[test]
fn test_fill_at_ends_skips_missing_neighbours() {
    let first = pager(5, ReadingMode::LeftToRight, 0);
    assert_eq!(slot_indices(&first), [None, Some(0), Some(1)]);

    let last = pager(5, ReadingMode::LeftToRight, 4);
    assert_eq!(slot_indices(&last), [Some(3), Some(4), None]);

    let single = pager(1, ReadingMode::LeftToRight, 0);
    assert_eq!(slot_indices(&single), [None, Some(0), None]);
}

#[test]
fn test_fill_lays_out_slots_by_mode() {
    let ltr = pager(5, ReadingMode::LeftToRight, 2);
    let previous = ltr.slot(SlotRole::Previous).unwrap().page().bounds;
    let current = ltr.slot(SlotRole::Current).unwrap().page().bounds;
    let next = ltr.slot(SlotRole::Next).unwrap().page().bounds;
    assert_eq!(current, Rect::new(0, 0, WIDTH, HEIGHT));
    assert_eq!(previous, Rect::new(-PAGE, 0, -INTERVAL, HEIGHT));
    assert_eq!(next, Rect::new(PAGE, 0, PAGE + WIDTH, HEIGHT));

    let rtl = pager(5, ReadingMode::RightToLeft, 2);
    let previous = rtl.slot(SlotRole::Previous).unwrap().page().bounds;
    let next = rtl.slot(SlotRole::Next).unwrap().page().bounds;
    assert_eq!(next, Rect::new(-PAGE, 0, -INTERVAL, HEIGHT));
    assert_eq!(previous, Rect::new(PAGE, 0, PAGE + WIDTH, HEIGHT));
}

#[test]
fn test_fill_wait_shows_progress_then_pages() {
    let mut pager = Pager::new(MockHost::default(), PagerConfig::default());
    pager
        .attach(MockAdapter {
            state: ContentState::Wait,
            error: None,
        })
        .unwrap();
    pager.fill().unwrap();
    assert!(pager.progress_view().is_some());
    assert_eq!(pager.pages().count(), 0);
    assert_eq!(
        pager.progress_view().unwrap().bounds,
        Rect::new(450, 780, 550, 820)
    );

    pager.adapter_mut().unwrap().state = ContentState::Ready(3);
    pager.fill().unwrap();
    assert!(pager.progress_view().is_none());
    assert_eq!(pager.host().progress_live, 0);
    assert_eq!(pager.pages().count(), 2);
}

#[test]
fn test_fill_error_binds_message_once() {
    let mut pager = Pager::new(MockHost::default(), PagerConfig::default());
    pager
        .attach(MockAdapter {
            state: ContentState::Error,
            error: Some("404".to_string()),
        })
        .unwrap();
    pager.fill().unwrap();
    pager.fill().unwrap();
    assert_eq!(pager.error_text(), Some("404"));
    assert_eq!(pager.host().error_binds, vec!["404".to_string()]);
    assert_eq!(pager.host().error_live, 1);

    pager.adapter_mut().unwrap().error = None;
    pager.fill().unwrap();
    assert_eq!(pager.error_text(), Some("error"));

    pager.adapter_mut().unwrap().state = ContentState::Ready(0);
    pager.fill().unwrap();
    assert_eq!(pager.error_text(), Some("empty"));
    assert_eq!(pager.host().error_live, 1);
    assert_eq!(pager.pages().count(), 0);
}

#[test]
fn test_fill_clamps_index_past_end() {
    let mut pager = pager(10, ReadingMode::LeftToRight, 8);
    pager.adapter_mut().unwrap().state = ContentState::Ready(5);
    pager.fill().unwrap();
    assert_eq!(slot_indices(&pager), [Some(3), Some(4), None]);
    assert_eq!(pager.host().released.len(), 3);
}

#[test]
fn test_attach_and_detach_contracts() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    assert!(matches!(
        pager.attach(MockAdapter::ready(5)),
        Err(Error::AlreadyAttached)
    ));

    let adapter = pager.detach().unwrap();
    assert_eq!(adapter.state, ContentState::Ready(5));
    assert_eq!(pager.host().released.len(), pager.host().obtained);
    assert_eq!(pager.pages().count(), 0);

    assert!(matches!(pager.detach(), Err(Error::NotAttached)));
    assert!(matches!(pager.fill(), Err(Error::NotAttached)));
    assert!(matches!(pager.notify_data_changed(), Err(Error::NotAttached)));
}

#[test]
fn test_advance_forward_then_backward_restores_window() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    let before = slot_indices(&pager);

    let obtained = pager.host().obtained;
    assert!(pager.advance(Direction::Forward));
    assert_eq!(pager.host().obtained, obtained + 1);
    assert_eq!(pager.host().released.len(), 1);
    assert_eq!(slot_indices(&pager), [Some(2), Some(3), Some(4)]);

    assert!(pager.advance(Direction::Backward));
    assert_eq!(pager.internal_current_index(), 2);
    assert_eq!(slot_indices(&pager), before);
}

#[test]
fn test_advance_stops_at_ends() {
    let mut first = pager(5, ReadingMode::LeftToRight, 0);
    assert!(!first.advance(Direction::Backward));
    assert_eq!(first.current_index(), Some(0));

    let mut last = pager(5, ReadingMode::LeftToRight, 4);
    assert!(!last.advance(Direction::Forward));
    assert_eq!(last.current_index(), Some(4));
}

#[test]
fn test_consume_delta_without_neighbour_returns_everything() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 0);
    assert_eq!(pager.consume_delta(-2000), -2000);
    assert_eq!(pager.offset(), 0);
    assert_eq!(pager.current_index(), Some(0));

    // The drain loop stops as soon as the remainder stops changing
    let fills = pager.host().fills;
    pager.drain_delta(-2000);
    assert_eq!(pager.offset(), 0);
    assert_eq!(pager.host().fills, fills);
}

#[test]
fn test_consume_delta_crosses_into_previous_page() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    let remain = pager.consume_delta(-1100);
    assert_eq!(remain, -52);
    assert_eq!(pager.offset(), 0);
    assert_eq!(pager.current_index(), Some(1));

    assert_eq!(pager.consume_delta(remain), 0);
    assert_eq!(pager.offset(), 52);
}

#[test]
fn test_consume_delta_conserves_motion() {
    let deltas = [-5000, -1048, -1047, -300, -1, 0, 1, 300, 1047, 1048, 5000];
    for mode in [ReadingMode::LeftToRight, ReadingMode::RightToLeft] {
        for index in [0, 2, 4] {
            for start in [-500, 0, 500] {
                for dx in deltas {
                    let mut pager = pager(5, mode, index);
                    pager.consume_delta(start);
                    let offset_before = pager.offset();
                    let index_before = pager.internal_current_index();

                    let remain = pager.consume_delta(dx);
                    let travelled = offset_before - (dx - remain);

                    if pager.internal_current_index() == index_before {
                        assert_eq!(pager.offset(), travelled, "{mode:?} {index} {start} {dx}");
                    } else {
                        assert_eq!(pager.offset(), 0);
                        assert_eq!(travelled.abs(), PAGE, "{mode:?} {index} {start} {dx}");
                    }

                    let offset = pager.offset();
                    assert!(offset.abs() < PAGE);
                    if !pager.has_side(Side::Left) {
                        assert!(offset <= 0, "{mode:?} {index} {start} {dx}");
                    }
                    if !pager.has_side(Side::Right) {
                        assert!(offset >= 0, "{mode:?} {index} {start} {dx}");
                    }
                }
            }
        }
    }
}

#[test]
fn test_drain_delta_terminates_everywhere() {
    for mode in [ReadingMode::LeftToRight, ReadingMode::RightToLeft] {
        for size in [1, 2, 5] {
            for dx in [-100_000, 100_000] {
                let mut pager = pager(size, mode, 0);
                pager.drain_delta(dx);
                assert_eq!(pager.offset(), 0);
            }
        }
    }
}

#[test]
fn test_drain_delta_walks_across_pages() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 0);
    pager.drain_delta(PAGE * 2 + 10);
    assert_eq!(pager.current_index(), Some(2));
    assert_eq!(pager.offset(), -10);
}

#[test]
fn test_page_left_right_mirror_between_modes() {
    for index in 0..5 {
        let mut rtl = pager(5, ReadingMode::RightToLeft, index);
        let mut ltr = pager(5, ReadingMode::LeftToRight, index);
        rtl.page_left();
        ltr.page_right();
        assert_eq!(rtl.internal_current_index(), ltr.internal_current_index());

        let mut rtl = pager(5, ReadingMode::RightToLeft, index);
        let mut ltr = pager(5, ReadingMode::LeftToRight, index);
        rtl.page_right();
        ltr.page_left();
        assert_eq!(rtl.internal_current_index(), ltr.internal_current_index());
    }
}

#[test]
fn test_right_to_left_page_right_from_last_page() {
    let mut pager = pager(5, ReadingMode::RightToLeft, 4);
    let old_current = slot_id(&pager, SlotRole::Current);
    let old_previous = slot_id(&pager, SlotRole::Previous);
    let obtained = pager.host().obtained;

    pager.page_right();

    assert_eq!(pager.current_index(), Some(3));
    assert_eq!(slot_id(&pager, SlotRole::Next), old_current);
    assert_eq!(slot_id(&pager, SlotRole::Current), old_previous);
    assert_eq!(slot_indices(&pager), [Some(2), Some(3), Some(4)]);
    assert_eq!(pager.host().obtained, obtained + 1);
    assert!(pager.host().released.is_empty());
}

#[test]
fn test_page_towards_missing_page_bounces_edge() {
    let mut pager = pager(5, ReadingMode::RightToLeft, 4);
    pager.page_left();
    assert_eq!(pager.current_index(), Some(4));
    let edges = &pager.host().edges;
    assert_eq!(edges.pulls, vec![(WIDTH as f32, (HEIGHT / 2) as f32, Edge::Left)]);
    assert_eq!(edges.releases, vec![Edge::Left]);
}

#[test]
fn test_set_current_index_jump_refills() {
    let mut pager = pager(10, ReadingMode::LeftToRight, 2);
    let fills = pager.host().fills;
    pager.set_current_index(7);
    assert_eq!(pager.pages().count(), 0);
    assert_eq!(pager.host().fills, fills + 1);

    pager.fill().unwrap();
    assert_eq!(slot_indices(&pager), [Some(6), Some(7), Some(8)]);

    pager.set_current_index(10);
    assert_eq!(pager.current_index(), Some(7));
}

#[test]
fn test_reading_mode_change_resets_layout() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    pager.consume_delta(-200);
    assert_eq!(pager.offset(), 200);

    pager.set_reading_mode(ReadingMode::RightToLeft);
    assert_eq!(pager.offset(), 0);
    assert_eq!(pager.pages().count(), 0);
    assert_eq!(pager.host().released.len(), 3);

    pager.fill().unwrap();
    assert_eq!(pager.current_index(), Some(2));
}

#[test]
fn test_drag_then_release_settles_on_neighbour() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    pager.on_down();
    pager.on_scroll(-300.0, 0.0, 500.0, 800.0);
    assert_eq!(pager.offset(), 300);

    pager.on_up();
    assert_eq!(pager.active_animation(), Some(AnimationKind::Scroll));

    assert!(pager.tick(0));
    assert!(pager.tick(150));
    assert!(!pager.tick(400));
    assert_eq!(pager.current_index(), Some(1));
    assert_eq!(pager.offset(), 0);
    assert_eq!(pager.active_animation(), None);
}

#[test]
fn test_settle_duration_scales_with_offset() {
    // 100 * (1 + 7 * 300 / 1048) = 300.38
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    pager.on_down();
    pager.on_scroll(-300.0, 0.0, 500.0, 800.0);
    pager.on_up();
    assert!(pager.tick(1_000));
    assert!(pager.tick(1_299));
    assert!(!pager.tick(1_300));
    assert_eq!(pager.current_index(), Some(1));

    // Half a page: 100 * (1 + 3.5)
    let mut half = self::pager(5, ReadingMode::LeftToRight, 2);
    half.on_down();
    half.on_scroll(-524.0, 0.0, 500.0, 800.0);
    half.on_up();
    assert!(half.tick(0));
    assert!(half.tick(449));
    assert!(!half.tick(450));
    assert_eq!(half.offset(), 0);
}

#[test]
fn test_short_drag_snaps_back() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    pager.on_down();
    pager.on_scroll(-30.0, 0.0, 500.0, 800.0);
    assert_eq!(pager.offset(), 30);

    pager.on_up();
    settle(&mut pager);
    assert_eq!(pager.current_index(), Some(2));
    assert_eq!(pager.offset(), 0);
}

#[test]
fn test_vertical_gesture_does_not_turn_pages() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    pager.on_down();
    pager.on_scroll(10.0, 100.0, 500.0, 800.0);
    pager.on_scroll(-200.0, 0.0, 500.0, 800.0);
    assert_eq!(pager.offset(), 0);
    assert!(pager.host().edges.pulls.is_empty());
}

#[test]
fn test_image_pan_consumes_before_pages() {
    let host = MockHost {
        image: MockImage {
            absorb_scroll: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut pager = pager_with(host, 5, ReadingMode::LeftToRight, 2);
    pager.on_down();
    pager.on_scroll(-300.0, 0.0, 500.0, 800.0);
    assert_eq!(pager.offset(), 0);
    assert_eq!(pager.current_page().unwrap().image.scrolled, vec![(-300, 0)]);
}

#[test]
fn test_drag_past_first_page_pulls_edge() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 0);
    pager.on_down();
    pager.on_scroll(-50.0, 0.0, 500.0, 800.0);
    pager.on_scroll(-25.0, 0.0, 500.0, 800.0);
    assert_eq!(pager.offset(), 0);
    // Each event first offers its motion to the image, which restarts the
    // accumulator; the glow integrates the pulls itself.
    assert_eq!(pager.overscroll(), (-25, 0));
    let pulls = &pager.host().edges.pulls;
    assert_eq!(
        pulls,
        &vec![(50.0, 800.0, Edge::Left), (25.0, 800.0, Edge::Left)]
    );

    pager.on_up();
    assert!(pager.host().edges.active.is_empty());
    assert_eq!(pager.active_animation(), None);
}

#[test]
fn test_vertical_drag_pulls_top_bottom_only_when_flingable() {
    let host = MockHost {
        image: MockImage {
            fling_vertically: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut pager = pager_with(host, 5, ReadingMode::LeftToRight, 2);
    pager.on_down();
    pager.on_scroll(0.0, -40.0, 500.0, 800.0);
    assert_eq!(pager.host().edges.pulls, vec![(40.0, 500.0, Edge::Top)]);

    pager.on_scroll(0.0, 30.0, 600.0, 800.0);
    let edges = &pager.host().edges;
    assert_eq!(edges.pulls[1], (30.0, 600.0, Edge::Bottom));
    assert_eq!(edges.releases, vec![Edge::Top]);
    assert!(edges.is_finished(Edge::Top));

    let mut fixed = self::pager(5, ReadingMode::LeftToRight, 2);
    fixed.on_down();
    fixed.on_scroll(0.0, -40.0, 500.0, 800.0);
    assert!(fixed.host().edges.pulls.is_empty());
}

#[test]
fn test_saturated_drag_pulls_without_overflow() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 0);
    pager.on_down();
    pager.on_scroll(-1.0e12, 0.0, 500.0, 800.0);
    assert_eq!(pager.overscroll(), (i32::MIN, 0));
    assert_eq!(
        pager.host().edges.pulls,
        vec![(i32::MAX as f32, 800.0, Edge::Left)]
    );
}

#[test]
fn test_fling_absorbs_top_and_left() {
    let host = MockHost {
        image: MockImage {
            absorb_scroll: true,
            fling_horizontally: true,
            fling_vertically: true,
            max_dx: 500,
            max_dy: 500,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut pager = pager_with(host, 5, ReadingMode::LeftToRight, 0);
    pager.on_fling(3000.0, 3000.0);
    assert_eq!(pager.active_animation(), Some(AnimationKind::Fling));

    settle(&mut pager);
    let image = &pager.current_page().unwrap().image;
    assert_eq!((image.max_dx, image.max_dy), (0, 0));
    assert_eq!(
        pager.host().edges.absorbs,
        vec![(3000, Edge::Left), (3000, Edge::Top)]
    );
}

#[test]
fn test_fling_absorbs_bottom_only_when_vertical() {
    let host = MockHost {
        image: MockImage {
            absorb_scroll: true,
            fling_vertically: true,
            min_dy: -500,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut pager = pager_with(host, 5, ReadingMode::LeftToRight, 2);
    pager.on_fling(0.0, -3000.0);
    settle(&mut pager);
    assert_eq!(pager.current_page().unwrap().image.min_dy, 0);
    assert_eq!(pager.host().edges.absorbs, vec![(3000, Edge::Bottom)]);
}

#[test]
fn test_fling_pans_image_and_absorbs_at_edge() {
    let host = MockHost {
        image: MockImage {
            absorb_scroll: true,
            fling_horizontally: true,
            min_dx: -500,
            max_dx: 0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut pager = pager_with(host, 5, ReadingMode::LeftToRight, 4);
    pager.on_fling(-3000.0, 0.0);
    assert_eq!(pager.active_animation(), Some(AnimationKind::Fling));

    settle(&mut pager);
    let image = &pager.current_page().unwrap().image;
    let total: i32 = image.scrolled.iter().map(|&(x, _)| x).sum();
    assert_eq!(total, 500);
    assert_eq!(image.min_dx, 0);
    assert_eq!(pager.host().edges.absorbs, vec![(3000, Edge::Right)]);
}

#[test]
fn test_fling_clamped_to_nothing_does_not_start() {
    let host = MockHost {
        image: MockImage {
            fling_horizontally: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut pager = pager_with(host, 5, ReadingMode::LeftToRight, 2);
    pager.on_fling(-3000.0, 2000.0);
    assert_eq!(pager.active_animation(), None);
}

#[test]
fn test_fling_needs_page_at_rest() {
    let host = MockHost {
        image: MockImage {
            fling_horizontally: true,
            min_dx: -500,
            max_dx: 500,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut pager = pager_with(host, 5, ReadingMode::LeftToRight, 2);
    pager.consume_delta(-100);
    pager.on_fling(-3000.0, 0.0);
    assert_eq!(pager.active_animation(), None);
}

#[test]
fn test_next_scale_level() {
    let levels = [1.0, 2.0, 4.0];
    assert_eq!(next_scale_level(&levels, 1.5), Some(2.0));
    assert_eq!(next_scale_level(&levels, 1.0), Some(2.0));
    assert_eq!(next_scale_level(&levels, 4.0), Some(1.0));
    assert_eq!(next_scale_level(&[], 1.0), None);
}

#[test]
fn test_double_tap_zooms_to_next_level() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    pager.on_double_tap_confirmed(500.0, 800.0);
    assert_eq!(pager.active_animation(), Some(AnimationKind::Scale));
    settle(&mut pager);
    let scale = pager.current_page().unwrap().image.scale;
    assert!((scale - 2.0).abs() < 1e-4, "scale = {scale}");
}

#[test]
fn test_new_animation_cancels_running_one() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    pager.consume_delta(-300);
    pager.start_smooth_scroll(-748, 0, 300);
    assert_eq!(pager.active_animation(), Some(AnimationKind::Scroll));

    pager.on_double_tap_confirmed(500.0, 800.0);
    assert_eq!(pager.active_animation(), Some(AnimationKind::Scale));

    settle(&mut pager);
    assert_eq!(pager.offset(), 300);
    assert_eq!(pager.current_index(), Some(2));
}

#[test]
fn test_down_interrupting_animation_disables_tap() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    pager.on_double_tap_confirmed(500.0, 800.0);
    pager.on_down();
    assert_eq!(pager.active_animation(), None);
    assert!(!pager.is_tap_or_press_enabled());
    assert!(!pager.tick(1_000));

    pager.on_down();
    assert!(pager.is_tap_or_press_enabled());
}

#[test]
fn test_scale_only_at_rest() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    assert!(pager.can_scale());
    pager.on_scale(0.0, 0.0, 1.5);
    assert!((pager.current_page().unwrap().image.scale - 1.5).abs() < 1e-6);

    pager.consume_delta(-100);
    assert!(!pager.can_scale());
    pager.on_scale(0.0, 0.0, 2.0);
    assert!((pager.current_page().unwrap().image.scale - 1.5).abs() < 1e-6);
}

#[test]
fn test_index_under_hits_laid_out_pages() {
    let pager = pager(5, ReadingMode::LeftToRight, 2);
    assert_eq!(pager.index_under(500.0, 10.0), Some(2));
    assert_eq!(pager.index_under(-100.0, 10.0), Some(1));
    assert_eq!(pager.index_under(1100.0, 10.0), Some(3));
    assert_eq!(pager.index_under(1020.0, 10.0), None);
    assert!(pager.find_page_by_index(3).is_some());
    assert!(pager.find_page_by_index(0).is_none());
}

#[test]
fn test_data_changed_drops_everything() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    pager.on_double_tap_confirmed(500.0, 800.0);
    pager.notify_data_changed().unwrap();
    assert_eq!(pager.active_animation(), None);
    assert_eq!(pager.pages().count(), 0);
    assert_eq!(pager.internal_current_index(), 2);
}

#[test]
fn test_idle_tick_requests_no_frames() {
    let mut pager = pager(5, ReadingMode::LeftToRight, 2);
    assert!(!pager.tick(0));
}
