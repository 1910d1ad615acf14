use anyhow::Result;
use folio_core::host::{ContentState, GalleryHost};
use folio_core::pager::{Direction, Side};
use folio_core::{AppConfig, Pager};

use crate::gallery::DemoGallery;
use crate::gesture::{Gesture, GestureDetector};
use crate::host::TerminalHost;
use crate::input::Action;
use crate::loader::LoadResult;

pub type GalleryPager = Pager<TerminalHost, DemoGallery>;

/// Application state
pub struct App {
    pub pager: GalleryPager,
    pub detector: GestureDetector,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Set when the gallery has to be fetched again
    pub reload_requested: bool,
    last_frame_ms: Option<u64>,
}

impl App {
    /// Build the app for a gallery area of `columns` x `rows` cells
    pub fn new(config: &AppConfig, columns: u16, rows: u16) -> Result<Self> {
        let host = TerminalHost::new(&config.ui, columns, rows);
        let mut pager = Pager::from_config(host, config);
        pager.attach(DemoGallery::default())?;
        pager.fill()?;

        Ok(Self {
            pager,
            detector: GestureDetector::new(
                config.ui.cell_width_px,
                config.ui.cell_height_px,
                config.ui.double_click_ms,
            ),
            should_quit: false,
            status_message: None,
            reload_requested: false,
            last_frame_ms: None,
        })
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn page_count(&self) -> Option<usize> {
        self.pager.content_state().page_count()
    }

    /// A finished gallery load arrived
    pub fn apply_load(&mut self, result: LoadResult) -> Result<()> {
        if let LoadResult::Failure { error } = &result {
            self.set_status(format!("Load failed: {}", error));
        }
        if let Some(gallery) = self.pager.adapter_mut() {
            gallery.apply(result);
        }
        self.pager.notify_data_changed()?;
        self.fill_if_requested()
    }

    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        self.status_message = None;
        match action {
            Action::Quit => self.should_quit = true,
            Action::PageLeft => self.pager.page_left(),
            Action::PageRight => self.pager.page_right(),
            Action::FirstPage => self.pager.set_current_index(0),
            Action::LastPage => {
                if let Some(count) = self.page_count() {
                    self.pager.set_current_index(count - 1);
                }
            }
            Action::ToggleReadingMode => {
                let mode = self.pager.reading_mode().toggled();
                self.pager.set_reading_mode(mode);
                self.set_status(format!("Reading mode: {:?}", mode));
            }
            Action::Zoom => {
                let host = self.pager.host();
                let (x, y) = (host.width() as f32 / 2.0, host.height() as f32 / 2.0);
                self.pager.on_double_tap_confirmed(x, y);
            }
            Action::Reload => {
                if let Some(gallery) = self.pager.adapter_mut() {
                    gallery.reset();
                }
                self.pager.notify_data_changed()?;
                self.reload_requested = true;
            }
            Action::None => {}
        }
        self.fill_if_requested()
    }

    pub fn handle_gesture(&mut self, gesture: Gesture) -> Result<()> {
        match gesture {
            Gesture::Down { .. } => {
                self.status_message = None;
                self.pager.on_down();
            }
            Gesture::Scroll { dx, dy, x, y } => self.pager.on_scroll(dx, dy, x, y),
            Gesture::Fling {
                velocity_x,
                velocity_y,
            } => self.pager.on_fling(velocity_x, velocity_y),
            Gesture::Up => self.pager.on_up(),
            Gesture::DoubleTap { x, y } => {
                if self.pager.is_tap_or_press_enabled() {
                    self.pager.on_double_tap_confirmed(x, y);
                }
            }
            Gesture::LongPress { x, y } => {
                if self.pager.is_tap_or_press_enabled() {
                    self.pager.on_long_press(x, y);
                    if let Some(index) = self.pager.index_under(x, y) {
                        self.set_status(format!("Page {}", index + 1));
                    }
                }
            }
            Gesture::Scale { x, y, factor } => {
                if self.pager.can_scale() {
                    self.pager.on_scale(x, y, factor);
                }
            }
            Gesture::Wheel { steps } => {
                let mode = self.pager.reading_mode();
                let forward = if mode.direction(Side::Right) == Direction::Forward {
                    Side::Right
                } else {
                    Side::Left
                };
                let side = if steps > 0 { forward } else { forward.opposite() };
                match side {
                    Side::Left => self.pager.page_left(),
                    Side::Right => self.pager.page_right(),
                }
            }
        }
        self.fill_if_requested()
    }

    /// Show `index`, turning one page or jumping
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        self.pager.set_current_index(index);
        self.fill_if_requested()
    }

    /// Gallery area changed size
    pub fn resize(&mut self, columns: u16, rows: u16) -> Result<()> {
        self.pager.host_mut().resize(columns, rows);
        self.fill_if_requested()
    }

    /// Advance animations and glows to `now_ms`. Returns whether another
    /// frame should follow soon.
    pub fn update(&mut self, now_ms: u64) -> Result<bool> {
        let elapsed = self
            .last_frame_ms
            .map(|last| now_ms.saturating_sub(last))
            .unwrap_or(0);
        self.last_frame_ms = Some(now_ms);

        let animating = self.pager.tick(now_ms);
        let glowing = self.pager.host_mut().glow_mut().tick(elapsed);
        self.fill_if_requested()?;
        Ok(animating || glowing)
    }

    /// True while an animation or a glow is on screen
    pub fn is_animating(&self) -> bool {
        self.pager.active_animation().is_some() || self.has_glow()
    }

    fn fill_if_requested(&mut self) -> Result<()> {
        if self.pager.host_mut().take_fill_request() {
            self.pager.fill()?;
        }
        Ok(())
    }

    pub fn state_label(&self) -> String {
        match self.pager.content_state() {
            ContentState::Wait => "LOADING".to_string(),
            ContentState::Error => "ERROR".to_string(),
            ContentState::Ready(0) => "EMPTY".to_string(),
            ContentState::Ready(count) => format!(
                "{}/{}",
                self.pager.internal_current_index() + 1,
                count
            ),
        }
    }

    /// Whether any edge glow is showing
    pub fn has_glow(&self) -> bool {
        self.pager.host().glow().is_animating()
    }

    /// Consume the host's redraw request
    pub fn take_redraw(&mut self) -> bool {
        self.pager.host_mut().take_redraw()
    }
}
