use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Event handler for terminal events
///
/// Polls with a long idle timeout, or with the frame interval while the
/// gallery is animating.
pub struct EventHandler {
    idle_rate: Duration,
    frame_rate: Duration,
}

impl EventHandler {
    const IDLE_TICK_MS: u64 = 250;

    pub fn new(frame_rate_fps: u32) -> Self {
        Self {
            idle_rate: Duration::from_millis(Self::IDLE_TICK_MS),
            frame_rate: Self::frame_interval(frame_rate_fps),
        }
    }

    pub fn frame_interval(frame_rate_fps: u32) -> Duration {
        Duration::from_millis(1000 / u64::from(frame_rate_fps.clamp(1, 240)))
    }

    /// Poll for the next event
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        let timeout = if animating {
            self.frame_rate
        } else {
            self.idle_rate
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // crossterm 0.27+ also reports key releases on some systems
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Poll timeout; drives animation frames
    Tick,
}
