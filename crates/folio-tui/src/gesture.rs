//! Mouse gesture recognition
//!
//! Turns crossterm mouse events into the touch-style gestures the pager
//! understands. Positions are converted to virtual pixels at cell centres.

use std::collections::VecDeque;

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// A recognised gesture, positions in virtual pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Down { x: f32, y: f32 },
    /// Drag distance since the last event, `last - current`
    Scroll { dx: f32, dy: f32, x: f32, y: f32 },
    /// Release velocity in px/s, positive when the pointer moved right/down
    Fling { velocity_x: f32, velocity_y: f32 },
    Up,
    DoubleTap { x: f32, y: f32 },
    LongPress { x: f32, y: f32 },
    Scale { x: f32, y: f32, factor: f32 },
    /// Plain wheel notch, positive towards later pages
    Wheel { steps: i32 },
}

/// Stateful mouse-to-gesture converter
#[derive(Debug, Clone)]
pub struct GestureDetector {
    cell_width: f32,
    cell_height: f32,
    double_click_ms: u64,
    down: Option<Pointer>,
    last_tap: Option<(u64, f32, f32)>,
    samples: VecDeque<(u64, f32, f32)>,
}

#[derive(Debug, Clone, Copy)]
struct Pointer {
    time_ms: u64,
    start: (f32, f32),
    last: (f32, f32),
    moved: bool,
}

impl GestureDetector {
    const LONG_PRESS_MS: u64 = 500;
    const VELOCITY_WINDOW_MS: u64 = 100;
    const MIN_FLING_VELOCITY: f32 = 50.0;
    const ZOOM_STEP: f32 = 1.25;

    pub fn new(cell_width: i32, cell_height: i32, double_click_ms: u64) -> Self {
        Self {
            cell_width: cell_width.max(1) as f32,
            cell_height: cell_height.max(1) as f32,
            double_click_ms,
            down: None,
            last_tap: None,
            samples: VecDeque::new(),
        }
    }

    fn position(&self, column: u16, row: u16) -> (f32, f32) {
        (
            (column as f32 + 0.5) * self.cell_width,
            (row as f32 + 0.5) * self.cell_height,
        )
    }

    /// Slop radius: movement within one cell is still a tap
    fn is_within_slop(&self, a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < self.cell_width && (a.1 - b.1).abs() < self.cell_height
    }

    /// Feed one mouse event observed at `now_ms`
    pub fn handle(&mut self, event: MouseEvent, now_ms: u64) -> Vec<Gesture> {
        let (x, y) = self.position(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.on_down(x, y, now_ms),
            MouseEventKind::Drag(MouseButton::Left) => self.on_drag(x, y, now_ms),
            MouseEventKind::Up(MouseButton::Left) => self.on_up(x, y, now_ms),
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let towards_later = event.kind == MouseEventKind::ScrollDown;
                if event.modifiers.contains(KeyModifiers::CONTROL) {
                    let factor = if towards_later {
                        1.0 / Self::ZOOM_STEP
                    } else {
                        Self::ZOOM_STEP
                    };
                    vec![Gesture::Scale { x, y, factor }]
                } else {
                    vec![Gesture::Wheel {
                        steps: if towards_later { 1 } else { -1 },
                    }]
                }
            }
            _ => Vec::new(),
        }
    }

    fn on_down(&mut self, x: f32, y: f32, now_ms: u64) -> Vec<Gesture> {
        self.down = Some(Pointer {
            time_ms: now_ms,
            start: (x, y),
            last: (x, y),
            moved: false,
        });
        self.samples.clear();
        self.samples.push_back((now_ms, x, y));
        vec![Gesture::Down { x, y }]
    }

    fn on_drag(&mut self, x: f32, y: f32, now_ms: u64) -> Vec<Gesture> {
        let mut gestures = Vec::new();
        // Terminals may report a drag without the initial press
        if self.down.is_none() {
            gestures.extend(self.on_down(x, y, now_ms));
        }
        let Some(mut pointer) = self.down else {
            return gestures;
        };

        let (dx, dy) = (pointer.last.0 - x, pointer.last.1 - y);
        pointer.last = (x, y);
        pointer.moved |= !self.is_within_slop(pointer.start, (x, y));
        self.down = Some(pointer);
        self.record(now_ms, x, y);

        if dx != 0.0 || dy != 0.0 {
            gestures.push(Gesture::Scroll { dx, dy, x, y });
        }
        gestures
    }

    fn on_up(&mut self, x: f32, y: f32, now_ms: u64) -> Vec<Gesture> {
        let Some(pointer) = self.down.take() else {
            return Vec::new();
        };
        let mut gestures = Vec::new();

        if pointer.moved {
            self.record(now_ms, x, y);
            let (velocity_x, velocity_y) = self.velocity();
            if velocity_x.abs().max(velocity_y.abs()) >= Self::MIN_FLING_VELOCITY {
                gestures.push(Gesture::Fling {
                    velocity_x,
                    velocity_y,
                });
            }
            gestures.push(Gesture::Up);
            self.last_tap = None;
            return gestures;
        }

        gestures.push(Gesture::Up);
        if now_ms.saturating_sub(pointer.time_ms) >= Self::LONG_PRESS_MS {
            gestures.push(Gesture::LongPress {
                x: pointer.start.0,
                y: pointer.start.1,
            });
            self.last_tap = None;
            return gestures;
        }

        match self.last_tap.take() {
            Some((time_ms, tap_x, tap_y))
                if now_ms.saturating_sub(time_ms) <= self.double_click_ms
                    && self.is_within_slop((tap_x, tap_y), pointer.start) =>
            {
                gestures.push(Gesture::DoubleTap { x: tap_x, y: tap_y });
            }
            _ => self.last_tap = Some((now_ms, pointer.start.0, pointer.start.1)),
        }
        gestures
    }

    fn record(&mut self, now_ms: u64, x: f32, y: f32) {
        self.samples.push_back((now_ms, x, y));
        while let Some(&(time_ms, _, _)) = self.samples.front() {
            if now_ms.saturating_sub(time_ms) > Self::VELOCITY_WINDOW_MS {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Pointer velocity over the recent sample window, px/s
    fn velocity(&self) -> (f32, f32) {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return (0.0, 0.0);
        };
        let elapsed_ms = last.0.saturating_sub(first.0);
        if elapsed_ms == 0 {
            return (0.0, 0.0);
        }
        let per_second = 1000.0 / elapsed_ms as f32;
        ((last.1 - first.1) * per_second, (last.2 - first.2) * per_second)
    }
}
