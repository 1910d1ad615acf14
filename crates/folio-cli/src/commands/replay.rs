//! Headless replay of gesture scripts
//!
//! A script drives the same app state the terminal viewer uses, with a
//! virtual clock, and reports the pager state after every step.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use folio_core::{AppConfig, ReadingMode};
use folio_tui::app::App;
use folio_tui::event::EventHandler;
use folio_tui::gesture::Gesture;
use folio_tui::input::Action;
use folio_tui::loader::LoadResult;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Gallery size in terminal cells
    #[serde(default = "default_columns")]
    pub columns: u16,
    #[serde(default = "default_rows")]
    pub rows: u16,
    #[serde(default)]
    pub reading_mode: Option<ReadingMode>,
    pub steps: Vec<Step>,
}

fn default_columns() -> u16 {
    100
}

fn default_rows() -> u16 {
    40
}

/// One scripted input; positions in virtual pixels
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Load { pages: usize },
    Fail { error: String },
    Down { x: f32, y: f32 },
    Drag { dx: f32, dy: f32, x: f32, y: f32 },
    Fling { velocity_x: f32, velocity_y: f32 },
    Up,
    DoubleTap { x: f32, y: f32 },
    Scale { x: f32, y: f32, factor: f32 },
    PageLeft,
    PageRight,
    Jump { index: usize },
    Mode { mode: ReadingMode },
    /// Let animations run for `ms` of virtual time
    Wait { ms: u64 },
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Step::Load { .. } => "load",
            Step::Fail { .. } => "fail",
            Step::Down { .. } => "down",
            Step::Drag { .. } => "drag",
            Step::Fling { .. } => "fling",
            Step::Up => "up",
            Step::DoubleTap { .. } => "double_tap",
            Step::Scale { .. } => "scale",
            Step::PageLeft => "page_left",
            Step::PageRight => "page_right",
            Step::Jump { .. } => "jump",
            Step::Mode { .. } => "mode",
            Step::Wait { .. } => "wait",
        }
    }
}

/// Pager state after a step
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub step: usize,
    pub op: &'static str,
    pub time_ms: u64,
    pub state: String,
    pub index: Option<usize>,
    pub offset: i32,
    pub animation: Option<String>,
    pub reading_mode: ReadingMode,
    pub glow: bool,
}

pub fn run(config: &AppConfig, path: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    let script: Script = serde_json::from_str(&content)
        .with_context(|| format!("Invalid script {}", path.display()))?;

    for snapshot in replay(config, &script)? {
        if json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            println!(
                "{:>3} {:<10} t={:<6} {:<8} index={:<4} offset={:<6} {:?}{}",
                snapshot.step,
                snapshot.op,
                snapshot.time_ms,
                snapshot.state,
                snapshot
                    .index
                    .map(|index| index.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                snapshot.offset,
                snapshot.reading_mode,
                snapshot
                    .animation
                    .as_deref()
                    .map(|kind| format!(" [{}]", kind))
                    .unwrap_or_default(),
            );
        }
    }
    Ok(())
}

/// Run `script` against a fresh app and collect a snapshot per step
pub fn replay(config: &AppConfig, script: &Script) -> Result<Vec<Snapshot>> {
    let mut config = config.clone();
    if let Some(mode) = script.reading_mode {
        config.pager.reading_mode = mode;
    }
    let frame_ms = EventHandler::frame_interval(config.ui.frame_rate_fps).as_millis() as u64;

    let mut app = App::new(&config, script.columns, script.rows)?;
    let mut now_ms = 0u64;
    let mut snapshots = Vec::with_capacity(script.steps.len());

    for (step_no, step) in script.steps.iter().enumerate() {
        tracing::debug!(step = step_no, op = step.name(), "Replay step");
        match step {
            Step::Load { pages } => app.apply_load(LoadResult::Ready { pages: *pages })?,
            Step::Fail { error } => app.apply_load(LoadResult::Failure {
                error: error.clone(),
            })?,
            Step::Down { x, y } => app.handle_gesture(Gesture::Down { x: *x, y: *y })?,
            Step::Drag { dx, dy, x, y } => app.handle_gesture(Gesture::Scroll {
                dx: *dx,
                dy: *dy,
                x: *x,
                y: *y,
            })?,
            Step::Fling {
                velocity_x,
                velocity_y,
            } => app.handle_gesture(Gesture::Fling {
                velocity_x: *velocity_x,
                velocity_y: *velocity_y,
            })?,
            Step::Up => app.handle_gesture(Gesture::Up)?,
            Step::DoubleTap { x, y } => app.handle_gesture(Gesture::DoubleTap { x: *x, y: *y })?,
            Step::Scale { x, y, factor } => app.handle_gesture(Gesture::Scale {
                x: *x,
                y: *y,
                factor: *factor,
            })?,
            Step::PageLeft => app.handle_action(Action::PageLeft)?,
            Step::PageRight => app.handle_action(Action::PageRight)?,
            Step::Jump { index } => app.jump_to(*index)?,
            Step::Mode { mode } => {
                if app.pager.reading_mode() != *mode {
                    app.handle_action(Action::ToggleReadingMode)?;
                }
            }
            Step::Wait { ms } => {
                let end = now_ms + ms;
                // First frame anchors any animation started by the previous step
                app.update(now_ms)?;
                while now_ms < end {
                    now_ms = (now_ms + frame_ms).min(end);
                    app.update(now_ms)?;
                }
            }
        }

        snapshots.push(Snapshot {
            step: step_no,
            op: step.name(),
            time_ms: now_ms,
            state: app.state_label(),
            index: app.pager.current_index(),
            offset: app.pager.offset(),
            animation: app
                .pager
                .active_animation()
                .map(|kind| format!("{:?}", kind).to_lowercase()),
            reading_mode: app.pager.reading_mode(),
            glow: app.has_glow(),
        });
    }

    Ok(snapshots)
}
