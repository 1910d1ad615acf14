use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;

use folio_core::{AppConfig, ReadingMode};
use folio_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    loader::{spawn_failing_load, spawn_gallery_load, LoadResult},
    widgets::{GalleryWidget, StatusBarWidget},
    Theme,
};

/// Command-line overrides for the interactive viewer
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub pages: Option<usize>,
    pub ltr: bool,
    pub fail: Option<String>,
}

pub async fn run(config: Arc<AppConfig>, options: RunOptions) -> Result<()> {
    let mut config = (*config).clone();
    if options.ltr {
        config.pager.reading_mode = ReadingMode::LeftToRight;
    }
    if let Some(pages) = options.pages {
        config.ui.page_count = pages;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Folio"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &config, &options).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &AppConfig,
    options: &RunOptions,
) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    let theme = Theme::default();
    let event_handler = EventHandler::new(config.ui.frame_rate_fps);

    let size = terminal.size()?;
    // Last row is the status bar
    let mut app = App::new(config, size.width, size.height.saturating_sub(1))?;

    let (load_tx, mut load_rx) = mpsc::unbounded_channel::<LoadResult>();
    let spawn_load = |tx: mpsc::UnboundedSender<LoadResult>| match &options.fail {
        Some(error) => spawn_failing_load(error.clone(), config.ui.load_delay_ms, tx),
        None => spawn_gallery_load(config.ui.page_count, config.ui.load_delay_ms, tx),
    };
    spawn_load(load_tx.clone());

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    // High frame rate only while something moves on screen
    let mut animating = false;
    let mut redraw = true;

    loop {
        while let Ok(result) = load_rx.try_recv() {
            app.apply_load(result)?;
        }

        if std::mem::take(&mut app.reload_requested) {
            tracing::info!("Reloading gallery");
            spawn_load(load_tx.clone());
        }

        app.update(now_ms())?;

        let dirty = app.take_redraw();
        if std::mem::take(&mut redraw) || dirty || animating {
            terminal.draw(|frame| {
                let layout = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(1), Constraint::Length(1)])
                    .split(frame.area());

                GalleryWidget::render(frame, layout[0], &app, &theme);
                StatusBarWidget::render(frame, layout[1], &app, &theme);
            })?;
        }

        if let Some(event) = event_handler.next(animating)? {
            redraw = !matches!(event, AppEvent::Tick);
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &keymap);
                    app.handle_action(action)?;
                }
                AppEvent::Mouse(mouse) => {
                    for gesture in app.detector.handle(mouse, now_ms()) {
                        app.handle_gesture(gesture)?;
                    }
                }
                AppEvent::Resize(width, height) => {
                    app.resize(width, height.saturating_sub(1))?;
                }
                AppEvent::Tick => {}
            }
        }

        animating = app.is_animating();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
