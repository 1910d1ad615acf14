use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use folio_core::{AnimationKind, ReadingMode};

use crate::app::App;
use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => Self::summary(app),
        };

        let help_hint = " q:quit h/l:page m:mode z:zoom ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.len());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    fn summary(app: &App) -> String {
        let mode = match app.pager.reading_mode() {
            ReadingMode::LeftToRight => "LTR",
            ReadingMode::RightToLeft => "RTL",
        };
        let animation = match app.pager.active_animation() {
            Some(AnimationKind::Scroll) => " | settling",
            Some(AnimationKind::Fling) => " | fling",
            Some(AnimationKind::Scale) => " | zoom",
            None => "",
        };
        format!(" {} | {}{}", app.state_label(), mode, animation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadResult;
    use folio_core::AppConfig;

    #[test]
    fn test_summary() {
        let mut app = App::new(&AppConfig::default(), 40, 10).unwrap();
        assert_eq!(StatusBarWidget::summary(&app), " LOADING | RTL");

        app.apply_load(LoadResult::Ready { pages: 4 }).unwrap();
        assert_eq!(StatusBarWidget::summary(&app), " 1/4 | RTL");
    }
}
