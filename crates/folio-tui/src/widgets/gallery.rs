use folio_core::geometry::Rect as PxRect;
use folio_core::host::{Component, Edge, ImageSurface};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::host::{CellPage, EdgeGlow};
use crate::theme::Theme;

/// Side of one checkerboard tile, in image pixels at scale 1.0
const TILE_PX: f32 = 64.0;
/// Widest glow band, in cells
const GLOW_CELLS: f32 = 3.0;

pub struct GalleryWidget;

impl GalleryWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let host = app.pager.host();
        let cell = host.cell_size();

        {
            let buf = frame.buffer_mut();
            for x in area.left()..area.right() {
                for y in area.top()..area.bottom() {
                    if let Some(c) = buf.cell_mut((x, y)) {
                        c.reset();
                        c.set_bg(theme.gutter);
                    }
                }
            }
            for slot in app.pager.pages() {
                if let Some(rect) = cell_rect(slot.page().bounds(), cell, area) {
                    draw_page(buf, rect, area, cell, slot.page(), theme);
                }
            }
        }

        if let Some(progress) = app.pager.progress_view() {
            if let Some(rect) = cell_rect(progress.bounds(), cell, area) {
                draw_text_box(frame, rect, progress.text(), theme.fg0, theme);
            }
        }
        if let Some(view) = app.pager.error_view() {
            if let Some(rect) = cell_rect(view.bounds(), cell, area) {
                draw_text_box(frame, rect, view.text(), theme.error, theme);
            }
        }

        draw_glow(frame.buffer_mut(), area, host.glow(), theme);
    }
}

/// Cells covered by pixel bounds, clipped to `area`
pub fn cell_rect(bounds: PxRect, (cell_w, cell_h): (i32, i32), area: Rect) -> Option<Rect> {
    let left = bounds.left.div_euclid(cell_w).max(0);
    let top = bounds.top.div_euclid(cell_h).max(0);
    let right = (bounds.right + cell_w - 1)
        .div_euclid(cell_w)
        .min(area.width as i32);
    let bottom = (bounds.bottom + cell_h - 1)
        .div_euclid(cell_h)
        .min(area.height as i32);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        area.x + left as u16,
        area.y + top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

fn draw_page(
    buf: &mut Buffer,
    rect: Rect,
    area: Rect,
    (cell_w, cell_h): (i32, i32),
    page: &CellPage,
    theme: &Theme,
) {
    let bounds = page.bounds();
    let image = &page.image;
    let (pan_x, pan_y) = image.pan();
    let scale = image.scale_value();

    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            let px = ((x - area.x) as i32 * cell_w + cell_w / 2 - bounds.left) as f32;
            let py = ((y - area.y) as i32 * cell_h + cell_h / 2 - bounds.top) as f32;
            let u = ((px - pan_x) / scale / TILE_PX).floor() as i64;
            let v = ((py - pan_y) / scale / TILE_PX).floor() as i64;
            let color = if (u + v).rem_euclid(2) == 0 {
                theme.tile_light
            } else {
                theme.tile_dark
            };
            if let Some(c) = buf.cell_mut((x, y)) {
                c.set_symbol(" ");
                c.set_bg(color);
            }
        }
    }

    if let Some(index) = page.index() {
        let label = format!(" {} ", index + 1);
        let width = label.chars().count() as u16;
        if rect.width >= width {
            let x = rect.x + (rect.width - width) / 2;
            buf.set_string(
                x,
                rect.y,
                label,
                Style::default().fg(theme.bg0).bg(theme.accent),
            );
        }
    }
}

fn draw_text_box(frame: &mut Frame, rect: Rect, text: &str, color: Color, theme: &Theme) {
    let paragraph = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).bg(theme.bg2))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.grey2).bg(theme.bg2)),
        );
    frame.render_widget(Clear, rect);
    frame.render_widget(paragraph, rect);
}

fn draw_glow(buf: &mut Buffer, area: Rect, glow: &EdgeGlow, theme: &Theme) {
    for edge in Edge::ALL {
        let intensity = glow.intensity(edge);
        if intensity <= 0.0 {
            continue;
        }
        let band = (intensity * GLOW_CELLS).ceil() as u16;
        let symbol = if intensity > 0.66 {
            "▓"
        } else if intensity > 0.33 {
            "▒"
        } else {
            "░"
        };

        let band_rect = match edge {
            Edge::Left => Rect::new(area.x, area.y, band.min(area.width), area.height),
            Edge::Right => {
                let band = band.min(area.width);
                Rect::new(area.right() - band, area.y, band, area.height)
            }
            Edge::Top => Rect::new(area.x, area.y, area.width, band.min(area.height)),
            Edge::Bottom => {
                let band = band.min(area.height);
                Rect::new(area.x, area.bottom() - band, area.width, band)
            }
        };

        for y in band_rect.top()..band_rect.bottom() {
            for x in band_rect.left()..band_rect.right() {
                if let Some(c) = buf.cell_mut((x, y)) {
                    c.set_symbol(symbol);
                    c.set_fg(theme.glow);
                }
            }
        }
    }
}
