use ratatui::style::Color;

/// Colors used by the gallery widgets
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub grey2: Color,

    /// Checkerboard tiles of a page image
    pub tile_light: Color,
    pub tile_dark: Color,
    /// Gap between pages
    pub gutter: Color,
    pub glow: Color,
    pub error: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            tile_light: Color::Rgb(0x7d, 0xae, 0xa3),
            tile_dark: Color::Rgb(0x45, 0x5b, 0x57),
            gutter: Color::Rgb(0x1d, 0x20, 0x21),
            glow: Color::Rgb(0xd8, 0xa6, 0x57),
            error: Color::Rgb(0xea, 0x69, 0x62),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }
}
