use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pager: PagerConfig,
    #[serde(default)]
    pub fling: FlingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files live here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Reading direction of the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingMode {
    /// Previous page on the left, next page on the right
    LeftToRight,
    /// Next page on the left, previous page on the right
    #[default]
    RightToLeft,
}

/// Interpolation curve applied to animation progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    Linear,
    /// 1 - (1-t)^3
    #[default]
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// 1 - (1-t)^2, fast start and slow settle
    FastSlow,
    /// 1 - 2^(-10t)
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Direction pages are laid out in
    #[serde(default)]
    pub reading_mode: ReadingMode,
    /// Gap between adjacent pages in pixels
    #[serde(default = "default_interval")]
    pub interval_px: i32,
    /// A gesture may move between pages only if |dx| > bias * |dy| on its first sample
    #[serde(default = "default_horizontal_bias")]
    pub horizontal_bias: f32,
    /// Settle animation duration for a zero-length settle
    #[serde(default = "default_settle_base")]
    pub settle_base_ms: u64,
    /// Extra settle duration per page width travelled, in units of the base duration
    #[serde(default = "default_settle_page_factor")]
    pub settle_page_factor: f32,
    /// Double tap zoom duration
    #[serde(default = "default_double_tap_scale")]
    pub double_tap_scale_ms: u64,
    #[serde(default = "default_scroll_easing")]
    pub scroll_easing: EasingType,
    #[serde(default = "default_fling_easing")]
    pub fling_easing: EasingType,
    #[serde(default = "default_scale_easing")]
    pub scale_easing: EasingType,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            reading_mode: ReadingMode::default(),
            interval_px: default_interval(),
            horizontal_bias: default_horizontal_bias(),
            settle_base_ms: default_settle_base(),
            settle_page_factor: default_settle_page_factor(),
            double_tap_scale_ms: default_double_tap_scale(),
            scroll_easing: default_scroll_easing(),
            fling_easing: default_fling_easing(),
            scale_easing: default_scale_easing(),
        }
    }
}

/// Physical parameters of the spline fling curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlingConfig {
    #[serde(default = "default_scroll_friction")]
    pub scroll_friction: f64,
    #[serde(default = "default_pixels_per_inch")]
    pub pixels_per_inch: f64,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            scroll_friction: default_scroll_friction(),
            pixels_per_inch: default_pixels_per_inch(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Frame rate while an animation is running
    #[serde(default = "default_frame_rate")]
    pub frame_rate_fps: u32,
    /// Virtual pixels per terminal column
    #[serde(default = "default_cell_width")]
    pub cell_width_px: i32,
    /// Virtual pixels per terminal row
    #[serde(default = "default_cell_height")]
    pub cell_height_px: i32,
    /// Two clicks closer than this form a double tap
    #[serde(default = "default_double_click")]
    pub double_click_ms: u64,
    /// Number of pages in the demo gallery
    #[serde(default = "default_page_count")]
    pub page_count: usize,
    /// Simulated time before the demo gallery reports its size
    #[serde(default = "default_load_delay")]
    pub load_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            frame_rate_fps: default_frame_rate(),
            cell_width_px: default_cell_width(),
            cell_height_px: default_cell_height(),
            double_click_ms: default_double_click(),
            page_count: default_page_count(),
            load_delay_ms: default_load_delay(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "h", "<C-l>" (Ctrl+l), "<S-g>" (Shift+g), "<Left>", "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Turn to the page on the left
    #[serde(default = "default_key_page_left")]
    pub page_left: String,
    /// Turn to the page on the right
    #[serde(default = "default_key_page_right")]
    pub page_right: String,
    /// Switch between left-to-right and right-to-left
    #[serde(default = "default_key_toggle_mode")]
    pub toggle_mode: String,
    /// Step to the next default zoom level
    #[serde(default = "default_key_zoom")]
    pub zoom: String,
    /// Jump to the first page
    #[serde(default = "default_key_first_page")]
    pub first_page: String,
    /// Jump to the last page
    #[serde(default = "default_key_last_page")]
    pub last_page: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            page_left: default_key_page_left(),
            page_right: default_key_page_right(),
            toggle_mode: default_key_toggle_mode(),
            zoom: default_key_zoom(),
            first_page: default_key_first_page(),
            last_page: default_key_last_page(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_page_left() -> String { "h".to_string() }
fn default_key_page_right() -> String { "l".to_string() }
fn default_key_toggle_mode() -> String { "m".to_string() }
fn default_key_zoom() -> String { "z".to_string() }
fn default_key_first_page() -> String { "g".to_string() }
fn default_key_last_page() -> String { "G".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_interval() -> i32 {
    48
}

fn default_horizontal_bias() -> f32 {
    1.5
}

fn default_settle_base() -> u64 {
    100
}

fn default_settle_page_factor() -> f32 {
    7.0
}

fn default_double_tap_scale() -> u64 {
    300
}

fn default_scroll_easing() -> EasingType {
    EasingType::Quintic
}

fn default_fling_easing() -> EasingType {
    EasingType::Cubic
}

fn default_scale_easing() -> EasingType {
    EasingType::FastSlow
}

fn default_scroll_friction() -> f64 {
    0.015
}

fn default_pixels_per_inch() -> f64 {
    160.0
}

fn default_frame_rate() -> u32 {
    60
}

fn default_cell_width() -> i32 {
    8
}

fn default_cell_height() -> i32 {
    16
}

fn default_double_click() -> u64 {
    300
}

fn default_page_count() -> usize {
    12
}

fn default_load_delay() -> u64 {
    800
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults if it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Get the log file path used by the interactive viewer
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("folio.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pager_config() {
        let config = PagerConfig::default();
        assert_eq!(config.reading_mode, ReadingMode::RightToLeft);
        assert_eq!(config.interval_px, 48);
        assert_eq!(config.settle_base_ms, 100);
        assert_eq!(config.double_tap_scale_ms, 300);
        assert_eq!(config.scroll_easing, EasingType::Quintic);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [pager]
            reading_mode = "left-to-right"
            interval_px = 32
            "#,
        )
        .unwrap();
        assert_eq!(config.pager.reading_mode, ReadingMode::LeftToRight);
        assert_eq!(config.pager.interval_px, 32);
        assert_eq!(config.pager.settle_base_ms, 100);
        assert_eq!(config.ui.frame_rate_fps, 60);
        assert_eq!(config.keymap.page_left, "h");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[pager]\nreading_mode = \"sideways\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip_keeps_mode() {
        let mut config = AppConfig::default();
        config.pager.reading_mode = ReadingMode::LeftToRight;
        let text = config.to_toml().unwrap();
        assert!(text.contains("left-to-right"));
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.pager.reading_mode, ReadingMode::LeftToRight);
    }

    #[test]
    fn test_save_to_and_load_from() {
        let dir = std::env::temp_dir().join(format!("folio-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.ui.page_count = 42;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.ui.page_count, 42);

        let missing = AppConfig::load_from(&dir.join("missing.toml")).unwrap();
        assert_eq!(missing.ui.page_count, UiConfig::default().page_count);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
