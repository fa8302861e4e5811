// src/config.rs
use crate::constants::{
    DEFAULT_CHARSET, DEFAULT_DPI_X, DEFAULT_DPI_Y, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE,
    LOG_FONT_FAMILY, LOG_FONT_SIZE,
};
use crate::platform::PlatformKind;

#[derive(Clone, Debug, PartialEq)]
pub struct FontConfig {
    /// Host horizontal resolution, used for Pixel and World conversions.
    pub dpi_x: f32,
    /// Host vertical resolution, used by `Font::get_height`.
    pub dpi_y: f32,
    pub default_char_set: u8,
    /// Which native bridge to use. Fixed for the lifetime of a `FontContext`.
    pub platform: PlatformKind,
    /// Font produced when importing a null platform handle.
    pub null_handle_family: String,
    pub null_handle_size: f32,
    /// Placeholder identity for fonts imported from a logical-font record.
    pub log_font_family: String,
    pub log_font_size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            dpi_x: DEFAULT_DPI_X,
            dpi_y: DEFAULT_DPI_Y,
            default_char_set: DEFAULT_CHARSET,
            platform: PlatformKind::native(),
            null_handle_family: DEFAULT_FONT_FAMILY.to_string(),
            null_handle_size: DEFAULT_FONT_SIZE,
            log_font_family: LOG_FONT_FAMILY.to_string(),
            log_font_size: LOG_FONT_SIZE,
        }
    }
}

impl FontConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dpi(mut self, dpi_x: f32, dpi_y: f32) -> Self {
        self.dpi_x = dpi_x;
        self.dpi_y = dpi_y;
        self
    }

    pub fn with_platform(mut self, platform: PlatformKind) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_default_char_set(mut self, char_set: u8) -> Self {
        self.default_char_set = char_set;
        self
    }

    pub fn with_null_handle_font(mut self, family: &str, size: f32) -> Self {
        self.null_handle_family = family.to_string();
        self.null_handle_size = size;
        self
    }

    pub fn with_log_font_placeholder(mut self, family: &str, size: f32) -> Self {
        self.log_font_family = family.to_string();
        self.log_font_size = size;
        self
    }
}
