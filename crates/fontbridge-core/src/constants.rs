// src/constants.rs

// Character sets
pub const DEFAULT_CHARSET: u8 = 1;
pub const ANSI_CHARSET: u8 = 0;

// Display metrics used when the host doesn't report any
pub const DEFAULT_DPI_X: f32 = 96.0;
pub const DEFAULT_DPI_Y: f32 = 96.0;

// Inches per unit denominators
pub const POINTS_PER_INCH: f64 = 72.0;
pub const DISPLAY_UNITS_PER_INCH: f64 = 75.0;
pub const DOCUMENT_UNITS_PER_INCH: f64 = 300.0;
pub const MILLIMETERS_PER_INCH: f64 = 25.4;

// Null HFONT import
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE: f32 = 10.0;

// Logical-font import placeholder
pub const LOG_FONT_FAMILY: &str = "Microsoft Sans Serif";
pub const LOG_FONT_SIZE: f32 = 10.0;

pub const GENERIC_SANS_SERIF: &str = "Microsoft Sans Serif";

// LOGFONTW
pub const LF_FACESIZE: usize = 32;
pub const LOG_FONT_SIZE_BYTES: usize = 92;
pub const CHARSET_OFFSET: usize = 23;
pub const FW_NORMAL: i32 = 400;
pub const FW_BOLD: i32 = 700;

// Identity hash mix
pub const HASH_SEED: i32 = 17;
pub const HASH_MULTIPLIER: i32 = 23;
