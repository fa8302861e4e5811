//! Fontbridge Core - engine-agnostic font descriptor
//!
//! This crate provides an immutable font descriptor backed by a native
//! engine handle, unit conversion between graphics units and marshaling to
//! and from the windowing system's logical-font record, independent of any
//! specific rendering engine.

pub mod config;
pub mod constants;
pub mod context;
pub mod dummy_engine;
pub mod error;
pub mod family;
pub mod font;
pub mod logfont;
pub mod platform;
pub mod status;
pub mod style;
pub mod traits;
pub mod unit;

// Re-export main types
pub use config::FontConfig;
pub use context::{FontContext, FontContextBuilder};
pub use error::{FontError, FontResult};
pub use family::{FamilyHandle, FamilyNotFound, FontFamily, InstalledFamilies};
pub use font::{Font, FontBuilder, FontRecord};
pub use logfont::{LogFont, LogFontRecord, RecordLayout};
pub use platform::{PlatformKind, ScratchContext, ScreenDc};
pub use status::Status;
pub use style::{FontStyle, StyleFlags};
pub use unit::{convert, convert_codes, GraphicsUnit};

// Re-export traits and handle types
pub use traits::*;
