//! Fontbridge - font descriptors over native graphics engines
//!
//! This crate bundles:
//! - the engine-agnostic descriptor, unit conversion and logical-font
//!   marshaling from `fontbridge-core`
//! - a cairo-backed engine (`cairo` feature)
//! - a small command line front end

pub use fontbridge_core::*;

#[cfg(feature = "cairo")]
pub use fontbridge_cairo as cairo;

pub mod cli;
