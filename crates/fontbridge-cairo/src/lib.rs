//! Cairo engine for fontbridge-core
//!
//! Measures fonts through cairo's toy text API and, on Linux with the
//! `font-discovery` feature, resolves family names through fontconfig.

mod engine;
pub mod metrics;
#[cfg(all(target_os = "linux", feature = "font-discovery"))]
mod resolver;

use std::sync::Arc;

use fontbridge_core::{
    FamilyResolver, FontConfig, FontContext, FontResult, InstalledFamilies, PlatformKind,
};

pub use engine::CairoEngine;
pub use metrics::MetricsError;
#[cfg(all(target_os = "linux", feature = "font-discovery"))]
pub use resolver::FontconfigResolver;

/// Best family resolver for this host. Without fontconfig every name falls
/// back to the generic sans serif family.
pub fn default_resolver() -> Arc<dyn FamilyResolver> {
    #[cfg(all(target_os = "linux", feature = "font-discovery"))]
    {
        if FontconfigResolver::available() {
            return Arc::new(FontconfigResolver::new());
        }
        tracing::warn!(
            "Fontconfig unavailable; all families resolve to {}",
            fontbridge_core::constants::GENERIC_SANS_SERIF
        );
    }
    Arc::new(InstalledFamilies::new(Vec::<String>::new()))
}

/// Font context over a [`CairoEngine`] at the configured horizontal DPI.
///
/// Cairo handles are process-local, so the POSIX bridge is used on every
/// target.
pub fn font_context(config: FontConfig) -> FontResult<Arc<FontContext>> {
    let engine = Arc::new(CairoEngine::with_dpi(config.dpi_x));
    FontContext::builder(engine, default_resolver())
        .config(config.with_platform(PlatformKind::Posix))
        .build()
}
