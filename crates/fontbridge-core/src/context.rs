//! Shared collaborators every font is created against

use std::fmt;
use std::sync::Arc;

use crate::config::FontConfig;
use crate::error::{FontError, FontResult};
use crate::family::FontFamily;
use crate::platform::{PlatformBridge, PlatformKind, PosixBridge, Win32Bridge};
use crate::traits::{FamilyResolver, NativeEngine, WindowingSystem};

/// Native engine, family resolver, platform strategy and host metrics.
///
/// Fonts keep an `Arc` to the context that created them so they can release
/// their native handle when dropped.
pub struct FontContext {
    engine: Arc<dyn NativeEngine>,
    resolver: Arc<dyn FamilyResolver>,
    bridge: Box<dyn PlatformBridge>,
    config: FontConfig,
}

impl FontContext {
    pub fn builder(
        engine: Arc<dyn NativeEngine>,
        resolver: Arc<dyn FamilyResolver>,
    ) -> FontContextBuilder {
        FontContextBuilder {
            engine,
            resolver,
            windowing: None,
            config: FontConfig::default(),
        }
    }

    pub fn engine(&self) -> &dyn NativeEngine {
        self.engine.as_ref()
    }

    pub fn resolver(&self) -> &dyn FamilyResolver {
        self.resolver.as_ref()
    }

    pub fn config(&self) -> &FontConfig {
        &self.config
    }

    pub fn platform(&self) -> PlatformKind {
        self.bridge.kind()
    }

    pub(crate) fn bridge(&self) -> &dyn PlatformBridge {
        self.bridge.as_ref()
    }

    /// Resolve `name`, substituting the generic sans serif family when the
    /// resolver doesn't know it.
    pub fn resolve_family(&self, name: &str) -> FontFamily {
        match self.resolver.resolve(name) {
            Ok(family) => family,
            Err(err) => {
                let fallback = self.resolver.generic_sans_serif();
                tracing::warn!("{}; using {}", err, fallback.name());
                fallback
            }
        }
    }
}

impl fmt::Debug for FontContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontContext")
            .field("platform", &self.platform())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

pub struct FontContextBuilder {
    engine: Arc<dyn NativeEngine>,
    resolver: Arc<dyn FamilyResolver>,
    windowing: Option<Arc<dyn WindowingSystem>>,
    config: FontConfig,
}

impl FontContextBuilder {
    pub fn config(mut self, config: FontConfig) -> Self {
        self.config = config;
        self
    }

    /// Windowing system for the Windows strategy. Ignored on POSIX.
    pub fn windowing(mut self, windowing: Arc<dyn WindowingSystem>) -> Self {
        self.windowing = Some(windowing);
        self
    }

    pub fn build(self) -> FontResult<Arc<FontContext>> {
        let (dpi_x, dpi_y) = (self.config.dpi_x, self.config.dpi_y);
        if !(dpi_x.is_finite() && dpi_x > 0.0 && dpi_y.is_finite() && dpi_y > 0.0) {
            return Err(FontError::InvalidResolution { dpi_x, dpi_y });
        }
        let bridge: Box<dyn PlatformBridge> = match self.config.platform {
            PlatformKind::Posix => Box::new(PosixBridge),
            PlatformKind::Windows => match self.windowing {
                Some(windowing) => Box::new(Win32Bridge::new(windowing)),
                None => {
                    return Err(FontError::not_supported(
                        "Windows font bridge without a windowing system",
                    ))
                }
            },
        };
        tracing::debug!("Font context ready ({:?} bridge)", bridge.kind());
        Ok(Arc::new(FontContext {
            engine: self.engine,
            resolver: self.resolver,
            bridge,
            config: self.config,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy_engine::{DummyEngine, DummyWindowing};
    use crate::family::InstalledFamilies;

    fn parts() -> (Arc<DummyEngine>, Arc<InstalledFamilies>) {
        (
            Arc::new(DummyEngine::new()),
            Arc::new(InstalledFamilies::new(["Arial"]).with_generic("Generic Sans")),
        )
    }

    #[test]
    fn test_windows_bridge_requires_windowing() {
        let (engine, resolver) = parts();
        let result = FontContext::builder(engine, resolver)
            .config(FontConfig::new().with_platform(PlatformKind::Windows))
            .build();
        assert!(matches!(result, Err(FontError::NotSupported { .. })));
    }

    #[test]
    fn test_bridge_selection() {
        let (engine, resolver) = parts();
        let posix = FontContext::builder(engine.clone(), resolver.clone())
            .config(FontConfig::new().with_platform(PlatformKind::Posix))
            .build()
            .unwrap();
        assert_eq!(posix.platform(), PlatformKind::Posix);

        let windows = FontContext::builder(engine, resolver)
            .config(FontConfig::new().with_platform(PlatformKind::Windows))
            .windowing(Arc::new(DummyWindowing::new()))
            .build()
            .unwrap();
        assert_eq!(windows.platform(), PlatformKind::Windows);
    }

    #[test]
    fn test_rejects_non_positive_dpi() {
        for (dpi_x, dpi_y) in [(0.0, 96.0), (96.0, -1.0), (f32::NAN, 96.0)] {
            let (engine, resolver) = parts();
            let result = FontContext::builder(engine, resolver)
                .config(FontConfig::new().with_platform(PlatformKind::Posix).with_dpi(dpi_x, dpi_y))
                .build();
            assert!(matches!(result, Err(FontError::InvalidResolution { .. })));
        }
    }

    #[test]
    fn test_resolve_family_falls_back() {
        let (engine, resolver) = parts();
        let ctx = FontContext::builder(engine, resolver)
            .config(FontConfig::new().with_platform(PlatformKind::Posix))
            .build()
            .unwrap();
        assert_eq!(ctx.resolve_family("arial").name(), "Arial");
        assert_eq!(ctx.resolve_family("Nope").name(), "Generic Sans");
    }
}
