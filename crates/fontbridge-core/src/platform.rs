//! Platform strategies for the native bridge
//!
//! On POSIX-like hosts the engine's font handles and the windowing system's
//! handles share one value space and a throwaway bitmap stands in for a
//! window when a measurement context is needed. On Windows every interop
//! call goes through a screen device context instead. The strategy is
//! picked once, when the [`FontContext`] is built.

use std::sync::Arc;

use crate::context::FontContext;
use crate::error::{FontError, FontResult};
use crate::font::Font;
use crate::logfont::LogFont;
use crate::status::Status;
use crate::traits::{
    ContextHandle, DeviceContext, MeasurementContext, NativeEngine, PlatformFontHandle,
    WindowingSystem,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKind {
    Posix,
    Windows,
}

impl PlatformKind {
    /// Strategy matching the compile target.
    pub fn native() -> Self {
        if cfg!(windows) {
            PlatformKind::Windows
        } else {
            PlatformKind::Posix
        }
    }
}

/// Engine measurement context that is deleted when dropped.
pub struct ScratchContext<'a> {
    engine: &'a dyn NativeEngine,
    handle: ContextHandle,
}

impl<'a> ScratchContext<'a> {
    /// Context over a 1x1 bitmap.
    pub fn bitmap(engine: &'a dyn NativeEngine) -> FontResult<Self> {
        let handle = engine.create_image_context(1, 1)?;
        tracing::debug!("Created scratch bitmap context {:#x}", handle.get());
        Ok(Self { engine, handle })
    }

    pub fn from_hdc(engine: &'a dyn NativeEngine, hdc: DeviceContext) -> FontResult<Self> {
        let handle = engine.context_from_hdc(hdc)?;
        Ok(Self { engine, handle })
    }
}

impl MeasurementContext for ScratchContext<'_> {
    fn native_context(&self) -> Option<ContextHandle> {
        Some(self.handle)
    }
}

impl Drop for ScratchContext<'_> {
    fn drop(&mut self) {
        if let Err(status) = self.engine.delete_context(self.handle) {
            tracing::warn!("Failed to delete measurement context {:#x}: {}", self.handle.get(), status);
        }
    }
}

/// Screen DC borrowed from the windowing system, released when dropped.
pub struct ScreenDc<'a> {
    windowing: &'a dyn WindowingSystem,
    hdc: DeviceContext,
}

impl<'a> ScreenDc<'a> {
    pub fn acquire(windowing: &'a dyn WindowingSystem) -> Self {
        Self { windowing, hdc: windowing.get_dc() }
    }

    pub fn hdc(&self) -> DeviceContext {
        self.hdc
    }
}

impl Drop for ScreenDc<'_> {
    fn drop(&mut self) {
        self.windowing.release_dc(self.hdc);
    }
}

/// What differs between platforms when crossing into native handles.
pub(crate) trait PlatformBridge: Send + Sync {
    fn kind(&self) -> PlatformKind;

    /// Run `f` with a measurement context suitable for log-font extraction.
    fn with_measurement_context(
        &self,
        engine: &dyn NativeEngine,
        f: &mut dyn FnMut(&dyn MeasurementContext) -> FontResult<()>,
    ) -> FontResult<()>;

    /// Import a non-null windowing-system font.
    fn import_handle(&self, ctx: &Arc<FontContext>, hfont: PlatformFontHandle) -> FontResult<Font>;

    fn export_handle(&self, font: &Font) -> FontResult<PlatformFontHandle>;

    /// Import a logical-font record when the caller has no device context.
    fn import_log_font(&self, ctx: &Arc<FontContext>, log_font: &LogFont) -> FontResult<Font>;
}

pub(crate) struct PosixBridge;

impl PlatformBridge for PosixBridge {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Posix
    }

    fn with_measurement_context(
        &self,
        engine: &dyn NativeEngine,
        f: &mut dyn FnMut(&dyn MeasurementContext) -> FontResult<()>,
    ) -> FontResult<()> {
        // No window to borrow a DC from, so measure against an image
        let scratch = ScratchContext::bitmap(engine)?;
        f(&scratch)
    }

    fn import_handle(&self, ctx: &Arc<FontContext>, hfont: PlatformFontHandle) -> FontResult<Font> {
        let (handle, log_font) = ctx.engine().create_font_from_platform_handle(hfont)?;
        Font::wrap_native(ctx, handle, &log_font.face_name(), log_font.style(), log_font.size())
    }

    fn export_handle(&self, font: &Font) -> FontResult<PlatformFontHandle> {
        Ok(PlatformFontHandle(font.native_handle()?.get()))
    }

    fn import_log_font(&self, ctx: &Arc<FontContext>, log_font: &LogFont) -> FontResult<Font> {
        Font::from_log_font_with(ctx, log_font, DeviceContext::NULL)
    }
}

pub(crate) struct Win32Bridge {
    windowing: Arc<dyn WindowingSystem>,
}

impl Win32Bridge {
    pub(crate) fn new(windowing: Arc<dyn WindowingSystem>) -> Self {
        Self { windowing }
    }
}

impl PlatformBridge for Win32Bridge {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Windows
    }

    fn with_measurement_context(
        &self,
        engine: &dyn NativeEngine,
        f: &mut dyn FnMut(&dyn MeasurementContext) -> FontResult<()>,
    ) -> FontResult<()> {
        let dc = ScreenDc::acquire(self.windowing.as_ref());
        let graphics = ScratchContext::from_hdc(engine, dc.hdc())?;
        f(&graphics)
    }

    fn import_handle(&self, ctx: &Arc<FontContext>, hfont: PlatformFontHandle) -> FontResult<Font> {
        let dc = ScreenDc::acquire(self.windowing.as_ref());
        let log_font = self
            .windowing
            .log_font_of(hfont)
            .ok_or(FontError::NativeFailure(Status::Win32Error))?;
        Font::from_log_font_with(ctx, &log_font, dc.hdc())
    }

    fn export_handle(&self, font: &Font) -> FontResult<PlatformFontHandle> {
        // Engine handles mean nothing to the windowing system; go through the record
        let log_font = font.cached_log_font()?;
        let hfont = self.windowing.create_font_indirect(&log_font);
        if hfont.is_null() {
            return Err(FontError::NativeFailure(Status::Win32Error));
        }
        Ok(hfont)
    }

    fn import_log_font(&self, ctx: &Arc<FontContext>, log_font: &LogFont) -> FontResult<Font> {
        let dc = ScreenDc::acquire(self.windowing.as_ref());
        Font::from_log_font_with(ctx, log_font, dc.hdc())
    }
}
