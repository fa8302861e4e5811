//! Native engine backed by cairo's font metrics

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cairo::{Format, ImageSurface};
use fontbridge_core::constants::DEFAULT_DPI_X;
use fontbridge_core::{
    convert, ContextHandle, DeviceContext, FontFamily, FontStyle, GraphicsUnit, LogFont,
    NativeEngine, NativeFontHandle, PlatformFontHandle, Status,
};

use crate::metrics::{self, MetricsError};

/// Font object. Cairo contexts aren't `Send`, so only the measured
/// metrics are kept.
#[derive(Debug, Clone)]
struct CairoFont {
    family: String,
    size: f32,
    unit: GraphicsUnit,
    style: FontStyle,
    line_spacing: f32,
}

impl CairoFont {
    fn measure(family: &str, size: f32, unit: GraphicsUnit, style: FontStyle) -> Result<Self, Status> {
        if !size.is_finite() || size <= 0.0 {
            return Err(Status::InvalidParameter);
        }
        let line_spacing = metrics::line_spacing(family, style).map_err(|err: MetricsError| {
            tracing::warn!("Failed to measure {}: {}", family, err);
            err.status()
        })?;
        Ok(Self {
            family: family.to_string(),
            size,
            unit,
            style,
            line_spacing: line_spacing as f32,
        })
    }

    fn pixels(&self, dpi: f32) -> f32 {
        convert(self.size, self.unit, GraphicsUnit::Pixel, dpi)
    }

    fn describe(&self, dpi: f32) -> LogFont {
        LogFont::describe(&self.family, -(self.pixels(dpi).round() as i32), self.style)
    }
}

#[derive(Default)]
struct Tables {
    fonts: HashMap<usize, CairoFont>,
    /// Context handle to its resolution
    contexts: HashMap<usize, f32>,
    next_id: usize,
}

impl Tables {
    fn next_id(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }

    fn insert_font(&mut self, font: CairoFont) -> Result<NativeFontHandle, Status> {
        let id = self.next_id();
        tracing::debug!("Cairo font {:#x}: {} {} {:?}", id, font.family, font.size, font.unit);
        self.fonts.insert(id, font);
        NativeFontHandle::new(id).ok_or(Status::GenericError)
    }

    fn font(&self, handle: NativeFontHandle) -> Result<&CairoFont, Status> {
        self.fonts.get(&handle.get()).ok_or(Status::InvalidParameter)
    }

    fn context_dpi(&self, context: ContextHandle) -> Result<f32, Status> {
        self.contexts.get(&context.get()).copied().ok_or(Status::InvalidParameter)
    }
}

/// Engine whose handles index an in-process table of cairo-measured fonts.
///
/// Handles double as platform font handles, so pair it with the POSIX
/// bridge. There are no device contexts; image contexts render at the
/// engine's resolution.
pub struct CairoEngine {
    tables: Mutex<Tables>,
    dpi: f32,
}

impl Default for CairoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CairoEngine {
    pub fn new() -> Self {
        Self::with_dpi(DEFAULT_DPI_X)
    }

    pub fn with_dpi(dpi: f32) -> Self {
        Self { tables: Mutex::new(Tables::default()), dpi }
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    pub fn live_fonts(&self) -> usize {
        self.tables().fonts.len()
    }

    pub fn live_contexts(&self) -> usize {
        self.tables().contexts.len()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NativeEngine for CairoEngine {
    fn create_font(
        &self,
        family: &FontFamily,
        size: f32,
        style: FontStyle,
        unit: GraphicsUnit,
    ) -> Result<NativeFontHandle, Status> {
        let font = CairoFont::measure(family.name(), size, unit, style)?;
        self.tables().insert_font(font)
    }

    fn delete_font(&self, font: NativeFontHandle) -> Result<(), Status> {
        self.tables().fonts.remove(&font.get()).map(|_| ()).ok_or(Status::InvalidParameter)
    }

    fn font_height(&self, font: NativeFontHandle, context: ContextHandle) -> Result<f32, Status> {
        let dpi = self.tables().context_dpi(context)?;
        self.font_height_for_dpi(font, dpi)
    }

    fn font_height_for_dpi(&self, font: NativeFontHandle, dpi: f32) -> Result<f32, Status> {
        let tables = self.tables();
        let font = tables.font(font)?;
        Ok(font.pixels(dpi) * font.line_spacing)
    }

    fn log_font(
        &self,
        font: NativeFontHandle,
        context: ContextHandle,
        out: &mut LogFont,
    ) -> Result<(), Status> {
        let tables = self.tables();
        let dpi = tables.context_dpi(context)?;
        *out = tables.font(font)?.describe(dpi);
        Ok(())
    }

    fn create_font_from_log_font(
        &self,
        _hdc: DeviceContext,
        log_font: &LogFont,
    ) -> Result<NativeFontHandle, Status> {
        let font =
            CairoFont::measure(&log_font.face_name(), log_font.size(), GraphicsUnit::Pixel, log_font.style())?;
        self.tables().insert_font(font)
    }

    fn create_font_from_platform_handle(
        &self,
        hfont: PlatformFontHandle,
    ) -> Result<(NativeFontHandle, LogFont), Status> {
        let mut tables = self.tables();
        let source = tables.fonts.get(&hfont.0).cloned().ok_or(Status::InvalidParameter)?;
        let log_font = source.describe(self.dpi);
        let handle = tables.insert_font(source)?;
        Ok((handle, log_font))
    }

    fn create_image_context(&self, width: u32, height: u32) -> Result<ContextHandle, Status> {
        let width = i32::try_from(width).map_err(|_| Status::ValueOverflow)?;
        let height = i32::try_from(height).map_err(|_| Status::ValueOverflow)?;
        // Surfaces aren't Send; create one only to validate the request
        ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| MetricsError::from(err).status())?;

        let mut tables = self.tables();
        let id = tables.next_id();
        tables.contexts.insert(id, self.dpi);
        ContextHandle::new(id).ok_or(Status::GenericError)
    }

    fn context_from_hdc(&self, _hdc: DeviceContext) -> Result<ContextHandle, Status> {
        Err(Status::NotImplemented)
    }

    fn delete_context(&self, context: ContextHandle) -> Result<(), Status> {
        self.tables().contexts.remove(&context.get()).map(|_| ()).ok_or(Status::InvalidParameter)
    }
}
