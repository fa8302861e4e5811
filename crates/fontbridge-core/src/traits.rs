use std::num::NonZeroUsize;

use crate::family::{FamilyNotFound, FontFamily};
use crate::logfont::LogFont;
use crate::status::Status;
use crate::style::FontStyle;
use crate::unit::GraphicsUnit;

// Handles

/// Engine-owned font object. Never null; a released font has no handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeFontHandle(NonZeroUsize);

impl NativeFontHandle {
    pub fn new(raw: usize) -> Option<Self> {
        NonZeroUsize::new(raw).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Engine-owned measurement context (a graphics object).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextHandle(NonZeroUsize);

impl ContextHandle {
    pub fn new(raw: usize) -> Option<Self> {
        NonZeroUsize::new(raw).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Windowing-system font handle (an HFONT). May be null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlatformFontHandle(pub usize);

impl PlatformFontHandle {
    pub const NULL: PlatformFontHandle = PlatformFontHandle(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Windowing-system device context (an HDC). May be null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeviceContext(pub usize);

impl DeviceContext {
    pub const NULL: DeviceContext = DeviceContext(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

// Collaborators

/// Native graphics engine that owns font objects and measurement contexts.
///
/// Every call reports failure as a non-`Ok` [`Status`]; implementations
/// never return `Err(Status::Ok)`.
pub trait NativeEngine: Send + Sync {
    fn create_font(
        &self,
        family: &FontFamily,
        size: f32,
        style: FontStyle,
        unit: GraphicsUnit,
    ) -> Result<NativeFontHandle, Status>;

    fn delete_font(&self, font: NativeFontHandle) -> Result<(), Status>;

    /// Line spacing of `font` in the units of `context`.
    fn font_height(&self, font: NativeFontHandle, context: ContextHandle) -> Result<f32, Status>;

    /// Line spacing of `font` in pixels at the given resolution.
    fn font_height_for_dpi(&self, font: NativeFontHandle, dpi: f32) -> Result<f32, Status>;

    /// Populate `out` from `font` as rendered into `context`. May leave `out`
    /// partially written when it fails.
    fn log_font(
        &self,
        font: NativeFontHandle,
        context: ContextHandle,
        out: &mut LogFont,
    ) -> Result<(), Status>;

    fn create_font_from_log_font(
        &self,
        hdc: DeviceContext,
        log_font: &LogFont,
    ) -> Result<NativeFontHandle, Status>;

    /// Import a windowing-system font, returning a new engine font together
    /// with its logical-font description.
    fn create_font_from_platform_handle(
        &self,
        hfont: PlatformFontHandle,
    ) -> Result<(NativeFontHandle, LogFont), Status>;

    /// Graphics context over a throwaway bitmap of the given size.
    fn create_image_context(&self, width: u32, height: u32) -> Result<ContextHandle, Status>;

    fn context_from_hdc(&self, hdc: DeviceContext) -> Result<ContextHandle, Status>;

    fn delete_context(&self, context: ContextHandle) -> Result<(), Status>;
}

/// Family-resolution subsystem.
pub trait FamilyResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Result<FontFamily, FamilyNotFound>;

    /// Fallback used whenever [`FamilyResolver::resolve`] fails.
    fn generic_sans_serif(&self) -> FontFamily;
}

/// Windowing system services, only consulted by the Windows strategy.
pub trait WindowingSystem: Send + Sync {
    /// Screen device context.
    fn get_dc(&self) -> DeviceContext;
    fn release_dc(&self, hdc: DeviceContext);
    /// Returns a null handle when the record is rejected.
    fn create_font_indirect(&self, log_font: &LogFont) -> PlatformFontHandle;
    fn log_font_of(&self, hfont: PlatformFontHandle) -> Option<LogFont>;
}

/// Anything that can lend a measurement context to the engine, such as a
/// drawing surface. `None` means the surface has no live context.
pub trait MeasurementContext {
    fn native_context(&self) -> Option<ContextHandle>;
}

impl MeasurementContext for ContextHandle {
    fn native_context(&self) -> Option<ContextHandle> {
        Some(*self)
    }
}

impl MeasurementContext for Option<ContextHandle> {
    fn native_context(&self) -> Option<ContextHandle> {
        *self
    }
}
