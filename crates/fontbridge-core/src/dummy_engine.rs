//! In-memory engine and windowing system for testing without native libraries

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::constants::DEFAULT_DPI_X;
use crate::family::FontFamily;
use crate::logfont::LogFont;
use crate::status::Status;
use crate::style::FontStyle;
use crate::traits::{
    ContextHandle, DeviceContext, NativeEngine, NativeFontHandle, PlatformFontHandle,
    WindowingSystem,
};
use crate::unit::{convert, GraphicsUnit};

/// Line spacing reported by [`DummyEngine`], as a multiple of the em size.
pub const LINE_SPACING: f32 = 1.15;

/// Font object held by [`DummyEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct DummyFont {
    pub family: String,
    pub size: f32,
    pub style: FontStyle,
    pub unit: GraphicsUnit,
}

impl DummyFont {
    fn pixels(&self, dpi: f32) -> f32 {
        convert(self.size, self.unit, GraphicsUnit::Pixel, dpi)
    }

    fn describe(&self, dpi: f32) -> LogFont {
        LogFont::describe(&self.family, -(self.pixels(dpi).round() as i32), self.style)
    }
}

#[derive(Default)]
struct EngineState {
    fonts: HashMap<usize, DummyFont>,
    /// Context handle to its resolution
    contexts: HashMap<usize, f32>,
    next_id: usize,
    rejected: Vec<(String, FontStyle)>,
    fail_create: Option<Status>,
    fail_delete: Option<Status>,
    fail_log_font: Option<Status>,
    reported_char_set: u8,
    create_calls: usize,
    delete_calls: usize,
    log_font_calls: usize,
}

impl EngineState {
    fn next_handle(&mut self) -> usize {
        self.next_id += 1;
        self.next_id
    }

    fn insert_font(&mut self, font: DummyFont) -> Result<NativeFontHandle, Status> {
        if let Some(status) = self.fail_create {
            return Err(status);
        }
        let id = self.next_handle();
        self.fonts.insert(id, font);
        NativeFontHandle::new(id).ok_or(Status::GenericError)
    }

    fn insert_context(&mut self) -> Result<ContextHandle, Status> {
        let id = self.next_handle();
        self.contexts.insert(id, DEFAULT_DPI_X);
        ContextHandle::new(id).ok_or(Status::GenericError)
    }

    fn font(&self, handle: NativeFontHandle) -> Result<&DummyFont, Status> {
        self.fonts.get(&handle.get()).ok_or(Status::InvalidParameter)
    }

    fn context_dpi(&self, context: ContextHandle) -> Result<f32, Status> {
        self.contexts.get(&context.get()).copied().ok_or(Status::InvalidParameter)
    }
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Engine that keeps fonts and contexts in a table. Every context it hands
/// out renders at 96 dpi. Failures can be injected per operation.
#[derive(Default)]
pub struct DummyEngine {
    state: Mutex<EngineState>,
}

impl DummyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `family` report that it has no face for any style sharing bits
    /// with `style`.
    pub fn reject_style(&self, family: &str, style: FontStyle) {
        locked(&self.state).rejected.push((family.to_string(), style));
    }

    pub fn fail_create(&self, status: Status) {
        locked(&self.state).fail_create = Some(status);
    }

    pub fn fail_delete(&self, status: Status) {
        locked(&self.state).fail_delete = Some(status);
    }

    /// Log-font extraction fails after scribbling over part of the output.
    pub fn fail_log_font(&self, status: Status) {
        locked(&self.state).fail_log_font = Some(status);
    }

    /// Char set written by [`NativeEngine::log_font`]. Defaults to 0.
    pub fn report_char_set(&self, char_set: u8) {
        locked(&self.state).reported_char_set = char_set;
    }

    pub fn live_fonts(&self) -> usize {
        locked(&self.state).fonts.len()
    }

    pub fn live_contexts(&self) -> usize {
        locked(&self.state).contexts.len()
    }

    pub fn create_calls(&self) -> usize {
        locked(&self.state).create_calls
    }

    pub fn delete_calls(&self) -> usize {
        locked(&self.state).delete_calls
    }

    pub fn log_font_calls(&self) -> usize {
        locked(&self.state).log_font_calls
    }

    pub fn font(&self, handle: NativeFontHandle) -> Option<DummyFont> {
        locked(&self.state).fonts.get(&handle.get()).cloned()
    }
}

impl NativeEngine for DummyEngine {
    fn create_font(
        &self,
        family: &FontFamily,
        size: f32,
        style: FontStyle,
        unit: GraphicsUnit,
    ) -> Result<NativeFontHandle, Status> {
        let mut state = locked(&self.state);
        state.create_calls += 1;
        if !size.is_finite() || size <= 0.0 {
            return Err(Status::InvalidParameter);
        }
        let rejected = state
            .rejected
            .iter()
            .any(|(name, bits)| name.eq_ignore_ascii_case(family.name()) && style.intersects(*bits));
        if rejected {
            return Err(Status::FontStyleNotFound);
        }
        state.insert_font(DummyFont { family: family.name().to_string(), size, style, unit })
    }

    fn delete_font(&self, font: NativeFontHandle) -> Result<(), Status> {
        let mut state = locked(&self.state);
        state.delete_calls += 1;
        if let Some(status) = state.fail_delete {
            return Err(status);
        }
        state.fonts.remove(&font.get()).map(|_| ()).ok_or(Status::InvalidParameter)
    }

    fn font_height(&self, font: NativeFontHandle, context: ContextHandle) -> Result<f32, Status> {
        let dpi = locked(&self.state).context_dpi(context)?;
        self.font_height_for_dpi(font, dpi)
    }

    fn font_height_for_dpi(&self, font: NativeFontHandle, dpi: f32) -> Result<f32, Status> {
        let state = locked(&self.state);
        Ok(state.font(font)?.pixels(dpi) * LINE_SPACING)
    }

    fn log_font(
        &self,
        font: NativeFontHandle,
        context: ContextHandle,
        out: &mut LogFont,
    ) -> Result<(), Status> {
        let mut state = locked(&self.state);
        state.log_font_calls += 1;
        let dpi = state.context_dpi(context)?;
        let described = state.font(font)?.describe(dpi);
        if let Some(status) = state.fail_log_font {
            out.height = described.height;
            out.face_name = described.face_name;
            return Err(status);
        }
        *out = described;
        out.char_set = state.reported_char_set;
        Ok(())
    }

    fn create_font_from_log_font(
        &self,
        _hdc: DeviceContext,
        log_font: &LogFont,
    ) -> Result<NativeFontHandle, Status> {
        let mut state = locked(&self.state);
        state.create_calls += 1;
        state.insert_font(DummyFont {
            family: log_font.face_name(),
            size: log_font.size(),
            style: log_font.style(),
            unit: GraphicsUnit::Pixel,
        })
    }

    /// Platform handles share the engine's handle space, so `hfont` must be
    /// a live font of this engine.
    fn create_font_from_platform_handle(
        &self,
        hfont: PlatformFontHandle,
    ) -> Result<(NativeFontHandle, LogFont), Status> {
        let mut state = locked(&self.state);
        state.create_calls += 1;
        let source = state.fonts.get(&hfont.0).cloned().ok_or(Status::InvalidParameter)?;
        let log_font = source.describe(DEFAULT_DPI_X);
        let handle = state.insert_font(source)?;
        Ok((handle, log_font))
    }

    fn create_image_context(&self, width: u32, height: u32) -> Result<ContextHandle, Status> {
        if width == 0 || height == 0 {
            return Err(Status::InvalidParameter);
        }
        locked(&self.state).insert_context()
    }

    fn context_from_hdc(&self, hdc: DeviceContext) -> Result<ContextHandle, Status> {
        if hdc.is_null() {
            return Err(Status::InvalidParameter);
        }
        locked(&self.state).insert_context()
    }

    fn delete_context(&self, context: ContextHandle) -> Result<(), Status> {
        locked(&self.state)
            .contexts
            .remove(&context.get())
            .map(|_| ())
            .ok_or(Status::InvalidParameter)
    }
}

const SCREEN_DC: DeviceContext = DeviceContext(0xDC);
const FIRST_HFONT: usize = 0x1000;

#[derive(Default)]
struct WindowingState {
    outstanding_dcs: usize,
    fonts: HashMap<usize, LogFont>,
    next_hfont: usize,
    created: usize,
}

impl WindowingState {
    fn register(&mut self, log_font: LogFont) -> PlatformFontHandle {
        let hfont = FIRST_HFONT + self.next_hfont;
        self.next_hfont += 1;
        self.fonts.insert(hfont, log_font);
        PlatformFontHandle(hfont)
    }
}

/// Windowing system with a single screen DC and a table of HFONTs.
#[derive(Default)]
pub struct DummyWindowing {
    state: Mutex<WindowingState>,
}

impl DummyWindowing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font as if another part of the program had created it.
    pub fn register(&self, log_font: LogFont) -> PlatformFontHandle {
        locked(&self.state).register(log_font)
    }

    /// Screen DCs handed out and not yet released.
    pub fn outstanding_dcs(&self) -> usize {
        locked(&self.state).outstanding_dcs
    }

    /// Number of successful `create_font_indirect` calls.
    pub fn created_fonts(&self) -> usize {
        locked(&self.state).created
    }
}

impl WindowingSystem for DummyWindowing {
    fn get_dc(&self) -> DeviceContext {
        locked(&self.state).outstanding_dcs += 1;
        SCREEN_DC
    }

    fn release_dc(&self, hdc: DeviceContext) {
        if hdc == SCREEN_DC {
            let mut state = locked(&self.state);
            state.outstanding_dcs = state.outstanding_dcs.saturating_sub(1);
        }
    }

    fn create_font_indirect(&self, log_font: &LogFont) -> PlatformFontHandle {
        if log_font.face_name().is_empty() {
            return PlatformFontHandle::NULL;
        }
        let mut state = locked(&self.state);
        state.created += 1;
        state.register(*log_font)
    }

    fn log_font_of(&self, hfont: PlatformFontHandle) -> Option<LogFont> {
        locked(&self.state).fonts.get(&hfont.0).copied()
    }
}
