//! Font descriptor
//!
//! A [`Font`] is an immutable description of a typeface at a size and style,
//! backed by a native engine handle it owns exclusively. Every construction
//! path resolves the family (falling back to the generic sans serif family),
//! decomposes the style, normalizes the size to points and only then asks the
//! engine for a handle. A font is either fully built or not built at all.

mod identity;
mod interop;
mod lifecycle;
mod record;

pub use record::FontRecord;

use std::fmt;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::constants::ANSI_CHARSET;
use crate::context::FontContext;
use crate::error::{FontError, FontResult};
use crate::family::FontFamily;
use crate::logfont::LogFont;
use crate::style::{FontStyle, StyleFlags};
use crate::traits::NativeFontHandle;
use crate::unit::{convert, GraphicsUnit};

pub struct Font {
    context: Arc<FontContext>,
    family: FontFamily,
    original_name: String,
    size: f32,
    size_in_points: f32,
    style: FontStyle,
    flags: StyleFlags,
    unit: GraphicsUnit,
    char_set: u8,
    vertical: bool,
    system_font_name: Option<String>,
    hash_code: OnceCell<i32>,
    log_font: OnceCell<LogFont>,
    /// Raw native handle; 0 once released.
    handle: AtomicUsize,
}

/// Everything a font is made of except its handle.
struct FontParts {
    family: FontFamily,
    original_name: String,
    size: f32,
    style: FontStyle,
    unit: GraphicsUnit,
    char_set: u8,
    vertical: bool,
    system_font_name: Option<String>,
}

enum FamilySource<'a> {
    Name(String),
    Resolved(Option<&'a FontFamily>),
}

/// Collects constructor arguments. Unset fields default to Regular style,
/// Point units, the configured default char set and horizontal writing.
pub struct FontBuilder<'a> {
    family: FamilySource<'a>,
    size: f32,
    style: FontStyle,
    unit: GraphicsUnit,
    char_set: Option<u8>,
    vertical: bool,
    system_font_name: Option<String>,
}

impl<'a> FontBuilder<'a> {
    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn unit(mut self, unit: GraphicsUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn char_set(mut self, char_set: u8) -> Self {
        self.char_set = Some(char_set);
        self
    }

    pub fn vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    fn system_font_name(mut self, name: &str) -> Self {
        self.system_font_name = Some(name.to_string());
        self
    }

    pub fn build(self, ctx: &Arc<FontContext>) -> FontResult<Font> {
        let (family, original_name) = match self.family {
            FamilySource::Name(name) => (ctx.resolve_family(&name), name),
            FamilySource::Resolved(Some(family)) => (family.clone(), family.name().to_string()),
            FamilySource::Resolved(None) => return Err(FontError::null_argument("family")),
        };
        Font::create(
            ctx,
            FontParts {
                family,
                original_name,
                size: self.size,
                style: self.style,
                unit: self.unit,
                char_set: self.char_set.unwrap_or(ctx.config().default_char_set),
                vertical: self.vertical,
                system_font_name: self.system_font_name,
            },
        )
    }
}

impl Font {
    /// Start building a font for the family called `family_name`.
    pub fn builder<'a>(family_name: &str, size: f32) -> FontBuilder<'a> {
        FontBuilder {
            family: FamilySource::Name(family_name.to_string()),
            size,
            style: FontStyle::REGULAR,
            unit: GraphicsUnit::Point,
            char_set: None,
            vertical: false,
            system_font_name: None,
        }
    }

    /// Start building a font for an already resolved family. Building fails
    /// with `NullArgument` when `family` is `None`.
    pub fn family_builder(family: Option<&FontFamily>, size: f32) -> FontBuilder<'_> {
        FontBuilder {
            family: FamilySource::Resolved(family),
            ..Font::builder("", size)
        }
    }

    /// Regular font of `size` points.
    pub fn new(ctx: &Arc<FontContext>, family_name: &str, size: f32) -> FontResult<Font> {
        Font::builder(family_name, size).build(ctx)
    }

    /// Font produced by the named-system-font factory.
    pub fn system_font(
        ctx: &Arc<FontContext>,
        family_name: &str,
        size: f32,
        system_name: &str,
    ) -> FontResult<Font> {
        Font::builder(family_name, size).system_font_name(system_name).build(ctx)
    }

    /// Copy of `prototype` with a different style and its own native handle.
    pub fn from_prototype(prototype: &Font, style: FontStyle) -> FontResult<Font> {
        Font::create(
            &prototype.context,
            FontParts {
                family: prototype.family.clone(),
                original_name: prototype.original_name.clone(),
                size: prototype.size,
                style,
                unit: prototype.unit,
                char_set: prototype.char_set,
                vertical: prototype.vertical,
                system_font_name: prototype.system_font_name.clone(),
            },
        )
    }

    /// Equivalent font with a fresh native handle.
    pub fn try_clone(&self) -> FontResult<Font> {
        Font::from_prototype(self, self.style)
    }

    fn create(ctx: &Arc<FontContext>, parts: FontParts) -> FontResult<Font> {
        let handle = lifecycle::allocate(ctx, &parts)?;
        Ok(Font::assemble(ctx, parts, handle))
    }

    /// Wrap a handle the engine already created, naming it `family_name`.
    /// A size that isn't positive releases `handle` and fails.
    pub(crate) fn wrap_native(
        ctx: &Arc<FontContext>,
        handle: NativeFontHandle,
        family_name: &str,
        style: FontStyle,
        size: f32,
    ) -> FontResult<Font> {
        if let Err(err) = lifecycle::check_size(size) {
            tracing::debug!("Rejecting imported font {:#x} of size {}", handle.get(), size);
            if let Err(status) = ctx.engine().delete_font(handle) {
                tracing::warn!("Failed to release rejected font {:#x}: {}", handle.get(), status);
            }
            return Err(err);
        }
        let parts = FontParts {
            family: ctx.resolve_family(family_name),
            original_name: family_name.to_string(),
            size,
            style,
            unit: GraphicsUnit::Pixel,
            char_set: ANSI_CHARSET,
            vertical: false,
            system_font_name: None,
        };
        Ok(Font::assemble(ctx, parts, handle))
    }

    fn assemble(ctx: &Arc<FontContext>, parts: FontParts, handle: NativeFontHandle) -> Font {
        let size_in_points = convert(parts.size, parts.unit, GraphicsUnit::Point, ctx.config().dpi_x);
        Font {
            context: Arc::clone(ctx),
            family: parts.family,
            original_name: parts.original_name,
            size: parts.size,
            size_in_points,
            style: parts.style,
            flags: StyleFlags::from(parts.style),
            unit: parts.unit,
            char_set: parts.char_set,
            vertical: parts.vertical,
            system_font_name: parts.system_font_name.filter(|name| !name.is_empty()),
            hash_code: OnceCell::new(),
            log_font: OnceCell::new(),
            handle: AtomicUsize::new(handle.get()),
        }
    }

    pub fn context(&self) -> &Arc<FontContext> {
        &self.context
    }

    pub fn family(&self) -> &FontFamily {
        &self.family
    }

    /// Name of the resolved family.
    pub fn name(&self) -> &str {
        self.family.name()
    }

    /// The family name originally asked for, even if it didn't resolve.
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn size_in_points(&self) -> f32 {
        self.size_in_points
    }

    pub fn unit(&self) -> GraphicsUnit {
        self.unit
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn bold(&self) -> bool {
        self.flags.bold
    }

    pub fn italic(&self) -> bool {
        self.flags.italic
    }

    pub fn underline(&self) -> bool {
        self.flags.underline
    }

    pub fn strikeout(&self) -> bool {
        self.flags.strikeout
    }

    pub fn char_set(&self) -> u8 {
        self.char_set
    }

    pub fn vertical(&self) -> bool {
        self.vertical
    }

    pub fn system_font_name(&self) -> Option<&str> {
        self.system_font_name.as_deref()
    }

    pub fn is_system_font(&self) -> bool {
        self.system_font_name.is_some()
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Font: Name={}, Size={}, Units={}, GdiCharSet={}, GdiVerticalFont={}]",
            self.name(),
            self.size,
            self.unit.code(),
            self.char_set,
            self.vertical
        )
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.family.name())
            .field("original_name", &self.original_name)
            .field("size", &self.size)
            .field("unit", &self.unit)
            .field("style", &self.style)
            .field("char_set", &self.char_set)
            .field("vertical", &self.vertical)
            .field("system_font_name", &self.system_font_name)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
