//! Conversions between fonts, windowing-system handles and logical-font records

use std::sync::Arc;

use super::Font;
use crate::constants::{ANSI_CHARSET, DEFAULT_CHARSET};
use crate::context::FontContext;
use crate::error::{FontError, FontResult};
use crate::logfont::{LogFont, LogFontRecord, RecordLayout};
use crate::style::FontStyle;
use crate::traits::{DeviceContext, MeasurementContext, PlatformFontHandle};

impl Font {
    /// Import a windowing-system font. A null handle produces the configured
    /// default font instead of an error.
    pub fn from_hfont(ctx: &Arc<FontContext>, hfont: PlatformFontHandle) -> FontResult<Font> {
        if hfont.is_null() {
            let config = ctx.config();
            return Font::new(ctx, &config.null_handle_family, config.null_handle_size);
        }
        ctx.bridge().import_handle(ctx, hfont)
    }

    /// Windowing-system handle for this font.
    pub fn to_hfont(&self) -> FontResult<PlatformFontHandle> {
        self.native_handle()?;
        self.context.bridge().export_handle(self)
    }

    /// Import a logical-font record without a caller-supplied device context.
    pub fn from_log_font(ctx: &Arc<FontContext>, log_font: &LogFont) -> FontResult<Font> {
        ctx.bridge().import_log_font(ctx, log_font)
    }

    /// Import a logical-font record rendered against `hdc`.
    ///
    /// The engine builds the handle from the record, but the descriptor only
    /// carries the configured placeholder family and size in Pixel units.
    pub fn from_log_font_with(
        ctx: &Arc<FontContext>,
        log_font: &LogFont,
        hdc: DeviceContext,
    ) -> FontResult<Font> {
        let handle = ctx.engine().create_font_from_log_font(hdc, log_font)?;
        let config = ctx.config();
        Font::wrap_native(
            ctx,
            handle,
            &config.log_font_family,
            FontStyle::REGULAR,
            config.log_font_size,
        )
    }

    pub fn from_hdc(_ctx: &Arc<FontContext>, _hdc: DeviceContext) -> FontResult<Font> {
        Err(FontError::not_supported("Font::from_hdc"))
    }

    /// Fill `record` using a measurement context supplied by the platform.
    pub fn to_log_font<R: LogFontRecord + ?Sized>(&self, record: &mut R) -> FontResult<()> {
        self.native_handle()?;
        self.context
            .bridge()
            .with_measurement_context(self.context.engine(), &mut |graphics: &dyn MeasurementContext| {
                self.to_log_font_with(Some(&mut *record), graphics)
            })
    }

    /// Fill `record` with this font as rendered into `graphics`.
    ///
    /// The record is only written when the engine succeeds. A reported char
    /// set of 0 is stored as 1. Records shorter than [`LogFont::SIZE`] are
    /// left as they are.
    pub fn to_log_font_with<R: LogFontRecord + ?Sized>(
        &self,
        record: Option<&mut R>,
        graphics: &dyn MeasurementContext,
    ) -> FontResult<()> {
        let context = graphics.native_context().ok_or(FontError::null_argument("graphics"))?;
        let record = record.ok_or(FontError::null_record("log_font"))?;
        let handle = self.native_handle()?;

        if record.layout() != RecordLayout::Sequential {
            return Err(FontError::InvalidLayout { name: "log_font" });
        }

        let mut bytes = record.read_record();
        let Some(mut working) = LogFont::from_bytes(&bytes) else {
            tracing::debug!("Log font record too short ({} bytes), leaving it alone", bytes.len());
            return Ok(());
        };

        self.context.engine().log_font(handle, context, &mut working)?;

        if working.char_set == ANSI_CHARSET {
            working.char_set = DEFAULT_CHARSET;
        }
        bytes[..LogFont::SIZE].copy_from_slice(&working.to_bytes());
        record.write_record(&bytes);
        Ok(())
    }

    /// This font's logical-font record, extracted on first use.
    pub(crate) fn cached_log_font(&self) -> FontResult<LogFont> {
        self.log_font
            .get_or_try_init(|| {
                let mut log_font = LogFont::default();
                self.to_log_font(&mut log_font)?;
                Ok::<_, FontError>(log_font)
            })
            .copied()
    }
}
