//! Native handle allocation, release and height queries

use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::{Font, FontParts};
use crate::context::FontContext;
use crate::error::{FontError, FontResult};
use crate::status::Status;
use crate::traits::{MeasurementContext, NativeFontHandle};

/// Font sizes must be finite and positive.
pub(super) fn check_size(size: f32) -> FontResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(FontError::NativeFailure(Status::InvalidParameter));
    }
    Ok(())
}

/// Ask the engine for a handle matching `parts`.
pub(super) fn allocate(ctx: &Arc<FontContext>, parts: &FontParts) -> FontResult<NativeFontHandle> {
    check_size(parts.size)?;
    match ctx.engine().create_font(&parts.family, parts.size, parts.style, parts.unit) {
        Ok(handle) => {
            tracing::debug!(
                "Allocated font {:#x} for {} {} {:?} ({})",
                handle.get(),
                parts.family.name(),
                parts.size,
                parts.unit,
                parts.style
            );
            Ok(handle)
        }
        Err(Status::FontStyleNotFound) => Err(FontError::UnsupportedStyle {
            style: parts.style.to_string(),
            family: parts.original_name.clone(),
        }),
        Err(status) => Err(status.into()),
    }
}

impl Font {
    /// The engine handle, or `ObjectDisposed` once released.
    pub fn native_handle(&self) -> FontResult<NativeFontHandle> {
        NativeFontHandle::new(self.handle.load(Ordering::Acquire)).ok_or(FontError::ObjectDisposed)
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.load(Ordering::Acquire) == 0
    }

    /// Release the native handle. Only the first call reaches the engine;
    /// the handle is already cleared when its error is returned.
    pub fn dispose(&self) -> FontResult<()> {
        let raw = self.handle.swap(0, Ordering::AcqRel);
        let Some(handle) = NativeFontHandle::new(raw) else {
            return Ok(());
        };
        tracing::debug!("Releasing font {:#x} ({})", raw, self.name());
        self.context.engine().delete_font(handle)?;
        Ok(())
    }

    /// Line spacing in pixels at the host's vertical resolution.
    pub fn get_height(&self) -> FontResult<f32> {
        self.get_height_for_dpi(self.context.config().dpi_y)
    }

    /// Line spacing in the units of `graphics`.
    pub fn get_height_with(&self, graphics: &dyn MeasurementContext) -> FontResult<f32> {
        let context = graphics.native_context().ok_or(FontError::null_argument("graphics"))?;
        let handle = self.native_handle()?;
        Ok(self.context.engine().font_height(handle, context)?)
    }

    pub fn get_height_for_dpi(&self, dpi: f32) -> FontResult<f32> {
        let handle = self.native_handle()?;
        Ok(self.context.engine().font_height_for_dpi(handle, dpi)?)
    }

    /// [`Font::get_height`] rounded up to whole pixels.
    pub fn height(&self) -> FontResult<i32> {
        Ok(self.get_height()?.ceil() as i32)
    }
}

impl Drop for Font {
    fn drop(&mut self) {
        if let Err(err) = self.dispose() {
            tracing::warn!("Failed to release font {}: {}", self.name(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::posix_context;
    use super::*;
    use crate::style::FontStyle;
    use crate::traits::{ContextHandle, NativeEngine};
    use crate::unit::GraphicsUnit;

    #[test]
    fn test_dispose_twice() {
        let (engine, ctx) = posix_context();
        let font = Font::new(&ctx, "Arial", 12.0).unwrap();
        assert_eq!(engine.live_fonts(), 1);

        font.dispose().unwrap();
        font.dispose().unwrap();
        assert!(font.is_disposed());
        assert_eq!(engine.live_fonts(), 0);
        assert_eq!(engine.delete_calls(), 1);

        drop(font);
        assert_eq!(engine.delete_calls(), 1);
    }

    #[test]
    fn test_drop_releases_handle() {
        let (engine, ctx) = posix_context();
        {
            let _font = Font::new(&ctx, "Arial", 12.0).unwrap();
            assert_eq!(engine.live_fonts(), 1);
        }
        assert_eq!(engine.live_fonts(), 0);
    }

    #[test]
    fn test_failed_release_still_clears_handle() {
        let (engine, ctx) = posix_context();
        let font = Font::new(&ctx, "Arial", 12.0).unwrap();
        engine.fail_delete(Status::ObjectBusy);

        assert_eq!(font.dispose(), Err(FontError::NativeFailure(Status::ObjectBusy)));
        assert!(font.is_disposed());
        assert_eq!(font.native_handle(), Err(FontError::ObjectDisposed));
        assert_eq!(font.dispose(), Ok(()));
    }

    #[test]
    fn test_operations_after_dispose() {
        let (_, ctx) = posix_context();
        let font = Font::new(&ctx, "Arial", 12.0).unwrap();
        font.dispose().unwrap();

        assert_eq!(font.get_height(), Err(FontError::ObjectDisposed));
        assert_eq!(font.get_height_for_dpi(72.0), Err(FontError::ObjectDisposed));
        assert_eq!(font.height(), Err(FontError::ObjectDisposed));
    }

    #[test]
    fn test_unsupported_style() {
        let (engine, ctx) = posix_context();
        engine.reject_style("Arial", FontStyle::ITALIC);

        let err = Font::builder("Arial", 12.0).style(FontStyle::ITALIC).build(&ctx).unwrap_err();
        assert_eq!(
            err,
            FontError::UnsupportedStyle { style: "Italic".to_string(), family: "Arial".to_string() }
        );
        assert_eq!(engine.live_fonts(), 0);
        assert!(Font::builder("Arial", 12.0).style(FontStyle::BOLD).build(&ctx).is_ok());
    }

    #[test]
    fn test_other_allocation_failures() {
        let (engine, ctx) = posix_context();
        engine.fail_create(Status::OutOfMemory);
        assert_eq!(
            Font::new(&ctx, "Arial", 12.0).unwrap_err(),
            FontError::NativeFailure(Status::OutOfMemory)
        );
    }

    #[test]
    fn test_invalid_sizes() {
        let (engine, ctx) = posix_context();
        for size in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            assert_eq!(
                Font::new(&ctx, "Arial", size).unwrap_err(),
                FontError::NativeFailure(Status::InvalidParameter)
            );
        }
        assert_eq!(engine.create_calls(), 0);
    }

    #[test]
    fn test_heights() {
        let (engine, ctx) = posix_context();
        let font = Font::builder("Arial", 20.0).unit(GraphicsUnit::Pixel).build(&ctx).unwrap();

        let at_96 = font.get_height().unwrap();
        assert_eq!(at_96, 20.0 * crate::dummy_engine::LINE_SPACING);
        assert_eq!(font.height().unwrap(), at_96.ceil() as i32);

        let graphics = engine.create_image_context(1, 1).unwrap();
        assert_eq!(font.get_height_with(&graphics).unwrap(), at_96);
    }

    #[test]
    fn test_height_requires_live_context() {
        let (_, ctx) = posix_context();
        let font = Font::new(&ctx, "Arial", 12.0).unwrap();
        assert_eq!(
            font.get_height_with(&None::<ContextHandle>),
            Err(FontError::null_argument("graphics"))
        );
    }
}
