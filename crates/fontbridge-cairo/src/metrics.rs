// src/metrics.rs
use cairo::{Context, FontSlant, FontWeight, Format, ImageSurface};
use fontbridge_core::{FontStyle, Status};
use thiserror::Error;

/// Em size fonts are measured at; results are scaled from it.
const MEASURE_SIZE: f64 = 100.0;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Font {family} reports no line height")]
    EmptyExtents { family: String },
}

impl MetricsError {
    /// Engine status reported for this failure.
    pub fn status(&self) -> Status {
        match self {
            MetricsError::Cairo(cairo::Error::NoMemory) => Status::OutOfMemory,
            MetricsError::Cairo(cairo::Error::InvalidSize) => Status::InvalidParameter,
            MetricsError::Cairo(_) => Status::GenericError,
            MetricsError::EmptyExtents { .. } => Status::FontFamilyNotFound,
        }
    }
}

pub fn slant_and_weight(style: FontStyle) -> (FontSlant, FontWeight) {
    let slant = if style.contains(FontStyle::ITALIC) { FontSlant::Italic } else { FontSlant::Normal };
    let weight = if style.contains(FontStyle::BOLD) { FontWeight::Bold } else { FontWeight::Normal };
    (slant, weight)
}

/// Line spacing of `family` in `style`, as a multiple of the em size.
///
/// Cairo synthesizes missing faces, so every style is available.
pub fn line_spacing(family: &str, style: FontStyle) -> Result<f64, MetricsError> {
    let surf = ImageSurface::create(Format::ARgb32, 1, 1)?;
    let cr = Context::new(&surf)?;
    let (slant, weight) = slant_and_weight(style);
    cr.select_font_face(family, slant, weight);
    cr.set_font_size(MEASURE_SIZE);

    let height = cr.font_extents()?.height();
    if !height.is_finite() || height <= 0.0 {
        return Err(MetricsError::EmptyExtents { family: family.to_string() });
    }
    Ok(height / MEASURE_SIZE)
}
