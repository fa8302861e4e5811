//! Measurement units and the inch-based unit converter

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DISPLAY_UNITS_PER_INCH, DOCUMENT_UNITS_PER_INCH, MILLIMETERS_PER_INCH, POINTS_PER_INCH,
};
use crate::error::{FontError, FontResult};

/// Measurement system a font size is expressed in.
///
/// Discriminants match the engine's numeric unit codes, which is also what
/// the serialized form carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum GraphicsUnit {
    World = 0,
    Display = 1,
    Pixel = 2,
    Point = 3,
    Inch = 4,
    Document = 5,
    Millimeter = 6,
}

impl GraphicsUnit {
    pub const ALL: [GraphicsUnit; 7] = [
        GraphicsUnit::World,
        GraphicsUnit::Display,
        GraphicsUnit::Pixel,
        GraphicsUnit::Point,
        GraphicsUnit::Inch,
        GraphicsUnit::Document,
        GraphicsUnit::Millimeter,
    ];

    pub fn from_code(code: i32) -> FontResult<Self> {
        match code {
            0 => Ok(GraphicsUnit::World),
            1 => Ok(GraphicsUnit::Display),
            2 => Ok(GraphicsUnit::Pixel),
            3 => Ok(GraphicsUnit::Point),
            4 => Ok(GraphicsUnit::Inch),
            5 => Ok(GraphicsUnit::Document),
            6 => Ok(GraphicsUnit::Millimeter),
            _ => Err(FontError::InvalidUnit { code }),
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    /// How many of this unit make up one inch.
    fn per_inch(self, dpi_x: f32) -> f64 {
        match self {
            GraphicsUnit::Display => DISPLAY_UNITS_PER_INCH,
            GraphicsUnit::Document => DOCUMENT_UNITS_PER_INCH,
            GraphicsUnit::Inch => 1.0,
            GraphicsUnit::Millimeter => MILLIMETERS_PER_INCH,
            GraphicsUnit::Pixel | GraphicsUnit::World => f64::from(dpi_x),
            GraphicsUnit::Point => POINTS_PER_INCH,
        }
    }
}

impl From<GraphicsUnit> for i32 {
    fn from(unit: GraphicsUnit) -> Self {
        unit.code()
    }
}

impl TryFrom<i32> for GraphicsUnit {
    type Error = FontError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        GraphicsUnit::from_code(code)
    }
}

impl fmt::Display for GraphicsUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Convert `value` from one unit to another, going through inches.
///
/// `dpi_x` is the host's horizontal resolution and only matters when either
/// side is `Pixel` or `World`.
pub fn convert(value: f32, from: GraphicsUnit, to: GraphicsUnit, dpi_x: f32) -> f32 {
    if from == to {
        return value;
    }
    let inches = f64::from(value) / from.per_inch(dpi_x);
    (inches * to.per_inch(dpi_x)) as f32
}

/// Same as [`convert`] for raw unit codes, as found in serialized data or
/// handed over by a native caller.
pub fn convert_codes(value: f32, from: i32, to: i32, dpi_x: f32) -> FontResult<f32> {
    let from = GraphicsUnit::from_code(from)?;
    let to = GraphicsUnit::from_code(to)?;
    Ok(convert(value, from, to, dpi_x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DPI: f32 = 96.0;

    #[test]
    fn test_fixed_conversions() {
        assert_eq!(convert(72.0, GraphicsUnit::Point, GraphicsUnit::Inch, DPI), 1.0);
        assert_eq!(convert(25.4, GraphicsUnit::Millimeter, GraphicsUnit::Inch, DPI), 1.0);
        assert_eq!(convert(1.0, GraphicsUnit::Inch, GraphicsUnit::Point, DPI), 72.0);
        assert_eq!(convert(75.0, GraphicsUnit::Display, GraphicsUnit::Inch, DPI), 1.0);
        assert_eq!(convert(1.0, GraphicsUnit::Inch, GraphicsUnit::Document, DPI), 300.0);
    }

    #[test]
    fn test_same_unit_is_identity() {
        assert_eq!(convert(12.0, GraphicsUnit::Point, GraphicsUnit::Point, DPI), 12.0);
        assert_eq!(convert(0.1, GraphicsUnit::Millimeter, GraphicsUnit::Millimeter, DPI), 0.1);
    }

    #[test]
    fn test_pixel_and_world_use_dpi() {
        assert_eq!(convert(96.0, GraphicsUnit::Pixel, GraphicsUnit::Inch, 96.0), 1.0);
        assert_eq!(convert(120.0, GraphicsUnit::World, GraphicsUnit::Inch, 120.0), 1.0);
        assert_eq!(convert(16.0, GraphicsUnit::Pixel, GraphicsUnit::Point, 96.0), 12.0);
        assert_eq!(
            convert(10.0, GraphicsUnit::Pixel, GraphicsUnit::Point, 72.0),
            convert(10.0, GraphicsUnit::World, GraphicsUnit::Point, 72.0)
        );
    }

    #[test]
    fn test_invalid_unit_codes() {
        assert_eq!(
            convert_codes(1.0, 7, GraphicsUnit::Point.code(), DPI),
            Err(FontError::InvalidUnit { code: 7 })
        );
        assert_eq!(
            convert_codes(1.0, GraphicsUnit::Point.code(), -1, DPI),
            Err(FontError::InvalidUnit { code: -1 })
        );
        assert_eq!(convert_codes(72.0, 3, 4, DPI), Ok(1.0));
    }

    #[test]
    fn test_unit_codes_round_trip() {
        for unit in GraphicsUnit::ALL {
            assert_eq!(GraphicsUnit::from_code(unit.code()), Ok(unit));
        }
    }

    fn device_independent() -> impl Strategy<Value = GraphicsUnit> {
        prop_oneof![
            Just(GraphicsUnit::Display),
            Just(GraphicsUnit::Point),
            Just(GraphicsUnit::Inch),
            Just(GraphicsUnit::Document),
            Just(GraphicsUnit::Millimeter),
        ]
    }

    fn any_unit() -> impl Strategy<Value = GraphicsUnit> {
        (0usize..GraphicsUnit::ALL.len()).prop_map(|i| GraphicsUnit::ALL[i])
    }

    proptest! {
        #[test]
        fn round_trip_between_fixed_units(
            value in 0.01f32..10_000.0,
            a in device_independent(),
            b in device_independent(),
        ) {
            let back = convert(convert(value, a, b, DPI), b, a, DPI);
            prop_assert!(((back - value) / value).abs() <= 1e-4);
        }

        #[test]
        fn round_trip_with_constant_dpi(
            value in 0.01f32..10_000.0,
            dpi in 48.0f32..300.0,
            a in any_unit(),
            b in any_unit(),
        ) {
            let back = convert(convert(value, a, b, dpi), b, a, dpi);
            prop_assert!(((back - value) / value).abs() <= 1e-4);
        }
    }
}
