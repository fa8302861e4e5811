//! Serializable font description

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Font;
use crate::context::FontContext;
use crate::error::FontResult;
use crate::style::FontStyle;
use crate::unit::GraphicsUnit;

/// Name, size, style and unit of a font, as persisted by designers and
/// settings files. Style and unit are stored as their integer codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Size")]
    pub size: f32,
    #[serde(rename = "Style", with = "style_code")]
    pub style: FontStyle,
    #[serde(rename = "Unit")]
    pub unit: GraphicsUnit,
}

mod style_code {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::style::FontStyle;

    pub fn serialize<S: Serializer>(style: &FontStyle, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(style.code())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FontStyle, D::Error> {
        let bits = i32::deserialize(deserializer)?;
        FontStyle::from_code(bits).map_err(D::Error::custom)
    }
}

impl Font {
    pub fn to_record(&self) -> FontRecord {
        FontRecord {
            name: self.name().to_string(),
            size: self.size,
            style: self.style,
            unit: self.unit,
        }
    }

    /// Build a font from a persisted record through the regular
    /// construction path.
    pub fn from_record(ctx: &Arc<FontContext>, record: &FontRecord) -> FontResult<Font> {
        Font::builder(&record.name, record.size)
            .style(record.style)
            .unit(record.unit)
            .build(ctx)
    }
}
