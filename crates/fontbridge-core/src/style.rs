//! Font style bitmask

use std::fmt;

use bitflags::bitflags;

use crate::error::{FontError, FontResult};

bitflags! {
    /// Style bits requested at construction. `Regular` is the empty set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FontStyle: i32 {
        const BOLD =      0b0000_0001;
        const ITALIC =    0b0000_0010;
        const UNDERLINE = 0b0000_0100;
        const STRIKEOUT = 0b0000_1000;
    }
}

impl FontStyle {
    pub const REGULAR: FontStyle = FontStyle::empty();

    /// Validating conversion from the serialized integer form.
    pub fn from_code(bits: i32) -> FontResult<Self> {
        FontStyle::from_bits(bits).ok_or(FontError::InvalidStyle { bits })
    }

    pub fn code(self) -> i32 {
        self.bits()
    }
}

impl fmt::Display for FontStyle {
    /// Formats as `Regular` or a comma separated list such as `Bold, Italic`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Regular");
        }
        let names = [
            (FontStyle::BOLD, "Bold"),
            (FontStyle::ITALIC, "Italic"),
            (FontStyle::UNDERLINE, "Underline"),
            (FontStyle::STRIKEOUT, "Strikeout"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// The four independent style booleans a descriptor exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleFlags {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
}

impl From<FontStyle> for StyleFlags {
    fn from(style: FontStyle) -> Self {
        StyleFlags {
            bold: style.contains(FontStyle::BOLD),
            italic: style.contains(FontStyle::ITALIC),
            underline: style.contains(FontStyle::UNDERLINE),
            strikeout: style.contains(FontStyle::STRIKEOUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_bold_italic() {
        let flags = StyleFlags::from(FontStyle::BOLD | FontStyle::ITALIC);
        assert_eq!(
            flags,
            StyleFlags { bold: true, italic: true, underline: false, strikeout: false }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(FontStyle::REGULAR.to_string(), "Regular");
        assert_eq!((FontStyle::BOLD | FontStyle::ITALIC).to_string(), "Bold, Italic");
        assert_eq!(FontStyle::all().to_string(), "Bold, Italic, Underline, Strikeout");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(FontStyle::from_code(0), Ok(FontStyle::REGULAR));
        assert_eq!(FontStyle::from_code(5), Ok(FontStyle::BOLD | FontStyle::UNDERLINE));
        assert_eq!(FontStyle::from_code(16), Err(FontError::InvalidStyle { bits: 16 }));
    }
}
