//! Fixed-layout logical-font record
//!
//! [`LogFont`] mirrors the windowing system's wide-character `LOGFONT`
//! structure. Its byte form is 92 bytes, little-endian, fields in
//! declaration order:
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 4 | height |
//! | 4 | 4 | width |
//! | 8 | 4 | escapement |
//! | 12 | 4 | orientation |
//! | 16 | 4 | weight |
//! | 20 | 1 | italic |
//! | 21 | 1 | underline |
//! | 22 | 1 | strike_out |
//! | 23 | 1 | char_set |
//! | 24 | 1 | out_precision |
//! | 25 | 1 | clip_precision |
//! | 26 | 1 | quality |
//! | 27 | 1 | pitch_and_family |
//! | 28 | 64 | face_name (32 UTF-16 units, NUL padded) |

use crate::constants::{CHARSET_OFFSET, FW_BOLD, FW_NORMAL, LF_FACESIZE, LOG_FONT_SIZE_BYTES};
use crate::style::FontStyle;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFont {
    /// Negative: character height. Positive: cell height. Both in device units.
    pub height: i32,
    pub width: i32,
    pub escapement: i32,
    pub orientation: i32,
    pub weight: i32,
    pub italic: u8,
    pub underline: u8,
    pub strike_out: u8,
    pub char_set: u8,
    pub out_precision: u8,
    pub clip_precision: u8,
    pub quality: u8,
    pub pitch_and_family: u8,
    pub face_name: [u16; LF_FACESIZE],
}

impl Default for LogFont {
    fn default() -> Self {
        LogFont {
            height: 0,
            width: 0,
            escapement: 0,
            orientation: 0,
            weight: 0,
            italic: 0,
            underline: 0,
            strike_out: 0,
            char_set: 0,
            out_precision: 0,
            clip_precision: 0,
            quality: 0,
            pitch_and_family: 0,
            face_name: [0; LF_FACESIZE],
        }
    }
}

impl LogFont {
    pub const SIZE: usize = LOG_FONT_SIZE_BYTES;

    /// Record describing `face` with the given style at `height`.
    pub fn describe(face: &str, height: i32, style: FontStyle) -> Self {
        let mut lf = LogFont {
            height,
            weight: if style.contains(FontStyle::BOLD) { FW_BOLD } else { FW_NORMAL },
            italic: style.contains(FontStyle::ITALIC) as u8,
            underline: style.contains(FontStyle::UNDERLINE) as u8,
            strike_out: style.contains(FontStyle::STRIKEOUT) as u8,
            ..LogFont::default()
        };
        lf.set_face_name(face);
        lf
    }

    pub fn face_name(&self) -> String {
        let len = self.face_name.iter().position(|&unit| unit == 0).unwrap_or(LF_FACESIZE);
        String::from_utf16_lossy(&self.face_name[..len])
    }

    /// Store `name`, truncated so the terminating NUL always fits.
    pub fn set_face_name(&mut self, name: &str) {
        self.face_name = [0; LF_FACESIZE];
        for (slot, unit) in self.face_name.iter_mut().zip(name.encode_utf16().take(LF_FACESIZE - 1)) {
            *slot = unit;
        }
    }

    /// Style bits encoded in the record. Weights above normal count as bold.
    pub fn style(&self) -> FontStyle {
        let mut style = FontStyle::REGULAR;
        if self.italic != 0 {
            style |= FontStyle::ITALIC;
        }
        if self.underline != 0 {
            style |= FontStyle::UNDERLINE;
        }
        if self.strike_out != 0 {
            style |= FontStyle::STRIKEOUT;
        }
        if self.weight > FW_NORMAL {
            style |= FontStyle::BOLD;
        }
        style
    }

    /// Height magnitude, whichever sign convention the record uses.
    pub fn size(&self) -> f32 {
        self.height.unsigned_abs() as f32
    }

    pub fn to_bytes(&self) -> [u8; LOG_FONT_SIZE_BYTES] {
        let mut out = [0u8; LOG_FONT_SIZE_BYTES];
        let ints = [self.height, self.width, self.escapement, self.orientation, self.weight];
        for (i, value) in ints.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(&value.to_le_bytes());
        }
        out[20] = self.italic;
        out[21] = self.underline;
        out[22] = self.strike_out;
        out[CHARSET_OFFSET] = self.char_set;
        out[24] = self.out_precision;
        out[25] = self.clip_precision;
        out[26] = self.quality;
        out[27] = self.pitch_and_family;
        for (i, unit) in self.face_name.iter().enumerate() {
            out[28 + i * 2..30 + i * 2].copy_from_slice(&unit.to_le_bytes());
        }
        out
    }

    /// Decode the first 92 bytes of `bytes`; `None` when there are fewer.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < LOG_FONT_SIZE_BYTES {
            return None;
        }
        let int_at = |offset: usize| {
            i32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
        };
        let mut face_name = [0u16; LF_FACESIZE];
        for (i, unit) in face_name.iter_mut().enumerate() {
            *unit = u16::from_le_bytes([bytes[28 + i * 2], bytes[29 + i * 2]]);
        }
        Some(LogFont {
            height: int_at(0),
            width: int_at(4),
            escapement: int_at(8),
            orientation: int_at(12),
            weight: int_at(16),
            italic: bytes[20],
            underline: bytes[21],
            strike_out: bytes[22],
            char_set: bytes[CHARSET_OFFSET],
            out_precision: bytes[24],
            clip_precision: bytes[25],
            quality: bytes[26],
            pitch_and_family: bytes[27],
            face_name,
        })
    }
}

/// How a caller-supplied record is laid out in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// Fields in declaration order with no indirection.
    Sequential,
    /// Layout chosen by the compiler or behind a pointer; can't be marshaled.
    Auto,
}

/// Destination for [`crate::Font::to_log_font`].
///
/// A record exposes its contents in the byte form described at the top of
/// this module. Records longer than [`LogFont::SIZE`] keep their trailing
/// bytes; shorter ones are left alone.
pub trait LogFontRecord {
    fn layout(&self) -> RecordLayout {
        RecordLayout::Sequential
    }

    fn read_record(&self) -> Vec<u8>;

    fn write_record(&mut self, bytes: &[u8]);
}

impl LogFontRecord for LogFont {
    fn read_record(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn write_record(&mut self, bytes: &[u8]) {
        if let Some(lf) = LogFont::from_bytes(bytes) {
            *self = lf;
        }
    }
}

/// Raw record buffer, e.g. memory shared with a foreign caller.
impl LogFontRecord for Vec<u8> {
    fn read_record(&self) -> Vec<u8> {
        self.clone()
    }

    fn write_record(&mut self, bytes: &[u8]) {
        let len = self.len().min(bytes.len());
        self[..len].copy_from_slice(&bytes[..len]);
    }
}
