//! Native engine status codes

use std::fmt;

use crate::error::FontError;

/// Status code returned by every native engine call.
///
/// The numeric values match the engine's flat API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok = 0,
    GenericError = 1,
    InvalidParameter = 2,
    OutOfMemory = 3,
    ObjectBusy = 4,
    InsufficientBuffer = 5,
    NotImplemented = 6,
    Win32Error = 7,
    WrongState = 8,
    Aborted = 9,
    FileNotFound = 10,
    ValueOverflow = 11,
    AccessDenied = 12,
    UnknownImageFormat = 13,
    FontFamilyNotFound = 14,
    FontStyleNotFound = 15,
    NotTrueTypeFont = 16,
    UnsupportedVersion = 17,
    NotInitialized = 18,
    PropertyNotFound = 19,
    PropertyNotSupported = 20,
    ProfileNotFound = 21,
}

impl Status {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

impl From<Status> for FontError {
    fn from(status: Status) -> Self {
        FontError::NativeFailure(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_display() {
        assert_eq!(Status::Ok.code(), 0);
        assert_eq!(Status::FontStyleNotFound.code(), 15);
        assert_eq!(Status::ProfileNotFound.code(), 21);
        assert_eq!(Status::InvalidParameter.to_string(), "InvalidParameter (2)");
    }

    #[test]
    fn test_into_font_error_keeps_code() {
        let err: FontError = Status::WrongState.into();
        assert_eq!(err, FontError::NativeFailure(Status::WrongState));
    }
}
