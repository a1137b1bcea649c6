//! Line code type.

use std::fmt;

const MAX_LEN: usize = 4;

/// Error returned when parsing an invalid line code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line code: {reason}")]
pub struct InvalidLineCode {
    reason: &'static str,
}

/// A short alphabetic line code such as `EW` or `CC`.
///
/// Line codes are 1 to 4 uppercase ASCII letters. This type guarantees
/// that any `LineCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use mrt_server::domain::LineCode;
///
/// let ew = LineCode::parse("EW").unwrap();
/// assert_eq!(ew.as_str(), "EW");
///
/// // Lowercase is rejected
/// assert!(LineCode::parse("ew").is_err());
///
/// // Empty and over-long codes are rejected
/// assert!(LineCode::parse("").is_err());
/// assert!(LineCode::parse("ABCDE").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineCode {
    bytes: [u8; MAX_LEN],
    len: u8,
}

impl LineCode {
    /// Parse a line code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidLineCode> {
        let input = s.as_bytes();

        if input.is_empty() || input.len() > MAX_LEN {
            return Err(InvalidLineCode {
                reason: "must be 1 to 4 characters",
            });
        }

        if !input.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidLineCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        let mut bytes = [0; MAX_LEN];
        bytes[..input.len()].copy_from_slice(input);
        Ok(LineCode {
            bytes,
            len: input.len() as u8,
        })
    }

    /// Parse a line code, normalizing to uppercase first.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidLineCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the line code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }
}

impl fmt::Debug for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineCode({})", self.as_str())
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
