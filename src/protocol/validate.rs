//! Range, length, and count checks shared by the command builders.
//!
//! Numeric inputs arrive as `u32` and are narrowed to the field width the
//! protocol uses. A value that does not fit is rejected, never truncated.

use crate::error::{PrintError, Result};

/// Check `value` against `min..=max` and narrow it to a single byte field.
pub fn byte(parameter: &'static str, value: u32, min: u8, max: u8) -> Result<u8> {
    in_range(parameter, value, min as u32, max as u32).map(|v| v as u8)
}

/// Check `value` against `min..=max` and narrow it to a 16-bit field.
pub fn word(parameter: &'static str, value: u32, min: u16, max: u16) -> Result<u16> {
    in_range(parameter, value, min as u32, max as u32).map(|v| v as u16)
}

/// Check `value` against `min..=max`.
pub fn in_range(parameter: &'static str, value: u32, min: u32, max: u32) -> Result<u32> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(PrintError::OutOfRange {
            parameter,
            value: value as i64,
            min: min as i64,
            max: max as i64,
        })
    }
}

/// Reject byte strings longer than `max`.
pub fn max_len(field: &'static str, data: &[u8], max: usize) -> Result<usize> {
    if data.len() > max {
        return Err(PrintError::TooLong {
            field,
            len: data.len(),
            max,
        });
    }
    Ok(data.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_bounds_inclusive() {
        assert_eq!(byte("margin", 0, 0, 255).unwrap(), 0);
        assert_eq!(byte("margin", 255, 0, 255).unwrap(), 255);
        assert_eq!(byte("margin", 1, 1, 255).unwrap(), 1);
    }

    #[test]
    fn test_byte_rejects_wide_values() {
        let err = byte("margin", 256, 0, 255).unwrap_err();
        match err {
            PrintError::OutOfRange {
                parameter,
                value,
                min,
                max,
            } => {
                assert_eq!(parameter, "margin");
                assert_eq!(value, 256);
                assert_eq!((min, max), (0, 255));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_word() {
        assert_eq!(word("length", 11999, 0, 11999).unwrap(), 11999);
        assert!(word("length", 12000, 0, 11999).is_err());
        assert!(word("height", 70000, 0, u16::MAX).is_err());
    }

    #[test]
    fn test_max_len() {
        assert_eq!(max_len("command", b"abc", 20).unwrap(), 3);
        assert_eq!(max_len("command", &[b'x'; 20], 20).unwrap(), 20);
        assert!(matches!(
            max_len("command", &[b'x'; 21], 20),
            Err(PrintError::TooLong { len: 21, max: 20, .. })
        ));
    }
}
