//! # Numeric Field Encodings
//!
//! Pure conversions from already-validated integers into the byte forms the
//! two dialects expect. Range checking happens in [`super::validate`]; these
//! functions never fail.
//!
//! | Encoding | Used by | Bytes |
//! |----------|---------|-------|
//! | little-endian pair | page length, positions, barcode height, `^DI` | `[v % 256, v / 256]` |
//! | two decimal digits | `^TS`, `^PS`, `^SS` | `[v / 10, v % 10]` |
//! | three decimal digits | `^PC` | `[v / 100, v / 10 % 10, v % 10]` |
//!
//! Decimal digits are emitted as raw byte values (0-9), not as ASCII.

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ## Example
///
/// ```
/// use brotherprint::protocol::encode::split_le16;
///
/// assert_eq!(split_le16(11999), [0xDF, 0x2E]);
/// assert_eq!(split_le16(256), [0x00, 0x01]);
/// ```
#[inline]
pub const fn split_le16(value: u16) -> [u8; 2] {
    [(value % 256) as u8, (value / 256) as u8]
}

/// Split a value in 0..=99 into `[tens, ones]`.
///
/// Values above 99 keep only the last two digits; callers validate first.
#[inline]
pub const fn digits2(value: u8) -> [u8; 2] {
    [(value / 10) % 10, value % 10]
}

/// Split a value in 0..=999 into `[hundreds, tens, ones]`.
#[inline]
pub const fn digits3(value: u16) -> [u8; 3] {
    [
        ((value / 100) % 10) as u8,
        ((value / 10) % 10) as u8,
        (value % 10) as u8,
    ]
}
