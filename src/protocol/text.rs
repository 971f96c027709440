//! # ESC/P Text Styling Commands
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E / ESC F | Emphasized text |
//! | Italic | ESC 4 / ESC 5 | Slanted text |
//! | Double strike | ESC G / ESC H | Overprinted text |
//! | Double width | ESC W n | 2x horizontal size |
//! | Compressed | SI / DC2 | Condensed pitch |
//! | Underline | ESC - n | Underline style n |
//! | Frame | ESC i f n | Box around text |
//!
//! ## Fonts and Sizes
//!
//! Resident fonts come in two families, bitmap and outline (see
//! [`FontCategory`](super::options::FontCategory)). Each character size is only legal for one family;
//! the session layer watches for mismatches, the builders here do not.

use std::fmt;
use std::str::FromStr;

use super::commands::ESC;
use super::options::{CharSize, CharStyle, Font, Switch};
use super::validate;
use crate::error::{PrintError, Result};

/// SI (Shift In) - compressed characters on
pub const SI: u8 = 0x0F;

/// DC2 (Device Control 2) - compressed characters off
pub const DC2: u8 = 0x12;

// ============================================================================
// EMPHASIS
// ============================================================================

/// # Bold (ESC E / ESC F)
///
/// ## Example
///
/// ```
/// use brotherprint::protocol::{options::Switch, text};
///
/// let mut data = Vec::new();
/// data.extend(text::bold(Switch::On));
/// data.extend(b"IMPORTANT");
/// data.extend(text::bold(Switch::Off));
/// ```
#[inline]
pub fn bold(action: Switch) -> Vec<u8> {
    match action {
        Switch::On => vec![ESC, b'E'],
        Switch::Off => vec![ESC, b'F'],
    }
}

/// # Italic (ESC 4 / ESC 5)
#[inline]
pub fn italic(action: Switch) -> Vec<u8> {
    match action {
        Switch::On => vec![ESC, b'4'],
        Switch::Off => vec![ESC, b'5'],
    }
}

/// # Double Strike (ESC G / ESC H)
#[inline]
pub fn double_strike(action: Switch) -> Vec<u8> {
    match action {
        Switch::On => vec![ESC, b'G'],
        Switch::Off => vec![ESC, b'H'],
    }
}

/// # Double Width (ESC W n)
///
/// `n` is ASCII `'1'` or `'0'`.
#[inline]
pub fn double_width(action: Switch) -> Vec<u8> {
    match action {
        Switch::On => vec![ESC, b'W', b'1'],
        Switch::Off => vec![ESC, b'W', b'0'],
    }
}

/// # Compressed Characters (SI / DC2)
///
/// A bare control byte, no ESC prefix.
#[inline]
pub fn compressed_char(action: Switch) -> Vec<u8> {
    match action {
        Switch::On => vec![SI],
        Switch::Off => vec![DC2],
    }
}

/// # Frame (ESC i f n)
///
/// Draws a box around subsequent text.
#[inline]
pub fn frame(action: Switch) -> Vec<u8> {
    match action {
        Switch::On => vec![ESC, b'i', b'f', b'1'],
        Switch::Off => vec![ESC, b'i', b'f', b'0'],
    }
}

// ============================================================================
// UNDERLINE
// ============================================================================

/// Underline setting for [`underline`].
///
/// Style codes are kept as the digit string given and sent verbatim
/// (`"01"` stays `"01"`). The printer documents 1-4 but other values are
/// not rejected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Underline {
    Off,
    /// ASCII decimal digits, never empty
    Style(String),
}

impl Underline {
    pub fn style(code: u8) -> Self {
        Underline::Style(code.to_string())
    }
}

impl FromStr for Underline {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "off" {
            return Ok(Underline::Off);
        }
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PrintError::InvalidOption {
                operation: "underline",
                field: "action",
                value: s.to_string(),
            });
        }
        Ok(Underline::Style(s.to_string()))
    }
}

impl fmt::Display for Underline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Underline::Off => f.write_str("off"),
            Underline::Style(digits) => f.write_str(digits),
        }
    }
}

/// # Underline (ESC - n)
///
/// `n` is sent as ASCII text: `'0'` for off, the style's digits otherwise.
///
/// ```
/// use brotherprint::protocol::text::{underline, Underline};
///
/// assert_eq!(underline(&Underline::style(2)), vec![0x1B, b'-', b'2']);
/// assert_eq!(underline(&Underline::Off), vec![0x1B, b'-', b'0']);
/// ```
pub fn underline(setting: &Underline) -> Vec<u8> {
    let mut data = vec![ESC, b'-'];
    match setting {
        Underline::Off => data.push(b'0'),
        Underline::Style(digits) => data.extend_from_slice(digits.as_bytes()),
    }
    data
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// # Select Font (ESC k n)
///
/// | Font | n | Family |
/// |------|---|--------|
/// | brougham | 0 | bitmap |
/// | lettergothicbold | 1 | bitmap |
/// | brusselsbit | 2 | bitmap |
/// | helsinkibit | 3 | bitmap |
/// | sandiego | 4 | bitmap |
/// | lettergothic | 9 | outline |
/// | brusselsoutline | 10 | outline |
/// | helsinkioutline | 11 | outline |
#[inline]
pub fn select_font(font: Font) -> Vec<u8> {
    vec![ESC, b'k', font.code()]
}

/// # Character Size (ESC X 0 n m)
///
/// `n` is the size in dots, `m` is the size-series flag from
/// [`CharSize::trailer`].
///
/// ```
/// use brotherprint::protocol::{options::CharSize, text};
///
/// assert_eq!(text::char_size(CharSize::Dots24), vec![0x1B, b'X', 0, 24, 0]);
/// assert_eq!(text::char_size(CharSize::Dots11), vec![0x1B, b'X', 0, 11, 1]);
/// ```
#[inline]
pub fn char_size(size: CharSize) -> Vec<u8> {
    vec![ESC, b'X', 0x00, size.code(), size.trailer()]
}

/// # Character Style (ESC q n)
#[inline]
pub fn char_style(style: CharStyle) -> Vec<u8> {
    vec![ESC, b'q', style.code()]
}

// ============================================================================
// PITCH AND SPACING
// ============================================================================

/// Pica pitch, 10 characters per inch (ESC P)
#[inline]
pub fn pica_pitch() -> Vec<u8> {
    vec![ESC, b'P']
}

/// Elite pitch, 12 characters per inch (ESC M)
#[inline]
pub fn elite_pitch() -> Vec<u8> {
    vec![ESC, b'M']
}

/// Micron pitch, 15 characters per inch (ESC g)
#[inline]
pub fn micron_pitch() -> Vec<u8> {
    vec![ESC, b'g']
}

/// # Proportional Characters (ESC p n)
///
/// `n` is the raw value 1 (on) or 0 (off).
#[inline]
pub fn proportional_char(action: Switch) -> Vec<u8> {
    vec![ESC, b'p', action.code()]
}

/// # Character Spacing (ESC SP n)
///
/// Extra space between characters, 0..=126 dots.
pub fn char_spacing(dots: u32) -> Result<Vec<u8>> {
    let n = validate::byte("char_spacing", dots, 0, 126)?;
    Ok(vec![ESC, b' ', n])
}
