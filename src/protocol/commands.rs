//! # ESC/P Commands
//!
//! Builders for the printer's escape-code dialect: mode switching, system
//! settings, page geometry, tab stops, and print-position control.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `CR`, `LF`, `FF`, `HT`, `VT`
//! - Two bytes: `ESC @`, `ESC P`, `ESC M`
//! - With parameters: `ESC J n`, `ESC $ nL nH`, `ESC ( C 2 0 mL mH`
//!
//! Builders that take a parameter with a documented range return
//! [`Result`]; fixed sequences return the bytes directly.
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding (see
//! [`split_le16`]).
//!
//! ## Reference
//!
//! Brother "ESC/P Command Reference" for the QL-700/QL-800 series.

use std::fmt;
use std::str::FromStr;

use super::encode::split_le16;
use super::options::{Alignment, CharCodeTable, Charset, CutMode, Rotation};
use super::validate;
use crate::error::{PrintError, Result};

// ============================================================================
// CONTROL BYTES
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// HT (Horizontal Tab) - Advance to next horizontal tab stop
pub const HT: u8 = 0x09;

/// LF (Line Feed)
///
/// Advances one line. A CR that follows is ignored by the printer.
pub const LF: u8 = 0x0A;

/// VT (Vertical Tab) - Advance to next vertical tab stop
pub const VT: u8 = 0x0B;

/// FF (Form Feed) - Print and eject the page
pub const FF: u8 = 0x0C;

/// CR (Carriage Return)
///
/// Returns to the start of the next line. A LF that follows is ignored.
pub const CR: u8 = 0x0D;

/// Longest page accepted by `ESC ( C`, in dots (exclusive).
pub const MAX_PAGE_LENGTH: u16 = 12000;

/// Most stops accepted by `ESC D` (the list must stay below 32 entries).
pub const MAX_HORIZONTAL_TABS: usize = 31;

/// Most stops accepted by `ESC B`.
pub const MAX_VERTICAL_TABS: usize = 16;

// ============================================================================
// MODE SELECTION
// ============================================================================

/// # Switch to Raster Mode (ESC i a 1)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC i a SOH |
/// | Hex     | 1B 69 61 01 |
///
/// The mode byte is the raw value 1, unlike the other two mode switches
/// which send an ASCII digit.
#[inline]
pub fn raster_mode() -> Vec<u8> {
    vec![ESC, b'i', b'a', 0x01]
}

/// # Switch to P-touch Template Mode (ESC i a 3)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC i a 3 |
/// | Hex     | 1B 69 61 33 |
#[inline]
pub fn template_mode() -> Vec<u8> {
    vec![ESC, b'i', b'a', b'3']
}

/// # Switch to ESC/P Mode (ESC i a 0)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC i a 0 |
/// | Hex     | 1B 69 61 30 |
#[inline]
pub fn command_mode() -> Vec<u8> {
    vec![ESC, b'i', b'a', b'0']
}

// ============================================================================
// SYSTEM SETTINGS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// Clears the print buffer and restores power-on formatting: bitmap font,
/// default size, margins, tab stops and alignment.
///
/// ## Example
///
/// ```
/// use brotherprint::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Select International Character Set (ESC R n)
///
/// Replaces a handful of code points in the active code table with
/// national characters.
#[inline]
pub fn select_charset(charset: Charset) -> Vec<u8> {
    vec![ESC, b'R', charset.code()]
}

/// # Select Character Code Table (ESC t n)
#[inline]
pub fn select_char_code_table(table: CharCodeTable) -> Vec<u8> {
    vec![ESC, b't', table.code()]
}

/// # Cut Setting (ESC i C n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC i C n |
/// | Hex     | 1B 69 43 n |
///
/// ## Parameters
///
/// `n` is a bit flag, one bit per mode:
///
/// | Mode | n |
/// |------|---|
/// | full | 0x01 |
/// | half | 0x02 |
/// | chain | 0x04 |
/// | special | 0x08 |
///
/// The setting applies to the next page feed; it does not cut by itself.
#[inline]
pub fn cut_setting(cut: CutMode) -> Vec<u8> {
    vec![ESC, b'i', b'C', cut.code()]
}

/// Cut setting followed by a page feed: finishes the page and cuts it.
///
/// ```
/// use brotherprint::protocol::{commands, options::CutMode};
///
/// assert_eq!(commands::print_page(CutMode::Half), vec![0x1B, b'i', b'C', 0x02, 0x0C]);
/// ```
pub fn print_page(cut: CutMode) -> Vec<u8> {
    let mut data = cut_setting(cut);
    data.extend(page_feed());
    data
}

// ============================================================================
// FORMAT
// ============================================================================

/// # Rotated Printing (ESC i L n)
///
/// `n` is ASCII `'1'` to rotate, `'0'` to cancel.
#[inline]
pub fn rotated_printing(rotation: Rotation) -> Vec<u8> {
    vec![ESC, b'i', b'L', rotation.code()]
}

/// # Select Alignment (ESC a n)
///
/// | Alignment | n |
/// |-----------|---|
/// | left | `'0'` |
/// | center | `'1'` |
/// | right | `'2'` |
/// | justified | `'3'` |
#[inline]
pub fn alignment(align: Alignment) -> Vec<u8> {
    vec![ESC, b'a', align.code()]
}

/// Line feed amount for [`feed_amount`].
///
/// Parses from the strings `"1/8"`, `"1/6"`, `"<n>/180"` and `"<n>/60"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedAmount {
    /// 1/8 inch (ESC 0)
    OneEighth,
    /// 1/6 inch (ESC 2)
    OneSixth,
    /// n/180 inch (ESC 3 n)
    Per180(u8),
    /// n/60 inch (ESC A n)
    Per60(u8),
}

impl FeedAmount {
    /// Build a feed amount from a numerator and a `180` or `60` denominator.
    pub fn fraction(n: u32, denominator: u32) -> Result<Self> {
        match denominator {
            180 => Ok(FeedAmount::Per180(validate::byte("feed_amount.n", n, 0, 255)?)),
            60 => Ok(FeedAmount::Per60(validate::byte("feed_amount.n", n, 0, 255)?)),
            _ => Err(PrintError::InvalidOption {
                operation: "feed_amount",
                field: "amount",
                value: format!("{n}/{denominator}"),
            }),
        }
    }
}

impl FromStr for FeedAmount {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PrintError::InvalidOption {
            operation: "feed_amount",
            field: "amount",
            value: s.to_string(),
        };
        match s {
            "1/8" => return Ok(FeedAmount::OneEighth),
            "1/6" => return Ok(FeedAmount::OneSixth),
            _ => {}
        }
        let (numerator, denominator) = s.split_once('/').ok_or_else(invalid)?;
        if numerator.is_empty() || !numerator.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let denominator: u32 = denominator.parse().map_err(|_| invalid())?;
        if denominator != 180 && denominator != 60 {
            return Err(invalid());
        }
        // Anything that overflows u32 is certainly above 255.
        let n = numerator.parse::<u32>().unwrap_or(u32::MAX);
        Self::fraction(n, denominator)
    }
}

impl fmt::Display for FeedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedAmount::OneEighth => f.write_str("1/8"),
            FeedAmount::OneSixth => f.write_str("1/6"),
            FeedAmount::Per180(n) => write!(f, "{n}/180"),
            FeedAmount::Per60(n) => write!(f, "{n}/60"),
        }
    }
}

/// # Set Line Feed Amount
///
/// | Amount | Bytes |
/// |--------|-------|
/// | 1/8 inch | ESC 0 |
/// | 1/6 inch | ESC 2 |
/// | n/180 inch | ESC 3 n |
/// | n/60 inch | ESC A n |
///
/// ## Example
///
/// ```
/// use brotherprint::protocol::commands::{feed_amount, FeedAmount};
///
/// let amount: FeedAmount = "24/180".parse().unwrap();
/// assert_eq!(feed_amount(amount), vec![0x1B, b'3', 24]);
/// ```
pub fn feed_amount(amount: FeedAmount) -> Vec<u8> {
    match amount {
        FeedAmount::OneEighth => vec![ESC, b'0'],
        FeedAmount::OneSixth => vec![ESC, b'2'],
        FeedAmount::Per180(n) => vec![ESC, b'3', n],
        FeedAmount::Per60(n) => vec![ESC, b'A', n],
    }
}

// ============================================================================
// PAGE GEOMETRY
// ============================================================================

/// # Page Length (ESC ( C 2 0 mL mH)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC ( C STX NUL mL mH |
/// | Hex     | 1B 28 43 02 00 mL mH |
///
/// Only meaningful for continuous-length tape.
///
/// ## Errors
///
/// `OutOfRange` unless `dots < 12000`.
pub fn page_length(dots: u32) -> Result<Vec<u8>> {
    let length = validate::word("page_length", dots, 0, MAX_PAGE_LENGTH - 1)?;
    let [low, high] = split_le16(length);
    Ok(vec![ESC, b'(', b'C', 0x02, 0x00, low, high])
}

/// # Page Format (ESC ( c 4 0 tL tH bL bH)
///
/// Sets the top and bottom margins in dots, measured from the top of the
/// page.
///
/// ## Errors
///
/// - `OutOfRange` for values that do not fit in 16 bits
/// - `InvalidMargins` unless top < bottom, compared on the encoded values
pub fn page_format(top: u32, bottom: u32) -> Result<Vec<u8>> {
    let [t_low, t_high] = split_le16(validate::word("page_format.top", top, 0, u16::MAX)?);
    let [b_low, b_high] = split_le16(validate::word("page_format.bottom", bottom, 0, u16::MAX)?);

    let encoded_top = t_low as u32 + t_high as u32 * 256;
    let encoded_bottom = b_low as u32 + b_high as u32 * 256;
    if encoded_top >= encoded_bottom {
        return Err(PrintError::InvalidMargins { top, bottom });
    }

    Ok(vec![
        ESC, b'(', b'c', 0x04, 0x00, t_low, t_high, b_low, b_high,
    ])
}

/// # Left Margin (ESC l n)
///
/// `n` in characters, 0..=255.
pub fn left_margin(margin: u32) -> Result<Vec<u8>> {
    let n = validate::byte("left_margin", margin, 0, 255)?;
    Ok(vec![ESC, b'l', n])
}

/// # Right Margin (ESC Q n)
///
/// `n` in characters, 1..=255. Zero is not a legal right margin.
pub fn right_margin(margin: u32) -> Result<Vec<u8>> {
    let n = validate::byte("right_margin", margin, 1, 255)?;
    Ok(vec![ESC, b'Q', n])
}

// ============================================================================
// TAB STOPS
// ============================================================================

/// Tab stop list for [`horizontal_tabs`] and [`vertical_tabs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabStops {
    /// Remove every stop
    Clear,
    /// Stops at the given positions (1..=255), in order
    At(Vec<u32>),
}

impl From<Vec<u32>> for TabStops {
    fn from(positions: Vec<u32>) -> Self {
        TabStops::At(positions)
    }
}

fn tab_command(
    operation: &'static str,
    prefix: u8,
    stops: &TabStops,
    max: usize,
) -> Result<Vec<u8>> {
    let positions = match stops {
        TabStops::Clear => return Ok(vec![ESC, prefix, 0x00]),
        TabStops::At(positions) => positions,
    };

    if let Some(bad) = positions.iter().find(|&&p| !(1..=255).contains(&p)) {
        return Err(PrintError::InvalidOption {
            operation,
            field: "position",
            value: bad.to_string(),
        });
    }
    if positions.len() > max {
        return Err(PrintError::TooManyPositions {
            operation,
            count: positions.len(),
            max,
        });
    }

    let mut data = Vec::with_capacity(positions.len() + 3);
    data.extend([ESC, prefix]);
    data.extend(positions.iter().map(|&p| p as u8));
    data.push(0x00);
    Ok(data)
}

/// # Horizontal Tab Positions (ESC D n1 ... nk NUL)
///
/// Up to 31 stops, each 1..=255. [`TabStops::Clear`] sends `ESC D NUL`.
///
/// ## Example
///
/// ```
/// use brotherprint::protocol::commands::{horizontal_tabs, TabStops};
///
/// let data = horizontal_tabs(&TabStops::At(vec![8, 16, 24])).unwrap();
/// assert_eq!(data, vec![0x1B, b'D', 8, 16, 24, 0]);
/// ```
pub fn horizontal_tabs(stops: &TabStops) -> Result<Vec<u8>> {
    tab_command("horizontal_tabs", b'D', stops, MAX_HORIZONTAL_TABS)
}

/// # Vertical Tab Positions (ESC B n1 ... nk NUL)
///
/// Up to 16 stops, each 1..=255.
pub fn vertical_tabs(stops: &TabStops) -> Result<Vec<u8>> {
    tab_command("vertical_tabs", b'B', stops, MAX_VERTICAL_TABS)
}

// ============================================================================
// PRINT POSITION
// ============================================================================

/// # Forward Feed (ESC J n)
///
/// Finishes the current line and moves the print position down `n`/300 inch.
pub fn forward_feed(amount: u32) -> Result<Vec<u8>> {
    let n = validate::byte("forward_feed", amount, 0, 255)?;
    Ok(vec![ESC, b'J', n])
}

/// # Absolute Vertical Position (ESC ( V 2 0 mL mH)
///
/// Distance from the top margin, 0..=32767.
pub fn abs_vert_pos(position: u32) -> Result<Vec<u8>> {
    let value = validate::word("abs_vert_pos", position, 0, 32767)?;
    let [low, high] = split_le16(value);
    Ok(vec![ESC, b'(', b'V', 0x02, 0x00, low, high])
}

/// # Absolute Horizontal Position (ESC $ n1 n2)
///
/// Distance from the left margin in 1/60 inch, 0..=2362.
pub fn abs_horz_pos(position: u32) -> Result<Vec<u8>> {
    let value = validate::word("abs_horz_pos", position, 0, 2362)?;
    let [low, high] = split_le16(value);
    Ok(vec![ESC, b'$', low, high])
}

/// # Relative Horizontal Position (ESC \ n1 n2)
///
/// Moves right by `n`/180 inch, 0..=7086. Left alignment only.
pub fn rel_horz_pos(offset: u32) -> Result<Vec<u8>> {
    let value = validate::word("rel_horz_pos", offset, 0, 7086)?;
    let [low, high] = split_le16(value);
    Ok(vec![ESC, b'\\', low, high])
}

// ============================================================================
// LINE / PAGE CONTROL
// ============================================================================

#[inline]
pub fn carriage_return() -> Vec<u8> {
    vec![CR]
}

#[inline]
pub fn line_feed() -> Vec<u8> {
    vec![LF]
}

#[inline]
pub fn page_feed() -> Vec<u8> {
    vec![FF]
}

#[inline]
pub fn horz_tab() -> Vec<u8> {
    vec![HT]
}

#[inline]
pub fn vert_tab() -> Vec<u8> {
    vec![VT]
}

// ============================================================================
// TESTS
// ============================================================================
