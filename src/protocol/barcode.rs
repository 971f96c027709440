//! # ESC/P Barcode Command
//!
//! One command (`ESC i t`) prints every supported 1D symbology. Its
//! parameters are single-letter markers, each followed by a value, in a
//! fixed order:
//!
//! ```text
//! ESC i t <type> s p r <chars> u x y h <nL> <nH> w <width> e <paren>
//!   o <rss> c <rss_chars> z <ratio> f <equalize> b <data> \
//! ```
//!
//! Code128 and GS1-128 are closed with `\\\` (three backslashes), every
//! other symbology with a single one.
//!
//! ## Usage
//!
//! ```
//! use brotherprint::protocol::barcode::{barcode, BarcodeOptions};
//! use brotherprint::protocol::options::{BarcodeFormat, Switch};
//!
//! let options = BarcodeOptions {
//!     format: BarcodeFormat::Code39,
//!     characters: Switch::On,
//!     height: 96,
//!     ..Default::default()
//! };
//! let data = barcode(b"HELLO123", &options).unwrap();
//! assert_eq!(data.last(), Some(&b'\\'));
//! ```

use super::commands::ESC;
use super::encode::split_le16;
use super::options::{BarcodeFormat, BarcodeRatio, BarcodeWidth, RssSymbol, Switch};
use super::validate;
use crate::error::{PrintError, Result};

/// Closes the data field (`\`).
pub const TERMINATOR: u8 = b'\\';

/// Barcode settings. Defaults match the printer's power-on values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodeOptions {
    pub format: BarcodeFormat,
    /// Print human-readable characters under the bars
    pub characters: Switch,
    /// Bar height in dots
    pub height: u32,
    pub width: BarcodeWidth,
    /// Delete parentheses from the human-readable line (GS1-128 only)
    pub parentheses: Switch,
    pub ratio: BarcodeRatio,
    /// Equalize bar lengths
    pub equalize: Switch,
    pub rss_symbol: RssSymbol,
    /// Characters per row for stacked RSS Expanded: even, 2..=20
    pub rss_horizontal_chars: u32,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            format: BarcodeFormat::Code39,
            characters: Switch::Off,
            height: 48,
            width: BarcodeWidth::Small,
            parentheses: Switch::On,
            ratio: BarcodeRatio::ThreeToOne,
            equalize: Switch::Off,
            rss_symbol: RssSymbol::Rss14Standard,
            rss_horizontal_chars: 2,
        }
    }
}

impl BarcodeOptions {
    pub fn new(format: BarcodeFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }
}

/// Validated numeric fields, ready to encode.
struct Checked {
    height: [u8; 2],
    rss_horizontal_chars: u8,
}

fn check(data: &[u8], options: &BarcodeOptions) -> Result<Checked> {
    let height = validate::word("barcode.height", options.height, 0, u16::MAX)?;
    let rss_horizontal_chars =
        validate::byte("barcode.rss_horizontal_chars", options.rss_horizontal_chars, 2, 20)?;
    if rss_horizontal_chars % 2 != 0 {
        return Err(PrintError::InvalidOption {
            operation: "barcode",
            field: "rss_horizontal_chars",
            value: rss_horizontal_chars.to_string(),
        });
    }
    if data.contains(&TERMINATOR) {
        return Err(PrintError::InvalidOption {
            operation: "barcode",
            field: "data",
            value: String::from_utf8_lossy(data).into_owned(),
        });
    }
    Ok(Checked {
        height: split_le16(height),
        rss_horizontal_chars,
    })
}

/// # Print Barcode (ESC i t ... b data \)
///
/// Every field is checked before anything is built.
///
/// ## Errors
///
/// - `OutOfRange` for a height above 65535 or an RSS character count
///   outside 2..=20
/// - `InvalidOption` for an odd RSS character count, or data containing the
///   `\` terminator
pub fn barcode(data: &[u8], options: &BarcodeOptions) -> Result<Vec<u8>> {
    let checked = check(data, options)?;
    let [height_low, height_high] = checked.height;

    // Parentheses deletion is inverted: 'on' sends '0'.
    let parentheses = match options.parentheses {
        Switch::On => b'0',
        Switch::Off => b'1',
    };

    let mut cmd = Vec::with_capacity(32 + data.len());
    cmd.extend([ESC, b'i', b't', options.format.code()]);
    cmd.extend(b"spr");
    cmd.push(b'0' + options.characters.code());
    cmd.extend(b"uxy");
    cmd.extend([b'h', height_low, height_high]);
    cmd.extend([b'w', options.width.code()]);
    cmd.extend([b'e', parentheses]);
    cmd.extend([b'o', options.rss_symbol.code()]);
    cmd.extend([b'c', checked.rss_horizontal_chars]);
    cmd.extend([b'z', options.ratio.code()]);
    cmd.extend([b'f', b'0' + options.equalize.code()]);
    cmd.push(b'b');
    cmd.extend_from_slice(data);
    cmd.push(TERMINATOR);
    cmd.extend(std::iter::repeat_n(TERMINATOR, options.format.extra_terminators()));
    Ok(cmd)
}
