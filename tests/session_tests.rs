//! # Session Tests
//!
//! Byte-exact checks of the session front end: validation boundaries,
//! the font family advisory, barcode terminators and the guarantee that a
//! rejected command never reaches the transport.

use pretty_assertions::assert_eq;

use brotherprint::protocol::barcode::BarcodeOptions;
use brotherprint::protocol::commands::TabStops;
use brotherprint::protocol::options::{
    Alignment, BarcodeFormat, CharSize, Charset, CutMode, Font, FontCategory, Switch,
};
use brotherprint::{Advisory, PrintError, PrinterMode, PrinterSession, SessionConfig};

const ESC: u8 = 0x1B;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Run `f` on a fresh in-memory session and return what it sent.
fn capture<F>(f: F) -> Vec<u8>
where
    F: FnOnce(&mut PrinterSession<Vec<u8>>) -> Result<(), PrintError>,
{
    let mut session = PrinterSession::in_memory();
    f(&mut session).unwrap();
    session.into_inner()
}

/// Assert that `f` fails and nothing was sent.
fn rejected<F>(f: F) -> PrintError
where
    F: FnOnce(&mut PrinterSession<Vec<u8>>) -> Result<(), PrintError>,
{
    let mut session = PrinterSession::in_memory();
    let err = f(&mut session).unwrap_err();
    assert!(session.transport().is_empty(), "bytes sent for a rejected command");
    err
}

// ============================================================================
// FORMAT BOUNDARIES
// ============================================================================

#[test]
fn page_length_upper_bound() {
    let bytes = capture(|s| s.page_length(11999));
    assert_eq!(bytes, vec![ESC, b'(', b'C', 2, 0, (11999 % 256) as u8, (11999 / 256) as u8]);

    let err = rejected(|s| s.page_length(12000));
    assert!(matches!(
        err,
        PrintError::OutOfRange {
            value: 12000,
            ..
        }
    ));
}

#[test]
fn page_format_margins() {
    let bytes = capture(|s| s.page_format(10, 50));
    assert_eq!(bytes, vec![ESC, b'(', b'c', 4, 0, 10, 0, 50, 0]);

    let err = rejected(|s| s.page_format(50, 10));
    assert!(matches!(err, PrintError::InvalidMargins { top: 50, bottom: 10 }));

    // Equal margins leave no printable area.
    rejected(|s| s.page_format(20, 20));
}

#[test]
fn page_format_uses_each_high_byte() {
    let bytes = capture(|s| s.page_format(300, 1000));
    assert_eq!(bytes, vec![ESC, b'(', b'c', 4, 0, 0x2C, 0x01, 0xE8, 0x03]);
}

#[test]
fn horizontal_tab_count_limit() {
    let positions: Vec<u32> = (1..=31).collect();
    let bytes = capture(|s| s.horizontal_tabs(&TabStops::At(positions.clone())));

    let mut expected = vec![ESC, b'D'];
    expected.extend(positions.iter().map(|&p| p as u8));
    expected.push(0);
    assert_eq!(bytes, expected);

    let too_many: Vec<u32> = (1..=32).collect();
    let err = rejected(|s| s.horizontal_tabs(&TabStops::At(too_many)));
    assert!(matches!(
        err,
        PrintError::TooManyPositions {
            count: 32,
            max: 31,
            ..
        }
    ));
}

#[test]
fn vertical_tabs_use_their_own_command() {
    let bytes = capture(|s| s.vertical_tabs(&TabStops::from(vec![2, 4])));
    assert_eq!(bytes, vec![ESC, b'B', 2, 4, 0]);
}

#[test]
fn margins_and_spacing_limits() {
    assert_eq!(capture(|s| s.left_margin(0)), vec![ESC, b'l', 0]);
    assert_eq!(capture(|s| s.right_margin(255)), vec![ESC, b'Q', 255]);
    rejected(|s| s.right_margin(0));
    rejected(|s| s.left_margin(256));
    rejected(|s| s.char_spacing(127));
}

// ============================================================================
// FONT FAMILY ADVISORY
// ============================================================================

#[test]
fn outline_size_after_bitmap_font() {
    let mut session = PrinterSession::in_memory();
    session.select_font(Font::BrusselsBit).unwrap();

    let advisory = session.char_size(CharSize::Dots11).unwrap();
    assert_eq!(
        advisory,
        Some(Advisory::FontCategoryMismatch {
            size: CharSize::Dots11,
            selected: FontCategory::Bitmap,
            required: FontCategory::Outline,
        })
    );
    assert_eq!(session.char_size(CharSize::Dots24).unwrap(), None);

    assert_eq!(
        session.into_inner(),
        vec![ESC, b'k', 2, ESC, b'X', 0, 11, 1, ESC, b'X', 0, 24, 0]
    );
}

#[test]
fn initialize_returns_to_bitmap() {
    let mut session = PrinterSession::in_memory();
    session.select_font(Font::HelsinkiOutline).unwrap();
    assert!(session.char_size(CharSize::Dots24).unwrap().is_some());

    session.initialize().unwrap();
    assert_eq!(session.char_size(CharSize::Dots24).unwrap(), None);
}

// ============================================================================
// BARCODES
// ============================================================================

fn trailing_terminators(bytes: &[u8]) -> usize {
    bytes.iter().rev().take_while(|&&b| b == b'\\').count()
}

#[test]
fn code128_ends_with_three_terminators() {
    let options = BarcodeOptions::new(BarcodeFormat::Code128);
    let bytes = capture(|s| s.barcode(b"ABC-123", &options));
    assert_eq!(trailing_terminators(&bytes), 3);
    assert!(bytes.ends_with(b"bABC-123\\\\\\"));
}

#[test]
fn code39_ends_with_one_terminator() {
    let options = BarcodeOptions::new(BarcodeFormat::Code39);
    let bytes = capture(|s| s.barcode(b"ABC123", &options));
    assert_eq!(trailing_terminators(&bytes), 1);
}

#[test]
fn barcode_rejections() {
    let options = BarcodeOptions {
        height: 65536,
        ..BarcodeOptions::default()
    };
    rejected(|s| s.barcode(b"1", &options));

    let options = BarcodeOptions {
        format: BarcodeFormat::Rss,
        rss_horizontal_chars: 5,
        ..BarcodeOptions::default()
    };
    let err = rejected(|s| s.barcode(b"1", &options));
    assert!(matches!(err, PrintError::InvalidOption { field: "rss_horizontal_chars", .. }));

    rejected(|s| s.barcode(b"a\\b", &BarcodeOptions::default()));
}

// ============================================================================
// MODES
// ============================================================================

#[test]
fn strict_session_guards_both_dialects() {
    let config = SessionConfig { enforce_modes: true };
    let mut session = PrinterSession::with_config(Vec::new(), config);

    session.command_mode().unwrap();
    assert_eq!(session.mode(), PrinterMode::Command);
    assert!(matches!(
        session.template_print(),
        Err(PrintError::WrongMode { .. })
    ));
    session.alignment(Alignment::Center).unwrap();

    session.template_mode().unwrap();
    assert!(matches!(
        session.select_charset(Charset::Uk),
        Err(PrintError::WrongMode { .. })
    ));
    session.choose_template(12).unwrap();

    // Reset and raw text belong to no dialect.
    session.initialize().unwrap();
    session.send_text(b"x").unwrap();

    let mut expected = vec![ESC, b'i', b'a', b'0', ESC, b'a', b'1', ESC, b'i', b'a', b'3'];
    expected.extend(b"^TS012");
    expected.extend([ESC, b'@', b'x']);
    assert_eq!(session.into_inner(), expected);
}

#[test]
fn typical_label() {
    let bytes = capture(|s| {
        s.command_mode()?;
        s.initialize()?;
        s.select_font(Font::HelsinkiBit)?;
        s.bold(Switch::On)?;
        s.send_text(b"OK")?;
        s.bold(Switch::Off)?;
        s.print_page(CutMode::Full)
    });

    assert_eq!(
        bytes,
        vec![
            ESC, b'i', b'a', b'0', // command mode
            ESC, b'@', // initialize
            ESC, b'k', 3, // helsinkibit
            ESC, b'E', b'O', b'K', ESC, b'F', // bold text
            ESC, b'i', b'C', 1, 0x0C, // full cut, page feed
        ]
    );
}
