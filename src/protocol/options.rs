//! # Option Tables
//!
//! Every symbolic parameter the printer understands is a closed enum here.
//! Each table maps a variant to its protocol code and to the symbol used on
//! the wire-facing side (JSON jobs, CLI arguments):
//!
//! ```
//! use brotherprint::protocol::options::{CutMode, Font, FontCategory};
//!
//! let cut: CutMode = "chain".parse().unwrap();
//! assert_eq!(cut.code(), 0b0100);
//!
//! assert_eq!(Font::HelsinkiOutline.category(), FontCategory::Outline);
//! assert!("comic sans".parse::<Font>().is_err());
//! ```
//!
//! Lookups outside a table fail with [`PrintError::InvalidOption`]; there are
//! no fallbacks.

use std::fmt;
use std::str::FromStr;

use crate::error::{PrintError, Result};

/// Define an option table: the enum, its codes, its symbols, and parsing.
///
/// `Name("operation", "field") { Variant => "symbol" = code, ... }`
/// with an optional `aliases { "alternate" => Variant }` block accepted only
/// when parsing.
macro_rules! option_table {
    (
        $(#[$meta:meta])*
        $name:ident($operation:literal, $field:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $symbol:literal = $code:expr),+ $(,)?
        }
        $(aliases { $($alias:literal => $target:ident),+ $(,)? })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every entry of the table, in protocol order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Operation reported when a bare `parse()` fails.
            pub const OPERATION: &'static str = $operation;

            /// Parameter name reported when a bare `parse()` fails.
            pub const FIELD: &'static str = $field;

            /// Protocol code byte.
            pub const fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Symbolic name.
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $symbol,)+
                }
            }

            /// Look up `symbol`, attributing a failure to `operation`/`field`.
            pub fn parse_for(
                operation: &'static str,
                field: &'static str,
                symbol: &str,
            ) -> Result<Self> {
                $($(
                    if symbol == $alias {
                        return Ok($name::$target);
                    }
                )+)?
                Self::ALL
                    .iter()
                    .copied()
                    .find(|entry| entry.name() == symbol)
                    .ok_or_else(|| PrintError::InvalidOption {
                        operation,
                        field,
                        value: symbol.to_string(),
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = PrintError;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_for($operation, $field, s)
            }
        }
    };
}

// ============================================================================
// SYSTEM SETTINGS
// ============================================================================

option_table! {
    /// International character set (ESC R n)
    Charset("select_charset", "charset") {
        Usa => "USA" = 0,
        France => "France" = 1,
        Germany => "Germany" = 2,
        Uk => "UK" = 3,
        Denmark => "Denmark" = 4,
        Sweden => "Sweden" = 5,
        Italy => "Italy" = 6,
        Spain => "Spain" = 7,
        Japan => "Japan" = 8,
        Norway => "Norway" = 9,
        DenmarkII => "Denmark II" = 10,
        SpainII => "Spain II" = 11,
        LatinAmerica => "Latin America" = 12,
        SouthKorea => "South Korea" = 13,
        Legal => "Legal" = 64,
    }
}

option_table! {
    /// Built-in character code table (ESC t n)
    CharCodeTable("select_char_code_table", "table") {
        Standard => "standard" = 0,
        EasternEuropean => "eastern european" = 1,
        WesternEuropean => "western european" = 2,
        Spare => "spare" = 3,
    }
}

option_table! {
    /// Cut setting bit flags (ESC i C n)
    CutMode("cut_setting", "cut") {
        Full => "full" = 0b0000_0001,
        Half => "half" = 0b0000_0010,
        Chain => "chain" = 0b0000_0100,
        Special => "special" = 0b0000_1000,
    }
}

// ============================================================================
// FORMAT
// ============================================================================

option_table! {
    /// Rotated printing (ESC i L n), sent as an ASCII digit
    Rotation("rotated_printing", "action") {
        Rotate => "rotate" = b'1',
        Cancel => "cancel" = b'0',
    }
}

option_table! {
    /// Line alignment (ESC a n), sent as an ASCII digit
    Alignment("alignment", "align") {
        Left => "left" = b'0',
        Center => "center" = b'1',
        Right => "right" = b'2',
        Justified => "justified" = b'3',
    }
}

option_table! {
    /// Generic on/off switch.
    ///
    /// The code is the logical value; each command maps it onto its own
    /// bytes (bold uses `E`/`F`, frame uses `'1'`/`'0'`, and so on).
    Switch("switch", "action") {
        On => "on" = 1,
        Off => "off" = 0,
    }
}

impl From<bool> for Switch {
    fn from(on: bool) -> Self {
        if on { Switch::On } else { Switch::Off }
    }
}

// ============================================================================
// FONTS
// ============================================================================

/// Rendering family of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FontCategory {
    #[default]
    Bitmap,
    Outline,
}

impl FontCategory {
    pub const fn name(self) -> &'static str {
        match self {
            FontCategory::Bitmap => "bitmap",
            FontCategory::Outline => "outline",
        }
    }
}

impl fmt::Display for FontCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

option_table! {
    /// Resident fonts (ESC k n)
    Font("select_font", "font") {
        Brougham => "brougham" = 0,
        LetterGothicBold => "lettergothicbold" = 1,
        BrusselsBit => "brusselsbit" = 2,
        HelsinkiBit => "helsinkibit" = 3,
        SanDiego => "sandiego" = 4,
        LetterGothic => "lettergothic" = 9,
        BrusselsOutline => "brusselsoutline" = 10,
        HelsinkiOutline => "helsinkioutline" = 11,
    }
}

impl Font {
    /// Which family this font belongs to.
    pub const fn category(self) -> FontCategory {
        match self {
            Font::Brougham
            | Font::LetterGothicBold
            | Font::BrusselsBit
            | Font::HelsinkiBit
            | Font::SanDiego => FontCategory::Bitmap,
            Font::LetterGothic | Font::BrusselsOutline | Font::HelsinkiOutline => {
                FontCategory::Outline
            }
        }
    }
}

option_table! {
    /// Character size in dots (ESC X 0 n m).
    ///
    /// The code is the dot size itself; see [`CharSize::category`] and
    /// [`CharSize::trailer`] for the other two properties of each size.
    CharSize("char_size", "size") {
        Dots24 => "24" = 24,
        Dots32 => "32" = 32,
        Dots48 => "48" = 48,
        Dots33 => "33" = 33,
        Dots38 => "38" = 38,
        Dots42 => "42" = 42,
        Dots46 => "46" = 46,
        Dots50 => "50" = 50,
        Dots58 => "58" = 58,
        Dots67 => "67" = 67,
        Dots75 => "75" = 75,
        Dots83 => "83" = 83,
        Dots92 => "92" = 92,
        Dots100 => "100" = 100,
        Dots117 => "117" = 117,
        Dots133 => "133" = 133,
        Dots150 => "150" = 150,
        Dots167 => "167" = 167,
        Dots200 => "200" = 200,
        Dots233 => "233" = 233,
        Dots11 => "11" = 11,
        Dots44 => "44" = 44,
        Dots77 => "77" = 77,
        Dots111 => "111" = 111,
        Dots144 => "144" = 144,
    }
}

impl CharSize {
    /// Font family the size is legal for. Only 24, 32 and 48 are bitmap sizes.
    pub const fn category(self) -> FontCategory {
        match self {
            CharSize::Dots24 | CharSize::Dots32 | CharSize::Dots48 => FontCategory::Bitmap,
            _ => FontCategory::Outline,
        }
    }

    /// Final byte of the ESC X command: 1 for the 11/44/77/111/144 series.
    pub const fn trailer(self) -> u8 {
        match self {
            CharSize::Dots11
            | CharSize::Dots44
            | CharSize::Dots77
            | CharSize::Dots111
            | CharSize::Dots144 => 1,
            _ => 0,
        }
    }
}

option_table! {
    /// Character style (ESC q n)
    CharStyle("char_style", "style") {
        Normal => "normal" = 0,
        Outline => "outline" = 1,
        Shadow => "shadow" = 2,
        OutlineShadow => "outlineshadow" = 3,
    }
}

// ============================================================================
// BARCODES
// ============================================================================

option_table! {
    /// Barcode symbology (ESC i t n)
    BarcodeFormat("barcode", "format") {
        Code39 => "code39" = b'0',
        Itf => "itf" = b'1',
        Ean8Upca => "ean8/upca" = b'5',
        UpcE => "upce" = b'6',
        Codabar => "codabar" = b'9',
        Code128 => "code128" = b'a',
        Gs1128 => "gs1-128" = b'b',
        Rss => "rss" = b'c',
    }
}

impl BarcodeFormat {
    /// Terminators appended after the generic one (two for the 128 family).
    pub const fn extra_terminators(self) -> usize {
        match self {
            BarcodeFormat::Code128 | BarcodeFormat::Gs1128 => 2,
            _ => 0,
        }
    }
}

option_table! {
    /// Narrow bar width
    BarcodeWidth("barcode", "width") {
        XSmall => "xsmall" = b'0',
        Small => "small" = b'1',
        Medium => "medium" = b'2',
        Large => "large" = b'3',
    }
}

option_table! {
    /// Thick-to-thin bar ratio
    BarcodeRatio("barcode", "ratio") {
        ThreeToOne => "3:1" = b'0',
        FiveToTwo => "2.5:1" = b'1',
        TwoToOne => "2:1" = b'2',
    }
}

option_table! {
    /// RSS (GS1 DataBar) model, used with [`BarcodeFormat::Rss`]
    RssSymbol("barcode", "rss_symbol") {
        Rss14Standard => "rss14std" = b'0',
        Rss14Truncated => "rss14trun" = b'1',
        Rss14Stacked => "rss14stacked" = b'2',
        Rss14StackedOmni => "rss14stackedomni" = b'3',
        RssLimited => "rsslimited" = b'4',
        RssExpandedStandard => "rssexpandedstd" = b'5',
        RssExpandedStacked => "rssexpandedstacked" = b'6',
    }
}

// ============================================================================
// TEMPLATE MODE
// ============================================================================

option_table! {
    /// Machine operation (^OP)
    MachineOp("machine_op", "operation") {
        FeedToStart => "feed2start" = 1,
        FeedOne => "feedone" = 2,
        Cut => "cut" = 3,
    }
}

option_table! {
    /// Print start trigger (^PT)
    TriggerType("print_start_trigger", "type") {
        Received => "received" = 1,
        Filled => "filled" = 2,
        NumReceived => "num_received" = 3,
    }
    aliases {
        "recieved" => Received,
        "num_recieved" => NumReceived,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_injective<T: Copy>(table: &[T], code: fn(T) -> u8, name: fn(T) -> &'static str) {
        let codes: HashSet<u8> = table.iter().map(|&e| code(e)).collect();
        assert_eq!(codes.len(), table.len(), "duplicate code");
        let names: HashSet<&str> = table.iter().map(|&e| name(e)).collect();
        assert_eq!(names.len(), table.len(), "duplicate symbol");
    }

    /// Every entry, in table order, with its exact code; every symbol parses
    /// back to that code.
    fn assert_codes<T>(
        table: &[T],
        name: fn(T) -> &'static str,
        code: fn(T) -> u8,
        expected: &[(&str, u8)],
    ) where
        T: Copy + FromStr<Err = PrintError>,
    {
        let actual: Vec<(&str, u8)> = table.iter().map(|&e| (name(e), code(e))).collect();
        assert_eq!(actual, expected);
        for &(symbol, value) in expected {
            let parsed: T = symbol.parse().unwrap();
            assert_eq!(code(parsed), value, "{symbol}");
        }
    }

    #[test]
    fn test_system_setting_codes() {
        assert_codes(
            Charset::ALL,
            Charset::name,
            Charset::code,
            &[
                ("USA", 0),
                ("France", 1),
                ("Germany", 2),
                ("UK", 3),
                ("Denmark", 4),
                ("Sweden", 5),
                ("Italy", 6),
                ("Spain", 7),
                ("Japan", 8),
                ("Norway", 9),
                ("Denmark II", 10),
                ("Spain II", 11),
                ("Latin America", 12),
                ("South Korea", 13),
                ("Legal", 64),
            ],
        );
        assert_codes(
            CharCodeTable::ALL,
            CharCodeTable::name,
            CharCodeTable::code,
            &[
                ("standard", 0),
                ("eastern european", 1),
                ("western european", 2),
                ("spare", 3),
            ],
        );
        assert_codes(
            CutMode::ALL,
            CutMode::name,
            CutMode::code,
            &[("full", 1), ("half", 2), ("chain", 4), ("special", 8)],
        );
    }

    #[test]
    fn test_format_codes() {
        assert_codes(
            Rotation::ALL,
            Rotation::name,
            Rotation::code,
            &[("rotate", b'1'), ("cancel", b'0')],
        );
        assert_codes(
            Alignment::ALL,
            Alignment::name,
            Alignment::code,
            &[
                ("left", b'0'),
                ("center", b'1'),
                ("right", b'2'),
                ("justified", b'3'),
            ],
        );
        assert_codes(Switch::ALL, Switch::name, Switch::code, &[("on", 1), ("off", 0)]);
    }

    #[test]
    fn test_font_codes() {
        assert_codes(
            Font::ALL,
            Font::name,
            Font::code,
            &[
                ("brougham", 0),
                ("lettergothicbold", 1),
                ("brusselsbit", 2),
                ("helsinkibit", 3),
                ("sandiego", 4),
                ("lettergothic", 9),
                ("brusselsoutline", 10),
                ("helsinkioutline", 11),
            ],
        );
        assert_codes(
            CharStyle::ALL,
            CharStyle::name,
            CharStyle::code,
            &[
                ("normal", 0),
                ("outline", 1),
                ("shadow", 2),
                ("outlineshadow", 3),
            ],
        );
    }

    #[test]
    fn test_char_size_codes() {
        let sizes: [(&str, u8); 25] = [
            ("24", 24),
            ("32", 32),
            ("48", 48),
            ("33", 33),
            ("38", 38),
            ("42", 42),
            ("46", 46),
            ("50", 50),
            ("58", 58),
            ("67", 67),
            ("75", 75),
            ("83", 83),
            ("92", 92),
            ("100", 100),
            ("117", 117),
            ("133", 133),
            ("150", 150),
            ("167", 167),
            ("200", 200),
            ("233", 233),
            ("11", 11),
            ("44", 44),
            ("77", 77),
            ("111", 111),
            ("144", 144),
        ];
        assert_codes(CharSize::ALL, CharSize::name, CharSize::code, &sizes);

        let with_trailer: Vec<&str> = CharSize::ALL
            .iter()
            .filter(|s| s.trailer() == 1)
            .map(|s| s.name())
            .collect();
        assert_eq!(with_trailer, ["11", "44", "77", "111", "144"]);
    }

    #[test]
    fn test_barcode_codes() {
        assert_codes(
            BarcodeFormat::ALL,
            BarcodeFormat::name,
            BarcodeFormat::code,
            &[
                ("code39", b'0'),
                ("itf", b'1'),
                ("ean8/upca", b'5'),
                ("upce", b'6'),
                ("codabar", b'9'),
                ("code128", b'a'),
                ("gs1-128", b'b'),
                ("rss", b'c'),
            ],
        );
        assert_codes(
            BarcodeWidth::ALL,
            BarcodeWidth::name,
            BarcodeWidth::code,
            &[
                ("xsmall", b'0'),
                ("small", b'1'),
                ("medium", b'2'),
                ("large", b'3'),
            ],
        );
        assert_codes(
            BarcodeRatio::ALL,
            BarcodeRatio::name,
            BarcodeRatio::code,
            &[("3:1", b'0'), ("2.5:1", b'1'), ("2:1", b'2')],
        );
        assert_codes(
            RssSymbol::ALL,
            RssSymbol::name,
            RssSymbol::code,
            &[
                ("rss14std", b'0'),
                ("rss14trun", b'1'),
                ("rss14stacked", b'2'),
                ("rss14stackedomni", b'3'),
                ("rsslimited", b'4'),
                ("rssexpandedstd", b'5'),
                ("rssexpandedstacked", b'6'),
            ],
        );
    }

    #[test]
    fn test_template_codes() {
        assert_codes(
            MachineOp::ALL,
            MachineOp::name,
            MachineOp::code,
            &[("feed2start", 1), ("feedone", 2), ("cut", 3)],
        );
        assert_codes(
            TriggerType::ALL,
            TriggerType::name,
            TriggerType::code,
            &[("received", 1), ("filled", 2), ("num_received", 3)],
        );
    }

    #[test]
    fn test_tables_are_injective() {
        assert_injective(Charset::ALL, Charset::code, Charset::name);
        assert_injective(CharCodeTable::ALL, CharCodeTable::code, CharCodeTable::name);
        assert_injective(CutMode::ALL, CutMode::code, CutMode::name);
        assert_injective(Rotation::ALL, Rotation::code, Rotation::name);
        assert_injective(Alignment::ALL, Alignment::code, Alignment::name);
        assert_injective(Switch::ALL, Switch::code, Switch::name);
        assert_injective(Font::ALL, Font::code, Font::name);
        assert_injective(CharSize::ALL, CharSize::code, CharSize::name);
        assert_injective(CharStyle::ALL, CharStyle::code, CharStyle::name);
        assert_injective(BarcodeFormat::ALL, BarcodeFormat::code, BarcodeFormat::name);
        assert_injective(BarcodeWidth::ALL, BarcodeWidth::code, BarcodeWidth::name);
        assert_injective(BarcodeRatio::ALL, BarcodeRatio::code, BarcodeRatio::name);
        assert_injective(RssSymbol::ALL, RssSymbol::code, RssSymbol::name);
        assert_injective(MachineOp::ALL, MachineOp::code, MachineOp::name);
        assert_injective(TriggerType::ALL, TriggerType::code, TriggerType::name);
    }

    #[test]
    fn test_cut_modes_are_single_bits() {
        for cut in CutMode::ALL {
            assert_eq!(cut.code().count_ones(), 1, "{cut}");
        }
    }

    #[test]
    fn test_parse_round_trips_names() {
        for charset in Charset::ALL {
            assert_eq!(charset.name().parse::<Charset>().unwrap(), *charset);
        }
        assert_eq!("Denmark II".parse::<Charset>().unwrap().code(), 10);
        assert_eq!("Legal".parse::<Charset>().unwrap().code(), 64);
    }

    #[test]
    fn test_unknown_symbol_names_operation() {
        let err = "Atlantis".parse::<Charset>().unwrap_err();
        match err {
            PrintError::InvalidOption {
                operation,
                field,
                value,
            } => {
                assert_eq!(operation, "select_charset");
                assert_eq!(field, "charset");
                assert_eq!(value, "Atlantis");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_symbols_are_case_sensitive() {
        assert!("usa".parse::<Charset>().is_err());
        assert!("FULL".parse::<CutMode>().is_err());
    }

    #[test]
    fn test_parse_for_overrides_field() {
        let err = Switch::parse_for("barcode", "equalize", "maybe").unwrap_err();
        assert!(matches!(
            err,
            PrintError::InvalidOption {
                operation: "barcode",
                field: "equalize",
                ..
            }
        ));
    }

    #[test]
    fn test_trigger_aliases() {
        assert_eq!("recieved".parse::<TriggerType>().unwrap(), TriggerType::Received);
        assert_eq!(
            "num_recieved".parse::<TriggerType>().unwrap(),
            TriggerType::NumReceived
        );
        assert_eq!("filled".parse::<TriggerType>().unwrap().code(), 2);
    }

    #[test]
    fn test_font_partition() {
        let bitmap: Vec<_> = Font::ALL
            .iter()
            .filter(|f| f.category() == FontCategory::Bitmap)
            .map(|f| f.name())
            .collect();
        assert_eq!(
            bitmap,
            ["brougham", "lettergothicbold", "brusselsbit", "helsinkibit", "sandiego"]
        );
    }

    #[test]
    fn test_char_size_categories() {
        let bitmap: Vec<u8> = CharSize::ALL
            .iter()
            .filter(|s| s.category() == FontCategory::Bitmap)
            .map(|s| s.code())
            .collect();
        assert_eq!(bitmap, [24, 32, 48]);
        assert_eq!(CharSize::Dots11.category(), FontCategory::Outline);
        assert_eq!(CharSize::Dots11.trailer(), 1);
        assert_eq!(CharSize::Dots33.trailer(), 0);
    }

    #[test]
    fn test_extra_terminators() {
        assert_eq!(BarcodeFormat::Code128.extra_terminators(), 2);
        assert_eq!(BarcodeFormat::Gs1128.extra_terminators(), 2);
        assert_eq!(BarcodeFormat::Code39.extra_terminators(), 0);
        assert_eq!(BarcodeFormat::Rss.extra_terminators(), 0);
    }
}
