//! # Printer Configuration
//!
//! Hardware presets for supported Brother QL models.
//!
//! | Model | Resolution | Interfaces |
//! |-------|------------|------------|
//! | QL-720NW | 300 DPI | USB, Ethernet, Wi-Fi |
//! | QL-820NWB | 300 DPI | USB, Ethernet, Wi-Fi, Bluetooth |
//! | QL-1110NWB | 300 DPI | USB, Ethernet, Wi-Fi, Bluetooth |
//!
//! ## Usage
//!
//! ```
//! use brotherprint::printer::PrinterConfig;
//!
//! let config = PrinterConfig::by_name("ql-820nwb").unwrap();
//! assert_eq!(config.raw_port, 9100);
//! assert_eq!(config.dpi, 300);
//! ```

use crate::transport::network::RAW_PORT;

/// # Printer Configuration
///
/// - **name**: model name as printed on the device
/// - **dpi**: print head resolution (all ESC/P dot arguments are in 1/dpi inch)
/// - **raw_port**: TCP port accepting raw command streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterConfig {
    pub name: &'static str,
    pub dpi: u16,
    pub raw_port: u16,
}

impl PrinterConfig {
    pub const QL_720NW: PrinterConfig = PrinterConfig {
        name: "QL-720NW",
        dpi: 300,
        raw_port: RAW_PORT,
    };

    pub const QL_820NWB: PrinterConfig = PrinterConfig {
        name: "QL-820NWB",
        dpi: 300,
        raw_port: RAW_PORT,
    };

    pub const QL_1110NWB: PrinterConfig = PrinterConfig {
        name: "QL-1110NWB",
        dpi: 300,
        raw_port: RAW_PORT,
    };

    /// Every preset.
    pub fn all() -> &'static [PrinterConfig] {
        &[Self::QL_720NW, Self::QL_820NWB, Self::QL_1110NWB]
    }

    /// Look up a preset by model name, ignoring case.
    pub fn by_name(name: &str) -> Option<PrinterConfig> {
        Self::all()
            .iter()
            .copied()
            .find(|config| config.name.eq_ignore_ascii_case(name))
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::QL_720NW
    }
}
