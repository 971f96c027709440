//! # brotherprint - Brother Label Printer Commands
//!
//! brotherprint builds and sends commands for Brother QL label printers in
//! their two text-level dialects:
//!
//! - **ESC/P**: fonts, sizes, styles, margins, positioning and barcodes
//! - **P-touch Template**: fill and print templates stored on the printer
//!
//! Every command is validated before it is built. A rejected command is
//! never transmitted.
//!
//! ## Quick Start
//!
//! ```no_run
//! use brotherprint::{
//!     protocol::options::{CutMode, Font, Switch},
//!     session::PrinterSession,
//!     transport::NetworkTransport,
//! };
//!
//! // Raw TCP on port 9100
//! let transport = NetworkTransport::connect("192.168.1.40", 9100)?;
//! let mut session = PrinterSession::new(transport);
//!
//! session.command_mode()?;
//! session.initialize()?;
//! session.select_font(Font::HelsinkiBit)?;
//! session.bold(Switch::On)?;
//! session.send_text(b"FRAGILE")?;
//! session.print_page(CutMode::Full)?;
//!
//! session.into_inner().finish()?;
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Byte-exact command builders and option tables |
//! | [`session`] | Validated, stateful command front end |
//! | [`job`] | JSON label jobs |
//! | [`transport`] | TCP and device backends |
//! | [`printer`] | Printer presets |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Tested with the QL-720NW. Other QL models with ESC/P and P-touch Template
//! support (QL-820NWB, QL-1110NWB) use the same command set.

pub mod error;
pub mod job;
pub mod printer;
pub mod protocol;
pub mod session;
pub mod transport;

// Re-exports for convenience
pub use error::{PrintError, TransportError};
pub use printer::PrinterConfig;
pub use session::{Advisory, PrinterMode, PrinterSession, SessionConfig};
pub use transport::{DeviceTransport, NetworkTransport, Transport};
