//! # Brother Label Printer Protocol
//!
//! Low-level command builders for the two command dialects of Brother QL
//! label printers. Every builder is a pure function returning the bytes of
//! one command; nothing here touches a transport or holds state.
//!
//! ## Module Structure
//!
//! - [`options`]: closed option tables (symbol ↔ protocol code)
//! - [`validate`]: range, length and count checks
//! - [`encode`]: little-endian and decimal-digit field encodings
//! - [`commands`]: ESC/P mode, system, geometry and position commands
//! - [`text`]: ESC/P text styling, fonts and sizes
//! - [`barcode`]: the ESC/P barcode command
//! - [`template`]: P-touch Template (`^`) commands
//!
//! ## Usage Example
//!
//! ```
//! use brotherprint::protocol::{commands, options::{Alignment, CutMode, Switch}, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::command_mode());
//! data.extend(commands::init());
//! data.extend(commands::alignment(Alignment::Center));
//! data.extend(text::bold(Switch::On));
//! data.extend(b"SHIPPING");
//! data.extend(text::bold(Switch::Off));
//! data.extend(commands::print_page(CutMode::Full));
//! ```
//!
//! For validated, stateful use (font family tracking, mode checks,
//! transmission) go through [`crate::session::PrinterSession`].

pub mod barcode;
pub mod commands;
pub mod encode;
pub mod options;
pub mod template;
pub mod text;
pub mod validate;
