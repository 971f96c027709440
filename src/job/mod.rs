//! # Label Jobs
//!
//! A job is a JSON list of printer operations, run step by step through a
//! [`PrinterSession`](crate::session::PrinterSession). Each step names an
//! operation in `op` and passes its parameters as fields, using the same
//! symbols as the option tables.
//!
//! ## Example
//!
//! ```
//! use brotherprint::job::JobDocument;
//! use brotherprint::session::PrinterSession;
//!
//! let json = r#"{
//!     "steps": [
//!         {"op": "command_mode"},
//!         {"op": "initialize"},
//!         {"op": "select_font", "font": "lettergothic"},
//!         {"op": "char_size", "size": 24},
//!         {"op": "text", "content": "Shelf 4B"},
//!         {"op": "print_page", "cut": "full"}
//!     ]
//! }"#;
//!
//! let mut session = PrinterSession::in_memory();
//! let job = JobDocument::from_json(json).unwrap();
//! let report = job.run(&mut session).unwrap();
//!
//! assert_eq!(report.steps_sent, 6);
//! // Size 24 is bitmap-only; lettergothic is an outline font.
//! assert_eq!(report.advisories.len(), 1);
//! ```

mod run;
mod schema;

pub use run::{JobError, JobReport, StepAdvisory};
pub use schema::{JobBarcode, JobDocument, JobStep, JobSymbol, JobTabStops};
