//! # Error Types
//!
//! This module defines error types used throughout the brotherprint library.
//!
//! Every validation failure is raised before a command is built, so an
//! `Err` from a session operation always means nothing was transmitted,
//! with the single exception of [`PrintError::Transmission`].

use thiserror::Error;

/// Main error type for command encoding and transmission
#[derive(Debug, Error)]
pub enum PrintError {
    /// A symbolic parameter is not in its option table
    #[error("{operation}: invalid {field} '{value}'")]
    InvalidOption {
        operation: &'static str,
        field: &'static str,
        value: String,
    },

    /// A numeric parameter is outside its declared bounds
    #[error("{parameter} = {value} is out of range ({min}..={max})")]
    OutOfRange {
        parameter: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Too many tab positions for one command
    #[error("{operation}: {count} positions given, at most {max} allowed")]
    TooManyPositions {
        operation: &'static str,
        count: usize,
        max: usize,
    },

    /// A text field exceeds its length field
    #[error("{field} is {len} bytes long, at most {max} allowed")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Top margin is not above the bottom margin
    #[error("top margin ({top}) must be less than the bottom margin ({bottom})")]
    InvalidMargins { top: u32, bottom: u32 },

    /// Operation issued while the printer is in another command mode
    #[error("{operation} requires {required} mode, printer is in {current} mode")]
    WrongMode {
        operation: &'static str,
        required: &'static str,
        current: &'static str,
    },

    /// Transport failure, passed through untouched
    #[error("transmission failed: {0}")]
    Transmission(#[from] TransportError),
}

/// Errors raised by a [`Transport`](crate::transport::Transport)
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not reach the printer
    #[error("failed to connect to {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Device-level setup error (TTY configuration, permissions)
    #[error("device error: {0}")]
    Device(String),

    /// I/O error while writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = PrintError> = std::result::Result<T, E>;
