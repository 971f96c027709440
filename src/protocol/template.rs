//! # P-touch Template Commands
//!
//! In template mode the printer holds pre-designed label layouts with named
//! objects (text fields, barcodes). A job selects a template, fills objects
//! by name, and triggers printing. Commands are `^` followed by two letters:
//!
//! | Command | Meaning |
//! |---------|---------|
//! | `^II` | initialize template mode |
//! | `^TS` | select template |
//! | `^ON` | select object by name |
//! | `^DI` | insert data into selected object |
//! | `^FF` | print |
//! | `^OP` | machine operation (feed, cut) |
//! | `^PT` / `^PS` / `^PC` | print start trigger, command, character count |
//! | `^SS` | delimiter |
//!
//! ## Example
//!
//! ```
//! use brotherprint::protocol::template;
//!
//! let mut data = Vec::new();
//! data.extend(template::choose_template(3).unwrap());
//! data.extend(template::select_and_insert(b"name", Some(b"Ada".as_slice())).unwrap());
//! data.extend(template::template_print());
//! assert!(data.starts_with(b"^TS003"));
//! ```

use super::encode::{digits2, digits3, split_le16};
use super::options::{MachineOp, TriggerType};
use super::validate;
use crate::error::Result;

/// Longest `^PS` command string and `^SS` delimiter.
pub const MAX_COMMAND_LEN: usize = 20;

/// Longest `^DI` payload (16-bit length field).
pub const MAX_INSERT_LEN: usize = u16::MAX as usize;

fn caret(cmd: &[u8; 2]) -> Vec<u8> {
    vec![b'^', cmd[0], cmd[1]]
}

/// Print the current template (`^FF`)
#[inline]
pub fn template_print() -> Vec<u8> {
    caret(b"FF")
}

/// Initialize template mode settings (`^II`)
#[inline]
pub fn template_init() -> Vec<u8> {
    caret(b"II")
}

/// # Select Template (`^TS0nn`)
///
/// The template number is written as ASCII digits after a leading `'0'`.
///
/// ## Errors
///
/// `OutOfRange` unless `template <= 99`.
pub fn choose_template(template: u32) -> Result<Vec<u8>> {
    let number = validate::byte("choose_template", template, 0, 99)?;
    let [tens, ones] = digits2(number);
    let mut cmd = caret(b"TS");
    cmd.extend([b'0', b'0' + tens, b'0' + ones]);
    Ok(cmd)
}

/// Machine operation (`^OP n`), `n` raw
#[inline]
pub fn machine_op(operation: MachineOp) -> Vec<u8> {
    let mut cmd = caret(b"OP");
    cmd.push(operation.code());
    cmd
}

/// Print start trigger (`^PT n`), `n` raw
#[inline]
pub fn print_start_trigger(trigger: TriggerType) -> Vec<u8> {
    let mut cmd = caret(b"PT");
    cmd.push(trigger.code());
    cmd
}

/// # Print Start Command (`^PS n1 n2 command`)
///
/// The length is written as two raw decimal digit bytes.
///
/// ```
/// use brotherprint::protocol::template::print_start_command;
///
/// assert_eq!(
///     print_start_command(b"^FF").unwrap(),
///     vec![b'^', b'P', b'S', 0, 3, b'^', b'F', b'F'],
/// );
/// ```
pub fn print_start_command(command: &[u8]) -> Result<Vec<u8>> {
    let len = validate::max_len("print_start_command", command, MAX_COMMAND_LEN)?;
    let mut cmd = caret(b"PS");
    cmd.extend(digits2(len as u8));
    cmd.extend_from_slice(command);
    Ok(cmd)
}

/// # Received Character Count (`^PC n1 n2 n3`)
///
/// Print starts after `count` characters, written as three raw decimal
/// digit bytes. `count` must be 0..=255.
pub fn received_char_count(count: u32) -> Result<Vec<u8>> {
    let count = validate::byte("received_char_count", count, 0, 255)?;
    let mut cmd = caret(b"PC");
    cmd.extend(digits3(count as u16));
    Ok(cmd)
}

/// # Select Delimiter (`^SS n1 n2`)
///
/// Only the delimiter's length is sent; the delimiter text itself is not
/// part of the command.
pub fn select_delim(delim: &[u8]) -> Result<Vec<u8>> {
    let len = validate::max_len("select_delim", delim, MAX_COMMAND_LEN)?;
    let mut cmd = caret(b"SS");
    cmd.extend(digits2(len as u8));
    Ok(cmd)
}

/// Select an object by name (`^ON name NUL`)
pub fn select_obj(name: &[u8]) -> Vec<u8> {
    let mut cmd = caret(b"ON");
    cmd.extend_from_slice(name);
    cmd.push(0x00);
    cmd
}

/// # Insert Data (`^DI nL nH data`)
///
/// Fills the selected object. `None` is treated as empty data; an empty
/// insert is legal and clears the object.
pub fn insert_into_obj(data: Option<&[u8]>) -> Result<Vec<u8>> {
    let data = data.unwrap_or_default();
    let len = validate::max_len("insert_into_obj", data, MAX_INSERT_LEN)?;
    let mut cmd = caret(b"DI");
    cmd.extend(split_le16(len as u16));
    cmd.extend_from_slice(data);
    Ok(cmd)
}

/// `^ON` followed by `^DI`, as one command.
pub fn select_and_insert(name: &[u8], data: Option<&[u8]>) -> Result<Vec<u8>> {
    let insert = insert_into_obj(data)?;
    let mut cmd = select_obj(name);
    cmd.extend(insert);
    Ok(cmd)
}
