//! # Character Device Transport
//!
//! Writes commands to a printer exposed as a device node:
//!
//! - USB printer class: `/dev/usb/lp0`
//! - Bluetooth SPP (QL-820NWB): `/dev/rfcomm0` after `rfcomm bind`
//!
//! ## TTY Configuration
//!
//! When the device is a TTY (RFCOMM, USB-serial) it is switched to raw mode
//! so binary data passes through unmodified:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR, ICRNL
//! - **No flow control**: IXON, IXOFF, IXANY (0x11/0x13 occur in command data)
//! - **No output processing**: OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8, no parity
//!
//! Plain device nodes and regular files are written as-is.
//!
//! ## Chunked Writes
//!
//! Large commands are written in chunks with a short pause between them so
//! the printer's receive buffer is not overrun.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use super::Transport;
use crate::error::TransportError;

/// Default USB printer device path
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # Device Printer Transport
///
/// ## Example
///
/// ```no_run
/// use brotherprint::transport::DeviceTransport;
/// use brotherprint::session::PrinterSession;
///
/// let device = DeviceTransport::open("/dev/usb/lp0")?;
/// let mut session = PrinterSession::new(device);
/// session.command_mode()?;
/// session.initialize()?;
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DeviceTransport {
    path: PathBuf,
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceTransport {
    /// Open a printer device for writing.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - Permission denied (usually needs the `lp` or `dialout` group)
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, TransportError> {
        let path = device.as_ref();

        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|e| TransportError::Connect {
                target: path.display().to_string(),
                source: e,
            })?;

        if is_tty(&file) {
            configure_tty_raw(&file)?;
            debug!(device = %path.display(), "configured TTY for raw output");
        }
        info!(device = %path.display(), "opened printer device");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Open the default device path (/dev/usb/lp0)
    pub fn open_default() -> Result<Self, TransportError> {
        Self::open(DEFAULT_DEVICE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set the chunk size for large writes. Default is 4096 bytes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks. Default is 2ms.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }

    fn write_chunked(&mut self, data: &[u8]) -> io::Result<()> {
        if data.len() <= self.chunk_size {
            return self.file.write_all(data);
        }
        for chunk in data.chunks(self.chunk_size) {
            self.file.write_all(chunk)?;
            if !self.chunk_delay.is_zero() {
                thread::sleep(self.chunk_delay);
            }
        }
        Ok(())
    }
}

impl Transport for DeviceTransport {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        if data.is_empty() {
            return Ok(());
        }
        self.write_chunked(data)?;
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(unix)]
fn is_tty(file: &File) -> bool {
    use std::os::unix::io::AsRawFd;

    unsafe { libc::isatty(file.as_raw_fd()) == 1 }
}

#[cfg(not(unix))]
fn is_tty(_file: &File) -> bool {
    false
}

/// Switch a TTY file descriptor to raw mode.
#[cfg(unix)]
fn configure_tty_raw(file: &File) -> Result<(), TransportError> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(TransportError::Device(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(TransportError::Device(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File) -> Result<(), TransportError> {
    Ok(())
}
