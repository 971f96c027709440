//! Raw TCP transport (port 9100).
//!
//! Networked QL printers accept commands on a plain TCP socket, no framing,
//! no acknowledgements. The connection is opened once and reused for every
//! command of the session.

use std::io::Write;
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info};

use super::Transport;
use crate::error::TransportError;

/// Default raw TCP port.
pub const RAW_PORT: u16 = 9100;

/// Timeout for connecting and for each write.
const TIMEOUT_SECS: u64 = 10;

pub struct NetworkTransport {
    addr: String,
    stream: TcpStream,
}

impl NetworkTransport {
    /// Connect to `host:port`, trying every resolved address in turn.
    pub fn connect(host: &str, port: u16) -> Result<Self, TransportError> {
        Self::connect_timeout(host, port, Duration::from_secs(TIMEOUT_SECS))
    }

    pub fn connect_timeout(
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let addr = format!("{}:{}", host, port);

        let candidates = match addr.to_socket_addrs() {
            Ok(candidates) => candidates,
            Err(source) => return Err(TransportError::Connect { target: addr, source }),
        };

        let mut last_err = None;
        for candidate in candidates {
            debug!(%candidate, "connecting via raw TCP");
            match TcpStream::connect_timeout(&candidate, timeout) {
                Ok(stream) => {
                    stream.set_write_timeout(Some(timeout))?;
                    stream.set_nodelay(true)?;
                    info!(addr = %addr, "connected to printer");
                    return Ok(Self { addr, stream });
                }
                Err(e) => last_err = Some(e),
            }
        }

        let source = last_err.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses resolved")
        });
        Err(TransportError::Connect { target: addr, source })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Flush and close the write half so the printer sees end-of-job.
    pub fn finish(mut self) -> Result<(), TransportError> {
        self.stream.flush()?;
        self.stream.shutdown(Shutdown::Write)?;
        info!(addr = %self.addr, "closed printer connection");
        Ok(())
    }
}

impl Transport for NetworkTransport {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.stream.write_all(data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn test_send_reaches_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let reader = thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut received = Vec::new();
            conn.read_to_end(&mut received).unwrap();
            received
        });

        let mut transport = NetworkTransport::connect("127.0.0.1", port).unwrap();
        transport.send(b"^II").unwrap();
        transport.send(b"^FF").unwrap();
        transport.finish().unwrap();

        assert_eq!(reader.join().unwrap(), b"^II^FF".to_vec());
    }

    #[test]
    fn test_connect_refused() {
        // Bind then drop to get a port with nothing listening.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let err = NetworkTransport::connect_timeout("127.0.0.1", port, Duration::from_secs(2))
            .err()
            .unwrap();
        assert!(matches!(err, TransportError::Connect { .. }));
    }
}
