use std::io;
use std::net::{IpAddr, SocketAddr};

use socket2::{Domain, Protocol, Socket, Type};

use crate::server::ServerError;

/// Probe `preferred`, `preferred + 1`, ... for a port that can be bound on
/// `host`, giving up after `max_attempts` probes or at the top of the port
/// range.
///
/// Advisory only: the probe socket is closed before the real listener
/// binds, so another process can take the port in between. The real bind
/// reports its own failure.
pub fn find_available_port(host: IpAddr, preferred: u16, max_attempts: u32) -> Result<u16, ServerError> {
    let mut port = preferred;
    let mut attempts = 0u32;

    while attempts < max_attempts.max(1) {
        attempts += 1;
        match probe_port(host, port) {
            Ok(()) => {
                if port != preferred {
                    tracing::info!("Port {} is busy, using {}", preferred, port);
                }
                return Ok(port);
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                tracing::debug!("Port {} in use", port);
                port = match port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
            Err(source) => return Err(ServerError::Probe { port, source }),
        }
    }

    Err(ServerError::NoAvailablePort { start: preferred, attempts })
}

/// Bind and listen on `host:port`, then release the socket immediately.
pub fn probe_port(host: IpAddr, port: u16) -> io::Result<()> {
    let addr = SocketAddr::new(host, port);
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    // tokio's TcpListener::bind sets SO_REUSEADDR on Unix; the probe must match it
    // or sockets lingering in TIME_WAIT would read as busy.
    #[cfg(unix)]
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1)?;
    Ok(())
}
