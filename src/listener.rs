// src/listener.rs
use std::io;
use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::AppConfig;

/// Ports tried after the configured one before giving up.
const PORT_ATTEMPTS: u16 = 20;

/// Binds `HOST:PORT`, moving on to the following ports when one is taken.
pub async fn bind(config: &AppConfig) -> io::Result<(TcpListener, SocketAddr)> {
    let mut last_err = None;
    for offset in 0..=PORT_ATTEMPTS {
        let Some(port) = config.port.checked_add(offset) else { break };
        let addr = SocketAddr::from((config.host, port));
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok((listener, addr)),
            Err(e) => {
                if offset == 0 {
                    tracing::warn!(%addr, error = %e, "Port in use, trying next");
                }
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::AddrInUse, "no port left to try")))
}
