//! Error types for tb-proxy

use std::net::SocketAddr;
use thiserror::Error;

/// Proxy errors
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Listener could not be bound (P001)
    #[error("[P001] Failed to bind proxy listener on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// Malformed or unsupported SOCKS5 exchange (P002)
    #[error("[P002] SOCKS5 protocol error: {0}")]
    Protocol(String),

    /// The proxy refused or failed the CONNECT request (P003)
    #[error("[P003] SOCKS5 connect to {target} failed with reply code {code:#04x}")]
    ConnectRejected { target: String, code: u8 },

    /// Accept loop task failed (P004)
    #[error("[P004] Proxy task failed: {0}")]
    Task(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ProxyError
pub type ProxyResult<T> = Result<T, ProxyError>;
