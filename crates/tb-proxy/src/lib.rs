//! tb-proxy - Forwarding proxy for Testbed
//!
//! A minimal SOCKS5 server (no authentication, CONNECT only) that test
//! suites route database connections through. [`ProxyServer::start`]
//! returns once the listener is bound; the accept loop then runs in a
//! detached task until the returned [`ProxyHandle`] is stopped or dropped.

pub mod client;
pub mod error;
pub mod server;
pub(crate) mod socks;

pub use client::connect_through;
pub use error::{ProxyError, ProxyResult};
pub use server::{ProxyHandle, ProxyServer};
pub use socks::TargetAddr;
