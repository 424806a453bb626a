//! Proxy listener and background accept loop

use crate::error::{ProxyError, ProxyResult};
use crate::socks::serve_client;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// SOCKS5 forwarding proxy
pub struct ProxyServer;

impl ProxyServer {
    /// Bind `addr` and start accepting clients in a background task.
    ///
    /// Returns only after the bind succeeded. Bind failures are returned
    /// as [`ProxyError::Bind`] and are not retried.
    pub async fn start(addr: SocketAddr) -> ProxyResult<ProxyHandle> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ProxyError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ProxyError::Bind { addr, source })?;

        log::info!("SOCKS5 proxy listening on {}", local_addr);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(accept_loop(listener, shutdown_rx));

        Ok(ProxyHandle {
            local_addr,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }
}

async fn accept_loop(listener: TcpListener, mut shutdown_rx: oneshot::Receiver<()>) {
    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, peer_addr)) => {
                        tokio::spawn(async move {
                            if let Err(e) = serve_client(stream, peer_addr).await {
                                log::debug!("Proxy client {} ended: {}", peer_addr, e);
                            }
                        });
                    }
                    Err(e) => log::warn!("Proxy accept failed: {}", e),
                }
            }
            _ = &mut shutdown_rx => {
                log::debug!("Proxy accept loop shutting down");
                break;
            }
        }
    }
}

/// Handle to a running proxy.
///
/// Dropping the handle stops the accept loop and closes the listener, so
/// every exit path releases the port.
pub struct ProxyHandle {
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ProxyHandle {
    /// Address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting clients and wait for the listener to close.
    ///
    /// Tunnels that are already established keep running until either
    /// side hangs up.
    pub async fn stop(mut self) -> ProxyResult<()> {
        if let Some(shutdown) = self.shutdown.take() {
            // Receiver is gone only if the loop already exited
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            task.await.map_err(|e| ProxyError::Task(e.to_string()))?;
        }
        log::info!("SOCKS5 proxy on {} stopped", self.local_addr);
        Ok(())
    }
}

impl Drop for ProxyHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
