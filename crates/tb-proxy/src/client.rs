//! SOCKS5 client side, for test bodies that route traffic through the proxy.

use crate::error::{ProxyError, ProxyResult};
use crate::socks::{TargetAddr, CMD_CONNECT, METHOD_NO_AUTH, VERSION};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Open a TCP stream to `target` tunnelled through the proxy at `proxy`.
pub async fn connect_through(proxy: SocketAddr, target: &TargetAddr) -> ProxyResult<TcpStream> {
    let mut stream = TcpStream::connect(proxy).await?;

    stream.write_all(&[VERSION, 1, METHOD_NO_AUTH]).await?;
    let mut selection = [0u8; 2];
    stream.read_exact(&mut selection).await?;
    if selection != [VERSION, METHOD_NO_AUTH] {
        return Err(ProxyError::Protocol(format!(
            "proxy selected method {:#04x}",
            selection[1]
        )));
    }

    let mut request = vec![VERSION, CMD_CONNECT, 0x00];
    target.encode(&mut request)?;
    stream.write_all(&request).await?;

    let mut header = [0u8; 3];
    stream.read_exact(&mut header).await?;
    let [version, code, _reserved] = header;
    if version != VERSION {
        return Err(ProxyError::Protocol(format!(
            "unexpected reply version {:#04x}",
            version
        )));
    }
    // BND.ADDR and BND.PORT are read and discarded
    TargetAddr::read(&mut stream)
        .await?
        .ok_or_else(|| ProxyError::Protocol("unknown bound address type".to_string()))?;

    if code != 0x00 {
        return Err(ProxyError::ConnectRejected {
            target: target.to_string(),
            code,
        });
    }
    Ok(stream)
}
