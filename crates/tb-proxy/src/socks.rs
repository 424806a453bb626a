//! SOCKS5 wire protocol (RFC 1928), server side.

use crate::error::{ProxyError, ProxyResult};
use std::fmt;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

pub(crate) const VERSION: u8 = 0x05;
pub(crate) const METHOD_NO_AUTH: u8 = 0x00;
pub(crate) const METHOD_NONE_ACCEPTABLE: u8 = 0xFF;
pub(crate) const CMD_CONNECT: u8 = 0x01;
pub(crate) const ATYP_IPV4: u8 = 0x01;
pub(crate) const ATYP_DOMAIN: u8 = 0x03;
pub(crate) const ATYP_IPV6: u8 = 0x04;

/// SOCKS5 reply codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reply {
    Succeeded,
    HostUnreachable,
    ConnectionRefused,
    CommandNotSupported,
    AddressTypeNotSupported,
}

impl Reply {
    pub(crate) fn code(self) -> u8 {
        match self {
            Reply::Succeeded => 0x00,
            Reply::HostUnreachable => 0x04,
            Reply::ConnectionRefused => 0x05,
            Reply::CommandNotSupported => 0x07,
            Reply::AddressTypeNotSupported => 0x08,
        }
    }

    fn from_connect_error(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => Reply::ConnectionRefused,
            _ => Reply::HostUnreachable,
        }
    }
}

/// Destination requested by a SOCKS5 client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetAddr {
    /// Literal IPv4 or IPv6 address
    Ip(SocketAddr),
    /// Host name resolved by the proxy
    Domain(String, u16),
}

impl TargetAddr {
    /// Encode as ATYP + DST.ADDR + DST.PORT
    pub(crate) fn encode(&self, buf: &mut Vec<u8>) -> ProxyResult<()> {
        match self {
            TargetAddr::Ip(SocketAddr::V4(addr)) => {
                buf.push(ATYP_IPV4);
                buf.extend_from_slice(&addr.ip().octets());
                buf.extend_from_slice(&addr.port().to_be_bytes());
            }
            TargetAddr::Ip(SocketAddr::V6(addr)) => {
                buf.push(ATYP_IPV6);
                buf.extend_from_slice(&addr.ip().octets());
                buf.extend_from_slice(&addr.port().to_be_bytes());
            }
            TargetAddr::Domain(host, port) => {
                let len = u8::try_from(host.len()).map_err(|_| {
                    ProxyError::Protocol(format!("domain name too long: {} bytes", host.len()))
                })?;
                buf.push(ATYP_DOMAIN);
                buf.push(len);
                buf.extend_from_slice(host.as_bytes());
                buf.extend_from_slice(&port.to_be_bytes());
            }
        }
        Ok(())
    }

    /// Read ATYP + DST.ADDR + DST.PORT.
    ///
    /// Returns `Ok(None)` for an unknown address type.
    pub(crate) async fn read<S>(stream: &mut S) -> ProxyResult<Option<Self>>
    where
        S: AsyncRead + Unpin,
    {
        let atyp = stream.read_u8().await?;
        let target = match atyp {
            ATYP_IPV4 => {
                let mut octets = [0u8; 4];
                stream.read_exact(&mut octets).await?;
                let port = stream.read_u16().await?;
                TargetAddr::Ip(SocketAddr::from((Ipv4Addr::from(octets), port)))
            }
            ATYP_IPV6 => {
                let mut octets = [0u8; 16];
                stream.read_exact(&mut octets).await?;
                let port = stream.read_u16().await?;
                TargetAddr::Ip(SocketAddr::from((Ipv6Addr::from(octets), port)))
            }
            ATYP_DOMAIN => {
                let len = stream.read_u8().await? as usize;
                let mut name = vec![0u8; len];
                stream.read_exact(&mut name).await?;
                let port = stream.read_u16().await?;
                let host = String::from_utf8(name)
                    .map_err(|_| ProxyError::Protocol("domain name is not UTF-8".to_string()))?;
                TargetAddr::Domain(host, port)
            }
            _ => return Ok(None),
        };
        Ok(Some(target))
    }

    async fn connect(&self) -> io::Result<TcpStream> {
        match self {
            TargetAddr::Ip(addr) => TcpStream::connect(addr).await,
            TargetAddr::Domain(host, port) => TcpStream::connect((host.as_str(), *port)).await,
        }
    }
}

impl fmt::Display for TargetAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetAddr::Ip(addr) => write!(f, "{}", addr),
            TargetAddr::Domain(host, port) => write!(f, "{}:{}", host, port),
        }
    }
}

/// Write a reply carrying the bound address (unspecified when absent)
pub(crate) async fn write_reply<S>(
    stream: &mut S,
    reply: Reply,
    bound: Option<SocketAddr>,
) -> ProxyResult<()>
where
    S: AsyncWrite + Unpin,
{
    let bound = bound.unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)));
    let mut buf = vec![VERSION, reply.code(), 0x00];
    TargetAddr::Ip(bound).encode(&mut buf)?;
    stream.write_all(&buf).await?;
    stream.flush().await?;
    Ok(())
}

/// Run method selection and read the CONNECT request.
///
/// Error replies for unsupported methods, commands or address types are
/// sent before the error is returned.
pub(crate) async fn negotiate<S>(stream: &mut S) -> ProxyResult<TargetAddr>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let version = stream.read_u8().await?;
    if version != VERSION {
        return Err(ProxyError::Protocol(format!(
            "unsupported version {:#04x}",
            version
        )));
    }

    let nmethods = stream.read_u8().await? as usize;
    let mut methods = vec![0u8; nmethods];
    stream.read_exact(&mut methods).await?;

    if !methods.contains(&METHOD_NO_AUTH) {
        stream
            .write_all(&[VERSION, METHOD_NONE_ACCEPTABLE])
            .await?;
        return Err(ProxyError::Protocol(
            "client offered no acceptable auth method".to_string(),
        ));
    }
    stream.write_all(&[VERSION, METHOD_NO_AUTH]).await?;

    let mut header = [0u8; 3];
    stream.read_exact(&mut header).await?;
    let [version, command, _reserved] = header;
    if version != VERSION {
        return Err(ProxyError::Protocol(format!(
            "unsupported request version {:#04x}",
            version
        )));
    }

    let target = match TargetAddr::read(stream).await? {
        Some(target) => target,
        None => {
            write_reply(stream, Reply::AddressTypeNotSupported, None).await?;
            return Err(ProxyError::Protocol("unsupported address type".to_string()));
        }
    };

    if command != CMD_CONNECT {
        write_reply(stream, Reply::CommandNotSupported, None).await?;
        return Err(ProxyError::Protocol(format!(
            "unsupported command {:#04x}",
            command
        )));
    }

    Ok(target)
}

/// Serve one client connection: negotiate, connect, then relay bytes.
pub(crate) async fn serve_client(mut client: TcpStream, peer: SocketAddr) -> ProxyResult<()> {
    let target = negotiate(&mut client).await?;

    let mut upstream = match target.connect().await {
        Ok(upstream) => upstream,
        Err(e) => {
            log::debug!("Proxy connect {} -> {} failed: {}", peer, target, e);
            let reply = Reply::from_connect_error(&e);
            write_reply(&mut client, reply, None).await?;
            return Err(ProxyError::Io(e));
        }
    };

    let bound = upstream.local_addr().ok();
    write_reply(&mut client, Reply::Succeeded, bound).await?;
    log::debug!("Proxy tunnel {} -> {} established", peer, target);

    let (sent, received) = tokio::io::copy_bidirectional(&mut client, &mut upstream).await?;
    log::debug!(
        "Proxy tunnel {} -> {} closed ({} bytes out, {} bytes in)",
        peer,
        target,
        sent,
        received
    );
    Ok(())
}

#[cfg(test)]
#[path = "socks_test.rs"]
mod tests;
