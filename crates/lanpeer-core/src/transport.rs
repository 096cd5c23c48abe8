//! Multicast datagram transport.
//!
//! Uses SO_REUSEADDR (and SO_REUSEPORT on unix) so several local
//! participants can share the discovery port. Multicast loopback is
//! disabled: a sender never receives its own group transmissions.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tokio::time::timeout;

use crate::error::TransportError;

/// Outcome of one bounded receive.
#[derive(Debug)]
pub enum RecvOutcome {
    /// One datagram arrived.
    Received {
        payload: Vec<u8>,
        source: SocketAddr,
    },
    /// Nothing arrived within the wait. Expected steady-state, not an error.
    TimedOut,
}

/// Multicast-capable UDP endpoint.
pub struct MulticastTransport {
    socket: Option<UdpSocket>,
    group_addr: SocketAddrV4,
    buf: Vec<u8>,
}

impl MulticastTransport {
    /// Open the endpoint: bind the wildcard address on `port` and join
    /// `group` on all local interfaces.
    ///
    /// Fails with [`TransportError::Open`] if the bind or the group join
    /// fails (port in use, no multicast-capable interface, non-multicast
    /// group address).
    pub fn open(group: Ipv4Addr, port: u16, buffer_size: usize) -> Result<Self, TransportError> {
        let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
        let open_err = |source: io::Error| TransportError::Open {
            addr: bind_addr,
            source,
        };

        if !group.is_multicast() {
            return Err(open_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a multicast address", group),
            )));
        }

        let socket = create_group_socket(group, bind_addr).map_err(open_err)?;
        let socket = UdpSocket::from_std(socket).map_err(open_err)?;

        Ok(Self {
            socket: Some(socket),
            group_addr: SocketAddrV4::new(group, port),
            buf: vec![0u8; buffer_size],
        })
    }

    /// The group/port this transport announces to.
    pub fn group_addr(&self) -> SocketAddrV4 {
        self.group_addr
    }

    /// Local address of the underlying socket.
    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        let socket = self.socket.as_ref().ok_or(TransportError::Closed)?;
        socket.local_addr().map_err(TransportError::Recv)
    }

    /// Send `payload` to the multicast group. Best-effort, no delivery
    /// guarantee.
    pub async fn send_group(&self, payload: &[u8]) -> Result<(), TransportError> {
        self.send_unicast(payload, SocketAddr::V4(self.group_addr))
            .await
    }

    /// Send `payload` to one specific peer address.
    pub async fn send_unicast(
        &self,
        payload: &[u8],
        dest: SocketAddr,
    ) -> Result<(), TransportError> {
        let socket = self.socket.as_ref().ok_or(TransportError::Closed)?;
        socket
            .send_to(payload, dest)
            .await
            .map_err(|source| TransportError::Send { dest, source })?;
        Ok(())
    }

    /// Block up to `wait` for one inbound datagram.
    pub async fn recv(&mut self, wait: Duration) -> Result<RecvOutcome, TransportError> {
        let socket = self.socket.as_ref().ok_or(TransportError::Closed)?;
        match timeout(wait, socket.recv_from(&mut self.buf)).await {
            Ok(Ok((len, source))) => Ok(RecvOutcome::Received {
                payload: self.buf[..len].to_vec(),
                source,
            }),
            Ok(Err(source)) => Err(TransportError::Recv(source)),
            Err(_) => Ok(RecvOutcome::TimedOut),
        }
    }

    /// Leave the group and release the endpoint. Closing a closed transport
    /// is a no-op.
    pub fn close(&mut self) {
        if let Some(socket) = self.socket.take() {
            let _ = socket.leave_multicast_v4(*self.group_addr.ip(), Ipv4Addr::UNSPECIFIED);
        }
    }

    /// Whether the endpoint has been closed.
    pub fn is_closed(&self) -> bool {
        self.socket.is_none()
    }
}

impl Drop for MulticastTransport {
    fn drop(&mut self) {
        self.close();
    }
}

/// socket2 setup shared by every open: reuse flags, loopback off, wildcard
/// bind, group join on all interfaces, nonblocking for tokio.
fn create_group_socket(group: Ipv4Addr, bind_addr: SocketAddr) -> io::Result<std::net::UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;

    socket.set_reuse_address(true)?;

    #[cfg(unix)]
    socket.set_reuse_port(true)?;

    socket.set_multicast_loop_v4(false)?;

    socket.bind(&bind_addr.into())?;

    socket.join_multicast_v4(&group, &Ipv4Addr::UNSPECIFIED)?;

    socket.set_nonblocking(true)?;

    Ok(socket.into())
}
