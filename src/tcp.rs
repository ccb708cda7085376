//! TCP network transport (requires `std`).
//!
//! `TcpShellListener` accepts connections without blocking and hands them out
//! as `TcpClient`s. A client buffers received bytes so `available()` can be
//! answered without blocking, and notices a peer close on the next read.
//! Output the socket cannot take yet is queued and sent on later polls.

use crate::config::DEFAULT_TCP_PORT;
use crate::error::StreamError;
use crate::io::{ByteStream, NetClient, NetListener};
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

/// Receive buffer size per client.
pub const RX_BUFFER: usize = 256;

/// Transmit queue size per client.
pub const TX_BUFFER: usize = 2048;

/// Non-blocking TCP listener.
#[derive(Debug)]
pub struct TcpShellListener {
    listener: TcpListener,
}

impl TcpShellListener {
    /// Listen on all interfaces at `DEFAULT_TCP_PORT`.
    pub fn bind_default() -> io::Result<Self> {
        Self::bind(DEFAULT_TCP_PORT)
    }

    /// Listen on all interfaces at `port`.
    pub fn bind(port: u16) -> io::Result<Self> {
        Self::bind_addr(("0.0.0.0", port))
    }

    /// Listen on an explicit address (port 0 picks a free port).
    pub fn bind_addr<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        log::info!("shell listening on {}", listener.local_addr()?);
        Ok(Self { listener })
    }

    /// Address actually bound.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl NetListener for TcpShellListener {
    type Client = TcpClient;

    fn accept(&mut self) -> Option<TcpClient> {
        match self.listener.accept() {
            Ok((stream, peer)) => {
                if let Err(e) = stream.set_nonblocking(true) {
                    log::warn!("rejecting {}: {}", peer, e);
                    return None;
                }
                let _ = stream.set_nodelay(true);
                log::info!("accepted connection from {}", peer);
                Some(TcpClient::new(stream))
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => None,
            Err(e) => {
                log::warn!("accept failed: {}", e);
                None
            }
        }
    }
}

/// Accepted TCP connection.
#[derive(Debug)]
pub struct TcpClient {
    stream: TcpStream,
    rx: heapless::Deque<u8, RX_BUFFER>,
    tx: TxQueue,
    open: bool,
}

impl TcpClient {
    /// Wrap a connected, non-blocking stream.
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            rx: heapless::Deque::new(),
            tx: TxQueue::new(),
            open: true,
        }
    }

    /// Pull whatever the socket has into the receive buffer.
    fn fill(&mut self) {
        if !self.open {
            return;
        }

        if let Err(e) = self.tx.flush(&mut self.stream) {
            log::debug!("flush failed: {}", e);
            self.open = false;
            return;
        }

        let space = RX_BUFFER - self.rx.len();
        if space == 0 {
            return;
        }

        let mut chunk = [0u8; RX_BUFFER];
        match self.stream.read(&mut chunk[..space]) {
            Ok(0) => {
                log::info!("peer closed connection");
                self.open = false;
            }
            Ok(n) => {
                for &byte in &chunk[..n] {
                    // Cannot fail: n <= space
                    let _ = self.rx.push_back(byte);
                }
            }
            Err(e)
                if e.kind() == io::ErrorKind::WouldBlock
                    || e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => {
                log::debug!("read failed: {}", e);
                self.open = false;
            }
        }
    }
}

impl ByteStream for TcpClient {
    fn available(&mut self) -> usize {
        self.fill();
        self.rx.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.rx.is_empty() {
            self.fill();
        }
        self.rx.pop_front()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        if !self.open {
            return Err(StreamError::Disconnected);
        }
        self.tx.send(&mut self.stream, bytes).map_err(|e| {
            log::debug!("write failed: {}", e);
            StreamError::WriteFailed
        })
    }
}

impl NetClient for TcpClient {
    /// Still connected, or closed with unread bytes left.
    fn connected(&mut self) -> bool {
        self.fill();
        self.open || !self.rx.is_empty()
    }
}

/// Output waiting for room in the socket's send buffer.
#[derive(Debug)]
struct TxQueue {
    pending: heapless::Deque<u8, TX_BUFFER>,
}

impl TxQueue {
    const fn new() -> Self {
        Self {
            pending: heapless::Deque::new(),
        }
    }

    /// Push queued bytes out until the writer would block.
    fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        while !self.pending.is_empty() {
            let (front, _) = self.pending.as_slices();
            match out.write(front) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => {
                    for _ in 0..n {
                        self.pending.pop_front();
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Write `bytes` behind anything already queued, queueing what the
    /// writer does not take now. Fails only on a hard error or a full queue.
    fn send<W: Write>(&mut self, out: &mut W, bytes: &[u8]) -> io::Result<()> {
        self.flush(out)?;

        let mut rest = bytes;
        while self.pending.is_empty() && !rest.is_empty() {
            match out.write(rest) {
                Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
                Ok(n) => rest = &rest[n..],
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }

        if rest.len() > TX_BUFFER - self.pending.len() {
            return Err(io::Error::other("transmit queue full"));
        }
        for &byte in rest {
            // Cannot fail: room checked above
            let _ = self.pending.push_back(byte);
        }
        Ok(())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.pending.len()
    }
}
