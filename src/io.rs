//! Byte-stream and network transport abstractions.
//!
//! The shell reads from and writes to whichever `ByteStream` is currently
//! active. A local console and a network-accepted client are interchangeable
//! behind this trait; the `NetListener`/`NetClient` pair describes the optional
//! network transport.
//!
//! All operations are non-blocking from the shell's point of view: `available()`
//! is checked before every `read_byte()`.

use crate::error::StreamError;

/// Line terminator written by `println`.
pub const NEWLINE: &str = "\r\n";

/// Platform-agnostic byte stream.
///
/// Implementations must buffer output internally. Writes MUST NOT block
/// indefinitely.
pub trait ByteStream {
    /// Number of bytes that can be read without blocking.
    fn available(&mut self) -> usize;

    /// Read one byte, or `None` if nothing is buffered.
    fn read_byte(&mut self) -> Option<u8>;

    /// Write raw bytes to the output side.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), StreamError>;

    /// Write text.
    ///
    /// Default implementation forwards to `write_bytes()`.
    fn print(&mut self, text: &str) -> Result<(), StreamError> {
        self.write_bytes(text.as_bytes())
    }

    /// Write text followed by `\r\n`.
    fn println(&mut self, text: &str) -> Result<(), StreamError> {
        self.print(text)?;
        self.print(NEWLINE)
    }
}

/// A connection accepted by a `NetListener`.
pub trait NetClient: ByteStream {
    /// Whether the peer is still connected.
    fn connected(&mut self) -> bool;
}

/// Listener accepting at most one new connection per call.
pub trait NetListener {
    /// Connection type handed out by `accept()`
    type Client: NetClient;

    /// Non-blocking accept. Returns `None` when no connection is pending.
    fn accept(&mut self) -> Option<Self::Client>;
}

/// Listener used when no network transport is configured.
///
/// Never yields a connection, so the console stays the only stream.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NoNetwork;

/// Client type of `NoNetwork`. Uninhabited.
#[derive(Debug)]
pub enum NoClient {}

impl ByteStream for NoClient {
    fn available(&mut self) -> usize {
        match *self {}
    }

    fn read_byte(&mut self) -> Option<u8> {
        match *self {}
    }

    fn write_bytes(&mut self, _bytes: &[u8]) -> Result<(), StreamError> {
        match *self {}
    }
}

impl NetClient for NoClient {
    fn connected(&mut self) -> bool {
        match *self {}
    }
}

impl NetListener for NoNetwork {
    type Client = NoClient;

    fn accept(&mut self) -> Option<NoClient> {
        None
    }
}
