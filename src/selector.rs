//! Active stream selection.
//!
//! Tracks the local console and at most one network client and decides which
//! of them the shell talks to. Evaluated once per poll cycle:
//!
//! 1. Console data while the console is not active preempts: the console
//!    becomes active and any network client is released.
//! 2. On a new connection, or when the held client has disconnected, the
//!    held client is released (and deactivated if it was active).
//! 3. A new connection becomes the active stream.
//!
//! The selector is itself a `ByteStream` that forwards to whichever stream is
//! active. A write failure on the network client releases the client; a write
//! failure on the console is returned to the caller.

use crate::error::StreamError;
use crate::io::{ByteStream, NetClient, NetListener, NoNetwork};

/// Which stream is active.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Active {
    /// Nothing to read from or write to
    None,

    /// Local console
    Console,

    /// Network client
    Client,
}

/// Console plus optional network transport.
pub struct StreamSelector<S, L = NoNetwork>
where
    S: ByteStream,
    L: NetListener,
{
    console: S,
    listener: L,
    client: Option<L::Client>,
    active: Active,
}

impl<S: ByteStream> StreamSelector<S, NoNetwork> {
    /// Console only; the console is active immediately and stays active.
    pub fn console_only(console: S) -> Self {
        Self {
            console,
            listener: NoNetwork,
            client: None,
            active: Active::Console,
        }
    }
}

impl<S, L> StreamSelector<S, L>
where
    S: ByteStream,
    L: NetListener,
{
    /// Console plus network listener.
    ///
    /// Nothing is active until the console produces data or a client connects.
    pub fn with_network(console: S, listener: L) -> Self {
        Self {
            console,
            listener,
            client: None,
            active: Active::None,
        }
    }

    /// Run the selection rules once.
    ///
    /// Returns `true` when a new network client was accepted and made active.
    pub fn update(&mut self) -> bool {
        if self.active != Active::Console && self.console.available() > 0 {
            if self.client.is_some() {
                log::debug!("console input preempts network client");
            }
            log::info!("switching to console");
            self.active = Active::Console;
            self.release_client();
        }

        let incoming = self.listener.accept();

        let stale = match self.client.as_mut() {
            Some(client) => !client.connected(),
            None => false,
        };

        if incoming.is_some() || stale {
            self.release_client();
        }

        match incoming {
            Some(client) => {
                log::info!("network client connected");
                self.client = Some(client);
                self.active = Active::Client;
                true
            }
            None => false,
        }
    }

    /// Which stream is active.
    pub fn active(&self) -> Active {
        self.active
    }

    /// Whether a network client is held (active or not).
    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// The console stream.
    pub fn console(&self) -> &S {
        &self.console
    }

    /// Mutable access to the console stream.
    pub fn console_mut(&mut self) -> &mut S {
        &mut self.console
    }

    /// The network listener.
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Mutable access to the network listener.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// The active stream, if any.
    pub fn active_mut(&mut self) -> Option<&mut dyn ByteStream> {
        match self.active {
            Active::None => None,
            Active::Console => Some(&mut self.console),
            Active::Client => match self.client.as_mut() {
                Some(client) => Some(client),
                None => None,
            },
        }
    }

    /// Drop the network client; deactivate it if it was active.
    pub fn release_client(&mut self) {
        if self.client.take().is_some() {
            log::info!("network client released");
        }
        if self.active == Active::Client {
            self.active = Active::None;
        }
    }
}

impl<S, L> core::fmt::Debug for StreamSelector<S, L>
where
    S: ByteStream,
    L: NetListener,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StreamSelector")
            .field("active", &self.active)
            .field("has_client", &self.client.is_some())
            .finish_non_exhaustive()
    }
}

impl<S, L> ByteStream for StreamSelector<S, L>
where
    S: ByteStream,
    L: NetListener,
{
    fn available(&mut self) -> usize {
        self.active_mut().map_or(0, |stream| stream.available())
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.active_mut()?.read_byte()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        match self.active {
            Active::None => Ok(()),
            Active::Console => self.console.write_bytes(bytes),
            Active::Client => {
                let result = match self.client.as_mut() {
                    Some(client) => client.write_bytes(bytes),
                    None => Ok(()),
                };
                if let Err(e) = result {
                    log::debug!("write to network client failed: {}", e);
                    self.release_client();
                }
                Ok(())
            }
        }
    }
}
