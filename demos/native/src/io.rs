//! Terminal console for the native demo.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use poll_shell::{ByteStream, StreamError};
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

// =============================================================================
// Terminal Raw Mode Guard
// =============================================================================

/// RAII guard that enables raw terminal mode on creation and restores on drop.
///
/// Raw mode hands every key press to the shell unprocessed: no local echo,
/// no line buffering, and arrow keys arrive as escape sequences.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

// =============================================================================
// Console Stream
// =============================================================================

/// Stdin/stdout console.
///
/// Stdin is read on a helper thread so `available()` never blocks the poll
/// loop; received bytes are queued until the shell reads them.
pub struct StdioConsole {
    rx: Receiver<u8>,
    pending: VecDeque<u8>,
    stdout: io::Stdout,
}

impl StdioConsole {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut stdin = io::stdin().lock();
            let mut buf = [0u8; 64];
            loop {
                match stdin.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => {
                        for &byte in &buf[..n] {
                            if tx.send(byte).is_err() {
                                return;
                            }
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => {
                        log::warn!("stdin closed: {}", e);
                        break;
                    }
                }
            }
        });

        Self {
            rx,
            pending: VecDeque::new(),
            stdout: io::stdout(),
        }
    }

    fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(byte) => self.pending.push_back(byte),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }
}

impl ByteStream for StdioConsole {
    fn available(&mut self) -> usize {
        self.drain();
        self.pending.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.pending.is_empty() {
            self.drain();
        }
        self.pending.pop_front()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        let mut out = self.stdout.lock();
        out.write_all(bytes)
            .and_then(|()| out.flush())
            .map_err(|_| StreamError::WriteFailed)
    }
}
