//! Line editor for raw terminal bytes.
//!
//! Byte-at-a-time state machine maintaining the edit buffer. It handles line
//! termination, DEL backspace, and swallows three-byte escape sequences
//! (arrow keys and the like) so they never reach the buffer.
//!
//! This is a pure editor - it performs no I/O. The shell turns the returned
//! `EditEvent` into echo, erase and dispatch.

/// Null byte, ignored as line noise
pub const NUL: u8 = 0x00;

/// Idle-line byte some UARTs deliver, ignored as line noise
pub const NOISE: u8 = 0xFF;

/// Carriage return
pub const CR: u8 = b'\r';

/// Line feed
pub const LF: u8 = b'\n';

/// DEL, sent by the backspace key
pub const DEL: u8 = 0x7F;

/// Escape, first byte of a three-byte sequence
pub const ESC: u8 = 0x1B;

/// Bytes following ESC that are discarded without validation.
pub const ESCAPE_TAIL: u8 = 2;

/// Visual erase: move back, blank, move back.
pub const ERASE_SEQUENCE: &str = "\x08 \x08";

/// Editor state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditState {
    /// Normal input mode
    Accumulating,

    /// Inside an escape sequence, `remaining` bytes still to discard
    Escape {
        /// Bytes left to swallow
        remaining: u8,
    },
}

/// Outcome of feeding one byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditEvent {
    /// Nothing visible happened
    None,

    /// Printable byte; echo it if echo is on
    Echo(u8),

    /// Last byte removed; emit the erase sequence
    Erase,

    /// Line terminated; hand the buffer to the dispatcher
    Submit,
}

/// Fixed-capacity edit buffer with a write cursor.
///
/// `N` is the storage size; `capacity` (at most `N`) includes one terminator
/// slot, so a line holds at most `capacity - 1` bytes. Input beyond that is
/// silently dropped.
#[derive(Debug)]
pub struct LineEditor<const N: usize> {
    buffer: [u8; N],
    cursor: usize,
    limit: usize,
    state: EditState,
    after_cr: bool,
}

impl<const N: usize> LineEditor<N> {
    /// Create an empty editor holding lines of up to `capacity - 1` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: [0; N],
            cursor: 0,
            limit: capacity.clamp(1, N) - 1,
            state: EditState::Accumulating,
            after_cr: false,
        }
    }

    /// Feed one byte and report what happened.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let mut editor = LineEditor::<64>::new(64);
    /// assert_eq!(editor.feed(b'h'), EditEvent::Echo(b'h'));
    /// assert_eq!(editor.feed(0x7f), EditEvent::Erase);
    /// assert_eq!(editor.feed(b'\r'), EditEvent::Submit);
    /// ```
    pub fn feed(&mut self, byte: u8) -> EditEvent {
        let after_cr = core::mem::replace(&mut self.after_cr, false);

        match self.state {
            EditState::Escape { remaining } => {
                self.state = if remaining > 1 {
                    EditState::Escape {
                        remaining: remaining - 1,
                    }
                } else {
                    EditState::Accumulating
                };
                EditEvent::None
            }
            EditState::Accumulating => self.feed_normal(byte, after_cr),
        }
    }

    fn feed_normal(&mut self, byte: u8, after_cr: bool) -> EditEvent {
        match byte {
            NUL | NOISE => EditEvent::None,

            // CR LF is a single terminator
            LF if after_cr => EditEvent::None,

            CR => {
                self.after_cr = true;
                EditEvent::Submit
            }

            LF => EditEvent::Submit,

            DEL => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    EditEvent::Erase
                } else {
                    EditEvent::None
                }
            }

            ESC => {
                self.state = EditState::Escape {
                    remaining: ESCAPE_TAIL,
                };
                EditEvent::None
            }

            _ => {
                if let Some(slot) = self.buffer.get_mut(self.cursor)
                    && self.cursor < self.limit
                {
                    *slot = byte;
                    self.cursor += 1;
                }
                EditEvent::Echo(byte)
            }
        }
    }

    /// The line typed so far.
    pub fn line(&self) -> &[u8] {
        &self.buffer[..self.cursor]
    }

    /// Current write offset (line length).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Maximum line length in bytes.
    pub fn max_len(&self) -> usize {
        self.limit
    }

    /// Replace the buffer contents (truncated to the line limit).
    pub fn load(&mut self, line: &[u8]) {
        let len = line.len().min(self.limit);
        self.buffer[..len].copy_from_slice(&line[..len]);
        self.cursor = len;
    }

    /// Empty the line after a submission.
    ///
    /// Terminator tracking survives, so the LF of a CR LF pair is still
    /// swallowed.
    pub fn clear(&mut self) {
        self.cursor = 0;
    }

    /// Back to the initial state, leaving any escape sequence.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.state = EditState::Accumulating;
        self.after_cr = false;
    }

    /// Current editor state.
    pub fn state(&self) -> EditState {
        self.state
    }
}
