//! Repeat-last-line support.
//!
//! Keeps a copy of the most recently submitted line and whether it dispatched
//! successfully. An empty submission after a success replays the copy
//! verbatim, separators included.

use crate::config::LINE_STORAGE;

/// Snapshot of the previous submission.
#[derive(Debug, Default)]
pub struct RepeatEngine {
    last: heapless::Vec<u8, LINE_STORAGE>,
    last_ok: bool,
}

impl RepeatEngine {
    /// Create with no prior line.
    pub const fn new() -> Self {
        Self {
            last: heapless::Vec::new(),
            last_ok: false,
        }
    }

    /// Remember a submitted line and its dispatch outcome.
    pub fn record(&mut self, line: &[u8], ok: bool) {
        self.last.clear();
        let len = line.len().min(LINE_STORAGE);
        // Cannot fail: len is within capacity
        let _ = self.last.extend_from_slice(&line[..len]);
        self.last_ok = ok;
    }

    /// Line to replay for an empty submission, if the last one succeeded.
    pub fn replay(&self) -> Option<&[u8]> {
        if self.last_ok && !self.last.is_empty() {
            Some(&self.last)
        } else {
            None
        }
    }

    /// Whether the previous submission dispatched successfully.
    pub fn last_ok(&self) -> bool {
        self.last_ok
    }

    /// Block replay until the next successful dispatch.
    pub fn invalidate(&mut self) {
        self.last_ok = false;
    }

    /// Forget the previous line entirely.
    pub fn clear(&mut self) {
        self.last.clear();
        self.last_ok = false;
    }
}
