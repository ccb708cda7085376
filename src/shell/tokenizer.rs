//! Line tokenizer.
//!
//! Splits a submitted line on single spaces into a command name and its
//! arguments. Consecutive spaces are not coalesced, so empty tokens are
//! possible and are passed through to the handler. The line is borrowed, not
//! rewritten, so the same bytes can be replayed later.

use crate::config::ARG_STORAGE;
use crate::error::DispatchError;

/// Argument separator.
pub const SEPARATOR: char = ' ';

/// A tokenized line borrowing from the edit buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'l> {
    /// The whole line as typed
    pub line: &'l str,

    /// First token (may be empty for a blank line or a leading space)
    pub name: &'l str,

    /// Remaining tokens in order
    pub args: heapless::Vec<&'l str, ARG_STORAGE>,
}

/// Split `line` into name and arguments.
///
/// Returns `TooManyArguments` when more than `max_args` arguments follow the
/// name (`max_args` is capped at `ARG_STORAGE`), and `InvalidInput` when the
/// line is not UTF-8.
///
/// # Examples
///
/// ```rust,ignore
/// let tokens = tokenize(b"echo hello world", 8)?;
/// assert_eq!(tokens.name, "echo");
/// assert_eq!(tokens.args.as_slice(), &["hello", "world"]);
/// ```
pub fn tokenize(line: &[u8], max_args: usize) -> Result<Tokens<'_>, DispatchError<'_>> {
    let line = core::str::from_utf8(line).map_err(|_| DispatchError::InvalidInput)?;
    let max = max_args.min(ARG_STORAGE);

    let mut parts = line.split(SEPARATOR);
    let name = parts.next().unwrap_or("");

    let mut args = heapless::Vec::new();
    for part in parts {
        if args.len() >= max {
            return Err(DispatchError::TooManyArguments { max });
        }
        args.push(part).map_err(|_| DispatchError::TooManyArguments { max })?;
    }

    Ok(Tokens { line, name, args })
}
