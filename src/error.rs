//! Error types for registration, dispatch and stream I/O.
//!
//! Every error is local: registration errors surface at start of day,
//! dispatch errors are turned into user-visible text by the shell, and
//! stream errors are handled by the stream selector or returned from `tick()`.

use core::fmt;

/// Byte-stream error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Write could not be completed
    WriteFailed,

    /// Peer is gone (network client closed the connection)
    Disconnected,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::WriteFailed => write!(f, "Write failed"),
            StreamError::Disconnected => write!(f, "Disconnected"),
        }
    }
}

/// Start-of-day registration error.
///
/// These indicate a build-time misconfiguration and should abort initialization.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Registry already holds `capacity` descriptors
    Full {
        /// Fixed registry capacity
        capacity: usize,
    },

    /// Another descriptor is registered under the same name
    DuplicateName,

    /// Descriptor name is empty
    EmptyName,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Full { capacity } => {
                write!(f, "Registry full ({} commands)", capacity)
            }
            RegistryError::DuplicateName => write!(f, "Duplicate command name"),
            RegistryError::EmptyName => write!(f, "Empty command name"),
        }
    }
}

/// Failure to resolve or tokenize a submitted line.
///
/// Borrows the offending name from the line so it can be echoed back.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DispatchError<'a> {
    /// Name not registered and not an assignment
    UnknownCommand(&'a str),

    /// Assignment whose left-hand side is not a registered parameter
    UnknownParameter(&'a str),

    /// More argument tokens than the configured maximum
    TooManyArguments {
        /// Configured maximum
        max: usize,
    },

    /// Line is not valid UTF-8
    InvalidInput,
}

impl fmt::Display for DispatchError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::UnknownCommand(name) => write!(f, "Unknown command: {}", name),
            DispatchError::UnknownParameter(name) => write!(f, "Unknown parameter: {}", name),
            DispatchError::TooManyArguments { max } => {
                write!(f, "Too many arguments (max {})", max)
            }
            DispatchError::InvalidInput => write!(f, "Invalid input"),
        }
    }
}
