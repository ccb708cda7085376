//! Configuration traits and implementations for buffer sizing and messages.
//!
//! The `ShellConfig` trait allows compile-time configuration of line capacity,
//! argument limits, the prompt and the user-facing report prefixes without
//! runtime overhead.

/// Storage ceiling for the edit buffer. `ShellConfig::MAX_INPUT` may not exceed it.
pub const LINE_STORAGE: usize = 256;

/// Storage ceiling for parsed arguments. `ShellConfig::MAX_ARGS` may not exceed it.
pub const ARG_STORAGE: usize = 32;

/// Default number of descriptors a `Registry` can hold.
pub const DEFAULT_MAX_COMMANDS: usize = 100;

/// Port the TCP transport listens on by default.
pub const DEFAULT_TCP_PORT: u16 = 3030;

/// Shell configuration trait defining capacities and messages.
///
/// All values are const (zero runtime cost).
pub trait ShellConfig {
    /// Edit buffer capacity including the terminator slot (default: 64).
    ///
    /// A submitted line holds at most `MAX_INPUT - 1` bytes.
    const MAX_INPUT: usize;

    /// Maximum number of argument tokens after the command name (default: 8)
    const MAX_ARGS: usize;

    /// Prompt printed after activation, reset and every processed line
    const PROMPT: &'static str;

    /// Prefix for an unresolved command name
    const MSG_UNKNOWN_COMMAND: &'static str = "Unknown command: ";

    /// Prefix for an assignment whose left-hand side is not a parameter
    const MSG_UNKNOWN_PARAMETER: &'static str = "Unknown parameter: ";

    /// Prefix for a line carrying more than `MAX_ARGS` arguments
    const MSG_TOO_MANY_ARGUMENTS: &'static str = "Too many arguments (max ";

    /// Reported when the line is not valid UTF-8
    const MSG_INVALID_INPUT: &'static str = "Invalid input";
}

/// Default configuration matching the classic firmware shell.
///
/// - MAX_INPUT: 64 bytes
/// - MAX_ARGS: 8 arguments
/// - PROMPT: `"$ "`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl ShellConfig for DefaultConfig {
    const MAX_INPUT: usize = 64;
    const MAX_ARGS: usize = 8;
    const PROMPT: &'static str = "$ ";
}

/// Minimal configuration for resource-constrained systems.
///
/// - MAX_INPUT: 32 bytes
/// - MAX_ARGS: 4 arguments
/// - PROMPT: `"$ "`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MinimalConfig;

impl ShellConfig for MinimalConfig {
    const MAX_INPUT: usize = 32;
    const MAX_ARGS: usize = 4;
    const PROMPT: &'static str = "$ ";
}
