//! # poll-shell
//!
//! Polled, line-oriented command shell for embedded systems with zero heap
//! allocation.
//!
//! **Key features:**
//! - **Static allocation** - Bounded `heapless` buffers, no allocator needed
//! - **Runtime parameters** - `gain=2.5` assigns, `gain` prints the value
//! - **Stream failover** - Local console preempts a network client
//! - **Blank-enter repeat** - An empty line re-runs the last successful command
//! - **Flexible I/O** - Platform-agnostic byte-stream trait
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Parameters are statics the rest of the firmware can read
//! static GAIN: Parameter<f32> = Parameter::new("gain", "Controller gain", 1.0);
//!
//! let mut registry: Registry<'_> = Registry::new();
//! registry.register_builtins()?;
//! registry.register_command(&STATUS)?;
//! registry.register_parameter(&GAIN)?;
//!
//! let mut shell: Shell<'_, Uart> = Shell::new(&registry, StreamSelector::console_only(uart));
//! shell.activate()?;
//! loop {
//!     shell.tick()?;
//!     delay_ms(10);
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `std` - TCP network transport over `std::net`
//! - `async` - `Shell::run()` background polling loop
//!
//! The library provides a `#[derive(ParamValue)]` macro that's always available.
//!
//! This library is `no_std` compatible. Parameters need a `critical-section`
//! implementation: enable `std` on hosted targets, or the one provided by the
//! target's HAL (for example `cortex-m/critical-section-single-core`).

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

#[cfg(feature = "std")]
extern crate std;

// Lets the derive macro's `::poll_shell` paths resolve inside this crate
extern crate self as poll_shell;

// Re-export derive macro (always available)
pub use poll_shell_macros::ParamValue;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod command;
pub mod config;
pub mod error;
pub mod io;
pub mod selector;
pub mod shell;

#[cfg(feature = "std")]
pub mod tcp;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Core I/O
pub use io::{ByteStream, NetClient, NetListener, NoNetwork};

// Configuration
pub use config::{DefaultConfig, MinimalConfig, ShellConfig};

// Error types
pub use error::{DispatchError, RegistryError, StreamError};

// Descriptors and registry
pub use command::{
    CommandFn, CommandMeta, Node, ParamValue, Parameter, ParameterHandle, Registry,
};

// Engine
pub use selector::{Active, StreamSelector};
pub use shell::{Context, Shell};

#[cfg(feature = "std")]
pub use tcp::{TcpClient, TcpShellListener};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
