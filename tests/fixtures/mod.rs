//! Test fixtures and utilities for poll-shell testing.
//!
//! Provides:
//! - `MockStream`: in-memory byte stream with a shared handle for the test
//! - `MockListener` / `MockClient`: scripted network transport
//! - `Mode`: enum parameter type using `#[derive(ParamValue)]`
//! - `test_registry()` / `builtin_registry()`: registries with commands and parameters

#![allow(dead_code)]

use poll_shell::{
    ByteStream, CommandMeta, Context, NetClient, NetListener, ParamValue, Parameter, Registry,
    StreamError,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

// ============================================================================
// MockStream - Test Byte Stream
// ============================================================================

#[derive(Debug, Default)]
struct StreamState {
    /// Input queue (simulates the operator typing)
    input: VecDeque<u8>,

    /// Output capture
    output: Vec<u8>,

    /// Make every write fail
    fail_writes: bool,
}

/// In-memory byte stream.
///
/// Clones share the same buffers, so a test keeps one handle while the shell
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MockStream {
    state: Rc<RefCell<StreamState>>,
}

impl MockStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue text as input.
    pub fn push_input(&self, text: &str) {
        self.push_bytes(text.as_bytes());
    }

    /// Queue raw bytes as input.
    pub fn push_bytes(&self, bytes: &[u8]) {
        self.state.borrow_mut().input.extend(bytes.iter().copied());
    }

    /// Captured output as text.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.state.borrow().output).into_owned()
    }

    /// Captured output as raw bytes.
    pub fn output_bytes(&self) -> Vec<u8> {
        self.state.borrow().output.clone()
    }

    /// Return and clear captured output.
    pub fn take_output(&self) -> String {
        let bytes = std::mem::take(&mut self.state.borrow_mut().output);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Clear captured output.
    pub fn clear_output(&self) {
        self.state.borrow_mut().output.clear();
    }

    /// Bytes still queued for reading.
    pub fn pending_input(&self) -> usize {
        self.state.borrow().input.len()
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }
}

impl ByteStream for MockStream {
    fn available(&mut self) -> usize {
        self.state.borrow().input.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.state.borrow_mut().input.pop_front()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(StreamError::WriteFailed);
        }
        state.output.extend_from_slice(bytes);
        Ok(())
    }
}

// ============================================================================
// MockListener / MockClient - Scripted Network Transport
// ============================================================================

#[derive(Debug)]
struct Link {
    connected: Cell<bool>,
    released: Cell<bool>,
}

/// Connection handed to the shell.
///
/// Dropping it marks the connection as released.
#[derive(Debug)]
pub struct MockClient {
    stream: MockStream,
    link: Rc<Link>,
}

impl ByteStream for MockClient {
    fn available(&mut self) -> usize {
        self.stream.available()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.stream.read_byte()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        self.stream.write_bytes(bytes)
    }
}

impl NetClient for MockClient {
    fn connected(&mut self) -> bool {
        self.link.connected.get()
    }
}

impl Drop for MockClient {
    fn drop(&mut self) {
        self.link.released.set(true);
    }
}

/// Test-side view of a connection.
#[derive(Debug, Clone)]
pub struct RemotePeer {
    /// The connection's byte buffers
    pub stream: MockStream,
    link: Rc<Link>,
}

impl RemotePeer {
    /// Close the connection from the remote side.
    pub fn disconnect(&self) {
        self.link.connected.set(false);
    }

    /// Whether the shell has dropped the connection.
    pub fn is_released(&self) -> bool {
        self.link.released.get()
    }
}

/// Listener whose pending connections are queued by the test.
#[derive(Debug, Clone, Default)]
pub struct MockListener {
    pending: Rc<RefCell<VecDeque<MockClient>>>,
}

impl MockListener {
    /// Create a listener with no pending connections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an incoming connection and return the remote end.
    pub fn connect(&self) -> RemotePeer {
        let link = Rc::new(Link {
            connected: Cell::new(true),
            released: Cell::new(false),
        });
        let stream = MockStream::new();
        self.pending.borrow_mut().push_back(MockClient {
            stream: stream.clone(),
            link: Rc::clone(&link),
        });
        RemotePeer { stream, link }
    }
}

impl NetListener for MockListener {
    type Client = MockClient;

    fn accept(&mut self) -> Option<MockClient> {
        self.pending.borrow_mut().pop_front()
    }
}

// ============================================================================
// Test Commands and Parameters
// ============================================================================

/// Enum parameter type.
#[derive(Copy, Clone, Debug, PartialEq, ParamValue)]
pub enum Mode {
    Idle,
    Walk,
    Kick,
}

/// Print the argument count and every argument in brackets.
fn echo_args(ctx: &mut Context<'_>, args: &[&str]) {
    use std::fmt::Write;
    let _ = write!(ctx, "argc={}", args.len());
    for arg in args {
        let _ = write!(ctx, " [{}]", arg);
    }
    ctx.println("");
}

fn status(ctx: &mut Context<'_>, _args: &[&str]) {
    ctx.println("ok");
}

fn silent(_ctx: &mut Context<'_>, _args: &[&str]) {}

/// `echo` printing its arguments (not the echo-mode builtin).
pub const ECHO_ARGS: CommandMeta = CommandMeta {
    name: "echo",
    description: "Print arguments",
    handler: echo_args,
};

/// `status` printing `ok`.
pub const STATUS: CommandMeta = CommandMeta {
    name: "status",
    description: "Report status",
    handler: status,
};

/// `silent` printing nothing.
pub const SILENT: CommandMeta = CommandMeta {
    name: "silent",
    description: "Do nothing",
    handler: silent,
};

/// Registry capacity used by the fixtures.
pub const TEST_CAPACITY: usize = 16;

/// Parameters registered by the fixtures.
#[derive(Debug, Clone, Copy)]
pub struct Params {
    pub gain: &'static Parameter<i32>,
    pub offset: &'static Parameter<f32>,
    pub armed: &'static Parameter<bool>,
    pub mode: &'static Parameter<Mode>,
}

impl Params {
    fn leak() -> Self {
        Self {
            gain: Box::leak(Box::new(Parameter::new("gain", "Controller gain", 10))),
            offset: Box::leak(Box::new(Parameter::new("offset", "Sensor offset", 0.5))),
            armed: Box::leak(Box::new(Parameter::new("armed", "Arming switch", false))),
            mode: Box::leak(Box::new(Parameter::new("mode", "Motion mode", Mode::Idle))),
        }
    }

    fn register(&self, registry: &mut Registry<'static, TEST_CAPACITY>) {
        registry.register_parameter(self.gain).unwrap();
        registry.register_parameter(self.offset).unwrap();
        registry.register_parameter(self.armed).unwrap();
        registry.register_parameter(self.mode).unwrap();
    }
}

/// `echo` (argument printer), `status`, `silent` and the four parameters.
///
/// Leaked so the shell can borrow it for `'static`.
pub fn test_registry() -> (&'static Registry<'static, TEST_CAPACITY>, Params) {
    let params = Params::leak();
    let mut registry = Registry::new();
    registry.register_command(&ECHO_ARGS).unwrap();
    registry.register_command(&STATUS).unwrap();
    registry.register_command(&SILENT).unwrap();
    params.register(&mut registry);
    (Box::leak(Box::new(registry)), params)
}

/// Built-in `help`/`params`/`echo`, `status` and the four parameters.
pub fn builtin_registry() -> (&'static Registry<'static, TEST_CAPACITY>, Params) {
    let params = Params::leak();
    let mut registry = Registry::new();
    registry.register_builtins().unwrap();
    registry.register_command(&STATUS).unwrap();
    params.register(&mut registry);
    (Box::leak(Box::new(registry)), params)
}
