//! Shell engine and command processing.
//!
//! The `Shell` ties the pieces together. Each `tick()` updates the stream
//! selector, then drains the active stream byte by byte through the line
//! editor. A submitted line goes through repeat, tokenize and dispatch, and the
//! prompt is printed again.

use crate::command::{Node, Registry};
use crate::config::{ARG_STORAGE, DefaultConfig, LINE_STORAGE, ShellConfig};
use crate::error::{DispatchError, StreamError};
use crate::io::{ByteStream, NEWLINE, NetListener, NoNetwork};
use crate::selector::StreamSelector;
use core::fmt::Write;
use core::marker::PhantomData;

// Sub-modules
pub mod builtins;
pub mod context;
pub mod dispatch;
pub mod editor;
pub mod repeat;
pub mod tokenizer;

// Re-export key types
pub use context::Context;
pub use editor::{EditEvent, EditState, LineEditor};
pub use repeat::RepeatEngine;
pub use tokenizer::{Tokens, tokenize};

/// Line-oriented command shell.
///
/// Generic over:
/// - `'r`: lifetime of the registry and the descriptors it references
/// - `S`: console stream
/// - `L`: network listener (`NoNetwork` when there is none)
/// - `C`: capacities, prompt and messages
///
/// The shell owns all mutable engine state and must be driven from a single
/// context: call `tick()` periodically, or `run()` with the `async` feature.
pub struct Shell<'r, S, L = NoNetwork, C = DefaultConfig>
where
    S: ByteStream,
    L: NetListener,
    C: ShellConfig,
{
    /// Registered descriptors, read-only after start of day
    nodes: &'r [Node<'r>],

    /// Console and network client selection
    selector: StreamSelector<S, L>,

    /// Line being typed
    editor: LineEditor<LINE_STORAGE>,

    /// Previous line for blank-enter replay
    repeat: RepeatEngine,

    /// Echo typed characters
    echo: bool,

    /// When false, input is discarded
    enabled: bool,

    /// Config type marker (zero-size)
    _config: PhantomData<C>,
}

// ============================================================================
// Debug implementation
// ============================================================================

impl<S, L, C> core::fmt::Debug for Shell<'_, S, L, C>
where
    S: ByteStream,
    L: NetListener,
    C: ShellConfig,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shell")
            .field("commands", &self.nodes.len())
            .field("selector", &self.selector)
            .field("line", &self.editor.line())
            .field("last_ok", &self.repeat.last_ok())
            .field("echo", &self.echo)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

impl<'r, S, L, C> Shell<'r, S, L, C>
where
    S: ByteStream,
    L: NetListener,
    C: ShellConfig,
{
    /// Create a shell over a fully built registry.
    ///
    /// Echo starts on and the shell starts enabled. Nothing is printed until
    /// `activate()`.
    pub fn new<const N: usize>(
        registry: &'r Registry<'_, N>,
        selector: StreamSelector<S, L>,
    ) -> Self {
        const {
            assert!(
                C::MAX_INPUT > 0 && C::MAX_INPUT <= LINE_STORAGE,
                "MAX_INPUT must be between 1 and LINE_STORAGE"
            );
            assert!(C::MAX_ARGS <= ARG_STORAGE, "MAX_ARGS exceeds ARG_STORAGE");
        }

        Self {
            nodes: registry.nodes(),
            selector,
            editor: LineEditor::new(C::MAX_INPUT),
            repeat: RepeatEngine::new(),
            echo: true,
            enabled: true,
            _config: PhantomData,
        }
    }

    /// Print the initial prompt on the active stream.
    pub fn activate(&mut self) -> Result<(), StreamError> {
        log::info!("shell active, {} commands", self.nodes.len());
        self.selector.print(C::PROMPT)
    }

    /// Discard the partial line and the repeat state, then re-prompt.
    pub fn reset(&mut self) -> Result<(), StreamError> {
        self.editor.reset();
        self.repeat.clear();
        self.selector.print(C::PROMPT)
    }

    /// Resume processing input. Blank-enter replay stays off until the next
    /// successful command.
    pub fn enable(&mut self) {
        self.enabled = true;
        self.repeat.invalidate();
    }

    /// Stop processing input; bytes arriving meanwhile are discarded.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Whether input is processed.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether typed characters are echoed.
    pub fn echo(&self) -> bool {
        self.echo
    }

    /// Enable or disable character echo.
    pub fn set_echo(&mut self, enabled: bool) {
        self.echo = enabled;
    }

    /// The stream selector, which writes to the active stream.
    ///
    /// Host code prints through this between ticks.
    pub fn stream(&mut self) -> &mut StreamSelector<S, L> {
        &mut self.selector
    }

    /// Read-only view of the stream selector.
    pub fn selector(&self) -> &StreamSelector<S, L> {
        &self.selector
    }

    /// Registered descriptors in registry order.
    pub fn commands(&self) -> &'r [Node<'r>] {
        self.nodes
    }

    /// The line typed so far.
    pub fn line(&self) -> &[u8] {
        self.editor.line()
    }

    /// Whether the last submitted line dispatched successfully.
    pub fn last_succeeded(&self) -> bool {
        self.repeat.last_ok()
    }

    /// Print every parameter as `name=value` on the active stream.
    pub fn show_all_parameters(&mut self) -> Result<(), StreamError> {
        let mut ctx = Context::new(&mut self.selector, self.nodes, &mut self.echo);
        ctx.show_all_parameters();
        ctx.finish()
    }
}

// ============================================================================
// Input processing
// ============================================================================

impl<'r, S, L, C> Shell<'r, S, L, C>
where
    S: ByteStream,
    L: NetListener,
    C: ShellConfig,
{
    /// Run one poll cycle.
    ///
    /// Updates stream selection, then processes every byte available on the
    /// active stream. Returns an error only when writing to the console fails.
    pub fn tick(&mut self) -> Result<(), StreamError> {
        let connected = self.selector.update();

        if !self.enabled {
            self.discard_input();
            return Ok(());
        }

        if connected {
            self.selector.print(C::PROMPT)?;
        }

        while self.selector.available() > 0 {
            let Some(byte) = self.selector.read_byte() else {
                break;
            };
            self.process_byte(byte)?;
        }

        Ok(())
    }

    /// Feed one input byte as if it had arrived on the active stream.
    pub fn process_byte(&mut self, byte: u8) -> Result<(), StreamError> {
        match self.editor.feed(byte) {
            EditEvent::None => Ok(()),

            EditEvent::Echo(byte) => {
                if self.echo {
                    self.selector.write_bytes(&[byte])
                } else {
                    Ok(())
                }
            }

            // Shown regardless of echo
            EditEvent::Erase => self.selector.print(editor::ERASE_SEQUENCE),

            EditEvent::Submit => self.submit(),
        }
    }

    fn discard_input(&mut self) {
        while self.selector.available() > 0 {
            if self.selector.read_byte().is_none() {
                break;
            }
        }
    }

    /// Handle a terminated line: replay, run, remember, re-prompt.
    fn submit(&mut self) -> Result<(), StreamError> {
        if self.editor.is_empty()
            && let Some(previous) = self.repeat.replay()
        {
            self.editor.load(previous);
        }

        let result = self.selector.print(NEWLINE).and_then(|()| self.run_line());

        self.repeat.record(self.editor.line(), matches!(result, Ok(true)));
        self.editor.clear();

        result?;
        self.selector.print(C::PROMPT)
    }

    /// Tokenize and dispatch the current line.
    ///
    /// Returns whether a handler ran.
    fn run_line(&mut self) -> Result<bool, StreamError> {
        let Self {
            nodes,
            selector,
            editor,
            echo,
            ..
        } = self;

        if editor.line().is_empty() {
            return Ok(false);
        }

        let tokens = match tokenize(editor.line(), C::MAX_ARGS) {
            Ok(tokens) => tokens,
            Err(e) => {
                log::debug!("rejected line: {}", e);
                Self::report(selector, &e)?;
                return Ok(false);
            }
        };

        // A leading space leaves no name to resolve; report the line as typed
        let outcome = if tokens.name.is_empty() {
            Err(DispatchError::UnknownCommand(tokens.line))
        } else {
            let mut ctx = Context::new(&mut *selector, *nodes, &mut *echo);
            let outcome = dispatch::execute(&mut ctx, tokens.name, &tokens.args);
            ctx.finish()?;
            outcome
        };

        match outcome {
            Ok(()) => Ok(true),
            Err(e) => {
                log::debug!("dispatch failed: {}", e);
                Self::report(selector, &e)?;
                Ok(false)
            }
        }
    }

    /// Turn a dispatch error into user-visible text.
    fn report(
        out: &mut StreamSelector<S, L>,
        error: &DispatchError<'_>,
    ) -> Result<(), StreamError> {
        match error {
            DispatchError::UnknownCommand(name) => {
                out.print(C::MSG_UNKNOWN_COMMAND)?;
                out.println(name)
            }
            DispatchError::UnknownParameter(name) => {
                out.print(C::MSG_UNKNOWN_PARAMETER)?;
                out.println(name)
            }
            DispatchError::TooManyArguments { max } => {
                let mut digits: heapless::String<20> = heapless::String::new();
                let _ = write!(digits, "{}", max);
                out.print(C::MSG_TOO_MANY_ARGUMENTS)?;
                out.print(&digits)?;
                out.println(")")
            }
            DispatchError::InvalidInput => out.println(C::MSG_INVALID_INPUT),
        }
    }
}

// ============================================================================
// Background polling (async)
// ============================================================================

#[cfg(feature = "async")]
impl<'r, S, L, C> Shell<'r, S, L, C>
where
    S: ByteStream,
    L: NetListener,
    C: ShellConfig,
{
    /// Poll forever: `tick()`, then await `pause()` to yield to the host.
    ///
    /// Returns only when a console write fails, with that error.
    ///
    /// ```rust,ignore
    /// let error = shell
    ///     .run(|| embassy_time::Timer::after_millis(10))
    ///     .await;
    /// ```
    pub async fn run<F, Fut>(&mut self, mut pause: F) -> StreamError
    where
        F: FnMut() -> Fut,
        Fut: core::future::Future<Output = ()>,
    {
        loop {
            if let Err(e) = self.tick() {
                log::warn!("shell stopped: {}", e);
                return e;
            }
            pause().await;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
