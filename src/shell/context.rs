//! Handler execution context.
//!
//! Gives command handlers access to the active stream, the registry and the
//! echo setting for the duration of one dispatch.

use crate::command::registry::{self, Matching};
use crate::command::Node;
use crate::error::StreamError;
use crate::io::ByteStream;
use core::fmt;

/// Context passed to every handler.
///
/// Output helpers never fail from the handler's point of view: the first write
/// error is latched and reported back to the shell when dispatch completes.
pub struct Context<'s> {
    out: &'s mut dyn ByteStream,
    nodes: &'s [Node<'s>],
    echo: &'s mut bool,
    error: Option<StreamError>,
}

impl<'s> Context<'s> {
    /// Context writing to `out`, resolving names against `nodes`.
    ///
    /// The shell builds one per dispatch. Host code can build one over any
    /// `ByteStream` to drive a handler directly, for example in its own tests:
    ///
    /// ```rust,ignore
    /// let mut echo = true;
    /// let mut ctx = Context::new(&mut uart, registry.nodes(), &mut echo);
    /// status(&mut ctx, &[]);
    /// ctx.finish()?;
    /// ```
    pub fn new(
        out: &'s mut dyn ByteStream,
        nodes: &'s [Node<'s>],
        echo: &'s mut bool,
    ) -> Self {
        Self {
            out,
            nodes,
            echo,
            error: None,
        }
    }

    /// Write text to the active stream.
    pub fn print(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    /// Write text followed by `\r\n`.
    pub fn println(&mut self, text: &str) {
        self.print(text);
        self.print(crate::io::NEWLINE);
    }

    /// Write raw bytes to the active stream.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_bytes(bytes) {
            self.error = Some(e);
        }
    }

    /// Direct access to the active stream.
    pub fn stream(&mut self) -> &mut dyn ByteStream {
        &mut *self.out
    }

    /// All registered descriptors in registry order.
    pub fn commands(&self) -> &'s [Node<'s>] {
        self.nodes
    }

    /// Look up a descriptor by exact name.
    pub fn find(&self, name: &str) -> Option<&'s Node<'s>> {
        registry::find(self.nodes, name)
    }

    /// Descriptors filtered by the parameter flag, in registry order.
    pub fn list_matching(&self, parameters: bool) -> Matching<'s, 's> {
        Matching::new(self.nodes, parameters)
    }

    /// Whether typed characters are echoed.
    pub fn echo(&self) -> bool {
        *self.echo
    }

    /// Enable or disable character echo.
    pub fn set_echo(&mut self, enabled: bool) {
        *self.echo = enabled;
    }

    /// Print every parameter as `name=value`, in registry order.
    pub fn show_all_parameters(&mut self) {
        let nodes = self.nodes;
        for node in Matching::new(nodes, true) {
            node.invoke(self, &[]);
        }
    }

    /// Finish dispatch, surfacing the first write failure.
    pub fn finish(self) -> Result<(), StreamError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl fmt::Write for Context<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s);
        match self.error {
            Some(_) => Err(fmt::Error),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("commands", &self.nodes.len())
            .field("echo", &*self.echo)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
