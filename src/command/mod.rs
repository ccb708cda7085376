//! Command and parameter descriptors.
//!
//! A descriptor is either a plain command (`CommandMeta`, const-initializable,
//! lives in ROM) or a runtime parameter (`Parameter<T>`, settable state). Both
//! are referenced from the `Registry` through the tagged `Node` variant.
//!
//! Descriptors are registered once at start of day and never mutated or removed;
//! the registry only borrows them, so they must outlive the shell.

use crate::shell::Context;
use core::cell::Cell;
use critical_section::Mutex;
use core::fmt;

pub mod registry;
pub mod value;

pub use registry::{Matching, Registry};
pub use value::ParamValue;

/// Command handler.
///
/// Receives the argument tokens after the command name; an empty slice means
/// no arguments were supplied. Output goes through the `Context`.
pub type CommandFn = fn(&mut Context<'_>, &[&str]);

/// Plain command descriptor (const-initializable).
#[derive(Debug, Clone)]
pub struct CommandMeta {
    /// Command name (non-empty, unique in the registry)
    pub name: &'static str,

    /// Help text shown by `help`
    pub description: &'static str,

    /// Handler invoked on dispatch
    pub handler: CommandFn,
}

/// Object-safe view of a runtime parameter.
///
/// A parameter behaves like a command taking zero or one argument: with one
/// argument it converts and stores the value, and in both cases it prints
/// `name=value`.
pub trait ParameterHandle {
    /// Parameter name (non-empty, unique in the registry).
    fn name(&self) -> &str;

    /// Help text shown by `params`.
    fn description(&self) -> &str;

    /// Type hint shown by `params`.
    fn type_name(&self) -> &'static str;

    /// Set (when an argument is given) and print the current value.
    fn invoke(&self, ctx: &mut Context<'_>, args: &[&str]);
}

/// Typed runtime parameter.
///
/// The value sits behind a critical-section mutex, so a parameter can be a
/// `static` that the rest of the firmware reads with `get()` while the shell
/// sets it through the registry.
///
/// ```rust,ignore
/// static GAIN: Parameter<f32> = Parameter::new("gain", "Controller gain", 1.5);
///
/// registry.register_parameter(&GAIN)?;
/// // operator types `gain=2.25`
/// assert_eq!(GAIN.get(), 2.25);
/// ```
pub struct Parameter<T: ParamValue> {
    name: &'static str,
    description: &'static str,
    value: Mutex<Cell<T>>,
}

impl<T: ParamValue> Parameter<T> {
    /// Create a parameter with its start value.
    pub const fn new(name: &'static str, description: &'static str, initial: T) -> Self {
        Self {
            name,
            description,
            value: Mutex::new(Cell::new(initial)),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        critical_section::with(|cs| self.value.borrow(cs).get())
    }

    /// Overwrite the current value.
    pub fn set(&self, value: T) {
        critical_section::with(|cs| self.value.borrow(cs).set(value));
    }
}

impl<T: ParamValue + fmt::Debug> fmt::Debug for Parameter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("value", &self.get())
            .finish_non_exhaustive()
    }
}

impl<T: ParamValue> ParameterHandle for Parameter<T> {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn invoke(&self, ctx: &mut Context<'_>, args: &[&str]) {
        if let Some(token) = args.first() {
            self.set(T::from_token(token));
        }

        ctx.print(self.name);
        ctx.print("=");
        let value = self.get();
        // Write failures are latched by the context
        let _ = value.write_value(ctx);
        ctx.println("");
    }
}

/// Registry entry: command or parameter.
///
/// Dispatch is by pattern matching on the variant.
#[derive(Clone, Copy)]
pub enum Node<'a> {
    /// Plain command
    Command(&'a CommandMeta),

    /// Runtime parameter
    Parameter(&'a dyn ParameterHandle),
}

impl<'a> Node<'a> {
    /// Descriptor name.
    pub fn name(&self) -> &'a str {
        match self {
            Node::Command(cmd) => cmd.name,
            Node::Parameter(param) => param.name(),
        }
    }

    /// Help text.
    pub fn description(&self) -> &'a str {
        match self {
            Node::Command(cmd) => cmd.description,
            Node::Parameter(param) => param.description(),
        }
    }

    /// Check if this node is a parameter.
    pub fn is_parameter(&self) -> bool {
        matches!(self, Node::Parameter(_))
    }

    /// Type hint, present only for parameters.
    pub fn parameter_type(&self) -> Option<&'static str> {
        match self {
            Node::Command(_) => None,
            Node::Parameter(param) => Some(param.type_name()),
        }
    }

    /// Run the descriptor's handler.
    pub fn invoke(&self, ctx: &mut Context<'_>, args: &[&str]) {
        match self {
            Node::Command(cmd) => (cmd.handler)(ctx, args),
            Node::Parameter(param) => param.invoke(ctx, args),
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Command(cmd) => f.debug_tuple("Command").field(&cmd.name).finish(),
            Node::Parameter(param) => f
                .debug_tuple("Parameter")
                .field(&param.name())
                .field(&param.type_name())
                .finish(),
        }
    }
}
