//! Fixed-capacity command registry.
//!
//! Descriptors are appended during an explicit startup phase and kept in
//! insertion order, which is also the display and search order. Once the
//! poll loop starts the registry is only read.

use super::{CommandMeta, Node, ParameterHandle};
use crate::config::DEFAULT_MAX_COMMANDS;
use crate::error::RegistryError;
use crate::shell::builtins;

/// Ordered, capacity-bounded set of descriptors with unique names.
///
/// The registry borrows its descriptors; they must outlive it.
pub struct Registry<'a, const N: usize = DEFAULT_MAX_COMMANDS> {
    nodes: heapless::Vec<Node<'a>, N>,
}

impl<'a, const N: usize> Registry<'a, N> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            nodes: heapless::Vec::new(),
        }
    }

    /// Append a descriptor.
    ///
    /// Fails on an empty or duplicate name, and once `N` descriptors are held.
    pub fn register(&mut self, node: Node<'a>) -> Result<(), RegistryError> {
        let name = node.name();

        if name.is_empty() {
            log::warn!("rejected descriptor with empty name");
            return Err(RegistryError::EmptyName);
        }

        if self.find(name).is_some() {
            log::warn!("rejected duplicate descriptor '{}'", name);
            return Err(RegistryError::DuplicateName);
        }

        self.nodes.push(node).map_err(|_| {
            log::warn!("registry full, '{}' not registered", name);
            RegistryError::Full { capacity: N }
        })
    }

    /// Append a plain command.
    pub fn register_command(&mut self, command: &'a CommandMeta) -> Result<(), RegistryError> {
        self.register(Node::Command(command))
    }

    /// Append a runtime parameter.
    pub fn register_parameter(
        &mut self,
        parameter: &'a dyn ParameterHandle,
    ) -> Result<(), RegistryError> {
        self.register(Node::Parameter(parameter))
    }

    /// Append the built-in `help`, `params` and `echo` commands.
    pub fn register_builtins(&mut self) -> Result<(), RegistryError> {
        for command in builtins::ALL {
            self.register_command(command)?;
        }
        Ok(())
    }

    /// Exact-match lookup; first match in insertion order.
    pub fn find(&self, name: &str) -> Option<&Node<'a>> {
        find(&self.nodes, name)
    }

    /// Descriptors whose parameter flag equals `parameters`, in insertion order.
    ///
    /// The iterator is lazy and can be cloned to restart it.
    pub fn list_matching(&self, parameters: bool) -> Matching<'_, 'a> {
        Matching::new(&self.nodes, parameters)
    }

    /// All descriptors in insertion order.
    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Fixed capacity.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for Registry<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for Registry<'_, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("nodes", &self.nodes.as_slice())
            .field("capacity", &N)
            .finish()
    }
}

/// Linear lookup comparing length and content, no case folding.
pub(crate) fn find<'n, 'a>(nodes: &'n [Node<'a>], name: &str) -> Option<&'n Node<'a>> {
    nodes.iter().find(|node| node.name() == name)
}

/// Iterator over descriptors filtered by the parameter flag.
#[derive(Debug, Clone)]
pub struct Matching<'n, 'a> {
    iter: core::slice::Iter<'n, Node<'a>>,
    parameters: bool,
}

impl<'n, 'a> Matching<'n, 'a> {
    pub(crate) fn new(nodes: &'n [Node<'a>], parameters: bool) -> Self {
        Self {
            iter: nodes.iter(),
            parameters,
        }
    }
}

impl<'n, 'a> Iterator for Matching<'n, 'a> {
    type Item = &'n Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let parameters = self.parameters;
        self.iter.find(|node| node.is_parameter() == parameters)
    }
}
