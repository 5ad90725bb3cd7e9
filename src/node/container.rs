//! Plain grouping node.

use super::{Node, NodeBase};

/// Node without any visuals, only used to group children.
pub struct Container {
    /// Shared node state.
    base: NodeBase,
}

impl Container {
    /// Create an empty container at the origin.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for Container {
    #[inline]
    fn base(&self) -> &NodeBase {
        &self.base
    }

    #[inline]
    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }
}
