use core::ptr::NonNull;

use super::node::IntNode;

/// Something that owns an optional `next` pointer.
///
/// Both a node and the list head are links, so splicing a node in or out
/// looks the same whether its parent is the list or another node.
pub(crate) trait Link {
    /// Get the next pointer in the chain
    fn next_ptr(&self) -> Option<NonNull<IntNode>>;

    /// Set the next pointer in the chain
    fn set_next_ptr(&mut self, next: Option<NonNull<IntNode>>);
}

/// A link that can be spliced into a chain.
pub(crate) trait Node: Link {
    /// Make this node the successor of `parent`, taking over whatever
    /// `parent` pointed to before.
    fn append_to<L: Link>(&mut self, parent: &mut L);

    /// Unlink this node from `parent`.
    ///
    /// # Safety
    ///
    /// `parent` must be the list or node whose next pointer is this node.
    unsafe fn detach<L: Link>(&mut self, parent: &mut L);
}
