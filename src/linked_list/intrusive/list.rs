use core::{fmt, mem, ptr::NonNull};

use log::{debug, warn};

use super::{
    allocator::{Global, NodeAlloc},
    error::AllocError,
    iter::Iter,
    node::{DetachedNode, IntNode, create_node, release_node},
    traits::{Link, Node},
};

/// A singly linked list of `i32` values.
///
/// The list owns its head node, each node owns its successor, and every node
/// is released through the list's allocator `A`.
pub struct IntList<A: NodeAlloc = Global> {
    head: Option<NonNull<IntNode>>,
    len: usize,
    alloc: A,
}

impl IntList<Global> {
    /// Creates a new, empty list on the global heap.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<A: NodeAlloc> IntList<A> {
    /// Creates a new, empty list whose nodes come from `alloc`.
    pub const fn new_in(alloc: A) -> Self {
        IntList {
            head: None,
            len: 0,
            alloc,
        }
    }

    /// The allocator backing this list.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Allocates a node holding `value` from this list's allocator.
    ///
    /// The node is not linked; pass it to [`IntList::link_head`] to take it in.
    ///
    /// # Errors
    /// Returns [`AllocError`] if the allocator cannot provide the storage.
    pub fn create_node(&self, value: i32) -> Result<DetachedNode<A>, AllocError> {
        DetachedNode::new_in(value, self.alloc.clone())
    }

    /// Inserts `value` in front of the current head.
    ///
    /// # Errors
    /// Returns [`AllocError`] if the node cannot be allocated. The list is left
    /// exactly as it was.
    pub fn insert_head(&mut self, value: i32) -> Result<(), AllocError> {
        let node = create_node(&self.alloc, value)?;
        unsafe { self.link_raw(node) };
        Ok(())
    }

    /// Takes ownership of `node` and makes it the new head.
    ///
    /// # Errors
    /// Gives `node` back untouched if its allocator does not share a pool with
    /// this list's allocator, since the list could not release it. Nodes from
    /// [`IntList::create_node`] are always accepted.
    pub fn link_head(&mut self, node: DetachedNode<A>) -> Result<(), DetachedNode<A>> {
        if !self.alloc.shares_pool_with(node.allocator()) {
            warn!("refusing to link a node from a foreign allocator");
            return Err(node);
        }
        unsafe { self.link_raw(node.into_raw()) };
        Ok(())
    }

    /// # Safety
    ///
    /// `node` must be unlinked, owned by nobody else, and allocated by an
    /// allocator that shares a pool with this list's.
    unsafe fn link_raw(&mut self, node: NonNull<IntNode>) {
        unsafe { (*node.as_ptr()).append_to(self) };
        self.len += 1;
    }

    /// Whether any node holds `target`. Stops at the first match.
    pub fn find(&self, target: i32) -> bool {
        self.iter().any(|node| node.data() == target)
    }

    /// Unlinks the head node, releases it, and returns its value.
    pub fn pop_head(&mut self) -> Option<i32> {
        let head = self.head?;
        let data = unsafe {
            let head_ref = &mut *head.as_ptr();
            head_ref.detach(self);
            head_ref.data()
        };
        self.len -= 1;
        unsafe { release_node(&self.alloc, head) };
        Some(data)
    }

    /// Releases every node, head first, and leaves the list empty.
    ///
    /// Returns the number of nodes released. Calling this on an empty list is
    /// a no-op that returns `0`.
    pub fn free_list(&mut self) -> usize {
        // Detach the whole chain first so the list stays consistent even if a
        // release unwinds halfway through.
        let mut current = self.head.take();
        let expected = mem::take(&mut self.len);
        let mut released = 0;
        while let Some(node) = current {
            // Read the successor before the node holding it is gone.
            current = unsafe { node.as_ref().next_ptr() };
            unsafe { release_node(&self.alloc, node) };
            released += 1;
        }
        debug_assert_eq!(released, expected, "cached length out of sync");
        if released > 0 {
            debug!("released {released} list nodes");
        }
        released
    }

    /// The first node, or `None` if the list is empty.
    pub fn head(&self) -> Option<&IntNode> {
        self.head.map(|head| unsafe { head.as_ref() })
    }

    /// The number of nodes in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Iterates over the nodes from head to terminal.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.head(), self.len)
    }

    /// Iterates over the stored values from head to terminal.
    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.iter().map(IntNode::data)
    }
}

impl<A: NodeAlloc> Link for IntList<A> {
    #[inline]
    fn next_ptr(&self) -> Option<NonNull<IntNode>> {
        self.head
    }

    #[inline]
    fn set_next_ptr(&mut self, next: Option<NonNull<IntNode>>) {
        self.head = next;
    }
}

impl<A: NodeAlloc> Drop for IntList<A> {
    fn drop(&mut self) {
        self.free_list();
    }
}

impl Default for IntList<Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: NodeAlloc> fmt::Debug for IntList<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}

impl<'a, A: NodeAlloc> IntoIterator for &'a IntList<A> {
    type Item = &'a IntNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

unsafe impl<A: NodeAlloc + Send> Send for IntList<A> {}
unsafe impl<A: NodeAlloc + Sync> Sync for IntList<A> {}
