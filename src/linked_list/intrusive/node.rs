use core::{alloc::Layout, fmt, mem::ManuallyDrop, ptr::{self, NonNull}};

use log::trace;

use super::{
    allocator::{Global, NodeAlloc},
    error::AllocError,
    traits::{Link, Node},
};

/// Layout of every node handed to a [`NodeAlloc`].
pub(crate) const NODE_LAYOUT: Layout = Layout::new::<IntNode>();

/// One element of an [`IntList`](super::list::IntList).
///
/// Nodes are only ever reachable through a shared reference, so the chain
/// behind `next` cannot be rewired from outside the list that owns it.
pub struct IntNode {
    data: i32,
    next: Option<NonNull<IntNode>>,
}

impl IntNode {
    /// The value stored in this node.
    #[inline]
    pub fn data(&self) -> i32 {
        self.data
    }

    /// The following node, or `None` if this is the terminal node.
    #[inline]
    pub fn next(&self) -> Option<&IntNode> {
        // The successor is owned by this node and lives at least as long as it.
        self.next.map(|next| unsafe { next.as_ref() })
    }

    /// Whether this is the last node of its chain.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }
}

impl fmt::Debug for IntNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntNode")
            .field("data", &self.data)
            .field("terminal", &self.is_terminal())
            .finish()
    }
}

impl Link for IntNode {
    #[inline]
    fn next_ptr(&self) -> Option<NonNull<IntNode>> {
        self.next
    }

    #[inline]
    fn set_next_ptr(&mut self, next: Option<NonNull<IntNode>>) {
        self.next = next;
    }
}

impl Node for IntNode {
    #[inline]
    fn append_to<L: Link>(&mut self, parent: &mut L) {
        self.set_next_ptr(parent.next_ptr());
        parent.set_next_ptr(Some(NonNull::from(self)));
    }

    #[inline]
    unsafe fn detach<L: Link>(&mut self, parent: &mut L) {
        debug_assert_eq!(
            parent.next_ptr(),
            Some(NonNull::from(&mut *self)),
            "Parent must be the one that contains this node"
        );
        parent.set_next_ptr(self.next_ptr());
        self.set_next_ptr(None);
    }
}

/// Allocates a fresh, unlinked node holding `value`.
pub(crate) fn create_node<A: NodeAlloc>(
    alloc: &A,
    value: i32,
) -> Result<NonNull<IntNode>, AllocError> {
    let node = alloc.allocate(NODE_LAYOUT)?.cast::<IntNode>();
    unsafe { node.as_ptr().write(IntNode { data: value, next: None }) };
    trace!("allocated node {node:p} holding {value}");
    Ok(node)
}

/// Returns a node's storage to `alloc`.
///
/// # Safety
///
/// `node` must have been created by [`create_node`] with `alloc` (or a clone
/// of it), must already be unreachable from any chain, and must not be used
/// afterwards.
pub(crate) unsafe fn release_node<A: NodeAlloc>(alloc: &A, node: NonNull<IntNode>) {
    trace!("releasing node {node:p}");
    unsafe {
        ptr::drop_in_place(node.as_ptr());
        alloc.deallocate(node.cast(), NODE_LAYOUT);
    }
}

/// A node that has been allocated but not linked into a list.
///
/// Creating the node is the only fallible allocation of an insertion; once a
/// `DetachedNode` exists, [`IntList::link_head`](super::list::IntList::link_head)
/// allocates nothing. Dropping it without linking releases its storage
/// through the allocator it came from.
pub struct DetachedNode<A: NodeAlloc = Global> {
    node: NonNull<IntNode>,
    alloc: A,
}

impl DetachedNode<Global> {
    /// Allocates a node holding `value` on the global heap.
    pub fn new(value: i32) -> Result<Self, AllocError> {
        Self::new_in(value, Global)
    }
}

impl<A: NodeAlloc> DetachedNode<A> {
    /// Allocates a node holding `value` from `alloc`.
    ///
    /// # Errors
    /// Returns [`AllocError`] if `alloc` cannot provide the storage. Nothing is
    /// allocated in that case.
    pub fn new_in(value: i32, alloc: A) -> Result<Self, AllocError> {
        let node = create_node(&alloc, value)?;
        Ok(Self { node, alloc })
    }

    /// The value stored in this node.
    pub fn data(&self) -> i32 {
        unsafe { self.node.as_ref().data }
    }

    /// Replaces the value stored in this node.
    pub fn set_data(&mut self, value: i32) {
        unsafe { self.node.as_mut().data = value };
    }

    /// The allocator this node will be released through.
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Gives up ownership of the node without releasing it.
    pub(crate) fn into_raw(self) -> NonNull<IntNode> {
        let this = ManuallyDrop::new(self);
        // The allocator clone is not needed once the node is linked.
        drop(unsafe { ptr::read(&this.alloc) });
        this.node
    }
}

impl<A: NodeAlloc> Drop for DetachedNode<A> {
    fn drop(&mut self) {
        unsafe { release_node(&self.alloc, self.node) };
    }
}

impl<A: NodeAlloc> fmt::Debug for DetachedNode<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetachedNode")
            .field("data", &self.data())
            .finish()
    }
}

unsafe impl<A: NodeAlloc + Send> Send for DetachedNode<A> {}
unsafe impl<A: NodeAlloc + Sync> Sync for DetachedNode<A> {}
