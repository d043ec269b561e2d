use alloc::rc::Rc;
use core::{alloc::Layout, cell::Cell, ptr::NonNull};

use log::warn;

use super::error::AllocError;

/// A source of storage for list nodes.
///
/// This mirrors the shape of `core::alloc::Allocator`, which cannot be named
/// on stable Rust, but reports failure through [`AllocError`].
///
/// # Safety
///
/// Implementors must uphold the following:
///
/// - A block returned by `allocate` is valid for reads and writes of
///   `layout.size()` bytes, aligned to `layout.align()`, until it is passed
///   to `deallocate`.
/// - Any clone of an allocator can `deallocate` a block allocated by any other
///   clone of it.
/// - `shares_pool_with` returns `true` only if each allocator can `deallocate`
///   blocks allocated by the other. Lists rely on this before taking over a
///   node created through [`DetachedNode::new_in`](super::node::DetachedNode::new_in).
pub unsafe trait NodeAlloc: Clone {
    /// Attempts to allocate a block of memory matching `layout`.
    ///
    /// `layout` always has a non-zero size.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Releases a block previously returned by [`NodeAlloc::allocate`].
    ///
    /// # Safety
    ///
    /// `ptr` must have been allocated by this allocator (or a clone of it) with
    /// the same `layout`, and must not have been released already.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Whether `self` and `other` release into the same pool, so a block from
    /// either may be handed to the other's `deallocate`.
    fn shares_pool_with(&self, other: &Self) -> bool;
}

/// The global heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl NodeAlloc for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0, "node layouts are never zero-sized");
        let ptr = unsafe { ::alloc::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or_else(|| {
            warn!("global allocator refused a {} byte node", layout.size());
            AllocError::new(layout)
        })
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { ::alloc::alloc::dealloc(ptr.as_ptr(), layout) }
    }

    #[inline]
    fn shares_pool_with(&self, _other: &Self) -> bool {
        true
    }
}

/// An allocator that hands out at most `limit` live nodes.
///
/// All clones share one budget, so a list and every node created from a clone
/// of its allocator count against the same limit. Releasing a node gives its
/// slot back.
#[derive(Debug, Clone)]
pub struct Bounded<A = Global> {
    inner: A,
    limit: usize,
    live: Rc<Cell<usize>>,
}

impl Bounded<Global> {
    /// Creates a budget of `limit` nodes on the global heap.
    pub fn with_limit(limit: usize) -> Self {
        Self::new(Global, limit)
    }
}

impl<A: NodeAlloc> Bounded<A> {
    /// Creates a budget of `limit` nodes served by `inner`.
    ///
    /// # Arguments
    /// * `inner` - The allocator that provides the actual storage
    /// * `limit` - The maximum number of nodes alive at the same time
    pub fn new(inner: A, limit: usize) -> Self {
        Self {
            inner,
            limit,
            live: Rc::new(Cell::new(0)),
        }
    }

    /// The maximum number of live nodes.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The number of nodes currently alive across all clones.
    pub fn live(&self) -> usize {
        self.live.get()
    }

    /// The allocator that provides the actual storage.
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

unsafe impl<A: NodeAlloc> NodeAlloc for Bounded<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let live = self.live.get();
        if live >= self.limit {
            warn!("node budget of {} exhausted", self.limit);
            return Err(AllocError::new(layout));
        }
        let ptr = self.inner.allocate(layout)?;
        self.live.set(live + 1);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.inner.deallocate(ptr, layout) };
        self.live.set(self.live.get().saturating_sub(1));
    }

    fn shares_pool_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.live, &other.live) && self.inner.shares_pool_with(&other.inner)
    }
}
