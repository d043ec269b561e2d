//! # Intrusive Integer List
//!
//! ## Core Components
//!
//! - [`list::IntList`]: the list handle. Owns the head link, the length and the allocator.
//! - [`node::IntNode`]: a list element holding an `i32` and its `next` link.
//! - [`node::DetachedNode`]: an allocated node that has not been linked into a list yet.
//! - [`allocator::NodeAlloc`]: where node storage comes from. [`allocator::Global`] and [`allocator::Bounded`].
//! - [`iter::Iter`]: borrowed head-to-terminal traversal.
//!
//! ## Safety
//!
//! Links are raw `NonNull` pointers, but no `&mut IntNode` is ever handed out,
//! so a chain can only be changed through `&mut IntList`. That keeps the
//! following invariants local to this module:
//!
//! - The chain is acyclic and every node has exactly one owner.
//! - Every linked node was allocated by the list's allocator (or a clone of it)
//!   and is released through it exactly once.
//! - The cached length matches the number of reachable nodes.

mod traits;
pub mod allocator;
pub mod error;
pub mod node;
pub mod list;
pub mod iter;

#[cfg(test)]
mod tests;
