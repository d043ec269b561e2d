//! A singly linked list of `i32` values.
//!
//! Every node embeds its own `next` link and is exclusively owned by its
//! predecessor, or by the list itself for the head. Nodes are allocated
//! through a [`NodeAlloc`](intrusive::allocator::NodeAlloc) so allocation failure
//! surfaces as an [`AllocError`](intrusive::error::AllocError) instead of an
//! abort.
//!
//! # Examples
//!
//! ```
//! use intlist::linked_list::intrusive::list::IntList;
//!
//! let mut list = IntList::new();
//! list.insert_head(3)?;
//! list.insert_head(1)?;
//! list.insert_head(4)?;
//!
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.values().collect::<Vec<_>>(), vec![4, 1, 3]);
//! assert!(list.find(1));
//! assert!(!list.find(9));
//!
//! assert_eq!(list.free_list(), 3);
//! assert!(list.is_empty());
//! assert_eq!(list.free_list(), 0);
//! # Ok::<(), intlist::linked_list::intrusive::error::AllocError>(())
//! ```
//!
//! A node can also be created up front and linked in later, which splits
//! the fallible half of an insertion from the infallible one:
//!
//! ```
//! use intlist::linked_list::intrusive::{list::IntList, node::DetachedNode};
//!
//! let mut list = IntList::new();
//! let node = DetachedNode::new(7)?;
//! assert_eq!(node.data(), 7);
//!
//! list.link_head(node).expect("both live on the global heap");
//! assert_eq!(list.head().map(|n| n.data()), Some(7));
//! # Ok::<(), intlist::linked_list::intrusive::error::AllocError>(())
//! ```
pub mod intrusive;
