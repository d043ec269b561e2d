extern crate std;

use core::mem::{align_of, size_of};
use std::{format, string::ToString, vec, vec::Vec};

use crate::linked_list::intrusive::{
    allocator::Bounded,
    list::IntList,
    node::{DetachedNode, IntNode},
};

use super::support::{Tracking, init_logger};

#[test]
fn test_failed_insert_leaves_list_untouched() {
    init_logger();
    let alloc = Tracking::new();
    let mut list = IntList::new_in(alloc.clone());
    list.insert_head(3).unwrap();
    list.insert_head(1).unwrap();

    alloc.fail_next();
    let err = list.insert_head(4).unwrap_err();

    assert_eq!(err.size(), size_of::<IntNode>());
    assert_eq!(list.len(), 2);
    assert_eq!(list.values().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(alloc.allocations(), 2);

    // Only the armed allocation fails.
    list.insert_head(4).unwrap();
    assert_eq!(list.values().collect::<Vec<_>>(), vec![4, 1, 3]);
}

#[test]
fn test_failed_create_node_allocates_nothing() {
    let alloc = Tracking::new();
    alloc.fail_next();

    assert!(DetachedNode::new_in(5, alloc.clone()).is_err());
    assert_eq!(alloc.allocations(), 0);
    assert_eq!(alloc.live(), 0);
}

#[test]
fn test_alloc_error_display() {
    let alloc = Tracking::new();
    alloc.fail_next();
    let list = IntList::new_in(alloc);
    let err = list.create_node(1).unwrap_err();

    assert_eq!(err.align(), align_of::<IntNode>());
    assert_eq!(
        err.to_string(),
        format!(
            "failed to allocate a list node of {} bytes (align {})",
            size_of::<IntNode>(),
            align_of::<IntNode>()
        )
    );
}

#[test]
fn test_bounded_budget() {
    init_logger();
    let alloc = Bounded::with_limit(2);
    let mut list = IntList::new_in(alloc.clone());
    assert_eq!(alloc.limit(), 2);

    list.insert_head(1).unwrap();
    list.insert_head(2).unwrap();
    assert_eq!(alloc.live(), 2);

    assert!(list.insert_head(3).is_err());
    assert_eq!(list.values().collect::<Vec<_>>(), vec![2, 1]);

    // Releasing a node returns its slot.
    assert_eq!(list.pop_head(), Some(2));
    assert_eq!(alloc.live(), 1);
    list.insert_head(3).unwrap();
    assert_eq!(list.values().collect::<Vec<_>>(), vec![3, 1]);

    list.free_list();
    assert_eq!(alloc.live(), 0);
}

#[test]
fn test_bounded_budget_counts_detached_nodes() {
    let alloc = Bounded::new(Tracking::new(), 1);
    let mut list = IntList::new_in(alloc.clone());

    let node = list.create_node(1).unwrap();
    assert!(list.insert_head(2).is_err());
    assert_eq!(alloc.inner().allocations(), 1);

    drop(node);
    assert_eq!(alloc.live(), 0);
    list.insert_head(2).unwrap();
    assert_eq!(alloc.inner().live(), 1);
}

#[test]
fn test_zero_budget_rejects_everything() {
    let mut list = IntList::new_in(Bounded::with_limit(0));
    assert!(list.insert_head(0).is_err());
    assert!(list.is_empty());
    assert!(!list.find(0));
    assert_eq!(list.free_list(), 0);
}
