extern crate std;

use core::{alloc::Layout, cell::RefCell, mem, ptr::NonNull};
use std::rc::Rc;

use hashbrown::HashSet;

use crate::linked_list::intrusive::{
    allocator::{Global, NodeAlloc},
    error::AllocError,
};

pub(super) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default)]
struct Ledger {
    live: HashSet<usize>,
    allocations: usize,
    releases: usize,
    fail_next: bool,
    panic_next_release: bool,
}

/// Heap allocator that records every node it hands out.
///
/// Releasing a block it does not consider live panics, which catches both
/// double releases and releases through the wrong allocator.
#[derive(Clone, Default)]
pub(super) struct Tracking {
    ledger: Rc<RefCell<Ledger>>,
}

impl Tracking {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn allocations(&self) -> usize {
        self.ledger.borrow().allocations
    }

    pub(super) fn releases(&self) -> usize {
        self.ledger.borrow().releases
    }

    pub(super) fn live(&self) -> usize {
        self.ledger.borrow().live.len()
    }

    /// Makes the next allocation fail.
    pub(super) fn fail_next(&self) {
        self.ledger.borrow_mut().fail_next = true;
    }

    /// Makes the next release panic before anything is released.
    pub(super) fn panic_next_release(&self) {
        self.ledger.borrow_mut().panic_next_release = true;
    }
}

unsafe impl NodeAlloc for Tracking {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let mut ledger = self.ledger.borrow_mut();
        if mem::take(&mut ledger.fail_next) {
            return Err(AllocError::new(layout));
        }
        let ptr = Global.allocate(layout)?;
        assert!(
            ledger.live.insert(ptr.as_ptr() as usize),
            "allocator handed out a block that is still live"
        );
        ledger.allocations += 1;
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let mut ledger = self.ledger.borrow_mut();
        if mem::take(&mut ledger.panic_next_release) {
            panic!("release of {ptr:p} failed");
        }
        assert!(
            ledger.live.remove(&(ptr.as_ptr() as usize)),
            "released {ptr:p}, which is not a live node"
        );
        ledger.releases += 1;
        unsafe { Global.deallocate(ptr, layout) };
    }

    fn shares_pool_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.ledger, &other.ledger)
    }
}
