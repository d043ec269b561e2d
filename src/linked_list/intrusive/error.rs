use core::alloc::Layout;

/// The storage for a list node could not be obtained.
///
/// This is the only way a list operation can fail. A failed operation never
/// leaves a usable-looking node behind and never modifies an existing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("failed to allocate a list node of {size} bytes (align {align})")]
pub struct AllocError {
    size: usize,
    align: usize,
}

impl AllocError {
    /// Creates an error for a request with the given layout.
    pub const fn new(layout: Layout) -> Self {
        Self {
            size: layout.size(),
            align: layout.align(),
        }
    }

    /// Size in bytes of the failed request.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Alignment of the failed request.
    pub const fn align(&self) -> usize {
        self.align
    }
}
