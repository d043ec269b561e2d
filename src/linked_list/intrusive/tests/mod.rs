mod support;
mod allocator;
