use core::iter::FusedIterator;

use super::node::IntNode;

/// An iterator over the nodes of an [`IntList`](super::list::IntList).
///
/// The list stays borrowed while the iterator is alive, so it cannot be
/// modified mid-traversal. Call `iter()` again to restart from the head.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    current: Option<&'a IntNode>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(head: Option<&'a IntNode>, len: usize) -> Self {
        Self {
            current: head,
            remaining: len,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a IntNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = current.next();
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
