//! Borrowing iteration over list values.

use std::iter::FusedIterator;

use chunkpool_core::{CellAddr, Rebind};

use crate::list::LinkedList;

/// Iterator over `&T`, head to tail. Created by [`LinkedList::iter`].
pub struct Iter<'a, T, A: Rebind> {
    list: &'a LinkedList<T, A>,
    next: Option<CellAddr>,
    remaining: usize,
}

impl<'a, T, A: Rebind> Iter<'a, T, A> {
    pub(crate) fn new(list: &'a LinkedList<T, A>, head: Option<CellAddr>) -> Self {
        Self {
            list,
            next: head,
            remaining: list.len(),
        }
    }
}

impl<'a, T, A: Rebind> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let addr = self.next.take()?;
        let node = self.list.node(addr).ok()?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, A: Rebind> ExactSizeIterator for Iter<'_, T, A> {}

impl<T, A: Rebind> FusedIterator for Iter<'_, T, A> {}

impl<T, A: Rebind> Clone for Iter<'_, T, A> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            next: self.next,
            remaining: self.remaining,
        }
    }
}
