//! Singly linked list over a pluggable cell allocator.
//!
//! [`LinkedList`] stores every node in a cell obtained from its allocator.
//! The list owns the head node; each node owns its successor through its
//! `next` address, so tearing down the head tears down the chain.

use std::fmt;

use tracing::warn;

use chunkpool_arena::HeapAllocator;
use chunkpool_core::{AllocError, CellAddr, CellAllocator, ListError, Rebind};

use crate::cursor::Cursor;
use crate::iter::Iter;

/// A list node: one value plus ownership of the rest of the chain.
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Option<CellAddr>,
}

impl<T> Node<T> {
    /// The value held by this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Address of the successor node, or `None` at the end of the chain.
    pub fn next(&self) -> Option<CellAddr> {
        self.next
    }
}

/// Forward-only singly linked list.
///
/// `A` is an allocator for the element type; the list rebinds it to its
/// internal node type on construction, so any [`Rebind`] allocator
/// (pooled, heap, counting) can back the list.
///
/// # Example
///
/// ```
/// use chunkpool_arena::ChunkAllocator;
/// use chunkpool_list::LinkedList;
///
/// let mut list: LinkedList<i32, ChunkAllocator<i32>> = LinkedList::new();
/// for i in 0..3 {
///     list.push_front(i).unwrap();
/// }
/// let values: Vec<_> = list.iter().copied().collect();
/// assert_eq!(values, vec![2, 1, 0]);
/// ```
pub struct LinkedList<T, A: Rebind = HeapAllocator<T>> {
    head: Option<CellAddr>,
    len: usize,
    alloc: A::Other<Node<T>>,
}

impl<T, A: Rebind + Default> LinkedList<T, A> {
    /// Create an empty list with a default-constructed allocator.
    pub fn new() -> Self {
        Self::with_allocator(&A::default())
    }
}

impl<T, A: Rebind + Default> Default for LinkedList<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Rebind> LinkedList<T, A> {
    /// Create an empty list whose nodes come from an allocator configured
    /// like `alloc`.
    pub fn with_allocator(alloc: &A) -> Self {
        Self {
            head: None,
            len: 0,
            alloc: alloc.rebind(),
        }
    }

    /// Whether the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Cursor at the head node (equal to [`end`](Self::end) when empty).
    pub fn begin(&self) -> Cursor {
        Cursor::at(self.head)
    }

    /// The end sentinel.
    pub fn end(&self) -> Cursor {
        Cursor::END
    }

    /// Borrow the head value.
    ///
    /// Returns `Err(ListError::Empty)` on an empty list.
    pub fn front(&self) -> Result<&T, ListError> {
        let head = self.head.ok_or(ListError::Empty)?;
        Ok(&self.node(head)?.value)
    }

    /// Mutably borrow the head value.
    pub fn front_mut(&mut self) -> Result<&mut T, ListError> {
        let head = self.head.ok_or(ListError::Empty)?;
        Ok(&mut self.node_mut(head)?.value)
    }

    /// Insert `value` as the new head.
    ///
    /// Allocator failures propagate and leave the list unchanged.
    pub fn push_front(&mut self, value: T) -> Result<(), ListError> {
        let addr = self.make_node(value, self.head)?;
        self.head = Some(addr);
        self.len += 1;
        Ok(())
    }

    /// Insert `value` after the node at `pos`.
    ///
    /// On an empty list the new node becomes the head whatever `pos` is.
    /// Returns a cursor at the new node, so `pos = insert_after(pos, v)?`
    /// appends values in order. Inserting after the end sentinel of a
    /// non-empty list fails with `Err(ListError::OutOfRange)` before
    /// anything is allocated.
    pub fn insert_after(&mut self, pos: Cursor, value: T) -> Result<Cursor, ListError> {
        if self.head.is_none() {
            let addr = self.make_node(value, None)?;
            self.head = Some(addr);
            self.len += 1;
            return Ok(Cursor::at(Some(addr)));
        }
        let prev = pos.addr().ok_or(ListError::OutOfRange)?;
        let next = self.node(prev)?.next;
        let addr = self.make_node(value, next)?;
        self.node_mut(prev)?.next = Some(addr);
        self.len += 1;
        Ok(Cursor::at(Some(addr)))
    }

    /// Unlink the head node and return its value.
    pub fn pop_front(&mut self) -> Result<T, ListError> {
        let head = self.head.ok_or(ListError::Empty)?;
        let node = self.alloc.destroy(head)?;
        self.head = node.next;
        self.len -= 1;
        self.release_cell(head);
        Ok(node.value)
    }

    /// Unlink the node after `pos` and return its value.
    ///
    /// Fails with `Err(ListError::OutOfRange)` if `pos` is the end
    /// sentinel or has no successor.
    pub fn erase_after(&mut self, pos: Cursor) -> Result<T, ListError> {
        let prev = pos.addr().ok_or(ListError::OutOfRange)?;
        let target = self.node(prev)?.next.ok_or(ListError::OutOfRange)?;
        let node = self.alloc.destroy(target)?;
        self.node_mut(prev)?.next = node.next;
        self.len -= 1;
        self.release_cell(target);
        Ok(node.value)
    }

    /// Destroy every node, returning each cell to the allocator.
    pub fn clear(&mut self) {
        while let Some(head) = self.head {
            let node = match self.alloc.destroy(head) {
                Ok(node) => node,
                Err(err) => {
                    warn!(%err, "abandoning list teardown");
                    break;
                }
            };
            self.head = node.next;
            self.len -= 1;
            self.release_cell(head);
        }
        self.head = None;
        self.len = 0;
    }

    /// Borrow the value at `pos`.
    ///
    /// Fails with `Err(ListError::OutOfRange)` at the end sentinel.
    pub fn get(&self, pos: Cursor) -> Result<&T, ListError> {
        let addr = pos.addr().ok_or(ListError::OutOfRange)?;
        Ok(&self.node(addr)?.value)
    }

    /// Mutably borrow the value at `pos`.
    pub fn get_mut(&mut self, pos: Cursor) -> Result<&mut T, ListError> {
        let addr = pos.addr().ok_or(ListError::OutOfRange)?;
        Ok(&mut self.node_mut(addr)?.value)
    }

    /// Move `pos` to the next node.
    ///
    /// Fails with `Err(ListError::OutOfRange)` if `pos` is already the end
    /// sentinel; `pos` is left unchanged in that case.
    pub fn advance(&self, pos: &mut Cursor) -> Result<(), ListError> {
        let addr = pos.addr().ok_or(ListError::OutOfRange)?;
        *pos = Cursor::at(self.node(addr)?.next);
        Ok(())
    }

    /// Iterate over the values from head to tail.
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter::new(self, self.head)
    }

    /// The rebound allocator holding this list's nodes.
    pub fn allocator(&self) -> &A::Other<Node<T>> {
        &self.alloc
    }

    pub(crate) fn node(&self, addr: CellAddr) -> Result<&Node<T>, ListError> {
        self.alloc
            .get(addr)
            .ok_or(ListError::Alloc(AllocError::InvalidAddress { addr }))
    }

    fn node_mut(&mut self, addr: CellAddr) -> Result<&mut Node<T>, ListError> {
        self.alloc
            .get_mut(addr)
            .ok_or(ListError::Alloc(AllocError::InvalidAddress { addr }))
    }

    /// Allocate a cell and construct a node in it.
    fn make_node(&mut self, value: T, next: Option<CellAddr>) -> Result<CellAddr, ListError> {
        let addr = self.alloc.allocate(1)?;
        if let Err(err) = self.alloc.construct(addr, Node { value, next }) {
            // Hand the cell back so a failed insert leaves nothing claimed.
            self.release_cell(addr);
            return Err(err.into());
        }
        Ok(addr)
    }

    /// Return an unlinked node's cell. The node is already gone from the
    /// chain, so a refusal can only be logged.
    fn release_cell(&mut self, addr: CellAddr) {
        if let Err(err) = self.alloc.deallocate(addr, 1) {
            warn!(%addr, %err, "node cell was not returned to the allocator");
        }
    }
}

impl<T, A: Rebind> Drop for LinkedList<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, T, A: Rebind> IntoIterator for &'a LinkedList<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, A: Rebind> fmt::Debug for LinkedList<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkpool_arena::{ChunkAllocator, CountingAllocator, PoolConfig, ReclamationPolicy};

    type Pooled<T> = LinkedList<T, ChunkAllocator<T>>;

    fn values<T: Clone, A: Rebind>(list: &LinkedList<T, A>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn new_list_is_empty() {
        let list: Pooled<i32> = LinkedList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.begin(), list.end());
        assert_eq!(list.front(), Err(ListError::Empty));
        assert_eq!(list.allocator().stats().blocks, 0);
    }

    #[test]
    fn push_front_reverses_order() {
        let mut list: Pooled<i32> = LinkedList::new();
        for i in 0..10 {
            list.push_front(i).unwrap();
        }
        assert_eq!(values(&list), (0..10).rev().collect::<Vec<_>>());
        assert_eq!(list.front(), Ok(&9));
        assert_eq!(list.len(), 10);
    }

    #[test]
    fn insert_after_appends_in_order() {
        let mut list: Pooled<i32> = LinkedList::new();
        let mut pos = list.begin();
        for i in 0..20 {
            pos = list.insert_after(pos, i).unwrap();
        }
        assert_eq!(values(&list), (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn insert_after_splices_mid_list() {
        let mut list: Pooled<i32> = LinkedList::new();
        list.push_front(3).unwrap();
        list.push_front(1).unwrap();
        let at = list.insert_after(list.begin(), 2).unwrap();
        assert_eq!(list.get(at), Ok(&2));
        assert_eq!(values(&list), vec![1, 2, 3]);
    }

    #[test]
    fn insert_after_end_of_non_empty_list_fails() {
        let mut list: Pooled<i32> = LinkedList::new();
        list.push_front(1).unwrap();
        let before = list.allocator().stats();
        assert_eq!(list.insert_after(list.end(), 2), Err(ListError::OutOfRange));
        assert_eq!(list.allocator().stats(), before);
        assert_eq!(values(&list), vec![1]);
    }

    #[test]
    fn front_mut_edits_head() {
        let mut list: Pooled<(i32, i32)> = LinkedList::new();
        list.push_front((1, 1)).unwrap();
        list.push_front((2, 2)).unwrap();
        list.front_mut().unwrap().1 = 7;
        assert_eq!(values(&list), vec![(2, 7), (1, 1)]);
    }

    #[test]
    fn cursor_walk_and_advance_past_end() {
        let mut list: Pooled<i32> = LinkedList::new();
        for i in 0..3 {
            list.push_front(i).unwrap();
        }
        let mut pos = list.begin();
        let mut seen = Vec::new();
        while pos != list.end() {
            seen.push(*list.get(pos).unwrap());
            list.advance(&mut pos).unwrap();
        }
        assert_eq!(seen, vec![2, 1, 0]);
        assert_eq!(list.advance(&mut pos), Err(ListError::OutOfRange));
        assert_eq!(list.get(pos), Err(ListError::OutOfRange));
        assert!(pos.is_end());
    }

    #[test]
    fn pop_and_erase_release_cells() {
        let mut list: Pooled<i32> = LinkedList::new();
        for i in 0..5 {
            list.push_front(i).unwrap();
        }
        assert_eq!(list.pop_front(), Ok(4));
        assert_eq!(list.erase_after(list.begin()), Ok(2));
        assert_eq!(values(&list), vec![3, 1, 0]);
        assert_eq!(list.allocator().stats().live_cells, 3);

        let mut last = list.begin();
        list.advance(&mut last).unwrap();
        list.advance(&mut last).unwrap();
        assert_eq!(list.erase_after(last), Err(ListError::OutOfRange));
        assert_eq!(list.erase_after(list.end()), Err(ListError::OutOfRange));
    }

    #[test]
    fn pop_front_on_empty_list() {
        let mut list: LinkedList<i32> = LinkedList::new();
        assert_eq!(list.pop_front(), Err(ListError::Empty));
    }

    #[test]
    fn erased_cursor_no_longer_resolves() {
        let mut list: Pooled<i32> = LinkedList::new();
        list.push_front(2).unwrap();
        list.push_front(1).unwrap();
        let mut second = list.begin();
        list.advance(&mut second).unwrap();
        list.erase_after(list.begin()).unwrap();
        assert!(matches!(
            list.get(second),
            Err(ListError::Alloc(AllocError::InvalidAddress { .. }))
        ));
    }

    #[test]
    fn stale_cursor_reads_reused_cell() {
        let mut list: Pooled<i32> = LinkedList::new();
        list.push_front(2).unwrap();
        list.push_front(1).unwrap();
        let mut stale = list.begin();
        list.advance(&mut stale).unwrap();
        list.erase_after(list.begin()).unwrap();
        list.push_front(99).unwrap();
        assert_eq!(list.get(stale), Ok(&99));
    }

    /// Heap-backed allocator that never accepts a cell back.
    struct NoReturn<T>(HeapAllocator<T>);

    impl<T> Default for NoReturn<T> {
        fn default() -> Self {
            Self(HeapAllocator::new())
        }
    }

    impl<T> CellAllocator<T> for NoReturn<T> {
        fn allocate(&mut self, count: usize) -> Result<CellAddr, AllocError> {
            self.0.allocate(count)
        }
        fn deallocate(&mut self, addr: CellAddr, _count: usize) -> Result<(), AllocError> {
            Err(AllocError::InvalidAddress { addr })
        }
        fn construct(&mut self, addr: CellAddr, value: T) -> Result<(), AllocError> {
            self.0.construct(addr, value)
        }
        fn destroy(&mut self, addr: CellAddr) -> Result<T, AllocError> {
            self.0.destroy(addr)
        }
        fn get(&self, addr: CellAddr) -> Option<&T> {
            self.0.get(addr)
        }
        fn get_mut(&mut self, addr: CellAddr) -> Option<&mut T> {
            self.0.get_mut(addr)
        }
    }

    impl<T> Rebind for NoReturn<T> {
        type Other<U> = NoReturn<U>;

        fn rebind<U>(&self) -> Self::Other<U> {
            NoReturn::default()
        }
    }

    #[test]
    fn refused_cell_return_still_unlinks() {
        let mut list: LinkedList<i32, NoReturn<i32>> = LinkedList::new();
        for i in 0..4 {
            list.push_front(i).unwrap();
        }
        assert_eq!(list.pop_front(), Ok(3));
        assert_eq!(list.erase_after(list.begin()), Ok(1));
        assert_eq!(values(&list), vec![2, 0]);
        assert_eq!(list.len(), 2);
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn clear_returns_every_cell() {
        let config = PoolConfig::new(2).with_policy(ReclamationPolicy::Lifo);
        let alloc: ChunkAllocator<i32> = ChunkAllocator::with_config(config).unwrap();
        let mut list = LinkedList::with_allocator(&alloc);
        for i in 0..40 {
            list.push_front(i).unwrap();
        }
        assert_eq!(list.allocator().stats().blocks, 3);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.allocator().stats().live_cells, 0);
        assert_eq!(list.allocator().stats().blocks, 0);
    }

    #[test]
    fn list_rebinds_element_allocator_config() {
        let config = PoolConfig::new(3).with_policy(ReclamationPolicy::Fifo);
        let alloc: ChunkAllocator<u64> = ChunkAllocator::with_config(config).unwrap();
        let list = LinkedList::<u64, _>::with_allocator(&alloc);
        assert_eq!(list.allocator().config(), &config);
        assert!(*list.allocator() == alloc);
    }

    #[test]
    fn counting_allocator_sees_one_allocation_per_node() {
        let mut list: LinkedList<i32, CountingAllocator<HeapAllocator<i32>>> = LinkedList::new();
        for i in 0..8 {
            list.push_front(i).unwrap();
        }
        list.pop_front().unwrap();
        let counts = list.allocator().counts();
        assert_eq!(counts.allocations, 8);
        assert_eq!(counts.deallocations, 1);
        assert_eq!(counts.live(), 7);
    }

    #[test]
    fn debug_lists_values() {
        let mut list: LinkedList<i32> = LinkedList::new();
        list.push_front(2).unwrap();
        list.push_front(1).unwrap();
        assert_eq!(format!("{list:?}"), "[1, 2]");
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn append_matches_vec(items in prop::collection::vec(any::<i16>(), 0..80)) {
                let mut list: Pooled<i16> = LinkedList::new();
                let mut pos = list.begin();
                for &item in &items {
                    pos = list.insert_after(pos, item).unwrap();
                }
                prop_assert_eq!(list.len(), items.len());
                prop_assert_eq!(values(&list), items.clone());
                prop_assert_eq!(list.allocator().stats().live_cells, items.len());
            }

            #[test]
            fn pops_return_reverse_push_order(items in prop::collection::vec(any::<u8>(), 1..60)) {
                let mut list: Pooled<u8> = LinkedList::new();
                for &item in &items {
                    list.push_front(item).unwrap();
                }
                let mut popped = Vec::new();
                while let Ok(v) = list.pop_front() {
                    popped.push(v);
                }
                popped.reverse();
                prop_assert_eq!(popped, items);
                prop_assert_eq!(list.allocator().stats().live_cells, 0);
            }
        }
    }
}
