//! Fixed-capacity blocks of single-value cells.
//!
//! A [`Block`] is the fundamental storage unit of a pool. It owns a fixed
//! array of cells, hands them out one at a time, and tracks how many are
//! live so the pool can tell when it is full or empty in O(1).

use chunkpool_core::{BlockId, CellAddr};

/// One storage slot.
///
/// `owner` is the back-reference to the block that created the cell and
/// never changes; only `occupied` (and the value it guards) toggles.
struct Cell<T> {
    value: Option<T>,
    occupied: bool,
    owner: BlockId,
}

/// A fixed-capacity array of cells with live-count tracking.
///
/// Invariant: `live` equals the number of occupied cells and lies in
/// `[0, capacity]`.
pub struct Block<T> {
    id: BlockId,
    cells: Box<[Cell<T>]>,
    live: u16,
}

impl<T> Block<T> {
    /// Create an empty block with `capacity` cells.
    pub fn new(id: BlockId, capacity: u16) -> Self {
        let cells = (0..capacity)
            .map(|_| Cell {
                value: None,
                occupied: false,
                owner: id,
            })
            .collect();
        Self { id, cells, live: 0 }
    }

    /// This block's identity.
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Claim the first free cell in index order.
    ///
    /// Returns `None` if the block is full. O(capacity) worst case.
    pub fn claim(&mut self) -> Option<CellAddr> {
        if !self.has_free() {
            return None;
        }
        let index = self.cells.iter().position(|c| !c.occupied)?;
        self.cells[index].occupied = true;
        self.live += 1;
        Some(CellAddr::new(self.id, index as u32))
    }

    /// Release a claimed cell, dropping any value still stored in it.
    ///
    /// Returns `false` without changing anything if `addr` does not name
    /// an occupied cell of this block.
    pub fn release(&mut self, addr: CellAddr) -> bool {
        let Some(index) = self.resolve(addr) else {
            return false;
        };
        let cell = &mut self.cells[index];
        if !cell.occupied {
            return false;
        }
        cell.occupied = false;
        cell.value = None;
        self.live -= 1;
        true
    }

    /// Move `value` into a claimed, empty cell.
    ///
    /// Hands `value` back if the cell is not claimed or already holds one.
    pub fn construct(&mut self, addr: CellAddr, value: T) -> Result<(), T> {
        match self.occupied_cell_mut(addr) {
            Some(cell) if cell.value.is_none() => {
                cell.value = Some(value);
                Ok(())
            }
            _ => Err(value),
        }
    }

    /// Move the value out of a claimed cell, leaving the cell claimed.
    pub fn take(&mut self, addr: CellAddr) -> Option<T> {
        self.occupied_cell_mut(addr)?.value.take()
    }

    /// Borrow the value stored in a claimed cell.
    pub fn get(&self, addr: CellAddr) -> Option<&T> {
        let index = self.resolve(addr)?;
        let cell = &self.cells[index];
        if cell.occupied {
            cell.value.as_ref()
        } else {
            None
        }
    }

    /// Mutably borrow the value stored in a claimed cell.
    pub fn get_mut(&mut self, addr: CellAddr) -> Option<&mut T> {
        self.occupied_cell_mut(addr)?.value.as_mut()
    }

    /// Whether `addr` names an occupied cell of this block.
    pub fn is_claimed(&self, addr: CellAddr) -> bool {
        self.resolve(addr).is_some_and(|i| self.cells[i].occupied)
    }

    /// Whether at least one cell is free.
    pub fn has_free(&self) -> bool {
        usize::from(self.live) < self.cells.len()
    }

    /// Whether no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of occupied cells.
    pub fn live(&self) -> u16 {
        self.live
    }

    /// Total number of cells.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Map an address to a cell index, checking it lies within this block.
    fn resolve(&self, addr: CellAddr) -> Option<usize> {
        if addr.block() != self.id {
            return None;
        }
        let index = addr.index() as usize;
        let cell = self.cells.get(index)?;
        (cell.owner == addr.block()).then_some(index)
    }

    fn occupied_cell_mut(&mut self, addr: CellAddr) -> Option<&mut Cell<T>> {
        let index = self.resolve(addr)?;
        let cell = &mut self.cells[index];
        cell.occupied.then_some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(capacity: u16) -> Block<u32> {
        Block::new(BlockId(0), capacity)
    }

    #[test]
    fn claim_hands_out_cells_in_index_order() {
        let mut b = block(16);
        let a0 = b.claim().unwrap();
        let a1 = b.claim().unwrap();
        assert_eq!(a0.index(), 0);
        assert_eq!(a1.index(), 1);
        assert_eq!(a0.block(), BlockId(0));
        assert_eq!(b.live(), 2);
    }

    #[test]
    fn claim_fails_when_full() {
        let mut b = block(16);
        for _ in 0..16 {
            assert!(b.claim().is_some());
        }
        assert!(!b.has_free());
        assert!(b.claim().is_none());
        assert_eq!(b.live(), 16);
    }

    #[test]
    fn release_reopens_lowest_cell() {
        let mut b = block(16);
        let addrs: Vec<_> = (0..4).map(|_| b.claim().unwrap()).collect();
        assert!(b.release(addrs[1]));
        assert_eq!(b.live(), 3);
        assert_eq!(b.claim().unwrap().index(), 1);
    }

    #[test]
    fn release_rejects_foreign_block() {
        let mut b = block(16);
        b.claim().unwrap();
        assert!(!b.release(CellAddr::new(BlockId(1), 0)));
        assert_eq!(b.live(), 1);
    }

    #[test]
    fn release_rejects_out_of_bounds_index() {
        let mut b = block(16);
        b.claim().unwrap();
        assert!(!b.release(CellAddr::new(BlockId(0), 16)));
        assert_eq!(b.live(), 1);
    }

    #[test]
    fn double_release_is_rejected() {
        let mut b = block(16);
        let addr = b.claim().unwrap();
        assert!(b.release(addr));
        assert!(!b.release(addr));
        assert_eq!(b.live(), 0);
        assert!(b.is_empty());
    }

    #[test]
    fn construct_then_take_moves_value() {
        let mut b = block(16);
        let addr = b.claim().unwrap();
        b.construct(addr, 42).unwrap();
        assert_eq!(b.get(addr), Some(&42));
        *b.get_mut(addr).unwrap() = 7;
        assert_eq!(b.take(addr), Some(7));
        assert_eq!(b.get(addr), None);
        assert!(b.is_claimed(addr));
    }

    #[test]
    fn construct_into_free_cell_hands_value_back() {
        let mut b = block(16);
        let addr = CellAddr::new(BlockId(0), 3);
        assert_eq!(b.construct(addr, 9), Err(9));
    }

    #[test]
    fn construct_twice_hands_second_value_back() {
        let mut b = block(16);
        let addr = b.claim().unwrap();
        b.construct(addr, 1).unwrap();
        assert_eq!(b.construct(addr, 2), Err(2));
        assert_eq!(b.get(addr), Some(&1));
    }

    #[test]
    fn release_drops_stored_value() {
        let mut b: Block<String> = Block::new(BlockId(0), 16);
        let addr = b.claim().unwrap();
        b.construct(addr, "payload".to_string()).unwrap();
        assert!(b.release(addr));
        let again = b.claim().unwrap();
        assert_eq!(again, addr);
        assert_eq!(b.get(again), None);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn live_count_tracks_claims_minus_releases(
                ops in proptest::collection::vec(any::<bool>(), 0..200),
            ) {
                let mut b = block(16);
                let mut held = Vec::new();
                let mut claims = 0usize;
                let mut releases = 0usize;
                for claim in ops {
                    if claim {
                        if let Some(addr) = b.claim() {
                            held.push(addr);
                            claims += 1;
                        }
                    } else if let Some(addr) = held.pop() {
                        prop_assert!(b.release(addr));
                        releases += 1;
                    }
                    prop_assert!(usize::from(b.live()) <= b.capacity());
                    prop_assert_eq!(usize::from(b.live()), claims - releases);
                    prop_assert_eq!(b.has_free(), usize::from(b.live()) < b.capacity());
                    prop_assert_eq!(b.is_empty(), b.live() == 0);
                }
            }
        }
    }
}
