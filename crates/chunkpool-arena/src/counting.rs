//! Allocation-counting decorator.
//!
//! [`CountingAllocator`] wraps any [`CellAllocator`] and records how many
//! cells were handed out and returned, so leak checks can be made against
//! a single allocator instance instead of process-wide hooks.

use chunkpool_core::{AllocError, CellAddr, CellAllocator, Rebind};

/// Counters maintained by a [`CountingAllocator`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocCounts {
    /// Successful `allocate` calls.
    pub allocations: u64,
    /// Successful `deallocate` calls.
    pub deallocations: u64,
    /// `allocate` or `deallocate` calls that returned an error.
    pub failures: u64,
    /// Highest number of simultaneously live cells observed.
    pub peak_live: u64,
}

impl AllocCounts {
    /// Cells allocated and not yet deallocated.
    ///
    /// Cells the wrapped allocator held before wrapping are not tracked;
    /// returning them only raises `deallocations`, so this saturates at 0.
    pub fn live(&self) -> u64 {
        self.allocations.saturating_sub(self.deallocations)
    }
}

/// Decorator counting the allocations that pass through it.
///
/// Only successful calls change `allocations` / `deallocations`; a failed
/// call bumps `failures` and nothing else, so [`AllocCounts::live`] always
/// equals the number of successful, unmatched `allocate` calls.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CountingAllocator<A> {
    inner: A,
    counts: AllocCounts,
}

impl<A> CountingAllocator<A> {
    /// Wrap `inner`.
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            counts: AllocCounts::default(),
        }
    }

    /// Current counters.
    pub fn counts(&self) -> AllocCounts {
        self.counts
    }

    /// The wrapped allocator.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Unwrap, discarding the counters.
    pub fn into_inner(self) -> A {
        self.inner
    }

    fn record<R>(&mut self, result: &Result<R, AllocError>) {
        if result.is_err() {
            self.counts.failures += 1;
        }
    }
}

impl<T, A: CellAllocator<T>> CellAllocator<T> for CountingAllocator<A> {
    fn allocate(&mut self, count: usize) -> Result<CellAddr, AllocError> {
        let result = self.inner.allocate(count);
        self.record(&result);
        if result.is_ok() {
            self.counts.allocations += 1;
            self.counts.peak_live = self.counts.peak_live.max(self.counts.live());
        }
        result
    }

    fn deallocate(&mut self, addr: CellAddr, count: usize) -> Result<(), AllocError> {
        let result = self.inner.deallocate(addr, count);
        self.record(&result);
        if result.is_ok() {
            self.counts.deallocations += 1;
        }
        result
    }

    fn construct(&mut self, addr: CellAddr, value: T) -> Result<(), AllocError> {
        self.inner.construct(addr, value)
    }

    fn destroy(&mut self, addr: CellAddr) -> Result<T, AllocError> {
        self.inner.destroy(addr)
    }

    fn get(&self, addr: CellAddr) -> Option<&T> {
        self.inner.get(addr)
    }

    fn get_mut(&mut self, addr: CellAddr) -> Option<&mut T> {
        self.inner.get_mut(addr)
    }
}

impl<A: Rebind> Rebind for CountingAllocator<A> {
    type Other<U> = CountingAllocator<A::Other<U>>;

    fn rebind<U>(&self) -> Self::Other<U> {
        CountingAllocator::new(self.inner.rebind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::ChunkAllocator;

    #[test]
    fn counts_successful_calls_only() {
        let mut alloc = CountingAllocator::new(ChunkAllocator::<u32>::new());
        let a = alloc.allocate(1).unwrap();
        let b = alloc.allocate(1).unwrap();
        assert!(alloc.allocate(2).is_err());
        alloc.deallocate(a, 1).unwrap();
        assert!(alloc.deallocate(a, 1).is_err());

        let counts = alloc.counts();
        assert_eq!(counts.allocations, 2);
        assert_eq!(counts.deallocations, 1);
        assert_eq!(counts.failures, 2);
        assert_eq!(counts.live(), 1);
        assert_eq!(counts.peak_live, 2);
        assert!(alloc.inner().pool().is_claimed(b));
    }

    #[test]
    fn live_matches_inner_pool() {
        let mut alloc = CountingAllocator::new(ChunkAllocator::<u32>::new());
        let addrs: Vec<_> = (0..40).map(|_| alloc.allocate(1).unwrap()).collect();
        for addr in &addrs[..25] {
            alloc.deallocate(*addr, 1).unwrap();
        }
        assert_eq!(alloc.counts().live(), 15);
        assert_eq!(alloc.inner().stats().live_cells, 15);
        assert_eq!(alloc.counts().peak_live, 40);
    }

    #[test]
    fn wrapping_non_empty_allocator_saturates_live() {
        let mut inner: ChunkAllocator<u32> = ChunkAllocator::new();
        let old = inner.allocate(1).unwrap();
        let mut alloc = CountingAllocator::new(inner);
        alloc.deallocate(old, 1).unwrap();
        assert_eq!(alloc.counts().deallocations, 1);
        assert_eq!(alloc.counts().live(), 0);

        alloc.allocate(1).unwrap();
        assert_eq!(alloc.counts().live(), 0);
        assert_eq!(alloc.counts().peak_live, 0);
        assert_eq!(alloc.inner().stats().live_cells, 1);
    }

    #[test]
    fn rebind_resets_counters() {
        let mut alloc = CountingAllocator::new(ChunkAllocator::<u32>::new());
        alloc.allocate(1).unwrap();
        let other: CountingAllocator<ChunkAllocator<String>> = alloc.rebind();
        assert_eq!(other.counts(), AllocCounts::default());
        assert_eq!(other.inner().config(), alloc.inner().config());
    }
}
