//! Test utilities and mock allocators for chunkpool development.
//!
//! Provides a [`FailingAllocator`] for exercising error paths, list
//! fixtures ([`push_front_all`], [`append_all`], [`collect_values`]) and
//! seeded allocation churn ([`ChurnScript`]) shared by the test suites and
//! benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod churn;
pub mod fixtures;

pub use churn::{run_churn, ChurnOp, ChurnScript};
pub use fixtures::{append_all, collect_values, push_front_all};

use chunkpool_arena::HeapAllocator;
use chunkpool_core::{AllocError, CellAddr, CellAllocator, Rebind};

/// Allocator that succeeds `budget` times, then fails every allocation.
///
/// Backed by a [`HeapAllocator`]; deallocation and cell access always
/// delegate. Failed allocations report
/// [`AllocError::CapacityExceeded`] with the budget as the limit.
/// Rebinding carries the remaining budget over to the new allocator,
/// so a container that rebinds on construction sees the same limit.
#[derive(Debug)]
pub struct FailingAllocator<T> {
    inner: HeapAllocator<T>,
    budget: usize,
    issued: usize,
}

impl<T> FailingAllocator<T> {
    pub fn new(budget: usize) -> Self {
        Self {
            inner: HeapAllocator::new(),
            budget,
            issued: 0,
        }
    }

    /// Allocations handed out so far.
    pub fn issued(&self) -> usize {
        self.issued
    }

    /// Cells currently live in the backing heap.
    pub fn live_count(&self) -> usize {
        self.inner.live_count()
    }
}

impl<T> CellAllocator<T> for FailingAllocator<T> {
    fn allocate(&mut self, count: usize) -> Result<CellAddr, AllocError> {
        if self.issued >= self.budget {
            return Err(AllocError::CapacityExceeded { limit: self.budget });
        }
        let addr = self.inner.allocate(count)?;
        self.issued += 1;
        Ok(addr)
    }

    fn deallocate(&mut self, addr: CellAddr, count: usize) -> Result<(), AllocError> {
        self.inner.deallocate(addr, count)
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

impl<T> Rebind for FailingAllocator<T> {
    type Other<U> = FailingAllocator<U>;

    fn rebind<U>(&self) -> Self::Other<U> {
        FailingAllocator::new(self.budget.saturating_sub(self.issued))
    }
}
