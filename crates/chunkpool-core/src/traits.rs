//! Allocator traits that containers are written against.

use crate::error::AllocError;
use crate::id::CellAddr;

/// Single-cell storage for values of type `T`.
///
/// Mirrors the allocate / construct / destroy / deallocate split of a
/// classic container allocator: [`allocate`](CellAllocator::allocate)
/// claims an empty cell, [`construct`](CellAllocator::construct) moves a
/// value into it, [`destroy`](CellAllocator::destroy) moves it back out,
/// and [`deallocate`](CellAllocator::deallocate) returns the cell.
///
/// Only single-cell requests are supported; any other `count` fails with
/// [`AllocError::UnsupportedSize`] without touching allocator state.
pub trait CellAllocator<T> {
    /// Claim `count` cells. `count` must be 1.
    fn allocate(&mut self, count: usize) -> Result<CellAddr, AllocError>;

    /// Return `count` cells starting at `addr`. `count` must be 1.
    ///
    /// Any value still constructed in the cell is dropped.
    fn deallocate(&mut self, addr: CellAddr, count: usize) -> Result<(), AllocError>;

    /// Move `value` into a claimed, empty cell.
    ///
    /// Fails with [`AllocError::InvalidAddress`] if the cell is not
    /// claimed or already holds a value; `value` is dropped in that case.
    fn construct(&mut self, addr: CellAddr, value: T) -> Result<(), AllocError>;

    /// Move the value out of a cell, leaving it claimed but empty.
    fn destroy(&mut self, addr: CellAddr) -> Result<T, AllocError>;

    /// Borrow the value stored at `addr`, if any.
    fn get(&self, addr: CellAddr) -> Option<&T>;

    /// Mutably borrow the value stored at `addr`, if any.
    fn get_mut(&mut self, addr: CellAddr) -> Option<&mut T>;
}

/// Produce an equivalent allocator for a different element type.
///
/// The rebound allocator shares its configuration with `self` but never
/// its storage: allocators for different element types own independent
/// pools.
pub trait Rebind {
    /// The allocator type for elements of type `U`.
    type Other<U>: CellAllocator<U>;

    /// Build an allocator for `U` with the same configuration.
    fn rebind<U>(&self) -> Self::Other<U>;
}
