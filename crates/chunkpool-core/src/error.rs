//! Error types for the chunkpool allocator and its containers.
//!
//! Organized by subsystem: allocation (the cell allocator contract) and
//! list (the linked list built on top of it). Neither is retried or
//! recovered internally; both propagate to the immediate caller.

use thiserror::Error;

use crate::id::CellAddr;

/// Errors from the cell allocator contract.
///
/// A failed operation never mutates allocator state: either a cell is
/// fully claimed (or released) or nothing changes.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AllocError {
    /// A multi-cell request. Only single-cell allocation and
    /// deallocation are supported.
    #[error("unsupported allocation size: requested {requested} cells, only single-cell requests are supported")]
    UnsupportedSize {
        /// Number of cells that was requested.
        requested: usize,
    },
    /// The address does not name a cell in the required state: its block
    /// is gone or foreign, its index is out of bounds, or the cell was
    /// already released (double free).
    #[error("invalid cell address: {addr}")]
    InvalidAddress {
        /// The rejected address.
        addr: CellAddr,
    },
    /// The allocator refused to grow past its configured limit.
    #[error("allocator capacity exceeded: limit {limit}")]
    CapacityExceeded {
        /// The limit that would have been exceeded.
        limit: usize,
    },
}

/// Errors from linked list operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ListError {
    /// The operation needs a head node but the list is empty.
    #[error("list is empty")]
    Empty,
    /// A cursor was advanced, dereferenced, or used as an insertion
    /// point past the end of the list.
    #[error("cursor is out of range")]
    OutOfRange,
    /// The underlying allocator failed.
    #[error("allocation failed: {0}")]
    Alloc(#[from] AllocError),
}
