//! Fixed-block pooling allocation for single-value cells.
//!
//! Hands out storage one cell at a time, grouped into fixed-capacity
//! blocks, with a configurable policy for reclaiming blocks once they
//! empty. This crate contains no `unsafe` code: cells are slots in
//! index-addressed blocks rather than raw pointers.
//!
//! # Architecture
//!
//! ```text
//! ChunkAllocator<T> (CellAllocator + Rebind facade)
//! └── Pool<T>
//!     ├── IndexMap<BlockId, Block<T>>  (insertion-ordered, keyed by handle)
//!     │   └── Block<T> → Cell<T>[size × 8]  (value, occupied, owner)
//!     └── PoolConfig { size, policy, max_blocks }
//! ```
//!
//! # Allocation
//!
//! - **Most-recent fit:** blocks are scanned newest-first; a new block is
//!   appended only when every existing block is full.
//! - **Back-reference:** every [`CellAddr`](chunkpool_core::CellAddr)
//!   carries its block's ID, so release resolves the block in O(1).
//! - **Reclamation:** when a release empties a block, the
//!   [`ReclamationPolicy`] decides whether the block is kept or removed.
//!
//! [`HeapAllocator`] offers the same contract without blocks, and
//! [`CountingAllocator`] wraps either to count live allocations.
//!
//! Neither allocator is thread-safe; every mutating operation takes
//! `&mut self`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod block;
pub mod config;
pub mod counting;
pub mod heap;
pub mod policy;
pub mod pool;

// Public re-exports for the primary API surface.
pub use allocator::ChunkAllocator;
pub use config::{ConfigError, PoolConfig};
pub use counting::{AllocCounts, CountingAllocator};
pub use heap::HeapAllocator;
pub use policy::{ParsePolicyError, ReclamationPolicy};
pub use pool::{Pool, PoolStats};
