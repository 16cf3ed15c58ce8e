//! chunkpool: a fixed-block pooling allocator and a linked list built on it.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the chunkpool sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use chunkpool::prelude::*;
//!
//! let config = PoolConfig::new(2).with_policy(ReclamationPolicy::Fifo);
//! let alloc: ChunkAllocator<u64> = ChunkAllocator::with_config(config).unwrap();
//!
//! let mut list = LinkedList::with_allocator(&alloc);
//! let mut pos = list.begin();
//! for i in 0..20 {
//!     pos = list.insert_after(pos, i).unwrap();
//! }
//! assert_eq!(list.iter().sum::<u64>(), 190);
//! // 20 nodes at 16 cells per block.
//! assert_eq!(list.allocator().stats().blocks, 2);
//!
//! list.clear();
//! assert_eq!(list.allocator().stats().blocks, 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `chunkpool-core` | IDs, cell addresses, allocator traits, errors |
//! | [`arena`] | `chunkpool-arena` | Blocks, pools, policies, allocators |
//! | [`list`] | `chunkpool-list` | Singly linked list and cursors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core identifiers, traits, and errors (`chunkpool-core`).
///
/// Contains [`types::CellAddr`], the [`types::CellAllocator`] contract and
/// the [`types::Rebind`] trait containers use to obtain node allocators.
pub use chunkpool_core as types;

/// Pools and allocators (`chunkpool-arena`).
///
/// [`arena::ChunkAllocator`] is the pooled allocator;
/// [`arena::HeapAllocator`] and [`arena::CountingAllocator`] share its
/// contract.
pub use chunkpool_arena as arena;

/// Linked list over any [`types::Rebind`] allocator (`chunkpool-list`).
pub use chunkpool_list as list;

/// Common imports for typical chunkpool usage.
///
/// ```rust
/// use chunkpool::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use chunkpool_core::{AllocError, CellAddr, CellAllocator, ListError, Rebind};

    // Allocators and configuration
    pub use chunkpool_arena::{
        ChunkAllocator, ConfigError, CountingAllocator, HeapAllocator, PoolConfig, PoolStats,
        ReclamationPolicy,
    };

    // List
    pub use chunkpool_list::{Cursor, LinkedList};
}
