//! Singly linked list for the chunkpool allocators.
//!
//! [`LinkedList`] is a forward-only list whose nodes live in cells handed
//! out by a [`CellAllocator`](chunkpool_core::CellAllocator). The list is
//! parameterized by an allocator for its element type and rebinds it to
//! its node type, so the same list works over a
//! [`ChunkAllocator`](chunkpool_arena::ChunkAllocator), the default
//! [`HeapAllocator`](chunkpool_arena::HeapAllocator), or any decorator
//! implementing [`Rebind`](chunkpool_core::Rebind).
//!
//! Positions are [`Cursor`] values: a node address or the end sentinel.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod iter;
pub mod list;

pub use cursor::Cursor;
pub use iter::Iter;
pub use list::{LinkedList, Node};
