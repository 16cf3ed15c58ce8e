//! Core types and traits for the chunkpool allocator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the chunkpool workspace:
//! block and cell identifiers, error types, and the allocator traits
//! that containers are written against.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod traits;

pub use error::{AllocError, ListError};
pub use id::{BlockId, CellAddr};
pub use traits::{CellAllocator, Rebind};
