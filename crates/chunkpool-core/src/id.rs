//! Strongly-typed identifiers for blocks and the cells they own.

use std::fmt;

/// Identifies a block within a pool.
///
/// Block IDs are handed out from a per-pool monotonic counter and are
/// never reused, so an address into a reclaimed block can always be told
/// apart from an address into a block created later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BlockId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Address of a single cell handed out by an allocator.
///
/// Carries the owning block's ID (the back-reference used to resolve the
/// block in O(1) on release) and the cell's index within that block.
/// Addresses are plain values: copying one does not duplicate the cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellAddr {
    block: BlockId,
    index: u32,
}

impl CellAddr {
    /// Create an address for cell `index` of `block`.
    pub fn new(block: BlockId, index: u32) -> Self {
        Self { block, index }
    }

    /// The block that owns this cell.
    pub fn block(&self) -> BlockId {
        self.block
    }

    /// Index of the cell within its block.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for CellAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellAddr(block={}, cell={})", self.block, self.index)
    }
}
