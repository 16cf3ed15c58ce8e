//! Positions within a [`LinkedList`](crate::LinkedList).

use chunkpool_core::CellAddr;

/// A position in a list: either a node or the end sentinel.
///
/// Cursors are plain values and do not borrow the list, and they carry no
/// generation. A cursor at an erased node reports an invalid address only
/// while its cell stays free; once a later insert reuses the cell, the
/// cursor reads the new occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    node: Option<CellAddr>,
}

impl Cursor {
    /// The end sentinel, one past the last node.
    pub const END: Cursor = Cursor { node: None };

    pub(crate) fn at(node: Option<CellAddr>) -> Self {
        Self { node }
    }

    /// Address of the node this cursor designates, `None` at the end.
    pub fn addr(&self) -> Option<CellAddr> {
        self.node
    }

    /// Whether this is the end sentinel.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::END
    }
}
