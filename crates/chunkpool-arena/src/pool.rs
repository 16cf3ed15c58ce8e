//! Growable, insertion-ordered pools of blocks.
//!
//! A [`Pool`] owns every [`Block`] backing one allocator instance. New
//! allocations go to the most recently created block with room; a new
//! block is appended only when every existing block is full. When a
//! release empties a block, the configured [`ReclamationPolicy`] decides
//! whether it stays for reuse or is removed.

use indexmap::IndexMap;
use tracing::{debug, trace};

use chunkpool_core::{AllocError, BlockId, CellAddr};

use crate::block::Block;
use crate::config::PoolConfig;
use crate::policy::ReclamationPolicy;

/// Point-in-time counters for a [`Pool`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Blocks currently in the pool.
    pub blocks: usize,
    /// Cells currently claimed across all blocks.
    pub live_cells: usize,
    /// Total cells across all blocks (claimed or not).
    pub capacity_cells: usize,
    /// Blocks created over the pool's lifetime.
    pub blocks_created: u64,
    /// Blocks removed by the reclamation policy over the pool's lifetime.
    pub blocks_reclaimed: u64,
}

/// An insertion-ordered collection of exclusively-owned blocks.
///
/// Blocks are keyed by a [`BlockId`] drawn from a monotonic counter, so a
/// cell address resolves to its block in O(1) and addresses into removed
/// blocks are rejected rather than aliasing a newer block.
///
/// ```text
/// blocks: [ B0 | B1 | B2 ]   ← insertion order, oldest first
///                      ▲
///                      └── first candidate for new allocations
/// ```
pub struct Pool<T> {
    blocks: IndexMap<BlockId, Block<T>>,
    config: PoolConfig,
    /// Next block ID to hand out. Never reused.
    next_id: u32,
    blocks_created: u64,
    blocks_reclaimed: u64,
}

impl<T> Pool<T> {
    /// Create an empty pool.
    ///
    /// `config` is assumed valid; callers validate it first (see
    /// [`ChunkAllocator::with_config`](crate::ChunkAllocator::with_config)).
    pub fn new(config: PoolConfig) -> Self {
        Self {
            blocks: IndexMap::new(),
            config,
            next_id: 0,
            blocks_created: 0,
            blocks_reclaimed: 0,
        }
    }

    /// Claim one cell, growing the pool if every block is full.
    ///
    /// Blocks are scanned from the most recently appended backward
    /// (most-recent fit). Returns `Err(AllocError::UnsupportedSize)` if
    /// `count != 1`, or `Err(AllocError::CapacityExceeded)` if a new block
    /// is needed and `max_blocks` is reached. No state changes on error.
    pub fn acquire_cell(&mut self, count: usize) -> Result<CellAddr, AllocError> {
        check_single(count)?;

        if let Some(addr) = self
            .blocks
            .values_mut()
            .rev()
            .filter(|b| b.has_free())
            .find_map(Block::claim)
        {
            trace!(%addr, "claimed cell");
            return Ok(addr);
        }

        let limit = self.block_count();
        // A fresh block always has a free cell; the error arm is unreachable
        // for validated configs.
        let addr = self
            .grow()?
            .claim()
            .ok_or(AllocError::CapacityExceeded { limit })?;
        trace!(%addr, "claimed cell in new block");
        Ok(addr)
    }

    /// Release one cell, reclaiming its block if it became empty.
    ///
    /// Returns `Err(AllocError::UnsupportedSize)` if `count != 1`, or
    /// `Err(AllocError::InvalidAddress)` if `addr` does not name a claimed
    /// cell of a block in this pool. No state changes on error.
    pub fn release_cell(&mut self, addr: CellAddr, count: usize) -> Result<(), AllocError> {
        check_single(count)?;

        let block = self
            .blocks
            .get_mut(&addr.block())
            .ok_or(AllocError::InvalidAddress { addr })?;
        if !block.release(addr) {
            return Err(AllocError::InvalidAddress { addr });
        }
        trace!(%addr, "released cell");

        if block.is_empty() {
            self.reclaim(addr.block());
        }
        Ok(())
    }

    /// Move `value` into a claimed, empty cell.
    pub fn construct(&mut self, addr: CellAddr, value: T) -> Result<(), AllocError> {
        self.blocks
            .get_mut(&addr.block())
            .ok_or(AllocError::InvalidAddress { addr })?
            .construct(addr, value)
            .map_err(|_| AllocError::InvalidAddress { addr })
    }

    /// Move the value out of a claimed cell.
    pub fn take(&mut self, addr: CellAddr) -> Result<T, AllocError> {
        self.blocks
            .get_mut(&addr.block())
            .and_then(|b| b.take(addr))
            .ok_or(AllocError::InvalidAddress { addr })
    }

    /// Borrow the value stored at `addr`.
    pub fn get(&self, addr: CellAddr) -> Option<&T> {
        self.blocks.get(&addr.block())?.get(addr)
    }

    /// Mutably borrow the value stored at `addr`.
    pub fn get_mut(&mut self, addr: CellAddr) -> Option<&mut T> {
        self.blocks.get_mut(&addr.block())?.get_mut(addr)
    }

    /// Whether `addr` names a claimed cell in this pool.
    pub fn is_claimed(&self, addr: CellAddr) -> bool {
        self.blocks
            .get(&addr.block())
            .is_some_and(|b| b.is_claimed(addr))
    }

    /// Whether the block with the given ID is still in the pool.
    pub fn contains_block(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }

    /// Block IDs in insertion order, oldest first.
    pub fn block_ids(&self) -> impl DoubleEndedIterator<Item = BlockId> + '_ {
        self.blocks.keys().copied()
    }

    /// Number of blocks currently in the pool.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of claimed cells across all blocks.
    pub fn live_cells(&self) -> usize {
        self.blocks.values().map(|b| usize::from(b.live())).sum()
    }

    /// Total cells across all blocks.
    pub fn capacity_cells(&self) -> usize {
        self.blocks.values().map(Block::capacity).sum()
    }

    /// The configuration this pool was built with.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            blocks: self.block_count(),
            live_cells: self.live_cells(),
            capacity_cells: self.capacity_cells(),
            blocks_created: self.blocks_created,
            blocks_reclaimed: self.blocks_reclaimed,
        }
    }

    /// Append a new block and return it.
    fn grow(&mut self) -> Result<&mut Block<T>, AllocError> {
        if let Some(max) = self.config.max_blocks {
            if self.blocks.len() >= max as usize {
                return Err(AllocError::CapacityExceeded {
                    limit: max as usize,
                });
            }
        }
        let next = self
            .next_id
            .checked_add(1)
            .ok_or(AllocError::CapacityExceeded {
                limit: u32::MAX as usize,
            })?;
        let id = BlockId(std::mem::replace(&mut self.next_id, next));
        self.blocks_created += 1;
        debug!(
            block = %id,
            blocks = self.blocks.len() + 1,
            capacity = self.config.capacity(),
            "pool grew"
        );
        let capacity = self.config.capacity();
        Ok(self
            .blocks
            .entry(id)
            .or_insert_with(|| Block::new(id, capacity)))
    }

    /// Apply the reclamation policy to a block that just became empty.
    fn reclaim(&mut self, id: BlockId) {
        let position = match self.config.policy {
            ReclamationPolicy::None => return,
            ReclamationPolicy::Lifo => self.blocks.keys().position(|&k| k == id),
            ReclamationPolicy::Fifo => self.blocks.keys().rposition(|&k| k == id),
        };
        if let Some(position) = position {
            self.blocks.shift_remove_index(position);
            self.blocks_reclaimed += 1;
            debug!(
                block = %id,
                blocks = self.blocks.len(),
                policy = %self.config.policy,
                "reclaimed empty block"
            );
        }
    }
}

impl<T> Drop for Pool<T> {
    fn drop(&mut self) {
        let live = self.live_cells();
        if live > 0 {
            debug!(
                blocks = self.blocks.len(),
                live, "dropping pool with outstanding cells"
            );
        }
    }
}

fn check_single(count: usize) -> Result<(), AllocError> {
    if count == 1 {
        Ok(())
    } else {
        Err(AllocError::UnsupportedSize { requested: count })
    }
}
