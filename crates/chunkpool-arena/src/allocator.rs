//! The chunked single-cell allocator facade.
//!
//! [`ChunkAllocator`] is the public allocation contract layered over a
//! [`Pool`]. It implements [`CellAllocator`] for generic containers and
//! [`Rebind`] so a container can obtain an allocator for its internal
//! node type from one configured for its element type.

use std::fmt;

use chunkpool_core::{AllocError, CellAddr, CellAllocator, Rebind};

use crate::config::{ConfigError, PoolConfig};
use crate::pool::{Pool, PoolStats};

/// Pooling allocator handing out single cells grouped into fixed blocks.
///
/// # Example
///
/// ```
/// use chunkpool_arena::{ChunkAllocator, PoolConfig, ReclamationPolicy};
/// use chunkpool_core::CellAllocator;
///
/// let config = PoolConfig::new(2).with_policy(ReclamationPolicy::Lifo);
/// let mut alloc: ChunkAllocator<u32> = ChunkAllocator::with_config(config).unwrap();
///
/// let addr = alloc.allocate(1).unwrap();
/// alloc.construct(addr, 7).unwrap();
/// assert_eq!(alloc.get(addr), Some(&7));
///
/// alloc.deallocate(addr, 1).unwrap();
/// assert_eq!(alloc.stats().blocks, 0);
/// ```
pub struct ChunkAllocator<T> {
    pool: Pool<T>,
}

impl<T> ChunkAllocator<T> {
    /// Create an allocator with the default configuration
    /// (16 cells per block, no reclamation).
    pub fn new() -> Self {
        Self {
            pool: Pool::new(PoolConfig::default()),
        }
    }

    /// Create an allocator with a validated configuration.
    pub fn with_config(config: PoolConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pool: Pool::new(config),
        })
    }

    /// Create an allocator with the same configuration as `other`.
    ///
    /// The pools are independent: nothing allocated from `other` is
    /// visible through the new allocator.
    pub fn from_other<U>(other: &ChunkAllocator<U>) -> Self {
        Self {
            pool: Pool::new(*other.config()),
        }
    }

    /// The configuration this allocator was built with.
    pub fn config(&self) -> &PoolConfig {
        self.pool.config()
    }

    /// Snapshot of the backing pool's counters.
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Read-only access to the backing pool.
    pub fn pool(&self) -> &Pool<T> {
        &self.pool
    }
}

impl<T> Default for ChunkAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ChunkAllocator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkAllocator")
            .field("config", self.config())
            .field("stats", &self.stats())
            .finish()
    }
}

/// Allocators compare equal when their configurations match. Pool
/// contents never take part in the comparison.
impl<T, U> PartialEq<ChunkAllocator<U>> for ChunkAllocator<T> {
    fn eq(&self, other: &ChunkAllocator<U>) -> bool {
        self.config() == other.config()
    }
}

impl<T> Eq for ChunkAllocator<T> {}

impl<T> CellAllocator<T> for ChunkAllocator<T> {
    fn allocate(&mut self, count: usize) -> Result<CellAddr, AllocError> {
        if count != 1 {
            return Err(AllocError::UnsupportedSize { requested: count });
        }
        self.pool.acquire_cell(count)
    }

    fn deallocate(&mut self, addr: CellAddr, count: usize) -> Result<(), AllocError> {
        if count != 1 {
            return Err(AllocError::UnsupportedSize { requested: count });
        }
        self.pool.release_cell(addr, count)
    }

    fn construct(&mut self, addr: CellAddr, value: T) -> Result<(), AllocError> {
        self.pool.construct(addr, value)
    }

    fn destroy(&mut self, addr: CellAddr) -> Result<T, AllocError> {
        self.pool.take(addr)
    }

    fn get(&self, addr: CellAddr) -> Option<&T> {
        self.pool.get(addr)
    }

    fn get_mut(&mut self, addr: CellAddr) -> Option<&mut T> {
        self.pool.get_mut(addr)
    }
}

impl<T> Rebind for ChunkAllocator<T> {
    type Other<U> = ChunkAllocator<U>;

    fn rebind<U>(&self) -> Self::Other<U> {
        ChunkAllocator::from_other(self)
    }
}
