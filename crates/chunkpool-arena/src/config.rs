//! Pool configuration parameters and validation.

use thiserror::Error;

use crate::policy::ReclamationPolicy;

/// Configuration for a chunk pool.
///
/// Controls block sizing, the reclamation policy, and an optional cap on
/// the number of live blocks. Validated at construction; all values are
/// immutable after the allocator is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Block granularity in units of [`CELLS_PER_UNIT`](Self::CELLS_PER_UNIT)
    /// cells. A block holds `size * 8` cells.
    ///
    /// Default: 2 (16 cells per block). Must be in
    /// `[MIN_SIZE, MAX_SIZE]` so the capacity fits the `u16` live-count.
    pub size: u16,

    /// What happens to a block once its last cell is released.
    ///
    /// Default: [`ReclamationPolicy::None`] (empty blocks are kept for reuse).
    pub policy: ReclamationPolicy,

    /// Maximum number of blocks the pool may hold at once.
    ///
    /// `None` (the default) means the pool grows without bound.
    pub max_blocks: Option<u32>,
}

impl PoolConfig {
    /// Default block granularity.
    pub const DEFAULT_SIZE: u16 = 2;

    /// Smallest accepted block granularity.
    pub const MIN_SIZE: u16 = 2;

    /// Number of cells contributed by each unit of `size`.
    pub const CELLS_PER_UNIT: u16 = 8;

    /// Largest accepted block granularity: the capacity must not exceed
    /// the range of the `u16` live-count.
    pub const MAX_SIZE: u16 = u16::MAX / Self::CELLS_PER_UNIT;

    /// Create a config with the given block granularity.
    ///
    /// Uses the default policy and no block limit.
    pub fn new(size: u16) -> Self {
        Self {
            size,
            policy: ReclamationPolicy::None,
            max_blocks: None,
        }
    }

    /// Replace the reclamation policy.
    pub fn with_policy(mut self, policy: ReclamationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Cap the number of simultaneously live blocks.
    pub fn with_max_blocks(mut self, max_blocks: u32) -> Self {
        self.max_blocks = Some(max_blocks);
        self
    }

    /// Number of cells in each block.
    ///
    /// Saturates for configs that would not pass [`validate`](Self::validate).
    pub fn capacity(&self) -> u16 {
        self.size.saturating_mul(Self::CELLS_PER_UNIT)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < Self::MIN_SIZE {
            return Err(ConfigError::SizeTooSmall {
                size: self.size,
                min: Self::MIN_SIZE,
            });
        }
        if self.size > Self::MAX_SIZE {
            return Err(ConfigError::SizeTooLarge {
                size: self.size,
                max: Self::MAX_SIZE,
            });
        }
        if self.max_blocks == Some(0) {
            return Err(ConfigError::ZeroMaxBlocks);
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

/// Errors detected during [`PoolConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Block granularity below the minimum of 2.
    #[error("block size {size} is below the minimum of {min}")]
    SizeTooSmall {
        /// The configured size.
        size: u16,
        /// The minimum accepted size.
        min: u16,
    },
    /// Block capacity would overflow the live-count counter.
    #[error("block size {size} exceeds the maximum of {max}")]
    SizeTooLarge {
        /// The configured size.
        size: u16,
        /// The maximum accepted size.
        max: u16,
    },
    /// A block limit of zero would make every allocation fail.
    #[error("max_blocks must be at least 1")]
    ZeroMaxBlocks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_holds_sixteen_cells() {
        let config = PoolConfig::default();
        assert_eq!(config.size, 2);
        assert_eq!(config.capacity(), 16);
        assert_eq!(config.policy, ReclamationPolicy::None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn size_one_is_rejected() {
        let result = PoolConfig::new(1).validate();
        assert_eq!(result, Err(ConfigError::SizeTooSmall { size: 1, min: 2 }));
    }

    #[test]
    fn max_size_fits_live_count() {
        let config = PoolConfig::new(PoolConfig::MAX_SIZE);
        assert!(config.validate().is_ok());
        assert!(u32::from(config.capacity()) <= u32::from(u16::MAX));
    }

    #[test]
    fn oversized_is_rejected() {
        let result = PoolConfig::new(PoolConfig::MAX_SIZE + 1).validate();
        assert!(matches!(result, Err(ConfigError::SizeTooLarge { .. })));
    }

    #[test]
    fn zero_block_limit_is_rejected() {
        let result = PoolConfig::default().with_max_blocks(0).validate();
        assert_eq!(result, Err(ConfigError::ZeroMaxBlocks));
    }

    #[test]
    fn builders_compose() {
        let config = PoolConfig::new(4)
            .with_policy(ReclamationPolicy::Fifo)
            .with_max_blocks(3);
        assert_eq!(config.capacity(), 32);
        assert_eq!(config.policy, ReclamationPolicy::Fifo);
        assert_eq!(config.max_blocks, Some(3));
    }
}
