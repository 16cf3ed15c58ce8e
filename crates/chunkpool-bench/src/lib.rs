//! Benchmark profiles for the chunkpool allocators.
//!
//! - [`policy_profiles`]: one [`PoolConfig`] per reclamation policy at the
//!   reference block size
//! - [`reference_churn`]: the seeded churn script every pool benchmark
//!   replays

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use chunkpool_arena::{PoolConfig, ReclamationPolicy};
use chunkpool_test_utils::ChurnScript;

/// Block size used by the reference profiles (`size × 8` cells per block).
pub const REFERENCE_SIZE: u16 = 4;

/// Operations in the reference churn script.
pub const REFERENCE_CHURN_OPS: usize = 10_000;

/// One configuration per policy, in [`ReclamationPolicy::ALL`] order.
pub fn policy_profiles() -> Vec<(ReclamationPolicy, PoolConfig)> {
    ReclamationPolicy::ALL
        .into_iter()
        .map(|policy| (policy, PoolConfig::new(REFERENCE_SIZE).with_policy(policy)))
        .collect()
}

/// Seeded churn with slightly more allocations than releases, so the live
/// set drifts upward while blocks keep emptying and refilling.
pub fn reference_churn(seed: u64) -> ChurnScript {
    ChurnScript::generate(seed, REFERENCE_CHURN_OPS, 0.45)
}
