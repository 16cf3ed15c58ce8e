//! Seeded allocate/release churn.
//!
//! A [`ChurnScript`] is a deterministic sequence of allocations and
//! releases generated from a seed, replayable against any
//! [`CellAllocator`]. Scripts drive the pool property tests and the
//! criterion benchmarks so both exercise the same access patterns.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use chunkpool_core::{AllocError, CellAddr, CellAllocator};

/// One step of a churn script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChurnOp {
    /// Allocate one cell and construct the step number in it.
    Allocate,
    /// Release the live cell at this position in allocation order,
    /// reduced modulo the number of live cells.
    Release(usize),
}

/// Deterministic sequence of churn operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChurnScript {
    pub ops: Vec<ChurnOp>,
}

impl ChurnScript {
    /// Generate `len` operations from `seed`.
    ///
    /// Each step is a release with probability `release_ratio` (clamped
    /// to `[0, 1]`) whenever the script has live cells to release.
    pub fn generate(seed: u64, len: usize, release_ratio: f64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ratio = release_ratio.clamp(0.0, 1.0);
        let mut live = 0usize;
        let mut ops = Vec::with_capacity(len);
        for _ in 0..len {
            if live > 0 && rng.random_bool(ratio) {
                ops.push(ChurnOp::Release(rng.random_range(0..live)));
                live -= 1;
            } else {
                ops.push(ChurnOp::Allocate);
                live += 1;
            }
        }
        Self { ops }
    }

    /// Cells still live after the whole script has run.
    pub fn final_live(&self) -> usize {
        self.ops.iter().fold(0usize, |live, op| match op {
            ChurnOp::Allocate => live + 1,
            ChurnOp::Release(_) => live.saturating_sub(1),
        })
    }
}

/// Replay `script` against `alloc`, returning the addresses still live.
///
/// Released cells are destroyed before deallocation. The first allocator
/// error aborts the replay.
pub fn run_churn<A>(alloc: &mut A, script: &ChurnScript) -> Result<Vec<CellAddr>, AllocError>
where
    A: CellAllocator<u64>,
{
    let mut live: Vec<CellAddr> = Vec::new();
    for (step, op) in script.ops.iter().enumerate() {
        match *op {
            ChurnOp::Allocate => {
                let addr = alloc.allocate(1)?;
                alloc.construct(addr, step as u64)?;
                live.push(addr);
            }
            ChurnOp::Release(pick) => {
                if live.is_empty() {
                    continue;
                }
                let addr = live.remove(pick % live.len());
                alloc.destroy(addr)?;
                alloc.deallocate(addr, 1)?;
            }
        }
    }
    Ok(live)
}
