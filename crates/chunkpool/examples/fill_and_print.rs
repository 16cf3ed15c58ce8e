//! Fill lists over each allocator and print them.
//!
//! Usage: `fill_and_print [none|lifo|fifo] [len]`. Without a policy
//! argument the `CHUNKPOOL_POLICY` environment variable is consulted, then
//! the default (`none`). Set `RUST_LOG=chunkpool_arena=debug` to watch
//! blocks being created and reclaimed.

use std::env;
use std::error::Error;
use std::fmt::Display;

use tracing::info;
use tracing_subscriber::EnvFilter;

use chunkpool::prelude::*;

const DEFAULT_LEN: u64 = 10;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}

fn policy_from_env(arg: Option<String>) -> Result<ReclamationPolicy, Box<dyn Error>> {
    match arg.or_else(|| env::var("CHUNKPOOL_POLICY").ok()) {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(ReclamationPolicy::default()),
    }
}

fn factorial(n: u64) -> u64 {
    (1..=n).product()
}

fn print_list<T: Display, A: Rebind>(label: &str, list: &LinkedList<T, A>) {
    let rendered: Vec<String> = list.iter().map(ToString::to_string).collect();
    println!("{label}: {}", rendered.join(" "));
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let mut args = env::args().skip(1);
    let policy = policy_from_env(args.next())?;
    let len = match args.next() {
        Some(raw) => raw.parse()?,
        None => DEFAULT_LEN,
    };

    let config = PoolConfig::default().with_policy(policy);
    let alloc: ChunkAllocator<u64> = ChunkAllocator::with_config(config)?;
    info!(%policy, capacity = config.capacity(), len, "starting demo");

    let mut pooled = LinkedList::with_allocator(&alloc);
    for i in 0..len {
        pooled.push_front(i)?;
    }
    print_list("pooled push_front", &pooled);

    let mut heap: LinkedList<u64> = LinkedList::new();
    let mut pos = heap.begin();
    for i in 0..len {
        pos = heap.insert_after(pos, i)?;
    }
    print_list("heap insert_after", &heap);

    let pair_alloc: ChunkAllocator<(u64, u64)> = ChunkAllocator::from_other(&alloc);
    let mut pairs = LinkedList::with_allocator(&pair_alloc);
    // 20! is the last factorial that fits in a u64.
    for i in 0..len.min(21) {
        pairs.push_front((i, factorial(i)))?;
    }
    let rendered: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}:{v}")).collect();
    println!("factorials: {}", rendered.join(" "));

    if len > 0 {
        *pooled.front_mut()? = len;
        print_list("after front_mut", &pooled);
    }

    let stats = pooled.allocator().stats();
    println!(
        "pool: {} blocks, {} live of {} cells, {} created, {} reclaimed",
        stats.blocks,
        stats.live_cells,
        stats.capacity_cells,
        stats.blocks_created,
        stats.blocks_reclaimed
    );
    pooled.clear();
    let stats = pooled.allocator().stats();
    println!("after clear: {} blocks, {} live", stats.blocks, stats.live_cells);

    let counted: CountingAllocator<ChunkAllocator<u64>> =
        CountingAllocator::new(ChunkAllocator::from_other(&alloc));
    let mut tracked = LinkedList::with_allocator(&counted);
    for i in 0..len {
        tracked.push_front(i)?;
    }
    while tracked.len() > len as usize / 2 {
        tracked.pop_front()?;
    }
    let counts = tracked.allocator().counts();
    println!(
        "counting: {} allocations, {} deallocations, {} live, peak {}",
        counts.allocations,
        counts.deallocations,
        counts.live(),
        counts.peak_live
    );
    Ok(())
}
