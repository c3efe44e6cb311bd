//! Thread-parallel execution of independent batch entries.
//!
//! Entries run on rayon's work-stealing pool: the global pool, or a
//! dedicated pool when [`BatchConfig::num_threads`] is set. Each entry gets
//! exclusive access to its own item; nothing is shared between entries
//! except the result slot the pool writes back.

use std::sync::OnceLock;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::{batch_config, BatchConfig};

static POOL: OnceLock<Option<ThreadPool>> = OnceLock::new();

/// Dedicated pool for the installed configuration, if one was requested.
fn dedicated_pool(config: &BatchConfig) -> Option<&'static ThreadPool> {
    POOL.get_or_init(|| {
        let threads = config.num_threads?;
        match ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("strider-batch-{i}"))
            .build()
        {
            Ok(pool) => {
                log::debug!("built dedicated batch pool with {} threads", threads);
                Some(pool)
            }
            Err(err) => {
                log::warn!("falling back to the global rayon pool: {}", err);
                None
            }
        }
    })
    .as_ref()
}

/// Number of worker threads batches run on.
pub fn num_threads() -> usize {
    match dedicated_pool(batch_config()) {
        Some(pool) => pool.current_num_threads(),
        None => rayon::current_num_threads(),
    }
}

/// Calls `f(i, &mut items[i])` for every item and collects the results in
/// index order.
///
/// Fewer than `min_parallel` items (or a single worker) run inline on the
/// calling thread.
pub fn map_indexed<O, R, F>(items: &mut [O], f: F) -> Vec<R>
where
    O: Send,
    R: Send,
    F: Fn(usize, &mut O) -> R + Sync + Send,
{
    let config = batch_config();
    let pool = dedicated_pool(config);
    let workers = pool.map_or_else(rayon::current_num_threads, |p| p.current_num_threads());

    if items.len() < config.min_parallel.max(1) || workers <= 1 {
        log::debug!("running {} batch entries inline", items.len());
        return items
            .iter_mut()
            .enumerate()
            .map(|(i, item)| f(i, item))
            .collect();
    }

    log::debug!(
        "running {} batch entries on {} threads",
        items.len(),
        workers
    );
    let mut run = || -> Vec<R> {
        items
            .par_iter_mut()
            .enumerate()
            .map(|(i, item)| f(i, item))
            .collect()
    };
    match pool {
        Some(pool) => pool.install(run),
        None => run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_map_indexed_covers_all_items() {
        let mut items: Vec<usize> = vec![0; 1000];
        let calls = AtomicUsize::new(0);
        let results = map_indexed(&mut items, |i, item| {
            *item = i * 2;
            calls.fetch_add(1, Ordering::Relaxed);
            i
        });
        assert_eq!(calls.load(Ordering::Relaxed), 1000);
        assert_eq!(results, (0..1000).collect::<Vec<_>>());
        assert!(items.iter().enumerate().all(|(i, &v)| v == i * 2));
    }

    #[test]
    fn test_empty_batch() {
        let mut items: Vec<u8> = Vec::new();
        let results: Vec<()> = map_indexed(&mut items, |_, _| panic!("no entries"));
        assert!(results.is_empty());
    }

    #[test]
    fn test_num_threads_positive() {
        assert!(num_threads() >= 1);
    }
}
