//! Process-wide configuration.
//!
//! Two knobs exist: the integer width of the native BLAS (a compile-time
//! choice, `ilp64` feature) and the batch scheduling parameters (runtime,
//! initialized once from the environment or installed explicitly).

use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Integer type of the native BLAS interface.
#[cfg(not(feature = "ilp64"))]
pub type BlasInt = i32;

/// Integer type of the native BLAS interface.
#[cfg(feature = "ilp64")]
pub type BlasInt = i64;

/// Largest dimension, leading dimension or |stride| the native kernels accept.
pub const NATIVE_INDEX_MAX: i64 = BlasInt::MAX as i64;

/// Environment variable overriding [`BatchConfig::min_parallel`].
pub const ENV_MIN_PARALLEL: &str = "STRIDER_BATCH_MIN_PARALLEL";

/// Environment variable overriding [`BatchConfig::num_threads`].
pub const ENV_NUM_THREADS: &str = "STRIDER_NUM_THREADS";

#[inline]
pub fn fits_native(value: i64) -> bool {
    value.unsigned_abs() <= NATIVE_INDEX_MAX as u64
}

/// Narrows a validated value to the native integer type.
#[inline]
pub fn narrow(value: i64) -> BlasInt {
    debug_assert!(fits_native(value), "{value} exceeds the native BLAS integer");
    value as BlasInt
}

/// Scheduling parameters of the batch engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Batches with fewer entries run on the calling thread.
    pub min_parallel: usize,
    /// Size of a dedicated worker pool. `None` uses the global rayon pool.
    pub num_threads: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            min_parallel: 2,
            num_threads: None,
        }
    }
}

impl BatchConfig {
    pub fn with_min_parallel(mut self, min: usize) -> Self {
        self.min_parallel = min;
        self
    }

    pub fn with_num_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads.max(1));
        self
    }

    /// Defaults overridden by `STRIDER_BATCH_MIN_PARALLEL` / `STRIDER_NUM_THREADS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(min) = read_env_usize(ENV_MIN_PARALLEL) {
            config = config.with_min_parallel(min);
        }
        if let Some(threads) = read_env_usize(ENV_NUM_THREADS) {
            config = config.with_num_threads(threads);
        }
        config
    }
}

fn read_env_usize(name: &str) -> Option<usize> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {}={:?}: not a non-negative integer", name, raw);
            None
        }
    }
}

static BATCH_CONFIG: OnceLock<BatchConfig> = OnceLock::new();

/// The batch configuration in effect (initialized from the environment on
/// first use).
pub fn batch_config() -> &'static BatchConfig {
    BATCH_CONFIG.get_or_init(BatchConfig::from_env)
}

/// Installs `config` as the process-wide batch configuration.
///
/// Fails if a configuration is already in effect, i.e. after the first
/// batched call or a previous `install`.
pub fn install(config: BatchConfig) -> Result<()> {
    BATCH_CONFIG
        .set(config)
        .map_err(|_| Error::invalid("config", "batch configuration is already initialized"))
}
