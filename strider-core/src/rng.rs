//! Deterministic PRNG for reproducible tests and benchmarks.
//!
//! `SplitMix64` has a single u64 of state and no external deps. Test data for
//! every precision comes from [`SplitMix64::fill`].

use crate::scalar::Scalar;
use num_traits::NumCast;

/// SplitMix64 PRNG: deterministic, fast, statistically strong.
///
/// Period: 2^64.
///
/// # Example
/// ```
/// use strider_core::SplitMix64;
/// let mut rng = SplitMix64::new(42);
/// let x: Vec<f64> = rng.vec(4);
/// assert!(x.iter().all(|v| (-1.0..1.0).contains(v)));
/// ```
#[derive(Debug, Clone)]
pub struct SplitMix64(u64);

impl SplitMix64 {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next raw u64.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    /// Uniform f64 in [0, 1), from the top 53 bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [-1, 1).
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        2.0 * self.next_f64() - 1.0
    }

    /// Scalar with real and imaginary parts uniform in [-1, 1).
    pub fn scalar<T: Scalar>(&mut self) -> T {
        let re = self.uniform();
        let im = self.uniform();
        T::from_parts(real(re), real(im))
    }

    /// Overwrites `out` with uniform scalars.
    pub fn fill<T: Scalar>(&mut self, out: &mut [T]) {
        for v in out.iter_mut() {
            *v = self.scalar();
        }
    }

    pub fn vec<T: Scalar>(&mut self, len: usize) -> Vec<T> {
        let mut out = vec![T::zero(); len];
        self.fill(&mut out);
        out
    }
}

#[inline]
fn real<R: NumCast + num_traits::Zero>(v: f64) -> R {
    R::from(v).unwrap_or_else(R::zero)
}
