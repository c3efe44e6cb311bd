//! Scalar algebra shared by every kernel.
//!
//! One generic kernel per operation replaces the s/d/c/z family: the
//! arithmetic comes from the operator traits, and the few places where real
//! and complex behave differently (conjugation, the real part of a Hermitian
//! diagonal, `|re| + |im|` for `iamax`) go through [`Scalar`].

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_complex::Complex;
use num_traits::{Float, One, Zero};

/// Element type accepted by the BLAS routines: `f32`, `f64`,
/// `Complex<f32>` and `Complex<f64>`.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Underlying real type (`Self` for real scalars).
    type Real: RealScalar;

    const IS_COMPLEX: bool;

    /// BLAS precision letter: `s`, `d`, `c` or `z`.
    const PREFIX: char;

    /// Complex conjugate; identity for real scalars.
    fn conj(self) -> Self;

    fn from_real(re: Self::Real) -> Self;

    /// Builds a scalar from parts; the imaginary part is dropped for reals.
    fn from_parts(re: Self::Real, im: Self::Real) -> Self;

    fn re(self) -> Self::Real;

    fn im(self) -> Self::Real;

    /// `|re| + |im|`, the magnitude BLAS uses to pick pivots in `iamax`.
    fn abs1(self) -> Self::Real;

    fn has_nan(self) -> bool;

    /// Conjugates only when `conj` is set.
    #[inline(always)]
    fn conj_if(self, conj: bool) -> Self {
        if conj {
            self.conj()
        } else {
            self
        }
    }

    /// Keeps the real part only; used for Hermitian diagonals.
    #[inline(always)]
    fn real_part(self) -> Self {
        Self::from_real(self.re())
    }
}

/// Real scalar types (`f32`, `f64`).
pub trait RealScalar: Scalar<Real = Self> + PartialOrd + Float {}

macro_rules! impl_real_scalar {
    ($t:ty, $prefix:expr) => {
        impl Scalar for $t {
            type Real = $t;

            const IS_COMPLEX: bool = false;
            const PREFIX: char = $prefix;

            #[inline(always)]
            fn conj(self) -> Self {
                self
            }

            #[inline(always)]
            fn from_real(re: Self::Real) -> Self {
                re
            }

            #[inline(always)]
            fn from_parts(re: Self::Real, _im: Self::Real) -> Self {
                re
            }

            #[inline(always)]
            fn re(self) -> Self::Real {
                self
            }

            #[inline(always)]
            fn im(self) -> Self::Real {
                0.0
            }

            #[inline(always)]
            fn abs1(self) -> Self::Real {
                <$t>::abs(self)
            }

            #[inline(always)]
            fn has_nan(self) -> bool {
                <$t>::is_nan(self)
            }
        }

        impl RealScalar for $t {}
    };
}

macro_rules! impl_complex_scalar {
    ($t:ty, $prefix:expr) => {
        impl Scalar for Complex<$t> {
            type Real = $t;

            const IS_COMPLEX: bool = true;
            const PREFIX: char = $prefix;

            #[inline(always)]
            fn conj(self) -> Self {
                Complex::new(self.re, -self.im)
            }

            #[inline(always)]
            fn from_real(re: Self::Real) -> Self {
                Complex::new(re, 0.0)
            }

            #[inline(always)]
            fn from_parts(re: Self::Real, im: Self::Real) -> Self {
                Complex::new(re, im)
            }

            #[inline(always)]
            fn re(self) -> Self::Real {
                self.re
            }

            #[inline(always)]
            fn im(self) -> Self::Real {
                self.im
            }

            #[inline(always)]
            fn abs1(self) -> Self::Real {
                self.re.abs() + self.im.abs()
            }

            #[inline(always)]
            fn has_nan(self) -> bool {
                self.re.is_nan() || self.im.is_nan()
            }
        }
    };
}

impl_real_scalar!(f32, 's');
impl_real_scalar!(f64, 'd');
impl_complex_scalar!(f32, 'c');
impl_complex_scalar!(f64, 'z');

#[cfg(test)]
mod tests {
    use super::*;

    fn generic_conj<T: Scalar>(x: T) -> T {
        x.conj_if(true)
    }

    #[test]
    fn test_real_conj_is_identity() {
        assert_eq!(generic_conj(2.5f64), 2.5);
        assert_eq!(<f32 as Scalar>::im(3.0), 0.0);
        assert_eq!(<f64 as Scalar>::from_parts(1.0, 9.0), 1.0);
    }

    #[test]
    fn test_complex_conj() {
        let z = Complex::new(1.0f64, -2.0);
        assert_eq!(generic_conj(z), Complex::new(1.0, 2.0));
        assert_eq!(z.conj_if(false), z);
        assert_eq!(z.real_part(), Complex::new(1.0, 0.0));
    }

    #[test]
    fn test_abs1() {
        assert_eq!(Complex::new(-3.0f32, 4.0).abs1(), 7.0);
        assert_eq!((-2.0f64).abs1(), 2.0);
    }

    #[test]
    fn test_has_nan() {
        assert!(Complex::new(1.0f64, f64::NAN).has_nan());
        assert!(!Complex::new(1.0f64, 2.0).has_nan());
        assert!(f32::NAN.has_nan());
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(<f32 as Scalar>::PREFIX, 's');
        assert_eq!(<Complex<f64> as Scalar>::PREFIX, 'z');
        assert!(<Complex<f32> as Scalar>::IS_COMPLEX);
        assert!(!<f64 as Scalar>::IS_COMPLEX);
    }
}
