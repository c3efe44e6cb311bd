//! Generic reference kernels.
//!
//! Column-major, allocation-free and generic over [`Scalar`]. The loop nests
//! follow the reference BLAS ones so results are reproducible bit for bit:
//! no blocking, no reassociation, and no element is skipped for being zero
//! (a NaN in a vector reaches every output it would reach in a conforming
//! backend). Only the referenced triangle of a structured matrix is read.
//!
//! Arguments are assumed validated: dimensions and leading dimensions are
//! non-negative, strides non-zero, buffers long enough.
//!
//! [`Scalar`]: strider_core::Scalar

pub mod level1;
pub mod level2;
pub mod level3;

pub use level1::{axpy, conj, copy, dot, iamax, scal, swap};
pub use level2::{gemv, ger, symv, syr, trmv, trsv};
pub use level3::{gemm, symm, syrk, trmm, trsm};

/// Physical offset of logical element 0 of an `n`-element strided vector.
///
/// Negative strides walk the buffer backwards from its last element.
#[inline(always)]
pub(crate) fn first(n: usize, inc: isize) -> isize {
    if inc > 0 || n == 0 {
        0
    } else {
        (n as isize - 1) * -inc
    }
}

/// Column-major offset of element (i, j).
#[inline(always)]
pub(crate) fn at(i: usize, j: usize, ld: usize) -> usize {
    i + j * ld
}

/// `0..len` in ascending or descending order.
#[inline(always)]
pub(crate) fn sweep(len: usize, ascending: bool) -> impl Iterator<Item = usize> {
    (0..len).map(move |s| if ascending { s } else { len - 1 - s })
}
