//! BLAS Level 1: Vector-vector operations.
//!
//! Strides may be negative (the vector is walked from its last element) but
//! never zero. Every routine validates first and touches no buffer on error.

use strider_core::validate;
use strider_core::{Result, Scalar};

use crate::reference;

/// y := alpha * x + y
pub fn axpy<T: Scalar>(
    n: i64,
    alpha: T,
    x: &[T],
    incx: i64,
    y: &mut [T],
    incy: i64,
) -> Result<()> {
    validate::vector_pair(n, x.len(), incx, y.len(), incy)?;
    reference::axpy(n as usize, alpha, x, incx as isize, y, incy as isize);
    Ok(())
}

/// x := alpha * x
pub fn scal<T: Scalar>(n: i64, alpha: T, x: &mut [T], incx: i64) -> Result<()> {
    validate::vector(n, x.len(), incx)?;
    reference::scal(n as usize, alpha, x, incx as isize);
    Ok(())
}

/// Dot product `xᴴ y` (conjugating x for complex scalars).
pub fn dot<T: Scalar>(n: i64, x: &[T], incx: i64, y: &[T], incy: i64) -> Result<T> {
    validate::vector_pair(n, x.len(), incx, y.len(), incy)?;
    Ok(reference::dot(n as usize, x, incx as isize, y, incy as isize, true))
}

/// Unconjugated dot product `xᵀ y`.
pub fn dotu<T: Scalar>(n: i64, x: &[T], incx: i64, y: &[T], incy: i64) -> Result<T> {
    validate::vector_pair(n, x.len(), incx, y.len(), incy)?;
    Ok(reference::dot(n as usize, x, incx as isize, y, incy as isize, false))
}

/// 0-based index of the first element with the largest `|re| + |im|`.
///
/// Requires `incx > 0`; returns 0 when `n == 0`.
pub fn iamax<T: Scalar>(n: i64, x: &[T], incx: i64) -> Result<usize> {
    validate::iamax(n, x.len(), incx)?;
    Ok(reference::iamax(n as usize, x, incx as isize))
}

/// y := x
pub fn copy<T: Scalar>(n: i64, x: &[T], incx: i64, y: &mut [T], incy: i64) -> Result<()> {
    validate::vector_pair(n, x.len(), incx, y.len(), incy)?;
    reference::copy(n as usize, x, incx as isize, y, incy as isize);
    Ok(())
}

/// x <-> y
pub fn swap<T: Scalar>(n: i64, x: &mut [T], incx: i64, y: &mut [T], incy: i64) -> Result<()> {
    validate::vector_pair(n, x.len(), incx, y.len(), incy)?;
    reference::swap(n as usize, x, incx as isize, y, incy as isize);
    Ok(())
}
