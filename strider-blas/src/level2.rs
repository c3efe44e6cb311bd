//! BLAS Level 2: Matrix-vector operations.
//!
//! All operations support both row-major and column-major layouts via the
//! CBLAS-style `Layout` parameter. Each call validates the request as given,
//! returns early when there is nothing to compute, rewrites row-major
//! requests to column-major ones and runs one [`Kernels`] method.

use strider_core::config::narrow;
use strider_core::normalize::{
    GeneralVector, HermitianVector, Rank1Update, SymmetricRank1, TriangularVector,
};
use strider_core::validate;
use strider_core::{Diag, Layout, Result, Transpose, Uplo};

use crate::kernels::Kernels;

// ============================================================================
// GEMV: General matrix-vector multiply
// y := alpha * op(A) * x + beta * y
// ============================================================================

pub fn gemv<T: Kernels>(
    layout: Layout,
    trans: Transpose,
    m: i64,
    n: i64,
    alpha: T,
    a: &[T],
    lda: i64,
    x: &[T],
    incx: i64,
    beta: T,
    y: &mut [T],
    incy: i64,
) -> Result<()> {
    validate::gemv(layout, trans, m, n, a.len(), lda, x.len(), incx, y.len(), incy)?;
    if m == 0 || n == 0 {
        return Ok(());
    }
    let plan = GeneralVector::new(layout, trans, m, n);
    T::gemv(
        plan.trans,
        narrow(plan.m),
        narrow(plan.n),
        alpha,
        a,
        narrow(lda),
        x,
        narrow(incx),
        beta,
        y,
        narrow(incy),
        plan.conj,
    );
    Ok(())
}

// ============================================================================
// GER: Rank-1 update
// A := alpha * x * y^H + A (ger), A := alpha * x * y^T + A (geru)
// ============================================================================

fn rank1<T: Kernels>(
    layout: Layout,
    m: i64,
    n: i64,
    alpha: T,
    x: &[T],
    incx: i64,
    y: &[T],
    incy: i64,
    a: &mut [T],
    lda: i64,
    conj: bool,
) -> Result<()> {
    validate::ger(layout, m, n, x.len(), incx, y.len(), incy, a.len(), lda)?;
    if m == 0 || n == 0 {
        return Ok(());
    }
    let plan = Rank1Update::new(layout, m, n, conj);
    let ((x, incx), (y, incy)) = if plan.swap_operands {
        ((y, incy), (x, incx))
    } else {
        ((x, incx), (y, incy))
    };
    T::ger(
        narrow(plan.m),
        narrow(plan.n),
        alpha,
        x,
        narrow(incx),
        y,
        narrow(incy),
        a,
        narrow(lda),
        plan.conj_x,
        plan.conj_y,
    );
    Ok(())
}

/// A := alpha * x * y^H + A (`y^T` for real scalars).
pub fn ger<T: Kernels>(
    layout: Layout,
    m: i64,
    n: i64,
    alpha: T,
    x: &[T],
    incx: i64,
    y: &[T],
    incy: i64,
    a: &mut [T],
    lda: i64,
) -> Result<()> {
    rank1(layout, m, n, alpha, x, incx, y, incy, a, lda, true)
}

/// A := alpha * x * y^T + A
pub fn geru<T: Kernels>(
    layout: Layout,
    m: i64,
    n: i64,
    alpha: T,
    x: &[T],
    incx: i64,
    y: &[T],
    incy: i64,
    a: &mut [T],
    lda: i64,
) -> Result<()> {
    rank1(layout, m, n, alpha, x, incx, y, incy, a, lda, false)
}

// ============================================================================
// SYMV / HEMV: y := alpha * A * x + beta * y, A symmetric / Hermitian
// ============================================================================

fn structured_mv<T: Kernels>(
    layout: Layout,
    uplo: Uplo,
    n: i64,
    alpha: T,
    a: &[T],
    lda: i64,
    x: &[T],
    incx: i64,
    beta: T,
    y: &mut [T],
    incy: i64,
    hermitian: bool,
) -> Result<()> {
    validate::symv(layout, uplo, n, a.len(), lda, x.len(), incx, y.len(), incy)?;
    if n == 0 {
        return Ok(());
    }
    let plan = HermitianVector::new(layout, uplo, hermitian);
    T::symv(
        plan.uplo,
        narrow(n),
        alpha,
        a,
        narrow(lda),
        x,
        narrow(incx),
        beta,
        y,
        narrow(incy),
        hermitian,
        plan.conj,
    );
    Ok(())
}

pub fn symv<T: Kernels>(
    layout: Layout,
    uplo: Uplo,
    n: i64,
    alpha: T,
    a: &[T],
    lda: i64,
    x: &[T],
    incx: i64,
    beta: T,
    y: &mut [T],
    incy: i64,
) -> Result<()> {
    structured_mv(layout, uplo, n, alpha, a, lda, x, incx, beta, y, incy, false)
}

/// Hermitian matrix-vector product. The imaginary parts of the diagonal are
/// not referenced.
pub fn hemv<T: Kernels>(
    layout: Layout,
    uplo: Uplo,
    n: i64,
    alpha: T,
    a: &[T],
    lda: i64,
    x: &[T],
    incx: i64,
    beta: T,
    y: &mut [T],
    incy: i64,
) -> Result<()> {
    structured_mv(layout, uplo, n, alpha, a, lda, x, incx, beta, y, incy, true)
}

// ============================================================================
// SYR / HER: A := alpha * x * x^T + A, A := alpha * x * x^H + A
// ============================================================================

fn structured_r1<T: Kernels>(
    layout: Layout,
    uplo: Uplo,
    n: i64,
    alpha: T,
    x: &[T],
    incx: i64,
    a: &mut [T],
    lda: i64,
    hermitian: bool,
) -> Result<()> {
    validate::syr(layout, uplo, n, x.len(), incx, a.len(), lda)?;
    if n == 0 {
        return Ok(());
    }
    let plan = SymmetricRank1::new(layout, uplo, hermitian);
    T::syr(
        plan.uplo,
        narrow(n),
        alpha,
        x,
        narrow(incx),
        a,
        narrow(lda),
        hermitian,
        plan.conj_x,
    );
    Ok(())
}

pub fn syr<T: Kernels>(
    layout: Layout,
    uplo: Uplo,
    n: i64,
    alpha: T,
    x: &[T],
    incx: i64,
    a: &mut [T],
    lda: i64,
) -> Result<()> {
    structured_r1(layout, uplo, n, alpha, x, incx, a, lda, false)
}

/// Hermitian rank-1 update with real alpha. The diagonal is left real.
pub fn her<T: Kernels>(
    layout: Layout,
    uplo: Uplo,
    n: i64,
    alpha: T::Real,
    x: &[T],
    incx: i64,
    a: &mut [T],
    lda: i64,
) -> Result<()> {
    structured_r1(layout, uplo, n, T::from_real(alpha), x, incx, a, lda, true)
}

// ============================================================================
// TRMV / TRSV: x := op(A) * x, x := op(A)^-1 * x, A triangular
// ============================================================================

/// x := op(A) * x
///
/// # Example
/// ```
/// use strider_blas::{level2, Diag, Layout, Transpose, Uplo};
///
/// // upper unit triangle, strictly lower part never read
/// let a = [1.0, 2.0, 3.0, f64::NAN, 1.0, 4.0, f64::NAN, f64::NAN, 1.0];
/// let mut x = [1.0, 1.0, 1.0];
/// level2::trmv(Layout::RowMajor, Uplo::Upper, Transpose::NoTrans, Diag::Unit,
///              3, &a, 3, &mut x, 1).unwrap();
/// assert_eq!(x, [6.0, 5.0, 1.0]);
/// ```
pub fn trmv<T: Kernels>(
    layout: Layout,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    n: i64,
    a: &[T],
    lda: i64,
    x: &mut [T],
    incx: i64,
) -> Result<()> {
    validate::trmv(layout, uplo, n, a.len(), lda, x.len(), incx)?;
    if n == 0 {
        return Ok(());
    }
    let plan = TriangularVector::new(layout, uplo, trans);
    T::trmv(
        plan.uplo,
        plan.trans,
        diag,
        narrow(n),
        a,
        narrow(lda),
        x,
        narrow(incx),
        plan.conj,
    );
    Ok(())
}

/// x := op(A)^-1 * x. No test for singularity is made.
pub fn trsv<T: Kernels>(
    layout: Layout,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    n: i64,
    a: &[T],
    lda: i64,
    x: &mut [T],
    incx: i64,
) -> Result<()> {
    validate::trmv(layout, uplo, n, a.len(), lda, x.len(), incx)?;
    if n == 0 {
        return Ok(());
    }
    let plan = TriangularVector::new(layout, uplo, trans);
    T::trsv(
        plan.uplo,
        plan.trans,
        diag,
        narrow(n),
        a,
        narrow(lda),
        x,
        narrow(incx),
        plan.conj,
    );
    Ok(())
}
