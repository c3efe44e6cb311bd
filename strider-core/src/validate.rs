//! Argument validation.
//!
//! Every check runs on the logical (pre-normalization) request, before any
//! buffer is touched. Checks run in a fixed order: enums, dimensions,
//! leading dimensions and strides, native integer width, buffer lengths.
//! The first violation is reported with the name of the offending argument.
//!
//! Buffer lengths are passed rather than slices so the same checks serve
//! host slices and device handles.

use crate::config::{fits_native, NATIVE_INDEX_MAX};
use crate::error::{Error, Result};
use crate::layout::{Layout, Side, Transpose, Uplo};

// ============================================================================
// Primitive checks
// ============================================================================

/// `uplo` must name a triangle.
#[inline]
pub fn triangle(arg: &'static str, uplo: Uplo) -> Result<()> {
    match uplo {
        Uplo::Upper | Uplo::Lower => Ok(()),
        Uplo::General => Err(Error::invalid(arg, "must be Upper or Lower, got General")),
    }
}

#[inline]
pub fn dimension(arg: &'static str, value: i64) -> Result<()> {
    if value < 0 {
        return Err(Error::invalid(arg, format!("must be >= 0, got {value}")));
    }
    Ok(())
}

/// Leading dimension of a `rows x cols` matrix stored in `layout`.
#[inline]
pub fn leading_dim(arg: &'static str, layout: Layout, rows: i64, cols: i64, ld: i64) -> Result<()> {
    let (inner, _) = layout.extents(rows, cols);
    if ld < inner {
        return Err(Error::invalid(arg, format!("must be >= {inner}, got {ld}")));
    }
    Ok(())
}

/// Vector strides must be non-zero.
#[inline]
pub fn stride(arg: &'static str, inc: i64) -> Result<()> {
    if inc == 0 {
        return Err(Error::invalid(arg, "must be non-zero"));
    }
    Ok(())
}

/// Every value must fit the native BLAS integer. The check is unconditional;
/// it only ever fails when `BlasInt` is narrower than `i64`.
pub fn native_width(values: &[(&'static str, i64)]) -> Result<()> {
    for &(arg, value) in values {
        if !fits_native(value) {
            return Err(Error::invalid(
                arg,
                format!("{value} exceeds the native BLAS integer limit {NATIVE_INDEX_MAX}"),
            ));
        }
    }
    Ok(())
}

/// Elements addressed by a `rows x cols` matrix view.
pub fn matrix_extent(layout: Layout, rows: i64, cols: i64, ld: i64) -> i128 {
    if rows <= 0 || cols <= 0 {
        return 0;
    }
    let (inner, outer) = layout.extents(rows, cols);
    ld as i128 * (outer as i128 - 1) + inner as i128
}

/// Elements addressed by an `n`-element vector view with stride `inc`.
pub fn vector_extent(n: i64, inc: i64) -> i128 {
    if n <= 0 {
        return 0;
    }
    (n as i128 - 1) * (inc as i128).abs() + 1
}

#[inline]
pub fn matrix_buffer(
    arg: &'static str,
    layout: Layout,
    rows: i64,
    cols: i64,
    ld: i64,
    len: usize,
) -> Result<()> {
    buffer(arg, matrix_extent(layout, rows, cols, ld), len)
}

#[inline]
pub fn vector_buffer(arg: &'static str, n: i64, inc: i64, len: usize) -> Result<()> {
    buffer(arg, vector_extent(n, inc), len)
}

fn buffer(arg: &'static str, required: i128, len: usize) -> Result<()> {
    if (len as i128) < required {
        return Err(Error::invalid(
            arg,
            format!("buffer holds {len} elements, view needs {required}"),
        ));
    }
    Ok(())
}

// ============================================================================
// Level 1
// ============================================================================

/// One strided vector operand of a level 1 routine.
pub fn vector(n: i64, x_len: usize, incx: i64) -> Result<()> {
    dimension("n", n)?;
    stride("incx", incx)?;
    native_width(&[("n", n), ("incx", incx)])?;
    vector_buffer("x", n, incx, x_len)
}

/// Two strided vector operands of a level 1 routine.
pub fn vector_pair(n: i64, x_len: usize, incx: i64, y_len: usize, incy: i64) -> Result<()> {
    dimension("n", n)?;
    stride("incx", incx)?;
    stride("incy", incy)?;
    native_width(&[("n", n), ("incx", incx), ("incy", incy)])?;
    vector_buffer("x", n, incx, x_len)?;
    vector_buffer("y", n, incy, y_len)
}

/// `iamax` additionally requires a positive stride.
pub fn iamax(n: i64, x_len: usize, incx: i64) -> Result<()> {
    if incx <= 0 {
        return Err(Error::invalid("incx", format!("must be > 0, got {incx}")));
    }
    vector(n, x_len, incx)
}

// ============================================================================
// Level 2
// ============================================================================

/// `gemv`: y := alpha op(A) x + beta y, A is m x n.
pub fn gemv(
    layout: Layout,
    trans: Transpose,
    m: i64,
    n: i64,
    a_len: usize,
    lda: i64,
    x_len: usize,
    incx: i64,
    y_len: usize,
    incy: i64,
) -> Result<()> {
    dimension("m", m)?;
    dimension("n", n)?;
    leading_dim("lda", layout, m, n, lda)?;
    stride("incx", incx)?;
    stride("incy", incy)?;
    native_width(&[("m", m), ("n", n), ("lda", lda), ("incx", incx), ("incy", incy)])?;
    let (len_x, len_y) = match trans {
        Transpose::NoTrans => (n, m),
        _ => (m, n),
    };
    matrix_buffer("A", layout, m, n, lda, a_len)?;
    vector_buffer("x", len_x, incx, x_len)?;
    vector_buffer("y", len_y, incy, y_len)
}

/// `ger` / `geru`: A := alpha x y^{T,H} + A, A is m x n.
pub fn ger(
    layout: Layout,
    m: i64,
    n: i64,
    x_len: usize,
    incx: i64,
    y_len: usize,
    incy: i64,
    a_len: usize,
    lda: i64,
) -> Result<()> {
    dimension("m", m)?;
    dimension("n", n)?;
    stride("incx", incx)?;
    stride("incy", incy)?;
    leading_dim("lda", layout, m, n, lda)?;
    native_width(&[("m", m), ("n", n), ("lda", lda), ("incx", incx), ("incy", incy)])?;
    vector_buffer("x", m, incx, x_len)?;
    vector_buffer("y", n, incy, y_len)?;
    matrix_buffer("A", layout, m, n, lda, a_len)
}

/// `symv` / `hemv`: y := alpha A x + beta y, A is n x n.
pub fn symv(
    layout: Layout,
    uplo: Uplo,
    n: i64,
    a_len: usize,
    lda: i64,
    x_len: usize,
    incx: i64,
    y_len: usize,
    incy: i64,
) -> Result<()> {
    triangle("uplo", uplo)?;
    dimension("n", n)?;
    leading_dim("lda", layout, n, n, lda)?;
    stride("incx", incx)?;
    stride("incy", incy)?;
    native_width(&[("n", n), ("lda", lda), ("incx", incx), ("incy", incy)])?;
    matrix_buffer("A", layout, n, n, lda, a_len)?;
    vector_buffer("x", n, incx, x_len)?;
    vector_buffer("y", n, incy, y_len)
}

/// `syr` / `her`: A := alpha x x^{T,H} + A, A is n x n.
pub fn syr(
    layout: Layout,
    uplo: Uplo,
    n: i64,
    x_len: usize,
    incx: i64,
    a_len: usize,
    lda: i64,
) -> Result<()> {
    triangle("uplo", uplo)?;
    dimension("n", n)?;
    stride("incx", incx)?;
    leading_dim("lda", layout, n, n, lda)?;
    native_width(&[("n", n), ("lda", lda), ("incx", incx)])?;
    vector_buffer("x", n, incx, x_len)?;
    matrix_buffer("A", layout, n, n, lda, a_len)
}

/// `trmv` / `trsv`: x := op(A) x or x := op(A)^{-1} x, A is n x n triangular.
pub fn trmv(
    layout: Layout,
    uplo: Uplo,
    n: i64,
    a_len: usize,
    lda: i64,
    x_len: usize,
    incx: i64,
) -> Result<()> {
    triangle("uplo", uplo)?;
    dimension("n", n)?;
    leading_dim("lda", layout, n, n, lda)?;
    stride("incx", incx)?;
    native_width(&[("n", n), ("lda", lda), ("incx", incx)])?;
    matrix_buffer("A", layout, n, n, lda, a_len)?;
    vector_buffer("x", n, incx, x_len)
}

// ============================================================================
// Level 3
// ============================================================================

/// Logical shape of `op(X)`'s storage when `op(X)` is `rows x cols`.
#[inline]
fn stored_shape(trans: Transpose, rows: i64, cols: i64) -> (i64, i64) {
    match trans {
        Transpose::NoTrans => (rows, cols),
        _ => (cols, rows),
    }
}

/// `gemm`: C := alpha op(A) op(B) + beta C, C is m x n, op(A) m x k, op(B) k x n.
pub fn gemm(
    layout: Layout,
    transa: Transpose,
    transb: Transpose,
    m: i64,
    n: i64,
    k: i64,
    a_len: usize,
    lda: i64,
    b_len: usize,
    ldb: i64,
    c_len: usize,
    ldc: i64,
) -> Result<()> {
    dimension("m", m)?;
    dimension("n", n)?;
    dimension("k", k)?;
    let (a_rows, a_cols) = stored_shape(transa, m, k);
    let (b_rows, b_cols) = stored_shape(transb, k, n);
    leading_dim("lda", layout, a_rows, a_cols, lda)?;
    leading_dim("ldb", layout, b_rows, b_cols, ldb)?;
    leading_dim("ldc", layout, m, n, ldc)?;
    native_width(&[
        ("m", m),
        ("n", n),
        ("k", k),
        ("lda", lda),
        ("ldb", ldb),
        ("ldc", ldc),
    ])?;
    matrix_buffer("A", layout, a_rows, a_cols, lda, a_len)?;
    matrix_buffer("B", layout, b_rows, b_cols, ldb, b_len)?;
    matrix_buffer("C", layout, m, n, ldc, c_len)
}

/// `symm` / `hemm`: C := alpha A B + beta C (Left) or alpha B A + beta C (Right).
pub fn symm(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    m: i64,
    n: i64,
    a_len: usize,
    lda: i64,
    b_len: usize,
    ldb: i64,
    c_len: usize,
    ldc: i64,
) -> Result<()> {
    triangle("uplo", uplo)?;
    dimension("m", m)?;
    dimension("n", n)?;
    let order = match side {
        Side::Left => m,
        Side::Right => n,
    };
    leading_dim("lda", layout, order, order, lda)?;
    leading_dim("ldb", layout, m, n, ldb)?;
    leading_dim("ldc", layout, m, n, ldc)?;
    native_width(&[("m", m), ("n", n), ("lda", lda), ("ldb", ldb), ("ldc", ldc)])?;
    matrix_buffer("A", layout, order, order, lda, a_len)?;
    matrix_buffer("B", layout, m, n, ldb, b_len)?;
    matrix_buffer("C", layout, m, n, ldc, c_len)
}

fn rank_k(
    layout: Layout,
    uplo: Uplo,
    trans: Transpose,
    n: i64,
    k: i64,
    a_len: usize,
    lda: i64,
    c_len: usize,
    ldc: i64,
) -> Result<()> {
    triangle("uplo", uplo)?;
    dimension("n", n)?;
    dimension("k", k)?;
    let (a_rows, a_cols) = stored_shape(trans, n, k);
    leading_dim("lda", layout, a_rows, a_cols, lda)?;
    leading_dim("ldc", layout, n, n, ldc)?;
    native_width(&[("n", n), ("k", k), ("lda", lda), ("ldc", ldc)])?;
    matrix_buffer("A", layout, a_rows, a_cols, lda, a_len)?;
    matrix_buffer("C", layout, n, n, ldc, c_len)
}

/// `syrk`: C := alpha A A^T + beta C or alpha A^T A + beta C.
///
/// `ConjTrans` is rejected with `NotImplemented` for complex scalars (use
/// `herk`); for real scalars it means `Trans`.
pub fn syrk(
    layout: Layout,
    uplo: Uplo,
    trans: Transpose,
    n: i64,
    k: i64,
    a_len: usize,
    lda: i64,
    c_len: usize,
    ldc: i64,
    complex: bool,
) -> Result<()> {
    rank_k(layout, uplo, trans, n, k, a_len, lda, c_len, ldc)?;
    if complex && trans == Transpose::ConjTrans {
        return Err(Error::not_implemented(
            "complex syrk with ConjTrans (use herk)",
        ));
    }
    Ok(())
}

/// `herk`: C := alpha A A^H + beta C or alpha A^H A + beta C.
///
/// `Trans` is rejected with `NotImplemented` for complex scalars (use
/// `syrk`); for real scalars it means `ConjTrans`.
pub fn herk(
    layout: Layout,
    uplo: Uplo,
    trans: Transpose,
    n: i64,
    k: i64,
    a_len: usize,
    lda: i64,
    c_len: usize,
    ldc: i64,
    complex: bool,
) -> Result<()> {
    rank_k(layout, uplo, trans, n, k, a_len, lda, c_len, ldc)?;
    if complex && trans == Transpose::Trans {
        return Err(Error::not_implemented("complex herk with Trans (use syrk)"));
    }
    Ok(())
}

/// `trmm` / `trsm`: B := alpha op(A) B, alpha B op(A) and their solves.
pub fn trmm(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    m: i64,
    n: i64,
    a_len: usize,
    lda: i64,
    b_len: usize,
    ldb: i64,
) -> Result<()> {
    triangle("uplo", uplo)?;
    dimension("m", m)?;
    dimension("n", n)?;
    let order = match side {
        Side::Left => m,
        Side::Right => n,
    };
    leading_dim("lda", layout, order, order, lda)?;
    leading_dim("ldb", layout, m, n, ldb)?;
    native_width(&[("m", m), ("n", n), ("lda", lda), ("ldb", ldb)])?;
    matrix_buffer("A", layout, order, order, lda, a_len)?;
    matrix_buffer("B", layout, m, n, ldb, b_len)
}

// ============================================================================
// Batch sequences
// ============================================================================

/// A parameter sequence of a batched call: required sequences must hold one
/// value (broadcast) or one per entry.
pub fn batch_sequence(arg: &'static str, len: usize, batch: usize) -> Result<()> {
    if len == 1 || len == batch {
        return Ok(());
    }
    Err(Error::invalid(
        arg,
        format!("sequence length {len} must be 1 or the batch size {batch}"),
    ))
}

/// Status array: empty, a single aggregate slot, or one slot per entry.
pub fn batch_status(len: usize, batch: usize) -> Result<()> {
    if len == 0 || len == 1 || len == batch {
        return Ok(());
    }
    Err(Error::invalid(
        "info",
        format!("status length {len} must be 0, 1 or the batch size {batch}"),
    ))
}
