//! Dense oracles for the entry-point tests.
//!
//! Matrices are materialized as dense row-major `Vec`s of their logical
//! values so expected results can be computed with plain loops, independent
//! of any layout or stride handling under test.

use num_traits::ToPrimitive;
use strider_core::{Diag, Layout, Scalar, SplitMix64, Transpose, Uplo};

/// Logical `rows x cols` matrix read from `layout` storage with leading dimension `ld`.
pub fn logical<T: Scalar>(layout: Layout, rows: usize, cols: usize, buf: &[T], ld: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            out.push(buf[layout.index(i, j, ld)]);
        }
    }
    out
}

/// Random storage for a logical `rows x cols` matrix, with padding beyond
/// the logical extent of each leading-dimension step.
pub fn padded<T: Scalar>(rng: &mut SplitMix64, layout: Layout, rows: usize, cols: usize) -> (Vec<T>, usize) {
    let (inner, outer) = match layout {
        Layout::ColMajor => (rows, cols),
        Layout::RowMajor => (cols, rows),
    };
    let ld = inner + 2;
    (rng.vec(ld * outer.max(1)), ld)
}

/// Logical values of a strided vector.
pub fn gather<T: Scalar>(buf: &[T], n: usize, inc: i64) -> Vec<T> {
    let start = if inc > 0 { 0 } else { (n as i64 - 1).max(0) * -inc };
    (0..n)
        .map(|i| buf[(start + i as i64 * inc) as usize])
        .collect()
}

/// Triangular matrix: the other triangle is zero, a unit diagonal is one.
pub fn triangle<T: Scalar>(full: &[T], n: usize, uplo: Uplo, diag: Diag) -> Vec<T> {
    let mut out = vec![T::zero(); n * n];
    for i in 0..n {
        for j in 0..n {
            let keep = match uplo {
                Uplo::Upper => i <= j,
                _ => i >= j,
            };
            if i == j && diag == Diag::Unit {
                out[i * n + j] = T::one();
            } else if keep {
                out[i * n + j] = full[i * n + j];
            }
        }
    }
    out
}

/// Symmetric (or Hermitian) completion of the `uplo` triangle.
pub fn mirror<T: Scalar>(full: &[T], n: usize, uplo: Uplo, hermitian: bool) -> Vec<T> {
    let mut out = vec![T::zero(); n * n];
    for i in 0..n {
        for j in 0..n {
            let stored = match uplo {
                Uplo::Upper => i <= j,
                _ => i >= j,
            };
            out[i * n + j] = if i == j {
                if hermitian {
                    full[i * n + i].real_part()
                } else {
                    full[i * n + i]
                }
            } else if stored {
                full[i * n + j]
            } else {
                full[j * n + i].conj_if(hermitian)
            };
        }
    }
    out
}

/// Whether `(i, j)` lies outside the `uplo` triangle.
pub fn outside(uplo: Uplo, i: usize, j: usize) -> bool {
    match uplo {
        Uplo::Upper => i > j,
        _ => i < j,
    }
}

/// Fills the triangle of an `n x n` matrix opposite `uplo` with `fill`,
/// and the imaginary parts of its diagonal with NaN when `diag_imag` is set.
pub fn poison<T: Scalar>(
    buf: &mut [T],
    layout: Layout,
    n: usize,
    ld: usize,
    uplo: Uplo,
    fill: T,
    diag_imag: bool,
) {
    let nan = <T::Real as num_traits::Float>::nan();
    for i in 0..n {
        for j in 0..n {
            let p = layout.index(i, j, ld);
            if outside(uplo, i, j) {
                buf[p] = fill;
            } else if i == j && diag_imag {
                buf[p] = T::from_parts(buf[p].re(), nan);
            }
        }
    }
}

/// NaN in every component.
pub fn nan<T: Scalar>() -> T {
    let nan = <T::Real as num_traits::Float>::nan();
    T::from_parts(nan, nan)
}

/// `op(M)` of a dense `rows x cols` matrix, with its shape.
pub fn apply_op<T: Scalar>(
    m: &[T],
    rows: usize,
    cols: usize,
    trans: Transpose,
) -> (Vec<T>, usize, usize) {
    match trans {
        Transpose::NoTrans => (m.to_vec(), rows, cols),
        _ => {
            let conj = trans == Transpose::ConjTrans;
            let mut out = Vec::with_capacity(rows * cols);
            for j in 0..cols {
                for i in 0..rows {
                    out.push(m[i * cols + j].conj_if(conj));
                }
            }
            (out, cols, rows)
        }
    }
}

/// Dense `m x k` times `k x n`.
pub fn matmul<T: Scalar>(a: &[T], b: &[T], m: usize, k: usize, n: usize) -> Vec<T> {
    let mut c = vec![T::zero(); m * n];
    for i in 0..m {
        for j in 0..n {
            let mut acc = T::zero();
            for l in 0..k {
                acc += a[i * k + l] * b[l * n + j];
            }
            c[i * n + j] = acc;
        }
    }
    c
}

pub fn assert_close<T: Scalar>(got: &[T], want: &[T], tol: f64) {
    assert_eq!(got.len(), want.len(), "length mismatch");
    for (i, (g, w)) in got.iter().zip(want.iter()).enumerate() {
        let err = (*g - *w).abs1().to_f64().unwrap_or(f64::NAN);
        let scale = 1.0 + w.abs1().to_f64().unwrap_or(0.0);
        assert!(
            err <= tol * scale,
            "element {i}: got {g:?}, want {w:?} (err {err:e})"
        );
    }
}
