//! Level 3 reference kernels: column-major matrix-matrix operations.

use strider_core::{Diag, Scalar, Side, Transpose, Uplo};

use super::{at, sweep};

/// Scales column `j` of C (rows `lo..hi`) by beta; beta == 0 overwrites.
#[inline]
fn scale_column<T: Scalar>(c: &mut [T], ldc: usize, j: usize, lo: usize, hi: usize, beta: T) {
    if beta == T::zero() {
        for i in lo..hi {
            c[at(i, j, ldc)] = T::zero();
        }
    } else if beta != T::one() {
        for i in lo..hi {
            c[at(i, j, ldc)] *= beta;
        }
    }
}

/// `beta * c` with beta == 0 discarding c.
#[inline(always)]
fn blend<T: Scalar>(beta: T, c: T) -> T {
    if beta == T::zero() {
        T::zero()
    } else {
        beta * c
    }
}

/// C := alpha * op(A) * op(B) + beta * C, C is m x n, op(A) m x k, op(B) k x n.
pub fn gemm<T: Scalar>(
    transa: Transpose,
    transb: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    beta: T,
    c: &mut [T],
    ldc: usize,
) {
    if m == 0 || n == 0 || ((alpha == T::zero() || k == 0) && beta == T::one()) {
        return;
    }
    if alpha == T::zero() {
        for j in 0..n {
            scale_column(c, ldc, j, 0, m, beta);
        }
        return;
    }

    let conja = transa == Transpose::ConjTrans;
    let conjb = transb == Transpose::ConjTrans;
    let opb = |l: usize, j: usize| match transb {
        Transpose::NoTrans => b[at(l, j, ldb)],
        _ => b[at(j, l, ldb)].conj_if(conjb),
    };

    if transa == Transpose::NoTrans {
        for j in 0..n {
            scale_column(c, ldc, j, 0, m, beta);
            for l in 0..k {
                let temp = alpha * opb(l, j);
                for i in 0..m {
                    c[at(i, j, ldc)] += temp * a[at(i, l, lda)];
                }
            }
        }
    } else {
        for j in 0..n {
            for i in 0..m {
                let mut temp = T::zero();
                for l in 0..k {
                    temp += a[at(l, i, lda)].conj_if(conja) * opb(l, j);
                }
                let p = at(i, j, ldc);
                c[p] = alpha * temp + blend(beta, c[p]);
            }
        }
    }
}

/// C := alpha * A * B + beta * C (Left) or alpha * B * A + beta * C (Right),
/// A symmetric (Hermitian when `hermitian` is set) with only the `uplo`
/// triangle referenced. C and B are m x n.
pub fn symm<T: Scalar>(
    side: Side,
    uplo: Uplo,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    beta: T,
    c: &mut [T],
    ldc: usize,
    hermitian: bool,
) {
    if m == 0 || n == 0 || (alpha == T::zero() && beta == T::one()) {
        return;
    }
    if alpha == T::zero() {
        for j in 0..n {
            scale_column(c, ldc, j, 0, m, beta);
        }
        return;
    }

    let upper = uplo == Uplo::Upper;
    let diag = |j: usize| {
        let d = a[at(j, j, lda)];
        if hermitian {
            d.real_part()
        } else {
            d
        }
    };
    // element (i, j) of the full matrix, i != j, read from the stored triangle
    let full = |i: usize, j: usize| {
        if (i < j) == upper {
            a[at(i, j, lda)]
        } else {
            a[at(j, i, lda)].conj_if(hermitian)
        }
    };

    match side {
        Side::Left => {
            for j in 0..n {
                let rows = sweep(m, upper);
                for i in rows {
                    let temp1 = alpha * b[at(i, j, ldb)];
                    let mut temp2 = T::zero();
                    let (lo, hi) = if upper { (0, i) } else { (i + 1, m) };
                    for l in lo..hi {
                        let ali = a[at(l, i, lda)];
                        c[at(l, j, ldc)] += temp1 * ali;
                        temp2 += b[at(l, j, ldb)] * ali.conj_if(hermitian);
                    }
                    let p = at(i, j, ldc);
                    c[p] = blend(beta, c[p]) + temp1 * diag(i) + alpha * temp2;
                }
            }
        }
        Side::Right => {
            for j in 0..n {
                let temp1 = alpha * diag(j);
                for i in 0..m {
                    let p = at(i, j, ldc);
                    c[p] = blend(beta, c[p]) + temp1 * b[at(i, j, ldb)];
                }
                for l in (0..n).filter(|&l| l != j) {
                    let temp = alpha * full(l, j);
                    for i in 0..m {
                        c[at(i, j, ldc)] += temp * b[at(i, l, ldb)];
                    }
                }
            }
        }
    }
}

/// C := alpha * op(A) * op(A)' + beta * C on the `uplo` triangle of the
/// n x n matrix C, where `'` is `^T`, or `^H` when `hermitian` is set.
///
/// `trans == NoTrans` means A is n x k (`A A'`); otherwise A is k x n
/// (`A' A`). For the Hermitian update alpha and beta must be real and the
/// diagonal is written back real.
pub fn syrk<T: Scalar>(
    uplo: Uplo,
    trans: Transpose,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    beta: T,
    c: &mut [T],
    ldc: usize,
    hermitian: bool,
) {
    if n == 0 || ((alpha == T::zero() || k == 0) && beta == T::one()) {
        return;
    }
    let rows = |j: usize| match uplo {
        Uplo::Upper => (0, j + 1),
        _ => (j, n),
    };
    // Only the real part of a Hermitian diagonal is read or written.
    let real_diag = |c: &mut [T], j: usize| {
        if hermitian {
            let d = at(j, j, ldc);
            c[d] = c[d].real_part();
        }
    };

    if alpha == T::zero() {
        for j in 0..n {
            let (lo, hi) = rows(j);
            real_diag(c, j);
            scale_column(c, ldc, j, lo, hi, beta);
        }
        return;
    }

    if trans == Transpose::NoTrans {
        for j in 0..n {
            let (lo, hi) = rows(j);
            real_diag(c, j);
            scale_column(c, ldc, j, lo, hi, beta);
            for l in 0..k {
                let temp = alpha * a[at(j, l, lda)].conj_if(hermitian);
                for i in lo..hi {
                    c[at(i, j, ldc)] += temp * a[at(i, l, lda)];
                }
                real_diag(c, j);
            }
        }
    } else {
        for j in 0..n {
            let (lo, hi) = rows(j);
            real_diag(c, j);
            for i in lo..hi {
                let mut temp = T::zero();
                for l in 0..k {
                    temp += a[at(l, i, lda)].conj_if(hermitian) * a[at(l, j, lda)];
                }
                let p = at(i, j, ldc);
                c[p] = alpha * temp + blend(beta, c[p]);
            }
            real_diag(c, j);
        }
    }
}

/// B := alpha * op(A) * B (Left) or alpha * B * op(A) (Right), A triangular.
/// B is m x n.
pub fn trmm<T: Scalar>(
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) {
    if m == 0 || n == 0 {
        return;
    }
    if alpha == T::zero() {
        for j in 0..n {
            scale_column(b, ldb, j, 0, m, T::zero());
        }
        return;
    }
    let nounit = diag == Diag::NonUnit;
    let conj = trans == Transpose::ConjTrans;
    let upper = uplo == Uplo::Upper;
    let elem = |i: usize, j: usize| a[at(i, j, lda)].conj_if(conj);

    match (side, trans) {
        (Side::Left, Transpose::NoTrans) => {
            for j in 0..n {
                if upper {
                    for l in 0..m {
                        let mut temp = alpha * b[at(l, j, ldb)];
                        for i in 0..l {
                            b[at(i, j, ldb)] += temp * elem(i, l);
                        }
                        if nounit {
                            temp *= elem(l, l);
                        }
                        b[at(l, j, ldb)] = temp;
                    }
                } else {
                    for l in (0..m).rev() {
                        let temp = alpha * b[at(l, j, ldb)];
                        let p = at(l, j, ldb);
                        b[p] = temp;
                        if nounit {
                            b[p] *= elem(l, l);
                        }
                        for i in l + 1..m {
                            b[at(i, j, ldb)] += temp * elem(i, l);
                        }
                    }
                }
            }
        }
        (Side::Left, _) => {
            for j in 0..n {
                let rows = sweep(m, !upper);
                for i in rows {
                    let mut temp = b[at(i, j, ldb)];
                    if nounit {
                        temp *= elem(i, i);
                    }
                    let (lo, hi) = if upper { (0, i) } else { (i + 1, m) };
                    for l in lo..hi {
                        temp += elem(l, i) * b[at(l, j, ldb)];
                    }
                    b[at(i, j, ldb)] = alpha * temp;
                }
            }
        }
        (Side::Right, Transpose::NoTrans) => {
            let cols = sweep(n, !upper);
            for j in cols {
                let mut temp = alpha;
                if nounit {
                    temp *= elem(j, j);
                }
                for i in 0..m {
                    b[at(i, j, ldb)] *= temp;
                }
                let (lo, hi) = if upper { (0, j) } else { (j + 1, n) };
                for l in lo..hi {
                    let temp = alpha * elem(l, j);
                    for i in 0..m {
                        let v = b[at(i, l, ldb)];
                        b[at(i, j, ldb)] += temp * v;
                    }
                }
            }
        }
        (Side::Right, _) => {
            let cols = sweep(n, upper);
            for l in cols {
                let (lo, hi) = if upper { (0, l) } else { (l + 1, n) };
                for j in lo..hi {
                    let temp = alpha * elem(j, l);
                    for i in 0..m {
                        let v = b[at(i, l, ldb)];
                        b[at(i, j, ldb)] += temp * v;
                    }
                }
                let mut temp = alpha;
                if nounit {
                    temp *= elem(l, l);
                }
                if temp != T::one() {
                    for i in 0..m {
                        b[at(i, l, ldb)] *= temp;
                    }
                }
            }
        }
    }
}

/// Solves op(A) * X = alpha * B (Left) or X * op(A) = alpha * B (Right) for
/// X, overwriting B. A triangular, B is m x n. No singularity test is made.
pub fn trsm<T: Scalar>(
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
) {
    if m == 0 || n == 0 {
        return;
    }
    if alpha == T::zero() {
        for j in 0..n {
            scale_column(b, ldb, j, 0, m, T::zero());
        }
        return;
    }
    let nounit = diag == Diag::NonUnit;
    let conj = trans == Transpose::ConjTrans;
    let upper = uplo == Uplo::Upper;
    let elem = |i: usize, j: usize| a[at(i, j, lda)].conj_if(conj);

    match (side, trans) {
        (Side::Left, Transpose::NoTrans) => {
            for j in 0..n {
                scale_column(b, ldb, j, 0, m, alpha);
                let pivots = sweep(m, !upper);
                for l in pivots {
                    let p = at(l, j, ldb);
                    if nounit {
                        b[p] /= elem(l, l);
                    }
                    let temp = b[p];
                    let (lo, hi) = if upper { (0, l) } else { (l + 1, m) };
                    for i in lo..hi {
                        b[at(i, j, ldb)] -= temp * elem(i, l);
                    }
                }
            }
        }
        (Side::Left, _) => {
            for j in 0..n {
                let rows = sweep(m, upper);
                for i in rows {
                    let mut temp = alpha * b[at(i, j, ldb)];
                    let (lo, hi) = if upper { (0, i) } else { (i + 1, m) };
                    for l in lo..hi {
                        temp -= elem(l, i) * b[at(l, j, ldb)];
                    }
                    if nounit {
                        temp /= elem(i, i);
                    }
                    b[at(i, j, ldb)] = temp;
                }
            }
        }
        (Side::Right, Transpose::NoTrans) => {
            let cols = sweep(n, upper);
            for j in cols {
                scale_column(b, ldb, j, 0, m, alpha);
                let (lo, hi) = if upper { (0, j) } else { (j + 1, n) };
                for l in lo..hi {
                    let temp = elem(l, j);
                    for i in 0..m {
                        let v = b[at(i, l, ldb)];
                        b[at(i, j, ldb)] -= temp * v;
                    }
                }
                if nounit {
                    let temp = T::one() / elem(j, j);
                    for i in 0..m {
                        b[at(i, j, ldb)] *= temp;
                    }
                }
            }
        }
        (Side::Right, _) => {
            let cols = sweep(n, !upper);
            for l in cols {
                if nounit {
                    let temp = T::one() / elem(l, l);
                    for i in 0..m {
                        b[at(i, l, ldb)] *= temp;
                    }
                }
                let (lo, hi) = if upper { (0, l) } else { (l + 1, n) };
                for j in lo..hi {
                    let temp = elem(j, l);
                    for i in 0..m {
                        let v = b[at(i, l, ldb)];
                        b[at(i, j, ldb)] -= temp * v;
                    }
                }
                if alpha != T::one() {
                    for i in 0..m {
                        b[at(i, l, ldb)] *= alpha;
                    }
                }
            }
        }
    }
}
