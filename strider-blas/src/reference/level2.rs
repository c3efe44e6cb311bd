//! Level 2 reference kernels: column-major matrix-vector operations.
//!
//! `conj_a` / `conj_x` flags conjugate every element read from that operand.
//! They come from the row-major rewrite of conjugate-transposed requests and
//! compose with `ConjTrans` (conjugating twice reads the raw element).

use strider_core::{Diag, Scalar, Transpose, Uplo};

use super::{at, first};

/// y := alpha * op(A) * x + beta * y, A is m x n.
pub fn gemv<T: Scalar>(
    trans: Transpose,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    x: &[T],
    incx: isize,
    beta: T,
    y: &mut [T],
    incy: isize,
    conj_a: bool,
) {
    if m == 0 || n == 0 || (alpha == T::zero() && beta == T::one()) {
        return;
    }
    let (lenx, leny) = match trans {
        Transpose::NoTrans => (n, m),
        _ => (m, n),
    };
    let kx = first(lenx, incx);
    let ky = first(leny, incy);

    if beta != T::one() {
        let mut iy = ky;
        for _ in 0..leny {
            let p = iy as usize;
            y[p] = if beta == T::zero() {
                T::zero()
            } else {
                beta * y[p]
            };
            iy += incy;
        }
    }
    if alpha == T::zero() {
        return;
    }

    let conj = (trans == Transpose::ConjTrans) != conj_a;
    if trans == Transpose::NoTrans {
        let mut jx = kx;
        for j in 0..n {
            let temp = alpha * x[jx as usize];
            let mut iy = ky;
            for i in 0..m {
                y[iy as usize] += temp * a[at(i, j, lda)].conj_if(conj);
                iy += incy;
            }
            jx += incx;
        }
    } else {
        let mut jy = ky;
        for j in 0..n {
            let mut temp = T::zero();
            let mut ix = kx;
            for i in 0..m {
                temp += a[at(i, j, lda)].conj_if(conj) * x[ix as usize];
                ix += incx;
            }
            y[jy as usize] += alpha * temp;
            jy += incy;
        }
    }
}

/// A := alpha * x * y^T + A, A is m x n.
pub fn ger<T: Scalar>(
    m: usize,
    n: usize,
    alpha: T,
    x: &[T],
    incx: isize,
    y: &[T],
    incy: isize,
    a: &mut [T],
    lda: usize,
    conj_x: bool,
    conj_y: bool,
) {
    if m == 0 || n == 0 || alpha == T::zero() {
        return;
    }
    let kx = first(m, incx);
    let mut jy = first(n, incy);
    for j in 0..n {
        let temp = alpha * y[jy as usize].conj_if(conj_y);
        let mut ix = kx;
        for i in 0..m {
            a[at(i, j, lda)] += x[ix as usize].conj_if(conj_x) * temp;
            ix += incx;
        }
        jy += incy;
    }
}

/// y := alpha * A * x + beta * y, A is n x n symmetric (or Hermitian when
/// `hermitian` is set) with only the `uplo` triangle referenced.
///
/// Hermitian diagonals are read as real.
pub fn symv<T: Scalar>(
    uplo: Uplo,
    n: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    x: &[T],
    incx: isize,
    beta: T,
    y: &mut [T],
    incy: isize,
    hermitian: bool,
    conj_a: bool,
) {
    if n == 0 || (alpha == T::zero() && beta == T::one()) {
        return;
    }
    let kx = first(n, incx);
    let ky = first(n, incy);

    if beta != T::one() {
        let mut iy = ky;
        for _ in 0..n {
            let p = iy as usize;
            y[p] = if beta == T::zero() {
                T::zero()
            } else {
                beta * y[p]
            };
            iy += incy;
        }
    }
    if alpha == T::zero() {
        return;
    }

    let elem = |i: usize, j: usize| a[at(i, j, lda)].conj_if(conj_a);
    let mirror = |v: T| v.conj_if(hermitian);
    let diag = |j: usize| {
        let d = elem(j, j);
        if hermitian {
            d.real_part()
        } else {
            d
        }
    };

    if uplo == Uplo::Upper {
        let mut jx = kx;
        let mut jy = ky;
        for j in 0..n {
            let temp1 = alpha * x[jx as usize];
            let mut temp2 = T::zero();
            let mut ix = kx;
            let mut iy = ky;
            for i in 0..j {
                let aij = elem(i, j);
                y[iy as usize] += temp1 * aij;
                temp2 += mirror(aij) * x[ix as usize];
                ix += incx;
                iy += incy;
            }
            y[jy as usize] += temp1 * diag(j) + alpha * temp2;
            jx += incx;
            jy += incy;
        }
    } else {
        let mut jx = kx;
        let mut jy = ky;
        for j in 0..n {
            let temp1 = alpha * x[jx as usize];
            let mut temp2 = T::zero();
            y[jy as usize] += temp1 * diag(j);
            let mut ix = jx;
            let mut iy = jy;
            for i in j + 1..n {
                ix += incx;
                iy += incy;
                let aij = elem(i, j);
                y[iy as usize] += temp1 * aij;
                temp2 += mirror(aij) * x[ix as usize];
            }
            y[jy as usize] += alpha * temp2;
            jx += incx;
            jy += incy;
        }
    }
}

/// A := alpha * x * x^T + A (or `x * x^H` when `hermitian` is set), updating
/// the `uplo` triangle only.
///
/// For the Hermitian update alpha must be real and the diagonal is written
/// back real.
pub fn syr<T: Scalar>(
    uplo: Uplo,
    n: usize,
    alpha: T,
    x: &[T],
    incx: isize,
    a: &mut [T],
    lda: usize,
    hermitian: bool,
    conj_x: bool,
) {
    if n == 0 || alpha == T::zero() {
        return;
    }
    let kx = first(n, incx);
    let xv = |p: isize| x[p as usize].conj_if(conj_x);

    let mut jx = kx;
    for j in 0..n {
        let temp = alpha * xv(jx).conj_if(hermitian);
        let (lo, hi) = match uplo {
            Uplo::Upper => (0, j + 1),
            _ => (j, n),
        };
        let mut ix = kx + lo as isize * incx;
        for i in lo..hi {
            a[at(i, j, lda)] += xv(ix) * temp;
            ix += incx;
        }
        if hermitian {
            let d = at(j, j, lda);
            a[d] = a[d].real_part();
        }
        jx += incx;
    }
}

/// x := op(A) * x, A is n x n triangular.
pub fn trmv<T: Scalar>(
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    n: usize,
    a: &[T],
    lda: usize,
    x: &mut [T],
    incx: isize,
    conj_a: bool,
) {
    if n == 0 {
        return;
    }
    let nounit = diag == Diag::NonUnit;
    let conj = (trans == Transpose::ConjTrans) != conj_a;
    let elem = |i: usize, j: usize| a[at(i, j, lda)].conj_if(conj);
    let kx = first(n, incx);
    let last = kx + (n as isize - 1) * incx;

    match (trans, uplo) {
        (Transpose::NoTrans, Uplo::Upper) => {
            let mut jx = kx;
            for j in 0..n {
                let temp = x[jx as usize];
                let mut ix = kx;
                for i in 0..j {
                    x[ix as usize] += temp * elem(i, j);
                    ix += incx;
                }
                if nounit {
                    x[jx as usize] *= elem(j, j);
                }
                jx += incx;
            }
        }
        (Transpose::NoTrans, _) => {
            let mut jx = last;
            for j in (0..n).rev() {
                let temp = x[jx as usize];
                let mut ix = last;
                for i in (j + 1..n).rev() {
                    x[ix as usize] += temp * elem(i, j);
                    ix -= incx;
                }
                if nounit {
                    x[jx as usize] *= elem(j, j);
                }
                jx -= incx;
            }
        }
        (_, Uplo::Upper) => {
            let mut jx = last;
            for j in (0..n).rev() {
                let mut temp = x[jx as usize];
                if nounit {
                    temp *= elem(j, j);
                }
                let mut ix = jx;
                for i in (0..j).rev() {
                    ix -= incx;
                    temp += elem(i, j) * x[ix as usize];
                }
                x[jx as usize] = temp;
                jx -= incx;
            }
        }
        (_, _) => {
            let mut jx = kx;
            for j in 0..n {
                let mut temp = x[jx as usize];
                if nounit {
                    temp *= elem(j, j);
                }
                let mut ix = jx;
                for i in j + 1..n {
                    ix += incx;
                    temp += elem(i, j) * x[ix as usize];
                }
                x[jx as usize] = temp;
                jx += incx;
            }
        }
    }
}

/// x := op(A)^-1 * x, A is n x n triangular. No singularity test is made.
pub fn trsv<T: Scalar>(
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    n: usize,
    a: &[T],
    lda: usize,
    x: &mut [T],
    incx: isize,
    conj_a: bool,
) {
    if n == 0 {
        return;
    }
    let nounit = diag == Diag::NonUnit;
    let conj = (trans == Transpose::ConjTrans) != conj_a;
    let elem = |i: usize, j: usize| a[at(i, j, lda)].conj_if(conj);
    let kx = first(n, incx);
    let last = kx + (n as isize - 1) * incx;

    match (trans, uplo) {
        (Transpose::NoTrans, Uplo::Upper) => {
            let mut jx = last;
            for j in (0..n).rev() {
                if nounit {
                    x[jx as usize] /= elem(j, j);
                }
                let temp = x[jx as usize];
                let mut ix = jx;
                for i in (0..j).rev() {
                    ix -= incx;
                    x[ix as usize] -= temp * elem(i, j);
                }
                jx -= incx;
            }
        }
        (Transpose::NoTrans, _) => {
            let mut jx = kx;
            for j in 0..n {
                if nounit {
                    x[jx as usize] /= elem(j, j);
                }
                let temp = x[jx as usize];
                let mut ix = jx;
                for i in j + 1..n {
                    ix += incx;
                    x[ix as usize] -= temp * elem(i, j);
                }
                jx += incx;
            }
        }
        (_, Uplo::Upper) => {
            let mut jx = kx;
            for j in 0..n {
                let mut temp = x[jx as usize];
                let mut ix = kx;
                for i in 0..j {
                    temp -= elem(i, j) * x[ix as usize];
                    ix += incx;
                }
                if nounit {
                    temp /= elem(j, j);
                }
                x[jx as usize] = temp;
                jx += incx;
            }
        }
        (_, _) => {
            let mut jx = last;
            for j in (0..n).rev() {
                let mut temp = x[jx as usize];
                let mut ix = last;
                for i in (j + 1..n).rev() {
                    temp -= elem(i, j) * x[ix as usize];
                    ix -= incx;
                }
                if nounit {
                    temp /= elem(j, j);
                }
                x[jx as usize] = temp;
                jx -= incx;
            }
        }
    }
}
