//! Column-major kernel seam.
//!
//! Entry points validate and normalize, then call exactly one method of
//! [`Kernels`] with column-major arguments in the native integer type. The
//! provided methods run the generic reference kernels; with the `native`
//! feature the four BLAS precisions override them with Fortran BLAS calls
//! (see `native.rs`).
//!
//! `conj_*` flags come from the row-major rewrite and ask for every element
//! of that operand to be conjugated as it is read. `hermitian` selects the
//! Hermitian member of a symmetric/Hermitian kernel pair.

use strider_core::{BlasInt, Diag, Scalar, Side, Transpose, Uplo};

use crate::reference;

/// Validated dimension or leading dimension as an index.
#[inline(always)]
pub(crate) fn dim(v: BlasInt) -> usize {
    v as usize
}

/// Validated stride as a signed offset.
#[inline(always)]
pub(crate) fn inc(v: BlasInt) -> isize {
    v as isize
}

/// Column-major BLAS kernels for one precision.
pub trait Kernels: Scalar {
    fn gemv(
        trans: Transpose,
        m: BlasInt,
        n: BlasInt,
        alpha: Self,
        a: &[Self],
        lda: BlasInt,
        x: &[Self],
        incx: BlasInt,
        beta: Self,
        y: &mut [Self],
        incy: BlasInt,
        conj_a: bool,
    ) {
        reference::gemv(
            trans,
            dim(m),
            dim(n),
            alpha,
            a,
            dim(lda),
            x,
            inc(incx),
            beta,
            y,
            inc(incy),
            conj_a,
        );
    }

    fn ger(
        m: BlasInt,
        n: BlasInt,
        alpha: Self,
        x: &[Self],
        incx: BlasInt,
        y: &[Self],
        incy: BlasInt,
        a: &mut [Self],
        lda: BlasInt,
        conj_x: bool,
        conj_y: bool,
    ) {
        reference::ger(
            dim(m),
            dim(n),
            alpha,
            x,
            inc(incx),
            y,
            inc(incy),
            a,
            dim(lda),
            conj_x,
            conj_y,
        );
    }

    fn symv(
        uplo: Uplo,
        n: BlasInt,
        alpha: Self,
        a: &[Self],
        lda: BlasInt,
        x: &[Self],
        incx: BlasInt,
        beta: Self,
        y: &mut [Self],
        incy: BlasInt,
        hermitian: bool,
        conj_a: bool,
    ) {
        reference::symv(
            uplo,
            dim(n),
            alpha,
            a,
            dim(lda),
            x,
            inc(incx),
            beta,
            y,
            inc(incy),
            hermitian,
            conj_a,
        );
    }

    fn syr(
        uplo: Uplo,
        n: BlasInt,
        alpha: Self,
        x: &[Self],
        incx: BlasInt,
        a: &mut [Self],
        lda: BlasInt,
        hermitian: bool,
        conj_x: bool,
    ) {
        reference::syr(
            uplo,
            dim(n),
            alpha,
            x,
            inc(incx),
            a,
            dim(lda),
            hermitian,
            conj_x,
        );
    }

    fn trmv(
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: BlasInt,
        a: &[Self],
        lda: BlasInt,
        x: &mut [Self],
        incx: BlasInt,
        conj_a: bool,
    ) {
        reference::trmv(uplo, trans, diag, dim(n), a, dim(lda), x, inc(incx), conj_a);
    }

    fn trsv(
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        n: BlasInt,
        a: &[Self],
        lda: BlasInt,
        x: &mut [Self],
        incx: BlasInt,
        conj_a: bool,
    ) {
        reference::trsv(uplo, trans, diag, dim(n), a, dim(lda), x, inc(incx), conj_a);
    }

    fn gemm(
        transa: Transpose,
        transb: Transpose,
        m: BlasInt,
        n: BlasInt,
        k: BlasInt,
        alpha: Self,
        a: &[Self],
        lda: BlasInt,
        b: &[Self],
        ldb: BlasInt,
        beta: Self,
        c: &mut [Self],
        ldc: BlasInt,
    ) {
        reference::gemm(
            transa,
            transb,
            dim(m),
            dim(n),
            dim(k),
            alpha,
            a,
            dim(lda),
            b,
            dim(ldb),
            beta,
            c,
            dim(ldc),
        );
    }

    fn symm(
        side: Side,
        uplo: Uplo,
        m: BlasInt,
        n: BlasInt,
        alpha: Self,
        a: &[Self],
        lda: BlasInt,
        b: &[Self],
        ldb: BlasInt,
        beta: Self,
        c: &mut [Self],
        ldc: BlasInt,
        hermitian: bool,
    ) {
        reference::symm(
            side,
            uplo,
            dim(m),
            dim(n),
            alpha,
            a,
            dim(lda),
            b,
            dim(ldb),
            beta,
            c,
            dim(ldc),
            hermitian,
        );
    }

    fn syrk(
        uplo: Uplo,
        trans: Transpose,
        n: BlasInt,
        k: BlasInt,
        alpha: Self,
        a: &[Self],
        lda: BlasInt,
        beta: Self,
        c: &mut [Self],
        ldc: BlasInt,
        hermitian: bool,
    ) {
        reference::syrk(
            uplo,
            trans,
            dim(n),
            dim(k),
            alpha,
            a,
            dim(lda),
            beta,
            c,
            dim(ldc),
            hermitian,
        );
    }

    fn trmm(
        side: Side,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        m: BlasInt,
        n: BlasInt,
        alpha: Self,
        a: &[Self],
        lda: BlasInt,
        b: &mut [Self],
        ldb: BlasInt,
    ) {
        reference::trmm(
            side,
            uplo,
            trans,
            diag,
            dim(m),
            dim(n),
            alpha,
            a,
            dim(lda),
            b,
            dim(ldb),
        );
    }

    fn trsm(
        side: Side,
        uplo: Uplo,
        trans: Transpose,
        diag: Diag,
        m: BlasInt,
        n: BlasInt,
        alpha: Self,
        a: &[Self],
        lda: BlasInt,
        b: &mut [Self],
        ldb: BlasInt,
    ) {
        reference::trsm(
            side,
            uplo,
            trans,
            diag,
            dim(m),
            dim(n),
            alpha,
            a,
            dim(lda),
            b,
            dim(ldb),
        );
    }
}

#[cfg(not(feature = "native"))]
mod portable {
    use num_complex::Complex;

    use super::Kernels;

    impl Kernels for f32 {}
    impl Kernels for f64 {}
    impl Kernels for Complex<f32> {}
    impl Kernels for Complex<f64> {}
}
