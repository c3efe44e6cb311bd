//! Fortran BLAS backend for the `native` feature.
//!
//! Symbols follow the reference BLAS ABI (`dgemm_`, `ztrmv_`, ...): every
//! argument by pointer, character codes as single bytes, `BlasInt` integers.
//! The library is resolved at link time.
//!
//! Native kernels cannot conjugate an operand without transposing it, so the
//! conjugation flags of the row-major rewrite are realized here: `trmv` and
//! `trsv` conjugate x around a `NoTrans` call, `gemv`/`hemv` conjugate the
//! whole equation, and rank-1 updates use a conjugated copy of the vector.
//! Complex symmetric `symv`/`syr` have no BLAS symbol and stay on the
//! reference kernels.

use std::os::raw::c_char;

use num_complex::Complex;
use strider_core::{BlasInt, Diag, Scalar, Side, Transpose, Uplo};

use crate::kernels::{dim, inc, Kernels};
use crate::reference;

#[inline(always)]
fn code(c: char) -> c_char {
    c as u8 as c_char
}

/// Folds a conjugation flag into a transpose mode. Returns the mode to pass
/// and whether the caller still has to conjugate around a `NoTrans` call.
#[inline]
fn fold_conj(trans: Transpose, conj: bool) -> (Transpose, bool) {
    match (conj, trans) {
        (false, t) => (t, false),
        (true, Transpose::Trans) => (Transpose::ConjTrans, false),
        (true, Transpose::ConjTrans) => (Transpose::Trans, false),
        (true, Transpose::NoTrans) => (Transpose::NoTrans, true),
    }
}

fn conjugated<T: Scalar>(x: &[T]) -> Vec<T> {
    x.iter().map(|v| v.conj()).collect()
}

macro_rules! real_kernels {
    ($t:ty, $gemv:ident, $ger:ident, $symv:ident, $syr:ident, $trmv:ident, $trsv:ident,
     $gemm:ident, $symm:ident, $syrk:ident, $trmm:ident, $trsm:ident) => {
        extern "C" {
            fn $gemv(
                trans: *const c_char,
                m: *const BlasInt,
                n: *const BlasInt,
                alpha: *const $t,
                a: *const $t,
                lda: *const BlasInt,
                x: *const $t,
                incx: *const BlasInt,
                beta: *const $t,
                y: *mut $t,
                incy: *const BlasInt,
            );
            fn $ger(
                m: *const BlasInt,
                n: *const BlasInt,
                alpha: *const $t,
                x: *const $t,
                incx: *const BlasInt,
                y: *const $t,
                incy: *const BlasInt,
                a: *mut $t,
                lda: *const BlasInt,
            );
            fn $symv(
                uplo: *const c_char,
                n: *const BlasInt,
                alpha: *const $t,
                a: *const $t,
                lda: *const BlasInt,
                x: *const $t,
                incx: *const BlasInt,
                beta: *const $t,
                y: *mut $t,
                incy: *const BlasInt,
            );
            fn $syr(
                uplo: *const c_char,
                n: *const BlasInt,
                alpha: *const $t,
                x: *const $t,
                incx: *const BlasInt,
                a: *mut $t,
                lda: *const BlasInt,
            );
            fn $trmv(
                uplo: *const c_char,
                trans: *const c_char,
                diag: *const c_char,
                n: *const BlasInt,
                a: *const $t,
                lda: *const BlasInt,
                x: *mut $t,
                incx: *const BlasInt,
            );
            fn $trsv(
                uplo: *const c_char,
                trans: *const c_char,
                diag: *const c_char,
                n: *const BlasInt,
                a: *const $t,
                lda: *const BlasInt,
                x: *mut $t,
                incx: *const BlasInt,
            );
            fn $gemm(
                transa: *const c_char,
                transb: *const c_char,
                m: *const BlasInt,
                n: *const BlasInt,
                k: *const BlasInt,
                alpha: *const $t,
                a: *const $t,
                lda: *const BlasInt,
                b: *const $t,
                ldb: *const BlasInt,
                beta: *const $t,
                c: *mut $t,
                ldc: *const BlasInt,
            );
            fn $symm(
                side: *const c_char,
                uplo: *const c_char,
                m: *const BlasInt,
                n: *const BlasInt,
                alpha: *const $t,
                a: *const $t,
                lda: *const BlasInt,
                b: *const $t,
                ldb: *const BlasInt,
                beta: *const $t,
                c: *mut $t,
                ldc: *const BlasInt,
            );
            fn $syrk(
                uplo: *const c_char,
                trans: *const c_char,
                n: *const BlasInt,
                k: *const BlasInt,
                alpha: *const $t,
                a: *const $t,
                lda: *const BlasInt,
                beta: *const $t,
                c: *mut $t,
                ldc: *const BlasInt,
            );
            fn $trmm(
                side: *const c_char,
                uplo: *const c_char,
                transa: *const c_char,
                diag: *const c_char,
                m: *const BlasInt,
                n: *const BlasInt,
                alpha: *const $t,
                a: *const $t,
                lda: *const BlasInt,
                b: *mut $t,
                ldb: *const BlasInt,
            );
            fn $trsm(
                side: *const c_char,
                uplo: *const c_char,
                transa: *const c_char,
                diag: *const c_char,
                m: *const BlasInt,
                n: *const BlasInt,
                alpha: *const $t,
                a: *const $t,
                lda: *const BlasInt,
                b: *mut $t,
                ldb: *const BlasInt,
            );
        }

        // Conjugation is the identity on real scalars: every flag is ignored.
        impl Kernels for $t {
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
                _conj_a: bool,
            ) {
                let trans = code(trans.as_char());
                unsafe {
                    $gemv(
                        &trans,
                        &m,
                        &n,
                        &alpha,
                        a.as_ptr(),
                        &lda,
                        x.as_ptr(),
                        &incx,
                        &beta,
                        y.as_mut_ptr(),
                        &incy,
                    )
                }
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
                _conj_x: bool,
                _conj_y: bool,
            ) {
                unsafe {
                    $ger(
                        &m,
                        &n,
                        &alpha,
                        x.as_ptr(),
                        &incx,
                        y.as_ptr(),
                        &incy,
                        a.as_mut_ptr(),
                        &lda,
                    )
                }
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
                _hermitian: bool,
                _conj_a: bool,
            ) {
                let uplo = code(uplo.as_char());
                unsafe {
                    $symv(
                        &uplo,
                        &n,
                        &alpha,
                        a.as_ptr(),
                        &lda,
                        x.as_ptr(),
                        &incx,
                        &beta,
                        y.as_mut_ptr(),
                        &incy,
                    )
                }
            }

            fn syr(
                uplo: Uplo,
                n: BlasInt,
                alpha: Self,
                x: &[Self],
                incx: BlasInt,
                a: &mut [Self],
                lda: BlasInt,
                _hermitian: bool,
                _conj_x: bool,
            ) {
                let uplo = code(uplo.as_char());
                unsafe { $syr(&uplo, &n, &alpha, x.as_ptr(), &incx, a.as_mut_ptr(), &lda) }
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
                _conj_a: bool,
            ) {
                let (uplo, trans, diag) = (
                    code(uplo.as_char()),
                    code(trans.as_char()),
                    code(diag.as_char()),
                );
                unsafe { $trmv(&uplo, &trans, &diag, &n, a.as_ptr(), &lda, x.as_mut_ptr(), &incx) }
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
                _conj_a: bool,
            ) {
                let (uplo, trans, diag) = (
                    code(uplo.as_char()),
                    code(trans.as_char()),
                    code(diag.as_char()),
                );
                unsafe { $trsv(&uplo, &trans, &diag, &n, a.as_ptr(), &lda, x.as_mut_ptr(), &incx) }
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
                let (ta, tb) = (code(transa.as_char()), code(transb.as_char()));
                unsafe {
                    $gemm(
                        &ta,
                        &tb,
                        &m,
                        &n,
                        &k,
                        &alpha,
                        a.as_ptr(),
                        &lda,
                        b.as_ptr(),
                        &ldb,
                        &beta,
                        c.as_mut_ptr(),
                        &ldc,
                    )
                }
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
                _hermitian: bool,
            ) {
                let (side, uplo) = (code(side.as_char()), code(uplo.as_char()));
                unsafe {
                    $symm(
                        &side,
                        &uplo,
                        &m,
                        &n,
                        &alpha,
                        a.as_ptr(),
                        &lda,
                        b.as_ptr(),
                        &ldb,
                        &beta,
                        c.as_mut_ptr(),
                        &ldc,
                    )
                }
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
                _hermitian: bool,
            ) {
                let (uplo, trans) = (code(uplo.as_char()), code(trans.as_char()));
                unsafe {
                    $syrk(
                        &uplo,
                        &trans,
                        &n,
                        &k,
                        &alpha,
                        a.as_ptr(),
                        &lda,
                        &beta,
                        c.as_mut_ptr(),
                        &ldc,
                    )
                }
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
                let (side, uplo, trans, diag) = (
                    code(side.as_char()),
                    code(uplo.as_char()),
                    code(trans.as_char()),
                    code(diag.as_char()),
                );
                unsafe {
                    $trmm(
                        &side,
                        &uplo,
                        &trans,
                        &diag,
                        &m,
                        &n,
                        &alpha,
                        a.as_ptr(),
                        &lda,
                        b.as_mut_ptr(),
                        &ldb,
                    )
                }
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
                let (side, uplo, trans, diag) = (
                    code(side.as_char()),
                    code(uplo.as_char()),
                    code(trans.as_char()),
                    code(diag.as_char()),
                );
                unsafe {
                    $trsm(
                        &side,
                        &uplo,
                        &trans,
                        &diag,
                        &m,
                        &n,
                        &alpha,
                        a.as_ptr(),
                        &lda,
                        b.as_mut_ptr(),
                        &ldb,
                    )
                }
            }
        }
    };
}

macro_rules! complex_kernels {
    ($r:ty, $gemv:ident, $geru:ident, $gerc:ident, $hemv:ident, $her:ident, $trmv:ident,
     $trsv:ident, $gemm:ident, $symm:ident, $hemm:ident, $syrk:ident, $herk:ident,
     $trmm:ident, $trsm:ident) => {
        extern "C" {
            fn $gemv(
                trans: *const c_char,
                m: *const BlasInt,
                n: *const BlasInt,
                alpha: *const Complex<$r>,
                a: *const Complex<$r>,
                lda: *const BlasInt,
                x: *const Complex<$r>,
                incx: *const BlasInt,
                beta: *const Complex<$r>,
                y: *mut Complex<$r>,
                incy: *const BlasInt,
            );
            fn $geru(
                m: *const BlasInt,
                n: *const BlasInt,
                alpha: *const Complex<$r>,
                x: *const Complex<$r>,
                incx: *const BlasInt,
                y: *const Complex<$r>,
                incy: *const BlasInt,
                a: *mut Complex<$r>,
                lda: *const BlasInt,
            );
            fn $gerc(
                m: *const BlasInt,
                n: *const BlasInt,
                alpha: *const Complex<$r>,
                x: *const Complex<$r>,
                incx: *const BlasInt,
                y: *const Complex<$r>,
                incy: *const BlasInt,
                a: *mut Complex<$r>,
                lda: *const BlasInt,
            );
            fn $hemv(
                uplo: *const c_char,
                n: *const BlasInt,
                alpha: *const Complex<$r>,
                a: *const Complex<$r>,
                lda: *const BlasInt,
                x: *const Complex<$r>,
                incx: *const BlasInt,
                beta: *const Complex<$r>,
                y: *mut Complex<$r>,
                incy: *const BlasInt,
            );
            fn $her(
                uplo: *const c_char,
                n: *const BlasInt,
                alpha: *const $r,
                x: *const Complex<$r>,
                incx: *const BlasInt,
                a: *mut Complex<$r>,
                lda: *const BlasInt,
            );
            fn $trmv(
                uplo: *const c_char,
                trans: *const c_char,
                diag: *const c_char,
                n: *const BlasInt,
                a: *const Complex<$r>,
                lda: *const BlasInt,
                x: *mut Complex<$r>,
                incx: *const BlasInt,
            );
            fn $trsv(
                uplo: *const c_char,
                trans: *const c_char,
                diag: *const c_char,
                n: *const BlasInt,
                a: *const Complex<$r>,
                lda: *const BlasInt,
                x: *mut Complex<$r>,
                incx: *const BlasInt,
            );
            fn $gemm(
                transa: *const c_char,
                transb: *const c_char,
                m: *const BlasInt,
                n: *const BlasInt,
                k: *const BlasInt,
                alpha: *const Complex<$r>,
                a: *const Complex<$r>,
                lda: *const BlasInt,
                b: *const Complex<$r>,
                ldb: *const BlasInt,
                beta: *const Complex<$r>,
                c: *mut Complex<$r>,
                ldc: *const BlasInt,
            );
            fn $symm(
                side: *const c_char,
                uplo: *const c_char,
                m: *const BlasInt,
                n: *const BlasInt,
                alpha: *const Complex<$r>,
                a: *const Complex<$r>,
                lda: *const BlasInt,
                b: *const Complex<$r>,
                ldb: *const BlasInt,
                beta: *const Complex<$r>,
                c: *mut Complex<$r>,
                ldc: *const BlasInt,
            );
            fn $hemm(
                side: *const c_char,
                uplo: *const c_char,
                m: *const BlasInt,
                n: *const BlasInt,
                alpha: *const Complex<$r>,
                a: *const Complex<$r>,
                lda: *const BlasInt,
                b: *const Complex<$r>,
                ldb: *const BlasInt,
                beta: *const Complex<$r>,
                c: *mut Complex<$r>,
                ldc: *const BlasInt,
            );
            fn $syrk(
                uplo: *const c_char,
                trans: *const c_char,
                n: *const BlasInt,
                k: *const BlasInt,
                alpha: *const Complex<$r>,
                a: *const Complex<$r>,
                lda: *const BlasInt,
                beta: *const Complex<$r>,
                c: *mut Complex<$r>,
                ldc: *const BlasInt,
            );
            fn $herk(
                uplo: *const c_char,
                trans: *const c_char,
                n: *const BlasInt,
                k: *const BlasInt,
                alpha: *const $r,
                a: *const Complex<$r>,
                lda: *const BlasInt,
                beta: *const $r,
                c: *mut Complex<$r>,
                ldc: *const BlasInt,
            );
            fn $trmm(
                side: *const c_char,
                uplo: *const c_char,
                transa: *const c_char,
                diag: *const c_char,
                m: *const BlasInt,
                n: *const BlasInt,
                alpha: *const Complex<$r>,
                a: *const Complex<$r>,
                lda: *const BlasInt,
                b: *mut Complex<$r>,
                ldb: *const BlasInt,
            );
            fn $trsm(
                side: *const c_char,
                uplo: *const c_char,
                transa: *const c_char,
                diag: *const c_char,
                m: *const BlasInt,
                n: *const BlasInt,
                alpha: *const Complex<$r>,
                a: *const Complex<$r>,
                lda: *const BlasInt,
                b: *mut Complex<$r>,
                ldb: *const BlasInt,
            );
        }

        impl Kernels for Complex<$r> {
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
                let (mode, around) = fold_conj(trans, conj_a);
                let t = code(mode.as_char());
                if !around {
                    unsafe {
                        $gemv(
                            &t,
                            &m,
                            &n,
                            &alpha,
                            a.as_ptr(),
                            &lda,
                            x.as_ptr(),
                            &incx,
                            &beta,
                            y.as_mut_ptr(),
                            &incy,
                        )
                    }
                    return;
                }
                // conj(y) := conj(alpha) A conj(x) + conj(beta) conj(y)
                let xc = conjugated(x);
                reference::conj(dim(m), y, inc(incy));
                unsafe {
                    $gemv(
                        &t,
                        &m,
                        &n,
                        &alpha.conj(),
                        a.as_ptr(),
                        &lda,
                        xc.as_ptr(),
                        &incx,
                        &beta.conj(),
                        y.as_mut_ptr(),
                        &incy,
                    )
                }
                reference::conj(dim(m), y, inc(incy));
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
                let xc;
                let x = if conj_x {
                    xc = conjugated(x);
                    &xc[..]
                } else {
                    x
                };
                let update = if conj_y { $gerc } else { $geru };
                unsafe {
                    update(
                        &m,
                        &n,
                        &alpha,
                        x.as_ptr(),
                        &incx,
                        y.as_ptr(),
                        &incy,
                        a.as_mut_ptr(),
                        &lda,
                    )
                }
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
                if !hermitian {
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
                        false,
                        conj_a,
                    );
                    return;
                }
                let u = code(uplo.as_char());
                if !conj_a {
                    unsafe {
                        $hemv(
                            &u,
                            &n,
                            &alpha,
                            a.as_ptr(),
                            &lda,
                            x.as_ptr(),
                            &incx,
                            &beta,
                            y.as_mut_ptr(),
                            &incy,
                        )
                    }
                    return;
                }
                let xc = conjugated(x);
                reference::conj(dim(n), y, inc(incy));
                unsafe {
                    $hemv(
                        &u,
                        &n,
                        &alpha.conj(),
                        a.as_ptr(),
                        &lda,
                        xc.as_ptr(),
                        &incx,
                        &beta.conj(),
                        y.as_mut_ptr(),
                        &incy,
                    )
                }
                reference::conj(dim(n), y, inc(incy));
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
                if !hermitian {
                    reference::syr(uplo, dim(n), alpha, x, inc(incx), a, dim(lda), false, conj_x);
                    return;
                }
                let xc;
                let x = if conj_x {
                    xc = conjugated(x);
                    &xc[..]
                } else {
                    x
                };
                let u = code(uplo.as_char());
                let alpha = alpha.re;
                unsafe { $her(&u, &n, &alpha, x.as_ptr(), &incx, a.as_mut_ptr(), &lda) }
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
                let (mode, around) = fold_conj(trans, conj_a);
                let (u, t, d) = (
                    code(uplo.as_char()),
                    code(mode.as_char()),
                    code(diag.as_char()),
                );
                if around {
                    reference::conj(dim(n), x, inc(incx));
                }
                unsafe { $trmv(&u, &t, &d, &n, a.as_ptr(), &lda, x.as_mut_ptr(), &incx) }
                if around {
                    reference::conj(dim(n), x, inc(incx));
                }
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
                let (mode, around) = fold_conj(trans, conj_a);
                let (u, t, d) = (
                    code(uplo.as_char()),
                    code(mode.as_char()),
                    code(diag.as_char()),
                );
                if around {
                    reference::conj(dim(n), x, inc(incx));
                }
                unsafe { $trsv(&u, &t, &d, &n, a.as_ptr(), &lda, x.as_mut_ptr(), &incx) }
                if around {
                    reference::conj(dim(n), x, inc(incx));
                }
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
                let (ta, tb) = (code(transa.as_char()), code(transb.as_char()));
                unsafe {
                    $gemm(
                        &ta,
                        &tb,
                        &m,
                        &n,
                        &k,
                        &alpha,
                        a.as_ptr(),
                        &lda,
                        b.as_ptr(),
                        &ldb,
                        &beta,
                        c.as_mut_ptr(),
                        &ldc,
                    )
                }
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
                let (s, u) = (code(side.as_char()), code(uplo.as_char()));
                let product = if hermitian { $hemm } else { $symm };
                unsafe {
                    product(
                        &s,
                        &u,
                        &m,
                        &n,
                        &alpha,
                        a.as_ptr(),
                        &lda,
                        b.as_ptr(),
                        &ldb,
                        &beta,
                        c.as_mut_ptr(),
                        &ldc,
                    )
                }
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
                let (u, t) = (code(uplo.as_char()), code(trans.as_char()));
                if hermitian {
                    let (alpha, beta) = (alpha.re, beta.re);
                    unsafe {
                        $herk(
                            &u,
                            &t,
                            &n,
                            &k,
                            &alpha,
                            a.as_ptr(),
                            &lda,
                            &beta,
                            c.as_mut_ptr(),
                            &ldc,
                        )
                    }
                } else {
                    unsafe {
                        $syrk(
                            &u,
                            &t,
                            &n,
                            &k,
                            &alpha,
                            a.as_ptr(),
                            &lda,
                            &beta,
                            c.as_mut_ptr(),
                            &ldc,
                        )
                    }
                }
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
                let (s, u, t, d) = (
                    code(side.as_char()),
                    code(uplo.as_char()),
                    code(trans.as_char()),
                    code(diag.as_char()),
                );
                unsafe {
                    $trmm(
                        &s,
                        &u,
                        &t,
                        &d,
                        &m,
                        &n,
                        &alpha,
                        a.as_ptr(),
                        &lda,
                        b.as_mut_ptr(),
                        &ldb,
                    )
                }
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
                let (s, u, t, d) = (
                    code(side.as_char()),
                    code(uplo.as_char()),
                    code(trans.as_char()),
                    code(diag.as_char()),
                );
                unsafe {
                    $trsm(
                        &s,
                        &u,
                        &t,
                        &d,
                        &m,
                        &n,
                        &alpha,
                        a.as_ptr(),
                        &lda,
                        b.as_mut_ptr(),
                        &ldb,
                    )
                }
            }
        }
    };
}

real_kernels!(
    f32, sgemv_, sger_, ssymv_, ssyr_, strmv_, strsv_, sgemm_, ssymm_, ssyrk_, strmm_, strsm_
);
real_kernels!(
    f64, dgemv_, dger_, dsymv_, dsyr_, dtrmv_, dtrsv_, dgemm_, dsymm_, dsyrk_, dtrmm_, dtrsm_
);
complex_kernels!(
    f32, cgemv_, cgeru_, cgerc_, chemv_, cher_, ctrmv_, ctrsv_, cgemm_, csymm_, chemm_, csyrk_,
    cherk_, ctrmm_, ctrsm_
);
complex_kernels!(
    f64, zgemv_, zgeru_, zgerc_, zhemv_, zher_, ztrmv_, ztrsv_, zgemm_, zsymm_, zhemm_, zsyrk_,
    zherk_, ztrmm_, ztrsm_
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_conj() {
        assert_eq!(fold_conj(Transpose::Trans, false), (Transpose::Trans, false));
        assert_eq!(fold_conj(Transpose::Trans, true), (Transpose::ConjTrans, false));
        assert_eq!(fold_conj(Transpose::ConjTrans, true), (Transpose::Trans, false));
        assert_eq!(fold_conj(Transpose::NoTrans, true), (Transpose::NoTrans, true));
    }

    #[test]
    fn test_code_is_ascii() {
        assert_eq!(code('N'), b'N' as c_char);
        assert_eq!(code(Uplo::Lower.as_char()), b'L' as c_char);
    }
}
