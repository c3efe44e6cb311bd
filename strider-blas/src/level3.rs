//! BLAS Level 3: Matrix-matrix operations.
//!
//! Row-major requests run as the column-major computation of the transposed
//! result: `gemm` swaps its operands, the two-sided routines flip side and
//! triangle and swap m and n, and the rank-k updates flip the triangle and
//! the transpose mode.

use strider_core::config::narrow;
use strider_core::normalize::{GeneralProduct, RankK, SidedProduct, TriangularProduct};
use strider_core::validate;
use strider_core::{Diag, Layout, Result, Side, Transpose, Uplo};

use crate::kernels::Kernels;

// ============================================================================
// GEMM: General matrix multiply
// C := alpha * op(A) * op(B) + beta * C
// ============================================================================

/// C := alpha * op(A) * op(B) + beta * C, C is m x n.
///
/// # Example
/// ```
/// use strider_blas::{level3, Layout, Transpose};
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let b = [5.0, 6.0, 7.0, 8.0];
/// let mut c = [0.0; 4];
/// level3::gemm(Layout::RowMajor, Transpose::NoTrans, Transpose::NoTrans,
///              2, 2, 2, 1.0, &a, 2, &b, 2, 0.0, &mut c, 2).unwrap();
/// assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
/// ```
pub fn gemm<T: Kernels>(
    layout: Layout,
    transa: Transpose,
    transb: Transpose,
    m: i64,
    n: i64,
    k: i64,
    alpha: T,
    a: &[T],
    lda: i64,
    b: &[T],
    ldb: i64,
    beta: T,
    c: &mut [T],
    ldc: i64,
) -> Result<()> {
    validate::gemm(
        layout,
        transa,
        transb,
        m,
        n,
        k,
        a.len(),
        lda,
        b.len(),
        ldb,
        c.len(),
        ldc,
    )?;
    if m == 0 || n == 0 {
        return Ok(());
    }
    let plan = GeneralProduct::new(layout, transa, transb, m, n);
    let ((a, lda), (b, ldb)) = if plan.swap_operands {
        ((b, ldb), (a, lda))
    } else {
        ((a, lda), (b, ldb))
    };
    T::gemm(
        plan.transa,
        plan.transb,
        narrow(plan.m),
        narrow(plan.n),
        narrow(k),
        alpha,
        a,
        narrow(lda),
        b,
        narrow(ldb),
        beta,
        c,
        narrow(ldc),
    );
    Ok(())
}

// ============================================================================
// SYMM / HEMM
// C := alpha * A * B + beta * C (Left), C := alpha * B * A + beta * C (Right)
// ============================================================================

fn sided_product<T: Kernels>(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    m: i64,
    n: i64,
    alpha: T,
    a: &[T],
    lda: i64,
    b: &[T],
    ldb: i64,
    beta: T,
    c: &mut [T],
    ldc: i64,
    hermitian: bool,
) -> Result<()> {
    validate::symm(
        layout,
        side,
        uplo,
        m,
        n,
        a.len(),
        lda,
        b.len(),
        ldb,
        c.len(),
        ldc,
    )?;
    if m == 0 || n == 0 {
        return Ok(());
    }
    let plan = SidedProduct::new(layout, side, uplo, m, n);
    T::symm(
        plan.side,
        plan.uplo,
        narrow(plan.m),
        narrow(plan.n),
        alpha,
        a,
        narrow(lda),
        b,
        narrow(ldb),
        beta,
        c,
        narrow(ldc),
        hermitian,
    );
    Ok(())
}

/// Symmetric matrix multiply; A is m x m (Left) or n x n (Right).
pub fn symm<T: Kernels>(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    m: i64,
    n: i64,
    alpha: T,
    a: &[T],
    lda: i64,
    b: &[T],
    ldb: i64,
    beta: T,
    c: &mut [T],
    ldc: i64,
) -> Result<()> {
    sided_product(
        layout, side, uplo, m, n, alpha, a, lda, b, ldb, beta, c, ldc, false,
    )
}

/// Hermitian matrix multiply. The imaginary parts of A's diagonal are not
/// referenced.
pub fn hemm<T: Kernels>(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    m: i64,
    n: i64,
    alpha: T,
    a: &[T],
    lda: i64,
    b: &[T],
    ldb: i64,
    beta: T,
    c: &mut [T],
    ldc: i64,
) -> Result<()> {
    sided_product(
        layout, side, uplo, m, n, alpha, a, lda, b, ldb, beta, c, ldc, true,
    )
}

// ============================================================================
// SYRK / HERK: C := alpha * A * A' + beta * C or alpha * A' * A + beta * C
// ============================================================================

/// Symmetric rank-k update: `A Aᵀ` (NoTrans, A is n x k) or `Aᵀ A` (Trans,
/// A is k x n).
///
/// `ConjTrans` is `NotImplemented` for complex scalars and means `Trans` for
/// real ones.
pub fn syrk<T: Kernels>(
    layout: Layout,
    uplo: Uplo,
    trans: Transpose,
    n: i64,
    k: i64,
    alpha: T,
    a: &[T],
    lda: i64,
    beta: T,
    c: &mut [T],
    ldc: i64,
) -> Result<()> {
    validate::syrk(
        layout,
        uplo,
        trans,
        n,
        k,
        a.len(),
        lda,
        c.len(),
        ldc,
        T::IS_COMPLEX,
    )?;
    if n == 0 {
        return Ok(());
    }
    let plan = RankK::new(layout, uplo, trans, false);
    T::syrk(
        plan.uplo,
        plan.trans,
        narrow(n),
        narrow(k),
        alpha,
        a,
        narrow(lda),
        beta,
        c,
        narrow(ldc),
        false,
    );
    Ok(())
}

/// Hermitian rank-k update with real alpha and beta: `A Aᴴ` (NoTrans) or
/// `Aᴴ A` (ConjTrans). The diagonal of C is left real.
///
/// `Trans` is `NotImplemented` for complex scalars and means `ConjTrans` for
/// real ones.
pub fn herk<T: Kernels>(
    layout: Layout,
    uplo: Uplo,
    trans: Transpose,
    n: i64,
    k: i64,
    alpha: T::Real,
    a: &[T],
    lda: i64,
    beta: T::Real,
    c: &mut [T],
    ldc: i64,
) -> Result<()> {
    validate::herk(
        layout,
        uplo,
        trans,
        n,
        k,
        a.len(),
        lda,
        c.len(),
        ldc,
        T::IS_COMPLEX,
    )?;
    if n == 0 {
        return Ok(());
    }
    let plan = RankK::new(layout, uplo, trans, true);
    T::syrk(
        plan.uplo,
        plan.trans,
        narrow(n),
        narrow(k),
        T::from_real(alpha),
        a,
        narrow(lda),
        T::from_real(beta),
        c,
        narrow(ldc),
        true,
    );
    Ok(())
}

// ============================================================================
// TRMM / TRSM
// B := alpha * op(A) * B, B := alpha * B * op(A), and the matching solves
// ============================================================================

/// Triangular matrix multiply; A is m x m (Left) or n x n (Right), B is m x n.
pub fn trmm<T: Kernels>(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    m: i64,
    n: i64,
    alpha: T,
    a: &[T],
    lda: i64,
    b: &mut [T],
    ldb: i64,
) -> Result<()> {
    validate::trmm(layout, side, uplo, m, n, a.len(), lda, b.len(), ldb)?;
    if m == 0 || n == 0 {
        return Ok(());
    }
    let plan = TriangularProduct::new(layout, side, uplo, trans, m, n);
    T::trmm(
        plan.side,
        plan.uplo,
        plan.trans,
        diag,
        narrow(plan.m),
        narrow(plan.n),
        alpha,
        a,
        narrow(lda),
        b,
        narrow(ldb),
    );
    Ok(())
}

/// Triangular solve with multiple right-hand sides: B := alpha * op(A)^-1 * B
/// (Left) or alpha * B * op(A)^-1 (Right). No test for singularity is made.
pub fn trsm<T: Kernels>(
    layout: Layout,
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    m: i64,
    n: i64,
    alpha: T,
    a: &[T],
    lda: i64,
    b: &mut [T],
    ldb: i64,
) -> Result<()> {
    validate::trmm(layout, side, uplo, m, n, a.len(), lda, b.len(), ldb)?;
    if m == 0 || n == 0 {
        return Ok(());
    }
    let plan = TriangularProduct::new(layout, side, uplo, trans, m, n);
    T::trsm(
        plan.side,
        plan.uplo,
        plan.trans,
        diag,
        narrow(plan.m),
        narrow(plan.n),
        alpha,
        a,
        narrow(lda),
        b,
        narrow(ldb),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        apply_op, assert_close, logical, matmul, mirror, nan, outside, padded, poison, triangle,
    };
    use num_complex::Complex;
    use strider_core::{Error, Scalar, SplitMix64};

    type C64 = Complex<f64>;

    const LAYOUTS: [Layout; 2] = [Layout::ColMajor, Layout::RowMajor];
    const UPLOS: [Uplo; 2] = [Uplo::Upper, Uplo::Lower];
    const SIDES: [Side; 2] = [Side::Left, Side::Right];
    const TRANSES: [Transpose; 3] = [Transpose::NoTrans, Transpose::Trans, Transpose::ConjTrans];

    /// Marks entries a rank-k update must not write.
    const SENTINEL: C64 = C64::new(7.0, -7.0);

    fn axpby<T: Scalar>(alpha: T, x: &[T], beta: T, y: &[T]) -> Vec<T> {
        x.iter().zip(y).map(|(&x, &y)| alpha * x + beta * y).collect()
    }

    #[test]
    fn test_gemm_matches_dense() {
        let mut rng = SplitMix64::new(3);
        let (m, n, k) = (3usize, 2usize, 4usize);
        for layout in LAYOUTS {
            for transa in TRANSES {
                for transb in TRANSES {
                    let (ar, ac) = if transa == Transpose::NoTrans { (m, k) } else { (k, m) };
                    let (br, bc) = if transb == Transpose::NoTrans { (k, n) } else { (n, k) };
                    let (a, lda) = padded::<C64>(&mut rng, layout, ar, ac);
                    let (b, ldb) = padded::<C64>(&mut rng, layout, br, bc);
                    let (c0, ldc) = padded::<C64>(&mut rng, layout, m, n);
                    let alpha = C64::new(0.5, 0.5);
                    let beta = C64::new(-1.0, 0.0);

                    let (opa, _, _) = apply_op(&logical(layout, ar, ac, &a, lda), ar, ac, transa);
                    let (opb, _, _) = apply_op(&logical(layout, br, bc, &b, ldb), br, bc, transb);
                    let want = axpby(alpha, &matmul(&opa, &opb, m, k, n), beta, &logical(layout, m, n, &c0, ldc));

                    let mut c = c0.clone();
                    gemm(
                        layout, transa, transb, m as i64, n as i64, k as i64, alpha, &a, lda as i64, &b,
                        ldb as i64, beta, &mut c, ldc as i64,
                    )
                    .unwrap();
                    assert_close(&logical(layout, m, n, &c, ldc), &want, 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_gemm_beta_zero_ignores_nan_in_c() {
        let a = [1.0f32, 2.0, 3.0, 4.0];
        let mut c = [f32::NAN; 4];
        gemm(
            Layout::RowMajor, Transpose::NoTrans, Transpose::Trans, 2, 2, 2, 1.0, &a, 2, &a, 2, 0.0, &mut c, 2,
        )
        .unwrap();
        assert_eq!(c, [5.0, 11.0, 11.0, 25.0]);
    }

    #[test]
    fn test_zero_alpha_does_not_read_operands() {
        let a = [f64::NAN; 4];
        let mut c = [1.0f64, 2.0, 3.0, 4.0];
        gemm(
            Layout::ColMajor, Transpose::NoTrans, Transpose::NoTrans, 2, 2, 2, 0.0, &a, 2, &a, 2, 2.0, &mut c, 2,
        )
        .unwrap();
        assert_eq!(c, [2.0, 4.0, 6.0, 8.0]);

        let mut b = [1.0f64, 2.0, 3.0, 4.0];
        trmm(Layout::RowMajor, Side::Left, Uplo::Upper, Transpose::NoTrans, Diag::NonUnit, 2, 2, 0.0, &a, 2, &mut b, 2)
            .unwrap();
        assert_eq!(b, [0.0; 4]);
    }

    #[test]
    fn test_gemm_rejects_short_leading_dimension() {
        let a = [0.0f64; 6];
        let mut c = [0.0f64; 4];
        // row-major A is 2 x 3: lda must be >= 3
        let err = gemm(
            Layout::RowMajor, Transpose::NoTrans, Transpose::NoTrans, 2, 2, 3, 1.0, &a, 2, &a, 2, 0.0, &mut c, 2,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "lda", .. }));
    }

    #[test]
    fn test_symm_hemm_match_dense() {
        let mut rng = SplitMix64::new(13);
        let (m, n) = (3usize, 2usize);
        for layout in LAYOUTS {
            for side in SIDES {
                for uplo in UPLOS {
                    for hermitian in [false, true] {
                        let order = if side == Side::Left { m } else { n };
                        let (mut a, lda) = padded::<C64>(&mut rng, layout, order, order);
                        poison(&mut a, layout, order, lda, uplo, nan(), hermitian);
                        let (b, ldb) = padded::<C64>(&mut rng, layout, m, n);
                        let (c0, ldc) = padded::<C64>(&mut rng, layout, m, n);
                        let full = mirror(&logical(layout, order, order, &a, lda), order, uplo, hermitian);
                        let dense_b = logical(layout, m, n, &b, ldb);
                        let product = match side {
                            Side::Left => matmul(&full, &dense_b, m, m, n),
                            Side::Right => matmul(&dense_b, &full, m, n, n),
                        };
                        let alpha = C64::new(1.0, -2.0);
                        let beta = C64::new(0.5, 0.0);
                        let want = axpby(alpha, &product, beta, &logical(layout, m, n, &c0, ldc));

                        let mut c = c0.clone();
                        let run = if hermitian { hemm::<C64> } else { symm::<C64> };
                        run(
                            layout, side, uplo, m as i64, n as i64, alpha, &a, lda as i64, &b, ldb as i64, beta,
                            &mut c, ldc as i64,
                        )
                        .unwrap();
                        assert_close(&logical(layout, m, n, &c, ldc), &want, 1e-12);
                    }
                }
            }
        }
    }

    #[test]
    fn test_syrk_herk_match_dense() {
        let mut rng = SplitMix64::new(17);
        let (n, k) = (3usize, 2usize);
        for layout in LAYOUTS {
            for uplo in UPLOS {
                for hermitian in [false, true] {
                    let modes = if hermitian {
                        [Transpose::NoTrans, Transpose::ConjTrans]
                    } else {
                        [Transpose::NoTrans, Transpose::Trans]
                    };
                    for trans in modes {
                        let (ar, ac) = if trans == Transpose::NoTrans { (n, k) } else { (k, n) };
                        let (a, lda) = padded::<C64>(&mut rng, layout, ar, ac);
                        let (mut c0, ldc) = padded::<C64>(&mut rng, layout, n, n);
                        poison(&mut c0, layout, n, ldc, uplo, SENTINEL, hermitian);
                        let dense_a = logical(layout, ar, ac, &a, lda);
                        let adjoint = if hermitian { Transpose::ConjTrans } else { Transpose::Trans };
                        let (at, _, _) = apply_op(&dense_a, ar, ac, adjoint);
                        let product = if trans == Transpose::NoTrans {
                            matmul(&dense_a, &at, n, k, n)
                        } else {
                            matmul(&at, &dense_a, n, k, n)
                        };
                        let (alpha, beta) = (0.5f64, -2.0f64);
                        let before = mirror(&logical(layout, n, n, &c0, ldc), n, uplo, hermitian);
                        let want = axpby(C64::new(alpha, 0.0), &product, C64::new(beta, 0.0), &before);

                        let mut c = c0.clone();
                        if hermitian {
                            herk(layout, uplo, trans, n as i64, k as i64, alpha, &a, lda as i64, beta, &mut c, ldc as i64)
                                .unwrap();
                        } else {
                            syrk(
                                layout, uplo, trans, n as i64, k as i64, C64::new(alpha, 0.0), &a, lda as i64,
                                C64::new(beta, 0.0), &mut c, ldc as i64,
                            )
                            .unwrap();
                        }
                        let after = mirror(&logical(layout, n, n, &c, ldc), n, uplo, hermitian);
                        assert_close(&after, &want, 1e-12);
                        for i in 0..n {
                            for j in 0..n {
                                let v = c[layout.index(i, j, ldc)];
                                if outside(uplo, i, j) {
                                    assert_eq!(v, SENTINEL);
                                } else if i == j && hermitian {
                                    assert_eq!(v.im, 0.0);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_herk_reads_only_real_part_of_c_diagonal() {
        let a = [C64::new(1.0, 0.0); 4];
        for layout in LAYOUTS {
            for trans in [Transpose::NoTrans, Transpose::ConjTrans] {
                for beta in [1.0f64, 2.0] {
                    let zero = C64::new(0.0, 0.0);
                    let mut c = [C64::new(1.0, f64::NAN), zero, zero, C64::new(1.0, f64::NAN)];
                    herk(layout, Uplo::Upper, trans, 2, 2, 1.0, &a, 2, beta, &mut c, 2).unwrap();
                    // beta * 1 + (1 + 1)
                    let want = C64::new(beta + 2.0, 0.0);
                    assert_eq!(c[0], want, "{layout:?} {trans:?} beta={beta}");
                    assert_eq!(c[3], want, "{layout:?} {trans:?} beta={beta}");
                }
            }
        }
    }

    #[test]
    fn test_rank_k_illegal_complex_modes() {
        let a = [C64::new(1.0, 0.0); 4];
        let mut c = [C64::new(0.0, 0.0); 4];
        let one = C64::new(1.0, 0.0);
        let err = syrk(Layout::ColMajor, Uplo::Upper, Transpose::ConjTrans, 2, 2, one, &a, 2, one, &mut c, 2)
            .unwrap_err();
        assert!(matches!(err, Error::NotImplemented { .. }));
        let err = herk(Layout::RowMajor, Uplo::Lower, Transpose::Trans, 2, 2, 1.0, &a, 2, 1.0, &mut c, 2)
            .unwrap_err();
        assert!(matches!(err, Error::NotImplemented { .. }));
        assert_eq!(c, [C64::new(0.0, 0.0); 4]);
    }

    #[test]
    fn test_real_rank_k_reinterprets_modes() {
        let a = [1.0f64, 2.0, 3.0, 4.0];
        let mut c1 = [0.0f64; 4];
        let mut c2 = [0.0f64; 4];
        syrk(Layout::RowMajor, Uplo::Upper, Transpose::Trans, 2, 2, 1.0, &a, 2, 0.0, &mut c1, 2).unwrap();
        syrk(Layout::RowMajor, Uplo::Upper, Transpose::ConjTrans, 2, 2, 1.0, &a, 2, 0.0, &mut c2, 2).unwrap();
        assert_eq!(c1, c2);
        let mut c3 = [0.0f64; 4];
        herk(Layout::RowMajor, Uplo::Upper, Transpose::Trans, 2, 2, 1.0, &a, 2, 0.0, &mut c3, 2).unwrap();
        assert_eq!(c1, c3);
    }

    #[test]
    fn test_trmm_trsm_match_dense() {
        let mut rng = SplitMix64::new(29);
        let (m, n) = (3usize, 2usize);
        for layout in LAYOUTS {
            for side in SIDES {
                for uplo in UPLOS {
                    for trans in TRANSES {
                        for diag in [Diag::NonUnit, Diag::Unit] {
                            let order = if side == Side::Left { m } else { n };
                            let (mut a, lda) = padded::<C64>(&mut rng, layout, order, order);
                            for i in 0..order {
                                a[layout.index(i, i, lda)] += C64::new(3.0, 0.0);
                            }
                            poison(&mut a, layout, order, lda, uplo, nan(), false);
                            if diag == Diag::Unit {
                                for i in 0..order {
                                    a[layout.index(i, i, lda)] = nan();
                                }
                            }
                            let (b0, ldb) = padded::<C64>(&mut rng, layout, m, n);
                            let tri = triangle(&logical(layout, order, order, &a, lda), order, uplo, diag);
                            let (opa, _, _) = apply_op(&tri, order, order, trans);
                            let dense_b = logical(layout, m, n, &b0, ldb);
                            let alpha = C64::new(2.0, 1.0);
                            let product = match side {
                                Side::Left => matmul(&opa, &dense_b, m, m, n),
                                Side::Right => matmul(&dense_b, &opa, m, n, n),
                            };
                            let want: Vec<C64> = product.iter().map(|&v| alpha * v).collect();

                            let mut b = b0.clone();
                            trmm(
                                layout, side, uplo, trans, diag, m as i64, n as i64, alpha, &a, lda as i64, &mut b,
                                ldb as i64,
                            )
                            .unwrap();
                            assert_close(&logical(layout, m, n, &b, ldb), &want, 1e-12);

                            let inv = C64::new(1.0, 0.0) / alpha;
                            trsm(
                                layout, side, uplo, trans, diag, m as i64, n as i64, inv, &a, lda as i64, &mut b,
                                ldb as i64,
                            )
                            .unwrap();
                            assert_close(&b, &b0, 1e-10);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_trsm_reads_only_its_triangle() {
        for layout in LAYOUTS {
            // 2x2 upper [[2, 1], [_, 4]] with the lower entry poisoned
            let mut a = [f64::NAN; 4];
            a[layout.index(0, 0, 2)] = 2.0;
            a[layout.index(0, 1, 2)] = 1.0;
            a[layout.index(1, 1, 2)] = 4.0;
            // B is 2 x 1, stored [3, 4] in either layout
            let mut b = [3.0f64, 4.0];
            let ldb = if layout == Layout::ColMajor { 2 } else { 1 };
            trsm(layout, Side::Left, Uplo::Upper, Transpose::NoTrans, Diag::NonUnit, 2, 1, 1.0, &a, 2, &mut b, ldb)
                .unwrap();
            // x1 = 4 / 4 = 1, x0 = (3 - 1) / 2 = 1
            assert_eq!(b, [1.0, 1.0]);
        }
    }
}
