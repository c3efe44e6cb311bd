//! Row-major to column-major rewriting.
//!
//! A row-major `rows x cols` matrix occupies exactly the storage of its
//! column-major transpose, so every row-major request can be served by a
//! column-major kernel after flipping the triangle, the side and the
//! transpose mode. Each plan below is the column-major request equivalent to
//! one logical request. Column-major requests pass through unchanged apart
//! from the real-scalar reinterpretations of `syrk`/`herk` transposes.
//!
//! Plans are computed after validation and never fail.

use crate::layout::{Layout, Side, Transpose, Uplo};

/// Transpose mode of a matrix-vector operation after transposing storage.
///
/// `ConjTrans` has no column-major counterpart without conjugating the
/// stored matrix, so it becomes `NoTrans` plus a conjugation flag.
#[inline]
fn transpose_vector_op(trans: Transpose) -> (Transpose, bool) {
    match trans {
        Transpose::NoTrans => (Transpose::Trans, false),
        Transpose::Trans => (Transpose::NoTrans, false),
        Transpose::ConjTrans => (Transpose::NoTrans, true),
    }
}

/// `trmv` / `trsv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangularVector {
    pub uplo: Uplo,
    pub trans: Transpose,
    /// Conjugate every element of A that is read.
    pub conj: bool,
}

impl TriangularVector {
    pub fn new(layout: Layout, uplo: Uplo, trans: Transpose) -> Self {
        match layout {
            Layout::ColMajor => Self {
                uplo,
                trans,
                conj: false,
            },
            Layout::RowMajor => {
                let (trans, conj) = transpose_vector_op(trans);
                Self {
                    uplo: uplo.flip(),
                    trans,
                    conj,
                }
            }
        }
    }
}

/// `gemv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneralVector {
    pub trans: Transpose,
    pub m: i64,
    pub n: i64,
    pub conj: bool,
}

impl GeneralVector {
    pub fn new(layout: Layout, trans: Transpose, m: i64, n: i64) -> Self {
        match layout {
            Layout::ColMajor => Self {
                trans,
                m,
                n,
                conj: false,
            },
            Layout::RowMajor => {
                let (trans, conj) = transpose_vector_op(trans);
                Self {
                    trans,
                    m: n,
                    n: m,
                    conj,
                }
            }
        }
    }
}

/// `ger` (`x yᴴ`) and `geru` (`x yᵀ`).
///
/// Row-major storage turns `A += x yᴴ` into `Aᵀ += conj(y) xᵀ`: the operands
/// swap and the conjugation moves to the new `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank1Update {
    /// Pass `y` as the kernel's `x` and vice versa.
    pub swap_operands: bool,
    pub m: i64,
    pub n: i64,
    pub conj_x: bool,
    pub conj_y: bool,
}

impl Rank1Update {
    /// `conj` selects `ger` (conjugated `y`) over `geru`.
    pub fn new(layout: Layout, m: i64, n: i64, conj: bool) -> Self {
        match layout {
            Layout::ColMajor => Self {
                swap_operands: false,
                m,
                n,
                conj_x: false,
                conj_y: conj,
            },
            Layout::RowMajor => Self {
                swap_operands: true,
                m: n,
                n: m,
                conj_x: conj,
                conj_y: false,
            },
        }
    }
}

/// `symv` / `hemv`.
///
/// The transposed storage of a Hermitian matrix is its conjugate, so
/// row-major `hemv` reads conj(A).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HermitianVector {
    pub uplo: Uplo,
    pub conj: bool,
}

impl HermitianVector {
    pub fn new(layout: Layout, uplo: Uplo, hermitian: bool) -> Self {
        match layout {
            Layout::ColMajor => Self { uplo, conj: false },
            Layout::RowMajor => Self {
                uplo: uplo.flip(),
                conj: hermitian,
            },
        }
    }
}

/// `syr` / `her`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymmetricRank1 {
    pub uplo: Uplo,
    /// Use conj(x) as the update vector.
    pub conj_x: bool,
}

impl SymmetricRank1 {
    pub fn new(layout: Layout, uplo: Uplo, hermitian: bool) -> Self {
        match layout {
            Layout::ColMajor => Self {
                uplo,
                conj_x: false,
            },
            Layout::RowMajor => Self {
                uplo: uplo.flip(),
                conj_x: hermitian,
            },
        }
    }
}

/// `gemm`: `Cᵀ = op(B)ᵀ op(A)ᵀ`, so row-major swaps the operands and keeps
/// both transpose modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneralProduct {
    pub swap_operands: bool,
    pub transa: Transpose,
    pub transb: Transpose,
    pub m: i64,
    pub n: i64,
}

impl GeneralProduct {
    pub fn new(layout: Layout, transa: Transpose, transb: Transpose, m: i64, n: i64) -> Self {
        match layout {
            Layout::ColMajor => Self {
                swap_operands: false,
                transa,
                transb,
                m,
                n,
            },
            Layout::RowMajor => Self {
                swap_operands: true,
                transa: transb,
                transb: transa,
                m: n,
                n: m,
            },
        }
    }
}

/// `symm` / `hemm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidedProduct {
    pub side: Side,
    pub uplo: Uplo,
    pub m: i64,
    pub n: i64,
}

impl SidedProduct {
    pub fn new(layout: Layout, side: Side, uplo: Uplo, m: i64, n: i64) -> Self {
        match layout {
            Layout::ColMajor => Self { side, uplo, m, n },
            Layout::RowMajor => Self {
                side: side.flip(),
                uplo: uplo.flip(),
                m: n,
                n: m,
            },
        }
    }
}

/// `syrk` / `herk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankK {
    pub uplo: Uplo,
    pub trans: Transpose,
}

impl RankK {
    /// `hermitian` selects `herk`, whose transposed mode is `ConjTrans`.
    ///
    /// Callers have already rejected the mode that is illegal for complex
    /// scalars, so the remaining transposed mode is canonicalized here.
    pub fn new(layout: Layout, uplo: Uplo, trans: Transpose, hermitian: bool) -> Self {
        let transposed = if hermitian {
            Transpose::ConjTrans
        } else {
            Transpose::Trans
        };
        match layout {
            Layout::ColMajor => Self {
                uplo,
                trans: if trans.is_trans() {
                    transposed
                } else {
                    Transpose::NoTrans
                },
            },
            Layout::RowMajor => Self {
                uplo: uplo.flip(),
                trans: if trans.is_trans() {
                    Transpose::NoTrans
                } else {
                    transposed
                },
            },
        }
    }
}

/// `trmm` / `trsm`: `Bᵀ = Bᵀ op(A)ᵀ`, and the stored `Aᵀ` under the same
/// transpose mode yields `op(A)ᵀ`, so the mode is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangularProduct {
    pub side: Side,
    pub uplo: Uplo,
    pub trans: Transpose,
    pub m: i64,
    pub n: i64,
}

impl TriangularProduct {
    pub fn new(layout: Layout, side: Side, uplo: Uplo, trans: Transpose, m: i64, n: i64) -> Self {
        match layout {
            Layout::ColMajor => Self {
                side,
                uplo,
                trans,
                m,
                n,
            },
            Layout::RowMajor => Self {
                side: side.flip(),
                uplo: uplo.flip(),
                trans,
                m: n,
                n: m,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_major_passes_through() {
        let plan = TriangularVector::new(Layout::ColMajor, Uplo::Upper, Transpose::ConjTrans);
        assert_eq!(
            plan,
            TriangularVector {
                uplo: Uplo::Upper,
                trans: Transpose::ConjTrans,
                conj: false
            }
        );
        let plan = TriangularProduct::new(
            Layout::ColMajor,
            Side::Right,
            Uplo::Lower,
            Transpose::Trans,
            3,
            5,
        );
        assert_eq!((plan.side, plan.uplo, plan.m, plan.n), (Side::Right, Uplo::Lower, 3, 5));
    }

    #[test]
    fn test_row_major_triangular_vector() {
        let cases = [
            (Transpose::NoTrans, Transpose::Trans, false),
            (Transpose::Trans, Transpose::NoTrans, false),
            (Transpose::ConjTrans, Transpose::NoTrans, true),
        ];
        for (trans, expected, conj) in cases {
            let plan = TriangularVector::new(Layout::RowMajor, Uplo::Upper, trans);
            assert_eq!(plan.uplo, Uplo::Lower);
            assert_eq!(plan.trans, expected);
            assert_eq!(plan.conj, conj);
        }
    }

    #[test]
    fn test_row_major_gemv_swaps_dims() {
        let plan = GeneralVector::new(Layout::RowMajor, Transpose::NoTrans, 2, 7);
        assert_eq!((plan.trans, plan.m, plan.n, plan.conj), (Transpose::Trans, 7, 2, false));
    }

    #[test]
    fn test_row_major_ger_moves_conjugation() {
        let plan = Rank1Update::new(Layout::RowMajor, 4, 3, true);
        assert!(plan.swap_operands);
        assert_eq!((plan.m, plan.n), (3, 4));
        assert!(plan.conj_x && !plan.conj_y);

        let plan = Rank1Update::new(Layout::RowMajor, 4, 3, false);
        assert!(!plan.conj_x && !plan.conj_y);

        let plan = Rank1Update::new(Layout::ColMajor, 4, 3, true);
        assert!(!plan.swap_operands && plan.conj_y);
    }

    #[test]
    fn test_hermitian_flags() {
        assert!(HermitianVector::new(Layout::RowMajor, Uplo::Lower, true).conj);
        assert!(!HermitianVector::new(Layout::RowMajor, Uplo::Lower, false).conj);
        let plan = SymmetricRank1::new(Layout::RowMajor, Uplo::Lower, true);
        assert_eq!(plan.uplo, Uplo::Upper);
        assert!(plan.conj_x);
    }

    #[test]
    fn test_row_major_gemm_swaps_operands() {
        let plan = GeneralProduct::new(Layout::RowMajor, Transpose::Trans, Transpose::ConjTrans, 2, 5);
        assert!(plan.swap_operands);
        assert_eq!(plan.transa, Transpose::ConjTrans);
        assert_eq!(plan.transb, Transpose::Trans);
        assert_eq!((plan.m, plan.n), (5, 2));
    }

    #[test]
    fn test_row_major_sided_product() {
        let plan = SidedProduct::new(Layout::RowMajor, Side::Left, Uplo::Upper, 2, 5);
        assert_eq!(plan.side, Side::Right);
        assert_eq!(plan.uplo, Uplo::Lower);
        assert_eq!((plan.m, plan.n), (5, 2));
    }

    #[test]
    fn test_rank_k_modes() {
        let syrk = |layout, trans| RankK::new(layout, Uplo::Upper, trans, false).trans;
        let herk = |layout, trans| RankK::new(layout, Uplo::Upper, trans, true).trans;

        assert_eq!(syrk(Layout::ColMajor, Transpose::ConjTrans), Transpose::Trans);
        assert_eq!(herk(Layout::ColMajor, Transpose::Trans), Transpose::ConjTrans);
        assert_eq!(syrk(Layout::RowMajor, Transpose::NoTrans), Transpose::Trans);
        assert_eq!(syrk(Layout::RowMajor, Transpose::Trans), Transpose::NoTrans);
        assert_eq!(herk(Layout::RowMajor, Transpose::NoTrans), Transpose::ConjTrans);
        assert_eq!(herk(Layout::RowMajor, Transpose::ConjTrans), Transpose::NoTrans);
        assert_eq!(RankK::new(Layout::RowMajor, Uplo::Upper, Transpose::NoTrans, true).uplo, Uplo::Lower);
    }

    #[test]
    fn test_row_major_trmm_keeps_mode() {
        let plan = TriangularProduct::new(
            Layout::RowMajor,
            Side::Left,
            Uplo::Lower,
            Transpose::ConjTrans,
            3,
            4,
        );
        assert_eq!(plan.side, Side::Right);
        assert_eq!(plan.uplo, Uplo::Upper);
        assert_eq!(plan.trans, Transpose::ConjTrans);
        assert_eq!((plan.m, plan.n), (4, 3));
    }
}
