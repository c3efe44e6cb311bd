//! BLAS operand-role enumerations.
//!
//! Row-major and column-major layouts are both accepted at every entry point.
//! Each enum converts to and from the single-character codes used by the
//! Fortran BLAS interface (`'N'`, `'T'`, `'C'`, `'U'`, `'L'`, ...).

use std::fmt;

use crate::error::{Error, Result};

/// Memory layout for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Column-major (Fortran-style): elements in a column are contiguous.
    #[default]
    ColMajor,
    /// Row-major (C-style): elements in a row are contiguous.
    RowMajor,
}

/// Transpose operation applied to a matrix operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transpose {
    /// No transpose.
    #[default]
    NoTrans,
    /// Transpose.
    Trans,
    /// Conjugate transpose (same as `Trans` for real types).
    ConjTrans,
}

/// Which triangle of a matrix is referenced.
///
/// `General` names the full matrix. It exists for utilities that operate on
/// whole matrices; every triangular, symmetric and Hermitian routine rejects
/// it during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Uplo {
    #[default]
    Upper,
    Lower,
    General,
}

/// Side a structured matrix is applied from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Left,
    Right,
}

/// Whether a triangular matrix has an implicit unit diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Diag {
    #[default]
    NonUnit,
    Unit,
}

impl Layout {
    /// Leading dimension stride for a tightly packed `rows x cols` matrix.
    #[inline(always)]
    pub fn leading_dim(self, rows: usize, cols: usize) -> usize {
        match self {
            Layout::RowMajor => cols,
            Layout::ColMajor => rows,
        }
    }

    /// Linear index into a flat array for element (i, j).
    #[inline(always)]
    pub fn index(self, i: usize, j: usize, ld: usize) -> usize {
        match self {
            Layout::RowMajor => i * ld + j,
            Layout::ColMajor => j * ld + i,
        }
    }

    /// Storage extents `(inner, outer)` of a `rows x cols` matrix: inner is
    /// the contiguous direction, outer is the count of leading-dimension steps.
    #[inline]
    pub fn extents(self, rows: i64, cols: i64) -> (i64, i64) {
        match self {
            Layout::RowMajor => (cols, rows),
            Layout::ColMajor => (rows, cols),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Layout::ColMajor => 'C',
            Layout::RowMajor => 'R',
        }
    }
}

impl Transpose {
    pub fn as_char(self) -> char {
        match self {
            Transpose::NoTrans => 'N',
            Transpose::Trans => 'T',
            Transpose::ConjTrans => 'C',
        }
    }

    #[inline]
    pub fn is_trans(self) -> bool {
        self != Transpose::NoTrans
    }
}

impl Uplo {
    /// Opposite triangle; `General` is its own mirror.
    #[inline]
    pub fn flip(self) -> Uplo {
        match self {
            Uplo::Upper => Uplo::Lower,
            Uplo::Lower => Uplo::Upper,
            Uplo::General => Uplo::General,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Uplo::Upper => 'U',
            Uplo::Lower => 'L',
            Uplo::General => 'G',
        }
    }
}

impl Side {
    #[inline]
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Side::Left => 'L',
            Side::Right => 'R',
        }
    }
}

impl Diag {
    pub fn as_char(self) -> char {
        match self {
            Diag::NonUnit => 'N',
            Diag::Unit => 'U',
        }
    }
}

fn bad_code(arg: &'static str, code: char, allowed: &str) -> Error {
    Error::InvalidArgument {
        arg,
        reason: format!("unknown code {code:?}, expected one of {allowed}"),
    }
}

impl TryFrom<char> for Layout {
    type Error = Error;

    fn try_from(code: char) -> Result<Self> {
        match code.to_ascii_uppercase() {
            'C' => Ok(Layout::ColMajor),
            'R' => Ok(Layout::RowMajor),
            _ => Err(bad_code("layout", code, "C, R")),
        }
    }
}

impl TryFrom<char> for Transpose {
    type Error = Error;

    fn try_from(code: char) -> Result<Self> {
        match code.to_ascii_uppercase() {
            'N' => Ok(Transpose::NoTrans),
            'T' => Ok(Transpose::Trans),
            'C' => Ok(Transpose::ConjTrans),
            _ => Err(bad_code("trans", code, "N, T, C")),
        }
    }
}

impl TryFrom<char> for Uplo {
    type Error = Error;

    fn try_from(code: char) -> Result<Self> {
        match code.to_ascii_uppercase() {
            'U' => Ok(Uplo::Upper),
            'L' => Ok(Uplo::Lower),
            'G' => Ok(Uplo::General),
            _ => Err(bad_code("uplo", code, "U, L, G")),
        }
    }
}

impl TryFrom<char> for Side {
    type Error = Error;

    fn try_from(code: char) -> Result<Self> {
        match code.to_ascii_uppercase() {
            'L' => Ok(Side::Left),
            'R' => Ok(Side::Right),
            _ => Err(bad_code("side", code, "L, R")),
        }
    }
}

impl TryFrom<char> for Diag {
    type Error = Error;

    fn try_from(code: char) -> Result<Self> {
        match code.to_ascii_uppercase() {
            'N' => Ok(Diag::NonUnit),
            'U' => Ok(Diag::Unit),
            _ => Err(bad_code("diag", code, "N, U")),
        }
    }
}

macro_rules! display_as_char {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.as_char())
                }
            }
        )*
    };
}

display_as_char!(Layout, Transpose, Uplo, Side, Diag);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_layout() {
        // 2x3 matrix, element (1, 2)
        assert_eq!(Layout::RowMajor.index(1, 2, 3), 5);
        assert_eq!(Layout::ColMajor.index(1, 2, 2), 5);
        assert_eq!(Layout::RowMajor.leading_dim(2, 3), 3);
        assert_eq!(Layout::ColMajor.leading_dim(2, 3), 2);
    }

    #[test]
    fn test_extents() {
        assert_eq!(Layout::ColMajor.extents(4, 7), (4, 7));
        assert_eq!(Layout::RowMajor.extents(4, 7), (7, 4));
    }

    #[test]
    fn test_char_codes_round_trip() {
        for t in [Transpose::NoTrans, Transpose::Trans, Transpose::ConjTrans] {
            assert_eq!(Transpose::try_from(t.as_char()).unwrap(), t);
        }
        for u in [Uplo::Upper, Uplo::Lower, Uplo::General] {
            assert_eq!(Uplo::try_from(u.as_char()).unwrap(), u);
        }
        assert_eq!(Side::try_from('r').unwrap(), Side::Right);
        assert_eq!(Diag::try_from('u').unwrap(), Diag::Unit);
        assert_eq!(Layout::try_from('R').unwrap(), Layout::RowMajor);
    }

    #[test]
    fn test_unknown_code_is_invalid_argument() {
        match Uplo::try_from('X') {
            Err(Error::InvalidArgument { arg, .. }) => assert_eq!(arg, "uplo"),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
        assert!(Transpose::try_from('Q').is_err());
        assert!(Diag::try_from('x').is_err());
    }

    #[test]
    fn test_flips() {
        assert_eq!(Uplo::Upper.flip(), Uplo::Lower);
        assert_eq!(Uplo::Lower.flip(), Uplo::Upper);
        assert_eq!(Uplo::General.flip(), Uplo::General);
        assert_eq!(Side::Left.flip(), Side::Right);
    }
}
