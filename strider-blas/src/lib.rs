// BLAS routines keep the classic argument lists; many parameters are inherent to the API.
// Kernels use index loops over strided buffers where iterators hurt readability.
#![allow(clippy::too_many_arguments, clippy::needless_range_loop)]

//! # Strider BLAS
//!
//! Dense BLAS over `f32`, `f64`, `Complex<f32>` and `Complex<f64>` with one
//! calling convention for row-major and column-major storage.
//!
//! Every entry point validates its arguments on the caller's layout before
//! touching a buffer, rewrites row-major requests as column-major ones, and
//! hands the result to a [`Kernels`] implementation: the generic reference
//! kernels, or a Fortran BLAS with the `native` feature.
//!
//! ## Modules
//!
//! - [`level1`]: `axpy`, `scal`, `dot`, `dotu`, `iamax`, `copy`, `swap`
//! - [`level2`]: `gemv`, `ger`, `geru`, `symv`, `hemv`, `syr`, `her`,
//!   `trmv`, `trsv`
//! - [`level3`]: `gemm`, `symm`, `hemm`, `syrk`, `herk`, `trmm`, `trsm`
//! - [`batch`]: many independent level 2/3 calls with per-entry [`Status`]
//! - [`device`]: accelerator entry points (validation only)
//!
//! ## Example
//!
//! ```
//! use strider_blas::{level2, Diag, Layout, Transpose, Uplo};
//!
//! // Upper unit-diagonal [[1, 2, 3], [_, 1, 4], [_, _, 1]], row-major.
//! let a = [1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 0.0, 0.0, 1.0];
//! let mut x = [1.0, 1.0, 1.0];
//! level2::trmv(Layout::RowMajor, Uplo::Upper, Transpose::NoTrans, Diag::Unit,
//!              3, &a, 3, &mut x, 1).unwrap();
//! assert_eq!(x, [6.0, 5.0, 1.0]);
//! ```

pub mod batch;
pub mod device;
pub mod kernels;
pub mod level1;
pub mod level2;
pub mod level3;
pub mod reference;

#[cfg(feature = "native")]
mod native;

#[cfg(test)]
mod testing;

pub use kernels::Kernels;
pub use strider_core::layout::{Diag, Layout, Side, Transpose, Uplo};
pub use strider_core::{Error, Result, Status};
