//! # Strider Core
//!
//! Shared building blocks for the strider BLAS crates.
//!
//! This crate provides:
//! - **Operand roles**: layout, transpose, triangle, side and diagonal enums
//!   with their BLAS character codes.
//! - **Scalar algebra**: one [`Scalar`] trait over `f32`, `f64`,
//!   `Complex<f32>` and `Complex<f64>`.
//! - **Validation**: shape, stride and buffer-length preconditions for every
//!   operation, checked on the caller's layout before any buffer is touched.
//! - **Normalization**: row-major requests rewritten as column-major ones.
//! - **Batch plumbing**: configuration, per-entry [`Status`] and the rayon
//!   worker pool.

pub mod config;
pub mod error;
pub mod layout;
pub mod normalize;
pub mod parallel;
pub mod rng;
pub mod scalar;
pub mod validate;

pub use config::{BatchConfig, BlasInt, NATIVE_INDEX_MAX};
pub use error::{Error, Result, Status};
pub use layout::{Diag, Layout, Side, Transpose, Uplo};
pub use rng::SplitMix64;
pub use scalar::{RealScalar, Scalar};
