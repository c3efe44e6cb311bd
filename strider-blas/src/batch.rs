//! Batched BLAS: many independent operations in one call.
//!
//! A batch of N entries is described by parallel sequences, one per
//! parameter. Input sequences hold either one value, broadcast to every
//! entry, or exactly N values. Output sequences always hold N buffers, one
//! per entry, so entries never alias and can run concurrently on the worker
//! pool (see [`strider_core::parallel`]).
//!
//! The `info` status array controls error reporting:
//! - empty: entries that fail validation are skipped and the first failure
//!   in entry order is returned once every entry has finished;
//! - length 1: the slot receives the first failure, or `Success`;
//! - length N: slot `i` receives the status of entry `i`.
//!
//! With a non-empty status array the call itself only fails when the batch
//! is malformed (a sequence of the wrong length). A failing entry never
//! touches its buffers or affects its siblings.
//!
//! # Example
//! ```
//! use strider_blas::{batch, Diag, Layout, Status, Transpose, Uplo};
//!
//! let a = [1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 0.0, 0.0, 1.0];
//! let mut x0 = [1.0, 1.0, 1.0];
//! let mut x1 = [1.0, 1.0, 1.0];
//! let mut info = [Status::Success; 2];
//! batch::trmv(
//!     Layout::RowMajor,
//!     &[Uplo::General, Uplo::Upper],
//!     &[Transpose::NoTrans],
//!     &[Diag::Unit],
//!     &[3],
//!     &[&a[..]],
//!     &[3],
//!     &mut [&mut x0[..], &mut x1[..]],
//!     &[1],
//!     &mut info,
//! )
//! .unwrap();
//! assert_eq!(info[0], Status::InvalidArgument { arg: "uplo" });
//! assert_eq!(info[1], Status::Success);
//! assert_eq!(x0, [1.0, 1.0, 1.0]);
//! assert_eq!(x1, [6.0, 5.0, 1.0]);
//! ```

use strider_core::parallel;
use strider_core::validate;
use strider_core::{Diag, Layout, Result, Side, Status, Transpose, Uplo};

use crate::kernels::Kernels;
use crate::{level2, level3};

/// Element of a broadcast-or-per-entry sequence for entry `i`.
#[inline]
pub(crate) fn entry<V>(seq: &[V], i: usize) -> &V {
    if seq.len() == 1 {
        &seq[0]
    } else {
        &seq[i]
    }
}

#[inline]
pub(crate) fn pick<V: Copy>(seq: &[V], i: usize) -> V {
    *entry(seq, i)
}

/// Checks the batch-wide shape against the number of outputs: every input
/// sequence and the status array.
pub(crate) fn check_shape(batch: usize, inputs: &[(&'static str, usize)], info: usize) -> Result<()> {
    for &(arg, len) in inputs {
        validate::batch_sequence(arg, len, batch)?;
    }
    validate::batch_status(info, batch)
}

/// Runs `entry` for every output and reports through `info`.
fn execute<O, F>(op: &str, outputs: &mut [O], info: &mut [Status], entry: F) -> Result<()>
where
    O: Send,
    F: Fn(usize, &mut O) -> Result<()> + Sync + Send,
{
    log::debug!(
        "batched {}: {} entries, {} status slots",
        op,
        outputs.len(),
        info.len()
    );
    let results = parallel::map_indexed(outputs, entry);
    record(&results, info)
}

pub(crate) fn record(results: &[Result<()>], info: &mut [Status]) -> Result<()> {
    let first_failure = || results.iter().find(|r| r.is_err());
    match info.len() {
        0 => match first_failure() {
            Some(Err(err)) => Err(err.clone()),
            _ => Ok(()),
        },
        1 => {
            info[0] = first_failure().map_or(Status::Success, Status::from);
            Ok(())
        }
        _ => {
            for (slot, result) in info.iter_mut().zip(results) {
                *slot = Status::from(result);
            }
            Ok(())
        }
    }
}

// ============================================================================
// Level 2
// ============================================================================

/// Batched [`level2::trmv`]; `x` holds one vector per entry.
pub fn trmv<T: Kernels>(
    layout: Layout,
    uplo: &[Uplo],
    trans: &[Transpose],
    diag: &[Diag],
    n: &[i64],
    a: &[&[T]],
    lda: &[i64],
    x: &mut [&mut [T]],
    incx: &[i64],
    info: &mut [Status],
) -> Result<()> {
    check_shape(
        x.len(),
        &[
            ("uplo", uplo.len()),
            ("trans", trans.len()),
            ("diag", diag.len()),
            ("n", n.len()),
            ("A", a.len()),
            ("lda", lda.len()),
            ("incx", incx.len()),
        ],
        info.len(),
    )?;
    execute("trmv", x, info, |i, x| {
        level2::trmv(
            layout,
            pick(uplo, i),
            pick(trans, i),
            pick(diag, i),
            pick(n, i),
            pick(a, i),
            pick(lda, i),
            x,
            pick(incx, i),
        )
    })
}

// ============================================================================
// Level 3
// ============================================================================

/// Batched [`level3::gemm`]; `c` holds one output matrix per entry.
pub fn gemm<T: Kernels>(
    layout: Layout,
    transa: &[Transpose],
    transb: &[Transpose],
    m: &[i64],
    n: &[i64],
    k: &[i64],
    alpha: &[T],
    a: &[&[T]],
    lda: &[i64],
    b: &[&[T]],
    ldb: &[i64],
    beta: &[T],
    c: &mut [&mut [T]],
    ldc: &[i64],
    info: &mut [Status],
) -> Result<()> {
    check_shape(
        c.len(),
        &[
            ("transa", transa.len()),
            ("transb", transb.len()),
            ("m", m.len()),
            ("n", n.len()),
            ("k", k.len()),
            ("alpha", alpha.len()),
            ("A", a.len()),
            ("lda", lda.len()),
            ("B", b.len()),
            ("ldb", ldb.len()),
            ("beta", beta.len()),
            ("ldc", ldc.len()),
        ],
        info.len(),
    )?;
    execute("gemm", c, info, |i, c| {
        level3::gemm(
            layout,
            pick(transa, i),
            pick(transb, i),
            pick(m, i),
            pick(n, i),
            pick(k, i),
            pick(alpha, i),
            pick(a, i),
            pick(lda, i),
            pick(b, i),
            pick(ldb, i),
            pick(beta, i),
            c,
            pick(ldc, i),
        )
    })
}

fn sided_product<T: Kernels>(
    op: &str,
    layout: Layout,
    side: &[Side],
    uplo: &[Uplo],
    m: &[i64],
    n: &[i64],
    alpha: &[T],
    a: &[&[T]],
    lda: &[i64],
    b: &[&[T]],
    ldb: &[i64],
    beta: &[T],
    c: &mut [&mut [T]],
    ldc: &[i64],
    info: &mut [Status],
    hermitian: bool,
) -> Result<()> {
    check_shape(
        c.len(),
        &[
            ("side", side.len()),
            ("uplo", uplo.len()),
            ("m", m.len()),
            ("n", n.len()),
            ("alpha", alpha.len()),
            ("A", a.len()),
            ("lda", lda.len()),
            ("B", b.len()),
            ("ldb", ldb.len()),
            ("beta", beta.len()),
            ("ldc", ldc.len()),
        ],
        info.len(),
    )?;
    let single = if hermitian {
        level3::hemm::<T>
    } else {
        level3::symm::<T>
    };
    execute(op, c, info, |i, c| {
        single(
            layout,
            pick(side, i),
            pick(uplo, i),
            pick(m, i),
            pick(n, i),
            pick(alpha, i),
            pick(a, i),
            pick(lda, i),
            pick(b, i),
            pick(ldb, i),
            pick(beta, i),
            c,
            pick(ldc, i),
        )
    })
}

/// Batched [`level3::symm`].
pub fn symm<T: Kernels>(
    layout: Layout,
    side: &[Side],
    uplo: &[Uplo],
    m: &[i64],
    n: &[i64],
    alpha: &[T],
    a: &[&[T]],
    lda: &[i64],
    b: &[&[T]],
    ldb: &[i64],
    beta: &[T],
    c: &mut [&mut [T]],
    ldc: &[i64],
    info: &mut [Status],
) -> Result<()> {
    sided_product(
        "symm", layout, side, uplo, m, n, alpha, a, lda, b, ldb, beta, c, ldc, info, false,
    )
}

/// Batched [`level3::hemm`].
pub fn hemm<T: Kernels>(
    layout: Layout,
    side: &[Side],
    uplo: &[Uplo],
    m: &[i64],
    n: &[i64],
    alpha: &[T],
    a: &[&[T]],
    lda: &[i64],
    b: &[&[T]],
    ldb: &[i64],
    beta: &[T],
    c: &mut [&mut [T]],
    ldc: &[i64],
    info: &mut [Status],
) -> Result<()> {
    sided_product(
        "hemm", layout, side, uplo, m, n, alpha, a, lda, b, ldb, beta, c, ldc, info, true,
    )
}

/// Batched [`level3::syrk`].
pub fn syrk<T: Kernels>(
    layout: Layout,
    uplo: &[Uplo],
    trans: &[Transpose],
    n: &[i64],
    k: &[i64],
    alpha: &[T],
    a: &[&[T]],
    lda: &[i64],
    beta: &[T],
    c: &mut [&mut [T]],
    ldc: &[i64],
    info: &mut [Status],
) -> Result<()> {
    check_shape(
        c.len(),
        &[
            ("uplo", uplo.len()),
            ("trans", trans.len()),
            ("n", n.len()),
            ("k", k.len()),
            ("alpha", alpha.len()),
            ("A", a.len()),
            ("lda", lda.len()),
            ("beta", beta.len()),
            ("ldc", ldc.len()),
        ],
        info.len(),
    )?;
    execute("syrk", c, info, |i, c| {
        level3::syrk(
            layout,
            pick(uplo, i),
            pick(trans, i),
            pick(n, i),
            pick(k, i),
            pick(alpha, i),
            pick(a, i),
            pick(lda, i),
            pick(beta, i),
            c,
            pick(ldc, i),
        )
    })
}

/// Batched [`level3::herk`]; `alpha` and `beta` are real.
pub fn herk<T: Kernels>(
    layout: Layout,
    uplo: &[Uplo],
    trans: &[Transpose],
    n: &[i64],
    k: &[i64],
    alpha: &[T::Real],
    a: &[&[T]],
    lda: &[i64],
    beta: &[T::Real],
    c: &mut [&mut [T]],
    ldc: &[i64],
    info: &mut [Status],
) -> Result<()> {
    check_shape(
        c.len(),
        &[
            ("uplo", uplo.len()),
            ("trans", trans.len()),
            ("n", n.len()),
            ("k", k.len()),
            ("alpha", alpha.len()),
            ("A", a.len()),
            ("lda", lda.len()),
            ("beta", beta.len()),
            ("ldc", ldc.len()),
        ],
        info.len(),
    )?;
    execute("herk", c, info, |i, c| {
        level3::herk::<T>(
            layout,
            pick(uplo, i),
            pick(trans, i),
            pick(n, i),
            pick(k, i),
            pick(alpha, i),
            pick(a, i),
            pick(lda, i),
            pick(beta, i),
            c,
            pick(ldc, i),
        )
    })
}

fn triangular_product<T: Kernels>(
    op: &str,
    layout: Layout,
    side: &[Side],
    uplo: &[Uplo],
    trans: &[Transpose],
    diag: &[Diag],
    m: &[i64],
    n: &[i64],
    alpha: &[T],
    a: &[&[T]],
    lda: &[i64],
    b: &mut [&mut [T]],
    ldb: &[i64],
    info: &mut [Status],
    solve: bool,
) -> Result<()> {
    check_shape(
        b.len(),
        &[
            ("side", side.len()),
            ("uplo", uplo.len()),
            ("trans", trans.len()),
            ("diag", diag.len()),
            ("m", m.len()),
            ("n", n.len()),
            ("alpha", alpha.len()),
            ("A", a.len()),
            ("lda", lda.len()),
            ("ldb", ldb.len()),
        ],
        info.len(),
    )?;
    let single = if solve {
        level3::trsm::<T>
    } else {
        level3::trmm::<T>
    };
    execute(op, b, info, |i, b| {
        single(
            layout,
            pick(side, i),
            pick(uplo, i),
            pick(trans, i),
            pick(diag, i),
            pick(m, i),
            pick(n, i),
            pick(alpha, i),
            pick(a, i),
            pick(lda, i),
            b,
            pick(ldb, i),
        )
    })
}

/// Batched [`level3::trmm`]; `b` holds one matrix per entry.
pub fn trmm<T: Kernels>(
    layout: Layout,
    side: &[Side],
    uplo: &[Uplo],
    trans: &[Transpose],
    diag: &[Diag],
    m: &[i64],
    n: &[i64],
    alpha: &[T],
    a: &[&[T]],
    lda: &[i64],
    b: &mut [&mut [T]],
    ldb: &[i64],
    info: &mut [Status],
) -> Result<()> {
    triangular_product(
        "trmm", layout, side, uplo, trans, diag, m, n, alpha, a, lda, b, ldb, info, false,
    )
}

/// Batched [`level3::trsm`].
pub fn trsm<T: Kernels>(
    layout: Layout,
    side: &[Side],
    uplo: &[Uplo],
    trans: &[Transpose],
    diag: &[Diag],
    m: &[i64],
    n: &[i64],
    alpha: &[T],
    a: &[&[T]],
    lda: &[i64],
    b: &mut [&mut [T]],
    ldb: &[i64],
    info: &mut [Status],
) -> Result<()> {
    triangular_product(
        "trsm", layout, side, uplo, trans, diag, m, n, alpha, a, lda, b, ldb, info, true,
    )
}
