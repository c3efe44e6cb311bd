//! Accelerator entry points.
//!
//! Calls are validated and normalized exactly like their host counterparts,
//! then report [`Error::NotImplemented`]: no device kernels are linked. A
//! device backend replaces `unavailable` and nothing above it.
//!
//! Batched calls follow the host batch rules (see [`crate::batch`]) and are
//! additionally bounded by the queue's batch limit. With a status array,
//! entries that pass validation are marked `NotImplemented` and entries that
//! fail keep their own status.

use std::fmt::Debug;

use strider_core::normalize::{GeneralProduct, RankK, TriangularProduct};
use strider_core::validate;
use strider_core::{Diag, Error, Layout, Result, Scalar, Side, Status, Transpose, Uplo};

use crate::batch::{check_shape, entry, pick, record};

/// Largest batch a queue accepts unless configured otherwise.
pub const DEFAULT_BATCH_LIMIT: usize = 65_535;

/// Execution context on one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue {
    device: i32,
    batch_limit: usize,
}

impl Queue {
    pub fn new(device: i32) -> Self {
        log::info!("created queue on device {}", device);
        Self {
            device,
            batch_limit: DEFAULT_BATCH_LIMIT,
        }
    }

    pub fn with_batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = limit;
        self
    }

    #[inline]
    pub fn device(&self) -> i32 {
        self.device
    }

    #[inline]
    pub fn batch_limit(&self) -> usize {
        self.batch_limit
    }

    fn admit(&self, batch: usize) -> Result<()> {
        if batch > self.batch_limit {
            return Err(Error::invalid(
                "batch",
                format!(
                    "{batch} entries exceed the queue limit {}",
                    self.batch_limit
                ),
            ));
        }
        Ok(())
    }
}

/// Non-owning handle to `len` elements of device memory.
///
/// The handle is never dereferenced on the host; only its length takes part
/// in validation.
#[derive(Debug)]
pub struct DevicePtr<T> {
    ptr: *mut T,
    len: usize,
}

impl<T> DevicePtr<T> {
    /// # Safety
    ///
    /// `ptr` must address at least `len` elements of device memory that stay
    /// allocated, and are not written by anything else, while the handle is
    /// passed to device calls.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        Self { ptr, len }
    }

    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Numeric dispatch point for a validated, normalized device call.
fn unavailable<T: Scalar>(queue: &Queue, op: &str, plan: &impl Debug) -> Error {
    log::debug!("device {} {}{}: {:?}", queue.device, T::PREFIX, op, plan);
    Error::not_implemented(format!(
        "{}{} on device {}",
        T::PREFIX,
        op,
        queue.device
    ))
}

/// Records per-entry outcomes, then fails the call as a whole.
fn finish_batch<T: Scalar>(queue: &Queue, op: &str, results: Vec<Result<()>>, info: &mut [Status]) -> Result<()> {
    let invalid = results
        .iter()
        .filter(|r| matches!(r, Err(Error::InvalidArgument { .. })))
        .count();
    log::warn!(
        "device {}: batched {}{} not executed ({} of {} entries invalid)",
        queue.device,
        T::PREFIX,
        op,
        invalid,
        results.len()
    );
    record(&results, info)?;
    Err(Error::not_implemented(format!(
        "batched {}{} on device {}",
        T::PREFIX,
        op,
        queue.device
    )))
}

fn fail(err: Error) -> Result<()> {
    log::warn!("{}", err);
    Err(err)
}

// ============================================================================
// Single operations
// ============================================================================

pub fn gemm<T: Scalar>(
    queue: &Queue,
    layout: Layout,
    transa: Transpose,
    transb: Transpose,
    m: i64,
    n: i64,
    k: i64,
    alpha: T,
    a: &DevicePtr<T>,
    lda: i64,
    b: &DevicePtr<T>,
    ldb: i64,
    beta: T,
    c: &mut DevicePtr<T>,
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
    let plan = GeneralProduct::new(layout, transa, transb, m, n);
    log::debug!("gemm scalars alpha={:?} beta={:?}", alpha, beta);
    fail(unavailable::<T>(queue, "gemm", &plan))
}

pub fn syrk<T: Scalar>(
    queue: &Queue,
    layout: Layout,
    uplo: Uplo,
    trans: Transpose,
    n: i64,
    k: i64,
    alpha: T,
    a: &DevicePtr<T>,
    lda: i64,
    beta: T,
    c: &mut DevicePtr<T>,
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
    let plan = RankK::new(layout, uplo, trans, false);
    log::debug!("syrk scalars alpha={:?} beta={:?}", alpha, beta);
    fail(unavailable::<T>(queue, "syrk", &plan))
}

pub fn herk<T: Scalar>(
    queue: &Queue,
    layout: Layout,
    uplo: Uplo,
    trans: Transpose,
    n: i64,
    k: i64,
    alpha: T::Real,
    a: &DevicePtr<T>,
    lda: i64,
    beta: T::Real,
    c: &mut DevicePtr<T>,
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
    let plan = RankK::new(layout, uplo, trans, true);
    log::debug!("herk scalars alpha={:?} beta={:?}", alpha, beta);
    fail(unavailable::<T>(queue, "herk", &plan))
}

pub fn trsm<T: Scalar>(
    queue: &Queue,
    layout: Layout,
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    m: i64,
    n: i64,
    alpha: T,
    a: &DevicePtr<T>,
    lda: i64,
    b: &mut DevicePtr<T>,
    ldb: i64,
) -> Result<()> {
    validate::trmm(layout, side, uplo, m, n, a.len(), lda, b.len(), ldb)?;
    let plan = TriangularProduct::new(layout, side, uplo, trans, m, n);
    log::debug!("trsm diag={:?} alpha={:?}", diag, alpha);
    fail(unavailable::<T>(queue, "trsm", &plan))
}

// ============================================================================
// Batched operations
// ============================================================================

pub fn gemm_batched<T: Scalar>(
    queue: &Queue,
    layout: Layout,
    transa: &[Transpose],
    transb: &[Transpose],
    m: &[i64],
    n: &[i64],
    k: &[i64],
    alpha: &[T],
    a: &[DevicePtr<T>],
    lda: &[i64],
    b: &[DevicePtr<T>],
    ldb: &[i64],
    beta: &[T],
    c: &mut [DevicePtr<T>],
    ldc: &[i64],
    info: &mut [Status],
) -> Result<()> {
    let batch = c.len();
    queue.admit(batch)?;
    check_shape(
        batch,
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
    let results = (0..batch)
        .map(|i| -> Result<()> {
            let (transa, transb, m, n) = (pick(transa, i), pick(transb, i), pick(m, i), pick(n, i));
            validate::gemm(
                layout,
                transa,
                transb,
                m,
                n,
                pick(k, i),
                entry(a, i).len(),
                pick(lda, i),
                entry(b, i).len(),
                pick(ldb, i),
                c[i].len(),
                pick(ldc, i),
            )?;
            let plan = GeneralProduct::new(layout, transa, transb, m, n);
            Err(unavailable::<T>(queue, "gemm", &plan))
        })
        .collect();
    finish_batch::<T>(queue, "gemm", results, info)
}

pub fn syrk_batched<T: Scalar>(
    queue: &Queue,
    layout: Layout,
    uplo: &[Uplo],
    trans: &[Transpose],
    n: &[i64],
    k: &[i64],
    alpha: &[T],
    a: &[DevicePtr<T>],
    lda: &[i64],
    beta: &[T],
    c: &mut [DevicePtr<T>],
    ldc: &[i64],
    info: &mut [Status],
) -> Result<()> {
    rank_k_batched(
        queue,
        "syrk",
        layout,
        uplo,
        trans,
        n,
        k,
        (alpha.len(), beta.len()),
        a,
        lda,
        c,
        ldc,
        info,
        false,
    )
}

pub fn herk_batched<T: Scalar>(
    queue: &Queue,
    layout: Layout,
    uplo: &[Uplo],
    trans: &[Transpose],
    n: &[i64],
    k: &[i64],
    alpha: &[T::Real],
    a: &[DevicePtr<T>],
    lda: &[i64],
    beta: &[T::Real],
    c: &mut [DevicePtr<T>],
    ldc: &[i64],
    info: &mut [Status],
) -> Result<()> {
    rank_k_batched(
        queue,
        "herk",
        layout,
        uplo,
        trans,
        n,
        k,
        (alpha.len(), beta.len()),
        a,
        lda,
        c,
        ldc,
        info,
        true,
    )
}

/// Shared body of the rank-k batches; only the scalar sequence lengths are
/// needed since scalars never reach a kernel.
fn rank_k_batched<T: Scalar>(
    queue: &Queue,
    op: &str,
    layout: Layout,
    uplo: &[Uplo],
    trans: &[Transpose],
    n: &[i64],
    k: &[i64],
    scalars: (usize, usize),
    a: &[DevicePtr<T>],
    lda: &[i64],
    c: &mut [DevicePtr<T>],
    ldc: &[i64],
    info: &mut [Status],
    hermitian: bool,
) -> Result<()> {
    let batch = c.len();
    queue.admit(batch)?;
    check_shape(
        batch,
        &[
            ("uplo", uplo.len()),
            ("trans", trans.len()),
            ("n", n.len()),
            ("k", k.len()),
            ("alpha", scalars.0),
            ("A", a.len()),
            ("lda", lda.len()),
            ("beta", scalars.1),
            ("ldc", ldc.len()),
        ],
        info.len(),
    )?;
    let check = if hermitian {
        validate::herk
    } else {
        validate::syrk
    };
    let results = (0..batch)
        .map(|i| -> Result<()> {
            let (uplo, trans) = (pick(uplo, i), pick(trans, i));
            check(
                layout,
                uplo,
                trans,
                pick(n, i),
                pick(k, i),
                entry(a, i).len(),
                pick(lda, i),
                c[i].len(),
                pick(ldc, i),
                T::IS_COMPLEX,
            )?;
            let plan = RankK::new(layout, uplo, trans, hermitian);
            Err(unavailable::<T>(queue, op, &plan))
        })
        .collect();
    finish_batch::<T>(queue, op, results, info)
}

pub fn trsm_batched<T: Scalar>(
    queue: &Queue,
    layout: Layout,
    side: &[Side],
    uplo: &[Uplo],
    trans: &[Transpose],
    diag: &[Diag],
    m: &[i64],
    n: &[i64],
    alpha: &[T],
    a: &[DevicePtr<T>],
    lda: &[i64],
    b: &mut [DevicePtr<T>],
    ldb: &[i64],
    info: &mut [Status],
) -> Result<()> {
    let batch = b.len();
    queue.admit(batch)?;
    check_shape(
        batch,
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
    let results = (0..batch)
        .map(|i| -> Result<()> {
            let (side, uplo, trans, m, n) = (pick(side, i), pick(uplo, i), pick(trans, i), pick(m, i), pick(n, i));
            validate::trmm(
                layout,
                side,
                uplo,
                m,
                n,
                entry(a, i).len(),
                pick(lda, i),
                b[i].len(),
                pick(ldb, i),
            )?;
            let plan = TriangularProduct::new(layout, side, uplo, trans, m, n);
            Err(unavailable::<T>(queue, "trsm", &plan))
        })
        .collect();
    finish_batch::<T>(queue, "trsm", results, info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    fn handle<T>(buf: &mut [T]) -> DevicePtr<T> {
        unsafe { DevicePtr::from_raw_parts(buf.as_mut_ptr(), buf.len()) }
    }

    #[test]
    fn test_valid_calls_are_not_implemented() {
        let queue = Queue::new(0);
        let mut host = [0.0f64; 16];
        let a = handle(&mut host);
        let b = handle(&mut host);
        let mut c = handle(&mut host);
        let err = gemm(
            &queue, Layout::RowMajor, Transpose::NoTrans, Transpose::Trans, 4, 4, 4, 1.0, &a, 4, &b, 4, 0.0, &mut c, 4,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotImplemented { .. }));
        assert!(err.to_string().contains("dgemm"));

        let err = trsm(
            &queue, Layout::ColMajor, Side::Right, Uplo::Lower, Transpose::NoTrans, Diag::Unit, 4, 4, 1.0, &a, 4,
            &mut c, 4,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotImplemented { .. }));
    }

    #[test]
    fn test_validation_precedes_dispatch() {
        let queue = Queue::new(1);
        let mut host = [Complex::new(0.0f32, 0.0); 4];
        let a = handle(&mut host);
        let mut c = handle(&mut host);
        let err = herk(&queue, Layout::ColMajor, Uplo::Upper, Transpose::NoTrans, 2, 2, 1.0, &a, 1, 0.0, &mut c, 2)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "lda", .. }));

        // complex syrk with ConjTrans is rejected by validation itself
        let one = Complex::new(1.0f32, 0.0);
        let err = syrk(&queue, Layout::ColMajor, Uplo::Upper, Transpose::ConjTrans, 2, 2, one, &a, 2, one, &mut c, 2)
            .unwrap_err();
        assert!(err.to_string().contains("herk"));

        let err = gemm(
            &queue, Layout::ColMajor, Transpose::NoTrans, Transpose::NoTrans, 3, 3, 3, one, &a, 3, &a, 3, one, &mut c, 3,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "A", .. }));
    }

    #[test]
    fn test_batched_statuses() {
        let queue = Queue::new(0);
        let mut host = [0.0f64; 4];
        let a = [handle(&mut host)];
        let mut c = [handle(&mut host), handle(&mut host)];
        let mut info = [Status::Success; 2];
        let err = syrk_batched(
            &queue,
            Layout::RowMajor,
            &[Uplo::Upper, Uplo::General],
            &[Transpose::NoTrans],
            &[2],
            &[2],
            &[1.0],
            &a,
            &[2],
            &[0.0],
            &mut c,
            &[2],
            &mut info,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotImplemented { .. }));
        assert_eq!(info, [Status::NotImplemented, Status::InvalidArgument { arg: "uplo" }]);

        let err = herk_batched::<f64>(
            &queue,
            Layout::RowMajor,
            &[Uplo::Upper],
            &[Transpose::NoTrans],
            &[2],
            &[2],
            &[1.0],
            &a,
            &[1, 2],
            &[0.0],
            &mut c,
            &[2],
            &mut [],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "lda", .. }));
    }

    #[test]
    fn test_batch_limit() {
        let queue = Queue::new(0).with_batch_limit(1);
        assert_eq!(queue.batch_limit(), 1);
        let mut host = [0.0f32; 4];
        let a = [handle(&mut host)];
        let mut b = [handle(&mut host), handle(&mut host)];
        let err = trsm_batched(
            &queue,
            Layout::ColMajor,
            &[Side::Left],
            &[Uplo::Upper],
            &[Transpose::NoTrans],
            &[Diag::NonUnit],
            &[2],
            &[2],
            &[1.0],
            &a,
            &[2],
            &mut b,
            &[2],
            &mut [],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "batch", .. }));

        let mut info = [Status::Success];
        let err = gemm_batched(
            &queue,
            Layout::ColMajor,
            &[Transpose::NoTrans],
            &[Transpose::NoTrans],
            &[2],
            &[2],
            &[2],
            &[1.0f32],
            &a,
            &[2],
            &a,
            &[2],
            &[0.0],
            &mut b[..1],
            &[2],
            &mut info,
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotImplemented { .. }));
        assert_eq!(info, [Status::NotImplemented]);
    }
}
