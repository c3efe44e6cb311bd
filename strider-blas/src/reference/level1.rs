//! Level 1 reference kernels: strided vector-vector operations.

use strider_core::Scalar;

use super::first;

/// y := alpha * x + y
pub fn axpy<T: Scalar>(n: usize, alpha: T, x: &[T], incx: isize, y: &mut [T], incy: isize) {
    if n == 0 || alpha == T::zero() {
        return;
    }
    let mut ix = first(n, incx);
    let mut iy = first(n, incy);
    for _ in 0..n {
        y[iy as usize] += alpha * x[ix as usize];
        ix += incx;
        iy += incy;
    }
}

/// x := alpha * x
pub fn scal<T: Scalar>(n: usize, alpha: T, x: &mut [T], incx: isize) {
    let mut ix = first(n, incx);
    for _ in 0..n {
        x[ix as usize] *= alpha;
        ix += incx;
    }
}

/// Sum of `x[i] * y[i]`, conjugating `x` when `conj_x` is set (`dotc`).
pub fn dot<T: Scalar>(n: usize, x: &[T], incx: isize, y: &[T], incy: isize, conj_x: bool) -> T {
    let mut acc = T::zero();
    let mut ix = first(n, incx);
    let mut iy = first(n, incy);
    for _ in 0..n {
        acc += x[ix as usize].conj_if(conj_x) * y[iy as usize];
        ix += incx;
        iy += incy;
    }
    acc
}

/// 0-based index of the first element maximizing `|re| + |im|`.
///
/// `incx` must be positive. Returns 0 for `n == 0`. A NaN element never
/// compares greater, so it is only selected when it sits at index 0.
pub fn iamax<T: Scalar>(n: usize, x: &[T], incx: isize) -> usize {
    if n == 0 {
        return 0;
    }
    let step = incx as usize;
    let mut best = 0;
    let mut max: T::Real = x[0].abs1();
    for i in 1..n {
        let v = x[i * step].abs1();
        if v > max {
            best = i;
            max = v;
        }
    }
    best
}

/// y := x
pub fn copy<T: Scalar>(n: usize, x: &[T], incx: isize, y: &mut [T], incy: isize) {
    let mut ix = first(n, incx);
    let mut iy = first(n, incy);
    for _ in 0..n {
        y[iy as usize] = x[ix as usize];
        ix += incx;
        iy += incy;
    }
}

/// x <-> y
pub fn swap<T: Scalar>(n: usize, x: &mut [T], incx: isize, y: &mut [T], incy: isize) {
    let mut ix = first(n, incx);
    let mut iy = first(n, incy);
    for _ in 0..n {
        std::mem::swap(&mut x[ix as usize], &mut y[iy as usize]);
        ix += incx;
        iy += incy;
    }
}

/// x := conj(x), in place. No-op for real scalars.
pub fn conj<T: Scalar>(n: usize, x: &mut [T], incx: isize) {
    if !T::IS_COMPLEX {
        return;
    }
    let mut ix = first(n, incx);
    for _ in 0..n {
        let p = ix as usize;
        x[p] = x[p].conj();
        ix += incx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn test_axpy_negative_stride() {
        // x logical order with incx = -1 is reversed storage
        let x = [1.0f64, 2.0, 3.0];
        let mut y = [10.0f64, 20.0, 30.0];
        axpy(3, 2.0, &x, -1, &mut y, 1);
        assert_eq!(y, [16.0, 24.0, 32.0]);
    }

    #[test]
    fn test_scal_strided() {
        let mut x = [1.0f32, 9.0, 2.0, 9.0, 3.0];
        scal(3, 2.0, &mut x, 2);
        assert_eq!(x, [2.0, 9.0, 4.0, 9.0, 6.0]);
    }

    #[test]
    fn test_scal_propagates_nan_with_zero_alpha() {
        let mut x = [f64::NAN, 1.0];
        scal(2, 0.0, &mut x, 1);
        assert!(x[0].is_nan());
        assert_eq!(x[1], 0.0);
    }

    #[test]
    fn test_dot_conj() {
        let x = [Complex::new(1.0f64, 1.0), Complex::new(0.0, 2.0)];
        let y = [Complex::new(1.0f64, 0.0), Complex::new(1.0, 0.0)];
        assert_eq!(dot(2, &x, 1, &y, 1, false), Complex::new(1.0, 3.0));
        assert_eq!(dot(2, &x, 1, &y, 1, true), Complex::new(1.0, -3.0));
    }

    #[test]
    fn test_dot_mixed_strides() {
        let x = [1.0f64, 2.0, 3.0];
        let y = [4.0f64, 0.0, 5.0, 0.0, 6.0];
        // x reversed: 3, 2, 1
        assert_eq!(dot(3, &x, -1, &y, 2, false), 3.0 * 4.0 + 2.0 * 5.0 + 6.0);
    }

    #[test]
    fn test_iamax_first_maximum() {
        let x = [1.0f32, -5.0, 3.0, 5.0];
        assert_eq!(iamax(4, &x, 1), 1);
        assert_eq!(iamax(2, &x, 2), 1);
        assert_eq!(iamax::<f32>(0, &[], 1), 0);
        let z = [Complex::new(3.0f64, 0.0), Complex::new(-2.0, 2.0)];
        assert_eq!(iamax(2, &z, 1), 1);
    }

    #[test]
    fn test_copy_and_swap() {
        let x = [1.0f64, 2.0, 3.0];
        let mut y = [0.0f64; 3];
        copy(3, &x, 1, &mut y, -1);
        assert_eq!(y, [3.0, 2.0, 1.0]);

        let mut a = [1.0f64, 2.0];
        let mut b = [3.0f64, 4.0];
        swap(2, &mut a, 1, &mut b, 1);
        assert_eq!(a, [3.0, 4.0]);
        assert_eq!(b, [1.0, 2.0]);
    }

    #[test]
    fn test_conj_strided() {
        let mut z = [Complex::new(1.0f32, 1.0), Complex::new(2.0, 2.0), Complex::new(3.0, 3.0)];
        conj(2, &mut z, 2);
        assert_eq!(z[0], Complex::new(1.0, -1.0));
        assert_eq!(z[1], Complex::new(2.0, 2.0));
        assert_eq!(z[2], Complex::new(3.0, -3.0));
    }
}
