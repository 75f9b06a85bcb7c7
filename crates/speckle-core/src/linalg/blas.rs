//! Matrix-vector and matrix-matrix products on column-major [`Matrix`].
//!
//! `gemv` / `gemm` are the validating BLAS-style kernels. `matvec` /
//! `matmul` allocate the result and run the same loops without the `Result`
//! plumbing, panicking on nonconforming shapes; their `*_checked` siblings
//! return [`CoreError::DimensionMismatch`].

use crate::Scalar;
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;
use crate::vector::Vector;

// ======================================================================
// BLAS Level 2: matrix-vector operations, O(n^2)
// ======================================================================

/// General matrix-vector multiply: `y = alpha * A * x + beta * y`.
///
/// - `a` has shape `(m, n)`.
/// - `x` has length `n`, `y` has length `m`.
///
/// If `beta` is zero, `y` is overwritten (not read).
///
/// ```
/// # use speckle_core::matrix::Matrix;
/// # use speckle_core::vector::Vector;
/// # use speckle_core::linalg::gemv;
/// // A = [[1, 2], [3, 4]], x = [5, 6]
/// let a = Matrix::from_row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
/// let x = Vector::from_vec(vec![5.0, 6.0]);
/// let mut y = Vector::<f64>::zeros(2);
/// gemv(1.0, &a, &x, 0.0, &mut y).unwrap();
/// assert_eq!(y.as_slice(), &[17.0, 39.0]);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn gemv<T: Scalar>(alpha: T, a: &Matrix<T>, x: &Vector<T>, beta: T, y: &mut Vector<T>) -> Result<()> {
    let (m, n) = a.shape();
    if x.size() != n {
        return Err(CoreError::DimensionMismatch {
            expected: vec![n],
            got: vec![x.size()],
        });
    }
    if y.size() != m {
        return Err(CoreError::DimensionMismatch {
            expected: vec![m],
            got: vec![y.size()],
        });
    }

    gemv_kernel(alpha, a, x.as_slice(), beta, y.as_mut_slice());
    Ok(())
}

/// `y = alpha * A * x + beta * y` with conforming shapes already established.
#[allow(clippy::many_single_char_names)]
fn gemv_kernel<T: Scalar>(alpha: T, a: &Matrix<T>, x: &[T], beta: T, y: &mut [T]) {
    let m = a.rows();
    let a_data = a.as_slice();

    if beta == T::zero() {
        y.fill(T::zero());
    } else {
        for yi in y.iter_mut() {
            *yi *= beta;
        }
    }

    // Column sweep: A's columns are contiguous.
    for (j, &xj) in x.iter().enumerate() {
        let scaled = alpha * xj;
        let col = &a_data[j * m..(j + 1) * m];
        for (yi, &aij) in y.iter_mut().zip(col) {
            *yi += aij * scaled;
        }
    }
}

// ======================================================================
// BLAS Level 3: matrix-matrix operations, O(n^3)
// ======================================================================

/// General matrix-matrix multiply: `C = alpha * A * B + beta * C`.
///
/// - `a` has shape `(m, k)`, `b` has shape `(k, n)`, `c` has shape `(m, n)`.
///
/// If `beta` is zero, `c` is overwritten (not read).
///
/// ```
/// # use speckle_core::matrix::Matrix;
/// # use speckle_core::linalg::gemm;
/// let a = Matrix::from_row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
/// let b = Matrix::from_row_major(2, 2, &[5.0, 6.0, 7.0, 8.0]).unwrap();
/// let mut c = Matrix::<f64>::zeros(2, 2);
/// gemm(1.0, &a, &b, 0.0, &mut c).unwrap();
/// assert_eq!(c, Matrix::from_row_major(2, 2, &[19.0, 22.0, 43.0, 50.0]).unwrap());
/// ```
#[allow(clippy::many_single_char_names)]
pub fn gemm<T: Scalar>(alpha: T, a: &Matrix<T>, b: &Matrix<T>, beta: T, c: &mut Matrix<T>) -> Result<()> {
    let (m, k) = a.shape();
    let n = b.cols();

    if b.rows() != k {
        return Err(CoreError::DimensionMismatch {
            expected: vec![k, n],
            got: vec![b.rows(), b.cols()],
        });
    }
    if c.shape() != (m, n) {
        return Err(CoreError::DimensionMismatch {
            expected: vec![m, n],
            got: vec![c.rows(), c.cols()],
        });
    }

    gemm_kernel(alpha, a, b, beta, c.as_mut_slice());
    Ok(())
}

/// `C = alpha * A * B + beta * C` with conforming shapes already established.
#[allow(clippy::many_single_char_names)]
fn gemm_kernel<T: Scalar>(alpha: T, a: &Matrix<T>, b: &Matrix<T>, beta: T, c: &mut [T]) {
    let (m, k) = a.shape();
    let n = b.cols();
    let a_data = a.as_slice();
    let b_data = b.as_slice();

    // jpi loop order: every inner sweep walks one contiguous column.
    for j in 0..n {
        let c_col = &mut c[j * m..(j + 1) * m];
        if beta == T::zero() {
            c_col.fill(T::zero());
        } else {
            for cij in c_col.iter_mut() {
                *cij *= beta;
            }
        }
        for p in 0..k {
            let scaled = alpha * b_data[j * k + p];
            let a_col = &a_data[p * m..(p + 1) * m];
            for (cij, &aip) in c_col.iter_mut().zip(a_col) {
                *cij += aip * scaled;
            }
        }
    }
}

// ======================================================================
// Allocating products
// ======================================================================

/// `y = m * v`. `v.size()` must equal `m.cols()`.
///
/// Skips the `Result` plumbing of [`gemv`].
///
/// # Panics
///
/// Panics if `v.size() != m.cols()`.
pub fn matvec<T: Scalar>(m: &Matrix<T>, v: &Vector<T>) -> Vector<T> {
    assert_eq!(m.cols(), v.size(), "matvec: shape mismatch");
    let mut y = Vector::zeros(m.rows());
    gemv_kernel(T::one(), m, v.as_slice(), T::zero(), y.as_mut_slice());
    y
}

/// Checked [`matvec`].
pub fn matvec_checked<T: Scalar>(m: &Matrix<T>, v: &Vector<T>) -> Result<Vector<T>> {
    let mut y = Vector::zeros(m.rows());
    gemv(T::one(), m, v, T::zero(), &mut y)?;
    Ok(y)
}

/// `a * b`, an `a.rows() x b.cols()` matrix. `a.cols()` must equal `b.rows()`.
///
/// # Panics
///
/// Panics if `a.cols() != b.rows()`.
pub fn matmul<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Matrix<T> {
    assert_eq!(a.cols(), b.rows(), "matmul: shape mismatch");
    let mut c = Matrix::zeros(a.rows(), b.cols());
    gemm_kernel(T::one(), a, b, T::zero(), c.as_mut_slice());
    c
}

/// Checked [`matmul`].
pub fn matmul_checked<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    let mut c = Matrix::zeros(a.rows(), b.cols());
    gemm(T::one(), a, b, T::zero(), &mut c)?;
    Ok(c)
}

// ======================================================================
// Convenience methods on Matrix
// ======================================================================

impl<T: Scalar> Matrix<T> {
    /// `self * v` as a new vector.
    pub fn matvec(&self, v: &Vector<T>) -> Vector<T> {
        matvec(self, v)
    }

    /// `self * other` as a new matrix.
    pub fn matmul(&self, other: &Matrix<T>) -> Matrix<T> {
        matmul(self, other)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::matrix::CMatrix;
    use approx::assert_relative_eq;
    use num_complex::Complex;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn mat(rows: usize, cols: usize, data: &[f64]) -> Matrix<f64> {
        Matrix::from_row_major(rows, cols, data).unwrap()
    }

    fn random(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix<f64> {
        Matrix::from_fn(rows, cols, |_, _| rng.random_range(-1.0..1.0))
    }

    // ------------------------------------------------------------------
    // Level 2
    // ------------------------------------------------------------------

    #[test]
    fn test_gemv_alpha_beta() {
        let a = mat(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let x = Vector::from_vec(vec![1.0, 2.0]);
        let mut y = Vector::from_vec(vec![10.0, 20.0]);
        gemv(2.0, &a, &x, 1.0, &mut y).unwrap();
        assert_eq!(y.as_slice(), &[12.0, 24.0]);
    }

    #[test]
    fn test_gemv_dimension_mismatch() {
        let a = mat(2, 3, &[1.0; 6]);
        let x = Vector::from_vec(vec![1.0, 2.0]);
        let mut y = Vector::zeros(2);
        assert!(matches!(
            gemv(1.0, &a, &x, 0.0, &mut y),
            Err(CoreError::DimensionMismatch { .. })
        ));
        assert!(matvec_checked(&a, &x).is_err());
    }

    #[test]
    #[should_panic(expected = "matvec: shape mismatch")]
    fn test_matvec_panics_on_mismatch() {
        let a = mat(2, 3, &[1.0; 6]);
        let _ = matvec(&a, &Vector::from_vec(vec![1.0, 2.0]));
    }

    #[test]
    fn test_matvec_rectangular() {
        // [[1, 2, 3], [4, 5, 6]] * [1, 1, 1]
        let a = mat(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let y = a.matvec(&Vector::from_vec(vec![1.0, 1.0, 1.0]));
        assert_eq!(y.as_slice(), &[6.0, 15.0]);
    }

    // ------------------------------------------------------------------
    // Level 3
    // ------------------------------------------------------------------

    #[test]
    fn test_matmul_shape() {
        let a = Matrix::<f64>::zeros(3, 4);
        let b = Matrix::<f64>::zeros(4, 2);
        assert_eq!(matmul(&a, &b).shape(), (3, 2));
        assert!(matches!(
            matmul_checked(&b, &b),
            Err(CoreError::DimensionMismatch { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "matmul: shape mismatch")]
    fn test_matmul_panics_on_mismatch() {
        let a = Matrix::<f64>::from_fn(2, 3, |r, c| (r + c) as f64);
        let b = Matrix::<f64>::from_fn(2, 2, |r, c| (r * c) as f64);
        let _ = a.matmul(&b);
    }

    #[test]
    fn test_matmul_matches_reference_loop() {
        let mut rng = StdRng::seed_from_u64(42);
        for &(m, k, n) in &[(1, 1, 1), (3, 5, 2), (7, 4, 6), (16, 16, 16)] {
            let a = random(&mut rng, m, k);
            let b = random(&mut rng, k, n);
            let c = a.matmul(&b);
            for i in 0..m {
                for j in 0..n {
                    let mut expected = 0.0;
                    for p in 0..k {
                        expected += a.at(i, p) * b.at(p, j);
                    }
                    assert_relative_eq!(c.at(i, j), expected, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_gemm_accumulates_with_beta() {
        let a = mat(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = mat(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let mut c = mat(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        gemm(1.0, &a, &b, 2.0, &mut c).unwrap();
        assert_eq!(c, mat(2, 2, &[3.0, 4.0, 5.0, 6.0]));
    }

    #[test]
    fn test_matmul_complex() {
        let i = Complex::new(0.0, 1.0);
        let a = CMatrix::<f64>::from_vec(1, 1, vec![i]).unwrap();
        let c = a.matmul(&a);
        assert_eq!(c.at(0, 0), Complex::new(-1.0, 0.0));
    }
}
