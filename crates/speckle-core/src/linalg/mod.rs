//! Linear algebra on column-major matrices.
//!
//! | Level | Operations | Complexity |
//! |-------|-----------|------------|
//! | L2 | `gemv`, `matvec` | O(n^2) |
//! | L3 | `gemm`, `matmul` | O(n^3) |
//! | Inversion | [`Matrix::invert`], [`Matrix::inverse`] | O(n^3) |
//!
//! Inversion is Gauss–Jordan elimination with partial pivoting built on
//! the matrix row primitives, generic over [`ComplexField`](crate::ComplexField).

pub mod blas;
mod invert;

pub use blas::{gemm, gemv, matmul, matmul_checked, matvec, matvec_checked};

use crate::ComplexField;
use crate::error::Result;
use crate::matrix::Matrix;

/// Inverse of a square matrix as a new matrix.
///
/// Returns [`CoreError::SingularMatrix`](crate::CoreError::SingularMatrix) if
/// the matrix is singular.
///
/// ```
/// # use speckle_core::matrix::Matrix;
/// # use speckle_core::linalg;
/// let a = Matrix::from_row_major(2, 2, &[2.0_f64, 1.0, 1.0, 4.0]).unwrap();
/// let inv = linalg::inv(&a).unwrap();
/// // A * A^-1 ≈ I
/// let eye = linalg::matmul(&a, &inv);
/// assert!((eye.at(0, 0) - 1.0).abs() < 1e-10);
/// assert!(eye.at(1, 0).abs() < 1e-10);
/// ```
pub fn inv<T: ComplexField>(a: &Matrix<T>) -> Result<Matrix<T>> {
    a.inverse()
}
