//! Gauss–Jordan inversion with partial pivoting.
//!
//! Works on a scratch copy alongside an identity matrix, using only the
//! row primitives (`swap_rows`, `scale_row`, `row_add_row`), so the same
//! code inverts real and complex matrices.

use tracing::warn;

use crate::error::{CoreError, Result};
use crate::matrix::Matrix;
use crate::{ComplexField, Scalar};

impl<T: ComplexField> Matrix<T> {
    /// Replace `self` by its inverse.
    ///
    /// Fails with [`CoreError::InvalidArgument`] for a non-square matrix and
    /// [`CoreError::SingularMatrix`] when the best available pivot is below
    /// `n * epsilon * max|a_ij|`. On failure `self` is unchanged.
    ///
    /// ```
    /// # use speckle_core::matrix::Matrix;
    /// let mut a = Matrix::from_row_major(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]).unwrap();
    /// a.invert().unwrap();
    /// assert!((a.at(0, 0) - 0.6).abs() < 1e-12);
    /// assert!((a.at(0, 1) + 0.7).abs() < 1e-12);
    /// ```
    pub fn invert(&mut self) -> Result<()> {
        if !self.is_square() {
            return Err(CoreError::InvalidArgument {
                reason: "invert: matrix must be square",
            });
        }
        let n = self.rows();
        let mut work = self.clone();
        let mut inv = Matrix::identity(n, n);

        let largest = self
            .max_modulus()
            .map_or(<T::Real as num_traits::Zero>::zero(), |(m, _)| m);
        let tol = <T::Real as Scalar>::from_usize(n) * <T::Real as num_traits::Float>::epsilon() * largest;

        for col in 0..n {
            let mut pivot_row = col;
            let mut best = work.at(col, col).modulus();
            for r in col + 1..n {
                let m = work.at(r, col).modulus();
                if m > best {
                    best = m;
                    pivot_row = r;
                }
            }
            if num_traits::Float::is_nan(best) || best <= tol {
                warn!(column = col, pivot = %best, tolerance = %tol, "invert: singular matrix");
                return Err(CoreError::SingularMatrix);
            }

            work.swap_rows(col, pivot_row);
            inv.swap_rows(col, pivot_row);

            let recip = T::one() / work.at(col, col);
            work.scale_row(col, recip);
            inv.scale_row(col, recip);

            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = work.at(r, col);
                if factor != T::zero() {
                    work.row_add_row(col, r, -factor);
                    inv.row_add_row(col, r, -factor);
                }
            }
        }

        *self = inv;
        Ok(())
    }

    /// Checked inverse as a new matrix; `self` is left untouched.
    pub fn inverse(&self) -> Result<Matrix<T>> {
        let mut out = self.clone();
        out.invert()?;
        Ok(out)
    }
}
