//! Reductions and magnitude/conjugate maps over real and complex matrices.

use crate::ComplexField;
use crate::error::Result;

use super::Matrix;

impl<T: ComplexField> Matrix<T> {
    /// Smallest magnitude and the flat index where it first occurs.
    ///
    /// Returns `None` for an empty matrix.
    ///
    /// ```
    /// # use speckle_core::matrix::Matrix;
    /// let m = Matrix::from_row_major(2, 2, &[4.0, -1.0, 3.0, 1.0]).unwrap();
    /// // column-major storage is [4, 3, -1, 1]; |-1| is first at index 2
    /// assert_eq!(m.min_modulus(), Some((1.0, 2)));
    /// ```
    pub fn min_modulus(&self) -> Option<(T::Real, usize)> {
        self.extremal_modulus(|candidate, best| candidate < best)
    }

    /// Largest magnitude and the flat index where it first occurs.
    ///
    /// Returns `None` for an empty matrix.
    pub fn max_modulus(&self) -> Option<(T::Real, usize)> {
        self.extremal_modulus(|candidate, best| candidate > best)
    }

    fn extremal_modulus<F>(&self, better: F) -> Option<(T::Real, usize)>
    where
        F: Fn(T::Real, T::Real) -> bool,
    {
        let (&first, rest) = self.data.split_first()?;
        let mut best = (first.modulus(), 0);
        for (i, &x) in rest.iter().enumerate() {
            let m = x.modulus();
            if better(m, best.0) {
                best = (m, i + 1);
            }
        }
        Some(best)
    }

    /// Froebius inner product `sum a_i * conj(b_i)`.
    ///
    /// ```
    /// # use speckle_core::matrix::CMatrix;
    /// # use num_complex::Complex;
    /// let a = CMatrix::from_vec(1, 1, vec![Complex::new(0.0_f64, 1.0)]).unwrap();
    /// assert_eq!(a.froebius_prod(&a), Complex::new(1.0, 0.0));
    /// ```
    pub fn froebius_prod(&self, rhs: &Matrix<T>) -> T {
        debug_assert_eq!(self.shape(), rhs.shape(), "froebius_prod: shape mismatch");
        self.data
            .iter()
            .zip(rhs.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b.conj())
    }

    /// Checked [`froebius_prod`](Self::froebius_prod).
    pub fn froebius_prod_checked(&self, rhs: &Matrix<T>) -> Result<T> {
        self.check_same_shape(rhs)?;
        Ok(self.froebius_prod(rhs))
    }

    /// Conjugate every element in place.
    pub fn conj(&mut self) {
        for a in &mut self.data {
            *a = a.conj();
        }
    }

    /// Matrix of element magnitudes.
    pub fn modulus(&self) -> Matrix<T::Real> {
        self.map(|x| x.modulus())
    }

    /// Replace every element by its magnitude (imaginary part zero).
    pub fn to_real_in_place(&mut self) {
        for a in &mut self.data {
            *a = T::from_real(a.modulus());
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::CoreError;
    use crate::matrix::CMatrix;
    use num_complex::Complex;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn test_min_max_first_occurrence() {
        let m = CMatrix::from_vec(4, 1, vec![c(0.0, 2.0), c(5.0, 0.0), c(0.0, -5.0), c(2.0, 0.0)]).unwrap();
        assert_eq!(m.max_modulus(), Some((5.0, 1)));
        assert_eq!(m.min_modulus(), Some((2.0, 0)));
    }

    #[test]
    fn test_min_max_constant_matrix_reports_zero() {
        let m = Matrix::from_vec(2, 2, vec![3.0_f64; 4]).unwrap();
        assert_eq!(m.min_modulus(), Some((3.0, 0)));
        assert_eq!(m.max_modulus(), Some((3.0, 0)));
    }

    #[test]
    fn test_min_max_empty() {
        assert_eq!(Matrix::<f64>::zeros(0, 3).max_modulus(), None);
        assert_eq!(CMatrix::<f32>::zeros(0, 0).min_modulus(), None);
    }

    #[test]
    fn test_froebius_real_is_sum_of_products() {
        let a = Matrix::from_row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(a.froebius_prod(&a), 30.0);
        let b = Matrix::<f64>::zeros(3, 1);
        assert!(matches!(
            a.froebius_prod_checked(&b),
            Err(CoreError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_conj_and_modulus() {
        let mut m = CMatrix::from_vec(1, 2, vec![c(3.0, 4.0), c(-1.0, -1.0)]).unwrap();
        m.conj();
        assert_eq!(m.at(0, 0), c(3.0, -4.0));
        assert_eq!(m.at(0, 1), c(-1.0, 1.0));
        let mag = m.modulus();
        assert_eq!(mag.at(0, 0), 5.0);
        assert!((mag.at(0, 1) - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_to_real_in_place() {
        let mut m = CMatrix::from_vec(1, 2, vec![c(0.0, -2.0), c(3.0, 4.0)]).unwrap();
        m.to_real_in_place();
        assert_eq!(m.as_slice(), &[c(2.0, 0.0), c(5.0, 0.0)]);
    }
}
