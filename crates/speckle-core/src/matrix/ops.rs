//! Elementwise arithmetic on matrices of equal shape.

use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use crate::error::Result;
use crate::{Float, Scalar};

use super::{IMatrix, Matrix};

macro_rules! impl_elementwise {
    ($name:ident, $checked:ident, $op:tt, $doc:literal) => {
        #[doc = $doc]
        #[inline]
        pub fn $name(&mut self, rhs: &Matrix<T>) {
            debug_assert_eq!(self.shape(), rhs.shape(), concat!(stringify!($name), ": shape mismatch"));
            for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
                *a $op b;
            }
        }

        #[doc = concat!("Checked [`", stringify!($name), "`](Self::", stringify!($name), ").")]
        pub fn $checked(&mut self, rhs: &Matrix<T>) -> Result<()> {
            self.check_same_shape(rhs)?;
            self.$name(rhs);
            Ok(())
        }
    };
}

impl<T: Scalar> Matrix<T> {
    impl_elementwise!(add, add_checked, +=, "`self[i,j] += rhs[i,j]`.");
    impl_elementwise!(sub, sub_checked, -=, "`self[i,j] -= rhs[i,j]`.");
    impl_elementwise!(mul_elements, mul_elements_checked, *=, "`self[i,j] *= rhs[i,j]`.");
    impl_elementwise!(div_elements, div_elements_checked, /=, "`self[i,j] /= rhs[i,j]`.");

    /// `self += factor * rhs`; a `None` or unit factor is a plain
    /// [`add`](Self::add).
    ///
    /// ```
    /// # use speckle_core::matrix::CMatrix;
    /// # use num_complex::Complex;
    /// let mut a = CMatrix::<f64>::zeros(1, 1);
    /// let mut b = CMatrix::<f64>::zeros(1, 1);
    /// b.set_at(0, 0, Complex::new(1.0, 1.0));
    /// a.add_scaled(&b, Some(Complex::new(0.0, 1.0)));
    /// assert_eq!(a.at(0, 0), Complex::new(-1.0, 1.0));
    /// ```
    pub fn add_scaled(&mut self, rhs: &Matrix<T>, factor: Option<T>) {
        debug_assert_eq!(self.shape(), rhs.shape(), "add_scaled: shape mismatch");
        match factor {
            None => self.add(rhs),
            Some(k) if k == T::one() => self.add(rhs),
            Some(k) => {
                for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
                    *a += k * b;
                }
            }
        }
    }

    /// Checked [`add_scaled`](Self::add_scaled).
    pub fn add_scaled_checked(&mut self, rhs: &Matrix<T>, factor: Option<T>) -> Result<()> {
        self.check_same_shape(rhs)?;
        self.add_scaled(rhs, factor);
        Ok(())
    }

    /// Multiply every element by `x`.
    #[inline]
    pub fn scale(&mut self, x: T) {
        for a in &mut self.data {
            *a *= x;
        }
    }

    /// Add `x` to every element.
    #[inline]
    pub fn add_constant(&mut self, x: T) {
        for a in &mut self.data {
            *a += x;
        }
    }
}

impl IMatrix {
    /// Multiply every element by a real factor, truncating toward zero.
    ///
    /// ```
    /// # use speckle_core::matrix::IMatrix;
    /// let mut m = IMatrix::from_row_major(1, 3, &[3, -3, 10]).unwrap();
    /// m.scale_real(0.5_f64);
    /// assert_eq!(m.as_slice(), &[1, -1, 5]);
    /// ```
    pub fn scale_real<R: Float>(&mut self, x: R) {
        for a in &mut self.data {
            let scaled = (R::from_f64(f64::from(*a)) * x).trunc();
            *a = num_traits::ToPrimitive::to_i64(&scaled)
                .map_or(0, |v| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32);
        }
    }
}

// ======================================================================
// Compound-assignment operators (panic on shape mismatch)
// ======================================================================

macro_rules! impl_assign_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Scalar> $trait<&Matrix<T>> for Matrix<T> {
            fn $method(&mut self, rhs: &Matrix<T>) {
                assert_eq!(
                    self.shape(),
                    rhs.shape(),
                    "shape mismatch in element-wise {}: {:?} vs {:?}",
                    stringify!($method),
                    self.shape(),
                    rhs.shape(),
                );
                for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
                    *a $op b;
                }
            }
        }

        impl<T: Scalar> $trait<T> for Matrix<T> {
            fn $method(&mut self, rhs: T) {
                for a in &mut self.data {
                    *a $op rhs;
                }
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, +=);
impl_assign_op!(SubAssign, sub_assign, -=);
impl_assign_op!(MulAssign, mul_assign, *=);
impl_assign_op!(DivAssign, div_assign, /=);

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::CoreError;
    use crate::matrix::CMatrix;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn m(rows: usize, cols: usize, data: &[f64]) -> Matrix<f64> {
        Matrix::from_row_major(rows, cols, data).unwrap()
    }

    #[test]
    fn test_add_then_sub_restores() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = Matrix::from_fn(5, 4, |_, _| rng.random_range(-100.0..100.0));
        let b = Matrix::from_fn(5, 4, |_, _| rng.random_range(-100.0..100.0));
        let mut c = a.clone();
        c.add(&b);
        c.sub(&b);
        for (x, y) in c.iter().zip(a.iter()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_elementwise_mul_div() {
        let mut a = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        a.mul_elements(&m(2, 2, &[2.0, 2.0, 2.0, 2.0]));
        assert_eq!(a, m(2, 2, &[2.0, 4.0, 6.0, 8.0]));
        a.div_elements(&m(2, 2, &[2.0, 4.0, 6.0, 8.0]));
        assert_eq!(a, m(2, 2, &[1.0, 1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_checked_variants_reject_mismatch() {
        let mut a = m(2, 2, &[1.0; 4]);
        let b = m(2, 3, &[1.0; 6]);
        assert!(matches!(a.add_checked(&b), Err(CoreError::DimensionMismatch { .. })));
        assert!(a.sub_checked(&b).is_err());
        assert!(a.mul_elements_checked(&b).is_err());
        assert!(a.div_elements_checked(&b).is_err());
        assert!(a.add_scaled_checked(&b, None).is_err());
        assert_eq!(a, m(2, 2, &[1.0; 4]));
    }

    #[test]
    fn test_add_scaled_none_is_plain_add() {
        let mut a = CMatrix::<f64>::zeros(2, 1);
        let b = CMatrix::from_vec(2, 1, vec![Complex::new(1.0, 2.0), Complex::new(-1.0, 0.5)]).unwrap();
        a.add_scaled(&b, None);
        assert_eq!(a, b);
        a.add_scaled(&b, Some(Complex::new(2.0, 0.0)));
        assert_eq!(a.at(0, 0), Complex::new(3.0, 6.0));
    }

    #[test]
    fn test_scale_and_add_constant() {
        let mut a = m(1, 2, &[1.0, -2.0]);
        a.scale(3.0);
        a.add_constant(1.0);
        assert_eq!(a, m(1, 2, &[4.0, -5.0]));

        let mut c = CMatrix::<f32>::zeros(1, 1);
        c.add_constant(Complex::new(0.0, 1.0));
        c.scale(Complex::new(0.0, 1.0));
        assert_eq!(c.at(0, 0), Complex::new(-1.0, 0.0));
    }

    #[test]
    fn test_integer_scale_real_truncates() {
        let mut mask = IMatrix::from_row_major(2, 2, &[1, 2, 3, -7]).unwrap();
        mask.scale_real(0.4_f32);
        assert_eq!(mask, IMatrix::from_row_major(2, 2, &[0, 0, 1, -2]).unwrap());
    }

    #[test]
    fn test_assign_operators() {
        let mut a = m(1, 2, &[1.0, 2.0]);
        a += &m(1, 2, &[1.0, 1.0]);
        a *= 2.0;
        a -= 1.0;
        assert_eq!(a, m(1, 2, &[3.0, 5.0]));
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn test_assign_operator_panics_on_mismatch() {
        let mut a = m(1, 2, &[1.0, 2.0]);
        a += &m(2, 1, &[1.0, 2.0]);
    }
}
