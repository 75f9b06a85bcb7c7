//! Elementwise arithmetic and reductions for [`Vector`].
//!
//! Plain methods (`add`, `sub`, ...) are the hot-path tier: operands must
//! already have the same size and this is only checked by `debug_assert!`.
//! The `*_checked` methods validate and return [`CoreError`](crate::CoreError).

use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use crate::error::Result;
use crate::matrix::Matrix;
use crate::{ComplexField, Scalar};

use super::Vector;

macro_rules! impl_elementwise {
    ($name:ident, $checked:ident, $op:tt, $doc:literal) => {
        #[doc = $doc]
        #[inline]
        pub fn $name(&mut self, rhs: &Vector<T>) {
            debug_assert_eq!(self.size(), rhs.size(), concat!(stringify!($name), ": size mismatch"));
            for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
                *a $op b;
            }
        }

        #[doc = concat!("Checked [`", stringify!($name), "`](Self::", stringify!($name), ").")]
        pub fn $checked(&mut self, rhs: &Vector<T>) -> Result<()> {
            self.check_same_size(rhs)?;
            self.$name(rhs);
            Ok(())
        }
    };
}

impl<T: Scalar> Vector<T> {
    impl_elementwise!(add, add_checked, +=, "`self[i] += rhs[i]`.");
    impl_elementwise!(sub, sub_checked, -=, "`self[i] -= rhs[i]`.");
    impl_elementwise!(mul, mul_checked, *=, "`self[i] *= rhs[i]`.");
    impl_elementwise!(div, div_checked, /=, "`self[i] /= rhs[i]`.");

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

    /// Raw sum of products `sum(a_i * b_i)`, without conjugation.
    ///
    /// For real vectors this is the ordinary dot product. For complex
    /// vectors prefer [`dot`](Self::dot).
    pub fn dot_unconjugated(&self, rhs: &Vector<T>) -> T {
        debug_assert_eq!(self.size(), rhs.size(), "dot: size mismatch");
        self.data
            .iter()
            .zip(rhs.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }
}

impl<T: ComplexField> Vector<T> {
    /// Inner product `sum(a_i * conj(b_i))`.
    ///
    /// ```
    /// # use speckle_core::vector::Vector;
    /// let x = Vector::from_vec(vec![1.0_f64, 2.0, 3.0]);
    /// let y = Vector::from_vec(vec![4.0_f64, 5.0, 6.0]);
    /// assert_eq!(x.dot(&y), 32.0);
    /// ```
    pub fn dot(&self, rhs: &Vector<T>) -> T {
        debug_assert_eq!(self.size(), rhs.size(), "dot: size mismatch");
        self.data
            .iter()
            .zip(rhs.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b.conj())
    }

    /// Checked [`dot`](Self::dot).
    pub fn dot_checked(&self, rhs: &Vector<T>) -> Result<T> {
        self.check_same_size(rhs)?;
        Ok(self.dot(rhs))
    }

    /// Euclidean norm `sqrt(sum |a_i|^2)`; never negative.
    ///
    /// ```
    /// # use speckle_core::vector::Vector;
    /// let v = Vector::from_vec(vec![3.0_f64, 4.0]);
    /// assert_eq!(v.norm(), 5.0);
    /// ```
    pub fn norm(&self) -> T::Real {
        let sum = self
            .data
            .iter()
            .fold(<T::Real as num_traits::Zero>::zero(), |acc, &a| {
                acc + a.modulus_sqr()
            });
        num_traits::Float::sqrt(sum)
    }
}

/// Outer product `m[i][j] = a[i] * b[j]`, an `a.size() x b.size()` matrix.
pub fn outer<T: Scalar>(a: &Vector<T>, b: &Vector<T>) -> Matrix<T> {
    let mut m = Matrix::zeros(a.size(), b.size());
    for (j, &bj) in b.as_slice().iter().enumerate() {
        for (i, &ai) in a.as_slice().iter().enumerate() {
            m.set_at(i, j, ai * bj);
        }
    }
    m
}

// ======================================================================
// Compound-assignment operators (panic on size mismatch)
// ======================================================================

macro_rules! impl_assign_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Scalar> $trait<&Vector<T>> for Vector<T> {
            fn $method(&mut self, rhs: &Vector<T>) {
                assert_eq!(
                    self.size(),
                    rhs.size(),
                    "size mismatch in element-wise {}: {} vs {}",
                    stringify!($method),
                    self.size(),
                    rhs.size(),
                );
                for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
                    *a $op b;
                }
            }
        }

        impl<T: Scalar> $trait<T> for Vector<T> {
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
    use crate::vector::CVector;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex;

    fn v(data: &[f64]) -> Vector<f64> {
        Vector::from_slice(data)
    }

    #[test]
    fn test_add_then_sub_restores() {
        let original = v(&[1.5, -2.0, 3.25, 1e10]);
        let b = v(&[0.1, 0.2, -0.3, 7.0]);
        let mut a = original.clone();
        a.add(&b);
        a.sub(&b);
        for (x, y) in a.iter().zip(original.iter()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_mul_div() {
        let mut a = v(&[2.0, 4.0]);
        a.mul(&v(&[3.0, 0.5]));
        assert_eq!(a.as_slice(), &[6.0, 2.0]);
        a.div(&v(&[2.0, 2.0]));
        assert_eq!(a.as_slice(), &[3.0, 1.0]);
    }

    #[test]
    fn test_scale_add_constant() {
        let mut a = v(&[1.0, 2.0]);
        a.scale(10.0);
        a.add_constant(1.0);
        assert_eq!(a.as_slice(), &[11.0, 21.0]);
    }

    #[test]
    fn test_checked_mismatch() {
        let mut a = v(&[1.0, 2.0]);
        assert!(a.add_checked(&v(&[1.0])).is_err());
        assert!(a.div_checked(&v(&[1.0, 2.0, 3.0])).is_err());
        assert!(a.dot_checked(&v(&[1.0])).is_err());
        assert_eq!(a.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_norm_3_4() {
        assert_eq!(v(&[3.0, 4.0]).norm(), 5.0);
        assert_eq!(Vector::<f64>::zeros(0).norm(), 0.0);
    }

    #[test]
    fn test_complex_norm_is_magnitude() {
        // Unconjugated squares would give 1 + (-1) = 0 here.
        let c: CVector<f64> = Vector::from_vec(vec![Complex::new(1.0, 0.0), Complex::new(0.0, 1.0)]);
        assert_abs_diff_eq!(c.norm(), 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_complex_dot_conjugates_rhs() {
        let a: CVector<f64> = Vector::from_vec(vec![Complex::new(0.0, 1.0)]);
        assert_eq!(a.dot(&a), Complex::new(1.0, 0.0));
        assert_eq!(a.dot_unconjugated(&a), Complex::new(-1.0, 0.0));
    }

    #[test]
    fn test_outer() {
        let m = outer(&v(&[1.0, 2.0]), &v(&[3.0, 4.0, 5.0]));
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.at(1, 2), 10.0);
        assert_eq!(m.at(0, 1), 4.0);
    }

    #[test]
    fn test_assign_operators() {
        let mut a = v(&[1.0, 2.0]);
        a += &v(&[1.0, 1.0]);
        a *= 2.0;
        assert_eq!(a.as_slice(), &[4.0, 6.0]);
    }

    #[test]
    #[should_panic(expected = "size mismatch")]
    fn test_assign_operator_panics_on_mismatch() {
        let mut a = v(&[1.0, 2.0]);
        a -= &v(&[1.0]);
    }
}
