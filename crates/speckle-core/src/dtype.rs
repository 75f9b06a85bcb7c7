//! Numeric type hierarchy for the containers and kernels.
//!
//! The trait hierarchy is:
//! ```text
//! Scalar                (i32, f32, f64, Complex<f32>, Complex<f64>)
//!   ├── Float             (f32, f64)
//!   └── ComplexField      (f32, f64, Complex<f32>, Complex<f64>)
//! ```
//!
//! Every container is generic over [`Scalar`]; kernels that need a modulus,
//! a conjugate, or a square root (norms, inversion, Froebius product) are
//! generic over [`ComplexField`] so the same code serves real and complex
//! matrices. [`Lerp`] supplies the per-type arithmetic of bilinear
//! interpolation, including the truncating integer variant.

use core::fmt;
use core::iter::Sum;
use core::ops::Neg;

use num_complex::Complex;
use num_traits::NumAssign;

// ---------------------------------------------------------------------------
// Scalar: the root trait for every element type
// ---------------------------------------------------------------------------

/// Base trait for all numeric types storable in a vector or matrix.
///
/// `Default` must be the additive identity: freshly allocated containers are
/// filled with it.
pub trait Scalar:
    Copy
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + Send
    + Sync
    + Default
    + Sum
    + NumAssign
    + 'static
{
    /// Convert from `usize` (used for index / size arithmetic).
    fn from_usize(v: usize) -> Self;
}

// ---------------------------------------------------------------------------
// Float: the real scalar width shared by every container and the FFT layer
// ---------------------------------------------------------------------------

/// Trait for the real floating-point widths (`f32`, `f64`).
///
/// Transcendental functions come from [`num_traits::Float`].
pub trait Float: Scalar + num_traits::Float {
    /// Convert from an `f64` literal (used for constants and tolerances).
    fn from_f64(v: f64) -> Self;
}

// ---------------------------------------------------------------------------
// ComplexField: what norms, inversion and conjugated products need
// ---------------------------------------------------------------------------

/// Element types with a conjugate and a real modulus.
///
/// For real types `conj` is the identity and `modulus` is `abs`.
pub trait ComplexField: Scalar + Neg<Output = Self> {
    /// The underlying real width.
    type Real: Float;

    /// Embed a real value.
    fn from_real(re: Self::Real) -> Self;

    /// Complex conjugate.
    fn conj(self) -> Self;

    /// Magnitude `|z|`.
    fn modulus(self) -> Self::Real;

    /// Squared magnitude `|z|^2`.
    fn modulus_sqr(self) -> Self::Real;
}

// ---------------------------------------------------------------------------
// Lerp: bilinear combination of a 2x2 neighbourhood
// ---------------------------------------------------------------------------

/// Weighted bilinear combination with real weights `u` (columns) and
/// `v` (rows).
pub trait Lerp<R: Float>: Scalar {
    /// `c00 (1-u)(1-v) + c01 u(1-v) + c10 (1-u)v + c11 uv`.
    fn bilinear(c00: Self, c01: Self, c10: Self, c11: Self, u: R, v: R) -> Self;
}

// ===========================================================================
// Implementations
// ===========================================================================

macro_rules! impl_real {
    ($ty:ty) => {
        impl Scalar for $ty {
            #[inline]
            fn from_usize(v: usize) -> Self {
                v as Self
            }
        }

        impl Float for $ty {
            #[inline]
            fn from_f64(v: f64) -> Self {
                v as Self
            }
        }

        impl ComplexField for $ty {
            type Real = $ty;

            #[inline]
            fn from_real(re: $ty) -> Self {
                re
            }
            #[inline]
            fn conj(self) -> Self {
                self
            }
            #[inline]
            fn modulus(self) -> $ty {
                <$ty>::abs(self)
            }
            #[inline]
            fn modulus_sqr(self) -> $ty {
                self * self
            }
        }

        impl Lerp<$ty> for $ty {
            #[inline]
            fn bilinear(c00: Self, c01: Self, c10: Self, c11: Self, u: $ty, v: $ty) -> Self {
                c00 * (1.0 - u) * (1.0 - v) + c01 * u * (1.0 - v) + c10 * (1.0 - u) * v + c11 * u * v
            }
        }
    };
}

impl_real!(f32);
impl_real!(f64);

impl Scalar for i32 {
    #[inline]
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn from_usize(v: usize) -> Self {
        v as Self
    }
}

impl<R: Float> Lerp<R> for i32 {
    /// Computed in the real width, then truncated toward zero.
    fn bilinear(c00: Self, c01: Self, c10: Self, c11: Self, u: R, v: R) -> Self {
        let f = |x: i32| R::from_f64(f64::from(x));
        let one = R::one();
        let acc = f(c00) * (one - u) * (one - v)
            + f(c01) * u * (one - v)
            + f(c10) * (one - u) * v
            + f(c11) * u * v;
        num_traits::ToPrimitive::to_i64(&acc.trunc())
            .map_or(0, |x| x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }
}

impl<T: Float> Scalar for Complex<T> {
    #[inline]
    fn from_usize(v: usize) -> Self {
        Complex::new(T::from_usize(v), T::zero())
    }
}

impl<T: Float> ComplexField for Complex<T> {
    type Real = T;

    #[inline]
    fn from_real(re: T) -> Self {
        Complex::new(re, T::zero())
    }
    #[inline]
    fn conj(self) -> Self {
        Complex::new(self.re, -self.im)
    }
    #[inline]
    fn modulus(self) -> T {
        self.re.hypot(self.im)
    }
    #[inline]
    fn modulus_sqr(self) -> T {
        self.re * self.re + self.im * self.im
    }
}

impl<R: Float> Lerp<R> for Complex<R> {
    #[inline]
    fn bilinear(c00: Self, c01: Self, c10: Self, c11: Self, u: R, v: R) -> Self {
        let one = R::one();
        c00 * ((one - u) * (one - v)) + c01 * (u * (one - v)) + c10 * ((one - u) * v) + c11 * (u * v)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};

    #[test]
    fn test_default_is_zero() {
        assert_eq!(f64::default(), f64::zero());
        assert_eq!(i32::default(), 0);
        assert_eq!(Complex::<f32>::default(), Complex::zero());
    }

    #[test]
    fn test_from_usize() {
        assert_eq!(f32::from_usize(42), 42.0_f32);
        assert_eq!(i32::from_usize(7), 7);
        assert_eq!(Complex::<f64>::from_usize(3), Complex::new(3.0, 0.0));
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(<f64 as Float>::from_f64(-1.25), -1.25);
        assert_eq!(<f32 as Float>::from_f64(0.5), 0.5_f32);
    }

    #[test]
    fn test_complex_field_real() {
        assert_eq!(ComplexField::conj(-2.0_f64), -2.0);
        assert_eq!((-2.0_f64).modulus(), 2.0);
        assert_eq!(3.0_f64.modulus_sqr(), 9.0);
    }

    #[test]
    fn test_complex_field_complex() {
        let z = Complex::new(3.0_f64, -4.0);
        assert_eq!(ComplexField::conj(z), Complex::new(3.0, 4.0));
        assert_eq!(z.modulus(), 5.0);
        assert_eq!(z.modulus_sqr(), 25.0);
        assert_eq!(Complex::<f64>::from_real(2.0), Complex::new(2.0, 0.0));
        assert_eq!(Complex::<f64>::one(), Complex::new(1.0, 0.0));
    }

    #[test]
    fn test_lerp_real_midpoint() {
        let m = f64::bilinear(0.0, 1.0, 2.0, 3.0, 0.5, 0.5);
        assert_eq!(m, 1.5);
        assert_eq!(f64::bilinear(0.0, 1.0, 2.0, 3.0, 0.0, 0.0), 0.0);
        assert_eq!(f64::bilinear(0.0, 1.0, 2.0, 3.0, 1.0, 1.0), 3.0);
    }

    #[test]
    fn test_lerp_int_truncates() {
        // 0.25 * 3 = 0.75 truncates to 0; 0.5 * 3 = 1.5 truncates to 1
        assert_eq!(<i32 as Lerp<f64>>::bilinear(0, 3, 0, 3, 0.25, 0.0), 0);
        assert_eq!(<i32 as Lerp<f64>>::bilinear(0, 3, 0, 3, 0.5, 0.0), 1);
        assert_eq!(<i32 as Lerp<f32>>::bilinear(-4, -4, -4, -4, 0.3, 0.7), -4);
    }

    #[test]
    fn test_lerp_complex() {
        let a = Complex::new(0.0_f64, 0.0);
        let b = Complex::new(2.0_f64, 2.0);
        let m = Complex::bilinear(a, b, a, b, 0.5, 0.25);
        assert!((m - Complex::new(1.0, 1.0)).norm() < 1e-12);
    }
}
