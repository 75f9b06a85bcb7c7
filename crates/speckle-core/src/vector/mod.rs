//! Dense 1-D vectors with exclusive, contiguous storage.
//!
//! [`Vector`] is generic over any [`Scalar`]; [`CVector`] is the complex
//! instantiation. Elementwise kernels live in `ops`.

mod ops;

use core::fmt;
use core::ops::{Index, IndexMut};

use num_complex::Complex;

use crate::error::{CoreError, Result};
use crate::{Float, Scalar};

pub use ops::outer;

/// A dense vector of `size` elements.
///
/// Cloning performs a deep copy; two vectors never share storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T: Scalar> {
    data: Vec<T>,
}

/// Complex vector.
pub type CVector<T> = Vector<Complex<T>>;

impl<T: Scalar> Vector<T> {
    // ------------------------------------------------------------------
    // Allocation
    // ------------------------------------------------------------------

    /// Allocate a vector of `size` zeros.
    ///
    /// ```
    /// # use speckle_core::vector::Vector;
    /// let v = Vector::<f64>::zeros(4);
    /// assert_eq!(v.size(), 4);
    /// assert!(v.iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(size: usize) -> Self {
        Self {
            data: vec![T::default(); size],
        }
    }

    /// Take ownership of `data` as a vector.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Copy a slice into a new vector.
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Build a vector by evaluating `f` at every index.
    pub fn from_fn<F>(size: usize, f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self {
            data: (0..size).map(f).collect(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Alias of [`size`](Self::size).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the vector and return its storage.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    /// Element `n`. Out-of-range `n` is a caller error (panics).
    #[inline]
    pub fn at(&self, n: usize) -> T {
        self.data[n]
    }

    /// Overwrite element `n`. Out-of-range `n` is a caller error (panics).
    #[inline]
    pub fn set_at(&mut self, n: usize, x: T) {
        self.data[n] = x;
    }

    /// Checked read of element `n`.
    pub fn get(&self, n: usize) -> Result<T> {
        self.data
            .get(n)
            .copied()
            .ok_or_else(|| self.out_of_bounds(n))
    }

    /// Checked write of element `n`.
    pub fn set(&mut self, n: usize, x: T) -> Result<()> {
        let err = self.out_of_bounds(n);
        let slot = self.data.get_mut(n).ok_or(err)?;
        *slot = x;
        Ok(())
    }

    /// Read element `n` without bounds checking.
    ///
    /// # Safety
    ///
    /// `n` must be less than [`size`](Self::size).
    #[inline]
    pub unsafe fn get_unchecked(&self, n: usize) -> T {
        debug_assert!(n < self.data.len());
        // SAFETY: the caller guarantees `n < size`.
        unsafe { *self.data.get_unchecked(n) }
    }

    /// Write element `n` without bounds checking.
    ///
    /// # Safety
    ///
    /// `n` must be less than [`size`](Self::size).
    #[inline]
    pub unsafe fn set_unchecked(&mut self, n: usize, x: T) {
        debug_assert!(n < self.data.len());
        // SAFETY: the caller guarantees `n < size`.
        unsafe { *self.data.get_unchecked_mut(n) = x }
    }

    fn out_of_bounds(&self, n: usize) -> CoreError {
        CoreError::IndexOutOfBounds {
            index: vec![n],
            shape: vec![self.data.len()],
        }
    }

    // ------------------------------------------------------------------
    // Copy
    // ------------------------------------------------------------------

    /// Copy `src` into `self`. Both must have the same size.
    #[inline]
    pub fn copy_from(&mut self, src: &Vector<T>) {
        debug_assert_eq!(self.size(), src.size(), "copy_from: size mismatch");
        self.data.copy_from_slice(&src.data);
    }

    /// Copy `src` into `self`, returning `Err` on size mismatch.
    pub fn copy_from_checked(&mut self, src: &Vector<T>) -> Result<()> {
        self.check_same_size(src)?;
        self.data.copy_from_slice(&src.data);
        Ok(())
    }

    pub(crate) fn check_same_size(&self, other: &Vector<T>) -> Result<()> {
        if self.size() != other.size() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.size()],
                got: vec![other.size()],
            });
        }
        Ok(())
    }
}

impl<T: Float> Vector<T> {
    /// Promote to a complex vector with zero imaginary parts.
    pub fn to_complex(&self) -> CVector<T> {
        Vector {
            data: self.data.iter().map(|&x| Complex::new(x, T::zero())).collect(),
        }
    }
}

impl<T: Scalar> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, n: usize) -> &T {
        &self.data[n]
    }
}

impl<T: Scalar> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, n: usize) -> &mut T {
        &mut self.data[n]
    }
}

impl<T: Scalar> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: Scalar> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}
