//! Dense 2-D matrices in column-major order.
//!
//! Element `(row, col)` lives at flat index `col * rows + row`. The same
//! generic [`Matrix`] backs the three container kinds of the library: real
//! matrices (`Matrix<f32>` / `Matrix<f64>`), integer masks ([`IMatrix`]) and
//! complex fields ([`CMatrix`]).
//!
//! Access comes in three tiers:
//! - `at` / `set_at` and the elementwise kernels only `debug_assert!` their
//!   preconditions;
//! - `get` / `set` and every `*_checked` method validate and return
//!   [`CoreError`];
//! - `get_unchecked` / `set_unchecked` are `unsafe` and skip all checks.

mod display;
mod interp;
mod ops;
mod reduce;
mod reshape;

use core::ops::{Index, IndexMut};

use num_complex::Complex;

use crate::error::{CoreError, Result};
use crate::{Float, Scalar};

/// A dense `rows x cols` matrix stored column by column.
///
/// The matrix owns its buffer exclusively; cloning performs a deep copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Scalar> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Complex matrix (pixel data).
pub type CMatrix<T> = Matrix<Complex<T>>;

/// Integer matrix (validity masks).
pub type IMatrix = Matrix<i32>;

impl<T: Scalar> Matrix<T> {
    // ------------------------------------------------------------------
    // Allocation
    // ------------------------------------------------------------------

    /// Allocate a `rows x cols` matrix of zeros.
    ///
    /// ```
    /// # use speckle_core::matrix::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert!(m.iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }

    /// Identity-like matrix: ones on the main diagonal, zeros elsewhere.
    pub fn identity(rows: usize, cols: usize) -> Self {
        let mut m = Self::zeros(rows, cols);
        m.set_identity();
        m
    }

    /// Wrap column-major `data` as a `rows x cols` matrix.
    ///
    /// Returns an error if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(CoreError::InvalidShape {
                shape: vec![rows, cols],
                reason: "rows * cols does not match data length",
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from row-major data (the order literals are written in).
    ///
    /// ```
    /// # use speckle_core::matrix::Matrix;
    /// let m = Matrix::from_row_major(2, 2, &[1, 2, 3, 4]).unwrap();
    /// assert_eq!(m.at(0, 1), 2);
    /// assert_eq!(m.as_slice(), &[1, 3, 2, 4]);
    /// ```
    pub fn from_row_major(rows: usize, cols: usize, data: &[T]) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(CoreError::InvalidShape {
                shape: vec![rows, cols],
                reason: "rows * cols does not match data length",
            });
        }
        Ok(Self::from_fn(rows, cols, |r, c| data[r * cols + c]))
    }

    /// Build a matrix by evaluating `f(row, col)` for every element.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for c in 0..cols {
            for r in 0..rows {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements, `rows * cols`.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Column-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate in storage (column-major) order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    /// Flat storage index of `(row, col)`.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        col * self.rows + row
    }

    /// `(row, col)` of a flat storage index.
    #[inline]
    pub fn row_col_of(&self, index: usize) -> (usize, usize) {
        (index % self.rows, index / self.rows)
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    /// Element `(row, col)`. Out-of-range indices are a caller error.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.rows && col < self.cols, "at: ({row}, {col}) out of bounds");
        self.data[col * self.rows + row]
    }

    /// Overwrite element `(row, col)`. Out-of-range indices are a caller error.
    #[inline]
    pub fn set_at(&mut self, row: usize, col: usize, x: T) {
        debug_assert!(row < self.rows && col < self.cols, "set_at: ({row}, {col}) out of bounds");
        self.data[col * self.rows + row] = x;
    }

    /// Checked read of element `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_index(row, col)?;
        Ok(self.data[col * self.rows + row])
    }

    /// Checked write of element `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, x: T) -> Result<()> {
        self.check_index(row, col)?;
        self.data[col * self.rows + row] = x;
        Ok(())
    }

    /// Read `(row, col)` without bounds checking.
    ///
    /// # Safety
    ///
    /// `row < rows` and `col < cols` must hold.
    #[inline]
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.rows && col < self.cols);
        // SAFETY: the caller keeps (row, col) inside the matrix.
        unsafe { *self.data.get_unchecked(col * self.rows + row) }
    }

    /// Write `(row, col)` without bounds checking.
    ///
    /// # Safety
    ///
    /// `row < rows` and `col < cols` must hold.
    #[inline]
    pub unsafe fn set_unchecked(&mut self, row: usize, col: usize, x: T) {
        debug_assert!(row < self.rows && col < self.cols);
        let idx = col * self.rows + row;
        // SAFETY: the caller keeps (row, col) inside the matrix.
        unsafe { *self.data.get_unchecked_mut(idx) = x }
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![row, col],
                shape: vec![self.rows, self.cols],
            });
        }
        Ok(())
    }

    pub(crate) fn check_same_shape(&self, other: &Matrix<T>) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.rows, self.cols],
                got: vec![other.rows, other.cols],
            });
        }
        Ok(())
    }

    /// Shape check across element types (pixels against mask).
    pub(crate) fn check_same_shape_as<U: Scalar>(&self, other: &Matrix<U>) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.rows(), self.cols()],
                got: vec![other.rows(), other.cols()],
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Whole-buffer operations
    // ------------------------------------------------------------------

    /// Copy `src` into `self`. Both must have the same shape.
    #[inline]
    pub fn copy_from(&mut self, src: &Matrix<T>) {
        debug_assert_eq!(self.shape(), src.shape(), "copy_from: shape mismatch");
        self.data.copy_from_slice(&src.data);
    }

    /// Copy `src` into `self`, returning `Err` on shape mismatch.
    pub fn copy_from_checked(&mut self, src: &Matrix<T>) -> Result<()> {
        self.check_same_shape(src)?;
        self.data.copy_from_slice(&src.data);
        Ok(())
    }

    /// Zero the matrix, then put ones on the main diagonal.
    pub fn set_identity(&mut self) {
        self.fill(T::zero());
        for i in 0..self.rows.min(self.cols) {
            self.set_at(i, i, T::one());
        }
    }

    /// Set every element to `x`.
    pub fn fill(&mut self, x: T) {
        self.data.fill(x);
    }

    /// Change the shape to `rows x cols`. Existing contents are discarded and
    /// every element of the resized matrix is zero.
    pub fn realloc(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.data.clear();
        self.data.resize(rows * cols, T::default());
    }

    /// Apply `f` to every element, producing a matrix of another element type.
    pub fn map<U, F>(&self, f: F) -> Matrix<U>
    where
        U: Scalar,
        F: Fn(T) -> U,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Apply `f` to every element in place.
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(T) -> T,
    {
        for x in &mut self.data {
            *x = f(*x);
        }
    }
}

impl<T: Float> Matrix<T> {
    /// Promote to a complex matrix with zero imaginary parts.
    pub fn to_complex(&self) -> CMatrix<T> {
        self.map(|x| Complex::new(x, T::zero()))
    }
}

impl<T: Scalar> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.rows && col < self.cols);
        &self.data[col * self.rows + row]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.rows && col < self.cols);
        let idx = col * self.rows + row;
        &mut self.data[idx]
    }
}
