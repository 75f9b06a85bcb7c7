//! Layout permutations: transpose, quadrant shifts and row primitives.

use crate::Scalar;

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Transpose in place.
    ///
    /// A fresh `cols x rows` buffer is filled and swapped in; the old buffer
    /// is dropped.
    ///
    /// ```
    /// # use speckle_core::matrix::Matrix;
    /// let mut m = Matrix::from_row_major(2, 3, &[1, 2, 3, 4, 5, 6]).unwrap();
    /// m.transpose();
    /// assert_eq!(m.shape(), (3, 2));
    /// assert_eq!(m, Matrix::from_row_major(3, 2, &[1, 4, 2, 5, 3, 6]).unwrap());
    /// ```
    pub fn transpose(&mut self) {
        let (rows, cols) = (self.rows, self.cols);
        let mut out = Vec::with_capacity(self.data.len());
        // new column c is old row c
        for r in 0..rows {
            for c in 0..cols {
                out.push(self.data[c * rows + r]);
            }
        }
        self.data = out;
        self.rows = cols;
        self.cols = rows;
    }

    /// Move the zero-frequency element from the corner to the middle.
    ///
    /// Element `(r, c)` moves to `((r + rows/2) % rows, (c + cols/2) % cols)`.
    pub fn fftshift(&mut self) {
        self.roll(self.rows / 2, self.cols / 2);
    }

    /// Inverse of [`fftshift`](Self::fftshift), also for odd dimensions.
    pub fn ifftshift(&mut self) {
        self.roll(self.rows - self.rows / 2, self.cols - self.cols / 2);
    }

    /// Cyclically move element `(r, c)` to `((r + dr) % rows, (c + dc) % cols)`.
    pub(crate) fn roll(&mut self, dr: usize, dc: usize) {
        let (rows, cols) = (self.rows, self.cols);
        if rows == 0 || cols == 0 {
            return;
        }
        let mut out = vec![T::default(); self.data.len()];
        for c in 0..cols {
            let nc = (c + dc) % cols;
            for r in 0..rows {
                let nr = (r + dr) % rows;
                out[nc * rows + nr] = self.data[c * rows + r];
            }
        }
        self.data = out;
    }

    // ------------------------------------------------------------------
    // Row primitives
    // ------------------------------------------------------------------

    /// Multiply row `n` by `x`.
    pub fn scale_row(&mut self, n: usize, x: T) {
        debug_assert!(n < self.rows, "scale_row: row {n} out of bounds");
        let rows = self.rows;
        for c in 0..self.cols {
            self.data[c * rows + n] *= x;
        }
    }

    /// `row[to] += row[from] * factor`.
    pub fn row_add_row(&mut self, from: usize, to: usize, factor: T) {
        debug_assert!(from < self.rows && to < self.rows, "row_add_row: row out of bounds");
        let rows = self.rows;
        for c in 0..self.cols {
            let v = self.data[c * rows + from];
            self.data[c * rows + to] += v * factor;
        }
    }

    /// Exchange rows `a` and `b`.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        debug_assert!(a < self.rows && b < self.rows, "swap_rows: row out of bounds");
        if a == b {
            return;
        }
        let rows = self.rows;
        for c in 0..self.cols {
            self.data.swap(c * rows + a, c * rows + b);
        }
    }
}
