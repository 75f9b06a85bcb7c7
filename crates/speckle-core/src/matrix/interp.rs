//! Bilinear interpolation at fractional coordinates.

use crate::{Float, Lerp, Scalar};

use super::Matrix;

/// Neighbour indices and fractional weight along one axis of length `n`.
///
/// At or past the last index the pair is `(n-2, n-1)` with weight one;
/// below zero it is `(0, 1)` with weight zero. A unit axis collapses to
/// index zero.
fn axis_weights<R: Float>(f: R, n: usize) -> (usize, usize, R) {
    if n < 2 {
        return (0, 0, R::zero());
    }
    let last = n - 1;
    if f.is_nan() || f < R::zero() {
        return (0, 1, R::zero());
    }
    let fl = f.floor();
    match num_traits::ToPrimitive::to_usize(&fl) {
        Some(i) if i < last => (i, i + 1, f - fl),
        _ => (last - 1, last, R::one()),
    }
}

impl<T: Scalar> Matrix<T> {
    /// Value at fractional position `(frow, fcol)`.
    ///
    /// Integer coordinates return the stored element exactly. Integer
    /// matrices interpolate in `R` and truncate toward zero.
    ///
    /// Coordinates are clamped, never extrapolated: anything below zero
    /// (including `-0.5`) and `NaN` read the first row or column, anything at
    /// or past the last index reads the last one.
    ///
    /// ```
    /// # use speckle_core::matrix::Matrix;
    /// let m = Matrix::from_row_major(2, 2, &[0.0, 1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(m.interpolate(0.5, 0.5), 1.5);
    /// assert_eq!(m.interpolate(1.0, 1.0), 3.0);
    /// ```
    pub fn interpolate<R: Float>(&self, frow: R, fcol: R) -> T
    where
        T: Lerp<R>,
    {
        debug_assert!(!self.is_empty(), "interpolate: empty matrix");
        let (y0, y1, v) = axis_weights(frow, self.rows);
        let (x0, x1, u) = axis_weights(fcol, self.cols);
        T::bilinear(
            self.at(y0, x0),
            self.at(y0, x1),
            self.at(y1, x0),
            self.at(y1, x1),
            u,
            v,
        )
    }
}
