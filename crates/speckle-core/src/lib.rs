//! `speckle-core`: numeric substrate for 2-D coherent-imaging data.
//!
//! Provides dense real, complex and integer vectors and matrices, the
//! algebraic kernels over them, an [`Image`](image::Image) model that couples
//! pixels with a validity mask and detector geometry, and a Fourier-transform
//! layer that moves images between corner-centered and center-centered
//! spectral layouts.
//!
//! # Design
//!
//! - Matrices are stored column-major: element `(row, col)` is at flat index
//!   `col * rows + row`.
//! - Generic over element types via the [`Scalar`] / [`Float`] /
//!   [`ComplexField`] trait hierarchy; [`precision`] picks the default width.
//! - Hot-path kernels only `debug_assert!` their preconditions; `*_checked`
//!   siblings return [`CoreError`].
//! - `unsafe` is confined to the documented `*_unchecked` accessors.

pub mod dtype;
pub mod error;
pub mod fft;
pub mod image;
pub mod linalg;
pub mod matrix;
pub mod vector;

// Re-export key types at crate root for convenience.
pub use dtype::{ComplexField, Float, Lerp, Scalar};
pub use error::{CoreError, Result};

/// Build-time default precision.
///
/// `Real` is `f64` unless the `single-precision` feature is enabled, in which
/// case it is `f32`. All containers stay generic; these aliases only fix the
/// instantiation applications use by default.
pub mod precision {
    /// Real scalar width.
    #[cfg(not(feature = "single-precision"))]
    pub type Real = f64;

    /// Real scalar width.
    #[cfg(feature = "single-precision")]
    pub type Real = f32;

    /// Complex scalar at the default width.
    pub type Complex = num_complex::Complex<Real>;

    pub type Vector = crate::vector::Vector<Real>;
    pub type CVector = crate::vector::CVector<Real>;
    pub type Matrix = crate::matrix::Matrix<Real>;
    pub type CMatrix = crate::matrix::CMatrix<Real>;
    pub type IMatrix = crate::matrix::IMatrix;
    pub type Image = crate::image::Image<Real>;
    pub type Detector = crate::image::Detector<Real>;
    pub type FftPlan = crate::fft::FftPlan<Real>;
}

/// Items intended for glob-import: `use speckle_core::prelude::*;`
pub mod prelude {
    pub use crate::dtype::{ComplexField, Float, Lerp, Scalar};
    pub use crate::error::{CoreError, Result};
    pub use crate::fft::{Direction, FftConfig, FftContext, FftPlan, normalize};
    pub use crate::image::{Detector, Image};
    pub use crate::linalg::{matmul, matvec};
    pub use crate::matrix::{CMatrix, IMatrix, Matrix};
    pub use crate::vector::{CVector, Vector, outer};
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::precision;

    #[test]
    fn test_precision_aliases() {
        let m = precision::CMatrix::zeros(2, 2);
        let z: precision::Complex = m.at(1, 1);
        assert_eq!(z.re, 0.0);
        let img = precision::Image::new(2, 2);
        assert_eq!(img.shape(), m.shape());
        #[cfg(not(feature = "single-precision"))]
        assert_eq!(core::mem::size_of::<precision::Real>(), 8);
        #[cfg(feature = "single-precision")]
        assert_eq!(core::mem::size_of::<precision::Real>(), 4);
    }
}
