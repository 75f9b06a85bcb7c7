//! Diffraction images: complex pixels, a validity mask and detector geometry.
//!
//! An [`Image`] keeps its pixel matrix and its integer mask the same shape at
//! all times. Shape changes go through [`Image::realloc`], which resizes both;
//! the mutable accessors hand out storage slices only.
//!
//! Three public flags describe how the pixels are to be read:
//! - `phased`: pixels carry amplitude and phase (`true`) or only a magnitude;
//! - `scaled`: magnitudes are amplitudes (`true`) or intensities (`false`);
//! - `shifted`: the origin sits in the corner, engine layout (`true`), or in
//!   the geometric middle (`false`).

use num_complex::Complex;

use crate::error::{CoreError, Result};
use crate::matrix::{CMatrix, IMatrix};
use crate::{ComplexField, Float};

/// Geometry of the detector an [`Image`] was recorded on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Detector<T: Float> {
    /// `(row, col)` pixel coordinate of the beam center.
    pub image_center: [T; 2],
    pub pixel_size: T,
    pub detector_distance: T,
    /// Wavelength.
    pub lambda: T,
}

/// A complex image with a same-shaped integer mask.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T: Float> {
    pub phased: bool,
    pub scaled: bool,
    pub shifted: bool,
    image: CMatrix<T>,
    mask: IMatrix,
    detector: Detector<T>,
}

impl<T: Float> Image<T> {
    /// A `rows x cols` image of zero pixels with a zero mask, a default
    /// detector and every flag cleared.
    ///
    /// ```
    /// # use speckle_core::image::Image;
    /// let img = Image::<f64>::new(8, 8);
    /// assert_eq!(img.shape(), (8, 8));
    /// assert!(!img.shifted && !img.phased && !img.scaled);
    /// ```
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            phased: false,
            scaled: false,
            shifted: false,
            image: CMatrix::zeros(rows, cols),
            mask: IMatrix::zeros(rows, cols),
            detector: Detector::default(),
        }
    }

    /// Assemble an image from parts. Flags start cleared.
    pub fn from_parts(image: CMatrix<T>, mask: IMatrix, detector: Detector<T>) -> Result<Self> {
        if image.shape() != mask.shape() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![image.rows(), image.cols()],
                got: vec![mask.rows(), mask.cols()],
            });
        }
        Ok(Self {
            phased: false,
            scaled: false,
            shifted: false,
            image,
            mask,
            detector,
        })
    }

    /// Wrap a pixel matrix with a mask of ones, so every pixel is valid.
    pub fn from_matrix(image: CMatrix<T>) -> Self {
        let mut mask = IMatrix::zeros(image.rows(), image.cols());
        mask.fill(1);
        Self {
            phased: false,
            scaled: false,
            shifted: false,
            image,
            mask,
            detector: Detector::default(),
        }
    }

    /// Same flags and detector, new pixels. Shapes are the caller's contract.
    pub(crate) fn with_pixels(&self, image: CMatrix<T>) -> Self {
        debug_assert_eq!(image.shape(), self.mask.shape());
        Self {
            phased: self.phased,
            scaled: self.scaled,
            shifted: self.shifted,
            image,
            mask: self.mask.clone(),
            detector: self.detector,
        }
    }

    /// Split into `(pixels, mask, detector)`.
    pub fn into_parts(self) -> (CMatrix<T>, IMatrix, Detector<T>) {
        (self.image, self.mask, self.detector)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn rows(&self) -> usize {
        self.image.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.image.cols()
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.image.shape()
    }

    #[inline]
    pub fn image(&self) -> &CMatrix<T> {
        &self.image
    }

    /// Pixel storage in column-major order.
    #[inline]
    pub fn image_mut(&mut self) -> &mut [Complex<T>] {
        self.image.as_mut_slice()
    }

    #[inline]
    pub fn mask(&self) -> &IMatrix {
        &self.mask
    }

    /// Mask storage in column-major order.
    #[inline]
    pub fn mask_mut(&mut self) -> &mut [i32] {
        self.mask.as_mut_slice()
    }

    #[inline]
    pub fn detector(&self) -> &Detector<T> {
        &self.detector
    }

    #[inline]
    pub fn detector_mut(&mut self) -> &mut Detector<T> {
        &mut self.detector
    }

    /// Overwrite pixel `(row, col)`.
    #[inline]
    pub fn set_pixel(&mut self, row: usize, col: usize, z: Complex<T>) {
        self.image.set_at(row, col, z);
    }

    /// Overwrite mask entry `(row, col)`.
    #[inline]
    pub fn set_mask_at(&mut self, row: usize, col: usize, v: i32) {
        self.mask.set_at(row, col, v);
    }

    /// Replace the pixel matrix. Fails if the shape differs from the mask's.
    pub fn set_image(&mut self, image: CMatrix<T>) -> Result<()> {
        self.mask.check_same_shape_as(&image)?;
        self.image = image;
        Ok(())
    }

    /// Replace the mask. Fails if the shape differs from the image's.
    pub fn set_mask(&mut self, mask: IMatrix) -> Result<()> {
        self.image.check_same_shape_as(&mask)?;
        self.mask = mask;
        Ok(())
    }

    /// Resize pixels and mask together; both become all-zero.
    pub fn realloc(&mut self, rows: usize, cols: usize) {
        self.image.realloc(rows, cols);
        self.mask.realloc(rows, cols);
    }

    // ------------------------------------------------------------------
    // Representation changes
    // ------------------------------------------------------------------

    /// Drop the phase: every pixel becomes its magnitude.
    pub fn dephase(&mut self) {
        self.image.to_real_in_place();
        self.phased = false;
    }

    /// Convert amplitudes to intensities by squaring magnitudes.
    ///
    /// Intensity images (`scaled == false`) are left as they are. The
    /// result carries no phase.
    pub fn to_intensities(&mut self) {
        if self.scaled {
            self.image.apply(|z| Complex::new(z.modulus_sqr(), T::zero()));
        } else if self.phased {
            self.image.to_real_in_place();
        }
        self.scaled = false;
        self.phased = false;
    }

    /// Convert intensities to amplitudes by taking square roots of magnitudes.
    ///
    /// Amplitude images (`scaled == true`) are only dephased.
    pub fn to_amplitudes(&mut self) {
        if self.scaled {
            self.image.to_real_in_place();
        } else {
            self.image.apply(|z| Complex::new(z.modulus().sqrt(), T::zero()));
        }
        self.scaled = true;
        self.phased = false;
    }

    /// Physically move the origin between corner and middle.
    ///
    /// A shifted image gets an `fftshift`, an unshifted one an `ifftshift`.
    /// Pixels and mask move together, `shifted` toggles and the detector's
    /// `image_center` follows the data.
    ///
    /// ```
    /// # use speckle_core::image::Image;
    /// # use num_complex::Complex;
    /// let mut img = Image::<f64>::new(4, 4);
    /// img.set_pixel(2, 2, Complex::new(1.0, 0.0));
    /// img.shift();
    /// assert!(img.shifted);
    /// assert_eq!(img.image().at(0, 0), Complex::new(1.0, 0.0));
    /// ```
    pub fn shift(&mut self) {
        let (rows, cols) = self.shape();
        if rows == 0 || cols == 0 {
            self.shifted = !self.shifted;
            return;
        }
        let (dr, dc) = if self.shifted {
            (rows / 2, cols / 2)
        } else {
            (rows - rows / 2, cols - cols / 2)
        };
        self.image.roll(dr, dc);
        self.mask.roll(dr, dc);

        let wrap = |c: T, d: usize, n: usize| {
            let n = T::from_usize(n);
            ((c + T::from_usize(d)) % n + n) % n
        };
        let [cy, cx] = self.detector.image_center;
        self.detector.image_center = [wrap(cy, dr, rows), wrap(cx, dc, cols)];
        self.shifted = !self.shifted;
    }

    /// Sum of the mask, the number of valid pixels for a 0/1 mask.
    pub fn valid_pixels(&self) -> i64 {
        self.mask.iter().map(|&m| i64::from(m)).sum()
    }
}
