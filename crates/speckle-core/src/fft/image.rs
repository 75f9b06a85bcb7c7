//! Image-level transforms: pixels change, flags and geometry follow.

use rustfft::FftNum;

use crate::error::Result;
use crate::image::Image;
use crate::{Float, Scalar};

use super::{Direction, FftContext, FftPlan};

impl FftContext {
    /// Forward transform of an image into a new image.
    ///
    /// The mask is copied unchanged, `shifted` is negated, `phased` is set
    /// and `detector.image_center` moves to the geometric middle
    /// `((rows-1)/2, (cols-1)/2)`. The input is not modified.
    ///
    /// ```
    /// # use speckle_core::fft::{FftConfig, FftContext};
    /// # use speckle_core::image::Image;
    /// let ctx = FftContext::new(FftConfig::default()).unwrap();
    /// let img = Image::<f64>::new(8, 8);
    /// let spectrum = ctx.fft_image(&img).unwrap();
    /// assert!(spectrum.shifted && spectrum.phased);
    /// assert_eq!(spectrum.detector().image_center, [3.5, 3.5]);
    /// ```
    pub fn fft_image<T: Float + FftNum>(&self, img: &Image<T>) -> Result<Image<T>> {
        let plan = self.plan(img.rows(), img.cols())?;
        self.transform_image(&plan, img, Direction::Forward)
    }

    /// Inverse transform of an image into a new image.
    ///
    /// The mask and detector are copied unchanged, `shifted` is negated and
    /// `phased` is set. Pixels come back scaled by `rows * cols`.
    pub fn ifft_image<T: Float + FftNum>(&self, img: &Image<T>) -> Result<Image<T>> {
        let plan = self.plan(img.rows(), img.cols())?;
        self.transform_image(&plan, img, Direction::Inverse)
    }

    /// Image transform with a caller-owned plan.
    pub fn transform_image<T: Float + FftNum>(
        &self,
        plan: &FftPlan<T>,
        img: &Image<T>,
        direction: Direction,
    ) -> Result<Image<T>> {
        let mut pixels = img.image().clone();
        self.execute(plan, &mut pixels, direction)?;

        let mut out = img.with_pixels(pixels);
        out.shifted = !img.shifted;
        out.phased = true;
        if direction == Direction::Forward {
            let half = |n: usize| <T as Scalar>::from_usize(n - 1) / (T::one() + T::one());
            out.detector_mut().image_center = [half(img.rows()), half(img.cols())];
        }
        Ok(out)
    }
}
