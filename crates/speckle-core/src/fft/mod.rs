//! Two-dimensional Fourier transforms of complex matrices and images.
//!
//! The engine is [`rustfft`]. An [`FftContext`] is built once from an
//! [`FftConfig`] and owns the worker pool (if more than one thread was
//! requested); [`FftPlan`]s are created through it for one shape and may be
//! reused for every matrix of that shape.
//!
//! Transforms are unnormalized in both directions, so
//! `ifft(fft(x)) == rows * cols * x`. Use [`normalize`] to divide out the
//! factor.
//!
//! # Examples
//!
//! ```
//! use num_complex::Complex;
//! use speckle_core::fft::{FftConfig, FftContext};
//! use speckle_core::matrix::CMatrix;
//!
//! let ctx = FftContext::new(FftConfig::default()).unwrap();
//! let mut m = CMatrix::<f64>::zeros(4, 4);
//! m.fill(Complex::new(1.0, 0.0));
//! let spectrum = ctx.fft(&m).unwrap();
//! // all the energy lands in the DC bin
//! assert!((spectrum.at(0, 0) - Complex::new(16.0, 0.0)).norm() < 1e-12);
//! ```

mod image;

use core::fmt;
use std::sync::Arc;

use num_complex::Complex;
use rayon::prelude::*;
use rustfft::{Fft, FftNum, FftPlanner};
use tracing::{debug, trace};

use crate::error::{CoreError, Result};
use crate::matrix::{CMatrix, Matrix};
use crate::{Float, Scalar};

/// Transform direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

/// Runtime configuration of the transform engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FftConfig {
    /// Worker threads used inside one transform. Must be at least 1.
    pub threads: usize,
}

impl Default for FftConfig {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

/// Handle to the transform engine.
///
/// With `threads > 1` the context owns a dedicated rayon pool; otherwise
/// every transform runs on the calling thread.
#[derive(Debug)]
pub struct FftContext {
    threads: usize,
    pool: Option<rayon::ThreadPool>,
}

/// Precomputed forward and inverse plans for one `rows x cols` shape.
#[derive(Clone)]
pub struct FftPlan<T: FftNum> {
    rows: usize,
    cols: usize,
    // columns have length `rows`, rows have length `cols`
    col_forward: Arc<dyn Fft<T>>,
    col_inverse: Arc<dyn Fft<T>>,
    row_forward: Arc<dyn Fft<T>>,
    row_inverse: Arc<dyn Fft<T>>,
}

impl<T: FftNum> FftPlan<T> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)` of the matrices this plan transforms.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn axes(&self, direction: Direction) -> (&Arc<dyn Fft<T>>, &Arc<dyn Fft<T>>) {
        match direction {
            Direction::Forward => (&self.col_forward, &self.row_forward),
            Direction::Inverse => (&self.col_inverse, &self.row_inverse),
        }
    }
}

impl<T: FftNum> fmt::Debug for FftPlan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftPlan")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish_non_exhaustive()
    }
}

impl FftContext {
    /// Build a context. Fails with [`CoreError::InvalidArgument`] for zero
    /// threads and [`CoreError::PlanFailure`] if the worker pool cannot be
    /// started.
    pub fn new(config: FftConfig) -> Result<Self> {
        if config.threads == 0 {
            return Err(CoreError::InvalidArgument {
                reason: "fft: thread count must be at least 1",
            });
        }
        let pool = if config.threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .build()
                .map_err(|e| CoreError::PlanFailure {
                    reason: format!("cannot start {} worker threads: {e}", config.threads),
                })?;
            Some(pool)
        } else {
            None
        };
        debug!(threads = config.threads, "fft context created");
        Ok(Self {
            threads: config.threads,
            pool,
        })
    }

    /// Worker threads used per transform.
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Plan transforms of `rows x cols` matrices.
    ///
    /// Any positive shape is accepted; a zero dimension is a
    /// [`CoreError::PlanFailure`].
    pub fn plan<T: Float + FftNum>(&self, rows: usize, cols: usize) -> Result<FftPlan<T>> {
        if rows == 0 || cols == 0 {
            return Err(CoreError::PlanFailure {
                reason: format!("zero-sized transform {rows}x{cols}"),
            });
        }
        let mut planner = FftPlanner::<T>::new();
        let plan = FftPlan {
            rows,
            cols,
            col_forward: planner.plan_fft_forward(rows),
            col_inverse: planner.plan_fft_inverse(rows),
            row_forward: planner.plan_fft_forward(cols),
            row_inverse: planner.plan_fft_inverse(cols),
        };
        debug!(rows, cols, threads = self.threads, "fft plan created");
        Ok(plan)
    }

    /// Transform `data` in place with a plan made for its shape.
    pub fn execute<T: Float + FftNum>(
        &self,
        plan: &FftPlan<T>,
        data: &mut CMatrix<T>,
        direction: Direction,
    ) -> Result<()> {
        if data.shape() != plan.shape() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![plan.rows, plan.cols],
                got: vec![data.rows(), data.cols()],
            });
        }
        trace!(?direction, rows = plan.rows, cols = plan.cols, "fft execute");
        let (col_fft, row_fft) = plan.axes(direction);
        self.transform_columns(data, col_fft);
        self.transform_rows(data, row_fft);
        Ok(())
    }

    /// Forward transform into a new matrix, with a temporary plan.
    pub fn fft<T: Float + FftNum>(&self, m: &CMatrix<T>) -> Result<CMatrix<T>> {
        self.transformed(m, Direction::Forward)
    }

    /// Inverse transform into a new matrix, with a temporary plan.
    pub fn ifft<T: Float + FftNum>(&self, m: &CMatrix<T>) -> Result<CMatrix<T>> {
        self.transformed(m, Direction::Inverse)
    }

    fn transformed<T: Float + FftNum>(&self, m: &CMatrix<T>, direction: Direction) -> Result<CMatrix<T>> {
        let plan = self.plan(m.rows(), m.cols())?;
        let mut out = m.clone();
        self.execute(&plan, &mut out, direction)?;
        Ok(out)
    }

    /// Forward transform of real data, keeping the non-redundant half
    /// spectrum: a `(rows/2 + 1) x cols` complex matrix.
    ///
    /// ```
    /// # use speckle_core::fft::{FftConfig, FftContext};
    /// # use speckle_core::matrix::Matrix;
    /// let ctx = FftContext::new(FftConfig::default()).unwrap();
    /// let half = ctx.fft_real(&Matrix::<f64>::zeros(8, 5)).unwrap();
    /// assert_eq!(half.shape(), (5, 5));
    /// ```
    pub fn fft_real<T: Float + FftNum>(&self, m: &Matrix<T>) -> Result<CMatrix<T>> {
        let plan = self.plan::<T>(m.rows(), m.cols())?;
        let half_rows = m.rows() / 2 + 1;
        let mut half = self.real_columns_forward(m, &plan.col_forward, half_rows)?;
        self.transform_rows(&mut half, &plan.row_forward);
        trace!(rows = m.rows(), cols = m.cols(), half_rows, "fft real");
        Ok(half)
    }

    /// Forward column pass of real data, keeping the first `half_rows` bins.
    ///
    /// Columns `2p` and `2p+1` travel together as the real and imaginary
    /// parts of one complex column; conjugate symmetry separates them again
    /// afterwards.
    fn real_columns_forward<T: Float + FftNum>(
        &self,
        m: &Matrix<T>,
        fft: &Arc<dyn Fft<T>>,
        half_rows: usize,
    ) -> Result<CMatrix<T>> {
        let (rows, cols) = m.shape();
        let src = m.as_slice();
        let pairs = cols.div_ceil(2);

        let mut packed: Vec<Complex<T>> = Vec::with_capacity(pairs * rows);
        for p in 0..pairs {
            let re = &src[2 * p * rows..(2 * p + 1) * rows];
            match src.get((2 * p + 1) * rows..(2 * p + 2) * rows) {
                Some(im) => packed.extend(re.iter().zip(im).map(|(&a, &b)| Complex::new(a, b))),
                None => packed.extend(re.iter().map(|&a| Complex::new(a, T::zero()))),
            }
        }
        let mut packed = CMatrix::from_vec(rows, pairs, packed)?;
        self.transform_columns(&mut packed, fft);

        let half = T::one() / (T::one() + T::one());
        let mut out = CMatrix::zeros(half_rows, cols);
        for (p, z) in packed.as_slice().chunks_exact(rows).enumerate() {
            for k in 0..half_rows {
                let zk = z[k];
                let mirror = z[(rows - k) % rows].conj();
                out.set_at(k, 2 * p, (zk + mirror) * half);
                if 2 * p + 1 < cols {
                    // (zk - mirror) / 2i
                    let d = (zk - mirror) * half;
                    out.set_at(k, 2 * p + 1, Complex::new(d.im, -d.re));
                }
            }
        }
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Axis passes
    // ------------------------------------------------------------------

    /// Transform every column; columns are contiguous in storage.
    fn transform_columns<T: Float + FftNum>(&self, data: &mut CMatrix<T>, fft: &Arc<dyn Fft<T>>) {
        let len = data.rows();
        let buffer = data.as_mut_slice();
        if buffer.is_empty() {
            return;
        }
        let scratch_len = fft.get_inplace_scratch_len();
        match &self.pool {
            Some(pool) => pool.install(|| {
                buffer.par_chunks_mut(len).for_each_init(
                    || vec![Complex::new(T::zero(), T::zero()); scratch_len],
                    |scratch, column| fft.process_with_scratch(column, scratch),
                );
            }),
            None => {
                let mut scratch = vec![Complex::new(T::zero(), T::zero()); scratch_len];
                fft.process_with_scratch(buffer, &mut scratch);
            }
        }
    }

    /// Transform every row through a transposed scratch copy.
    fn transform_rows<T: Float + FftNum>(&self, data: &mut CMatrix<T>, fft: &Arc<dyn Fft<T>>) {
        data.transpose();
        self.transform_columns(data, fft);
        data.transpose();
    }
}

/// Divide every element by `rows * cols`, undoing the scale of a
/// forward+inverse pair.
pub fn normalize<T: Float>(m: &mut CMatrix<T>) {
    if m.is_empty() {
        return;
    }
    let k = T::one() / <T as Scalar>::from_usize(m.size());
    m.apply(|z| z * k);
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const TOL: f64 = 1e-9;

    fn ctx(threads: usize) -> FftContext {
        FftContext::new(FftConfig { threads }).unwrap()
    }

    fn random(rng: &mut StdRng, rows: usize, cols: usize) -> CMatrix<f64> {
        CMatrix::from_fn(rows, cols, |_, _| {
            Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
        })
    }

    /// Reference 2-D DFT straight from the definition.
    fn naive_dft(m: &CMatrix<f64>) -> CMatrix<f64> {
        let (rows, cols) = m.shape();
        CMatrix::from_fn(rows, cols, |k, l| {
            let mut acc = Complex::new(0.0, 0.0);
            for r in 0..rows {
                for c in 0..cols {
                    let phase = -2.0
                        * std::f64::consts::PI
                        * ((k * r) as f64 / rows as f64 + (l * c) as f64 / cols as f64);
                    acc += m.at(r, c) * Complex::new(phase.cos(), phase.sin());
                }
            }
            acc
        })
    }

    fn max_diff(a: &CMatrix<f64>, b: &CMatrix<f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).norm())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(matches!(
            FftContext::new(FftConfig { threads: 0 }),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert_eq!(ctx(3).threads(), 3);
    }

    #[test]
    fn test_zero_shape_plan_fails() {
        let c = ctx(1);
        assert!(matches!(c.plan::<f64>(0, 4), Err(CoreError::PlanFailure { .. })));
        assert!(matches!(c.plan::<f32>(4, 0), Err(CoreError::PlanFailure { .. })));
    }

    #[test]
    fn test_plan_shape_mismatch() {
        let c = ctx(1);
        let plan = c.plan::<f64>(4, 4).unwrap();
        let mut m = CMatrix::<f64>::zeros(4, 5);
        assert!(matches!(
            c.execute(&plan, &mut m, Direction::Forward),
            Err(CoreError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_matches_definition_odd_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let m = random(&mut rng, 5, 3);
        let got = ctx(1).fft(&m).unwrap();
        assert!(max_diff(&got, &naive_dft(&m)) < TOL);
    }

    #[test]
    fn test_roundtrip_scales_by_size() {
        let mut rng = StdRng::seed_from_u64(9);
        let c = ctx(1);
        for (rows, cols) in [(1, 1), (8, 8), (6, 10), (7, 3)] {
            let m = random(&mut rng, rows, cols);
            let back = c.ifft(&c.fft(&m).unwrap()).unwrap();
            let mut scaled = m.clone();
            scaled.scale(Complex::new((rows * cols) as f64, 0.0));
            assert!(max_diff(&back, &scaled) < TOL * (rows * cols) as f64);

            let mut normalized = back;
            normalize(&mut normalized);
            assert!(max_diff(&normalized, &m) < TOL);
        }
    }

    #[test]
    fn test_plan_reuse() {
        let mut rng = StdRng::seed_from_u64(1);
        let c = ctx(1);
        let plan = c.plan::<f64>(4, 6).unwrap();
        for _ in 0..3 {
            let m = random(&mut rng, 4, 6);
            let mut a = m.clone();
            c.execute(&plan, &mut a, Direction::Forward).unwrap();
            assert!(max_diff(&a, &c.fft(&m).unwrap()) < TOL);
        }
    }

    #[test]
    fn test_threaded_equals_single_threaded() {
        let mut rng = StdRng::seed_from_u64(21);
        let m = random(&mut rng, 16, 12);
        let single = ctx(1).fft(&m).unwrap();
        let threaded = ctx(4).fft(&m).unwrap();
        assert_eq!(single, threaded);
        assert_eq!(ctx(1).ifft(&m).unwrap(), ctx(3).ifft(&m).unwrap());
    }

    #[test]
    fn test_dc_value() {
        let mut m = CMatrix::<f32>::zeros(3, 4);
        m.fill(Complex::new(2.0, -1.0));
        let s = ctx(1).fft(&m).unwrap();
        assert!((s.at(0, 0) - Complex::new(24.0, -12.0)).norm() < 1e-4);
        assert!(s.iter().skip(1).all(|z| z.norm() < 1e-4));
    }

    #[test]
    fn test_fft_real_is_half_of_complex_spectrum() {
        let mut rng = StdRng::seed_from_u64(13);
        let real = Matrix::from_fn(7, 4, |_, _| rng.random_range(-1.0..1.0));
        let c = ctx(1);
        let half = c.fft_real(&real).unwrap();
        let full = c.fft(&real.to_complex()).unwrap();
        assert_eq!(half.shape(), (4, 4));
        for col in 0..4 {
            for row in 0..4 {
                assert!((half.at(row, col) - full.at(row, col)).norm() < TOL);
            }
        }
    }

    #[test]
    fn test_fft_real_odd_columns_threaded() {
        let mut rng = StdRng::seed_from_u64(29);
        for (rows, cols) in [(6, 5), (1, 3), (9, 1), (4, 2)] {
            let real = Matrix::from_fn(rows, cols, |_, _| rng.random_range(-1.0..1.0));
            let expected = naive_dft(&real.to_complex());
            for threads in [1, 3] {
                let half = ctx(threads).fft_real(&real).unwrap();
                assert_eq!(half.shape(), (rows / 2 + 1, cols));
                for col in 0..cols {
                    for row in 0..half.rows() {
                        assert!((half.at(row, col) - expected.at(row, col)).norm() < TOL);
                    }
                }
            }
        }
    }

    #[test]
    fn test_normalize_empty_is_noop() {
        let mut m = CMatrix::<f64>::zeros(0, 0);
        normalize(&mut m);
        assert!(m.is_empty());
    }
}
