use core::fmt;

/// All errors returned by `speckle-core`.
///
/// Hot-path kernels do not return errors; only their `*_checked` siblings,
/// inversion, and transform setup do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Operand shapes do not match the required layout.
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// A requested shape is invalid for the supplied data.
    InvalidShape {
        shape: Vec<usize>,
        reason: &'static str,
    },

    /// A `(row, col)` or flat index lies outside the container.
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// Matrix is singular (or numerically degenerate) and cannot be inverted.
    SingularMatrix,

    /// The operation is not supported for the given input.
    InvalidArgument { reason: &'static str },

    /// The transform engine could not build a plan or its worker pool.
    PlanFailure { reason: String },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {expected:?}, got {got:?}")
            }
            Self::InvalidShape { shape, reason } => {
                write!(f, "invalid shape {shape:?}: {reason}")
            }
            Self::IndexOutOfBounds { index, shape } => {
                write!(f, "index {index:?} out of bounds for shape {shape:?}")
            }
            Self::SingularMatrix => write!(f, "singular matrix"),
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::PlanFailure { reason } => write!(f, "fft plan failure: {reason}"),
        }
    }
}

impl std::error::Error for CoreError {}

/// Convenience alias used throughout `speckle-core`.
pub type Result<T> = std::result::Result<T, CoreError>;
