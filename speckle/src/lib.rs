//! # Speckle
//!
//! Numeric substrate for 2-D coherent-imaging data: dense real, complex and
//! integer containers, their kernels, an image model with mask and detector
//! geometry, and a 2-D Fourier-transform layer.
//!
//! One `use speckle::prelude::*;` brings in the containers, the image model
//! and the transform engine.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Containers, kernels, `Image`, FFT layer |
//! | `single-precision` | `precision::Real = f32` instead of `f64` |

#[cfg(feature = "core")]
pub use speckle_core as core;

#[cfg(feature = "core")]
pub use speckle_core::precision;

/// Glob-import convenience: `use speckle::prelude::*;`
#[cfg(feature = "core")]
pub mod prelude {
    pub use speckle_core::prelude::*;
}
