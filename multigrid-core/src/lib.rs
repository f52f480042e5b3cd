//! # Multigrid Core
//!
//! Shared building blocks for the multigrid dense kernels.
//!
//! This crate provides:
//! - **Scalar abstraction**: one capability set (`conjugate`, `real`, `imag`,
//!   `norm`, `norm_squared`) over `f32`, `f64`, `Complex<f32>` and `Complex<f64>`,
//!   so kernels are written once and monomorphized per kind.
//! - **CBLAS layout types**: row-major / column-major and transpose tags.
//! - **Matrix views**: borrowed buffers tagged with shape, layout and leading
//!   dimension.
//! - **Errors**: `LinalgError`, including conversion of LAPACK `INFO` codes.

pub mod error;
pub mod layout;
pub mod scalar;
pub mod view;

// Fortran LAPACK bindings (only compiled when --features lapack is enabled)
#[cfg(feature = "lapack")]
pub mod lapack_ffi;

pub use error::{LinalgError, Result};
pub use layout::{Layout, Transpose};
pub use scalar::{conjugate, imag, norm, norm_squared, real, RealScalar, Scalar};
pub use view::{MatMut, MatRef};

pub use num_complex::{Complex, Complex32, Complex64};
pub use num_traits::{Float, Zero};
