// BLAS-style signatures carry many positional parameters by design of the API.
// Numeric kernels use index loops on packed arrays where iterators hurt readability.
#![allow(clippy::too_many_arguments, clippy::needless_range_loop)]

//! # Multigrid BLAS
//!
//! The vector and matrix-multiply kernels used by the multigrid solvers.
//!
//! ## Levels
//!
//! - **Level 1** (vector-vector): `dot_prod`, `axpy`, `axpy_self`, `nrm2`
//! - **Level 3** (matrix-matrix): `gemm` (fixed operand layouts, unchecked),
//!   `matmul` (checked, any layout)
//!
//! All kernels are generic over [`Scalar`], so each is written once and
//! instantiated for `f32`, `f64`, `Complex<f32>` and `Complex<f64>`.
//!
//! ## Memory Layout
//!
//! `gemm` fixes its operands: `A` row-major, `B` column-major. The output
//! layout is selected per call.
//!
//! ```
//! use multigrid_blas::{level1, level3, Layout, Transpose};
//!
//! let x = [1.0f64, 2.0, 3.0];
//! let y = [4.0f64, 5.0, 6.0];
//! assert_eq!(level1::dot_prod(&x, &y, 3), 32.0);
//!
//! // A = [[1,2],[3,4]] row-major, B = [[5,6],[7,8]] column-major
//! let a = [1.0f64, 2.0, 3.0, 4.0];
//! let b = [5.0f64, 7.0, 6.0, 8.0];
//! let mut s = [0.0f64; 4];
//! level3::gemm(&a, 2, 2, Transpose::NoTrans, &b, 2, 2, Transpose::NoTrans,
//!              &mut s, 2, 2, Layout::RowMajor);
//! assert_eq!(s, [19.0, 22.0, 43.0, 50.0]);
//! ```

pub mod level1;
pub mod level3;

// Re-export core types for convenience
pub use multigrid_core::{Layout, LinalgError, MatMut, MatRef, Result, Scalar, Transpose};

pub use level1::{axpy, axpy_self, dot_prod, nrm2};
pub use level3::{gemm, matmul};
