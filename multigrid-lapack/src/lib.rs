// LAPACK routines keep the positional parameter lists of the reference API.
// Numeric kernels use index loops for clarity.
#![allow(clippy::too_many_arguments, clippy::needless_range_loop)]

//! # Multigrid LAPACK
//!
//! SVD-based minimum-norm least squares for the multigrid solvers.
//!
//! - **`svd_solve`** (`ssvd_solve` / `dsvd_solve`): the `xGELSS` contract on
//!   raw column-major buffers, with failures returned as [`LinalgError`].
//! - **`lstsq`**: allocating wrapper over matrix views of any layout.
//! - **[`DenseSolver`]**: the backend seam. [`NativeGelss`] is a pure-Rust
//!   one-sided Jacobi SVD; `LapackGelss` (`--features lapack`) calls the
//!   system `sgelss_` / `dgelss_`.
//!
//! ```
//! use multigrid_lapack::{dsvd_solve, gelss_work_len};
//!
//! // Overdetermined: A = [1, 1, 1]^T, b = [1, 2, 3] -> x = 2
//! let mut a = [1.0f64; 3];
//! let mut b = [1.0f64, 2.0, 3.0];
//! let mut s = [0.0f64; 1];
//! let mut work = vec![0.0f64; gelss_work_len(3, 1, 1)];
//! let info = dsvd_solve(&mut a, 3, 1, &mut b, 1, &mut s, &mut work).unwrap();
//! assert_eq!(info.rank, 1);
//! assert!((b[0] - 2.0).abs() < 1e-12);
//! ```

pub mod backend;
pub mod gelss;
mod jacobi;

pub use backend::{
    gelss_routine, gelss_work_len, DefaultGelss, DenseSolver, GelssOutcome, NativeGelss,
};
#[cfg(feature = "lapack")]
pub use backend::LapackGelss;
pub use gelss::{
    dsvd_solve, lstsq, lstsq_with, ssvd_solve, svd_solve, svd_solve_with, LstsqSolution,
    SvdSolveInfo,
};

pub use multigrid_core::{LinalgError, RealScalar, Result};
