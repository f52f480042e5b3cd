//! Minimum-norm least squares: `svd_solve` and `lstsq`.
//!
//! `svd_solve` keeps the raw-buffer contract of the multigrid kernels: `A`
//! (`a_rows x a_cols`, column-major, `lda = a_rows`) and `B` (column-major,
//! `ldb = max(a_rows, a_cols)`, overwritten with the solution). The rank
//! cutoff is fixed at LAPACK's default (`RCOND = -1`, machine precision).
//!
//! A non-zero backend status is logged and returned as a [`LinalgError`];
//! the buffers are then in an unspecified, partially overwritten state.
//!
//! `lstsq` is the allocating convenience layer over matrix views.

use crate::backend::{gelss_routine, DefaultGelss, DenseSolver};
use multigrid_core::{Layout, LinalgError, MatRef, RealScalar, Result};

/// Result of a successful [`svd_solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvdSolveInfo {
    /// Effective rank of `A`.
    pub rank: usize,
}

/// `svd_solve` through an explicit backend.
///
/// - `a`: `a_rows x a_cols`, column-major. Overwritten.
/// - `b`: `b_cols` right-hand sides, column-major with leading dimension
///   `max(a_rows, a_cols)`. The first `a_cols` rows of each column receive
///   the solution.
/// - `s`: at least `min(a_rows, a_cols)`; receives the singular values, descending.
/// - `work`: workspace, at least [`gelss_work_len`](crate::gelss_work_len).
///
/// Buffer sizes are checked by the backend and reported as
/// [`LinalgError::IllegalArgument`].
pub fn svd_solve_with<T, S>(
    solver: &S,
    a: &mut [T],
    a_rows: usize,
    a_cols: usize,
    b: &mut [T],
    b_cols: usize,
    s: &mut [T],
    work: &mut [T],
) -> Result<SvdSolveInfo>
where
    T: RealScalar,
    S: DenseSolver<T> + ?Sized,
{
    let routine = gelss_routine::<T>();
    let lda = a_rows.max(1);
    let ldb = a_rows.max(a_cols).max(1);
    // Negative RCOND: machine precision decides which singular values are zero.
    let rcond = -T::one();

    let outcome = solver.gelss(a_rows, a_cols, b_cols, a, lda, b, ldb, s, rcond, work);
    if outcome.info != 0 {
        log::warn!(
            "svd_solve failed with {} giving flag: {}",
            routine,
            outcome.info
        );
    }
    LinalgError::from_info(routine, outcome.info)?;
    Ok(SvdSolveInfo { rank: outcome.rank })
}

/// Minimum-norm least-squares solve of `A * X = B` via SVD, default backend.
///
/// See [`svd_solve_with`] for the buffer contract.
pub fn svd_solve<T: RealScalar>(
    a: &mut [T],
    a_rows: usize,
    a_cols: usize,
    b: &mut [T],
    b_cols: usize,
    s: &mut [T],
    work: &mut [T],
) -> Result<SvdSolveInfo>
where
    DefaultGelss: DenseSolver<T>,
{
    svd_solve_with(&DefaultGelss::default(), a, a_rows, a_cols, b, b_cols, s, work)
}

/// Single-precision [`svd_solve`].
pub fn ssvd_solve(
    a: &mut [f32],
    a_rows: usize,
    a_cols: usize,
    b: &mut [f32],
    b_cols: usize,
    s: &mut [f32],
    work: &mut [f32],
) -> Result<SvdSolveInfo> {
    svd_solve(a, a_rows, a_cols, b, b_cols, s, work)
}

/// Double-precision [`svd_solve`].
pub fn dsvd_solve(
    a: &mut [f64],
    a_rows: usize,
    a_cols: usize,
    b: &mut [f64],
    b_cols: usize,
    s: &mut [f64],
    work: &mut [f64],
) -> Result<SvdSolveInfo> {
    svd_solve(a, a_rows, a_cols, b, b_cols, s, work)
}

// ============================================================================
// LSTSQ: allocating wrapper over views
// ============================================================================

/// Owned result of [`lstsq`].
#[derive(Debug, Clone, PartialEq)]
pub struct LstsqSolution<T> {
    /// Solution, `cols x nrhs`, column-major.
    pub x: Vec<T>,
    /// Rows of `x` (columns of `A`).
    pub cols: usize,
    /// Columns of `x` (right-hand sides).
    pub nrhs: usize,
    /// Singular values of `A`, descending.
    pub singular_values: Vec<T>,
    /// Effective rank of `A`.
    pub rank: usize,
}

impl<T: Copy> LstsqSolution<T> {
    /// Solution entry `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.x[Layout::ColMajor.index(i, j, self.cols)]
    }

    /// Solution as a column-major view.
    pub fn view(&self) -> Result<MatRef<'_, T>> {
        MatRef::new(&self.x, self.cols, self.nrhs, Layout::ColMajor)
    }
}

/// Minimum-norm least-squares solution of `A * X = B` for views of any layout.
pub fn lstsq<T: RealScalar>(a: &MatRef<'_, T>, b: &MatRef<'_, T>) -> Result<LstsqSolution<T>>
where
    DefaultGelss: DenseSolver<T>,
{
    lstsq_with(&DefaultGelss::default(), a, b)
}

/// [`lstsq`] through an explicit backend.
pub fn lstsq_with<T, S>(
    solver: &S,
    a: &MatRef<'_, T>,
    b: &MatRef<'_, T>,
) -> Result<LstsqSolution<T>>
where
    T: RealScalar,
    S: DenseSolver<T> + ?Sized,
{
    let (m, n, nrhs) = (a.rows(), a.cols(), b.cols());
    if b.rows() != m {
        return Err(LinalgError::mismatch(format!(
            "A has {} rows but B has {}",
            m,
            b.rows()
        )));
    }

    let mut a_cm = a.to_packed(Layout::ColMajor);
    let ldb = m.max(n).max(1);
    let mut b_cm = vec![T::zero(); ldb * nrhs];
    for j in 0..nrhs {
        for i in 0..m {
            b_cm[j * ldb + i] = b.get(i, j);
        }
    }
    let mut s = vec![T::zero(); m.min(n)];
    let mut work = vec![T::zero(); solver.work_len(m, n, nrhs)];

    let info = svd_solve_with(solver, &mut a_cm, m, n, &mut b_cm, nrhs, &mut s, &mut work)?;

    let mut x = Vec::with_capacity(n * nrhs);
    for j in 0..nrhs {
        x.extend_from_slice(&b_cm[j * ldb..j * ldb + n]);
    }
    Ok(LstsqSolution {
        x,
        cols: n,
        nrhs,
        singular_values: s,
        rank: info.rank,
    })
}
