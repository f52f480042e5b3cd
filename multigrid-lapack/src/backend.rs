//! Dense least-squares backends.
//!
//! [`DenseSolver`] is the seam between `svd_solve` and whatever computes the
//! SVD. It exposes the classical `xGELSS` contract: column-major `A` and `B`,
//! `B` overwritten in place with the solution, integer `INFO` status.
//!
//! - [`NativeGelss`]: pure Rust, one-sided Jacobi SVD. Always available.
//! - [`LapackGelss`]: system LAPACK through FFI (`--features lapack`).
//!
//! [`DefaultGelss`] is `LapackGelss` when the feature is enabled, otherwise
//! `NativeGelss`.

use crate::jacobi::{column_norm, one_sided_jacobi, MAX_SWEEPS};
use multigrid_core::RealScalar;
use num_traits::NumCast;
use std::cmp::Ordering;

/// Status returned by a [`DenseSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GelssOutcome {
    /// Effective rank: singular values above the cutoff.
    pub rank: usize,
    /// LAPACK `INFO`: 0 success, `-i` illegal argument `i`, `> 0` no convergence.
    pub info: i32,
}

impl GelssOutcome {
    fn illegal(index: i32) -> Self {
        Self {
            rank: 0,
            info: -index,
        }
    }
}

/// LAPACK name of the `gelss` routine for `T`.
pub fn gelss_routine<T: RealScalar>() -> &'static str {
    match T::PREFIX {
        "s" => "sgelss",
        _ => "dgelss",
    }
}

/// Minimum workspace length `xGELSS` accepts for an m x n problem with
/// `nrhs` right-hand sides.
pub fn gelss_work_len(m: usize, n: usize, nrhs: usize) -> usize {
    let min_mn = m.min(n);
    let max_mn = m.max(n);
    (3 * min_mn + (2 * min_mn).max(max_mn).max(nrhs)).max(1)
}

/// Minimum-norm least-squares solve, `xGELSS` calling convention.
///
/// `a` is m x n column-major with leading dimension `lda`; `b` holds `nrhs`
/// right-hand sides column-major with leading dimension `ldb >= max(m, n)`.
/// On success the first n rows of each column of `b` hold the solution and
/// `s[..min(m, n)]` the singular values in descending order. `rcond < 0`
/// selects machine precision as the relative rank cutoff. `work.len()` is
/// the workspace length (`LWORK`).
///
/// Outputs are unspecified when `info != 0`.
pub trait DenseSolver<T: RealScalar> {
    fn gelss(
        &self,
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
        s: &mut [T],
        rcond: T,
        work: &mut [T],
    ) -> GelssOutcome;

    /// Workspace length to allocate for this backend.
    fn work_len(&self, m: usize, n: usize, nrhs: usize) -> usize {
        gelss_work_len(m, n, nrhs)
    }
}

impl<T: RealScalar, S: DenseSolver<T> + ?Sized> DenseSolver<T> for &S {
    fn gelss(
        &self,
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
        s: &mut [T],
        rcond: T,
        work: &mut [T],
    ) -> GelssOutcome {
        (**self).gelss(m, n, nrhs, a, lda, b, ldb, s, rcond, work)
    }

    fn work_len(&self, m: usize, n: usize, nrhs: usize) -> usize {
        (**self).work_len(m, n, nrhs)
    }
}

/// Argument checks shared by both backends, in LAPACK order.
///
/// Buffer lengths (arguments 4, 6, 8) are checked too: LAPACK trusts them,
/// a safe wrapper cannot.
fn check_arguments<T>(
    m: usize,
    n: usize,
    nrhs: usize,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    s: &[T],
    lwork: usize,
    min_work: usize,
) -> Option<GelssOutcome> {
    let max_mn = m.max(n);
    if a.len() < required_len(m, n, lda) {
        return Some(GelssOutcome::illegal(4));
    }
    if lda < m.max(1) {
        return Some(GelssOutcome::illegal(5));
    }
    if b.len() < required_len(max_mn, nrhs, ldb) {
        return Some(GelssOutcome::illegal(6));
    }
    if ldb < max_mn.max(1) {
        return Some(GelssOutcome::illegal(7));
    }
    if s.len() < m.min(n) {
        return Some(GelssOutcome::illegal(8));
    }
    if lwork < min_work {
        return Some(GelssOutcome::illegal(12));
    }
    None
}

/// Elements spanned by a `rows x cols` column-major matrix with leading dimension `ld`.
fn required_len(rows: usize, cols: usize, ld: usize) -> usize {
    if rows == 0 || cols == 0 {
        0
    } else {
        (cols - 1) * ld + rows
    }
}

// ============================================================================
// Native backend
// ============================================================================

/// Pure-Rust `xGELSS` built on a one-sided Jacobi SVD.
///
/// Follows the LAPACK contract for outputs: singular values descending in
/// `s`, the first `min(m, n)` rows of `a` overwritten with the right singular
/// vectors stored rowwise, solution in the first n rows of `b`. When `m > n`,
/// row n of each `b` column receives the residual norm and rows `n+1..m` are
/// zeroed, so the sum of squares of rows `n..m` is the residual sum of squares.
/// `work[0]` receives the minimum workspace length.
///
/// `A` and `B` are scaled by powers of two to a max-abs entry in `[1, 2)`
/// before factoring and the results scaled back, so sums of squares neither
/// overflow nor underflow for any finite input. Wide problems (`m < n`) are
/// factored through `A^T`, which keeps the Jacobi sweep on `min(m, n)` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeGelss {
    max_sweeps: usize,
}

impl NativeGelss {
    pub const fn new() -> Self {
        Self {
            max_sweeps: MAX_SWEEPS,
        }
    }

    /// Override the Jacobi sweep limit.
    pub const fn with_max_sweeps(max_sweeps: usize) -> Self {
        Self { max_sweeps }
    }
}

impl Default for NativeGelss {
    fn default() -> Self {
        Self::new()
    }
}

/// `e` such that `2^e <= x < 2^(e+1)`, for finite `x > 0`.
fn binary_exponent<T: RealScalar>(x: T) -> i32 {
    let (mantissa, exponent, _) = x.integer_decode();
    <i32 as From<i16>>::from(exponent) + 63 - mantissa.leading_zeros() as i32
}

/// Multiply by `2^k`, split in two factors so neither overflows.
fn scale_pow2<T: RealScalar>(x: &mut [T], k: i32) {
    if k == 0 {
        return;
    }
    let two = T::one() + T::one();
    let f1 = two.powi(k / 2);
    let f2 = two.powi(k - k / 2);
    for v in x.iter_mut() {
        *v = *v * f1 * f2;
    }
}

fn max_abs<T: RealScalar>(x: &[T]) -> T {
    x.iter().fold(T::zero(), |acc, &v| acc.max(v.abs()))
}

impl<T: RealScalar> DenseSolver<T> for NativeGelss {
    fn gelss(
        &self,
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
        s: &mut [T],
        rcond: T,
        work: &mut [T],
    ) -> GelssOutcome {
        let min_work = gelss_work_len(m, n, nrhs);
        if let Some(bad) = check_arguments(m, n, nrhs, a, lda, b, ldb, s, work.len(), min_work) {
            return bad;
        }
        work[0] = <T as NumCast>::from(min_work).unwrap_or_else(T::max_value);

        let min_mn = m.min(n);
        let max_mn = m.max(n);
        if min_mn == 0 {
            for j in 0..nrhs {
                b[j * ldb..j * ldb + max_mn].fill(T::zero());
            }
            return GelssOutcome::default();
        }

        // Packed copy of A, scaled so that max |a_ij| lies in [1, 2).
        let mut scaled = vec![T::zero(); m * n];
        for j in 0..n {
            scaled[j * m..j * m + m].copy_from_slice(&a[j * lda..j * lda + m]);
        }
        let anrm = max_abs(&scaled);
        if anrm == T::zero() {
            for j in 0..nrhs {
                b[j * ldb..j * ldb + max_mn].fill(T::zero());
            }
            s[..min_mn].fill(T::zero());
            return GelssOutcome::default();
        }
        let ka = binary_exponent(anrm);
        scale_pow2(&mut scaled, -ka);

        let mut bnrm = T::zero();
        for j in 0..nrhs {
            bnrm = bnrm.max(max_abs(&b[j * ldb..j * ldb + m]));
        }
        let kb = if bnrm > T::zero() {
            binary_exponent(bnrm)
        } else {
            0
        };
        for j in 0..nrhs {
            scale_pow2(&mut b[j * ldb..j * ldb + m], -kb);
        }

        // Jacobi on A (m >= n) or A^T (m < n): `rows x k` with k = min(m, n).
        // Tall: A V = W, left vectors W / sigma (stride m), right vectors V (stride n).
        // Wide: A^T U = W, left vectors U (stride m), right vectors W / sigma (stride n).
        let wide = m < n;
        let rows = max_mn;
        let mut w = if wide {
            let mut t = vec![T::zero(); n * m];
            for j in 0..n {
                for i in 0..m {
                    t[i * n + j] = scaled[j * m + i];
                }
            }
            t
        } else {
            scaled.clone()
        };
        let mut v = vec![T::zero(); min_mn * min_mn];
        let stats = one_sided_jacobi(rows, min_mn, &mut w, &mut v, self.max_sweeps);
        if stats.unconverged > 0 {
            log::warn!(
                "{}: Jacobi SVD did not converge after {} sweeps ({} column pairs left)",
                gelss_routine::<T>(),
                stats.sweeps,
                stats.unconverged
            );
            return GelssOutcome {
                rank: 0,
                info: i32::try_from(stats.unconverged).unwrap_or(i32::MAX),
            };
        }
        let (left, right) = if wide { (&v, &w) } else { (&w, &v) };

        let sigma: Vec<T> = (0..min_mn).map(|j| column_norm(&w, rows, j)).collect();
        let mut order: Vec<usize> = (0..min_mn).collect();
        order.sort_by(|&x, &y| sigma[y].partial_cmp(&sigma[x]).unwrap_or(Ordering::Equal));

        let rcond = if rcond < T::zero() { T::epsilon() } else { rcond };
        let threshold = (rcond * sigma[order[0]]).max(T::min_positive_value());
        let rank = order.iter().take_while(|&&k| sigma[k] > threshold).count();

        // x = sum_k right_k (left_k . b) / sigma_k^2: one of the two is unnormalized.
        let mut x = vec![T::zero(); n];
        for rhs in 0..nrhs {
            let col = &mut b[rhs * ldb..rhs * ldb + max_mn];
            x.fill(T::zero());
            for &k in &order[..rank] {
                let lk = &left[k * m..k * m + m];
                let mut proj = T::zero();
                for i in 0..m {
                    proj += lk[i] * col[i];
                }
                let coef = proj / (sigma[k] * sigma[k]);
                let rk = &right[k * n..k * n + n];
                for i in 0..n {
                    x[i] += coef * rk[i];
                }
            }

            if m > n {
                let mut rss = T::zero();
                for i in 0..m {
                    let mut ax = T::zero();
                    for j in 0..n {
                        ax += scaled[j * m + i] * x[j];
                    }
                    let r = col[i] - ax;
                    rss += r * r;
                }
                col[n] = rss.sqrt();
                col[n + 1..m].fill(T::zero());
                scale_pow2(&mut col[n..n + 1], kb);
            }
            col[..n].copy_from_slice(&x);
            scale_pow2(&mut col[..n], kb - ka);
        }

        // Right singular vectors, rowwise, into the leading rows of A.
        for (r, &k) in order.iter().enumerate() {
            let rk = &right[k * n..k * n + n];
            let norm = if wide && sigma[k] > T::zero() {
                sigma[k]
            } else {
                T::one()
            };
            for j in 0..n {
                a[j * lda + r] = rk[j] / norm;
            }
            s[r] = sigma[k];
        }
        scale_pow2(&mut s[..min_mn], ka);

        log::debug!(
            "{}: {}x{} nrhs={} rank={} sweeps={}",
            gelss_routine::<T>(),
            m,
            n,
            nrhs,
            rank,
            stats.sweeps
        );
        GelssOutcome { rank, info: 0 }
    }
}

// ============================================================================
// LAPACK backend (FFI)
// ============================================================================

/// System LAPACK `sgelss_` / `dgelss_`.
#[cfg(feature = "lapack")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LapackGelss;

#[cfg(feature = "lapack")]
macro_rules! impl_lapack_gelss {
    ($t:ty, $ffi:ident) => {
        impl DenseSolver<$t> for LapackGelss {
            fn gelss(
                &self,
                m: usize,
                n: usize,
                nrhs: usize,
                a: &mut [$t],
                lda: usize,
                b: &mut [$t],
                ldb: usize,
                s: &mut [$t],
                rcond: $t,
                work: &mut [$t],
            ) -> GelssOutcome {
                let min_work = gelss_work_len(m, n, nrhs);
                if let Some(bad) =
                    check_arguments(m, n, nrhs, a, lda, b, ldb, s, work.len(), min_work)
                {
                    return bad;
                }
                let dims = [m, n, nrhs, lda, ldb, work.len()].map(i32::try_from);
                let [Ok(m), Ok(n), Ok(nrhs), Ok(lda), Ok(ldb), Ok(lwork)] = dims else {
                    // Dimension does not fit in a Fortran INTEGER.
                    return GelssOutcome::illegal(1);
                };
                let mut rank: i32 = 0;
                let mut info: i32 = 0;
                unsafe {
                    multigrid_core::lapack_ffi::$ffi(
                        &m,
                        &n,
                        &nrhs,
                        a.as_mut_ptr(),
                        &lda,
                        b.as_mut_ptr(),
                        &ldb,
                        s.as_mut_ptr(),
                        &rcond,
                        &mut rank,
                        work.as_mut_ptr(),
                        &lwork,
                        &mut info,
                    );
                }
                GelssOutcome {
                    rank: rank.max(0) as usize,
                    info,
                }
            }

            fn work_len(&self, m: usize, n: usize, nrhs: usize) -> usize {
                let min_work = gelss_work_len(m, n, nrhs);
                let dims = [m, n, nrhs].map(i32::try_from);
                let [Ok(mi), Ok(ni), Ok(nrhsi)] = dims else {
                    return min_work;
                };
                // LWORK = -1: workspace query, optimal size returned in WORK(1).
                let lda = mi.max(1);
                let ldb = mi.max(ni).max(1);
                let query: i32 = -1;
                let rcond: $t = -1.0;
                let mut opt: $t = 0.0;
                let mut rank: i32 = 0;
                let mut info: i32 = 0;
                let mut dummy: [$t; 1] = [0.0];
                unsafe {
                    multigrid_core::lapack_ffi::$ffi(
                        &mi,
                        &ni,
                        &nrhsi,
                        dummy.as_mut_ptr(),
                        &lda,
                        dummy.as_mut_ptr(),
                        &ldb,
                        dummy.as_mut_ptr(),
                        &rcond,
                        &mut rank,
                        &mut opt,
                        &query,
                        &mut info,
                    );
                }
                if info == 0 {
                    (opt as usize).max(min_work)
                } else {
                    min_work
                }
            }
        }
    };
}

#[cfg(feature = "lapack")]
impl_lapack_gelss!(f32, sgelss_);
#[cfg(feature = "lapack")]
impl_lapack_gelss!(f64, dgelss_);

/// Backend used by `svd_solve` and `lstsq`.
#[cfg(feature = "lapack")]
pub type DefaultGelss = LapackGelss;

/// Backend used by `svd_solve` and `lstsq`.
#[cfg(not(feature = "lapack"))]
pub type DefaultGelss = NativeGelss;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gelss_work_len() {
        assert_eq!(gelss_work_len(3, 1, 1), 6);
        assert_eq!(gelss_work_len(4, 4, 10), 22);
        assert_eq!(gelss_work_len(0, 0, 0), 1);
        assert_eq!(gelss_routine::<f32>(), "sgelss");
        assert_eq!(gelss_routine::<f64>(), "dgelss");
    }

    #[test]
    fn test_native_rejects_small_lda() {
        let mut a = vec![1.0f64; 6];
        let mut b = vec![1.0f64; 3];
        let mut s = vec![0.0f64; 2];
        let mut work = vec![0.0f64; 16];
        let out = NativeGelss::new().gelss(3, 2, 1, &mut a, 2, &mut b, 3, &mut s, -1.0, &mut work);
        assert_eq!(out.info, -5);
    }

    #[test]
    fn test_native_rejects_small_ldb() {
        // Passing ldb = n for an overdetermined system is illegal.
        let mut a = vec![1.0f64; 3];
        let mut b = vec![1.0f64, 2.0, 3.0];
        let mut s = vec![0.0f64; 1];
        let mut work = vec![0.0f64; 16];
        let out = NativeGelss::new().gelss(3, 1, 1, &mut a, 3, &mut b, 1, &mut s, -1.0, &mut work);
        assert_eq!(out.info, -7);
    }

    #[test]
    fn test_native_rejects_small_workspace() {
        let mut a = vec![1.0f64; 3];
        let mut b = vec![1.0f64, 2.0, 3.0];
        let mut s = vec![0.0f64; 1];
        let mut work = vec![0.0f64; 5];
        let out = NativeGelss::new().gelss(3, 1, 1, &mut a, 3, &mut b, 3, &mut s, -1.0, &mut work);
        assert_eq!(out.info, -12);
    }

    #[test]
    fn test_native_rejects_short_buffers() {
        let mut a = vec![1.0f32; 5];
        let mut b = vec![1.0f32; 3];
        let mut s = vec![0.0f32; 2];
        let mut work = vec![0.0f32; 16];
        let out = NativeGelss::new().gelss(3, 2, 1, &mut a, 3, &mut b, 3, &mut s, -1.0, &mut work);
        assert_eq!(out.info, -4);

        let mut a = vec![1.0f32; 6];
        let mut s = vec![0.0f32; 1];
        let out = NativeGelss::new().gelss(3, 2, 1, &mut a, 3, &mut b, 3, &mut s, -1.0, &mut work);
        assert_eq!(out.info, -8);
    }

    #[test]
    fn test_native_quick_return_zeroes_b() {
        let mut a: Vec<f64> = vec![];
        let mut b = vec![7.0f64; 3];
        let mut s: Vec<f64> = vec![];
        let mut work = vec![0.0f64; 4];
        let out = NativeGelss::new().gelss(0, 3, 1, &mut a, 1, &mut b, 3, &mut s, -1.0, &mut work);
        assert_eq!(out, GelssOutcome { rank: 0, info: 0 });
        assert_eq!(b, vec![0.0; 3]);
    }

    #[test]
    fn test_native_overwrites_a_with_right_singular_vectors() {
        // A = diag(1, 3) (column-major), b = [1, 3]
        let mut a = vec![1.0f64, 0.0, 0.0, 3.0];
        let mut b = vec![1.0f64, 3.0];
        let mut s = vec![0.0f64; 2];
        let mut work = vec![0.0f64; gelss_work_len(2, 2, 1)];
        let out = NativeGelss::new().gelss(2, 2, 1, &mut a, 2, &mut b, 2, &mut s, -1.0, &mut work);
        assert_eq!(out, GelssOutcome { rank: 2, info: 0 });
        assert_eq!(s, vec![3.0, 1.0]);
        // Row 0 of A is the singular vector for sigma = 3: e_1 (up to sign).
        assert_abs_diff_eq!(a[0].abs(), 0.0);
        assert_abs_diff_eq!(a[2].abs(), 1.0);
        assert_abs_diff_eq!(b[0], 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(b[1], 1.0, epsilon = 1e-15);
        assert_eq!(work[0], gelss_work_len(2, 2, 1) as f64);
    }

    #[test]
    fn test_native_sweep_limit_reports_no_convergence() {
        let mut a = vec![3.0f64, 4.0, 0.0, 5.0];
        let mut b = vec![1.0f64, 1.0];
        let mut s = vec![0.0f64; 2];
        let mut work = vec![0.0f64; 16];
        let solver = NativeGelss::with_max_sweeps(0);
        let out = solver.gelss(2, 2, 1, &mut a, 2, &mut b, 2, &mut s, -1.0, &mut work);
        assert!(out.info > 0);
    }

    #[test]
    fn test_native_explicit_rcond_truncates_rank() {
        // sigma = [3, 1]; rcond = 0.5 drops sigma = 1 (1 <= 0.5 * 3).
        let mut a = vec![1.0f64, 0.0, 0.0, 3.0];
        let mut b = vec![1.0f64, 3.0];
        let mut s = vec![0.0f64; 2];
        let mut work = vec![0.0f64; 16];
        let out = NativeGelss::new().gelss(2, 2, 1, &mut a, 2, &mut b, 2, &mut s, 0.5, &mut work);
        assert_eq!(out.rank, 1);
        assert_abs_diff_eq!(b[0], 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(b[1], 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_reference_forwarding() {
        let solver = NativeGelss::new();
        let by_ref = &solver;
        assert_eq!(DenseSolver::<f64>::work_len(&by_ref, 3, 2, 1), gelss_work_len(3, 2, 1));
    }
}
