//! One-sided Jacobi (Hestenes) SVD.
//!
//! Rotates pairs of columns of a working copy `W` of `A` until every pair is
//! orthogonal to working precision, accumulating the rotations in `V`. On
//! exit `A * V = W`, the column norms of `W` are the singular values and
//! `W[:, j] / sigma_j` are the left singular vectors.
//!
//! Callers pass a matrix with at least as many rows as columns. More than
//! `m` nonzero columns in `R^m` can never be made pairwise orthogonal, so a
//! wide matrix is factored through its transpose.

use multigrid_core::RealScalar;

/// Sweep limit before reporting non-convergence.
pub(crate) const MAX_SWEEPS: usize = 64;

/// Outcome of [`one_sided_jacobi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct JacobiStats {
    /// Sweeps performed.
    pub sweeps: usize,
    /// Column pairs still not orthogonal when the sweep limit was reached.
    pub unconverged: usize,
}

/// Column sums `(|w_p|^2, |w_q|^2, w_p . w_q)`.
#[inline]
fn column_products<T: RealScalar>(w: &[T], m: usize, p: usize, q: usize) -> (T, T, T) {
    let wp = &w[p * m..p * m + m];
    let wq = &w[q * m..q * m + m];
    let mut alpha = T::zero();
    let mut beta = T::zero();
    let mut gamma = T::zero();
    for i in 0..m {
        alpha += wp[i] * wp[i];
        beta += wq[i] * wq[i];
        gamma += wp[i] * wq[i];
    }
    (alpha, beta, gamma)
}

#[inline]
fn is_orthogonal<T: RealScalar>(alpha: T, beta: T, gamma: T) -> bool {
    gamma == T::zero() || gamma.abs() <= T::epsilon() * (alpha * beta).sqrt()
}

/// Apply the plane rotation `(c, s)` to columns `p` and `q` of a column-major
/// matrix with `rows` rows.
#[inline]
fn rotate<T: RealScalar>(x: &mut [T], rows: usize, p: usize, q: usize, c: T, s: T) {
    for i in 0..rows {
        let xp = x[p * rows + i];
        let xq = x[q * rows + i];
        x[p * rows + i] = c * xp - s * xq;
        x[q * rows + i] = s * xp + c * xq;
    }
}

/// Orthogonalize the columns of `w` (m x n, column-major, packed).
///
/// `v` (n x n, column-major) is overwritten with the accumulated rotation.
pub(crate) fn one_sided_jacobi<T: RealScalar>(
    m: usize,
    n: usize,
    w: &mut [T],
    v: &mut [T],
    max_sweeps: usize,
) -> JacobiStats {
    v[..n * n].fill(T::zero());
    for j in 0..n {
        v[j * n + j] = T::one();
    }

    let two = T::one() + T::one();
    for sweep in 0..max_sweeps {
        let mut rotations = 0usize;
        for p in 0..n.saturating_sub(1) {
            for q in (p + 1)..n {
                let (alpha, beta, gamma) = column_products(w, m, p, q);
                if is_orthogonal(alpha, beta, gamma) {
                    continue;
                }
                rotations += 1;

                // Smaller root of t^2 + 2*zeta*t - 1 = 0 zeroes the new gamma.
                let zeta = (beta - alpha) / (two * gamma);
                let t = zeta.signum() / (zeta.abs() + T::one().hypot(zeta));
                let c = T::one() / T::one().hypot(t);
                let s = c * t;

                rotate(w, m, p, q, c, s);
                rotate(v, n, p, q, c, s);
            }
        }
        if rotations == 0 {
            return JacobiStats {
                sweeps: sweep + 1,
                unconverged: 0,
            };
        }
    }

    let mut unconverged = 0;
    for p in 0..n.saturating_sub(1) {
        for q in (p + 1)..n {
            let (alpha, beta, gamma) = column_products(w, m, p, q);
            if !is_orthogonal(alpha, beta, gamma) {
                unconverged += 1;
            }
        }
    }
    JacobiStats {
        sweeps: max_sweeps,
        unconverged,
    }
}

/// Euclidean norm of column `j` of a packed column-major matrix.
#[inline]
pub(crate) fn column_norm<T: RealScalar>(w: &[T], m: usize, j: usize) -> T {
    let mut sum = T::zero();
    for &x in &w[j * m..j * m + m] {
        sum += x * x;
    }
    sum.sqrt()
}
