//! BLAS Level 1: Vector-vector operations.
//!
//! Every routine is generic over [`Scalar`], so the same body serves real and
//! complex kinds. Reductions use a single accumulator in increasing index
//! order (no pairwise or blocked summation), which keeps results reproducible
//! against reference sums.
//!
//! Nothing here validates lengths: `n` must not exceed either buffer. An
//! oversized `n` panics on slice indexing rather than reading out of bounds.

use multigrid_core::{Float, Scalar, Zero};

// ============================================================================
// DOT: Hermitian inner product
// ============================================================================

/// Inner product `sum_i conj(x[i]) * y[i]` over the first `n` elements.
///
/// For real kinds this is the ordinary dot product. For complex kinds it is
/// conjugate-linear in `x`, so `dot_prod(x, y, n) == conj(dot_prod(y, x, n))`.
#[inline]
pub fn dot_prod<T: Scalar>(x: &[T], y: &[T], n: usize) -> T {
    let mut sum = T::zero();
    for i in 0..n {
        sum += x[i].conjugate() * y[i];
    }
    sum
}

// ============================================================================
// AXPY: x = x + alpha * y
// ============================================================================

/// In-place update `x[i] += alpha * y[i]` for `i < n`.
///
/// Note the argument order: the first vector is the one updated.
#[inline]
pub fn axpy<T: Scalar>(x: &mut [T], y: &[T], alpha: T, n: usize) {
    for i in 0..n {
        x[i] += alpha * y[i];
    }
}

/// `axpy` with `y` aliased to `x`: `x[i] += alpha * x[i]`.
///
/// The borrow checker rules out passing one buffer as both arguments of
/// [`axpy`]; the elementwise result is the same.
#[inline]
pub fn axpy_self<T: Scalar>(x: &mut [T], alpha: T, n: usize) {
    for i in 0..n {
        let xi = x[i];
        x[i] += alpha * xi;
    }
}

// ============================================================================
// NRM2: Euclidean norm
// ============================================================================

/// Euclidean norm `sqrt(sum_i |x[i]|^2)` over the first `n` elements.
///
/// Plain sequential sum of squared magnitudes, no overflow-avoiding scaling.
#[inline]
pub fn nrm2<T: Scalar>(x: &[T], n: usize) -> T::Real {
    let mut sum = <T::Real as Zero>::zero();
    for i in 0..n {
        sum += x[i].norm_squared();
    }
    sum.sqrt()
}
