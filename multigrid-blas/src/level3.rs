//! BLAS Level 3: Matrix-matrix operations.
//!
//! A single restricted GEMM: `S = A * B` with `A` row-major and `B`
//! column-major, so both the row of `A` and the column of `B` feeding an
//! output entry are contiguous. Each output entry is one sequential dot
//! product over the inner dimension, accumulated from zero.
//!
//! [`gemm`] performs no dimension or aliasing validation. [`matmul`] is the
//! checked variant over [`MatRef`] / [`MatMut`] views and accepts any operand
//! layouts.

use multigrid_core::{Layout, LinalgError, MatMut, MatRef, Result, Scalar, Transpose};

// ============================================================================
// Kernel
// ============================================================================

/// `S[i, j] = sum_p A[i, p] * B[p, j]` for an m x k by k x n product.
///
/// Overwrites every entry of the m x n output; entries outside it are untouched.
#[inline]
fn gemm_kernel<T: Scalar>(
    m: usize,
    n: usize,
    k: usize,
    a: &[T],
    a_layout: Layout,
    lda: usize,
    b: &[T],
    b_layout: Layout,
    ldb: usize,
    s: &mut [T],
    s_layout: Layout,
    lds: usize,
) {
    if a_layout == Layout::RowMajor && b_layout == Layout::ColMajor {
        // Fast path: row i of A and column j of B are contiguous.
        for i in 0..m {
            let a_row = &a[i * lda..i * lda + k];
            for j in 0..n {
                let b_col = &b[j * ldb..j * ldb + k];
                let mut acc = T::zero();
                for p in 0..k {
                    acc += a_row[p] * b_col[p];
                }
                s[s_layout.index(i, j, lds)] = acc;
            }
        }
        return;
    }

    for i in 0..m {
        for j in 0..n {
            let mut acc = T::zero();
            for p in 0..k {
                acc += a[a_layout.index(i, p, lda)] * b[b_layout.index(p, j, ldb)];
            }
            s[s_layout.index(i, j, lds)] = acc;
        }
    }
}

// ============================================================================
// GEMM: S = A * B (fixed operand layouts)
// ============================================================================

/// Dense product `S = A * B`.
///
/// - `a`: `a_rows x a_cols`, row-major.
/// - `b`: `b_rows x b_cols`, column-major. `b_rows` must equal `a_cols`.
/// - `s`: `s_rows x s_cols` output (`a_rows x b_cols`), written in `s_layout`:
///   `RowMajor` stores `S[i, j]` at `i * s_cols + j`, `ColMajor` at
///   `i + j * s_rows`.
///
/// `trans_a` and `trans_b` are accepted for call-site compatibility and
/// ignored: the product is always the untransposed `A * B`.
///
/// No dimension checks are made. Non-conformant dimensions either panic on
/// slice indexing or produce a meaningless result.
pub fn gemm<T: Scalar>(
    a: &[T],
    a_rows: usize,
    a_cols: usize,
    trans_a: Transpose,
    b: &[T],
    b_rows: usize,
    b_cols: usize,
    trans_b: Transpose,
    s: &mut [T],
    s_rows: usize,
    s_cols: usize,
    s_layout: Layout,
) {
    if trans_a != Transpose::NoTrans || trans_b != Transpose::NoTrans {
        log::warn!(
            "gemm: transpose flags ({trans_a:?}, {trans_b:?}) are not supported and were ignored"
        );
    }

    let lds = s_layout.leading_dim(s_rows, s_cols);
    gemm_kernel(
        a_rows,
        b_cols,
        b_rows,
        a,
        Layout::RowMajor,
        a_cols,
        b,
        Layout::ColMajor,
        b_rows,
        s,
        s_layout,
        lds,
    );
}

// ============================================================================
// MATMUL: checked product over views
// ============================================================================

/// Checked `S = A * B` over matrix views of any layout and leading dimension.
///
/// Uses the same per-entry summation order as [`gemm`], so for operands
/// holding the same values the results are identical.
pub fn matmul<T: Scalar>(
    a: &MatRef<'_, T>,
    b: &MatRef<'_, T>,
    s: &mut MatMut<'_, T>,
) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(LinalgError::mismatch(format!(
            "inner dimensions differ: A is {}x{}, B is {}x{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    if s.rows() != a.rows() || s.cols() != b.cols() {
        return Err(LinalgError::mismatch(format!(
            "output is {}x{}, product is {}x{}",
            s.rows(),
            s.cols(),
            a.rows(),
            b.cols()
        )));
    }

    let (m, n, k) = (a.rows(), b.cols(), a.cols());
    let s_layout = s.layout();
    let lds = s.leading_dim();
    gemm_kernel(
        m,
        n,
        k,
        a.as_slice(),
        a.layout(),
        a.leading_dim(),
        b.as_slice(),
        b.layout(),
        b.leading_dim(),
        s.as_mut_slice(),
        s_layout,
        lds,
    );
    Ok(())
}
