//! CBLAS-style layout and transpose enumerations.
//!
//! The kernels fix the layout of each operand by contract. These tags make
//! that contract explicit at call sites and in the matrix views.

/// Memory layout for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Layout {
    /// Row-major (C-style): elements in a row are contiguous.
    #[default]
    RowMajor = 101,
    /// Column-major (Fortran-style): elements in a column are contiguous.
    ColMajor = 102,
}

/// Transpose operation for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Transpose {
    /// No transpose.
    #[default]
    NoTrans = 111,
    /// Transpose.
    Trans = 112,
    /// Conjugate transpose (for complex types).
    ConjTrans = 113,
}

impl Layout {
    /// Packed leading dimension of an M x N matrix.
    #[inline(always)]
    pub fn leading_dim(self, rows: usize, cols: usize) -> usize {
        match self {
            Layout::RowMajor => cols,
            Layout::ColMajor => rows,
        }
    }

    /// Linear index of element (i, j) given leading dimension `ld`.
    #[inline(always)]
    pub fn index(self, i: usize, j: usize, ld: usize) -> usize {
        match self {
            Layout::RowMajor => i * ld + j,
            Layout::ColMajor => j * ld + i,
        }
    }

    /// Minimum buffer length holding an M x N matrix with leading dimension `ld`.
    #[inline]
    pub fn required_len(self, rows: usize, cols: usize, ld: usize) -> usize {
        if rows == 0 || cols == 0 {
            return 0;
        }
        self.index(rows - 1, cols - 1, ld) + 1
    }
}
