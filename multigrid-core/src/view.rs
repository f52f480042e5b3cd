//! Borrowed matrix views carrying shape, layout and leading dimension.
//!
//! A view pairs a flat buffer with the metadata the raw kernels take as
//! separate arguments, so that a row-major buffer cannot be silently read as
//! column-major. Construction checks the buffer against the shape; element
//! access after that is plain indexing.

use crate::error::{LinalgError, Result};
use crate::layout::Layout;

fn check_buffer(len: usize, rows: usize, cols: usize, layout: Layout, ld: usize) -> Result<()> {
    let packed = layout.leading_dim(rows, cols);
    if ld < packed.max(1) {
        return Err(LinalgError::mismatch(format!(
            "leading dimension {ld} is smaller than {} for a {rows}x{cols} {layout:?} matrix",
            packed.max(1)
        )));
    }
    let required = layout.required_len(rows, cols, ld);
    if len < required {
        return Err(LinalgError::mismatch(format!(
            "buffer of length {len} cannot hold a {rows}x{cols} {layout:?} matrix with ld {ld} (needs {required})"
        )));
    }
    Ok(())
}

/// Immutable matrix view.
#[derive(Debug, Clone, Copy)]
pub struct MatRef<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    layout: Layout,
    ld: usize,
}

impl<'a, T: Copy> MatRef<'a, T> {
    /// View over a packed buffer.
    pub fn new(data: &'a [T], rows: usize, cols: usize, layout: Layout) -> Result<Self> {
        Self::with_leading_dim(data, rows, cols, layout, layout.leading_dim(rows, cols).max(1))
    }

    /// View over a buffer with an explicit leading dimension.
    pub fn with_leading_dim(
        data: &'a [T],
        rows: usize,
        cols: usize,
        layout: Layout,
        ld: usize,
    ) -> Result<Self> {
        check_buffer(data.len(), rows, cols, layout, ld)?;
        Ok(Self {
            data,
            rows,
            cols,
            layout,
            ld,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn leading_dim(&self) -> usize {
        self.ld
    }

    /// Element (i, j).
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[self.layout.index(i, j, self.ld)]
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Copy into a freshly packed buffer of the given layout.
    pub fn to_packed(&self, layout: Layout) -> Vec<T> {
        let ld = layout.leading_dim(self.rows, self.cols);
        let mut out = Vec::with_capacity(self.rows * self.cols);
        match layout {
            Layout::RowMajor => {
                for i in 0..self.rows {
                    for j in 0..self.cols {
                        out.push(self.get(i, j));
                    }
                }
            }
            Layout::ColMajor => {
                for j in 0..self.cols {
                    for i in 0..self.rows {
                        out.push(self.get(i, j));
                    }
                }
            }
        }
        debug_assert_eq!(out.len(), layout.required_len(self.rows, self.cols, ld));
        out
    }
}

/// Mutable matrix view.
#[derive(Debug)]
pub struct MatMut<'a, T> {
    data: &'a mut [T],
    rows: usize,
    cols: usize,
    layout: Layout,
    ld: usize,
}

impl<'a, T: Copy> MatMut<'a, T> {
    /// View over a packed buffer.
    pub fn new(data: &'a mut [T], rows: usize, cols: usize, layout: Layout) -> Result<Self> {
        let ld = layout.leading_dim(rows, cols).max(1);
        Self::with_leading_dim(data, rows, cols, layout, ld)
    }

    /// View over a buffer with an explicit leading dimension.
    pub fn with_leading_dim(
        data: &'a mut [T],
        rows: usize,
        cols: usize,
        layout: Layout,
        ld: usize,
    ) -> Result<Self> {
        check_buffer(data.len(), rows, cols, layout, ld)?;
        Ok(Self {
            data,
            rows,
            cols,
            layout,
            ld,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn leading_dim(&self) -> usize {
        self.ld
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[self.layout.index(i, j, self.ld)]
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        let idx = self.layout.index(i, j, self.ld);
        self.data[idx] = value;
    }

    /// Reborrow as an immutable view.
    pub fn as_ref(&self) -> MatRef<'_, T> {
        MatRef {
            data: &*self.data,
            rows: self.rows,
            cols: self.cols,
            layout: self.layout,
            ld: self.ld,
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &*self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }
}
