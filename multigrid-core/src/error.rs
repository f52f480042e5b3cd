//! Error types for the dense kernels.
//!
//! The unchecked kernels (`dot_prod`, `axpy`, `gemm`) never produce these.
//! They come from LAPACK-style status codes and from the checked view
//! constructors.

use thiserror::Error;

/// Errors reported by the dense linear algebra layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinalgError {
    /// A LAPACK-style routine rejected an argument (`INFO < 0`).
    #[error("{routine}: illegal value in argument {index}")]
    IllegalArgument {
        /// Routine name, e.g. `dgelss`
        routine: &'static str,
        /// 1-based position of the offending argument
        index: i32,
    },

    /// The SVD did not converge (`INFO > 0`).
    #[error("{routine}: SVD failed to converge, {unconverged} off-diagonal elements did not converge to zero")]
    NoConvergence {
        /// Routine name, e.g. `dgelss`
        routine: &'static str,
        /// Number of unconverged off-diagonal elements
        unconverged: i32,
    },

    /// Operand shapes or buffers do not fit together.
    #[error("Dimension mismatch: {reason}")]
    DimensionMismatch {
        /// Description of the mismatch
        reason: String,
    },
}

impl LinalgError {
    /// Convert a LAPACK `INFO` status into a result.
    pub fn from_info(routine: &'static str, info: i32) -> Result<()> {
        match info {
            0 => Ok(()),
            i if i < 0 => Err(LinalgError::IllegalArgument { routine, index: -i }),
            i => Err(LinalgError::NoConvergence {
                routine,
                unconverged: i,
            }),
        }
    }

    /// The LAPACK `INFO` value this error corresponds to, if any.
    pub fn info(&self) -> Option<i32> {
        match self {
            LinalgError::IllegalArgument { index, .. } => Some(-index),
            LinalgError::NoConvergence { unconverged, .. } => Some(*unconverged),
            LinalgError::DimensionMismatch { .. } => None,
        }
    }

    /// Shorthand for [`LinalgError::DimensionMismatch`].
    pub fn mismatch(reason: impl Into<String>) -> Self {
        LinalgError::DimensionMismatch {
            reason: reason.into(),
        }
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, LinalgError>;
