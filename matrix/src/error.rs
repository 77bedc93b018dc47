use p2b_field::{ErrorKind, FieldError};
use thiserror::Error;

/// Errors raised while building or inverting matrices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The matrix has no inverse.
    #[error("matrix is singular")]
    Singular,

    /// A square matrix was required.
    #[error("expected a square matrix, got {height}x{width}")]
    NotSquare { height: usize, width: usize },

    /// Operand shapes do not line up.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Rows of a nested input have different lengths.
    #[error("row {row} has length {actual}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// `L1[row] == L2[col]`, so the Cauchy entry would invert zero.
    #[error("Cauchy lists collide at entry ({row}, {col})")]
    CauchyCollision { row: usize, col: usize },

    /// A Cauchy list repeats a value, which would repeat a row or column.
    #[error("Cauchy list repeats the value at positions {first} and {second}")]
    CauchyRepeatedEntry { first: usize, second: usize },

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl MatrixError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Singular | Self::CauchyCollision { .. } | Self::CauchyRepeatedEntry { .. } => {
                ErrorKind::Domain
            }
            Self::NotSquare { .. } | Self::DimensionMismatch { .. } | Self::RaggedRows { .. } => {
                ErrorKind::Config
            }
            Self::Field(e) => e.kind(),
        }
    }
}
