use p2b_field::{ErrorKind, FieldError};
use p2b_matrix::MatrixError;
use thiserror::Error;

/// Errors raised while assembling or evaluating a [`HadesInstance`](crate::HadesInstance).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HadesError {
    /// The state must have at least one word.
    #[error("state width must be positive")]
    EmptyState,

    /// A linear layer is not a `width x width` matrix.
    #[error("{layer} matrix must be {expected}x{expected}, got {height}x{width}")]
    LayerShape {
        layer: &'static str,
        expected: usize,
        height: usize,
        width: usize,
    },

    /// A linear layer has entries outside the instance field.
    #[error("{layer} matrix has entries outside the field")]
    LayerOutsideField { layer: &'static str },

    /// A linear layer could not be prepared, usually because it is singular.
    #[error("{layer} matrix: {source}")]
    Layer {
        layer: &'static str,
        #[source]
        source: MatrixError,
    },

    /// The number of round constants is not `width * (rounds_f + rounds_p)`.
    #[error("expected {expected} round constants, got {actual}")]
    ConstantCount { expected: usize, actual: usize },

    /// A round constant is not a canonical field element.
    #[error("round constant {index} lies outside the field")]
    ConstantOutsideField { index: usize },

    /// The input state has the wrong number of words.
    #[error("state has {actual} words, expected {expected}")]
    WrongStateLength { expected: usize, actual: usize },

    /// The round range is reversed or runs past the last round.
    #[error("invalid round range {start}..{end} for {rounds} rounds")]
    InvalidRoundRange {
        start: usize,
        end: usize,
        rounds: usize,
    },

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl HadesError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyState
            | Self::LayerShape { .. }
            | Self::LayerOutsideField { .. }
            | Self::ConstantCount { .. }
            | Self::ConstantOutsideField { .. } => ErrorKind::Config,
            Self::Layer { source, .. } => source.kind(),
            Self::WrongStateLength { .. } | Self::InvalidRoundRange { .. } => ErrorKind::Input,
            Self::Field(e) => e.kind(),
        }
    }
}
