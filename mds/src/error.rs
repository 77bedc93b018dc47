use p2b_field::ErrorKind;
use p2b_matrix::MatrixError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MdsError {
    /// No circulant with coefficients up to the bound is MDS.
    #[error("no MDS circulant of width {width} with coefficients up to {max_coefficient}")]
    CirculantSearchExhausted { width: usize, max_coefficient: u128 },

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

impl MdsError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CirculantSearchExhausted { .. } => ErrorKind::Generation,
            Self::Matrix(e) => e.kind(),
        }
    }
}
