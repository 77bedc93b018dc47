use p2b_field::{ErrorKind, FieldError};
use p2b_hades::HadesError;
use p2b_matrix::MatrixError;
use p2b_mds::MdsError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Poseidon2bError {
    /// Field degrees 0, 1 and 2 are too small and degrees above 128 are unsupported.
    #[error("unsupported field degree {degree}, expected 3..=128")]
    UnsupportedDegree { degree: u32 },

    #[error("state width {width} is too small, expected at least 2")]
    WidthTooSmall { width: usize },

    /// The (n, t) pair is not a published instance and the toy override is off.
    #[error("GF(2^{degree}) with width {width} is not a published instance; set `toy` to allow it")]
    UnsupportedInstance { degree: u32, width: usize },

    /// No round numbers were given and none are published for these parameters.
    #[error("no published round numbers for n = {degree}, t = {width}, alpha = {alpha}")]
    MissingRounds { degree: u32, width: usize, alpha: u64 },

    /// The field is too small to hold `2t` distinct Cauchy list entries.
    #[error("GF(2^{degree}) is too small for a Cauchy matrix of width {width}")]
    CauchyListsTooLong { degree: u32, width: usize },

    /// No sampled internal matrix passed validation within the retry ceiling.
    #[error("no valid internal matrix found in {attempts} attempts")]
    InternalMatrixSearchExhausted { attempts: usize },

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error(transparent)]
    Mds(#[from] MdsError),

    #[error(transparent)]
    Hades(#[from] HadesError),
}

impl Poseidon2bError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedDegree { .. }
            | Self::WidthTooSmall { .. }
            | Self::UnsupportedInstance { .. }
            | Self::MissingRounds { .. }
            | Self::CauchyListsTooLong { .. } => ErrorKind::Config,
            Self::InternalMatrixSearchExhausted { .. } => ErrorKind::Generation,
            Self::Field(e) => e.kind(),
            Self::Matrix(e) => e.kind(),
            Self::Mds(e) => e.kind(),
            Self::Hades(e) => e.kind(),
        }
    }
}
