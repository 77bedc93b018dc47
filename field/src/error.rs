//! Error types shared by the binary field layer.

use alloc::string::String;

use thiserror::Error;

/// Coarse classification of every failure the workspace can report.
///
/// Each crate defines its own error enum; all of them expose a `kind()` so that callers can
/// react to the category without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid parameters: exponents, degrees, polynomials, dimensions, unsupported instances.
    Config,
    /// A mathematical operation outside its domain: inverting zero or a singular matrix.
    Domain,
    /// Malformed caller input at evaluation time.
    Input,
    /// A bounded parameter search gave up.
    Generation,
}

/// Errors raised by [`BinaryField`](crate::BinaryField) construction and element handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The extension degree is outside the supported range `2..=128`.
    #[error("unsupported extension degree {degree}, expected 2..=128")]
    UnsupportedDegree { degree: u32 },

    /// The supplied reduction polynomial is reducible over GF(2).
    #[error("x^{degree} + {low:#x} is not irreducible over GF(2)")]
    ReduciblePolynomial {
        /// Degree of the polynomial.
        degree: u32,
        /// Coefficients below `x^degree`, bit `i` holding the coefficient of `x^i`.
        low: u128,
    },

    /// A canonical integer does not fit in `degree` bits.
    #[error("value {value:#x} is not a canonical element of GF(2^{degree})")]
    NonCanonical { value: u128, degree: u32 },

    /// The zero element has no multiplicative inverse.
    #[error("zero has no multiplicative inverse")]
    ZeroInverse,

    /// The S-box exponent shares a factor with `2^n - 1`.
    #[error("exponent {alpha} is not coprime to 2^{degree} - 1")]
    NonInvertibleExponent { alpha: u64, degree: u32 },

    /// A hex literal has the wrong width or contains invalid characters.
    #[error("invalid hex literal {literal:?} for GF(2^{degree}), expected {digits} hex digits")]
    InvalidHex {
        literal: String,
        degree: u32,
        digits: usize,
    },
}

impl FieldError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedDegree { .. }
            | Self::ReduciblePolynomial { .. }
            | Self::NonInvertibleExponent { .. } => ErrorKind::Config,
            Self::ZeroInverse => ErrorKind::Domain,
            Self::NonCanonical { .. } | Self::InvalidHex { .. } => ErrorKind::Input,
        }
    }
}
