//! Subspace trails of the internal (partial round) matrix.
//!
//! For partial rounds only branch 0 goes through the S-box, so the subspace of states whose
//! first coordinate stays zero for `i` rounds is the kernel of the rows
//! `e_0, e_0 M, ..., e_0 M^(i-1)`. Each extra round shrinks that kernel by at most one
//! dimension. A good matrix shrinks it by exactly one per round until a single dimension is
//! left and then kills it on the next step; a matrix whose chain stalls leaves an invariant
//! subspace that survives arbitrarily many partial rounds.

use p2b_field::BinaryField;
use p2b_matrix::{DenseMatrix, MatrixError};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::is_mds;

/// Outcome of [`subspace_trail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubspaceTrail {
    /// The chain reaches the zero subspace after `length` rounds of dimension reduction.
    Finite {
        length: usize,
        /// Dimension of the last nonzero subspace in the chain, normally 1.
        terminal_dimension: usize,
    },
    /// The chain stalls: some nonzero subspace is mapped into itself forever.
    Infinite { steps: usize },
}

impl SubspaceTrail {
    pub const fn length(&self) -> Option<usize> {
        match self {
            Self::Finite { length, .. } => Some(*length),
            Self::Infinite { .. } => None,
        }
    }

    pub const fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite { .. })
    }
}

/// Computes the subspace trail of `m`.
///
/// Accumulates the first row of `M^0, M^1, ...` into a basis `K` and tracks the dimension of
/// its right kernel until it drops to at most one, then checks one more power to decide
/// between a finite trail (the kernel vanishes) and an infinite one.
#[instrument(level = "debug", skip_all, fields(width = m.width()))]
pub fn subspace_trail(field: &BinaryField, m: &DenseMatrix) -> Result<SubspaceTrail, MatrixError> {
    let t = m.dimension()?;
    let mut basis = DenseMatrix::zero(0, t);
    let mut power = DenseMatrix::identity(t);
    let mut steps = 0;
    let mut previous = t;

    let terminal_dimension = loop {
        basis.push_row(power.row(0));
        let dimension = basis.kernel_dimension(field);
        power = m.mul(field, &power)?;
        steps += 1;
        trace!(steps, dimension, "extended trail basis");
        if dimension <= 1 {
            break dimension;
        }
        if dimension == previous {
            return Ok(SubspaceTrail::Infinite { steps });
        }
        previous = dimension;
    };

    basis.push_row(power.row(0));
    if basis.kernel_dimension(field) == 0 {
        Ok(SubspaceTrail::Finite {
            length: steps,
            terminal_dimension,
        })
    } else {
        Ok(SubspaceTrail::Infinite { steps })
    }
}

/// Requirements checked by [`InternalMatrixCheck::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InternalMatrixCheck {
    pub require_mds: bool,
    pub require_invertible: bool,
}

impl InternalMatrixCheck {
    /// Accepts `m` when its subspace trail is finite with length exactly `t - 1`, and it
    /// meets the optional MDS and invertibility requirements.
    pub fn check(&self, field: &BinaryField, m: &DenseMatrix) -> bool {
        let Ok(t) = m.dimension() else {
            return false;
        };
        let full_trail = matches!(
            subspace_trail(field, m),
            Ok(SubspaceTrail::Finite { length, .. }) if length + 1 == t
        );
        full_trail
            && (!self.require_mds || is_mds(field, m))
            && (!self.require_invertible || m.is_invertible(field))
    }
}

/// Shorthand for [`InternalMatrixCheck::check`].
pub fn check_internal_matrix(
    field: &BinaryField,
    m: &DenseMatrix,
    require_mds: bool,
    require_invertible: bool,
) -> bool {
    InternalMatrixCheck {
        require_mds,
        require_invertible,
    }
    .check(field, m)
}
