use alloc::vec::Vec;

use itertools::Itertools;
use p2b_field::{BinaryElement, BinaryField};
use p2b_matrix::DenseMatrix;
use tracing::{debug, instrument};

use crate::{MdsError, is_mds};

/// Searches for an MDS circulant matrix with small coefficients.
///
/// Candidate first rows are nondecreasing sequences over `1..=limit` in lexicographic order,
/// with `limit` starting at `t + 1` and growing until `max_coefficient` (or the largest field
/// element). Returns the first row found together with its circulant matrix.
#[instrument(skip(field), fields(field = %field))]
pub fn search_circulant_mds(
    field: &BinaryField,
    t: usize,
    max_coefficient: u128,
) -> Result<(Vec<BinaryElement>, DenseMatrix), MdsError> {
    let bound = max_coefficient.min(field.order_minus_one());
    let exhausted = MdsError::CirculantSearchExhausted {
        width: t,
        max_coefficient: bound,
    };
    if t == 0 {
        return Err(exhausted);
    }
    for limit in (t as u128 + 1)..=bound {
        debug!(limit, "searching circulant rows");
        let found = (1..=limit)
            .map(BinaryElement::new)
            .combinations_with_replacement(t)
            .map(|row| {
                let m = DenseMatrix::circulant(&row);
                (row, m)
            })
            .find(|(_, m)| is_mds(field, m));
        if let Some(found) = found {
            return Ok(found);
        }
    }
    Err(exhausted)
}
