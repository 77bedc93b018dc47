//! Exhaustive MDS validation.
//!
//! A `t x t` matrix is MDS when every square submatrix is invertible. The check enumerates
//! every pair of row and column index sets, so it costs `sum_i C(t, i)^2` rank computations.
//! It is meant for parameter generation and auditing, not for evaluation paths.

use itertools::Itertools;
use p2b_field::{BinaryField, FieldElement};
use p2b_matrix::DenseMatrix;
use tracing::instrument;

/// Checks that every square submatrix of size `2..=t-1` is invertible.
///
/// Single entries and the full matrix are not examined here; see [`is_mds`]. Non-square input
/// returns `false`.
pub fn is_all_invertible(field: &BinaryField, m: &DenseMatrix) -> bool {
    let Ok(t) = m.dimension() else {
        return false;
    };
    (2..t).all(|size| {
        (0..t).combinations(size).all(|rows| {
            (0..t)
                .combinations(size)
                .all(|cols| m.submatrix(&rows, &cols).is_invertible(field))
        })
    })
}

/// Full MDS test: nonzero entries, every proper submatrix invertible, and the matrix itself
/// invertible.
#[instrument(level = "debug", skip_all, fields(width = m.width()))]
pub fn is_mds(field: &BinaryField, m: &DenseMatrix) -> bool {
    m.is_square()
        && m.values.iter().all(|v| !v.is_zero())
        && is_all_invertible(field, m)
        && m.is_invertible(field)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use p2b_field::BinaryElement;

    use super::*;

    fn elems(values: &[u128]) -> Vec<BinaryElement> {
        values.iter().map(|&v| BinaryElement::new(v)).collect()
    }

    #[test]
    fn test_cauchy_matrices_are_mds() {
        let f = BinaryField::standard(8).unwrap();
        for t in 2..7 {
            let l1: Vec<_> = (0..t as u128).map(BinaryElement::new).collect();
            let l2: Vec<_> = (t as u128..2 * t as u128).map(BinaryElement::new).collect();
            let c = DenseMatrix::cauchy(&f, &l1, &l2).unwrap();
            assert!(is_mds(&f, &c), "t = {t}");
        }
    }

    #[test]
    fn test_detects_singular_minor() {
        let f = BinaryField::standard(8).unwrap();
        // The top-left 2x2 minor [[1, 2], [2, 4]] is singular but the matrix is not.
        let m = DenseMatrix::new(elems(&[1, 2, 3, 2, 4, 1, 5, 1, 1]), 3);
        assert!(m.is_invertible(&f));
        assert!(!is_all_invertible(&f, &m));
        assert!(!is_mds(&f, &m));
    }

    #[test]
    fn test_zero_entry_and_small_sizes() {
        let f = BinaryField::standard(8).unwrap();
        let with_zero = DenseMatrix::new(elems(&[1, 0, 1, 1]), 2);
        // No proper submatrices of size >= 2 exist for t = 2.
        assert!(is_all_invertible(&f, &with_zero));
        assert!(!is_mds(&f, &with_zero));
        assert!(is_mds(&f, &DenseMatrix::new(elems(&[2, 3, 3, 2]), 2)));
        assert!(!is_mds(&f, &DenseMatrix::zero(2, 3)));
    }

    #[test]
    fn test_ones_matrix_is_not_mds() {
        let f = BinaryField::standard(16).unwrap();
        assert!(!is_mds(&f, &DenseMatrix::ones(4)));
    }
}
