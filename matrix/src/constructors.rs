//! Structured matrix constructors.

use alloc::vec::Vec;

use p2b_field::{BinaryElement, BinaryField};

use crate::{DenseMatrix, MatrixError};

impl DenseMatrix {
    #[must_use]
    pub fn identity(t: usize) -> Self {
        Self::diagonal(&alloc::vec![BinaryElement::ONE; t])
    }

    /// The all-ones matrix `J`.
    #[must_use]
    pub fn ones(t: usize) -> Self {
        Self::new(alloc::vec![BinaryElement::ONE; t * t], t)
    }

    #[must_use]
    pub fn diagonal(entries: &[BinaryElement]) -> Self {
        let t = entries.len();
        let mut m = Self::zero(t, t);
        for (i, &d) in entries.iter().enumerate() {
            m.set(i, i, d);
        }
        m
    }

    /// `J - I + diag(entries)`: ones off the diagonal and `entries` on it.
    #[must_use]
    pub fn ones_plus_diagonal(entries: &[BinaryElement]) -> Self {
        let t = entries.len();
        let mut m = Self::ones(t);
        for (i, &d) in entries.iter().enumerate() {
            m.set(i, i, d);
        }
        m
    }

    /// Circulant matrix whose first row is `row`; row `r` is `row` rotated right `r` times,
    /// so entry `(r, c)` is `row[(c - r) mod t]`.
    #[must_use]
    pub fn circulant(row: &[BinaryElement]) -> Self {
        let t = row.len();
        let mut rot = row.to_vec();
        let mut values = Vec::with_capacity(t * t);
        for _ in 0..t {
            values.extend_from_slice(&rot);
            rot.rotate_right(1);
        }
        Self::new(values, t)
    }

    /// Assembles a `k x k` grid of equally sized square blocks given in row-major order.
    pub fn from_blocks(blocks: &[Self], blocks_per_row: usize) -> Result<Self, MatrixError> {
        if blocks.len() != blocks_per_row * blocks_per_row {
            return Err(MatrixError::DimensionMismatch {
                expected: blocks_per_row * blocks_per_row,
                actual: blocks.len(),
            });
        }
        let b = match blocks.first() {
            Some(first) => first.dimension()?,
            None => return Ok(Self::zero(0, 0)),
        };
        if let Some(bad) = blocks.iter().find(|blk| blk.width != b || blk.height() != b) {
            return Err(MatrixError::DimensionMismatch {
                expected: b,
                actual: bad.width,
            });
        }
        let t = b * blocks_per_row;
        let mut m = Self::zero(t, t);
        for (index, blk) in blocks.iter().enumerate() {
            let (bi, bj) = (index / blocks_per_row, index % blocks_per_row);
            for (i, row) in blk.rows().enumerate() {
                m.row_mut(bi * b + i)[bj * b..(bj + 1) * b].copy_from_slice(row);
            }
        }
        Ok(m)
    }

    /// Cauchy matrix with entries `(l1[i] - l2[j])^{-1}`.
    ///
    /// Fails when an `l1` value equals an `l2` value (the difference has no inverse) or when a
    /// list repeats a value, which would make the matrix singular.
    pub fn cauchy(
        field: &BinaryField,
        l1: &[BinaryElement],
        l2: &[BinaryElement],
    ) -> Result<Self, MatrixError> {
        if l1.len() != l2.len() {
            return Err(MatrixError::DimensionMismatch {
                expected: l1.len(),
                actual: l2.len(),
            });
        }
        for list in [l1, l2] {
            for (first, a) in list.iter().enumerate() {
                if let Some(offset) = list[first + 1..].iter().position(|b| b == a) {
                    return Err(MatrixError::CauchyRepeatedEntry {
                        first,
                        second: first + 1 + offset,
                    });
                }
            }
        }
        let t = l1.len();
        let mut values = Vec::with_capacity(t * t);
        for (row, &a) in l1.iter().enumerate() {
            for (col, &b) in l2.iter().enumerate() {
                let inv = field
                    .try_inverse(a - b)
                    .ok_or(MatrixError::CauchyCollision { row, col })?;
                values.push(inv);
            }
        }
        Ok(Self::new(values, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elems(values: &[u128]) -> Vec<BinaryElement> {
        values.iter().map(|&v| BinaryElement::new(v)).collect()
    }

    #[test]
    fn test_identity_and_ones() {
        let i = DenseMatrix::identity(3);
        let j = DenseMatrix::ones(3);
        assert_eq!(i.diagonal_entries(), elems(&[1, 1, 1]));
        assert_eq!(i.get(0, 1), BinaryElement::ZERO);
        // J - I + D built two ways.
        let d = elems(&[5, 6, 7]);
        let expected = j.add(&i).unwrap().add(&DenseMatrix::diagonal(&d)).unwrap();
        assert_eq!(DenseMatrix::ones_plus_diagonal(&d), expected);
    }

    #[test]
    fn test_circulant_rotates_right() {
        let c = DenseMatrix::circulant(&elems(&[1, 2, 3]));
        assert_eq!(c.values, elems(&[1, 2, 3, 3, 1, 2, 2, 3, 1]));
        for r in 0..3 {
            for col in 0..3 {
                assert_eq!(c.get(r, col).value(), [1, 2, 3][(col + 3 - r) % 3]);
            }
        }
    }

    #[test]
    fn test_from_blocks() {
        let a = DenseMatrix::new(elems(&[1, 2, 3, 4]), 2);
        let z = DenseMatrix::zero(2, 2);
        let m = DenseMatrix::from_blocks(&[a.clone(), z.clone(), z, a], 2).unwrap();
        assert_eq!(m.width(), 4);
        assert_eq!(m.row(0), elems(&[1, 2, 0, 0]).as_slice());
        assert_eq!(m.row(3), elems(&[0, 0, 3, 4]).as_slice());
        assert!(DenseMatrix::from_blocks(&[DenseMatrix::identity(2)], 2).is_err());
    }

    #[test]
    fn test_cauchy_entries_and_errors() {
        let f = BinaryField::standard(8).unwrap();
        let l1 = elems(&[0, 1]);
        let l2 = elems(&[2, 3]);
        let c = DenseMatrix::cauchy(&f, &l1, &l2).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(f.mul(c.get(i, j), l1[i] - l2[j]), BinaryElement::ONE);
            }
        }
        assert_eq!(
            DenseMatrix::cauchy(&f, &elems(&[0, 3]), &l2),
            Err(MatrixError::CauchyCollision { row: 1, col: 1 })
        );
        assert_eq!(
            DenseMatrix::cauchy(&f, &elems(&[4, 4]), &l2),
            Err(MatrixError::CauchyRepeatedEntry {
                first: 0,
                second: 1
            })
        );
    }
}
