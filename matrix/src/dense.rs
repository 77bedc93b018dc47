use alloc::vec;
use alloc::vec::Vec;

use p2b_field::{BinaryElement, BinaryField};
use serde::{Deserialize, Serialize};

use crate::MatrixError;

/// A dense matrix over GF(2^n) stored in row-major form.
///
/// The field is not stored; every operation that multiplies takes the [`BinaryField`] the
/// entries belong to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DenseMatrix {
    /// All values, stored in row-major order.
    pub values: Vec<BinaryElement>,
    pub width: usize,
}

impl DenseMatrix {
    #[must_use]
    pub fn new(values: Vec<BinaryElement>, width: usize) -> Self {
        debug_assert!(width > 0 || values.is_empty());
        debug_assert_eq!(values.len() % width.max(1), 0);
        Self { values, width }
    }

    /// Builds a matrix from nested rows, rejecting ragged input.
    pub fn from_rows(rows: &[Vec<BinaryElement>]) -> Result<Self, MatrixError> {
        let width = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(width * rows.len());
        for (row, r) in rows.iter().enumerate() {
            if r.len() != width {
                return Err(MatrixError::RaggedRows {
                    row,
                    expected: width,
                    actual: r.len(),
                });
            }
            values.extend_from_slice(r);
        }
        Ok(Self { values, width })
    }

    /// Builds a matrix from canonical integers, checking each against `field`.
    pub fn from_u128_rows<const W: usize>(
        field: &BinaryField,
        rows: &[[u128; W]],
    ) -> Result<Self, MatrixError> {
        let values = rows
            .iter()
            .flatten()
            .map(|&v| field.element(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(values, W))
    }

    #[must_use]
    pub fn zero(height: usize, width: usize) -> Self {
        Self::new(vec![BinaryElement::ZERO; height * width], width)
    }

    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.values.len() / self.width
        }
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.height() == self.width
    }

    /// Returns the side length, or an error for non-square matrices.
    pub fn dimension(&self) -> Result<usize, MatrixError> {
        if self.is_square() {
            Ok(self.width)
        } else {
            Err(MatrixError::NotSquare {
                height: self.height(),
                width: self.width,
            })
        }
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> BinaryElement {
        self.values[r * self.width + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: BinaryElement) {
        self.values[r * self.width + c] = value;
    }

    #[inline]
    pub fn row(&self, r: usize) -> &[BinaryElement] {
        debug_assert!(r < self.height());
        &self.values[r * self.width..(r + 1) * self.width]
    }

    pub fn row_mut(&mut self, r: usize) -> &mut [BinaryElement] {
        debug_assert!(r < self.height());
        &mut self.values[r * self.width..(r + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[BinaryElement]> {
        self.values.chunks_exact(self.width.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<BinaryElement>> {
        self.rows().map(<[_]>::to_vec).collect()
    }

    /// Entries on the main diagonal.
    pub fn diagonal_entries(&self) -> Vec<BinaryElement> {
        (0..self.height().min(self.width))
            .map(|i| self.get(i, i))
            .collect()
    }

    /// Appends one row.
    pub fn push_row(&mut self, row: &[BinaryElement]) {
        debug_assert_eq!(row.len(), self.width);
        self.values.extend_from_slice(row);
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let height = self.height();
        let values = (0..self.width)
            .flat_map(|c| (0..height).map(move |r| (r, c)))
            .map(|(r, c)| self.get(r, c))
            .collect();
        Self::new(values, height)
    }

    /// `M * v`. The caller guarantees `v.len() == self.width()`.
    pub fn mul_vec(&self, field: &BinaryField, v: &[BinaryElement]) -> Vec<BinaryElement> {
        debug_assert_eq!(v.len(), self.width);
        self.rows()
            .map(|row| dot_product(field, row, v))
            .collect()
    }

    /// Checked `M * v`.
    pub fn try_mul_vec(
        &self,
        field: &BinaryField,
        v: &[BinaryElement],
    ) -> Result<Vec<BinaryElement>, MatrixError> {
        if v.len() != self.width {
            return Err(MatrixError::DimensionMismatch {
                expected: self.width,
                actual: v.len(),
            });
        }
        Ok(self.mul_vec(field, v))
    }

    /// Matrix product `self * rhs`.
    pub fn mul(&self, field: &BinaryField, rhs: &Self) -> Result<Self, MatrixError> {
        if self.width != rhs.height() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.width,
                actual: rhs.height(),
            });
        }
        let mut out = Self::zero(self.height(), rhs.width);
        for (r, row) in self.rows().enumerate() {
            for (k, &a) in row.iter().enumerate() {
                if a == BinaryElement::ZERO {
                    continue;
                }
                for (c, &b) in rhs.row(k).iter().enumerate() {
                    out.values[r * rhs.width + c] += field.mul(a, b);
                }
            }
        }
        Ok(out)
    }

    /// Entrywise sum.
    pub fn add(&self, rhs: &Self) -> Result<Self, MatrixError> {
        if self.width != rhs.width || self.values.len() != rhs.values.len() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.values.len(),
                actual: rhs.values.len(),
            });
        }
        let values = self
            .values
            .iter()
            .zip(&rhs.values)
            .map(|(&a, &b)| a + b)
            .collect();
        Ok(Self::new(values, self.width))
    }

    #[must_use]
    pub fn scale(&self, field: &BinaryField, s: BinaryElement) -> Self {
        Self::new(
            self.values.iter().map(|&v| field.mul(v, s)).collect(),
            self.width,
        )
    }

    /// Extracts the submatrix on the given row and column index sets.
    #[must_use]
    pub fn submatrix(&self, rows: &[usize], cols: &[usize]) -> Self {
        let values = rows
            .iter()
            .flat_map(|&r| cols.iter().map(move |&c| (r, c)))
            .map(|(r, c)| self.get(r, c))
            .collect();
        Self::new(values, cols.len())
    }

    /// Whether every entry lies in `field`.
    pub fn is_over(&self, field: &BinaryField) -> bool {
        self.values.iter().all(|&v| field.contains(v))
    }
}

/// Sum of pairwise products.
#[inline]
pub fn dot_product(field: &BinaryField, u: &[BinaryElement], v: &[BinaryElement]) -> BinaryElement {
    u.iter().zip(v).map(|(&a, &b)| field.mul(a, b)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f8() -> BinaryField {
        BinaryField::standard(8).unwrap()
    }

    fn m(values: &[u128], width: usize) -> DenseMatrix {
        DenseMatrix::new(values.iter().map(|&v| BinaryElement::new(v)).collect(), width)
    }

    #[test]
    fn test_shape_accessors() {
        let a = m(&[1, 2, 3, 4, 5, 6], 3);
        assert_eq!(a.height(), 2);
        assert!(!a.is_square());
        assert_eq!(
            a.dimension(),
            Err(MatrixError::NotSquare {
                height: 2,
                width: 3
            })
        );
        assert_eq!(a.row(1), m(&[4, 5, 6], 3).values.as_slice());
        assert_eq!(a.transpose(), m(&[1, 4, 2, 5, 3, 6], 2));
        assert_eq!(a.submatrix(&[1], &[0, 2]), m(&[4, 6], 2));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let rows = [
            vec![BinaryElement::ONE, BinaryElement::ZERO],
            vec![BinaryElement::ONE],
        ];
        assert_eq!(
            DenseMatrix::from_rows(&rows),
            Err(MatrixError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_from_u128_rows_checks_range() {
        let f = BinaryField::standard(4).unwrap();
        assert!(DenseMatrix::from_u128_rows(&f, &[[1, 15], [3, 4]]).is_ok());
        assert!(DenseMatrix::from_u128_rows(&f, &[[1, 16], [3, 4]]).is_err());
    }

    #[test]
    fn test_products_agree() {
        let f = f8();
        let a = m(&[0x57, 0x02, 0x01, 0x03], 2);
        let b = m(&[0x83, 0x00, 0x10, 0x01], 2);
        let ab = a.mul(&f, &b).unwrap();
        let v = [BinaryElement::new(0x13), BinaryElement::new(0x25)];
        // (AB)v = A(Bv)
        assert_eq!(ab.mul_vec(&f, &v), a.mul_vec(&f, &b.mul_vec(&f, &v)));
        // 0x57 * 0x83 + 0x02 * 0x10
        assert_eq!(ab.get(0, 0).value(), 0xc1 ^ 0x20);
        assert!(a.try_mul_vec(&f, &v[..1]).is_err());
        assert!(a.mul(&f, &m(&[1, 2, 3], 3)).is_err());
    }

    #[test]
    fn test_add_and_scale() {
        let f = f8();
        let a = m(&[1, 2, 3, 4], 2);
        assert_eq!(a.add(&a).unwrap(), DenseMatrix::zero(2, 2));
        assert_eq!(a.scale(&f, BinaryElement::new(2)), m(&[2, 4, 6, 8], 2));
    }
}
