//! Gaussian elimination: rank, right kernel and inverse.

use alloc::vec::Vec;

use p2b_field::{BinaryElement, BinaryField};

use crate::{DenseMatrix, MatrixError};

/// Reduces `m` in place to reduced row echelon form and returns the pivot columns.
fn row_reduce(field: &BinaryField, m: &mut DenseMatrix) -> Vec<usize> {
    let (height, width) = (m.height(), m.width());
    let mut pivots = Vec::new();
    let mut rank = 0;
    for col in 0..width {
        if rank == height {
            break;
        }
        // The first row with an invertible (nonzero) entry in this column, if any.
        let Some((pivot, pivot_inv)) =
            (rank..height).find_map(|r| field.try_inverse(m.get(r, col)).map(|inv| (r, inv)))
        else {
            continue;
        };
        swap_rows(m, rank, pivot);

        for x in m.row_mut(rank) {
            *x = field.mul(*x, pivot_inv);
        }

        let pivot_row = m.row(rank).to_vec();
        for r in 0..height {
            let factor = m.get(r, col);
            if r == rank || factor == BinaryElement::ZERO {
                continue;
            }
            for (x, &p) in m.row_mut(r).iter_mut().zip(&pivot_row) {
                *x += field.mul(factor, p);
            }
        }
        pivots.push(col);
        rank += 1;
    }
    pivots
}

fn swap_rows(m: &mut DenseMatrix, a: usize, b: usize) {
    if a != b {
        let w = m.width();
        for c in 0..w {
            m.values.swap(a * w + c, b * w + c);
        }
    }
}

impl DenseMatrix {
    pub fn rank(&self, field: &BinaryField) -> usize {
        row_reduce(field, &mut self.clone()).len()
    }

    /// Basis of the right null space `{ v : M v = 0 }`, one basis vector per row.
    #[must_use]
    pub fn kernel(&self, field: &BinaryField) -> Self {
        let mut reduced = self.clone();
        let pivots = row_reduce(field, &mut reduced);
        let width = self.width();
        let mut basis = Self::zero(0, width);
        for free in (0..width).filter(|c| !pivots.contains(c)) {
            let mut v = alloc::vec![BinaryElement::ZERO; width];
            v[free] = BinaryElement::ONE;
            // Characteristic 2: -a = a.
            for (row, &p) in pivots.iter().enumerate() {
                v[p] = reduced.get(row, free);
            }
            basis.push_row(&v);
        }
        basis
    }

    /// `width - rank`, the dimension of the right null space.
    pub fn kernel_dimension(&self, field: &BinaryField) -> usize {
        self.width() - self.rank(field)
    }

    pub fn is_invertible(&self, field: &BinaryField) -> bool {
        self.is_square() && self.rank(field) == self.width()
    }

    /// Gauss-Jordan inverse of a square matrix.
    pub fn try_inverse(&self, field: &BinaryField) -> Result<Self, MatrixError> {
        let n = self.dimension()?;
        if n == 0 {
            return Ok(Self::zero(0, 0));
        }
        // Reduce [M | I] to [I | M^{-1}].
        let mut aug = Self::zero(n, 2 * n);
        for r in 0..n {
            aug.row_mut(r)[..n].copy_from_slice(self.row(r));
            aug.set(r, n + r, BinaryElement::ONE);
        }
        let pivots = row_reduce(field, &mut aug);
        if pivots.len() < n || pivots[n - 1] != n - 1 {
            return Err(MatrixError::Singular);
        }
        let values = aug.rows().flat_map(|row| row[n..].iter().copied()).collect();
        Ok(Self::new(values, n))
    }
}
