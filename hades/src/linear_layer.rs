//! Linear layers with structured fast paths.
//!
//! Every layer keeps its dense matrix and the dense inverse. The forward direction uses a
//! cheaper formula when the matrix has a recognised shape; the inverse is always dense.

use alloc::vec::Vec;

use p2b_field::{BinaryElement, BinaryField};
use p2b_matrix::{DenseMatrix, MatrixError};
use p2b_mds::{M4Mds, block_m4_matrix, m4_matrix};

/// How the forward product is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinearLayerKind {
    /// Generic matrix-vector product.
    Dense,
    /// `J - I + D`: `y_i = sum(x) + (d_i + 1) x_i`. Holds the entries `d_i + 1`.
    Diffusion(Vec<BinaryElement>),
    /// The 4x4 matrix M4 itself.
    M4,
    /// The block matrix of [`block_m4_matrix`]: `u_b = M4 x_b`, `y_b = sum(u) + (x + 1) u_b`.
    BlockM4,
}

#[derive(Debug, Clone)]
pub struct LinearLayer {
    matrix: DenseMatrix,
    inverse: DenseMatrix,
    kind: LinearLayerKind,
}

impl LinearLayer {
    /// Inverts `matrix` and picks the fastest forward evaluation matching its structure.
    pub fn new(field: &BinaryField, matrix: DenseMatrix) -> Result<Self, MatrixError> {
        let inverse = matrix.try_inverse(field)?;
        let kind = detect_kind(field, &matrix);
        Ok(Self {
            matrix,
            inverse,
            kind,
        })
    }

    pub const fn matrix(&self) -> &DenseMatrix {
        &self.matrix
    }

    pub const fn inverse(&self) -> &DenseMatrix {
        &self.inverse
    }

    pub const fn kind(&self) -> &LinearLayerKind {
        &self.kind
    }

    pub fn width(&self) -> usize {
        self.matrix.width()
    }

    /// `state <- M * state`.
    pub fn apply(&self, field: &BinaryField, state: &mut [BinaryElement]) {
        match &self.kind {
            LinearLayerKind::Dense => {
                let out = self.matrix.mul_vec(field, state);
                state.copy_from_slice(&out);
            }
            LinearLayerKind::Diffusion(diag_plus_one) => {
                let sum: BinaryElement = state.iter().copied().sum();
                for (x, &d) in state.iter_mut().zip(diag_plus_one) {
                    *x = sum + field.mul(*x, d);
                }
            }
            LinearLayerKind::M4 => M4Mds.apply(field, state),
            LinearLayerKind::BlockM4 => apply_block_m4(field, state),
        }
    }

    /// `state <- M^{-1} * state`.
    pub fn apply_inverse(&self, field: &BinaryField, state: &mut [BinaryElement]) {
        let out = self.inverse.mul_vec(field, state);
        state.copy_from_slice(&out);
    }
}

fn detect_kind(field: &BinaryField, m: &DenseMatrix) -> LinearLayerKind {
    let t = m.width();
    let one = field.one();
    let off_diagonal_ones = (0..t).all(|r| (0..t).all(|c| r == c || m.get(r, c) == one));
    if t >= 2 && off_diagonal_ones {
        let diag_plus_one = m.diagonal_entries().into_iter().map(|d| d + one).collect();
        return LinearLayerKind::Diffusion(diag_plus_one);
    }
    if field.degree() >= 3 && t % 4 == 0 && t > 0 {
        if t == 4 && *m == m4_matrix(field) {
            return LinearLayerKind::M4;
        }
        if t > 4 && block_m4_matrix(field, t).is_ok_and(|b| b == *m) {
            return LinearLayerKind::BlockM4;
        }
    }
    LinearLayerKind::Dense
}

fn apply_block_m4(field: &BinaryField, state: &mut [BinaryElement]) {
    for chunk in state.chunks_exact_mut(4) {
        M4Mds.apply(field, chunk);
    }
    let sums: [BinaryElement; 4] =
        core::array::from_fn(|k| state.iter().skip(k).step_by(4).copied().sum());
    // sums[k] + u_i leaves the other blocks' contribution, x * u_i adds the scaled diagonal block.
    for (i, x) in state.iter_mut().enumerate() {
        *x = sums[i % 4] + *x + field.mul_by_x(*x);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn random_state(field: &BinaryField, t: usize, rng: &mut SmallRng) -> Vec<BinaryElement> {
        (0..t).map(|_| field.random_element(rng)).collect()
    }

    fn check_fast_path(field: &BinaryField, m: DenseMatrix, expected: &LinearLayerKind) {
        let mut rng = SmallRng::seed_from_u64(m.width() as u64);
        let layer = LinearLayer::new(field, m.clone()).unwrap();
        assert_eq!(layer.kind(), expected);
        for _ in 0..8 {
            let x = random_state(field, m.width(), &mut rng);
            let mut y = x.clone();
            layer.apply(field, &mut y);
            assert_eq!(y, m.mul_vec(field, &x));
            layer.apply_inverse(field, &mut y);
            assert_eq!(y, x);
        }
    }

    #[test]
    fn test_diffusion_fast_path() {
        let f = BinaryField::standard(64).unwrap();
        let diag: Vec<_> = [0x81, 0x2, 0x200, 0x80, 0x2000, 0x1000, 0x4000, 0x40]
            .into_iter()
            .map(BinaryElement::new)
            .collect();
        let d_plus_one = diag.iter().map(|&d| d + f.one()).collect();
        check_fast_path(
            &f,
            DenseMatrix::ones_plus_diagonal(&diag),
            &LinearLayerKind::Diffusion(d_plus_one),
        );
    }

    #[test]
    fn test_m4_fast_paths() {
        let f = BinaryField::standard(32).unwrap();
        check_fast_path(&f, m4_matrix(&f), &LinearLayerKind::M4);
        for t in [8, 16, 24] {
            check_fast_path(&f, block_m4_matrix(&f, t).unwrap(), &LinearLayerKind::BlockM4);
        }
    }

    #[test]
    fn test_dense_fallback() {
        let f = BinaryField::standard(8).unwrap();
        let row: Vec<_> = [1, 1, 2, 3, 5, 7]
            .into_iter()
            .map(BinaryElement::new)
            .collect();
        check_fast_path(&f, DenseMatrix::circulant(&row), &LinearLayerKind::Dense);
    }

    #[test]
    fn test_singular_matrix_is_rejected() {
        let f = BinaryField::standard(8).unwrap();
        assert_eq!(
            LinearLayer::new(&f, DenseMatrix::ones(3)).unwrap_err(),
            MatrixError::Singular
        );
    }
}
