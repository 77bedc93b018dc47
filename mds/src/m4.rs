//! The 4x4 MDS matrix M4 from the Poseidon2 paper, https://eprint.iacr.org/2023/323.pdf,
//! read over GF(2^n).
//!
//! Integer entries are interpreted as polynomials in the generator `x` (so `5` is `x^2 + 1`).
//! Every entry is a sum of distinct powers of two, so the integer addition chain used for
//! prime fields carries over verbatim once doubling is replaced by multiplication by `x`.

use alloc::vec::Vec;

use p2b_field::{BinaryElement, BinaryField};
use p2b_matrix::{DenseMatrix, MatrixError};

/// ```ignore
///     M4 = [[5, 7, 1, 3],
///           [4, 6, 1, 1],
///           [1, 3, 5, 7],
///           [1, 1, 4, 6]];
/// ```
pub const M4: [[u128; 4]; 4] = [[5, 7, 1, 3], [4, 6, 1, 1], [1, 3, 5, 7], [1, 1, 4, 6]];

/// M4 as a dense matrix. The entries need at least three bits, so `field` must have degree 3
/// or more.
pub fn m4_matrix(field: &BinaryField) -> DenseMatrix {
    debug_assert!(field.degree() >= 3);
    let values = M4.iter().flatten().map(|&v| BinaryElement::new(v)).collect();
    DenseMatrix::new(values, 4)
}

/// The `t x t` block matrix built from `t / 4` copies of M4 per block row, with the diagonal
/// blocks scaled by the generator `x`.
///
/// ```ignore
///     [[x*M4, M4,   ..., M4  ],
///      [M4,   x*M4, ..., M4  ],
///      ...
///      [M4,   M4,   ..., x*M4]]
/// ```
///
/// Its branch number is `t / 4 + 4`, so it is not MDS for `t > 4`. The blocks are not scaled
/// by 2 as for prime fields because `x + 1` is invertible in characteristic 2 while `1 + 1` is
/// not.
pub fn block_m4_matrix(field: &BinaryField, t: usize) -> Result<DenseMatrix, MatrixError> {
    if t == 0 || t % 4 != 0 {
        return Err(MatrixError::DimensionMismatch {
            expected: t.next_multiple_of(4).max(4),
            actual: t,
        });
    }
    let m4 = m4_matrix(field);
    let diagonal = m4.scale(field, field.generator());
    let blocks_per_row = t / 4;
    let blocks: Vec<DenseMatrix> = (0..blocks_per_row * blocks_per_row)
        .map(|i| {
            if i / blocks_per_row == i % blocks_per_row {
                diagonal.clone()
            } else {
                m4.clone()
            }
        })
        .collect();
    DenseMatrix::from_blocks(&blocks, blocks_per_row)
}

/// Applies M4 in place with 8 additions and 6 multiplications by `x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct M4Mds;

impl M4Mds {
    #[inline]
    pub fn apply(&self, field: &BinaryField, input: &mut [BinaryElement]) {
        debug_assert_eq!(input.len(), 4);
        let t_0 = input[0] + input[1];
        let t_1 = input[2] + input[3];
        let t_2 = field.mul_by_x(input[1]) + t_1;
        let t_3 = field.mul_by_x(input[3]) + t_0;
        let t_4 = field.mul_by_x(field.mul_by_x(t_1)) + t_3;
        let t_5 = field.mul_by_x(field.mul_by_x(t_0)) + t_2;
        let t_6 = t_3 + t_5;
        let t_7 = t_2 + t_4;
        input[0] = t_6;
        input[1] = t_5;
        input[2] = t_7;
        input[3] = t_4;
    }
}
