//! Selection and generation of the internal (MP) and external (MF) matrices.

use alloc::vec::Vec;

use p2b_field::{BinaryElement, BinaryField};
use p2b_matrix::DenseMatrix;
use p2b_mds::{InternalMatrixCheck, block_m4_matrix, m4_matrix, search_circulant_mds};
use p2b_symmetric::ConstantStream;
use tracing::{debug, info, instrument};

use crate::{
    CIRCULANT_ROW_6, Family, Poseidon2bError, cauchy_lists, internal_diagonal,
    is_standard_instance,
};

/// Where the internal matrix diagonal comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InternalMatrixStrategy {
    /// The fixed diagonal table of a standard instance.
    FixedTable,
    /// Diagonals sampled from the family's `MI-` stream until one passes validation.
    Generated,
}

impl InternalMatrixStrategy {
    pub fn select(degree: u32, width: usize, toy: bool) -> Self {
        if !toy && is_standard_instance(degree, width) {
            Self::FixedTable
        } else {
            Self::Generated
        }
    }
}

/// How the external matrix is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalMatrixStrategy {
    /// Widths 2 and 3, where the internal matrix is already MDS.
    SameAsInternal,
    /// Width 4.
    FixedM4,
    /// Width 6, circulant on [`CIRCULANT_ROW_6`].
    FixedCirculant,
    /// Poseidon2b at widths `4k`, `k > 1`: see [`block_m4_matrix`].
    BlockStructuredNonMds,
    /// Poseidonb at widths `4k`, `k > 1`.
    CauchyMds,
    /// Any other width: the first MDS circulant with small coefficients.
    CirculantMds,
}

impl ExternalMatrixStrategy {
    pub const fn select(family: Family, width: usize) -> Self {
        match width {
            2 | 3 => Self::SameAsInternal,
            4 => Self::FixedM4,
            6 => Self::FixedCirculant,
            w if w % 4 == 0 => match family {
                Family::Poseidon2b => Self::BlockStructuredNonMds,
                Family::Poseidonb => Self::CauchyMds,
            },
            _ => Self::CirculantMds,
        }
    }
}

/// Builds the linear layers of one instance.
#[derive(Debug, Clone, Copy)]
pub struct LinearLayerGenerator<'a> {
    pub field: &'a BinaryField,
    pub family: Family,
    pub width: usize,
    /// Ceiling on sampled diagonals for [`InternalMatrixStrategy::Generated`].
    pub max_generation_attempts: usize,
    /// Largest coefficient tried by [`ExternalMatrixStrategy::CirculantMds`].
    pub max_circulant_coefficient: u128,
}

impl LinearLayerGenerator<'_> {
    pub fn internal_matrix(
        &self,
        strategy: InternalMatrixStrategy,
    ) -> Result<DenseMatrix, Poseidon2bError> {
        let diagonal = match strategy {
            InternalMatrixStrategy::FixedTable => self.table_diagonal()?,
            InternalMatrixStrategy::Generated => self.generate_internal_diagonal()?,
        };
        Ok(DenseMatrix::ones_plus_diagonal(&diagonal))
    }

    fn table_diagonal(&self) -> Result<Vec<BinaryElement>, Poseidon2bError> {
        let degree = self.field.degree();
        let table = internal_diagonal(degree, self.width).ok_or(
            Poseidon2bError::UnsupportedInstance {
                degree,
                width: self.width,
            },
        )?;
        table
            .iter()
            .map(|&v| self.field.element(v).map_err(Poseidon2bError::from))
            .collect()
    }

    /// Draws `width` elements per attempt from the family's `MI-` stream, continuing the same
    /// stream across attempts, and returns the first diagonal whose matrix has a full-length
    /// subspace trail and is invertible. Widths 2 and 3 additionally require an MDS matrix,
    /// since it doubles as the external matrix.
    #[instrument(skip_all, fields(family = %self.family, field = %self.field, width = self.width))]
    pub fn generate_internal_diagonal(&self) -> Result<Vec<BinaryElement>, Poseidon2bError> {
        let check = InternalMatrixCheck {
            require_mds: self.width <= 3,
            require_invertible: true,
        };
        let mut stream = ConstantStream::new(self.family.matrix_label(), self.field);
        for attempt in 1..=self.max_generation_attempts {
            let diagonal = stream.elements(self.width);
            if check.check(self.field, &DenseMatrix::ones_plus_diagonal(&diagonal)) {
                info!(attempt, "found internal matrix");
                return Ok(diagonal);
            }
            debug!(attempt, "rejected internal matrix candidate");
        }
        Err(Poseidon2bError::InternalMatrixSearchExhausted {
            attempts: self.max_generation_attempts,
        })
    }

    pub fn external_matrix(
        &self,
        strategy: ExternalMatrixStrategy,
        internal: &DenseMatrix,
    ) -> Result<DenseMatrix, Poseidon2bError> {
        let field = self.field;
        let m = match strategy {
            ExternalMatrixStrategy::SameAsInternal => internal.clone(),
            ExternalMatrixStrategy::FixedM4 => m4_matrix(field),
            ExternalMatrixStrategy::FixedCirculant => {
                let row = CIRCULANT_ROW_6
                    .iter()
                    .map(|&v| field.element(v))
                    .collect::<Result<Vec<_>, _>>()?;
                DenseMatrix::circulant(&row)
            }
            ExternalMatrixStrategy::BlockStructuredNonMds => block_m4_matrix(field, self.width)?,
            ExternalMatrixStrategy::CauchyMds => {
                let (l1, l2) = self.cauchy_lists()?;
                DenseMatrix::cauchy(field, &l1, &l2)?
            }
            ExternalMatrixStrategy::CirculantMds => {
                search_circulant_mds(field, self.width, self.max_circulant_coefficient)?.1
            }
        };
        Ok(m)
    }

    /// The Cauchy lists `(L1, L2)`: the published pair for this degree and width, otherwise
    /// `L1 = [0, t)` and `L2 = [t, 2t)` read as canonical integers. The integer lists are
    /// disjoint, so every difference `L1[i] - L2[j]` (an XOR) is nonzero.
    pub fn cauchy_lists(
        &self,
    ) -> Result<(Vec<BinaryElement>, Vec<BinaryElement>), Poseidon2bError> {
        let degree = self.field.degree();
        if let Some((l1, l2)) = cauchy_lists(degree, self.width) {
            let to_elements = |list: &[u128]| {
                list.iter()
                    .map(|&v| self.field.element(v))
                    .collect::<Result<Vec<_>, _>>()
            };
            return Ok((to_elements(l1)?, to_elements(l2)?));
        }
        let t = self.width as u128;
        if 2 * t - 1 > self.field.order_minus_one() {
            return Err(Poseidon2bError::CauchyListsTooLong {
                degree,
                width: self.width,
            });
        }
        debug!(degree, width = self.width, "no published Cauchy lists, using integer lists");
        let l1 = (0..t).map(BinaryElement::new).collect();
        let l2 = (t..2 * t).map(BinaryElement::new).collect();
        Ok((l1, l2))
    }
}
