use alloc::vec::Vec;

use p2b_field::{BinaryElement, BinaryField, inverse_exponent};
use p2b_hades::{HadesInstance, HadesParameters, RoundConstants};
use p2b_matrix::DenseMatrix;
use p2b_symmetric::ConstantStream;
use tracing::{info, instrument};

use crate::{
    ExternalMatrixStrategy, InstanceConfig, InternalMatrixStrategy, LinearLayerGenerator,
    Poseidon2bError, Poseidon2bPermutation, is_standard_instance,
};

/// Assembles a [`Poseidon2bPermutation`] from an [`InstanceConfig`], optionally with explicit
/// matrices or round constants in place of the generated ones.
///
/// An explicit external matrix also serves as the initial matrix. With widths 2 and 3 an
/// explicit internal matrix also serves as the external one unless that is given too.
#[derive(Debug, Clone)]
pub struct InstanceBuilder {
    config: InstanceConfig,
    external_matrix: Option<DenseMatrix>,
    internal_matrix: Option<DenseMatrix>,
    round_constants: Option<Vec<BinaryElement>>,
}

impl InstanceBuilder {
    pub const fn new(config: InstanceConfig) -> Self {
        Self {
            config,
            external_matrix: None,
            internal_matrix: None,
            round_constants: None,
        }
    }

    #[must_use]
    pub fn external_matrix(mut self, mf: DenseMatrix) -> Self {
        self.external_matrix = Some(mf);
        self
    }

    #[must_use]
    pub fn internal_matrix(mut self, mp: DenseMatrix) -> Self {
        self.internal_matrix = Some(mp);
        self
    }

    /// Round constants in round-major order, `width` per round.
    #[must_use]
    pub fn round_constants(mut self, constants: Vec<BinaryElement>) -> Self {
        self.round_constants = Some(constants);
        self
    }

    #[instrument(skip_all, fields(
        family = %self.config.family,
        degree = self.config.degree,
        width = self.config.width
    ))]
    pub fn build(self) -> Result<Poseidon2bPermutation, Poseidon2bError> {
        let Self {
            config,
            external_matrix,
            internal_matrix,
            round_constants,
        } = self;
        let (degree, width) = (config.degree, config.width);
        if !(3..=p2b_field::MAX_DEGREE).contains(&degree) {
            return Err(Poseidon2bError::UnsupportedDegree { degree });
        }
        if width < 2 {
            return Err(Poseidon2bError::WidthTooSmall { width });
        }
        if !config.toy && !is_standard_instance(degree, width) {
            return Err(Poseidon2bError::UnsupportedInstance { degree, width });
        }
        let field = match config.reduction_polynomial {
            Some(low) => BinaryField::new(degree, low)?,
            None => BinaryField::standard(degree)?,
        };
        // Fail on a bad exponent before any matrix search.
        inverse_exponent(config.alpha, degree)?;
        let (rounds_f, rounds_p) = config.resolved_rounds().ok_or(Poseidon2bError::MissingRounds {
            degree,
            width,
            alpha: config.alpha,
        })?;

        let generator = LinearLayerGenerator {
            field: &field,
            family: config.family,
            width,
            max_generation_attempts: config.max_generation_attempts,
            max_circulant_coefficient: config.max_circulant_coefficient,
        };
        let (mp, internal_strategy) = match internal_matrix {
            Some(mp) => (mp, None),
            None => {
                let strategy = InternalMatrixStrategy::select(degree, width, config.toy);
                (generator.internal_matrix(strategy)?, Some(strategy))
            }
        };
        let (mf, external_strategy) = match external_matrix {
            Some(mf) => (mf, None),
            None => {
                let strategy = ExternalMatrixStrategy::select(config.family, width);
                (generator.external_matrix(strategy, &mp)?, Some(strategy))
            }
        };

        let num_rounds = rounds_f + rounds_p;
        let round_constants = match round_constants {
            Some(values) => RoundConstants::from_flat(&values, width, num_rounds)?,
            None => {
                let mut stream = ConstantStream::new(config.family.constants_label(), &field);
                RoundConstants::from_stream(&mut stream, width, num_rounds)
            }
        };

        let mut hades = HadesInstance::new(HadesParameters {
            field,
            width,
            alpha: config.alpha,
            rounds_f,
            rounds_p,
            minit: mf.clone(),
            mf,
            mp,
            round_constants,
        })?;
        if config.optimized_constants {
            hades = hades.with_optimized_constants();
        }
        info!(rounds_f, rounds_p, ?internal_strategy, ?external_strategy, "built instance");

        Ok(Poseidon2bPermutation {
            config,
            internal_strategy,
            external_strategy,
            hades,
        })
    }
}
