use alloc::vec::Vec;

use p2b_field::{BinaryElement, BinaryField};
use p2b_hades::{Direction, HadesInstance};
use p2b_symmetric::{CryptographicPermutation, InvertiblePermutation, Permutation};

use crate::{
    ExternalMatrixStrategy, Family, InstanceBuilder, InstanceConfig, InternalMatrixStrategy,
    Poseidon2bError,
};

/// A Poseidon2b or Poseidonb permutation instance.
#[derive(Debug, Clone)]
pub struct Poseidon2bPermutation {
    pub(crate) config: InstanceConfig,
    pub(crate) internal_strategy: Option<InternalMatrixStrategy>,
    pub(crate) external_strategy: Option<ExternalMatrixStrategy>,
    pub(crate) hades: HadesInstance,
}

impl Poseidon2bPermutation {
    /// Builds the instance described by `config` with generated or published parameters.
    pub fn new(config: InstanceConfig) -> Result<Self, Poseidon2bError> {
        InstanceBuilder::new(config).build()
    }

    pub const fn family(&self) -> Family {
        self.config.family
    }

    pub const fn config(&self) -> &InstanceConfig {
        &self.config
    }

    /// `None` when the internal matrix was supplied explicitly.
    pub const fn internal_strategy(&self) -> Option<InternalMatrixStrategy> {
        self.internal_strategy
    }

    /// `None` when the external matrix was supplied explicitly.
    pub const fn external_strategy(&self) -> Option<ExternalMatrixStrategy> {
        self.external_strategy
    }

    /// The underlying round-function engine, with its matrices and constants.
    pub const fn hades(&self) -> &HadesInstance {
        &self.hades
    }

    pub const fn field(&self) -> &BinaryField {
        self.hades.field()
    }

    pub const fn width(&self) -> usize {
        self.hades.width()
    }

    pub fn evaluate(
        &self,
        state: &[BinaryElement],
        direction: Direction,
        start: usize,
        end: usize,
    ) -> Result<Vec<BinaryElement>, Poseidon2bError> {
        Ok(self.hades.evaluate(state, direction, start, end)?)
    }

    pub fn evaluate_trace(
        &self,
        state: &[BinaryElement],
        direction: Direction,
        start: usize,
        end: usize,
    ) -> Result<Vec<Vec<BinaryElement>>, Poseidon2bError> {
        Ok(self.hades.evaluate_trace(state, direction, start, end)?)
    }

    pub fn permute_checked(
        &self,
        state: &[BinaryElement],
    ) -> Result<Vec<BinaryElement>, Poseidon2bError> {
        Ok(self.hades.permute_checked(state)?)
    }

    pub fn inverse_checked(
        &self,
        state: &[BinaryElement],
    ) -> Result<Vec<BinaryElement>, Poseidon2bError> {
        Ok(self.hades.inverse_checked(state)?)
    }
}

impl Permutation<Vec<BinaryElement>> for Poseidon2bPermutation {
    fn permute(&self, input: Vec<BinaryElement>) -> Vec<BinaryElement> {
        self.hades.permute(input)
    }

    fn permute_mut(&self, input: &mut Vec<BinaryElement>) {
        self.hades.permute_mut(input);
    }
}

impl InvertiblePermutation<Vec<BinaryElement>> for Poseidon2bPermutation {
    fn inverse_permute(&self, output: Vec<BinaryElement>) -> Vec<BinaryElement> {
        self.hades.inverse_permute(output)
    }

    fn inverse_permute_mut(&self, output: &mut Vec<BinaryElement>) {
        self.hades.inverse_permute_mut(output);
    }
}

impl CryptographicPermutation<Vec<BinaryElement>> for Poseidon2bPermutation {}
