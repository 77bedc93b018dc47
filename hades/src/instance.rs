use alloc::vec::Vec;
use core::ops::Range;

use p2b_field::{BinaryElement, BinaryField, exp_by_squaring, inverse_exponent};
use p2b_matrix::DenseMatrix;
use p2b_symmetric::{CryptographicPermutation, InvertiblePermutation, Permutation};
use tracing::{debug, instrument};

use crate::{HadesError, LinearLayer, RoundConstants};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Inverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundKind {
    /// S-box on every word, then the external matrix.
    Full,
    /// S-box on word 0 only, then the internal matrix.
    Partial,
}

/// Everything needed to assemble a [`HadesInstance`].
#[derive(Debug, Clone)]
pub struct HadesParameters {
    pub field: BinaryField,
    pub width: usize,
    pub alpha: u64,
    /// Total number of full rounds, split as `rounds_f / 2` before the partial rounds and the
    /// rest after.
    pub rounds_f: usize,
    pub rounds_p: usize,
    /// Applied once before the first round.
    pub minit: DenseMatrix,
    /// Linear layer of full rounds.
    pub mf: DenseMatrix,
    /// Linear layer of partial rounds.
    pub mp: DenseMatrix,
    pub round_constants: RoundConstants,
}

/// An immutable, validated HADES permutation over GF(2^n).
///
/// Round `r` is partial when `rf <= r < rf + rounds_p` with `rf = rounds_f / 2`, and full
/// otherwise. A round adds its constants, applies `x -> x^alpha` (to all words or to word 0)
/// and multiplies by MF or MP. The forward direction multiplies by Minit before round 0.
#[derive(Debug, Clone)]
pub struct HadesInstance {
    field: BinaryField,
    width: usize,
    alpha: u64,
    alpha_inv: u128,
    rounds_f_beginning: usize,
    rounds_f_end: usize,
    rounds_p: usize,
    minit: LinearLayer,
    mf: LinearLayer,
    mp: LinearLayer,
    round_constants: RoundConstants,
}

impl HadesInstance {
    /// Validates `params` and precomputes the matrix inverses and the inverse S-box exponent.
    #[instrument(level = "debug", skip_all, fields(field = %params.field, width = params.width))]
    pub fn new(params: HadesParameters) -> Result<Self, HadesError> {
        let HadesParameters {
            field,
            width,
            alpha,
            rounds_f,
            rounds_p,
            minit,
            mf,
            mp,
            round_constants,
        } = params;
        if width == 0 {
            return Err(HadesError::EmptyState);
        }
        let alpha_inv = inverse_exponent(alpha, field.degree())?;

        let layer = |name: &'static str, m: DenseMatrix| {
            if m.width() != width || m.height() != width {
                return Err(HadesError::LayerShape {
                    layer: name,
                    expected: width,
                    height: m.height(),
                    width: m.width(),
                });
            }
            if !m.is_over(&field) {
                return Err(HadesError::LayerOutsideField { layer: name });
            }
            LinearLayer::new(&field, m).map_err(|source| HadesError::Layer {
                layer: name,
                source,
            })
        };
        let minit = layer("initial", minit)?;
        let mf = layer("external", mf)?;
        let mp = layer("internal", mp)?;

        let num_rounds = rounds_f + rounds_p;
        let expected = width * num_rounds;
        if round_constants.width() != width || round_constants.num_rounds() != num_rounds {
            return Err(HadesError::ConstantCount {
                expected,
                actual: round_constants.width() * round_constants.num_rounds(),
            });
        }
        if let Some(index) = round_constants.first_outside(&field) {
            return Err(HadesError::ConstantOutsideField { index });
        }

        debug!(alpha, rounds_f, rounds_p, "assembled HADES instance");
        Ok(Self {
            field,
            width,
            alpha,
            alpha_inv,
            rounds_f_beginning: rounds_f / 2,
            rounds_f_end: rounds_f - rounds_f / 2,
            rounds_p,
            minit,
            mf,
            mp,
            round_constants,
        })
    }

    /// Zeroes every round constant of the partial rounds except the one on word 0, so that
    /// partial rounds add a single constant in front of their single S-box.
    ///
    /// This selects a different permutation from the same constant table; the full rounds and
    /// word 0 of each partial round keep their constants.
    #[must_use]
    #[instrument(level = "debug", skip_all)]
    pub fn with_optimized_constants(mut self) -> Self {
        self.round_constants = self.round_constants.optimize(self.partial_rounds());
        self
    }

    pub const fn field(&self) -> &BinaryField {
        &self.field
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn alpha(&self) -> u64 {
        self.alpha
    }

    pub const fn alpha_inv(&self) -> u128 {
        self.alpha_inv
    }

    pub const fn rounds_f(&self) -> usize {
        self.rounds_f_beginning + self.rounds_f_end
    }

    pub const fn rounds_p(&self) -> usize {
        self.rounds_p
    }

    pub const fn num_rounds(&self) -> usize {
        self.rounds_f() + self.rounds_p
    }

    /// The partial rounds, `rf..rf + rounds_p`.
    pub const fn partial_rounds(&self) -> Range<usize> {
        self.rounds_f_beginning..self.rounds_f_beginning + self.rounds_p
    }

    pub const fn minit(&self) -> &LinearLayer {
        &self.minit
    }

    pub const fn mf(&self) -> &LinearLayer {
        &self.mf
    }

    pub const fn mp(&self) -> &LinearLayer {
        &self.mp
    }

    pub const fn round_constants(&self) -> &RoundConstants {
        &self.round_constants
    }

    pub const fn round_kind(&self, r: usize) -> RoundKind {
        if r >= self.rounds_f_beginning && r < self.rounds_f_beginning + self.rounds_p {
            RoundKind::Partial
        } else {
            RoundKind::Full
        }
    }

    /// Evaluates rounds `start..end` in `direction` and returns the resulting state.
    ///
    /// Inverse evaluation undoes forward evaluation over the same range. An empty range
    /// returns the input unchanged.
    pub fn evaluate(
        &self,
        state: &[BinaryElement],
        direction: Direction,
        start: usize,
        end: usize,
    ) -> Result<Vec<BinaryElement>, HadesError> {
        self.check_call(state, start, end)?;
        let mut state = state.to_vec();
        self.run(&mut state, direction, start..end, |_| {});
        Ok(state)
    }

    /// Like [`evaluate`](Self::evaluate), but returns every intermediate state: the input,
    /// the state after each round in processing order and the state after Minit (or its
    /// inverse) whenever that step runs.
    pub fn evaluate_trace(
        &self,
        state: &[BinaryElement],
        direction: Direction,
        start: usize,
        end: usize,
    ) -> Result<Vec<Vec<BinaryElement>>, HadesError> {
        self.check_call(state, start, end)?;
        let mut trace = alloc::vec![state.to_vec()];
        let mut state = state.to_vec();
        self.run(&mut state, direction, start..end, |s| trace.push(s.to_vec()));
        Ok(trace)
    }

    /// Forward evaluation over all rounds.
    pub fn permute_checked(
        &self,
        state: &[BinaryElement],
    ) -> Result<Vec<BinaryElement>, HadesError> {
        self.evaluate(state, Direction::Forward, 0, self.num_rounds())
    }

    /// Inverse evaluation over all rounds.
    pub fn inverse_checked(
        &self,
        state: &[BinaryElement],
    ) -> Result<Vec<BinaryElement>, HadesError> {
        self.evaluate(state, Direction::Inverse, 0, self.num_rounds())
    }

    fn check_call(
        &self,
        state: &[BinaryElement],
        start: usize,
        end: usize,
    ) -> Result<(), HadesError> {
        if state.len() != self.width {
            return Err(HadesError::WrongStateLength {
                expected: self.width,
                actual: state.len(),
            });
        }
        if start > end || end > self.num_rounds() {
            return Err(HadesError::InvalidRoundRange {
                start,
                end,
                rounds: self.num_rounds(),
            });
        }
        Ok(())
    }

    fn run(
        &self,
        state: &mut [BinaryElement],
        direction: Direction,
        rounds: Range<usize>,
        mut observe: impl FnMut(&[BinaryElement]),
    ) {
        if rounds.is_empty() {
            return;
        }
        let touches_first_round = rounds.start == 0;
        match direction {
            Direction::Forward => {
                if touches_first_round {
                    self.minit.apply(&self.field, state);
                    observe(state);
                }
                for r in rounds {
                    self.round(state, r);
                    observe(state);
                }
            }
            Direction::Inverse => {
                for r in rounds.rev() {
                    self.inverse_round(state, r);
                    observe(state);
                }
                if touches_first_round {
                    self.minit.apply_inverse(&self.field, state);
                    observe(state);
                }
            }
        }
    }

    fn round(&self, state: &mut [BinaryElement], r: usize) {
        for (x, &c) in state.iter_mut().zip(self.round_constants.round(r)) {
            *x += c;
        }
        let alpha = u128::from(self.alpha);
        match self.round_kind(r) {
            RoundKind::Full => {
                sbox_layer(&self.field, state, alpha);
                self.mf.apply(&self.field, state);
            }
            RoundKind::Partial => {
                state[0] = sbox(&self.field, state[0], alpha);
                self.mp.apply(&self.field, state);
            }
        }
    }

    fn inverse_round(&self, state: &mut [BinaryElement], r: usize) {
        match self.round_kind(r) {
            RoundKind::Full => {
                self.mf.apply_inverse(&self.field, state);
                sbox_layer(&self.field, state, self.alpha_inv);
            }
            RoundKind::Partial => {
                self.mp.apply_inverse(&self.field, state);
                state[0] = sbox(&self.field, state[0], self.alpha_inv);
            }
        }
        // Subtraction is addition in characteristic 2.
        for (x, &c) in state.iter_mut().zip(self.round_constants.round(r)) {
            *x -= c;
        }
    }
}

/// The power map `x -> x^exponent`.
#[inline]
pub fn sbox(field: &BinaryField, x: BinaryElement, exponent: u128) -> BinaryElement {
    exp_by_squaring(field, x, exponent)
}

fn sbox_layer(field: &BinaryField, state: &mut [BinaryElement], exponent: u128) {
    for x in state.iter_mut() {
        *x = sbox(field, *x, exponent);
    }
}

impl Permutation<Vec<BinaryElement>> for HadesInstance {
    fn permute(&self, mut input: Vec<BinaryElement>) -> Vec<BinaryElement> {
        self.permute_mut(&mut input);
        input
    }

    /// # Panics
    /// Panics if `input` does not have `width` words; use
    /// [`permute_checked`](HadesInstance::permute_checked) to get an error instead.
    fn permute_mut(&self, input: &mut Vec<BinaryElement>) {
        assert_eq!(input.len(), self.width);
        self.run(input, Direction::Forward, 0..self.num_rounds(), |_| {});
    }
}

impl InvertiblePermutation<Vec<BinaryElement>> for HadesInstance {
    fn inverse_permute(&self, mut output: Vec<BinaryElement>) -> Vec<BinaryElement> {
        self.inverse_permute_mut(&mut output);
        output
    }

    /// # Panics
    /// Panics if `output` does not have `width` words; use
    /// [`inverse_checked`](HadesInstance::inverse_checked) to get an error instead.
    fn inverse_permute_mut(&self, output: &mut Vec<BinaryElement>) {
        assert_eq!(output.len(), self.width);
        self.run(output, Direction::Inverse, 0..self.num_rounds(), |_| {});
    }
}

impl CryptographicPermutation<Vec<BinaryElement>> for HadesInstance {}
