use alloc::vec::Vec;
use core::ops::Range;

use p2b_field::{BinaryElement, BinaryField};
use p2b_symmetric::ConstantStream;

use crate::HadesError;

/// One constant vector per round, in round order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundConstants {
    width: usize,
    rounds: Vec<Vec<BinaryElement>>,
}

impl RoundConstants {
    /// Splits a round-major flat list of `width * num_rounds` constants.
    pub fn from_flat(
        values: &[BinaryElement],
        width: usize,
        num_rounds: usize,
    ) -> Result<Self, HadesError> {
        if width == 0 {
            return Err(HadesError::EmptyState);
        }
        let expected = width * num_rounds;
        if values.len() != expected {
            return Err(HadesError::ConstantCount {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            rounds: values.chunks_exact(width).map(<[_]>::to_vec).collect(),
        })
    }

    /// Draws `width * num_rounds` elements from `stream`, round by round.
    pub fn from_stream(stream: &mut ConstantStream, width: usize, num_rounds: usize) -> Self {
        Self {
            width,
            rounds: (0..num_rounds).map(|_| stream.elements(width)).collect(),
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn round(&self, r: usize) -> &[BinaryElement] {
        &self.rounds[r]
    }

    pub fn to_flat(&self) -> Vec<BinaryElement> {
        self.rounds.concat()
    }

    /// Index of the first constant that is not a canonical element of `field`.
    pub(crate) fn first_outside(&self, field: &BinaryField) -> Option<usize> {
        self.rounds.iter().flatten().position(|&c| !field.contains(c))
    }

    /// Whether every partial round only carries a constant on word 0.
    pub fn is_optimized_for(&self, partial: Range<usize>) -> bool {
        self.rounds[partial]
            .iter()
            .all(|c| c[1..].iter().all(|v| *v == BinaryElement::ZERO))
    }

    /// Keeps only word 0 of the constants of each round in `partial`.
    ///
    /// The S-box of a partial round only touches word 0, so the other constants of those rounds
    /// are dropped rather than moved. The resulting permutation differs from the one built on
    /// the unmodified constants.
    pub(crate) fn optimize(&self, partial: Range<usize>) -> Self {
        let mut rounds = self.rounds.clone();
        for round in &mut rounds[partial] {
            round[1..].fill(BinaryElement::ZERO);
        }
        Self {
            width: self.width,
            rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_layout_is_round_major() {
        let values: Vec<_> = (0..6).map(BinaryElement::new).collect();
        let rc = RoundConstants::from_flat(&values, 2, 3).unwrap();
        assert_eq!(rc.num_rounds(), 3);
        assert_eq!(rc.round(1), &[BinaryElement::new(2), BinaryElement::new(3)]);
        assert_eq!(rc.to_flat(), values);
        assert_eq!(
            RoundConstants::from_flat(&values, 4, 2),
            Err(HadesError::ConstantCount {
                expected: 8,
                actual: 6
            })
        );
    }

    #[test]
    fn test_stream_matches_flat_draw() {
        let f = BinaryField::standard(8).unwrap();
        let rc = RoundConstants::from_stream(&mut ConstantStream::new("RC-Poseidon2b", &f), 4, 3);
        let flat = ConstantStream::new("RC-Poseidon2b", &f).elements(12);
        assert_eq!(rc.to_flat(), flat);
        assert_eq!(
            rc.round(0).iter().map(|e| e.value()).collect::<Vec<_>>(),
            [0xbe, 0x6f, 0xc9, 0x21]
        );
    }

    #[test]
    fn test_optimize_zeroes_partial_rounds() {
        let f = BinaryField::standard(16).unwrap();
        let rc = RoundConstants::from_stream(&mut ConstantStream::new("test", &f), 3, 7);
        let opt = rc.optimize(2..5);

        assert!(!rc.is_optimized_for(2..5));
        assert!(opt.is_optimized_for(2..5));
        for r in [0, 1, 5, 6] {
            assert_eq!(opt.round(r), rc.round(r));
        }
        for r in 2..5 {
            assert_eq!(opt.round(r), [rc.round(r)[0], BinaryElement::ZERO, BinaryElement::ZERO]);
        }
        // Partial rounds may run to the last round.
        assert!(rc.optimize(2..7).is_optimized_for(2..7));
        assert_eq!(rc.optimize(2..2), rc);
    }
}
