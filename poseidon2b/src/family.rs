use core::fmt;

use serde::{Deserialize, Serialize};

/// The two permutation families sharing the HADES engine.
///
/// They differ only in the external matrix used for widths that are multiples of 4 (other than
/// 4 itself) and in the labels that seed their constant streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    /// Block-structured external matrix built from M4 (not MDS, cheaper).
    Poseidon2b,
    /// Cauchy MDS external matrix.
    Poseidonb,
}

impl Family {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Poseidon2b => "Poseidon2b",
            Self::Poseidonb => "Poseidonb",
        }
    }

    /// Seed label of the stream drawing toy internal-matrix diagonals.
    pub const fn matrix_label(self) -> &'static str {
        match self {
            Self::Poseidon2b => "MI-Poseidon2b",
            Self::Poseidonb => "MI-Poseidonb",
        }
    }

    /// Seed label of the round-constant stream.
    pub const fn constants_label(self) -> &'static str {
        match self {
            Self::Poseidon2b => "RC-Poseidon2b",
            Self::Poseidonb => "RC-Poseidonb",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
