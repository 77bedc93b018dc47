use serde::{Deserialize, Serialize};

use crate::{Family, recommended_rounds};

const fn default_alpha() -> u64 {
    7
}

const fn default_max_generation_attempts() -> usize {
    1000
}

const fn default_max_circulant_coefficient() -> u128 {
    64
}

/// The parameter surface of a permutation instance.
///
/// Deserializes from a minimal `{"family": ..., "degree": ..., "width": ...}`; everything
/// else has a default. Round numbers left out are filled in from [`recommended_rounds`] when
/// the instance is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceConfig {
    pub family: Family,
    /// Field degree `n`.
    pub degree: u32,
    /// State width `t`.
    pub width: usize,
    #[serde(default)]
    pub rounds_f: Option<usize>,
    #[serde(default)]
    pub rounds_p: Option<usize>,
    #[serde(default = "default_alpha")]
    pub alpha: u64,
    /// Accept (n, t) pairs other than the published ones, generating their parameters.
    #[serde(default)]
    pub toy: bool,
    /// Drop every partial-round constant except the one on word 0.
    #[serde(default)]
    pub optimized_constants: bool,
    #[serde(default = "default_max_generation_attempts")]
    pub max_generation_attempts: usize,
    #[serde(default = "default_max_circulant_coefficient")]
    pub max_circulant_coefficient: u128,
    /// Low coefficients of the reduction polynomial `x^n + low`. `None` picks the standard
    /// polynomial for `n`.
    #[serde(default)]
    pub reduction_polynomial: Option<u128>,
}

impl InstanceConfig {
    pub const fn new(family: Family, degree: u32, width: usize) -> Self {
        Self {
            family,
            degree,
            width,
            rounds_f: None,
            rounds_p: None,
            alpha: default_alpha(),
            toy: false,
            optimized_constants: false,
            max_generation_attempts: default_max_generation_attempts(),
            max_circulant_coefficient: default_max_circulant_coefficient(),
            reduction_polynomial: None,
        }
    }

    /// A toy instance: any degree `n > 2` and width `t >= 2`.
    pub const fn toy(family: Family, degree: u32, width: usize) -> Self {
        Self {
            toy: true,
            ..Self::new(family, degree, width)
        }
    }

    #[must_use]
    pub const fn with_rounds(mut self, rounds_f: usize, rounds_p: usize) -> Self {
        self.rounds_f = Some(rounds_f);
        self.rounds_p = Some(rounds_p);
        self
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: u64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub const fn with_optimized_constants(mut self, optimized: bool) -> Self {
        self.optimized_constants = optimized;
        self
    }

    /// Explicit round numbers, falling back to the published ones.
    pub fn resolved_rounds(&self) -> Option<(usize, usize)> {
        let recommended = recommended_rounds(self.degree, self.width, self.alpha);
        let rounds_f = self.rounds_f.or(recommended.map(|r| r.0))?;
        let rounds_p = self.rounds_p.or(recommended.map(|r| r.1))?;
        Some((rounds_f, rounds_p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config: InstanceConfig =
            serde_json::from_str(r#"{"family": "Poseidonb", "degree": 64, "width": 12}"#).unwrap();
        assert_eq!(config, InstanceConfig::new(Family::Poseidonb, 64, 12));
        assert_eq!(config.alpha, 7);
        assert_eq!(config.max_generation_attempts, 1000);
        assert_eq!(config.resolved_rounds(), Some((8, 29)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = InstanceConfig::toy(Family::Poseidon2b, 8, 4)
            .with_rounds(8, 10)
            .with_optimized_constants(true);
        let json = serde_json::to_string(&config).unwrap();
        let back: InstanceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let json = r#"{"family": "Poseidon2b", "degree": 32, "width": 16, "rounds": 23}"#;
        assert!(serde_json::from_str::<InstanceConfig>(json).is_err());
    }

    #[test]
    fn test_resolved_rounds() {
        let config = InstanceConfig::new(Family::Poseidon2b, 32, 24);
        assert_eq!(config.resolved_rounds(), None);
        assert_eq!(config.with_rounds(8, 21).resolved_rounds(), Some((8, 21)));
        let partial_override = InstanceConfig {
            rounds_p: Some(20),
            ..InstanceConfig::new(Family::Poseidon2b, 32, 16)
        };
        assert_eq!(partial_override.resolved_rounds(), Some((8, 20)));
        assert_eq!(
            InstanceConfig::new(Family::Poseidon2b, 32, 16)
                .with_alpha(3)
                .resolved_rounds(),
            None
        );
    }
}
