//! Core data types: sizes, splittable seeds, run configuration and recheck data.

use crate::error::{JourneyError, Result};
use std::fmt;
use std::str::FromStr;

/// Size parameter for controlling test data generation.
///
/// Size typically ranges from 0 to 100 and grows over the course of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Size(pub usize);

impl Size {
    /// Create a new size value.
    pub fn new(value: usize) -> Self {
        Size(value)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({})", self.0)
    }
}

/// Splittable random seed for deterministic test generation.
///
/// Seeds can be split to create independent random streams,
/// so every generated value is reproducible from `(Size, Seed)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Create a new seed from a single value.
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Split a seed into two independent seeds.
    /// Uses SplitMix64 splitting strategy for independence.
    pub fn split(self) -> (Self, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        let new_gamma = mix_gamma(output);

        (Seed(new_state, gamma), Seed(output, new_gamma))
    }

    /// Generate the next random value and advance the seed.
    pub fn next_u64(self) -> (u64, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        (output, Seed(new_state, gamma))
    }

    /// Generate a bounded random value in `[0, bound)`.
    pub fn next_bounded(self, bound: u64) -> (u64, Self) {
        let (value, new_seed) = self.next_u64();
        (((value as u128 * bound as u128) >> 64) as u64, new_seed)
    }

    /// Generate a random bool.
    pub fn next_bool(self) -> (bool, Self) {
        let (value, new_seed) = self.next_u64();
        (value & 1 == 1, new_seed)
    }

    /// Generate a fresh seed from the thread-local RNG.
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        // gamma must stay odd for a full SplitMix64 period
        Seed(rng.gen(), rng.gen::<u64>() | 1)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, {})", self.0, self.1)
    }
}

/// Configuration for property testing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of tests to run.
    pub test_limit: usize,

    /// Maximum number of successful shrinks to perform.
    pub shrink_limit: usize,

    /// Maximum size parameter to use.
    pub size_limit: usize,

    /// Fixed starting seed. `None` draws a random one per run.
    pub seed: Option<Seed>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            test_limit: 100,
            shrink_limit: 1000,
            size_limit: 100,
            seed: None,
        }
    }
}

impl Config {
    /// Use the given number of tests.
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.test_limit = tests;
        self
    }

    /// Use the given shrink limit.
    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.shrink_limit = shrinks;
        self
    }

    /// Start every run from the same seed.
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Everything needed to regenerate one failing case.
///
/// Encoded as `size_state_gamma_path` where `path` is the dot separated list
/// of child indices followed while shrinking (empty when nothing shrank).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecheckData {
    pub size: Size,
    pub seed: Seed,
    pub shrink_path: Vec<usize>,
}

impl RecheckData {
    pub fn new(size: Size, seed: Seed) -> Self {
        RecheckData {
            size,
            seed,
            shrink_path: Vec::new(),
        }
    }

    /// Render the compact form accepted by [`RecheckData::from_str`].
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RecheckData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<String> = self.shrink_path.iter().map(|i| i.to_string()).collect();
        write!(
            f,
            "{}_{}_{}_{}",
            self.size.0,
            self.seed.0,
            self.seed.1,
            path.join(".")
        )
    }
}

impl FromStr for RecheckData {
    type Err = JourneyError;

    fn from_str(input: &str) -> Result<Self> {
        let invalid = |reason: &str| JourneyError::InvalidRecheck {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = input.trim().split('_').collect();
        let [size, state, gamma, path] = parts.as_slice() else {
            return Err(invalid("expected four `_` separated fields"));
        };

        let size = size.parse::<usize>().map_err(|_| invalid("bad size"))?;
        let state = state.parse::<u64>().map_err(|_| invalid("bad seed state"))?;
        let gamma = gamma.parse::<u64>().map_err(|_| invalid("bad seed gamma"))?;
        let shrink_path = if path.is_empty() {
            Vec::new()
        } else {
            path.split('.')
                .map(|step| step.parse::<usize>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|_| invalid("bad shrink path"))?
        };

        Ok(RecheckData {
            size: Size(size),
            seed: Seed(state, gamma),
            shrink_path,
        })
    }
}

/// SplitMix64 mixing function for high-quality output.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Generate a good gamma value for SplitMix64 splitting.
fn mix_gamma(mut z: u64) -> u64 {
    z = splitmix64_mix(z);
    // Ensure gamma is odd for maximal period
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_is_deterministic() {
        let seed = Seed::from_u64(7);
        assert_eq!(seed.split(), seed.split());
        let (left, right) = seed.split();
        assert_ne!(left, right);
    }

    #[test]
    fn test_next_bounded_stays_in_bounds() {
        let mut seed = Seed::from_u64(99);
        for _ in 0..1000 {
            let (value, next) = seed.next_bounded(7);
            assert!(value < 7);
            seed = next;
        }
    }

    #[test]
    fn test_recheck_data_encoding() {
        let data = RecheckData {
            size: Size(42),
            seed: Seed(3525252562349695559, 13582854979373176535),
            shrink_path: vec![0, 3, 1],
        };
        let encoded = data.encode();
        assert_eq!(encoded, "42_3525252562349695559_13582854979373176535_0.3.1");
        assert_eq!(encoded.parse::<RecheckData>().unwrap(), data);
    }

    #[test]
    fn test_recheck_data_without_shrinks() {
        let data: RecheckData = "5_1_3_".parse().unwrap();
        assert_eq!(data, RecheckData::new(Size(5), Seed(1, 3)));
    }

    #[test]
    fn test_recheck_data_rejects_garbage() {
        assert!(matches!(
            "not-a-seed".parse::<RecheckData>(),
            Err(JourneyError::InvalidRecheck { .. })
        ));
        assert!(matches!(
            "1_2_3_4.x".parse::<RecheckData>(),
            Err(JourneyError::InvalidRecheck { .. })
        ));
    }
}
