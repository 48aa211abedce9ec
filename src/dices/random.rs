use num::{BigInt, ToPrimitive, Zero};
use rand::{Rng, distr::Distribution};
use tracing::debug;

use super::Dice;
use crate::Rational;

impl Distribution<Rational> for Dice {
    /// Roll every die using `rng` and add up the scaled groups and the
    /// modifier. This never looks at the probability table.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Rational {
        let mut sum = self.modifier.clone();
        for g in &self.groups {
            let mut roll = BigInt::zero();
            for _ in 0..g.count {
                roll += rng.random_range(1..=g.faces);
            }
            sum += Rational::from_integer(roll) * &g.factor;
        }
        sum
    }
}

/// Parameters for [`Dice::make_random`].
#[derive(Debug, Clone)]
pub struct ConfigRandom {
    /// Largest number of groups added to the expression.
    pub groups: usize,
    /// Largest number of dice in one group.
    pub max_count: usize,
    /// Largest number of faces of a die.
    pub max_faces: usize,
    /// Largest absolute numerator of a factor or of the modifier.
    pub max_factor: i64,
    /// Largest denominator of a factor or of the modifier.
    pub max_divisor: i64,
}

impl Default for ConfigRandom {
    fn default() -> Self {
        Self { groups: 3, max_count: 3, max_faces: 10, max_factor: 4, max_divisor: 4 }
    }
}

/// Parameters for [`Dice::summarize`].
#[derive(Debug, Clone)]
pub struct ConfigSummary {
    /// Number of rolls to draw.
    pub samples: usize,
}

impl Default for ConfigSummary {
    fn default() -> Self {
        Self { samples: 100_000 }
    }
}

/// Statistics of a number of rolls, see [`Dice::summarize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    /// Number of rolls drawn
    pub samples: usize,
    /// Smallest roll, `+inf` without rolls
    pub min: f64,
    /// Largest roll, `-inf` without rolls
    pub max: f64,
    /// Average roll, NaN without rolls
    pub mean: f64,
    /// Sample standard deviation, 0 for fewer than two rolls
    pub sd: f64,
}

impl Dice {
    /// Create a random expression with parameters chosen using [`ConfigRandom`].
    pub fn make_random<R: Rng + ?Sized>(rng: &mut R, config: &ConfigRandom) -> Self {
        let ConfigRandom { groups, max_count, max_faces, max_factor, max_divisor } = *config;
        let ratio = |rng: &mut R| {
            let numer = rng.random_range(-max_factor..=max_factor);
            let denom = rng.random_range(1..=max_divisor.max(1));
            Rational::new(BigInt::from(numer), BigInt::from(denom))
        };
        let mut out = Dice::constant(ratio(&mut *rng));
        for _ in 0..rng.random_range(0..=groups) {
            let count = rng.random_range(1..=max_count.max(1));
            let faces = rng.random_range(1..=max_faces.max(1));
            let factor = ratio(&mut *rng);
            out.insert(count, faces, factor);
        }
        out.updated();
        out
    }

    /// Roll the expression `config.samples` times and summarize the results.
    ///
    /// ```
    /// use dicecalc::{ConfigSummary, Dice};
    /// use rand::SeedableRng;
    ///
    /// let dice: Dice = "2d6".parse().unwrap();
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let summary = dice.summarize(&mut rng, &ConfigSummary { samples: 10_000 });
    /// assert!((summary.mean - 7.0).abs() < 0.1);
    /// ```
    pub fn summarize<R: Rng + ?Sized>(&self, rng: &mut R, config: &ConfigSummary) -> SampleSummary {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut mean = 0.0;
        let mut m2 = 0.0;
        for i in 1..=config.samples {
            let x = self.sample(rng).to_f64().unwrap_or(f64::NAN);
            min = min.min(x);
            max = max.max(x);
            let delta = x - mean;
            mean += delta / i as f64;
            m2 += delta * (x - mean);
        }
        let samples = config.samples;
        let sd = if samples > 1 { (m2 / (samples - 1) as f64).sqrt() } else { 0.0 };
        let mean = if samples > 0 { mean } else { f64::NAN };
        debug!(dice = %self, samples, mean, sd, "summarized rolls");
        SampleSummary { samples, min, max, mean, sd }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    const ITERATIONS: usize = 100_000;
    const TOLERANCE: f64 = 0.05;

    fn check_rolls(s: &str) {
        let dice: Dice = s.parse().unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let summary = dice.summarize(&mut rng, &ConfigSummary { samples: ITERATIONS });
        assert_eq!(summary.samples, ITERATIONS);
        assert_eq!(summary.min, dice.min().to_f64().unwrap(), "{s}");
        assert_eq!(summary.max, dice.max().to_f64().unwrap(), "{s}");
        assert!((summary.mean - dice.mean().to_f64().unwrap()).abs() < TOLERANCE, "{s}: {summary:?}");
        assert!((summary.sd - dice.sd()).abs() < TOLERANCE, "{s}: {summary:?}");
    }

    #[test]
    fn two_dice() {
        check_rolls("2d6");
    }

    #[test]
    fn mixed_signs() {
        check_rolls("2d10-2d6+10");
    }

    #[test]
    fn constant() {
        check_rolls("17/4");
    }

    #[test]
    fn rolls_stay_in_bounds() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let config = ConfigRandom::default();
        for _ in 0..40 {
            let dice = Dice::make_random(&mut rng, &config);
            for _ in 0..50 {
                let x = dice.sample(&mut rng);
                assert!(dice.min() <= &x && &x <= dice.max(), "{dice}: {x}");
                assert!(dice.pdf(&x) > Rational::zero(), "{dice}: {x}");
            }
        }
    }

    #[test]
    fn same_seed_same_rolls() {
        let dice: Dice = "3d8*2/3-d4".parse().unwrap();
        let a: Vec<Rational> = (&dice).sample_iter(ChaCha20Rng::seed_from_u64(9)).take(20).collect();
        let b: Vec<Rational> = (&dice).sample_iter(ChaCha20Rng::seed_from_u64(9)).take(20).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_summary() {
        let dice: Dice = "d6".parse().unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let summary = dice.summarize(&mut rng, &ConfigSummary { samples: 0 });
        assert!(summary.mean.is_nan());
        assert_eq!(summary.sd, 0.0);
        assert_eq!(summary.min, f64::INFINITY);
        assert_eq!(summary.max, f64::NEG_INFINITY);
    }
}
