use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the multiplicative noise applied to heuristic estimates.
pub trait JitterSource: Send {
    /// Draws a multiplier from the inclusive range `[low, high]`.
    fn sample(&mut self, low: f64, high: f64) -> f64;
}

/// Uniform jitter backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngJitter<R = StdRng> {
    rng: R,
}

impl<R: Rng + Send> RngJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngJitter<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> JitterSource for RngJitter<R> {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        if !(low.is_finite() && high.is_finite()) || low > high {
            return f64::NAN;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Always returns the same multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn sample(&mut self, _low: f64, _high: f64) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_repeat() {
        let mut first = RngJitter::seeded(7);
        let mut second = RngJitter::seeded(7);
        for _ in 0..20 {
            assert_eq!(first.sample(0.9, 1.2), second.sample(0.9, 1.2));
        }
    }

    #[test]
    fn samples_stay_within_bounds() {
        let mut jitter = RngJitter::seeded(11);
        for _ in 0..1_000 {
            let value = jitter.sample(0.9, 1.2);
            assert!((0.9..=1.2).contains(&value), "{value} out of range");
        }
    }

    #[test]
    fn inverted_bounds_yield_nan() {
        assert!(RngJitter::seeded(1).sample(1.2, 0.9).is_nan());
    }
}
