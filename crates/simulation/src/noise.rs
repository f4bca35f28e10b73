//! Random sources for the price models.
//!
//! Every model draws through [`NoiseSource`] instead of a global generator so
//! that runs can be replayed from a seed or driven by a fixed script.

use goldsim_domain::enums::NoiseModel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// A stream of random draws.
pub trait NoiseSource {
    /// Next draw from `Uniform[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Next zero-centred shock. Defaults to `2U - 1`, i.e. `Uniform[-1, 1)`.
    fn next_noise(&mut self) -> f64 {
        2.0 * self.next_uniform() - 1.0
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }

    fn next_noise(&mut self) -> f64 {
        (**self).next_noise()
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }

    fn next_noise(&mut self) -> f64 {
        (**self).next_noise()
    }
}

/// Uniform shocks in `[-1, 1)` backed by any [`Rng`].
#[derive(Debug, Clone)]
pub struct UniformNoise<R = StdRng> {
    rng: R,
}

impl<R: Rng> UniformNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformNoise<StdRng> {
    /// Reproducible stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Stream seeded from the operating system.
    ///
    /// # Panics
    ///
    /// Panics if the OS random source is unavailable; a simulation cannot
    /// run without one.
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> NoiseSource for UniformNoise<R> {
    fn next_uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Standard normal shocks, for a Brownian-style diffusion term.
#[derive(Debug, Clone)]
pub struct GaussianNoise<R = StdRng> {
    rng: R,
}

impl<R: Rng> GaussianNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl GaussianNoise<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// # Panics
    ///
    /// Panics if the OS random source is unavailable.
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> NoiseSource for GaussianNoise<R> {
    fn next_uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_noise(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// Noise that never moves: uniform draws are always 0.5, shocks always 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn next_uniform(&mut self) -> f64 {
        0.5
    }

    fn next_noise(&mut self) -> f64 {
        0.0
    }
}

/// Replays a fixed sequence of uniform draws, cycling when exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNoise {
    uniforms: Vec<f64>,
    cursor: usize,
}

impl ScriptedNoise {
    /// Script of raw `[0, 1)` draws.
    pub fn from_uniforms(uniforms: Vec<f64>) -> Self {
        Self {
            uniforms,
            cursor: 0,
        }
    }

    /// Script of shocks in `[-1, 1]`, stored as the equivalent uniforms.
    pub fn from_shocks(shocks: &[f64]) -> Self {
        Self::from_uniforms(shocks.iter().map(|u| (u + 1.0) / 2.0).collect())
    }

    /// Number of draws consumed so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl NoiseSource for ScriptedNoise {
    fn next_uniform(&mut self) -> f64 {
        if self.uniforms.is_empty() {
            return 0.5;
        }
        let value = self.uniforms[self.cursor % self.uniforms.len()];
        self.cursor += 1;
        value
    }
}

/// Builds a boxed source for the given model and seed.
pub fn seeded_source(model: NoiseModel, seed: u64) -> Box<dyn NoiseSource + Send> {
    match model {
        NoiseModel::Uniform => Box::new(UniformNoise::seeded(seed)),
        NoiseModel::Gaussian => Box::new(GaussianNoise::seeded(seed)),
    }
}

/// Builds a boxed, OS-seeded source for the given model.
pub fn entropy_source(model: NoiseModel) -> Box<dyn NoiseSource + Send> {
    match model {
        NoiseModel::Uniform => Box::new(UniformNoise::from_os()),
        NoiseModel::Gaussian => Box::new(GaussianNoise::from_os()),
    }
}

/// A fresh seed for runs that should still be replayable afterwards.
pub fn entropy_seed() -> u64 {
    rand::random()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_noise_bounds() {
        let mut noise = UniformNoise::seeded(7);
        for _ in 0..10_000 {
            let u = noise.next_noise();
            assert!((-1.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = UniformNoise::seeded(42);
        let mut b = UniformNoise::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.next_noise(), b.next_noise());
        }
    }

    #[test]
    fn test_zero_noise() {
        let mut noise = ZeroNoise;
        assert_eq!(noise.next_noise(), 0.0);
        assert_eq!(noise.next_uniform(), 0.5);
    }

    #[test]
    fn test_scripted_noise_cycles() {
        let mut noise = ScriptedNoise::from_shocks(&[1.0, -1.0]);
        assert_eq!(noise.next_noise(), 1.0);
        assert_eq!(noise.next_noise(), -1.0);
        assert_eq!(noise.next_noise(), 1.0);
        assert_eq!(noise.draws(), 3);
    }

    #[test]
    fn test_gaussian_noise_is_centred() {
        let mut noise = GaussianNoise::seeded(3);
        let n = 20_000;
        let mean = (0..n).map(|_| noise.next_noise()).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean was {mean}");
    }

    #[test]
    fn test_boxed_source_matches_concrete() {
        let mut boxed = seeded_source(NoiseModel::Uniform, 11);
        let mut concrete = UniformNoise::seeded(11);
        assert_eq!(boxed.next_noise(), concrete.next_noise());
    }
}
