use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Randomness consumed by the simulator while a ball falls through the board.
///
/// Implementations decide where the draws come from; the simulator only needs
/// one normal sample per ball and one uniform sample per peg interaction.
pub trait BounceSource {
    /// Draws a sample from a normal distribution with mean zero and the provided deviation.
    fn normal(&mut self, std_dev: f64) -> f64;

    /// Draws a sample uniformly distributed over `[0, 1)`.
    fn uniform(&mut self) -> f64;
}

impl<S: BounceSource + ?Sized> BounceSource for &mut S {
    fn normal(&mut self, std_dev: f64) -> f64 {
        (**self).normal(std_dev)
    }

    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}

/// Bounce source backed by a pseudorandom generator.
#[derive(Clone, Debug)]
pub struct RngBounceSource<R = ChaCha8Rng> {
    rng: R,
}

impl RngBounceSource<ChaCha8Rng> {
    /// Creates a reproducible source from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a source seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> RngBounceSource<R> {
    /// Wraps an existing generator.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> BounceSource for RngBounceSource<R> {
    fn normal(&mut self, std_dev: f64) -> f64 {
        let deviate: f64 = self.rng.sample(StandardNormal);
        deviate * std_dev
    }

    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
