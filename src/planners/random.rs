use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws for per-step strategy selection.
pub trait RandomSource {
    /// A uniform value in `(0, 1]`.
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// `RandomSource` backed by a `rand` generator.
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Seeded when `seed` is given, otherwise seeded from the OS.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        // random() is in [0, 1); flip it so zero is never drawn.
        1.0 - self.rng.random::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
