//! Injectable randomness for the simulation
//!
//! Every randomized step (progress increments, log message choice, positional
//! jitter, photo seeds) draws from an [`Entropy`] source so that callers can
//! pin deterministic sequences.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of random draws used by the simulation
pub trait Entropy {
    /// A value in `[low, high)`; returns `low` when the range is empty
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    /// An index in `[0, len)`; returns 0 when `len == 0`
    fn index(&mut self, len: usize) -> usize;

    /// `true` with probability `p`
    fn chance(&mut self, p: f64) -> bool;
}

/// Pseudo-random entropy backed by [`StdRng`]
#[derive(Debug, Clone)]
pub struct SeededEntropy {
    rng: StdRng,
}

impl SeededEntropy {
    /// Reproducible stream for a fixed seed
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Stream seeded from the operating system
    pub fn from_os() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl Default for SeededEntropy {
    fn default() -> Self {
        Self::from_os()
    }
}

impl Entropy for SeededEntropy {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if !(low < high) {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// `uniform` returns the next value clamped into `[low, high]`, `index` uses
/// the next value truncated modulo `len`, and `chance` is true when the next
/// value is below `p`. An empty script always yields `low`, 0 and `false`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEntropy {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedEntropy {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// A script that returns `value` forever
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    fn next_value(&mut self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        Some(value)
    }
}

impl Entropy for ScriptedEntropy {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        match self.next_value() {
            Some(value) if low < high => value.clamp(low, high),
            _ => low,
        }
    }

    fn index(&mut self, len: usize) -> usize {
        match self.next_value() {
            Some(value) if len > 0 => (value.max(0.0) as usize) % len,
            _ => 0,
        }
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_value().is_some_and(|value| value < p)
    }
}

impl<E: Entropy + ?Sized> Entropy for &mut E {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }

    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }

    fn chance(&mut self, p: f64) -> bool {
        (**self).chance(p)
    }
}

impl<E: Entropy + ?Sized> Entropy for Box<E> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }

    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }

    fn chance(&mut self, p: f64) -> bool {
        (**self).chance(p)
    }
}
