//! Sampling helpers over config ranges.

use bp_config::SpawnRange;
use rand::Rng;

/// Uniform sample from the half-open `[min, max)`; a degenerate range yields `min`.
pub fn sample_f32(rng: &mut impl Rng, range: &SpawnRange<f32>) -> f32 {
    if range.max > range.min {
        rng.gen_range(range.min..range.max)
    } else {
        range.min
    }
}

/// Uniform sample from the inclusive `[min, max]`.
pub fn sample_count(rng: &mut impl Rng, range: &SpawnRange<usize>) -> usize {
    if range.max > range.min {
        rng.gen_range(range.min..=range.max)
    } else {
        range.min
    }
}

/// One element picked uniformly; `None` for an empty slice.
pub fn pick<T: Copy>(rng: &mut impl Rng, items: &[T]) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[rng.gen_range(0..items.len())])
    }
}
