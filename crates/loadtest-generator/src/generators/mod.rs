//! Value generators shared by the payload builders.

pub mod uuid;

use rand::Rng;

/// Pick one value uniformly from a fixed, non-empty set.
pub fn one_of<T: Copy, R: Rng + ?Sized>(rng: &mut R, values: &[T]) -> T {
    values[rng.gen_range(0..values.len())]
}
