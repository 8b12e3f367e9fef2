use rand::{Rng, seq::index};

use crate::combinatorics::choose;
use crate::error::{CombinationError, Result};

/// How [`IndexCombination::from_random_rank`](crate::IndexCombination::from_random_rank)
/// draws its combination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SamplingMode {
    /// Draw a rank uniformly from `[0, C(n, k))` and unrank it. The result is
    /// always a valid combination.
    #[default]
    UniformRank,
    /// Draw `k` indices without replacement and keep them in draw order.
    ///
    /// Compatibility mode only. The indices are usually not increasing, so the
    /// result typically fails `is_valid()` and must not be advanced with
    /// `successor()`. No distribution over valid combinations is promised.
    Legacy,
}

/// Linear map of `value` from `[old_min, old_max]` onto `[new_min, new_max]`.
pub fn convert_range(value: f64, old_min: f64, old_max: f64, new_min: f64, new_max: f64) -> f64 {
    (value - old_min) / (old_max - old_min) * (new_max - new_min) + new_min
}

/// Draws a rank uniformly from `[0, C(n, k))`.
///
/// A full signed 64-bit draw is mapped in floating point onto `[-0.5, C - 0.5]`
/// and rounded, which gives every rank a rounding window of the same width.
/// Above 2^53 combinations not every rank is reachable.
pub fn random_rank<R: Rng + ?Sized>(n: i64, k: i64, rng: &mut R) -> Result<i64> {
    let count = choose(n, k)?;
    if count == 0 {
        return Err(CombinationError::InvalidParameters { n, k });
    }

    let draw = rng.next_u64() as i64;
    let scaled = convert_range(
        draw as f64,
        i64::MIN as f64,
        i64::MAX as f64,
        -0.5,
        count as f64 - 0.5,
    );
    Ok((scaled.round() as i64).clamp(0, count - 1))
}

/// Draws `k` distinct indices from `{0, …, n - 1}`, in draw order.
///
/// Memory is proportional to `k`, not `n`, so huge universes are fine.
pub fn legacy_indices<R: Rng + ?Sized>(n: i64, k: i64, rng: &mut R) -> Result<Vec<i64>> {
    if n < 0 || k < 0 || k > n {
        return Err(CombinationError::InvalidParameters { n, k });
    }
    let (Ok(length), Ok(amount)) = (usize::try_from(n), usize::try_from(k)) else {
        return Err(CombinationError::InvalidParameters { n, k });
    };

    Ok(index::sample(rng, length, amount)
        .into_iter()
        .map(|drawn| drawn as i64)
        .collect())
}
