use anyhow::{Result, bail};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use combinadic::{CombinationError, IndexCombination, SamplingMode, choose, rank};

const MAX_BUCKETS: i64 = 1_000_000;
const CHUNK_SIZE: usize = 4_096;

/// Summary of a rank histogram against the uniform distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Summary {
    pub min: u64,
    pub max: u64,
    pub chi_square: f64,
    pub degrees_of_freedom: u64,
}

pub(crate) fn run_histogram(
    n: i64,
    k: i64,
    draws: usize,
    seed: Option<u64>,
    mode: SamplingMode,
) -> Result<()> {
    let count = choose(n, k)?;
    if count == 0 {
        bail!("there are no {k}-element subsets of a {n}-element universe");
    }
    if count > MAX_BUCKETS {
        bail!("C({n}, {k}) = {count} exceeds the histogram limit of {MAX_BUCKETS} ranks");
    }
    if draws == 0 {
        bail!("--draws must be positive");
    }

    let seed = seed.unwrap_or_else(|| StdRng::from_entropy().next_u64());
    println!("Sampling {draws} combinations out of C({n}, {k}) = {count} (seed {seed}, {mode:?}).");

    let histogram = sample_histogram(n, k, count as usize, draws, seed, mode)?;
    let summary = summarize(&histogram, draws);
    let expected = draws as f64 / count as f64;

    println!("Expected per rank: {expected:.2}");
    println!("Observed per rank: min {}, max {}", summary.min, summary.max);
    println!(
        "Chi-square: {:.2} ({} degrees of freedom)",
        summary.chi_square, summary.degrees_of_freedom
    );
    if summary.degrees_of_freedom > 0 {
        let df = summary.degrees_of_freedom as f64;
        let z = (summary.chi_square - df) / (2.0 * df).sqrt();
        if z.abs() > 4.0 {
            eprintln!("Rank distribution deviates from uniform (z = {z:.2}).");
        }
    }

    Ok(())
}

/// Draws `draws` combinations in parallel chunks and counts them by rank.
///
/// Chunk `i` uses its own generator seeded with `seed + i`, so a given seed
/// always produces the same histogram regardless of thread scheduling.
fn sample_histogram(
    n: i64,
    k: i64,
    buckets: usize,
    draws: usize,
    seed: u64,
    mode: SamplingMode,
) -> Result<Vec<u64>, CombinationError> {
    let chunks = draws.div_ceil(CHUNK_SIZE);
    let bar = ProgressBar::new(chunks as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} chunks ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let histogram = (0..chunks)
        .into_par_iter()
        .progress_with(bar.clone())
        .map(|chunk| -> Result<Vec<u64>, CombinationError> {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(chunk as u64));
            let len = CHUNK_SIZE.min(draws - chunk * CHUNK_SIZE);
            let mut local = vec![0u64; buckets];
            for _ in 0..len {
                let combo = IndexCombination::from_random_rank(n, k, &mut rng, mode)?;
                local[sorted_rank(combo)? as usize] += 1;
            }
            Ok(local)
        })
        .try_reduce(
            || vec![0u64; buckets],
            |mut acc, local| {
                for (total, count) in acc.iter_mut().zip(local) {
                    *total += count;
                }
                Ok(acc)
            },
        );

    bar.finish();
    histogram
}

/// Rank of the subset a combination selects, whatever order its indices are in.
fn sorted_rank(combo: IndexCombination) -> Result<i64, CombinationError> {
    let (n, k) = (combo.n(), combo.k());
    let mut indices = combo.into_data();
    indices.sort_unstable();
    rank(n, k, &indices)
}

pub(crate) fn summarize(histogram: &[u64], draws: usize) -> Summary {
    let expected = draws as f64 / histogram.len() as f64;
    let chi_square = histogram
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum();

    Summary {
        min: histogram.iter().copied().min().unwrap_or(0),
        max: histogram.iter().copied().max().unwrap_or(0),
        chi_square,
        degrees_of_freedom: histogram.len().saturating_sub(1) as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfectly_flat_histogram() {
        let summary = summarize(&[5, 5, 5, 5], 20);
        assert_eq!(
            summary,
            Summary {
                min: 5,
                max: 5,
                chi_square: 0.0,
                degrees_of_freedom: 3,
            }
        );
    }

    #[test]
    fn skewed_histogram() {
        let summary = summarize(&[10, 30], 40);
        assert_eq!(summary.chi_square, 10.0);
        assert_eq!((summary.min, summary.max), (10, 30));
    }

    #[test]
    fn sorted_rank_ignores_draw_order() {
        let combo = IndexCombination::from_array(5, 2, vec![4, 1]).unwrap();
        assert_eq!(sorted_rank(combo), Ok(6));
    }

    #[test]
    fn histogram_counts_every_draw() {
        for mode in [SamplingMode::UniformRank, SamplingMode::Legacy] {
            let histogram = sample_histogram(6, 2, 15, 10_000, 1, mode).unwrap();
            assert_eq!(histogram.len(), 15);
            assert_eq!(histogram.iter().sum::<u64>(), 10_000);
        }
    }

    #[test]
    fn histogram_is_reproducible() {
        let first = sample_histogram(7, 3, 35, 9_000, 99, SamplingMode::UniformRank).unwrap();
        let second = sample_histogram(7, 3, 35, 9_000, 99, SamplingMode::UniformRank).unwrap();
        assert_eq!(first, second);
    }
}
