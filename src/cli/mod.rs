mod histogram;
mod parse;

use clap::{Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::json;

use anyhow::{Context, Result, anyhow};
use combinadic::{IndexCombination, SamplingMode, choose, combinations, permutations};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the number of k-element subsets of an n-element universe.
    Choose { n: i64, k: i64 },
    /// Print the combination at a lexicographic rank.
    Unrank {
        n: i64,
        k: i64,
        /// Rank in `[0, C(n, k))`.
        m: i64,
        #[arg(long)]
        json: bool,
    },
    /// Print the lexicographic rank of a combination.
    Rank {
        n: i64,
        k: i64,
        /// Increasing indices, e.g. `0,2,4` or `[0, 2, 4]`.
        combination: String,
    },
    /// List combinations in lexicographic order, starting from the first one.
    Enumerate {
        n: i64,
        k: i64,
        /// Stop after this many combinations.
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Draw random combinations.
    Sample {
        n: i64,
        k: i64,
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// Seed for a reproducible draw. Seeded from entropy when absent.
        #[arg(long)]
        seed: Option<u64>,
        /// Use the legacy index draw. Its output is usually not in lexicographic order.
        #[arg(long)]
        legacy: bool,
        #[arg(long)]
        json: bool,
    },
    /// Sample many combinations in parallel and compare their ranks against a uniform distribution.
    Histogram {
        n: i64,
        k: i64,
        #[arg(long, default_value_t = 10_000)]
        draws: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        legacy: bool,
    },
    /// List the selections of `size` items taken from the given items.
    Subsets {
        #[arg(required = true)]
        items: Vec<String>,
        #[arg(long)]
        size: usize,
        /// List ordered arrangements (permutations) instead of combinations.
        #[arg(long)]
        ordered: bool,
        #[arg(long)]
        json: bool,
    },
}

/// Parse CLI arguments and execute the requested command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Choose { n, k } => {
            println!("{}", choose(n, k)?);
        }
        Commands::Unrank { n, k, m, json } => {
            let combo = IndexCombination::from_rank(n, k, m)?;
            if json {
                println!("{}", json!({ "n": n, "k": k, "rank": m, "data": combo.data() }));
            } else {
                println!("{combo}");
            }
        }
        Commands::Rank { n, k, combination } => {
            let indices = parse::parse_indices(&combination)
                .ok_or_else(|| anyhow!("invalid combination: {combination}"))?;
            let combo = IndexCombination::from_array(n, k, indices)?;
            let rank = combo
                .rank()
                .with_context(|| format!("cannot rank {combo}"))?;
            println!("{rank}");
        }
        Commands::Enumerate { n, k, limit, json } => {
            run_enumerate(n, k, limit, json)?;
        }
        Commands::Sample {
            n,
            k,
            count,
            seed,
            legacy,
            json,
        } => {
            run_sample(n, k, count, seed, sampling_mode(legacy), json)?;
        }
        Commands::Histogram {
            n,
            k,
            draws,
            seed,
            legacy,
        } => {
            histogram::run_histogram(n, k, draws, seed, sampling_mode(legacy))?;
        }
        Commands::Subsets {
            items,
            size,
            ordered,
            json,
        } => {
            run_subsets(&items, size, ordered, json);
        }
    }

    Ok(())
}

fn sampling_mode(legacy: bool) -> SamplingMode {
    if legacy {
        SamplingMode::Legacy
    } else {
        SamplingMode::UniformRank
    }
}

fn run_enumerate(n: i64, k: i64, limit: Option<usize>, json: bool) -> Result<()> {
    let walk = IndexCombination::lexicographic(n, k)?.take(limit.unwrap_or(usize::MAX));
    if json {
        let all: Vec<Vec<i64>> = walk.map(IndexCombination::into_data).collect();
        println!("{}", json!(all));
    } else {
        let mut listed = 0usize;
        for combo in walk {
            println!("{combo}");
            listed += 1;
        }
        if listed == 0 {
            eprintln!("No {k}-element subsets of a {n}-element universe.");
        }
    }
    Ok(())
}

fn run_sample(
    n: i64,
    k: i64,
    count: usize,
    seed: Option<u64>,
    mode: SamplingMode,
    json: bool,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        samples.push(IndexCombination::from_random_rank(n, k, &mut rng, mode)?);
    }

    if json {
        let rendered: Vec<_> = samples
            .iter()
            .map(|combo| json!({ "data": combo.data(), "valid": combo.is_valid() }))
            .collect();
        println!("{}", json!(rendered));
    } else {
        for combo in &samples {
            match combo.rank() {
                Ok(rank) => println!("{combo} (rank {rank})"),
                Err(_) => println!("{combo} (not in lexicographic order)"),
            }
        }
    }
    Ok(())
}

fn run_subsets(items: &[String], size: usize, ordered: bool, json: bool) {
    let selections: Box<dyn Iterator<Item = Vec<String>> + '_> = if ordered {
        Box::new(permutations(items, size))
    } else {
        Box::new(combinations(items, size))
    };

    if json {
        let all: Vec<Vec<String>> = selections.collect();
        println!("{}", json!(all));
    } else {
        for selection in selections {
            println!("{}", selection.join(" "));
        }
    }
}
