//! Ranking, unranking and lazy enumeration of combinations and permutations.
//!
//! [`IndexCombination`] addresses the `k`-subsets of a numeric universe by
//! lexicographic rank, which keeps huge universes tractable. The generators in
//! [`sequence`] enumerate selections of arbitrary slices directly.

pub mod combinatorics;
pub mod error;
pub mod index_combination;
pub mod sampling;
pub mod sequence;

pub use combinatorics::{choose, element, rank};
pub use error::{CombinationError, Result};
pub use index_combination::{IndexCombination, Lexicographic};
pub use sampling::SamplingMode;
pub use sequence::{Combinations, Permutations, combinations, permutations};
