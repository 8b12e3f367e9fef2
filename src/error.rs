use thiserror::Error;

/// Errors reported by the combinatorics routines.
///
/// Every variant carries the values needed to diagnose the call that produced
/// it, so callers never have to re-run the computation to see what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombinationError {
    /// `n` or `k` is negative, or no combination exists for the request.
    #[error("invalid parameters: n = {n}, k = {k}")]
    InvalidParameters { n: i64, k: i64 },
    /// A rank outside `[0, count)`.
    #[error("rank {m} is out of range for n = {n}, k = {k} ({count} combinations)")]
    RankOutOfRange { n: i64, k: i64, m: i64, count: i64 },
    /// The index array handed to a constructor does not hold exactly `k` values.
    #[error("expected {k} indices, got an array of length {len}")]
    ArrayLengthMismatch { k: i64, len: usize },
    /// A mapping target does not cover the universe of the combination.
    #[error("array of length {len} is too short for a universe of size {n}")]
    ArrayTooShort { n: i64, len: usize },
    /// An index of an unchecked combination falls outside the mapping target.
    #[error("index {index} is outside an array of length {len}")]
    IndexOutOfRange { index: i64, len: usize },
    /// The binomial coefficient does not fit in an `i64`.
    #[error("C({n}, {k}) overflows a 64-bit integer")]
    Overflow { n: i64, k: i64 },
    /// `successor` was called on a combination that is not valid.
    #[error("cannot take the successor of invalid combination {data:?} (n = {n}, k = {k})")]
    InvalidSuccessorState { n: i64, k: i64, data: Vec<i64> },
    /// `copy_of` was given a combination that is not valid.
    #[error("cannot copy invalid combination {data:?} (n = {n}, k = {k})")]
    InvalidSourceState { n: i64, k: i64, data: Vec<i64> },
    /// Ranking was asked for indices that do not form a valid combination.
    #[error("cannot rank invalid combination {data:?} (n = {n}, k = {k})")]
    InvalidRankState { n: i64, k: i64, data: Vec<i64> },
    /// Unranking produced an array that breaks the combination invariant.
    #[error("unranking rank {m} for n = {n}, k = {k} produced an invalid combination")]
    InternalInvariantViolation { n: i64, k: i64, m: i64 },
}

pub type Result<T, E = CombinationError> = std::result::Result<T, E>;
