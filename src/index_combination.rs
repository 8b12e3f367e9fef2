use rand::Rng;
use std::{fmt, iter::FusedIterator};

use crate::combinatorics::{element, is_combination, rank};
use crate::error::{CombinationError, Result};
use crate::sampling::{SamplingMode, legacy_indices, random_rank};

/// A `k`-subset of `{0, …, n - 1}` stored as an array of `k` indices.
///
/// A combination is *valid* when its indices are strictly increasing and lie in
/// `[0, n)`. Values built by [`new`](Self::new), [`from_rank`](Self::from_rank)
/// and uniform sampling are always valid. [`from_array`](Self::from_array),
/// legacy sampling and [`map_to`](Self::map_to) may produce invalid ones; those
/// can still be mapped onto arrays but can no longer be advanced or ranked.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexCombination {
    n: i64,
    k: i64,
    data: Vec<i64>,
}

impl IndexCombination {
    /// The first combination in lexicographic order, `[0, 1, …, k - 1]`.
    pub fn new(n: i64, k: i64) -> Result<Self> {
        if n < 0 || k < 0 {
            return Err(CombinationError::InvalidParameters { n, k });
        }
        Ok(Self {
            n,
            k,
            data: (0..k).collect(),
        })
    }

    /// Wraps caller-supplied indices. Only the length is checked.
    pub fn from_array(n: i64, k: i64, data: Vec<i64>) -> Result<Self> {
        if n < 0 || k < 0 {
            return Err(CombinationError::InvalidParameters { n, k });
        }
        if data.len() as i64 != k {
            return Err(CombinationError::ArrayLengthMismatch {
                k,
                len: data.len(),
            });
        }
        Ok(Self { n, k, data })
    }

    /// The combination at lexicographic rank `m`.
    pub fn from_rank(n: i64, k: i64, m: i64) -> Result<Self> {
        Ok(Self {
            n,
            k,
            data: element(n, k, m)?,
        })
    }

    /// Draws a random combination from `rng`. See [`SamplingMode`].
    pub fn from_random_rank<R: Rng + ?Sized>(
        n: i64,
        k: i64,
        rng: &mut R,
        mode: SamplingMode,
    ) -> Result<Self> {
        let data = match mode {
            SamplingMode::UniformRank => element(n, k, random_rank(n, k, rng)?)?,
            SamplingMode::Legacy => legacy_indices(n, k, rng)?,
        };
        Ok(Self { n, k, data })
    }

    /// Copies `other`, refusing to propagate an invalid combination.
    pub fn copy_of(other: &Self) -> Result<Self> {
        if !other.is_valid() {
            return Err(CombinationError::InvalidSourceState {
                n: other.n,
                k: other.k,
                data: other.data.clone(),
            });
        }
        Ok(other.clone())
    }

    /// Every `k`-subset of `{0, …, n - 1}` in lexicographic order.
    pub fn lexicographic(n: i64, k: i64) -> Result<Lexicographic> {
        let first = Self::new(n, k)?;
        Ok(Lexicographic {
            next: first.is_valid().then_some(first),
        })
    }

    pub fn n(&self) -> i64 {
        self.n
    }

    pub fn k(&self) -> i64 {
        self.k
    }

    pub fn data(&self) -> &[i64] {
        &self.data
    }

    pub fn into_data(self) -> Vec<i64> {
        self.data
    }

    pub fn is_valid(&self) -> bool {
        is_combination(self.n, self.k, &self.data)
    }

    /// The next combination in lexicographic order, or `None` after
    /// `[n - k, …, n - 1]`.
    ///
    /// Finds the rightmost index still below its ceiling `n - k + i`, bumps it
    /// and lays the following indices out consecutively after it. The receiver
    /// is left untouched.
    pub fn successor(&self) -> Result<Option<Self>> {
        if !self.is_valid() {
            return Err(CombinationError::InvalidSuccessorState {
                n: self.n,
                k: self.k,
                data: self.data.clone(),
            });
        }

        let ceiling = self.n - self.k;
        let Some(pivot) = (0..self.data.len())
            .rev()
            .find(|&i| self.data[i] != ceiling + i as i64)
        else {
            return Ok(None);
        };

        let mut data = self.data.clone();
        let start = data[pivot] + 1;
        for (offset, value) in data[pivot..].iter_mut().enumerate() {
            *value = start + offset as i64;
        }

        Ok(Some(Self {
            n: self.n,
            k: self.k,
            data,
        }))
    }

    /// Lexicographic rank of this combination.
    pub fn rank(&self) -> Result<i64> {
        rank(self.n, self.k, &self.data)
    }

    /// Picks `array[data[i]]` for every index, in index order.
    ///
    /// `array` must cover the whole universe, i.e. hold at least `n` elements.
    pub fn apply_to<T: Clone>(&self, array: &[T]) -> Result<Vec<T>> {
        self.check_target(array.len())?;
        Ok(self
            .data
            .iter()
            .map(|&index| array[index as usize].clone())
            .collect())
    }

    /// Replaces every index `i` with `array[i]`, in place.
    ///
    /// The result is usually not increasing any more. Treat the combination as
    /// terminal afterwards: `successor` and `rank` fail on it.
    pub fn map_to(&mut self, array: &[i64]) -> Result<()> {
        self.check_target(array.len())?;
        for value in &mut self.data {
            *value = array[*value as usize];
        }
        Ok(())
    }

    fn check_target(&self, len: usize) -> Result<()> {
        if (len as i64) < self.n {
            return Err(CombinationError::ArrayTooShort { n: self.n, len });
        }
        match self
            .data
            .iter()
            .find(|&&index| index < 0 || index as usize >= len)
        {
            Some(&index) => Err(CombinationError::IndexOutOfRange { index, len }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for IndexCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for value in &self.data {
            write!(f, "{value} ")?;
        }
        write!(f, "}}")
    }
}

/// Iterator returned by [`IndexCombination::lexicographic`].
#[derive(Clone, Debug)]
pub struct Lexicographic {
    next: Option<IndexCombination>,
}

impl Iterator for Lexicographic {
    type Item = IndexCombination;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.successor().ok().flatten();
        Some(current)
    }
}

impl FusedIterator for Lexicographic {}
