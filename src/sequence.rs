//! Lazy generators of the `k`-combinations and `k`-permutations of a slice.
//!
//! Both generators work on positions rather than values, so repeated elements
//! are told apart by where they sit in the input. Each call starts a fresh
//! traversal and nothing is computed until the iterator is polled.

use std::iter::{self, FusedIterator};

type Positions = Box<dyn Iterator<Item = Vec<usize>>>;

/// Every `k`-element selection of `items` where order does not matter.
///
/// Each element is paired, head first, with the combinations of the elements
/// after it, so `combinations(&["a", "b", "c"], 2)` yields `ab`, `ac`, `bc`.
/// `k = 0` yields a single empty selection.
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Combinations<'_, T> {
    Combinations {
        items,
        positions: combination_positions(0, items.len(), k),
        remaining: binomial(items.len(), k),
    }
}

fn combination_positions(start: usize, len: usize, k: usize) -> Positions {
    if k == 0 {
        return Box::new(iter::once(Vec::new()));
    }
    if len - start < k {
        return Box::new(iter::empty());
    }

    Box::new((start..len).flat_map(move |head| {
        combination_positions(head + 1, len, k - 1).map(move |mut tail| {
            tail.insert(0, head);
            tail
        })
    }))
}

/// Every `k`-element arrangement of `items` where order matters.
///
/// Each element is paired with the permutations of all the other elements, so
/// `permutations(&["a", "b", "c"], 2)` yields `ab`, `ac`, `ba`, `bc`, `ca`, `cb`.
/// `k = 0` yields a single empty arrangement.
pub fn permutations<T: Clone>(items: &[T], k: usize) -> Permutations<'_, T> {
    Permutations {
        items,
        positions: permutation_positions((0..items.len()).collect(), k),
        remaining: falling_factorial(items.len(), k),
    }
}

fn permutation_positions(pool: Vec<usize>, k: usize) -> Positions {
    if k == 0 {
        return Box::new(iter::once(Vec::new()));
    }
    if pool.len() < k {
        return Box::new(iter::empty());
    }

    Box::new((0..pool.len()).flat_map(move |chosen| {
        let head = pool[chosen];
        let rest: Vec<usize> = pool
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != chosen)
            .map(|(_, &position)| position)
            .collect();
        permutation_positions(rest, k - 1).map(move |mut tail| {
            tail.insert(0, head);
            tail
        })
    }))
}

/// `C(n, k)`, or `None` if it does not fit in a `usize`.
///
/// Runs over the smaller of `k` and `n - k` in 128 bits. The partial results
/// `C(n - k + i, i)` only grow, so the first one that leaves `usize` ends the loop.
fn binomial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 1..=k as u128 {
        result = result.checked_mul(n as u128 - k as u128 + i)? / i;
        if result > usize::MAX as u128 {
            return None;
        }
    }
    Some(result as usize)
}

/// `n! / (n - k)!`, or `None` if it does not fit in a `usize`.
fn falling_factorial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    (n - k + 1..=n).try_fold(1usize, |acc, factor| acc.checked_mul(factor))
}

/// Iterator returned by [`combinations`].
pub struct Combinations<'a, T> {
    items: &'a [T],
    positions: Positions,
    remaining: Option<usize>,
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let positions = self.positions.next()?;
        self.remaining = self.remaining.map(|count| count.saturating_sub(1));
        Some(select(self.items, &positions))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(count) => (count, Some(count)),
            None => (0, None),
        }
    }
}

impl<T: Clone> FusedIterator for Combinations<'_, T> {}

/// Iterator returned by [`permutations`].
pub struct Permutations<'a, T> {
    items: &'a [T],
    positions: Positions,
    remaining: Option<usize>,
}

impl<T: Clone> Iterator for Permutations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let positions = self.positions.next()?;
        self.remaining = self.remaining.map(|count| count.saturating_sub(1));
        Some(select(self.items, &positions))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(count) => (count, Some(count)),
            None => (0, None),
        }
    }
}

impl<T: Clone> FusedIterator for Permutations<'_, T> {}

fn select<T: Clone>(items: &[T], positions: &[usize]) -> Vec<T> {
    positions.iter().map(|&i| items[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;
    use itertools::Itertools;
    use proptest::prelude::*;

    #[test]
    fn combinations_of_three_letters() {
        let pairs: Vec<Vec<&str>> = combinations(&["a", "b", "c"], 2).collect();
        assert_eq!(pairs, vec![vec!["a", "b"], vec!["a", "c"], vec!["b", "c"]]);
    }

    #[test]
    fn permutations_of_three_letters() {
        let pairs: Vec<Vec<&str>> = permutations(&["a", "b", "c"], 2).collect();
        assert_eq!(
            pairs,
            vec![
                vec!["a", "b"],
                vec!["a", "c"],
                vec!["b", "a"],
                vec!["b", "c"],
                vec!["c", "a"],
                vec!["c", "b"],
            ]
        );
    }

    #[test]
    fn zero_size_yields_one_empty_selection() {
        let empty: [u8; 0] = [];
        assert_eq!(combinations(&[1, 2, 3], 0).collect::<Vec<_>>(), vec![vec![]]);
        assert_eq!(permutations(&[1, 2, 3], 0).collect::<Vec<_>>(), vec![vec![]]);
        assert_eq!(combinations(&empty, 0).count(), 1);
        assert_eq!(permutations(&empty, 0).count(), 1);
    }

    #[test]
    fn oversized_selection_yields_nothing() {
        assert_eq!(combinations(&[1, 2], 3).count(), 0);
        assert_eq!(permutations(&[1, 2], 3).count(), 0);
        assert_eq!(combinations(&[1, 2], 3).size_hint(), (0, Some(0)));
    }

    #[test]
    fn duplicates_are_distinct_by_position() {
        assert_debug_snapshot!(combinations(&['x', 'x', 'y'], 2).collect::<Vec<_>>(), @r"
        [
            [
                'x',
                'x',
            ],
            [
                'x',
                'y',
            ],
            [
                'x',
                'y',
            ],
        ]
        ");
        assert_eq!(permutations(&[7, 7], 2).count(), 2);
    }

    #[test]
    fn each_call_restarts() {
        let items = [1, 2, 3, 4];
        let first: Vec<_> = combinations(&items, 2).take(2).collect();
        let second: Vec<_> = combinations(&items, 2).take(2).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn size_hint_tracks_progress() {
        let items = [1, 2, 3, 4, 5];
        let mut perms = permutations(&items, 3);
        assert_eq!(perms.size_hint(), (60, Some(60)));
        perms.next();
        perms.next();
        assert_eq!(perms.size_hint(), (58, Some(58)));
    }

    #[test]
    fn generators_are_lazy_over_large_inputs() {
        let items: Vec<u32> = (0..64).collect();
        let first = combinations(&items, 32).next().unwrap();
        assert_eq!(first, (0..32).collect::<Vec<_>>());
        let first = permutations(&items, 40).next().unwrap();
        assert_eq!(first, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn size_hint_holds_past_signed_range() {
        let items: Vec<u8> = (0..67).collect();
        let expected = 14_226_520_737_620_288_370_u128;
        let (lower, upper) = combinations(&items, 33).size_hint();
        assert_eq!(lower as u128, expected);
        assert_eq!(upper.map(|count| count as u128), Some(expected));
    }

    #[test]
    fn size_hint_without_a_count_has_no_lower_bound() {
        let items: Vec<u8> = (0..200).collect();
        assert_eq!(combinations(&items, 100).size_hint(), (0, None));
        assert_eq!(permutations(&items, 100).size_hint(), (0, None));
    }

    #[test]
    fn binomial_values() {
        assert_eq!(binomial(5, 2), Some(10));
        assert_eq!(binomial(5, 0), Some(1));
        assert_eq!(binomial(2, 3), Some(0));
        assert_eq!(binomial(66, 33), Some(7_219_428_434_016_265_740));
        assert_eq!(binomial(200, 100), None);
    }

    #[test]
    fn falling_factorial_values() {
        assert_eq!(falling_factorial(5, 0), Some(1));
        assert_eq!(falling_factorial(5, 2), Some(20));
        assert_eq!(falling_factorial(5, 5), Some(120));
        assert_eq!(falling_factorial(2, 3), Some(0));
        assert_eq!(falling_factorial(usize::MAX, 2), None);
    }

    proptest! {
        #[test]
        fn combinations_match_itertools(len in 0usize..8, k in 0usize..5) {
            let items: Vec<usize> = (0..len).collect();
            let ours: Vec<Vec<usize>> = combinations(&items, k).collect();
            let reference: Vec<Vec<usize>> = items.iter().copied().combinations(k).collect();
            prop_assert_eq!(ours, reference);
        }

        #[test]
        fn permutations_match_itertools(len in 0usize..6, k in 0usize..5) {
            let items: Vec<usize> = (0..len).collect();
            let ours: Vec<Vec<usize>> = permutations(&items, k).collect();
            let reference: Vec<Vec<usize>> = items.iter().copied().permutations(k).collect();
            prop_assert_eq!(ours, reference);
        }

        #[test]
        fn counts_match_size_hint(len in 0usize..8, k in 0usize..6) {
            let items: Vec<usize> = (0..len).collect();
            let combos = combinations(&items, k);
            let (expected, _) = combos.size_hint();
            prop_assert_eq!(combos.count(), expected);
            let perms = permutations(&items, k);
            let (expected, _) = perms.size_hint();
            prop_assert_eq!(perms.count(), expected);
        }
    }
}
