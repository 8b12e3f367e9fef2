use crate::error::{CombinationError, Result};
use itertools::Itertools;

/// Number of `k`-element subsets of an `n`-element universe.
///
/// Iterates over the smaller of `k` and `n - k`. Every step goes through
/// [`checked_mul_div`], so a coefficient that does not fit in an `i64` is
/// reported as [`CombinationError::Overflow`] instead of wrapping.
pub fn choose(n: i64, k: i64) -> Result<i64> {
    if n < 0 || k < 0 {
        return Err(CombinationError::InvalidParameters { n, k });
    }
    if n < k {
        return Ok(0);
    }
    if k == 0 || n == k {
        return Ok(1);
    }

    let (delta, i_max) = if k < n - k { (n - k, k) } else { (k, n - k) };
    let mut result = delta + 1;
    for i in 2..=i_max {
        result =
            checked_mul_div(result, delta + i, i).ok_or(CombinationError::Overflow { n, k })?;
    }
    Ok(result)
}

/// Computes `value * mul / div`, or `None` when the quotient does not fit in an `i64`.
///
/// The product is formed in 128 bits so that only the final result can overflow.
fn checked_mul_div(value: i64, mul: i64, div: i64) -> Option<i64> {
    let wide = i128::from(value)
        .checked_mul(i128::from(mul))?
        .checked_div(i128::from(div))?;
    i64::try_from(wide).ok()
}

/// Returns the `m`-th `k`-subset of `{0, …, n - 1}` in lexicographic order.
///
/// The rank is decoded through its combinadic: the dual index
/// `x = C(n, k) - 1 - m` is split greedily into `C(v_1, k) + C(v_2, k - 1) + …`,
/// and every `v` is reflected through `n - 1 - v`.
pub fn element(n: i64, k: i64, m: i64) -> Result<Vec<i64>> {
    let count = choose(n, k)?;
    if m < 0 || m >= count {
        return Err(CombinationError::RankOutOfRange { n, k, m, count });
    }

    let mut combo = Vec::with_capacity(k as usize);
    let mut a = n;
    let mut b = k;
    let mut x = count - 1 - m;
    for _ in 0..k {
        let v = largest_v(a, b, x)?;
        x -= choose(v, b)?;
        combo.push(v);
        a = v;
        b -= 1;
    }

    for value in &mut combo {
        *value = n - 1 - *value;
    }
    combo.sort_unstable();

    if !is_combination(n, k, &combo) {
        return Err(CombinationError::InternalInvariantViolation { n, k, m });
    }
    Ok(combo)
}

/// Largest `v < a` with `C(v, b) <= x`.
///
/// `C(v, b)` is non-decreasing in `v`, so this bisects over `[b - 1, a - 1]`;
/// the lower end always qualifies because `C(b - 1, b) = 0`. Coefficients too
/// large for an `i64` are necessarily greater than `x`.
fn largest_v(a: i64, b: i64, x: i64) -> Result<i64> {
    let mut lo = b - 1;
    let mut hi = a - 1;
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        match choose(mid, b) {
            Ok(count) if count <= x => lo = mid,
            Ok(_) | Err(CombinationError::Overflow { .. }) => hi = mid - 1,
            Err(err) => return Err(err),
        }
    }
    Ok(lo)
}

/// Lexicographic rank of a `k`-subset of `{0, …, n - 1}`, the inverse of [`element`].
pub fn rank(n: i64, k: i64, indices: &[i64]) -> Result<i64> {
    let count = choose(n, k)?;
    if !is_combination(n, k, indices) {
        return Err(CombinationError::InvalidRankState {
            n,
            k,
            data: indices.to_vec(),
        });
    }

    let mut dual = 0i64;
    for (i, &value) in indices.iter().enumerate() {
        dual += choose(n - 1 - value, k - i as i64)?;
    }
    Ok(count - 1 - dual)
}

/// Checks that `indices` is a strictly increasing run of `k` values in `[0, n)`.
pub(crate) fn is_combination(n: i64, k: i64, indices: &[i64]) -> bool {
    n >= 0
        && k >= 0
        && indices.len() as i64 == k
        && indices.iter().all(|&value| (0..n).contains(&value))
        && indices.iter().tuple_windows().all(|(a, b)| a < b)
}
