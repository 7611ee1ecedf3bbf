//! Aggregates over any sequence.
//!
//! | Aggregate | Empty input |
//! |-----------|-------------|
//! | [`sum`] | zero |
//! | [`count`] | `0` |
//! | [`any`] | `false` |
//! | [`all`] | `true` |
//! | [`average`] | [`QueryError::EmptySequence`] |
//!
//! Averages are computed in `Decimal`, so `average` of `[50, 150]` is exactly
//! `100` and comparisons against monetary thresholds never drift.

use std::iter::Sum;

use rust_decimal::Decimal;

use crate::error::{QueryError, Result};

/// Total of the extracted values.
pub fn sum<I, N, F>(items: I, mut extract: F) -> N
where
    I: IntoIterator,
    N: Sum<N>,
    F: FnMut(&I::Item) -> N,
{
    items.into_iter().map(|item| extract(&item)).sum()
}

/// Exact mean of the extracted values.
///
/// ```
/// use quarry::aggregate::average;
/// use rust_decimal::Decimal;
///
/// let counts = [2u32, 4];
/// assert_eq!(average(&counts, |n| **n).unwrap(), Decimal::from(3));
/// assert!(average(&[] as &[u32], |n| **n).is_err());
/// ```
pub fn average<I, N, F>(items: I, mut extract: F) -> Result<Decimal>
where
    I: IntoIterator,
    N: Into<Decimal>,
    F: FnMut(&I::Item) -> N,
{
    let (total, count) = items
        .into_iter()
        .fold((Decimal::ZERO, 0usize), |(total, count), item| {
            (total + extract(&item).into(), count + 1)
        });

    if count == 0 {
        return Err(QueryError::empty("average"));
    }
    Ok(total / Decimal::from(count))
}

pub fn count<I: IntoIterator>(items: I) -> usize {
    items.into_iter().count()
}

pub fn any<I, P>(items: I, mut predicate: P) -> bool
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    items.into_iter().any(|item| predicate(&item))
}

pub fn all<I, P>(items: I, mut predicate: P) -> bool
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    items.into_iter().all(|item| predicate(&item))
}
