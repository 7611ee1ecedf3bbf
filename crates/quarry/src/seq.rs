//! The chainable pipeline.
//!
//! [`Seq`] wraps any iterator and exposes the query operators as methods.
//! Streaming stages (`filter`, `select`, `skip`, `take`, the outer side of
//! joins) pull one element at a time; breakers (`group_by`, `order_by`, the
//! inner side of joins) buffer their input on the first pull. Nothing runs
//! until a terminal method or a `for` loop asks for elements.
//!
//! ```
//! use quarry::{seq, Dir};
//!
//! let numbers = [5, 4, 1, 3, 9, 8, 6, 7, 2, 0];
//! let low: Vec<i32> = seq(numbers).filter(|n| *n < 5).to_vec();
//! assert_eq!(low, [4, 1, 3, 2, 0]);
//!
//! let by_parity: Vec<(bool, usize)> = seq(numbers)
//!     .group_by(|n| n % 2 == 0)
//!     .select(|g| (*g.key(), g.count()))
//!     .order_by(|(even, _)| *even, Dir::Desc)
//!     .to_vec();
//! assert_eq!(by_parity, [(true, 5), (false, 5)]);
//! ```

use std::convert::identity;
use std::hash::Hash;
use std::iter::Sum;
use std::vec;

use rust_decimal::Decimal;

use crate::aggregate;
use crate::error::{KeyError, QueryError, Result};
use crate::group::{try_group_all, GroupBy, Grouping};
use crate::join::{GroupJoin, Join};
use crate::ordering::{Dir, OrderBy};
use crate::query::Query;
use crate::sort::{ByFields, ByFn, ByKey, Comparer, Sorted, ThenBy};
use crate::traits::Seekable;

/// A lazy query pipeline over an iterator.
#[derive(Debug, Clone)]
#[must_use = "pipelines do nothing until materialized"]
pub struct Seq<I> {
    iter: I,
}

/// Starts a pipeline over anything iterable.
pub fn seq<S: IntoIterator>(source: S) -> Seq<S::IntoIter> {
    Seq {
        iter: source.into_iter(),
    }
}

/// Materialized stage produced by the fallible operators.
pub type Materialized<T> = Seq<vec::IntoIter<T>>;

impl<I: Iterator> Seq<I> {
    pub fn new(iter: I) -> Self {
        Seq { iter }
    }

    pub fn into_inner(self) -> I {
        self.iter
    }

    // ========================================================================
    // Streaming stages
    // ========================================================================

    /// Keeps the elements satisfying `predicate`, in order.
    pub fn filter<P>(self, predicate: P) -> Seq<std::iter::Filter<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Seq::new(self.iter.filter(predicate))
    }

    /// Keeps the elements matching a field-addressed [`Query`]'s clauses.
    ///
    /// Only the clause groups apply; the query's ordering, offset and limit
    /// belong to [`Query::filter`].
    pub fn filter_query<'q>(self, query: &'q Query) -> Seq<impl Iterator<Item = I::Item> + 'q>
    where
        I: 'q,
        I::Item: Seekable,
    {
        self.filter(move |item| query.matches(item, <I::Item as Seekable>::accessor))
    }

    /// Maps every element, in order.
    pub fn select<U, F>(self, f: F) -> Seq<std::iter::Map<I, F>>
    where
        F: FnMut(I::Item) -> U,
    {
        Seq::new(self.iter.map(f))
    }

    /// Maps every element to a sequence and flattens the results.
    pub fn select_many<U, F>(self, f: F) -> Seq<std::iter::FlatMap<I, U, F>>
    where
        U: IntoIterator,
        F: FnMut(I::Item) -> U,
    {
        Seq::new(self.iter.flat_map(f))
    }

    pub fn skip(self, n: usize) -> Seq<std::iter::Skip<I>> {
        Seq::new(self.iter.skip(n))
    }

    pub fn take(self, n: usize) -> Seq<std::iter::Take<I>> {
        Seq::new(self.iter.take(n))
    }

    // ========================================================================
    // Joins
    // ========================================================================

    /// Inner equality join.
    ///
    /// For each element of `self` in order, yields `combine(outer, inner)` for
    /// every element of `inner` with an equal key, in `inner`'s order.
    ///
    /// ```
    /// use quarry::seq;
    ///
    /// let customers = [("ALFKI", "Berlin"), ("AROUT", "London"), ("BONAP", "Paris")];
    /// let suppliers = [("Exotic Liquids", "London"), ("Heli", "Berlin"), ("Tokyo Traders", "Tokyo")];
    ///
    /// let pairs: Vec<(&str, &str)> = seq(&customers)
    ///     .join(&suppliers, |c| c.1, |s| s.1, |c, s| (c.0, s.0))
    ///     .to_vec();
    /// assert_eq!(pairs, [("ALFKI", "Heli"), ("AROUT", "Exotic Liquids")]);
    /// ```
    pub fn join<J, K, U, FO, FI, FC>(
        self,
        inner: J,
        outer_key: FO,
        inner_key: FI,
        combine: FC,
    ) -> Seq<Join<I, J::IntoIter, K, FO, FI, FC>>
    where
        J: IntoIterator,
        K: PartialEq,
        FO: FnMut(&I::Item) -> K,
        FI: FnMut(&J::Item) -> K,
        FC: FnMut(&I::Item, &J::Item) -> U,
    {
        Seq::new(Join::new(
            self.iter,
            inner.into_iter(),
            outer_key,
            inner_key,
            combine,
        ))
    }

    /// Equality join yielding each outer element with all its matches.
    ///
    /// Every outer element produces exactly one result, even with no
    /// matches, so this doubles as a left outer join.
    pub fn group_join<J, K, U, FO, FI, FC>(
        self,
        inner: J,
        outer_key: FO,
        inner_key: FI,
        combine: FC,
    ) -> Seq<GroupJoin<I, J::IntoIter, K, FO, FI, FC>>
    where
        J: IntoIterator,
        J::Item: Clone,
        K: PartialEq,
        FO: FnMut(&I::Item) -> K,
        FI: FnMut(&J::Item) -> K,
        FC: FnMut(I::Item, Vec<J::Item>) -> U,
    {
        Seq::new(GroupJoin::new(
            self.iter,
            inner.into_iter(),
            outer_key,
            inner_key,
            combine,
        ))
    }

    // ========================================================================
    // Grouping
    // ========================================================================

    /// Partitions elements by key.
    ///
    /// Groups appear in first-seen key order with members in source order.
    /// The key function runs once per element.
    #[allow(clippy::type_complexity)]
    pub fn group_by<K, F>(
        self,
        key: F,
    ) -> Seq<GroupBy<I, F, fn(I::Item) -> I::Item, K, I::Item>>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&I::Item) -> K,
    {
        Seq::new(GroupBy::new(
            self.iter,
            key,
            identity as fn(I::Item) -> I::Item,
        ))
    }

    /// Partitions elements by key, storing `element(item)` in each group.
    pub fn group_by_select<K, E, F, G>(self, key: F, element: G) -> Seq<GroupBy<I, F, G, K, E>>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&I::Item) -> K,
        G: FnMut(I::Item) -> E,
    {
        Seq::new(GroupBy::new(self.iter, key, element))
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Stable sort by a key. Add tie-breakers with [`then_by`](Seq::then_by).
    pub fn order_by<K, F>(self, key: F, dir: Dir) -> Seq<Sorted<I, ByKey<F, K>>>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        Seq::new(Sorted::new(self.iter, ByKey::new(key, dir)))
    }

    pub fn order_by_asc<K, F>(self, key: F) -> Seq<Sorted<I, ByKey<F, K>>>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        self.order_by(key, Dir::Asc)
    }

    pub fn order_by_desc<K, F>(self, key: F) -> Seq<Sorted<I, ByKey<F, K>>>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        self.order_by(key, Dir::Desc)
    }

    /// Stable sort with a comparison function.
    pub fn order_by_with<F>(self, compare: F) -> Seq<Sorted<I, ByFn<F>>>
    where
        F: FnMut(&I::Item, &I::Item) -> std::cmp::Ordering,
    {
        Seq::new(Sorted::new(self.iter, ByFn(compare)))
    }

    /// Stable sort by named fields of [`Seekable`] records.
    ///
    /// Missing values sort last; values of mismatched types count as equal.
    #[allow(clippy::type_complexity)]
    pub fn order_by_fields(
        self,
        orderings: &[OrderBy],
    ) -> Seq<Sorted<I, ByFields<for<'a> fn(&'a I::Item, &str) -> crate::Value<'a>>>>
    where
        I::Item: Seekable,
    {
        let accessor: for<'a> fn(&'a I::Item, &str) -> crate::Value<'a> =
            <I::Item as Seekable>::accessor;
        Seq::new(Sorted::new(
            self.iter,
            ByFields::new(orderings.to_vec(), accessor),
        ))
    }

    // ========================================================================
    // Fallible stages
    // ========================================================================
    //
    // These consume the whole upstream before yielding, so a failing key
    // produces one error and no partial output.

    /// Like [`filter`](Seq::filter), with a predicate that can fail.
    pub fn try_filter<P>(self, mut predicate: P) -> Result<Materialized<I::Item>>
    where
        P: FnMut(&I::Item) -> std::result::Result<bool, KeyError>,
    {
        let mut kept = Vec::new();
        for (index, item) in self.iter.enumerate() {
            if predicate(&item).map_err(|err| err.at(index))? {
                kept.push(item);
            }
        }
        Ok(seq(kept))
    }

    /// Like [`select`](Seq::select), with a mapping that can fail.
    pub fn try_select<U, F>(self, mut f: F) -> Result<Materialized<U>>
    where
        F: FnMut(I::Item) -> std::result::Result<U, KeyError>,
    {
        let mapped = self
            .iter
            .enumerate()
            .map(|(index, item)| f(item).map_err(|err| err.at(index)))
            .collect::<Result<Vec<U>>>()?;
        Ok(seq(mapped))
    }

    /// Like [`group_by`](Seq::group_by), with a key function that can fail.
    pub fn try_group_by<K, F>(self, key: F) -> Result<Materialized<Grouping<K, I::Item>>>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&I::Item) -> std::result::Result<K, KeyError>,
    {
        let groups =
            try_group_all(self.iter, key, identity).map_err(|(index, err)| err.at(index))?;
        Ok(seq(groups))
    }

    /// Stable sort by a key that can fail. Each key is computed once.
    pub fn try_order_by<K, F>(self, mut key: F, dir: Dir) -> Result<Materialized<I::Item>>
    where
        K: Ord,
        F: FnMut(&I::Item) -> std::result::Result<K, KeyError>,
    {
        let mut keyed = self
            .iter
            .enumerate()
            .map(|(index, item)| key(&item).map(|k| (k, item)).map_err(|err| err.at(index)))
            .collect::<Result<Vec<(K, I::Item)>>>()?;
        keyed.sort_by(|(a, _), (b, _)| dir.apply(a.cmp(b)));
        Ok(seq(keyed.into_iter().map(|(_, item)| item).collect::<Vec<_>>()))
    }

    // ========================================================================
    // Terminal operations
    // ========================================================================

    /// Collects the pipeline into a vector, in pipeline order.
    pub fn to_vec(self) -> Vec<I::Item> {
        self.iter.collect()
    }

    /// First element, or [`QueryError::EmptySequence`].
    pub fn first(mut self) -> Result<I::Item> {
        self.iter.next().ok_or_else(|| QueryError::empty("first"))
    }

    pub fn first_or_none(mut self) -> Option<I::Item> {
        self.iter.next()
    }

    pub fn count(self) -> usize {
        self.iter.count()
    }

    pub fn any<P>(self, predicate: P) -> bool
    where
        P: FnMut(&I::Item) -> bool,
    {
        aggregate::any(self.iter, predicate)
    }

    pub fn all<P>(self, predicate: P) -> bool
    where
        P: FnMut(&I::Item) -> bool,
    {
        aggregate::all(self.iter, predicate)
    }

    /// Total of the extracted values; zero when empty.
    pub fn sum<N, F>(self, extract: F) -> N
    where
        N: Sum<N>,
        F: FnMut(&I::Item) -> N,
    {
        aggregate::sum(self.iter, extract)
    }

    /// Exact decimal mean; fails when empty.
    pub fn average<N, F>(self, extract: F) -> Result<Decimal>
    where
        N: Into<Decimal>,
        F: FnMut(&I::Item) -> N,
    {
        aggregate::average(self.iter, extract)
    }

    /// Element with the smallest key; the first one on ties.
    pub fn min_by_key<K, F>(self, key: F) -> Result<I::Item>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        self.iter
            .min_by_key(key)
            .ok_or_else(|| QueryError::empty("min"))
    }

    /// Element with the largest key; the last one on ties.
    pub fn max_by_key<K, F>(self, key: F) -> Result<I::Item>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        self.iter
            .max_by_key(key)
            .ok_or_else(|| QueryError::empty("max"))
    }
}

impl<I, C> Seq<Sorted<I, C>>
where
    I: Iterator,
    C: Comparer<I::Item>,
{
    /// Adds a tie-breaking key to an ordered pipeline.
    pub fn then_by<K, F>(self, key: F, dir: Dir) -> Seq<Sorted<I, ThenBy<C, ByKey<F, K>>>>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        Seq::new(self.iter.then(ByKey::new(key, dir)))
    }

    pub fn then_by_asc<K, F>(self, key: F) -> Seq<Sorted<I, ThenBy<C, ByKey<F, K>>>>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        self.then_by(key, Dir::Asc)
    }

    pub fn then_by_desc<K, F>(self, key: F) -> Seq<Sorted<I, ThenBy<C, ByKey<F, K>>>>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        self.then_by(key, Dir::Desc)
    }
}

impl<I: Iterator> IntoIterator for Seq<I> {
    type Item = I::Item;
    type IntoIter = I;

    fn into_iter(self) -> I {
        self.iter
    }
}
