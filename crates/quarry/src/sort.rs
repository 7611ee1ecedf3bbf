//! Stable multi-key sorting.
//!
//! A [`Sorted`] stage holds a [`Comparer`] built from one or more keys. The
//! source is buffered and sorted with a stable sort on the first pull, so
//! elements equal on every key keep their source order.

use std::cmp::Ordering;
use std::marker::PhantomData;
use std::vec;

use crate::ordering::{compare_by_orderings, Dir, OrderBy};
use crate::value::Value;

/// Compares two elements for sorting.
pub trait Comparer<T> {
    fn compare(&mut self, a: &T, b: &T) -> Ordering;
}

/// Compares by a key function in a direction.
pub struct ByKey<F, K> {
    key: F,
    dir: Dir,
    _key: PhantomData<fn() -> K>,
}

impl<F, K> ByKey<F, K> {
    pub fn new(key: F, dir: Dir) -> Self {
        ByKey {
            key,
            dir,
            _key: PhantomData,
        }
    }
}

impl<T, K, F> Comparer<T> for ByKey<F, K>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    fn compare(&mut self, a: &T, b: &T) -> Ordering {
        let ka = (self.key)(a);
        let kb = (self.key)(b);
        self.dir.apply(ka.cmp(&kb))
    }
}

/// Compares with an arbitrary function.
pub struct ByFn<F>(pub F);

impl<T, F> Comparer<T> for ByFn<F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    fn compare(&mut self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

/// Compares by named fields of [`Seekable`](crate::Seekable) records.
pub struct ByFields<F> {
    orderings: Vec<OrderBy>,
    accessor: F,
}

impl<F> ByFields<F> {
    pub fn new(orderings: Vec<OrderBy>, accessor: F) -> Self {
        ByFields {
            orderings,
            accessor,
        }
    }
}

impl<T, F> Comparer<T> for ByFields<F>
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    fn compare(&mut self, a: &T, b: &T) -> Ordering {
        compare_by_orderings(a, b, &self.orderings, &self.accessor)
    }
}

/// The primary comparer, with ties broken by the secondary.
pub struct ThenBy<A, B> {
    primary: A,
    secondary: B,
}

impl<T, A, B> Comparer<T> for ThenBy<A, B>
where
    A: Comparer<T>,
    B: Comparer<T>,
{
    fn compare(&mut self, a: &T, b: &T) -> Ordering {
        match self.primary.compare(a, b) {
            Ordering::Equal => self.secondary.compare(a, b),
            decided => decided,
        }
    }
}

/// Iterator returned by the `order_by` family on [`Seq`](crate::Seq).
pub struct Sorted<I: Iterator, C> {
    source: Option<I>,
    comparer: C,
    buffer: vec::IntoIter<I::Item>,
    settled: bool,
}

impl<I: Iterator, C> Sorted<I, C> {
    pub(crate) fn new(source: I, comparer: C) -> Self {
        Sorted {
            source: Some(source),
            comparer,
            buffer: Vec::new().into_iter(),
            settled: false,
        }
    }

    /// Adds a comparer for elements the current ones consider equal.
    ///
    /// Anything already buffered is sorted again under the combined
    /// comparer on the next pull.
    pub(crate) fn then<D>(self, secondary: D) -> Sorted<I, ThenBy<C, D>> {
        Sorted {
            source: self.source,
            comparer: ThenBy {
                primary: self.comparer,
                secondary,
            },
            buffer: self.buffer,
            settled: false,
        }
    }
}

impl<I, C> Iterator for Sorted<I, C>
where
    I: Iterator,
    C: Comparer<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if !self.settled {
            let mut items: Vec<I::Item> = self.buffer.by_ref().collect();
            if let Some(source) = self.source.take() {
                items.extend(source);
            }
            let comparer = &mut self.comparer;
            items.sort_by(|a, b| comparer.compare(a, b));
            log::trace!("sorted {} elements", items.len());
            self.buffer = items.into_iter();
            self.settled = true;
        }
        self.buffer.next()
    }
}
