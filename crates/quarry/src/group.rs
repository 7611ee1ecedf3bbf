//! Grouping by key.
//!
//! Groups come out in the order their key was first seen, and each group
//! keeps its members in source order. Keys compare by value, so tuples work
//! as composite keys.

use std::collections::HashMap;
use std::convert::Infallible;
use std::hash::Hash;
use std::vec;

use rust_decimal::Decimal;

use crate::aggregate;
use crate::error::Result;
use crate::seq::{seq, Seq};

/// A key and the members that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping<K, T> {
    key: K,
    items: Vec<T>,
}

impl<K, T> Grouping<K, T> {
    pub fn new(key: K, items: Vec<T>) -> Self {
        Grouping { key, items }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn into_parts(self) -> (K, Vec<T>) {
        (self.key, self.items)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Starts a pipeline over references to the members.
    pub fn seq(&self) -> Seq<std::slice::Iter<'_, T>> {
        seq(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of members. Same as [`len`](Self::len), named for aggregation.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn sum<N, F>(&self, extract: F) -> N
    where
        N: std::iter::Sum<N>,
        F: FnMut(&T) -> N,
    {
        aggregate::sum(&self.items, by_ref(extract))
    }

    pub fn average<N, F>(&self, extract: F) -> Result<Decimal>
    where
        N: Into<Decimal>,
        F: FnMut(&T) -> N,
    {
        aggregate::average(&self.items, by_ref(extract))
    }

    pub fn any<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().any(|item| predicate(item))
    }

    pub fn all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().all(|item| predicate(item))
    }

    /// First member. Groups built by `group_by` are never empty, but
    /// hand-built ones may be.
    pub fn first(&self) -> Result<&T> {
        self.items
            .first()
            .ok_or_else(|| crate::QueryError::empty("first"))
    }

    /// Member with the smallest key; the first one on ties.
    pub fn min_by_key<Q, F>(&self, key: F) -> Result<&T>
    where
        Q: Ord,
        F: FnMut(&T) -> Q,
    {
        self.seq().min_by_key(by_ref(key))
    }

    /// Member with the largest key; the last one on ties.
    pub fn max_by_key<Q, F>(&self, key: F) -> Result<&T>
    where
        Q: Ord,
        F: FnMut(&T) -> Q,
    {
        self.seq().max_by_key(by_ref(key))
    }
}

/// Adapts an extractor over `&T` to one over `&&T`, the item type of a slice
/// iterator.
fn by_ref<T, N>(mut extract: impl FnMut(&T) -> N) -> impl FnMut(&&T) -> N {
    move |item: &&T| extract(*item)
}

impl<K, T> IntoIterator for Grouping<K, T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'g, K, T> IntoIterator for &'g Grouping<K, T> {
    type Item = &'g T;
    type IntoIter = std::slice::Iter<'g, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Partitions `source` by key, projecting each member through `element`.
///
/// On the first key failure, returns its position and error; nothing past it
/// is evaluated.
pub(crate) fn try_group_all<T, K, E, X, FK, FE>(
    source: impl Iterator<Item = T>,
    mut key: FK,
    mut element: FE,
) -> std::result::Result<Vec<Grouping<K, E>>, (usize, X)>
where
    K: Eq + Hash + Clone,
    FK: FnMut(&T) -> std::result::Result<K, X>,
    FE: FnMut(T) -> E,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Grouping<K, E>> = Vec::new();

    for (index, item) in source.enumerate() {
        let k = key(&item).map_err(|err| (index, err))?;
        let member = element(item);
        match slots.get(&k) {
            Some(&slot) => groups[slot].items.push(member),
            None => {
                slots.insert(k.clone(), groups.len());
                groups.push(Grouping::new(k, vec![member]));
            }
        }
    }

    log::trace!("grouped records into {} groups", groups.len());
    Ok(groups)
}

/// Iterator returned by [`Seq::group_by`](crate::Seq::group_by) and
/// [`Seq::group_by_select`](crate::Seq::group_by_select).
///
/// Consumes the whole source on the first call to `next`.
pub struct GroupBy<I, FK, FE, K, E> {
    pending: Option<(I, FK, FE)>,
    groups: vec::IntoIter<Grouping<K, E>>,
}

impl<I, FK, FE, K, E> GroupBy<I, FK, FE, K, E> {
    pub(crate) fn new(source: I, key: FK, element: FE) -> Self {
        GroupBy {
            pending: Some((source, key, element)),
            groups: Vec::new().into_iter(),
        }
    }
}

impl<I, FK, FE, K, E> Iterator for GroupBy<I, FK, FE, K, E>
where
    I: Iterator,
    K: Eq + Hash + Clone,
    FK: FnMut(&I::Item) -> K,
    FE: FnMut(I::Item) -> E,
{
    type Item = Grouping<K, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((source, mut key, element)) = self.pending.take() {
            let groups = try_group_all(source, |item| Ok::<K, Infallible>(key(item)), element)
                .unwrap_or_else(|(_, never)| match never {});
            self.groups = groups.into_iter();
        }
        self.groups.next()
    }
}
