//! Equality joins between two sequences.
//!
//! Both joins buffer the inner sequence, with its keys, when the first result
//! is pulled. Outer elements stream through one at a time.

/// Inner side of a join: the source and key function until first use, then
/// the buffered `(key, item)` pairs in source order.
struct Inner<J: Iterator, FI, K> {
    source: Option<(J, FI)>,
    rows: Vec<(K, J::Item)>,
}

impl<J, FI, K> Inner<J, FI, K>
where
    J: Iterator,
    FI: FnMut(&J::Item) -> K,
{
    fn new(source: J, key: FI) -> Self {
        Inner {
            source: Some((source, key)),
            rows: Vec::new(),
        }
    }

    fn rows(&mut self) -> &[(K, J::Item)] {
        if let Some((source, mut key)) = self.source.take() {
            self.rows = source.map(|item| (key(&item), item)).collect();
            log::trace!("join buffered {} inner rows", self.rows.len());
        }
        &self.rows
    }
}

/// Iterator returned by [`Seq::join`](crate::Seq::join).
///
/// For each outer element in order, yields one combined value per inner
/// element with an equal key, in inner order.
pub struct Join<I: Iterator, J: Iterator, K, FO, FI, FC> {
    outer: I,
    inner: Inner<J, FI, K>,
    outer_key: FO,
    combine: FC,
    current: Option<(I::Item, K)>,
    cursor: usize,
}

impl<I: Iterator, J: Iterator, K, FO, FI, FC> Join<I, J, K, FO, FI, FC>
where
    FI: FnMut(&J::Item) -> K,
{
    pub(crate) fn new(outer: I, inner: J, outer_key: FO, inner_key: FI, combine: FC) -> Self {
        Join {
            outer,
            inner: Inner::new(inner, inner_key),
            outer_key,
            combine,
            current: None,
            cursor: 0,
        }
    }
}

impl<I, J, K, U, FO, FI, FC> Iterator for Join<I, J, K, FO, FI, FC>
where
    I: Iterator,
    J: Iterator,
    K: PartialEq,
    FO: FnMut(&I::Item) -> K,
    FI: FnMut(&J::Item) -> K,
    FC: FnMut(&I::Item, &J::Item) -> U,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        self.inner.rows();
        loop {
            if self.current.is_none() {
                let item = self.outer.next()?;
                let key = (self.outer_key)(&item);
                self.current = Some((item, key));
                self.cursor = 0;
            }

            if let Some((item, key)) = &self.current {
                let rows = &self.inner.rows;
                while self.cursor < rows.len() {
                    let (inner_key, inner_item) = &rows[self.cursor];
                    self.cursor += 1;
                    if inner_key == key {
                        return Some((self.combine)(item, inner_item));
                    }
                }
            }
            self.current = None;
        }
    }
}

/// Iterator returned by [`Seq::group_join`](crate::Seq::group_join).
///
/// Yields exactly one value per outer element, built from the element and the
/// inner elements with an equal key (possibly none).
pub struct GroupJoin<I, J: Iterator, K, FO, FI, FC> {
    outer: I,
    inner: Inner<J, FI, K>,
    outer_key: FO,
    combine: FC,
}

impl<I, J: Iterator, K, FO, FI, FC> GroupJoin<I, J, K, FO, FI, FC>
where
    FI: FnMut(&J::Item) -> K,
{
    pub(crate) fn new(outer: I, inner: J, outer_key: FO, inner_key: FI, combine: FC) -> Self {
        GroupJoin {
            outer,
            inner: Inner::new(inner, inner_key),
            outer_key,
            combine,
        }
    }
}

impl<I, J, K, U, FO, FI, FC> Iterator for GroupJoin<I, J, K, FO, FI, FC>
where
    I: Iterator,
    J: Iterator,
    J::Item: Clone,
    K: PartialEq,
    FO: FnMut(&I::Item) -> K,
    FI: FnMut(&J::Item) -> K,
    FC: FnMut(I::Item, Vec<J::Item>) -> U,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        let item = self.outer.next()?;
        let key = (self.outer_key)(&item);
        let matches = self
            .inner
            .rows()
            .iter()
            .filter(|(inner_key, _)| *inner_key == key)
            .map(|(_, inner_item)| inner_item.clone())
            .collect();
        Some((self.combine)(item, matches))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.outer.size_hint()
    }
}
