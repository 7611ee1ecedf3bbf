//! Field-addressed query builder.
//!
//! A [`Query`] names fields as strings and is evaluated through an accessor
//! (usually [`Seekable::accessor`](crate::Seekable::accessor)). Execution
//! runs on the same [`Seq`](crate::Seq) stages as typed pipelines.

use std::cmp::Ordering;

use regex::Regex;

use crate::clause::{Clause, ClauseValue};
use crate::error::Result;
use crate::op::Op;
use crate::ordering::{compare_by_orderings, Dir, OrderBy};
use crate::seq::seq;
use crate::value::{Timestamp, Value};

/// Clause groups, orderings and paging for a collection query.
///
/// ```text
/// match = (all AND clauses match)
///       ∧ (at least one OR clause matches, OR no OR clauses exist)
///       ∧ (no NOT clause matches)
/// ```
///
/// # Example
///
/// ```
/// use quarry::{Query, Value, Number};
///
/// struct Product {
///     name: &'static str,
///     units_in_stock: u32,
/// }
///
/// fn accessor<'a>(p: &'a Product, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(p.name),
///         "units_in_stock" => Value::Number(Number::from(p.units_in_stock)),
///         _ => Value::None,
///     }
/// }
///
/// let products = [
///     Product { name: "Chai", units_in_stock: 39 },
///     Product { name: "Chef Anton's Gumbo Mix", units_in_stock: 0 },
///     Product { name: "Aniseed Syrup", units_in_stock: 13 },
/// ];
///
/// let query = Query::new()
///     .and_gt("units_in_stock", 0u32)
///     .order_asc("name")
///     .build();
///
/// let in_stock = query.filter(&products, accessor);
/// assert_eq!(in_stock.len(), 2);
/// assert_eq!(in_stock[0].name, "Aniseed Syrup");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    and_clauses: Vec<Clause>,
    or_clauses: Vec<Clause>,
    not_clauses: Vec<Clause>,
    orderings: Vec<OrderBy>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl Query {
    /// Creates an empty query, which matches everything.
    pub fn new() -> Self {
        Query::default()
    }

    // ========================================================================
    // Generic clause builders
    // ========================================================================

    pub fn and(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.and_clauses.push(Clause::new(field, op, value));
        self
    }

    pub fn or(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.or_clauses.push(Clause::new(field, op, value));
        self
    }

    pub fn not(mut self, field: &str, op: Op, value: impl Into<ClauseValue>) -> Self {
        self.not_clauses.push(Clause::new(field, op, value));
        self
    }

    // ========================================================================
    // AND shorthands
    // ========================================================================

    pub fn and_eq(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Eq, value)
    }

    pub fn and_ne(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Ne, value)
    }

    pub fn and_gt(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Gt, value)
    }

    pub fn and_gte(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Gte, value)
    }

    pub fn and_lt(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Lt, value)
    }

    pub fn and_lte(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.and(field, Op::Lte, value)
    }

    pub fn and_contains(self, field: &str, value: &str) -> Self {
        self.and(field, Op::Contains, value)
    }

    pub fn and_startswith(self, field: &str, value: &str) -> Self {
        self.and(field, Op::StartsWith, value)
    }

    pub fn and_regex(self, field: &str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        Ok(self.and(field, Op::Regex, regex))
    }

    pub fn and_blank(mut self, field: &str) -> Self {
        self.and_clauses.push(Clause::blank(field));
        self
    }

    pub fn and_before(self, field: &str, ts: Timestamp) -> Self {
        self.and(field, Op::Before, ts)
    }

    pub fn and_after(self, field: &str, ts: Timestamp) -> Self {
        self.and(field, Op::After, ts)
    }

    // ========================================================================
    // OR shorthands
    // ========================================================================

    pub fn or_eq(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.or(field, Op::Eq, value)
    }

    pub fn or_gt(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.or(field, Op::Gt, value)
    }

    pub fn or_lt(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.or(field, Op::Lt, value)
    }

    pub fn or_contains(self, field: &str, value: &str) -> Self {
        self.or(field, Op::Contains, value)
    }

    pub fn or_startswith(self, field: &str, value: &str) -> Self {
        self.or(field, Op::StartsWith, value)
    }

    pub fn or_regex(self, field: &str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        Ok(self.or(field, Op::Regex, regex))
    }

    pub fn or_blank(mut self, field: &str) -> Self {
        self.or_clauses.push(Clause::blank(field));
        self
    }

    // ========================================================================
    // NOT shorthands
    // ========================================================================

    pub fn not_eq(self, field: &str, value: impl Into<ClauseValue>) -> Self {
        self.not(field, Op::Eq, value)
    }

    pub fn not_contains(self, field: &str, value: &str) -> Self {
        self.not(field, Op::Contains, value)
    }

    pub fn not_startswith(self, field: &str, value: &str) -> Self {
        self.not(field, Op::StartsWith, value)
    }

    pub fn not_regex(self, field: &str, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        Ok(self.not(field, Op::Regex, regex))
    }

    pub fn not_blank(mut self, field: &str) -> Self {
        self.not_clauses.push(Clause::blank(field));
        self
    }

    // ========================================================================
    // Ordering and paging
    // ========================================================================

    /// Adds an ordering. Earlier orderings take precedence.
    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        self.orderings.push(OrderBy::new(field, dir));
        self
    }

    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: usize) -> Self {
        self.offset = Some(n);
        self
    }

    /// Finishes the builder chain.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn and_clauses(&self) -> &[Clause] {
        &self.and_clauses
    }

    pub fn or_clauses(&self) -> &[Clause] {
        &self.or_clauses
    }

    pub fn not_clauses(&self) -> &[Clause] {
        &self.not_clauses
    }

    pub fn orderings(&self) -> &[OrderBy] {
        &self.orderings
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn get_offset(&self) -> Option<usize> {
        self.offset
    }

    /// `true` when the query has no clauses.
    pub fn is_empty(&self) -> bool {
        self.and_clauses.is_empty() && self.or_clauses.is_empty() && self.not_clauses.is_empty()
    }

    fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.and_clauses
            .iter()
            .chain(&self.or_clauses)
            .chain(&self.not_clauses)
    }

    /// Checks every clause's operator against its value type.
    pub fn validate(&self) -> Result<()> {
        self.clauses().try_for_each(Clause::validate)
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests one item, treating type mismatches as non-matches.
    pub fn matches<T, F>(&self, item: &T, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let check = |clause: &Clause| clause.matches(&accessor(item, &clause.field));

        self.and_clauses.iter().all(check)
            && (self.or_clauses.is_empty() || self.or_clauses.iter().any(check))
            && !self.not_clauses.iter().any(check)
    }

    /// Tests one item, failing on the first clause whose value type does not
    /// fit the field.
    pub fn try_matches<T, F>(&self, item: &T, accessor: F) -> Result<bool>
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        let check = |clause: &Clause| clause.evaluate(&accessor(item, &clause.field));

        for clause in &self.and_clauses {
            if !check(clause)? {
                return Ok(false);
            }
        }

        if !self.or_clauses.is_empty() {
            let mut any = false;
            for clause in &self.or_clauses {
                if check(clause)? {
                    any = true;
                    break;
                }
            }
            if !any {
                return Ok(false);
            }
        }

        for clause in &self.not_clauses {
            if check(clause)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns references to the matching items, ordered, then paged by
    /// offset and limit.
    pub fn filter<'a, T, F>(&self, items: &'a [T], accessor: F) -> Vec<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        seq(items)
            .filter(|item| self.matches(*item, &accessor))
            .order_by_with(|a, b| {
                if self.orderings.is_empty() {
                    Ordering::Equal
                } else {
                    compare_by_orderings(*a, *b, &self.orderings, &accessor)
                }
            })
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .to_vec()
    }

    /// Like [`filter`](Self::filter), cloning the results.
    pub fn filter_cloned<T, F>(&self, items: &[T], accessor: F) -> Vec<T>
    where
        T: Clone,
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.filter(items, accessor).into_iter().cloned().collect()
    }

    /// Number of matching items. Ignores offset and limit.
    pub fn count<T, F>(&self, items: &[T], accessor: F) -> usize
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        seq(items)
            .filter(|item| self.matches(*item, &accessor))
            .count()
    }

    pub fn any<T, F>(&self, items: &[T], accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        seq(items).any(|item| self.matches(*item, &accessor))
    }

    pub fn all<T, F>(&self, items: &[T], accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        seq(items).all(|item| self.matches(*item, &accessor))
    }

    /// First matching item in source order.
    pub fn find<'a, T, F>(&self, items: &'a [T], accessor: F) -> Option<&'a T>
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        seq(items)
            .filter(|item| self.matches(*item, &accessor))
            .first_or_none()
    }
}
