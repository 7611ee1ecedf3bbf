//! Quarry - lazy, typed query pipelines over in-memory collections.
//!
//! Quarry provides a chainable pipeline for querying plain Rust collections.
//! It supports:
//!
//! - Filtering and projection that stream element by element
//! - Inner joins and group joins on equality keys, composite keys included
//! - Grouping that keeps first-seen key order and member order
//! - Stable multi-key ordering with independent directions per key
//! - Exact decimal aggregation: sum, average, count, any, all, min, max
//! - Field-addressed queries with AND / OR / NOT clause groups
//!
//! # Quick Start
//!
//! ```rust
//! use quarry::{seq, Dir};
//! use rust_decimal::Decimal;
//!
//! struct Order {
//!     customer_id: &'static str,
//!     total: Decimal,
//! }
//!
//! let orders = vec![
//!     Order { customer_id: "ALFKI", total: Decimal::from(50) },
//!     Order { customer_id: "ANATR", total: Decimal::from(700) },
//!     Order { customer_id: "ALFKI", total: Decimal::from(150) },
//! ];
//!
//! let totals: Vec<(&str, Decimal)> = seq(&orders)
//!     .group_by(|o| o.customer_id)
//!     .select(|g| (*g.key(), g.sum(|o| o.total)))
//!     .order_by(|(_, total)| *total, Dir::Desc)
//!     .to_vec();
//!
//! assert_eq!(totals, [("ANATR", Decimal::from(700)), ("ALFKI", Decimal::from(200))]);
//! ```
//!
//! # Evaluation
//!
//! Pipelines are lazy. `filter`, `select`, `skip`, `take` and the outer side
//! of joins pull one element at a time. `group_by`, `order_by` and the inner
//! side of joins buffer their whole input the first time they are pulled.
//! Terminal methods (`to_vec`, `first`, `count`, `sum`, `average`, ...) or a
//! `for` loop drive the chain.
//!
//! # Errors
//!
//! `first`, `average`, `min_by_key` and `max_by_key` fail with
//! [`QueryError::EmptySequence`] on empty input; `sum` and `count` return zero.
//! Key functions that can fail return [`KeyError`] and run through the
//! `try_*` stages, which report [`QueryError::InvalidKey`] with the position
//! of the offending element.
//!
//! # Field-Addressed Queries
//!
//! | Type | Operators |
//! |------|-----------|
//! | String | `Eq`, `Ne`, `StartsWith`, `EndsWith`, `Contains`, `Regex`, `Blank` |
//! | Number | `Eq`, `Ne`, `Gt`, `Gte`, `Lt`, `Lte`, `Blank` |
//! | Timestamp | `Eq`, `Ne`, `Before`, `After`, `Gt`, `Gte`, `Lt`, `Lte`, `Blank` |
//! | Bool | `Eq`, `Ne`, `Is`, `Blank` |

pub mod aggregate;
mod clause;
mod error;
mod group;
mod join;
mod op;
mod ordering;
mod query;
mod seq;
mod sort;
mod traits;
mod value;

pub use clause::{Clause, ClauseValue};
pub use error::{require, KeyError, QueryError, Result};
pub use group::{GroupBy, Grouping};
pub use join::{GroupJoin, Join};
pub use op::Op;
pub use ordering::{compare_values, Dir, OrderBy};
pub use query::Query;
pub use seq::{seq, Materialized, Seq};
pub use sort::{ByFields, ByFn, ByKey, Comparer, Sorted, ThenBy};
pub use traits::{Seekable, SeekerTimestamp};
pub use value::{Number, Timestamp, Value};
