//! Quarry samples - customer, order, product and supplier queries.
//!
//! A small trading dataset and a set of query exercises written as
//! [`quarry`] pipelines: restriction, joins and group joins, grouping,
//! multi-key ordering and exact decimal aggregation.
//!
//! # Example
//!
//! ```rust
//! use quarry_samples::{exercises, DataSource};
//!
//! let data = DataSource::from_json(r#"{
//!     "customers": [
//!         {"id": "AROUT", "company_name": "Around the Horn", "city": "London",
//!          "country": "UK", "phone": "(171) 555-7788"}
//!     ],
//!     "orders": [
//!         {"id": 10355, "customer_id": "AROUT", "date": "1996-11-15", "total": "480.00"},
//!         {"id": 10383, "customer_id": "AROUT", "date": "1996-12-16", "total": "899.00"}
//!     ]
//! }"#).unwrap();
//!
//! let rows = exercises::customers_with_turnover_over(&data, 1000.into());
//! assert_eq!(rows[0].customer_id, "AROUT");
//! assert_eq!(rows[0].total_sum.to_string(), "1379.00");
//! ```
//!
//! Thresholds used by the exercises are collected in [`ExerciseConfig`].

mod config;
mod dataset;
pub mod exercises;
mod model;

pub use config::ExerciseConfig;
pub use dataset::{DataError, DataSource};
pub use model::{Customer, Order, Product, Supplier};
