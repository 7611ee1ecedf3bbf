//! The read-only dataset the exercises run against.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use quarry::{seq, Seq};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Customer, Order, Product, Supplier};

/// Errors raised while building a [`DataSource`].
#[derive(Debug, Error)]
pub enum DataError {
    /// Two records of the same kind share an identifier.
    #[error("duplicate {entity} id '{id}'")]
    DuplicateId { entity: &'static str, id: String },

    /// An order names a customer that is not in the dataset.
    #[error("order {order_id} refers to unknown customer '{customer_id}'")]
    UnknownCustomer { order_id: u32, customer_id: String },

    /// The JSON document could not be parsed.
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validated snapshot of customers, orders, products and suppliers.
///
/// Built once, then only read. Identifiers are unique per collection and
/// every order belongs to a known customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataSource {
    customers: Vec<Customer>,
    orders: Vec<Order>,
    products: Vec<Product>,
    suppliers: Vec<Supplier>,
}

#[derive(Deserialize)]
struct RawDataSource {
    #[serde(default)]
    customers: Vec<Customer>,
    #[serde(default)]
    orders: Vec<Order>,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    suppliers: Vec<Supplier>,
}

impl DataSource {
    pub fn new(
        customers: Vec<Customer>,
        orders: Vec<Order>,
        products: Vec<Product>,
        suppliers: Vec<Supplier>,
    ) -> Result<Self, DataError> {
        unique("customer", customers.iter().map(|c| c.id.as_str()))?;
        unique("order", orders.iter().map(|o| o.id))?;
        unique("product", products.iter().map(|p| p.id))?;
        unique("supplier", suppliers.iter().map(|s| s.name.as_str()))?;

        let known: HashSet<&str> = customers.iter().map(|c| c.id.as_str()).collect();
        if let Some(orphan) = orders
            .iter()
            .find(|o| !known.contains(o.customer_id.as_str()))
        {
            log::debug!(
                "rejecting dataset: order {} has unknown customer {}",
                orphan.id,
                orphan.customer_id
            );
            return Err(DataError::UnknownCustomer {
                order_id: orphan.id,
                customer_id: orphan.customer_id.clone(),
            });
        }

        log::debug!(
            "dataset ready: {} customers, {} orders, {} products, {} suppliers",
            customers.len(),
            orders.len(),
            products.len(),
            suppliers.len()
        );

        Ok(DataSource {
            customers,
            orders,
            products,
            suppliers,
        })
    }

    /// Parses and validates a JSON document with `customers`, `orders`,
    /// `products` and `suppliers` arrays. Missing arrays are empty.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let raw: RawDataSource = serde_json::from_str(json)?;
        DataSource::new(raw.customers, raw.orders, raw.products, raw.suppliers)
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    /// Orders placed by one customer, in dataset order.
    pub fn orders_of<'a>(
        &'a self,
        customer_id: &'a str,
    ) -> Seq<impl Iterator<Item = &'a Order> + 'a> {
        seq(&self.orders).filter(move |o| o.customer_id == customer_id)
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }
}

fn unique<K>(entity: &'static str, ids: impl Iterator<Item = K>) -> Result<(), DataError>
where
    K: Eq + Hash + Display,
{
    let mut seen = HashSet::new();
    for id in ids {
        let id_text = id.to_string();
        if !seen.insert(id) {
            log::debug!("rejecting dataset: duplicate {} id {}", entity, id_text);
            return Err(DataError::DuplicateId {
                entity,
                id: id_text,
            });
        }
    }
    Ok(())
}
