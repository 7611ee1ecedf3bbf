//! Record types of the sample dataset.
//!
//! Records are plain owned data. Relationships are expressed by matching keys:
//! an [`Order`] belongs to the [`Customer`] whose `id` equals its
//! `customer_id`.
//!
//! Every record implements [`Seekable`] so it can be used with field-addressed
//! [`Query`](quarry::Query) filters as well as typed pipelines.

use chrono::NaiveDate;
use quarry::{Number, Seekable, SeekerTimestamp, Value};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub company_name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub city: String,
    pub country: String,
    #[serde(default)]
    pub region: Option<String>,
    /// Not necessarily numeric.
    #[serde(default)]
    pub postal_code: Option<String>,
    pub phone: String,
}

impl Seekable for Customer {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::String(&self.id),
            "company_name" => Value::String(&self.company_name),
            "address" => Value::opt_str(self.address.as_deref()),
            "city" => Value::String(&self.city),
            "country" => Value::String(&self.country),
            "region" => Value::opt_str(self.region.as_deref()),
            "postal_code" => Value::opt_str(self.postal_code.as_deref()),
            "phone" => Value::String(&self.phone),
            _ => Value::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    pub customer_id: String,
    pub date: NaiveDate,
    pub total: Decimal,
}

impl Seekable for Order {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Number(Number::from(self.id)),
            "customer_id" => Value::String(&self.customer_id),
            "date" => Value::Timestamp(self.date.seeker_timestamp()),
            "total" => Value::Number(Number::from(self.total)),
            _ => Value::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub unit_price: Decimal,
    pub units_in_stock: u32,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.units_in_stock > 0
    }
}

impl Seekable for Product {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Number(Number::from(self.id)),
            "name" => Value::String(&self.name),
            "category" => Value::String(&self.category),
            "unit_price" => Value::Number(Number::from(self.unit_price)),
            "units_in_stock" => Value::Number(Number::from(self.units_in_stock)),
            "in_stock" => Value::Bool(self.in_stock()),
            _ => Value::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub city: String,
    pub country: String,
}

impl Seekable for Supplier {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "name" => Value::String(&self.name),
            "address" => Value::opt_str(self.address.as_deref()),
            "city" => Value::String(&self.city),
            "country" => Value::String(&self.country),
            _ => Value::None,
        }
    }
}
