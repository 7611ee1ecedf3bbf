//! Query exercises over a [`DataSource`].
//!
//! Each function runs one independent query and returns typed rows. Rows
//! borrow from the data source; nothing here mutates it.

use std::hash::Hash;

use chrono::{Datelike, NaiveDate};
use quarry::{seq, Grouping, Query, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::ExerciseConfig;
use crate::dataset::DataSource;
use crate::model::{Customer, Order, Product, Supplier};

// ============================================================================
// Result rows
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerTotal<'a> {
    pub customer_id: &'a str,
    pub total_sum: Decimal,
}

/// A supplier and the customers located in its city and country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplierCustomers<'a> {
    pub supplier: &'a Supplier,
    pub customer_ids: Vec<&'a str>,
}

/// Date of a customer's earliest order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerStart<'a> {
    pub customer_id: &'a str,
    pub start: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerStartTotal<'a> {
    pub customer_id: &'a str,
    pub start: NaiveDate,
    pub total_sum: Decimal,
}

/// Products of one category, split by whether they are in stock.
///
/// Each stock group lists its products by ascending unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStock<'a> {
    pub category: &'a str,
    pub by_stock: Vec<Grouping<bool, &'a Product>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PriceBand {
    Cheap,
    Medium,
    Expensive,
}

impl PriceBand {
    /// Band of a unit price: below `cheap_below` is cheap, from
    /// `expensive_from` up is expensive, anything between is medium.
    pub fn of(price: Decimal, config: &ExerciseConfig) -> Self {
        if price < config.cheap_below {
            PriceBand::Cheap
        } else if price >= config.expensive_from {
            PriceBand::Expensive
        } else {
            PriceBand::Medium
        }
    }
}

/// Per-city averages over the city's customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityStatistics<'a> {
    pub city: &'a str,
    /// Mean number of orders per customer.
    pub intensity: Decimal,
    /// Mean of each customer's order total sum.
    pub average_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodCount<K> {
    pub period: K,
    pub orders: usize,
}

/// Order counts per calendar month (1-12), per year, and per year and month.
/// Each list is in ascending period order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderActivity {
    pub by_month: Vec<PeriodCount<u32>>,
    pub by_year: Vec<PeriodCount<i32>>,
    pub by_year_month: Vec<PeriodCount<(i32, u32)>>,
}

// ============================================================================
// Restriction
// ============================================================================

pub fn low_numbers(numbers: &[i32], below: i32) -> Vec<i32> {
    seq(numbers.iter().copied()).filter(|n| *n < below).to_vec()
}

pub fn products_in_stock(data: &DataSource) -> Vec<&Product> {
    seq(data.products()).filter(|p| p.in_stock()).to_vec()
}

pub fn customers_in_city<'a>(data: &'a DataSource, city: &str) -> Vec<&'a Customer> {
    seq(data.customers()).filter(|c| c.city == city).to_vec()
}

/// Customers whose orders add up to more than `threshold`.
pub fn customers_with_turnover_over(
    data: &DataSource,
    threshold: Decimal,
) -> Vec<CustomerTotal<'_>> {
    seq(data.customers())
        .select(|c| CustomerTotal {
            customer_id: &c.id,
            total_sum: data.orders_of(&c.id).sum(|o| o.total),
        })
        .filter(|row| row.total_sum > threshold)
        .to_vec()
}

/// Ids of customers with at least one order above `threshold`.
pub fn customers_with_large_order(data: &DataSource, threshold: Decimal) -> Vec<&str> {
    seq(data.customers())
        .filter(|c| data.orders_of(&c.id).any(|o| o.total > threshold))
        .select(|c| c.id.as_str())
        .to_vec()
}

// ============================================================================
// Suppliers and customers
// ============================================================================

/// Suppliers with at least one customer in the same city and country, in
/// supplier order.
pub fn suppliers_with_local_customers(data: &DataSource) -> Vec<SupplierCustomers<'_>> {
    seq(data.suppliers())
        .group_join(
            data.customers(),
            |s| (s.city.as_str(), s.country.as_str()),
            |c| (c.city.as_str(), c.country.as_str()),
            |supplier, customers| SupplierCustomers {
                supplier,
                customer_ids: customers.into_iter().map(|c| c.id.as_str()).collect(),
            },
        )
        .filter(|row| !row.customer_ids.is_empty())
        .to_vec()
}

/// Same pairs as [`suppliers_with_local_customers`], built by joining
/// customers to suppliers and grouping by supplier. Suppliers come out in
/// the order of their first matching customer.
pub fn local_customers_by_supplier(data: &DataSource) -> Vec<SupplierCustomers<'_>> {
    seq(data.customers())
        .join(
            data.suppliers(),
            |c| (c.city.as_str(), c.country.as_str()),
            |s| (s.city.as_str(), s.country.as_str()),
            |c, s| (*s, c.id.as_str()),
        )
        .group_by_select(|(supplier, _)| *supplier, |(_, id)| id)
        .select(|group| {
            let (supplier, customer_ids) = group.into_parts();
            SupplierCustomers {
                supplier,
                customer_ids,
            }
        })
        .to_vec()
}

// ============================================================================
// First orders
// ============================================================================

fn has_orders(data: &DataSource, customer: &Customer) -> bool {
    data.orders_of(&customer.id).first_or_none().is_some()
}

fn first_order<'a>(data: &'a DataSource, customer: &'a Customer) -> Result<&'a Order> {
    data.orders_of(&customer.id)
        .order_by_asc(|o| o.date)
        .first()
}

fn start_of<'a>(data: &'a DataSource, customer: &'a Customer) -> Result<CustomerStart<'a>> {
    Ok(CustomerStart {
        customer_id: &customer.id,
        start: first_order(data, customer)?.date,
    })
}

fn start_total_of<'a>(
    data: &'a DataSource,
    customer: &'a Customer,
) -> Result<CustomerStartTotal<'a>> {
    Ok(CustomerStartTotal {
        customer_id: &customer.id,
        start: first_order(data, customer)?.date,
        total_sum: data.orders_of(&customer.id).sum(|o| o.total),
    })
}

/// Each ordering customer with the date of their earliest order.
pub fn customer_start_dates(data: &DataSource) -> Result<Vec<CustomerStart<'_>>> {
    seq(data.customers())
        .filter(|c| has_orders(data, c))
        .select(|c| start_of(data, c))
        .into_iter()
        .collect()
}

/// Like [`customer_start_dates`] with order totals, newest start year
/// first, then start month, total and id, all descending.
pub fn customer_start_dates_ordered(data: &DataSource) -> Result<Vec<CustomerStartTotal<'_>>> {
    let rows = seq(data.customers())
        .filter(|c| has_orders(data, c))
        .select(|c| start_total_of(data, c))
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    Ok(seq(rows)
        .order_by_desc(|r| r.start.year())
        .then_by_desc(|r| r.start.month())
        .then_by_desc(|r| r.total_sum)
        .then_by_desc(|r| r.customer_id)
        .to_vec())
}

// ============================================================================
// Contact details
// ============================================================================

/// A postal code with a non-digit, a missing or blank region, or a phone
/// number without a leading area code in parentheses.
pub fn has_incomplete_contact(customer: &Customer) -> bool {
    let odd_postal_code = customer
        .postal_code
        .as_deref()
        .is_some_and(|code| code.chars().any(|ch| !ch.is_ascii_digit()));
    let no_region = customer
        .region
        .as_deref()
        .map_or(true, |region| region.trim().is_empty());
    let no_area_code = !customer.phone.starts_with('(');

    odd_postal_code || no_region || no_area_code
}

pub fn customers_with_incomplete_contact(data: &DataSource) -> Vec<&Customer> {
    seq(data.customers())
        .filter(|c| has_incomplete_contact(c))
        .to_vec()
}

/// [`has_incomplete_contact`] as a field-addressed query.
pub fn incomplete_contact_query() -> Result<Query> {
    Ok(Query::new()
        .or_regex("postal_code", "[^0-9]")?
        .or_blank("region")
        .or_regex("phone", r"^(?:[^(]|$)")?
        .build())
}

pub fn customers_with_incomplete_contact_query(data: &DataSource) -> Result<Vec<&Customer>> {
    let query = incomplete_contact_query()?;
    Ok(seq(data.customers()).filter_query(&query).to_vec())
}

// ============================================================================
// Products
// ============================================================================

pub fn products_by_category(data: &DataSource) -> Vec<CategoryStock<'_>> {
    seq(data.products())
        .group_by(|p| p.category.as_str())
        .select(|group| {
            let (category, products) = group.into_parts();
            let by_stock = seq(products)
                .group_by(|p| p.in_stock())
                .select(|stock| {
                    let (in_stock, products) = stock.into_parts();
                    let by_price = seq(products).order_by_asc(|p| p.unit_price).to_vec();
                    Grouping::new(in_stock, by_price)
                })
                .to_vec();
            CategoryStock { category, by_stock }
        })
        .to_vec()
}

/// Products grouped into price bands, cheapest band first. Empty bands are
/// left out.
pub fn products_by_price_band<'a>(
    data: &'a DataSource,
    config: &ExerciseConfig,
) -> Vec<Grouping<PriceBand, &'a Product>> {
    seq(data.products())
        .group_by(|p| PriceBand::of(p.unit_price, config))
        .order_by_asc(|group| *group.key())
        .to_vec()
}

// ============================================================================
// Statistics
// ============================================================================

struct CustomerActivity<'a> {
    city: &'a str,
    order_count: usize,
    total: Decimal,
}

fn statistics_of<'a>(
    city: &Grouping<&'a str, CustomerActivity<'a>>,
) -> Result<CityStatistics<'a>> {
    Ok(CityStatistics {
        city: *city.key(),
        intensity: city.average(|a| a.order_count)?,
        average_income: city.average(|a| a.total)?,
    })
}

/// Per city, in first-seen order. Customers without orders count with zero
/// orders and a zero total.
pub fn city_statistics(data: &DataSource) -> Result<Vec<CityStatistics<'_>>> {
    seq(data.customers())
        .group_join(
            data.orders(),
            |c| c.id.as_str(),
            |o| o.customer_id.as_str(),
            |customer, orders| CustomerActivity {
                city: &customer.city,
                order_count: orders.len(),
                total: seq(orders).sum(|o| o.total),
            },
        )
        .group_by(|activity| activity.city)
        .select(|city| statistics_of(&city))
        .into_iter()
        .collect()
}

fn count_by<K, F>(orders: &[Order], period: F) -> Vec<PeriodCount<K>>
where
    K: Ord + Hash + Clone,
    F: FnMut(&&Order) -> K,
{
    seq(orders)
        .group_by(period)
        .select(|group| PeriodCount {
            period: group.key().clone(),
            orders: group.count(),
        })
        .order_by_asc(|row| row.period.clone())
        .to_vec()
}

pub fn order_activity(data: &DataSource) -> OrderActivity {
    let orders = data.orders();
    OrderActivity {
        by_month: count_by(orders, |o| o.date.month()),
        by_year: count_by(orders, |o| o.date.year()),
        by_year_month: count_by(orders, |o| (o.date.year(), o.date.month())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry::Seekable;
    use rust_decimal_macros::dec;

    fn customer(
        id: &str,
        postal_code: Option<&str>,
        region: Option<&str>,
        phone: &str,
    ) -> Customer {
        Customer {
            id: id.to_string(),
            company_name: id.to_string(),
            address: None,
            city: "London".to_string(),
            country: "UK".to_string(),
            region: region.map(str::to_string),
            postal_code: postal_code.map(str::to_string),
            phone: phone.to_string(),
        }
    }

    #[test]
    fn low_numbers_keeps_order() {
        assert_eq!(
            low_numbers(&[5, 4, 1, 3, 9, 8, 6, 7, 2, 0], 5),
            [4, 1, 3, 2, 0]
        );
    }

    #[test]
    fn incomplete_contact_rules() {
        let complete = customer("A", Some("12209"), Some("BC"), "(5) 555-4729");
        assert!(!has_incomplete_contact(&complete));

        let no_postal_code = customer("B", None, Some("BC"), "(5) 555-4729");
        assert!(!has_incomplete_contact(&no_postal_code));

        let incomplete = [
            customer("C", Some("WA1 1DP"), Some("BC"), "(5) 1"),
            customer("D", Some("1"), None, "(5) 1"),
            customer("E", Some("1"), Some(" "), "(5) 1"),
            customer("F", Some("1"), Some("BC"), "030-0074321"),
            customer("G", Some("1"), Some("BC"), ""),
        ];
        for c in &incomplete {
            assert!(has_incomplete_contact(c), "customer {}", c.id);
        }
    }

    #[test]
    fn incomplete_contact_query_matches_closure() {
        let query = incomplete_contact_query().unwrap();
        let customers = [
            customer("A", Some("12209"), Some("BC"), "(5) 555-4729"),
            customer("B", None, Some("BC"), "(5) 555-4729"),
            customer("C", Some("WA1 1DP"), Some("BC"), "(5) 1"),
            customer("D", Some("1"), None, "(5) 1"),
            customer("E", Some("1"), Some(" "), "(5) 1"),
            customer("F", Some("1"), Some("BC"), "030-0074321"),
            customer("G", Some("1"), Some("BC"), ""),
        ];
        for c in &customers {
            assert_eq!(
                query.matches(c, Customer::accessor),
                has_incomplete_contact(c),
                "customer {}",
                c.id
            );
        }
    }

    #[test]
    fn price_band_bounds() {
        let config = ExerciseConfig::default().price_bands(10, 50);
        assert_eq!(PriceBand::of(dec!(9.99), &config), PriceBand::Cheap);
        assert_eq!(PriceBand::of(dec!(10), &config), PriceBand::Medium);
        assert_eq!(PriceBand::of(dec!(49.99), &config), PriceBand::Medium);
        assert_eq!(PriceBand::of(dec!(50), &config), PriceBand::Expensive);
    }

    #[test]
    fn empty_source_yields_empty_results() {
        let data = DataSource::default();
        assert!(customers_with_turnover_over(&data, dec!(0)).is_empty());
        assert!(customer_start_dates(&data).unwrap().is_empty());
        assert!(city_statistics(&data).unwrap().is_empty());
        assert!(order_activity(&data).by_year.is_empty());
    }
}
