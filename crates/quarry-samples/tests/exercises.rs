//! Exercises run against the fixture dataset.

use chrono::NaiveDate;
use proptest::prelude::*;
use quarry_samples::exercises::{self, PriceBand};
use quarry_samples::{Customer, DataSource, ExerciseConfig, Product};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const DATASET: &str = include_str!("fixtures/dataset.json");

fn data() -> DataSource {
    DataSource::from_json(DATASET).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn customer_ids(customers: Vec<&Customer>) -> Vec<&str> {
    customers.into_iter().map(|c| c.id.as_str()).collect()
}

fn product_ids(products: &[&Product]) -> Vec<u32> {
    products.iter().map(|p| p.id).collect()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn fixture_loads() {
    let data = data();
    assert_eq!(data.customers().len(), 7);
    assert_eq!(data.orders().len(), 16);
    assert_eq!(data.products().len(), 10);
    assert_eq!(data.suppliers().len(), 5);
}

// ============================================================================
// Restriction
// ============================================================================

#[test]
fn low_numbers() {
    assert_eq!(
        exercises::low_numbers(&[5, 4, 1, 3, 9, 8, 6, 7, 2, 0], 5),
        [4, 1, 3, 2, 0]
    );
}

#[test]
fn products_in_stock() {
    let data = data();
    let found = exercises::products_in_stock(&data);
    assert_eq!(product_ids(&found), [1, 2, 3, 4, 9, 24, 43]);
}

#[test]
fn customers_in_configured_city() {
    let data = data();
    let config = ExerciseConfig::default();
    let found = exercises::customers_in_city(&data, &config.city);
    assert_eq!(customer_ids(found), ["AROUT", "BSBEV", "SEVES"]);

    let found = exercises::customers_in_city(&data, "Tokyo");
    assert!(found.is_empty());
}

#[test]
fn customers_with_turnover_over_threshold() {
    let data = data();
    let config = ExerciseConfig::default();
    let rows = exercises::customers_with_turnover_over(&data, config.turnover_threshold);

    let found: Vec<(&str, Decimal)> = rows.iter().map(|r| (r.customer_id, r.total_sum)).collect();
    assert_eq!(
        found,
        [
            ("ALFKI", dec!(2022.50)),
            ("AROUT", dec!(1379.00)),
            ("BSBEV", dec!(2333.40)),
            ("SEVES", dec!(5564.08)),
        ]
    );
}

#[test]
fn customers_with_large_order() {
    let data = data();
    let config = ExerciseConfig::default();
    let ids = exercises::customers_with_large_order(&data, config.large_order_threshold);
    // ANATR's largest order is exactly 100.00, which is not above the threshold.
    assert_eq!(ids, ["ALFKI", "AROUT", "BSBEV", "SEVES", "LAZYK"]);
}

// ============================================================================
// Suppliers
// ============================================================================

#[test]
fn suppliers_with_local_customers() {
    let data = data();
    let rows = exercises::suppliers_with_local_customers(&data);
    let found: Vec<(&str, Vec<&str>)> = rows
        .iter()
        .map(|r| (r.supplier.name.as_str(), r.customer_ids.clone()))
        .collect();

    assert_eq!(
        found,
        [
            ("Exotic Liquids", vec!["AROUT", "BSBEV", "SEVES"]),
            ("Heli Süßwaren GmbH & Co. KG", vec!["ALFKI"]),
            ("Aux joyeux ecclésiastiques", vec!["PARIS"]),
        ]
    );
}

#[test]
fn local_customers_by_supplier_groups_the_join() {
    let data = data();
    let rows = exercises::local_customers_by_supplier(&data);
    let found: Vec<(&str, Vec<&str>)> = rows
        .iter()
        .map(|r| (r.supplier.name.as_str(), r.customer_ids.clone()))
        .collect();

    assert_eq!(
        found,
        [
            ("Heli Süßwaren GmbH & Co. KG", vec!["ALFKI"]),
            ("Exotic Liquids", vec!["AROUT", "BSBEV", "SEVES"]),
            ("Aux joyeux ecclésiastiques", vec!["PARIS"]),
        ]
    );
}

#[test]
fn both_supplier_forms_find_the_same_pairs() {
    let data = data();
    let mut by_group_join = exercises::suppliers_with_local_customers(&data);
    let mut by_join = exercises::local_customers_by_supplier(&data);
    by_group_join.sort_by(|a, b| a.supplier.name.cmp(&b.supplier.name));
    by_join.sort_by(|a, b| a.supplier.name.cmp(&b.supplier.name));
    assert_eq!(by_group_join, by_join);
}

// ============================================================================
// First orders
// ============================================================================

#[test]
fn customer_start_dates() {
    let data = data();
    let rows = exercises::customer_start_dates(&data).unwrap();
    let found: Vec<(&str, NaiveDate)> = rows.iter().map(|r| (r.customer_id, r.start)).collect();

    assert_eq!(
        found,
        [
            ("ALFKI", date(1997, 8, 25)),
            ("ANATR", date(1996, 9, 18)),
            ("AROUT", date(1996, 11, 15)),
            ("BSBEV", date(1996, 8, 26)),
            ("SEVES", date(1996, 11, 21)),
            ("LAZYK", date(1997, 3, 21)),
        ]
    );
}

#[test]
fn customer_start_dates_ordered() {
    let data = data();
    let rows = exercises::customer_start_dates_ordered(&data).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.customer_id).collect();

    // SEVES and AROUT both start in November 1996; the larger total wins.
    assert_eq!(ids, ["ALFKI", "LAZYK", "SEVES", "AROUT", "ANATR", "BSBEV"]);
    assert_eq!(rows[2].total_sum, dec!(5564.08));
    assert_eq!(rows[3].total_sum, dec!(1379.00));
}

// ============================================================================
// Contact details
// ============================================================================

#[test]
fn customers_with_incomplete_contact() {
    let data = data();
    let found = exercises::customers_with_incomplete_contact(&data);
    assert_eq!(
        customer_ids(found),
        ["ALFKI", "ANATR", "AROUT", "SEVES", "LAZYK"]
    );
}

#[test]
fn incomplete_contact_query_agrees_with_closure() {
    let data = data();
    let by_closure = exercises::customers_with_incomplete_contact(&data);
    let by_query = exercises::customers_with_incomplete_contact_query(&data).unwrap();
    assert_eq!(by_closure, by_query);
}

// ============================================================================
// Products
// ============================================================================

#[test]
fn products_by_category() {
    let data = data();
    let rows = exercises::products_by_category(&data);

    let categories: Vec<&str> = rows.iter().map(|r| r.category).collect();
    assert_eq!(categories, ["Beverages", "Condiments", "Meat/Poultry"]);

    let beverages = &rows[0].by_stock;
    assert_eq!(beverages.len(), 2);
    assert!(*beverages[0].key());
    assert_eq!(product_ids(beverages[0].items()), [24, 1, 2, 43]);
    assert!(!*beverages[1].key());
    assert_eq!(product_ids(beverages[1].items()), [38]);

    let condiments = &rows[1].by_stock;
    assert_eq!(product_ids(condiments[0].items()), [3, 4]);
    assert_eq!(product_ids(condiments[1].items()), [5]);
}

#[test]
fn products_by_price_band() {
    let data = data();
    let bands = exercises::products_by_price_band(&data, &ExerciseConfig::default());

    let found: Vec<(PriceBand, Vec<u32>)> = bands
        .iter()
        .map(|g| (*g.key(), product_ids(g.items())))
        .collect();
    assert_eq!(
        found,
        [
            (PriceBand::Cheap, vec![1, 2, 3, 24]),
            (PriceBand::Medium, vec![4, 5, 17, 43]),
            (PriceBand::Expensive, vec![9, 38]),
        ]
    );
}

#[test]
fn price_bands_follow_config() {
    let data = data();
    let config = ExerciseConfig::default().price_bands(5, 300);
    let bands = exercises::products_by_price_band(&data, &config);

    let keys: Vec<PriceBand> = bands.iter().map(|g| *g.key()).collect();
    assert_eq!(keys, [PriceBand::Cheap, PriceBand::Medium]);
    assert_eq!(product_ids(bands[0].items()), [24]);
}

// ============================================================================
// Statistics
// ============================================================================

#[test]
fn city_statistics() {
    let data = data();
    let rows = exercises::city_statistics(&data).unwrap();
    let found: Vec<(&str, Decimal, Decimal)> = rows
        .iter()
        .map(|r| (r.city, r.intensity, r.average_income))
        .collect();

    assert_eq!(
        found,
        [
            ("Berlin", dec!(3), dec!(2022.50)),
            ("México D.F.", dec!(2), dec!(188.80)),
            ("London", dec!(3), dec!(3092.16)),
            ("Walla Walla", dec!(2), dec!(357.00)),
            ("Paris", dec!(0), dec!(0)),
        ]
    );
}

#[test]
fn order_activity() {
    let data = data();
    let activity = exercises::order_activity(&data);

    let by_month: Vec<(u32, usize)> = activity
        .by_month
        .iter()
        .map(|c| (c.period, c.orders))
        .collect();
    assert_eq!(
        by_month,
        [(3, 3), (5, 2), (8, 3), (9, 1), (10, 2), (11, 2), (12, 3)]
    );

    let by_year: Vec<(i32, usize)> = activity
        .by_year
        .iter()
        .map(|c| (c.period, c.orders))
        .collect();
    assert_eq!(by_year, [(1996, 7), (1997, 9)]);

    let by_year_month: Vec<((i32, u32), usize)> = activity
        .by_year_month
        .iter()
        .map(|c| (c.period, c.orders))
        .collect();
    assert_eq!(
        by_year_month,
        [
            ((1996, 8), 1),
            ((1996, 9), 1),
            ((1996, 11), 2),
            ((1996, 12), 3),
            ((1997, 3), 3),
            ((1997, 5), 2),
            ((1997, 8), 2),
            ((1997, 10), 2),
        ]
    );
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn turnover_rows_are_above_threshold(whole in 0i64..6000) {
        let data = data();
        let threshold = Decimal::from(whole);
        let rows = exercises::customers_with_turnover_over(&data, threshold);
        prop_assert!(rows.iter().all(|r| r.total_sum > threshold));

        let expected = data
            .customers()
            .iter()
            .filter(|c| data.orders_of(&c.id).sum(|o| o.total) > threshold)
            .count();
        prop_assert_eq!(rows.len(), expected);
    }

    #[test]
    fn every_product_lands_in_one_band(cheap in 0i64..100, width in 0i64..200) {
        let data = data();
        let config = ExerciseConfig::default().price_bands(cheap, cheap + width);
        let bands = exercises::products_by_price_band(&data, &config);
        let total: usize = bands.iter().map(|g| g.len()).sum();
        prop_assert_eq!(total, data.products().len());
    }
}
