//! Runtime value types for field-addressed queries.
//!
//! A [`Value`] is what a [`Seekable`](crate::Seekable) record reports for a
//! named field. Typed pipelines never need it; it backs [`Query`](crate::Query)
//! clauses and [`OrderBy`](crate::OrderBy) field orderings.

use std::cmp::Ordering;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Runtime value for comparison, borrowed from the source record.
///
/// # Example
///
/// ```
/// use quarry::{Value, Number};
/// use rust_decimal::Decimal;
///
/// struct Order {
///     customer_id: String,
///     total: Decimal,
/// }
///
/// fn accessor<'a>(order: &'a Order, field: &str) -> Value<'a> {
///     match field {
///         "customer_id" => Value::String(&order.customer_id),
///         "total" => Value::Number(Number::Decimal(order.total)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Field not present, null, or unsupported.
    None,
}

impl<'a> Value<'a> {
    /// Wraps an optional string field, mapping absence to [`Value::None`].
    pub fn opt_str(value: Option<&'a str>) -> Self {
        value.map_or(Value::None, Value::String)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the timestamp value, if present.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Timestamp(_) => "timestamp",
            Value::Bool(_) => "bool",
            Value::None => "none",
        }
    }
}

/// Numeric value.
///
/// Money travels as `Decimal` so that comparisons against thresholds are
/// exact. When either side of a comparison is a `Decimal` and the other side
/// converts exactly, the comparison happens in decimal; otherwise both sides
/// go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
    Decimal(Decimal),
}

impl Number {
    /// Converts the number to f64. Decimals outside the f64 range become NaN.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
            Number::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Converts to `Decimal` when that is lossless.
    pub fn to_decimal(self) -> Option<Decimal> {
        match self {
            Number::I64(n) => Some(Decimal::from(n)),
            Number::U64(n) => Some(Decimal::from(n)),
            Number::F64(n) => Decimal::try_from(n).ok(),
            Number::Decimal(d) => Some(d),
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            (Number::Decimal(a), Number::Decimal(b)) => Some(a.cmp(&b)),

            (Number::Decimal(_), _) | (_, Number::Decimal(_)) => {
                match (self.to_decimal(), other.to_decimal()) {
                    (Some(a), Some(b)) => Some(a.cmp(&b)),
                    _ => self.to_f64().partial_cmp(&other.to_f64()),
                }
            }

            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident, $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )+
    };
}

number_from!(I64, i64: i8, i16, i32, i64, isize);
number_from!(U64, u64: u8, u16, u32, u64, usize);
number_from!(F64, f64: f32, f64);

impl From<Decimal> for Number {
    fn from(d: Decimal) -> Self {
        Number::Decimal(d)
    }
}

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// ```
/// use quarry::Timestamp;
///
/// assert!(Timestamp(1000) < Timestamp(2000));
/// assert_eq!(Timestamp::from_secs(2).as_millis(), 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs * 1000)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn optional_strings() {
        assert_eq!(Value::opt_str(Some("WA")), Value::String("WA"));
        assert!(Value::opt_str(None).is_none());
    }

    #[test]
    fn value_extractors() {
        assert_eq!(Value::String("hello").as_str(), Some("hello"));
        assert_eq!(
            Value::Number(Number::Decimal(dec!(1.5))).as_number(),
            Some(Number::Decimal(dec!(1.5)))
        );
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::String("test").as_number(), None);
        assert_eq!(Value::None.type_name(), "none");
    }

    #[test]
    fn decimal_comparisons_are_exact() {
        assert_eq!(
            Number::Decimal(dec!(100.00)).compare(Number::Decimal(dec!(100))),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::Decimal(dec!(1000.01)).compare(Number::I64(1000)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Number::U64(7).compare(Number::Decimal(dec!(7.0))),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn decimal_against_float() {
        assert_eq!(
            Number::Decimal(dec!(0.5)).compare(Number::F64(0.25)),
            Some(Ordering::Greater)
        );
        assert_eq!(Number::Decimal(dec!(1)).compare(Number::F64(f64::NAN)), None);
    }

    #[test]
    fn mixed_integer_and_float() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn number_conversions() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42u32), Number::U64(42));
        assert_eq!(Number::from(42.5f64), Number::F64(42.5));
        assert_eq!(Number::from(dec!(9.99)), Number::Decimal(dec!(9.99)));
    }

    #[test]
    fn timestamp_conversions() {
        assert_eq!(Timestamp::from_secs(1).as_millis(), 1000);
        assert_eq!(Timestamp::from_millis(5000).as_secs(), 5);
    }
}
