//! Field access for records used with field-addressed queries.

use chrono::{NaiveDate, NaiveDateTime};

use crate::value::{Timestamp, Value};

/// Trait for records that can be queried by field name.
///
/// # Example
///
/// ```
/// use quarry::{Seekable, Value, Number};
///
/// struct Product {
///     name: String,
///     units_in_stock: u32,
/// }
///
/// impl Seekable for Product {
///     fn seeker_field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             "units_in_stock" => Value::Number(Number::from(self.units_in_stock)),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Seekable {
    /// Returns the value of a field, or [`Value::None`] if the field is
    /// unknown or empty on this record.
    fn seeker_field_value(&self, field: &str) -> Value<'_>;

    /// Function-pointer form of [`seeker_field_value`](Self::seeker_field_value),
    /// for the query methods that take an accessor.
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.seeker_field_value(field)
    }
}

impl<T: Seekable> Seekable for &T {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        (**self).seeker_field_value(field)
    }
}

/// Conversion of date and time types into a [`Timestamp`].
pub trait SeekerTimestamp {
    fn seeker_timestamp(&self) -> Timestamp;
}

impl SeekerTimestamp for i64 {
    fn seeker_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(*self)
    }
}

impl SeekerTimestamp for NaiveDateTime {
    fn seeker_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(self.and_utc().timestamp_millis())
    }
}

/// Dates map to midnight UTC.
impl SeekerTimestamp for NaiveDate {
    fn seeker_timestamp(&self) -> Timestamp {
        self.and_time(chrono::NaiveTime::MIN).seeker_timestamp()
    }
}
