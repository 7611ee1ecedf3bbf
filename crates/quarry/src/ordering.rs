//! Sort direction and field-based ordering.
//!
//! [`Dir`] is shared by typed ordering (`Seq::order_by`) and by named-field
//! ordering ([`OrderBy`]).

use std::cmp::Ordering;

use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl Dir {
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering on a named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub dir: Dir,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Compares two values in this ordering's direction.
    ///
    /// Missing values sort last in both directions. Returns `None` when
    /// the values cannot be compared (type mismatch or NaN).
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
        match (a, b) {
            (Value::None, Value::None) => Some(Ordering::Equal),
            (Value::None, _) => Some(Ordering::Greater),
            (_, Value::None) => Some(Ordering::Less),
            _ => compare_values(a, b).map(|ordering| self.dir.apply(ordering)),
        }
    }
}

/// Compares two values of the same type in ascending order.
///
/// Missing values sort after present ones. Returns `None` if the types don't
/// match or the comparison is not possible (NaN).
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),

        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        _ => None,
    }
}

/// Compares two records by a list of field orderings.
///
/// The first ordering is the primary key; later ones break ties. An
/// incomparable pair counts as equal for that key.
pub fn compare_by_orderings<T, F>(a: &T, b: &T, orderings: &[OrderBy], accessor: &F) -> Ordering
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    orderings
        .iter()
        .map(|order_by| {
            let val_a = accessor(a, &order_by.field);
            let val_b = accessor(b, &order_by.field);
            order_by
                .compare(&val_a, &val_b)
                .unwrap_or(Ordering::Equal)
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Timestamp};

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn compare_values_by_type() {
        assert_eq!(
            compare_values(&Value::String("apple"), &Value::String("banana")),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_values(
                &Value::Timestamp(Timestamp(2000)),
                &Value::Timestamp(Timestamp(1000))
            ),
            Some(Ordering::Greater)
        );
        assert_eq!(
            compare_values(&Value::Number(Number::F64(f64::NAN)), &Value::Number(Number::F64(1.0))),
            None
        );
        assert_eq!(
            compare_values(&Value::String("a"), &Value::Bool(true)),
            None
        );
    }

    #[test]
    fn missing_sorts_last_in_both_directions() {
        let present = Value::String("WA");
        for order_by in [OrderBy::asc("region"), OrderBy::desc("region")] {
            assert_eq!(
                order_by.compare(&Value::None, &present),
                Some(Ordering::Greater)
            );
            assert_eq!(order_by.compare(&present, &Value::None), Some(Ordering::Less));
        }
    }

    #[test]
    fn orderings_break_ties_in_sequence() {
        fn accessor<'a>(pair: &'a (&'static str, i64), field: &str) -> Value<'a> {
            match field {
                "city" => Value::String(pair.0),
                "count" => Value::Number(Number::I64(pair.1)),
                _ => Value::None,
            }
        }

        let orderings = [OrderBy::asc("city"), OrderBy::desc("count")];
        let a = ("Berlin", 1);
        let b = ("Berlin", 5);
        assert_eq!(
            compare_by_orderings(&a, &b, &orderings, &accessor),
            Ordering::Greater
        );
        assert_eq!(
            compare_by_orderings(&a, &a, &orderings, &accessor),
            Ordering::Equal
        );
    }
}
