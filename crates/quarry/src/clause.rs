//! Clause types for field-addressed predicates.
//!
//! A [`Clause`] is a single filter predicate: a field name, an operator, and
//! an owned comparison value.

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{QueryError, Result};
use crate::op::Op;
use crate::value::{Number, Timestamp, Value};

/// A single filter predicate.
///
/// ```
/// use quarry::{Clause, Op, Value};
///
/// let clause = Clause::new("city", Op::Eq, "London");
/// assert!(clause.matches(&Value::String("London")));
/// assert!(!clause.matches(&Value::None));
/// ```
#[derive(Debug, Clone)]
pub struct Clause {
    pub field: String,
    pub op: Op,
    pub value: ClauseValue,
}

impl Clause {
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<ClauseValue>) -> Self {
        Clause {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// A clause matching a missing or whitespace-only field.
    pub fn blank(field: impl Into<String>) -> Self {
        Clause::new(field, Op::Blank, ClauseValue::Absent)
    }

    /// Checks that the operator makes sense for the clause value.
    pub fn validate(&self) -> Result<()> {
        let valid = match &self.value {
            ClauseValue::String(_) => self.op.is_string_op() && self.op != Op::Regex,
            ClauseValue::Regex(_) => self.op == Op::Regex,
            ClauseValue::Number(_) => self.op.is_number_op(),
            ClauseValue::Timestamp(_) => self.op.is_timestamp_op(),
            ClauseValue::Bool(_) => self.op.is_bool_op(),
            ClauseValue::Absent => self.op == Op::Blank,
        };
        if valid {
            Ok(())
        } else {
            Err(QueryError::InvalidOperatorForType {
                op: self.op.as_str(),
                value_type: self.value.type_name(),
            })
        }
    }

    /// Evaluates this clause, treating every non-match (including type
    /// mismatches and missing fields) as `false`.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        self.evaluate(field_value).unwrap_or(false)
    }

    /// Evaluates this clause, reporting a type mismatch instead of hiding it.
    ///
    /// A missing field is not a mismatch: it only satisfies `Blank`.
    pub fn evaluate(&self, field_value: &Value<'_>) -> Result<bool> {
        if self.op == Op::Blank {
            return Ok(match field_value {
                Value::None => true,
                Value::String(s) => s.trim().is_empty(),
                _ => false,
            });
        }

        match (&self.value, field_value) {
            (_, Value::None) => Ok(false),
            (ClauseValue::String(pattern), Value::String(s)) => Ok(self.match_string(s, pattern)),
            (ClauseValue::Regex(regex), Value::String(s)) => Ok(regex.is_match(s)),
            (ClauseValue::Number(clause), Value::Number(field)) => Ok(field
                .compare(*clause)
                .is_some_and(|ordering| self.op.eval_ordering(ordering))),
            (ClauseValue::Timestamp(clause), Value::Timestamp(field)) => {
                Ok(self.op.eval_ordering(field.cmp(clause)))
            }
            (ClauseValue::Bool(clause), Value::Bool(field)) => match self.op.normalize() {
                Op::Eq => Ok(field == clause),
                Op::Ne => Ok(field != clause),
                _ => Ok(false),
            },
            (expected, actual) => Err(QueryError::TypeMismatch {
                expected: expected.type_name(),
                actual: actual.type_name(),
            }),
        }
    }

    fn match_string(&self, field: &str, pattern: &str) -> bool {
        match self.op.normalize() {
            Op::Eq => field == pattern,
            Op::Ne => field != pattern,
            Op::StartsWith => field.starts_with(pattern),
            Op::EndsWith => field.ends_with(pattern),
            Op::Contains => field.contains(pattern),
            _ => false,
        }
    }
}

/// Owned value stored in a clause.
///
/// Unlike [`Value`], which borrows from the record, `ClauseValue` owns its
/// data so it can live in query definitions.
#[derive(Debug, Clone)]
pub enum ClauseValue {
    String(String),
    Number(Number),
    Timestamp(Timestamp),
    Bool(bool),
    /// Compiled regular expression.
    Regex(Regex),
    /// No operand; used by `Blank`.
    Absent,
}

impl ClauseValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ClauseValue::String(_) | ClauseValue::Regex(_) => "string",
            ClauseValue::Number(_) => "number",
            ClauseValue::Timestamp(_) => "timestamp",
            ClauseValue::Bool(_) => "bool",
            ClauseValue::Absent => "none",
        }
    }
}

impl From<String> for ClauseValue {
    fn from(s: String) -> Self {
        ClauseValue::String(s)
    }
}

impl From<&str> for ClauseValue {
    fn from(s: &str) -> Self {
        ClauseValue::String(s.to_string())
    }
}

impl From<Number> for ClauseValue {
    fn from(n: Number) -> Self {
        ClauseValue::Number(n)
    }
}

impl From<Timestamp> for ClauseValue {
    fn from(t: Timestamp) -> Self {
        ClauseValue::Timestamp(t)
    }
}

impl From<bool> for ClauseValue {
    fn from(b: bool) -> Self {
        ClauseValue::Bool(b)
    }
}

impl From<Regex> for ClauseValue {
    fn from(r: Regex) -> Self {
        ClauseValue::Regex(r)
    }
}

macro_rules! clause_number_from {
    ($($source:ty),+) => {
        $(
            impl From<$source> for ClauseValue {
                fn from(n: $source) -> Self {
                    ClauseValue::Number(Number::from(n))
                }
            }
        )+
    };
}

clause_number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, Decimal);
