//! Comparison operators for query clauses.

use std::cmp::Ordering;

/// Comparison operator for a query clause.
///
/// Operators are grouped by the types they support:
/// - **Universal**: `Eq`, `Ne`, `Blank`
/// - **String**: `StartsWith`, `EndsWith`, `Contains`, `Regex`
/// - **Numeric/Timestamp**: `Gt`, `Gte`, `Lt`, `Lte`
/// - **Timestamp aliases**: `Before` (alias for `Lt`), `After` (alias for `Gt`)
/// - **Bool alias**: `Is` (alias for `Eq`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal. Valid for all types.
    Eq,
    /// Not equal. Valid for all types.
    Ne,

    StartsWith,
    EndsWith,
    Contains,
    /// String matches regular expression.
    Regex,

    Gt,
    Gte,
    Lt,
    Lte,

    /// Earlier than (alias for `Lt` on timestamps).
    Before,
    /// Later than (alias for `Gt` on timestamps).
    After,

    /// Alias for `Eq` (reads naturally: `in_stock.is(true)`).
    Is,

    /// Field is missing, or is a string holding only whitespace.
    Blank,
}

impl Op {
    pub fn is_string_op(self) -> bool {
        matches!(
            self,
            Op::Eq | Op::Ne | Op::StartsWith | Op::EndsWith | Op::Contains | Op::Regex | Op::Blank
        )
    }

    pub fn is_number_op(self) -> bool {
        matches!(
            self,
            Op::Eq | Op::Ne | Op::Gt | Op::Gte | Op::Lt | Op::Lte | Op::Blank
        )
    }

    pub fn is_timestamp_op(self) -> bool {
        matches!(
            self,
            Op::Eq
                | Op::Ne
                | Op::Gt
                | Op::Gte
                | Op::Lt
                | Op::Lte
                | Op::Before
                | Op::After
                | Op::Blank
        )
    }

    pub fn is_bool_op(self) -> bool {
        matches!(self, Op::Eq | Op::Ne | Op::Is | Op::Blank)
    }

    /// Normalizes aliases to their canonical form.
    pub fn normalize(self) -> Op {
        match self {
            Op::Before => Op::Lt,
            Op::After => Op::Gt,
            Op::Is => Op::Eq,
            other => other,
        }
    }

    /// Evaluates an ordering-based operator against a comparison result.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self.normalize() {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::StartsWith => "startswith",
            Op::EndsWith => "endswith",
            Op::Contains => "contains",
            Op::Regex => "regex",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::Before => "before",
            Op::After => "after",
            Op::Is => "is",
            Op::Blank => "blank",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_type_checks() {
        assert!(Op::Contains.is_string_op());
        assert!(!Op::Gt.is_string_op());
        assert!(Op::Gte.is_number_op());
        assert!(!Op::Before.is_number_op());
        assert!(Op::After.is_timestamp_op());
        assert!(Op::Is.is_bool_op());
        assert!(!Op::Gt.is_bool_op());
        assert!(Op::Blank.is_string_op() && Op::Blank.is_bool_op());
    }

    #[test]
    fn op_normalization() {
        assert_eq!(Op::Before.normalize(), Op::Lt);
        assert_eq!(Op::After.normalize(), Op::Gt);
        assert_eq!(Op::Is.normalize(), Op::Eq);
        assert_eq!(Op::Blank.normalize(), Op::Blank);
    }

    #[test]
    fn op_eval_ordering() {
        assert!(Op::Eq.eval_ordering(Ordering::Equal));
        assert!(!Op::Ne.eval_ordering(Ordering::Equal));
        assert!(Op::Gte.eval_ordering(Ordering::Equal));
        assert!(!Op::Gt.eval_ordering(Ordering::Equal));
        assert!(Op::Lte.eval_ordering(Ordering::Less));
        assert!(Op::Before.eval_ordering(Ordering::Less));
        assert!(Op::After.eval_ordering(Ordering::Greater));
        assert!(!Op::Contains.eval_ordering(Ordering::Equal));
    }

    #[test]
    fn op_display() {
        assert_eq!(Op::StartsWith.to_string(), "startswith");
        assert_eq!(Op::Blank.to_string(), "blank");
    }
}
