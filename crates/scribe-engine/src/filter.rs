//! Condition tree evaluation.
//!
//! Pure and total: no panics, no I/O. A malformed node or a reference to an
//! absent value degrades to `false` for that node only; an empty group is
//! vacuously true so fields and actions without a declared condition are
//! never hidden by accident.

use std::collections::HashMap;

use scribe_core::{ConditionOperator, FieldValue, Filter, GroupOperator};

/// Evaluate a condition tree against a value map.
pub fn evaluate(filter: &Filter, values: &HashMap<String, FieldValue>) -> bool {
    match filter {
        Filter::Group {
            operator,
            conditions,
        } => match operator {
            GroupOperator::And => conditions.iter().all(|c| evaluate(c, values)),
            GroupOperator::Or => {
                conditions.is_empty() || conditions.iter().any(|c| evaluate(c, values))
            }
        },
        Filter::Condition {
            property,
            operator,
            value,
        } => apply_operator(*operator, values.get(property), value),
    }
}

/// Apply one comparison operator.
///
/// An absent field value only matches `NoValue`; every other operator
/// yields `false` on absence.
fn apply_operator(
    operator: ConditionOperator,
    field_value: Option<&FieldValue>,
    value: &FieldValue,
) -> bool {
    let Some(field_value) = field_value else {
        return operator == ConditionOperator::NoValue;
    };

    match operator {
        ConditionOperator::Eq => values_equal(field_value, value),
        ConditionOperator::NotEq => !values_equal(field_value, value),
        ConditionOperator::Gt => compare_numeric(field_value, value, std::cmp::Ordering::is_gt),
        ConditionOperator::Gte => compare_numeric(field_value, value, std::cmp::Ordering::is_ge),
        ConditionOperator::Lt => compare_numeric(field_value, value, std::cmp::Ordering::is_lt),
        ConditionOperator::Lte => compare_numeric(field_value, value, std::cmp::Ordering::is_le),
        ConditionOperator::Contains => contains(field_value, value),
        ConditionOperator::NotContains => !contains(field_value, value),
        ConditionOperator::HasValue => !field_value.is_empty(),
        ConditionOperator::NoValue => field_value.is_empty(),
    }
}

/// Equality with order-insensitive list comparison.
fn values_equal(left: &FieldValue, right: &FieldValue) -> bool {
    match (left, right) {
        (FieldValue::List(a), FieldValue::List(b)) => {
            if a.len() != b.len() {
                return false;
            }
            let mut a = a.clone();
            let mut b = b.clone();
            a.sort();
            b.sort();
            a == b
        }
        _ => left == right,
    }
}

/// Numeric comparison; text values parse as numbers when possible.
fn compare_numeric<F>(left: &FieldValue, right: &FieldValue, check: F) -> bool
where
    F: Fn(std::cmp::Ordering) -> bool,
{
    match (number_of(left), number_of(right)) {
        (Some(l), Some(r)) => l.partial_cmp(&r).is_some_and(check),
        _ => false,
    }
}

fn number_of(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) => Some(*n),
        FieldValue::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Containment: list membership or substring match.
fn contains(field_value: &FieldValue, value: &FieldValue) -> bool {
    match (field_value, value) {
        (FieldValue::List(items), FieldValue::Text(needle)) => {
            items.iter().any(|item| item == needle)
        }
        (FieldValue::List(items), FieldValue::List(needles)) => {
            needles.iter().all(|needle| items.contains(needle))
        }
        (FieldValue::Text(haystack), FieldValue::Text(needle)) => haystack.contains(needle.as_str()),
        _ => false,
    }
}
