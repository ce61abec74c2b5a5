//! Condition trees for field visibility and action skipping.
//!
//! A [`Filter`] is either a `Group` combining child filters with a boolean
//! operator or a `Condition` comparing one field's value against a constant.
//! Evaluation lives in `scribe-engine`; this module is the pure data shape.

use serde::{Deserialize, Serialize};

use crate::values::FieldValue;

/// Boolean combinator for a filter group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupOperator {
    /// All children must match. Short-circuits on the first miss.
    And,
    /// Any child may match. Short-circuits on the first hit.
    Or,
}

/// Comparison operator for a single condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    /// Values are equal (lists compare order-insensitively).
    Eq,
    /// Values differ.
    NotEq,
    /// Numeric greater-than.
    Gt,
    /// Numeric greater-or-equal.
    Gte,
    /// Numeric less-than.
    Lt,
    /// Numeric less-or-equal.
    Lte,
    /// List contains the value, or text contains the substring.
    Contains,
    /// Negation of `Contains`.
    NotContains,
    /// The field has a non-empty value.
    HasValue,
    /// The field is absent or empty.
    NoValue,
}

/// A boolean condition tree evaluated against a value map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Filter {
    /// Combines child filters with a boolean operator.
    #[serde(rename_all = "camelCase")]
    Group {
        /// How the children combine.
        operator: GroupOperator,
        /// Child filters; an empty group is vacuously true.
        #[serde(default)]
        conditions: Vec<Filter>,
    },
    /// Compares one field's captured value against a constant.
    #[serde(rename_all = "camelCase")]
    Condition {
        /// Id of the field whose value is inspected.
        property: String,
        /// Comparison to apply.
        operator: ConditionOperator,
        /// Right-hand side of the comparison. Ignored by
        /// `HasValue`/`NoValue`.
        #[serde(default)]
        value: FieldValue,
    },
}

impl Filter {
    /// Convenience constructor for a single condition.
    pub fn condition(
        property: impl Into<String>,
        operator: ConditionOperator,
        value: impl Into<FieldValue>,
    ) -> Self {
        Self::Condition {
            property: property.into(),
            operator,
            value: value.into(),
        }
    }

    /// Convenience constructor for a group.
    pub fn group(operator: GroupOperator, conditions: Vec<Filter>) -> Self {
        Self::Group {
            operator,
            conditions,
        }
    }
}
