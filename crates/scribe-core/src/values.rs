//! The value union captured from form inputs.
//!
//! A [`FieldValue`] is what a form field produces and what template
//! expressions resolve to. The untagged serde representation keeps the
//! on-disk config JSON natural (`"x"`, `5`, `true`, `["a", "b"]`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single form value: the JSON-compatible union of everything a field can
/// capture or an action can produce.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean (toggle fields, checkbox-style conditions).
    Bool(bool),
    /// Numeric value (number fields). Stored as `f64` like JSON numbers.
    Number(f64),
    /// Free text, dates and times (ISO strings), select choices, paths.
    Text(String),
    /// Multiple selections or file reference lists.
    List(Vec<String>),
    /// No value captured.
    #[default]
    Null,
}

impl FieldValue {
    /// Whether this value counts as "absent" for conditions and templates.
    ///
    /// Empty text and empty lists are treated as absent, matching how the
    /// condition operators `HasValue`/`NoValue` see them.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    /// Borrow the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the list content, if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Interpret the value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Interpret the value as a number, if it is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    /// Render the value the way it appears when spliced into text:
    /// bare text, numbers without a trailing `.0` when integral, lists
    /// comma-joined, `Null` as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(items) => f.write_str(&items.join(", ")),
            Self::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<FieldValue> for serde_json::Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => Self::String(s),
            FieldValue::Number(n) => {
                serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number)
            }
            FieldValue::Bool(b) => Self::Bool(b),
            FieldValue::List(items) => {
                Self::Array(items.into_iter().map(Self::String).collect())
            }
            FieldValue::Null => Self::Null,
        }
    }
}
