//! Runtime values produced by column accessors.
//!
//! The [`Value`] enum is what a column accessor returns for a row. It covers
//! every column data type, plus lists for multi-option columns and `None`
//! for missing data.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// One discrete choice for an option or multi-option column.
///
/// # Example
///
/// ```
/// use table_filter::ColumnOption;
///
/// let done = ColumnOption::new("done", "Done").with_icon("circle-check");
/// assert_eq!(done.value, "done");
/// assert_eq!(done.icon.as_deref(), Some("circle-check"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnOption {
    /// The label to display for the option.
    pub label: String,
    /// The internal value of the option.
    pub value: String,
    /// Optional icon name, opaque to the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ColumnOption {
    /// Creates an option without an icon.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        ColumnOption {
            label: label.into(),
            value: value.into(),
            icon: None,
        }
    }

    /// Sets the icon name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Value returned by a column accessor for one row.
///
/// # Example
///
/// ```
/// use table_filter::Value;
///
/// struct Issue {
///     title: String,
///     estimate: Option<u32>,
///     labels: Vec<&'static str>,
/// }
///
/// let issue = Issue { title: "Fix login".into(), estimate: None, labels: vec!["bug", "auth"] };
///
/// assert_eq!(Value::from(issue.title.as_str()), Value::Text("Fix login".into()));
/// assert!(Value::from(issue.estimate).is_none());
/// assert_eq!(Value::from(issue.labels.clone()).flatten().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing or null.
    #[default]
    None,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Calendar date.
    Date(NaiveDate),
    /// An option-shaped value.
    Option(ColumnOption),
    /// Several values, as produced for multi-option columns.
    List(Vec<Value>),
}

impl Value {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if this is an `Option` value.
    pub fn is_option(&self) -> bool {
        matches!(self, Value::Option(_))
    }

    /// Extracts the text value, if present.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the date value, if present.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Extracts the option value, if present.
    pub fn as_option(&self) -> Option<&ColumnOption> {
        match self {
            Value::Option(o) => Some(o),
            _ => None,
        }
    }

    /// Extracts the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The option identifier carried by this value: text as-is, options by
    /// their `value`.
    pub fn option_value(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Option(o) => Some(&o.value),
            _ => None,
        }
    }

    /// Flattens one level of list nesting and drops `None` values.
    pub fn flatten(self) -> Vec<Value> {
        match self {
            Value::None => Vec::new(),
            Value::List(items) => items.into_iter().filter(|v| !v.is_none()).collect(),
            other => vec![other],
        }
    }

    pub(crate) fn identity(&self) -> ValueKey {
        match self {
            Value::None => ValueKey::None,
            Value::Text(s) => ValueKey::Text(s.clone()),
            // -0.0 and 0.0 are the same value
            Value::Number(n) => ValueKey::Number(if *n == 0.0 { 0 } else { n.to_bits() }),
            Value::Date(d) => ValueKey::Date(*d),
            Value::Option(o) => ValueKey::Option(o.clone()),
            Value::List(items) => ValueKey::List(items.iter().map(Value::identity).collect()),
        }
    }
}

/// Hashable identity of a [`Value`], used for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
    None,
    Text(String),
    Number(u64),
    Date(NaiveDate),
    Option(ColumnOption),
    List(Vec<ValueKey>),
}

/// Removes duplicate values, keeping the first occurrence of each.
pub(crate) fn uniq_values(values: Vec<Value>) -> Vec<Value> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|v| seen.insert(v.identity()))
        .collect()
}

/// Compares two values of the same kind.
///
/// `None` sorts last. Returns `None` if the kinds differ or a number is NaN.
/// Handy as an option ordering function:
///
/// ```
/// use table_filter::{compare_values, Value};
/// use std::cmp::Ordering;
///
/// assert_eq!(
///     compare_values(&Value::from("a"), &Value::from("b")),
///     Some(Ordering::Less)
/// );
/// ```
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        (Value::Option(a), Value::Option(b)) => Some(a.label.cmp(&b.label)),

        (Value::None, Value::None) => Some(Ordering::Equal),
        (Value::None, _) => Some(Ordering::Greater),
        (_, Value::None) => Some(Ordering::Less),

        _ => None,
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::Date(dt.date())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(dt: DateTime<Tz>) -> Self {
        Value::Date(dt.date_naive())
    }
}

impl From<ColumnOption> for Value {
    fn from(o: ColumnOption) -> Self {
        Value::Option(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
