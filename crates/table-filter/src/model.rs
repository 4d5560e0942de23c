//! Filter models and filter values.
//!
//! A [`FilterModel`] is one active filter: the column it targets, an operator
//! and the values the operator compares against. [`ColumnFilter`] wraps the
//! five typed models in a tagged union, which is what a
//! [`FiltersState`](crate::FiltersState) stores and what gets serialized.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data_type::ColumnDataType;
use crate::operator::{
    AnyOperator, DateOperator, FilterOperator, MultiOptionOperator, NumberOperator,
    OptionOperator, TextOperator,
};

/// One active filter on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterModel<O, V> {
    pub column_id: String,
    pub operator: O,
    pub values: Vec<V>,
}

impl<O, V> FilterModel<O, V> {
    pub fn new(column_id: impl Into<String>, operator: O, values: Vec<V>) -> Self {
        FilterModel {
            column_id: column_id.into(),
            operator,
            values,
        }
    }
}

pub type TextFilter = FilterModel<TextOperator, String>;
pub type NumberFilter = FilterModel<NumberOperator, f64>;
pub type DateFilter = FilterModel<DateOperator, NaiveDate>;
pub type OptionFilter = FilterModel<OptionOperator, String>;
/// Multi-option values are stored as `[[members..]]`: one list holding the
/// required set.
pub type MultiOptionFilter = FilterModel<MultiOptionOperator, Vec<String>>;

/// A filter of any column type.
///
/// Serialized with a `type` tag next to the model's fields:
///
/// ```
/// use table_filter::{ColumnFilter, FilterModel, OptionOperator};
///
/// let filter = ColumnFilter::Option(FilterModel::new(
///     "status",
///     OptionOperator::IsAnyOf,
///     vec!["todo".to_string(), "done".to_string()],
/// ));
///
/// let json = serde_json::to_string(&filter).unwrap();
/// assert_eq!(
///     json,
///     r#"{"type":"option","columnId":"status","operator":"is any of","values":["todo","done"]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColumnFilter {
    Text(TextFilter),
    Number(NumberFilter),
    Date(DateFilter),
    Option(OptionFilter),
    MultiOption(MultiOptionFilter),
}

impl ColumnFilter {
    pub fn column_id(&self) -> &str {
        match self {
            ColumnFilter::Text(f) => &f.column_id,
            ColumnFilter::Number(f) => &f.column_id,
            ColumnFilter::Date(f) => &f.column_id,
            ColumnFilter::Option(f) => &f.column_id,
            ColumnFilter::MultiOption(f) => &f.column_id,
        }
    }

    pub fn data_type(&self) -> ColumnDataType {
        match self {
            ColumnFilter::Text(_) => ColumnDataType::Text,
            ColumnFilter::Number(_) => ColumnDataType::Number,
            ColumnFilter::Date(_) => ColumnDataType::Date,
            ColumnFilter::Option(_) => ColumnDataType::Option,
            ColumnFilter::MultiOption(_) => ColumnDataType::MultiOption,
        }
    }

    pub fn operator(&self) -> AnyOperator {
        match self {
            ColumnFilter::Text(f) => f.operator.into_any(),
            ColumnFilter::Number(f) => f.operator.into_any(),
            ColumnFilter::Date(f) => f.operator.into_any(),
            ColumnFilter::Option(f) => f.operator.into_any(),
            ColumnFilter::MultiOption(f) => f.operator.into_any(),
        }
    }

    /// Number of values, counting multi-option members individually.
    pub fn cardinality(&self) -> usize {
        match self {
            ColumnFilter::Text(f) => String::cardinality(&f.values),
            ColumnFilter::Number(f) => f64::cardinality(&f.values),
            ColumnFilter::Date(f) => NaiveDate::cardinality(&f.values),
            ColumnFilter::Option(f) => String::cardinality(&f.values),
            ColumnFilter::MultiOption(f) => Vec::<String>::cardinality(&f.values),
        }
    }

    /// Returns `true` if the filter has no values and so restricts nothing.
    pub fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }
}

/// Values carried by a filter action.
///
/// Strings serve text and option columns. Multi-option columns accept either
/// a plain list of members or the stored `[[members..]]` shape.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValues {
    Strings(Vec<String>),
    Numbers(Vec<f64>),
    Dates(Vec<NaiveDate>),
    Sets(Vec<Vec<String>>),
}

impl FilterValues {
    pub fn len(&self) -> usize {
        match self {
            FilterValues::Strings(v) => v.len(),
            FilterValues::Numbers(v) => v.len(),
            FilterValues::Dates(v) => v.len(),
            FilterValues::Sets(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<String>> for FilterValues {
    fn from(v: Vec<String>) -> Self {
        FilterValues::Strings(v)
    }
}

impl From<Vec<&str>> for FilterValues {
    fn from(v: Vec<&str>) -> Self {
        FilterValues::Strings(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<f64>> for FilterValues {
    fn from(v: Vec<f64>) -> Self {
        FilterValues::Numbers(v)
    }
}

impl From<Vec<NaiveDate>> for FilterValues {
    fn from(v: Vec<NaiveDate>) -> Self {
        FilterValues::Dates(v)
    }
}

impl From<Vec<Vec<String>>> for FilterValues {
    fn from(v: Vec<Vec<String>>) -> Self {
        FilterValues::Sets(v)
    }
}

/// Value types a filter model can hold.
///
/// Each type knows how to count, normalize, merge and subtract its value
/// lists, which is all the reducer needs.
pub trait FilterValue: Clone + PartialEq + Sized {
    /// Number of values for operator arity decisions.
    fn cardinality(values: &[Self]) -> usize {
        values.len()
    }

    /// Canonical form of a freshly set value list.
    fn normalize(values: Vec<Self>) -> Vec<Self>;

    /// `existing` followed by the members of `added` it does not hold yet.
    fn union(existing: Vec<Self>, added: Vec<Self>) -> Vec<Self>;

    /// `existing` without the members of `removed`.
    fn difference(existing: Vec<Self>, removed: &[Self]) -> Vec<Self>;
}

fn uniq<V: PartialEq>(values: Vec<V>) -> Vec<V> {
    let mut out: Vec<V> = Vec::with_capacity(values.len());
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

fn add_uniq<V: PartialEq>(mut existing: Vec<V>, added: Vec<V>) -> Vec<V> {
    for v in added {
        if !existing.contains(&v) {
            existing.push(v);
        }
    }
    existing
}

fn remove_uniq<V: PartialEq>(existing: Vec<V>, removed: &[V]) -> Vec<V> {
    existing.into_iter().filter(|v| !removed.contains(v)).collect()
}

impl FilterValue for String {
    fn normalize(values: Vec<Self>) -> Vec<Self> {
        let mut seen = HashSet::with_capacity(values.len());
        values
            .into_iter()
            .filter(|v| seen.insert(v.clone()))
            .collect()
    }

    fn union(existing: Vec<Self>, added: Vec<Self>) -> Vec<Self> {
        add_uniq(existing, added)
    }

    fn difference(existing: Vec<Self>, removed: &[Self]) -> Vec<Self> {
        remove_uniq(existing, removed)
    }
}

impl FilterValue for f64 {
    fn normalize(values: Vec<Self>) -> Vec<Self> {
        create_number_filter_value(&values)
    }

    fn union(existing: Vec<Self>, added: Vec<Self>) -> Vec<Self> {
        add_uniq(existing, added)
    }

    fn difference(existing: Vec<Self>, removed: &[Self]) -> Vec<Self> {
        remove_uniq(existing, removed)
    }
}

impl FilterValue for NaiveDate {
    fn normalize(values: Vec<Self>) -> Vec<Self> {
        uniq(values)
    }

    fn union(existing: Vec<Self>, added: Vec<Self>) -> Vec<Self> {
        add_uniq(existing, added)
    }

    fn difference(existing: Vec<Self>, removed: &[Self]) -> Vec<Self> {
        remove_uniq(existing, removed)
    }
}

// Multi-option values collapse to a single inner list. Every operation works
// on the members of that list.
fn members(values: Vec<Vec<String>>) -> Vec<String> {
    String::normalize(values.into_iter().flatten().collect())
}

fn wrap_members(members: Vec<String>) -> Vec<Vec<String>> {
    if members.is_empty() {
        Vec::new()
    } else {
        vec![members]
    }
}

impl FilterValue for Vec<String> {
    fn cardinality(values: &[Self]) -> usize {
        values.iter().map(Vec::len).sum()
    }

    fn normalize(values: Vec<Self>) -> Vec<Self> {
        wrap_members(members(values))
    }

    fn union(existing: Vec<Self>, added: Vec<Self>) -> Vec<Self> {
        wrap_members(add_uniq(members(existing), members(added)))
    }

    fn difference(existing: Vec<Self>, removed: &[Self]) -> Vec<Self> {
        let removed: Vec<String> = removed.iter().flatten().cloned().collect();
        wrap_members(remove_uniq(members(existing), &removed))
    }
}

/// Sorted `[min, max]` pair from up to two numbers.
///
/// NaN entries are skipped. A single number is used for both bounds and an
/// empty list yields `[0, 0]`. Numbers past the second are ignored.
///
/// ```
/// use table_filter::create_number_range;
///
/// assert_eq!(create_number_range(&[10.0, 2.0]), [2.0, 10.0]);
/// assert_eq!(create_number_range(&[5.0]), [5.0, 5.0]);
/// assert_eq!(create_number_range(&[f64::NAN, 3.0]), [3.0, 3.0]);
/// assert_eq!(create_number_range(&[]), [0.0, 0.0]);
/// ```
pub fn create_number_range(values: &[f64]) -> [f64; 2] {
    let mut numbers = values.iter().copied().filter(|n| !n.is_nan());
    let (a, b) = match (numbers.next(), numbers.next()) {
        (None, _) => (0.0, 0.0),
        (Some(a), None) => (a, a),
        (Some(a), Some(b)) => (a, b),
    };
    if a < b {
        [a, b]
    } else {
        [b, a]
    }
}

/// Normalizes the values of a number filter.
///
/// NaN entries are dropped. Empty stays empty and a single value stays
/// single. Two or more values become the sorted range of the first two.
pub fn create_number_filter_value(values: &[f64]) -> Vec<f64> {
    let numbers: Vec<f64> = values.iter().copied().filter(|n| !n.is_nan()).collect();
    match numbers.as_slice() {
        [] => Vec::new(),
        [a] => vec![*a],
        _ => create_number_range(&numbers).to_vec(),
    }
}

/// Links an operator enum to its value type and its [`ColumnFilter`] variant.
pub(crate) trait TypedFilter: FilterOperator {
    type Value: FilterValue;

    fn extract(filter: &ColumnFilter) -> Option<&FilterModel<Self, Self::Value>>;

    fn wrap(model: FilterModel<Self, Self::Value>) -> ColumnFilter;
}

macro_rules! impl_typed_filter {
    ($op:ty, $value:ty, $variant:ident) => {
        impl TypedFilter for $op {
            type Value = $value;

            fn extract(filter: &ColumnFilter) -> Option<&FilterModel<Self, Self::Value>> {
                match filter {
                    ColumnFilter::$variant(model) => Some(model),
                    _ => None,
                }
            }

            fn wrap(model: FilterModel<Self, Self::Value>) -> ColumnFilter {
                ColumnFilter::$variant(model)
            }
        }
    };
}

impl_typed_filter!(TextOperator, String, Text);
impl_typed_filter!(NumberOperator, f64, Number);
impl_typed_filter!(DateOperator, NaiveDate, Date);
impl_typed_filter!(OptionOperator, String, Option);
impl_typed_filter!(MultiOptionOperator, Vec<String>, MultiOption);
