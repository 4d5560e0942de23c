//! The filter state and its reducer.
//!
//! [`FiltersState`] is an ordered list of [`ColumnFilter`]s with at most one
//! entry per column. Every action returns a new state; the current one is
//! never changed in place. Failed actions return an error and no state.
//!
//! # Operator transitions
//!
//! When an action changes how many values a filter holds, the operator
//! follows the value count across the single/multiple boundary:
//!
//! ```
//! use table_filter::{ColumnDataType, FiltersState};
//!
//! let status = ("status", ColumnDataType::Option);
//!
//! let state = FiltersState::new()
//!     .set_filter_value(&status, vec!["todo"].into()).unwrap();
//! assert_eq!(state.get("status").unwrap().operator().as_str(), "is");
//!
//! let state = state.add_filter_value(&status, vec!["done"].into()).unwrap();
//! assert_eq!(state.get("status").unwrap().operator().as_str(), "is any of");
//!
//! let state = state.remove_filter_value(&status, vec!["done"].into()).unwrap();
//! assert_eq!(state.get("status").unwrap().operator().as_str(), "is");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data_type::{ColumnDataType, Target};
use crate::error::{FilterError, Result};
use crate::model::{ColumnFilter, FilterModel, FilterValue, FilterValues, TypedFilter};
use crate::operator::{
    determine_new_operator, AnyOperator, DateOperator, MultiOptionOperator, NumberOperator,
    OptionOperator, TextOperator,
};
use crate::traits::{ColumnLookup, FilterColumn};

/// The active filters of a table, in insertion order.
///
/// Serializes as a plain JSON array of filters. Duplicate column ids in
/// deserialized input keep their first occurrence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ColumnFilter>", into = "Vec<ColumnFilter>")]
pub struct FiltersState {
    filters: Vec<ColumnFilter>,
}

impl From<Vec<ColumnFilter>> for FiltersState {
    fn from(filters: Vec<ColumnFilter>) -> Self {
        let mut state = FiltersState::new();
        for filter in filters {
            if state.get(filter.column_id()).is_none() {
                state.filters.push(filter);
            }
        }
        state
    }
}

impl From<FiltersState> for Vec<ColumnFilter> {
    fn from(state: FiltersState) -> Self {
        state.filters
    }
}

/// A mutation request for [`FiltersState::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    SetFilterValue {
        column_id: String,
        values: FilterValues,
    },
    AddFilterValue {
        column_id: String,
        values: FilterValues,
    },
    RemoveFilterValue {
        column_id: String,
        values: FilterValues,
    },
    SetFilterOperator {
        column_id: String,
        operator: AnyOperator,
    },
    RemoveFilter {
        column_id: String,
    },
    RemoveAllFilters,
}

impl FilterAction {
    pub fn name(&self) -> &'static str {
        match self {
            FilterAction::SetFilterValue { .. } => "set_filter_value",
            FilterAction::AddFilterValue { .. } => "add_filter_value",
            FilterAction::RemoveFilterValue { .. } => "remove_filter_value",
            FilterAction::SetFilterOperator { .. } => "set_filter_operator",
            FilterAction::RemoveFilter { .. } => "remove_filter",
            FilterAction::RemoveAllFilters => "remove_all_filters",
        }
    }

    pub fn column_id(&self) -> Option<&str> {
        match self {
            FilterAction::SetFilterValue { column_id, .. }
            | FilterAction::AddFilterValue { column_id, .. }
            | FilterAction::RemoveFilterValue { column_id, .. }
            | FilterAction::SetFilterOperator { column_id, .. }
            | FilterAction::RemoveFilter { column_id } => Some(column_id),
            FilterAction::RemoveAllFilters => None,
        }
    }
}

// Which value-changing action is running. Selects how new values combine
// with existing ones.
#[derive(Clone, Copy)]
enum Change {
    Set,
    Add,
    Remove,
}

impl Change {
    fn name(self) -> &'static str {
        match self {
            Change::Set => "set_filter_value",
            Change::Add => "add_filter_value",
            Change::Remove => "remove_filter_value",
        }
    }
}

fn invalid<C: FilterColumn + ?Sized>(column: &C, operation: &'static str) -> FilterError {
    FilterError::InvalidColumnOperation {
        column: column.id().to_string(),
        data_type: column.data_type(),
        operation,
    }
}

impl FiltersState {
    pub fn new() -> Self {
        FiltersState::default()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// The filter on a column, if any.
    pub fn get(&self, column_id: &str) -> Option<&ColumnFilter> {
        self.filters.iter().find(|f| f.column_id() == column_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnFilter> {
        self.filters.iter()
    }

    pub fn as_slice(&self) -> &[ColumnFilter] {
        &self.filters
    }

    fn position(&self, column_id: &str) -> Option<usize> {
        self.filters.iter().position(|f| f.column_id() == column_id)
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Replaces the values of a column's filter, creating it if needed.
    ///
    /// Values are deduplicated and number values normalized. An empty result
    /// removes the filter. A new filter gets the default operator for its
    /// value count; an existing one keeps its operator unless the value
    /// count crosses the single/multiple boundary.
    pub fn set_filter_value<C>(&self, column: &C, values: FilterValues) -> Result<FiltersState>
    where
        C: FilterColumn + ?Sized,
    {
        self.change_values(column, values, Change::Set)
    }

    /// Adds values to an option or multi-option filter, creating it if needed.
    pub fn add_filter_value<C>(&self, column: &C, values: FilterValues) -> Result<FiltersState>
    where
        C: FilterColumn + ?Sized,
    {
        if !column.data_type().is_option_based() {
            return Err(invalid(column, Change::Add.name()));
        }
        self.change_values(column, values, Change::Add)
    }

    /// Removes values from an option or multi-option filter.
    ///
    /// Removing the last value removes the filter.
    pub fn remove_filter_value<C>(&self, column: &C, values: FilterValues) -> Result<FiltersState>
    where
        C: FilterColumn + ?Sized,
    {
        if !column.data_type().is_option_based() {
            return Err(invalid(column, Change::Remove.name()));
        }
        self.change_values(column, values, Change::Remove)
    }

    /// Overwrites the operator of an existing filter.
    ///
    /// Does nothing if the column has no filter. Fails if the operator
    /// belongs to a different data type than the filter.
    pub fn set_filter_operator(
        &self,
        column_id: &str,
        operator: impl Into<AnyOperator>,
    ) -> Result<FiltersState> {
        let operator = operator.into();
        let Some(index) = self.position(column_id) else {
            return Ok(self.clone());
        };

        let replaced = match (&self.filters[index], operator) {
            (ColumnFilter::Text(f), AnyOperator::Text(op)) => {
                ColumnFilter::Text(FilterModel { operator: op, ..f.clone() })
            }
            (ColumnFilter::Number(f), AnyOperator::Number(op)) => {
                ColumnFilter::Number(FilterModel { operator: op, ..f.clone() })
            }
            (ColumnFilter::Date(f), AnyOperator::Date(op)) => {
                ColumnFilter::Date(FilterModel { operator: op, ..f.clone() })
            }
            (ColumnFilter::Option(f), AnyOperator::Option(op)) => {
                ColumnFilter::Option(FilterModel { operator: op, ..f.clone() })
            }
            (ColumnFilter::MultiOption(f), AnyOperator::MultiOption(op)) => {
                ColumnFilter::MultiOption(FilterModel { operator: op, ..f.clone() })
            }
            (filter, _) => {
                return Err(FilterError::InvalidColumnOperation {
                    column: column_id.to_string(),
                    data_type: filter.data_type(),
                    operation: "set_filter_operator",
                })
            }
        };

        Ok(self.with_entry(Some(index), Some(replaced)))
    }

    /// Removes a column's filter. Removing an absent filter is a no-op.
    pub fn remove_filter(&self, column_id: &str) -> FiltersState {
        FiltersState {
            filters: self
                .filters
                .iter()
                .filter(|f| f.column_id() != column_id)
                .cloned()
                .collect(),
        }
    }

    pub fn remove_all_filters(&self) -> FiltersState {
        FiltersState::new()
    }

    /// Applies an action, resolving its column through `columns`.
    ///
    /// Value and operator actions on an unregistered column fail with
    /// [`FilterError::UnknownColumn`].
    pub fn reduce<L>(&self, columns: &L, action: FilterAction) -> Result<FiltersState>
    where
        L: ColumnLookup + ?Sized,
    {
        debug!(
            action = action.name(),
            column = action.column_id().unwrap_or_default(),
            "reducing filter action"
        );

        match action {
            FilterAction::SetFilterValue { column_id, values } => {
                let data_type = columns.require(&column_id)?;
                self.set_filter_value(&(column_id.as_str(), data_type), values)
            }
            FilterAction::AddFilterValue { column_id, values } => {
                let data_type = columns.require(&column_id)?;
                self.add_filter_value(&(column_id.as_str(), data_type), values)
            }
            FilterAction::RemoveFilterValue { column_id, values } => {
                let data_type = columns.require(&column_id)?;
                self.remove_filter_value(&(column_id.as_str(), data_type), values)
            }
            FilterAction::SetFilterOperator {
                column_id,
                operator,
            } => {
                columns.require(&column_id)?;
                self.set_filter_operator(&column_id, operator)
            }
            FilterAction::RemoveFilter { column_id } => Ok(self.remove_filter(&column_id)),
            FilterAction::RemoveAllFilters => Ok(self.remove_all_filters()),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn change_values<C>(&self, column: &C, values: FilterValues, change: Change) -> Result<FiltersState>
    where
        C: FilterColumn + ?Sized,
    {
        let id = column.id();
        let state = match (column.data_type(), values) {
            (ColumnDataType::Text, FilterValues::Strings(v)) => {
                self.change_typed::<TextOperator>(id, v, change)
            }
            (ColumnDataType::Number, FilterValues::Numbers(v)) => {
                self.change_typed::<NumberOperator>(id, v, change)
            }
            (ColumnDataType::Date, FilterValues::Dates(v)) => {
                self.change_typed::<DateOperator>(id, v, change)
            }
            (ColumnDataType::Option, FilterValues::Strings(v)) => {
                self.change_typed::<OptionOperator>(id, v, change)
            }
            (ColumnDataType::MultiOption, FilterValues::Strings(v)) => {
                self.change_typed::<MultiOptionOperator>(id, vec![v], change)
            }
            (ColumnDataType::MultiOption, FilterValues::Sets(v)) => {
                self.change_typed::<MultiOptionOperator>(id, v, change)
            }
            _ => return Err(invalid(column, change.name())),
        };
        Ok(state)
    }

    fn change_typed<O: TypedFilter>(
        &self,
        column_id: &str,
        values: Vec<O::Value>,
        change: Change,
    ) -> FiltersState {
        let index = self.position(column_id);
        // Entries with no values, or of another column type, count as absent.
        let current = index
            .and_then(|i| O::extract(&self.filters[i]))
            .filter(|model| O::Value::cardinality(&model.values) > 0);

        let next_values = match (change, current) {
            (Change::Set, _) => O::Value::normalize(values),
            (Change::Add, Some(model)) => O::Value::union(model.values.clone(), O::Value::normalize(values)),
            (Change::Add, None) => O::Value::normalize(values),
            (Change::Remove, Some(model)) => O::Value::difference(model.values.clone(), &values),
            (Change::Remove, None) => return self.clone(),
        };

        let new_cardinality = O::Value::cardinality(&next_values);
        if new_cardinality == 0 {
            return self.with_entry(index, None);
        }

        let operator = match current {
            Some(model) => determine_new_operator(
                model.operator,
                O::Value::cardinality(&model.values),
                new_cardinality,
            ),
            None => O::default_for(Target::for_cardinality(new_cardinality)),
        };

        let filter = O::wrap(FilterModel::new(column_id, operator, next_values));
        self.with_entry(index, Some(filter))
    }

    // Replaces, removes or appends one entry and returns the new state.
    fn with_entry(&self, index: Option<usize>, filter: Option<ColumnFilter>) -> FiltersState {
        let mut filters = self.filters.clone();
        match (index, filter) {
            (Some(i), Some(f)) => filters[i] = f,
            (Some(i), None) => {
                filters.remove(i);
            }
            (None, Some(f)) => filters.push(f),
            (None, None) => {}
        }
        FiltersState { filters }
    }
}

impl<'a> IntoIterator for &'a FiltersState {
    type Item = &'a ColumnFilter;
    type IntoIter = std::slice::Iter<'a, ColumnFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Applies an action to a state. Same as [`FiltersState::reduce`].
pub fn reduce<L>(state: &FiltersState, columns: &L, action: FilterAction) -> Result<FiltersState>
where
    L: ColumnLookup + ?Sized,
{
    state.reduce(columns, action)
}
