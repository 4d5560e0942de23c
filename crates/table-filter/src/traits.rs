//! Traits for resolving column ids and types.
//!
//! The reducer only needs to know a column's id and data type. [`FilterColumn`]
//! describes one such column and [`ColumnLookup`] a registry of them, so the
//! same state code works with built [`Columns`], plain config lists, or a
//! hand-written id→type map.

use std::collections::HashMap;
use std::sync::Arc;

use crate::column::{Column, Columns};
use crate::config::ColumnConfig;
use crate::data_type::ColumnDataType;
use crate::error::{FilterError, Result};

/// A column a filter can target.
///
/// ```
/// use table_filter::{ColumnDataType, FilterColumn, FiltersState};
///
/// let status = ("status", ColumnDataType::Option);
/// assert_eq!(status.id(), "status");
///
/// let state = FiltersState::new()
///     .add_filter_value(&status, vec!["todo".to_string()].into())
///     .unwrap();
/// assert_eq!(state.len(), 1);
/// ```
pub trait FilterColumn {
    fn id(&self) -> &str;
    fn data_type(&self) -> ColumnDataType;
}

impl<T> FilterColumn for ColumnConfig<T> {
    fn id(&self) -> &str {
        ColumnConfig::id(self)
    }

    fn data_type(&self) -> ColumnDataType {
        ColumnConfig::data_type(self)
    }
}

impl<T> FilterColumn for Column<T> {
    fn id(&self) -> &str {
        Column::id(self)
    }

    fn data_type(&self) -> ColumnDataType {
        Column::data_type(self)
    }
}

impl FilterColumn for (&str, ColumnDataType) {
    fn id(&self) -> &str {
        self.0
    }

    fn data_type(&self) -> ColumnDataType {
        self.1
    }
}

impl FilterColumn for (String, ColumnDataType) {
    fn id(&self) -> &str {
        &self.0
    }

    fn data_type(&self) -> ColumnDataType {
        self.1
    }
}

impl<C: FilterColumn + ?Sized> FilterColumn for Arc<C> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn data_type(&self) -> ColumnDataType {
        (**self).data_type()
    }
}

impl<C: FilterColumn + ?Sized> FilterColumn for &C {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn data_type(&self) -> ColumnDataType {
        (**self).data_type()
    }
}

/// A registry of columns, searchable by id.
pub trait ColumnLookup {
    /// The data type of the column with this id, if registered.
    fn data_type_of(&self, id: &str) -> Option<ColumnDataType>;

    /// Like [`data_type_of`](ColumnLookup::data_type_of), failing with
    /// [`FilterError::UnknownColumn`] for unregistered ids.
    fn require(&self, id: &str) -> Result<ColumnDataType> {
        self.data_type_of(id)
            .ok_or_else(|| FilterError::UnknownColumn(id.to_string()))
    }
}

impl<T> ColumnLookup for Columns<T> {
    fn data_type_of(&self, id: &str) -> Option<ColumnDataType> {
        self.find(id).map(Column::data_type)
    }
}

impl<C: FilterColumn> ColumnLookup for [C] {
    fn data_type_of(&self, id: &str) -> Option<ColumnDataType> {
        self.iter()
            .find(|c| c.id() == id)
            .map(FilterColumn::data_type)
    }
}

impl<C: FilterColumn> ColumnLookup for Vec<C> {
    fn data_type_of(&self, id: &str) -> Option<ColumnDataType> {
        self.as_slice().data_type_of(id)
    }
}

impl ColumnLookup for HashMap<String, ColumnDataType> {
    fn data_type_of(&self, id: &str) -> Option<ColumnDataType> {
        self.get(id).copied()
    }
}
