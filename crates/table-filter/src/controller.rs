//! A stateful owner for rows, columns and filters.
//!
//! [`DataTableFilters`] ties the pieces together for a single table: it keeps
//! the row-set and configs, rebuilds the derived [`Columns`] only when either
//! changes, and runs actions through the reducer.
//!
//! ```
//! use std::sync::Arc;
//! use table_filter::{ColumnConfig, ColumnOption, DataTableFilters};
//!
//! struct Issue {
//!     title: &'static str,
//!     status: &'static str,
//! }
//!
//! let rows = vec![
//!     Issue { title: "Fix login", status: "todo" },
//!     Issue { title: "Ship v2", status: "done" },
//!     Issue { title: "Write docs", status: "todo" },
//! ];
//! let configs = vec![
//!     Arc::new(ColumnConfig::text("title", |i: &Issue| i.title)),
//!     Arc::new(ColumnConfig::option("status", |i: &Issue| i.status).options(vec![
//!         ColumnOption::new("todo", "Todo"),
//!         ColumnOption::new("done", "Done"),
//!     ])),
//! ];
//!
//! let mut table = DataTableFilters::new(rows, configs);
//! table.add_filter_value("status", vec!["todo"]).unwrap();
//! assert_eq!(table.filtered_rows().len(), 2);
//!
//! table.set_filter_value("title", vec!["docs"]).unwrap();
//! assert_eq!(table.filtered_rows()[0].title, "Write docs");
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::column::{create_columns, Columns};
use crate::config::ColumnConfig;
use crate::error::Result;
use crate::model::FilterValues;
use crate::operator::AnyOperator;
use crate::state::{FilterAction, FiltersState};

pub struct DataTableFilters<T> {
    rows: Arc<[T]>,
    configs: Vec<Arc<ColumnConfig<T>>>,
    columns: Columns<T>,
    filters: FiltersState,
}

impl<T> DataTableFilters<T> {
    pub fn new(rows: impl Into<Arc<[T]>>, configs: Vec<Arc<ColumnConfig<T>>>) -> Self {
        let rows = rows.into();
        let columns = create_columns(Arc::clone(&rows), &configs);
        DataTableFilters {
            rows,
            configs,
            columns,
            filters: FiltersState::new(),
        }
    }

    /// Starts from an existing state instead of an empty one.
    pub fn with_filters(mut self, filters: FiltersState) -> Self {
        self.filters = filters;
        self
    }

    pub fn rows(&self) -> &Arc<[T]> {
        &self.rows
    }

    pub fn configs(&self) -> &[Arc<ColumnConfig<T>>] {
        &self.configs
    }

    pub fn columns(&self) -> &Columns<T> {
        &self.columns
    }

    pub fn filters(&self) -> &FiltersState {
        &self.filters
    }

    pub fn into_filters(self) -> FiltersState {
        self.filters
    }

    /// Replaces the state wholesale, as a controlling owner would.
    pub fn set_filters(&mut self, filters: FiltersState) {
        self.filters = filters;
    }

    /// Swaps the row-set. Columns are rebuilt only for a different row-set.
    ///
    /// Returns `true` if the columns were rebuilt.
    pub fn set_rows(&mut self, rows: Arc<[T]>) -> bool {
        if Arc::ptr_eq(&self.rows, &rows) {
            return false;
        }
        self.rows = rows;
        self.rebuild();
        true
    }

    /// Swaps the column configs. Columns are rebuilt only if any config
    /// differs from the current one.
    ///
    /// Returns `true` if the columns were rebuilt.
    pub fn set_configs(&mut self, configs: Vec<Arc<ColumnConfig<T>>>) -> bool {
        let unchanged = configs.len() == self.configs.len()
            && configs
                .iter()
                .zip(&self.configs)
                .all(|(a, b)| Arc::ptr_eq(a, b));
        if unchanged {
            return false;
        }
        self.configs = configs;
        self.rebuild();
        true
    }

    fn rebuild(&mut self) {
        debug!(
            rows = self.rows.len(),
            columns = self.configs.len(),
            "rebuilding columns"
        );
        self.columns = create_columns(Arc::clone(&self.rows), &self.configs);
    }

    /// Runs an action. The state is replaced only if the action succeeds.
    pub fn dispatch(&mut self, action: FilterAction) -> Result<&FiltersState> {
        self.filters = self.filters.reduce(&self.columns, action)?;
        Ok(&self.filters)
    }

    pub fn set_filter_value(
        &mut self,
        column_id: impl Into<String>,
        values: impl Into<FilterValues>,
    ) -> Result<&FiltersState> {
        self.dispatch(FilterAction::SetFilterValue {
            column_id: column_id.into(),
            values: values.into(),
        })
    }

    pub fn add_filter_value(
        &mut self,
        column_id: impl Into<String>,
        values: impl Into<FilterValues>,
    ) -> Result<&FiltersState> {
        self.dispatch(FilterAction::AddFilterValue {
            column_id: column_id.into(),
            values: values.into(),
        })
    }

    pub fn remove_filter_value(
        &mut self,
        column_id: impl Into<String>,
        values: impl Into<FilterValues>,
    ) -> Result<&FiltersState> {
        self.dispatch(FilterAction::RemoveFilterValue {
            column_id: column_id.into(),
            values: values.into(),
        })
    }

    pub fn set_filter_operator(
        &mut self,
        column_id: impl Into<String>,
        operator: impl Into<AnyOperator>,
    ) -> Result<&FiltersState> {
        self.dispatch(FilterAction::SetFilterOperator {
            column_id: column_id.into(),
            operator: operator.into(),
        })
    }

    pub fn remove_filter(&mut self, column_id: &str) -> &FiltersState {
        self.filters = self.filters.remove_filter(column_id);
        &self.filters
    }

    pub fn remove_all_filters(&mut self) -> &FiltersState {
        self.filters = self.filters.remove_all_filters();
        &self.filters
    }

    /// Rows passing the current filters, in row order.
    pub fn filtered_rows(&self) -> Vec<&T> {
        self.filters.filter(&self.rows[..], &self.columns)
    }
}

impl<T> std::fmt::Debug for DataTableFilters<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTableFilters")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("filters", &self.filters)
            .finish()
    }
}
