//! Table Filter - typed filter state for data-table filter bars.
//!
//! The crate models what a filter bar above a data table needs, without any
//! UI: typed column filters, the operators legal for each column type, the
//! options and facets derived from the rows, and a pure reducer that turns
//! user actions into the next filter state.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use table_filter::{create_columns, ColumnConfig, ColumnOption, FilterAction, FiltersState};
//!
//! struct Issue {
//!     title: String,
//!     status: &'static str,
//!     estimate: Option<u32>,
//! }
//!
//! let rows = vec![
//!     Issue { title: "Fix login".into(), status: "todo", estimate: Some(3) },
//!     Issue { title: "Ship v2".into(), status: "done", estimate: Some(8) },
//!     Issue { title: "Triage".into(), status: "backlog", estimate: None },
//! ];
//!
//! let configs = vec![
//!     Arc::new(ColumnConfig::text("title", |i: &Issue| i.title.clone())),
//!     Arc::new(
//!         ColumnConfig::option("status", |i: &Issue| i.status)
//!             .display_name("Status")
//!             .transform_option(|v| {
//!                 let s = v.as_text().unwrap_or_default();
//!                 ColumnOption::new(s, s.to_uppercase())
//!             }),
//!     ),
//!     Arc::new(ColumnConfig::number("estimate", |i: &Issue| i.estimate)),
//! ];
//!
//! let columns = create_columns(rows, &configs);
//! let status = columns.get("status").unwrap();
//! assert_eq!(status.options().unwrap().len(), 3);
//! assert_eq!(columns.get("estimate").unwrap().faceted_min_max_values(), (3.0, 8.0));
//!
//! let state = FiltersState::new()
//!     .reduce(&columns, FilterAction::AddFilterValue {
//!         column_id: "status".into(),
//!         values: vec!["todo", "done"].into(),
//!     })
//!     .unwrap();
//!
//! assert_eq!(state.get("status").unwrap().operator().as_str(), "is any of");
//! assert_eq!(state.count(status.rows(), &columns), 2);
//! ```
//!
//! # Operators
//!
//! | Type | Single value | Multiple values |
//! |------|--------------|-----------------|
//! | text | `contains`, `does not contain` | |
//! | number | `is`, `is not`, `is greater than`, `is greater than or equal to`, `is less than`, `is less than or equal to` | `is between`, `is not between` |
//! | date | `is`, `is not`, `is before`, `is on or after`, `is after`, `is on or before` | `is between`, `is not between` |
//! | option | `is`, `is not` | `is any of`, `is none of` |
//! | multiOption | `include`, `exclude` | `include any of`, `exclude if all`, `include all of`, `exclude if any of` |
//!
//! When an action moves a filter between one value and several, the operator
//! switches to its plural or singular form (`is` ↔ `is any of`). See
//! [`determine_new_operator`].
//!
//! # Caching
//!
//! [`Column`]s memoize their options, values and facets for the row-set they
//! were built from. Concurrent first reads compute once. Build new columns
//! with [`create_columns`] when the rows change, or let [`DataTableFilters`]
//! do it.

mod column;
mod config;
mod controller;
mod data_type;
mod error;
mod i18n;
mod model;
mod operator;
mod predicate;
mod resolve;
mod state;
mod traits;
mod value;

// Re-export public API
pub use column::{create_columns, CacheStatus, Column, Columns};
pub use config::{AccessorFn, ColumnConfig, OrderFn, TransformOptionFn};
pub use controller::DataTableFilters;
pub use data_type::{ColumnDataType, Target};
pub use error::{FilterError, Result};
pub use i18n::Translations;
pub use model::{
    create_number_filter_value, create_number_range, ColumnFilter, DateFilter, FilterModel,
    FilterValue, FilterValues, MultiOptionFilter, NumberFilter, OptionFilter, TextFilter,
};
pub use operator::{
    default_operator, determine_new_operator, operator_details_for, operators_for,
    related_operators, AnyOperator, DateOperator, FilterOperator, MultiOptionOperator,
    NumberOperator, OperatorDetails, OptionOperator, TextOperator,
};
pub use resolve::{
    get_column_options, get_column_values, get_faceted_min_max_values, get_faceted_unique_values,
};
pub use state::{reduce, FilterAction, FiltersState};
pub use traits::{ColumnLookup, FilterColumn};
pub use value::{compare_values, ColumnOption, Value};
