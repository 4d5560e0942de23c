//! Columns bound to a row-set.
//!
//! A [`Column`] pairs a [`ColumnConfig`] with the rows it reads from and keeps
//! its derived data (options, values, facets) in a cache owned by the column.
//! Each entry is computed at most once; concurrent readers block on the first
//! computation instead of repeating it.
//!
//! A new row-set means new columns: call [`create_columns`] again and drop the
//! old ones together with their caches.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::config::ColumnConfig;
use crate::data_type::ColumnDataType;
use crate::error::{FilterError, Result};
use crate::resolve::{
    get_column_options, get_column_values, get_faceted_min_max_values, get_faceted_unique_values,
};
use crate::value::{ColumnOption, Value};

#[derive(Debug, Default)]
struct ColumnCache {
    options: OnceCell<Vec<ColumnOption>>,
    values: OnceCell<Vec<Value>>,
    faceted_unique_values: OnceCell<HashMap<String, usize>>,
    faceted_min_max_values: OnceCell<(f64, f64)>,
}

/// Which cache entries of a column have been computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStatus {
    pub options: bool,
    pub values: bool,
    pub faceted_unique_values: bool,
    pub faceted_min_max_values: bool,
}

/// A column config bound to one row-set, with memoized derived data.
pub struct Column<T> {
    config: Arc<ColumnConfig<T>>,
    rows: Arc<[T]>,
    cache: ColumnCache,
}

impl<T> Column<T> {
    pub fn new(config: Arc<ColumnConfig<T>>, rows: Arc<[T]>) -> Self {
        Column {
            config,
            rows,
            cache: ColumnCache::default(),
        }
    }

    pub fn id(&self) -> &str {
        self.config.id()
    }

    pub fn data_type(&self) -> ColumnDataType {
        self.config.data_type()
    }

    pub fn config(&self) -> &ColumnConfig<T> {
        &self.config
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Returns `true` if this column was built for exactly this row-set.
    pub fn is_for_rows(&self, rows: &Arc<[T]>) -> bool {
        Arc::ptr_eq(&self.rows, rows)
    }

    /// The column's options. See [`get_column_options`].
    pub fn options(&self) -> Result<&[ColumnOption]> {
        self.cache
            .options
            .get_or_try_init(|| {
                debug!(column = self.id(), "computing column options");
                get_column_options(&self.config, &self.rows)
            })
            .map(Vec::as_slice)
    }

    /// The column's normalized values. See [`get_column_values`].
    pub fn values(&self) -> Result<&[Value]> {
        self.cache
            .values
            .get_or_try_init(|| {
                debug!(column = self.id(), "computing column values");
                get_column_values(&self.config, &self.rows)
            })
            .map(Vec::as_slice)
    }

    /// Occurrence count per option value, derived from [`values`](Column::values).
    pub fn faceted_unique_values(&self) -> Result<&HashMap<String, usize>> {
        self.cache.faceted_unique_values.get_or_try_init(|| {
            let values = self.values()?;
            debug!(column = self.id(), "computing faceted unique values");
            Ok(get_faceted_unique_values(&self.config, values))
        })
    }

    pub fn faceted_min_max_values(&self) -> (f64, f64) {
        *self.cache.faceted_min_max_values.get_or_init(|| {
            debug!(column = self.id(), "computing faceted min/max values");
            get_faceted_min_max_values(&self.config, &self.rows)
        })
    }

    pub fn prefetch_options(&self) -> Result<()> {
        self.options().map(drop)
    }

    pub fn prefetch_values(&self) -> Result<()> {
        self.values().map(drop)
    }

    pub fn prefetch_faceted_unique_values(&self) -> Result<()> {
        self.faceted_unique_values().map(drop)
    }

    pub fn prefetch_faceted_min_max_values(&self) {
        self.faceted_min_max_values();
    }

    /// Warms every cache entry that applies to the column's data type.
    pub fn prefetch(&self) -> Result<()> {
        if self.data_type().is_option_based() {
            self.prefetch_options()?;
            self.prefetch_faceted_unique_values()?;
        } else {
            self.prefetch_values()?;
        }
        if self.data_type() == ColumnDataType::Number {
            self.prefetch_faceted_min_max_values();
        }
        Ok(())
    }

    pub fn cache_status(&self) -> CacheStatus {
        CacheStatus {
            options: self.cache.options.get().is_some(),
            values: self.cache.values.get().is_some(),
            faceted_unique_values: self.cache.faceted_unique_values.get().is_some(),
            faceted_min_max_values: self.cache.faceted_min_max_values.get().is_some(),
        }
    }
}

impl<T> std::fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("config", &self.config)
            .field("rows", &self.rows.len())
            .field("cache", &self.cache_status())
            .finish()
    }
}

/// The columns derived from one row-set, in config order.
pub struct Columns<T> {
    columns: Vec<Column<T>>,
}

impl<T> std::fmt::Debug for Columns<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.columns).finish()
    }
}

impl<T> Columns<T> {
    /// Looks up a column by id.
    pub fn get(&self, id: &str) -> Result<&Column<T>> {
        self.find(id)
            .ok_or_else(|| FilterError::UnknownColumn(id.to_string()))
    }

    pub fn find(&self, id: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column<T>> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Warms the caches of every column.
    pub fn prefetch(&self) -> Result<()> {
        self.columns.iter().try_for_each(Column::prefetch)
    }
}

impl<'a, T> IntoIterator for &'a Columns<T> {
    type Item = &'a Column<T>;
    type IntoIter = std::slice::Iter<'a, Column<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Binds each config to the row-set.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use table_filter::{create_columns, ColumnConfig};
///
/// struct Issue {
///     status: &'static str,
/// }
///
/// let configs = vec![Arc::new(
///     ColumnConfig::option("status", |i: &Issue| i.status)
///         .transform_option(|v| {
///             let s = v.as_text().unwrap_or_default();
///             table_filter::ColumnOption::new(s, s)
///         }),
/// )];
/// let rows = vec![Issue { status: "todo" }, Issue { status: "todo" }];
///
/// let columns = create_columns(rows, &configs);
/// let status = columns.get("status").unwrap();
/// assert_eq!(status.faceted_unique_values().unwrap()["todo"], 2);
/// assert!(columns.get("nope").is_err());
/// ```
pub fn create_columns<T>(rows: impl Into<Arc<[T]>>, configs: &[Arc<ColumnConfig<T>>]) -> Columns<T> {
    let rows = rows.into();
    debug!(rows = rows.len(), columns = configs.len(), "building columns");
    Columns {
        columns: configs
            .iter()
            .map(|config| Column::new(Arc::clone(config), Arc::clone(&rows)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Row {
        status: &'static str,
        size: f64,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { status: "todo", size: 3.0 },
            Row { status: "done", size: 8.0 },
            Row { status: "todo", size: 1.0 },
        ]
    }

    fn status_config(counter: Arc<AtomicUsize>) -> Arc<ColumnConfig<Row>> {
        Arc::new(
            ColumnConfig::option("status", move |r: &Row| {
                counter.fetch_add(1, Ordering::SeqCst);
                r.status
            })
            .options(vec![
                ColumnOption::new("todo", "Todo"),
                ColumnOption::new("done", "Done"),
            ]),
        )
    }

    #[test]
    fn values_are_computed_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let columns = create_columns(rows(), &[status_config(counter.clone())]);
        let status = columns.get("status").unwrap();

        assert_eq!(status.values().unwrap().len(), 3);
        assert_eq!(status.values().unwrap().len(), 3);
        assert_eq!(status.faceted_unique_values().unwrap()["todo"], 2);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn cache_status_tracks_prefetch() {
        let columns = create_columns(rows(), &[status_config(Arc::default())]);
        let status = columns.get("status").unwrap();
        assert_eq!(status.cache_status(), CacheStatus::default());

        status.prefetch_faceted_unique_values().unwrap();
        let cached = status.cache_status();
        assert!(cached.values);
        assert!(cached.faceted_unique_values);
        assert!(!cached.options);
    }

    #[test]
    fn failed_computations_are_not_cached() {
        let config = Arc::new(ColumnConfig::option("status", |r: &Row| r.status));
        let columns = create_columns(rows(), &[config]);
        let status = columns.get("status").unwrap();
        assert!(status.options().is_err());
        assert!(status.prefetch().is_err());
        assert!(!status.cache_status().options);
    }

    #[test]
    fn prefetch_warms_number_columns() {
        let config = Arc::new(ColumnConfig::number("size", |r: &Row| r.size));
        let columns = create_columns(rows(), &[config]);
        columns.prefetch().unwrap();
        let size = columns.get("size").unwrap();
        assert!(size.cache_status().values);
        assert!(size.cache_status().faceted_min_max_values);
        assert_eq!(size.faceted_min_max_values(), (1.0, 8.0));
    }

    #[test]
    fn columns_share_the_row_set() {
        let rows: Arc<[Row]> = rows().into();
        let columns = create_columns(
            Arc::clone(&rows),
            &[
                status_config(Arc::default()),
                Arc::new(ColumnConfig::number("size", |r: &Row| r.size)),
            ],
        );
        assert_eq!(columns.len(), 2);
        assert!(columns.iter().all(|c| c.is_for_rows(&rows)));
        let other: Arc<[Row]> = Vec::new().into();
        assert!(!columns.get("size").unwrap().is_for_rows(&other));
    }

    #[test]
    fn unknown_column() {
        let columns = create_columns::<Row>(rows(), &[]);
        match columns.get("status") {
            Err(FilterError::UnknownColumn(id)) => assert_eq!(id, "status"),
            other => panic!("expected UnknownColumn, got {other:?}"),
        }
    }
}
