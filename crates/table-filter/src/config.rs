//! Column configuration.
//!
//! A [`ColumnConfig`] describes one filterable column: its id, data type,
//! how to read a value out of a row, and how to turn raw values into options.
//! Configs are built once with a fluent API and never change afterwards.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::data_type::ColumnDataType;
use crate::value::{ColumnOption, Value};

/// Reads a column value out of a row.
pub type AccessorFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Maps a raw accessor value to an option.
pub type TransformOptionFn = Arc<dyn Fn(&Value) -> ColumnOption + Send + Sync>;

/// Orders raw accessor values before they become options.
pub type OrderFn = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// Configuration for one filterable column.
///
/// # Example
///
/// ```
/// use table_filter::{ColumnConfig, ColumnDataType, ColumnOption};
///
/// struct Issue {
///     status: &'static str,
///     estimate: u32,
/// }
///
/// let status = ColumnConfig::option("status", |issue: &Issue| issue.status)
///     .display_name("Status")
///     .icon("circle-dashed")
///     .options(vec![
///         ColumnOption::new("todo", "Todo"),
///         ColumnOption::new("done", "Done"),
///     ]);
///
/// let estimate = ColumnConfig::number("estimate", |issue: &Issue| issue.estimate)
///     .max(20.0);
///
/// assert_eq!(status.data_type(), ColumnDataType::Option);
/// assert_eq!(status.display_name_str(), "Status");
/// assert_eq!(estimate.max_value(), Some(20.0));
/// ```
pub struct ColumnConfig<T> {
    id: String,
    data_type: ColumnDataType,
    accessor: AccessorFn<T>,
    display_name: String,
    icon: Option<String>,
    options: Option<Vec<ColumnOption>>,
    transform_option: Option<TransformOptionFn>,
    order_fn: Option<OrderFn>,
    min: Option<f64>,
    max: Option<f64>,
}

impl<T> ColumnConfig<T> {
    /// Creates a config with the given id, type and accessor.
    ///
    /// The display name defaults to the id.
    pub fn new<F, V>(id: impl Into<String>, data_type: ColumnDataType, accessor: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        let id = id.into();
        ColumnConfig {
            display_name: id.clone(),
            id,
            data_type,
            accessor: Arc::new(move |row| accessor(row).into()),
            icon: None,
            options: None,
            transform_option: None,
            order_fn: None,
            min: None,
            max: None,
        }
    }

    pub fn text<F, V>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::new(id, ColumnDataType::Text, accessor)
    }

    pub fn number<F, V>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::new(id, ColumnDataType::Number, accessor)
    }

    pub fn date<F, V>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::new(id, ColumnDataType::Date, accessor)
    }

    pub fn option<F, V>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::new(id, ColumnDataType::Option, accessor)
    }

    pub fn multi_option<F, V>(id: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::new(id, ColumnDataType::MultiOption, accessor)
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets a static option list. Static options take precedence over
    /// options derived from the data.
    pub fn options(mut self, options: Vec<ColumnOption>) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets the function that maps raw values to options.
    pub fn transform_option<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> ColumnOption + Send + Sync + 'static,
    {
        self.transform_option = Some(Arc::new(f));
        self
    }

    /// Sets the ordering applied to derived options before transformation.
    pub fn order_by<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.order_fn = Some(Arc::new(f));
        self
    }

    /// Lower clamp for faceted min/max values.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Upper clamp for faceted min/max values.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data_type(&self) -> ColumnDataType {
        self.data_type
    }

    pub fn display_name_str(&self) -> &str {
        &self.display_name
    }

    pub fn icon_name(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn static_options(&self) -> Option<&[ColumnOption]> {
        self.options.as_deref()
    }

    pub fn transform_option_fn(&self) -> Option<&TransformOptionFn> {
        self.transform_option.as_ref()
    }

    pub fn order_fn(&self) -> Option<&OrderFn> {
        self.order_fn.as_ref()
    }

    pub fn min_value(&self) -> Option<f64> {
        self.min
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max
    }

    /// Runs the accessor on a row.
    pub fn access(&self, row: &T) -> Value {
        (self.accessor)(row)
    }

    /// The option identifier for one raw value.
    ///
    /// Text is used as-is and options by their `value`. Anything else goes
    /// through the transform function, if one is set.
    pub fn option_value(&self, value: &Value) -> Option<String> {
        match value {
            Value::None => None,
            Value::Text(s) => Some(s.clone()),
            Value::Option(o) => Some(o.value.clone()),
            other => self
                .transform_option
                .as_ref()
                .map(|transform| transform(other).value),
        }
    }
}

impl<T> Clone for ColumnConfig<T> {
    fn clone(&self) -> Self {
        ColumnConfig {
            id: self.id.clone(),
            data_type: self.data_type,
            accessor: Arc::clone(&self.accessor),
            display_name: self.display_name.clone(),
            icon: self.icon.clone(),
            options: self.options.clone(),
            transform_option: self.transform_option.clone(),
            order_fn: self.order_fn.clone(),
            min: self.min,
            max: self.max,
        }
    }
}

impl<T> fmt::Debug for ColumnConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnConfig")
            .field("id", &self.id)
            .field("data_type", &self.data_type)
            .field("display_name", &self.display_name)
            .field("icon", &self.icon)
            .field("options", &self.options)
            .field("transform_option", &self.transform_option.is_some())
            .field("order_fn", &self.order_fn.is_some())
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        tag: u32,
    }

    #[test]
    fn display_name_defaults_to_id() {
        let config = ColumnConfig::text("title", |_: &Row| "x");
        assert_eq!(config.id(), "title");
        assert_eq!(config.display_name_str(), "title");
        assert!(config.icon_name().is_none());
    }

    #[test]
    fn accessor_converts_into_value() {
        let config = ColumnConfig::number("tag", |row: &Row| row.tag);
        assert_eq!(config.access(&Row { tag: 7 }), Value::Number(7.0));
    }

    #[test]
    fn option_value_uses_transform_for_other_kinds() {
        let plain = ColumnConfig::option("tag", |row: &Row| row.tag);
        assert_eq!(plain.option_value(&Value::from("a")), Some("a".into()));
        assert_eq!(plain.option_value(&Value::from(3)), None);

        let transformed = plain.clone().transform_option(|v| {
            let n = v.as_number().unwrap_or_default();
            ColumnOption::new(format!("tag-{n}"), format!("Tag {n}"))
        });
        assert_eq!(
            transformed.option_value(&Value::from(3)),
            Some("tag-3".into())
        );
        assert_eq!(
            transformed.option_value(&Value::from(ColumnOption::new("x", "X"))),
            Some("x".into())
        );
        assert_eq!(transformed.option_value(&Value::None), None);
    }

    #[test]
    fn debug_hides_closures() {
        let config = ColumnConfig::option("tag", |row: &Row| row.tag).order_by(|a, b| {
            compare(a, b)
        });
        let debug = format!("{config:?}");
        assert!(debug.contains("order_fn: true"));
        assert!(debug.contains("transform_option: false"));
    }

    fn compare(a: &Value, b: &Value) -> Ordering {
        crate::value::compare_values(a, b).unwrap_or(Ordering::Equal)
    }
}
