//! Deriving options, values and facets from a row-set.
//!
//! These are the uncached building blocks behind [`Column`](crate::Column).
//! Each one takes a column config and either the rows or the already
//! resolved values, and returns plain data.

use std::collections::HashMap;

use tracing::warn;

use crate::config::ColumnConfig;
use crate::data_type::ColumnDataType;
use crate::error::{FilterError, Result};
use crate::value::{uniq_values, ColumnOption, Value};

/// Runs the accessor over every row, flattening lists and dropping `None`.
fn accessor_values<T>(config: &ColumnConfig<T>, rows: &[T]) -> Vec<Value> {
    rows.iter()
        .flat_map(|row| config.access(row).flatten())
        .collect()
}

/// Returns every value as an option, or `None` if any value is not one.
fn into_options(values: Vec<Value>) -> Option<Vec<ColumnOption>> {
    values
        .into_iter()
        .map(|v| match v {
            Value::Option(o) => Some(o),
            _ => None,
        })
        .collect()
}

fn configuration_error<T>(config: &ColumnConfig<T>) -> FilterError {
    FilterError::Configuration {
        column: config.id().to_string(),
    }
}

/// Resolves the option list of an option or multi-option column.
///
/// Static options win. Otherwise the accessor values are deduplicated,
/// sorted with the column's order function and mapped through its transform
/// function. Without a transform every value must already be an option.
///
/// Other column types have no options: a warning is logged and the list is
/// empty.
pub fn get_column_options<T>(config: &ColumnConfig<T>, rows: &[T]) -> Result<Vec<ColumnOption>> {
    if !config.data_type().is_option_based() {
        warn!(
            column = config.id(),
            data_type = %config.data_type(),
            "column options can only be retrieved for option and multiOption columns"
        );
        return Ok(Vec::new());
    }

    if let Some(options) = config.static_options() {
        return Ok(options.to_vec());
    }

    let mut models = uniq_values(accessor_values(config, rows));

    if let Some(order) = config.order_fn() {
        models.sort_by(|a, b| order(a, b));
    }

    if let Some(transform) = config.transform_option_fn() {
        return Ok(models.iter().map(|m| transform(m)).collect());
    }

    into_options(models).ok_or_else(|| configuration_error(config))
}

/// Resolves the raw values of a column, one entry per flattened row value.
///
/// Non-option columns return the accessor values unchanged. For option
/// columns the values are normalized: against static options (unmatched
/// values are dropped), through the transform function, or taken as-is when
/// they are already options.
pub fn get_column_values<T>(config: &ColumnConfig<T>, rows: &[T]) -> Result<Vec<Value>> {
    let raw = accessor_values(config, rows);

    if !config.data_type().is_option_based() {
        return Ok(raw);
    }

    if let Some(options) = config.static_options() {
        return Ok(raw
            .iter()
            .filter_map(|v| {
                let key = v.option_value()?;
                options
                    .iter()
                    .find(|o| o.value == key)
                    .map(|o| Value::Text(o.value.clone()))
            })
            .collect());
    }

    if let Some(transform) = config.transform_option_fn() {
        return Ok(raw.iter().map(|v| Value::Option(transform(v))).collect());
    }

    if raw.iter().all(Value::is_option) {
        Ok(raw)
    } else {
        Err(configuration_error(config))
    }
}

/// Counts how often each option value occurs.
///
/// Text values count under themselves and options under their `value`.
/// Only option and multi-option columns have facets.
pub fn get_faceted_unique_values<T>(
    config: &ColumnConfig<T>,
    values: &[Value],
) -> HashMap<String, usize> {
    let mut counts = HashMap::new();

    if !config.data_type().is_option_based() {
        warn!(
            column = config.id(),
            data_type = %config.data_type(),
            "faceted unique values can only be retrieved for option and multiOption columns"
        );
        return counts;
    }

    for key in values.iter().filter_map(Value::option_value) {
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }

    counts
}

/// Smallest and largest number in a number column.
///
/// NaN is ignored. The column's `min`/`max` clamp the result. With no
/// numeric data the configured bounds are returned, defaulting to `0` and
/// `100`. Other column types yield `(0, 0)`.
///
/// The upper bound never drops below the lower one: if clamping crosses
/// them, both collapse to the lower bound.
pub fn get_faceted_min_max_values<T>(config: &ColumnConfig<T>, rows: &[T]) -> (f64, f64) {
    if config.data_type() != ColumnDataType::Number {
        return (0.0, 0.0);
    }

    let numbers = accessor_values(config, rows)
        .into_iter()
        .filter_map(|v| v.as_number())
        .filter(|n| !n.is_nan());

    let bounds = numbers.fold(None, |acc: Option<(f64, f64)>, n| match acc {
        None => Some((n, n)),
        Some((lo, hi)) => Some((lo.min(n), hi.max(n))),
    });

    let (lo, hi) = match bounds {
        None => (
            config.min_value().unwrap_or(0.0),
            config.max_value().unwrap_or(100.0),
        ),
        Some((lo, hi)) => (
            config.min_value().map_or(lo, |min| lo.max(min)),
            config.max_value().map_or(hi, |max| hi.min(max)),
        ),
    };
    (lo, hi.max(lo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    struct Issue {
        status: Value,
        labels: Vec<&'static str>,
        estimate: Option<f64>,
    }

    fn issue(status: impl Into<Value>, labels: Vec<&'static str>, estimate: Option<f64>) -> Issue {
        Issue {
            status: status.into(),
            labels,
            estimate,
        }
    }

    fn status_column() -> ColumnConfig<Issue> {
        ColumnConfig::option("status", |i: &Issue| i.status.clone())
    }

    #[test]
    fn options_for_non_option_column_are_empty() {
        let config = ColumnConfig::number("estimate", |i: &Issue| i.estimate);
        let rows = vec![issue("todo", vec![], Some(1.0))];
        assert!(get_column_options(&config, &rows).unwrap().is_empty());
    }

    #[test]
    fn static_options_win() {
        let config = status_column().options(vec![ColumnOption::new("todo", "Todo")]);
        let rows = vec![issue("done", vec![], None)];
        let options = get_column_options(&config, &rows).unwrap();
        assert_eq!(options, vec![ColumnOption::new("todo", "Todo")]);
    }

    #[test]
    fn derived_options_are_deduped_sorted_and_transformed() {
        let config = ColumnConfig::multi_option("labels", |i: &Issue| i.labels.clone())
            .order_by(|a, b| b.as_text().cmp(&a.as_text()))
            .transform_option(|v| {
                let s = v.as_text().unwrap_or_default();
                ColumnOption::new(s, s.to_uppercase())
            });
        let rows = vec![
            issue("todo", vec!["bug", "ui"], None),
            issue("todo", vec!["ui", "api"], None),
        ];
        let options = get_column_options(&config, &rows).unwrap();
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["ui", "bug", "api"]);
        assert_eq!(options[0].label, "UI");
    }

    #[test]
    fn option_shaped_data_needs_no_transform() {
        let rows = vec![
            issue(ColumnOption::new("todo", "Todo"), vec![], None),
            issue(ColumnOption::new("todo", "Todo"), vec![], None),
            issue(Value::None, vec![], None),
        ];
        let options = get_column_options(&status_column(), &rows).unwrap();
        assert_eq!(options, vec![ColumnOption::new("todo", "Todo")]);
    }

    #[test]
    fn plain_strings_without_transform_are_a_configuration_error() {
        let rows = vec![issue("todo", vec![], None)];
        let err = get_column_options(&status_column(), &rows).unwrap_err();
        assert!(matches!(err, FilterError::Configuration { ref column } if column == "status"));

        let err = get_column_values(&status_column(), &rows).unwrap_err();
        assert!(matches!(err, FilterError::Configuration { .. }));
    }

    #[test]
    fn values_match_static_options() {
        let config = status_column().options(vec![
            ColumnOption::new("todo", "Todo"),
            ColumnOption::new("done", "Done"),
        ]);
        let rows = vec![
            issue("todo", vec![], None),
            issue("unknown", vec![], None),
            issue(ColumnOption::new("done", "Done!"), vec![], None),
        ];
        let values = get_column_values(&config, &rows).unwrap();
        assert_eq!(values, vec![Value::from("todo"), Value::from("done")]);
    }

    #[test]
    fn values_of_non_option_columns_are_raw() {
        let config = ColumnConfig::number("estimate", |i: &Issue| i.estimate);
        let rows = vec![issue("a", vec![], Some(2.0)), issue("b", vec![], None)];
        assert_eq!(
            get_column_values(&config, &rows).unwrap(),
            vec![Value::Number(2.0)]
        );
    }

    #[test]
    fn faceted_counts() {
        let config = status_column();
        let values = vec![Value::from("todo"), Value::from("todo"), Value::from("done")];
        let counts = get_faceted_unique_values(&config, &values);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["todo"], 2);
        assert_eq!(counts["done"], 1);

        let options = vec![
            Value::from(ColumnOption::new("a", "A")),
            Value::from(ColumnOption::new("a", "Also A")),
        ];
        assert_eq!(get_faceted_unique_values(&config, &options)["a"], 2);

        let text = ColumnConfig::text("title", |_: &Issue| "x");
        assert!(get_faceted_unique_values(&text, &values).is_empty());
    }

    #[test]
    fn min_max_over_numbers() {
        let config = ColumnConfig::number("estimate", |i: &Issue| i.estimate);
        let rows = vec![
            issue("a", vec![], Some(3.0)),
            issue("a", vec![], Some(f64::NAN)),
            issue("a", vec![], Some(-1.5)),
            issue("a", vec![], None),
        ];
        assert_eq!(get_faceted_min_max_values(&config, &rows), (-1.5, 3.0));

        let clamped = config.clone().min(0.0).max(2.0);
        assert_eq!(get_faceted_min_max_values(&clamped, &rows), (0.0, 2.0));
    }

    #[test]
    fn min_max_clamping_never_inverts() {
        let config = ColumnConfig::number("estimate", |i: &Issue| i.estimate);
        let rows = vec![issue("a", vec![], Some(1.0)), issue("a", vec![], Some(3.0))];
        assert_eq!(
            get_faceted_min_max_values(&config.clone().min(5.0), &rows),
            (5.0, 5.0)
        );
        assert_eq!(
            get_faceted_min_max_values(&config.clone().max(0.0), &rows),
            (1.0, 1.0)
        );
        assert_eq!(
            get_faceted_min_max_values(&config.min(200.0), &[]),
            (200.0, 200.0)
        );
    }

    #[test]
    fn min_max_fallbacks() {
        let config = ColumnConfig::number("estimate", |i: &Issue| i.estimate);
        assert_eq!(get_faceted_min_max_values(&config, &[]), (0.0, 100.0));
        assert_eq!(
            get_faceted_min_max_values(&config.clone().max(8.0), &[]),
            (0.0, 8.0)
        );
        let rows = vec![issue("a", vec![], Some(3.0))];
        assert_eq!(get_faceted_min_max_values(&status_column(), &rows), (0.0, 0.0));
    }

    #[test]
    fn order_fn_is_stable_for_ties() {
        let config = ColumnConfig::multi_option("labels", |i: &Issue| i.labels.clone())
            .order_by(|_, _| Ordering::Equal)
            .transform_option(|v| ColumnOption::new(v.as_text().unwrap_or_default(), "x"));
        let rows = vec![issue("a", vec!["b", "a", "c"], None)];
        let values: Vec<_> = get_column_options(&config, &rows)
            .unwrap()
            .into_iter()
            .map(|o| o.value)
            .collect();
        assert_eq!(values, vec!["b", "a", "c"]);
    }
}
