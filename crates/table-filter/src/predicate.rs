//! Evaluating filters against rows.
//!
//! Each typed filter model knows how to test one row value. A whole
//! [`FiltersState`] matches a row when every filter on a registered column
//! does (AND across filters).
//!
//! Shared rules:
//!
//! - a filter with no values matches every row
//! - otherwise a missing row value never matches
//! - dates compare by day

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::column::Columns;
use crate::config::ColumnConfig;
use crate::model::{
    create_number_range, ColumnFilter, DateFilter, MultiOptionFilter, NumberFilter, OptionFilter,
    TextFilter,
};
use crate::operator::{
    DateOperator, MultiOptionOperator, NumberOperator, OptionOperator, TextOperator,
};
use crate::state::FiltersState;
use crate::value::Value;

impl TextFilter {
    /// Case-insensitive substring test against the first filter value.
    ///
    /// A blank filter string matches everything.
    pub fn matches(&self, value: &Value) -> bool {
        let Some(needle) = self.values.first() else {
            return true;
        };
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let Some(haystack) = value.as_text() else {
            return false;
        };

        let found = haystack.trim().to_lowercase().contains(&needle);
        match self.operator {
            TextOperator::Contains => found,
            TextOperator::DoesNotContain => !found,
        }
    }
}

impl NumberFilter {
    pub fn matches(&self, value: &Value) -> bool {
        let Some(&target) = self.values.first() else {
            return true;
        };
        let Some(n) = value.as_number() else {
            return false;
        };

        let in_range = || {
            let [lo, hi] = create_number_range(&self.values);
            lo <= n && n <= hi
        };

        match self.operator {
            NumberOperator::Is => n == target,
            NumberOperator::IsNot => n != target,
            NumberOperator::GreaterThan => n > target,
            NumberOperator::GreaterThanOrEqual => n >= target,
            NumberOperator::LessThan => n < target,
            NumberOperator::LessThanOrEqual => n <= target,
            NumberOperator::IsBetween => in_range(),
            NumberOperator::IsNotBetween => !in_range(),
        }
    }
}

impl DateFilter {
    /// Day-granularity comparison. Ranges are inclusive; a range with one
    /// value uses it for both bounds.
    pub fn matches(&self, value: &Value) -> bool {
        let Some(&first) = self.values.first() else {
            return true;
        };
        let Some(day) = value.as_date() else {
            return false;
        };

        let in_range = || {
            let second: NaiveDate = self.values.get(1).copied().unwrap_or(first);
            first.min(second) <= day && day <= first.max(second)
        };

        match self.operator {
            DateOperator::Is => day == first,
            DateOperator::IsNot => day != first,
            DateOperator::IsBefore => day < first,
            DateOperator::IsOnOrAfter => day >= first,
            DateOperator::IsAfter => day > first,
            DateOperator::IsOnOrBefore => day <= first,
            DateOperator::IsBetween => in_range(),
            DateOperator::IsNotBetween => !in_range(),
        }
    }
}

impl OptionFilter {
    /// Case-insensitive membership of a normalized option value.
    pub fn matches(&self, value: Option<&str>) -> bool {
        if self.values.is_empty() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };

        let value = value.to_lowercase();
        let member = self.values.iter().any(|v| v.to_lowercase() == value);
        match self.operator {
            OptionOperator::Is | OptionOperator::IsAnyOf => member,
            OptionOperator::IsNot | OptionOperator::IsNoneOf => !member,
        }
    }
}

impl MultiOptionFilter {
    /// Set comparison between the row's option values and the required set.
    ///
    /// `None` stands for a missing row value; an empty slice is a row with
    /// no options.
    pub fn matches(&self, values: Option<&[String]>) -> bool {
        let required: HashSet<&str> = self.values.iter().flatten().map(String::as_str).collect();
        if required.is_empty() {
            return true;
        }
        let Some(values) = values else {
            return false;
        };

        let present: HashSet<&str> = values.iter().map(String::as_str).collect();
        let shared = required.intersection(&present).count();

        match self.operator {
            MultiOptionOperator::Include | MultiOptionOperator::IncludeAnyOf => shared > 0,
            MultiOptionOperator::Exclude | MultiOptionOperator::ExcludeIfAnyOf => shared == 0,
            MultiOptionOperator::IncludeAllOf => shared == required.len(),
            MultiOptionOperator::ExcludeIfAll => shared < required.len(),
        }
    }
}

impl ColumnFilter {
    /// Tests one row value, reading option values from text and options.
    ///
    /// ```
    /// use table_filter::{ColumnFilter, FilterModel, OptionOperator, Value};
    ///
    /// let filter = ColumnFilter::Option(FilterModel::new(
    ///     "status",
    ///     OptionOperator::IsNoneOf,
    ///     vec!["done".to_string(), "canceled".to_string()],
    /// ));
    /// assert!(filter.matches(&Value::from("todo")));
    /// assert!(!filter.matches(&Value::from("Done")));
    /// assert!(!filter.matches(&Value::None));
    /// ```
    pub fn matches(&self, value: &Value) -> bool {
        self.matches_with(value, |v| v.option_value().map(str::to_string))
    }

    /// Reads the filter's column from a row and tests it. Option values that
    /// are neither text nor options go through the column's transform.
    pub fn matches_row<T>(&self, config: &ColumnConfig<T>, row: &T) -> bool {
        self.matches_with(&config.access(row), |v| config.option_value(v))
    }

    fn matches_with(&self, value: &Value, option_value: impl Fn(&Value) -> Option<String>) -> bool {
        match self {
            ColumnFilter::Text(f) => f.matches(value),
            ColumnFilter::Number(f) => f.matches(value),
            ColumnFilter::Date(f) => f.matches(value),
            ColumnFilter::Option(f) => f.matches(option_value(value).as_deref()),
            ColumnFilter::MultiOption(f) => {
                if value.is_none() {
                    return f.matches(None);
                }
                let members: Vec<String> = value
                    .clone()
                    .flatten()
                    .iter()
                    .filter_map(&option_value)
                    .collect();
                f.matches(Some(members.as_slice()))
            }
        }
    }
}

impl FiltersState {
    /// Returns `true` if the row passes every filter on a registered column.
    ///
    /// Filters on columns missing from `columns` are ignored.
    pub fn matches<T>(&self, row: &T, columns: &Columns<T>) -> bool {
        self.iter().all(|filter| {
            columns
                .find(filter.column_id())
                .map_or(true, |column| filter.matches_row(column.config(), row))
        })
    }

    /// The rows that pass every filter, in their original order.
    pub fn filter<'a, T>(&self, rows: &'a [T], columns: &Columns<T>) -> Vec<&'a T> {
        rows.iter().filter(|row| self.matches(*row, columns)).collect()
    }

    pub fn count<T>(&self, rows: &[T], columns: &Columns<T>) -> usize {
        rows.iter().filter(|row| self.matches(*row, columns)).count()
    }
}
