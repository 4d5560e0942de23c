//! Column data types and operator arity.

use serde::{Deserialize, Serialize};

/// The data type of a filterable column.
///
/// Determines the shape of filter values and which operators are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnDataType {
    /// Free text, filtered by substring.
    Text,
    /// Numeric values, filtered by comparison or range.
    Number,
    /// Calendar dates, filtered by day.
    Date,
    /// Exactly one value out of a list of options.
    Option,
    /// Zero or more values out of a list of options.
    MultiOption,
}

impl ColumnDataType {
    /// All data types, in declaration order.
    pub const ALL: [ColumnDataType; 5] = [
        ColumnDataType::Text,
        ColumnDataType::Number,
        ColumnDataType::Date,
        ColumnDataType::Option,
        ColumnDataType::MultiOption,
    ];

    /// Returns `true` for `Option` and `MultiOption`.
    pub fn is_option_based(self) -> bool {
        matches!(self, ColumnDataType::Option | ColumnDataType::MultiOption)
    }

    /// Returns the serialized name of this data type.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnDataType::Text => "text",
            ColumnDataType::Number => "number",
            ColumnDataType::Date => "date",
            ColumnDataType::Option => "option",
            ColumnDataType::MultiOption => "multiOption",
        }
    }
}

impl std::fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How many values an operator expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Zero or one value.
    Single,
    /// Two or more values.
    Multiple,
}

impl Target {
    /// Returns the target matching a value count.
    pub fn for_cardinality(count: usize) -> Target {
        if count > 1 {
            Target::Multiple
        } else {
            Target::Single
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Target::Single => "single",
            Target::Multiple => "multiple",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
