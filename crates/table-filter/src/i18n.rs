//! Operator label tables.
//!
//! Labels are looked up by i18n key (`filters.option.isAnyOf`). The built-in
//! English table maps each key to the operator's canonical string; other
//! locales are loaded from JSON and merged over it, so a partial table still
//! yields a label for every operator.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::Value as Json;

use crate::error::Result;
use crate::operator::{
    DateOperator, FilterOperator, MultiOptionOperator, NumberOperator, OptionOperator,
    TextOperator,
};

static ENGLISH: Lazy<HashMap<String, String>> = Lazy::new(|| {
    let mut labels = HashMap::new();
    insert_labels::<TextOperator>(&mut labels);
    insert_labels::<NumberOperator>(&mut labels);
    insert_labels::<DateOperator>(&mut labels);
    insert_labels::<OptionOperator>(&mut labels);
    insert_labels::<MultiOptionOperator>(&mut labels);
    labels
});

fn insert_labels<O: FilterOperator>(labels: &mut HashMap<String, String>) {
    for op in O::ALL {
        labels.insert(op.details().key.to_string(), op.as_str().to_string());
    }
}

/// A label table keyed by i18n key.
///
/// # Example
///
/// ```
/// use table_filter::{FilterOperator, OptionOperator, Translations};
///
/// let fr = Translations::from_json(r#"{
///     "filters": { "option": { "isAnyOf": "est l'un de" } }
/// }"#).unwrap();
///
/// assert_eq!(OptionOperator::IsAnyOf.label(&fr), "est l'un de");
/// // Keys missing from the table fall back to English.
/// assert_eq!(OptionOperator::IsNoneOf.label(&fr), "is none of");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    labels: HashMap<String, String>,
}

impl Translations {
    /// The built-in English table.
    pub fn english() -> Self {
        Translations {
            labels: ENGLISH.clone(),
        }
    }

    /// Loads a table from JSON and merges it over English.
    ///
    /// Nested objects are flattened into dotted keys, so both
    /// `{"filters.text.contains": ".."}` and
    /// `{"filters": {"text": {"contains": ".."}}}` are accepted.
    /// Non-string leaves are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: Json = serde_json::from_str(json)?;
        let mut translations = Translations::english();
        flatten_into(&mut translations.labels, String::new(), parsed);
        Ok(translations)
    }

    /// Returns a copy of this table with one label replaced.
    pub fn with_label(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(key.into(), label.into());
        self
    }

    /// Looks up a label by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for Translations {
    fn default() -> Self {
        Translations::english()
    }
}

fn flatten_into(labels: &mut HashMap<String, String>, prefix: String, value: Json) {
    match value {
        Json::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(labels, path, child);
            }
        }
        Json::String(label) if !prefix.is_empty() => {
            labels.insert(prefix, label);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_covers_every_operator() {
        let en = Translations::english();
        // 2 + 8 + 8 + 4 + 6
        assert_eq!(en.len(), 28);
        assert_eq!(en.get("filters.number.greaterThan"), Some("is greater than"));
        assert_eq!(en.get("filters.multiOption.excludeIfAll"), Some("exclude if all"));
        assert_eq!(en.get("filters.option.nope"), None);
    }

    #[test]
    fn flat_and_nested_keys_merge_over_english() {
        let t = Translations::from_json(
            r#"{
                "filters.text.contains": "enthält",
                "filters": { "number": { "is": "ist", "isNot": 3 } }
            }"#,
        )
        .unwrap();
        assert_eq!(t.get("filters.text.contains"), Some("enthält"));
        assert_eq!(t.get("filters.number.is"), Some("ist"));
        // Non-string leaf ignored
        assert_eq!(t.get("filters.number.isNot"), Some("is not"));
        assert_eq!(t.len(), 28);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = Translations::from_json("{ not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid translation table"));
    }
}
