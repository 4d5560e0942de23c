//! Scenario tests for the filter action reducer.

use std::collections::HashMap;

use chrono::NaiveDate;
use table_filter::{
    reduce, AnyOperator, ColumnDataType, ColumnFilter, DateOperator, FilterAction, FilterError,
    FilterModel, FilterValues, FiltersState, MultiOptionOperator, NumberOperator, OptionOperator,
};

// ============================================================================
// Test helpers
// ============================================================================

fn registry() -> HashMap<String, ColumnDataType> {
    [
        ("title", ColumnDataType::Text),
        ("estimate", ColumnDataType::Number),
        ("due", ColumnDataType::Date),
        ("status", ColumnDataType::Option),
        ("labels", ColumnDataType::MultiOption),
    ]
    .into_iter()
    .map(|(id, ty)| (id.to_string(), ty))
    .collect()
}

fn set(id: &str, values: impl Into<FilterValues>) -> FilterAction {
    FilterAction::SetFilterValue {
        column_id: id.into(),
        values: values.into(),
    }
}

fn add(id: &str, values: impl Into<FilterValues>) -> FilterAction {
    FilterAction::AddFilterValue {
        column_id: id.into(),
        values: values.into(),
    }
}

fn remove(id: &str, values: impl Into<FilterValues>) -> FilterAction {
    FilterAction::RemoveFilterValue {
        column_id: id.into(),
        values: values.into(),
    }
}

fn run(actions: Vec<FilterAction>) -> FiltersState {
    let columns = registry();
    actions
        .into_iter()
        .try_fold(FiltersState::new(), |state, action| reduce(&state, &columns, action))
        .unwrap()
}

fn option_filter(state: &FiltersState, id: &str) -> (OptionOperator, Vec<String>) {
    match state.get(id) {
        Some(ColumnFilter::Option(f)) => (f.operator, f.values.clone()),
        other => panic!("expected option filter on {id}, got {other:?}"),
    }
}

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Option columns
// ============================================================================

#[test]
fn adding_second_value_pluralizes_operator() {
    let state = run(vec![set("status", vec!["todo"]), add("status", vec!["done"])]);
    let (op, values) = option_filter(&state, "status");
    assert_eq!(op, OptionOperator::IsAnyOf);
    assert_eq!(values, strings(&["todo", "done"]));
}

#[test]
fn removing_back_to_one_value_singularizes_operator() {
    let state = run(vec![
        add("status", vec!["todo", "done"]),
        remove("status", vec!["done"]),
    ]);
    let (op, values) = option_filter(&state, "status");
    assert_eq!(op, OptionOperator::Is);
    assert_eq!(values, strings(&["todo"]));
}

#[test]
fn negated_operator_keeps_polarity_across_transitions() {
    let columns = registry();
    let state = run(vec![set("status", vec!["todo"])]);
    let state = reduce(
        &state,
        &columns,
        FilterAction::SetFilterOperator {
            column_id: "status".into(),
            operator: OptionOperator::IsNot.into(),
        },
    )
    .unwrap();

    let state = reduce(&state, &columns, add("status", vec!["done"])).unwrap();
    assert_eq!(option_filter(&state, "status").0, OptionOperator::IsNoneOf);

    let state = reduce(&state, &columns, remove("status", vec!["todo"])).unwrap();
    assert_eq!(option_filter(&state, "status").0, OptionOperator::IsNot);
}

#[test]
fn removing_only_value_drops_filter() {
    let state = run(vec![
        set("status", vec!["todo"]),
        set("title", vec!["bug"]),
        remove("status", vec!["todo"]),
    ]);
    assert!(state.get("status").is_none());
    assert_eq!(state.len(), 1);
}

#[test]
fn adding_existing_value_changes_nothing() {
    let state = run(vec![add("status", vec!["todo"]), add("status", vec!["todo"])]);
    let (op, values) = option_filter(&state, "status");
    assert_eq!(op, OptionOperator::Is);
    assert_eq!(values, strings(&["todo"]));
}

// ============================================================================
// Multi-option columns
// ============================================================================

#[test]
fn multi_option_transitions_count_members() {
    let state = run(vec![add("labels", vec!["bug"])]);
    assert_eq!(
        state.get("labels").unwrap().operator().as_str(),
        MultiOptionOperator::Include.to_string()
    );

    let state = run(vec![add("labels", vec!["bug"]), add("labels", vec!["ui"])]);
    match state.get("labels").unwrap() {
        ColumnFilter::MultiOption(f) => {
            assert_eq!(f.operator, MultiOptionOperator::IncludeAnyOf);
            assert_eq!(f.values, vec![strings(&["bug", "ui"])]);
        }
        other => panic!("unexpected filter {other:?}"),
    }
}

#[test]
fn exclude_pluralizes_to_exclude_if_any_of() {
    let columns = registry();
    let state = run(vec![add("labels", vec!["bug"])]);
    let state = reduce(
        &state,
        &columns,
        FilterAction::SetFilterOperator {
            column_id: "labels".into(),
            operator: MultiOptionOperator::Exclude.into(),
        },
    )
    .unwrap();
    let state = reduce(&state, &columns, add("labels", vec!["ui"])).unwrap();
    assert_eq!(
        state.get("labels").unwrap().operator(),
        AnyOperator::from(MultiOptionOperator::ExcludeIfAnyOf)
    );
}

#[test]
fn include_all_of_singularizes_to_include() {
    let columns = registry();
    let state = run(vec![add("labels", vec!["bug", "ui"])]);
    let state = reduce(
        &state,
        &columns,
        FilterAction::SetFilterOperator {
            column_id: "labels".into(),
            operator: MultiOptionOperator::IncludeAllOf.into(),
        },
    )
    .unwrap();
    let state = reduce(&state, &columns, remove("labels", vec!["ui"])).unwrap();
    assert_eq!(
        state.get("labels").unwrap().operator(),
        AnyOperator::from(MultiOptionOperator::Include)
    );
}

// ============================================================================
// Number and date columns
// ============================================================================

#[test]
fn number_values_become_sorted_range() {
    let state = run(vec![set("estimate", vec![10.0, 2.0])]);
    match state.get("estimate").unwrap() {
        ColumnFilter::Number(f) => {
            assert_eq!(f.operator, NumberOperator::IsBetween);
            assert_eq!(f.values, vec![2.0, 10.0]);
        }
        other => panic!("unexpected filter {other:?}"),
    }
}

#[test]
fn extra_number_values_still_form_sorted_range() {
    let state = run(vec![set("estimate", vec![8.0, 4.0, 1.0])]);
    match state.get("estimate").unwrap() {
        ColumnFilter::Number(f) => {
            assert_eq!(f.operator, NumberOperator::IsBetween);
            assert_eq!(f.values, vec![4.0, 8.0]);
        }
        other => panic!("unexpected filter {other:?}"),
    }
}

#[test]
fn nan_number_values_are_dropped() {
    let state = run(vec![set("estimate", vec![f64::NAN, 1.0])]);
    match state.get("estimate").unwrap() {
        ColumnFilter::Number(f) => {
            assert_eq!(f.operator, NumberOperator::Is);
            assert_eq!(f.values, vec![1.0]);
        }
        other => panic!("unexpected filter {other:?}"),
    }

    let state = run(vec![set("estimate", vec![f64::NAN])]);
    assert!(state.get("estimate").is_none());
}

#[test]
fn narrowing_number_range_returns_to_is() {
    let state = run(vec![set("estimate", vec![1.0, 5.0]), set("estimate", vec![3.0])]);
    assert_eq!(
        state.get("estimate").unwrap().operator(),
        AnyOperator::from(NumberOperator::Is)
    );
}

#[test]
fn date_range_and_back() {
    let state = run(vec![set("due", vec![day(2024, 1, 1), day(2024, 1, 31)])]);
    assert_eq!(
        state.get("due").unwrap().operator(),
        AnyOperator::from(DateOperator::IsBetween)
    );

    let state = run(vec![
        set("due", vec![day(2024, 1, 1), day(2024, 1, 31)]),
        set("due", vec![day(2024, 1, 15)]),
    ]);
    assert_eq!(state.get("due").unwrap().operator(), AnyOperator::from(DateOperator::Is));
}

// ============================================================================
// Errors and bookkeeping
// ============================================================================

#[test]
fn add_and_remove_reject_non_option_columns() {
    let columns = registry();
    let state = FiltersState::new();
    for action in [add("title", vec!["x"]), remove("estimate", vec![1.0])] {
        let err = reduce(&state, &columns, action).unwrap_err();
        assert!(
            matches!(err, FilterError::InvalidColumnOperation { .. }),
            "got {err}"
        );
    }
}

#[test]
fn unknown_column_fails_before_any_state() {
    let columns = registry();
    let state = run(vec![set("status", vec!["todo"])]);
    for action in [
        set("nope", vec!["x"]),
        add("nope", vec!["x"]),
        remove("nope", vec!["x"]),
        FilterAction::SetFilterOperator {
            column_id: "nope".into(),
            operator: OptionOperator::Is.into(),
        },
    ] {
        let err = reduce(&state, &columns, action).unwrap_err();
        assert_eq!(err.to_string(), "column with id 'nope' not found");
    }
}

#[test]
fn set_filter_operator_on_absent_filter_is_noop() {
    let state = run(vec![FilterAction::SetFilterOperator {
        column_id: "status".into(),
        operator: OptionOperator::IsNot.into(),
    }]);
    assert!(state.is_empty());
}

#[test]
fn remove_filter_is_idempotent() {
    let columns = registry();
    let state = run(vec![set("status", vec!["todo"]), set("title", vec!["a"])]);
    let action = || FilterAction::RemoveFilter {
        column_id: "status".into(),
    };
    let once = reduce(&state, &columns, action()).unwrap();
    let twice = reduce(&once, &columns, action()).unwrap();
    assert_eq!(once, twice);
    assert_eq!(once.len(), 1);
}

#[test]
fn insertion_order_is_preserved() {
    let state = run(vec![
        set("title", vec!["a"]),
        set("status", vec!["todo"]),
        set("estimate", vec![1.0]),
        set("status", vec!["todo", "done"]),
    ]);
    let ids: Vec<_> = state.iter().map(ColumnFilter::column_id).collect();
    assert_eq!(ids, vec!["title", "status", "estimate"]);

    let cleared = reduce(&state, &registry(), FilterAction::RemoveAllFilters).unwrap();
    assert!(cleared.is_empty());
}

#[test]
fn state_survives_json_round_trip() {
    let state = run(vec![
        set("title", vec!["login"]),
        set("estimate", vec![8.0, 3.0]),
        set("due", vec![day(2024, 5, 1)]),
        add("status", vec!["todo", "done"]),
        add("labels", vec!["bug"]),
    ]);
    let json = serde_json::to_string(&state).unwrap();
    let back: FiltersState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);

    let raw: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(raw[3]["type"], "option");
    assert_eq!(raw[3]["operator"], "is any of");
    assert_eq!(raw[4]["values"], serde_json::json!([["bug"]]));
}

#[test]
fn deserialized_state_can_be_reduced() {
    let state: FiltersState = vec![ColumnFilter::Option(FilterModel::new(
        "status",
        OptionOperator::Is,
        strings(&["todo"]),
    ))]
    .into();
    let next = reduce(&state, &registry(), add("status", vec!["done"])).unwrap();
    assert_eq!(option_filter(&next, "status").0, OptionOperator::IsAnyOf);
    // The original is untouched.
    assert_eq!(option_filter(&state, "status").0, OptionOperator::Is);
}
