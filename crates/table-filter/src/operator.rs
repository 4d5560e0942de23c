//! Filter operators and their catalog.
//!
//! Each column data type has its own closed operator enum ([`TextOperator`],
//! [`NumberOperator`], [`DateOperator`], [`OptionOperator`],
//! [`MultiOptionOperator`]). All of them implement [`FilterOperator`], which
//! exposes the operator's metadata:
//!
//! - **target**: whether the operator expects one value or several
//! - **plural form**: where a single-value operator goes when a second value
//!   is added (`is` becomes `is any of`)
//! - **singular form**: where a multi-value operator goes when it drops back
//!   to one value (`is any of` becomes `is`)
//! - **negation**: the boolean complement (`is` and `is not`)
//!
//! [`AnyOperator`] wraps the five enums for code that only knows the data type
//! at runtime.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::data_type::{ColumnDataType, Target};
use crate::error::{FilterError, Result};
use crate::i18n::Translations;

/// Static metadata for one operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorDetails<O> {
    /// The operator itself.
    pub value: O,
    /// Translation key for the operator's label.
    pub key: &'static str,
    /// How many values the operator expects.
    pub target: Target,
    /// Operator to switch to when the value count grows past one.
    pub plural_form: Option<O>,
    /// Operator to switch to when the value count drops to one or zero.
    pub singular_form: Option<O>,
    /// Complement of a positive operator.
    pub negation: Option<O>,
    /// Positive operator this negated operator complements.
    pub negation_of: Option<O>,
}

impl<O: Copy> OperatorDetails<O> {
    /// Returns `true` if this operator is the negated half of its pair.
    pub fn is_negated(&self) -> bool {
        self.negation_of.is_some()
    }

    /// Maps every operator reference through `f`.
    pub fn map<P>(self, f: impl Fn(O) -> P) -> OperatorDetails<P> {
        OperatorDetails {
            value: f(self.value),
            key: self.key,
            target: self.target,
            plural_form: self.plural_form.map(&f),
            singular_form: self.singular_form.map(&f),
            negation: self.negation.map(&f),
            negation_of: self.negation_of.map(&f),
        }
    }
}

/// Operator enum for one column data type.
pub trait FilterOperator:
    Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Data type this operator applies to.
    const DATA_TYPE: ColumnDataType;
    /// Every operator of the type, in catalog order.
    const ALL: &'static [Self];
    /// Default operator for a new single-value filter.
    const DEFAULT_SINGLE: Self;
    /// Default operator for a new multi-value filter.
    const DEFAULT_MULTIPLE: Self;

    /// The operator's canonical string (`"is any of"`).
    fn as_str(self) -> &'static str;

    /// The operator's catalog entry.
    fn details(self) -> OperatorDetails<Self>;

    /// Wraps this operator in [`AnyOperator`].
    fn into_any(self) -> AnyOperator;

    /// Default operator for a fresh filter with the given arity.
    fn default_for(target: Target) -> Self {
        match target {
            Target::Single => Self::DEFAULT_SINGLE,
            Target::Multiple => Self::DEFAULT_MULTIPLE,
        }
    }

    /// Parses an operator from its canonical string.
    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.as_str() == s)
    }

    fn target(self) -> Target {
        self.details().target
    }

    fn plural_form(self) -> Option<Self> {
        self.details().plural_form
    }

    fn singular_form(self) -> Option<Self> {
        self.details().singular_form
    }

    fn is_negated(self) -> bool {
        self.details().is_negated()
    }

    /// The boolean complement, whichever side of the pair this is.
    fn complement(self) -> Option<Self> {
        let details = self.details();
        details.negation.or(details.negation_of)
    }

    /// Every operator sharing this operator's target, itself included.
    fn related(self) -> Vec<Self> {
        let target = self.target();
        Self::ALL
            .iter()
            .copied()
            .filter(|op| op.target() == target)
            .collect()
    }

    /// Operators sharing this operator's target, itself excluded.
    fn relatives(self) -> Vec<Self> {
        self.related().into_iter().filter(|op| *op != self).collect()
    }

    /// Display label from a translation table, falling back to [`as_str`].
    ///
    /// [`as_str`]: FilterOperator::as_str
    fn label(self, translations: &Translations) -> &str {
        translations
            .get(self.details().key)
            .unwrap_or_else(|| self.as_str())
    }
}

fn single<O>(
    value: O,
    key: &'static str,
    plural_form: Option<O>,
    negation: Option<O>,
    negation_of: Option<O>,
) -> OperatorDetails<O> {
    OperatorDetails {
        value,
        key,
        target: Target::Single,
        plural_form,
        singular_form: None,
        negation,
        negation_of,
    }
}

fn multiple<O>(
    value: O,
    key: &'static str,
    singular_form: O,
    negation: Option<O>,
    negation_of: Option<O>,
) -> OperatorDetails<O> {
    OperatorDetails {
        value,
        key,
        target: Target::Multiple,
        plural_form: None,
        singular_form: Some(singular_form),
        negation,
        negation_of,
    }
}

// ============================================================================
// Text
// ============================================================================

/// Operators for text columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextOperator {
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "does not contain")]
    DoesNotContain,
}

impl FilterOperator for TextOperator {
    const DATA_TYPE: ColumnDataType = ColumnDataType::Text;
    const ALL: &'static [Self] = &[TextOperator::Contains, TextOperator::DoesNotContain];
    const DEFAULT_SINGLE: Self = TextOperator::Contains;
    const DEFAULT_MULTIPLE: Self = TextOperator::Contains;

    fn as_str(self) -> &'static str {
        match self {
            TextOperator::Contains => "contains",
            TextOperator::DoesNotContain => "does not contain",
        }
    }

    fn details(self) -> OperatorDetails<Self> {
        use TextOperator::*;
        match self {
            Contains => single(
                Contains,
                "filters.text.contains",
                None,
                Some(DoesNotContain),
                None,
            ),
            DoesNotContain => single(
                DoesNotContain,
                "filters.text.doesNotContain",
                None,
                None,
                Some(Contains),
            ),
        }
    }

    fn into_any(self) -> AnyOperator {
        AnyOperator::Text(self)
    }
}

// ============================================================================
// Number
// ============================================================================

/// Operators for number columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberOperator {
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "is not")]
    IsNot,
    #[serde(rename = "is greater than")]
    GreaterThan,
    #[serde(rename = "is greater than or equal to")]
    GreaterThanOrEqual,
    #[serde(rename = "is less than")]
    LessThan,
    #[serde(rename = "is less than or equal to")]
    LessThanOrEqual,
    #[serde(rename = "is between")]
    IsBetween,
    #[serde(rename = "is not between")]
    IsNotBetween,
}

impl FilterOperator for NumberOperator {
    const DATA_TYPE: ColumnDataType = ColumnDataType::Number;
    const ALL: &'static [Self] = &[
        NumberOperator::Is,
        NumberOperator::IsNot,
        NumberOperator::GreaterThan,
        NumberOperator::GreaterThanOrEqual,
        NumberOperator::LessThan,
        NumberOperator::LessThanOrEqual,
        NumberOperator::IsBetween,
        NumberOperator::IsNotBetween,
    ];
    const DEFAULT_SINGLE: Self = NumberOperator::Is;
    const DEFAULT_MULTIPLE: Self = NumberOperator::IsBetween;

    fn as_str(self) -> &'static str {
        match self {
            NumberOperator::Is => "is",
            NumberOperator::IsNot => "is not",
            NumberOperator::GreaterThan => "is greater than",
            NumberOperator::GreaterThanOrEqual => "is greater than or equal to",
            NumberOperator::LessThan => "is less than",
            NumberOperator::LessThanOrEqual => "is less than or equal to",
            NumberOperator::IsBetween => "is between",
            NumberOperator::IsNotBetween => "is not between",
        }
    }

    fn details(self) -> OperatorDetails<Self> {
        use NumberOperator::*;
        match self {
            Is => single(Is, "filters.number.is", Some(IsBetween), Some(IsNot), None),
            IsNot => single(
                IsNot,
                "filters.number.isNot",
                Some(IsNotBetween),
                None,
                Some(Is),
            ),
            GreaterThan => single(
                GreaterThan,
                "filters.number.greaterThan",
                Some(IsBetween),
                Some(LessThanOrEqual),
                None,
            ),
            GreaterThanOrEqual => single(
                GreaterThanOrEqual,
                "filters.number.greaterThanOrEqual",
                Some(IsBetween),
                Some(LessThan),
                None,
            ),
            LessThan => single(
                LessThan,
                "filters.number.lessThan",
                Some(IsBetween),
                Some(GreaterThanOrEqual),
                None,
            ),
            LessThanOrEqual => single(
                LessThanOrEqual,
                "filters.number.lessThanOrEqual",
                Some(IsBetween),
                Some(GreaterThan),
                None,
            ),
            IsBetween => multiple(
                IsBetween,
                "filters.number.isBetween",
                Is,
                Some(IsNotBetween),
                None,
            ),
            IsNotBetween => multiple(
                IsNotBetween,
                "filters.number.isNotBetween",
                IsNot,
                None,
                Some(IsBetween),
            ),
        }
    }

    fn into_any(self) -> AnyOperator {
        AnyOperator::Number(self)
    }
}

// ============================================================================
// Date
// ============================================================================

/// Operators for date columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateOperator {
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "is not")]
    IsNot,
    #[serde(rename = "is before")]
    IsBefore,
    #[serde(rename = "is on or after")]
    IsOnOrAfter,
    #[serde(rename = "is after")]
    IsAfter,
    #[serde(rename = "is on or before")]
    IsOnOrBefore,
    #[serde(rename = "is between")]
    IsBetween,
    #[serde(rename = "is not between")]
    IsNotBetween,
}

impl FilterOperator for DateOperator {
    const DATA_TYPE: ColumnDataType = ColumnDataType::Date;
    const ALL: &'static [Self] = &[
        DateOperator::Is,
        DateOperator::IsNot,
        DateOperator::IsBefore,
        DateOperator::IsOnOrAfter,
        DateOperator::IsAfter,
        DateOperator::IsOnOrBefore,
        DateOperator::IsBetween,
        DateOperator::IsNotBetween,
    ];
    const DEFAULT_SINGLE: Self = DateOperator::Is;
    const DEFAULT_MULTIPLE: Self = DateOperator::IsBetween;

    fn as_str(self) -> &'static str {
        match self {
            DateOperator::Is => "is",
            DateOperator::IsNot => "is not",
            DateOperator::IsBefore => "is before",
            DateOperator::IsOnOrAfter => "is on or after",
            DateOperator::IsAfter => "is after",
            DateOperator::IsOnOrBefore => "is on or before",
            DateOperator::IsBetween => "is between",
            DateOperator::IsNotBetween => "is not between",
        }
    }

    fn details(self) -> OperatorDetails<Self> {
        use DateOperator::*;
        match self {
            Is => single(Is, "filters.date.is", Some(IsBetween), Some(IsNot), None),
            IsNot => single(
                IsNot,
                "filters.date.isNot",
                Some(IsNotBetween),
                None,
                Some(Is),
            ),
            IsBefore => single(
                IsBefore,
                "filters.date.isBefore",
                Some(IsBetween),
                Some(IsOnOrAfter),
                None,
            ),
            IsOnOrAfter => single(
                IsOnOrAfter,
                "filters.date.isOnOrAfter",
                Some(IsBetween),
                Some(IsBefore),
                None,
            ),
            IsAfter => single(
                IsAfter,
                "filters.date.isAfter",
                Some(IsBetween),
                Some(IsOnOrBefore),
                None,
            ),
            IsOnOrBefore => single(
                IsOnOrBefore,
                "filters.date.isOnOrBefore",
                Some(IsBetween),
                Some(IsAfter),
                None,
            ),
            IsBetween => multiple(
                IsBetween,
                "filters.date.isBetween",
                Is,
                Some(IsNotBetween),
                None,
            ),
            IsNotBetween => multiple(
                IsNotBetween,
                "filters.date.isNotBetween",
                IsNot,
                None,
                Some(IsBetween),
            ),
        }
    }

    fn into_any(self) -> AnyOperator {
        AnyOperator::Date(self)
    }
}

// ============================================================================
// Option
// ============================================================================

/// Operators for option columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionOperator {
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "is not")]
    IsNot,
    #[serde(rename = "is any of")]
    IsAnyOf,
    #[serde(rename = "is none of")]
    IsNoneOf,
}

impl FilterOperator for OptionOperator {
    const DATA_TYPE: ColumnDataType = ColumnDataType::Option;
    const ALL: &'static [Self] = &[
        OptionOperator::Is,
        OptionOperator::IsNot,
        OptionOperator::IsAnyOf,
        OptionOperator::IsNoneOf,
    ];
    const DEFAULT_SINGLE: Self = OptionOperator::Is;
    const DEFAULT_MULTIPLE: Self = OptionOperator::IsAnyOf;

    fn as_str(self) -> &'static str {
        match self {
            OptionOperator::Is => "is",
            OptionOperator::IsNot => "is not",
            OptionOperator::IsAnyOf => "is any of",
            OptionOperator::IsNoneOf => "is none of",
        }
    }

    fn details(self) -> OperatorDetails<Self> {
        use OptionOperator::*;
        match self {
            Is => single(Is, "filters.option.is", Some(IsAnyOf), Some(IsNot), None),
            IsNot => single(
                IsNot,
                "filters.option.isNot",
                Some(IsNoneOf),
                None,
                Some(Is),
            ),
            IsAnyOf => multiple(
                IsAnyOf,
                "filters.option.isAnyOf",
                Is,
                Some(IsNoneOf),
                None,
            ),
            IsNoneOf => multiple(
                IsNoneOf,
                "filters.option.isNoneOf",
                IsNot,
                None,
                Some(IsAnyOf),
            ),
        }
    }

    fn into_any(self) -> AnyOperator {
        AnyOperator::Option(self)
    }
}

// ============================================================================
// Multi-option
// ============================================================================

/// Operators for multi-option columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MultiOptionOperator {
    #[serde(rename = "include")]
    Include,
    #[serde(rename = "exclude")]
    Exclude,
    #[serde(rename = "include any of")]
    IncludeAnyOf,
    #[serde(rename = "exclude if all")]
    ExcludeIfAll,
    #[serde(rename = "include all of")]
    IncludeAllOf,
    #[serde(rename = "exclude if any of")]
    ExcludeIfAnyOf,
}

impl FilterOperator for MultiOptionOperator {
    const DATA_TYPE: ColumnDataType = ColumnDataType::MultiOption;
    const ALL: &'static [Self] = &[
        MultiOptionOperator::Include,
        MultiOptionOperator::Exclude,
        MultiOptionOperator::IncludeAnyOf,
        MultiOptionOperator::ExcludeIfAll,
        MultiOptionOperator::IncludeAllOf,
        MultiOptionOperator::ExcludeIfAnyOf,
    ];
    const DEFAULT_SINGLE: Self = MultiOptionOperator::Include;
    const DEFAULT_MULTIPLE: Self = MultiOptionOperator::IncludeAnyOf;

    fn as_str(self) -> &'static str {
        match self {
            MultiOptionOperator::Include => "include",
            MultiOptionOperator::Exclude => "exclude",
            MultiOptionOperator::IncludeAnyOf => "include any of",
            MultiOptionOperator::ExcludeIfAll => "exclude if all",
            MultiOptionOperator::IncludeAllOf => "include all of",
            MultiOptionOperator::ExcludeIfAnyOf => "exclude if any of",
        }
    }

    fn details(self) -> OperatorDetails<Self> {
        use MultiOptionOperator::*;
        match self {
            Include => single(
                Include,
                "filters.multiOption.include",
                Some(IncludeAnyOf),
                Some(Exclude),
                None,
            ),
            Exclude => single(
                Exclude,
                "filters.multiOption.exclude",
                Some(ExcludeIfAnyOf),
                None,
                Some(Include),
            ),
            IncludeAnyOf => multiple(
                IncludeAnyOf,
                "filters.multiOption.includeAnyOf",
                Include,
                Some(ExcludeIfAnyOf),
                None,
            ),
            ExcludeIfAll => multiple(
                ExcludeIfAll,
                "filters.multiOption.excludeIfAll",
                Exclude,
                None,
                Some(IncludeAllOf),
            ),
            IncludeAllOf => multiple(
                IncludeAllOf,
                "filters.multiOption.includeAllOf",
                Include,
                Some(ExcludeIfAll),
                None,
            ),
            ExcludeIfAnyOf => multiple(
                ExcludeIfAnyOf,
                "filters.multiOption.excludeIfAnyOf",
                Exclude,
                None,
                Some(IncludeAnyOf),
            ),
        }
    }

    fn into_any(self) -> AnyOperator {
        AnyOperator::MultiOption(self)
    }
}

// Display and FromStr go through the canonical string for every operator enum.
macro_rules! impl_operator_strings {
    ($($op:ty),* $(,)?) => {$(
        impl fmt::Display for $op {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $op {
            type Err = FilterError;

            fn from_str(s: &str) -> Result<Self> {
                <$op as FilterOperator>::parse(s).ok_or_else(|| FilterError::UnknownOperator {
                    data_type: <$op as FilterOperator>::DATA_TYPE,
                    operator: s.to_string(),
                })
            }
        }

        impl From<$op> for AnyOperator {
            fn from(op: $op) -> Self {
                op.into_any()
            }
        }
    )*};
}

impl_operator_strings!(
    TextOperator,
    NumberOperator,
    DateOperator,
    OptionOperator,
    MultiOptionOperator,
);

// ============================================================================
// Runtime-typed operators
// ============================================================================

/// An operator of any data type.
///
/// Used where the column type is only known at runtime, such as a
/// `set_filter_operator` request coming from a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnyOperator {
    Text(TextOperator),
    Number(NumberOperator),
    Date(DateOperator),
    Option(OptionOperator),
    MultiOption(MultiOptionOperator),
}

impl AnyOperator {
    /// Parses an operator string for the given data type.
    ///
    /// ```
    /// use table_filter::{AnyOperator, ColumnDataType, OptionOperator};
    ///
    /// let op = AnyOperator::parse(ColumnDataType::Option, "is any of").unwrap();
    /// assert_eq!(op, AnyOperator::Option(OptionOperator::IsAnyOf));
    /// assert!(AnyOperator::parse(ColumnDataType::Text, "is any of").is_err());
    /// ```
    pub fn parse(data_type: ColumnDataType, s: &str) -> Result<AnyOperator> {
        Ok(match data_type {
            ColumnDataType::Text => AnyOperator::Text(s.parse()?),
            ColumnDataType::Number => AnyOperator::Number(s.parse()?),
            ColumnDataType::Date => AnyOperator::Date(s.parse()?),
            ColumnDataType::Option => AnyOperator::Option(s.parse()?),
            ColumnDataType::MultiOption => AnyOperator::MultiOption(s.parse()?),
        })
    }

    pub fn data_type(self) -> ColumnDataType {
        match self {
            AnyOperator::Text(_) => ColumnDataType::Text,
            AnyOperator::Number(_) => ColumnDataType::Number,
            AnyOperator::Date(_) => ColumnDataType::Date,
            AnyOperator::Option(_) => ColumnDataType::Option,
            AnyOperator::MultiOption(_) => ColumnDataType::MultiOption,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnyOperator::Text(op) => op.as_str(),
            AnyOperator::Number(op) => op.as_str(),
            AnyOperator::Date(op) => op.as_str(),
            AnyOperator::Option(op) => op.as_str(),
            AnyOperator::MultiOption(op) => op.as_str(),
        }
    }

    /// The operator's catalog entry, with references wrapped as `AnyOperator`.
    pub fn details(self) -> OperatorDetails<AnyOperator> {
        match self {
            AnyOperator::Text(op) => op.details().map(AnyOperator::Text),
            AnyOperator::Number(op) => op.details().map(AnyOperator::Number),
            AnyOperator::Date(op) => op.details().map(AnyOperator::Date),
            AnyOperator::Option(op) => op.details().map(AnyOperator::Option),
            AnyOperator::MultiOption(op) => op.details().map(AnyOperator::MultiOption),
        }
    }

    pub fn target(self) -> Target {
        self.details().target
    }

    /// Display label from a translation table.
    pub fn label(self, translations: &Translations) -> &str {
        translations
            .get(self.details().key)
            .unwrap_or_else(|| self.as_str())
    }
}

impl fmt::Display for AnyOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Catalog lookups
// ============================================================================

fn wrap_all<O: FilterOperator>() -> Vec<AnyOperator> {
    O::ALL.iter().map(|op| op.into_any()).collect()
}

/// Default operator for a new filter of the given type and arity.
///
/// | type | single | multiple |
/// |------|--------|----------|
/// | text | contains | contains |
/// | number | is | is between |
/// | date | is | is between |
/// | option | is | is any of |
/// | multiOption | include | include any of |
pub fn default_operator(data_type: ColumnDataType, target: Target) -> AnyOperator {
    match data_type {
        ColumnDataType::Text => TextOperator::default_for(target).into_any(),
        ColumnDataType::Number => NumberOperator::default_for(target).into_any(),
        ColumnDataType::Date => DateOperator::default_for(target).into_any(),
        ColumnDataType::Option => OptionOperator::default_for(target).into_any(),
        ColumnDataType::MultiOption => MultiOptionOperator::default_for(target).into_any(),
    }
}

/// Every operator of a data type, in catalog order.
pub fn operators_for(data_type: ColumnDataType) -> Vec<AnyOperator> {
    match data_type {
        ColumnDataType::Text => wrap_all::<TextOperator>(),
        ColumnDataType::Number => wrap_all::<NumberOperator>(),
        ColumnDataType::Date => wrap_all::<DateOperator>(),
        ColumnDataType::Option => wrap_all::<OptionOperator>(),
        ColumnDataType::MultiOption => wrap_all::<MultiOptionOperator>(),
    }
}

/// Catalog entries for every operator of a data type.
pub fn operator_details_for(data_type: ColumnDataType) -> Vec<OperatorDetails<AnyOperator>> {
    operators_for(data_type)
        .into_iter()
        .map(AnyOperator::details)
        .collect()
}

/// Operators of the same type sharing the operator's target, itself included.
///
/// This is the list an operator-switch menu offers for a filter.
pub fn related_operators(operator: AnyOperator) -> Vec<AnyOperator> {
    let target = operator.target();
    operators_for(operator.data_type())
        .into_iter()
        .filter(|op| op.target() == target)
        .collect()
}

/// Picks the operator a filter should have after its values change.
///
/// Only a crossing between "zero or one value" and "two or more values"
/// changes the operator:
///
/// - single to multiple: the operator's plural form (`is` → `is any of`)
/// - multiple to single: the operator's singular form (`is any of` → `is`)
///
/// Operators without the needed form are kept as they are.
///
/// ```
/// use table_filter::{determine_new_operator, OptionOperator};
///
/// assert_eq!(determine_new_operator(OptionOperator::Is, 1, 2), OptionOperator::IsAnyOf);
/// assert_eq!(determine_new_operator(OptionOperator::IsAnyOf, 3, 1), OptionOperator::Is);
/// assert_eq!(determine_new_operator(OptionOperator::IsAnyOf, 3, 2), OptionOperator::IsAnyOf);
/// ```
pub fn determine_new_operator<O: FilterOperator>(
    current: O,
    old_cardinality: usize,
    new_cardinality: usize,
) -> O {
    let (a, b) = (old_cardinality, new_cardinality);

    if a == b || (a >= 2 && b >= 2) || (a <= 1 && b <= 1) {
        return current;
    }

    let next = if a < b {
        current.plural_form()
    } else {
        current.singular_form()
    }
    .unwrap_or(current);

    trace!(
        data_type = %O::DATA_TYPE,
        from = current.as_str(),
        to = next.as_str(),
        old_cardinality = a,
        new_cardinality = b,
        "operator transition"
    );

    next
}
