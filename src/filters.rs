//! Filter bounds for the income-statement query.
//!
//! Each bound is either set by the user or left unset, in which case it
//! resolves to a bound-specific default when the query is built.

use chrono::Datelike;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Earliest year the date range covers when no start year is set.
pub const DEFAULT_START_YEAR: f64 = 1600.0;

/// Lower bound for revenue and net income when no minimum is set.
pub const DEFAULT_MIN_AMOUNT: f64 = 0.0;

/// Errors raised while applying a filter change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The dotted field name does not name a known bound.
    #[error("unknown filter field: {0}")]
    UnknownField(String),
}

/// One editable bound, addressed on the wire by its dotted name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// `dateRange.start`
    DateStart,
    /// `dateRange.end`
    DateEnd,
    /// `revenue.min`
    RevenueMin,
    /// `revenue.max`
    RevenueMax,
    /// `netIncome.min`
    NetIncomeMin,
    /// `netIncome.max`
    NetIncomeMax,
}

impl FilterField {
    /// All bounds, in query and display order.
    pub const ALL: [FilterField; 6] = [
        FilterField::DateStart,
        FilterField::DateEnd,
        FilterField::RevenueMin,
        FilterField::RevenueMax,
        FilterField::NetIncomeMin,
        FilterField::NetIncomeMax,
    ];

    /// Dotted name used as the query parameter key.
    pub fn key(self) -> &'static str {
        match self {
            FilterField::DateStart => "dateRange.start",
            FilterField::DateEnd => "dateRange.end",
            FilterField::RevenueMin => "revenue.min",
            FilterField::RevenueMax => "revenue.max",
            FilterField::NetIncomeMin => "netIncome.min",
            FilterField::NetIncomeMax => "netIncome.max",
        }
    }

    /// Position of the bound in [`FilterField::ALL`].
    pub fn index(self) -> usize {
        match self {
            FilterField::DateStart => 0,
            FilterField::DateEnd => 1,
            FilterField::RevenueMin => 2,
            FilterField::RevenueMax => 3,
            FilterField::NetIncomeMin => 4,
            FilterField::NetIncomeMax => 5,
        }
    }

    /// Next bound, wrapping from the last to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous bound, wrapping from the first to the last.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl FromStr for FilterField {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| FilterError::UnknownField(s.to_string()))
    }
}

/// Resolved value of a bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundValue {
    /// A concrete number
    Finite(f64),
    /// No upper limit
    Unbounded,
}

impl fmt::Display for BoundValue {
    /// Query representation: numbers in shortest form, unbounded as `Infinity`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BoundValue::Unbounded => f.write_str("Infinity"),
            BoundValue::Finite(v) if v == f64::INFINITY => f.write_str("Infinity"),
            BoundValue::Finite(v) if v == f64::NEG_INFINITY => f.write_str("-Infinity"),
            BoundValue::Finite(v) => write!(f, "{}", v),
        }
    }
}

/// A pair of optional bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Range {
    /// Start year or minimum amount
    pub lower: Option<f64>,
    /// End year or maximum amount
    pub upper: Option<f64>,
}

/// Result of interpreting one raw input string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputValue {
    /// Empty input: the bound goes back to its default
    Reset,
    /// A parsed number
    Value(f64),
}

/// Interpret a raw input string.
///
/// # Returns
/// * `Option<InputValue>` - `None` when the text is neither empty nor a number
pub fn parse_input(raw: &str) -> Option<InputValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(InputValue::Reset);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if !v.is_nan() => Some(InputValue::Value(v)),
        _ => None,
    }
}

/// Current filter bounds.
///
/// Values are replaced, never edited in place: every change produces a new
/// `FilterState` through [`FilterState::with_bound`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Year range (`dateRange.start` / `dateRange.end`)
    pub date_range: Range,
    /// Revenue range (`revenue.min` / `revenue.max`)
    pub revenue: Range,
    /// Net income range (`netIncome.min` / `netIncome.max`)
    pub net_income: Range,
    /// Default end year
    current_year: i32,
}

impl FilterState {
    /// Create a filter state with every bound unset.
    ///
    /// # Arguments
    /// * `current_year` - Year used as the default end of the date range
    pub fn new(current_year: i32) -> Self {
        Self {
            date_range: Range::default(),
            revenue: Range::default(),
            net_income: Range::default(),
            current_year,
        }
    }

    /// Create a filter state whose default end year is the local current year.
    pub fn for_current_year() -> Self {
        Self::new(chrono::Local::now().year())
    }

    fn range(&self, field: FilterField) -> &Range {
        match field {
            FilterField::DateStart | FilterField::DateEnd => &self.date_range,
            FilterField::RevenueMin | FilterField::RevenueMax => &self.revenue,
            FilterField::NetIncomeMin | FilterField::NetIncomeMax => &self.net_income,
        }
    }

    fn range_mut(&mut self, field: FilterField) -> &mut Range {
        match field {
            FilterField::DateStart | FilterField::DateEnd => &mut self.date_range,
            FilterField::RevenueMin | FilterField::RevenueMax => &mut self.revenue,
            FilterField::NetIncomeMin | FilterField::NetIncomeMax => &mut self.net_income,
        }
    }

    fn is_lower(field: FilterField) -> bool {
        matches!(
            field,
            FilterField::DateStart | FilterField::RevenueMin | FilterField::NetIncomeMin
        )
    }

    /// The value the user set for a bound, if any.
    pub fn raw(&self, field: FilterField) -> Option<f64> {
        let range = self.range(field);
        if Self::is_lower(field) {
            range.lower
        } else {
            range.upper
        }
    }

    /// Value a bound takes while unset.
    pub fn default_for(&self, field: FilterField) -> BoundValue {
        match field {
            FilterField::DateStart => BoundValue::Finite(DEFAULT_START_YEAR),
            FilterField::DateEnd => BoundValue::Finite(f64::from(self.current_year)),
            FilterField::RevenueMin | FilterField::NetIncomeMin => {
                BoundValue::Finite(DEFAULT_MIN_AMOUNT)
            }
            FilterField::RevenueMax | FilterField::NetIncomeMax => BoundValue::Unbounded,
        }
    }

    /// Resolved value of a bound: the user's value, or the default.
    pub fn bound(&self, field: FilterField) -> BoundValue {
        self.raw(field)
            .map(BoundValue::Finite)
            .unwrap_or_else(|| self.default_for(field))
    }

    /// Return a copy with one bound replaced (`None` unsets it).
    pub fn with_bound(&self, field: FilterField, value: Option<f64>) -> Self {
        let mut next = self.clone();
        let range = next.range_mut(field);
        if Self::is_lower(field) {
            range.lower = value;
        } else {
            range.upper = value;
        }
        next
    }

    /// Derive the state that results from typing `raw` into a bound's input.
    ///
    /// # Returns
    /// * `Option<FilterState>` - New state, or `None` if the input is discarded
    ///
    /// # Details
    /// Empty input resets the bound, a number replaces it, anything else is
    /// ignored.
    pub fn apply_input(&self, field: FilterField, raw: &str) -> Option<Self> {
        match parse_input(raw)? {
            InputValue::Reset => Some(self.with_bound(field, None)),
            InputValue::Value(v) => Some(self.with_bound(field, Some(v))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> FilterState {
        FilterState::new(2026)
    }

    fn change(filters: &FilterState, name: &str, raw: &str) -> Option<FilterState> {
        filters.apply_input(name.parse().unwrap(), raw)
    }

    #[test]
    fn test_defaults() {
        let filters = state();
        assert_eq!(
            filters.bound(FilterField::DateStart),
            BoundValue::Finite(1600.0)
        );
        assert_eq!(
            filters.bound(FilterField::DateEnd),
            BoundValue::Finite(2026.0)
        );
        assert_eq!(
            filters.bound(FilterField::RevenueMin),
            BoundValue::Finite(0.0)
        );
        assert_eq!(filters.bound(FilterField::RevenueMax), BoundValue::Unbounded);
        assert_eq!(
            filters.bound(FilterField::NetIncomeMin),
            BoundValue::Finite(0.0)
        );
        assert_eq!(
            filters.bound(FilterField::NetIncomeMax),
            BoundValue::Unbounded
        );
    }

    #[test]
    fn test_numeric_input_sets_bound() {
        for raw in ["50", "1.5", "-20", "1e6", " 42 "] {
            let next = change(&state(), "revenue.min", raw).unwrap();
            let expected: f64 = raw.trim().parse().unwrap();
            assert_eq!(next.raw(FilterField::RevenueMin), Some(expected));
            assert_eq!(
                next.bound(FilterField::RevenueMin),
                BoundValue::Finite(expected)
            );
        }
    }

    #[test]
    fn test_empty_input_resets_to_default() {
        let set = change(&state(), "dateRange.start", "1990").unwrap();
        assert_eq!(set.bound(FilterField::DateStart), BoundValue::Finite(1990.0));

        let reset = change(&set, "dateRange.start", "").unwrap();
        assert_eq!(reset.raw(FilterField::DateStart), None);
        assert_eq!(
            reset.bound(FilterField::DateStart),
            BoundValue::Finite(1600.0)
        );

        let max = change(&state(), "netIncome.max", "10").unwrap();
        let max = change(&max, "netIncome.max", "").unwrap();
        assert_eq!(max.bound(FilterField::NetIncomeMax), BoundValue::Unbounded);
    }

    #[test]
    fn test_non_numeric_input_is_discarded() {
        let filters = state();
        assert_eq!(change(&filters, "revenue.max", "abc"), None);
        assert_eq!(change(&filters, "revenue.max", "NaN"), None);
        assert_eq!(change(&filters, "revenue.max", "-"), None);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert_eq!(
            "profit.min".parse::<FilterField>(),
            Err(FilterError::UnknownField("profit.min".to_string()))
        );
        assert!("revenue".parse::<FilterField>().is_err());
    }

    #[test]
    fn test_with_bound_leaves_original_untouched() {
        let original = state();
        let next = original.with_bound(FilterField::RevenueMax, Some(500.0));
        assert_eq!(original.raw(FilterField::RevenueMax), None);
        assert_eq!(next.raw(FilterField::RevenueMax), Some(500.0));
        assert_eq!(next.revenue.lower, None);
    }

    #[test]
    fn test_explicit_zero_is_distinct_from_unset() {
        let next = change(&state(), "revenue.min", "0").unwrap();
        assert_eq!(next.raw(FilterField::RevenueMin), Some(0.0));
        assert_ne!(next, state());
    }

    #[test]
    fn test_bound_value_display() {
        assert_eq!(BoundValue::Unbounded.to_string(), "Infinity");
        assert_eq!(BoundValue::Finite(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(BoundValue::Finite(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(BoundValue::Finite(50.0).to_string(), "50");
        assert_eq!(BoundValue::Finite(1.5).to_string(), "1.5");
        assert_eq!(BoundValue::Finite(-3.0).to_string(), "-3");
    }

    #[test]
    fn test_field_navigation_wraps() {
        assert_eq!(FilterField::DateStart.next(), FilterField::DateEnd);
        assert_eq!(FilterField::NetIncomeMax.next(), FilterField::DateStart);
        assert_eq!(FilterField::DateStart.prev(), FilterField::NetIncomeMax);
        for field in FilterField::ALL {
            assert_eq!(field.key().parse::<FilterField>(), Ok(field));
        }
    }
}
