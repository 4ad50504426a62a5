//! Multi-key ordering of trial balance rows.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::TrialBalanceRow;

/// Errors raised when parsing a sort option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortOptionError {
    /// The field is not a sortable trial balance column.
    #[error("Unknown sort field: {0}")]
    UnknownField(String),

    /// The direction is neither `asc` nor `desc`.
    #[error("Unknown sort direction: {0}")]
    UnknownDirection(String),
}

/// Sortable amount columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// `beginning_debit_amount`
    BeginningDebitAmount,
    /// `beginning_credit_amount`
    BeginningCreditAmount,
    /// `midterm_debit_amount`
    MidtermDebitAmount,
    /// `midterm_credit_amount`
    MidtermCreditAmount,
    /// `ending_debit_amount`
    EndingDebitAmount,
    /// `ending_credit_amount`
    EndingCreditAmount,
}

impl SortField {
    /// Reads the column from a row.
    #[must_use]
    pub const fn value(self, row: &TrialBalanceRow) -> Decimal {
        match self {
            Self::BeginningDebitAmount => row.beginning_debit_amount,
            Self::BeginningCreditAmount => row.beginning_credit_amount,
            Self::MidtermDebitAmount => row.midterm_debit_amount,
            Self::MidtermCreditAmount => row.midterm_credit_amount,
            Self::EndingDebitAmount => row.ending_debit_amount,
            Self::EndingCreditAmount => row.ending_credit_amount,
        }
    }
}

impl FromStr for SortField {
    type Err = SortOptionError;

    /// Accepts snake_case and camelCase column names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "beginningdebitamount" => Ok(Self::BeginningDebitAmount),
            "beginningcreditamount" => Ok(Self::BeginningCreditAmount),
            "midtermdebitamount" => Ok(Self::MidtermDebitAmount),
            "midtermcreditamount" => Ok(Self::MidtermCreditAmount),
            "endingdebitamount" => Ok(Self::EndingDebitAmount),
            "endingcreditamount" => Ok(Self::EndingCreditAmount),
            _ => Err(SortOptionError::UnknownField(s.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascend" | "ascending" => Ok(Self::Asc),
            "desc" | "descend" | "descending" => Ok(Self::Desc),
            _ => Err(SortOptionError::UnknownDirection(s.to_string())),
        }
    }
}

/// One key of a prioritized sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    /// Column compared.
    pub field: SortField,
    /// Direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortOption {
    /// Ascending key.
    #[must_use]
    pub const fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    /// Descending key.
    #[must_use]
    pub const fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for SortOption {
    type Err = SortOptionError;

    /// Parses `field` or `field:direction`, e.g. `ending_debit_amount:desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => (field, direction.parse()?),
            None => (s, SortDirection::Asc),
        };
        Ok(Self {
            field: field.parse()?,
            direction,
        })
    }
}

/// Compares two rows by `options` in priority order.
///
/// The first key that differs decides. With no keys, rows compare by title.
#[must_use]
pub fn compare_rows(a: &TrialBalanceRow, b: &TrialBalanceRow, options: &[SortOption]) -> Ordering {
    if options.is_empty() {
        return a.accounting_title.cmp(&b.accounting_title);
    }
    options
        .iter()
        .map(|option| {
            option
                .direction
                .apply(option.field.value(a).cmp(&option.field.value(b)))
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Sorts rows in place and recurses into every level of sub-accounts.
///
/// The sort is stable: rows that tie on every key keep their relative order.
pub fn sort_trial_balance(rows: &mut [TrialBalanceRow], options: &[SortOption]) {
    rows.sort_by(|a, b| compare_rows(a, b, options));
    for row in rows.iter_mut() {
        sort_trial_balance(&mut row.sub_accounts, options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ending_debit_amount", SortOption::asc(SortField::EndingDebitAmount))]
    #[case("endingDebitAmount:desc", SortOption::desc(SortField::EndingDebitAmount))]
    #[case("beginning_credit_amount:ASC", SortOption::asc(SortField::BeginningCreditAmount))]
    #[case(" midtermCreditAmount :descending", SortOption::desc(SortField::MidtermCreditAmount))]
    fn test_parse_sort_option(#[case] input: &str, #[case] expected: SortOption) {
        assert_eq!(input.parse::<SortOption>().unwrap(), expected);
    }

    #[rstest]
    #[case("amount", SortOptionError::UnknownField("amount".into()))]
    #[case("code", SortOptionError::UnknownField("code".into()))]
    #[case("ending_debit_amount:up", SortOptionError::UnknownDirection("up".into()))]
    fn test_parse_sort_option_errors(#[case] input: &str, #[case] expected: SortOptionError) {
        assert_eq!(input.parse::<SortOption>().unwrap_err(), expected);
    }

    #[test]
    fn test_parse_configured_sort_keys() {
        let keys = ["ending_debit_amount:desc", "midterm_credit_amount"];
        let options = keys
            .iter()
            .map(|raw| raw.parse::<SortOption>())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(
            options,
            vec![
                SortOption::desc(SortField::EndingDebitAmount),
                SortOption::asc(SortField::MidtermCreditAmount),
            ]
        );
    }

    #[test]
    fn test_sort_option_deserializes() {
        let option: SortOption =
            serde_json::from_str(r#"{"field": "midterm_debit_amount", "direction": "desc"}"#)
                .unwrap();
        assert_eq!(option, SortOption::desc(SortField::MidtermDebitAmount));

        let option: SortOption =
            serde_json::from_str(r#"{"field": "ending_credit_amount"}"#).unwrap();
        assert_eq!(option.direction, SortDirection::Asc);
    }
}
