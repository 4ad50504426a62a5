//! Report error types.

use tally_shared::AppError;
use thiserror::Error;

use crate::period::PeriodError;

/// Errors that can occur during report generation.
///
/// Missing accounts and empty data are not errors; they degrade to zero rows.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The upstream data source failed.
    #[error("Data source error: {0}")]
    DataSource(String),

    /// The reporting window is invalid.
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// The display mapping could not be parsed.
    #[error("Invalid display mapping: {0}")]
    Mapping(String),
}

impl ReportError {
    /// Wraps any upstream failure as a data source error.
    pub fn data_source(err: impl std::fmt::Display) -> Self {
        Self::DataSource(err.to_string())
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::DataSource(message) => Self::DataSource(message),
            ReportError::Period(err) => Self::Validation(err.to_string()),
            ReportError::Mapping(message) => Self::Configuration(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_into_app_error() {
        let err: AppError = ReportError::data_source("connection reset").into();
        assert_eq!(err.error_code(), "DATA_SOURCE_ERROR");
        assert!(err.is_transient());

        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err: AppError = ReportError::from(PeriodError::OutOfRange(day)).into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(!err.is_transient());

        let err: AppError = ReportError::Mapping("expected array".into()).into();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
