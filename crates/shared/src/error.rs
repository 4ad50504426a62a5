//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// The engine itself fails soft on missing data; these variants cover the
/// boundaries around it (configuration, fixture loading, upstream fetches).
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream data source failed.
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for presentation layers.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::DataSource(_) => "DATA_SOURCE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if retrying the same request could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::DataSource(_))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::Configuration(String::new()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(
            AppError::DataSource(String::new()).error_code(),
            "DATA_SOURCE_ERROR"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("msg".into()).to_string(),
            "Not found: msg"
        );
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::Configuration("msg".into()).to_string(),
            "Configuration error: msg"
        );
        assert_eq!(
            AppError::DataSource("msg".into()).to_string(),
            "Data source error: msg"
        );
        assert_eq!(
            AppError::Internal("msg".into()).to_string(),
            "Internal error: msg"
        );
    }

    #[test]
    fn test_only_data_source_is_transient() {
        assert!(AppError::DataSource("timeout".into()).is_transient());
        assert!(!AppError::Validation("bad".into()).is_transient());
        assert!(!AppError::Internal("bug".into()).is_transient());
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }
}
