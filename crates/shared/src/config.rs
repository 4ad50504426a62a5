//! Application configuration management.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::CompanyId;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Report configuration.
    pub report: ReportConfig,
    /// Input data configuration.
    pub data: DataConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Company whose book is reported on.
    pub company_id: CompanyId,
    /// Accounting standard used to select the chart of accounts.
    #[serde(default = "default_accounting_standard")]
    pub accounting_standard: String,
    /// First day of the reporting period.
    pub period_start: NaiveDate,
    /// Last day of the reporting period (inclusive).
    pub period_end: NaiveDate,
    /// Earliest date included in opening balances. `None` means the beginning of the book.
    #[serde(default)]
    pub opening_date: Option<NaiveDate>,
    /// Decimal places kept on percentages.
    #[serde(default = "default_percentage_scale")]
    pub percentage_scale: u32,
    /// Decimal places kept on ratios.
    #[serde(default = "default_ratio_scale")]
    pub ratio_scale: u32,
    /// Path to the income statement display mapping (JSON).
    pub mapping_path: Option<PathBuf>,
    /// Trial balance sort keys as `field:direction`, applied in order.
    #[serde(default)]
    pub trial_balance_sort: Vec<String>,
}

fn default_accounting_standard() -> String {
    "ifrs".to_string()
}

fn default_percentage_scale() -> u32 {
    2
}

fn default_ratio_scale() -> u32 {
    4
}

/// Input data configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Path to the line items file (JSON array).
    pub line_items_path: PathBuf,
    /// Path to the chart of accounts file (JSON array).
    pub chart_path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON formatted logs.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "tally=debug".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or misses required keys.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [report]
        company_id = "0190f5c2-6a4e-7c3b-9b1a-3f0d2b7e8a11"
        period_start = "2024-01-01"
        period_end = "2024-12-31"

        [data]
        line_items_path = "data/line_items.json"
        chart_path = "data/chart.json"
    "#;

    #[test]
    fn test_from_toml_applies_defaults() {
        let config = AppConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.report.accounting_standard, "ifrs");
        assert_eq!(config.report.percentage_scale, 2);
        assert_eq!(config.report.ratio_scale, 4);
        assert!(config.report.opening_date.is_none());
        assert!(config.report.mapping_path.is_none());
        assert!(config.report.trial_balance_sort.is_empty());
        assert_eq!(config.logging.filter, "tally=debug");
        assert!(!config.logging.json);
        assert_eq!(
            config.report.period_start,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_from_toml_reads_sort_keys() {
        let source = MINIMAL.replace(
            "period_end = \"2024-12-31\"",
            "period_end = \"2024-12-31\"\ntrial_balance_sort = [\"ending_debit_amount:desc\", \"midterm_credit_amount\"]",
        );
        let config = AppConfig::from_toml(&source).unwrap();
        assert_eq!(
            config.report.trial_balance_sort,
            vec!["ending_debit_amount:desc".to_string(), "midterm_credit_amount".to_string()]
        );
    }

    #[test]
    fn test_from_toml_missing_section_fails() {
        let result = AppConfig::from_toml("[report]\nperiod_start = \"2024-01-01\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_reads_environment() {
        temp_env::with_vars(
            [
                (
                    "TALLY__REPORT__COMPANY_ID",
                    Some("0190f5c2-6a4e-7c3b-9b1a-3f0d2b7e8a11"),
                ),
                ("TALLY__REPORT__PERIOD_START", Some("2024-04-01")),
                ("TALLY__REPORT__PERIOD_END", Some("2024-06-30")),
                ("TALLY__REPORT__ACCOUNTING_STANDARD", Some("gaap")),
                ("TALLY__DATA__LINE_ITEMS_PATH", Some("items.json")),
                ("TALLY__DATA__CHART_PATH", Some("chart.json")),
                ("RUN_MODE", Some("test-does-not-exist")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.report.accounting_standard, "gaap");
                assert_eq!(
                    config.report.period_end,
                    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
                );
                assert_eq!(config.data.chart_path, PathBuf::from("chart.json"));
            },
        );
    }
}
