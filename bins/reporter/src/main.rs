//! Tally report runner
//!
//! Loads a book from JSON files, then prints its income statement and trial
//! balance as JSON on stdout.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::forest::{ChartEntry, LineItem};
use tally_core::period::ReportPeriod;
use tally_core::reports::{
    DisplayMapping, InMemorySource, IncomeStatement, ReportContext, ReportGenerator, ReportOptions,
};
use tally_core::trial_balance::{SortOption, TrialBalanceService, sort_trial_balance};
use tally_shared::{AppConfig, AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    // Logs go to stderr; stdout carries the reports
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter.clone().into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }

    let report = &config.report;
    let period = ReportPeriod::new(report.period_start, report.period_end)?;
    let context = ReportContext {
        company_id: report.company_id,
        accounting_standard: report.accounting_standard.clone(),
        period,
    };

    let line_items: Vec<LineItem> =
        read_json(&config.data.line_items_path).context("failed to load line items")?;
    let chart: Vec<ChartEntry> =
        read_json(&config.data.chart_path).context("failed to load chart of accounts")?;
    info!(
        line_items = line_items.len(),
        accounts = chart.len(),
        "book loaded"
    );
    let source = Arc::new(InMemorySource::new(report.company_id, line_items, chart));

    let template = match &report.mapping_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read mapping {}", path.display()))?;
            IncomeStatement::new(DisplayMapping::from_json(&raw)?)
        }
        None => IncomeStatement::default(),
    };
    let sort_options = report
        .trial_balance_sort
        .iter()
        .map(|raw| raw.parse::<SortOption>())
        .collect::<Result<Vec<_>, _>>()?;

    let generator = ReportGenerator::new(Arc::clone(&source), template, context.clone()).with_options(
        ReportOptions {
            percentage_scale: report.percentage_scale,
            ratio_scale: report.ratio_scale,
        },
    );
    let (income_statement, mut trial_balance) = tokio::try_join!(
        generator.generate_report(),
        TrialBalanceService::generate(source.as_ref(), &context, report.opening_date),
    )
    .map_err(AppError::from)?;
    sort_trial_balance(&mut trial_balance.rows, &sort_options);

    let output = serde_json::json!({
        "income_statement": income_statement,
        "trial_balance": trial_balance,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::NotFound(format!("{}: {e}", path.display())))?;
    Ok(serde_json::from_str(&raw)?)
}
