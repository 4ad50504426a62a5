//! Trial balance generation service.

use chrono::NaiveDate;
use tracing::info;

use super::merge::{combine_account_forests, trial_balance_totals};
use super::types::TrialBalanceReport;
use crate::forest::AccountForest;
use crate::reports::{ReportContext, ReportDataSource, ReportError, fetch_forest};

/// Service for generating trial balances.
pub struct TrialBalanceService;

impl TrialBalanceService {
    /// Builds the trial balance of `context.period`.
    ///
    /// Balances carried in are computed over `opening_date` (or the beginning
    /// of the book) up to the day before the period; activity is computed over
    /// the period itself. Both forests are rolled up before merging.
    ///
    /// # Errors
    ///
    /// Returns an error if a window is invalid or a fetch fails.
    pub async fn generate<S: ReportDataSource>(
        source: &S,
        context: &ReportContext,
        opening_date: Option<NaiveDate>,
    ) -> Result<TrialBalanceReport, ReportError> {
        let beginning_window = context.period.beginning_window(opening_date)?;
        let midterm_window = context.period.current();

        let beginning = async {
            match beginning_window {
                Some(range) => fetch_forest(source, context, range).await,
                None => Ok(AccountForest::new()),
            }
        };
        let midterm = fetch_forest(source, context, midterm_window);
        let (beginning, midterm) = tokio::try_join!(beginning, midterm)?;

        let rows = combine_account_forests(&beginning.to_tree(), &midterm.to_tree());
        let totals = trial_balance_totals(&rows);
        info!(
            company_id = %context.company_id,
            rows = rows.len(),
            is_balanced = totals.is_balanced,
            "trial balance generated"
        );

        Ok(TrialBalanceReport {
            report_type: "trial_balance".to_string(),
            period: context.period,
            rows,
            totals,
        })
    }
}
