//! Data-source seam between the engine and the persistence layer.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tally_shared::types::CompanyId;

use super::error::ReportError;
use crate::forest::{ChartEntry, LineItem};
use crate::period::{DateRange, ReportPeriod};

/// Repository trait for report inputs.
///
/// This trait is implemented by the persistence layer. The engine only awaits
/// these two calls; everything after them is synchronous.
pub trait ReportDataSource: Send + Sync {
    /// Fetch all line items of `company` dated inside `range`.
    fn fetch_line_items(
        &self,
        company: CompanyId,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<LineItem>, ReportError>> + Send;

    /// Fetch the chart of accounts of `company` for an accounting standard.
    fn fetch_chart_of_accounts(
        &self,
        company: CompanyId,
        standard: &str,
    ) -> impl Future<Output = Result<Vec<ChartEntry>, ReportError>> + Send;
}

/// Who and what a report is computed for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportContext {
    /// Company whose book is read.
    pub company_id: CompanyId,
    /// Accounting standard selecting the chart of accounts.
    pub accounting_standard: String,
    /// Reporting period.
    pub period: ReportPeriod,
}

/// Data source over already-loaded records of a single company.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    company_id: CompanyId,
    line_items: Vec<LineItem>,
    chart: Vec<ChartEntry>,
}

impl InMemorySource {
    /// Creates a source serving `line_items` and `chart` for `company_id`.
    #[must_use]
    pub fn new(company_id: CompanyId, line_items: Vec<LineItem>, chart: Vec<ChartEntry>) -> Self {
        Self {
            company_id,
            line_items,
            chart,
        }
    }
}

impl ReportDataSource for InMemorySource {
    async fn fetch_line_items(
        &self,
        company: CompanyId,
        range: DateRange,
    ) -> Result<Vec<LineItem>, ReportError> {
        if company != self.company_id {
            return Ok(Vec::new());
        }
        Ok(self
            .line_items
            .iter()
            .filter(|item| range.contains(item.date))
            .cloned()
            .collect())
    }

    async fn fetch_chart_of_accounts(
        &self,
        company: CompanyId,
        _standard: &str,
    ) -> Result<Vec<ChartEntry>, ReportError> {
        if company != self.company_id {
            return Ok(Vec::new());
        }
        Ok(self.chart.clone())
    }
}
