//! Report generation pipeline.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tally_shared::types::{format_amount, percentage_of};
use tracing::{debug, info};

use super::error::ReportError;
use super::mapping::DisplayMapping;
use super::source::{ReportContext, ReportDataSource};
use super::template::ReportTemplate;
use super::types::{DisplayRow, Report, ReportMapEntry};
use crate::forest::{AccountForest, AccountTreeNode, ChartEntry, LineItem};
use crate::period::DateRange;

/// Rounding applied to derived figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Decimal places kept on percentages.
    pub percentage_scale: u32,
    /// Decimal places kept on ratios.
    pub ratio_scale: u32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            percentage_scale: 2,
            ratio_scale: 4,
        }
    }
}

/// Builds a forest from a chart and routes line items into it.
///
/// Items dated outside `range` are dropped. The forest is not rolled up.
#[must_use]
pub fn aggregate_forest(chart: Vec<ChartEntry>, items: &[LineItem], range: DateRange) -> AccountForest {
    let mut forest = AccountForest::from_chart(chart);
    let mut routed = 0usize;
    let mut outside = 0usize;
    for item in items {
        if !range.contains(item.date) {
            outside += 1;
            continue;
        }
        if forest.add_data(item) {
            routed += 1;
        }
    }
    debug!(
        accounts = forest.len(),
        routed,
        outside,
        skipped = items.len() - routed - outside,
        "line items aggregated"
    );
    forest
}

/// Fetches the inputs for one window and returns the rolled-up forest.
///
/// # Errors
///
/// Returns `ReportError::DataSource` if either fetch fails.
pub async fn fetch_forest<S: ReportDataSource>(
    source: &S,
    context: &ReportContext,
    range: DateRange,
) -> Result<AccountForest, ReportError> {
    let (items, chart) = tokio::try_join!(
        source.fetch_line_items(context.company_id, range),
        source.fetch_chart_of_accounts(context.company_id, &context.accounting_standard),
    )?;
    let mut forest = aggregate_forest(chart, &items, range);
    forest.roll_up();
    Ok(forest)
}

/// Statement generator over a data source and a template.
pub struct ReportGenerator<S: ReportDataSource, T: ReportTemplate> {
    source: Arc<S>,
    template: T,
    context: ReportContext,
    options: ReportOptions,
}

impl<S: ReportDataSource, T: ReportTemplate> ReportGenerator<S, T> {
    /// Create a new generator.
    #[must_use]
    pub fn new(source: Arc<S>, template: T, context: ReportContext) -> Self {
        Self {
            source,
            template,
            context,
            options: ReportOptions::default(),
        }
    }

    /// Overrides rounding options.
    #[must_use]
    pub fn with_options(mut self, options: ReportOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the rolled-up account tree of the current (`true`) or
    /// comparative (`false`) period, after template post-processing.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is invalid or a fetch fails.
    pub async fn generate_financial_report_tree(
        &self,
        cur_period: bool,
    ) -> Result<Vec<AccountTreeNode>, ReportError> {
        let range = self.context.period.window(cur_period)?;
        let mut forest = fetch_forest(self.source.as_ref(), &self.context, range).await?;
        self.template.post_process(&mut forest);
        Ok(forest.to_tree())
    }

    /// Flattens the period tree into a code-keyed map with percentages of
    /// the template's base account.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is invalid or a fetch fails.
    pub async fn generate_financial_report_map(
        &self,
        cur_period: bool,
    ) -> Result<BTreeMap<String, ReportMapEntry>, ReportError> {
        let tree = self.generate_financial_report_tree(cur_period).await?;
        Ok(report_map(
            &tree,
            self.template.base_code(),
            self.options.percentage_scale,
        ))
    }

    /// Lays both periods out along the template's mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if a window is invalid or a fetch fails.
    pub async fn generate_financial_report_array(&self) -> Result<Vec<DisplayRow>, ReportError> {
        let (current, previous) = tokio::try_join!(
            self.generate_financial_report_map(true),
            self.generate_financial_report_map(false),
        )?;
        Ok(display_rows(self.template.mapping(), &current, &previous))
    }

    /// Report-specific metrics over finished rows.
    pub fn generate_other_info(&self, rows: &[DisplayRow]) -> T::OtherInfo {
        self.template.other_info(rows, self.options.ratio_scale)
    }

    /// Runs the whole pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if a window is invalid or a fetch fails.
    pub async fn generate_report(&self) -> Result<Report<T::OtherInfo>, ReportError> {
        info!(
            report_type = self.template.report_type(),
            company_id = %self.context.company_id,
            start = %self.context.period.start,
            end = %self.context.period.end,
            "generating report"
        );
        let content = self.generate_financial_report_array().await?;
        let other_info = self.generate_other_info(&content);
        info!(rows = content.len(), "report generated");
        Ok(Report {
            report_type: self.template.report_type().to_string(),
            content,
            other_info,
        })
    }
}

/// Flattens trees into a code-keyed map.
///
/// Percentages are relative to the amount of `base_code`; a missing or zero
/// base yields zero percentages.
#[must_use]
pub fn report_map(
    roots: &[AccountTreeNode],
    base_code: Option<&str>,
    scale: u32,
) -> BTreeMap<String, ReportMapEntry> {
    let mut map = BTreeMap::new();
    for root in roots {
        root.walk(&mut |node, depth| {
            map.entry(node.code.clone()).or_insert_with(|| ReportMapEntry {
                code: node.code.clone(),
                name: node.name.clone(),
                normal_balance: node.normal_balance,
                amount: node.amount,
                depth,
                percentage: Decimal::ZERO,
            });
        });
    }

    let base = base_code
        .and_then(|code| map.get(code))
        .map_or(Decimal::ZERO, |entry| entry.amount);
    for entry in map.values_mut() {
        entry.percentage = percentage_of(entry.amount, base, scale);
    }
    map
}

/// Joins both period maps along a mapping; absent codes become zero rows.
#[must_use]
pub fn display_rows(
    mapping: &DisplayMapping,
    current: &BTreeMap<String, ReportMapEntry>,
    previous: &BTreeMap<String, ReportMapEntry>,
) -> Vec<DisplayRow> {
    mapping
        .lines()
        .iter()
        .map(|line| {
            let cur = current.get(&line.code);
            let pre = previous.get(&line.code);
            let name = line
                .name
                .clone()
                .or_else(|| cur.or(pre).map(|entry| entry.name.clone()))
                .unwrap_or_else(|| line.code.clone());
            let cur_amount = cur.map_or(Decimal::ZERO, |entry| entry.amount);
            let pre_amount = pre.map_or(Decimal::ZERO, |entry| entry.amount);
            DisplayRow {
                code: line.code.clone(),
                name,
                cur_period_amount: cur_amount,
                cur_period_amount_string: format_amount(cur_amount),
                cur_period_percentage: cur.map_or(Decimal::ZERO, |entry| entry.percentage),
                pre_period_amount: pre_amount,
                pre_period_amount_string: format_amount(pre_amount),
                pre_period_percentage: pre.map_or(Decimal::ZERO, |entry| entry.percentage),
                indent: line.indent,
            }
        })
        .collect()
}
