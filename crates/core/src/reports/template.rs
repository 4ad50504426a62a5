//! Report templates plugged into the generator.

use serde::Serialize;

use super::mapping::DisplayMapping;
use super::types::DisplayRow;
use crate::forest::AccountForest;

/// What distinguishes one statement from another.
pub trait ReportTemplate: Send + Sync {
    /// Derived metrics returned next to the statement lines.
    type OtherInfo: Serialize + Send;

    /// Report type identifier.
    fn report_type(&self) -> &'static str;

    /// Code of the account whose amount is the 100% base for percentages.
    fn base_code(&self) -> Option<&str>;

    /// Statement layout.
    fn mapping(&self) -> &DisplayMapping;

    /// Adjusts the rolled-up forest before it is serialized.
    fn post_process(&self, _forest: &mut AccountForest) {}

    /// Computes report-specific metrics from the finished lines.
    fn other_info(&self, rows: &[DisplayRow], ratio_scale: u32) -> Self::OtherInfo;
}

/// A template without derived metrics.
#[derive(Debug, Clone)]
pub struct GenericTemplate {
    report_type: &'static str,
    base_code: Option<String>,
    mapping: DisplayMapping,
}

impl GenericTemplate {
    /// Creates a generic template.
    #[must_use]
    pub fn new(report_type: &'static str, base_code: Option<String>, mapping: DisplayMapping) -> Self {
        Self {
            report_type,
            base_code,
            mapping,
        }
    }
}

impl ReportTemplate for GenericTemplate {
    type OtherInfo = ();

    fn report_type(&self) -> &'static str {
        self.report_type
    }

    fn base_code(&self) -> Option<&str> {
        self.base_code.as_deref()
    }

    fn mapping(&self) -> &DisplayMapping {
        &self.mapping
    }

    fn other_info(&self, _rows: &[DisplayRow], _ratio_scale: u32) -> Self::OtherInfo {}
}
