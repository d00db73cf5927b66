use serde::{Deserialize, Serialize};

use crate::core::{parse_iso_date, AppError, DateRange, Result};

/// The report variants the pipeline can produce. One parameterized
/// pipeline serves all of them; the kind only selects which feeds are
/// loaded and how rows are assembled and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Per-shop receipt count, revenue and quantity over one period
    Sales,
    /// Per-shop and write-off-type totals over one period
    Losses,
    /// Sales of two periods side by side with absolute/percent deltas
    Comparison,
    /// Loss rows ordered per shop with zero-activity rows filtered
    DetailedLosses,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Sales => "sales",
            ReportKind::Losses => "losses",
            ReportKind::Comparison => "comparison",
            ReportKind::DetailedLosses => "detailed_losses",
        }
    }

    /// Loss kinds cross-join against the global write-off type table.
    pub fn needs_loss_types(&self) -> bool {
        matches!(self, ReportKind::Losses | ReportKind::DetailedLosses)
    }
}

/// Row/summary dimensions a caller may group by. `Date` is accepted for
/// compatibility with the feed granularity but does not survive period
/// aggregation, so it is ignored by the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupDim {
    City,
    Shop,
    Type,
    Date,
}

/// Report request as received from the front end.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    pub kind: ReportKind,
    /// First day of the reporting period, `YYYY-MM-DD`
    pub start_date: String,
    /// Last day of the reporting period, inclusive
    pub end_date: String,
    /// Second period for `Comparison` reports
    #[serde(default)]
    pub second_start_date: Option<String>,
    #[serde(default)]
    pub second_end_date: Option<String>,
    /// City codes or display names; empty selects every configured city
    #[serde(default)]
    pub cities: Vec<String>,
    /// Summary roll-up dimensions
    #[serde(default)]
    pub group_by: Vec<GroupDim>,
    /// Write a pipe-delimited artifact into the reports directory
    #[serde(default)]
    pub export: bool,
    /// Drop the download cache before loading
    #[serde(default)]
    pub clear_cache: bool,
}

/// Request with dates parsed and the period(s) expanded.
#[derive(Debug, Clone)]
pub struct ReportPlan {
    pub kind: ReportKind,
    pub period: DateRange,
    pub period_label: String,
    /// Earlier period of a comparison run
    pub base_period: Option<DateRange>,
    pub cities: Vec<String>,
    pub group_by: Vec<GroupDim>,
    pub export: bool,
    pub clear_cache: bool,
}

impl ReportRequest {
    /// Parse and validate into an executable plan.
    ///
    /// Date format errors are rejected; a reversed range is not — it
    /// expands to an empty period and the report degrades to all-zero rows.
    pub fn into_plan(self) -> Result<ReportPlan> {
        let start = parse_iso_date(&self.start_date)?;
        let end = parse_iso_date(&self.end_date)?;

        let base_period = match self.kind {
            ReportKind::Comparison => {
                let (second_start, second_end) =
                    match (&self.second_start_date, &self.second_end_date) {
                        (Some(start), Some(end)) => (start, end),
                        _ => {
                            return Err(AppError::validation(
                                "Comparison reports need second_start_date and second_end_date",
                            ))
                        }
                    };
                Some(DateRange::new(
                    parse_iso_date(second_start)?,
                    parse_iso_date(second_end)?,
                ))
            }
            _ => None,
        };

        Ok(ReportPlan {
            kind: self.kind,
            period: DateRange::new(start, end),
            period_label: format!("{}_{}", self.start_date.trim(), self.end_date.trim()),
            base_period,
            cities: self.cities,
            group_by: self.group_by,
            export: self.export,
            clear_cache: self.clear_cache,
        })
    }
}
