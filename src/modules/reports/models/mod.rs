pub mod measure;
pub mod report;
pub mod request;

pub use measure::{percent_change, AggregateMeasure, MeasureChange, PeriodComparison};
pub use report::{GroupRollup, LeaderboardEntry, ReportOutput, ReportRow, SummaryStats};
pub use request::{GroupDim, ReportKind, ReportPlan, ReportRequest};
