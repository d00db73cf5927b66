pub mod controllers;
pub mod models;
pub mod services;

pub use models::{ReportKind, ReportOutput, ReportRequest, ReportRow, SummaryStats};
pub use services::ReportService;
