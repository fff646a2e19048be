pub mod json;
pub mod md;
pub mod svg;

use crate::error::Result;
use crate::types::report::ReportData;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &ReportData, format: OutputFormat, created: NaiveDate) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(json::to_json(report, created)?),
        OutputFormat::Md => Ok(md::to_markdown(report, created)),
    }
}
