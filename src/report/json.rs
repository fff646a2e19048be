use crate::types::report::ReportData;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    created: NaiveDate,
    #[serde(flatten)]
    report: &'a ReportData,
}

pub fn to_json(report: &ReportData, created: NaiveDate) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport { created, report })
}
