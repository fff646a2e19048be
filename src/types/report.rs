use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrincipleReport {
    pub title: String,
    pub dimension: String,
    pub raw_score: f64,
    pub color_value: f64,
    pub display_text: String,
}

/// Everything a report renderer needs. Scores are already rounded to two
/// decimals so every output shows the same figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub principles: BTreeMap<u8, PrincipleReport>,
    pub dimensions: BTreeMap<String, f64>,
    pub total: f64,
    pub weights: BTreeMap<String, f64>,
}
