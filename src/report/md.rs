use crate::types::principle::DimensionId;
use crate::types::report::ReportData;
use chrono::NaiveDate;

pub fn to_markdown(report: &ReportData, created: NaiveDate) -> String {
    let mut output = String::new();
    output.push_str("# ESAI Report\n\n");
    output.push_str(&format!("Created: {}\n\n", created.format("%Y-%m-%d")));
    output.push_str(&format!("Total score: {:.2}\n\n", report.total));

    output.push_str("## Weights\n\n");
    let keys = DimensionId::ALL.map(DimensionId::key);
    output.push_str(&format!("| {} |\n", keys.join(" | ")));
    output.push_str(&format!("|{}\n", "---|".repeat(keys.len())));
    let weights = keys
        .iter()
        .map(|key| format!("{:.2}", weight(report, key)))
        .collect::<Vec<_>>();
    output.push_str(&format!("| {} |\n\n", weights.join(" | ")));

    output.push_str("## Dimension Scores\n\n");
    output.push_str("| Dimension | Name | Weight | Score |\n|---|---|---|---|\n");
    for dimension in DimensionId::ALL {
        output.push_str(&format!(
            "| {} | {} | {:.2} | {:.2} |\n",
            dimension.key(),
            dimension.name(),
            weight(report, dimension.key()),
            report.dimensions.get(dimension.key()).copied().unwrap_or(0.0)
        ));
    }
    output.push('\n');

    output.push_str("## Principles\n\n");
    output.push_str("| No. | Principle | Dimension | Result | Score | Weighted score |\n");
    output.push_str("|---|---|---|---|---|---|\n");
    for (number, principle) in &report.principles {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {:.2} | {:.2} |\n",
            number,
            escape_cell(&principle.title),
            principle.dimension,
            escape_cell(&principle.display_text),
            principle.raw_score,
            principle.raw_score * weight(report, &principle.dimension)
        ));
    }

    output
}

fn weight(report: &ReportData, key: &str) -> f64 {
    report.weights.get(key).copied().unwrap_or(0.0)
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
