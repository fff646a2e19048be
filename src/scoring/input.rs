use crate::error::{EsaiError, InputIssue, Result};
use crate::scoring::formulas::ChoiceOption;
use crate::types::principle::PrincipleId;
use tracing::warn;

/// A numeric field after boundary checks. `value` is always finite and
/// non-negative; `issue` records what was recovered, if anything.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNumber {
    pub value: f64,
    pub issue: Option<InputIssue>,
}

/// Parse user text for a numeric principle. Empty text means 0; text that is
/// not a finite number also becomes 0; negative numbers are reset to 0.
pub fn parse_numeric(principle: PrincipleId, text: &str) -> ParsedNumber {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParsedNumber {
            value: 0.0,
            issue: None,
        };
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => check_numeric(principle, value),
        _ => {
            warn!(principle = principle.get(), text = trimmed, "non-numeric input treated as 0");
            ParsedNumber {
                value: 0.0,
                issue: Some(InputIssue::InvalidNumeric {
                    principle: principle.get(),
                    text: trimmed.to_string(),
                }),
            }
        }
    }
}

/// Apply the same checks to a value that arrived already typed.
pub fn check_numeric(principle: PrincipleId, value: f64) -> ParsedNumber {
    if !value.is_finite() {
        return ParsedNumber {
            value: 0.0,
            issue: Some(InputIssue::InvalidNumeric {
                principle: principle.get(),
                text: value.to_string(),
            }),
        };
    }
    if value < 0.0 {
        warn!(principle = principle.get(), value, "negative input reset to 0");
        return ParsedNumber {
            value: 0.0,
            issue: Some(InputIssue::NegativeValue {
                principle: principle.get(),
                value,
            }),
        };
    }
    ParsedNumber { value, issue: None }
}

/// Find an option by key (case-insensitive) or by its exact label.
pub fn find_option(principle: u8, options: &[ChoiceOption], key: &str) -> Result<usize> {
    let wanted = key.trim();
    options
        .iter()
        .position(|option| option.key.eq_ignore_ascii_case(wanted) || option.label == wanted)
        .ok_or_else(|| EsaiError::UnknownOption {
            principle,
            key: wanted.to_string(),
        })
}
