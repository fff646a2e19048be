//! Applies a loaded assessment to a fresh calculator.

use crate::color::ColorScale;
use crate::error::{EsaiError, InputIssue, Result};
use crate::scoring::formulas::{self, Formula, PREPARATION_AUTOMATION, PREPARATION_STEPS};
use crate::scoring::input::find_option;
use crate::scoring::{ScoreCalculator, WeightVector};
use crate::types::config::{EsaiConfig, InputValue, WeightSetting};
use crate::types::principle::PrincipleId;
use thiserror::Error;
use tracing::{info, warn};

/// Non-fatal conditions met while applying an assessment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Notice {
    #[error(transparent)]
    Input(#[from] InputIssue),

    #[error("principle 8: {missing} not selected, principle left at its default")]
    IncompleteStepsAndAutomation { missing: &'static str },
}

#[derive(Debug)]
pub struct Assessment {
    pub calculator: ScoreCalculator,
    pub scale: ColorScale,
    pub notices: Vec<Notice>,
    /// Set when requested weights were rejected; the calculator kept the
    /// previous vector.
    pub weight_error: Option<EsaiError>,
}

impl Assessment {
    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }
}

/// Build a calculator from `config`. Weight settings from the file are
/// applied first, then `weight_override`.
pub fn apply(config: &EsaiConfig, weight_override: Option<&WeightSetting>) -> Result<Assessment> {
    let scale = config.color_scale()?;
    let mut calculator = ScoreCalculator::default();
    let mut notices = Vec::new();

    for (id, value) in config.principle_inputs()? {
        apply_input(&mut calculator, id, value, &mut notices)?;
    }

    let mut weight_error = None;
    for setting in config.weight_setting().iter().chain(weight_override) {
        if let Err(err) = apply_weights(&mut calculator, setting) {
            warn!(error = %err, "requested weights rejected");
            weight_error = Some(err);
        }
    }

    info!(
        total = calculator.total_score(),
        notices = notices.len(),
        "assessment scored"
    );
    Ok(Assessment {
        calculator,
        scale,
        notices,
        weight_error,
    })
}

pub fn apply_weights(calculator: &mut ScoreCalculator, setting: &WeightSetting) -> Result<()> {
    match setting {
        WeightSetting::Preset(number) => calculator.apply_preset(*number),
        WeightSetting::Manual(fields) => {
            let fields = fields.iter().map(String::as_str).collect::<Vec<_>>();
            calculator.set_weight_vector(WeightVector::parse_manual(&fields)?);
            Ok(())
        }
    }
}

fn apply_input(
    calculator: &mut ScoreCalculator,
    id: PrincipleId,
    value: &InputValue,
    notices: &mut Vec<Notice>,
) -> Result<()> {
    let formula = formulas::spec(id).formula;
    match (formula, value) {
        (Formula::Choice(options), InputValue::Text(key)) => {
            let index = find_option(id.get(), options, key)?;
            calculator.select_option(id, index)
        }
        (Formula::Numeric(_), InputValue::Text(text)) => {
            if let Some(issue) = calculator.enter_numeric(id, text)? {
                notices.push(issue.into());
            }
            Ok(())
        }
        (Formula::Numeric(_), InputValue::Number(number)) => {
            if let Some(issue) = calculator.enter_value(id, *number)? {
                notices.push(issue.into());
            }
            Ok(())
        }
        (
            Formula::StepsAndAutomation,
            InputValue::StepsAndAutomation { steps, automation },
        ) => {
            if let Some(key) = steps {
                calculator.select_steps(find_option(id.get(), PREPARATION_STEPS, key)?)?;
            }
            if let Some(key) = automation {
                calculator.select_automation(find_option(id.get(), PREPARATION_AUTOMATION, key)?)?;
            }
            match (steps, automation) {
                (Some(_), Some(_)) => {}
                (None, _) => notices.push(Notice::IncompleteStepsAndAutomation { missing: "steps" }),
                (_, None) => notices.push(Notice::IncompleteStepsAndAutomation {
                    missing: "automation",
                }),
            }
            Ok(())
        }
        (formula, _) => Err(EsaiError::WrongInputKind {
            principle: id.get(),
            expected: formula.kind(),
        }),
    }
}
