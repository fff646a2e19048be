use crate::error::{EsaiError, InputIssue, Result};
use crate::scoring::formulas::{self, round2, PREPARATION_AUTOMATION, PREPARATION_STEPS};
use crate::scoring::input::{check_numeric, parse_numeric, ParsedNumber};
use crate::scoring::weights::WeightVector;
use crate::types::principle::{DimensionId, PrincipleId, PrincipleState, PRINCIPLE_COUNT};
use crate::types::report::{PrincipleReport, ReportData};
use crate::types::scoring::ScoreCard;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Pending sub-selections for principle 8. The principle only changes once
/// both halves have been chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct StepsAndAutomation {
    steps: Option<usize>,
    automation: Option<usize>,
}

/// Owns the state of all 27 principles and the weight vector. Every
/// mutation validates first and only then writes.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    principles: Vec<PrincipleState>,
    weights: WeightVector,
    steps_and_automation: StepsAndAutomation,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new(WeightVector::default())
    }
}

impl ScoreCalculator {
    pub fn new(weights: WeightVector) -> Self {
        Self {
            principles: PrincipleId::all().map(formulas::default_state).collect(),
            weights,
            steps_and_automation: StepsAndAutomation::default(),
        }
    }

    pub fn set_principle(
        &mut self,
        id: PrincipleId,
        raw_score: f64,
        color_value: f64,
        display_text: impl Into<String>,
    ) {
        self.set_state(id, PrincipleState::new(raw_score, color_value, display_text));
    }

    pub fn set_state(&mut self, id: PrincipleId, state: PrincipleState) {
        debug!(
            principle = id.get(),
            raw_score = state.raw_score,
            color_value = state.color_value,
            "principle updated"
        );
        self.principles[id.index()] = state;
    }

    pub fn principle(&self, id: PrincipleId) -> &PrincipleState {
        &self.principles[id.index()]
    }

    /// Select option `index` of a categorical principle.
    pub fn select_option(&mut self, id: PrincipleId, index: usize) -> Result<()> {
        let state = formulas::evaluate_choice(id, index)?;
        self.set_state(id, state);
        Ok(())
    }

    /// Enter text for a numeric principle. Unparseable or negative text is
    /// scored as 0 and the recovered issue is returned.
    pub fn enter_numeric(&mut self, id: PrincipleId, text: &str) -> Result<Option<InputIssue>> {
        self.commit_numeric(id, parse_numeric(id, text))
    }

    pub fn enter_value(&mut self, id: PrincipleId, value: f64) -> Result<Option<InputIssue>> {
        self.commit_numeric(id, check_numeric(id, value))
    }

    fn commit_numeric(&mut self, id: PrincipleId, parsed: ParsedNumber) -> Result<Option<InputIssue>> {
        let state = formulas::evaluate_numeric(id, parsed.value)?;
        self.set_state(id, state);
        Ok(parsed.issue)
    }

    /// Choose the step count for principle 8. Returns whether the principle
    /// was committed, which happens once an automation level is also known.
    pub fn select_steps(&mut self, index: usize) -> Result<bool> {
        if index >= PREPARATION_STEPS.len() {
            return Err(EsaiError::OptionIndexOutOfRange { principle: 8, index });
        }
        self.steps_and_automation.steps = Some(index);
        self.commit_steps_and_automation()
    }

    pub fn select_automation(&mut self, index: usize) -> Result<bool> {
        if index >= PREPARATION_AUTOMATION.len() {
            return Err(EsaiError::OptionIndexOutOfRange { principle: 8, index });
        }
        self.steps_and_automation.automation = Some(index);
        self.commit_steps_and_automation()
    }

    fn commit_steps_and_automation(&mut self) -> Result<bool> {
        let StepsAndAutomation { steps, automation } = self.steps_and_automation;
        match (steps, automation) {
            (Some(steps), Some(automation)) => {
                let state = formulas::combine_steps_and_automation(steps, automation)?;
                let id = PrincipleId::new(8)?;
                self.set_state(id, state);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// Validate and commit eight weights. On rejection the current vector
    /// is left untouched.
    pub fn set_weights(&mut self, weights: [f64; 8]) -> Result<()> {
        match WeightVector::new(weights) {
            Ok(vector) => {
                self.set_weight_vector(vector);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "weight vector rejected, keeping previous weights");
                Err(err)
            }
        }
    }

    pub fn set_weight_vector(&mut self, weights: WeightVector) {
        info!(weights = ?weights.values(), "weights committed");
        self.weights = weights;
    }

    pub fn apply_preset(&mut self, number: u32) -> Result<()> {
        let vector = WeightVector::preset(number)?;
        self.set_weight_vector(vector);
        Ok(())
    }

    /// `weight × Σ raw scores` of the dimension, rounded to two decimals.
    pub fn dimension_score(&self, dimension: DimensionId) -> f64 {
        let points: f64 = dimension
            .principle_ids()
            .map(|id| self.principle(id).raw_score)
            .sum();
        round2(points * self.weights.get(dimension))
    }

    /// Sum of the rounded dimension scores, rounded again.
    pub fn total_score(&self) -> f64 {
        round2(
            DimensionId::ALL
                .iter()
                .map(|dimension| self.dimension_score(*dimension))
                .sum(),
        )
    }

    pub fn score_card(&self) -> ScoreCard {
        let dimensions = DimensionId::ALL.map(|dimension| self.dimension_score(dimension));
        ScoreCard {
            dimensions,
            total: round2(dimensions.iter().sum()),
        }
    }

    pub fn principle_colors(&self) -> BTreeMap<PrincipleId, f64> {
        PrincipleId::all()
            .map(|id| (id, self.principle(id).color_value))
            .collect()
    }

    /// Restore default principles, default weights and clear any pending
    /// principle 8 selection.
    pub fn reset(&mut self) {
        self.principles = PrincipleId::all().map(formulas::default_state).collect();
        self.weights = WeightVector::default();
        self.steps_and_automation = StepsAndAutomation::default();
        debug!("calculator reset");
    }

    pub fn report_data(&self) -> ReportData {
        let principles = PrincipleId::all()
            .map(|id| {
                let state = self.principle(id);
                let report = PrincipleReport {
                    title: formulas::spec(id).title.to_string(),
                    dimension: id.dimension().key().to_string(),
                    raw_score: round2(state.raw_score),
                    color_value: state.color_value,
                    display_text: state.display_text.clone(),
                };
                (id.get(), report)
            })
            .collect::<BTreeMap<_, _>>();
        debug_assert_eq!(principles.len(), PRINCIPLE_COUNT);

        let card = self.score_card();
        ReportData {
            principles,
            dimensions: card
                .iter()
                .map(|(dimension, score)| (dimension.key().to_string(), score))
                .collect(),
            total: card.total,
            weights: self.weights.by_dimension(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(number: u8) -> PrincipleId {
        PrincipleId::new(number).expect("valid principle id")
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn new_calculator_starts_at_zero() {
        let calculator = ScoreCalculator::default();
        assert_eq!(calculator.total_score(), 0.0);
        assert_eq!(calculator.principle(id(1)).display_text, "Ex situ");
    }

    #[test]
    fn set_principle_overwrites_triple_and_feeds_dimension() {
        let mut calculator = ScoreCalculator::default();
        calculator.set_principle(id(18), 30.0, 0.5, "Qualitative and semi quantitative");
        calculator.set_principle(id(19), 50.0, 1.0, "Multiple targets analysis for >20 compounds per analysis");
        assert_eq!(
            *calculator.principle(id(18)),
            PrincipleState::new(30.0, 0.5, "Qualitative and semi quantitative")
        );
        // Method weight is 0.05 by default
        assert!(close(calculator.dimension_score(DimensionId::Method), 4.0));
        assert!(close(calculator.total_score(), 4.0));

        calculator.set_principle(id(18), 0.0, 0.0, "Qualitative");
        assert!(close(calculator.dimension_score(DimensionId::Method), 2.5));
        assert_eq!(calculator.principle(id(18)).display_text, "Qualitative");
    }

    #[test]
    fn economy_score_uses_its_weight() {
        let mut calculator = ScoreCalculator::default();
        calculator
            .set_weights([0.1, 0.2, 0.2, 0.05, 0.05, 0.1, 0.1, 0.2])
            .expect("valid weights");
        calculator.enter_numeric(id(17), "50").expect("numeric principle");
        assert!(close(calculator.principle(id(17)).color_value, 0.96));
        assert!(close(calculator.principle(id(17)).raw_score, 96.0));
        assert!(close(calculator.dimension_score(DimensionId::Economy), 4.8));
    }

    #[test]
    fn rejected_weights_leave_previous_vector() {
        let mut calculator = ScoreCalculator::default();
        calculator.apply_preset(4).expect("preset exists");
        let before = *calculator.weights();
        let result = calculator.set_weights([0.1, 0.2, 0.2, 0.05, 0.05, 0.1, 0.1, 0.25]);
        assert!(matches!(result, Err(EsaiError::WeightSum { .. })));
        assert_eq!(*calculator.weights(), before);
    }

    #[test]
    fn accepted_weights_replace_vector() {
        let mut calculator = ScoreCalculator::default();
        calculator.apply_preset(7).expect("preset exists");
        calculator
            .set_weights([0.1, 0.2, 0.2, 0.05, 0.05, 0.1, 0.1, 0.2])
            .expect("sum is 1.00");
        assert_eq!(*calculator.weights(), WeightVector::default());
    }

    #[test]
    fn total_is_sum_of_rounded_dimensions() {
        let mut calculator = ScoreCalculator::default();
        calculator.select_option(id(1), 2).expect("valid option");
        calculator.enter_numeric(id(2), "100").expect("numeric");
        calculator.enter_numeric(id(10), "333").expect("numeric");
        calculator.enter_numeric(id(12), "7").expect("numeric");
        calculator.select_option(id(23), 1).expect("valid option");
        calculator.enter_numeric(id(24), "10").expect("numeric");
        calculator.select_option(id(26), 2).expect("valid option");

        let expected: f64 = DimensionId::ALL
            .iter()
            .map(|dimension| calculator.dimension_score(*dimension))
            .sum();
        assert_eq!(calculator.total_score(), round2(expected));
        assert_eq!(calculator.score_card().total, calculator.total_score());
    }

    #[test]
    fn best_inputs_score_one_hundred() {
        let mut calculator = ScoreCalculator::default();
        for id in PrincipleId::all() {
            let spec = formulas::spec(id);
            match spec.formula {
                formulas::Formula::Choice(options) => {
                    let best = options
                        .iter()
                        .position(|option| option.raw_score == spec.max_score)
                        .expect("best option exists");
                    calculator.select_option(id, best).expect("valid option");
                }
                formulas::Formula::Numeric(_) => {
                    calculator.enter_value(id, 0.0).expect("numeric");
                }
                formulas::Formula::StepsAndAutomation => {
                    calculator.select_steps(0).expect("valid");
                    calculator.select_automation(0).expect("valid");
                }
            }
        }
        assert_eq!(calculator.total_score(), 100.0);
        for dimension in DimensionId::ALL {
            assert!(close(
                calculator.dimension_score(dimension),
                100.0 * calculator.weights().get(dimension)
            ));
        }
    }

    #[test]
    fn steps_and_automation_commit_only_when_both_chosen() {
        let mut calculator = ScoreCalculator::default();
        assert!(!calculator.select_steps(1).expect("valid index"));
        assert_eq!(calculator.principle(id(8)).raw_score, 0.0);

        assert!(calculator.select_automation(1).expect("valid index"));
        assert_eq!(
            *calculator.principle(id(8)),
            PrincipleState::new(10.0, 0.5, "3-5 steps + Semi-automatic")
        );

        assert!(calculator.select_steps(0).expect("valid index"));
        assert_eq!(calculator.principle(id(8)).raw_score, 15.0);
        assert!(calculator.select_automation(9).is_err());
        assert_eq!(calculator.principle(id(8)).raw_score, 15.0);
    }

    #[test]
    fn numeric_issues_are_returned_and_scored_as_zero() {
        let mut calculator = ScoreCalculator::default();
        let issue = calculator.enter_numeric(id(22), "-3").expect("numeric principle");
        assert!(matches!(issue, Some(InputIssue::NegativeValue { principle: 22, .. })));
        // zero is below the lower threshold, so it scores the maximum
        assert_eq!(calculator.principle(id(22)).raw_score, 10.0);
        assert_eq!(calculator.principle(id(22)).display_text, "0 mL");

        let issue = calculator.enter_numeric(id(2), "abc").expect("numeric principle");
        assert!(matches!(issue, Some(InputIssue::InvalidNumeric { principle: 2, .. })));
    }

    #[test]
    fn wrong_input_kind_does_not_mutate() {
        let mut calculator = ScoreCalculator::default();
        let before = calculator.principle(id(1)).clone();
        assert!(calculator.enter_numeric(id(1), "3").is_err());
        assert_eq!(*calculator.principle(id(1)), before);
        assert!(calculator.select_option(id(1), 4).is_err());
        assert_eq!(*calculator.principle(id(1)), before);
    }

    #[test]
    fn reset_restores_defaults_and_is_idempotent() {
        let mut calculator = ScoreCalculator::default();
        calculator.select_option(id(20), 0).expect("valid option");
        calculator.select_steps(0).expect("valid index");
        calculator.apply_preset(3).expect("preset exists");

        calculator.reset();
        assert_eq!(calculator.total_score(), 0.0);
        assert_eq!(*calculator.weights(), WeightVector::default());
        let first = calculator.report_data();
        calculator.reset();
        assert_eq!(calculator.report_data(), first);

        // the pending step selection was cleared, so automation alone does not commit
        assert!(!calculator.select_automation(0).expect("valid index"));
    }

    #[test]
    fn report_data_carries_all_principles_and_rounded_scores() {
        let mut calculator = ScoreCalculator::default();
        calculator.enter_numeric(id(2), "100").expect("numeric");
        let report = calculator.report_data();
        assert_eq!(report.principles.len(), 27);
        assert_eq!(report.principles[&2].display_text, "100 mg or µL");
        assert_eq!(report.principles[&2].dimension, "SC");
        assert_eq!(report.dimensions["SC"], round2(14.9 * 0.1));
        assert_eq!(report.total, calculator.total_score());
        assert_eq!(report.weights["Economy"], 0.05);
    }
}
