//! Per-principle transfer functions.
//!
//! Categorical principles are plain option tables. Numeric principles share
//! one shape: values under a lower threshold score the maximum, values over
//! an upper threshold score zero, and the range in between decays along a
//! fitted (mostly logarithmic) curve. Every function here is pure and expects
//! a finite, non-negative value; validation lives in `scoring::input`.

use crate::error::{EsaiError, Result};
use crate::types::principle::{PrincipleId, PrincipleState};
use tracing::debug;

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoiceOption {
    pub key: &'static str,
    pub label: &'static str,
    pub raw_score: f64,
    pub color_value: f64,
}

impl ChoiceOption {
    const fn new(key: &'static str, label: &'static str, raw_score: f64, color_value: f64) -> Self {
        Self {
            key,
            label,
            raw_score,
            color_value,
        }
    }

    pub fn state(&self) -> PrincipleState {
        PrincipleState::new(self.raw_score, self.color_value, self.label)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NumericFormula {
    pub unit: &'static str,
    /// Maps a validated value to `(raw_score, color_value)`.
    pub eval: fn(f64) -> (f64, f64),
}

#[derive(Debug, Clone, Copy)]
pub enum Formula {
    Choice(&'static [ChoiceOption]),
    Numeric(NumericFormula),
    /// Principle 8: number of steps plus degree of automation.
    StepsAndAutomation,
}

impl Formula {
    pub fn kind(&self) -> &'static str {
        match self {
            Formula::Choice(_) => "choice",
            Formula::Numeric(_) => "numeric",
            Formula::StepsAndAutomation => "steps + automation",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PrincipleSpec {
    pub number: u8,
    pub title: &'static str,
    pub max_score: f64,
    pub formula: Formula,
}

impl PrincipleSpec {
    pub fn id(&self) -> PrincipleId {
        PrincipleId::new(self.number).unwrap_or_else(|_| unreachable!("table ids are 1-27"))
    }

    pub fn options(&self) -> &'static [ChoiceOption] {
        match self.formula {
            Formula::Choice(options) => options,
            Formula::Numeric(_) | Formula::StepsAndAutomation => &[],
        }
    }
}

const COLLECTION_SITE: &[ChoiceOption] = &[
    ChoiceOption::new("ex_situ", "Ex situ", 10.0, 0.0),
    ChoiceOption::new("on_site", "On site", 20.0, 0.33),
    ChoiceOption::new("on_line", "On-line", 30.0, 0.66),
    ChoiceOption::new("in_line", "In-line", 40.0, 1.0),
];

const COLLECTION_THROUGHPUT: &[ChoiceOption] = &[
    ChoiceOption::new("up_to_1_per_hour", "≤1 sample per hour", 0.0, 0.0),
    ChoiceOption::new("2_to_10_per_hour", "2-10 samples per hour", 10.0, 0.33),
    ChoiceOption::new("10_to_60_per_hour", "10-60 samples per hour", 15.0, 0.66),
    ChoiceOption::new("over_60_per_hour", ">60 samples per hour", 20.0, 1.0),
];

const COLLECTION_ENERGY: &[ChoiceOption] = &[
    ChoiceOption::new("over_1_kwh", ">1 kWh per sample", 0.0, 0.0),
    ChoiceOption::new("0_1_to_1_kwh", "0.1-1 kWh per sample", 10.0, 0.5),
    ChoiceOption::new("under_0_1_kwh", "<0.1 kWh per sample", 20.0, 1.0),
];

const PREPARATION_METHOD: &[ChoiceOption] = &[
    ChoiceOption::new("not_required", "Not required sample preparation", 30.0, 1.0),
    ChoiceOption::new(
        "high_greenness",
        "High-greenness (SFE, SPME, enzymatic, membrane)",
        20.0,
        0.66,
    ),
    ChoiceOption::new("medium_greenness", "Medium-greenness (ASE, PSE, PPT)", 10.0, 0.33),
    ChoiceOption::new("low_greenness", "Low-greenness (LLE, SPE, Acid-base)", 0.0, 0.0),
];

// The 2-10 option outscores 10-60 in the published method; kept as published.
const PREPARATION_THROUGHPUT: &[ChoiceOption] = &[
    ChoiceOption::new("up_to_1_per_hour", "≤1 sample per hour", 2.5, 0.0),
    ChoiceOption::new("2_to_10_per_hour", "2-10 samples per hour", 8.0, 0.33),
    ChoiceOption::new("10_to_60_per_hour", "10-60 samples per hour", 7.5, 0.66),
    ChoiceOption::new("over_60_per_hour", ">60 samples per hour", 10.0, 1.0),
];

const PREPARATION_WASTE: &[ChoiceOption] = &[
    ChoiceOption::new("under_1", "<1 g or 1 mL per sample", 20.0, 1.0),
    ChoiceOption::new("1_to_10", "1-10 g or 1-10 mL per sample", 10.0, 0.5),
    ChoiceOption::new("over_10", ">10 g or 10 mL per sample", 0.0, 0.0),
];

pub const PREPARATION_STEPS: &[ChoiceOption] = &[
    ChoiceOption::new("two_or_fewer", "≤2 steps", 10.0, 0.5),
    ChoiceOption::new("three_to_five", "3-5 steps", 5.0, 0.25),
    ChoiceOption::new("six_or_more", "≥6 steps", 0.0, 0.0),
];

pub const PREPARATION_AUTOMATION: &[ChoiceOption] = &[
    ChoiceOption::new("fully_automatic", "Fully automatic", 10.0, 0.5),
    ChoiceOption::new("semi_automatic", "Semi-automatic", 5.0, 0.25),
    ChoiceOption::new("manual", "Manual", 0.0, 0.0),
];

const PREPARATION_ENERGY: &[ChoiceOption] = &[
    ChoiceOption::new("over_1_kwh", ">1 kWh per sample", 0.0, 0.0),
    ChoiceOption::new("0_1_to_1_kwh", "0.1-1 kWh per sample", 5.0, 0.5),
    ChoiceOption::new("under_0_1_kwh", "<0.1 kWh per sample", 10.0, 1.0),
];

const INSTRUMENT: &[ChoiceOption] = &[
    ChoiceOption::new(
        "high_energy",
        "High-energy consumption instrument (such as HPLC, GC, UHPLC, LC-MS, 2D-LC, GC-MS, 2D-GC, XRD, XRF, etc.)",
        5.0,
        0.0,
    ),
    ChoiceOption::new(
        "medium_energy",
        "Medium-energy consumption instrument (such as UV-Vis, fluorescence spectrophotometer, atomic absorption spectrometer, Mini mass spectrometer, etc.)",
        10.0,
        0.5,
    ),
    ChoiceOption::new(
        "low_energy",
        "Low-energy consumption instrument (such as portable analyzer, handheld Raman spectrometer, etc.)",
        20.0,
        1.0,
    ),
];

const ANALYSIS_THROUGHPUT: &[ChoiceOption] = &[
    ChoiceOption::new("up_to_1_per_hour", "≤1 sample per hour", 5.0, 0.0),
    ChoiceOption::new("2_to_10_per_hour", "2-10 samples per hour", 10.0, 0.33),
    ChoiceOption::new("10_to_90_per_hour", "10-90 samples per hour", 15.0, 0.66),
    ChoiceOption::new("over_90_per_hour", ">90 samples per hour", 20.0, 1.0),
];

const ANALYSIS_WASTE: &[ChoiceOption] = &[
    ChoiceOption::new("over_10", ">10 g or 10 mL per sample", 0.0, 0.0),
    ChoiceOption::new("1_to_10", "1-10 g or 1-10 mL per sample", 10.0, 0.5),
    ChoiceOption::new("under_1", "<1 g or 1 mL per sample", 20.0, 1.0),
];

const ANALYSIS_AUTOMATION: &[ChoiceOption] = &[
    ChoiceOption::new("manual", "Manual", 0.0, 0.0),
    ChoiceOption::new("semi_automatic", "Semi-automatic", 5.0, 0.5),
    ChoiceOption::new("fully_automatic", "Fully automatic", 10.0, 1.0),
];

const ANALYSIS_ENERGY: &[ChoiceOption] = &[
    ChoiceOption::new("under_0_1_kwh", "<0.1 kWh per sample", 20.0, 1.0),
    ChoiceOption::new("0_1_to_1_kwh", "0.1-1 kWh per sample", 10.0, 0.5),
    ChoiceOption::new("over_1_kwh", ">1 kWh per sample", 0.0, 0.0),
];

const ANALYSIS_TYPE: &[ChoiceOption] = &[
    ChoiceOption::new("qualitative", "Qualitative", 0.0, 0.0),
    ChoiceOption::new(
        "semi_quantitative",
        "Qualitative and semi quantitative",
        30.0,
        0.5,
    ),
    ChoiceOption::new("quantitative", "Quantitative", 50.0, 1.0),
];

const TARGETS_PER_ANALYSIS: &[ChoiceOption] = &[
    ChoiceOption::new("single_target", "Single target per analysis", 20.0, 0.0),
    ChoiceOption::new(
        "2_to_10_targets",
        "Multiple targets analysis for 2-10 compounds per analysis",
        30.0,
        0.25,
    ),
    ChoiceOption::new(
        "11_to_20_targets",
        "Multiple targets analysis for 11-20 compounds per analysis",
        40.0,
        0.5,
    ),
    ChoiceOption::new(
        "over_20_targets",
        "Multiple targets analysis for >20 compounds per analysis",
        50.0,
        1.0,
    ),
];

const SAFETY_FACTORS: &[ChoiceOption] = &[
    ChoiceOption::new("none", "0", 100.0, 1.0),
    ChoiceOption::new("one", "1", 50.0, 0.66),
    ChoiceOption::new("two", "2", 25.0, 0.33),
    ChoiceOption::new("three_or_more", "≥3", 0.0, 0.0),
];

const REAGENT_TYPES: &[ChoiceOption] = &[
    ChoiceOption::new("over_6", ">6", 0.0, 0.0),
    ChoiceOption::new("3_to_6", "3-6", 5.0, 0.5),
    ChoiceOption::new("under_3", "<3", 10.0, 1.0),
];

const REAGENT_TOXICITY: &[ChoiceOption] = &[
    ChoiceOption::new("non_toxic", "Non-toxic", 30.0, 1.0),
    ChoiceOption::new(
        "chronic",
        "Chronic toxicity: (e.g. carcinogenicity, neurotoxicity, teratogenicity, and reproductive toxicity associated with the reagent)",
        15.0,
        0.5,
    ),
    ChoiceOption::new(
        "acute",
        "Acute toxicity: (e.g. irritation and corrosiveness to the eyes, skin, and respiratory tract)",
        0.0,
        0.0,
    ),
];

const RENEWABLE_SHARE: &[ChoiceOption] = &[
    ChoiceOption::new("75_to_100", "75-100%", 30.0, 1.0),
    ChoiceOption::new("50_to_75", "50-75%", 15.0, 0.66),
    ChoiceOption::new("25_to_50", "25-50%", 10.0, 0.33),
    ChoiceOption::new("0_to_25", "0-25%", 0.0, 0.0),
];

const GAS_EMISSIONS: &[ChoiceOption] = &[
    ChoiceOption::new("toxic_gases", "Emissions of toxic gases", 0.0, 0.0),
    ChoiceOption::new(
        "significant_greenhouse",
        "Significant emissions of greenhouse gases",
        12.5,
        0.33,
    ),
    ChoiceOption::new(
        "minor_greenhouse",
        "Minor or controlled emissions of greenhouse gases",
        25.0,
        0.66,
    ),
    ChoiceOption::new(
        "no_emissions",
        "No direct emissions of greenhouse or toxic gases",
        50.0,
        1.0,
    ),
];

const WASTE_DISPOSAL: &[ChoiceOption] = &[
    ChoiceOption::new("0_to_25", "0-25%", 0.0, 0.0),
    ChoiceOption::new("25_to_50", "25-50%", 12.5, 0.33),
    ChoiceOption::new("50_to_75", "50-75%", 25.0, 0.66),
    ChoiceOption::new("75_to_100", "75-100%", 50.0, 1.0),
];

/// Principle 2, mg or µL collected.
pub fn sample_volume(value: f64) -> (f64, f64) {
    if value > 100_000.0 {
        (0.0, 0.0)
    } else if value < 10.0 {
        (20.0, 1.0)
    } else {
        let fitted = round2(-0.215 * value.ln() + 2.48);
        (round2(fitted * 10.0), fitted / 2.0)
    }
}

/// Principle 10, mg or µL consumed per sample.
pub fn preparation_volume(value: f64) -> (f64, f64) {
    if value > 100_000.0 {
        (0.0, 0.0)
    } else if value < 10.0 {
        (10.0, 1.0)
    } else {
        let fitted = round2(-0.067 * value.ln().powf(1.432) + 2.22);
        (round2(fitted * 5.0), fitted / 2.0)
    }
}

/// Principle 12, mg or µL injected.
pub fn injection_volume(value: f64) -> (f64, f64) {
    if value > 1_000.0 {
        (0.0, 0.0)
    } else if value < 1.0 {
        (10.0, 1.0)
    } else {
        let fitted = round2(-0.289 * value.ln() + 2.0);
        (round2(fitted * 5.0), fitted / 2.0)
    }
}

/// Principle 17, cost per sample. Linear rather than logarithmic.
pub fn analysis_cost(value: f64) -> (f64, f64) {
    if value > 1_000.0 {
        (0.0, 0.0)
    } else if value < 10.0 {
        (100.0, 1.0)
    } else {
        let linear = -(1.0 / 99.0) * value + 1_000.0 / 99.0;
        if linear < 0.0 {
            (0.0, 0.0)
        } else {
            let fitted = round2(linear);
            (round2(fitted * 10.0), fitted / 10.0)
        }
    }
}

/// Principle 22, mL of reagents.
pub fn reagent_volume(value: f64) -> (f64, f64) {
    if value > 10.0 {
        (0.0, 0.0)
    } else if value < 1.0 {
        (10.0, 1.0)
    } else {
        let linear = -(1.0 / 9.0) * value + 10.0 / 9.0;
        if linear < 0.0 {
            (0.0, 0.0)
        } else {
            let fitted = round2(linear);
            (round2(fitted * 10.0), fitted)
        }
    }
}

/// Principle 24, mg or µL of toxic reagents.
pub fn toxic_dosage(value: f64) -> (f64, f64) {
    if value > 100_000.0 {
        (0.0, 0.0)
    } else if value < 10.0 {
        (20.0, 1.0)
    } else {
        let fitted = round2((1.0 / value).ln() * 0.217 + 2.5);
        (round2(fitted * 10.0), fitted / 2.0)
    }
}

const fn choice(number: u8, title: &'static str, max_score: f64, options: &'static [ChoiceOption]) -> PrincipleSpec {
    PrincipleSpec {
        number,
        title,
        max_score,
        formula: Formula::Choice(options),
    }
}

const fn numeric(
    number: u8,
    title: &'static str,
    max_score: f64,
    unit: &'static str,
    eval: fn(f64) -> (f64, f64),
) -> PrincipleSpec {
    PrincipleSpec {
        number,
        title,
        max_score,
        formula: Formula::Numeric(NumericFormula { unit, eval }),
    }
}

pub static PRINCIPLES: [PrincipleSpec; 27] = [
    choice(1, "Sample collection site", 40.0, COLLECTION_SITE),
    numeric(2, "Volume of sample collection", 20.0, "mg or µL", sample_volume),
    choice(3, "Throughput of sample collection", 20.0, COLLECTION_THROUGHPUT),
    choice(4, "Energy consumption for sample collection", 20.0, COLLECTION_ENERGY),
    choice(5, "Method of sample preparation", 30.0, PREPARATION_METHOD),
    choice(6, "Throughput of sample preparation", 10.0, PREPARATION_THROUGHPUT),
    choice(
        7,
        "The amounts of wastes generated during sample preparation",
        20.0,
        PREPARATION_WASTE,
    ),
    PrincipleSpec {
        number: 8,
        title: "The number of steps and degree of automation in sample preparation",
        max_score: 20.0,
        formula: Formula::StepsAndAutomation,
    },
    choice(9, "Energy consumption for sample preparation", 10.0, PREPARATION_ENERGY),
    numeric(
        10,
        "Volume consumed for sample preparation",
        10.0,
        "mg or µL",
        preparation_volume,
    ),
    choice(11, "Instrument", 20.0, INSTRUMENT),
    numeric(12, "Volume of injection", 10.0, "mg or µL", injection_volume),
    choice(13, "Throughput of analysis", 20.0, ANALYSIS_THROUGHPUT),
    choice(14, "The amounts of wastes generated during analysis", 20.0, ANALYSIS_WASTE),
    choice(15, "The degree of automation for analysis", 10.0, ANALYSIS_AUTOMATION),
    choice(16, "Consumption of energy during analysis", 20.0, ANALYSIS_ENERGY),
    numeric(17, "The cost of analysis for each sample", 100.0, "RMB", analysis_cost),
    choice(18, "Type of analysis", 50.0, ANALYSIS_TYPE),
    choice(19, "Multiple or single-element analysis", 50.0, TARGETS_PER_ANALYSIS),
    choice(
        20,
        "The number of safety factors involved in the experiment",
        100.0,
        SAFETY_FACTORS,
    ),
    choice(
        21,
        "Number of types of reagents used in analysis process",
        10.0,
        REAGENT_TYPES,
    ),
    numeric(
        22,
        "The amounts of reagents used during analytical procedures",
        10.0,
        "mL",
        reagent_volume,
    ),
    choice(23, "Toxicity of reagents", 30.0, REAGENT_TOXICITY),
    numeric(24, "Dosage of toxic reagents", 20.0, "mg/µL", toxic_dosage),
    choice(25, "Sustainable and renewable reagents", 30.0, RENEWABLE_SHARE),
    choice(26, "Emissions of greenhouse gases or toxic gases", 50.0, GAS_EMISSIONS),
    choice(27, "Waste disposal (Liquid or Solid)", 50.0, WASTE_DISPOSAL),
];

pub fn spec(id: PrincipleId) -> &'static PrincipleSpec {
    &PRINCIPLES[id.index()]
}

/// State a principle holds before any input: no points, the least-green
/// colour, and the text of the least-green option.
pub fn default_state(id: PrincipleId) -> PrincipleState {
    let spec = spec(id);
    let text = match spec.formula {
        Formula::Choice(options) => least_green(options).label.to_string(),
        Formula::Numeric(formula) => format!("0 {}", formula.unit),
        Formula::StepsAndAutomation => format!(
            "{} + {}",
            least_green(PREPARATION_STEPS).label,
            least_green(PREPARATION_AUTOMATION).label
        ),
    };
    PrincipleState::new(0.0, 0.0, text)
}

fn least_green(options: &'static [ChoiceOption]) -> &'static ChoiceOption {
    options
        .iter()
        .min_by(|a, b| a.color_value.total_cmp(&b.color_value))
        .unwrap_or(&options[0])
}

pub fn evaluate_choice(id: PrincipleId, index: usize) -> Result<PrincipleState> {
    let options = match spec(id).formula {
        Formula::Choice(options) => options,
        Formula::Numeric(_) | Formula::StepsAndAutomation => {
            return Err(EsaiError::WrongInputKind {
                principle: id.get(),
                expected: spec(id).formula.kind(),
            })
        }
    };
    let option = options
        .get(index)
        .ok_or(EsaiError::OptionIndexOutOfRange {
            principle: id.get(),
            index,
        })?;
    debug!(principle = id.get(), option = option.key, "choice evaluated");
    Ok(option.state())
}

/// Evaluate a numeric principle. `value` must already be finite and
/// non-negative.
pub fn evaluate_numeric(id: PrincipleId, value: f64) -> Result<PrincipleState> {
    let formula = match spec(id).formula {
        Formula::Numeric(formula) => formula,
        Formula::Choice(_) | Formula::StepsAndAutomation => {
            return Err(EsaiError::WrongInputKind {
                principle: id.get(),
                expected: spec(id).formula.kind(),
            })
        }
    };
    debug_assert!(value.is_finite() && value >= 0.0);
    let (raw_score, color_value) = (formula.eval)(value);
    debug!(principle = id.get(), value, raw_score, color_value, "numeric evaluated");
    Ok(PrincipleState::new(
        raw_score,
        color_value,
        format!("{} {}", value, formula.unit),
    ))
}

/// Principle 8 sums the sub-scores and sub-colours of both selections.
pub fn combine_steps_and_automation(steps: usize, automation: usize) -> Result<PrincipleState> {
    let principle = 8;
    let step = PREPARATION_STEPS
        .get(steps)
        .ok_or(EsaiError::OptionIndexOutOfRange {
            principle,
            index: steps,
        })?;
    let auto = PREPARATION_AUTOMATION
        .get(automation)
        .ok_or(EsaiError::OptionIndexOutOfRange {
            principle,
            index: automation,
        })?;
    Ok(PrincipleState::new(
        step.raw_score + auto.raw_score,
        step.color_value + auto.color_value,
        format!("{} + {}", step.label, auto.label),
    ))
}
