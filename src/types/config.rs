use crate::color::{ColorScale, Rgb, DEFAULT_END_HEX, DEFAULT_START_HEX};
use crate::error::{EsaiError, Result};
use crate::scoring::weights::PRESETS;
use crate::types::principle::PrincipleId;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A parsed assessment file, after layering over the global defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EsaiConfig {
    /// `preset = 1..7` and/or `w1`..`w8`.
    pub weights: Option<BTreeMap<String, f64>>,
    pub colors: Option<ColorsConfig>,
    #[serde(default)]
    pub inputs: BTreeMap<String, InputValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColorsConfig {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Value given for one principle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    /// An option key for categorical principles, numeric text otherwise.
    Text(String),
    StepsAndAutomation {
        steps: Option<String>,
        automation: Option<String>,
    },
}

/// Weights requested by the file.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightSetting {
    Preset(u32),
    /// The eight manual fields in `w1`..`w8` order; absent fields are empty.
    Manual(Vec<String>),
}

const WEIGHT_KEYS: [&str; 9] = ["preset", "w1", "w2", "w3", "w4", "w5", "w6", "w7", "w8"];

impl EsaiConfig {
    pub fn weight_setting(&self) -> Option<WeightSetting> {
        let weights = self.weights.as_ref()?;
        let manual = WEIGHT_KEYS[1..]
            .iter()
            .map(|key| weights.get(*key).map(|value| value.to_string()).unwrap_or_default())
            .collect::<Vec<_>>();
        if manual.iter().any(|field| !field.is_empty()) {
            return Some(WeightSetting::Manual(manual));
        }
        weights
            .get("preset")
            .map(|preset| WeightSetting::Preset(*preset as u32))
    }

    pub fn color_scale(&self) -> Result<ColorScale> {
        let colors = self.colors.clone().unwrap_or_default();
        let start = colors.start.as_deref().unwrap_or(DEFAULT_START_HEX);
        let end = colors.end.as_deref().unwrap_or(DEFAULT_END_HEX);
        ColorScale::build(start, end)
    }

    /// Inputs keyed by principle, in principle order.
    pub fn principle_inputs(&self) -> Result<BTreeMap<PrincipleId, &InputValue>> {
        self.inputs
            .iter()
            .map(|(key, value)| Ok((key.parse::<PrincipleId>()?, value)))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(weights) = &self.weights {
            let unknown = weights
                .keys()
                .filter(|key| !WEIGHT_KEYS.contains(&key.as_str()))
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                return Err(EsaiError::ConfigParse(format!(
                    "weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
            if let Some(preset) = weights.get("preset") {
                let in_range = preset.fract() == 0.0
                    && PRESETS.iter().any(|known| f64::from(known.number) == *preset);
                if !in_range {
                    return Err(EsaiError::ConfigParse(format!(
                        "weights.preset must be an integer between 1 and {} (found {preset})",
                        PRESETS.len()
                    )));
                }
            }
        }

        if let Some(colors) = &self.colors {
            for (field, value) in [("start", &colors.start), ("end", &colors.end)] {
                if let Some(hex) = value {
                    Rgb::from_hex(hex).map_err(|_| {
                        EsaiError::ConfigParse(format!("colors.{field} is not a hex colour: {hex}"))
                    })?;
                }
            }
        }

        let unknown = self
            .inputs
            .keys()
            .filter(|key| key.parse::<PrincipleId>().is_err())
            .cloned()
            .collect::<Vec<_>>();
        if !unknown.is_empty() {
            return Err(EsaiError::ConfigParse(format!(
                "inputs contains unknown principle(s): {} (expected 1-27)",
                unknown.join(", ")
            )));
        }

        Ok(())
    }
}
