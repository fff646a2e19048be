use crate::error::{EsaiError, Result};
use crate::scoring::formulas::round2;
use crate::types::principle::DimensionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Share of the 100-point total held by each dimension, `w1` (SC) to `w8`
/// (Waste).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector([f64; 8]);

#[derive(Debug, Clone, Copy)]
pub struct WeightPreset {
    pub number: u32,
    pub name: &'static str,
    pub weights: [f64; 8],
}

pub const DEFAULT_WEIGHTS: [f64; 8] = [0.1, 0.2, 0.2, 0.05, 0.05, 0.1, 0.1, 0.2];

pub const PRESETS: [WeightPreset; 7] = [
    WeightPreset {
        number: 1,
        name: "Default: w1=0.1, w2=0.2, w3=0.2, w4=0.05, w5=0.05, w6=0.1, w7=0.1, w8=0.2",
        weights: DEFAULT_WEIGHTS,
    },
    WeightPreset {
        number: 2,
        name: "w1=0.2, w2=0.2, w3=0.1, w4=0.05, w5=0.05, w6=0.05, w7=0.15, w8=0.2",
        weights: [0.2, 0.2, 0.1, 0.05, 0.05, 0.05, 0.15, 0.2],
    },
    WeightPreset {
        number: 3,
        name: "w1=0.2, w2=0.2, w3=0.2, w4=0.05, w5=0.05, w6=0.05, w7=0.05, w8=0.2",
        weights: [0.2, 0.2, 0.2, 0.05, 0.05, 0.05, 0.05, 0.2],
    },
    WeightPreset {
        number: 4,
        name: "w1=0.1, w2=0.2, w3=0.1, w4=0.1, w5=0.1, w6=0.1, w7=0.1, w8=0.2",
        weights: [0.1, 0.2, 0.1, 0.1, 0.1, 0.1, 0.1, 0.2],
    },
    WeightPreset {
        number: 5,
        name: "w1=0.2, w2=0.2, w3=0.05, w4=0.05, w5=0.05, w6=0.05, w7=0.2, w8=0.2",
        weights: [0.2, 0.2, 0.05, 0.05, 0.05, 0.05, 0.2, 0.2],
    },
    WeightPreset {
        number: 6,
        name: "w1=0.2, w2=0.2, w3=0.2, w4=0.05, w5=0.05, w6=0.05, w7=0.2, w8=0.05",
        weights: [0.2, 0.2, 0.2, 0.05, 0.05, 0.05, 0.2, 0.05],
    },
    WeightPreset {
        number: 7,
        name: "w1=0.2, w2=0.2, w3=0.2, w4=0.1, w5=0.05, w6=0.1, w7=0.1, w8=0.05",
        weights: [0.2, 0.2, 0.2, 0.1, 0.05, 0.1, 0.1, 0.05],
    },
];

impl Default for WeightVector {
    fn default() -> Self {
        Self(DEFAULT_WEIGHTS)
    }
}

impl WeightVector {
    /// Build a vector, rejecting negative entries and sums that do not round
    /// to 1.00.
    pub fn new(weights: [f64; 8]) -> Result<Self> {
        for (dimension, &value) in DimensionId::ALL.iter().zip(weights.iter()) {
            if value.is_nan() {
                return Err(EsaiError::InvalidWeight {
                    label: dimension.weight_label(),
                    text: value.to_string(),
                });
            }
            if value < 0.0 {
                return Err(EsaiError::NegativeWeight {
                    label: dimension.weight_label(),
                    value,
                });
            }
        }
        let sum: f64 = weights.iter().sum();
        if !sum.is_finite() || round2(sum) != 1.0 {
            return Err(EsaiError::WeightSum { sum });
        }
        Ok(Self(weights))
    }

    pub fn preset(number: u32) -> Result<Self> {
        PRESETS
            .iter()
            .find(|preset| preset.number == number)
            .map(|preset| Self(preset.weights))
            .ok_or(EsaiError::InvalidWeightPreset(number))
    }

    /// Parse eight manually entered fields. Extra fields are rejected, then
    /// blank fields are reported together as missing before any value is
    /// checked.
    pub fn parse_manual(fields: &[&str]) -> Result<Self> {
        if fields.len() > 8 {
            return Err(EsaiError::TooManyWeights(fields.len()));
        }
        let labels = DimensionId::ALL.map(DimensionId::weight_label);
        let missing = labels
            .iter()
            .enumerate()
            .filter(|(slot, _)| fields.get(*slot).map_or(true, |text| text.trim().is_empty()))
            .map(|(_, label)| label.clone())
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(EsaiError::MissingWeight(missing.join(", ")));
        }

        let mut weights = [0.0; 8];
        for (slot, text) in fields.iter().enumerate() {
            let trimmed = text.trim();
            weights[slot] = match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    return Err(EsaiError::InvalidWeight {
                        label: labels[slot].clone(),
                        text: trimmed.to_string(),
                    })
                }
            };
        }
        Self::new(weights)
    }

    pub fn get(&self, dimension: DimensionId) -> f64 {
        self.0[dimension.index()]
    }

    pub fn values(&self) -> [f64; 8] {
        self.0
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Weights keyed by dimension name, as the report prints them.
    pub fn by_dimension(&self) -> BTreeMap<String, f64> {
        DimensionId::ALL
            .iter()
            .map(|dimension| (dimension.key().to_string(), self.get(*dimension)))
            .collect()
    }
}
