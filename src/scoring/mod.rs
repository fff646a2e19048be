pub mod calculator;
pub mod formulas;
pub mod input;
pub mod weights;

pub use calculator::ScoreCalculator;
pub use weights::{WeightPreset, WeightVector, PRESETS};
