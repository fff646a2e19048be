//! Scoring engine for the ESAI greenness index: 27 principle formulas,
//! eight weighted dimensions, a red-white-green colour scale and the radar
//! chart scene.

pub mod assessment;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod report;
pub mod scoring;
pub mod telemetry;
pub mod types;

pub use error::{EsaiError, InputIssue, Result};
pub use scoring::{ScoreCalculator, WeightVector};
