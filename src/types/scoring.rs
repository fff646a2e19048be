use crate::types::principle::DimensionId;
use serde::Serialize;

pub type Score = f64;

/// Weighted score of every dimension plus their total, all rounded to two
/// decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub dimensions: [Score; 8],
    pub total: Score,
}

impl ScoreCard {
    pub fn get(&self, dimension: DimensionId) -> Score {
        self.dimensions[dimension.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (DimensionId, Score)> + '_ {
        DimensionId::ALL
            .into_iter()
            .map(move |dimension| (dimension, self.get(dimension)))
    }
}
