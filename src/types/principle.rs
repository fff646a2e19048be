use crate::error::{EsaiError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const PRINCIPLE_COUNT: usize = 27;

/// One of the 27 assessment principles, numbered 1..=27.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PrincipleId(u8);

impl PrincipleId {
    pub fn new(number: u8) -> Result<Self> {
        if (1..=PRINCIPLE_COUNT as u8).contains(&number) {
            Ok(Self(number))
        } else {
            Err(EsaiError::InvalidPrincipleId(number.to_string()))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot for table lookups.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn all() -> impl Iterator<Item = PrincipleId> {
        (1..=PRINCIPLE_COUNT as u8).map(PrincipleId)
    }

    pub fn dimension(self) -> DimensionId {
        DimensionId::ALL
            .into_iter()
            .find(|dimension| dimension.principles().contains(&self.0))
            .unwrap_or(DimensionId::Waste)
    }
}

impl TryFrom<u8> for PrincipleId {
    type Error = EsaiError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PrincipleId> for u8 {
    fn from(id: PrincipleId) -> Self {
        id.0
    }
}

impl FromStr for PrincipleId {
    type Err = EsaiError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_start_matches(['p', 'P']);
        let number = trimmed
            .parse::<u8>()
            .map_err(|_| EsaiError::InvalidPrincipleId(s.to_string()))?;
        Self::new(number)
    }
}

impl fmt::Display for PrincipleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The eight weighted groups that partition the principles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DimensionId {
    SC,
    SP,
    AT,
    Economy,
    Method,
    Operator,
    Reagent,
    Waste,
}

impl DimensionId {
    /// Weight order: `w1` belongs to SC, `w8` to Waste.
    pub const ALL: [DimensionId; 8] = [
        DimensionId::SC,
        DimensionId::SP,
        DimensionId::AT,
        DimensionId::Economy,
        DimensionId::Method,
        DimensionId::Operator,
        DimensionId::Reagent,
        DimensionId::Waste,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn principles(self) -> &'static [u8] {
        match self {
            DimensionId::SC => &[1, 2, 3, 4],
            DimensionId::SP => &[5, 6, 7, 8, 9, 10],
            DimensionId::AT => &[11, 12, 13, 14, 15, 16],
            DimensionId::Economy => &[17],
            DimensionId::Method => &[18, 19],
            DimensionId::Operator => &[20],
            DimensionId::Reagent => &[21, 22, 23, 24, 25],
            DimensionId::Waste => &[26, 27],
        }
    }

    pub fn principle_ids(self) -> impl Iterator<Item = PrincipleId> {
        self.principles().iter().map(|&number| PrincipleId(number))
    }

    /// Key used in reports and score maps.
    pub fn key(self) -> &'static str {
        match self {
            DimensionId::SC => "SC",
            DimensionId::SP => "SP",
            DimensionId::AT => "AT",
            DimensionId::Economy => "Economy",
            DimensionId::Method => "Method",
            DimensionId::Operator => "Operator",
            DimensionId::Reagent => "Reagent",
            DimensionId::Waste => "Waste",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DimensionId::SC => "Sample collection",
            DimensionId::SP => "Sample preparation",
            DimensionId::AT => "Analytical techniques",
            DimensionId::Economy => "Economy",
            DimensionId::Method => "Method",
            DimensionId::Operator => "Operator",
            DimensionId::Reagent => "Reagent",
            DimensionId::Waste => "Waste",
        }
    }

    /// Single letter drawn on the chart ring.
    pub fn letter(self) -> &'static str {
        match self {
            DimensionId::SC => "C",
            DimensionId::SP => "P",
            DimensionId::AT => "A",
            DimensionId::Economy => "E",
            DimensionId::Method => "M",
            DimensionId::Operator => "O",
            DimensionId::Reagent => "R",
            DimensionId::Waste => "W",
        }
    }

    pub fn weight_label(self) -> String {
        format!("w{}", self.index() + 1)
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Current value of one principle: unweighted points, colour position and
/// the text shown in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipleState {
    pub raw_score: f64,
    pub color_value: f64,
    pub display_text: String,
}

impl PrincipleState {
    pub fn new(raw_score: f64, color_value: f64, display_text: impl Into<String>) -> Self {
        Self {
            raw_score,
            color_value,
            display_text: display_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn dimensions_partition_all_principles_exactly_once() {
        let mut seen = BTreeSet::new();
        let mut total = 0;
        for dimension in DimensionId::ALL {
            for &number in dimension.principles() {
                assert!(seen.insert(number), "principle {number} listed twice");
                total += 1;
            }
        }
        assert_eq!(total, PRINCIPLE_COUNT);
        assert_eq!(seen, (1..=27).collect::<BTreeSet<u8>>());
    }

    #[test]
    fn principle_id_rejects_out_of_range_numbers() {
        assert!(PrincipleId::new(0).is_err());
        assert!(PrincipleId::new(28).is_err());
        assert_eq!(PrincipleId::new(27).expect("27 is valid").index(), 26);
    }

    #[test]
    fn principle_id_parses_plain_and_prefixed_keys() {
        assert_eq!("8".parse::<PrincipleId>().expect("parse").get(), 8);
        assert_eq!("p12".parse::<PrincipleId>().expect("parse").get(), 12);
        assert!("x".parse::<PrincipleId>().is_err());
    }

    #[test]
    fn principle_reports_owning_dimension() {
        let id = PrincipleId::new(17).expect("valid id");
        assert_eq!(id.dimension(), DimensionId::Economy);
        let id = PrincipleId::new(22).expect("valid id");
        assert_eq!(id.dimension(), DimensionId::Reagent);
    }

    #[test]
    fn weight_labels_follow_dimension_order() {
        assert_eq!(DimensionId::SC.weight_label(), "w1");
        assert_eq!(DimensionId::Waste.weight_label(), "w8");
    }
}
