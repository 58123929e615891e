use std::fmt;

use serde::{Deserialize, Serialize};

/// A column of the quarterly land price table that can serve as a regressor.
///
/// The closed enum is the schema: column access anywhere in the pipeline goes
/// through it, and the string form below is the only name ever persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Real price index of the quarter (`reaalihintaindeksi`).
    RealPriceIndex,
    /// Average lot area in m² (`keskipinta_ala`).
    AvgLotArea,
    /// Number of transactions in the quarter (`kauppojen_lkm`).
    SaleCount,
    /// Calendar year (`year`).
    Year,
    /// Quarter number 1–4 (`q_num`).
    QuarterNum,
}

impl Feature {
    /// All candidate regressors, in table order.
    pub const ALL: [Feature; 5] = [
        Feature::RealPriceIndex,
        Feature::AvgLotArea,
        Feature::SaleCount,
        Feature::Year,
        Feature::QuarterNum,
    ];

    /// Returns the persisted column name for this feature.
    pub fn name(self) -> &'static str {
        match self {
            Feature::RealPriceIndex => "reaalihintaindeksi",
            Feature::AvgLotArea => "keskipinta_ala",
            Feature::SaleCount => "kauppojen_lkm",
            Feature::Year => "year",
            Feature::QuarterNum => "q_num",
        }
    }

    /// Resolves a persisted column name back to its feature.
    ///
    /// # Returns
    /// `None` if the name does not belong to the schema.
    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_name(feature.name()), Some(feature));
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert_eq!(Feature::from_name("neliöhinta"), None);
        assert_eq!(Feature::from_name(""), None);
    }
}
