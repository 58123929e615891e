use serde::{Deserialize, Serialize};

use crate::{Feature, MlError};

/// One quarter's observation from the cleaned land price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterRecord {
    /// Quarter label, e.g. `"2020Q1"`.
    pub quarter: String,
    pub year: i32,
    /// Quarter number, 1–4.
    pub q_num: u8,
    pub real_price_index: f64,
    pub avg_lot_area: f64,
    pub sale_count: f64,
    /// Target: price per square meter in EUR.
    pub price_per_m2: f64,
}

impl QuarterRecord {
    /// Returns the value of a schema column for this record.
    ///
    /// Integer columns are widened to `f64` since they enter the regression
    /// as ordinary numeric inputs.
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::RealPriceIndex => self.real_price_index,
            Feature::AvgLotArea => self.avg_lot_area,
            Feature::SaleCount => self.sale_count,
            Feature::Year => f64::from(self.year),
            Feature::QuarterNum => f64::from(self.q_num),
        }
    }

    /// Returns the regression target.
    pub fn target(&self) -> f64 {
        self.price_per_m2
    }
}

/// An ordered collection of quarter records.
///
/// Construction sorts ascending by `(year, q_num)` so that the positional
/// train/test split below is a temporal holdout. The records are read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<QuarterRecord>,
}

impl Dataset {
    /// Creates a dataset, sorting the records chronologically.
    pub fn new(mut records: Vec<QuarterRecord>) -> Self {
        records.sort_by_key(|r| (r.year, r.q_num));
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[QuarterRecord] {
        &self.records
    }

    /// Splits positionally: the first `floor(len * train_ratio)` records are
    /// the training split, the remainder the held-out test split.
    ///
    /// # Errors
    /// Returns `MlError::InvalidInput` if the ratio is outside `(0, 1)` or
    /// either split would be empty.
    pub fn split(&self, train_ratio: f64) -> Result<(&[QuarterRecord], &[QuarterRecord]), MlError> {
        if !(train_ratio > 0.0 && train_ratio < 1.0) {
            return Err(MlError::InvalidInput("train ratio must be in (0, 1)"));
        }

        let split_idx = (self.records.len() as f64 * train_ratio) as usize;
        if split_idx == 0 || split_idx == self.records.len() {
            return Err(MlError::InvalidInput(
                "dataset is too small to split into non-empty train and test sets",
            ));
        }

        Ok(self.records.split_at(split_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, q_num: u8, price: f64) -> QuarterRecord {
        QuarterRecord {
            quarter: format!("{year}Q{q_num}"),
            year,
            q_num,
            real_price_index: 100.0,
            avg_lot_area: 80.0,
            sale_count: 50.0,
            price_per_m2: price,
        }
    }

    #[test]
    fn test_new_sorts_chronologically() {
        let ds = Dataset::new(vec![
            record(2021, 1, 3.0),
            record(2020, 2, 2.0),
            record(2020, 1, 1.0),
        ]);

        let prices: Vec<f64> = ds.records().iter().map(|r| r.price_per_m2).collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_split_is_positional() {
        let records = (0..10).map(|i| record(2020 + i / 4, (i % 4 + 1) as u8, i as f64));
        let ds = Dataset::new(records.collect());

        let (train, test) = ds.split(0.8).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
        assert_eq!(test[0].price_per_m2, 8.0);
    }

    #[test]
    fn test_split_rejects_empty_sides() {
        let ds = Dataset::new(vec![record(2020, 1, 1.0)]);
        assert!(ds.split(0.8).is_err());

        let ds = Dataset::new(vec![record(2020, 1, 1.0), record(2020, 2, 2.0)]);
        assert!(ds.split(0.99).is_err());
        assert!(ds.split(0.0).is_err());
        assert!(ds.split(1.0).is_err());
    }

    #[test]
    fn test_get_widens_integer_columns() {
        let r = record(2023, 3, 10.0);
        assert_eq!(r.get(Feature::Year), 2023.0);
        assert_eq!(r.get(Feature::QuarterNum), 3.0);
        assert_eq!(r.get(Feature::AvgLotArea), 80.0);
    }
}
