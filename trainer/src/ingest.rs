use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use ml_core::{Dataset, QuarterRecord};

use crate::TrainerError;

/// One row of the cleaned CSV, before validation.
///
/// Every statistic is optional here: the filtering policy below drops an
/// incomplete quarter entirely instead of letting a null reach the dataset.
#[derive(Debug, Deserialize)]
struct RawRecord {
    quarter: String,
    reaalihintaindeksi: Option<f64>,
    #[serde(rename = "neliöhinta")]
    neliohinta: Option<f64>,
    keskipinta_ala: Option<f64>,
    kauppojen_lkm: Option<f64>,
}

/// Parses a `YYYYQn` quarter label into `(year, q_num)`.
fn parse_quarter(label: &str) -> Option<(i32, u8)> {
    let (year, q) = label.split_once('Q')?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let q_num: u8 = q.parse().ok()?;
    (1..=4).contains(&q_num).then_some((year, q_num))
}

fn validate(raw: RawRecord) -> Option<QuarterRecord> {
    let (year, q_num) = parse_quarter(&raw.quarter)?;
    Some(QuarterRecord {
        year,
        q_num,
        real_price_index: raw.reaalihintaindeksi?,
        avg_lot_area: raw.keskipinta_ala?,
        sale_count: raw.kauppojen_lkm?,
        price_per_m2: raw.neliohinta?,
        quarter: raw.quarter,
    })
}

/// Reads the cleaned quarterly table into a chronologically sorted dataset.
///
/// A row with a malformed quarter label, a missing statistic, or a cell that
/// does not parse as a number is dropped and logged; it never produces a
/// record with nulls. This is the filtering policy, not an error.
///
/// # Errors
/// - `TrainerError::Csv` if the file itself cannot be read.
/// - `TrainerError::EmptyDataset` if no usable record survives filtering,
///   which stops the pipeline before any training occurs.
pub fn load_dataset(path: &Path) -> Result<Dataset, TrainerError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in reader.deserialize::<RawRecord>() {
        match row {
            Ok(raw) => {
                let label = raw.quarter.clone();
                match validate(raw) {
                    Some(record) => records.push(record),
                    None => {
                        dropped += 1;
                        warn!("dropping incomplete quarter {label:?}");
                    }
                }
            }
            Err(e) => {
                dropped += 1;
                warn!("dropping unparsable row: {e}");
            }
        }
    }

    if records.is_empty() {
        return Err(TrainerError::EmptyDataset(path.to_path_buf()));
    }

    info!(
        "ingested {} quarter(s) from {} ({dropped} dropped)",
        records.len(),
        path.display()
    );
    Ok(Dataset::new(records))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn write_csv(tag: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "land_ingest_{tag}_{}.csv",
            std::process::id()
        ));
        fs::write(&path, body).unwrap();
        path
    }

    const HEADER: &str = "quarter,reaalihintaindeksi,neliöhinta,keskipinta_ala,kauppojen_lkm,year,q_num\n";

    #[test]
    fn test_well_formed_rows_are_ingested_sorted() {
        let path = write_csv(
            "sorted",
            &format!(
                "{HEADER}2020Q2,102,2050,82,48,2020,2\n2020Q1,100,2000,80,50,2020,1\n"
            ),
        );

        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].quarter, "2020Q1");
        assert_eq!(ds.records()[1].q_num, 2);
        assert_eq!(ds.records()[0].price_per_m2, 2000.0);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_malformed_rows_are_dropped_not_nulled() {
        let path = write_csv(
            "dropped",
            &format!(
                "{HEADER}\
                 2020Q1,100,2000,80,50,2020,1\n\
                 2020Q5,100,2000,80,50,2020,5\n\
                 20x0Q1,100,2000,80,50,2020,1\n\
                 2020Q2,,2050,82,48,2020,2\n\
                 2020Q3,abc,2050,82,48,2020,3\n\
                 2020Q4,104,2100,84,46,2020,4\n"
            ),
        );

        let ds = load_dataset(&path).unwrap();
        let quarters: Vec<&str> = ds.records().iter().map(|r| r.quarter.as_str()).collect();
        assert_eq!(quarters, vec!["2020Q1", "2020Q4"]);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_empty_result_stops_the_pipeline() {
        let path = write_csv("empty", HEADER);
        assert!(matches!(
            load_dataset(&path),
            Err(TrainerError::EmptyDataset(_))
        ));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_quarter_label_parsing() {
        assert_eq!(parse_quarter("2020Q1"), Some((2020, 1)));
        assert_eq!(parse_quarter("1999Q4"), Some((1999, 4)));
        assert_eq!(parse_quarter("2020Q5"), None);
        assert_eq!(parse_quarter("2020"), None);
        assert_eq!(parse_quarter("Q1"), None);
        assert_eq!(parse_quarter("20201Q1"), None);
    }
}
