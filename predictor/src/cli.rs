use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use ml_core::Feature;

use crate::{LandPricePredictor, PredictError, PredictionLog};

/// Runs one interactive prediction: prompt for every stored feature, print
/// the estimate, append it to the log.
///
/// Non-numeric input re-prompts for the same feature instead of aborting;
/// end of input while a value is still needed is an error.
///
/// # Errors
/// Propagates prediction and logging failures; prompt I/O failures surface
/// as `PredictError::Io`.
pub fn run_once<R: BufRead, W: Write>(
    predictor: &LandPricePredictor,
    log: &PredictionLog,
    input: &mut R,
    out: &mut W,
) -> Result<f64, PredictError> {
    writeln!(out, "\n=== Land Price Predictor ===\n")?;

    let mut values = BTreeMap::new();
    for &feature in predictor.features() {
        let value = prompt_value(feature, input, out)?;
        values.insert(feature.name().to_string(), value);
    }

    let prediction = predictor.predict(&values)?;
    writeln!(out, "\nPredicted price (EUR/m²): {prediction:.2}")?;

    log.append(predictor.features(), &values, prediction)?;
    writeln!(out, "Prediction logged to {}", log.path().display())?;

    Ok(prediction)
}

fn prompt_value<R: BufRead, W: Write>(
    feature: Feature,
    input: &mut R,
    out: &mut W,
) -> Result<f64, PredictError> {
    loop {
        write!(out, "Enter value for {}: ", feature.name())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(PredictError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("input ended while waiting for {}", feature.name()),
            )));
        }

        match line.trim().parse::<f64>() {
            Ok(value) => return Ok(value),
            Err(_) => {
                writeln!(out, "{:?} is not a number, try again", line.trim())?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use artifacts::ModelBundle;
    use ml_core::{LinearModel, ScalerParams};

    use super::*;

    fn predictor() -> LandPricePredictor {
        let ranges = [("year".to_string(), (2020.0, 2024.0))]
            .into_iter()
            .collect();
        let bundle = ModelBundle::new(
            LinearModel::from_parts(vec![400.0], 1800.0),
            ScalerParams::from_ranges(ranges),
            vec![Feature::Year],
        )
        .unwrap();
        LandPricePredictor::from_bundle(bundle)
    }

    fn temp_log(tag: &str) -> PredictionLog {
        let path = std::env::temp_dir().join(format!(
            "land_cli_{tag}_{}.csv",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        PredictionLog::new(path)
    }

    #[test]
    fn test_run_once_predicts_and_logs() {
        let log = temp_log("happy");
        let mut input = Cursor::new("2022\n");
        let mut out = Vec::new();

        let prediction = run_once(&predictor(), &log, &mut input, &mut out).unwrap();
        assert!((prediction - 2000.0).abs() < 1e-12);

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("Enter value for year"));
        assert!(rendered.contains("Predicted price (EUR/m²): 2000.00"));

        let logged = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(logged.lines().count(), 2);

        let _ = std::fs::remove_file(log.path());
    }

    #[test]
    fn test_bad_number_reprompts() {
        let log = temp_log("reprompt");
        let mut input = Cursor::new("not-a-number\n2024\n");
        let mut out = Vec::new();

        let prediction = run_once(&predictor(), &log, &mut input, &mut out).unwrap();
        assert!((prediction - 2200.0).abs() < 1e-12);

        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("is not a number"));

        let _ = std::fs::remove_file(log.path());
    }

    #[test]
    fn test_eof_mid_prompt_is_an_error() {
        let log = temp_log("eof");
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        assert!(matches!(
            run_once(&predictor(), &log, &mut input, &mut out),
            Err(PredictError::Io(_))
        ));
        assert!(!log.path().exists());
    }
}
