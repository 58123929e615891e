pub mod cli;
mod error;
mod prediction_log;
mod predictor;

pub use error::PredictError;
pub use prediction_log::PredictionLog;
pub use predictor::LandPricePredictor;
