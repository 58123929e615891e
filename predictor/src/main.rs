use std::env;
use std::io;

use log::info;

use artifacts::ArtifactStore;
use predictor::{cli, LandPricePredictor, PredictError, PredictionLog};

const DEFAULT_ARTIFACTS_DIR: &str = "models";
const DEFAULT_LOG: &str = "logs/predictions_land.csv";

fn main() -> Result<(), PredictError> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let artifacts_dir = args
        .next()
        .or_else(|| env::var("LAND_ARTIFACTS_DIR").ok())
        .unwrap_or_else(|| DEFAULT_ARTIFACTS_DIR.to_string());
    let log_path = args
        .next()
        .or_else(|| env::var("LAND_PREDICTION_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG.to_string());

    let store = ArtifactStore::new(artifacts_dir);
    let predictor = LandPricePredictor::from_store(&store)?;
    info!("artifacts loaded from {}", store.dir().display());

    let log = PredictionLog::new(log_path);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    cli::run_once(&predictor, &log, &mut input, &mut out)?;
    Ok(())
}
