use std::env;

use log::info;

use trainer::{run, TrainerError, TrainingConfig};

const DEFAULT_DATA: &str = "data/processed/finnish_land_clean.csv";
const DEFAULT_ARTIFACTS_DIR: &str = "models";

fn main() -> Result<(), TrainerError> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let data_path = args.next().unwrap_or_else(|| DEFAULT_DATA.to_string());
    let artifacts_dir = args
        .next()
        .or_else(|| env::var("LAND_ARTIFACTS_DIR").ok())
        .unwrap_or_else(|| DEFAULT_ARTIFACTS_DIR.to_string());

    let config = TrainingConfig::new(data_path, artifacts_dir);
    info!(
        "training from {} into {}",
        config.data_path.display(),
        config.artifacts_dir.display()
    );

    let report = run(&config)?;

    for e in [&report.with_index, &report.without_index] {
        println!(
            "{:>14}: mae={:.4} rmse={:.4} r2={:.4}",
            e.label, e.mae, e.rmse, e.r2
        );
    }
    println!(
        "selected {} ({} source rows)",
        report.selected_variant, report.data_rows
    );

    Ok(())
}
