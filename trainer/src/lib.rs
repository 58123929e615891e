pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod selector;

pub use error::TrainerError;
pub use pipeline::{run, TrainingConfig, TrainingReport};
