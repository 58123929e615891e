mod dataset;
mod error;
mod metrics;
mod regression;
mod scaler;
mod schema;

pub use dataset::{Dataset, QuarterRecord};
pub use error::MlError;
pub use metrics::{evaluate, Evaluation};
pub use regression::LinearModel;
pub use scaler::ScalerParams;
pub use schema::Feature;
