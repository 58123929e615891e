mod bundle;
mod error;
mod store;

pub use bundle::{ModelBundle, RunMetadata, FORMAT_VERSION};
pub use error::ArtifactError;
pub use store::ArtifactStore;
