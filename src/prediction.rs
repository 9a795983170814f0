//! Boundary with the remote prediction service: wire types, the HTTP client,
//! and how failures are reported.

mod api;
mod error;
mod types;

pub use api::HttpPredictionService;
pub use error::RequestError;
pub use types::{ModelCatalog, ModelInfo, ModelPrediction, PredictionResult};

use crate::features::FeatureRecord;

/// Anything that can score feature records against the remote models.
///
/// Implementations block until the service answers; callers run them off the
/// UI thread.
pub trait PredictionService: Send + Sync {
    /// Score a batch of records with every model the service hosts.
    fn predict(&self, records: &[FeatureRecord]) -> Result<Vec<PredictionResult>, RequestError>;

    /// Models the service hosts and their reported metrics.
    fn list_models(&self) -> Result<ModelCatalog, RequestError>;

    /// Succeeds when the service reports itself healthy.
    fn health(&self) -> Result<(), RequestError>;
}
