//! Heart disease risk form: field validation, prediction service client and
//! the egui front end that ties them together.

/// Per-user application directories.
pub mod app_dirs;
/// Persisted settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Clinical features and their validation.
pub mod features;
/// Presentation metadata for each input field.
pub mod fields;
pub(crate) mod http_client;
/// Display languages and fixed UI text.
pub mod locale;
/// File logging setup.
pub mod logging;
/// Prediction service client and response types.
pub mod prediction;
/// Submission state machine and result aggregation.
pub mod workflow;
