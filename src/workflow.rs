//! The form's submission lifecycle: raw field values, the
//! idle/submitting/succeeded/failed state machine, and how a batch of model
//! results is summarized and formatted.

mod format;
mod state;
mod summary;

pub use format::{format_confidence, format_percentage};
pub use state::{Completion, PredictionWorkflow, SubmissionState, SubmitRejection, Submission, Ticket};
pub use summary::{Summary, Tone, summarize};
