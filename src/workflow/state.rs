use crate::features::{self, FeatureKey, FeatureRecord, RawFeatureInput, RawValue, ValidationErrors};
use crate::locale::Locale;
use crate::prediction::{PredictionResult, RequestError};

use super::summary::{Summary, summarize};

/// Identifies one accepted submission.
///
/// Tickets grow monotonically; only the newest one may change the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Where the form is in its submit cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// A request is in flight.
    Submitting(Ticket),
    /// The last request failed.
    Failed(RequestError),
    /// The last request returned results, kept as received.
    Succeeded(Vec<PredictionResult>),
}

/// An accepted submission: the record to send and the ticket to complete it with.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub ticket: Ticket,
    pub record: FeatureRecord,
}

/// Why a submit action did not start a request.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SubmitRejection {
    #[error("A prediction request is already in flight")]
    InFlight,
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

/// What happened to a finished request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The ticket was superseded by a reset or a newer submission.
    Discarded,
}

/// Owns the raw field values and the submission state of one form.
#[derive(Clone, Debug)]
pub struct PredictionWorkflow {
    input: RawFeatureInput,
    field_errors: Option<ValidationErrors>,
    state: SubmissionState,
    generation: u64,
}

impl Default for PredictionWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionWorkflow {
    /// A form pre-filled with the default record.
    pub fn new() -> Self {
        Self {
            input: RawFeatureInput::default(),
            field_errors: None,
            state: SubmissionState::Idle,
            generation: 0,
        }
    }

    pub fn input(&self) -> &RawFeatureInput {
        &self.input
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting(_))
    }

    /// Validation failures from the last submit attempt, kept current while
    /// the user edits.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        self.field_errors.as_ref()
    }

    pub fn results(&self) -> Option<&[PredictionResult]> {
        match &self.state {
            SubmissionState::Succeeded(results) => Some(results),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&RequestError> {
        match &self.state {
            SubmissionState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Banner text for the current request error, if any.
    pub fn error_message(&self, locale: Locale) -> Option<String> {
        self.error().map(|error| error.user_message(locale))
    }

    /// Aggregate of the current results; `None` when there are none.
    pub fn summary(&self) -> Option<Summary> {
        self.results().and_then(summarize)
    }

    /// Field-change handler.
    pub fn set_field(&mut self, key: FeatureKey, value: RawValue) {
        self.input.set(key, value);
        if self.field_errors.is_some() {
            self.field_errors = features::validate(&self.input).err();
        }
    }

    /// Field-change handler for free numeric entry.
    pub fn set_entry(&mut self, key: FeatureKey, text: &str) {
        self.set_field(key, RawValue::from_entry(text));
    }

    /// Validate the form and, if it passes, start a new request.
    ///
    /// Clears the previous result and error before handing out the ticket.
    pub fn submit(&mut self) -> Result<Submission, SubmitRejection> {
        if self.is_submitting() {
            return Err(SubmitRejection::InFlight);
        }
        let record = match features::validate(&self.input) {
            Ok(record) => record,
            Err(errors) => {
                self.field_errors = Some(errors.clone());
                return Err(errors.into());
            }
        };
        self.field_errors = None;
        let ticket = self.next_ticket();
        self.state = SubmissionState::Submitting(ticket);
        Ok(Submission { ticket, record })
    }

    /// Apply a finished request if it is still the current submission.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<PredictionResult>, RequestError>,
    ) -> Completion {
        if self.state != SubmissionState::Submitting(ticket) {
            return Completion::Discarded;
        }
        self.state = match outcome {
            Ok(results) => SubmissionState::Succeeded(results),
            Err(error) => SubmissionState::Failed(error),
        };
        Completion::Applied
    }

    /// Restore the default record and drop any result, error, or pending request.
    pub fn reset(&mut self) {
        self.input = RawFeatureInput::default();
        self.field_errors = None;
        self.state = SubmissionState::Idle;
        self.next_ticket();
    }

    fn next_ticket(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }
}
