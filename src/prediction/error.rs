use serde_json::Value;

use crate::locale::{Locale, Text};

/// Body keys the service may carry a human-readable message under.
const MESSAGE_KEYS: [&str; 2] = ["detail", "message"];

/// A failed exchange with the prediction service.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// The service answered with a non-success status.
    #[error("Prediction service returned HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Service { status: u16, message: Option<String> },
    /// The service could not be reached or the connection broke.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The service answered but the body could not be understood.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// Nothing to score.
    #[error("No records to score")]
    EmptyBatch,
}

impl RequestError {
    /// Build the error for a non-success status from its (possibly empty) body.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        Self::Service {
            status,
            message: service_message(body),
        }
    }

    /// Single banner line for the form: the service's own message when it
    /// sent one, otherwise a localized fallback.
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            Self::Service {
                message: Some(message),
                ..
            } => message.clone(),
            Self::MalformedResponse(_) => locale.text(Text::UnexpectedResponse).to_string(),
            Self::Service { message: None, .. } | Self::Transport(_) | Self::EmptyBatch => {
                locale.text(Text::RequestFailed).to_string()
            }
        }
    }
}

/// Extract the human-readable message from an error body, if any.
///
/// Validation failures list their problems under `detail` as objects with a
/// `msg` entry; those are joined.
fn service_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body.trim()).ok()?;
    MESSAGE_KEYS
        .iter()
        .find_map(|key| value.get(key).and_then(message_text))
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => non_blank(text),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => non_blank(text),
                    Value::Object(_) => item.get("msg").and_then(Value::as_str).and_then(non_blank),
                    _ => None,
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(body: &str) -> Option<String> {
        match RequestError::from_status(422, body) {
            RequestError::Service { message, .. } => message,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn reads_message_from_either_conventional_key() {
        assert_eq!(message_of(r#"{"detail": "Missing features: age"}"#).as_deref(), Some("Missing features: age"));
        assert_eq!(message_of(r#"{"message": "Model offline"}"#).as_deref(), Some("Model offline"));
        assert_eq!(
            message_of(r#"{"detail": "first", "message": "second"}"#).as_deref(),
            Some("first")
        );
    }

    #[test]
    fn joins_validation_entries() {
        let body = r#"{"detail": [
            {"loc": ["body", "records", 0, "age"], "msg": "Input should be greater than or equal to 0"},
            {"loc": ["body", "records", 0, "sex"], "msg": "Input should be less than or equal to 1"}
        ]}"#;
        assert_eq!(
            message_of(body).as_deref(),
            Some("Input should be greater than or equal to 0; Input should be less than or equal to 1")
        );
    }

    #[test]
    fn falls_back_when_no_message_is_present() {
        for body in ["", "Internal Server Error", "{}", r#"{"detail": "  "}"#, r#"{"error": 3}"#] {
            assert_eq!(message_of(body), None, "{body}");
            assert_eq!(
                RequestError::from_status(500, body).user_message(Locale::English),
                "Could not get a prediction. Please try again."
            );
        }
    }

    #[test]
    fn service_message_is_shown_verbatim() {
        let err = RequestError::from_status(422, r#"{"detail": "All feature values must be numeric."}"#);
        for locale in Locale::ALL {
            assert_eq!(err.user_message(locale), "All feature values must be numeric.");
        }
    }

    #[test]
    fn malformed_and_transport_use_fixed_fallbacks() {
        let malformed = RequestError::MalformedResponse("expected value at line 1".into());
        assert_eq!(
            malformed.user_message(Locale::English),
            "The prediction service sent an unexpected response."
        );
        let transport = RequestError::Transport("connection refused".into());
        assert_eq!(
            transport.user_message(Locale::Portuguese),
            "Não foi possível obter a predição. Tente novamente."
        );
    }
}
