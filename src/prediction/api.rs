//! Blocking HTTP client for the prediction service.

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ConfigError, ServiceSettings};
use crate::features::FeatureRecord;
use crate::http_client;

use super::PredictionService;
use super::error::RequestError;
use super::types::{ModelCatalog, PredictRequest, PredictionResult, results_from_entries};

const PREDICTIONS_PATH: &str = "predictions";
const MODELS_PATH: &str = "models";
const HEALTH_PATH: &str = "health";

/// Talks to the prediction service over HTTP.
#[derive(Clone, Debug)]
pub struct HttpPredictionService {
    agent: ureq::Agent,
    base: Url,
    max_response_bytes: usize,
}

impl HttpPredictionService {
    pub fn new(settings: &ServiceSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: http_client::agent(settings),
            base: settings.endpoint_base()?,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        self.base
            .join(path)
            .map_err(|err| RequestError::Transport(format!("Invalid endpoint {path}: {err}")))
    }

    fn read_success<T: DeserializeOwned>(&self, response: ureq::Response) -> Result<T, RequestError> {
        let body = http_client::read_response_text(response, self.max_response_bytes)
            .map_err(|err| RequestError::MalformedResponse(err.to_string()))?;
        parse_body(&body)
    }

    fn map_failure(&self, err: ureq::Error) -> RequestError {
        match err {
            ureq::Error::Status(code, response) => {
                let body = http_client::read_response_text(response, self.max_response_bytes)
                    .unwrap_or_default();
                RequestError::from_status(code, &body)
            }
            ureq::Error::Transport(err) => RequestError::Transport(err.to_string()),
        }
    }
}

impl PredictionService for HttpPredictionService {
    fn predict(&self, records: &[FeatureRecord]) -> Result<Vec<PredictionResult>, RequestError> {
        if records.is_empty() {
            return Err(RequestError::EmptyBatch);
        }
        let url = self.endpoint(PREDICTIONS_PATH)?;
        tracing::debug!(%url, records = records.len(), "Requesting predictions");
        let response = self
            .agent
            .post(url.as_str())
            .set("Accept", "application/json")
            .send_json(PredictRequest { records })
            .map_err(|err| self.map_failure(err))?;
        let entries: Vec<serde_json::Value> = self.read_success(response)?;
        Ok(results_from_entries(entries))
    }

    fn list_models(&self) -> Result<ModelCatalog, RequestError> {
        let url = self.endpoint(MODELS_PATH)?;
        let response = self
            .agent
            .get(url.as_str())
            .set("Accept", "application/json")
            .call()
            .map_err(|err| self.map_failure(err))?;
        self.read_success(response)
    }

    fn health(&self) -> Result<(), RequestError> {
        let url = self.endpoint(HEALTH_PATH)?;
        let response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|err| self.map_failure(err))?;
        let status: HealthStatus = self.read_success(response)?;
        if status.status.eq_ignore_ascii_case("ok") {
            Ok(())
        } else {
            Err(RequestError::MalformedResponse(format!(
                "service reported status '{}'",
                status.status
            )))
        }
    }
}

#[derive(serde::Deserialize)]
struct HealthStatus {
    #[serde(default)]
    status: String,
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, RequestError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(RequestError::MalformedResponse(
            "Empty response body".to_string(),
        ));
    }
    serde_json::from_str(trimmed).map_err(|err| RequestError::MalformedResponse(err.to_string()))
}
