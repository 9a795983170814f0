use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::features::{FeatureKey, FeatureRecord};

/// Metric the service reports for every model.
pub const ACCURACY_METRIC: &str = "accuracy";
/// Class label of the positive (disease) outcome.
pub const POSITIVE_LABEL: i64 = 1;

/// Body of `POST /predictions`.
#[derive(Debug, Serialize)]
pub(crate) struct PredictRequest<'a> {
    pub records: &'a [FeatureRecord],
}

/// One model's output for a submitted batch.
///
/// Fields are read leniently: a missing or non-numeric scalar becomes `None`
/// and is shown as unavailable instead of failing the whole response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(rename = "model", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "numeric_map")]
    pub metrics: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "lenient_predictions")]
    pub predictions: Vec<ModelPrediction>,
}

impl PredictionResult {
    /// Prediction for the first submitted record.
    pub fn first_prediction(&self) -> Option<&ModelPrediction> {
        self.predictions.first()
    }

    /// True when the first prediction is the positive class.
    pub fn flags_risk(&self) -> bool {
        self.first_prediction()
            .is_some_and(|prediction| prediction.label == Some(POSITIVE_LABEL))
    }

    /// Test-set accuracy reported by the service.
    pub fn accuracy(&self) -> Option<f64> {
        self.metrics.get(ACCURACY_METRIC).copied()
    }
}

/// Classification of one record by one model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelPrediction {
    #[serde(default, deserialize_with = "lenient_label")]
    pub label: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
    /// Probability per class label, keyed by the label's string form.
    #[serde(default, deserialize_with = "numeric_map")]
    pub probabilities: BTreeMap<String, f64>,
}

impl ModelPrediction {
    /// Probability the model assigns to the positive class.
    pub fn positive_probability(&self) -> Option<f64> {
        self.probabilities
            .get(&POSITIVE_LABEL.to_string())
            .copied()
    }
}

/// Response of `GET /models`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelCatalog {
    #[serde(default)]
    pub feature_order: Vec<String>,
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "numeric_map")]
    pub metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub supports_probabilities: bool,
}

impl ModelCatalog {
    /// False when the service declares a feature order other than the
    /// form's. An empty order is taken as unknown and accepted.
    pub fn matches_form_features(&self) -> bool {
        self.feature_order.is_empty()
            || self
                .feature_order
                .iter()
                .map(String::as_str)
                .eq(FeatureKey::ALL.iter().map(|key| key.wire_name()))
    }
}

impl ModelInfo {
    pub fn accuracy(&self) -> Option<f64> {
        self.metrics.get(ACCURACY_METRIC).copied()
    }
}

/// Read a `POST /predictions` batch entry by entry.
///
/// An entry that is not a result object becomes an empty result, so the
/// other models' verdicts still reach the form.
pub(crate) fn results_from_entries(entries: Vec<Value>) -> Vec<PredictionResult> {
    entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).unwrap_or_default())
        .collect()
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => text,
        _ => String::new(),
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64))
}

fn lenient_label<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(label_from_value))
}

fn label_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0)
                .map(|float| float as i64)
        }),
        Value::Bool(flag) => Some(i64::from(*flag)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn numeric_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(entries)) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(key, value)| value.as_f64().map(|number| (key, number)))
        .collect())
}

fn lenient_predictions<'de, D>(deserializer: D) -> Result<Vec<ModelPrediction>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(entries)) = value else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).unwrap_or_default())
        .collect())
}
