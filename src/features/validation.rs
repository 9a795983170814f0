use std::fmt;

use super::key::{FeatureKey, ValueType};
use super::record::FeatureRecord;

/// The unvalidated value of one field as the form holds it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RawValue {
    /// Nothing entered or selected.
    #[default]
    Empty,
    /// Free text typed into a numeric entry.
    Text(String),
    /// A chosen option value or a pre-filled default.
    Number(f64),
}

impl RawValue {
    /// Map a numeric entry's text to a raw value; blank text is undefined, not zero.
    pub fn from_entry(text: &str) -> Self {
        if text.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(text.to_string())
        }
    }

    /// Numeric reading of the value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        self.coerce().ok()
    }

    /// Text to show in a numeric entry for this value.
    pub fn entry_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Number(value) => value.to_string(),
        }
    }

    fn coerce(&self) -> Result<f64, FieldFailure> {
        let value = match self {
            Self::Empty => return Err(FieldFailure::Required),
            Self::Number(value) => *value,
            Self::Text(text) => parse_number(text)?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FieldFailure::NotANumber)
        }
    }
}

/// Accepts `.` or a lone `,` as the decimal separator.
fn parse_number(text: &str) -> Result<f64, FieldFailure> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FieldFailure::Required);
    }
    let normalized = if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    normalized
        .parse::<f64>()
        .map_err(|_| FieldFailure::NotANumber)
}

/// Raw values for all nine fields, indexed by [`FeatureKey`].
#[derive(Clone, Debug, PartialEq)]
pub struct RawFeatureInput {
    values: [RawValue; FeatureKey::COUNT],
}

impl Default for RawFeatureInput {
    fn default() -> Self {
        Self::from_record(&FeatureRecord::default())
    }
}

impl RawFeatureInput {
    /// Every field undefined.
    pub fn empty() -> Self {
        Self {
            values: std::array::from_fn(|_| RawValue::Empty),
        }
    }

    /// Pre-fill every field from a record.
    pub fn from_record(record: &FeatureRecord) -> Self {
        Self {
            values: record.values().map(RawValue::Number),
        }
    }

    pub fn get(&self, key: FeatureKey) -> &RawValue {
        &self.values[key.index()]
    }

    pub fn set(&mut self, key: FeatureKey, value: RawValue) {
        self.values[key.index()] = value;
    }
}

/// Why a single field was rejected.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FieldFailure {
    #[error("a value is required")]
    Required,
    #[error("value is not a number")]
    NotANumber,
    #[error("value must be a whole number")]
    NotAnInteger,
    #[error("value must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },
}

/// A rejected field together with the reason.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub key: FeatureKey,
    pub failure: FieldFailure,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.failure)
    }
}

/// Every field that failed validation, in wire order.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{} invalid field(s): {}", .errors.len(), join_errors(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Failure recorded for `key`, if any.
    pub fn get(&self, key: FeatureKey) -> Option<&FieldFailure> {
        self.errors
            .iter()
            .find(|error| error.key == key)
            .map(|error| &error.failure)
    }

    pub fn contains(&self, key: FeatureKey) -> bool {
        self.get(key).is_some()
    }
}

/// Check one raw value against its field's type and range.
pub fn check_field(key: FeatureKey, raw: &RawValue) -> Result<f64, FieldFailure> {
    let rule = key.rule();
    let value = raw.coerce()?;
    if rule.value_type == ValueType::Integer && value.fract() != 0.0 {
        return Err(FieldFailure::NotAnInteger);
    }
    if !rule.contains(value) {
        return Err(FieldFailure::OutOfRange {
            min: rule.min,
            max: rule.max,
        });
    }
    Ok(value)
}

/// Validate every field independently and build a record if all pass.
pub fn validate(input: &RawFeatureInput) -> Result<FeatureRecord, ValidationErrors> {
    let mut values = [0.0; FeatureKey::COUNT];
    let mut errors = Vec::new();
    for key in FeatureKey::ALL {
        match check_field(key, input.get(key)) {
            Ok(value) => values[key.index()] = value,
            Err(failure) => errors.push(FieldError { key, failure }),
        }
    }
    if errors.is_empty() {
        Ok(FeatureRecord::from_checked(values))
    } else {
        Err(ValidationErrors { errors })
    }
}
