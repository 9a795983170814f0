use serde::{Deserialize, Serialize};

use super::key::{FeatureKey, ValueType};

/// A validated set of the nine clinical inputs for one patient.
///
/// Field names match the prediction service's column names. Only
/// [`super::validate`] builds records from user input, so every value is
/// inside its field's range and integer fields hold whole numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Age in years.
    pub age: f64,
    /// 1 = male, 0 = female.
    pub sex: i64,
    /// Chest pain type (1-4).
    pub cp: i64,
    /// Maximum heart rate achieved (bpm).
    pub thalach: f64,
    /// Exercise-induced angina (1 = yes).
    pub exang: i64,
    /// ST depression induced by exercise relative to rest.
    pub oldpeak: f64,
    /// Slope of the peak exercise ST segment (1-3).
    pub slope: i64,
    /// Number of major vessels coloured by fluoroscopy (0-3).
    pub ca: i64,
    /// Thalassemia (3 = normal, 6 = fixed defect, 7 = reversible defect).
    pub thal: i64,
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self {
            age: 54.0,
            sex: 1,
            cp: 3,
            thalach: 150.0,
            exang: 0,
            oldpeak: 1.0,
            slope: 2,
            ca: 0,
            thal: 3,
        }
    }
}

impl FeatureRecord {
    /// Numeric value of one field.
    pub fn value(&self, key: FeatureKey) -> f64 {
        match key {
            FeatureKey::Age => self.age,
            FeatureKey::Sex => self.sex as f64,
            FeatureKey::ChestPain => self.cp as f64,
            FeatureKey::MaxHeartRate => self.thalach,
            FeatureKey::ExerciseAngina => self.exang as f64,
            FeatureKey::StDepression => self.oldpeak,
            FeatureKey::StSlope => self.slope as f64,
            FeatureKey::MajorVessels => self.ca as f64,
            FeatureKey::Thalassemia => self.thal as f64,
        }
    }

    /// Values in wire order.
    pub fn values(&self) -> [f64; FeatureKey::COUNT] {
        FeatureKey::ALL.map(|key| self.value(key))
    }

    /// Build a record from values that already passed their field rules.
    pub(super) fn from_checked(values: [f64; FeatureKey::COUNT]) -> Self {
        let int = |key: FeatureKey| {
            debug_assert_eq!(key.rule().value_type, ValueType::Integer);
            values[key.index()] as i64
        };
        Self {
            age: values[FeatureKey::Age.index()],
            sex: int(FeatureKey::Sex),
            cp: int(FeatureKey::ChestPain),
            thalach: values[FeatureKey::MaxHeartRate.index()],
            exang: int(FeatureKey::ExerciseAngina),
            oldpeak: values[FeatureKey::StDepression.index()],
            slope: int(FeatureKey::StSlope),
            ca: int(FeatureKey::MajorVessels),
            thal: int(FeatureKey::Thalassemia),
        }
    }
}
