use std::fmt;

/// One of the nine clinical inputs, in the order the service expects them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureKey {
    Age,
    Sex,
    ChestPain,
    MaxHeartRate,
    ExerciseAngina,
    StDepression,
    StSlope,
    MajorVessels,
    Thalassemia,
}

/// Whether a field accepts fractional values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    Real,
    Integer,
}

/// Type and closed range a field's value must satisfy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldRule {
    pub value_type: ValueType,
    pub min: f64,
    pub max: f64,
}

impl FieldRule {
    const fn real(min: f64, max: f64) -> Self {
        Self {
            value_type: ValueType::Real,
            min,
            max,
        }
    }

    const fn integer(min: f64, max: f64) -> Self {
        Self {
            value_type: ValueType::Integer,
            min,
            max,
        }
    }

    /// True when `value` lies inside `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl FeatureKey {
    pub const COUNT: usize = 9;

    /// All keys in wire order.
    pub const ALL: [FeatureKey; Self::COUNT] = [
        FeatureKey::Age,
        FeatureKey::Sex,
        FeatureKey::ChestPain,
        FeatureKey::MaxHeartRate,
        FeatureKey::ExerciseAngina,
        FeatureKey::StDepression,
        FeatureKey::StSlope,
        FeatureKey::MajorVessels,
        FeatureKey::Thalassemia,
    ];

    /// Position in [`FeatureKey::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used by the prediction service.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Sex => "sex",
            Self::ChestPain => "cp",
            Self::MaxHeartRate => "thalach",
            Self::ExerciseAngina => "exang",
            Self::StDepression => "oldpeak",
            Self::StSlope => "slope",
            Self::MajorVessels => "ca",
            Self::Thalassemia => "thal",
        }
    }

    /// Look a key up by its wire name.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.wire_name() == name)
    }

    pub fn rule(self) -> FieldRule {
        match self {
            Self::Age => FieldRule::real(1.0, 120.0),
            Self::Sex => FieldRule::integer(0.0, 1.0),
            Self::ChestPain => FieldRule::integer(1.0, 4.0),
            Self::MaxHeartRate => FieldRule::real(60.0, 250.0),
            Self::ExerciseAngina => FieldRule::integer(0.0, 1.0),
            Self::StDepression => FieldRule::real(0.0, 7.0),
            Self::StSlope => FieldRule::integer(1.0, 3.0),
            Self::MajorVessels => FieldRule::integer(0.0, 3.0),
            Self::Thalassemia => FieldRule::integer(3.0, 7.0),
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
