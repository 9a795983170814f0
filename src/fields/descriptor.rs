use crate::features::{FeatureKey, RawValue};

/// Choice fields with at most this many options render as exclusive toggles.
const EXCLUSIVE_CHOICE_MAX_OPTIONS: usize = 2;

/// Presentation metadata for one input field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub key: FeatureKey,
    pub label: &'static str,
    pub hint: Option<&'static str>,
    pub kind: InputKind,
}

/// How a field is entered, carrying only the data that kind needs.
#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    /// Free numeric entry.
    Numeric(NumericEntry),
    /// A small option set shown side by side; exactly one is active.
    ExclusiveChoice(ChoiceSet),
    /// A longer option list where nothing may be selected yet.
    SingleSelect(ChoiceSet),
}

impl InputKind {
    /// Pick the choice widget for an option set by its size.
    pub fn for_choices(options: ChoiceSet) -> Self {
        if options.len() <= EXCLUSIVE_CHOICE_MAX_OPTIONS {
            Self::ExclusiveChoice(options)
        } else {
            Self::SingleSelect(options)
        }
    }

    pub fn choices(&self) -> Option<&ChoiceSet> {
        match self {
            Self::Numeric(_) => None,
            Self::ExclusiveChoice(options) | Self::SingleSelect(options) => Some(options),
        }
    }
}

/// Bounds and entry hints for a numeric field.
#[derive(Clone, Debug, PartialEq)]
pub struct NumericEntry {
    pub min: f64,
    pub max: f64,
    /// Increment used by drag/step widgets.
    pub step: f64,
    pub unit: Option<&'static str>,
}

impl NumericEntry {
    /// Placeholder text describing the accepted range.
    pub fn range_hint(&self) -> String {
        match self.unit {
            Some(unit) => format!("{}–{} {unit}", self.min, self.max),
            None => format!("{}–{}", self.min, self.max),
        }
    }
}

/// One selectable value of a choice field.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceOption {
    pub value: f64,
    pub label: &'static str,
    pub icon: Option<&'static str>,
    pub description: Option<&'static str>,
}

/// Ordered options of a choice field.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceSet {
    options: Vec<ChoiceOption>,
}

impl ChoiceSet {
    pub fn new(options: Vec<ChoiceOption>) -> Self {
        Self { options }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    /// Index of the option whose value equals the stored value numerically.
    ///
    /// `None` means nothing is selected: the value is empty, unparsable, or
    /// matches no option.
    pub fn active_index(&self, stored: &RawValue) -> Option<usize> {
        let value = stored.as_number()?;
        self.options.iter().position(|option| option.value == value)
    }

    pub fn active(&self, stored: &RawValue) -> Option<&ChoiceOption> {
        self.active_index(stored).map(|index| &self.options[index])
    }

    /// Stored value for choosing the option at `index`.
    pub fn select(&self, index: usize) -> Option<RawValue> {
        self.options
            .get(index)
            .map(|option| RawValue::Number(option.value))
    }
}

/// A titled section of the form.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldGroup {
    pub title: &'static str,
    pub description: &'static str,
    pub keys: Vec<FeatureKey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(value: f64, label: &'static str) -> ChoiceOption {
        ChoiceOption {
            value,
            label,
            icon: None,
            description: None,
        }
    }

    fn yes_no() -> ChoiceSet {
        ChoiceSet::new(vec![option(0.0, "No"), option(1.0, "Yes")])
    }

    #[test]
    fn kind_follows_option_count() {
        assert!(matches!(
            InputKind::for_choices(yes_no()),
            InputKind::ExclusiveChoice(_)
        ));
        let three = ChoiceSet::new(vec![
            option(1.0, "Up"),
            option(2.0, "Flat"),
            option(3.0, "Down"),
        ]);
        assert!(matches!(
            InputKind::for_choices(three),
            InputKind::SingleSelect(_)
        ));
    }

    #[test]
    fn active_option_uses_numeric_equality() {
        let options = yes_no();
        assert_eq!(options.active_index(&RawValue::Number(1.0)), Some(1));
        assert_eq!(options.active_index(&RawValue::Text("1".into())), Some(1));
        assert_eq!(options.active_index(&RawValue::Text("1.0".into())), Some(1));
        assert_eq!(options.active_index(&RawValue::Text(" 0 ".into())), Some(0));
        assert_eq!(options.active(&RawValue::Number(0.0)).unwrap().label, "No");
    }

    #[test]
    fn nothing_is_active_without_a_matching_value() {
        let options = yes_no();
        assert_eq!(options.active_index(&RawValue::Empty), None);
        assert_eq!(options.active_index(&RawValue::Number(0.5)), None);
        assert_eq!(options.active_index(&RawValue::Number(f64::NAN)), None);
        assert_eq!(options.active_index(&RawValue::Text("yes".into())), None);
    }

    #[test]
    fn selecting_stores_the_option_value_and_replaces_the_previous_one() {
        let options = yes_no();
        let mut stored = options.select(0).unwrap();
        assert_eq!(options.active_index(&stored), Some(0));
        stored = options.select(1).unwrap();
        assert_eq!(stored, RawValue::Number(1.0));
        assert_eq!(options.active_index(&stored), Some(1));
        assert_eq!(options.select(2), None);
    }

    #[test]
    fn range_hint_mentions_unit() {
        let entry = NumericEntry {
            min: 60.0,
            max: 250.0,
            step: 1.0,
            unit: Some("bpm"),
        };
        assert_eq!(entry.range_hint(), "60–250 bpm");
    }
}
