use std::sync::LazyLock;

use crate::features::{FeatureKey, ValueType};
use crate::locale::Locale;

use super::descriptor::{
    ChoiceOption, ChoiceSet, FieldDescriptor, FieldGroup, InputKind, NumericEntry,
};

/// English and Portuguese renderings of one string.
#[derive(Clone, Copy)]
struct Tr(&'static str, &'static str);

impl Tr {
    fn get(self, locale: Locale) -> &'static str {
        match locale {
            Locale::English => self.0,
            Locale::Portuguese => self.1,
        }
    }
}

struct FieldText {
    label: Tr,
    hint: Tr,
}

enum FieldInput {
    Numeric { step: f64, unit: Option<Tr> },
    Choice(&'static [OptionText]),
}

struct OptionText {
    value: f64,
    label: Tr,
    icon: Option<&'static str>,
    description: Option<Tr>,
}

const fn opt(value: f64, label: Tr) -> OptionText {
    OptionText {
        value,
        label,
        icon: None,
        description: None,
    }
}

const SEX_OPTIONS: &[OptionText] = &[
    OptionText {
        value: 0.0,
        label: Tr("Female", "Feminino"),
        icon: Some("♀"),
        description: None,
    },
    OptionText {
        value: 1.0,
        label: Tr("Male", "Masculino"),
        icon: Some("♂"),
        description: None,
    },
];

const CHEST_PAIN_OPTIONS: &[OptionText] = &[
    OptionText {
        value: 1.0,
        label: Tr("Typical angina", "Angina típica"),
        icon: None,
        description: Some(Tr(
            "Exertional chest pain relieved by rest",
            "Dor torácica aos esforços que alivia com repouso",
        )),
    },
    OptionText {
        value: 2.0,
        label: Tr("Atypical angina", "Angina atípica"),
        icon: None,
        description: Some(Tr(
            "Chest pain meeting only some angina criteria",
            "Dor torácica que atende apenas parte dos critérios de angina",
        )),
    },
    OptionText {
        value: 3.0,
        label: Tr("Non-anginal pain", "Dor não anginosa"),
        icon: None,
        description: Some(Tr(
            "Chest pain unlikely to be cardiac",
            "Dor torácica provavelmente não cardíaca",
        )),
    },
    opt(4.0, Tr("Asymptomatic", "Assintomático")),
];

const EXERCISE_ANGINA_OPTIONS: &[OptionText] = &[
    opt(0.0, Tr("No", "Não")),
    opt(1.0, Tr("Yes", "Sim")),
];

const SLOPE_OPTIONS: &[OptionText] = &[
    opt(1.0, Tr("Upsloping", "Ascendente")),
    opt(2.0, Tr("Flat", "Plano")),
    opt(3.0, Tr("Downsloping", "Descendente")),
];

const VESSEL_OPTIONS: &[OptionText] = &[
    opt(0.0, Tr("No vessels", "Nenhum vaso")),
    opt(1.0, Tr("1 vessel", "1 vaso")),
    opt(2.0, Tr("2 vessels", "2 vasos")),
    opt(3.0, Tr("3 vessels", "3 vasos")),
];

const THAL_OPTIONS: &[OptionText] = &[
    opt(3.0, Tr("Normal", "Normal")),
    opt(6.0, Tr("Fixed defect", "Defeito fixo")),
    opt(7.0, Tr("Reversible defect", "Defeito reversível")),
];

fn field_text(key: FeatureKey) -> FieldText {
    let (label, hint) = match key {
        FeatureKey::Age => (Tr("Age", "Idade"), Tr("Age in years", "Idade em anos")),
        FeatureKey::Sex => (
            Tr("Sex", "Sexo"),
            Tr("Biological sex", "Sexo biológico"),
        ),
        FeatureKey::ChestPain => (
            Tr("Chest pain type", "Tipo de dor torácica"),
            Tr(
                "Kind of chest pain the patient reports",
                "Tipo de dor torácica relatada pelo paciente",
            ),
        ),
        FeatureKey::MaxHeartRate => (
            Tr("Maximum heart rate", "Frequência cardíaca máxima"),
            Tr(
                "Highest heart rate reached during the exercise test",
                "Maior frequência cardíaca atingida no teste de esforço",
            ),
        ),
        FeatureKey::ExerciseAngina => (
            Tr("Exercise-induced angina", "Angina induzida por exercício"),
            Tr(
                "Chest pain triggered by exercise",
                "Dor torácica provocada pelo exercício",
            ),
        ),
        FeatureKey::StDepression => (
            Tr("ST depression", "Depressão do segmento ST"),
            Tr(
                "ST depression induced by exercise relative to rest",
                "Depressão do ST induzida pelo exercício em relação ao repouso",
            ),
        ),
        FeatureKey::StSlope => (
            Tr("ST slope", "Inclinação do ST"),
            Tr(
                "Slope of the peak exercise ST segment",
                "Inclinação do segmento ST no pico do exercício",
            ),
        ),
        FeatureKey::MajorVessels => (
            Tr("Major vessels", "Vasos principais"),
            Tr(
                "Major vessels coloured by fluoroscopy",
                "Vasos principais visualizados na fluoroscopia",
            ),
        ),
        FeatureKey::Thalassemia => (
            Tr("Thalassemia", "Talassemia"),
            Tr(
                "Result of the thallium stress test",
                "Resultado da cintilografia com tálio",
            ),
        ),
    };
    FieldText { label, hint }
}

fn field_input(key: FeatureKey) -> FieldInput {
    match key {
        FeatureKey::Age => FieldInput::Numeric {
            step: 1.0,
            unit: Some(Tr("years", "anos")),
        },
        FeatureKey::MaxHeartRate => FieldInput::Numeric {
            step: 1.0,
            unit: Some(Tr("bpm", "bpm")),
        },
        FeatureKey::StDepression => FieldInput::Numeric {
            step: 0.1,
            unit: Some(Tr("mm", "mm")),
        },
        FeatureKey::Sex => FieldInput::Choice(SEX_OPTIONS),
        FeatureKey::ChestPain => FieldInput::Choice(CHEST_PAIN_OPTIONS),
        FeatureKey::ExerciseAngina => FieldInput::Choice(EXERCISE_ANGINA_OPTIONS),
        FeatureKey::StSlope => FieldInput::Choice(SLOPE_OPTIONS),
        FeatureKey::MajorVessels => FieldInput::Choice(VESSEL_OPTIONS),
        FeatureKey::Thalassemia => FieldInput::Choice(THAL_OPTIONS),
    }
}

struct GroupText {
    title: Tr,
    description: Tr,
    keys: &'static [FeatureKey],
}

const GROUPS: &[GroupText] = &[
    GroupText {
        title: Tr("Patient profile", "Perfil do paciente"),
        description: Tr("Who the patient is", "Dados básicos do paciente"),
        keys: &[FeatureKey::Age, FeatureKey::Sex],
    },
    GroupText {
        title: Tr("Symptoms & exercise test", "Sintomas e teste de esforço"),
        description: Tr(
            "Reported symptoms and stress test readings",
            "Sintomas relatados e medidas do teste de esforço",
        ),
        keys: &[
            FeatureKey::ChestPain,
            FeatureKey::ExerciseAngina,
            FeatureKey::MaxHeartRate,
            FeatureKey::StDepression,
            FeatureKey::StSlope,
        ],
    },
    GroupText {
        title: Tr("Imaging & lab", "Imagem e laboratório"),
        description: Tr(
            "Fluoroscopy and thallium scan findings",
            "Achados da fluoroscopia e da cintilografia",
        ),
        keys: &[FeatureKey::MajorVessels, FeatureKey::Thalassemia],
    },
];

struct Catalog {
    descriptors: Vec<FieldDescriptor>,
    groups: Vec<FieldGroup>,
}

impl Catalog {
    fn build(locale: Locale) -> Self {
        let descriptors = FeatureKey::ALL
            .into_iter()
            .map(|key| build_descriptor(key, locale))
            .collect();
        let groups = GROUPS
            .iter()
            .map(|group| FieldGroup {
                title: group.title.get(locale),
                description: group.description.get(locale),
                keys: group.keys.to_vec(),
            })
            .collect();
        Self {
            descriptors,
            groups,
        }
    }
}

fn build_descriptor(key: FeatureKey, locale: Locale) -> FieldDescriptor {
    let text = field_text(key);
    let kind = match field_input(key) {
        FieldInput::Numeric { step, unit } => {
            let rule = key.rule();
            debug_assert_eq!(rule.value_type, ValueType::Real);
            InputKind::Numeric(NumericEntry {
                min: rule.min,
                max: rule.max,
                step,
                unit: unit.map(|unit| unit.get(locale)),
            })
        }
        FieldInput::Choice(options) => InputKind::for_choices(ChoiceSet::new(
            options
                .iter()
                .map(|option| ChoiceOption {
                    value: option.value,
                    label: option.label.get(locale),
                    icon: option.icon,
                    description: option.description.map(|text| text.get(locale)),
                })
                .collect(),
        )),
    };
    FieldDescriptor {
        key,
        label: text.label.get(locale),
        hint: Some(text.hint.get(locale)),
        kind,
    }
}

static ENGLISH: LazyLock<Catalog> = LazyLock::new(|| Catalog::build(Locale::English));
static PORTUGUESE: LazyLock<Catalog> = LazyLock::new(|| Catalog::build(Locale::Portuguese));

fn catalog(locale: Locale) -> &'static Catalog {
    match locale {
        Locale::English => &ENGLISH,
        Locale::Portuguese => &PORTUGUESE,
    }
}

/// Descriptor for `key` in `locale`.
pub fn describe(key: FeatureKey, locale: Locale) -> &'static FieldDescriptor {
    &catalog(locale).descriptors[key.index()]
}

/// Form sections in display order.
pub fn groups(locale: Locale) -> &'static [FieldGroup] {
    &catalog(locale).groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::RawFeatureInput;

    #[test]
    fn every_key_is_described_under_its_own_key() {
        for locale in Locale::ALL {
            for key in FeatureKey::ALL {
                let descriptor = describe(key, locale);
                assert_eq!(descriptor.key, key);
                assert!(!descriptor.label.is_empty());
                assert!(descriptor.hint.is_some());
            }
        }
    }

    #[test]
    fn every_key_appears_in_exactly_one_group() {
        for locale in Locale::ALL {
            let mut seen: Vec<FeatureKey> = groups(locale)
                .iter()
                .flat_map(|group| group.keys.iter().copied())
                .collect();
            seen.sort();
            assert_eq!(seen, FeatureKey::ALL.to_vec());
        }
    }

    #[test]
    fn numeric_fields_reuse_schema_bounds() {
        for key in FeatureKey::ALL {
            let rule = key.rule();
            match &describe(key, Locale::English).kind {
                InputKind::Numeric(entry) => {
                    assert_eq!(rule.value_type, ValueType::Real, "{key}");
                    assert_eq!((entry.min, entry.max), (rule.min, rule.max));
                }
                _ => assert_eq!(rule.value_type, ValueType::Integer, "{key}"),
            }
        }
    }

    #[test]
    fn two_option_fields_are_exclusive_and_longer_ones_are_selects() {
        let kinds: Vec<_> = FeatureKey::ALL
            .into_iter()
            .map(|key| match &describe(key, Locale::English).kind {
                InputKind::Numeric(_) => "numeric",
                InputKind::ExclusiveChoice(_) => "exclusive",
                InputKind::SingleSelect(_) => "select",
            })
            .collect();
        assert_eq!(
            kinds,
            [
                "numeric",
                "exclusive",
                "select",
                "numeric",
                "exclusive",
                "numeric",
                "select",
                "select",
                "select"
            ]
        );
    }

    #[test]
    fn option_values_pass_their_field_rules() {
        for key in FeatureKey::ALL {
            let Some(choices) = describe(key, Locale::English).kind.choices() else {
                continue;
            };
            for option in choices.options() {
                assert!(key.rule().contains(option.value), "{key}={}", option.value);
                assert_eq!(option.value.fract(), 0.0);
            }
        }
    }

    #[test]
    fn defaults_select_an_existing_option() {
        let input = RawFeatureInput::default();
        for key in FeatureKey::ALL {
            if let Some(choices) = describe(key, Locale::English).kind.choices() {
                assert!(choices.active(input.get(key)).is_some(), "{key}");
            }
        }
    }

    #[test]
    fn locales_share_structure_but_not_text() {
        for key in FeatureKey::ALL {
            let en = describe(key, Locale::English);
            let pt = describe(key, Locale::Portuguese);
            let values = |d: &FieldDescriptor| {
                d.kind
                    .choices()
                    .map(|c| c.options().iter().map(|o| o.value).collect::<Vec<_>>())
            };
            assert_eq!(values(en), values(pt));
        }
        assert_eq!(describe(FeatureKey::Sex, Locale::Portuguese).label, "Sexo");
        assert_eq!(groups(Locale::English)[0].title, "Patient profile");
    }
}
