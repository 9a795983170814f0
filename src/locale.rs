//! User-facing text, resolved through a single table keyed by [`Locale`].
//!
//! Field labels and option texts live next to the field table in
//! [`crate::fields`]; everything else the form shows is here.

use serde::{Deserialize, Serialize};

/// Languages the form can be shown in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "pt-BR")]
    Portuguese,
}

impl Locale {
    /// Every supported locale, in menu order.
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Portuguese];

    /// BCP 47 tag, matching the serialized form.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Portuguese => "pt-BR",
        }
    }

    /// Name of the language in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Portuguese => "Português",
        }
    }

    /// Resolve a fixed UI string.
    pub fn text(self, key: Text) -> &'static str {
        use Locale::*;
        use Text::*;
        match (self, key) {
            (English, AppTitle) => "Heart disease risk check",
            (Portuguese, AppTitle) => "Avaliação de risco cardíaco",
            (English, Submit) => "Run prediction",
            (Portuguese, Submit) => "Executar predição",
            (English, Submitting) => "Predicting…",
            (Portuguese, Submitting) => "Calculando…",
            (English, Reset) => "Reset form",
            (Portuguese, Reset) => "Limpar formulário",
            (English, Language) => "Language",
            (Portuguese, Language) => "Idioma",
            (English, SelectPlaceholder) => "Select…",
            (Portuguese, SelectPlaceholder) => "Selecione…",
            (English, FixHighlightedFields) => "Fix the highlighted fields before submitting.",
            (Portuguese, FixHighlightedFields) => {
                "Corrija os campos destacados antes de enviar."
            }
            (English, ResultsHeading) => "Model results",
            (Portuguese, ResultsHeading) => "Resultados dos modelos",
            (English, ModelColumn) => "Model",
            (Portuguese, ModelColumn) => "Modelo",
            (English, PredictionColumn) => "Prediction",
            (Portuguese, PredictionColumn) => "Predição",
            (English, ConfidenceColumn) => "Confidence",
            (Portuguese, ConfidenceColumn) => "Confiança",
            (English, RiskProbabilityColumn) => "Risk probability",
            (Portuguese, RiskProbabilityColumn) => "Probabilidade de risco",
            (English, AccuracyColumn) => "Test accuracy",
            (Portuguese, AccuracyColumn) => "Acurácia de teste",
            (English, RiskFlagged) => "Risk flagged",
            (Portuguese, RiskFlagged) => "Risco identificado",
            (English, NoIndication) => "No indication",
            (Portuguese, NoIndication) => "Sem indícios",
            (English, NoPrediction) => "No prediction",
            (Portuguese, NoPrediction) => "Sem predição",
            (English, NotAvailable) => "Not available",
            (Portuguese, NotAvailable) => "Não disponível",
            (English, RequestFailed) => "Could not get a prediction. Please try again.",
            (Portuguese, RequestFailed) => "Não foi possível obter a predição. Tente novamente.",
            (English, UnexpectedResponse) => "The prediction service sent an unexpected response.",
            (Portuguese, UnexpectedResponse) => {
                "O serviço de predição enviou uma resposta inesperada."
            }
            (English, ServiceOnline) => "Service online",
            (Portuguese, ServiceOnline) => "Serviço disponível",
            (English, ServiceOffline) => "Service unreachable",
            (Portuguese, ServiceOffline) => "Serviço indisponível",
            (English, ServiceChecking) => "Checking service…",
            (Portuguese, ServiceChecking) => "Verificando serviço…",
            (English, Disclaimer) => {
                "Screening aid only. Results do not replace a clinical diagnosis."
            }
            (Portuguese, Disclaimer) => {
                "Apenas apoio à triagem. Os resultados não substituem um diagnóstico clínico."
            }
        }
    }

    /// Field-scoped message for one validation failure.
    pub fn validation_message(self, failure: &crate::features::FieldFailure) -> String {
        use crate::features::FieldFailure::*;
        match (self, failure) {
            (Locale::English, Required) => "This field is required.".to_string(),
            (Locale::Portuguese, Required) => "Campo obrigatório.".to_string(),
            (Locale::English, NotANumber) => "Enter a number.".to_string(),
            (Locale::Portuguese, NotANumber) => "Informe um número.".to_string(),
            (Locale::English, NotAnInteger) => "Enter a whole number.".to_string(),
            (Locale::Portuguese, NotAnInteger) => "Informe um número inteiro.".to_string(),
            (Locale::English, OutOfRange { min, max }) => {
                format!("Must be between {min} and {max}.")
            }
            (Locale::Portuguese, OutOfRange { min, max }) => {
                format!("Deve estar entre {min} e {max}.")
            }
        }
    }

    /// Headline for an aggregated batch of model results.
    pub fn summary_message(
        self,
        tone: crate::workflow::Tone,
        positive_count: usize,
        total_count: usize,
    ) -> String {
        use crate::workflow::Tone::*;
        if total_count == 1 {
            return match (self, tone) {
                (Locale::English, AllClear) => {
                    "The model found no indication of heart disease.".to_string()
                }
                (Locale::Portuguese, AllClear) => {
                    "O modelo não encontrou indícios de doença cardíaca.".to_string()
                }
                (Locale::English, _) => "The model flagged risk of heart disease.".to_string(),
                (Locale::Portuguese, _) => {
                    "O modelo identificou risco de doença cardíaca.".to_string()
                }
            };
        }
        match (self, tone) {
            (Locale::English, AllClear) => format!(
                "All {total_count} models found no indication of heart disease."
            ),
            (Locale::Portuguese, AllClear) => format!(
                "Todos os {total_count} modelos não encontraram indícios de doença cardíaca."
            ),
            (Locale::English, AllPositive) => format!(
                "All {total_count} models flagged risk of heart disease."
            ),
            (Locale::Portuguese, AllPositive) => format!(
                "Todos os {total_count} modelos identificaram risco de doença cardíaca."
            ),
            (Locale::English, Mixed) => format!(
                "{positive_count}/{total_count} models flagged risk of heart disease."
            ),
            (Locale::Portuguese, Mixed) => format!(
                "{positive_count}/{total_count} modelos identificaram risco de doença cardíaca."
            ),
        }
    }
}

/// Keys of the fixed UI strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Text {
    AppTitle,
    Submit,
    Submitting,
    Reset,
    Language,
    SelectPlaceholder,
    FixHighlightedFields,
    ResultsHeading,
    ModelColumn,
    PredictionColumn,
    ConfidenceColumn,
    RiskProbabilityColumn,
    AccuracyColumn,
    RiskFlagged,
    NoIndication,
    NoPrediction,
    NotAvailable,
    /// Banner shown when a request fails without a service message.
    RequestFailed,
    /// Banner shown when a response body cannot be understood.
    UnexpectedResponse,
    ServiceOnline,
    ServiceOffline,
    ServiceChecking,
    Disclaimer,
}
