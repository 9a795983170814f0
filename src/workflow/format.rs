use crate::locale::{Locale, Text};

const MISSING_PERCENTAGE: &str = "-";

/// Render a `[0, 1]` scalar as a percentage with one decimal, or `-`.
pub fn format_percentage(value: Option<f64>) -> String {
    match value.filter(|value| !value.is_nan()) {
        Some(value) => format!("{:.1}%", value * 100.0),
        None => MISSING_PERCENTAGE.to_string(),
    }
}

/// Render a confidence with two decimals, or the locale's "not available".
pub fn format_confidence(value: Option<f64>, locale: Locale) -> String {
    match value.filter(|value| !value.is_nan()) {
        Some(value) => format!("{:.2}%", value * 100.0),
        None => locale.text(Text::NotAvailable).to_string(),
    }
}
