use eframe::egui::{self, Frame, Margin, RichText};

use super::CardioApp;
use super::style::{self, StatusTone};
use crate::locale::{Locale, Text};
use crate::prediction::PredictionResult;
use crate::workflow::{format_confidence, format_percentage};

impl CardioApp {
    /// Error banner, summary banner and per-model table.
    pub(super) fn render_results(&mut self, ui: &mut egui::Ui) {
        let locale = self.controller.locale();
        let workflow = self.controller.workflow();

        if let Some(message) = workflow.error_message(locale) {
            banner(ui, &message, style::status_color(StatusTone::Error));
        }

        if let Some(summary) = workflow.summary() {
            banner(ui, &summary.message(locale), style::summary_color(summary.tone));
        }

        if let Some(results) = workflow.results().filter(|results| !results.is_empty()) {
            ui.add_space(8.0);
            ui.label(RichText::new(locale.text(Text::ResultsHeading)).strong().size(15.0));
            ui.add_space(4.0);
            results_grid(ui, results, locale);
        }

        ui.add_space(12.0);
        ui.label(
            RichText::new(locale.text(Text::Disclaimer))
                .color(style::palette().text_muted)
                .small(),
        );
    }
}

fn banner(ui: &mut egui::Ui, text: &str, colour: egui::Color32) {
    Frame::new()
        .stroke(egui::Stroke::new(1.0, colour))
        .inner_margin(Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(text).color(colour).strong());
        });
    ui.add_space(6.0);
}

fn results_grid(ui: &mut egui::Ui, results: &[PredictionResult], locale: Locale) {
    let palette = style::palette();
    egui::Grid::new("model_results")
        .num_columns(5)
        .striped(true)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            for column in [
                Text::ModelColumn,
                Text::PredictionColumn,
                Text::ConfidenceColumn,
                Text::RiskProbabilityColumn,
                Text::AccuracyColumn,
            ] {
                ui.label(RichText::new(locale.text(column)).color(palette.text_muted));
            }
            ui.end_row();

            for result in results {
                let prediction = result.first_prediction();
                ui.label(&result.name);
                let (label, colour) = match prediction.and_then(|p| p.label) {
                    None => (locale.text(Text::NoPrediction), palette.text_muted),
                    Some(_) if result.flags_risk() => {
                        (locale.text(Text::RiskFlagged), palette.danger)
                    }
                    Some(_) => (locale.text(Text::NoIndication), palette.success),
                };
                ui.label(RichText::new(label).color(colour));
                ui.label(format_confidence(prediction.and_then(|p| p.confidence), locale));
                ui.label(format_percentage(
                    prediction.and_then(|p| p.positive_probability()),
                ));
                ui.label(format_percentage(result.accuracy()));
                ui.end_row();
            }
        });
}
