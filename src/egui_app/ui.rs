//! egui renderer for the prediction form.

mod form_panel;
mod results_panel;
pub mod style;

use std::time::Duration;

use eframe::egui::{self, Frame, Margin, RichText};

use crate::config;
use crate::egui_app::controller::PredictionController;
use crate::egui_app::state::ServiceStatus;
use crate::locale::{Locale, Text};
use style::StatusTone;

/// Smallest window the form stays usable in.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(720.0, 560.0);
/// Poll interval for worker results while nothing else triggers a repaint.
const JOB_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the form using the shared controller state.
pub struct CardioApp {
    controller: PredictionController,
    visuals_set: bool,
}

impl CardioApp {
    pub fn new(mut controller: PredictionController) -> Self {
        controller.probe_service();
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        let locale = self.controller.locale();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(locale.text(Text::AppTitle))
                            .strong()
                            .size(18.0),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        self.render_locale_picker(ui);
                        ui.separator();
                        self.render_service_status(ui);
                    });
                });
            });
    }

    fn render_locale_picker(&mut self, ui: &mut egui::Ui) {
        let current = self.controller.locale();
        let mut chosen = current;
        egui::ComboBox::from_id_salt("locale_picker")
            .selected_text(current.native_name())
            .show_ui(ui, |ui| {
                for locale in Locale::ALL {
                    if ui
                        .selectable_label(locale == current, locale.native_name())
                        .clicked()
                    {
                        chosen = locale;
                    }
                }
            });
        ui.label(RichText::new(current.text(Text::Language)).color(style::palette().text_muted));
        if self.controller.set_locale(chosen) {
            if let Err(err) = config::save_locale(chosen) {
                tracing::warn!("Failed to save language preference: {err}");
            }
        }
    }

    fn render_service_status(&mut self, ui: &mut egui::Ui) {
        let locale = self.controller.locale();
        let (text, tone, hover) = match &self.controller.ui.service {
            ServiceStatus::Checking => (locale.text(Text::ServiceChecking), StatusTone::Busy, None),
            ServiceStatus::Online(catalog) => {
                let names: Vec<&str> = catalog.models.iter().map(|m| m.name.as_str()).collect();
                (
                    locale.text(Text::ServiceOnline),
                    StatusTone::Info,
                    Some(names.join(", ")),
                )
            }
            ServiceStatus::Offline(reason) => (
                locale.text(Text::ServiceOffline),
                StatusTone::Warning,
                Some(reason.clone()),
            ),
        };
        let response = ui.add(
            egui::Label::new(RichText::new(format!("● {text}")).color(style::status_color(tone)))
                .sense(egui::Sense::click()),
        );
        let response = match hover {
            Some(hover) if !hover.is_empty() => response.on_hover_text(hover),
            _ => response,
        };
        if !matches!(self.controller.ui.service, ServiceStatus::Checking) && response.clicked() {
            self.controller.probe_service();
        }
    }
}

impl eframe::App for CardioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_jobs();
        let busy = self.controller.workflow().is_submitting()
            || matches!(self.controller.ui.service, ServiceStatus::Checking);
        if busy {
            ctx.request_repaint_after(JOB_POLL_INTERVAL);
        }

        self.render_top_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(8.0);
                    self.render_form(ui);
                    ui.add_space(12.0);
                    self.render_actions(ui);
                    ui.add_space(12.0);
                    self.render_results(ui);
                });
        });
    }
}
