#![deny(missing_docs)]

//! Entry point for the heart disease risk form.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use std::sync::Arc;

use cardioform::config::{self, AppSettings};
use cardioform::egui_app::controller::PredictionController;
use cardioform::egui_app::ui::{CardioApp, MIN_VIEWPORT_SIZE};
use cardioform::logging;
use cardioform::prediction::HttpPredictionService;
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let mut settings = config::load_or_default().unwrap_or_else(|err| {
        tracing::warn!("Failed to load config, using defaults: {err}");
        AppSettings::default()
    });
    let service = match HttpPredictionService::new(&settings.service) {
        Ok(service) => service,
        Err(err) => {
            tracing::warn!("Ignoring service settings: {err}");
            settings.service = Default::default();
            HttpPredictionService::new(&settings.service)?
        }
    };
    tracing::info!(base_url = %service.base_url(), "Using prediction service");

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::vec2(960.0, 820.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "CardioForm",
        native_options,
        Box::new(move |_cc| {
            let controller = PredictionController::new(settings, Arc::new(service));
            Ok(Box::new(CardioApp::new(controller)))
        }),
    )?;
    Ok(())
}
