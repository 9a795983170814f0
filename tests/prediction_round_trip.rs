mod support;

use std::sync::Arc;
use std::time::{Duration, Instant};

use cardioform::config::{AppSettings, ServiceSettings};
use cardioform::egui_app::controller::PredictionController;
use cardioform::features::FeatureKey;
use cardioform::locale::Locale;
use cardioform::prediction::{HttpPredictionService, PredictionService, RequestError};
use cardioform::workflow::Tone;
use support::one_shot_server::serve_json_once;

fn controller_for(base_url: String) -> PredictionController {
    let settings = AppSettings {
        service: ServiceSettings {
            base_url,
            connect_timeout_secs: 2,
            read_timeout_secs: 5,
            ..ServiceSettings::default()
        },
        ..AppSettings::default()
    };
    let service = HttpPredictionService::new(&settings.service).unwrap();
    PredictionController::new(settings, Arc::new(service))
}

fn wait_until_settled(controller: &mut PredictionController) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while controller.workflow().is_submitting() {
        assert!(Instant::now() < deadline, "request never finished");
        controller.poll_jobs();
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn form_values_reach_the_service_and_results_are_summarized() {
    let body = r#"[
        {"model": "KNN", "metrics": {"accuracy": 0.8689},
         "predictions": [{"label": 1, "confidence": 0.8, "probabilities": {"0": 0.2, "1": 0.8}}]},
        {"model": "Logistic Regression", "metrics": {"accuracy": 0.8852},
         "predictions": [{"label": 0, "confidence": 0.64}]},
        {"model": "Decision Tree", "metrics": {"accuracy": 0.7541},
         "predictions": [{"label": 1}]}
    ]"#;
    let (url, request) = serve_json_once("200 OK", body);
    let mut controller = controller_for(url);

    controller.edit_numeric(FeatureKey::Age, "63".to_string());
    controller.edit_numeric(FeatureKey::StDepression, "2,3".to_string());
    controller.choose_option(FeatureKey::Sex, 0);
    assert!(controller.submit());
    wait_until_settled(&mut controller);

    let payload: serde_json::Value = serde_json::from_str(&request.recv().unwrap()).unwrap();
    let record = &payload["records"][0];
    assert_eq!(record["age"], 63.0);
    assert_eq!(record["oldpeak"], 2.3);
    assert_eq!(record["sex"], 0);
    assert_eq!(record["thal"], 3);

    let summary = controller.workflow().summary().unwrap();
    assert_eq!(summary.tone, Tone::Mixed);
    assert_eq!(
        summary.message(Locale::English),
        "2/3 models flagged risk of heart disease."
    );
    let results = controller.workflow().results().unwrap();
    assert_eq!(results[0].accuracy(), Some(0.8689));
}

#[test]
fn service_rejection_message_is_shown() {
    let (url, _request) = serve_json_once(
        "422 Unprocessable Entity",
        r#"{"detail": "Missing features: thal"}"#,
    );
    let mut controller = controller_for(url);
    assert!(controller.submit());
    wait_until_settled(&mut controller);

    assert_eq!(
        controller.workflow().error(),
        Some(&RequestError::Service {
            status: 422,
            message: Some("Missing features: thal".to_string()),
        })
    );
    assert_eq!(
        controller.workflow().error_message(Locale::Portuguese).as_deref(),
        Some("Missing features: thal")
    );
    assert!(controller.workflow().summary().is_none());
}

#[test]
fn health_probe_reads_the_status_document() {
    let (url, _request) = serve_json_once("200 OK", r#"{"status": "ok"}"#);
    let service = HttpPredictionService::new(&ServiceSettings {
        base_url: url,
        ..ServiceSettings::default()
    })
    .unwrap();
    assert_eq!(service.health(), Ok(()));
}
