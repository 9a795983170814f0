//! Bridges the prediction workflow to the egui view and the worker threads.

mod jobs;

use std::sync::Arc;

use crate::config::AppSettings;
use crate::features::FeatureKey;
use crate::fields::{self, FieldDescriptor};
use crate::locale::Locale;
use crate::prediction::PredictionService;
use crate::workflow::{Completion, PredictionWorkflow, SubmitRejection};

use super::state::{FormUiState, ServiceStatus};
use jobs::{ControllerJobs, JobMessage, PredictionJobResult, ServiceProbeResult};

/// Owns one form's workflow and runs its requests off the UI thread.
pub struct PredictionController {
    pub ui: FormUiState,
    workflow: PredictionWorkflow,
    settings: AppSettings,
    service: Arc<dyn PredictionService>,
    jobs: ControllerJobs,
}

impl PredictionController {
    pub fn new(settings: AppSettings, service: Arc<dyn PredictionService>) -> Self {
        let workflow = PredictionWorkflow::new();
        Self {
            ui: FormUiState::new(workflow.input()),
            workflow,
            settings,
            service,
            jobs: ControllerJobs::new(),
        }
    }

    pub fn workflow(&self) -> &PredictionWorkflow {
        &self.workflow
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn locale(&self) -> Locale {
        self.settings.locale
    }

    /// Switch language; returns true when it changed.
    pub fn set_locale(&mut self, locale: Locale) -> bool {
        if self.settings.locale == locale {
            return false;
        }
        tracing::info!(locale = locale.code(), "Switching form language");
        self.settings.locale = locale;
        true
    }

    pub fn describe(&self, key: FeatureKey) -> &'static FieldDescriptor {
        fields::describe(key, self.locale())
    }

    /// Handle typing into a numeric entry.
    pub fn edit_numeric(&mut self, key: FeatureKey, text: String) {
        self.workflow.set_entry(key, &text);
        self.ui.numeric_text[key.index()] = text;
        self.refresh_validation_banner();
    }

    /// Handle picking option `index` of a choice field.
    pub fn choose_option(&mut self, key: FeatureKey, index: usize) {
        let Some(value) = self
            .describe(key)
            .kind
            .choices()
            .and_then(|choices| choices.select(index))
        else {
            tracing::warn!(field = %key, index, "Ignoring selection of unknown option");
            return;
        };
        self.workflow.set_field(key, value);
        self.refresh_validation_banner();
    }

    /// Validate and, if the form passes, send it to the service.
    ///
    /// Returns true when a request was started.
    pub fn submit(&mut self) -> bool {
        match self.workflow.submit() {
            Ok(submission) => {
                tracing::info!(ticket = ?submission.ticket, "Submitting prediction request");
                self.ui.show_validation_banner = false;
                self.jobs
                    .begin_prediction(Arc::clone(&self.service), submission);
                true
            }
            Err(SubmitRejection::InFlight) => {
                tracing::debug!("Submit ignored while a request is in flight");
                false
            }
            Err(SubmitRejection::Invalid(errors)) => {
                tracing::info!(invalid_fields = errors.len(), "Submit blocked by validation: {errors}");
                self.ui.show_validation_banner = true;
                false
            }
        }
    }

    /// Restore the default record and forget any result, error or pending request.
    pub fn reset(&mut self) {
        self.workflow.reset();
        self.ui.sync_numeric_text(self.workflow.input());
        self.ui.show_validation_banner = false;
    }

    /// Ask the service whether it is up and which models it serves.
    pub fn probe_service(&mut self) {
        self.ui.service = ServiceStatus::Checking;
        self.jobs.begin_service_probe(Arc::clone(&self.service));
    }

    /// Apply every finished job. Returns how many were handled.
    pub fn poll_jobs(&mut self) -> usize {
        let mut handled = 0;
        while let Some(message) = self.jobs.try_recv() {
            handled += 1;
            match message {
                JobMessage::Predicted(message) => self.handle_prediction(message),
                JobMessage::ServiceProbed(message) => self.handle_service_probe(message),
            }
        }
        handled
    }

    fn handle_prediction(&mut self, message: PredictionJobResult) {
        let PredictionJobResult { ticket, result } = message;
        match &result {
            Ok(results) => tracing::info!(?ticket, models = results.len(), "Predictions received"),
            Err(err) => tracing::warn!(?ticket, "Prediction request failed: {err}"),
        }
        if self.workflow.complete(ticket, result) == Completion::Discarded {
            tracing::debug!(?ticket, "Discarded response from a superseded submission");
        }
    }

    fn handle_service_probe(&mut self, message: ServiceProbeResult) {
        self.jobs.clear_service_probe();
        self.ui.service = match message.result {
            Ok(catalog) => {
                tracing::info!(models = catalog.models.len(), "Prediction service online");
                if !catalog.matches_form_features() {
                    tracing::warn!(
                        service_order = ?catalog.feature_order,
                        "Prediction service expects different features than the form sends"
                    );
                }
                ServiceStatus::Online(catalog)
            }
            Err(err) => {
                tracing::warn!("Prediction service probe failed: {err}");
                ServiceStatus::Offline(err.to_string())
            }
        };
    }

    fn refresh_validation_banner(&mut self) {
        if self.workflow.field_errors().is_none() {
            self.ui.show_validation_banner = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureRecord, RawValue};
    use crate::prediction::{
        ModelCatalog, ModelInfo, ModelPrediction, PredictionResult, RequestError,
    };
    use crate::workflow::{SubmissionState, Tone};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::time::{Duration, Instant};

    /// Answers each prediction only after the test releases it.
    struct GatedService {
        release: Mutex<Receiver<Result<Vec<PredictionResult>, RequestError>>>,
        calls: AtomicUsize,
        records: Mutex<Vec<FeatureRecord>>,
    }

    impl GatedService {
        fn new() -> (Arc<Self>, Sender<Result<Vec<PredictionResult>, RequestError>>) {
            let (tx, rx) = mpsc::channel();
            let service = Arc::new(Self {
                release: Mutex::new(rx),
                calls: AtomicUsize::new(0),
                records: Mutex::new(Vec::new()),
            });
            (service, tx)
        }
    }

    impl PredictionService for GatedService {
        fn predict(
            &self,
            records: &[FeatureRecord],
        ) -> Result<Vec<PredictionResult>, RequestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.records.lock().unwrap().extend_from_slice(records);
            self.release
                .lock()
                .unwrap()
                .recv()
                .unwrap_or_else(|_| Err(RequestError::Transport("test ended".into())))
        }

        fn list_models(&self) -> Result<ModelCatalog, RequestError> {
            Ok(ModelCatalog {
                feature_order: FeatureKey::ALL.iter().map(|k| k.wire_name().to_string()).collect(),
                models: vec![ModelInfo {
                    name: "KNN".into(),
                    ..ModelInfo::default()
                }],
            })
        }

        fn health(&self) -> Result<(), RequestError> {
            Ok(())
        }
    }

    fn labelled(labels: &[i64]) -> Vec<PredictionResult> {
        labels
            .iter()
            .map(|label| PredictionResult {
                name: format!("model-{label}"),
                predictions: vec![ModelPrediction {
                    label: Some(*label),
                    ..ModelPrediction::default()
                }],
                ..PredictionResult::default()
            })
            .collect()
    }

    fn wait_for_jobs(controller: &mut PredictionController) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while controller.poll_jobs() == 0 {
            assert!(Instant::now() < deadline, "job never finished");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn controller() -> (
        PredictionController,
        Arc<GatedService>,
        Sender<Result<Vec<PredictionResult>, RequestError>>,
    ) {
        let (service, release) = GatedService::new();
        let controller = PredictionController::new(AppSettings::default(), service.clone());
        (controller, service, release)
    }

    #[test]
    fn successful_submission_produces_results_and_summary() {
        let (mut controller, service, release) = controller();
        assert!(controller.submit());
        assert!(controller.workflow().is_submitting());
        release.send(Ok(labelled(&[1, 0, 0]))).unwrap();
        wait_for_jobs(&mut controller);

        let summary = controller.workflow().summary().unwrap();
        assert_eq!(summary.tone, Tone::Mixed);
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            service.records.lock().unwrap().as_slice(),
            &[FeatureRecord::default()]
        );
    }

    #[test]
    fn second_submit_while_pending_sends_nothing() {
        let (mut controller, service, release) = controller();
        assert!(controller.submit());
        assert!(!controller.submit());
        assert!(controller.workflow().is_submitting());
        release.send(Ok(labelled(&[0]))).unwrap();
        wait_for_jobs(&mut controller);
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn response_arriving_after_reset_is_dropped() {
        let (mut controller, _service, release) = controller();
        assert!(controller.submit());
        controller.reset();
        release.send(Ok(labelled(&[1, 1]))).unwrap();
        wait_for_jobs(&mut controller);
        assert_eq!(controller.workflow().state(), &SubmissionState::Idle);
        assert!(controller.workflow().results().is_none());
    }

    #[test]
    fn failed_request_shows_banner_and_allows_retry() {
        let (mut controller, service, release) = controller();
        assert!(controller.submit());
        release
            .send(Err(RequestError::Service {
                status: 500,
                message: None,
            }))
            .unwrap();
        wait_for_jobs(&mut controller);
        assert_eq!(
            controller.workflow().error_message(Locale::English).as_deref(),
            Some("Could not get a prediction. Please try again.")
        );

        assert!(controller.submit());
        release.send(Ok(labelled(&[0, 0]))).unwrap();
        wait_for_jobs(&mut controller);
        assert!(controller.workflow().error().is_none());
        assert_eq!(controller.workflow().summary().unwrap().tone, Tone::AllClear);
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn invalid_form_never_reaches_the_service() {
        let (mut controller, service, _release) = controller();
        controller.edit_numeric(FeatureKey::Age, String::new());
        assert!(!controller.submit());
        assert!(controller.ui.show_validation_banner);
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);

        controller.edit_numeric(FeatureKey::Age, "47".into());
        assert!(!controller.ui.show_validation_banner);
        assert_eq!(controller.ui.numeric_text(FeatureKey::Age), "47");
    }

    #[test]
    fn choosing_an_option_stores_its_value() {
        let (mut controller, _service, _release) = controller();
        controller.choose_option(FeatureKey::Thalassemia, 2);
        assert_eq!(
            controller.workflow().input().get(FeatureKey::Thalassemia),
            &RawValue::Number(7.0)
        );
        controller.choose_option(FeatureKey::Thalassemia, 9);
        assert_eq!(
            controller.workflow().input().get(FeatureKey::Thalassemia),
            &RawValue::Number(7.0)
        );
    }

    #[test]
    fn reset_refills_numeric_text() {
        let (mut controller, _service, _release) = controller();
        controller.edit_numeric(FeatureKey::StDepression, "3.2".into());
        controller.reset();
        assert_eq!(controller.ui.numeric_text(FeatureKey::StDepression), "1");
        assert_eq!(controller.ui.numeric_text(FeatureKey::Age), "54");
    }

    #[test]
    fn probe_reports_catalog() {
        let (mut controller, _service, _release) = controller();
        controller.probe_service();
        assert_eq!(controller.ui.service, ServiceStatus::Checking);
        wait_for_jobs(&mut controller);
        let ServiceStatus::Online(catalog) = &controller.ui.service else {
            panic!("expected online status");
        };
        assert_eq!(catalog.models[0].name, "KNN");
    }

    #[test]
    fn locale_switch_reports_change() {
        let (mut controller, _service, _release) = controller();
        assert!(!controller.set_locale(Locale::English));
        assert!(controller.set_locale(Locale::Portuguese));
        assert_eq!(controller.describe(FeatureKey::Age).label, "Idade");
    }
}
