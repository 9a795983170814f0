use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::prediction::{ModelCatalog, PredictionResult, PredictionService, RequestError};
use crate::workflow::{Submission, Ticket};

/// Results posted back to the UI thread by worker threads.
#[derive(Debug)]
pub(crate) enum JobMessage {
    Predicted(PredictionJobResult),
    ServiceProbed(ServiceProbeResult),
}

#[derive(Debug)]
pub(crate) struct PredictionJobResult {
    pub(crate) ticket: Ticket,
    pub(crate) result: Result<Vec<PredictionResult>, RequestError>,
}

#[derive(Debug)]
pub(crate) struct ServiceProbeResult {
    pub(crate) result: Result<ModelCatalog, RequestError>,
}

/// Spawns worker threads and collects what they report.
pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    probe_in_progress: bool,
}

impl ControllerJobs {
    pub(crate) fn new() -> Self {
        let (message_tx, message_rx) = mpsc::channel();
        Self {
            message_tx,
            message_rx,
            probe_in_progress: false,
        }
    }

    /// Send one record to the service on a worker thread.
    ///
    /// The workflow admits one submission at a time, so no in-progress flag
    /// is kept here.
    pub(crate) fn begin_prediction(
        &self,
        service: Arc<dyn PredictionService>,
        submission: Submission,
    ) {
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let Submission { ticket, record } = submission;
            let result = service.predict(std::slice::from_ref(&record));
            let _ = tx.send(JobMessage::Predicted(PredictionJobResult { ticket, result }));
        });
    }

    /// Check service health and fetch the model catalog on a worker thread.
    pub(crate) fn begin_service_probe(&mut self, service: Arc<dyn PredictionService>) {
        if self.probe_in_progress {
            return;
        }
        self.probe_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = service.health().and_then(|()| service.list_models());
            let _ = tx.send(JobMessage::ServiceProbed(ServiceProbeResult { result }));
        });
    }

    pub(crate) fn clear_service_probe(&mut self) {
        self.probe_in_progress = false;
    }

    pub(crate) fn try_recv(&self) -> Option<JobMessage> {
        match self.message_rx.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) => None,
            // The controller keeps a sender alive, so this cannot happen.
            Err(TryRecvError::Disconnected) => None,
        }
    }
}
