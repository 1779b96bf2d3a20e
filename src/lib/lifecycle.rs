use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{spawn, JoinHandle};

use super::*;

/// Lifecycle of the current submission. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestStatus {
    Idle,
    Loading,
    Success(f64),
    Failure(String),
}

/// Drives a prediction request through its lifecycle.
///
/// A submission spawns one worker thread which signals completion over the
/// channel; `poll` collects the result from the frame loop. At most one
/// worker is in flight, so there are no ordering concerns.
pub struct PredictionTracker {
    status: RequestStatus,
    worker: Option<JoinHandle<Result<f64, PredictError>>>,
    channel: (Sender<()>, Receiver<()>),
}

impl PredictionTracker {
    pub fn new() -> Self {
        Self {
            status: RequestStatus::Idle,
            worker: None,
            channel: channel(),
        }
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// Start a submission. Any previous result or error is replaced by
    /// `Loading`. A submission while a worker is still in flight is ignored;
    /// the disabled submit control is the primary guard.
    pub fn submit(&mut self, client: PredictionClient, request: PredictionRequest) {
        if self.worker.is_some() {
            log::debug!("Ignoring a submission while a prediction is still in flight.");
            return;
        }

        self.status = RequestStatus::Loading;
        let tx = self.channel.0.clone();
        self.worker = Some(spawn(move || {
            let result = client.predict(&request);
            if tx.send(()).is_err() {
                log::debug!("Could not send the prediction ready message. This most likely happened because the app was terminated.")
            }
            result
        }));
    }

    /// Check the worker for a settled request and resolve the status.
    pub fn poll(&mut self) {
        for _ in self.channel.1.try_iter() {
            if let Some(worker) = self.worker.take() {
                match worker.join() {
                    Ok(Ok(amount)) => {
                        self.status = RequestStatus::Success(amount);
                    }
                    Ok(Err(error)) => {
                        log::warn!("Prediction request failed. Reason:\r\n{}", error);
                        self.status = RequestStatus::Failure(error.user_message().to_string());
                    }
                    Err(e) => {
                        log::error!(
                            "Failed to join the prediction worker thread. Reason:\r\n{:?}",
                            e
                        );
                        self.status = RequestStatus::Failure(CONNECTIVITY_MESSAGE.to_string());
                    }
                }
            }
        }
    }

    /// Editing any field dismisses a displayed error. A displayed result
    /// stays visible until the next submission replaces it.
    pub fn acknowledge_edit(&mut self) {
        if matches!(self.status, RequestStatus::Failure(_)) {
            self.status = RequestStatus::Idle;
        }
    }
}

impl Default for PredictionTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
fn settle(tracker: &mut PredictionTracker) {
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    while tracker.is_loading() {
        assert!(
            std::time::Instant::now() < deadline,
            "prediction did not settle in time"
        );
        tracker.poll();
        std::thread::yield_now();
    }
}

#[test]
fn test_submission_resolves_to_success() {
    let url = crate::client::fixture::serve_once(
        "200 OK",
        r#"{"predicted_car_purchase_amount": 25000.5}"#,
    );
    let mut tracker = PredictionTracker::new();
    tracker.submit(PredictionClient::new(url), FormState::default().request());
    assert!(tracker.is_loading());
    settle(&mut tracker);
    assert_eq!(*tracker.status(), RequestStatus::Success(25000.5));
}

#[test]
fn test_submission_resolves_to_failure() {
    let url = crate::client::fixture::serve_once("422 Unprocessable Entity", r#"{"detail": "invalid age"}"#);
    let mut tracker = PredictionTracker::new();
    tracker.submit(PredictionClient::new(url), FormState::default().request());
    settle(&mut tracker);
    assert_eq!(
        *tracker.status(),
        RequestStatus::Failure("invalid age".to_string())
    );
}

#[test]
fn test_edit_clears_failure_but_not_success() {
    let mut tracker = PredictionTracker::new();
    tracker.status = RequestStatus::Failure("invalid age".to_string());
    tracker.acknowledge_edit();
    assert_eq!(*tracker.status(), RequestStatus::Idle);

    tracker.status = RequestStatus::Success(25000.5);
    tracker.acknowledge_edit();
    assert_eq!(*tracker.status(), RequestStatus::Success(25000.5));
}

#[test]
fn test_resubmission_replaces_a_settled_status() {
    let url = crate::client::fixture::serve_once("500 Internal Server Error", r#"{}"#);
    let mut tracker = PredictionTracker::new();
    tracker.status = RequestStatus::Success(25000.5);
    tracker.submit(PredictionClient::new(url), FormState::default().request());
    assert!(tracker.is_loading());
    settle(&mut tracker);
    assert_eq!(
        *tracker.status(),
        RequestStatus::Failure(SERVER_ERROR_MESSAGE.to_string())
    );
}
