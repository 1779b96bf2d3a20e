use std::time::Instant;

use predictor::*;

use crate::stats::Stats;

pub struct AppState {
    pub form: FormState,
    pub tracker: PredictionTracker,
    pub stats: Stats,
    client: PredictionClient,
    request_started: Option<Instant>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            form: FormState::default(),
            tracker: PredictionTracker::new(),
            stats: Stats::new(),
            client: PredictionClient::new(PREDICT_ENDPOINT),
            request_started: None,
        }
    }

    /// Kick off a prediction for the current form values.
    pub fn submit(&mut self) {
        if self.tracker.is_loading() {
            return;
        }
        self.request_started = Some(Instant::now());
        self.tracker
            .submit(self.client.clone(), self.form.request());
    }

    /// Per-frame maintenance. Collects a settled prediction if there is one.
    pub fn update(&mut self) {
        let was_loading = self.tracker.is_loading();
        self.tracker.poll();
        if was_loading && !self.tracker.is_loading() {
            if let Some(started) = self.request_started.take() {
                self.stats.record_round_trip(started.elapsed());
            }
        }
    }
}
