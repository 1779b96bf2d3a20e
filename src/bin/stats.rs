use std::collections::VecDeque;
use std::time::{Duration, Instant};

const FRAME_WINDOW: usize = 30;

/// Rolling frame timing plus the round trip of the last settled prediction.
pub struct Stats {
    stamp: Instant,
    last_frametimes: VecDeque<u64>,
    frames: u64,
    last_round_trip: Option<Duration>,
}

impl Stats {
    pub fn new() -> Self {
        Self {
            stamp: Instant::now(),
            last_frametimes: std::iter::repeat(0).take(FRAME_WINDOW).collect(),
            frames: 0,
            last_round_trip: None,
        }
    }

    pub fn capture_frame(&mut self) {
        self.last_frametimes.pop_front();
        self.last_frametimes
            .push_back(self.stamp.elapsed().as_micros() as u64);
        self.frames += 1;
        self.stamp = Instant::now();
    }

    /// Average frame time over the window, in microseconds.
    pub fn average_frametime(&self) -> f64 {
        self.last_frametimes.iter().sum::<u64>() as f64 / FRAME_WINDOW as f64
    }

    pub fn record_round_trip(&mut self, elapsed: Duration) {
        self.last_round_trip = Some(elapsed);
    }

    pub fn last_round_trip(&self) -> Option<Duration> {
        self.last_round_trip
    }
}
