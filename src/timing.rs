use log::info;
use std::time::{Duration, Instant};

/// Logs how long a scope took when dropped.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    label: String,
    reported: bool,
}

impl Timer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            label: label.into(),
            reported: false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    /// Logs elapsed time with a throughput figure and suppresses the drop log.
    pub fn finish_with_count(mut self, count: usize) {
        let ms = self.elapsed_ms();
        let rate = if ms > 0.0 {
            count as f64 / (ms / 1000.0)
        } else {
            0.0
        };
        info!(
            "[TIMING] {} took {:.2}ms ({} items, {:.0} items/sec)",
            self.label, ms, count, rate
        );
        self.reported = true;
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if !self.reported {
            info!("[TIMING] {} took {:.2}ms", self.label, self.elapsed_ms());
        }
    }
}
