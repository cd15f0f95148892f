//! Bounded window of recent fetch latencies.

use std::collections::VecDeque;

use types::LatencyStats;

/// Number of samples kept by default.
pub const DEFAULT_LATENCY_WINDOW: usize = 1000;

/// Ring buffer of the most recent successful fetch latencies.
#[derive(Debug, Clone)]
pub struct LatencyWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl Default for LatencyWindow {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LATENCY_WINDOW)
    }
}

impl LatencyWindow {
    /// Create a window holding at most `capacity` samples (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a sample, evicting the oldest when full.
    pub fn record(&mut self, latency_ms: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(latency_ms);
    }

    /// Summary over the current window.
    pub fn stats(&self) -> LatencyStats {
        LatencyStats::from_samples(&self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_evicts_oldest() {
        let mut window = LatencyWindow::with_capacity(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            window.record(v);
        }

        let stats = window.stats();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.last_ms, Some(4.0));
        assert_eq!(stats.max_ms, Some(4.0));
        assert_eq!(stats.mean_ms, Some(3.0));
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut window = LatencyWindow::with_capacity(0);
        window.record(5.0);
        window.record(6.0);
        let stats = window.stats();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.last_ms, Some(6.0));
    }
}
