//! Fetch latency summary.

use serde::{Deserialize, Serialize};

/// Summary statistics over recent book fetch latencies (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LatencyStats {
    /// Number of samples in the window.
    pub count: usize,
    /// Most recent sample.
    pub last_ms: Option<f64>,
    pub mean_ms: Option<f64>,
    pub p50_ms: Option<f64>,
    pub p99_ms: Option<f64>,
    pub max_ms: Option<f64>,
}

impl LatencyStats {
    /// Compute stats from samples ordered oldest to newest.
    ///
    /// Percentiles use the nearest-rank method.
    pub fn from_samples<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let ordered: Vec<f64> = samples.into_iter().copied().collect();
        if ordered.is_empty() {
            return Self::default();
        }

        let last_ms = ordered.last().copied();
        let mut sorted = ordered;
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;

        Self {
            count,
            last_ms,
            mean_ms: Some(mean),
            p50_ms: Some(nearest_rank(&sorted, 50.0)),
            p99_ms: Some(nearest_rank(&sorted, 99.0)),
            max_ms: sorted.last().copied(),
        }
    }
}

fn nearest_rank(sorted: &[f64], pct: f64) -> f64 {
    let rank = ((pct / 100.0) * sorted.len() as f64).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}
