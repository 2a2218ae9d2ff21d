//! Render throughput measurement.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Throughput over a batch of renders: a wall-clock window plus the number of
/// renders completed inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThroughputStat {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub count: usize,
}

impl ThroughputStat {
    pub fn new(started_at: DateTime<Utc>, finished_at: DateTime<Utc>, count: usize) -> Self {
        Self {
            started_at,
            finished_at,
            count,
        }
    }

    /// Length of the measurement window.
    pub fn duration(&self) -> TimeDelta {
        self.finished_at - self.started_at
    }

    /// Renders per second over the window. A zero-length window yields infinity.
    pub fn per_second(&self) -> f64 {
        self.count as f64 / self.duration().as_seconds_f64()
    }

    /// Seconds spent per render.
    pub fn seconds_per_render(&self) -> f64 {
        self.duration().as_seconds_f64() / self.count as f64
    }
}

impl fmt::Display for ThroughputStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} renders in {:.3}s ({:.1}/s, {:.5}s each)",
            self.count,
            self.duration().as_seconds_f64(),
            self.per_second(),
            self.seconds_per_render()
        )
    }
}
