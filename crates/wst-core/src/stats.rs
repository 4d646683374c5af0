//! Sliding-window wind statistics
//!
//! Streaming aggregator fed one [`WindSample`] at a time. History is a
//! single bounded FIFO of composite entries (sample + burst-smoothed
//! gust), so the speed/direction/vector/gust sequences can never drift
//! out of lockstep. Window summaries are recomputed on every arrival
//! and never stored.

use std::collections::VecDeque;

use crate::types::{Timestamp, WindSample};

/// Aggregator tuning; durations are converted to sample counts using
/// the sampling rate.
#[derive(Debug, Clone, Copy)]
pub struct WindStatsConfig {
    /// Transducer sample rate in Hz
    pub sampling_rate_hz: u32,

    /// Gust smoothing burst, seconds
    pub burst_secs: u32,

    /// Short rolling window, seconds
    pub short_window_secs: u32,

    /// Long rolling window, seconds; also sizes the history
    pub long_window_secs: u32,
}

impl Default for WindStatsConfig {
    fn default() -> Self {
        Self {
            sampling_rate_hz: 2,
            burst_secs: 3,
            short_window_secs: 120,
            long_window_secs: 600,
        }
    }
}

/// Composite history entry; keeping the gust alongside the sample is
/// what guarantees window slices stay aligned.
#[derive(Debug, Clone, Copy)]
struct HistoryEntry {
    sample: WindSample,
    gust: f64,
}

/// Rolling summary over one window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSummary {
    /// Scalar mean speed over the window, m/s
    pub avg_speed: f64,

    /// Magnitude of the mean wind vector, m/s
    pub vector_mag: f64,

    /// Direction of the mean wind vector, degrees [0, 360)
    pub vector_dir_deg: f64,

    /// Maximum burst-smoothed gust in the window, m/s
    pub gust_speed: f64,

    /// Direction of the sample that attained the gust maximum
    pub gust_dir_deg: f64,

    /// Timestamp of the sample that attained the gust maximum
    pub gust_timestamp: Timestamp,
}

impl WindowSummary {
    fn single(entry: &HistoryEntry) -> Self {
        let (x, y) = entry.sample.vector();
        Self {
            avg_speed: entry.sample.speed_mps,
            vector_mag: (x * x + y * y).sqrt(),
            vector_dir_deg: normalize_deg(y.atan2(x).to_degrees()),
            gust_speed: entry.gust,
            gust_dir_deg: entry.sample.direction_deg,
            gust_timestamp: entry.sample.timestamp,
        }
    }
}

/// Result of folding one sample into the aggregator
#[derive(Debug, Clone, Copy)]
pub struct WindReport {
    /// The instantaneous sample that triggered this report
    pub sample: WindSample,
    pub short: WindowSummary,
    pub long: WindowSummary,
}

/// Streaming wind statistics over short and long rolling windows.
///
/// Owned by exactly one collector task; all mutation happens on
/// sample arrival.
pub struct WindAggregator {
    burst_samples: usize,
    short_samples: usize,
    capacity: usize,
    history: VecDeque<HistoryEntry>,
}

impl WindAggregator {
    pub fn new(config: WindStatsConfig) -> Self {
        let sps = config.sampling_rate_hz.max(1) as usize;
        let capacity = (config.long_window_secs as usize * sps).max(1);
        Self {
            burst_samples: (config.burst_secs as usize * sps).max(1),
            short_samples: (config.short_window_secs as usize * sps).max(1),
            capacity,
            history: VecDeque::with_capacity(capacity),
        }
    }

    /// Fold one sample into the history and recompute both window
    /// summaries.
    pub fn add_sample(&mut self, sample: WindSample) -> WindReport {
        // Gust is the mean of the previous burst of raw speeds; until
        // enough history exists the instantaneous speed stands in.
        let gust = if self.history.len() >= self.burst_samples {
            let sum: f64 = self
                .history
                .iter()
                .rev()
                .take(self.burst_samples)
                .map(|e| e.sample.speed_mps)
                .sum();
            sum / self.burst_samples as f64
        } else {
            sample.speed_mps
        };

        let entry = HistoryEntry { sample, gust };
        self.history.push_back(entry);
        if self.history.len() > self.capacity {
            self.history.pop_front();
        }

        WindReport {
            sample,
            short: self
                .summarize(self.short_samples)
                .unwrap_or_else(|| WindowSummary::single(&entry)),
            long: self
                .summarize(self.capacity)
                .unwrap_or_else(|| WindowSummary::single(&entry)),
        }
    }

    /// Summary over the last `window_samples` entries, or fewer while
    /// the history is still filling. `None` on an empty history.
    ///
    /// Averages divide by the number of entries actually in the
    /// window, never the nominal window size, so readings right after
    /// startup are not biased low.
    pub fn summarize(&self, window_samples: usize) -> Option<WindowSummary> {
        let take = window_samples.min(self.history.len());
        let mut entries = self.history.iter().skip(self.history.len() - take);

        let first = entries.next()?;
        let mut speed_sum = first.sample.speed_mps;
        let (mut vx, mut vy) = first.sample.vector();
        let mut best = first;

        for entry in entries {
            speed_sum += entry.sample.speed_mps;
            let (x, y) = entry.sample.vector();
            vx += x;
            vy += y;
            // Strict comparison: gust ties keep the earliest entry.
            if entry.gust > best.gust {
                best = entry;
            }
        }

        let count = take as f64;
        let (mx, my) = (vx / count, vy / count);

        Some(WindowSummary {
            avg_speed: speed_sum / count,
            vector_mag: (mx * mx + my * my).sqrt(),
            vector_dir_deg: normalize_deg(my.atan2(mx).to_degrees()),
            gust_speed: best.gust,
            gust_dir_deg: best.sample.direction_deg,
            gust_timestamp: best.sample.timestamp,
        })
    }

    /// Number of entries currently retained
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// History capacity (long window x sampling rate)
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn normalize_deg(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}
