//! Statistics and performance tracking for extraction runs

use crate::extraction::traverser::TraversalSummary;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Performance statistics for one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Input document size in bytes
    pub input_size_bytes: u64,
    /// JSON nodes entered by the traversal
    pub nodes_visited: u64,
    /// Keys that matched the field name
    pub matches: u64,
    /// Distinct values in the frequency table
    pub distinct_values: usize,
    /// Array batches completed (suspension points reached)
    pub batches: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Throughput (bytes processed per second)
    pub throughput_bytes_per_sec: f32,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self {
            input_size_bytes: 0,
            nodes_visited: 0,
            matches: 0,
            distinct_values: 0,
            batches: 0,
            processing_time_ms: 0,
            throughput_bytes_per_sec: 0.0,
            collected_at: chrono::Utc::now(),
        }
    }
}

impl RunStatistics {
    /// Create statistics for a finished run
    pub fn for_run(
        input_size: u64,
        traversal: TraversalSummary,
        distinct_values: usize,
        processing_time: Duration,
    ) -> Self {
        let throughput_bytes_per_sec = if processing_time.as_secs_f64() > 0.0 {
            input_size as f64 / processing_time.as_secs_f64()
        } else {
            0.0
        } as f32;

        Self {
            input_size_bytes: input_size,
            nodes_visited: traversal.nodes_visited,
            matches: traversal.matches,
            distinct_values,
            batches: traversal.batches,
            processing_time_ms: processing_time.as_millis() as u64,
            throughput_bytes_per_sec,
            collected_at: chrono::Utc::now(),
        }
    }

    /// Get a formatted summary
    pub fn summary(&self) -> String {
        format!(
            "Visited {} nodes in {:.1}s - {} matches, {} distinct values, {:.1}MB/s throughput",
            self.nodes_visited,
            self.processing_time_ms as f32 / 1000.0,
            self.matches,
            self.distinct_values,
            self.throughput_bytes_per_sec / (1024.0 * 1024.0)
        )
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Wall-clock tracker for one run
pub struct PerformanceTracker {
    start_time: Instant,
}

impl PerformanceTracker {
    /// Start tracking a new run
    pub fn start() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Complete tracking and return statistics
    pub fn finish(
        self,
        input_size: u64,
        traversal: TraversalSummary,
        distinct_values: usize,
    ) -> RunStatistics {
        RunStatistics::for_run(
            input_size,
            traversal,
            distinct_values,
            self.start_time.elapsed(),
        )
    }
}
