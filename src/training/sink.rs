//! Scalar metric sinks for the training run.
//! - MetricsSink: trait used by the monitor callback
//! - NoopSink:    discards all scalars
//! - JsonlSink:   appends one JSON object per scalar for an external
//!   time-series viewer

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// Destination for tagged scalar series (e.g. `rollout/ep_rew_mean`).
pub trait MetricsSink {
    fn record_scalar(&mut self, tag: &str, step: u64, value: f64);

    fn flush(&mut self) {}
}

/// Sink that discards all scalars.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl MetricsSink for NoopSink {
    fn record_scalar(&mut self, _tag: &str, _step: u64, _value: f64) {}
}

#[derive(Serialize)]
struct ScalarRecord<'a> {
    tag: &'a str,
    step: u64,
    value: f64,
    wall_time: f64,
}

/// JSONL file sink writing `<dir>/metrics.jsonl`, appending across runs so
/// resumed training extends the same series.
pub struct JsonlSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonlSink {
    pub fn create(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join("metrics.jsonl");
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(JsonlSink {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetricsSink for JsonlSink {
    fn record_scalar(&mut self, tag: &str, step: u64, value: f64) {
        let wall_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        let record = ScalarRecord {
            tag,
            step,
            value,
            wall_time,
        };
        let result = serde_json::to_writer(&mut self.writer, &record)
            .map_err(io::Error::from)
            .and_then(|_| self.writer.write_all(b"\n"));
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write metric");
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to flush metrics");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsonl_sink_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        {
            let mut sink = JsonlSink::create(&logs).unwrap();
            sink.record_scalar("rollout/ep_rew_mean", 30, 1.5);
            sink.record_scalar("rollout/ep_len_mean", 30, 450.0);
            sink.flush();
        }
        {
            let mut sink = JsonlSink::create(&logs).unwrap();
            sink.record_scalar("rollout/ep_rew_mean", 60, 2.5);
            sink.flush();
        }

        let content = fs::read_to_string(logs.join("metrics.jsonl")).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["tag"], "rollout/ep_rew_mean");
        assert_eq!(lines[1]["value"], 450.0);
        assert_eq!(lines[2]["step"], 60);
    }
}
