//! JSONL file writer for planning transcript events.
//!
//! Each [`TranscriptEvent`] becomes one JSON line carrying `type`, `group`,
//! `attempt`, `timestamp` and `run` next to the event details. The file is
//! opened in append mode so transcripts of successive invocations accumulate.

use chrono::{SecondsFormat, Utc};
use packvote_application::ports::transcript::{TranscriptEvent, TranscriptLogger};
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Transcript logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes whenever an attempt
/// ends and on `Drop`.
pub struct JsonlPlanningLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    run: String,
}

impl JsonlPlanningLogger {
    /// Open (or create) the transcript at `path`.
    ///
    /// Parent directories are created as needed. Returns `None` when the file
    /// cannot be opened; the caller then runs without a transcript.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            run: Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string(),
        })
    }

    /// Get the path to the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identifier shared by every event of this process
    pub fn run_id(&self) -> &str {
        &self.run
    }

    fn entry(&self, event: TranscriptEvent) -> Value {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut entry = match event.details {
            Value::Object(map) => Value::Object(map),
            Value::Null => json!({}),
            other => json!({ "data": other }),
        };
        if let Value::Object(map) = &mut entry {
            map.insert("type".to_string(), json!(event.kind.as_str()));
            map.insert("group".to_string(), json!(event.group.as_str()));
            map.insert("attempt".to_string(), json!(event.attempt));
            map.insert("timestamp".to_string(), Value::String(timestamp));
            map.insert("run".to_string(), Value::String(self.run.clone()));
        }
        entry
    }
}

impl TranscriptLogger for JsonlPlanningLogger {
    fn record(&self, event: TranscriptEvent) {
        let flush = event.kind.ends_attempt();
        let Ok(line) = serde_json::to_string(&self.entry(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            if flush {
                let _ = writer.flush();
            }
        }
    }
}

impl Drop for JsonlPlanningLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packvote_application::ports::transcript::TranscriptEventKind;
    use packvote_domain::GroupId;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("plan.jsonl");
        let logger = JsonlPlanningLogger::open(&path).unwrap();

        let group = GroupId::new("G1");
        logger.record(TranscriptEvent::new(
            TranscriptEventKind::PlanRequested,
            &group,
            1,
            json!({"prompt": "plan a trip"}),
        ));
        logger.record(TranscriptEvent::new(
            TranscriptEventKind::PlanRejected,
            &group,
            1,
            json!({"kind": "missing_field:reason"}),
        ));
        let run = logger.run_id().to_string();
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "plan_requested");
        assert_eq!(records[0]["attempt"], 1);
        assert_eq!(records[0]["prompt"], "plan a trip");
        assert_eq!(records[1]["type"], "plan_rejected");
        assert_eq!(records[1]["kind"], "missing_field:reason");
        for record in &records {
            assert_eq!(record["group"], "G1");
            assert!(record.get("timestamp").is_some());
            assert_eq!(record["run"], run.as_str());
        }
    }

    #[test]
    fn test_appends_across_openings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.jsonl");

        for _ in 0..2 {
            let logger = JsonlPlanningLogger::open(&path).unwrap();
            logger.record(TranscriptEvent::new(
                TranscriptEventKind::EngineResponse,
                &GroupId::new("G1"),
                1,
                json!({"raw": "{}"}),
            ));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_wraps_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.jsonl");
        let logger = JsonlPlanningLogger::open(&path).unwrap();

        logger.record(TranscriptEvent::new(
            TranscriptEventKind::UpstreamFailure,
            &GroupId::new("G2"),
            3,
            json!("connection reset"),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "upstream_failure");
        assert_eq!(records[0]["attempt"], 3);
        assert_eq!(records[0]["data"], "connection reset");
    }

    #[test]
    fn test_closing_event_is_flushed_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.jsonl");
        let logger = JsonlPlanningLogger::open(&path).unwrap();

        logger.record(TranscriptEvent::new(
            TranscriptEventKind::PlanAccepted,
            &GroupId::new("G1"),
            1,
            json!({"destination": "Goa"}),
        ));

        // logger still open
        let records = read_lines(&path);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["destination"], "Goa");
    }

    #[test]
    fn test_directory_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlPlanningLogger::open(dir.path()).is_none());
    }
}
