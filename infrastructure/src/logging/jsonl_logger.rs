//! JSONL file writer for debate events.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying its payload
//! fields plus `type` and `timestamp`. Files are opened in append mode, so
//! several debates can share one log.

use debate_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL conversation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the log at `path`, creating parent directories.
    ///
    /// Returns `None` if the file cannot be opened; debates then run unlogged.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create debate log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Self {
                writer: Mutex::new(BufWriter::new(file)),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Could not open debate log {}: {}", path.display(), e);
                None
            }
        }
    }

    /// A fresh log under `dir`, named after the current UTC time
    pub fn in_dir(dir: impl AsRef<Path>) -> Option<Self> {
        let name = chrono::Utc::now().format("debate-%Y%m%dT%H%M%S%.3fZ.jsonl");
        Self::new(dir.as_ref().join(name.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ConversationEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut map = match event.payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::String(event.event_type.to_string()));
        map.insert("timestamp".to_string(), Value::String(timestamp));
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_debate_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("debate.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "debate_started",
            serde_json::json!({"topic": "Yapay zekâ tehlikeli mi?", "turn_budget": 12}),
        ));
        logger.log(ConversationEvent::new(
            "turn_committed",
            serde_json::json!({"turn": 1, "persona": "Fizik", "fallback": false}),
        ));
        drop(logger);

        let records = lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "debate_started");
        assert_eq!(records[0]["topic"], "Yapay zekâ tehlikeli mi?");
        assert_eq!(records[1]["type"], "turn_committed");
        assert_eq!(records[1]["persona"], "Fizik");
        assert!(records.iter().all(|r| r["timestamp"].is_string()));
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debate.jsonl");

        for turn in 1..=2 {
            let logger = JsonlConversationLogger::new(&path).unwrap();
            logger.log(ConversationEvent::new("turn_committed", serde_json::json!({"turn": turn})));
        }

        let records = lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["turn"], 2);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlConversationLogger::in_dir(dir.path()).unwrap();
        logger.log(ConversationEvent::new("verdict", serde_json::json!("SONUÇ: Evet")));
        let path = logger.path().to_path_buf();
        drop(logger);

        let records = lines(&path);
        assert_eq!(records[0]["type"], "verdict");
        assert_eq!(records[0]["data"], "SONUÇ: Evet");
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("debate-"));
    }
}
