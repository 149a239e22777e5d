// Debug logging module for asynchronous decision logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each turn's state and scores are written
// to a JSONL file that the replay tool can read back.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::bot::Decision;
use crate::scoring::MoveScore;
use crate::types::GameState;

/// Represents a single debug log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DebugLogEntry {
    pub turn: i32,
    pub chosen_move: String,
    pub score: f64,
    pub scoring_version: u32,
    pub state: GameState,
    /// Score breakdowns, kept as raw JSON so older logs still load
    #[serde(default)]
    pub candidates: serde_json::Value,
    pub timestamp: String,
}

impl DebugLogEntry {
    pub fn new(state: &GameState, decision: &Decision, scoring_version: u32) -> Self {
        DebugLogEntry {
            turn: state.turn,
            chosen_move: decision.direction.as_str().to_string(),
            score: decision.score,
            scoring_version,
            state: state.clone(),
            candidates: Self::candidates_json(&decision.candidates),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn candidates_json(candidates: &[MoveScore]) -> serde_json::Value {
        serde_json::to_value(candidates).unwrap_or_else(|e| {
            error!("Failed to serialize move scores: {}", e);
            serde_json::Value::Null
        })
    }
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_move(&self, state: &GameState, decision: &Decision, scoring_version: u32) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();
        let entry = DebugLogEntry::new(state, decision, scoring_version);

        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Internal async function that performs the actual file write
    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }

    /// Writes one entry and waits for it to hit the file
    pub async fn log_move_now(&self, state: &GameState, decision: &Decision, scoring_version: u32) {
        if !self.enabled {
            return;
        }
        let entry = DebugLogEntry::new(state, decision, scoring_version);
        Self::write_entry(self.file.clone(), entry).await;
    }
}
