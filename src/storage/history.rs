use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Europe::Lisbon;
use tokio::fs;
use tokio::sync::Mutex;

/// Renders one history line: `[mm/dd/yyyy HH:MM:SS] <text>`.
pub fn format_line<Tz: TimeZone>(received_at: &DateTime<Tz>, text: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("[{}] {text}", received_at.format("%m/%d/%Y %H:%M:%S"))
}

/// Append-only chat log kept in memory and mirrored to a text file.
///
/// The file is rewritten in full after every append, so it always equals
/// the in-memory lines joined by `\n`. The lock is held across the rewrite
/// to keep concurrent appends from writing an older snapshot last.
#[derive(Clone)]
pub struct ChatHistory {
    lines: Arc<Mutex<Vec<String>>>,
    path: PathBuf,
}

impl ChatHistory {
    /// Creates the file's parent directory up front; if that fails the log
    /// still works in memory and each persist attempt logs the error.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = std::fs::create_dir_all(parent) {
                    log::warn!(
                        "Failed to create history directory {}: {err}",
                        parent.display()
                    );
                }
            }
        }
        Self {
            lines: Arc::new(Mutex::new(Vec::new())),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Logs `text` with the current Europe/Lisbon time.
    pub async fn record(&self, text: &str) {
        let now = Utc::now().with_timezone(&Lisbon);
        self.record_line(format_line(&now, text)).await;
    }

    /// Appends a pre-formatted line and persists the log.
    /// Persistence is best-effort: failures are logged and dropped.
    pub async fn record_line(&self, line: String) {
        let mut lines = self.lines.lock().await;
        lines.push(line);
        if let Err(err) = fs::write(&self.path, lines.join("\n")).await {
            log::warn!(
                "Failed to persist chat history to {}: {err}",
                self.path.display()
            );
        }
    }

    /// Rewrites the history file on request; unlike [`record`](Self::record)
    /// the failure is returned to the caller.
    pub async fn export(&self) -> std::io::Result<()> {
        let lines = self.lines.lock().await;
        fs::write(&self.path, lines.join("\n")).await
    }

    pub async fn lines(&self) -> Vec<String> {
        self.lines.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.lines.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.lines.lock().await.is_empty()
    }
}
