//! User-visible status reporting.
//!
//! The core reports outcomes (saves, failures, edits) through a
//! [`StatusSink`]; the UI decides how to show them. [`StatusLine`] renders
//! the one-line summary shown at the bottom of the window.

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::path::Path;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }
}

/// Receiver for status messages. Called from the autosave task as well as
/// the UI thread.
pub trait StatusSink: Send + Sync {
    fn report(&self, message: StatusMessage);
}

/// Sink that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogStatus;

impl StatusSink for LogStatus {
    fn report(&self, message: StatusMessage) {
        match message.level {
            StatusLevel::Info => info!(status = %message.text),
            StatusLevel::Error => error!(status = %message.text),
        }
    }
}

/// Sink that keeps every message, newest last.
#[derive(Debug, Default)]
pub struct StatusLog {
    messages: Mutex<Vec<StatusMessage>>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<StatusMessage> {
        self.messages.lock().clone()
    }

    pub fn last(&self) -> Option<StatusMessage> {
        self.messages.lock().last().cloned()
    }

    pub fn errors(&self) -> Vec<StatusMessage> {
        self.messages
            .lock()
            .iter()
            .filter(|m| m.is_error())
            .cloned()
            .collect()
    }
}

impl StatusSink for StatusLog {
    fn report(&self, message: StatusMessage) {
        self.messages.lock().push(message);
    }
}

/// Inputs for the status bar text.
pub struct StatusLine<'a> {
    pub message: &'a str,
    pub save_path: Option<&'a Path>,
    pub autosave: bool,
    pub last_saved: Option<DateTime<Local>>,
}

impl StatusLine<'_> {
    /// `<message> | save: <path> | autosave: ON | last saved: 12:34:56`
    pub fn render(&self) -> String {
        let save = self
            .save_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "not set".to_string());
        let autosave = if self.autosave { "ON" } else { "OFF" };
        let last_saved = self
            .last_saved
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string());

        format!(
            "{} | save: {} | autosave: {} | last saved: {}",
            self.message, save, autosave, last_saved
        )
    }
}
