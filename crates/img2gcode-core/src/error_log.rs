//! Rolling in-memory error log.
//!
//! Failures that are surfaced to the user (or swallowed after degrading
//! gracefully) are also appended here so they can be inspected later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::constants::ERROR_LOG_CAPACITY;

/// One recorded failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLogEntry {
    pub timestamp: DateTime<Utc>,
    /// The operation that failed, e.g. "save project".
    pub context: String,
    pub message: String,
}

/// Capped error history; the oldest entry is dropped when full.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    entries: VecDeque<ErrorLogEntry>,
    capacity: usize,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::with_capacity(ERROR_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Records a failure and emits it through `tracing`.
    pub fn record(&mut self, context: impl Into<String>, message: impl Into<String>) {
        let entry = ErrorLogEntry {
            timestamp: Utc::now(),
            context: context.into(),
            message: message.into(),
        };
        tracing::error!(context = %entry.context, "{}", entry.message);

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &ErrorLogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&ErrorLogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new()
    }
}
