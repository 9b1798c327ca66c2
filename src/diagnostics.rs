use std::sync::Mutex;

use tracing::warn;

use crate::error::{ParseError, RenderError};

/// Where skip-and-continue conditions are reported. Handed to the store and
/// the engine explicitly instead of reaching for a global logger.
pub trait SkipReporter: Send + Sync {
    /// A finding was dropped while building the issue store
    fn finding_skipped(&self, adapter: &str, file: &str, error: &ParseError);

    /// A file could not be rendered
    fn file_skipped(&self, file: &str, error: &RenderError);
}

/// Forwards every condition to `tracing` at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl SkipReporter for TracingReporter {
    fn finding_skipped(&self, adapter: &str, file: &str, error: &ParseError) {
        warn!("[{}] dropped finding in {}: {}", adapter, file, error);
    }

    fn file_skipped(&self, file: &str, error: &RenderError) {
        match std::error::Error::source(error) {
            Some(cause) => warn!("Skipping {}: {} ({})", file, error, cause),
            None => warn!("Skipping {}: {}", file, error),
        }
    }
}

/// Keeps a textual record of every condition. Useful when the caller wants
/// to surface skips itself.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    entries: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn push(&self, entry: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}

impl SkipReporter for CollectingReporter {
    fn finding_skipped(&self, adapter: &str, file: &str, error: &ParseError) {
        self.push(format!("{adapter}: {file}: {error}"));
    }

    fn file_skipped(&self, file: &str, error: &RenderError) {
        self.push(format!("{file}: {error}"));
    }
}
