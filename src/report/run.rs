use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::report::issue::IssueCounts;

/// A file that could not be rendered, and why
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Outcome of a complete run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// codebrowser version
    pub version: String,

    /// When the run finished
    pub timestamp: String,

    pub log_dir: PathBuf,

    pub output_dir: PathBuf,

    /// Adapters in registration order
    pub adapters: Vec<String>,

    /// Distinct files named by any report
    pub files_with_issues: usize,

    pub files_rendered: usize,

    pub skipped: Vec<SkippedFile>,

    /// Duration in milliseconds
    pub duration_ms: u64,

    /// Issue counts over every rendered file
    pub totals: IssueCounts,
}

impl RunReport {
    pub fn files_skipped(&self) -> usize {
        self.skipped.len()
    }
}
