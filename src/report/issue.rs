use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Display precedence of an issue. Ordered lowest to highest so that
/// `max()` picks the class a highlighted line should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityRank {
    Info,
    Warning,
    Error,
    Blocker,
}

impl SeverityRank {
    /// Map raw report text (checkstyle words, PMD priorities) onto the
    /// fixed rank set. Unrecognized text is treated as informational.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "blocker" | "fatal" | "critical" | "1" => SeverityRank::Blocker,
            "error" | "2" => SeverityRank::Error,
            "warning" | "warn" | "3" => SeverityRank::Warning,
            _ => SeverityRank::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityRank::Blocker => "blocker",
            SeverityRank::Error => "error",
            SeverityRank::Warning => "warning",
            SeverityRank::Info => "info",
        }
    }

    /// Highest first.
    pub const ALL: [SeverityRank; 4] = [
        SeverityRank::Blocker,
        SeverityRank::Error,
        SeverityRank::Warning,
        SeverityRank::Info,
    ];
}

impl std::fmt::Display for SeverityRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One normalized finding. Only adapters construct these; fields are
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRecord {
    file_path: String,
    line_start: usize,
    line_end: usize,
    source: String,
    description: String,
    severity: SeverityRank,
}

impl IssueRecord {
    /// Build a record, clamping malformed ranges: a start of 0 becomes 1 and
    /// an end before the start collapses to a single-line finding.
    pub fn new(
        file_path: impl Into<String>,
        line_start: usize,
        line_end: usize,
        source: impl Into<String>,
        description: impl Into<String>,
        severity: SeverityRank,
    ) -> Result<Self, ParseError> {
        let file_path = file_path.into();
        if file_path.is_empty() {
            return Err(ParseError::EmptyFilePath);
        }
        let line_start = line_start.max(1);
        let line_end = line_end.max(line_start);

        Ok(IssueRecord {
            file_path,
            line_start,
            line_end,
            source: source.into(),
            description: description.into(),
            severity,
        })
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn line_start(&self) -> usize {
        self.line_start
    }

    pub fn line_end(&self) -> usize {
        self.line_end
    }

    /// Tool label, e.g. "Checkstyle"
    pub fn source(&self) -> &str {
        &self.source
    }

    /// HTML-escaped message text
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn severity(&self) -> SeverityRank {
        self.severity
    }
}

/// Per-severity counts for a set of issues
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCounts {
    pub total: usize,
    pub blocker: usize,
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl IssueCounts {
    pub fn from_issues(issues: &[IssueRecord]) -> Self {
        let mut counts = IssueCounts::default();
        for issue in issues {
            counts.add(issue.severity());
        }
        counts
    }

    pub fn add(&mut self, severity: SeverityRank) {
        self.total += 1;
        match severity {
            SeverityRank::Blocker => self.blocker += 1,
            SeverityRank::Error => self.error += 1,
            SeverityRank::Warning => self.warning += 1,
            SeverityRank::Info => self.info += 1,
        }
    }

    pub fn merge(&mut self, other: &IssueCounts) {
        self.total += other.total;
        self.blocker += other.blocker;
        self.error += other.error;
        self.warning += other.warning;
        self.info += other.info;
    }
}
