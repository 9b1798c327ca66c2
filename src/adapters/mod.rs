pub mod checkstyle;
pub mod coverage;
pub mod cpd;
pub mod extract;
pub mod padawan;
pub mod pmd;

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ConfigError, ParseError};
use crate::report::issue::IssueRecord;
use crate::xml::{ReportNode, ReportQuery};

/// A normalized finding, or the reason it had to be dropped.
pub type MappedIssue = Result<IssueRecord, ParseError>;

/// Normalizer for one report schema.
pub trait ReportAdapter: Send + Sync {
    /// Tool identifier (e.g. "checkstyle")
    fn name(&self) -> &str;

    /// Short description of the report format
    fn description(&self) -> &str;

    /// Every file path this schema reports on, whether or not it exists on disk
    fn files_with_issues(&self, doc: &dyn ReportQuery) -> BTreeSet<String>;

    /// Report nodes carrying findings for `file`
    fn issue_nodes<'d>(&self, doc: &'d dyn ReportQuery, file: &str) -> Vec<&'d ReportNode>;

    /// Map the findings below one issue node
    fn map_issues(&self, node: &ReportNode, file: &str) -> Vec<MappedIssue>;

    /// All findings for `file`, in document order
    fn issues_for(&self, doc: &dyn ReportQuery, file: &str) -> Vec<MappedIssue> {
        self.issue_nodes(doc, file)
            .into_iter()
            .flat_map(|node| self.map_issues(node, file))
            .collect()
    }

    /// Issue nodes of every reported file, in document order per file.
    /// Schemas that can tell a node's owners should override this with a
    /// single pass over the document.
    fn nodes_by_file<'d>(&self, doc: &'d dyn ReportQuery) -> BTreeMap<String, Vec<&'d ReportNode>> {
        self.files_with_issues(doc)
            .into_iter()
            .map(|file| {
                let nodes = self.issue_nodes(doc, &file);
                (file, nodes)
            })
            .collect()
    }

    /// Every finding of the document, grouped by file
    fn issues_by_file(&self, doc: &dyn ReportQuery) -> BTreeMap<String, Vec<MappedIssue>> {
        self.nodes_by_file(doc)
            .into_iter()
            .map(|(file, nodes)| {
                let issues: Vec<MappedIssue> = nodes
                    .into_iter()
                    .flat_map(|node| self.map_issues(node, &file))
                    .collect();
                (file, issues)
            })
            .collect()
    }
}

/// Identifiers of every built-in adapter, in default registration order
pub const ADAPTER_NAMES: [&str; 5] = ["checkstyle", "pmd", "cpd", "padawan", "coverage"];

fn adapter_for(name: &str) -> Option<Box<dyn ReportAdapter>> {
    let adapter: Box<dyn ReportAdapter> = match name {
        "checkstyle" => Box::new(checkstyle::adapter()),
        "pmd" => Box::new(pmd::adapter()),
        "cpd" => Box::new(cpd::adapter()),
        "padawan" => Box::new(padawan::adapter()),
        "coverage" => Box::new(coverage::CoverageAdapter::new()),
        _ => return None,
    };
    Some(adapter)
}

/// Registry of all available adapters
pub fn all_adapters() -> Vec<Box<dyn ReportAdapter>> {
    ADAPTER_NAMES.iter().filter_map(|name| adapter_for(name)).collect()
}

/// Resolve adapters by identifier, keeping the requested order. Any unknown
/// identifier fails the whole lookup.
pub fn adapters_by_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<Box<dyn ReportAdapter>>, ConfigError> {
    let mut seen = BTreeSet::new();
    let mut adapters = Vec::new();
    for raw in names {
        let name = raw.as_ref().trim().to_lowercase();
        if name.is_empty() || !seen.insert(name.clone()) {
            continue;
        }
        let adapter = adapter_for(&name).ok_or_else(|| ConfigError::UnknownAdapter(name.clone()))?;
        adapters.push(adapter);
    }
    Ok(adapters)
}
