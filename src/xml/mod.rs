pub mod node;
pub mod query;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::LoadError;

pub use node::ReportNode;
pub use query::ReportQuery;

/// Name of the synthetic element every loaded report is attached to
pub const DOCUMENT_ROOT: &str = "codebrowser";

/// All report files of a log directory merged into one tree:
/// `<codebrowser><checkstyle>…</checkstyle><pmd>…</pmd></codebrowser>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    root: ReportNode,
}

impl Default for ReportDocument {
    fn default() -> Self {
        ReportDocument {
            root: ReportNode::new(DOCUMENT_ROOT),
        }
    }
}

impl ReportDocument {
    /// Load every `*.xml` file of `dir`, in file name order. Files that do
    /// not parse are logged and left out.
    pub fn load_dir(dir: &Path) -> Result<Self, LoadError> {
        let read_err = |source| LoadError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(read_err)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("xml"))
            })
            .collect();
        paths.sort();

        let mut doc = ReportDocument::default();
        for path in &paths {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    if let Err(e) = doc.add_xml(&content) {
                        warn!("Skipping report {}: {}", path.display(), e);
                    } else {
                        debug!("Loaded report {}", path.display());
                    }
                }
                Err(e) => warn!("Cannot read report {}: {}", path.display(), e),
            }
        }

        info!("Loaded {} report files from {}", doc.root.children.len(), dir.display());
        Ok(doc)
    }

    /// Parse one report and attach its root element.
    pub fn add_xml(&mut self, content: &str) -> Result<(), roxmltree::Error> {
        let parsed = roxmltree::Document::parse(content)?;
        self.root.children.push(ReportNode::from_xml(parsed.root_element()));
        Ok(())
    }

    /// Attach an already-built report tree.
    pub fn add_node(&mut self, node: ReportNode) {
        self.root.children.push(node);
    }

    pub fn root(&self) -> &ReportNode {
        &self.root
    }
}

impl ReportQuery for ReportDocument {
    fn query(&self, expr: &str) -> Vec<&ReportNode> {
        query::evaluate(&self.root, expr)
    }
}
