use std::collections::{BTreeMap, BTreeSet};

use crate::adapters::extract::{self, Extractors, Schema, SchemaAdapter};
use crate::adapters::{MappedIssue, ReportAdapter};
use crate::report::issue::{IssueRecord, SeverityRank};
use crate::xml::{ReportNode, ReportQuery};

const NOT_COVERED: &str = "Not covered";

/// Clover coverage reports. Files sit below `<project>` (optionally inside
/// `<package>`), each with one `<line num type count>` marker per line.
///
/// Instead of one record per marker, consecutive uncovered statements are
/// folded into a single range. A covered line closes the current range.
pub struct CoverageAdapter {
    base: SchemaAdapter,
}

impl CoverageAdapter {
    pub fn new() -> Self {
        CoverageAdapter {
            base: SchemaAdapter {
                name: "coverage",
                summary: "Clover XML: <file name> with <line num type count>; uncovered statements",
                schema: Schema {
                    report: "coverage",
                    file_nodes: "/file",
                    file_attr: "name",
                    issue_nodes: "/file",
                    line_start: "num",
                    line_end: None,
                    description: "",
                    severity: "",
                    source: "Coverage",
                },
                extract: Extractors::default(),
            },
        }
    }

    fn record(&self, file: &str, start: usize, end: usize) -> MappedIssue {
        IssueRecord::new(
            file,
            start,
            end,
            self.base.schema.source,
            NOT_COVERED,
            SeverityRank::Info,
        )
    }
}

impl Default for CoverageAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn hit_count(line: &ReportNode) -> usize {
    line.attr("count")
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

impl ReportAdapter for CoverageAdapter {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn description(&self) -> &str {
        self.base.description()
    }

    fn files_with_issues(&self, doc: &dyn ReportQuery) -> BTreeSet<String> {
        self.base.files_with_issues(doc)
    }

    fn issue_nodes<'d>(&self, doc: &'d dyn ReportQuery, file: &str) -> Vec<&'d ReportNode> {
        self.base.issue_nodes(doc, file)
    }

    fn nodes_by_file<'d>(&self, doc: &'d dyn ReportQuery) -> BTreeMap<String, Vec<&'d ReportNode>> {
        self.base.nodes_by_file(doc)
    }

    fn map_issues(&self, node: &ReportNode, file: &str) -> Vec<MappedIssue> {
        let mut out = Vec::new();
        let mut run: Option<(usize, usize)> = None;

        for line in node.children.iter().filter(|c| c.name == "line") {
            if hit_count(line) > 0 {
                if let Some((start, end)) = run.take() {
                    out.push(self.record(file, start, end));
                }
                continue;
            }
            if line.attr("type") != Some("stmt") {
                continue;
            }
            match extract::required_line(line, self.base.schema.line_start) {
                Ok(num) => {
                    run = match run {
                        Some((start, end)) if num > end => Some((start, num)),
                        Some((start, end)) => {
                            out.push(self.record(file, start, end));
                            Some((num, num))
                        }
                        None => Some((num, num)),
                    };
                }
                Err(e) => out.push(Err(e)),
            }
        }

        if let Some((start, end)) = run {
            out.push(self.record(file, start, end));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> crate::xml::ReportDocument {
        let mut doc = crate::xml::ReportDocument::default();
        doc.add_xml(
            r#"<coverage generated="1"><project timestamp="1">
                <file name="/src/A.php">
                    <class name="A"/>
                    <line num="3" type="method" count="2"/>
                    <line num="4" type="stmt" count="0"/>
                    <line num="5" type="stmt" count="0"/>
                    <line num="7" type="stmt" count="0"/>
                    <line num="8" type="stmt" count="3"/>
                    <line num="10" type="stmt" count="0"/>
                    <line num="11" type="method" count="0"/>
                    <line type="stmt" count="0"/>
                </file>
                <package name="lib">
                    <file name="/src/lib/B.php">
                        <line num="1" type="stmt" count="1"/>
                    </file>
                </package>
            </project></coverage>"#,
        )
        .unwrap();
        doc
    }

    #[test]
    fn finds_files_at_any_depth() {
        let files: Vec<String> = CoverageAdapter::new().files_with_issues(&doc()).into_iter().collect();
        assert_eq!(files, vec!["/src/A.php", "/src/lib/B.php"]);
    }

    #[test]
    fn folds_uncovered_statements() {
        let mapped = CoverageAdapter::new().issues_for(&doc(), "/src/A.php");
        assert_eq!(mapped.len(), 3);

        let first = mapped[0].as_ref().unwrap();
        assert_eq!((first.line_start(), first.line_end()), (4, 7));
        assert_eq!(first.description(), "Not covered");
        assert_eq!(first.severity(), SeverityRank::Info);

        assert!(mapped[1].is_err());
        let last = mapped[2].as_ref().unwrap();
        assert_eq!((last.line_start(), last.line_end()), (10, 10));
    }

    #[test]
    fn grouped_mapping_folds_too() {
        let grouped = CoverageAdapter::new().issues_by_file(&doc());
        assert_eq!(grouped["/src/A.php"].len(), 3);
        assert!(grouped["/src/lib/B.php"].is_empty());
    }

    #[test]
    fn fully_covered_file_has_no_issues() {
        assert!(CoverageAdapter::new().issues_for(&doc(), "/src/lib/B.php").is_empty());
    }
}
