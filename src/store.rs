use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::adapters::ReportAdapter;
use crate::diagnostics::SkipReporter;
use crate::report::issue::IssueRecord;
use crate::xml::ReportQuery;

/// Every normalized issue of a run, indexed by file path.
///
/// Built once from the loaded reports; read-only afterwards so workers can
/// share it without locking.
#[derive(Debug, Default)]
pub struct IssueStore {
    files: BTreeSet<String>,
    issues: BTreeMap<String, Vec<IssueRecord>>,
    adapters: Vec<String>,
}

impl IssueStore {
    /// Run every adapter over `doc`. Per file, records keep adapter
    /// registration order and then document order. Findings that fail to map
    /// are reported and dropped.
    pub fn build(
        adapters: &[Box<dyn ReportAdapter>],
        doc: &dyn ReportQuery,
        reporter: &dyn SkipReporter,
    ) -> Self {
        let mut store = IssueStore::default();

        for adapter in adapters {
            let files = adapter.files_with_issues(doc);
            debug!("[{}] {} files reported", adapter.name(), files.len());

            let mut mapped = 0usize;
            for (file, results) in adapter.issues_by_file(doc) {
                for result in results {
                    match result {
                        Ok(issue) => {
                            store.issues.entry(file.clone()).or_default().push(issue);
                            mapped += 1;
                        }
                        Err(e) => reporter.finding_skipped(adapter.name(), &file, &e),
                    }
                }
            }

            debug!("[{}] {} issues mapped", adapter.name(), mapped);
            store.files.extend(files);
            store.adapters.push(adapter.name().to_string());
        }

        info!(
            "Indexed {} issues across {} files",
            store.issue_count(),
            store.files.len()
        );
        store
    }

    /// Union of every adapter's file set
    pub fn files_with_issues(&self) -> &BTreeSet<String> {
        &self.files
    }

    /// Issues for `file`; empty when no adapter reported on it
    pub fn issues_for(&self, file: &str) -> &[IssueRecord] {
        self.issues.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn issue_count(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    /// Identifiers of the adapters the store was built from
    pub fn adapters(&self) -> &[String] {
        &self.adapters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{adapters_by_names, all_adapters};
    use crate::diagnostics::CollectingReporter;
    use crate::xml::{ReportDocument, ReportNode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingQuery {
        doc: ReportDocument,
        calls: AtomicUsize,
    }

    impl ReportQuery for CountingQuery {
        fn query(&self, expr: &str) -> Vec<&ReportNode> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.doc.query(expr)
        }
    }

    fn many_files(count: usize) -> ReportDocument {
        let mut checkstyle = ReportNode::new("checkstyle");
        let mut pmd = ReportNode::new("pmd");
        for i in 0..count {
            let name = format!("/src/F{i}.php");
            checkstyle = checkstyle.with_child(
                ReportNode::new("file").with_attr("name", name.as_str()).with_child(
                    ReportNode::new("error")
                        .with_attr("line", "2")
                        .with_attr("severity", "warning")
                        .with_attr("message", "m"),
                ),
            );
            pmd = pmd.with_child(
                ReportNode::new("file").with_attr("name", name.as_str()).with_child(
                    ReportNode::new("violation")
                        .with_attr("beginline", "1")
                        .with_attr("priority", "2")
                        .with_text(" Too long "),
                ),
            );
        }
        let mut doc = ReportDocument::default();
        doc.add_node(checkstyle);
        doc.add_node(pmd);
        doc
    }

    fn doc() -> ReportDocument {
        let mut doc = ReportDocument::default();
        doc.add_xml(
            r#"<checkstyle>
                <file name="/src/A.php">
                    <error line="4" severity="error" message="Null deref"/>
                    <error severity="error" message="broken"/>
                </file>
                <file name="/src/B.php">
                    <error line="1" severity="info" message="Header"/>
                </file>
            </checkstyle>"#,
        )
        .unwrap();
        doc.add_xml(
            r#"<pmd><file name="/src/A.php">
                <violation beginline="3" endline="5" priority="3">Unused variable</violation>
                <violation beginline="3" endline="5" priority="3">Unused variable</violation>
            </file>
            <file name="/src/C.php">
                <violation beginline="1" endline="1" priority="4">x</violation>
            </file></pmd>"#,
        )
        .unwrap();
        doc
    }

    #[test]
    fn files_are_the_union_of_all_adapters() {
        let reporter = CollectingReporter::default();
        let store = IssueStore::build(&all_adapters(), &doc(), &reporter);
        let files: Vec<&str> = store.files_with_issues().iter().map(String::as_str).collect();
        assert_eq!(files, vec!["/src/A.php", "/src/B.php", "/src/C.php"]);
    }

    #[test]
    fn issues_follow_adapter_order_and_keep_duplicates() {
        let reporter = CollectingReporter::default();
        let adapters = adapters_by_names(&["pmd", "checkstyle"]).unwrap();
        let store = IssueStore::build(&adapters, &doc(), &reporter);

        let sources: Vec<&str> = store.issues_for("/src/A.php").iter().map(|i| i.source()).collect();
        assert_eq!(sources, vec!["PMD", "PMD", "Checkstyle"]);
        assert_eq!(store.issue_count(), 5);
        assert_eq!(store.adapters(), ["pmd".to_string(), "checkstyle".to_string()]);
    }

    #[test]
    fn broken_findings_are_reported_not_fatal() {
        let reporter = CollectingReporter::default();
        let store = IssueStore::build(&all_adapters(), &doc(), &reporter);

        let entries = reporter.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].starts_with("checkstyle: /src/A.php:"));
        assert_eq!(store.issues_for("/src/A.php").len(), 3);
    }

    #[test]
    fn query_count_does_not_grow_with_files() {
        let adapters = all_adapters();
        let query = CountingQuery {
            doc: many_files(3000),
            calls: AtomicUsize::new(0),
        };
        let store = IssueStore::build(&adapters, &query, &CollectingReporter::default());

        assert_eq!(store.files_with_issues().len(), 3000);
        assert_eq!(store.issue_count(), 6000);
        assert!(query.calls.load(Ordering::Relaxed) <= 2 * adapters.len());

        let last = store.issues_for("/src/F2999.php");
        assert_eq!(last[1].description(), "Too long");
    }

    #[test]
    fn unknown_file_has_no_issues() {
        let store = IssueStore::build(&all_adapters(), &doc(), &CollectingReporter::default());
        assert!(store.issues_for("/nowhere.php").is_empty());
    }
}
