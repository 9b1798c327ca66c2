use std::collections::{BTreeMap, BTreeSet};

use crate::adapters::{MappedIssue, ReportAdapter};
use crate::error::ParseError;
use crate::report::issue::{IssueRecord, SeverityRank};
use crate::xml::{ReportNode, ReportQuery};

/// Where a report schema keeps its findings and which attributes carry
/// the issue fields.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Root element of the report file, e.g. "checkstyle"
    pub report: &'static str,
    /// Path below the report root to elements naming a file. A leading `/`
    /// searches at any depth.
    pub file_nodes: &'static str,
    /// Attribute of a file element holding the path
    pub file_attr: &'static str,
    /// Path below the report root to the elements whose children are findings
    pub issue_nodes: &'static str,
    pub line_start: &'static str,
    /// Absent means single-line findings
    pub line_end: Option<&'static str>,
    pub description: &'static str,
    pub severity: &'static str,
    /// Tool label stored on every record
    pub source: &'static str,
}

/// A finding element together with the issue node it was found under.
#[derive(Debug, Clone, Copy)]
pub struct Finding<'n> {
    pub parent: &'n ReportNode,
    pub element: &'n ReportNode,
}

/// Field extraction strategy. Schema adapters start from
/// `Extractors::default()` and swap the functions their format needs.
#[derive(Clone, Copy)]
pub struct Extractors {
    /// Files an issue node holds findings for
    pub owners: for<'n> fn(&Schema, &'n ReportNode) -> Vec<&'n str>,
    /// Is this child element a finding for the given file?
    pub accepts: fn(&Schema, &Finding<'_>, &str) -> bool,
    pub line_range: fn(&Schema, &Finding<'_>) -> Result<(usize, usize), ParseError>,
    pub description: fn(&Schema, &Finding<'_>, &str) -> String,
    pub severity: fn(&Schema, &Finding<'_>) -> SeverityRank,
}

impl Default for Extractors {
    fn default() -> Self {
        Extractors {
            owners: owner_by_attr,
            accepts: accept_all,
            line_range: attr_line_range,
            description: attr_description,
            severity: attr_severity,
        }
    }
}

impl std::fmt::Debug for Extractors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractors").finish_non_exhaustive()
    }
}

pub fn owner_by_attr<'n>(schema: &Schema, node: &'n ReportNode) -> Vec<&'n str> {
    node.attr(schema.file_attr).into_iter().collect()
}

pub fn accept_all(_: &Schema, _: &Finding<'_>, _: &str) -> bool {
    true
}

/// Parse a required line-number attribute.
pub fn required_line(element: &ReportNode, attribute: &'static str) -> Result<usize, ParseError> {
    let raw = element.attr(attribute).ok_or_else(|| ParseError::MissingAttribute {
        element: element.name.clone(),
        attribute,
    })?;
    raw.trim().parse().map_err(|_| ParseError::InvalidNumber {
        element: element.name.clone(),
        attribute,
        value: raw.to_string(),
    })
}

/// Start is required. An absent or unusable end falls back to the start.
pub fn attr_line_range(schema: &Schema, finding: &Finding<'_>) -> Result<(usize, usize), ParseError> {
    let start = required_line(finding.element, schema.line_start)?;
    let end = schema
        .line_end
        .and_then(|attr| finding.element.attr(attr))
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(start);
    Ok((start, end))
}

pub fn attr_description(schema: &Schema, finding: &Finding<'_>, _file: &str) -> String {
    escape_html(finding.element.attr(schema.description).unwrap_or_default().trim())
}

pub fn text_description(_: &Schema, finding: &Finding<'_>, _file: &str) -> String {
    escape_html(finding.element.text.trim())
}

pub fn attr_severity(schema: &Schema, finding: &Finding<'_>) -> SeverityRank {
    SeverityRank::from_raw(finding.element.attr(schema.severity).unwrap_or_default())
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Adapter driven entirely by a `Schema` and its `Extractors`.
#[derive(Debug, Clone)]
pub struct SchemaAdapter {
    pub name: &'static str,
    pub summary: &'static str,
    pub schema: Schema,
    pub extract: Extractors,
}

impl SchemaAdapter {
    fn file_query(&self) -> String {
        format!(
            "/*/{}/{}[@{}]",
            self.schema.report, self.schema.file_nodes, self.schema.file_attr
        )
    }

    fn issue_query(&self) -> String {
        format!("/*/{}/{}", self.schema.report, self.schema.issue_nodes)
    }

    /// Turn one finding element into a record, using this adapter's extractors.
    pub fn map_finding(&self, finding: &Finding<'_>, file: &str) -> MappedIssue {
        let (start, end) = (self.extract.line_range)(&self.schema, finding)?;
        IssueRecord::new(
            file,
            start,
            end,
            self.schema.source,
            (self.extract.description)(&self.schema, finding, file),
            (self.extract.severity)(&self.schema, finding),
        )
    }
}

impl ReportAdapter for SchemaAdapter {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.summary
    }

    fn files_with_issues(&self, doc: &dyn ReportQuery) -> BTreeSet<String> {
        doc.query(&self.file_query())
            .into_iter()
            .filter_map(|node| node.attr(self.schema.file_attr))
            .map(str::to_string)
            .collect()
    }

    fn issue_nodes<'d>(&self, doc: &'d dyn ReportQuery, file: &str) -> Vec<&'d ReportNode> {
        doc.query(&self.issue_query())
            .into_iter()
            .filter(|node| (self.extract.owners)(&self.schema, *node).contains(&file))
            .collect()
    }

    fn nodes_by_file<'d>(&self, doc: &'d dyn ReportQuery) -> BTreeMap<String, Vec<&'d ReportNode>> {
        let mut by_file: BTreeMap<String, Vec<&'d ReportNode>> = BTreeMap::new();
        for node in doc.query(&self.issue_query()) {
            let mut owners = (self.extract.owners)(&self.schema, node);
            owners.sort_unstable();
            owners.dedup();
            for file in owners {
                by_file.entry(file.to_string()).or_default().push(node);
            }
        }
        by_file
    }

    fn map_issues(&self, node: &ReportNode, file: &str) -> Vec<MappedIssue> {
        node.children
            .iter()
            .map(|element| Finding {
                parent: node,
                element,
            })
            .filter(|finding| (self.extract.accepts)(&self.schema, finding, file))
            .map(|finding| self.map_finding(&finding, file))
            .collect()
    }
}
