use crate::adapters::extract::{self, Extractors, Finding, Schema, SchemaAdapter};
use crate::error::ParseError;
use crate::report::issue::SeverityRank;
use crate::xml::ReportNode;

/// Copy/paste detector reports. One `<duplication lines>` holds a
/// `<file path line>` per copy, so a record spans `lines` lines from each
/// copy's start and names the other copies.
pub fn adapter() -> SchemaAdapter {
    SchemaAdapter {
        name: "cpd",
        summary: "CPD XML: <duplication lines> with one <file path line> per copy",
        schema: Schema {
            report: "pmd-cpd",
            file_nodes: "duplication/file",
            file_attr: "path",
            issue_nodes: "duplication",
            line_start: "line",
            line_end: None,
            description: "",
            severity: "",
            source: "Duplication",
        },
        extract: Extractors {
            owners: copy_paths,
            accepts: is_copy_of,
            line_range: copy_range,
            description: copy_description,
            severity: duplication_severity,
        },
    }
}

fn is_copy(schema: &Schema, node: &ReportNode, file: &str) -> bool {
    node.name == "file" && node.attr(schema.file_attr) == Some(file)
}

fn copy_paths<'n>(schema: &Schema, duplication: &'n ReportNode) -> Vec<&'n str> {
    duplication
        .children
        .iter()
        .filter(|c| c.name == "file")
        .filter_map(|c| c.attr(schema.file_attr))
        .collect()
}

fn is_copy_of(schema: &Schema, finding: &Finding<'_>, file: &str) -> bool {
    is_copy(schema, finding.element, file)
}

fn duplication_severity(_: &Schema, _: &Finding<'_>) -> SeverityRank {
    SeverityRank::Warning
}

fn duplicated_lines(duplication: &ReportNode) -> usize {
    duplication
        .attr("lines")
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(1)
}

fn copy_range(schema: &Schema, finding: &Finding<'_>) -> Result<(usize, usize), ParseError> {
    let start = extract::required_line(finding.element, schema.line_start)?;
    let lines = duplicated_lines(finding.parent).max(1);
    Ok((start, start.saturating_add(lines - 1)))
}

fn copy_description(schema: &Schema, finding: &Finding<'_>, _file: &str) -> String {
    let others: Vec<String> = finding
        .parent
        .children
        .iter()
        .filter(|c| c.name == "file" && !std::ptr::eq(*c, finding.element))
        .map(|c| {
            format!(
                "{}:{}",
                c.attr(schema.file_attr).unwrap_or("?"),
                c.attr(schema.line_start).unwrap_or("?")
            )
        })
        .collect();

    extract::escape_html(&format!(
        "Duplicate code of {} lines, also found in: {}",
        duplicated_lines(finding.parent),
        others.join(", ")
    ))
}
