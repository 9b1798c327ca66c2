use crate::adapters::extract::{self, Extractors, Schema, SchemaAdapter};

/// PMD / PHPMD reports. The message is the element text and the severity
/// is a numeric priority from 1 (highest) to 5.
pub fn adapter() -> SchemaAdapter {
    SchemaAdapter {
        name: "pmd",
        summary: "PMD XML: <file name> with <violation beginline endline priority>text</violation>",
        schema: Schema {
            report: "pmd",
            file_nodes: "file",
            file_attr: "name",
            issue_nodes: "file",
            line_start: "beginline",
            line_end: Some("endline"),
            description: "",
            severity: "priority",
            source: "PMD",
        },
        extract: Extractors {
            description: extract::text_description,
            ..Extractors::default()
        },
    }
}
