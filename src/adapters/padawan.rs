use crate::adapters::extract::{Extractors, Schema, SchemaAdapter};

/// Padawan anti-pattern reports.
pub fn adapter() -> SchemaAdapter {
    SchemaAdapter {
        name: "padawan",
        summary: "Padawan XML: <file name> with <error line message severity>",
        schema: Schema {
            report: "padawan",
            file_nodes: "file",
            file_attr: "name",
            issue_nodes: "file",
            line_start: "line",
            line_end: None,
            description: "message",
            severity: "severity",
            source: "Padawan",
        },
        extract: Extractors::default(),
    }
}
