use crate::adapters::extract::{Extractors, Schema, SchemaAdapter};

/// Checkstyle-format reports (`<checkstyle><file name><error line message severity/>`).
/// Also produced by PHP_CodeSniffer and most linters with a checkstyle writer.
pub fn adapter() -> SchemaAdapter {
    SchemaAdapter {
        name: "checkstyle",
        summary: "Checkstyle XML: <file name> with <error line message severity>",
        schema: Schema {
            report: "checkstyle",
            file_nodes: "file",
            file_attr: "name",
            issue_nodes: "file",
            line_start: "line",
            line_end: None,
            description: "message",
            severity: "severity",
            source: "Checkstyle",
        },
        extract: Extractors::default(),
    }
}
