//! HTML page generation
//!
//! Pages are plain HTML with a shared stylesheet. Each highlighted line
//! carries its severity as a CSS class and the issue list as a `title`.

use crate::adapters::extract::escape_html;
use crate::report::issue::IssueCounts;
use crate::view::RenderContext;

/// Path of the stylesheet, relative to the output directory
pub const STYLESHEET_PATH: &str = "css/codebrowser.css";

pub const STYLESHEET: &str = r#"body { font-family: sans-serif; margin: 0; background: #fafafa; color: #222; }
header { padding: 12px 20px; background: #2d3e50; color: #fff; }
header a { color: #cfe3ff; }
table.source { border-collapse: collapse; font-family: monospace; font-size: 13px; width: 100%; }
table.source td { padding: 0 8px; white-space: pre; vertical-align: top; }
table.source td.num { color: #999; text-align: right; user-select: none; width: 1%; }
tr.blocker { background: #f4b6b6; }
tr.error { background: #f9d0c4; }
tr.warning { background: #fcefc0; }
tr.info { background: #dcebf7; }
table.files { border-collapse: collapse; margin: 20px; }
table.files td, table.files th { padding: 4px 12px; border-bottom: 1px solid #ddd; text-align: left; }
"#;

/// Relative link from a page at `page_rel` back to the output root
fn root_prefix(page_rel: &str) -> String {
    "../".repeat(page_rel.matches('/').count())
}

fn counts_cells(counts: &IssueCounts) -> String {
    format!(
        "<td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
        counts.total, counts.blocker, counts.error, counts.warning, counts.info
    )
}

/// Render one annotated source page. `page_rel` is the page's path inside
/// the output directory, used to link the shared assets.
pub fn render_page(ctx: &RenderContext, page_rel: &str) -> String {
    let prefix = root_prefix(page_rel);
    let mut rows = String::new();
    for line in &ctx.lines {
        let class = line.highlight.map(|h| h.as_str()).unwrap_or("");
        if line.tooltip.is_empty() {
            rows.push_str(&format!(
                "<tr id=\"line-{n}\" class=\"{class}\"><td class=\"num\">{n}</td><td>{text}</td></tr>\n",
                n = line.line_number,
                text = escape_html(&line.text),
            ));
        } else {
            // Tooltip text is built from already-escaped descriptions.
            rows.push_str(&format!(
                "<tr id=\"line-{n}\" class=\"{class}\" title=\"{tip}\"><td class=\"num\">{n}</td><td>{text}</td></tr>\n",
                n = line.line_number,
                tip = line.tooltip,
                text = escape_html(&line.text),
            ));
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <link rel="stylesheet" href="{prefix}{css}">
</head>
<body>
    <header><a href="{prefix}index.html">index</a> / {title} ({total} issues)</header>
    <table class="source">
{rows}    </table>
</body>
</html>
"#,
        title = escape_html(&ctx.file_path),
        prefix = prefix,
        css = STYLESHEET_PATH,
        total = ctx.counts.total,
        rows = rows,
    )
}

/// One row of the index page
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub display_path: String,
    pub page_rel: String,
    pub counts: IssueCounts,
}

pub fn render_index(entries: &[IndexEntry], totals: &IssueCounts) -> String {
    let body = if entries.is_empty() {
        "    <p>No files were rendered.</p>\n".to_string()
    } else {
        let mut rows = String::new();
        for entry in entries {
            rows.push_str(&format!(
                "<tr><td><a href=\"{href}\">{path}</a></td>{cells}</tr>\n",
                href = escape_html(&entry.page_rel),
                path = escape_html(&entry.display_path),
                cells = counts_cells(&entry.counts),
            ));
        }
        format!(
            "    <table class=\"files\">\n<tr><th>File</th><th>Issues</th><th>Blocker</th><th>Error</th><th>Warning</th><th>Info</th></tr>\n{rows}<tr><th>Total</th>{cells}</tr>\n    </table>\n",
            rows = rows,
            cells = counts_cells(totals),
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Code browser</title>
    <link rel="stylesheet" href="{css}">
</head>
<body>
    <header>Code browser: {files} files, {total} issues</header>
{body}</body>
</html>
"#,
        css = STYLESHEET_PATH,
        files = entries.len(),
        total = totals.total,
        body = body,
    )
}
