use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::RenderError;
use crate::report::issue::{IssueCounts, SeverityRank};
use crate::report::merger::Segment;

/// One output line of an annotated source view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderLine {
    pub line_number: usize,
    pub text: String,
    pub highlight: Option<SeverityRank>,
    pub tooltip: String,
}

/// Everything a page template may use, and nothing else.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    /// Path shown to the reader (common prefix removed)
    pub file_path: String,
    pub lines: Vec<RenderLine>,
    pub counts: IssueCounts,
}

/// Read a source file, or report it as unavailable for rendering.
pub fn load_source(path: &Path) -> Result<String, RenderError> {
    std::fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| RenderError::Unavailable {
            path: PathBuf::from(path),
            source,
        })
}

/// Annotate every source line with the segment covering it.
///
/// `segments` must be ordered by line and non-overlapping, as produced by
/// `merge_segments`. Both sequences are walked once; segment lines past the
/// end of the source are dropped.
pub fn render_lines<S: AsRef<str>>(lines: &[S], segments: &[Segment<'_>]) -> Vec<RenderLine> {
    let mut out = Vec::with_capacity(lines.len());
    let mut cursor = segments.iter().peekable();

    for (idx, text) in lines.iter().enumerate() {
        let line_number = idx + 1;
        while cursor.next_if(|s| s.line_end < line_number).is_some() {}

        let (highlight, tooltip) = match cursor.peek() {
            Some(segment) if segment.contains(line_number) => {
                (Some(segment.highlight), segment.tooltip.clone())
            }
            _ => (None, String::new()),
        };

        out.push(RenderLine {
            line_number,
            text: text.as_ref().to_string(),
            highlight,
            tooltip,
        });
    }
    out
}

/// Split file content into lines the way the view numbers them.
pub fn split_lines(content: &str) -> Vec<&str> {
    content.lines().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::issue::IssueRecord;
    use crate::report::merger::merge_segments;

    fn issue(start: usize, end: usize, desc: &str, sev: SeverityRank) -> IssueRecord {
        IssueRecord::new("a.php", start, end, "PMD", desc, sev).unwrap()
    }

    #[test]
    fn no_issues_renders_plain_lines() {
        let lines = ["<?php", "echo 1;", ""];
        let rendered = render_lines(&lines, &[]);
        assert_eq!(rendered.len(), 3);
        assert!(rendered.iter().all(|l| l.highlight.is_none() && l.tooltip.is_empty()));
        assert_eq!(rendered[1].line_number, 2);
        assert_eq!(rendered[1].text, "echo 1;");
    }

    #[test]
    fn lines_take_their_segment_annotation() {
        let issues = vec![
            issue(2, 4, "Unused variable", SeverityRank::Warning),
            issue(3, 3, "Null deref", SeverityRank::Error),
            issue(6, 6, "Long line", SeverityRank::Info),
        ];
        let segments = merge_segments(&issues);
        let lines: Vec<String> = (1..=7).map(|n| format!("line {n}")).collect();
        let rendered = render_lines(&lines, &segments);

        let classes: Vec<Option<SeverityRank>> = rendered.iter().map(|l| l.highlight).collect();
        assert_eq!(
            classes,
            vec![
                None,
                Some(SeverityRank::Warning),
                Some(SeverityRank::Error),
                Some(SeverityRank::Warning),
                None,
                Some(SeverityRank::Info),
                None,
            ]
        );
        assert_eq!(rendered[2].tooltip, "PMD: Null deref\nPMD: Unused variable");
        assert_eq!(rendered[4].tooltip, "");
    }

    #[test]
    fn segments_past_the_end_are_truncated() {
        let issues = vec![issue(2, 50, "Not covered", SeverityRank::Info), issue(80, 90, "x", SeverityRank::Error)];
        let segments = merge_segments(&issues);
        let rendered = render_lines(&["a", "b", "c"], &segments);
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0].highlight, None);
        assert_eq!(rendered[2].highlight, Some(SeverityRank::Info));
    }

    #[test]
    fn unreadable_source_is_unavailable() {
        let err = load_source(Path::new("/definitely/not/here.php")).unwrap_err();
        assert!(matches!(err, RenderError::Unavailable { .. }));
    }

    #[test]
    fn numbering_ignores_trailing_newline() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb"), vec!["a", "b"]);
    }
}
