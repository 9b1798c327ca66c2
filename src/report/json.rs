use anyhow::Result;

use crate::report::run::RunReport;

/// Render a run report as pretty-printed JSON
pub fn render(report: &RunReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::issue::IssueCounts;
    use crate::report::run::SkippedFile;

    #[test]
    fn summary_fields_are_present() {
        let report = RunReport {
            version: "0.1.0".into(),
            timestamp: "2026-01-01T00:00:00+00:00".into(),
            log_dir: "logs".into(),
            output_dir: "out".into(),
            adapters: vec!["checkstyle".into()],
            files_with_issues: 2,
            files_rendered: 1,
            skipped: vec![SkippedFile {
                path: "b.php".into(),
                reason: "source not readable: b.php".into(),
            }],
            duration_ms: 12,
            totals: IssueCounts {
                total: 3,
                warning: 3,
                ..Default::default()
            },
        };
        let value: serde_json::Value = serde_json::from_str(&render(&report).unwrap()).unwrap();
        assert_eq!(value["files_rendered"], 1);
        assert_eq!(value["totals"]["warning"], 3);
        assert_eq!(value["skipped"][0]["path"], "b.php");
    }
}
