use owo_colors::OwoColorize;

use crate::report::run::RunReport;

/// Print the end-of-run summary with colors
pub fn render(report: &RunReport) {
    println!();
    println!(
        "{}  codebrowser v{}: rendered {} files in {:.2}s",
        "📄".bold(),
        report.version,
        report.files_rendered,
        report.duration_ms as f64 / 1000.0
    );

    let totals = &report.totals;
    let mut parts = Vec::new();
    if totals.blocker > 0 {
        parts.push(format!("{} blocker", totals.blocker).red().bold().to_string());
    }
    if totals.error > 0 {
        parts.push(format!("{} error", totals.error).red().to_string());
    }
    if totals.warning > 0 {
        parts.push(format!("{} warning", totals.warning).yellow().to_string());
    }
    if totals.info > 0 {
        parts.push(format!("{} info", totals.info).blue().to_string());
    }

    println!("{}", "━".repeat(60));
    if totals.total == 0 {
        println!(" No issues reported");
    } else {
        println!(
            " {} issues in {} files: {}",
            totals.total.to_string().bold(),
            report.files_with_issues,
            parts.join(", ")
        );
    }

    if !report.skipped.is_empty() {
        println!(
            " {} files skipped:",
            report.files_skipped().to_string().yellow()
        );
        for skipped in &report.skipped {
            println!("   {} {}", skipped.path.dimmed(), skipped.reason);
        }
    }

    println!(" Output: {}", report.output_dir.display());
    println!("{}", "━".repeat(60));
    println!();
}
