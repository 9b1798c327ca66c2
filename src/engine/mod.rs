pub mod file_walker;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use globset::GlobSet;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::adapters::{self, ReportAdapter};
use crate::cli::GenerateArgs;
use crate::config::CodebrowserConfig;
use crate::diagnostics::SkipReporter;
use crate::error::{ConfigError, RenderError};
use crate::output::{self, IndexEntry};
use crate::report::issue::{IssueCounts, IssueRecord};
use crate::report::json;
use crate::report::merger::merge_segments;
use crate::report::run::{RunReport, SkippedFile};
use crate::store::IssueStore;
use crate::view::{self, RenderContext, RenderLine};
use crate::xml::ReportDocument;

/// Name of the machine-readable run summary inside the output directory
pub const SUMMARY_FILE: &str = "summary.json";

/// Annotate `content` with the given issues: merge their ranges, then walk
/// the source lines against the resulting segments.
pub fn annotate(issues: &[IssueRecord], content: &str) -> Vec<RenderLine> {
    let segments = merge_segments(issues);
    view::render_lines(&view::split_lines(content), &segments)
}

/// Longest directory prefix (ending in `/`) shared by every path.
pub fn common_path_prefix<S: AsRef<str>>(files: &[S]) -> String {
    let mut iter = files.iter().map(AsRef::as_ref);
    let Some(first) = iter.next() else {
        return String::new();
    };

    let mut len = first.rfind('/').map_or(0, |i| i + 1);
    for file in iter {
        while !file.starts_with(&first[..len]) {
            len = first[..len - 1].rfind('/').map_or(0, |i| i + 1);
        }
    }
    first[..len].to_string()
}

fn require_dir(flag: &'static str, path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingDirectory {
            flag,
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ConfigError::NotADirectory {
            flag,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

enum FileOutcome {
    Rendered(IndexEntry),
    Skipped(SkippedFile),
}

/// Orchestrates report loading, issue indexing, per-file rendering and
/// the final index.
pub struct Generator {
    log_dir: PathBuf,
    output_dir: PathBuf,
    source_dir: Option<PathBuf>,
    adapters: Vec<Box<dyn ReportAdapter>>,
    exclude: GlobSet,
}

impl Generator {
    /// Validate directories and resolve the adapter set. Every failure here
    /// is fatal and happens before any report is read.
    pub fn new(args: &GenerateArgs) -> Result<Self, ConfigError> {
        require_dir("--log", &args.log_dir)?;
        require_dir("--output", &args.output_dir)?;
        if let Some(ref source) = args.source_dir {
            require_dir("--source", source)?;
        }

        let config = if args.no_config {
            CodebrowserConfig::default()
        } else {
            CodebrowserConfig::load(&args.log_dir).unwrap_or_default()
        };

        let names = config.adapter_names(args.adapters.as_deref())?;
        let adapters = adapters::adapters_by_names(&names)?;
        info!("Loaded {} adapters: {}", adapters.len(), names.join(", "));

        let mut exclude = args.exclude.clone();
        exclude.extend(config.source.exclude.iter().cloned());
        let exclude = file_walker::build_excludes(&exclude)?;

        Ok(Generator {
            log_dir: args.log_dir.clone(),
            output_dir: args.output_dir.clone(),
            source_dir: args.source_dir.clone(),
            adapters,
            exclude,
        })
    }

    /// Run the full pipeline. Files that cannot be read or written are
    /// reported through `reporter` and listed in the returned report.
    pub fn run(&self, reporter: &dyn SkipReporter) -> Result<RunReport> {
        let start = Instant::now();

        // Step 1: Load and index reports
        debug!("Loading reports from {}", self.log_dir.display());
        let doc = ReportDocument::load_dir(&self.log_dir)?;
        let store = IssueStore::build(&self.adapters, &doc, reporter);
        let with_issues = store.files_with_issues();
        info!("Found {} files with issues", with_issues.len());

        // Step 2: Decide which files get a page
        let files: Vec<String> = match self.source_dir {
            Some(ref root) => {
                let root = std::fs::canonicalize(root)?;
                file_walker::walk_files(&root, &self.exclude)?
                    .iter()
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect()
            }
            None => with_issues.iter().cloned().collect(),
        };
        let prefix = common_path_prefix(&files);
        info!("Rendering {} files", files.len());

        // Step 3: Render every file independently (parallel over files)
        let outcomes: Vec<FileOutcome> = files
            .par_iter()
            .map(|file| match self.render_file(&store, file, &prefix) {
                Ok(entry) => FileOutcome::Rendered(entry),
                Err(e) => {
                    reporter.file_skipped(file, &e);
                    FileOutcome::Skipped(SkippedFile {
                        path: file.clone(),
                        reason: e.to_string(),
                    })
                }
            })
            .collect();

        // Step 4: Index and summary, once every worker is done
        let mut entries = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Rendered(entry) => entries.push(entry),
                FileOutcome::Skipped(s) => skipped.push(s),
            }
        }
        entries.sort_by(|a, b| a.display_path.cmp(&b.display_path));

        let mut totals = IssueCounts::default();
        for entry in &entries {
            totals.merge(&entry.counts);
        }

        output::write_assets(&self.output_dir)?;
        output::write_index(&self.output_dir, &entries, &totals)?;

        let report = RunReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            log_dir: self.log_dir.clone(),
            output_dir: self.output_dir.clone(),
            adapters: store.adapters().to_vec(),
            files_with_issues: with_issues.len(),
            files_rendered: entries.len(),
            skipped,
            duration_ms: start.elapsed().as_millis() as u64,
            totals,
        };

        let summary_path = self.output_dir.join(SUMMARY_FILE);
        std::fs::write(&summary_path, json::render(&report)?)?;
        info!("Summary written to {}", summary_path.display());

        Ok(report)
    }

    fn render_file(&self, store: &IssueStore, file: &str, prefix: &str) -> Result<IndexEntry, RenderError> {
        let started = Instant::now();
        let issues = store.issues_for(file);
        let display_path = file.strip_prefix(prefix).unwrap_or(file).to_string();
        debug!("Generating source view for [...{}] ({} issues)", display_path, issues.len());

        let content = view::load_source(Path::new(file))?;
        let ctx = RenderContext {
            file_path: display_path.clone(),
            lines: annotate(issues, &content),
            counts: IssueCounts::from_issues(issues),
        };
        output::write_page(&self.output_dir, &ctx)?;

        debug!("[...{}] completed in {:?}", display_path, started.elapsed());
        Ok(IndexEntry {
            page_rel: output::page_path(&display_path),
            display_path,
            counts: ctx.counts,
        })
    }
}
