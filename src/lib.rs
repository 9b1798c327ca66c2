//! Aggregates static-analysis reports (checkstyle, PMD, CPD, Padawan,
//! Clover coverage) into one issue model and renders an annotated view of
//! every source file.
//!
//! The pipeline: [`xml::ReportDocument`] loads the reports,
//! [`store::IssueStore`] runs every [`adapters::ReportAdapter`] over them,
//! [`report::merger::merge_segments`] partitions one file's issues into
//! line segments and [`view::render_lines`] annotates the source lines.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod listing;
pub mod output;
pub mod report;
pub mod store;
pub mod view;
pub mod xml;
