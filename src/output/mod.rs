pub mod html;

use std::path::{Component, Path, PathBuf};

use crate::error::RenderError;
use crate::report::issue::IssueCounts;
use crate::view::RenderContext;

pub use html::IndexEntry;

fn write_file(path: &Path, content: &str) -> Result<(), RenderError> {
    let write_err = |source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, content).map_err(write_err)
}

/// Output page path for a source file, relative to the output directory.
/// Only plain name components are kept, so the page always lands below the
/// output directory whatever the report claims.
pub fn page_path(display_path: &str) -> String {
    let parts: Vec<String> = Path::new(display_path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!("{}.html", parts.join("/"))
}

/// Write one source page, returning its location.
pub fn write_page(output_dir: &Path, ctx: &RenderContext) -> Result<PathBuf, RenderError> {
    let rel = page_path(&ctx.file_path);
    let path = output_dir.join(&rel);
    write_file(&path, &html::render_page(ctx, &rel))?;
    Ok(path)
}

pub fn write_index(output_dir: &Path, entries: &[IndexEntry], totals: &IssueCounts) -> Result<PathBuf, RenderError> {
    let path = output_dir.join("index.html");
    write_file(&path, &html::render_index(entries, totals))?;
    Ok(path)
}

/// Write the static assets pages link to.
pub fn write_assets(output_dir: &Path) -> Result<(), RenderError> {
    write_file(&output_dir.join(html::STYLESHEET_PATH), html::STYLESHEET)
}
