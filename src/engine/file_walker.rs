use std::path::{Path, PathBuf};

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use tracing::debug;

use crate::error::ConfigError;

/// Compile exclude patterns into one matcher. A bad pattern is fatal.
pub fn build_excludes(patterns: &[String]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ConfigError::InvalidPattern {
        pattern: patterns.join(","),
        source,
    })
}

/// Walk a source tree and collect the files to render.
///
/// - Respects .gitignore automatically (via the `ignore` crate)
/// - Skips hidden entries and binary files
/// - Skips paths (relative to `root`) matching `exclude`
///
/// Paths are returned sorted.
pub fn walk_files(root: &Path, exclude: &GlobSet) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(root);

    builder
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .follow_links(false);

    let mut files = Vec::new();

    for entry in builder.build() {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }

                let path = entry.path().to_path_buf();
                let rel = path.strip_prefix(root).unwrap_or(&path);

                if exclude.is_match(rel) {
                    debug!("Excluded: {}", path.display());
                    continue;
                }

                if is_likely_binary(&path) {
                    debug!("Binary skip: {}", path.display());
                    continue;
                }

                files.push(path);
            }
            Err(e) => {
                debug!("Walk error: {}", e);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Quick heuristic to detect binary files by extension
fn is_likely_binary(path: &Path) -> bool {
    let binary_extensions = [
        "exe", "dll", "so", "dylib", "bin", "obj", "o", "a", "lib",
        "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp",
        "mp3", "mp4", "avi", "mov", "wav",
        "zip", "tar", "gz", "bz2", "xz", "7z", "rar", "phar",
        "pdf", "woff", "woff2", "ttf", "otf", "eot",
        "wasm", "class", "pyc", "jar",
        "db", "sqlite", "sqlite3",
    ];

    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| binary_extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_sources_and_applies_excludes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::create_dir_all(root.join("vendor/lib")).unwrap();
        std::fs::write(root.join("src/A.php"), "<?php").unwrap();
        std::fs::write(root.join("src/logo.png"), [0u8, 1, 2]).unwrap();
        std::fs::write(root.join("vendor/lib/B.php"), "<?php").unwrap();
        std::fs::write(root.join(".hidden.php"), "<?php").unwrap();

        let excludes = build_excludes(&["vendor/**".to_string()]).unwrap();
        let files = walk_files(root, &excludes).unwrap();
        assert_eq!(files, vec![root.join("src/A.php")]);
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let err = build_excludes(&["src/[".to_string()]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}
