//! File discovery and reading for corpus loading.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};

/// Recursively collect every file under `root` whose extension the config
/// accepts, sorted by path.
pub fn collect_file_paths(root: &Path, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            let source = err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            Error::corpus_load(path, source)
        })?;
        if entry.file_type().is_file() && has_accepted_extension(entry.path(), config) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

fn has_accepted_extension(path: &Path, config: &AnalysisConfig) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| config.accepts_extension(ext))
}

/// Read a source file as UTF-8 text.
pub fn load_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::corpus_load(path, source))
}
