//! On-disk corpora for end-to-end tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use typeslice::{Analysis, AnalysisConfig, Closure};

/// A temporary corpus directory.
pub struct TestCorpus {
    dir: TempDir,
}

impl TestCorpus {
    /// Create a corpus from `(relative path, content)` pairs.
    pub fn new(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let corpus = Self { dir };
        for (relative, content) in files {
            corpus.write(relative, content);
        }
        corpus
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(path, content).expect("write source file");
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn analysis(&self) -> Analysis {
        self.analysis_with(AnalysisConfig::default())
    }

    pub fn analysis_with(&self, config: AnalysisConfig) -> Analysis {
        Analysis::load(self.root(), config).expect("corpus loads")
    }

    /// Sorted closure keys of `entry` under the default config.
    pub fn closure_keys(&self, entry: &str) -> Vec<String> {
        keys(&self.analysis().closure_of_type(entry).expect("closure"))
    }

    /// Sorted keys of the direct listing of `file`.
    pub fn unit_keys(&self, file: &str) -> Vec<String> {
        keys(&self.analysis().closure_of_unit(file).expect("closure"))
    }
}

pub fn keys(closure: &Closure) -> Vec<String> {
    closure.sorted_keys().into_iter().map(str::to_string).collect()
}
