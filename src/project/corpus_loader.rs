use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::corpus::{Corpus, SourceUnit};
use super::file_loader;
use crate::config::{AnalysisConfig, ParseErrorPolicy};
use crate::error::{Error, Result};

/// Loads and parses every source file under a corpus root.
#[derive(Debug, Clone, Default)]
pub struct CorpusLoader {
    config: AnalysisConfig,
}

impl CorpusLoader {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Walk `root`, parse the matching files in parallel and apply the
    /// parse error policy in path order.
    pub fn load(&self, root: impl AsRef<Path>) -> Result<Corpus> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        let paths = file_loader::collect_file_paths(root, &self.config)?;
        tracing::debug!(root = %root.display(), files = paths.len(), "collected source files");

        let units = paths
            .into_par_iter()
            .map(|path| {
                let text = file_loader::load_file(&path)?;
                Ok(SourceUnit::parse(root, path, &text))
            })
            .collect::<Result<Vec<_>>>()?;

        self.assemble(root, units)
    }

    /// Parse in-memory sources under the same policy as [`load`](Self::load).
    pub fn load_sources<P, S>(
        &self,
        root: impl Into<PathBuf>,
        sources: impl IntoIterator<Item = (P, S)>,
    ) -> Result<Corpus>
    where
        P: Into<PathBuf>,
        S: AsRef<str>,
    {
        let root = root.into();
        let units = sources
            .into_iter()
            .map(|(path, text)| SourceUnit::parse(&root, path.into(), text.as_ref()))
            .collect();
        self.assemble(&root, units)
    }

    fn assemble(&self, root: &Path, mut units: Vec<SourceUnit>) -> Result<Corpus> {
        units.sort_by(|a, b| a.path().cmp(b.path()));

        let mut kept = Vec::with_capacity(units.len());
        let mut skipped = 0usize;
        for unit in units {
            if !unit.has_errors() {
                kept.push(unit);
                continue;
            }
            let errors = unit.diagnostics();
            match self.config.parse_errors {
                ParseErrorPolicy::Abort => {
                    return Err(Error::Parse {
                        path: unit.path().to_path_buf(),
                        errors,
                    });
                }
                ParseErrorPolicy::Skip => {
                    skipped += 1;
                    tracing::warn!(
                        path = %unit.path().display(),
                        errors = errors.len(),
                        first = %errors.first().map(ToString::to_string).unwrap_or_default(),
                        "skipping unparsable source unit"
                    );
                }
            }
        }

        tracing::debug!(units = kept.len(), skipped, "corpus loaded");
        Ok(Corpus::new(root, kept))
    }
}
