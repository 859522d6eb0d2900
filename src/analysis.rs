//! Analysis - one loaded corpus with its type index, ready for queries.
//!
//! ## Usage
//!
//! ```ignore
//! let analysis = Analysis::load("src", AnalysisConfig::default())?;
//! let closure = analysis.closure_of_type("Shop.Order")?;
//! print!("{}", analysis.reporter().render(&closure));
//! ```

use std::path::Path;

use crate::closure::{Closure, ClosureComputer, Reporter};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::hir::{Catalog, CorpusOracle, TypeIndex};
use crate::project::{Corpus, CorpusLoader};

/// Owns the corpus and the index built over it for one run.
#[derive(Debug)]
pub struct Analysis {
    config: AnalysisConfig,
    corpus: Corpus,
    index: TypeIndex,
}

impl Analysis {
    /// Load and parse the corpus under `root`, then index it.
    pub fn load(root: impl AsRef<Path>, config: AnalysisConfig) -> Result<Self> {
        let corpus = CorpusLoader::new(config.clone()).load(root)?;
        Self::new(corpus, config)
    }

    /// Index an already loaded corpus together with the configured catalogs.
    pub fn new(corpus: Corpus, config: AnalysisConfig) -> Result<Self> {
        let mut index = TypeIndex::new();
        for unit in corpus.units() {
            if let Some(file) = unit.source_file() {
                index.add_unit(unit.id(), &file);
            }
        }
        // Source declarations are indexed first so they shadow catalog entries
        if config.core_library {
            index.add_catalog(&Catalog::core_library()?);
        }
        for path in &config.reference_catalogs {
            index.add_catalog(&Catalog::load(path)?);
        }
        tracing::debug!(units = corpus.len(), types = index.len(), "analysis ready");

        Ok(Self {
            config,
            corpus,
            index,
        })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &TypeIndex {
        &self.index
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The binder over this corpus.
    pub fn oracle(&self) -> CorpusOracle<'_> {
        CorpusOracle::new(&self.index, &self.corpus.files())
    }

    /// Transitive closure of the in-source types matching `name`.
    pub fn closure_of_type(&self, name: &str) -> Result<Closure> {
        let oracle = self.oracle();
        ClosureComputer::new(&self.corpus, &oracle)
            .with_max_units(self.config.max_units)
            .compute_from_name(name)
    }

    /// Types declared in and referenced by the unit matching `selector`.
    pub fn closure_of_unit(&self, selector: &str) -> Result<Closure> {
        let unit = self.corpus.find_unit(selector)?;
        let oracle = self.oracle();
        ClosureComputer::new(&self.corpus, &oracle)
            .with_max_units(self.config.max_units)
            .compute_from_unit(unit)
    }

    pub fn reporter(&self) -> Reporter<'_> {
        Reporter::new(&self.corpus)
    }
}
