//! Analysis settings shared by the loader, the index and the closure engine.

use std::path::PathBuf;

use crate::base::constants::SOURCE_EXTENSION;

/// What to do with a source unit that has syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorPolicy {
    /// Fail the whole run with [`Error::Parse`](crate::Error::Parse).
    #[default]
    Abort,
    /// Drop the unit from the corpus and log a warning.
    Skip,
}

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// File extensions (without the dot) scanned under the corpus root.
    pub extensions: Vec<String>,
    /// Extra reference catalogs listing external types.
    pub reference_catalogs: Vec<PathBuf>,
    /// Whether the built-in core library catalog is indexed.
    pub core_library: bool,
    pub parse_errors: ParseErrorPolicy,
    /// Abort when the closure would visit more source units than this.
    pub max_units: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            extensions: vec![SOURCE_EXTENSION.to_string()],
            reference_catalogs: Vec::new(),
            core_library: true,
            parse_errors: ParseErrorPolicy::default(),
            max_units: None,
        }
    }
}

impl AnalysisConfig {
    pub fn with_parse_errors(mut self, policy: ParseErrorPolicy) -> Self {
        self.parse_errors = policy;
        self
    }

    pub fn with_max_units(mut self, limit: usize) -> Self {
        self.max_units = Some(limit);
        self
    }

    pub fn with_reference_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_catalogs.push(path.into());
        self
    }

    pub fn without_core_library(mut self) -> Self {
        self.core_library = false;
        self
    }

    /// Whether `extension` (without the dot) is scanned. Case-insensitive.
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.extensions, vec!["cs".to_string()]);
        assert!(config.core_library);
        assert_eq!(config.parse_errors, ParseErrorPolicy::Abort);
        assert_eq!(config.max_units, None);
    }

    #[test]
    fn test_accepts_extension() {
        let mut config = AnalysisConfig::default();
        config.extensions.push(".csx".to_string());
        assert!(config.accepts_extension("cs"));
        assert!(config.accepts_extension("CS"));
        assert!(config.accepts_extension("csx"));
        assert!(!config.accepts_extension("txt"));
    }

    #[test]
    fn test_builders() {
        let config = AnalysisConfig::default()
            .with_parse_errors(ParseErrorPolicy::Skip)
            .with_max_units(4)
            .with_reference_catalog("refs.txt")
            .without_core_library();
        assert_eq!(config.parse_errors, ParseErrorPolicy::Skip);
        assert_eq!(config.max_units, Some(4));
        assert_eq!(config.reference_catalogs, vec![PathBuf::from("refs.txt")]);
        assert!(!config.core_library);
    }
}
