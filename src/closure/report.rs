//! Rendering a closure as the sorted key listing.

use std::fmt;

use super::table::Closure;
use crate::project::Corpus;

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// One key per line.
    #[default]
    Plain,
    /// A JSON array of `{ key, in_source, files }` objects.
    #[cfg(feature = "json")]
    Json,
}

/// Renders closures; `corpus` maps declaring units back to their paths.
#[derive(Debug, Clone, Copy)]
pub struct Reporter<'c> {
    #[cfg_attr(not(feature = "json"), allow(dead_code))]
    corpus: &'c Corpus,
    format: ReportFormat,
    partition: bool,
}

impl<'c> Reporter<'c> {
    pub fn new(corpus: &'c Corpus) -> Self {
        Self {
            corpus,
            format: ReportFormat::default(),
            partition: false,
        }
    }

    pub fn format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Split plain output into in-source and external sections.
    pub fn partitioned(mut self, partition: bool) -> Self {
        self.partition = partition;
        self
    }

    /// The report for `closure`, rendered through [`fmt::Display`].
    pub fn report<'r>(&'r self, closure: &'r Closure) -> Report<'r, 'c> {
        Report {
            reporter: self,
            closure,
        }
    }

    pub fn render(&self, closure: &Closure) -> String {
        self.report(closure).to_string()
    }
}

/// One closure in the reporter's format.
pub struct Report<'r, 'c> {
    reporter: &'r Reporter<'c>,
    closure: &'r Closure,
}

impl fmt::Display for Report<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reporter.format {
            ReportFormat::Plain if self.reporter.partition => {
                let (in_source, external) = self.closure.partition();
                writeln!(f, "# in source")?;
                for symbol in in_source {
                    writeln!(f, "{symbol}")?;
                }
                writeln!(f)?;
                writeln!(f, "# external")?;
                for symbol in external {
                    writeln!(f, "{symbol}")?;
                }
                Ok(())
            }
            ReportFormat::Plain => {
                for key in self.closure.sorted_keys() {
                    writeln!(f, "{key}")?;
                }
                Ok(())
            }
            #[cfg(feature = "json")]
            ReportFormat::Json => self.fmt_json(f),
        }
    }
}

impl Report<'_, '_> {
    #[cfg(feature = "json")]
    fn fmt_json(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[derive(serde::Serialize)]
        struct Entry<'a> {
            key: &'a str,
            in_source: bool,
            files: Vec<String>,
        }

        let corpus = self.reporter.corpus;
        let entries: Vec<Entry<'_>> = self
            .closure
            .sorted()
            .into_iter()
            .map(|symbol| Entry {
                key: symbol.key(),
                in_source: symbol.is_in_source(),
                files: symbol
                    .source_units()
                    .filter_map(|id| corpus.unit(id))
                    .map(|unit| unit.relative_path().display().to_string())
                    .collect(),
            })
            .collect();
        let json = serde_json::to_string_pretty(&entries).map_err(|_| fmt::Error)?;
        writeln!(f, "{json}")
    }
}
