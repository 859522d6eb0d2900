//! The parsed corpus: every source unit of one analysis run.

use std::path::{Component, Path, PathBuf};

use crate::base::{LineIndex, UnitId};
use crate::error::{Error, ParseDiagnostic, Result};
use crate::parser::{AstNode, Parse, SourceFile, parse};

/// One parsed source file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    id: UnitId,
    path: PathBuf,
    /// `path` relative to the corpus root.
    relative: PathBuf,
    parse: Parse,
    line_index: LineIndex,
}

impl SourceUnit {
    /// Parse `text` into a unit. The id is assigned when the corpus is built.
    pub fn parse(root: &Path, path: PathBuf, text: &str) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        Self {
            id: UnitId(0),
            relative,
            parse: parse(text),
            line_index: LineIndex::new(text),
            path,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn relative_path(&self) -> &Path {
        &self.relative
    }

    pub fn parse_result(&self) -> &Parse {
        &self.parse
    }

    pub fn has_errors(&self) -> bool {
        !self.parse.ok()
    }

    /// The typed root of the syntax tree.
    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.parse.syntax())
    }

    /// Syntax errors with line/column positions.
    pub fn diagnostics(&self) -> Vec<ParseDiagnostic> {
        self.parse
            .errors
            .iter()
            .map(|err| ParseDiagnostic {
                position: self.line_index.position(err.range.start()),
                message: err.message.clone(),
            })
            .collect()
    }
}

/// All source units of a run, ordered by path. Unit ids are indices into
/// that order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    root: PathBuf,
    units: Vec<SourceUnit>,
}

impl Corpus {
    /// Build a corpus, sorting the units by path and assigning their ids.
    pub fn new(root: impl Into<PathBuf>, mut units: Vec<SourceUnit>) -> Self {
        units.sort_by(|a, b| a.path.cmp(&b.path));
        for (idx, unit) in units.iter_mut().enumerate() {
            unit.id = UnitId::new(idx);
        }
        Self {
            root: root.into(),
            units,
        }
    }

    /// Parse in-memory sources; any syntax error is fatal.
    pub fn from_sources<P, S>(sources: impl IntoIterator<Item = (P, S)>) -> Result<Self>
    where
        P: Into<PathBuf>,
        S: AsRef<str>,
    {
        let root = PathBuf::new();
        let mut units = Vec::new();
        for (path, text) in sources {
            let unit = SourceUnit::parse(&root, path.into(), text.as_ref());
            if unit.has_errors() {
                return Err(Error::Parse {
                    errors: unit.diagnostics(),
                    path: unit.path,
                });
            }
            units.push(unit);
        }
        Ok(Self::new(root, units))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&SourceUnit> {
        self.units.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Typed roots of every unit, in unit order.
    pub fn files(&self) -> Vec<SourceFile> {
        self.units.iter().filter_map(SourceUnit::source_file).collect()
    }

    /// Select a unit by exact path, by path relative to the root, or by a
    /// path suffix that matches exactly one unit.
    pub fn find_unit(&self, selector: &str) -> Result<&SourceUnit> {
        let wanted: PathBuf = Path::new(selector)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();

        if let Some(unit) = self
            .units
            .iter()
            .find(|u| u.path == wanted || u.relative == wanted)
        {
            return Ok(unit);
        }

        let candidates: Vec<&SourceUnit> = if wanted.as_os_str().is_empty() {
            Vec::new()
        } else {
            self.units.iter().filter(|u| u.path.ends_with(&wanted)).collect()
        };
        match candidates.as_slice() {
            [unit] => Ok(unit),
            _ => Err(Error::UnitNotFound {
                selector: selector.to_string(),
                candidates: candidates.iter().map(|u| u.path.clone()).collect(),
            }),
        }
    }
}
