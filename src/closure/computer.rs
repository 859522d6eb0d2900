//! The worklist algorithm behind a closure run.
//!
//! Each source unit moves through `Unseen → Queued → Processing → Done`.
//! Only `Unseen` units are ever queued, so every unit's references are
//! extracted at most once per run, no matter how many symbols point at it.

use std::collections::VecDeque;

use super::extract::extract;
use super::table::Closure;
use crate::base::UnitId;
use crate::error::{Error, Result};
use crate::hir::{SemanticOracle, Symbol, SymbolKind, normalize, type_decl_key};
use crate::parser::{AstNode, TypeDecl};
use crate::project::{Corpus, SourceUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitState {
    Unseen,
    Queued,
    Processing,
    Done,
}

/// Computes dependency closures over a corpus with an injected oracle.
pub struct ClosureComputer<'a, O: SemanticOracle> {
    corpus: &'a Corpus,
    oracle: &'a O,
    max_units: Option<usize>,
}

impl<'a, O: SemanticOracle> ClosureComputer<'a, O> {
    pub fn new(corpus: &'a Corpus, oracle: &'a O) -> Self {
        Self {
            corpus,
            oracle,
            max_units: None,
        }
    }

    /// Fail with [`Error::UnitLimitExceeded`] once more than `limit` units
    /// would be queued.
    pub fn with_max_units(mut self, limit: Option<usize>) -> Self {
        self.max_units = limit;
        self
    }

    /// Transitive closure of the in-source types named `entry`.
    ///
    /// An entry that matches nothing yields an empty closure.
    pub fn compute_from_name(&self, entry: &str) -> Result<Closure> {
        let mut run = Run::new(self);
        let seeds = self.oracle.find_by_name(entry);
        tracing::debug!(entry, seeds = seeds.len(), "seeding closure");

        for seed in seeds {
            run.add(seed)?;
        }
        while let Some(unit) = run.worklist.pop_front() {
            run.process(unit, true)?;
        }

        tracing::debug!(
            entry,
            symbols = run.closure.len(),
            units = run.closure.visited_units().len(),
            "closure complete"
        );
        Ok(run.closure)
    }

    /// The types declared in `unit` plus every type it references,
    /// without following references into other units.
    pub fn compute_from_unit(&self, unit: &SourceUnit) -> Result<Closure> {
        let mut run = Run::new(self);
        let declared: Vec<String> = unit
            .source_file()
            .map(|file| file.descendants::<TypeDecl>().filter_map(|d| type_decl_key(&d)).collect())
            .unwrap_or_default();
        tracing::debug!(
            unit = %unit.path().display(),
            declared = declared.len(),
            "seeding closure from unit"
        );

        for key in &declared {
            for symbol in self.oracle.find_by_name(key) {
                if symbol.key() == key.as_str() {
                    run.closure.record(symbol);
                }
            }
        }
        run.enqueue(unit.id())?;
        while let Some(id) = run.worklist.pop_front() {
            run.process(id, false)?;
        }
        Ok(run.closure)
    }
}

/// Mutable state of one run.
struct Run<'r, 'a, O: SemanticOracle> {
    computer: &'r ClosureComputer<'a, O>,
    states: Vec<UnitState>,
    worklist: VecDeque<UnitId>,
    queued: usize,
    closure: Closure,
}

impl<'r, 'a, O: SemanticOracle> Run<'r, 'a, O> {
    fn new(computer: &'r ClosureComputer<'a, O>) -> Self {
        Self {
            computer,
            states: vec![UnitState::Unseen; computer.corpus.len()],
            worklist: VecDeque::new(),
            queued: 0,
            closure: Closure::default(),
        }
    }

    /// Record a symbol; when new, queue its unseen declaring units.
    fn add(&mut self, symbol: Symbol) -> Result<()> {
        let units: Vec<UnitId> = symbol.source_units().collect();
        if !self.closure.record(symbol) {
            return Ok(());
        }
        for unit in units {
            self.enqueue(unit)?;
        }
        Ok(())
    }

    fn enqueue(&mut self, unit: UnitId) -> Result<()> {
        let Some(state) = self.states.get_mut(unit.index()) else {
            tracing::trace!(%unit, "declaration outside the corpus");
            return Ok(());
        };
        if *state != UnitState::Unseen {
            return Ok(());
        }
        if let Some(limit) = self.computer.max_units {
            if self.queued >= limit {
                return Err(Error::UnitLimitExceeded { limit });
            }
        }
        *state = UnitState::Queued;
        self.queued += 1;
        self.worklist.push_back(unit);
        Ok(())
    }

    /// Extract and resolve every reference of `unit`. With `expand` unset
    /// new symbols are recorded but their units are not queued.
    fn process(&mut self, unit: UnitId, expand: bool) -> Result<()> {
        self.states[unit.index()] = UnitState::Processing;
        self.closure.mark_visited(unit);

        let Some(source) = self.computer.corpus.unit(unit) else {
            return Ok(());
        };
        tracing::trace!(unit = %source.path().display(), "extracting references");

        for name_ref in extract(source) {
            let Some(symbol) = self.computer.oracle.resolve(&name_ref) else {
                continue;
            };
            if symbol.kind() != SymbolKind::NamedType {
                continue;
            }
            let symbol = normalize(symbol);
            tracing::trace!(key = symbol.key(), "resolved reference");
            if expand {
                self.add(symbol)?;
            } else {
                self.closure.record(symbol);
            }
        }

        self.states[unit.index()] = UnitState::Done;
        Ok(())
    }
}
