//! Corpus loading: file discovery, reading and parsing.

mod corpus;
mod corpus_loader;
pub mod file_loader;

pub use corpus::{Corpus, SourceUnit};
pub use corpus_loader::CorpusLoader;

#[cfg(test)]
mod tests;
