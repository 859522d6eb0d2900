//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod corpus_helpers;
pub mod closure_assertions;
pub mod source_fixtures;
