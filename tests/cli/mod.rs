//! Tests of the `typeslice` binary's command surface.

mod tests_cli;
