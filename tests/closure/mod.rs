//! End-to-end closure tests over on-disk corpora.

mod tests_catalogs;
mod tests_errors;
mod tests_properties;
mod tests_scenarios;
