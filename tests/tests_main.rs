#[path = "helpers/mod.rs"]
mod helpers;

#[path = "binding/mod.rs"]
mod binding;

#[path = "closure/mod.rs"]
mod closure;

#[cfg(all(feature = "cli", feature = "json"))]
#[path = "cli/mod.rs"]
mod cli;
