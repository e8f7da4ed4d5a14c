//! Module references, built-in draw steps, and the sequential runner.

pub(crate) mod builtin;
pub(crate) mod module;
pub(crate) mod runner;
