// Benchmarking against investor templates.
// Pure keyword logic; no LLM calls happen in this module.

pub mod checker;
pub mod handlers;
pub mod keywords;
pub mod registry;
