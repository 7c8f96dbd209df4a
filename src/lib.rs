/// Traitcloud - Character Trait Profiler (TUI Edition)
///
/// Core library providing versioned trait profiles, LLM-assisted
/// trait generation, and chat-style character analysis for fiction
/// writers.

pub mod config;
pub mod core;
pub mod tui;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
