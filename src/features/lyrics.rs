//! Lyrics module - parsing and sync
//!
//! - `parser`: LRC subtitle ingestion and timeline building
//! - `engine`: active-line tracking, highlight animation and auto-scroll

pub mod engine;
pub mod parser;

// Re-export commonly used items
pub use engine::{EngineConfig, LyricSyncEngine, RenderSurface};
pub use parser::*;
