//! Feature modules
//!
//! - `lyrics`: synced lyrics parsing and the highlight/scroll sync engine
//! - `settings`: persisted user preferences

pub mod lyrics;
pub mod settings;

pub use settings::{Settings, SettingsError, SyncSettings};
