// Public modules
pub mod case;
pub mod console;
pub mod engine;
pub mod error;
pub mod line;
pub mod patch;
pub mod query;
pub mod settings;
pub mod stats;
pub mod walker;

// Re-export common types for convenience
pub use case::CaseStyle;
pub use console::{Console, Verbosity};
pub use engine::DirectoryPatcher;
pub use error::{Error, Result};
pub use line::Match;
pub use patch::{FilePatch, LineEdit};
pub use query::Query;
pub use settings::Settings;
pub use stats::{FileChange, RunSummary};
