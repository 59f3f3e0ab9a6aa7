//! Test harness for CLI and library integration tests.
//!
//! Provides isolated test environments, programmatic export archives,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod export;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::FolioCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use export::{TestEntry, TestExport};
