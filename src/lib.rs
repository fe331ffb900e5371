// rucop - Library module
// Core functionality for running RuboCop and parsing its diagnostics

pub mod annotations;
pub mod cli;
pub mod command;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filesystem;
pub mod logging;
pub mod process;
pub mod runner;
pub mod user_output;

// Re-export main types for easier access
pub use annotations::AnnotationStore;
pub use command::{shell_split, CommandBuilder, CommandInvocation};
pub use config::RunnerConfig;
pub use diagnostics::{parse_file_list, parse_line, parse_output, Diagnostic, FileAnnotations};
pub use error::{
    exit_codes, CliError, ConfigError, ProcessError, Result, RucopError,
};
pub use logging::{ColorConfig, LogConfig, LogFormat};
pub use process::{ProcessManager, ProcessResult};
pub use runner::RubocopRunner;
pub use user_output::{UserOutput, UserOutputConfig};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

// Build information (set by build script)
pub const BUILD_DATE: &str = env!("BUILD_DATE");
pub const GIT_COMMIT: &str = env!("GIT_COMMIT");
pub const RUST_VERSION: &str = env!("RUST_VERSION");

/// Get formatted version string with build information
pub fn version_info() -> String {
    format!("{NAME} {VERSION} (commit: {GIT_COMMIT}, built: {BUILD_DATE}, rustc: {RUST_VERSION})")
}
