// Error handling framework for rucop
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RucopError>;

/// Main error type for rucop
#[derive(Debug, Error)]
pub enum RucopError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<ConfigError>),

    #[error("Process execution failed: {0}")]
    Process(#[from] Box<ProcessError>),

    #[error("CLI argument error: {0}")]
    Cli(#[from] Box<CliError>),

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors with detailed context
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid YAML syntax: {message}")]
    InvalidYaml {
        message: String,
        file_path: Option<PathBuf>,
    },

    #[error("Settings file not found: {path}")]
    NotFound {
        path: PathBuf,
        suggestion: Option<String>,
    },

    #[error("Custom command is not executable: {command}")]
    CommandNotExecutable {
        command: String,
        resolved_path: Option<PathBuf>,
    },

    #[error("RuboCop configuration file not found: {path}")]
    LintConfigNotFound { path: PathBuf },

    #[error("Invalid configuration value: {message}")]
    InvalidValue {
        message: String,
        field: String,
        value: String,
    },
}

/// Child process errors with detailed context
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Process spawn failed: {command}")]
    SpawnFailed { command: String, error: String },

    #[error("Process timeout after {duration:?}: {command}")]
    Timeout {
        command: String,
        duration: std::time::Duration,
    },

    #[error("RuboCop exited abnormally with code {exit_code:?}: {command}: {stderr}")]
    AbnormalExit {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Output capture failed: {message}")]
    OutputCaptureFailed { message: String, command: String },
}

/// CLI argument and command-line interface errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Conflicting arguments: {first} and {second}")]
    ConflictingArguments {
        first: String,
        second: String,
        suggestion: String,
    },

    #[error("No target to check: {context}")]
    MissingTarget { context: String },

    #[error("Invalid argument: {argument}")]
    InvalidArgument {
        argument: String,
        message: String,
        suggestion: Option<String>,
    },
}

/// Standard exit codes for the rucop binary
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const OFFENSES_FOUND: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
    pub const PROCESS_ERROR: i32 = 3;
    pub const TIMEOUT_ERROR: i32 = 4;
    pub const CLI_ERROR: i32 = 5;
    pub const IO_ERROR: i32 = 6;
}

impl RucopError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RucopError::Config(_) => exit_codes::CONFIG_ERROR,
            RucopError::Process(process_err) => match process_err.as_ref() {
                ProcessError::Timeout { .. } => exit_codes::TIMEOUT_ERROR,
                _ => exit_codes::PROCESS_ERROR,
            },
            RucopError::Cli(_) => exit_codes::CLI_ERROR,
            RucopError::Io(_) => exit_codes::IO_ERROR,
        }
    }
}

// Ergonomic conversions so `?` works without manual boxing
impl From<ConfigError> for RucopError {
    fn from(error: ConfigError) -> Self {
        RucopError::Config(Box::new(error))
    }
}

impl From<ProcessError> for RucopError {
    fn from(error: ProcessError) -> Self {
        RucopError::Process(Box::new(error))
    }
}

impl From<CliError> for RucopError {
    fn from(error: CliError) -> Self {
        RucopError::Cli(Box::new(error))
    }
}
