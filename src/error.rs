//! Error types and exit codes for code-outline

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for code-outline operations
#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Cannot read project root {path}: {message}")]
    ProjectRoot { path: String, message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unsupported language for extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("Failed to parse {path}: {message}")]
    ParseFailure { path: String, message: String },

    #[error("Symbol extraction failed for {path}: {message}")]
    ExtractionFailure { path: String, message: String },

    #[error("Snapshot {path} is not a valid index: {message}")]
    InvalidSnapshot { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OutlineError {
    /// Convert error to the process exit code:
    /// - 0: Success
    /// - 1: Project root / file not found / IO error
    /// - 2: Unsupported language
    /// - 3: Parse failure
    /// - 4: Symbol extraction failure
    /// - 5: Existing snapshot is not valid
    /// - 6: Configuration error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::ProjectRoot { .. } => ExitCode::from(1),
            Self::FileNotFound { .. } => ExitCode::from(1),
            Self::UnsupportedLanguage { .. } => ExitCode::from(2),
            Self::ParseFailure { .. } => ExitCode::from(3),
            Self::ExtractionFailure { .. } => ExitCode::from(4),
            Self::InvalidSnapshot { .. } => ExitCode::from(5),
            Self::ConfigError { .. } => ExitCode::from(6),
            Self::Io(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for code-outline operations
pub type Result<T> = std::result::Result<T, OutlineError>;
