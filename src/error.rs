//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: Issues with the bootstrap configuration file or CLI options
//! - IoError: File system operation failures
//!
//! Failures of the external commands themselves (git, make, cmake) are not
//! errors here: they are recorded as step outcomes in the report.

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested configuration file does not exist
    #[error("configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read configuration file
    #[error("failed to read configuration file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// The configuration declares no dependency
    #[error("no dependencies declared")]
    NoDependencies,

    /// A dependency field is empty
    #[error("dependency '{name}' has an empty {field}")]
    EmptyField { name: String, field: &'static str },

    /// Two dependencies share a name
    #[error("duplicate dependency name '{name}'")]
    DuplicateDependency { name: String },

    /// The native build refers to a dependency that is not declared
    #[error("native build refers to undeclared dependency '{name}'")]
    UnknownNativeDependency { name: String },

    /// Invalid platform name
    #[error("invalid platform '{value}': expected 'linux', 'macos', or 'windows'")]
    InvalidPlatform { value: String },

    /// Build type is empty
    #[error("build type must not be empty")]
    EmptyBuildType,

    /// A value used as a directory name is not a single plain path component
    #[error("{field} '{value}' must be a single directory name")]
    NotADirectoryName { field: &'static str, value: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Generic IO error
    #[error("IO error at {path}: {source}")]
    Generic {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new NotADirectoryName error
    pub fn not_a_directory_name(field: &'static str, value: impl Into<String>) -> Self {
        ConfigError::NotADirectoryName {
            field,
            value: value.into(),
        }
    }

    /// Creates a new EmptyField error
    pub fn empty_field(name: impl Into<String>, field: &'static str) -> Self {
        ConfigError::EmptyField {
            name: name.into(),
            field,
        }
    }
}

impl IoError {
    /// Creates a new DirectoryNotFound error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        IoError::DirectoryNotFound { path: path.into() }
    }

    /// Creates a new Generic IO error
    pub fn generic(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Generic {
            path: path.into(),
            source,
        }
    }
}
