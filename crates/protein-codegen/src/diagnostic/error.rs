//! Generator error types.

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that abort a generation call before anything is written.
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{}': {message}", path.display())]
    #[diagnostic(code(protein::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Failed to parse configuration '{}': {message}", path.display())]
    #[diagnostic(
        code(protein::config::parse_failed),
        help("Configuration files are JSON documents; check the field names and value types.")
    )]
    ConfigParse {
        path: PathBuf,
        message: String,
    },

    #[error("No project is open and no custom output path was given")]
    #[diagnostic(
        code(protein::config::no_project_context),
        help("Pass a custom output path or run the generator inside a project directory.")
    )]
    NoProjectContext,

    #[error("Invalid module name '{name}'")]
    #[diagnostic(
        code(protein::config::invalid_module),
        help("A module name is a single directory name below the project root.")
    )]
    InvalidModuleName {
        name: String,
    },

    #[error("Invalid package name '{name}'")]
    #[diagnostic(
        code(protein::config::invalid_package),
        help("Packages are dot-separated identifiers, for example 'com.example.api'.")
    )]
    InvalidPackageName {
        name: String,
    },

    // =========================================================================
    // Descriptor Errors
    // =========================================================================
    #[error("Nothing to generate: the descriptor list is empty")]
    #[diagnostic(code(protein::descriptor::empty_batch))]
    EmptyBatch,

    #[error("Descriptor '{name}' is invalid: {reason}")]
    #[diagnostic(code(protein::descriptor::invalid))]
    InvalidDescriptor {
        name: String,
        reason: String,
    },

    // =========================================================================
    // Frontend Errors
    // =========================================================================
    #[error("Unsupported target language: {language}")]
    #[diagnostic(
        code(protein::codegen::unsupported_language),
        help("Supported languages: kotlin")
    )]
    UnsupportedLanguage {
        language: String,
    },
}

impl GeneratorError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid descriptor error.
    pub fn invalid_descriptor(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// A write failure for a single descriptor of a batch.
///
/// The remaining descriptors of the batch are still emitted.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("Failed to write '{descriptor_name}' to '{}': {message}", path.display())]
#[diagnostic(code(protein::emit::io_failure))]
pub struct IoFailure {
    pub descriptor_name: String,
    pub path: PathBuf,
    pub message: String,
}
