//! Error handling types for worker-runtime
//!
//! Strict operations (normalization, default-language lookup, persisting a
//! runtime) surface these errors. Best-effort detection never does.

use std::fmt;
use thiserror::Error;

use crate::runtime::WorkerRuntime;

/// Which alias table a lookup consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasKind {
    Runtime,
    Language,
}

impl fmt::Display for AliasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasKind::Runtime => f.write_str("Worker runtime"),
            AliasKind::Language => f.write_str("Language"),
        }
    }
}

/// Errors raised by the registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Blank or missing input
    #[error("{}", empty_input_message(.kind))]
    EmptyInput { kind: AliasKind },

    /// Input matched no alias in the consulted table
    #[error("{kind} '{value}' is not a valid option. Options are {options}")]
    UnrecognizedValue {
        kind: AliasKind,
        value: String,
        options: String,
    },

    /// Runtime has no default template language
    #[error("Worker runtime '{runtime}' is not a valid worker for a template.")]
    UnsupportedForTemplates { runtime: WorkerRuntime },

    /// Two entries of one alias table share an alias (compared case-insensitively)
    #[error("Duplicate alias '{alias}' in {kind} table")]
    DuplicateAlias { kind: AliasKind, alias: String },

    /// The settings store failed to persist a value
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

impl RegistryError {
    pub fn empty_input(kind: AliasKind) -> Self {
        RegistryError::EmptyInput { kind }
    }

    pub fn unrecognized(
        kind: AliasKind,
        value: impl Into<String>,
        options: impl Into<String>,
    ) -> Self {
        RegistryError::UnrecognizedValue {
            kind,
            value: value.into(),
            options: options.into(),
        }
    }

    pub fn unsupported_for_templates(runtime: WorkerRuntime) -> Self {
        RegistryError::UnsupportedForTemplates { runtime }
    }

    pub fn duplicate_alias(kind: AliasKind, alias: impl Into<String>) -> Self {
        RegistryError::DuplicateAlias {
            kind,
            alias: alias.into(),
        }
    }
}

fn empty_input_message(kind: &AliasKind) -> &'static str {
    match kind {
        AliasKind::Runtime => "Worker runtime cannot be null or empty.",
        AliasKind::Language => "language can't be empty",
    }
}

/// Errors raised by settings-store implementations
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values in the file are encrypted; a plaintext write would corrupt them
    #[error("Settings file '{path}' is encrypted; refusing to write a plaintext value")]
    Encrypted { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message_names_the_table() {
        assert_eq!(
            RegistryError::empty_input(AliasKind::Runtime).to_string(),
            "Worker runtime cannot be null or empty."
        );
        assert_eq!(
            RegistryError::empty_input(AliasKind::Language).to_string(),
            "language can't be empty"
        );
    }

    #[test]
    fn test_unrecognized_message_lists_options() {
        let err = RegistryError::unrecognized(AliasKind::Runtime, "rust", "node, python");
        assert_eq!(
            err.to_string(),
            "Worker runtime 'rust' is not a valid option. Options are node, python"
        );
    }

    #[test]
    fn test_unsupported_message_uses_enumeration_name() {
        let err = RegistryError::unsupported_for_templates(WorkerRuntime::Java);
        assert_eq!(
            err.to_string(),
            "Worker runtime 'java' is not a valid worker for a template."
        );
    }
}
