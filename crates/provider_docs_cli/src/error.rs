//! Structured CLI error types.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use provider_docs_check::StructuralError;

/// Coarse error categories for the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CliErrorCategory {
    /// Invalid or unreadable configuration.
    Config,
    /// Filesystem failure outside of per-file checks.
    Io,
    /// Unreadable or ambiguous provider schema input.
    Schema,
    /// Documentation tree that cannot be classified.
    Structure,
    /// The run completed and found error-severity violations.
    Validation,
}

/// CLI error with optional target path and remediation hint.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CliError {
    /// High-level error category.
    pub category: CliErrorCategory,
    /// Human-readable message.
    pub message: String,
    /// Optional path target.
    pub target: Option<String>,
    /// Optional remediation hint.
    pub hint: Option<String>,
}

/// Convenience result type for the CLI.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an error with the given category and message.
    pub fn new(category: CliErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            target: None,
            hint: None,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(CliErrorCategory::Config, message)
    }

    /// Create an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(CliErrorCategory::Io, message)
    }

    /// Create a provider schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::new(CliErrorCategory::Schema, message)
    }

    /// Create a documentation structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::new(CliErrorCategory::Structure, message)
    }

    /// Create a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(CliErrorCategory::Validation, message)
    }

    /// Attach a target path.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.target = Some(path.display().to_string());
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(target) = &self.target {
            write!(f, " [target: {target}]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " [hint: {hint}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        CliError::io(value.to_string())
    }
}

impl From<StructuralError> for CliError {
    fn from(value: StructuralError) -> Self {
        let hint = match value {
            StructuralError::MixedConventions { .. } => {
                "move every page under either website/docs or docs"
            }
            StructuralError::InvalidCdktfLanguage { .. } | StructuralError::InvalidDirectory { .. } => {
                "documentation directories must follow the registry or legacy website layout"
            }
        };
        CliError::structure(value.to_string()).with_hint(hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_appends_target_and_hint() {
        let err = CliError::config("failed to parse config")
            .with_path(Path::new("/tmp/.provider-docs.toml"))
            .with_hint("check the [check] table");
        assert_eq!(
            err.to_string(),
            "failed to parse config [target: /tmp/.provider-docs.toml] [hint: check the [check] table]"
        );
    }

    #[test]
    fn structural_errors_map_to_structure_category() {
        let err = CliError::from(StructuralError::InvalidDirectory {
            directory: "docs/unknown".into(),
        });
        assert_eq!(err.category, CliErrorCategory::Structure);
        assert!(err.message.contains("docs/unknown"));
        assert!(err.hint.is_some());
    }
}
