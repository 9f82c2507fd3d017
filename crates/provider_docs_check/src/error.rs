//! Run-aborting errors.
//!
//! Only a structurally invalid directory mapping stops a run. Everything found inside individual
//! files is reported as a [`Violation`](crate::violation::Violation) instead.

use thiserror::Error;

/// Failure to classify the documentation tree as a whole.
///
/// These are raised before any per-file check executes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// A directory key matches none of the known layout patterns.
    #[error("invalid Terraform Provider documentation directory found: {directory}")]
    InvalidDirectory {
        /// Offending directory key.
        directory: String,
    },
    /// A CDKTF directory names a language outside the supported set.
    #[error(
        "invalid CDKTF language `{language}` in documentation directory {directory}, expected one of: {expected}"
    )]
    InvalidCdktfLanguage {
        /// Offending directory key.
        directory: String,
        /// Language segment found in the path.
        language: String,
        /// Comma separated list of supported languages.
        expected: String,
    },
    /// Legacy and registry layouts were found in the same tree.
    #[error(
        "mixed Terraform Provider documentation directory layouts found ({legacy} and {registry}), must use only legacy or registry layout"
    )]
    MixedConventions {
        /// First legacy directory seen.
        legacy: String,
        /// First registry directory seen.
        registry: String,
    },
}
