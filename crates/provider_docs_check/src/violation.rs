//! Violations and the aggregate report.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The rule a violation was raised by.
///
/// Variant order is the tie-break used when sorting violations for the same path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    FileRead,
    InvalidExtension,
    SizeExceeded,
    MissingDocumentation,
    OrphanDocumentation,
    MalformedMetadata,
    MissingRequiredField,
    ForbiddenFieldPresent,
    DisallowedSubcategory,
    InvalidCodeBlockLanguage,
    MissingExample,
    ExampleCountMismatch,
    NamingConventionMismatch,
}

impl CheckKind {
    /// Check description printed between the path and the detail.
    pub fn description(self) -> &'static str {
        match self {
            CheckKind::FileRead => "error reading file",
            CheckKind::InvalidExtension => "error checking file extension",
            CheckKind::SizeExceeded => "error checking file size",
            CheckKind::MissingDocumentation | CheckKind::OrphanDocumentation => {
                "error checking file mismatch"
            }
            CheckKind::MalformedMetadata
            | CheckKind::MissingRequiredField
            | CheckKind::ForbiddenFieldPresent
            | CheckKind::DisallowedSubcategory => "error checking file frontmatter",
            CheckKind::InvalidCodeBlockLanguage
            | CheckKind::MissingExample
            | CheckKind::ExampleCountMismatch
            | CheckKind::NamingConventionMismatch => "error checking file contents",
        }
    }

    /// Stable identifier, used as a key in machine-readable output.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckKind::FileRead => "file-read",
            CheckKind::InvalidExtension => "invalid-extension",
            CheckKind::SizeExceeded => "size-exceeded",
            CheckKind::MissingDocumentation => "missing-documentation",
            CheckKind::OrphanDocumentation => "orphan-documentation",
            CheckKind::MalformedMetadata => "malformed-metadata",
            CheckKind::MissingRequiredField => "missing-required-field",
            CheckKind::ForbiddenFieldPresent => "forbidden-field-present",
            CheckKind::DisallowedSubcategory => "disallowed-subcategory",
            CheckKind::InvalidCodeBlockLanguage => "invalid-code-block-language",
            CheckKind::MissingExample => "missing-example",
            CheckKind::ExampleCountMismatch => "example-count-mismatch",
            CheckKind::NamingConventionMismatch => "naming-convention-mismatch",
        }
    }
}

/// Whether a violation fails the run.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Reported, does not fail the run.
    Warning,
    /// Fails the run.
    #[default]
    Error,
}

/// One rule violation for one path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Relative POSIX path of the file, or of the expected file for missing documentation.
    pub path: String,
    /// Rule that raised the violation.
    pub check: CheckKind,
    /// Whether the violation fails the run.
    pub severity: Severity,
    /// Detail printed after the check description.
    pub message: String,
}

impl Violation {
    /// Create an error-severity violation.
    pub fn new(path: impl Into<String>, check: CheckKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            check,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Override the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether the violation fails the run.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    fn sort_key(&self) -> (&str, CheckKind, &str, Severity) {
        (&self.path, self.check, &self.message, self.severity)
    }
}

impl Ord for Violation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Violation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.path,
            self.check.description(),
            self.message
        )
    }
}

/// Aggregate result of one run.
///
/// Violations are sorted once, on construction. The `Display` form lists error-severity
/// violations one per line and is empty when the run succeeded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    files_checked: usize,
    violations: Vec<Violation>,
}

impl Report {
    /// Build a report, sorting the violations.
    pub fn new(files_checked: usize, mut violations: Vec<Violation>) -> Self {
        violations.sort();
        Self {
            files_checked,
            violations,
        }
    }

    /// Number of files that went through per-file checks.
    pub fn files_checked(&self) -> usize {
        self.files_checked
    }

    /// Every violation, warnings included.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Error-severity violations, in report order.
    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    /// Warning-severity violations, in report order.
    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| !v.is_error())
    }

    /// Number of error-severity violations.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// True when no error-severity violation was found.
    pub fn is_success(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Error-severity violation counts per check kind.
    pub fn counts_by_check(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for violation in self.errors() {
            *counts.entry(violation.check.as_str()).or_default() += 1;
        }
        counts
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (idx, violation) in self.errors().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}
