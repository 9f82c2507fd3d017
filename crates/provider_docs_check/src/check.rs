//! Orchestrator: classify the mapping, then run every applicable check and aggregate.

use crate::contents::ContentCheck;
use crate::error::StructuralError;
use crate::frontmatter::check_front_matter;
use crate::identifiers::ProviderIdentifiers;
use crate::layout::{classify_mapping, ClassifiedDirectory, DirectoryMapping};
use crate::mismatch::FileMismatchCheck;
use crate::options::{BucketPlan, CheckOptions};
use crate::policy::{check_extension, check_size, is_ignored};
use crate::source::DocSource;
use crate::violation::{CheckKind, Report, Violation};

/// One validation run over a provider documentation tree.
pub struct Check<S> {
    options: CheckOptions,
    identifiers: ProviderIdentifiers,
    source: S,
}

impl<S: DocSource> Check<S> {
    /// Create a run over `source` with fixed options and identifiers.
    pub fn new(options: CheckOptions, identifiers: ProviderIdentifiers, source: S) -> Self {
        Self {
            options,
            identifiers,
            source,
        }
    }

    /// Options the run was built with.
    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Validate every directory in `directories`.
    ///
    /// A structurally invalid mapping fails before any file is touched. Otherwise every
    /// violation from every bucket and file is collected into the returned report.
    pub fn run(&self, directories: &DirectoryMapping) -> Result<Report, StructuralError> {
        let classified = classify_mapping(directories)?;

        let mut files_checked = 0usize;
        let mut violations = Vec::new();
        for entry in &classified {
            let plan = self.options.plan(entry.bucket);
            tracing::debug!(directory = entry.directory, bucket = %entry.bucket, "checking directory");
            violations.extend(self.check_mismatch(entry, &plan));
            for file in entry.files {
                if is_ignored(file) {
                    tracing::debug!(file = file.as_str(), "skipping ignored file");
                    continue;
                }
                files_checked += 1;
                let path = format!("{}/{file}", entry.directory.trim_end_matches('/'));
                violations.extend(self.check_file(&path, &plan));
            }
        }

        let report = Report::new(files_checked, violations);
        tracing::info!(
            files = report.files_checked(),
            errors = report.error_count(),
            warnings = report.warnings().count(),
            "documentation check finished"
        );
        Ok(report)
    }

    fn check_mismatch(&self, entry: &ClassifiedDirectory<'_>, plan: &BucketPlan) -> Vec<Violation> {
        let Some(mismatch) = &plan.mismatch else {
            return Vec::new();
        };
        let Some(declared) = self.identifiers.get(entry.bucket.kind) else {
            tracing::debug!(
                directory = entry.directory,
                kind = %entry.bucket.kind,
                "no declared identifiers, skipping file mismatch check"
            );
            return Vec::new();
        };
        FileMismatchCheck {
            directory: entry.directory.trim_end_matches('/'),
            kind: entry.bucket.kind,
            provider_name: &plan.provider_name,
            default_extension: plan.default_extension(),
            options: &mismatch.options,
            ignore_missing: mismatch.ignore_missing,
        }
        .run(entry.files, declared)
    }

    /// Per-file checks. A failed stat or read ends the file's checks; malformed metadata skips
    /// content checks.
    fn check_file(&self, path: &str, plan: &BucketPlan) -> Vec<Violation> {
        tracing::debug!(path, "checking file");
        let mut violations = Vec::new();
        violations.extend(check_extension(path, plan.extensions));

        let size = match self.source.size(path) {
            Ok(size) => size,
            Err(err) => {
                violations.push(Violation::new(path, CheckKind::FileRead, err.to_string()));
                return violations;
            }
        };
        violations.extend(check_size(path, size));

        let content = match self.source.read(path) {
            Ok(content) => content,
            Err(err) => {
                violations.push(Violation::new(path, CheckKind::FileRead, err.to_string()));
                return violations;
            }
        };

        let outcome = match check_front_matter(path, &content, &plan.front_matter) {
            Ok(outcome) => outcome,
            Err(violation) => {
                violations.push(violation);
                return violations;
            }
        };
        violations.extend(outcome.violations);

        if let Some(contents) = &plan.contents {
            // Front matter already proved the bytes are UTF-8.
            let text = String::from_utf8_lossy(&content);
            violations.extend(
                ContentCheck::new(&contents.options, &plan.provider_name).run(
                    path,
                    &text,
                    &contents.example_language,
                    &outcome.subcategory,
                ),
            );
        }

        violations
    }
}
