//! Cross-reference documentation files against declared identifiers.

use std::collections::{BTreeMap, BTreeSet};

use crate::layout::ResourceKind;
use crate::options::MismatchOptions;
use crate::policy::{is_ignored, trim_file_extension};
use crate::violation::{CheckKind, Violation};

/// File mismatch check for one bucket directory.
pub struct FileMismatchCheck<'a> {
    pub directory: &'a str,
    pub kind: ResourceKind,
    pub provider_name: &'a str,
    /// Extension used when naming a missing file.
    pub default_extension: &'a str,
    pub options: &'a MismatchOptions,
    /// Only orphaned files are reported when set.
    pub ignore_missing: bool,
}

impl FileMismatchCheck<'_> {
    /// Identifier a documentation file name stands for.
    pub fn implied_identifier(&self, file_name: &str) -> String {
        let stem = trim_file_extension(file_name);
        if stem == "index" && !self.provider_name.is_empty() {
            return self.provider_name.to_string();
        }
        if self.kind.uses_provider_prefix() && !self.provider_name.is_empty() {
            return format!("{}_{stem}", self.provider_name);
        }
        stem.to_string()
    }

    /// File stem expected for a declared identifier.
    pub fn expected_stem<'i>(&self, identifier: &'i str) -> &'i str {
        if self.provider_name.is_empty() {
            return identifier;
        }
        if identifier == self.provider_name {
            return "index";
        }
        if self.kind.uses_provider_prefix() {
            if let Some(stem) = identifier
                .strip_prefix(self.provider_name)
                .and_then(|rest| rest.strip_prefix('_'))
            {
                return stem;
            }
        }
        identifier
    }

    /// Compare `files` with `declared` in both directions.
    pub fn run(&self, files: &[String], declared: &BTreeSet<String>) -> Vec<Violation> {
        // Several files may imply one identifier, e.g. `x.md` and `x.html.markdown`.
        let mut documented: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        for file in files {
            if is_ignored(file) {
                continue;
            }
            documented
                .entry(self.implied_identifier(file))
                .or_default()
                .push(file.as_str());
        }

        let label = self.kind.label();
        let mut violations = Vec::new();

        for (identifier, files) in &documented {
            if declared.contains(identifier) {
                continue;
            }
            for file in files.iter().filter(|file| !self.ignores_orphan(file)) {
                violations.push(Violation::new(
                    format!("{}/{file}", self.directory),
                    CheckKind::OrphanDocumentation,
                    format!(
                        "found extraneous {label} documentation file, expected matching {label} ({identifier}) in provider"
                    ),
                ));
            }
        }

        if self.ignore_missing {
            tracing::debug!(directory = self.directory, "skipping missing documentation check");
            return violations;
        }

        for identifier in declared {
            if documented.contains_key(identifier)
                || self.options.ignore_file_missing.contains(identifier)
            {
                continue;
            }
            violations.push(Violation::new(
                format!(
                    "{}/{}{}",
                    self.directory,
                    self.expected_stem(identifier),
                    self.default_extension
                ),
                CheckKind::MissingDocumentation,
                format!("missing {label} documentation file for {identifier}"),
            ));
        }

        violations
    }

    fn ignores_orphan(&self, file: &str) -> bool {
        let stem = trim_file_extension(file);
        self.options
            .ignore_file_mismatch
            .iter()
            .any(|ignored| ignored == file || ignored == stem)
    }
}
