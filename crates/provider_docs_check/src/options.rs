//! Check configuration and the per-layout rule table.
//!
//! Callers build a [`CheckOptions`] once. For each classified bucket the orchestrator asks for a
//! [`BucketPlan`], a fully-resolved value combining the caller's options with the fixed rules for
//! that layout and kind. Caller options are never modified.

use serde::Deserialize;

use crate::layout::{Bucket, Layout, ResourceKind};
use crate::policy::{LEGACY_FILE_EXTENSIONS, REGISTRY_FILE_EXTENSIONS};
use crate::violation::Severity;

/// Front matter keys the validator knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrontMatterField {
    Description,
    Layout,
    PageTitle,
    SidebarCurrent,
    Subcategory,
}

impl FrontMatterField {
    /// Every field, in report order.
    pub const ALL: [FrontMatterField; 5] = [
        FrontMatterField::Description,
        FrontMatterField::Layout,
        FrontMatterField::PageTitle,
        FrontMatterField::SidebarCurrent,
        FrontMatterField::Subcategory,
    ];

    /// YAML key.
    pub fn key(self) -> &'static str {
        match self {
            FrontMatterField::Description => "description",
            FrontMatterField::Layout => "layout",
            FrontMatterField::PageTitle => "page_title",
            FrontMatterField::SidebarCurrent => "sidebar_current",
            FrontMatterField::Subcategory => "subcategory",
        }
    }
}

/// Presence policy for a single front matter field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldPolicy {
    #[default]
    Allowed,
    Required,
    Forbidden,
}

/// Front matter policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontMatterOptions {
    /// When non-empty, `subcategory` must be one of these values.
    pub allowed_subcategories: Vec<String>,
    pub description: FieldPolicy,
    pub layout: FieldPolicy,
    pub page_title: FieldPolicy,
    pub sidebar_current: FieldPolicy,
    pub subcategory: FieldPolicy,
}

impl FrontMatterOptions {
    /// Policy for `field`.
    pub fn policy(&self, field: FrontMatterField) -> FieldPolicy {
        match field {
            FrontMatterField::Description => self.description,
            FrontMatterField::Layout => self.layout,
            FrontMatterField::PageTitle => self.page_title,
            FrontMatterField::SidebarCurrent => self.sidebar_current,
            FrontMatterField::Subcategory => self.subcategory,
        }
    }

    /// Return a copy with `field` set to `policy`.
    pub fn with_policy(mut self, field: FrontMatterField, policy: FieldPolicy) -> Self {
        let slot = match field {
            FrontMatterField::Description => &mut self.description,
            FrontMatterField::Layout => &mut self.layout,
            FrontMatterField::PageTitle => &mut self.page_title,
            FrontMatterField::SidebarCurrent => &mut self.sidebar_current,
            FrontMatterField::Subcategory => &mut self.subcategory,
        };
        *slot = policy;
        self
    }

    /// Return a copy that requires `field`.
    pub fn require(self, field: FrontMatterField) -> Self {
        self.with_policy(field, FieldPolicy::Required)
    }

    /// Return a copy that forbids `field`.
    pub fn forbid(self, field: FrontMatterField) -> Self {
        self.with_policy(field, FieldPolicy::Forbidden)
    }

    /// Return a copy restricted to the given subcategories.
    pub fn with_allowed_subcategories<I, S>(mut self, subcategories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_subcategories = subcategories.into_iter().map(Into::into).collect();
        self
    }

    /// Overlay the fixed rules for a bucket. Rule entries win over caller policy.
    fn overlay(&self, rules: &Rules) -> Self {
        let mut resolved = self.clone();
        for field in rules.required {
            resolved = resolved.require(*field);
        }
        for field in rules.forbidden {
            resolved = resolved.forbid(*field);
        }
        resolved
    }
}

/// How many configuration-language examples a document must contain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExamplePolicy {
    #[default]
    None,
    AtLeastOne,
    Exactly(usize),
}

/// Content policy for resource-like documents.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentOptions {
    /// Extra tags accepted for configuration-language blocks besides the expected language.
    pub language_aliases: Vec<String>,
    /// Flag fenced blocks that carry no language tag at all.
    pub require_code_block_language: bool,
    pub example_policy: ExamplePolicy,
    /// Subcategories whose documents are exempt from `example_policy`.
    pub example_exempt_subcategories: Vec<String>,
    /// Severity of `<provider>_` naming deviations in examples.
    pub naming_severity: Severity,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            language_aliases: Vec::new(),
            require_code_block_language: false,
            example_policy: ExamplePolicy::None,
            example_exempt_subcategories: Vec::new(),
            naming_severity: Severity::Warning,
        }
    }
}

/// Tolerances for the file mismatch check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MismatchOptions {
    /// Documentation files (by name) that need no declared identifier.
    pub ignore_file_mismatch: Vec<String>,
    /// Declared identifiers that need no documentation file.
    pub ignore_file_missing: Vec<String>,
}

/// Options for one resource kind. Shared by the legacy and registry layouts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KindOptions {
    pub front_matter: FrontMatterOptions,
    pub contents: ContentOptions,
    pub mismatch: MismatchOptions,
}

/// Caller configuration for a whole run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckOptions {
    /// Provider short name, e.g. `aws`. Empty disables prefixing and naming checks.
    pub provider_name: String,
    /// Tolerate missing CDKTF documentation; orphaned CDKTF files are still reported.
    pub ignore_cdktf_missing_files: bool,
    pub data_source: KindOptions,
    pub ephemeral: KindOptions,
    pub function: KindOptions,
    pub resource: KindOptions,
    pub guide: KindOptions,
    pub index: KindOptions,
}

impl CheckOptions {
    /// Options for one kind.
    pub fn kind(&self, kind: ResourceKind) -> &KindOptions {
        match kind {
            ResourceKind::DataSource => &self.data_source,
            ResourceKind::Ephemeral => &self.ephemeral,
            ResourceKind::Function => &self.function,
            ResourceKind::Resource => &self.resource,
            ResourceKind::Guide => &self.guide,
            ResourceKind::Index => &self.index,
        }
    }

    /// Mutable options for one kind.
    pub fn kind_mut(&mut self, kind: ResourceKind) -> &mut KindOptions {
        match kind {
            ResourceKind::DataSource => &mut self.data_source,
            ResourceKind::Ephemeral => &mut self.ephemeral,
            ResourceKind::Function => &mut self.function,
            ResourceKind::Resource => &mut self.resource,
            ResourceKind::Guide => &mut self.guide,
            ResourceKind::Index => &mut self.index,
        }
    }

    /// Resolve everything the orchestrator needs to check one bucket.
    pub fn plan(&self, bucket: Bucket) -> BucketPlan {
        let rules = Rules::lookup(bucket.convention.layout, bucket.kind);
        let kind_options = self.kind(bucket.kind);
        let cdktf = bucket.convention.cdktf;

        let contents = (rules.contents && cdktf.is_none()).then(|| ContentPlan {
            example_language: EXAMPLE_LANGUAGE_TERRAFORM.to_string(),
            options: kind_options.contents.clone(),
        });
        let mismatch = rules.mismatch.then(|| MismatchPlan {
            options: kind_options.mismatch.clone(),
            ignore_missing: cdktf.is_some() && self.ignore_cdktf_missing_files,
        });

        BucketPlan {
            bucket,
            provider_name: self.provider_name.clone(),
            extensions: rules.extensions,
            front_matter: kind_options.front_matter.overlay(rules),
            contents,
            mismatch,
        }
    }
}

/// Canonical code block tag for provider configuration examples.
pub const EXAMPLE_LANGUAGE_TERRAFORM: &str = "terraform";

/// Fixed policy for one layout and kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    pub layout: Layout,
    pub kinds: &'static [ResourceKind],
    pub extensions: &'static [&'static str],
    pub required: &'static [FrontMatterField],
    pub forbidden: &'static [FrontMatterField],
    pub mismatch: bool,
    pub contents: bool,
}

use FrontMatterField as F;
use ResourceKind as K;

const LEGACY_REQUIRED: &[FrontMatterField] = &[F::Description, F::Layout, F::PageTitle];
const LEGACY_FORBIDDEN: &[FrontMatterField] = &[F::SidebarCurrent];
const REGISTRY_FORBIDDEN: &[FrontMatterField] = &[F::Layout, F::SidebarCurrent];

/// Rules per layout and kind. Every (layout, kind) pair appears exactly once.
pub const RULE_TABLE: &[Rules] = &[
    Rules {
        layout: Layout::Legacy,
        kinds: &[K::DataSource, K::Ephemeral, K::Resource],
        extensions: LEGACY_FILE_EXTENSIONS,
        required: LEGACY_REQUIRED,
        forbidden: LEGACY_FORBIDDEN,
        mismatch: true,
        contents: true,
    },
    Rules {
        layout: Layout::Legacy,
        kinds: &[K::Function],
        extensions: LEGACY_FILE_EXTENSIONS,
        required: LEGACY_REQUIRED,
        forbidden: LEGACY_FORBIDDEN,
        mismatch: true,
        contents: false,
    },
    Rules {
        layout: Layout::Legacy,
        kinds: &[K::Guide, K::Index],
        extensions: LEGACY_FILE_EXTENSIONS,
        required: LEGACY_REQUIRED,
        forbidden: LEGACY_FORBIDDEN,
        mismatch: false,
        contents: false,
    },
    Rules {
        layout: Layout::Registry,
        kinds: &[K::DataSource, K::Ephemeral, K::Resource],
        extensions: REGISTRY_FILE_EXTENSIONS,
        required: &[],
        forbidden: REGISTRY_FORBIDDEN,
        mismatch: true,
        contents: true,
    },
    Rules {
        layout: Layout::Registry,
        kinds: &[K::Function],
        extensions: REGISTRY_FILE_EXTENSIONS,
        required: &[],
        forbidden: REGISTRY_FORBIDDEN,
        mismatch: true,
        contents: false,
    },
    Rules {
        layout: Layout::Registry,
        kinds: &[K::Guide],
        extensions: REGISTRY_FILE_EXTENSIONS,
        required: &[F::PageTitle],
        forbidden: REGISTRY_FORBIDDEN,
        mismatch: false,
        contents: false,
    },
    Rules {
        layout: Layout::Registry,
        kinds: &[K::Index],
        extensions: REGISTRY_FILE_EXTENSIONS,
        required: &[],
        forbidden: &[F::Layout, F::SidebarCurrent, F::Subcategory],
        mismatch: false,
        contents: false,
    },
];

impl Rules {
    /// Rules for a layout and kind.
    pub fn lookup(layout: Layout, kind: ResourceKind) -> &'static Rules {
        RULE_TABLE
            .iter()
            .find(|rules| rules.layout == layout && rules.kinds.contains(&kind))
            .unwrap_or(&FALLBACK_RULES)
    }

    /// Extension used when naming an expected but missing file.
    pub fn default_extension(&self) -> &'static str {
        match self.layout {
            Layout::Legacy => ".html.markdown",
            Layout::Registry => ".md",
        }
    }
}

// Unreachable while RULE_TABLE covers every pair; the table test below enforces that.
static FALLBACK_RULES: Rules = Rules {
    layout: Layout::Registry,
    kinds: &[],
    extensions: REGISTRY_FILE_EXTENSIONS,
    required: &[],
    forbidden: &[],
    mismatch: false,
    contents: false,
};

/// Fully-resolved configuration for one bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketPlan {
    pub bucket: Bucket,
    pub provider_name: String,
    pub extensions: &'static [&'static str],
    pub front_matter: FrontMatterOptions,
    /// `None` when content checks do not apply (CDKTF output, guides, functions, index).
    pub contents: Option<ContentPlan>,
    /// `None` when the kind has no declared identifiers.
    pub mismatch: Option<MismatchPlan>,
}

impl BucketPlan {
    /// Extension used when naming a missing file in this bucket.
    pub fn default_extension(&self) -> &'static str {
        Rules::lookup(self.bucket.convention.layout, self.bucket.kind).default_extension()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentPlan {
    pub example_language: String,
    pub options: ContentOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MismatchPlan {
    pub options: MismatchOptions,
    pub ignore_missing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CdktfLanguage;
    use pretty_assertions::assert_eq;

    #[test]
    fn rule_table_covers_every_layout_and_kind_once() {
        for layout in [Layout::Legacy, Layout::Registry] {
            for kind in ResourceKind::ALL {
                let matches = RULE_TABLE
                    .iter()
                    .filter(|rules| rules.layout == layout && rules.kinds.contains(&kind))
                    .count();
                assert_eq!(matches, 1, "{layout} {kind}");
            }
        }
    }

    #[test]
    fn registry_index_forbids_subcategory() {
        let plan = CheckOptions::default().plan(Bucket::new(
            Layout::Registry,
            None,
            ResourceKind::Index,
        ));
        assert_eq!(plan.front_matter.subcategory, FieldPolicy::Forbidden);
        assert_eq!(plan.front_matter.layout, FieldPolicy::Forbidden);
        assert!(plan.contents.is_none());
        assert!(plan.mismatch.is_none());
    }

    #[test]
    fn rules_override_caller_policy_without_touching_caller_options() {
        let mut options = CheckOptions::default();
        options.resource.front_matter = FrontMatterOptions::default()
            .require(FrontMatterField::Layout)
            .require(FrontMatterField::Subcategory);
        let before = options.clone();

        let plan = options.plan(Bucket::new(Layout::Registry, None, ResourceKind::Resource));
        assert_eq!(plan.front_matter.layout, FieldPolicy::Forbidden);
        assert_eq!(plan.front_matter.subcategory, FieldPolicy::Required);
        assert_eq!(options, before);
    }

    #[test]
    fn legacy_resources_require_core_fields() {
        let plan =
            CheckOptions::default().plan(Bucket::new(Layout::Legacy, None, ResourceKind::Resource));
        for field in [
            FrontMatterField::Description,
            FrontMatterField::Layout,
            FrontMatterField::PageTitle,
        ] {
            assert_eq!(plan.front_matter.policy(field), FieldPolicy::Required);
        }
        assert_eq!(plan.extensions, LEGACY_FILE_EXTENSIONS);
        assert_eq!(plan.default_extension(), ".html.markdown");
        let contents = plan.contents.expect("contents apply to legacy resources");
        assert_eq!(contents.example_language, EXAMPLE_LANGUAGE_TERRAFORM);
    }

    #[test]
    fn cdktf_buckets_skip_contents_and_honor_ignore_missing() {
        let options = CheckOptions {
            ignore_cdktf_missing_files: true,
            ..CheckOptions::default()
        };
        let plan = options.plan(Bucket::new(
            Layout::Registry,
            Some(CdktfLanguage::Python),
            ResourceKind::Resource,
        ));
        assert!(plan.contents.is_none());
        assert!(plan.mismatch.expect("mismatch").ignore_missing);

        let plain = options.plan(Bucket::new(Layout::Registry, None, ResourceKind::Resource));
        assert!(!plain.mismatch.expect("mismatch").ignore_missing);
    }

    #[test]
    fn options_deserialize_from_partial_document() {
        let options: CheckOptions = serde_yaml::from_str(
            "provider_name: aws\nresource:\n  front_matter:\n    subcategory: required\n  contents:\n    example_policy: at-least-one\n    naming_severity: error\n",
        )
        .expect("parse options");
        assert_eq!(options.provider_name, "aws");
        assert_eq!(options.resource.front_matter.subcategory, FieldPolicy::Required);
        assert_eq!(options.resource.contents.example_policy, ExamplePolicy::AtLeastOne);
        assert_eq!(options.resource.contents.naming_severity, Severity::Error);
        assert_eq!(options.guide, KindOptions::default());
    }
}
