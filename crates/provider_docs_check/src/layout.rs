//! Directory grammar for provider documentation trees.
//!
//! Classification is purely syntactic: a directory key such as `docs/resources` or
//! `website/docs/cdktf/python/r` is split into path segments and matched against fixed directory
//! names. Nothing here touches the filesystem.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::StructuralError;

/// Directory containing legacy (website) documentation.
pub const LEGACY_INDEX_DIRECTORY: &str = "website/docs";
/// Directory containing registry documentation.
pub const REGISTRY_INDEX_DIRECTORY: &str = "docs";
/// Directory segment holding machine-converted CDKTF documentation.
pub const CDKTF_INDEX_DIRECTORY: &str = "cdktf";

/// Mapping from a directory key (POSIX separators, relative to the provider root) to the file
/// names found directly inside it.
///
/// `BTreeMap` keeps iteration order stable, so classification failures always name the same
/// directory for the same input.
pub type DirectoryMapping = BTreeMap<String, Vec<String>>;

/// Kind of documented provider object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    DataSource,
    Ephemeral,
    Function,
    Resource,
    Guide,
    Index,
}

impl ResourceKind {
    /// Every kind, in declaration order.
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::DataSource,
        ResourceKind::Ephemeral,
        ResourceKind::Function,
        ResourceKind::Resource,
        ResourceKind::Guide,
        ResourceKind::Index,
    ];

    /// Human-readable label used in violation messages.
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::DataSource => "data source",
            ResourceKind::Ephemeral => "ephemeral",
            ResourceKind::Function => "function",
            ResourceKind::Resource => "resource",
            ResourceKind::Guide => "guide",
            ResourceKind::Index => "index",
        }
    }

    /// Whether provider source declares identifiers of this kind.
    pub fn is_declared(self) -> bool {
        matches!(
            self,
            ResourceKind::DataSource
                | ResourceKind::Ephemeral
                | ResourceKind::Function
                | ResourceKind::Resource
        )
    }

    /// Whether declared identifiers carry the `<provider>_` type prefix.
    pub fn uses_provider_prefix(self) -> bool {
        matches!(
            self,
            ResourceKind::DataSource | ResourceKind::Ephemeral | ResourceKind::Resource
        )
    }

    /// Subdirectory name for this kind under the given layout. `None` for the index itself.
    pub fn directory(self, layout: Layout) -> Option<&'static str> {
        let name = match (layout, self) {
            (_, ResourceKind::Index) => return None,
            (Layout::Legacy, ResourceKind::DataSource) => "d",
            (Layout::Legacy, ResourceKind::Resource) => "r",
            (Layout::Registry, ResourceKind::DataSource) => "data-sources",
            (Layout::Registry, ResourceKind::Resource) => "resources",
            (_, ResourceKind::Ephemeral) => "ephemeral-resources",
            (_, ResourceKind::Function) => "functions",
            (_, ResourceKind::Guide) => "guides",
        };
        Some(name)
    }

    fn from_directory(layout: Layout, segment: &str) -> Option<Self> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.directory(layout) == Some(segment))
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Documentation hosting layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// `website/docs/...`
    Legacy,
    /// `docs/...`
    Registry,
}

impl Layout {
    /// Index directory for the layout.
    pub fn index_directory(self) -> &'static str {
        match self {
            Layout::Legacy => LEGACY_INDEX_DIRECTORY,
            Layout::Registry => REGISTRY_INDEX_DIRECTORY,
        }
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Legacy => f.write_str("legacy"),
            Layout::Registry => f.write_str("registry"),
        }
    }
}

/// Languages CDKTF documentation is converted into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CdktfLanguage {
    CSharp,
    Go,
    Java,
    Python,
    TypeScript,
}

impl CdktfLanguage {
    /// Every supported language.
    pub const ALL: [CdktfLanguage; 5] = [
        CdktfLanguage::CSharp,
        CdktfLanguage::Go,
        CdktfLanguage::Java,
        CdktfLanguage::Python,
        CdktfLanguage::TypeScript,
    ];

    /// Directory segment and code block tag for the language.
    pub fn as_str(self) -> &'static str {
        match self {
            CdktfLanguage::CSharp => "csharp",
            CdktfLanguage::Go => "go",
            CdktfLanguage::Java => "java",
            CdktfLanguage::Python => "python",
            CdktfLanguage::TypeScript => "typescript",
        }
    }

    /// Parse a directory segment.
    pub fn parse(segment: &str) -> Option<Self> {
        CdktfLanguage::ALL
            .into_iter()
            .find(|language| language.as_str() == segment)
    }

    fn expected_list() -> String {
        CdktfLanguage::ALL
            .iter()
            .map(|language| language.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for CdktfLanguage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout plus the optional CDKTF language a directory belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DocConvention {
    pub layout: Layout,
    pub cdktf: Option<CdktfLanguage>,
}

impl DocConvention {
    /// Create a convention for a layout and optional CDKTF language.
    pub fn new(layout: Layout, cdktf: Option<CdktfLanguage>) -> Self {
        Self { layout, cdktf }
    }

    /// CDKTF documentation is machine-converted.
    pub fn is_cdktf(self) -> bool {
        self.cdktf.is_some()
    }
}

/// Semantic category of a documentation directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Bucket {
    pub convention: DocConvention,
    pub kind: ResourceKind,
}

impl Bucket {
    /// Create a bucket from its parts.
    pub fn new(layout: Layout, cdktf: Option<CdktfLanguage>, kind: ResourceKind) -> Self {
        Self {
            convention: DocConvention::new(layout, cdktf),
            kind,
        }
    }

    /// The plain registry index (`docs`), which may sit next to a legacy tree.
    pub fn is_registry_root(self) -> bool {
        self.convention.layout == Layout::Registry
            && self.convention.cdktf.is_none()
            && self.kind == ResourceKind::Index
    }

    /// Canonical directory key for the bucket.
    pub fn directory(self) -> String {
        let mut path = self.convention.layout.index_directory().to_string();
        if let Some(language) = self.convention.cdktf {
            path.push('/');
            path.push_str(CDKTF_INDEX_DIRECTORY);
            path.push('/');
            path.push_str(language.as_str());
        }
        if let Some(segment) = self.kind.directory(self.convention.layout) {
            path.push('/');
            path.push_str(segment);
        }
        path
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.convention.layout, self.kind)?;
        if let Some(language) = self.convention.cdktf {
            write!(f, " (cdktf {language})")?;
        }
        Ok(())
    }
}

/// A directory key from the input mapping together with its classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedDirectory<'a> {
    pub directory: &'a str,
    pub bucket: Bucket,
    pub files: &'a [String],
}

/// Classify a single directory key.
pub fn classify_directory(directory: &str) -> Result<Bucket, StructuralError> {
    let normalized = normalize_directory(directory);
    let invalid = || StructuralError::InvalidDirectory {
        directory: directory.to_string(),
    };

    let (layout, rest) = if let Some(rest) = strip_index(&normalized, LEGACY_INDEX_DIRECTORY) {
        (Layout::Legacy, rest)
    } else if let Some(rest) = strip_index(&normalized, REGISTRY_INDEX_DIRECTORY) {
        (Layout::Registry, rest)
    } else {
        return Err(invalid());
    };

    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => Ok(Bucket::new(layout, None, ResourceKind::Index)),
        [first, rest @ ..] if *first == CDKTF_INDEX_DIRECTORY => {
            let Some(language_segment) = rest.first() else {
                return Err(invalid());
            };
            let Some(language) = CdktfLanguage::parse(language_segment) else {
                return Err(StructuralError::InvalidCdktfLanguage {
                    directory: directory.to_string(),
                    language: (*language_segment).to_string(),
                    expected: CdktfLanguage::expected_list(),
                });
            };
            match &rest[1..] {
                [] => Ok(Bucket::new(layout, Some(language), ResourceKind::Index)),
                [kind_segment] => ResourceKind::from_directory(layout, kind_segment)
                    .map(|kind| Bucket::new(layout, Some(language), kind))
                    .ok_or_else(invalid),
                _ => Err(invalid()),
            }
        }
        [kind_segment] => ResourceKind::from_directory(layout, kind_segment)
            .map(|kind| Bucket::new(layout, None, kind))
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Classify the directory a documentation file lives in.
pub fn classify_file_path(path: &str) -> Result<Bucket, StructuralError> {
    let normalized = normalize_directory(path);
    match normalized.rsplit_once('/') {
        Some((directory, _)) => classify_directory(directory),
        None => Err(StructuralError::InvalidDirectory {
            directory: path.to_string(),
        }),
    }
}

/// Validate the shape of a whole mapping.
///
/// Every key must classify, and legacy directories may not be mixed with registry directories.
/// The bare registry index is exempt from the mixing rule.
pub fn classify_mapping(
    directories: &DirectoryMapping,
) -> Result<Vec<ClassifiedDirectory<'_>>, StructuralError> {
    let mut classified = Vec::with_capacity(directories.len());
    for (directory, files) in directories {
        let bucket = classify_directory(directory)?;
        classified.push(ClassifiedDirectory {
            directory: directory.as_str(),
            bucket,
            files: files.as_slice(),
        });
    }

    let legacy = classified
        .iter()
        .find(|entry| entry.bucket.convention.layout == Layout::Legacy);
    let registry = classified.iter().find(|entry| {
        entry.bucket.convention.layout == Layout::Registry && !entry.bucket.is_registry_root()
    });
    if let (Some(legacy), Some(registry)) = (legacy, registry) {
        return Err(StructuralError::MixedConventions {
            legacy: legacy.directory.to_string(),
            registry: registry.directory.to_string(),
        });
    }

    Ok(classified)
}

fn normalize_directory(directory: &str) -> String {
    let replaced = directory.replace('\\', "/");
    let trimmed = replaced.trim_start_matches("./").trim_end_matches('/');
    trimmed.to_string()
}

fn strip_index<'a>(directory: &'a str, index: &str) -> Option<&'a str> {
    let rest = directory.strip_prefix(index)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mapping(keys: &[&str]) -> DirectoryMapping {
        keys.iter()
            .map(|key| (key.to_string(), vec!["index.md".to_string()]))
            .collect()
    }

    #[test]
    fn registry_directories_classify_by_kind() {
        assert_eq!(
            classify_directory("docs").expect("index"),
            Bucket::new(Layout::Registry, None, ResourceKind::Index)
        );
        assert_eq!(
            classify_directory("docs/resources").expect("resources"),
            Bucket::new(Layout::Registry, None, ResourceKind::Resource)
        );
        assert_eq!(
            classify_directory("docs/data-sources/").expect("data sources"),
            Bucket::new(Layout::Registry, None, ResourceKind::DataSource)
        );
        assert_eq!(
            classify_directory("docs/ephemeral-resources").expect("ephemerals"),
            Bucket::new(Layout::Registry, None, ResourceKind::Ephemeral)
        );
    }

    #[test]
    fn legacy_directories_use_short_kind_names() {
        assert_eq!(
            classify_directory("website/docs/r").expect("resources"),
            Bucket::new(Layout::Legacy, None, ResourceKind::Resource)
        );
        assert_eq!(
            classify_directory("website/docs/d").expect("data sources"),
            Bucket::new(Layout::Legacy, None, ResourceKind::DataSource)
        );
        assert!(classify_directory("website/docs/resources").is_err());
        assert!(classify_directory("docs/r").is_err());
    }

    #[test]
    fn cdktf_directories_carry_language() {
        assert_eq!(
            classify_directory("docs/cdktf/python/resources").expect("cdktf"),
            Bucket::new(
                Layout::Registry,
                Some(CdktfLanguage::Python),
                ResourceKind::Resource
            )
        );
        assert_eq!(
            classify_directory("website/docs/cdktf/typescript").expect("cdktf index"),
            Bucket::new(
                Layout::Legacy,
                Some(CdktfLanguage::TypeScript),
                ResourceKind::Index
            )
        );
    }

    #[test]
    fn unknown_cdktf_language_is_rejected() {
        let err = classify_directory("docs/cdktf/rust/resources").expect_err("rust");
        assert!(matches!(
            err,
            StructuralError::InvalidCdktfLanguage { ref language, .. } if language == "rust"
        ));
        assert!(err.to_string().contains("csharp, go, java, python, typescript"));
    }

    #[test]
    fn unknown_directories_are_rejected() {
        for directory in [
            "docs/unknown/foo",
            "docs/unknown",
            "website",
            "src/resources",
            "docs/cdktf",
            "docs/cdktf/python/resources/extra",
        ] {
            assert_eq!(
                classify_directory(directory),
                Err(StructuralError::InvalidDirectory {
                    directory: directory.to_string()
                }),
                "{directory}"
            );
        }
    }

    #[test]
    fn file_paths_classify_by_parent_directory() {
        assert_eq!(
            classify_file_path("website/docs/r/instance.html.markdown").expect("legacy"),
            Bucket::new(Layout::Legacy, None, ResourceKind::Resource)
        );
        assert_eq!(
            classify_file_path("docs/resources/instance.md").expect("registry"),
            Bucket::new(Layout::Registry, None, ResourceKind::Resource)
        );
        assert!(classify_file_path("instance.md").is_err());
    }

    #[test]
    fn bucket_directory_round_trips_through_classifier() {
        for layout in [Layout::Legacy, Layout::Registry] {
            for kind in ResourceKind::ALL {
                let bucket = Bucket::new(layout, Some(CdktfLanguage::Go), kind);
                assert_eq!(classify_directory(&bucket.directory()), Ok(bucket));
            }
        }
    }

    #[test]
    fn mixed_layouts_are_rejected() {
        let err = classify_mapping(&mapping(&["docs/resources", "website/docs/r"]))
            .expect_err("mixed");
        assert_eq!(
            err,
            StructuralError::MixedConventions {
                legacy: "website/docs/r".into(),
                registry: "docs/resources".into(),
            }
        );

        let err = classify_mapping(&mapping(&["website/docs", "docs/cdktf/python/resources"]))
            .expect_err("legacy index with registry cdktf");
        assert!(matches!(err, StructuralError::MixedConventions { .. }));
    }

    #[test]
    fn bare_registry_index_may_sit_next_to_legacy_tree() {
        let binding = mapping(&["docs", "website/docs", "website/docs/r"]);
        let classified = classify_mapping(&binding).expect("ok");
        assert_eq!(classified.len(), 3);
    }

    #[test]
    fn invalid_directory_fails_before_mixed_check() {
        let err = classify_mapping(&mapping(&["docs/resources", "nope", "website/docs/r"]))
            .expect_err("invalid");
        assert!(matches!(err, StructuralError::InvalidDirectory { .. }));
    }
}
