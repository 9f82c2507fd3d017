//! Validation rules for Terraform provider documentation trees.
//!
//! A run takes a directory-to-files mapping (relative POSIX keys such as `docs/resources`),
//! classifies every directory into a layout and resource kind, then checks each bucket against
//! the provider's declared identifiers and each file against extension, size, front matter, and
//! content rules. Every finding is collected into one sorted [`Report`]; only a structurally
//! invalid mapping aborts the run, as a [`StructuralError`].
//!
//! The crate performs no directory walking and no flag parsing. File bytes are read through a
//! [`DocSource`], so callers can check a tree on disk ([`FsSource`]) or in memory
//! ([`MemorySource`]).

pub mod check;
pub mod contents;
pub mod error;
pub mod frontmatter;
pub mod identifiers;
pub mod layout;
pub mod mismatch;
pub mod options;
pub mod policy;
pub mod source;
pub mod violation;

pub use check::Check;
pub use error::StructuralError;
pub use identifiers::ProviderIdentifiers;
pub use layout::{
    classify_directory, classify_file_path, classify_mapping, Bucket, CdktfLanguage,
    DirectoryMapping, DocConvention, Layout, ResourceKind,
};
pub use options::{
    CheckOptions, ContentOptions, ExamplePolicy, FieldPolicy, FrontMatterField,
    FrontMatterOptions, KindOptions, MismatchOptions,
};
pub use source::{DocSource, FsSource, MemorySource};
pub use violation::{CheckKind, Report, Severity, Violation};
