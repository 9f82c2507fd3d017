//! Identifiers a provider declares, as extracted from its source or schema.

use std::collections::{BTreeMap, BTreeSet};

use crate::layout::ResourceKind;

/// Declared identifiers keyed by kind.
///
/// A kind with no entry was never supplied and its mismatch check is skipped. A kind with an
/// empty set was supplied and every documentation file for it is an orphan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderIdentifiers {
    by_kind: BTreeMap<ResourceKind, BTreeSet<String>>,
}

impl ProviderIdentifiers {
    /// Create a set with no kinds supplied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the full set for `kind`, replacing anything recorded before.
    pub fn with<I, S>(mut self, kind: ResourceKind, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.by_kind
            .insert(kind, identifiers.into_iter().map(Into::into).collect());
        self
    }

    /// Add one identifier, marking `kind` as supplied.
    pub fn insert(&mut self, kind: ResourceKind, identifier: impl Into<String>) {
        self.by_kind
            .entry(kind)
            .or_default()
            .insert(identifier.into());
    }

    /// Identifiers for `kind`, or `None` when the kind was not supplied.
    pub fn get(&self, kind: ResourceKind) -> Option<&BTreeSet<String>> {
        self.by_kind.get(&kind)
    }

    /// True when no kind holds any identifier.
    pub fn is_empty(&self) -> bool {
        self.by_kind.values().all(BTreeSet::is_empty)
    }
}
