//! TOML configuration for a provider repository.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use provider_docs_check::CheckOptions;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{CliError, CliResult};

/// Config file looked up in the provider root when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".provider-docs.toml";

/// Generic TOML-backed config loader.
///
/// Only reads and deserializes; callers validate the loaded value.
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> ConfigLoader<T>
where
    T: DeserializeOwned,
{
    /// Create a loader for a path relative to `root`. Absolute paths are used as given.
    pub fn new(root: &Path, relative_path: impl AsRef<Path>) -> Self {
        Self {
            path: root.join(relative_path),
            _marker: PhantomData,
        }
    }

    /// Load and deserialize the configuration file.
    ///
    /// Read and parse failures are both reported as
    /// [`CliErrorCategory::Config`](crate::error::CliErrorCategory::Config).
    pub fn load(&self) -> CliResult<T> {
        let body = fs::read_to_string(&self.path).map_err(|err| {
            CliError::config(format!("failed to read config: {err}")).with_path(&self.path)
        })?;
        toml::from_str(&body).map_err(|err| {
            CliError::config(format!("failed to parse config: {err}")).with_path(&self.path)
        })
    }

    /// Like [`load`](Self::load), but a missing file yields `None`.
    pub fn load_optional(&self) -> CliResult<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }
        self.load().map(Some)
    }

    /// Return the config path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Contents of `.provider-docs.toml`.
///
/// ```toml
/// providers_schema_json = "schema.json"
///
/// [check]
/// provider_name = "aws"
///
/// [check.resource.front_matter]
/// subcategory = "required"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderDocsConfig {
    /// Key (or `namespace/name` suffix) selecting the entry in the schema file.
    pub provider_source: Option<String>,
    /// Output of `terraform providers schema -json`, relative to the provider root.
    pub providers_schema_json: Option<PathBuf>,
    pub check: CheckOptions,
}
