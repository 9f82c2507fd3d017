//! Declared identifiers from `terraform providers schema -json` output.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use provider_docs_check::{ProviderIdentifiers, ResourceKind};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CliError, CliResult};

#[derive(Debug, Deserialize)]
struct ProvidersSchema {
    #[serde(default)]
    provider_schemas: BTreeMap<String, ProviderSchema>,
}

/// Only the keys matter. A missing table means the kind was not supplied.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderSchema {
    resource_schemas: Option<BTreeMap<String, Value>>,
    data_source_schemas: Option<BTreeMap<String, Value>>,
    ephemeral_resource_schemas: Option<BTreeMap<String, Value>>,
    functions: Option<BTreeMap<String, Value>>,
}

impl ProviderSchema {
    fn identifiers(&self) -> ProviderIdentifiers {
        let tables = [
            (ResourceKind::Resource, &self.resource_schemas),
            (ResourceKind::DataSource, &self.data_source_schemas),
            (ResourceKind::Ephemeral, &self.ephemeral_resource_schemas),
            (ResourceKind::Function, &self.functions),
        ];
        tables
            .into_iter()
            .fold(ProviderIdentifiers::new(), |acc, (kind, table)| match table {
                Some(table) => acc.with(kind, table.keys().cloned()),
                None => acc,
            })
    }
}

/// Read a schema file and extract the identifiers for one provider.
pub fn load_identifiers(
    path: &Path,
    provider_source: Option<&str>,
    provider_name: &str,
) -> CliResult<ProviderIdentifiers> {
    let body = fs::read_to_string(path).map_err(|err| {
        CliError::schema(format!("failed to read providers schema: {err}")).with_path(path)
    })?;
    parse_identifiers(&body, provider_source, provider_name).map_err(|err| err.with_path(path))
}

/// Parse schema JSON and extract the identifiers for one provider.
///
/// The entry is chosen by `provider_source` when given (exact key or `/<source>` suffix), else
/// the single key ending in `/<provider_name>`, else the only entry.
pub fn parse_identifiers(
    body: &str,
    provider_source: Option<&str>,
    provider_name: &str,
) -> CliResult<ProviderIdentifiers> {
    let schema: ProvidersSchema = serde_json::from_str(body)
        .map_err(|err| CliError::schema(format!("failed to parse providers schema: {err}")))?;
    let keys: Vec<&str> = schema.provider_schemas.keys().map(String::as_str).collect();

    let selected = match provider_source {
        Some(source) => select_unique(&keys, source)?,
        None if !provider_name.is_empty() => match select_unique(&keys, provider_name) {
            Ok(key) => key,
            Err(_) if keys.len() == 1 => keys[0],
            Err(err) => return Err(err),
        },
        None => match keys.as_slice() {
            [only] => *only,
            _ => {
                return Err(CliError::schema(format!(
                    "providers schema contains {} providers, cannot choose one",
                    keys.len()
                ))
                .with_hint("pass --provider-source or --provider-name"))
            }
        },
    };

    tracing::debug!(provider = selected, "using provider schema entry");
    Ok(schema
        .provider_schemas
        .get(selected)
        .map(ProviderSchema::identifiers)
        .unwrap_or_default())
}

fn select_unique<'k>(keys: &[&'k str], wanted: &str) -> CliResult<&'k str> {
    let suffix = format!("/{wanted}");
    let matches: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| *key == wanted || key.ends_with(&suffix))
        .collect();
    match matches.as_slice() {
        [key] => Ok(*key),
        [] => Err(CliError::schema(format!(
            "provider {wanted} not found in providers schema, available: {}",
            keys.join(", ")
        ))),
        _ => Err(CliError::schema(format!(
            "provider {wanted} is ambiguous in providers schema: {}",
            matches.join(", ")
        ))
        .with_hint("pass the full provider source address")),
    }
}
