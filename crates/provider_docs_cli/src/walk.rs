//! Build the directory mapping from a provider checkout.

use std::fs;
use std::path::Path;

use provider_docs_check::layout::{LEGACY_INDEX_DIRECTORY, REGISTRY_INDEX_DIRECTORY};
use provider_docs_check::DirectoryMapping;

use crate::error::{CliError, CliResult};

/// Map every directory under `docs` and `website/docs` that directly contains files to its
/// sorted file names. Keys are POSIX paths relative to `root`.
pub fn collect_documentation(root: &Path) -> CliResult<DirectoryMapping> {
    let mut mapping = DirectoryMapping::new();
    let mut found = false;
    for index in [REGISTRY_INDEX_DIRECTORY, LEGACY_INDEX_DIRECTORY] {
        let dir = root.join(index);
        if !dir.is_dir() {
            continue;
        }
        found = true;
        collect_directory(&dir, index, &mut mapping)?;
    }

    if !found {
        return Err(CliError::structure("no documentation directories found")
            .with_path(root)
            .with_hint("expected docs/ or website/docs/ under the provider root"));
    }
    tracing::debug!(directories = mapping.len(), "collected documentation directories");
    Ok(mapping)
}

fn collect_directory(dir: &Path, key: &str, out: &mut DirectoryMapping) -> CliResult<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|err| CliError::io(format!("failed to read directory: {err}")).with_path(dir))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| CliError::io(format!("failed to read directory: {err}")).with_path(dir))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        // `DirEntry::file_type` does not follow symlinks, so a link cycle cannot recurse.
        let file_type = entry.file_type().map_err(|err| {
            CliError::io(format!("failed to read file type: {err}")).with_path(&path)
        })?;
        if file_type.is_symlink() {
            tracing::debug!(path = %path.display(), "skipping symlink");
        } else if file_type.is_dir() {
            collect_directory(&path, &format!("{key}/{name}"), out)?;
        } else if file_type.is_file() {
            files.push(name);
        }
    }

    if !files.is_empty() {
        out.insert(key.to_string(), files);
    }
    Ok(())
}
