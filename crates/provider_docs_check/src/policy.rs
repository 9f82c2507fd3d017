//! Stateless per-file policy checks: ignore list, extension, size.

use crate::violation::{CheckKind, Violation};

/// Terraform Registry storage limit for a single documentation file, in bytes.
pub const REGISTRY_MAXIMUM_FILE_SIZE: u64 = 500_000;

/// Extensions accepted under `website/docs`. Longest first so trimming prefers compound
/// extensions.
pub const LEGACY_FILE_EXTENSIONS: &[&str] = &[".html.markdown", ".html.md", ".markdown", ".md"];
/// Extensions accepted under `docs`.
pub const REGISTRY_FILE_EXTENSIONS: &[&str] = &[".md"];

/// File names skipped by every check.
pub const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Final path segment.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Whether every check should skip the file.
pub fn is_ignored(path: &str) -> bool {
    IGNORED_FILES.contains(&file_name(path))
}

/// File name with the longest known documentation extension removed.
pub fn trim_file_extension(path: &str) -> &str {
    let name = file_name(path);
    LEGACY_FILE_EXTENSIONS
        .iter()
        .find_map(|extension| name.strip_suffix(extension))
        .unwrap_or(name)
}

/// Violation when the file name ends with none of `allowed`.
pub fn check_extension(path: &str, allowed: &[&str]) -> Option<Violation> {
    let name = file_name(path);
    if allowed.iter().any(|extension| name.ends_with(extension)) {
        return None;
    }
    Some(Violation::new(
        path,
        CheckKind::InvalidExtension,
        format!(
            "file does not end with a valid extension, valid extensions: {}",
            allowed.join(", ")
        ),
    ))
}

/// `size` must come from a fresh stat of the file.
pub fn check_size(path: &str, size: u64) -> Option<Violation> {
    tracing::debug!(path, size, limit = REGISTRY_MAXIMUM_FILE_SIZE, "file size");
    if size < REGISTRY_MAXIMUM_FILE_SIZE {
        return None;
    }
    Some(Violation::new(
        path,
        CheckKind::SizeExceeded,
        format!(
            "exceeded maximum ({REGISTRY_MAXIMUM_FILE_SIZE}) size of documentation file for Terraform Registry: {size}"
        ),
    ))
}
