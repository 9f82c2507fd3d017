//! Where documentation bytes come from.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read access to documentation files by their relative POSIX path.
pub trait DocSource {
    /// Current size of the file in bytes.
    fn size(&self, path: &str) -> io::Result<u64>;
    fn read(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Files under a provider root on disk. Every call goes to the filesystem.
#[derive(Clone, Debug)]
pub struct FsSource {
    base_path: PathBuf,
}

impl FsSource {
    /// Create a source rooted at the provider checkout.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Return the provider root.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.base_path.clone(), |acc, segment| acc.join(segment))
    }
}

impl DocSource for FsSource {
    fn size(&self, path: &str) -> io::Result<u64> {
        fs::metadata(self.resolve(path)).map(|metadata| metadata.len())
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(path))
    }
}

/// In-memory files, for tests and callers that already hold the content.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the source with `path` holding `content`.
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    fn get(&self, path: &str) -> io::Result<&[u8]> {
        self.files.get(path).map(Vec::as_slice).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}"))
        })
    }
}

impl DocSource for MemorySource {
    fn size(&self, path: &str) -> io::Result<u64> {
        self.get(path).map(|content| content.len() as u64)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        self.get(path).map(<[u8]>::to_vec)
    }
}

impl<S: DocSource + ?Sized> DocSource for &S {
    fn size(&self, path: &str) -> io::Result<u64> {
        (**self).size(path)
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }
}
