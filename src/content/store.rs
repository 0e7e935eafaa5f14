//! Read-only asset stores.
//!
//! Assets are addressed by `/`-separated paths relative to the store root,
//! e.g. `pages/en/about.md`.

use std::{future::Future, io, path::PathBuf};
use walkdir::WalkDir;

/// Key-value access to raw content assets.
pub trait AssetStore: Send + Sync + 'static {
    /// Every asset path, in a stable enumeration order.
    fn list(&self) -> io::Result<Vec<String>>;

    /// Raw text of the asset at `path`.
    fn read(&self, path: &str) -> impl Future<Output = io::Result<String>> + Send;
}

/// Assets on the local file system, below `root`.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetStore for FsStore {
    /// Files below the root, sorted by path so enumeration order does not
    /// depend on the file system.
    fn list(&self) -> io::Result<Vec<String>> {
        let mut paths = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(io::Error::other)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            paths.push(relative);
        }

        Ok(paths)
    }

    fn read(&self, path: &str) -> impl Future<Output = io::Result<String>> + Send {
        let full = self.root.join(path);
        async move { tokio::fs::read_to_string(full).await }
    }
}

/// In-memory store preserving insertion order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    assets: Vec<(String, String)>,
    fail_list: bool,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, text: &str) -> Self {
        self.assets.push((path.to_owned(), text.to_owned()));
        self
    }

    /// A store whose listing always fails.
    pub fn broken() -> Self {
        Self {
            fail_list: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl AssetStore for MemoryStore {
    fn list(&self) -> io::Result<Vec<String>> {
        if self.fail_list {
            return Err(io::Error::other("store offline"));
        }
        Ok(self.assets.iter().map(|(path, _)| path.clone()).collect())
    }

    fn read(&self, path: &str) -> impl Future<Output = io::Result<String>> + Send {
        let found = self
            .assets
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, text)| text.clone());
        let path = path.to_owned();
        async move { found.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path)) }
    }
}
