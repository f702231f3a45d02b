//! Sources of raw entry pages.
//!
//! A compiled help archive stores one dictionary entry per internal page.
//! [`ArchiveSource`] is the narrow interface the converter needs from such an
//! archive: list internal paths, resolve one to an object, read its bytes.
//!
//! [`DirArchive`] reads an archive that was extracted to a directory (for
//! example with `7z x dict.chm -odict/`); [`MemoryArchive`] holds pages in
//! memory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Read access to the pages of a help archive.
pub trait ArchiveSource {
    /// Descriptor of a resolved object.
    type Object;

    /// All internal paths, `/`-prefixed, in a stable order.
    fn paths(&self) -> Result<Vec<String>>;

    /// Look up the object stored at `path`.
    fn resolve(&self, path: &str) -> Result<Self::Object>;

    /// Raw bytes of a resolved object.
    fn retrieve(&self, object: &Self::Object) -> Result<Vec<u8>>;
}

/// Which internal paths are dictionary entries.
///
/// Entry pages have fixed-length numeric names such as `/000123.htm`; index
/// and navigation pages do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFilter {
    /// Exact length of the internal path in bytes, if constrained.
    pub path_len: Option<usize>,
    pub suffix: String,
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            path_len: Some(11),
            suffix: ".htm".to_string(),
        }
    }
}

impl EntryFilter {
    /// Accept any path with the given suffix.
    pub fn any_length(suffix: impl Into<String>) -> Self {
        Self {
            path_len: None,
            suffix: suffix.into(),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        self.path_len.is_none_or(|len| path.len() == len) && path.ends_with(&self.suffix)
    }
}

/// An extracted archive on disk.
#[derive(Debug, Clone)]
pub struct DirArchive {
    root: PathBuf,
}

/// A file inside a [`DirArchive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirObject {
    pub path: String,
    pub file: PathBuf,
    pub size: u64,
}

impl DirArchive {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::InvalidArchive(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn walk(&self, dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                debug!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            let path = format!("{prefix}/{name}");
            if entry.file_type()?.is_dir() {
                self.walk(&entry.path(), &path, out)?;
            } else {
                out.push(path);
            }
        }
        Ok(())
    }
}

impl ArchiveSource for DirArchive {
    type Object = DirObject;

    fn paths(&self) -> Result<Vec<String>> {
        let mut paths = Vec::new();
        self.walk(&self.root, "", &mut paths)?;
        paths.sort();
        Ok(paths)
    }

    fn resolve(&self, path: &str) -> Result<DirObject> {
        let relative = path.trim_start_matches('/');
        if relative.split('/').any(|part| part == "..") {
            return Err(Error::ObjectNotFound(path.to_string()));
        }

        let file = self.root.join(relative);
        let metadata = fs::metadata(&file).map_err(|_| Error::ObjectNotFound(path.to_string()))?;
        if !metadata.is_file() {
            return Err(Error::ObjectNotFound(path.to_string()));
        }

        Ok(DirObject {
            path: path.to_string(),
            file,
            size: metadata.len(),
        })
    }

    fn retrieve(&self, object: &DirObject) -> Result<Vec<u8>> {
        Ok(fs::read(&object.file)?)
    }
}

/// Pages held in memory, keyed by internal path.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    pages: BTreeMap<String, Vec<u8>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a page.
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.pages.insert(path.into(), bytes.into());
    }

    pub fn with_page(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl ArchiveSource for MemoryArchive {
    type Object = String;

    fn paths(&self) -> Result<Vec<String>> {
        Ok(self.pages.keys().cloned().collect())
    }

    fn resolve(&self, path: &str) -> Result<String> {
        if self.pages.contains_key(path) {
            Ok(path.to_string())
        } else {
            Err(Error::ObjectNotFound(path.to_string()))
        }
    }

    fn retrieve(&self, object: &String) -> Result<Vec<u8>> {
        self.pages
            .get(object)
            .cloned()
            .ok_or_else(|| Error::ObjectNotFound(object.clone()))
    }
}
