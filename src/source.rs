//! Where documents come from.
//!
//! The build reads a posts directory; the listing and detail lookups work the
//! same way over any set of named, lazily loaded texts.

use crate::error::FolioError;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

pub trait DocumentSource {
    /// Document names in enumeration order.
    fn names(&self) -> &[String];

    fn load(&self, name: &str) -> io::Result<String>;

    /// The recognized extension, without the dot.
    fn extension(&self) -> &str;
}

/// Non-recursive scan of a directory, sorted by file name.
#[derive(Debug)]
pub struct DirSource {
    root: PathBuf,
    extension: String,
    names: Vec<String>,
}

impl DirSource {
    pub fn open(root: impl AsRef<Path>, extension: &str) -> Result<Self, FolioError> {
        let root = root.as_ref().to_path_buf();
        let mut names = Vec::new();

        let walker = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|source| FolioError::PostsDir {
                path: root.clone(),
                source,
            })?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().is_some_and(|e| e == extension)
            {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }

        tracing::debug!(dir = %root.display(), count = names.len(), "discovered documents");
        Ok(Self {
            root,
            extension: extension.to_string(),
            names,
        })
    }
}

impl DocumentSource for DirSource {
    fn names(&self) -> &[String] {
        &self.names
    }

    fn load(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.root.join(name))
    }

    fn extension(&self) -> &str {
        &self.extension
    }
}

/// Documents bundled in memory as `(name, text)` pairs.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    extension: String,
    names: Vec<String>,
    texts: Vec<String>,
}

#[cfg(test)]
impl MemorySource {
    pub fn new<N, T>(extension: &str, docs: impl IntoIterator<Item = (N, T)>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        let (names, texts): (Vec<String>, Vec<String>) = docs.into_iter().map(|(n, t)| (n.into(), t.into())).unzip();
        Self {
            extension: extension.to_string(),
            names,
            texts,
        }
    }
}

#[cfg(test)]
impl DocumentSource for MemorySource {
    fn names(&self) -> &[String] {
        &self.names
    }

    fn load(&self, name: &str) -> io::Result<String> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.texts[i].clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no document named {name}")))
    }

    fn extension(&self) -> &str {
        &self.extension
    }
}
