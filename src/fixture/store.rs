//! On-disk fixture store: `<root>/<name>.<extension>`.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::FIXTURE_EXTENSION;
use crate::error::HarnessError;

/// A directory of fixtures sharing one file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureStore {
    root: PathBuf,
    extension: String,
}

/// A fixture file found on disk by [`FixtureStore::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFixture {
    pub name: String,
    pub path: PathBuf,
}

impl FixtureStore {
    /// A store rooted at `root` using the default `.snappy` extension.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FixtureStore { root: root.into(), extension: FIXTURE_EXTENSION.to_owned() }
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_owned();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Deterministic path of the fixture for case `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, self.extension))
    }

    /// Write `compressed` as the fixture for `name`, creating the root if needed.
    pub fn write(&self, name: &str, compressed: &[u8]) -> Result<PathBuf, HarnessError> {
        fs::create_dir_all(&self.root).map_err(|e| HarnessError::io(&self.root, e))?;
        let path = self.path_for(name);
        fs::write(&path, compressed).map_err(|e| HarnessError::io(&path, e))?;
        Ok(path)
    }

    /// Read the fixture for `name`.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, HarnessError> {
        read_fixture(&self.path_for(name))
    }

    /// Every fixture file directly under the root, sorted by name.
    pub fn list(&self) -> Result<Vec<StoredFixture>, HarnessError> {
        let mut found = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).to_path_buf();
                HarnessError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                found.push(StoredFixture { name: stem.to_owned(), path: path.to_path_buf() });
            }
        }
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}

/// Read a whole compressed artifact into memory.
pub fn read_fixture(path: &Path) -> Result<Vec<u8>, HarnessError> {
    fs::read(path).map_err(|e| HarnessError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_root_name_extension() {
        let store = FixtureStore::new("fixtures");
        assert_eq!(store.path_for("hello"), Path::new("fixtures").join("hello.snappy"));
    }

    #[test]
    fn with_extension_strips_leading_dot() {
        let store = FixtureStore::new("d").with_extension(".sz");
        assert_eq!(store.extension(), "sz");
        assert_eq!(store.path_for("x"), Path::new("d").join("x.sz"));
    }

    #[test]
    fn write_creates_root_and_list_finds_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let store = FixtureStore::new(dir.path().join("nested"));
        let path = store.write("hello", &[1, 2, 3]).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
        fs::write(store.root().join("notes.txt"), b"ignored").unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "hello");
        assert_eq!(store.read("hello").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn read_missing_fixture_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FixtureStore::new(dir.path());
        let err = store.read("absent").unwrap_err();
        assert_eq!(err.kind(), "IOError");
    }
}
