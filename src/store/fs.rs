//! Directory-backed store. The version token is the SHA-256 of the content.

use super::{RemoteStore, StoreError, StoreErrorKind, VersionedContent};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    pub fn version_of(content: &str) -> String {
        format!("{:x}", Sha256::digest(content.as_bytes()))
    }
}

fn io_err(path: &str, e: io::Error) -> StoreError {
    if e.kind() == io::ErrorKind::NotFound {
        StoreError::not_found(path)
    } else {
        StoreError::new(StoreErrorKind::Io, path, e.to_string())
    }
}

impl RemoteStore for FsStore {
    fn read_versioned(&self, path: &str) -> Result<VersionedContent, StoreError> {
        let content = self.read_raw(path)?;
        let version = Self::version_of(&content);
        Ok(VersionedContent { content, version })
    }

    fn read_raw(&self, path: &str) -> Result<String, StoreError> {
        fs::read_to_string(self.resolve(path)).map_err(|e| io_err(path, e))
    }

    fn write(
        &self,
        path: &str,
        content: &str,
        expected: Option<&str>,
        _message: &str,
    ) -> Result<String, StoreError> {
        let target = self.resolve(path);

        let current = match fs::read_to_string(&target) {
            Ok(c) => Some(Self::version_of(&c)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(io_err(path, e)),
        };

        match (expected, current.as_deref()) {
            (Some(_), None) => return Err(StoreError::not_found(path)),
            (Some(want), Some(have)) if want != have => {
                return Err(StoreError::conflict(path, "version token is stale"));
            }
            (None, Some(_)) => {
                return Err(StoreError::conflict(path, "resource already exists"));
            }
            _ => {}
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| io_err(path, e))?;
        }

        // write-then-rename keeps readers from ever seeing a half-written file
        let tmp = target.with_extension("json.tmp");
        {
            let mut f = fs::File::create(&tmp).map_err(|e| io_err(path, e))?;
            f.write_all(content.as_bytes())
                .map_err(|e| io_err(path, e))?;
            f.sync_all().map_err(|e| io_err(path, e))?;
        }
        fs::rename(&tmp, &target).map_err(|e| io_err(path, e))?;

        Ok(Self::version_of(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_conditional_update() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());

        assert!(store.read_versioned("data/l.json").unwrap_err().is_not_found());

        let v1 = store.write("data/l.json", "[]", None, "create").unwrap();
        let read = store.read_versioned("data/l.json").unwrap();
        assert_eq!(read.version, v1);

        let v2 = store.write("data/l.json", "[1]", Some(&v1), "update").unwrap();
        assert_ne!(v1, v2);
        assert_eq!(store.read_raw("data/l.json").unwrap(), "[1]");
    }

    #[test]
    fn stale_token_and_missing_resource_are_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());

        let err = store.write("x.json", "[]", Some("abc"), "m").unwrap_err();
        assert!(err.is_not_found());

        let v1 = store.write("x.json", "[]", None, "m").unwrap();
        store.write("x.json", "[1]", Some(&v1), "m").unwrap();

        let err = store.write("x.json", "[2]", Some(&v1), "m").unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.read_raw("x.json").unwrap(), "[1]");

        let err = store.write("x.json", "[3]", None, "m").unwrap_err();
        assert!(err.is_conflict());
    }
}
