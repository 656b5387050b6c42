use super::backend::StorageBackend;
use crate::error::{Result, SlateError};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Stores each key as `<key>.json` inside one data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(SlateError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(SlateError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SlateError::Io(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let target = self.key_path(key)?;
        self.ensure_dir()?;

        // Atomic write: a crash or a full disk never leaves a truncated file behind
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &target)) {
            let _ = fs::remove_file(&tmp);
            return Err(SlateError::Io(e));
        }

        debug!(path = %target.display(), bytes = value.len(), "wrote collection");
        Ok(())
    }

    fn describe(&self, key: &str) -> String {
        self.root.join(format!("{}.json", key)).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path());
        assert_eq!(backend.read("customers").unwrap(), None);
    }

    #[test]
    fn creates_data_dir_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let backend = FsBackend::new(&root);

        backend.write("products", "[]").unwrap();
        assert!(root.join("products.json").exists());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory where the file should go makes the rename fail.
        fs::create_dir_all(dir.path().join("customers.json").join("inner")).unwrap();
        let backend = FsBackend::new(dir.path());

        assert!(matches!(
            backend.write("customers", "[]"),
            Err(SlateError::Io(_))
        ));
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn rejects_keys_that_escape_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path());

        assert!(matches!(
            backend.write("../evil", "[]"),
            Err(SlateError::Store(_))
        ));
        assert!(matches!(backend.read(""), Err(SlateError::Store(_))));
    }
}
