//! File-backed store

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::storage::{KeyValueStore, StorageError};

/// Store that keeps one `<key>.json` file per entry in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the storage directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str) -> impl FnOnce(io::Error) -> StorageError {
    let key = key.to_string();

    move |source| StorageError::Io { key, source }
}

impl KeyValueStore for FileStore {
    type Error = StorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(key)(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let path = self.path_for(key)?;

        fs::create_dir_all(&self.dir).map_err(io_error(key))?;
        fs::write(path, value).map_err(io_error(key))
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        let path = self.path_for(key)?;

        match fs::remove_file(path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(io_error(key)(err)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn writes_one_file_per_key() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path().join("store"));

        assert_eq!(store.get("cart")?, None);

        store.set("cart", r#"[{"product":"og-kush","weight":"5"}]"#)?;

        let on_disk = fs::read_to_string(dir.path().join("store").join("cart.json"))?;
        assert!(on_disk.contains("og-kush"));
        assert_eq!(store.get("cart")?, Some(on_disk));

        Ok(())
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());

        store.set("cart-samples", "[]")?;
        store.remove("cart-samples")?;
        store.remove("cart-samples")?;

        assert_eq!(store.get("cart-samples")?, None);

        Ok(())
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());

        assert!(matches!(
            store.set("../cart", "[]"),
            Err(StorageError::InvalidKey(key)) if key == "../cart"
        ));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));

        Ok(())
    }
}
