use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::repository::traits::KeyValueStore;

const DEFAULT_DIR_NAME: &str = ".moodlog";
const RECORD_EXTENSION: &str = "json";

/// Stores each key as `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(DEFAULT_DIR_NAME)
            }
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("Could not create data directory {}", path.display()))?;

        Ok(FileKeyValueStore { base_dir: path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(anyhow!("Invalid storage key: '{}'", key));
        }
        Ok(self.base_dir.join(format!("{}.{}", key, RECORD_EXTENSION)))
    }
}

fn write_synced(path: &Path, value: &str) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(value.as_bytes())
        .and_then(|()| writer.flush())
        .and_then(|()| writer.get_ref().sync_all())
        .with_context(|| format!("Could not write {}", path.display()))
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("Could not read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key)?;
        let tmp_path = path.with_extension("json.tmp");

        // Rename is the commit point: readers see the old or the new value.
        let result = write_synced(&tmp_path, value).and_then(|()| {
            fs::rename(&tmp_path, &path)
                .with_context(|| format!("Could not replace {}", path.display()))
        });
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("Could not remove {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(store.get("moodData").unwrap(), None);
        store.set("moodData", "{}").unwrap();
        assert_eq!(store.get("moodData").unwrap().as_deref(), Some("{}"));
        assert!(dir.path().join("moodData.json").exists());
        assert!(!dir.path().join("moodData.json.tmp").exists());

        store.set("moodData", "{\"a\":1}").unwrap();
        assert_eq!(store.get("moodData").unwrap().as_deref(), Some("{\"a\":1}"));

        store.remove("moodData").unwrap();
        assert_eq!(store.get("moodData").unwrap(), None);
        store.remove("moodData").unwrap();
    }

    #[test]
    fn test_failed_set_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(Some(dir.path().to_path_buf())).unwrap();
        // A non-empty directory in the record's place makes the rename fail.
        let blocker = dir.path().join("moodData.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();

        let err = store.set("moodData", "{}").unwrap_err();
        assert!(format!("{:#}", err).contains("Could not replace"));
        assert!(!dir.path().join("moodData.json.tmp").exists());
        assert!(blocker.join("keep").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileKeyValueStore::new(Some(nested.clone())).unwrap();
        assert_eq!(store.base_dir(), nested.as_path());
        assert!(nested.is_dir());
    }
}
