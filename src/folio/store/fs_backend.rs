use super::backend::StorageBackend;
use crate::error::{FolioError, Result};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// File-per-key backend rooted in the data directory: `<root>/<key>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FolioError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(FolioError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        // Atomic write: tmp file then rename over the key file
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_path, value) {
            let _ = fs::remove_file(&tmp_path);
            return Err(FolioError::Io(e));
        }
        fs::rename(&tmp_path, self.key_path(key)).map_err(FolioError::Io)?;
        Ok(())
    }

    fn location(&self, key: &str) -> PathBuf {
        self.key_path(key)
    }
}
