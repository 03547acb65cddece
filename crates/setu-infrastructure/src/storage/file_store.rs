//! File-backed key-value store.

use anyhow::{Context, Result, bail};
use setu_core::store::KeyValueStore;
use std::fs;
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// Persists each key as one file under a base directory.
///
/// Writes go through a temp file plus atomic rename, so a crash mid-write
/// leaves the previous value intact. Keys are restricted to
/// `[A-Za-z0-9_-]` to keep them path-safe.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `base_dir`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).context("Failed to create store directory")?;
        Ok(Self { base_dir })
    }

    /// Creates a store at the default location (`~/.skillsetu`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// directory cannot be created.
    pub fn default_location() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        Self::new(home_dir.join(".skillsetu"))
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            bail!("invalid store key: {key:?}");
        }
        Ok(self.base_dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .context(format!("Failed to read store key: {:?}", path))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let tmp_path = path.with_extension("tmp");

        let mut file = fs::File::create(&tmp_path)
            .context(format!("Failed to create temp file: {:?}", tmp_path))?;
        file.write_all(value.as_bytes())
            .context("Failed to write store value")?;
        file.sync_all().context("Failed to sync store value")?;

        fs::rename(&tmp_path, &path)
            .context(format!("Failed to commit store key: {:?}", path))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        if path.exists() {
            fs::remove_file(&path)
                .context(format!("Failed to remove store key: {:?}", path))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_get_remove_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        assert_eq!(store.get("token").unwrap(), None);

        store.set("token", "abc123").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc123"));

        store.set("token", "xyz").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("xyz"));

        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn values_survive_reopening() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = FileStore::new(temp_dir.path()).unwrap();
            store.set("userInfo", "{\"id\":1}").unwrap();
        }
        let reopened = FileStore::new(temp_dir.path()).unwrap();
        assert_eq!(
            reopened.get("userInfo").unwrap().as_deref(),
            Some("{\"id\":1}")
        );
    }

    #[test]
    fn removing_absent_key_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();
        store.remove("never-set").unwrap();
    }

    #[test]
    fn path_escaping_keys_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("a/b").is_err());
        assert!(store.set("", "x").is_err());
    }
}
