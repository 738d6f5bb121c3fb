use super::FavoritesBackend;
use crate::error::{FavdexError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem favorites backend: one `<key>.json` file per record.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    ///
    /// Keys are used verbatim as file stems, so anything that could escape
    /// the root (separators, `.`, `..`, empty) is rejected.
    pub fn record_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return Err(FavdexError::Store(format!(
                "Invalid favorites key '{}': must be a plain file name",
                key
            )));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FavdexError::Io)?;
        }
        Ok(())
    }
}

impl FavoritesBackend for FsBackend {
    fn load_favorites(&self, key: &str) -> Result<Option<Vec<usize>>> {
        let path = self.record_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(FavdexError::Io)?;
        let positions: Vec<usize> =
            serde_json::from_str(&content).map_err(FavdexError::Serialization)?;
        Ok(Some(positions))
    }

    fn save_favorites(&self, key: &str, positions: &[usize]) -> Result<()> {
        let target = self.record_path(key)?;
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(positions).map_err(FavdexError::Serialization)?;

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, content).map_err(FavdexError::Io)?;
        fs::rename(&tmp, &target).map_err(FavdexError::Io)?;

        Ok(())
    }
}
