use crate::favorites::{FavoritesIndex, IndexSettings};
use crate::search::fs::FsIndex;
use crate::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// A filesystem-backed favorites index rooted in the temp dir.
    pub fn favorites(&self) -> FavoritesIndex<FsBackend, FsIndex> {
        FavoritesIndex::new(
            FsBackend::new(self.root.clone()),
            FsIndex::new(&self.root),
            IndexSettings::default(),
        )
    }
}
