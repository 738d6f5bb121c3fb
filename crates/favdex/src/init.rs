//! # Initialization
//!
//! Wires the production pieces together: data directory, configuration,
//! filesystem backends and the tutorial list.
//!
//! ## Data Directory Resolution
//!
//! 1. An explicit `data_override` path, used as-is.
//! 2. The `FAVDEX_DATA` environment variable (primarily for testing).
//! 3. The OS-appropriate data directory via the `directories` crate.
//!
//! ## Tutorial List
//!
//! If the configuration names an `items_file`, it is loaded as JSON
//! (relative paths resolve against the data directory). Otherwise the
//! built-in list is used. A failing file yields an empty list, not an error.

use crate::config::FavdexConfig;
use crate::error::{FavdexError, Result};
use crate::favorites::{FavoritesIndex, IndexSettings};
use crate::presenter::ListPresenter;
use crate::search::fs::FsIndex;
use crate::source::{BuiltinSource, JsonFileSource, TutorialSource};
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "FAVDEX_DATA";

pub type FsPresenter = ListPresenter<FsBackend, FsIndex>;

pub struct FavdexContext {
    pub presenter: FsPresenter,
    pub config: FavdexConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "favdex", "favdex")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FavdexError::Config("Could not determine data directory".to_string()))
}

/// The tutorial source the configuration asks for.
pub fn tutorial_source(config: &FavdexConfig, data_dir: &Path) -> Box<dyn TutorialSource> {
    match &config.items_file {
        Some(file) => Box::new(JsonFileSource::new(data_dir.join(file))),
        None => Box::new(BuiltinSource),
    }
}

/// Build a ready-to-use context rooted at the resolved data directory.
pub fn initialize(data_override: Option<PathBuf>) -> Result<FavdexContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = FavdexConfig::load_or_default(&data_dir);

    let favorites = FavoritesIndex::new(
        FsBackend::new(data_dir.clone()),
        FsIndex::new(&data_dir),
        IndexSettings::from(&config),
    );
    let source = tutorial_source(&config, &data_dir);
    let presenter = ListPresenter::from_source(source.as_ref(), favorites, &config.base_url);

    log::debug!(
        "favdex initialized at {} with {} tutorial(s)",
        data_dir.display(),
        presenter.row_count()
    );

    Ok(FavdexContext {
        presenter,
        config,
        data_dir,
    })
}
