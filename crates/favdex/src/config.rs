//! # Configuration
//!
//! Favdex configuration is declared with [`confique`], which handles layered
//! loading from a TOML file, environment variables and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `FAVDEX_BASE_URL`, `FAVDEX_DOMAIN_IDENTIFIER`, etc.
//! 2. **Config file**: `favdex.toml` in the data directory.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `base_url` | `https://hackingwithswift.com/read` | Tutorial URL prefix; row `p` opens `{base_url}/{p + 1}` |
//! | `domain_identifier` | `com.hackingwithswift` | Domain attached to every search record |
//! | `content_type` | `public.text` | Content type attached to every search record |
//! | `favorites_key` | `favorites` | Name of the persisted favorites record; a plain file stem (no `/`, `\\`, `.` or `..`) |
//! | `items_file` | unset | JSON tutorial list; the built-in list is used when absent |

use crate::error::{FavdexError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "favdex.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FavdexConfig {
    /// Prefix of the tutorial URL opened when a row is activated.
    #[config(env = "FAVDEX_BASE_URL", default = "https://hackingwithswift.com/read")]
    pub base_url: String,

    /// Domain attached to every search record; reconciliation only touches this domain.
    #[config(env = "FAVDEX_DOMAIN_IDENTIFIER", default = "com.hackingwithswift")]
    pub domain_identifier: String,

    /// Content type attached to every search record.
    #[config(env = "FAVDEX_CONTENT_TYPE", default = "public.text")]
    pub content_type: String,

    /// Name of the persisted favorites record. Used as a file stem, so it
    /// must not contain path separators or be `.`/`..`.
    #[config(env = "FAVDEX_FAVORITES_KEY", default = "favorites")]
    pub favorites_key: String,

    /// Optional JSON tutorial list. Relative paths resolve against the data directory.
    #[config(env = "FAVDEX_ITEMS_FILE")]
    pub items_file: Option<String>,
}

impl Default for FavdexConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hackingwithswift.com/read".to_string(),
            domain_identifier: "com.hackingwithswift".to_string(),
            content_type: "public.text".to_string(),
            favorites_key: "favorites".to_string(),
            items_file: None,
        }
    }
}

impl FavdexConfig {
    /// Load from env and `favdex.toml` inside `data_dir`, over compiled defaults.
    /// A missing file is not an error.
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(data_dir.join(CONFIG_FILE_NAME))
            .load()
            .map_err(|e| FavdexError::Config(e.to_string()))
    }

    /// Like [`FavdexConfig::load`], but falls back to defaults on a broken file.
    pub fn load_or_default(data_dir: &Path) -> Self {
        Self::load(data_dir).unwrap_or_else(|e| {
            log::warn!("using default configuration: {}", e);
            Self::default()
        })
    }
}
