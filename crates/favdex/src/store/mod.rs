//! # Persistence Layer
//!
//! Favorites survive restarts through a single named record holding an
//! ordered list of positions. The [`FavoritesBackend`] trait is the port the
//! rest of the crate talks to; backends decide where the record lives.
//!
//! ## Contract
//!
//! - **Round-trip**: `save_favorites(k, xs)` followed by `load_favorites(k)`
//!   returns exactly `xs`, in order.
//! - **Full overwrite**: every save replaces the whole record. There is no
//!   append or partial update, so the latest write wins.
//! - **Absence is not an error**: `load_favorites` returns `Ok(None)` when the
//!   record was never written.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key, written atomically.
//! - [`mem_backend::MemBackend`]: for testing without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── favorites.json      # Persisted FavoriteSet, e.g. [1, 4]
//! ├── search-index.json   # Local search index (see `search::fs`)
//! └── favdex.toml         # Optional configuration
//! ```

use crate::error::Result;
use crate::model::FavoriteSet;

pub mod fs_backend;
pub mod mem_backend;

/// Abstract interface for persisting the favorites record.
///
/// Methods take `&self`; backends that hold state use interior mutability.
pub trait FavoritesBackend {
    /// Load the record stored under `key`, or `Ok(None)` if there is none.
    fn load_favorites(&self, key: &str) -> Result<Option<Vec<usize>>>;

    /// Overwrite the record stored under `key`.
    fn save_favorites(&self, key: &str, positions: &[usize]) -> Result<()>;
}

/// Read the persisted favorites at startup.
///
/// Never fails: a missing record yields an empty set, and an unreadable one is
/// treated the same way (logged at debug level only).
pub fn load_persisted<B: FavoritesBackend + ?Sized>(backend: &B, key: &str) -> FavoriteSet {
    match backend.load_favorites(key) {
        Ok(Some(positions)) => FavoriteSet::from(positions),
        Ok(None) => FavoriteSet::new(),
        Err(e) => {
            log::debug!("no usable favorites under '{}': {}", key, e);
            FavoriteSet::new()
        }
    }
}
