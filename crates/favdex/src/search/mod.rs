//! # Search Index Port
//!
//! Favorited tutorials are mirrored into an external search index so a
//! system-wide search surface can find them. The index is an opaque,
//! asynchronous upsert/delete service: this crate hands it work and gets the
//! outcome back later through a [`Completion`] callback.
//!
//! ## Fire and Forget
//!
//! Callers never wait on the index. Outcomes are logged and dropped: they are
//! not retried, not surfaced to the user and never roll back local state.
//!
//! Because operations complete asynchronously and in no guaranteed order, a
//! quick favorite → unfavorite → favorite sequence can land out of program
//! order and leave the index stale. Nothing repairs this implicitly; see
//! [`crate::favorites::FavoritesIndex::reconcile`] for the opt-in repair pass.
//!
//! ## Implementations
//!
//! - [`fs::FsIndex`]: local JSON-backed index with substring search.
//! - [`memory::MemIndex`]: records calls and can defer completions, for tests.

use crate::error::Result;
use crate::model::IndexRecord;

pub mod fs;
pub mod memory;

/// Callback receiving the outcome of one index operation.
pub type Completion = Box<dyn FnOnce(Result<()>)>;

/// Abstract interface for the external search index.
pub trait SearchIndex {
    /// Add or replace records. The outcome is delivered to `done`, possibly later.
    fn index_items(&self, records: Vec<IndexRecord>, done: Completion);

    /// Remove records by identifier. Unknown identifiers are not an error.
    fn delete_items(&self, identifiers: Vec<String>, done: Completion);

    /// Identifiers currently indexed under `domain`.
    fn indexed_identifiers(&self, domain: &str) -> Result<Vec<String>>;
}
