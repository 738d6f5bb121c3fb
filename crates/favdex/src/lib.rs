//! # Favdex
//!
//! Favdex tracks which entries of a tutorial list a user has marked as
//! favorites, persists that choice across launches, and mirrors every
//! favorite into a search index so a system-wide search can find it.
//!
//! ## Architecture
//!
//! ```text
//! TutorialSource ──► ListPresenter ──► FavoritesIndex ──┬──► FavoritesBackend (persisted set)
//!  (item list)        (rows, edits,     (source of truth) └──► SearchIndex (fire-and-forget)
//!                      activation)
//! ```
//!
//! - [`favorites::FavoritesIndex`]: owns the favorite set; persists every
//!   mutation and pushes one index upsert/delete per mutation.
//! - [`store`]: the persistence port and its filesystem/in-memory backends.
//! - [`search`]: the search-index port and its filesystem/in-memory backends.
//! - [`source`]: where the tutorial list comes from.
//! - [`presenter::ListPresenter`]: what a list UI calls into.
//! - [`init`]: production wiring rooted at a data directory.
//!
//! Local state is authoritative. Search-index outcomes are logged through the
//! `log` facade and never retried or rolled back.

pub mod config;
pub mod error;
pub mod favorites;
pub mod init;
pub mod model;
pub mod presenter;
pub mod search;
pub mod source;
pub mod store;
#[cfg(test)]
pub mod test_utils;

pub use error::{FavdexError, Result};
