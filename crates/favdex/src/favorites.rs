//! # FavoritesIndex
//!
//! [`FavoritesIndex`] is the single source of truth for "is the tutorial at
//! position P a favorite". It owns the in-memory [`FavoriteSet`] and keeps two
//! other copies aligned with it:
//!
//! 1. **Persisted record**: written through a [`FavoritesBackend`] after every
//!    mutation, as a full overwrite.
//! 2. **Search index**: one [`IndexRecord`] per favorite, pushed through a
//!    [`SearchIndex`] on a fire-and-forget basis.
//!
//! ## Mutation Order
//!
//! For each add or remove:
//!
//! 1. Compute the new set.
//! 2. Persist it. If the write fails, stop: memory is untouched and no index
//!    call is made.
//! 3. Commit it in memory. `is_favorite` reflects the change from here on.
//! 4. Dispatch exactly one index upsert (add) or delete (remove).
//!
//! The index outcome only reaches the log. A failed upsert or delete never
//! rolls back steps 2 and 3.
//!
//! ## Consistency With the Index
//!
//! Local state is authoritative; the index is eventually consistent at best.
//! Each toggle issues its index call regardless of what the index already
//! holds, and completions may arrive in any order, so a fast
//! favorite → unfavorite → favorite can leave a missing or stale record.
//! [`FavoritesIndex::reconcile`] repairs that, but only when called
//! explicitly; nothing in this crate calls it on its own.
//!
//! ## Bounds
//!
//! Positions are not checked against any tutorial list here. The caller
//! resolves the [`Tutorial`] first and is responsible for handing over a
//! position that is valid for the list currently on screen.

use crate::config::FavdexConfig;
use crate::error::Result;
use crate::model::{identifier_for, position_from_identifier, FavoriteSet, IndexRecord, Tutorial};
use crate::search::SearchIndex;
use crate::store::{load_persisted, FavoritesBackend};
use std::collections::BTreeSet;

/// The names [`FavoritesIndex`] needs from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSettings {
    pub favorites_key: String,
    pub domain_identifier: String,
    pub content_type: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self::from(&FavdexConfig::default())
    }
}

impl From<&FavdexConfig> for IndexSettings {
    fn from(config: &FavdexConfig) -> Self {
        Self {
            favorites_key: config.favorites_key.clone(),
            domain_identifier: config.domain_identifier.clone(),
            content_type: config.content_type.clone(),
        }
    }
}

/// The membership change a mutation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Favorited,
    Unfavorited,
}

/// Result of [`FavoritesIndex::reconcile`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Favorites that were missing from the index and got re-submitted.
    pub reindexed: usize,
    /// Index records with no matching favorite that got deleted.
    pub removed: usize,
    /// Favorites missing from the index whose tutorial could not be resolved.
    pub unresolved: usize,
}

pub struct FavoritesIndex<B: FavoritesBackend, I: SearchIndex> {
    backend: B,
    index: I,
    favorites: FavoriteSet,
    settings: IndexSettings,
}

impl<B: FavoritesBackend, I: SearchIndex> FavoritesIndex<B, I> {
    /// Build the index, restoring whatever favorites were persisted before.
    pub fn new(backend: B, index: I, settings: IndexSettings) -> Self {
        let favorites = load_persisted(&backend, &settings.favorites_key);
        Self {
            backend,
            index,
            favorites,
            settings,
        }
    }

    pub fn is_favorite(&self, position: usize) -> bool {
        self.favorites.contains(position)
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn search_index(&self) -> &I {
        &self.index
    }

    /// Flip membership of `position`, persisting and mirroring the change.
    pub fn toggle_favorite(&mut self, position: usize, item: &Tutorial) -> Result<Toggle> {
        let favorite = !self.is_favorite(position);
        let change = self.set_favorite(position, item, favorite)?;
        Ok(change.unwrap_or(if favorite {
            Toggle::Favorited
        } else {
            Toggle::Unfavorited
        }))
    }

    /// Put `position` in the requested state.
    ///
    /// Returns `Ok(None)` without touching storage or the index when it is
    /// already there.
    pub fn set_favorite(
        &mut self,
        position: usize,
        item: &Tutorial,
        favorite: bool,
    ) -> Result<Option<Toggle>> {
        if self.is_favorite(position) == favorite {
            return Ok(None);
        }

        let mut next = self.favorites.clone();
        if favorite {
            next.insert(position);
        } else {
            next.remove(position);
        }

        self.backend
            .save_favorites(&self.settings.favorites_key, next.positions())?;
        self.favorites = next;

        if favorite {
            self.dispatch_index(vec![self.record_for(position, item)]);
            Ok(Some(Toggle::Favorited))
        } else {
            self.dispatch_delete(vec![identifier_for(position)]);
            Ok(Some(Toggle::Unfavorited))
        }
    }

    /// Re-read the persisted record, discarding in-memory state.
    pub fn reload(&mut self) -> &FavoriteSet {
        self.favorites = load_persisted(&self.backend, &self.settings.favorites_key);
        &self.favorites
    }

    /// Diff the search index against the favorites and repair it.
    ///
    /// Favorites absent from the index are re-indexed using `items` to
    /// resolve their title and subtitle; identifiers in our domain that are
    /// no longer favorites are deleted. Both go out as one batch each.
    pub fn reconcile(&self, items: &[Tutorial]) -> Result<ReconcileReport> {
        let indexed: BTreeSet<String> = self
            .index
            .indexed_identifiers(&self.settings.domain_identifier)?
            .into_iter()
            .collect();
        let mut report = ReconcileReport::default();

        let mut missing = Vec::new();
        for position in self.favorites.iter() {
            if indexed.contains(&identifier_for(position)) {
                continue;
            }
            match items.iter().find(|t| t.position == position) {
                Some(item) => missing.push(self.record_for(position, item)),
                None => report.unresolved += 1,
            }
        }

        let stale: Vec<String> = indexed
            .into_iter()
            .filter(|id| match position_from_identifier(id) {
                Some(position) => !self.favorites.contains(position),
                None => true,
            })
            .collect();

        report.reindexed = missing.len();
        report.removed = stale.len();

        if !missing.is_empty() {
            self.dispatch_index(missing);
        }
        if !stale.is_empty() {
            self.dispatch_delete(stale);
        }

        if report.unresolved > 0 {
            log::warn!(
                "{} favorite(s) could not be re-indexed: no tutorial at that position",
                report.unresolved
            );
        }
        Ok(report)
    }

    fn record_for(&self, position: usize, item: &Tutorial) -> IndexRecord {
        IndexRecord::for_position(
            position,
            item,
            &self.settings.domain_identifier,
            &self.settings.content_type,
        )
    }

    fn dispatch_index(&self, records: Vec<IndexRecord>) {
        let identifiers = joined(records.iter().map(|r| r.identifier.as_str()));
        self.index.index_items(
            records,
            Box::new(move |outcome| match outcome {
                Ok(()) => log::info!("search item(s) {} indexed", identifiers),
                Err(e) => log::error!("indexing error for {}: {}", identifiers, e),
            }),
        );
    }

    fn dispatch_delete(&self, identifiers: Vec<String>) {
        let joined_ids = joined(identifiers.iter().map(String::as_str));
        self.index.delete_items(
            identifiers,
            Box::new(move |outcome| match outcome {
                Ok(()) => log::info!("search item(s) {} removed from index", joined_ids),
                Err(e) => log::error!("deindexing error for {}: {}", joined_ids, e),
            }),
        );
    }
}

fn joined<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.collect::<Vec<_>>().join(",")
}
