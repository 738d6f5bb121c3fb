//! # Domain Model
//!
//! This module defines the three records the rest of the crate passes around:
//! [`Tutorial`], [`FavoriteSet`] and [`IndexRecord`].
//!
//! ## Positions
//!
//! A tutorial is identified by its zero-based `position` in the currently
//! loaded list. Positions are assigned at load time and never change for the
//! lifetime of that list. The same number doubles as the search-index
//! identifier, in its decimal string form (`3` → `"3"`).
//!
//! Reloading the list can re-number items. Favorites are keyed by position,
//! not by title, so a reload that reorders items silently re-targets them.
//! Callers that reload should treat positions from the old list as stale.
//!
//! ## FavoriteSet
//!
//! An ordered list of positions with no duplicates. Insertion order is kept
//! because it is what gets persisted; membership is what matters to every
//! reader. Restored sets are de-duplicated on the way in so a hand-edited or
//! legacy record cannot break the invariant.
//!
//! ## Expiration
//!
//! Search records carry an expiration date. Records built by this crate use
//! [`far_future`] so that the index's default expiry never drops them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the displayed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    pub position: usize,
    pub title: String,
    pub subtitle: String,
}

impl Tutorial {
    pub fn new(position: usize, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            position,
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }

    /// The search-index identifier for this tutorial.
    pub fn identifier(&self) -> String {
        identifier_for(self.position)
    }
}

/// String form of a position, used as the search-index identifier.
pub fn identifier_for(position: usize) -> String {
    position.to_string()
}

/// Parse a search-index identifier back into a position.
/// Returns `None` for identifiers this crate did not produce.
pub fn position_from_identifier(identifier: &str) -> Option<usize> {
    identifier.parse().ok()
}

/// The expiration used for every record we index: 4001-01-01T00:00:00Z.
pub fn far_future() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(4001, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Ordered, duplicate-free set of favorited positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct FavoriteSet {
    positions: Vec<usize>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    /// Append a position. Returns false if it was already present.
    pub fn insert(&mut self, position: usize) -> bool {
        if self.contains(position) {
            return false;
        }
        self.positions.push(position);
        true
    }

    /// Remove a position. Returns false if it was not present.
    pub fn remove(&mut self, position: usize) -> bool {
        match self.positions.iter().position(|p| *p == position) {
            Some(idx) => {
                self.positions.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl From<Vec<usize>> for FavoriteSet {
    fn from(positions: Vec<usize>) -> Self {
        positions.into_iter().collect()
    }
}

impl From<FavoriteSet> for Vec<usize> {
    fn from(set: FavoriteSet) -> Self {
        set.positions
    }
}

impl FromIterator<usize> for FavoriteSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut set = FavoriteSet::new();
        for position in iter {
            set.insert(position);
        }
        set
    }
}

/// The search index's view of a favorited tutorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub identifier: String,
    pub domain_identifier: String,
    pub content_type: String,
    pub title: String,
    pub description: String,
    pub expiration: DateTime<Utc>,
}

impl IndexRecord {
    /// Build the record for the tutorial favorited at `position`.
    ///
    /// The identifier always comes from `position`, never from
    /// `tutorial.position`.
    pub fn for_position(
        position: usize,
        tutorial: &Tutorial,
        domain_identifier: &str,
        content_type: &str,
    ) -> Self {
        Self {
            identifier: identifier_for(position),
            domain_identifier: domain_identifier.to_string(),
            content_type: content_type.to_string(),
            title: tutorial.title.clone(),
            description: tutorial.subtitle.clone(),
            expiration: far_future(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }
}
