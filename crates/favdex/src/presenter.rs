//! # List Presenter
//!
//! [`ListPresenter`] is the glue a list UI drives. It owns the loaded
//! tutorials and a [`FavoritesIndex`], and translates row-level events into
//! favorites operations:
//!
//! - **Render**: [`ListPresenter::rows`] yields one [`Row`] per tutorial with
//!   its accessory (checkmark iff favorite).
//! - **Edit**: [`ListPresenter::editing_style`] tells the UI whether a row
//!   offers insert (add favorite) or delete (remove favorite);
//!   [`ListPresenter::commit_edit`] applies the choice.
//! - **Activate**: [`ListPresenter::activate`] returns the URL to open.
//!
//! Unlike [`FavoritesIndex`], the presenter knows the list, so it is where
//! positions are bounds-checked: an out-of-range position is
//! [`FavdexError::ItemNotFound`].

use crate::error::{FavdexError, Result};
use crate::favorites::{FavoritesIndex, ReconcileReport, Toggle};
use crate::model::Tutorial;
use crate::search::SearchIndex;
use crate::source::{load_or_empty, TutorialSource};
use crate::store::FavoritesBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessory {
    None,
    Checkmark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditingStyle {
    Insert,
    Delete,
}

/// Display state of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub position: usize,
    pub title: String,
    pub subtitle: String,
    pub accessory: Accessory,
}

impl Row {
    /// Two-line label: title, then subtitle.
    pub fn label(&self) -> String {
        format!("{}\n{}", self.title, self.subtitle)
    }

    pub fn is_favorite(&self) -> bool {
        self.accessory == Accessory::Checkmark
    }
}

pub struct ListPresenter<B: FavoritesBackend, I: SearchIndex> {
    items: Vec<Tutorial>,
    favorites: FavoritesIndex<B, I>,
    base_url: String,
}

impl<B: FavoritesBackend, I: SearchIndex> ListPresenter<B, I> {
    pub fn new(items: Vec<Tutorial>, favorites: FavoritesIndex<B, I>, base_url: &str) -> Self {
        Self {
            items,
            favorites,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build from a source; a failing source yields an empty list.
    pub fn from_source<S: TutorialSource + ?Sized>(
        source: &S,
        favorites: FavoritesIndex<B, I>,
        base_url: &str,
    ) -> Self {
        Self::new(load_or_empty(source), favorites, base_url)
    }

    /// Replace the tutorial list. Favorites are left as they are.
    pub fn reload<S: TutorialSource + ?Sized>(&mut self, source: &S) {
        self.items = load_or_empty(source);
    }

    pub fn items(&self) -> &[Tutorial] {
        &self.items
    }

    pub fn item(&self, position: usize) -> Option<&Tutorial> {
        self.items.get(position)
    }

    pub fn row_count(&self) -> usize {
        self.items.len()
    }

    pub fn favorites(&self) -> &FavoritesIndex<B, I> {
        &self.favorites
    }

    pub fn is_favorite(&self, position: usize) -> bool {
        self.favorites.is_favorite(position)
    }

    pub fn row(&self, position: usize) -> Option<Row> {
        self.item(position).map(|item| Row {
            position,
            title: item.title.clone(),
            subtitle: item.subtitle.clone(),
            accessory: if self.is_favorite(position) {
                Accessory::Checkmark
            } else {
                Accessory::None
            },
        })
    }

    pub fn rows(&self) -> Vec<Row> {
        (0..self.items.len()).filter_map(|p| self.row(p)).collect()
    }

    pub fn editing_style(&self, position: usize) -> EditingStyle {
        if self.is_favorite(position) {
            EditingStyle::Delete
        } else {
            EditingStyle::Insert
        }
    }

    /// Apply an insert/delete edit. `Ok(None)` when the row was already in
    /// the requested state.
    pub fn commit_edit(&mut self, position: usize, style: EditingStyle) -> Result<Option<Toggle>> {
        let item = self.resolve(position)?.clone();
        self.favorites
            .set_favorite(position, &item, style == EditingStyle::Insert)
    }

    pub fn toggle(&mut self, position: usize) -> Result<Toggle> {
        let item = self.resolve(position)?.clone();
        self.favorites.toggle_favorite(position, &item)
    }

    /// URL for the tutorial at `position`, one-based in the path.
    pub fn tutorial_url(&self, position: usize) -> String {
        format!("{}/{}", self.base_url, position + 1)
    }

    /// Row activation: the URL the external viewer should open.
    pub fn activate(&self, position: usize) -> Result<String> {
        self.resolve(position)?;
        Ok(self.tutorial_url(position))
    }

    /// Opt-in repair of the search index against the current list.
    pub fn reconcile(&self) -> Result<ReconcileReport> {
        self.favorites.reconcile(&self.items)
    }

    fn resolve(&self, position: usize) -> Result<&Tutorial> {
        self.item(position)
            .ok_or(FavdexError::ItemNotFound(position))
    }
}
