use super::{Completion, SearchIndex};
use crate::error::{FavdexError, Result};
use crate::model::IndexRecord;
use chrono::Utc;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const INDEX_FILE_NAME: &str = "search-index.json";

/// Local search index kept in a single JSON file.
///
/// Operations run synchronously and invoke their completion before
/// returning. Records are keyed by identifier; indexing an existing
/// identifier replaces the record.
pub struct FsIndex {
    path: PathBuf,
}

impl FsIndex {
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(INDEX_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, IndexRecord>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(FavdexError::Io)?;
        let records: Vec<IndexRecord> =
            serde_json::from_str(&content).map_err(FavdexError::Serialization)?;
        Ok(records
            .into_iter()
            .map(|r| (r.identifier.clone(), r))
            .collect())
    }

    fn save(&self, records: &BTreeMap<String, IndexRecord>) -> Result<()> {
        let root = self
            .path
            .parent()
            .ok_or_else(|| FavdexError::Index("Index path has no parent".to_string()))?;
        if !root.exists() {
            fs::create_dir_all(root).map_err(FavdexError::Io)?;
        }

        let list: Vec<&IndexRecord> = records.values().collect();
        let content = serde_json::to_string_pretty(&list).map_err(FavdexError::Serialization)?;

        let tmp = root.join(format!(".search-index-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content).map_err(FavdexError::Io)?;
        fs::rename(&tmp, &self.path).map_err(FavdexError::Io)?;
        Ok(())
    }

    fn upsert(&self, items: Vec<IndexRecord>) -> Result<()> {
        let mut records = self.load()?;
        for record in items {
            records.insert(record.identifier.clone(), record);
        }
        self.save(&records)
    }

    fn remove(&self, identifiers: &[String]) -> Result<()> {
        let mut records = self.load()?;
        let before = records.len();
        for identifier in identifiers {
            records.remove(identifier);
        }
        if records.len() != before {
            self.save(&records)?;
        }
        Ok(())
    }

    /// All stored records, expired ones included.
    pub fn records(&self) -> Result<Vec<IndexRecord>> {
        Ok(self.load()?.into_values().collect())
    }

    /// Case-insensitive substring search over title and description.
    /// Expired records never match. An empty query returns every live record.
    pub fn search(&self, query: &str) -> Result<Vec<IndexRecord>> {
        let now = Utc::now();
        let query_lower = query.to_lowercase();
        Ok(self
            .load()?
            .into_values()
            .filter(|r| !r.is_expired(now))
            .filter(|r| {
                query_lower.is_empty()
                    || r.title.to_lowercase().contains(&query_lower)
                    || r.description.to_lowercase().contains(&query_lower)
            })
            .collect())
    }
}

impl SearchIndex for FsIndex {
    fn index_items(&self, records: Vec<IndexRecord>, done: Completion) {
        done(self.upsert(records));
    }

    fn delete_items(&self, identifiers: Vec<String>, done: Completion) {
        done(self.remove(&identifiers));
    }

    fn indexed_identifiers(&self, domain: &str) -> Result<Vec<String>> {
        Ok(self
            .load()?
            .into_values()
            .filter(|r| r.domain_identifier == domain)
            .map(|r| r.identifier)
            .collect())
    }
}
