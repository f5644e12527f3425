use std::sync::{Mutex, MutexGuard, PoisonError};

use voca_types::{AuthRecord, FavoriteEntry, LookupRecord};

use crate::backend::KeyValueStore;
use crate::error::{FavoriteError, StoreError};

/// Persisted auth record and favorites.
///
/// Every read-modify-write holds the backend lock for its whole duration,
/// so concurrent favorite edits cannot lose updates.
pub struct SessionStore {
    backend: Mutex<Box<dyn KeyValueStore>>,
    auth_key: String,
    favorites_key: String,
}

impl SessionStore {
    pub fn new(backend: impl KeyValueStore + 'static, namespace: &str) -> Self {
        Self {
            backend: Mutex::new(Box::new(backend)),
            auth_key: format!("{namespace}-auth"),
            favorites_key: format!("{namespace}-favorites"),
        }
    }

    fn backend(&self) -> MutexGuard<'_, Box<dyn KeyValueStore>> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stored auth record; unreadable data counts as absent
    pub fn load(&self) -> Option<AuthRecord> {
        let raw = match self.backend().get(&self.auth_key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Error reading auth record: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Error loading user from storage: {}", e);
                None
            }
        }
    }

    pub fn save(&self, record: &AuthRecord) -> Result<(), StoreError> {
        let data = serde_json::to_string(record)?;
        self.backend().set(&self.auth_key, &data)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.backend().delete(&self.auth_key)
    }

    /// Favorites in insertion order
    pub fn list(&self) -> Vec<FavoriteEntry> {
        let backend = self.backend();
        read_favorites(&**backend, &self.favorites_key).unwrap_or_else(|e| {
            tracing::warn!("Error reading favorites: {}", e);
            Vec::new()
        })
    }

    /// Case-insensitive match on term or definition; blank query lists all
    pub fn filter(&self, query: &str) -> Vec<FavoriteEntry> {
        let query = query.trim().to_lowercase();
        self.list()
            .into_iter()
            .filter(|f| {
                query.is_empty()
                    || f.term.to_lowercase().contains(&query)
                    || f.definition.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.list().iter().any(|f| same_term(&f.term, term))
    }

    /// Entry whose id is `key`, or whose term matches it the way duplicates do
    pub fn find(&self, key: &str) -> Option<FavoriteEntry> {
        self.list()
            .into_iter()
            .find(|f| f.id == key || same_term(&f.term, key))
    }

    /// Append an entry. A term already saved, or a collection that cannot be
    /// read back, is rejected and the collection is left as it was.
    pub fn add(&self, entry: FavoriteEntry) -> Result<(), FavoriteError> {
        let mut backend = self.backend();
        let mut favorites = read_favorites(&**backend, &self.favorites_key)?;

        if favorites.iter().any(|f| same_term(&f.term, &entry.term)) {
            return Err(FavoriteError::Duplicate(entry.term));
        }

        tracing::debug!("Adding favorite '{}'", entry.term);
        favorites.push(entry);
        let data = serde_json::to_string(&favorites).map_err(StoreError::from)?;
        backend.set(&self.favorites_key, &data)?;
        Ok(())
    }

    /// Returns whether anything was removed. An unreadable collection is
    /// left in place and reported.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut backend = self.backend();
        let mut favorites = read_favorites(&**backend, &self.favorites_key)?;

        let before = favorites.len();
        favorites.retain(|f| f.id != id);
        if favorites.len() == before {
            return Ok(false);
        }

        let data = serde_json::to_string(&favorites)?;
        backend.set(&self.favorites_key, &data)?;
        Ok(true)
    }
}

/// Stored favorites; a missing key is an empty collection
fn read_favorites(
    backend: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<FavoriteEntry>, StoreError> {
    match backend.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

fn same_term(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Build a favorite from a resolved record, stamped now
pub fn favorite_from_record(record: &LookupRecord) -> FavoriteEntry {
    FavoriteEntry {
        id: uuid::Uuid::new_v4().to_string(),
        term: record.term.clone(),
        definition: record.definition.clone(),
        part_of_speech: record.part_of_speech.clone(),
        saved_at: chrono::Utc::now().to_rfc3339(),
        example_count: record.examples.len() as u32,
    }
}
