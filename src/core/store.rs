use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::entry::{WeightEntry, local_day};

/// Where the entry list lives between sessions.
pub trait Persistence {
    fn load(&self) -> Result<Vec<WeightEntry>>;
    fn save(&self, entries: &[WeightEntry]) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("entry not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    Created(String),
    Updated(String),
    Deleted(Vec<String>),
}

/// Outcome of a mutation. The in-memory change always stands; `save_error`
/// is set when mirroring it to persistence failed.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Change {
    pub kind: ChangeKind,
    pub save_error: Option<String>,
}

impl Change {
    pub fn is_durable(&self) -> bool {
        self.save_error.is_none()
    }

    /// Id of the created or updated entry.
    pub fn entry_id(&self) -> Option<&str> {
        match &self.kind {
            ChangeKind::Created(id) | ChangeKind::Updated(id) => Some(id),
            ChangeKind::Deleted(_) => None,
        }
    }

    /// Ids removed by a delete, each once.
    pub fn deleted_ids(&self) -> &[String] {
        match &self.kind {
            ChangeKind::Deleted(ids) => ids,
            ChangeKind::Created(_) | ChangeKind::Updated(_) => &[],
        }
    }
}

/// Owner of the session's entries, mirrored to a [`Persistence`] backend on
/// every mutation.
pub struct EntryStore<P: Persistence> {
    backend: P,
    entries: Vec<WeightEntry>,
}

impl<P: Persistence> EntryStore<P> {
    /// Load entries from `backend`. A failed load starts an empty store.
    pub fn open(backend: P) -> Self {
        let entries = match backend.load() {
            Ok(entries) => {
                debug!(count = entries.len(), "loaded entries");
                entries
            }
            Err(e) => {
                warn!(error = %e, "could not load entries; starting empty");
                Vec::new()
            }
        };
        Self { backend, entries }
    }

    pub fn all(&self) -> &[WeightEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&WeightEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries newest first.
    pub fn history(&self) -> Vec<&WeightEntry> {
        let mut out: Vec<&WeightEntry> = self.entries.iter().collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }

    /// Entries oldest first.
    pub fn chronological(&self) -> Vec<&WeightEntry> {
        let mut out: Vec<&WeightEntry> = self.entries.iter().collect();
        out.sort_by_key(|e| e.date);
        out
    }

    pub fn latest(&self) -> Option<&WeightEntry> {
        self.entries.iter().max_by_key(|e| e.date)
    }

    /// The entry on the same local calendar day as `date`, ignoring time of day.
    pub fn find_by_day(&self, date: DateTime<Utc>) -> Option<&WeightEntry> {
        self.find_on(local_day(&date))
    }

    pub fn find_on(&self, day: NaiveDate) -> Option<&WeightEntry> {
        self.entries.iter().find(|e| e.day() == day)
    }

    /// Append an entry. Same-day uniqueness is the caller's concern.
    pub fn create(&mut self, entry: WeightEntry) -> Change {
        let id = entry.id.clone();
        self.entries.push(entry);
        self.commit(ChangeKind::Created(id))
    }

    /// Replace the entry with `id`, keeping that id.
    pub fn update(&mut self, id: &str, mut entry: WeightEntry) -> Result<Change, StoreError> {
        let slot = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry.id = id.to_string();
        *slot = entry;
        Ok(self.commit(ChangeKind::Updated(id.to_string())))
    }

    /// Remove every entry in `ids`. Nothing is removed if any id is unknown.
    /// Repeated ids count once.
    pub fn delete(&mut self, ids: &[String]) -> Result<Change, StoreError> {
        if let Some(missing) = ids.iter().find(|id| self.get(id).is_none()) {
            return Err(StoreError::NotFound(missing.clone()));
        }
        let mut removed: Vec<String> = Vec::with_capacity(ids.len());
        for id in ids {
            if !removed.contains(id) {
                removed.push(id.clone());
            }
        }
        self.entries.retain(|e| !removed.contains(&e.id));
        Ok(self.commit(ChangeKind::Deleted(removed)))
    }

    fn commit(&self, kind: ChangeKind) -> Change {
        let save_error = match self.backend.save(&self.entries) {
            Ok(()) => {
                debug!(count = self.entries.len(), "saved entries");
                None
            }
            Err(e) => {
                warn!(error = %e, "could not save entries; change kept in memory only");
                Some(e.to_string())
            }
        };
        Change { kind, save_error }
    }
}
