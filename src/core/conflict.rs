use chrono::NaiveDate;
use thiserror::Error;

use crate::core::store::{Change, EntryStore, Persistence, StoreError};
use crate::models::entry::{WeightEntry, local_day};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConflictError {
    #[error("a replacement is already awaiting confirmation")]
    Pending,
    #[error("no replacement is awaiting confirmation")]
    NothingPending,
    #[error("entry {id} already exists on {day}")]
    DayTaken { day: NaiveDate, id: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResolverState {
    #[default]
    Idle,
    AwaitingConfirmation {
        candidate: WeightEntry,
        existing: WeightEntry,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Created(Change),
    /// Another entry holds the candidate's day; ask before replacing it.
    NeedsConfirmation { existing: WeightEntry },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Replace,
    Keep,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Replaced(Change),
    Kept,
}

/// Keeps at most one entry per calendar day when new entries are submitted.
#[derive(Debug, Default)]
pub struct ConflictResolver {
    state: ResolverState,
}

impl ConflictResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ResolverState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ResolverState::Idle
    }

    /// Create `candidate`, or hold it for confirmation if its day is taken.
    pub fn submit<P: Persistence>(
        &mut self,
        store: &mut EntryStore<P>,
        candidate: WeightEntry,
    ) -> Result<Submission, ConflictError> {
        if !self.is_idle() {
            return Err(ConflictError::Pending);
        }
        match store.find_by_day(candidate.date).cloned() {
            None => Ok(Submission::Created(store.create(candidate))),
            Some(existing) => {
                self.state = ResolverState::AwaitingConfirmation {
                    candidate,
                    existing: existing.clone(),
                };
                Ok(Submission::NeedsConfirmation { existing })
            }
        }
    }

    /// Settle a pending submission. `Replace` overwrites the existing entry
    /// in place under its own id; `Keep` drops the candidate.
    pub fn resolve<P: Persistence>(
        &mut self,
        store: &mut EntryStore<P>,
        decision: Decision,
    ) -> Result<Resolution, ConflictError> {
        let ResolverState::AwaitingConfirmation {
            candidate,
            existing,
        } = std::mem::take(&mut self.state)
        else {
            return Err(ConflictError::NothingPending);
        };
        match decision {
            Decision::Keep => Ok(Resolution::Kept),
            Decision::Replace => {
                let change = store.update(&existing.id, candidate)?;
                Ok(Resolution::Replaced(change))
            }
        }
    }
}

/// Replace every field of entry `id` except the id itself. The entry may not
/// move onto a calendar day that another entry already holds.
pub fn apply_edit<P: Persistence>(
    store: &mut EntryStore<P>,
    id: &str,
    candidate: WeightEntry,
) -> Result<Change, ConflictError> {
    if store.get(id).is_none() {
        return Err(StoreError::NotFound(id.to_string()).into());
    }
    let day = local_day(&candidate.date);
    if let Some(other) = store.all().iter().find(|e| e.id != id && e.day() == day) {
        return Err(ConflictError::DayTaken {
            day: other.day(),
            id: other.id.clone(),
        });
    }
    Ok(store.update(id, candidate)?)
}
