#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::cell::RefCell;
use std::rc::Rc;
use weightlog::core::store::{EntryStore, Persistence};
use weightlog::db::Database;
use weightlog::models::{WeightEntry, WeightUnit};
use tempfile::TempDir;

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

/// Local wall-clock time, as stored (UTC).
pub fn local_ts(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(year, month, day, hour, min, 0)
        .earliest()
        .unwrap()
        .with_timezone(&Utc)
}

/// Entry with fixed body composition: 20% fat, 40% muscle, visceral 8.
pub fn make_entry(date: DateTime<Utc>, weight_kg: f64) -> WeightEntry {
    WeightEntry::new(date, weight_kg, 20.0, 40.0, 8, WeightUnit::Kg)
}

/// In-memory persistence. Clones share state, so a test can keep one
/// handle while the store owns another.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    saved: Rc<RefCell<Vec<WeightEntry>>>,
    saves: Rc<RefCell<usize>>,
}

impl MemoryBackend {
    pub fn with(entries: Vec<WeightEntry>) -> Self {
        let backend = Self::default();
        *backend.saved.borrow_mut() = entries;
        backend
    }

    pub fn snapshot(&self) -> Vec<WeightEntry> {
        self.saved.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl Persistence for MemoryBackend {
    fn load(&self) -> Result<Vec<WeightEntry>> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, entries: &[WeightEntry]) -> Result<()> {
        *self.saved.borrow_mut() = entries.to_vec();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

/// Loads fine, refuses every save.
pub struct ReadOnlyBackend;

impl Persistence for ReadOnlyBackend {
    fn load(&self) -> Result<Vec<WeightEntry>> {
        Ok(Vec::new())
    }

    fn save(&self, _entries: &[WeightEntry]) -> Result<()> {
        anyhow::bail!("disk full")
    }
}

/// Fails to load.
pub struct UnreadableBackend;

impl Persistence for UnreadableBackend {
    fn load(&self) -> Result<Vec<WeightEntry>> {
        anyhow::bail!("corrupt store")
    }

    fn save(&self, _entries: &[WeightEntry]) -> Result<()> {
        Ok(())
    }
}

/// A store over a fresh in-memory backend, plus a handle on that backend.
pub fn memory_store(entries: Vec<WeightEntry>) -> (MemoryBackend, EntryStore<MemoryBackend>) {
    let backend = MemoryBackend::with(entries);
    let store = EntryStore::open(backend.clone());
    (backend, store)
}
