pub mod add;
pub mod chart;
pub mod config;
pub mod delete;
pub mod edit;
pub mod history;
pub mod image;
pub mod init;
pub mod latest;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde_json::json;

use weightlog::core::store::{Change, EntryStore};
use weightlog::db::Database;
use weightlog::models::WeightUnit;
use weightlog::models::config::Config;

pub fn open_store() -> Result<(Config, EntryStore<Database>)> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path()?)?;
    Ok((config, EntryStore::open(db)))
}

pub fn active_unit(config: &Config, unit: Option<WeightUnit>) -> WeightUnit {
    unit.unwrap_or(config.units.weight)
}

/// Timestamp for a picked day: that day at the current local time of day.
pub fn entry_timestamp(date: Option<NaiveDate>) -> Result<DateTime<Utc>> {
    let now = Local::now();
    let Some(day) = date else {
        return Ok(now.with_timezone(&Utc));
    };
    let local = Local
        .from_local_datetime(&day.and_time(now.time()))
        .earliest()
        .ok_or_else(|| anyhow::anyhow!("{} has no such local time", day))?;
    Ok(local.with_timezone(&Utc))
}

/// Extra fields describing whether a change reached disk.
pub fn durability(change: &Change) -> serde_json::Value {
    json!({
        "durable": change.is_durable(),
        "save_error": change.save_error,
    })
}

pub fn warn_if_unsaved(change: &Change) {
    if let Some(e) = &change.save_error {
        eprintln!(
            "{}",
            weightlog::output::human::format_error(&format!("change not saved: {}", e))
        );
    }
}
