use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use std::path::PathBuf;

use weightlog::core::conflict::apply_edit;
use weightlog::core::store::StoreError;
use weightlog::core::validate::{EntryForm, EntryValidator};
use weightlog::models::WeightUnit;
use weightlog::output;
use weightlog::output::human;

pub struct EditArgs {
    pub weight: Option<String>,
    pub muscle: Option<String>,
    pub fat: Option<String>,
    pub visceral: Option<String>,
    pub date: Option<NaiveDate>,
    pub image: Option<PathBuf>,
    pub clear_image: bool,
}

pub fn run(id: &str, args: EditArgs, unit: Option<WeightUnit>, human_flag: bool) -> Result<()> {
    let (config, mut store) = super::open_store()?;
    let unit = super::active_unit(&config, unit);

    let existing = store
        .get(id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
    let mut form = EntryForm::from_entry(existing, unit);
    if let Some(w) = args.weight {
        form.weight = w;
    }
    if let Some(m) = args.muscle {
        form.muscle_mass = m;
    }
    if let Some(f) = args.fat {
        form.body_fat = f;
    }
    if let Some(v) = args.visceral {
        form.visceral_fat = v;
    }
    if args.date.is_some() {
        form.date = super::entry_timestamp(args.date)?;
    }
    if args.clear_image {
        form.image = None;
    } else if let Some(path) = &args.image {
        form.image = Some(std::fs::read(path)?);
    }

    let validator = EntryValidator::new(config.limits);
    let candidate = validator.validate(&form, Utc::now())?;
    let change = apply_edit(&mut store, id, candidate)?;
    let entry = store
        .get(id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

    if human_flag {
        println!("Updated: {}", human::format_entry(entry, unit));
        super::warn_if_unsaved(&change);
    } else {
        let out = output::success(
            "edit",
            json!({
                "entry": output::entry_view(entry, unit),
                "durability": super::durability(&change),
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
